pub mod duration_picker;
pub mod error;
pub mod loading;
pub mod time_slot_picker;

// Re-export commonly used components
pub use duration_picker::DurationPicker;
pub use error::ErrorNotice;
pub use loading::LoadingView;
pub use time_slot_picker::TimeSlotPicker;
