pub mod booking_wizard;
pub mod not_found;

pub use booking_wizard::BookingWizardPage;
pub use not_found::NotFoundPage;
