use serde::{Deserialize, Serialize};

/// Body of `GET /available-slots?date=YYYY-MM-DD`.
///
/// The slot strings are free-form time labels (e.g. "10:00") and are kept in
/// the order the booking service reports them.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AvailableSlotsResponse {
    pub available_slots: Vec<String>,
}

/// Body of `POST /book-lesson`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct BookingRequest {
    pub date: String,
    pub time: String,
    /// Lesson length in minutes.
    pub duration: u32,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub notes: String,
}

/// Error body the booking service returns on a non-2xx response.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct BookingErrorResponse {
    pub error: String,
}
