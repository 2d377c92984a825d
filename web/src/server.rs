use leptos::prelude::*;
use leptos::server;
use serde::{Deserialize, Serialize};
use shared_types::BookingRequest;

/// Outcome of forwarding a booking to the service: accepted, or refused with
/// the service's own reason. Transport and parse failures surface as
/// `ServerFnError` instead, so the two remote error kinds stay distinct on
/// the client.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum BookingSubmitResult {
    Accepted,
    Rejected { error: String },
}

#[cfg(feature = "ssr")]
use shared_types::{AvailableSlotsResponse, BookingErrorResponse};

#[cfg(feature = "ssr")]
#[derive(Debug, thiserror::Error)]
enum BookingApiError {
    #[error("booking service unreachable: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("booking service returned status {0}")]
    Status(reqwest::StatusCode),
}

/// Base URL of the external booking service.
#[cfg(feature = "ssr")]
fn booking_api_url() -> String {
    std::env::var("BOOKING_API_URL").unwrap_or_else(|_| "http://localhost:5000".to_string())
}

#[cfg(feature = "ssr")]
fn slots_url(base: &str, date: &str) -> String {
    format!(
        "{}/available-slots?date={}",
        base.trim_end_matches('/'),
        urlencoding::encode(date)
    )
}

#[cfg(feature = "ssr")]
fn book_lesson_url(base: &str) -> String {
    format!("{}/book-lesson", base.trim_end_matches('/'))
}

#[cfg(feature = "ssr")]
async fn fetch_slots(base: &str, date: &str) -> Result<Vec<String>, BookingApiError> {
    let response = reqwest::Client::new()
        .get(slots_url(base, date))
        .send()
        .await?;

    if !response.status().is_success() {
        return Err(BookingApiError::Status(response.status()));
    }

    let body: AvailableSlotsResponse = response.json().await?;
    Ok(body.available_slots)
}

#[cfg(feature = "ssr")]
async fn forward_booking(
    base: &str,
    request: &BookingRequest,
) -> Result<BookingSubmitResult, BookingApiError> {
    let response = reqwest::Client::new()
        .post(book_lesson_url(base))
        .json(request)
        .send()
        .await?;

    if response.status().is_success() {
        return Ok(BookingSubmitResult::Accepted);
    }

    // A non-2xx with a readable `{"error": ...}` body is an application
    // rejection; anything else counts as a transport-level failure.
    let status = response.status();
    match response.json::<BookingErrorResponse>().await {
        Ok(body) => Ok(BookingSubmitResult::Rejected { error: body.error }),
        Err(_) => Err(BookingApiError::Status(status)),
    }
}

/// Ask the booking service which time slots are still open on `date`
/// (ISO `YYYY-MM-DD`). The list comes back in the service's own order.
#[server]
pub async fn get_available_slots(date: String) -> Result<Vec<String>, ServerFnError> {
    #[cfg(feature = "ssr")]
    {
        match fetch_slots(&booking_api_url(), &date).await {
            Ok(slots) => Ok(slots),
            Err(e) => {
                tracing::warn!(%date, error = %e, "available-slots lookup failed");
                Err(ServerFnError::new(format!(
                    "Failed to load available slots for {}",
                    date
                )))
            }
        }
    }
    #[cfg(not(feature = "ssr"))]
    {
        let _ = date;
        Err(ServerFnError::new(
            "Server-side rendering not available".to_string(),
        ))
    }
}

/// Submit a completed booking to the service.
#[server]
pub async fn book_lesson(request: BookingRequest) -> Result<BookingSubmitResult, ServerFnError> {
    #[cfg(feature = "ssr")]
    {
        match forward_booking(&booking_api_url(), &request).await {
            Ok(BookingSubmitResult::Rejected { error }) => {
                tracing::info!(
                    date = %request.date,
                    time = %request.time,
                    %error,
                    "booking rejected by service"
                );
                Ok(BookingSubmitResult::Rejected { error })
            }
            Ok(result) => Ok(result),
            Err(e) => {
                tracing::warn!(date = %request.date, error = %e, "book-lesson call failed");
                Err(ServerFnError::new(
                    "Failed to reach the booking service".to_string(),
                ))
            }
        }
    }
    #[cfg(not(feature = "ssr"))]
    {
        let _ = request;
        Err(ServerFnError::new(
            "Server-side rendering not available".to_string(),
        ))
    }
}

#[cfg(all(test, feature = "ssr"))]
mod tests {
    use super::*;

    #[test]
    fn slots_url_encodes_the_date_and_trims_trailing_slash() {
        assert_eq!(
            slots_url("http://localhost:5000/", "2024-06-01"),
            "http://localhost:5000/available-slots?date=2024-06-01"
        );
        assert_eq!(
            slots_url("http://localhost:5000", "2024 06 01"),
            "http://localhost:5000/available-slots?date=2024%2006%2001"
        );
    }

    #[test]
    fn book_lesson_url_joins_the_endpoint() {
        assert_eq!(
            book_lesson_url("http://localhost:5000"),
            "http://localhost:5000/book-lesson"
        );
    }
}
