//! Domain models for customers and purchases.

pub mod customer;
pub mod id;
pub mod purchase;

pub use customer::Customer;
pub use id::{CustomerId, PurchaseId};
pub use purchase::{Purchase, PurchaseUpdate};

use chrono::{DateTime, Utc};

/// Format a timestamp for API responses, e.g. `Apr 09 2022 12:43:22`.
///
/// Seconds precision, no timezone suffix; the instant is already UTC.
#[must_use]
pub fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.format("%b %d %Y %H:%M:%S").to_string()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn test_format_timestamp() {
        let ts = Utc.with_ymd_and_hms(2022, 4, 9, 12, 43, 22).unwrap();
        assert_eq!(format_timestamp(ts), "Apr 09 2022 12:43:22");
    }

    #[test]
    fn test_format_timestamp_pads_day_and_time() {
        let ts = Utc.with_ymd_and_hms(2023, 12, 1, 3, 5, 7).unwrap();
        assert_eq!(format_timestamp(ts), "Dec 01 2023 03:05:07");
    }
}
