use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reservation {
    pub id: i64,
    pub room_id: i64,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub status: ReservationStatus,
}

/// Only `pending-confirmation` and `checked-in` occupy a room for
/// availability purposes; `checked-out` and `cancelled` free it.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum ReservationStatus {
    PendingConfirmation,
    CheckedIn,
    CheckedOut,
    Cancelled,
}

impl ReservationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReservationStatus::PendingConfirmation => "pending-confirmation",
            ReservationStatus::CheckedIn => "checked-in",
            ReservationStatus::CheckedOut => "checked-out",
            ReservationStatus::Cancelled => "cancelled",
        }
    }

    pub fn from_str(s: &str) -> Self {
        match s {
            "checked-in" => ReservationStatus::CheckedIn,
            "checked-out" => ReservationStatus::CheckedOut,
            "cancelled" => ReservationStatus::Cancelled,
            _ => ReservationStatus::PendingConfirmation,
        }
    }

    pub fn is_blocking(&self) -> bool {
        matches!(
            self,
            ReservationStatus::PendingConfirmation | ReservationStatus::CheckedIn
        )
    }
}
