use chrono::NaiveDate;

use crate::models::Service;

/// Most resort bookings are couples; a message that never mentions a head
/// count is assumed to be for two people.
pub const DEFAULT_PARTY_SIZE: u32 = 2;

/// A stay with no night count mentioned is assumed to be a single night.
pub const DEFAULT_NIGHTS: u32 = 1;

/// Structured view of one advisor message, rebuilt fresh per request and
/// discarded once the reply is composed.
#[derive(Debug, Clone)]
pub struct ParsedQuery {
    /// Budget in VND; 0 means "not specified".
    pub budget: i64,
    pub nights: u32,
    pub party_size: u32,
    /// Check-in / check-out pair, when a date phrase parsed.
    pub dates: Option<(NaiveDate, NaiveDate)>,
    /// Catalog services the message textually referenced.
    pub services: Vec<Service>,
}
