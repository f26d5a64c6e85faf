use serde::{Deserialize, Serialize};

/// A bookable extra (spa, buffet, tour, ...). The listed price is per
/// person for the whole stay, so totals scale with party size.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Service {
    pub id: i64,
    pub name: String,
    /// Per-person price in VND.
    pub price: i64,
}
