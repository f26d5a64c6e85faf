use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomType {
    pub id: i64,
    pub name: String,
    pub occupancy: u32,
    pub beds: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Room {
    pub id: i64,
    pub name: String,
    /// Per-night price in VND.
    pub price: i64,
    pub status: RoomStatus,
    pub room_type: RoomType,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum RoomStatus {
    Available,
    Booked,
    Cleaning,
    UnderRepair,
}

impl RoomStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RoomStatus::Available => "available",
            RoomStatus::Booked => "booked",
            RoomStatus::Cleaning => "cleaning",
            RoomStatus::UnderRepair => "under-repair",
        }
    }

    pub fn from_str(s: &str) -> Self {
        match s {
            "available" => RoomStatus::Available,
            "booked" => RoomStatus::Booked,
            "cleaning" => RoomStatus::Cleaning,
            _ => RoomStatus::UnderRepair,
        }
    }
}
