use serde::{Deserialize, Serialize};

/// Closed set of advisor intents. The regex tier only ever produces the two
/// availability variants; everything else comes from the LLM fallback.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    AskVoucher,
    AskRoomTypes,
    AskAvailableRoomsWithDates,
    AskAffordableRoomsWithServices,
    AskAffordableRooms,
    CheckService,
    AskPrice,
    General,
}

impl Intent {
    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::AskVoucher => "ask_voucher",
            Intent::AskRoomTypes => "ask_room_types",
            Intent::AskAvailableRoomsWithDates => "ask_available_rooms_with_dates",
            Intent::AskAffordableRoomsWithServices => "ask_affordable_rooms_with_services",
            Intent::AskAffordableRooms => "ask_affordable_rooms",
            Intent::CheckService => "check_service",
            Intent::AskPrice => "ask_price",
            Intent::General => "general",
        }
    }

    /// Parses an intent tag, defaulting to `General` for anything unknown.
    pub fn from_tag(s: &str) -> Self {
        match s {
            "ask_voucher" => Intent::AskVoucher,
            "ask_room_types" => Intent::AskRoomTypes,
            "ask_available_rooms_with_dates" => Intent::AskAvailableRoomsWithDates,
            "ask_affordable_rooms_with_services" => Intent::AskAffordableRoomsWithServices,
            "ask_affordable_rooms" => Intent::AskAffordableRooms,
            "check_service" => Intent::CheckService,
            "ask_price" => Intent::AskPrice,
            _ => Intent::General,
        }
    }
}
