//! Date-aware room availability: the price/occupancy room filter minus
//! every room held by a blocking reservation overlapping the requested
//! half-open `[check_in, check_out)` window.

use chrono::NaiveDate;
use rusqlite::Connection;

use crate::db::queries;
use crate::models::Room;

/// Rooms bookable for the whole window. The caller must have validated
/// `check_out > check_in`; this function does not re-check it. Results stay
/// sorted cheapest first.
pub fn find_available_rooms(
    conn: &Connection,
    check_in: NaiveDate,
    check_out: NaiveDate,
    max_price: Option<i64>,
    min_occupancy: Option<u32>,
) -> anyhow::Result<Vec<Room>> {
    let rooms = queries::list_bookable_rooms(conn, max_price, min_occupancy)?;
    let blocked = queries::blocked_room_ids(conn, check_in, check_out)?;

    Ok(rooms
        .into_iter()
        .filter(|room| !blocked.contains(&room.id))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db;
    use crate::models::{ReservationStatus, RoomStatus};

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn setup() -> (Connection, i64) {
        let conn = db::init_db(":memory:").unwrap();
        let t = queries::create_room_type(&conn, "Double", 2, 1).unwrap();
        let room = queries::create_room(&conn, "D101", 1_000_000, RoomStatus::Available, t).unwrap();
        queries::create_reservation(
            &conn,
            room,
            d("2025-08-01"),
            d("2025-08-05"),
            ReservationStatus::PendingConfirmation,
        )
        .unwrap();
        (conn, room)
    }

    fn available(conn: &Connection, check_in: &str, check_out: &str) -> Vec<i64> {
        find_available_rooms(conn, d(check_in), d(check_out), None, None)
            .unwrap()
            .into_iter()
            .map(|r| r.id)
            .collect()
    }

    #[test]
    fn test_request_inside_reservation_excluded() {
        let (conn, room) = setup();
        assert!(!available(&conn, "2025-08-03", "2025-08-04").contains(&room));
    }

    #[test]
    fn test_request_overlapping_start_excluded() {
        let (conn, room) = setup();
        assert!(!available(&conn, "2025-07-30", "2025-08-02").contains(&room));
    }

    #[test]
    fn test_request_overlapping_end_excluded() {
        let (conn, room) = setup();
        assert!(!available(&conn, "2025-08-04", "2025-08-10").contains(&room));
    }

    #[test]
    fn test_request_containing_reservation_excluded() {
        let (conn, room) = setup();
        assert!(!available(&conn, "2025-07-25", "2025-08-20").contains(&room));
    }

    #[test]
    fn test_adjacent_request_included() {
        // reservation ends on the 5th; intervals are half-open, so a stay
        // starting the 5th does not collide
        let (conn, room) = setup();
        assert!(available(&conn, "2025-08-05", "2025-08-10").contains(&room));
    }

    #[test]
    fn test_non_blocking_reservation_ignored() {
        let conn = db::init_db(":memory:").unwrap();
        let t = queries::create_room_type(&conn, "Double", 2, 1).unwrap();
        let free =
            queries::create_room(&conn, "D201", 1_000_000, RoomStatus::Available, t).unwrap();
        queries::create_reservation(
            &conn,
            free,
            d("2025-08-01"),
            d("2025-08-05"),
            ReservationStatus::CheckedOut,
        )
        .unwrap();
        assert!(available(&conn, "2025-08-02", "2025-08-04").contains(&free));
    }

    #[test]
    fn test_price_and_occupancy_filters_apply() {
        let (conn, _room) = setup();
        let t = queries::create_room_type(&conn, "Family", 4, 2).unwrap();
        queries::create_room(&conn, "F301", 3_000_000, RoomStatus::Available, t).unwrap();

        let rooms =
            find_available_rooms(&conn, d("2025-09-01"), d("2025-09-03"), Some(2_000_000), None)
                .unwrap();
        assert_eq!(rooms.len(), 1);
        assert_eq!(rooms[0].name, "D101");

        let rooms =
            find_available_rooms(&conn, d("2025-09-01"), d("2025-09-03"), None, Some(4)).unwrap();
        assert_eq!(rooms.len(), 1);
        assert_eq!(rooms[0].name, "F301");
    }
}
