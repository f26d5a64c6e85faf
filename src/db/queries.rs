use std::collections::HashSet;

use chrono::NaiveDate;
use rusqlite::{params, Connection, Row};

use crate::models::{
    Reservation, ReservationStatus, Room, RoomStatus, RoomType, Service, Voucher, VoucherStatus,
};

const DATE_FMT: &str = "%Y-%m-%d";

fn date_to_sql(d: NaiveDate) -> String {
    d.format(DATE_FMT).to_string()
}

fn date_from_sql(s: &str) -> anyhow::Result<NaiveDate> {
    NaiveDate::parse_from_str(s, DATE_FMT)
        .map_err(|e| anyhow::anyhow!("invalid date in store: {s}: {e}"))
}

// ── Rooms ──

fn parse_room_row(row: &Row) -> anyhow::Result<Room> {
    let status: String = row.get(3)?;
    Ok(Room {
        id: row.get(0)?,
        name: row.get(1)?,
        price: row.get(2)?,
        status: RoomStatus::from_str(&status),
        room_type: RoomType {
            id: row.get(4)?,
            name: row.get(5)?,
            occupancy: row.get(6)?,
            beds: row.get(7)?,
        },
    })
}

/// Bookable rooms, cheapest first, optionally capped by per-night price and
/// floored by room-type occupancy. Reservation overlap is NOT considered
/// here; callers needing date-aware availability go through
/// `services::availability`.
pub fn list_bookable_rooms(
    conn: &Connection,
    max_price: Option<i64>,
    min_occupancy: Option<u32>,
) -> anyhow::Result<Vec<Room>> {
    let mut stmt = conn.prepare(
        "SELECT r.id, r.name, r.price, r.status, t.id, t.name, t.occupancy, t.beds
         FROM rooms r JOIN room_types t ON r.room_type_id = t.id
         WHERE r.status = 'available'
           AND (?1 IS NULL OR r.price <= ?1)
           AND (?2 IS NULL OR t.occupancy >= ?2)
         ORDER BY r.price ASC, r.id ASC",
    )?;

    let rows = stmt.query_map(params![max_price, min_occupancy], |row| {
        Ok(parse_room_row(row))
    })?;

    let mut rooms = vec![];
    for row in rows {
        rooms.push(row??);
    }
    Ok(rooms)
}

/// Room types with the cheapest current room price for each (None when no
/// room of that type exists yet).
pub fn list_room_types(conn: &Connection) -> anyhow::Result<Vec<(RoomType, Option<i64>)>> {
    let mut stmt = conn.prepare(
        "SELECT t.id, t.name, t.occupancy, t.beds, MIN(r.price)
         FROM room_types t LEFT JOIN rooms r ON r.room_type_id = t.id
         GROUP BY t.id, t.name, t.occupancy, t.beds
         ORDER BY t.id ASC",
    )?;

    let rows = stmt.query_map([], |row| {
        Ok((
            RoomType {
                id: row.get(0)?,
                name: row.get(1)?,
                occupancy: row.get(2)?,
                beds: row.get(3)?,
            },
            row.get::<_, Option<i64>>(4)?,
        ))
    })?;

    let mut types = vec![];
    for row in rows {
        types.push(row?);
    }
    Ok(types)
}

pub fn count_rooms(conn: &Connection) -> anyhow::Result<i64> {
    let count = conn.query_row("SELECT COUNT(*) FROM rooms", [], |row| row.get(0))?;
    Ok(count)
}

// ── Reservations ──

/// Rooms occupied by a blocking reservation somewhere inside
/// `[check_in, check_out)`. The three clauses cover a reservation starting
/// inside the range, ending inside it, or spanning it entirely; dates are
/// half-open so a reservation ending exactly on `check_in` does not block.
pub fn blocked_room_ids(
    conn: &Connection,
    check_in: NaiveDate,
    check_out: NaiveDate,
) -> anyhow::Result<HashSet<i64>> {
    let start = date_to_sql(check_in);
    let end = date_to_sql(check_out);

    let mut stmt = conn.prepare(
        "SELECT DISTINCT room_id FROM reservations
         WHERE status IN ('pending-confirmation', 'checked-in')
           AND (
             (check_in >= ?1 AND check_in < ?2)
             OR (check_out > ?1 AND check_out <= ?2)
             OR (check_in <= ?1 AND check_out >= ?2)
           )",
    )?;

    let rows = stmt.query_map(params![start, end], |row| row.get::<_, i64>(0))?;

    let mut ids = HashSet::new();
    for row in rows {
        ids.insert(row?);
    }
    Ok(ids)
}

fn parse_reservation_row(row: &Row) -> anyhow::Result<Reservation> {
    let check_in: String = row.get(2)?;
    let check_out: String = row.get(3)?;
    let status: String = row.get(4)?;
    Ok(Reservation {
        id: row.get(0)?,
        room_id: row.get(1)?,
        check_in: date_from_sql(&check_in)?,
        check_out: date_from_sql(&check_out)?,
        status: ReservationStatus::from_str(&status),
    })
}

pub fn get_reservations_for_room(
    conn: &Connection,
    room_id: i64,
) -> anyhow::Result<Vec<Reservation>> {
    let mut stmt = conn.prepare(
        "SELECT id, room_id, check_in, check_out, status
         FROM reservations WHERE room_id = ?1 ORDER BY check_in ASC",
    )?;

    let rows = stmt.query_map(params![room_id], |row| Ok(parse_reservation_row(row)))?;

    let mut reservations = vec![];
    for row in rows {
        reservations.push(row??);
    }
    Ok(reservations)
}

// ── Services ──

pub fn list_services(conn: &Connection) -> anyhow::Result<Vec<Service>> {
    let mut stmt = conn.prepare("SELECT id, name, price FROM services ORDER BY id ASC")?;

    let rows = stmt.query_map([], |row| {
        Ok(Service {
            id: row.get(0)?,
            name: row.get(1)?,
            price: row.get(2)?,
        })
    })?;

    let mut services = vec![];
    for row in rows {
        services.push(row?);
    }
    Ok(services)
}

// ── Vouchers ──

pub fn list_active_vouchers(conn: &Connection, today: NaiveDate) -> anyhow::Result<Vec<Voucher>> {
    let today = date_to_sql(today);
    let mut stmt = conn.prepare(
        "SELECT id, name, description, discount_percent, min_spend, valid_from, valid_until, status
         FROM vouchers
         WHERE status = 'active' AND valid_from <= ?1 AND valid_until >= ?1
         ORDER BY discount_percent DESC, id ASC",
    )?;

    let rows = stmt.query_map(params![today], |row| {
        let valid_from: String = row.get(5)?;
        let valid_until: String = row.get(6)?;
        let status: String = row.get(7)?;
        Ok((
            row.get::<_, i64>(0)?,
            row.get::<_, String>(1)?,
            row.get::<_, Option<String>>(2)?,
            row.get::<_, u32>(3)?,
            row.get::<_, i64>(4)?,
            valid_from,
            valid_until,
            status,
        ))
    })?;

    let mut vouchers = vec![];
    for row in rows {
        let (id, name, description, discount_percent, min_spend, valid_from, valid_until, status) =
            row?;
        vouchers.push(Voucher {
            id,
            name,
            description,
            discount_percent,
            min_spend,
            valid_from: date_from_sql(&valid_from)?,
            valid_until: date_from_sql(&valid_until)?,
            status: VoucherStatus::from_str(&status),
        });
    }
    Ok(vouchers)
}

// ── Insert helpers (seeding and tests; the advisor path never writes) ──

pub fn create_room_type(
    conn: &Connection,
    name: &str,
    occupancy: u32,
    beds: u32,
) -> anyhow::Result<i64> {
    conn.execute(
        "INSERT INTO room_types (name, occupancy, beds) VALUES (?1, ?2, ?3)",
        params![name, occupancy, beds],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn create_room(
    conn: &Connection,
    name: &str,
    price: i64,
    status: RoomStatus,
    room_type_id: i64,
) -> anyhow::Result<i64> {
    conn.execute(
        "INSERT INTO rooms (name, price, status, room_type_id) VALUES (?1, ?2, ?3, ?4)",
        params![name, price, status.as_str(), room_type_id],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn create_reservation(
    conn: &Connection,
    room_id: i64,
    check_in: NaiveDate,
    check_out: NaiveDate,
    status: ReservationStatus,
) -> anyhow::Result<i64> {
    anyhow::ensure!(check_out > check_in, "check-out must be after check-in");
    conn.execute(
        "INSERT INTO reservations (room_id, check_in, check_out, status) VALUES (?1, ?2, ?3, ?4)",
        params![
            room_id,
            date_to_sql(check_in),
            date_to_sql(check_out),
            status.as_str()
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn create_service(conn: &Connection, name: &str, price: i64) -> anyhow::Result<i64> {
    conn.execute(
        "INSERT INTO services (name, price) VALUES (?1, ?2)",
        params![name, price],
    )?;
    Ok(conn.last_insert_rowid())
}

#[allow(clippy::too_many_arguments)]
pub fn create_voucher(
    conn: &Connection,
    name: &str,
    description: Option<&str>,
    discount_percent: u32,
    min_spend: i64,
    valid_from: NaiveDate,
    valid_until: NaiveDate,
    status: VoucherStatus,
) -> anyhow::Result<i64> {
    conn.execute(
        "INSERT INTO vouchers (name, description, discount_percent, min_spend, valid_from, valid_until, status)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            name,
            description,
            discount_percent,
            min_spend,
            date_to_sql(valid_from),
            date_to_sql(valid_until),
            status.as_str()
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db;

    fn setup_db() -> Connection {
        db::init_db(":memory:").unwrap()
    }

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_list_bookable_rooms_filters_status_price_occupancy() {
        let conn = setup_db();
        let double = create_room_type(&conn, "Double", 2, 1).unwrap();
        let family = create_room_type(&conn, "Family", 4, 2).unwrap();

        create_room(&conn, "D101", 1_200_000, RoomStatus::Available, double).unwrap();
        create_room(&conn, "D102", 2_500_000, RoomStatus::Available, double).unwrap();
        create_room(&conn, "F201", 3_000_000, RoomStatus::Available, family).unwrap();
        create_room(&conn, "D103", 900_000, RoomStatus::Cleaning, double).unwrap();

        let all = list_bookable_rooms(&conn, None, None).unwrap();
        assert_eq!(all.len(), 3);
        // cheapest first
        assert_eq!(all[0].name, "D101");

        let capped = list_bookable_rooms(&conn, Some(1_500_000), None).unwrap();
        assert_eq!(capped.len(), 1);
        assert_eq!(capped[0].name, "D101");

        let big_party = list_bookable_rooms(&conn, None, Some(3)).unwrap();
        assert_eq!(big_party.len(), 1);
        assert_eq!(big_party[0].name, "F201");
    }

    #[test]
    fn test_blocked_room_ids_ignores_non_blocking_statuses() {
        let conn = setup_db();
        let t = create_room_type(&conn, "Double", 2, 1).unwrap();
        let r1 = create_room(&conn, "D101", 1_000_000, RoomStatus::Available, t).unwrap();
        let r2 = create_room(&conn, "D102", 1_000_000, RoomStatus::Available, t).unwrap();

        create_reservation(
            &conn,
            r1,
            d("2025-08-01"),
            d("2025-08-05"),
            ReservationStatus::CheckedIn,
        )
        .unwrap();
        create_reservation(
            &conn,
            r2,
            d("2025-08-01"),
            d("2025-08-05"),
            ReservationStatus::Cancelled,
        )
        .unwrap();

        let blocked = blocked_room_ids(&conn, d("2025-08-02"), d("2025-08-04")).unwrap();
        assert!(blocked.contains(&r1));
        assert!(!blocked.contains(&r2));
    }

    #[test]
    fn test_reservation_round_trip() {
        let conn = setup_db();
        let t = create_room_type(&conn, "Double", 2, 1).unwrap();
        let room = create_room(&conn, "D101", 1_000_000, RoomStatus::Available, t).unwrap();
        create_reservation(
            &conn,
            room,
            d("2025-08-01"),
            d("2025-08-05"),
            ReservationStatus::PendingConfirmation,
        )
        .unwrap();

        let reservations = get_reservations_for_room(&conn, room).unwrap();
        assert_eq!(reservations.len(), 1);
        assert_eq!(reservations[0].check_in, d("2025-08-01"));
        assert_eq!(reservations[0].check_out, d("2025-08-05"));
        assert!(reservations[0].status.is_blocking());
    }

    #[test]
    fn test_reservation_rejects_reversed_dates() {
        let conn = setup_db();
        let t = create_room_type(&conn, "Double", 2, 1).unwrap();
        let room = create_room(&conn, "D101", 1_000_000, RoomStatus::Available, t).unwrap();
        let result = create_reservation(
            &conn,
            room,
            d("2025-08-05"),
            d("2025-08-01"),
            ReservationStatus::PendingConfirmation,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_active_vouchers_window() {
        let conn = setup_db();
        create_voucher(
            &conn,
            "Hè rực rỡ",
            Some("Giảm giá mùa hè"),
            15,
            2_000_000,
            d("2025-06-01"),
            d("2025-08-31"),
            VoucherStatus::Active,
        )
        .unwrap();
        create_voucher(
            &conn,
            "Đã hết hạn",
            None,
            30,
            0,
            d("2025-01-01"),
            d("2025-02-01"),
            VoucherStatus::Active,
        )
        .unwrap();
        create_voucher(
            &conn,
            "Tắt",
            None,
            10,
            0,
            d("2025-06-01"),
            d("2025-08-31"),
            VoucherStatus::Disabled,
        )
        .unwrap();

        let active = list_active_vouchers(&conn, d("2025-07-15")).unwrap();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].name, "Hè rực rỡ");
    }
}
