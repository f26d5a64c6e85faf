use chrono::{Duration, Utc};
use rusqlite::Connection;

use crate::db::queries;
use crate::models::{RoomStatus, VoucherStatus};

/// Populates a small demo inventory when the rooms table is empty, so a
/// fresh checkout can answer advisor questions immediately. Prices in VND.
pub fn seed_demo_data(conn: &Connection) -> anyhow::Result<()> {
    if queries::count_rooms(conn)? > 0 {
        return Ok(());
    }

    tracing::info!("rooms table empty, seeding demo inventory");

    let standard = queries::create_room_type(conn, "Standard", 2, 1)?;
    let deluxe = queries::create_room_type(conn, "Deluxe", 2, 1)?;
    let family = queries::create_room_type(conn, "Family Suite", 4, 2)?;

    queries::create_room(conn, "STD-101", 800_000, RoomStatus::Available, standard)?;
    queries::create_room(conn, "STD-102", 850_000, RoomStatus::Available, standard)?;
    queries::create_room(conn, "STD-103", 800_000, RoomStatus::Cleaning, standard)?;
    queries::create_room(conn, "DLX-201", 1_500_000, RoomStatus::Available, deluxe)?;
    queries::create_room(conn, "DLX-202", 1_650_000, RoomStatus::Available, deluxe)?;
    queries::create_room(conn, "FAM-301", 2_800_000, RoomStatus::Available, family)?;
    queries::create_room(conn, "FAM-302", 3_200_000, RoomStatus::UnderRepair, family)?;

    queries::create_service(conn, "Spa thư giãn", 300_000)?;
    queries::create_service(conn, "Massage đá nóng", 450_000)?;
    queries::create_service(conn, "Buffet sáng", 200_000)?;
    queries::create_service(conn, "Tour đảo trong ngày", 650_000)?;
    queries::create_service(conn, "Vé gym & bể bơi", 150_000)?;

    let today = Utc::now().date_naive();
    queries::create_voucher(
        conn,
        "Ưu đãi cuối tuần",
        Some("Giảm 10% cho đơn từ 2 triệu"),
        10,
        2_000_000,
        today - Duration::days(7),
        today + Duration::days(60),
        VoucherStatus::Active,
    )?;

    Ok(())
}
