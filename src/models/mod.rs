pub mod intent;
pub mod query;
pub mod reservation;
pub mod room;
pub mod service;
pub mod voucher;

pub use intent::Intent;
pub use query::{ParsedQuery, DEFAULT_NIGHTS, DEFAULT_PARTY_SIZE};
pub use reservation::{Reservation, ReservationStatus};
pub use room::{Room, RoomStatus, RoomType};
pub use service::Service;
pub use voucher::{Voucher, VoucherStatus};
