use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Voucher {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub discount_percent: u32,
    /// Minimum order total in VND for the voucher to apply.
    pub min_spend: i64,
    pub valid_from: NaiveDate,
    pub valid_until: NaiveDate,
    pub status: VoucherStatus,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum VoucherStatus {
    Active,
    Disabled,
}

impl VoucherStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            VoucherStatus::Active => "active",
            VoucherStatus::Disabled => "disabled",
        }
    }

    pub fn from_str(s: &str) -> Self {
        match s {
            "active" => VoucherStatus::Active,
            _ => VoucherStatus::Disabled,
        }
    }
}
