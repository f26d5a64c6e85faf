//! Deterministic extraction of typed values from a free-text Vietnamese
//! advisor message. These are pure functions: nothing here fails, a value
//! that cannot be found comes back as its documented default (0, 1, 2 or
//! None).

use chrono::{Datelike, Duration, NaiveDate};
use regex::Regex;

use crate::models::{DEFAULT_NIGHTS, DEFAULT_PARTY_SIZE};

fn parse_amount(s: &str) -> Option<f64> {
    // "1,5" and "1.5" both mean one and a half
    s.replace(',', ".").parse().ok()
}

fn to_vnd(value: f64) -> i64 {
    value.round() as i64
}

/// Budget in VND, 0 when the message carries no amount.
///
/// Tried in order: "<n> triệu/tr" (millions), "<n> nghìn/k" (thousands),
/// then a bare number. A bare number above 1.000 is taken as literal VND;
/// below that it is read as millions, since nobody quotes a resort stay in
/// hundreds of đồng ("5" means 5 triệu).
pub fn extract_budget(text: &str) -> i64 {
    let millions = Regex::new(r"(?i)(\d+(?:[.,]\d+)?)\s*(?:triệu|tr)\b").expect("valid regex");
    if let Some(caps) = millions.captures(text) {
        if let Some(v) = parse_amount(&caps[1]) {
            return to_vnd(v * 1_000_000.0);
        }
    }

    let thousands = Regex::new(r"(?i)(\d+(?:[.,]\d+)?)\s*(?:nghìn|k)\b").expect("valid regex");
    if let Some(caps) = thousands.captures(text) {
        if let Some(v) = parse_amount(&caps[1]) {
            return to_vnd(v * 1_000.0);
        }
    }

    let bare = Regex::new(r"\d+(?:[.,]\d+)?").expect("valid regex");
    for m in bare.find_iter(text) {
        // skip numbers that are part of a date token like "1/8" or "1-8"
        let before = text[..m.start()].chars().next_back();
        let after = text[m.end()..].chars().next();
        if matches!(before, Some('/') | Some('-')) || matches!(after, Some('/') | Some('-')) {
            continue;
        }
        if let Some(v) = parse_amount(m.as_str()) {
            return if v > 1_000.0 {
                to_vnd(v)
            } else {
                to_vnd(v * 1_000_000.0)
            };
        }
    }

    0
}

/// Night count, defaulting to [`DEFAULT_NIGHTS`].
pub fn extract_nights(text: &str) -> u32 {
    let patterns = [
        r"(?i)(\d{1,3})\s*đêm",
        r"(?i)(\d{1,3})\s*ngày",
        r"(?i)ở\s*(\d{1,3})",
    ];
    for pattern in patterns {
        let re = Regex::new(pattern).expect("valid regex");
        if let Some(caps) = re.captures(text) {
            if let Ok(n) = caps[1].parse::<u32>() {
                if n > 0 {
                    return n;
                }
            }
        }
    }
    DEFAULT_NIGHTS
}

/// Party size, defaulting to [`DEFAULT_PARTY_SIZE`].
pub fn extract_party_size(text: &str) -> u32 {
    let lower = text.to_lowercase();
    if lower.contains("cặp đôi") || lower.contains("couple") {
        return 2;
    }

    let patterns = [
        r"(?i)(\d{1,3})\s*(?:người|ng\b)",
        r"(?i)cho\s*(\d{1,3})",
        r"(?i)(\d{1,3})\s*(?:khách|guest)",
    ];
    for pattern in patterns {
        let re = Regex::new(pattern).expect("valid regex");
        if let Some(caps) = re.captures(&lower) {
            if let Ok(n) = caps[1].parse::<u32>() {
                if n > 0 {
                    return n;
                }
            }
        }
    }
    DEFAULT_PARTY_SIZE
}

// Range phrasings like "từ 1/8 tới 3/8", "ngày 1-8 đến 3-8". Day/month
// only; the year is implied.
const DATE_RANGE_PATTERNS: &[&str] = &[
    r"(?i)từ\s*ngày\s*(\d{1,2})[/-](\d{1,2})\s*(?:tới|đến|to)\s*(?:ngày\s*)?(\d{1,2})[/-](\d{1,2})",
    r"(?i)từ\s*(\d{1,2})[/-](\d{1,2})\s*(?:tới|đến|to)\s*(?:ngày\s*)?(\d{1,2})[/-](\d{1,2})",
    r"(?i)ngày\s*(\d{1,2})[/-](\d{1,2})\s*(?:tới|đến|to)\s*(?:ngày\s*)?(\d{1,2})[/-](\d{1,2})",
    r"(?i)(\d{1,2})[/-](\d{1,2})\s*(?:tới|đến|to)\s*(?:ngày\s*)?(\d{1,2})[/-](\d{1,2})",
];

const SINGLE_DATE_PATTERNS: &[&str] = &[
    r"(?i)vào\s*ngày\s*(\d{1,2})[/-](\d{1,2})",
    r"(?i)ngày\s*(\d{1,2})[/-](\d{1,2})",
];

fn valid_day_month(day: u32, month: u32) -> bool {
    (1..=31).contains(&day) && (1..=12).contains(&month)
}

/// Literal (day, month) pairs for check-in and check-out as written in the
/// message. Only day ∈ [1,31] and month ∈ [1,12] are checked here; whether
/// the pair exists on the calendar is decided when the date is built.
pub fn extract_date_parts(text: &str) -> Option<((u32, u32), (u32, u32))> {
    for pattern in DATE_RANGE_PATTERNS {
        let re = Regex::new(pattern).expect("valid regex");
        if let Some(caps) = re.captures(text) {
            let d1: u32 = caps[1].parse().ok()?;
            let m1: u32 = caps[2].parse().ok()?;
            let d2: u32 = caps[3].parse().ok()?;
            let m2: u32 = caps[4].parse().ok()?;
            if valid_day_month(d1, m1) && valid_day_month(d2, m2) {
                return Some(((d1, m1), (d2, m2)));
            }
        }
    }
    None
}

fn extract_single_date(text: &str) -> Option<(u32, u32)> {
    for pattern in SINGLE_DATE_PATTERNS {
        let re = Regex::new(pattern).expect("valid regex");
        if let Some(caps) = re.captures(text) {
            let d: u32 = caps[1].parse().ok()?;
            let m: u32 = caps[2].parse().ok()?;
            if valid_day_month(d, m) {
                return Some((d, m));
            }
        }
    }
    None
}

/// Check-in/check-out dates for the message, relative to `today`.
///
/// Dates are assumed to be in the current year; if the resulting check-in
/// already passed, both ends move to next year (year-end wraparound). A
/// single mentioned date gets a check-out derived from the extracted night
/// count. Day/month pairs that don't exist on the calendar (e.g. 30/2)
/// resolve to None.
pub fn extract_date_range(text: &str, today: NaiveDate) -> Option<(NaiveDate, NaiveDate)> {
    if let Some(((d1, m1), (d2, m2))) = extract_date_parts(text) {
        let check_in = NaiveDate::from_ymd_opt(today.year(), m1, d1)?;
        let check_out = NaiveDate::from_ymd_opt(today.year(), m2, d2)?;
        if check_in < today {
            let check_in = NaiveDate::from_ymd_opt(today.year() + 1, m1, d1)?;
            let check_out = NaiveDate::from_ymd_opt(today.year() + 1, m2, d2)?;
            return Some((check_in, check_out));
        }
        return Some((check_in, check_out));
    }

    if let Some((d, m)) = extract_single_date(text) {
        let nights = extract_nights(text);
        let mut check_in = NaiveDate::from_ymd_opt(today.year(), m, d)?;
        if check_in < today {
            check_in = NaiveDate::from_ymd_opt(today.year() + 1, m, d)?;
        }
        let check_out = check_in + Duration::days(i64::from(nights));
        return Some((check_in, check_out));
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_budget_millions() {
        assert_eq!(extract_budget("tôi có 5 triệu"), 5_000_000);
        assert_eq!(extract_budget("khoảng 2tr thôi"), 2_000_000);
        assert_eq!(extract_budget("1,5 triệu được không"), 1_500_000);
        assert_eq!(extract_budget("1.5 triệu"), 1_500_000);
    }

    #[test]
    fn test_budget_thousands() {
        assert_eq!(extract_budget("còn 500k"), 500_000);
        assert_eq!(extract_budget("500 nghìn"), 500_000);
    }

    #[test]
    fn test_budget_bare_number() {
        // above 1.000 reads as literal VND
        assert_eq!(extract_budget("ngân sách 2000000"), 2_000_000);
        // small bare numbers mean millions
        assert_eq!(extract_budget("tầm 5 thôi"), 5_000_000);
    }

    #[test]
    fn test_budget_ignores_date_tokens() {
        assert_eq!(extract_budget("còn phòng ngày 1/8 tới 3/8 không"), 0);
    }

    #[test]
    fn test_budget_none() {
        assert_eq!(extract_budget("còn phòng nào không"), 0);
    }

    #[test]
    fn test_nights() {
        assert_eq!(extract_nights("ở 3 đêm"), 3);
        assert_eq!(extract_nights("nghỉ 2 ngày"), 2);
        assert_eq!(extract_nights("ở 4"), 4);
        assert_eq!(extract_nights("phòng nào đẹp"), DEFAULT_NIGHTS);
        assert_eq!(DEFAULT_NIGHTS, 1);
    }

    #[test]
    fn test_party_size() {
        assert_eq!(extract_party_size("cặp đôi đi nghỉ"), 2);
        assert_eq!(extract_party_size("cho 4"), 4);
        assert_eq!(extract_party_size("3 người"), 3);
        assert_eq!(extract_party_size("6 khách"), 6);
        assert_eq!(extract_party_size("phòng view biển"), DEFAULT_PARTY_SIZE);
        assert_eq!(DEFAULT_PARTY_SIZE, 2);
    }

    #[test]
    fn test_date_parts_templates() {
        // every supported phrasing recovers the literal day/month pairs
        let cases = [
            "từ ngày 1/8 tới 3/8",
            "từ 1/8 đến 3/8",
            "ngày 1/8 tới ngày 3/8",
            "1/8 to 3/8",
            "từ 1-8 tới 3-8",
        ];
        for msg in cases {
            assert_eq!(
                extract_date_parts(msg),
                Some(((1, 8), (3, 8))),
                "failed for: {msg}"
            );
        }
    }

    #[test]
    fn test_date_parts_bounds() {
        assert_eq!(extract_date_parts("từ 31/12 tới 31/12"), Some(((31, 12), (31, 12))));
        assert_eq!(extract_date_parts("từ 32/8 tới 3/8"), None);
        assert_eq!(extract_date_parts("từ 1/13 tới 3/13"), None);
    }

    #[test]
    fn test_date_range_current_year() {
        let today = d("2025-07-01");
        assert_eq!(
            extract_date_range("từ 1/8 tới 3/8", today),
            Some((d("2025-08-01"), d("2025-08-03")))
        );
    }

    #[test]
    fn test_date_range_rolls_to_next_year() {
        let today = d("2025-09-15");
        assert_eq!(
            extract_date_range("từ 1/8 tới 3/8", today),
            Some((d("2026-08-01"), d("2026-08-03")))
        );
    }

    #[test]
    fn test_single_date_uses_night_count() {
        let today = d("2025-07-01");
        assert_eq!(
            extract_date_range("vào ngày 10/8, ở 2 đêm", today),
            Some((d("2025-08-10"), d("2025-08-12")))
        );
        // default one night
        assert_eq!(
            extract_date_range("ngày 10/8", today),
            Some((d("2025-08-10"), d("2025-08-11")))
        );
    }

    #[test]
    fn test_impossible_calendar_date() {
        let today = d("2025-01-01");
        assert_eq!(extract_date_range("từ 30/2 tới 31/2", today), None);
    }

    #[test]
    fn test_no_date() {
        let today = d("2025-07-01");
        assert_eq!(extract_date_range("phòng có view biển không", today), None);
    }
}
