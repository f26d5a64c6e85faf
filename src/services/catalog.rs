//! Matches catalog services mentioned in a message. Matching is textual
//! only: full-name or name-token containment, plus a small category map so
//! "spa" finds "Spa thư giãn" even when the message never spells the full
//! name.

use std::collections::HashSet;

use crate::models::Service;

// A message with none of these words is not talking about services at all,
// so the catalog scan is skipped entirely.
const SERVICE_KEYWORDS: &[&str] = &[
    "dịch vụ", "spa", "massage", "ăn", "uống", "gym", "pool", "bể bơi", "hồ bơi", "tour",
    "buffet", "karaoke",
];

// category word in the message → substrings looked up in service names
const CATEGORY_MAP: &[(&str, &[&str])] = &[
    ("spa", &["spa", "massage"]),
    ("massage", &["massage"]),
    ("ăn", &["buffet", "ăn", "nhà hàng", "bbq"]),
    ("uống", &["bar", "uống", "cafe"]),
    ("gym", &["gym", "fitness"]),
    ("pool", &["bể bơi", "hồ bơi", "pool"]),
    ("bể bơi", &["bể bơi", "pool"]),
    ("hồ bơi", &["hồ bơi", "bể bơi", "pool"]),
    ("tour", &["tour"]),
];

/// Catalog services the message textually references, deduplicated by id,
/// catalog order preserved.
pub fn match_services(text: &str, catalog: &[Service]) -> Vec<Service> {
    let message = text.to_lowercase();

    if !SERVICE_KEYWORDS.iter().any(|kw| message.contains(kw)) {
        return vec![];
    }

    let mut seen: HashSet<i64> = HashSet::new();
    let mut matched = vec![];

    for service in catalog {
        let name = service.name.to_lowercase();

        let by_name = message.contains(&name)
            || name
                .split_whitespace()
                // one- and two-letter tokens ("và", "ở") match everything
                .filter(|tok| tok.chars().count() >= 3)
                .any(|tok| message.contains(tok));

        let by_category = CATEGORY_MAP.iter().any(|(kw, name_parts)| {
            message.contains(kw) && name_parts.iter().any(|part| name.contains(part))
        });

        if (by_name || by_category) && seen.insert(service.id) {
            matched.push(service.clone());
        }
    }

    matched
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Vec<Service> {
        vec![
            Service {
                id: 1,
                name: "Spa thư giãn".to_string(),
                price: 300_000,
            },
            Service {
                id: 2,
                name: "Buffet sáng".to_string(),
                price: 200_000,
            },
            Service {
                id: 3,
                name: "Tour đảo trong ngày".to_string(),
                price: 650_000,
            },
        ]
    }

    #[test]
    fn test_no_service_keyword_returns_empty() {
        let matched = match_services("còn phòng nào cho 2 người không", &catalog());
        assert!(matched.is_empty());
    }

    #[test]
    fn test_matches_by_category_keyword() {
        let matched = match_services("tôi muốn đặt spa cho 2 người", &catalog());
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].id, 1);
    }

    #[test]
    fn test_matches_by_name_token() {
        let matched = match_services("có dịch vụ buffet không", &catalog());
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].id, 2);
    }

    #[test]
    fn test_multiple_matches_deduplicated() {
        // "spa" hits service 1 by name token and by category; only once
        let matched = match_services("spa và tour cho cặp đôi", &catalog());
        let ids: Vec<i64> = matched.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![1, 3]);
    }
}
