//! Two-tier intent classification. The regex tier is free, deterministic
//! and covers the high-value budget/availability phrasings; everything it
//! doesn't recognise goes to the LLM, whose answer degrades to `General`
//! on any failure rather than erroring.

use regex::Regex;

use crate::models::Intent;
use crate::services::ai::{LlmProvider, Message};

// Ordered budget-constrained-room phrasings. Any hit means the user is
// asking for rooms under a money constraint.
const BUDGET_HEURISTICS: &[&str] = &[
    r"(?i)phòng.*dưới\s*\d+",
    r"(?i)có\s*\d+(?:[.,]\d+)?\s*(?:triệu|tr|nghìn|k)\b",
    r"(?i)\d+(?:[.,]\d+)?\s*(?:triệu|tr)\b.*đêm",
    r"(?i)còn\s*phòng\s*nào",
    r"(?i)tổng\s*tiền\s*\d+(?:[.,]\d+)?\s*triệu",
];

// An explicit date token splits the two budget intents: with dates the
// availability window matters, without them only price and services do.
const DATE_TOKENS: &[&str] = &[r"\d{1,2}/\d{1,2}", r"(?i)ngày\s*\d", r"\d{1,2}\s*-\s*\d{1,2}"];

const SYSTEM_PROMPT: &str = r#"Bạn là bộ phân loại ý định cho trợ lý đặt phòng của một resort. Phân loại tin nhắn của khách vào đúng một nhãn.

Trả về DUY NHẤT một đối tượng JSON (không markdown, không giải thích) theo dạng:
{ "intent": "<nhãn>" }

Các nhãn hợp lệ:
- "ask_voucher": hỏi về voucher, mã giảm giá, khuyến mãi
- "ask_room_types": hỏi có những loại phòng nào
- "ask_available_rooms_with_dates": tìm phòng trống cho một khoảng ngày cụ thể
- "ask_affordable_rooms_with_services": tìm phòng theo ngân sách kèm dịch vụ
- "ask_affordable_rooms": tìm phòng theo ngân sách, không nhắc dịch vụ
- "check_service": hỏi về dịch vụ và giá dịch vụ
- "ask_price": hỏi giá phòng chung chung
- "general": mọi câu hỏi khác"#;

/// Pure regex tier: `None` means no heuristic matched and the LLM decides.
pub fn classify_heuristic(text: &str) -> Option<Intent> {
    let matched = BUDGET_HEURISTICS
        .iter()
        .any(|p| Regex::new(p).expect("valid regex").is_match(text));
    if !matched {
        return None;
    }

    let has_date = DATE_TOKENS
        .iter()
        .any(|p| Regex::new(p).expect("valid regex").is_match(text));

    Some(if has_date {
        Intent::AskAvailableRoomsWithDates
    } else {
        Intent::AskAffordableRoomsWithServices
    })
}

/// Full classification: heuristics first, LLM fallback second. Never fails;
/// an unreachable or incoherent LLM yields `Intent::General`.
pub async fn classify_intent(llm: &dyn LlmProvider, message: &str) -> Intent {
    if let Some(intent) = classify_heuristic(message) {
        return intent;
    }

    let messages = [Message {
        role: "user".to_string(),
        content: message.to_string(),
    }];

    match llm.chat_json(SYSTEM_PROMPT, &messages).await {
        Ok(raw) => parse_intent_response(&raw),
        Err(e) => {
            tracing::warn!(error = %e, "intent classification call failed, defaulting to general");
            Intent::General
        }
    }
}

fn parse_intent_response(response: &str) -> Intent {
    // Strip markdown code fences some models insist on
    let cleaned = response
        .trim()
        .strip_prefix("```json")
        .or_else(|| response.trim().strip_prefix("```"))
        .unwrap_or(response.trim());
    let cleaned = cleaned.strip_suffix("```").unwrap_or(cleaned).trim();

    // Take the outermost JSON object, wherever it sits in the text
    let json_str = match (cleaned.find('{'), cleaned.rfind('}')) {
        (Some(start), Some(end)) if start < end => &cleaned[start..=end],
        _ => cleaned,
    };

    match serde_json::from_str::<serde_json::Value>(json_str) {
        Ok(value) => match value.get("intent").and_then(|v| v.as_str()) {
            Some(tag) => Intent::from_tag(tag),
            None => {
                tracing::warn!("LLM classification missing intent field, defaulting to general");
                Intent::General
            }
        },
        Err(e) => {
            tracing::warn!(error = %e, "LLM classification was not valid JSON, defaulting to general");
            Intent::General
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heuristic_budget_with_dates() {
        let intent = classify_heuristic("tôi có 5 triệu, ở 2 đêm cho 2 người từ 1/8 tới 3/8");
        assert_eq!(intent, Some(Intent::AskAvailableRoomsWithDates));
    }

    #[test]
    fn test_heuristic_budget_without_dates() {
        let intent = classify_heuristic("tôi có 5 triệu muốn đặt phòng kèm spa");
        assert_eq!(intent, Some(Intent::AskAffordableRoomsWithServices));
    }

    #[test]
    fn test_heuristic_under_price_phrasing() {
        let intent = classify_heuristic("phòng nào dưới 2 triệu không");
        assert_eq!(intent, Some(Intent::AskAffordableRoomsWithServices));
    }

    #[test]
    fn test_heuristic_any_room_left() {
        let intent = classify_heuristic("còn phòng nào trống không");
        assert_eq!(intent, Some(Intent::AskAffordableRoomsWithServices));
    }

    #[test]
    fn test_heuristic_no_match() {
        assert_eq!(classify_heuristic("resort có gần biển không"), None);
    }

    #[test]
    fn test_parse_plain_json() {
        assert_eq!(
            parse_intent_response(r#"{"intent":"ask_voucher"}"#),
            Intent::AskVoucher
        );
    }

    #[test]
    fn test_parse_fenced_json() {
        assert_eq!(
            parse_intent_response("```json\n{\"intent\":\"ask_price\"}\n```"),
            Intent::AskPrice
        );
    }

    #[test]
    fn test_parse_unknown_tag_defaults_to_general() {
        assert_eq!(
            parse_intent_response(r#"{"intent":"make_coffee"}"#),
            Intent::General
        );
    }

    #[test]
    fn test_parse_missing_field_defaults_to_general() {
        assert_eq!(parse_intent_response(r#"{"foo":"bar"}"#), Intent::General);
    }

    #[test]
    fn test_parse_garbage_defaults_to_general() {
        assert_eq!(parse_intent_response("xin chào"), Intent::General);
    }
}
