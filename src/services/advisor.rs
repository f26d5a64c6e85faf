//! Per-intent reply composition. One shot per request: classify, pull the
//! structured values out of the same message, query the store, shape a
//! single Vietnamese reply. Nothing here writes to the store.

use std::sync::Arc;

use chrono::Utc;
use rusqlite::Connection;

use crate::db::queries;
use crate::errors::AppError;
use crate::models::{Intent, ParsedQuery};
use crate::services::ai::Message;
use crate::services::recommend::format_vnd;
use crate::services::{availability, catalog, classify, extract, recommend};
use crate::state::AppState;

const MAX_LISTED: usize = 5;

const GENERAL_PROMPT: &str = "Bạn là nhân viên tư vấn của một resort nghỉ dưỡng ven biển tại Việt Nam. \
Trả lời ngắn gọn, thân thiện, bằng tiếng Việt. Nếu khách hỏi về đặt phòng, giá hay dịch vụ mà bạn \
không nắm chắc, hãy mời khách cho biết ngân sách, số khách và ngày ở để tư vấn chính xác hơn.";

pub async fn answer(state: &Arc<AppState>, message: &str) -> Result<String, AppError> {
    let intent = classify::classify_intent(state.llm.as_ref(), message).await;
    tracing::info!(intent = intent.as_str(), "advisor message classified");

    match intent {
        Intent::AskVoucher => vouchers_reply(state),
        Intent::AskRoomTypes => room_types_reply(state),
        Intent::CheckService => services_reply(state, message),
        Intent::AskPrice => price_reply(state),
        Intent::AskAvailableRoomsWithDates => dated_reply(state, message),
        Intent::AskAffordableRoomsWithServices | Intent::AskAffordableRooms => {
            affordable_reply(state, message)
        }
        Intent::General => general_reply(state, message).await,
    }
}

fn asked_more_services(message: &str) -> bool {
    let lower = message.to_lowercase();
    lower.contains("thêm dịch vụ") || lower.contains("dịch vụ nào khác") || lower.contains("gợi ý thêm")
}

fn build_query(conn: &Connection, message: &str) -> Result<ParsedQuery, AppError> {
    let today = Utc::now().date_naive();
    let services = catalog::match_services(message, &queries::list_services(conn)?);
    Ok(ParsedQuery {
        budget: extract::extract_budget(message),
        nights: extract::extract_nights(message),
        party_size: extract::extract_party_size(message),
        dates: extract::extract_date_range(message, today),
        services,
    })
}

fn dated_reply(state: &Arc<AppState>, message: &str) -> Result<String, AppError> {
    let conn = state.db.lock().unwrap();
    let mut query = build_query(&conn, message)?;

    let Some((check_in, check_out)) = query.dates else {
        return Ok(
            "🗓 Bạn cho mình xin ngày nhận và trả phòng cụ thể nhé (ví dụ: từ 1/8 tới 3/8)."
                .to_string(),
        );
    };
    if check_out <= check_in {
        return Err(AppError::InvalidInput(
            "Ngày trả phòng phải sau ngày nhận phòng, bạn kiểm tra lại giúp mình nhé.".to_string(),
        ));
    }
    // with an explicit window the night count comes from the dates, not
    // from any "<n> đêm" phrase
    query.nights = (check_out - check_in).num_days() as u32;

    if query.budget == 0 {
        let rooms = availability::find_available_rooms(
            &conn,
            check_in,
            check_out,
            None,
            Some(query.party_size),
        )?;
        if rooms.is_empty() {
            return Ok(format!(
                "😔 Từ {} đến {} resort đã kín phòng cho {} khách. Bạn thử khoảng ngày khác giúp mình nhé.",
                check_in.format("%d/%m/%Y"),
                check_out.format("%d/%m/%Y"),
                query.party_size
            ));
        }
        let mut reply = format!(
            "🏨 Phòng trống từ {} đến {} cho {} khách:\n",
            check_in.format("%d/%m/%Y"),
            check_out.format("%d/%m/%Y"),
            query.party_size
        );
        for room in rooms.iter().take(MAX_LISTED) {
            reply.push_str(&format!(
                "• {} ({}) — {}/đêm\n",
                room.name,
                room.room_type.name,
                format_vnd(room.price)
            ));
        }
        if rooms.len() > MAX_LISTED {
            reply.push_str(&format!("… và {} phòng khác.\n", rooms.len() - MAX_LISTED));
        }
        return Ok(reply);
    }

    Ok(recommend::recommend(&conn, &query, asked_more_services(message))?)
}

fn affordable_reply(state: &Arc<AppState>, message: &str) -> Result<String, AppError> {
    let conn = state.db.lock().unwrap();
    let query = build_query(&conn, message)?;

    if query.budget == 0 {
        let rooms = queries::list_bookable_rooms(&conn, None, Some(query.party_size))?;
        if rooms.is_empty() {
            return Ok(format!(
                "😔 Hiện chưa có phòng nào còn nhận được {} khách.",
                query.party_size
            ));
        }
        let mut reply = format!("🏨 Các phòng đang còn nhận {} khách:\n", query.party_size);
        for room in rooms.iter().take(MAX_LISTED) {
            reply.push_str(&format!(
                "• {} ({}) — {}/đêm\n",
                room.name,
                room.room_type.name,
                format_vnd(room.price)
            ));
        }
        if rooms.len() > MAX_LISTED {
            reply.push_str(&format!("… và {} phòng khác.\n", rooms.len() - MAX_LISTED));
        }
        reply.push_str("Bạn cho mình ngân sách và ngày ở để tư vấn sát hơn nhé.");
        return Ok(reply);
    }

    Ok(recommend::recommend(&conn, &query, asked_more_services(message))?)
}

fn vouchers_reply(state: &Arc<AppState>) -> Result<String, AppError> {
    let conn = state.db.lock().unwrap();
    let vouchers = queries::list_active_vouchers(&conn, Utc::now().date_naive())?;

    if vouchers.is_empty() {
        return Ok(
            "🎁 Hiện resort chưa có voucher nào đang chạy. Bạn ghé lại sau hoặc theo dõi fanpage để không bỏ lỡ ưu đãi nhé."
                .to_string(),
        );
    }

    let mut reply = "🎁 Voucher đang áp dụng:\n".to_string();
    for v in &vouchers {
        reply.push_str(&format!("• {} — giảm {}%", v.name, v.discount_percent));
        if v.min_spend > 0 {
            reply.push_str(&format!(", cho đơn từ {}", format_vnd(v.min_spend)));
        }
        reply.push_str(&format!(", đến hết {}", v.valid_until.format("%d/%m/%Y")));
        if let Some(desc) = &v.description {
            reply.push_str(&format!(" ({desc})"));
        }
        reply.push('\n');
    }
    Ok(reply)
}

fn room_types_reply(state: &Arc<AppState>) -> Result<String, AppError> {
    let conn = state.db.lock().unwrap();
    let types = queries::list_room_types(&conn)?;

    if types.is_empty() {
        return Ok("🏨 Resort đang cập nhật danh sách hạng phòng, bạn quay lại sau nhé.".to_string());
    }

    let mut reply = "🏨 Các hạng phòng của resort:\n".to_string();
    for (room_type, starting_price) in &types {
        reply.push_str(&format!(
            "• {} — tối đa {} khách, {} giường",
            room_type.name, room_type.occupancy, room_type.beds
        ));
        match starting_price {
            Some(price) => reply.push_str(&format!(", giá từ {}/đêm\n", format_vnd(*price))),
            None => reply.push_str(", giá đang cập nhật\n"),
        }
    }
    Ok(reply)
}

fn services_reply(state: &Arc<AppState>, message: &str) -> Result<String, AppError> {
    let conn = state.db.lock().unwrap();
    let all = queries::list_services(&conn)?;

    if all.is_empty() {
        return Ok("🛎 Resort đang cập nhật danh sách dịch vụ, bạn quay lại sau nhé.".to_string());
    }

    // answer about the mentioned services when there are any, otherwise
    // show the whole menu
    let matched = catalog::match_services(message, &all);
    let (title, listed) = if matched.is_empty() {
        ("🛎 Dịch vụ của resort (giá mỗi khách):\n", &all)
    } else {
        ("🛎 Dịch vụ bạn hỏi (giá mỗi khách):\n", &matched)
    };

    let mut reply = title.to_string();
    for service in listed {
        reply.push_str(&format!(
            "• {} — {}/người\n",
            service.name,
            format_vnd(service.price)
        ));
    }
    Ok(reply)
}

fn price_reply(state: &Arc<AppState>) -> Result<String, AppError> {
    let conn = state.db.lock().unwrap();
    let rooms = queries::list_bookable_rooms(&conn, None, None)?;

    let (Some(cheapest), Some(dearest)) = (rooms.first(), rooms.last()) else {
        return Ok("💰 Hiện chưa có phòng nào mở bán, bạn quay lại sau nhé.".to_string());
    };

    let mut reply = format!(
        "💰 Giá phòng hiện từ {} đến {} mỗi đêm:\n",
        format_vnd(cheapest.price),
        format_vnd(dearest.price)
    );
    for room in rooms.iter().take(MAX_LISTED) {
        reply.push_str(&format!(
            "• {} ({}) — {}/đêm\n",
            room.name,
            room.room_type.name,
            format_vnd(room.price)
        ));
    }
    if rooms.len() > MAX_LISTED {
        reply.push_str(&format!("… và {} phòng khác.\n", rooms.len() - MAX_LISTED));
    }
    Ok(reply)
}

async fn general_reply(state: &Arc<AppState>, message: &str) -> Result<String, AppError> {
    let messages = [Message {
        role: "user".to_string(),
        content: message.to_string(),
    }];

    state
        .llm
        .chat(GENERAL_PROMPT, &messages)
        .await
        .map_err(|e| AppError::Ai(e.to_string()))
}
