//! Budget arithmetic and reply shaping for the "affordable rooms" intents.
//! All money is integer VND end to end; division only happens once, when
//! the per-night room ceiling is derived, and every comparison after that
//! is exact.

use std::collections::HashSet;

use rusqlite::Connection;

use crate::db::queries;
use crate::models::{ParsedQuery, Service};
use crate::services::availability;

/// Leftover below this is not worth pitching extras for, unless the user
/// asked for them or mentioned none at all.
pub const UPSELL_LEFTOVER_MIN: i64 = 100_000;

const MAX_ROOMS_SHOWN: usize = 5;
const MAX_UPSELLS_SHOWN: usize = 4;

/// Thousands-grouped VND, e.g. `2.500.000đ`.
pub fn format_vnd(amount: i64) -> String {
    let digits = amount.unsigned_abs().to_string();
    let mut grouped = String::new();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(c);
    }
    if amount < 0 {
        format!("-{grouped}đ")
    } else {
        format!("{grouped}đ")
    }
}

/// Builds the ranked room+service recommendation for a budgeted query.
/// Requires `query.budget > 0`; unbudgeted messages take the plain listing
/// path in the advisor instead.
pub fn recommend(
    conn: &Connection,
    query: &ParsedQuery,
    asked_more_services: bool,
) -> anyhow::Result<String> {
    let nights = i64::from(query.nights.max(1));
    let party = i64::from(query.party_size.max(1));
    let budget = query.budget;

    // Services are charged per person for the stay, not per room.
    let total_service_cost: i64 = query.services.iter().map(|s| s.price * party).sum();
    let room_budget_per_night = (budget - total_service_cost) / nights;

    if !query.services.is_empty() && room_budget_per_night <= 0 {
        return Ok(insufficient_budget_reply(query, party, total_service_cost));
    }

    let candidates = match query.dates {
        Some((check_in, check_out)) => availability::find_available_rooms(
            conn,
            check_in,
            check_out,
            Some(room_budget_per_night),
            Some(query.party_size),
        )?,
        None => queries::list_bookable_rooms(
            conn,
            Some(room_budget_per_night),
            Some(query.party_size),
        )?,
    };

    if candidates.is_empty() {
        return no_candidates_reply(conn, query, room_budget_per_night);
    }

    let mut reply = format!(
        "🏨 Gợi ý phòng cho {party} khách, {nights} đêm với ngân sách {}:\n",
        format_vnd(budget)
    );
    if let Some((check_in, check_out)) = query.dates {
        reply.push_str(&format!(
            "🗓 Nhận phòng {} – trả phòng {}\n",
            check_in.format("%d/%m/%Y"),
            check_out.format("%d/%m/%Y")
        ));
    }

    for room in candidates.iter().take(MAX_ROOMS_SHOWN) {
        let room_total = room.price * nights;
        let grand_total = room_total + total_service_cost;
        let leftover = budget - grand_total;
        reply.push_str(&format!(
            "• {} ({}, tối đa {} khách) — {}/đêm · tiền phòng {} · tổng {} · còn dư {}\n",
            room.name,
            room.room_type.name,
            room.room_type.occupancy,
            format_vnd(room.price),
            format_vnd(room_total),
            format_vnd(grand_total),
            format_vnd(leftover)
        ));
    }
    if candidates.len() > MAX_ROOMS_SHOWN {
        reply.push_str(&format!(
            "… và {} phòng khác cũng trong tầm giá.\n",
            candidates.len() - MAX_ROOMS_SHOWN
        ));
    }

    if !query.services.is_empty() {
        let names: Vec<&str> = query.services.iter().map(|s| s.name.as_str()).collect();
        reply.push_str(&format!(
            "Đã tính kèm dịch vụ: {} (tổng {}).\n",
            names.join(", "),
            format_vnd(total_service_cost)
        ));
    }

    // Upsell against the cheapest candidate: the most leftover the guest
    // could actually have.
    let cheapest = &candidates[0];
    let leftover = budget - (cheapest.price * nights + total_service_cost);
    if query.services.is_empty() || asked_more_services || leftover > UPSELL_LEFTOVER_MIN {
        append_upsell(conn, &mut reply, query, party, leftover)?;
    }

    Ok(reply)
}

fn append_upsell(
    conn: &Connection,
    reply: &mut String,
    query: &ParsedQuery,
    party: i64,
    leftover: i64,
) -> anyhow::Result<()> {
    let mentioned: HashSet<i64> = query.services.iter().map(|s| s.id).collect();

    let mut upsells: Vec<Service> = queries::list_services(conn)?
        .into_iter()
        .filter(|s| !mentioned.contains(&s.id) && s.price * party <= leftover)
        .collect();
    // most expensive first: the richest-feeling suggestions lead
    upsells.sort_by(|a, b| b.price.cmp(&a.price).then(a.id.cmp(&b.id)));

    if upsells.is_empty() {
        return Ok(());
    }

    reply.push_str(&format!(
        "\n✨ Chọn phòng rẻ nhất thì bạn còn dư {}, đủ để thêm:\n",
        format_vnd(leftover)
    ));
    for service in upsells.iter().take(MAX_UPSELLS_SHOWN) {
        reply.push_str(&format!(
            "• {} — {}/người × {} = {}\n",
            service.name,
            format_vnd(service.price),
            party,
            format_vnd(service.price * party)
        ));
    }

    // Greedy 2-service combo in the same descending order.
    let mut combo: Vec<&Service> = vec![];
    let mut spent = 0i64;
    for service in &upsells {
        if combo.len() == 2 {
            break;
        }
        let cost = service.price * party;
        if spent + cost <= leftover {
            spent += cost;
            combo.push(service);
        }
    }
    if combo.len() == 2 {
        reply.push_str(&format!(
            "💡 Combo vừa túi tiền: {} + {} = {}\n",
            combo[0].name,
            combo[1].name,
            format_vnd(spent)
        ));
    }

    Ok(())
}

fn insufficient_budget_reply(query: &ParsedQuery, party: i64, total_service_cost: i64) -> String {
    let mut reply = format!(
        "😔 Ngân sách {} chưa đủ cho các dịch vụ đã chọn với {party} khách:\n",
        format_vnd(query.budget)
    );
    for service in &query.services {
        reply.push_str(&format!(
            "• {} — {}/người × {} = {}\n",
            service.name,
            format_vnd(service.price),
            party,
            format_vnd(service.price * party)
        ));
    }
    reply.push_str(&format!(
        "Tổng dịch vụ: {}.\nBạn có thể: tăng ngân sách, giảm số khách, bớt dịch vụ, hoặc chọn dịch vụ giá mềm hơn.",
        format_vnd(total_service_cost)
    ));
    reply
}

fn no_candidates_reply(
    conn: &Connection,
    query: &ParsedQuery,
    room_budget_per_night: i64,
) -> anyhow::Result<String> {
    // Distinguish "nothing at that price exists" from "it exists but the
    // window is fully booked": the remedies differ.
    let in_budget = queries::list_bookable_rooms(
        conn,
        Some(room_budget_per_night),
        Some(query.party_size),
    )?;

    if !in_budget.is_empty() {
        let (check_in, check_out) = query
            .dates
            .expect("booked-out case only reachable with a date window");
        return Ok(format!(
            "😔 Các phòng trong tầm {}/đêm đều đã kín từ {} đến {}.\nBạn thử đổi sang khoảng ngày khác, hoặc nới ngân sách để mở thêm hạng phòng nhé.",
            format_vnd(room_budget_per_night),
            check_in.format("%d/%m/%Y"),
            check_out.format("%d/%m/%Y")
        ));
    }

    let any_fit = queries::list_bookable_rooms(conn, None, Some(query.party_size))?;
    match any_fit.first() {
        Some(cheapest) => Ok(format!(
            "😔 Chưa có phòng nào cho {} khách trong tầm {}/đêm. Phòng phù hợp rẻ nhất hiện là {} giá {}/đêm.\nGợi ý: tăng ngân sách, giảm số đêm, hoặc bớt dịch vụ kèm theo.",
            query.party_size,
            format_vnd(room_budget_per_night),
            cheapest.name,
            format_vnd(cheapest.price)
        )),
        None => Ok(format!(
            "😔 Hiện resort chưa có phòng nào nhận được {} khách. Bạn cân nhắc tách thành nhiều phòng giúp mình nhé.",
            query.party_size
        )),
    }
}
