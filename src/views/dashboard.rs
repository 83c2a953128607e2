use chrono::{DateTime, NaiveDateTime};
use serde::Serialize;
use serde_json::Value;

use crate::api::{endpoints, Gateway};
use crate::error::ApiError;

pub const DEFAULT_AVATAR: &str = "/assets/3d_avatar_1.png";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Card {
    pub title: &'static str,
    pub value: String,
    pub caption: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Activity {
    pub avatar: String,
    pub name: String,
    pub action: String,
    pub time: String,
}

/// Everything the landing screen shows
#[derive(Debug, Clone, Default, Serialize)]
pub struct Overview {
    pub stats: Vec<Card>,
    pub metrics: Vec<Card>,
    pub activities: Vec<Activity>,
    pub support_tickets: Vec<Value>,
}

/// Fetch the four dashboard panels concurrently; any failure fails the lot
pub async fn load(gw: &Gateway, activity_limit: u32, ticket_limit: u32) -> Result<Overview, ApiError> {
    let (stats, metrics, activity, tickets) = futures::try_join!(
        endpoints::dashboard_stats(gw),
        endpoints::matching_metrics(gw),
        endpoints::recent_activity(gw, activity_limit),
        endpoints::recent_support_tickets(gw, ticket_limit),
    )?;

    Ok(Overview {
        stats: stat_cards(unwrap_data(&stats)),
        metrics: metric_cards(unwrap_data(&metrics)),
        activities: activities(unwrap_data(&activity)),
        support_tickets: unwrap_data(&tickets).as_array().cloned().unwrap_or_default(),
    })
}

/// Responses come either bare or wrapped in `{ "data": ... }`
pub fn unwrap_data(body: &Value) -> &Value {
    match body.get("data") {
        Some(data) if !data.is_null() => data,
        _ => body,
    }
}

fn count(body: &Value, key: &str) -> String {
    body.get(key)
        .and_then(Value::as_f64)
        .map(|n| group_digits(n.round() as u64, 3))
        .unwrap_or_else(|| "0".to_string())
}

pub fn stat_cards(body: &Value) -> Vec<Card> {
    let payments = body.get("total_payments").and_then(Value::as_f64).unwrap_or(0.0);
    vec![
        Card { title: "Total Tenant", value: count(body, "total_tenants"), caption: "Total tenants" },
        Card { title: "Total Landlords", value: count(body, "total_landlords"), caption: "Total landlords" },
        Card { title: "Total Properties", value: count(body, "total_properties"), caption: "Total properties" },
        Card { title: "Total Payments", value: format_inr(payments), caption: "Total payments" },
    ]
}

pub fn metric_cards(body: &Value) -> Vec<Card> {
    vec![
        Card { title: "Total Matches", value: count(body, "total_matches"), caption: "Accepted matches" },
        Card { title: "Superlikes Sent", value: count(body, "total_superlikes"), caption: "Total superlikes" },
        Card { title: "Properties Shared", value: count(body, "properties_shared"), caption: "Properties liked/shared" },
    ]
}

pub fn activities(body: &Value) -> Vec<Activity> {
    let Some(rows) = body.as_array() else {
        return Vec::new();
    };
    let text = |row: &Value, key: &str| row.get(key).and_then(Value::as_str).unwrap_or("").to_string();

    rows.iter()
        .map(|row| Activity {
            avatar: row
                .get("profile_pic")
                .and_then(Value::as_str)
                .filter(|s| !s.is_empty())
                .unwrap_or(DEFAULT_AVATAR)
                .to_string(),
            name: text(row, "name"),
            action: text(row, "action"),
            time: format_activity_time(row.get("time").and_then(Value::as_str).unwrap_or("")),
        })
        .collect()
}

/// Whole rupees with Indian digit grouping, e.g. `₹12,34,567`
pub fn format_inr(amount: f64) -> String {
    let rounded = amount.abs().round() as u64;
    let digits = rounded.to_string();
    let grouped = if digits.len() <= 3 {
        digits
    } else {
        let (head, tail) = digits.split_at(digits.len() - 3);
        let head = head.parse::<u64>().map(|h| group_digits(h, 2)).unwrap_or_else(|_| head.to_string());
        format!("{},{}", head, tail)
    };
    let sign = if amount < 0.0 && rounded > 0 { "-" } else { "" };
    format!("{}₹{}", sign, grouped)
}

fn group_digits(n: u64, width: usize) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / width);
    let first = digits.len() % width;
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (i + width - first) % width == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// `Mar 4, 2025, 09:15 AM`; unparseable input is shown as-is
pub fn format_activity_time(raw: &str) -> String {
    if raw.is_empty() {
        return String::new();
    }
    const FORMAT: &str = "%b %-d, %Y, %I:%M %p";
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return dt.format(FORMAT).to_string();
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return dt.format(FORMAT).to_string();
    }
    raw.to_string()
}
