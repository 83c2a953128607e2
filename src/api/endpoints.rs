//! Typed wrappers over the admin REST API.
//!
//! Every function goes through [`Gateway::request`]; none of them touch the
//! transport directly.

use reqwest::{multipart, Method};
use serde_json::{json, Value};

use super::gateway::{Body, Gateway};
use crate::error::ApiError;
use crate::models::{EntityKind, Page};

fn paging(page: u32, limit: u32) -> [(&'static str, String); 2] {
    [("page", page.to_string()), ("limit", limit.to_string())]
}

// Auth

pub async fn sign_in(gw: &Gateway, email: &str, password: &str) -> Result<Value, ApiError> {
    let url = gw.url("admin/signInPassword", &[])?;
    let body = json!({ "email": email, "password": password });
    gw.request(url, Method::POST, Body::Json(body), false).await
}

// Users

pub async fn get_users(gw: &Gateway, account_type: &str, page: u32, limit: u32) -> Result<Value, ApiError> {
    gw.get(&format!("admin/getUsers/{}", account_type), &paging(page, limit)).await
}

pub async fn add_user(gw: &Gateway, data: Value) -> Result<Value, ApiError> {
    gw.post("admin/addUser", data).await
}

pub async fn update_user(gw: &Gateway, id: &str, data: Value) -> Result<Value, ApiError> {
    gw.put(&format!("admin/updateUser/{}", id), data).await
}

pub async fn get_profile(gw: &Gateway, id: &str) -> Result<Value, ApiError> {
    gw.get(&format!("user/{}", id), &[]).await
}

pub async fn upload_asset(gw: &Gateway, form: multipart::Form) -> Result<Value, ApiError> {
    gw.post("profile/uploadAsset", Body::Multipart(form)).await
}

// Properties

pub async fn get_properties(gw: &Gateway, page: u32, limit: u32) -> Result<Value, ApiError> {
    gw.get("admin/getProperties", &paging(page, limit)).await
}

pub async fn get_property(gw: &Gateway, id: &str) -> Result<Value, ApiError> {
    gw.get(&format!("admin/getProperty/{}", id), &[]).await
}

pub async fn get_user_properties(gw: &Gateway, user_id: &str) -> Result<Value, ApiError> {
    gw.get("property/userProperties", &[("userId", user_id.to_string())]).await
}

pub async fn add_property(gw: &Gateway, data: Value) -> Result<Value, ApiError> {
    gw.post("admin/addProperty", data).await
}

pub async fn update_property(gw: &Gateway, id: &str, data: Value) -> Result<Value, ApiError> {
    gw.put(&format!("admin/updateProperty/{}", id), data).await
}

pub async fn save_scraped_property(gw: &Gateway, item: Value) -> Result<Value, ApiError> {
    gw.post("property/scraped", item).await
}

pub async fn scrape_facebook(gw: &Gateway, link: &str, limit: u32) -> Result<Value, ApiError> {
    gw.post("scraping/facebook", json!({ "url": link, "limit": limit })).await
}

// Support tickets

pub async fn get_tickets(gw: &Gateway, page: u32, limit: u32) -> Result<Value, ApiError> {
    gw.get("admin/getTickets", &paging(page, limit)).await
}

pub async fn get_ticket(gw: &Gateway, id: &str) -> Result<Value, ApiError> {
    gw.get(&format!("admin/getTicket/{}", id), &[]).await
}

pub async fn update_ticket(gw: &Gateway, id: &str, data: Value) -> Result<Value, ApiError> {
    gw.put(&format!("admin/updateTicket/{}", id), data).await
}

// Maintenance

pub async fn get_service_requests(gw: &Gateway, page: u32, limit: u32) -> Result<Value, ApiError> {
    gw.get("admin/getServiceRequests", &paging(page, limit)).await
}

pub async fn get_service_request(gw: &Gateway, id: &str) -> Result<Value, ApiError> {
    gw.get(&format!("admin/getServiceRequest/{}", id), &[]).await
}

pub async fn create_service_request(gw: &Gateway, data: Value) -> Result<Value, ApiError> {
    gw.post("admin/addServiceRequest", data).await
}

// Dashboard

pub async fn dashboard_stats(gw: &Gateway) -> Result<Value, ApiError> {
    gw.get("admin/dashboard/stats", &[]).await
}

pub async fn matching_metrics(gw: &Gateway) -> Result<Value, ApiError> {
    gw.get("admin/dashboard/matchingMetrics", &[]).await
}

pub async fn recent_activity(gw: &Gateway, limit: u32) -> Result<Value, ApiError> {
    gw.get("admin/dashboard/recentActivity", &[("limit", limit.to_string())]).await
}

pub async fn recent_support_tickets(gw: &Gateway, limit: u32) -> Result<Value, ApiError> {
    gw.get("admin/dashboard/supportTickets", &[("limit", limit.to_string())]).await
}

// Wallets

pub async fn get_wallets(gw: &Gateway, page: u32, limit: u32) -> Result<Value, ApiError> {
    gw.get("admin/getWallets", &paging(page, limit)).await
}

pub async fn get_transaction_logs(gw: &Gateway, user_id: &str, page: u32, limit: u32) -> Result<Value, ApiError> {
    gw.get(&format!("admin/getTransactionLogs/{}", user_id), &paging(page, limit)).await
}

pub async fn create_transaction(gw: &Gateway, data: Value) -> Result<Value, ApiError> {
    gw.post("admin/createTransaction", data).await
}

// Service providers

pub async fn get_service_providers(gw: &Gateway, page: u32, limit: u32) -> Result<Value, ApiError> {
    gw.get("admin/getServiceProviders", &paging(page, limit)).await
}

pub async fn get_service_provider(gw: &Gateway, id: &str) -> Result<Value, ApiError> {
    gw.get(&format!("admin/getServiceProvider/{}", id), &[]).await
}

pub async fn add_service_provider(gw: &Gateway, data: Value) -> Result<Value, ApiError> {
    gw.post("admin/addServiceProvider", data).await
}

pub async fn update_service_provider(gw: &Gateway, id: &str, data: Value) -> Result<Value, ApiError> {
    gw.put(&format!("admin/updateServiceProvider/{}", id), data).await
}

// Property checkups

pub async fn get_property_checkups(gw: &Gateway, page: u32, limit: u32) -> Result<Value, ApiError> {
    gw.get("propertyCheckup", &paging(page, limit)).await
}

pub async fn get_property_checkup(gw: &Gateway, id: &str) -> Result<Value, ApiError> {
    gw.get(&format!("propertyCheckup/{}", id), &[]).await
}

pub async fn get_checkups_by_property(gw: &Gateway, property_id: &str) -> Result<Value, ApiError> {
    gw.get(&format!("propertyCheckup/property/{}", property_id), &[]).await
}

pub async fn create_property_checkup(gw: &Gateway, data: Value) -> Result<Value, ApiError> {
    gw.post("propertyCheckup", data).await
}

pub async fn submit_checkup_pictures(gw: &Gateway, data: Value) -> Result<Value, ApiError> {
    gw.put("propertyCheckup/submit", data).await
}

pub async fn approve_property_checkup(gw: &Gateway, id: &str) -> Result<Value, ApiError> {
    gw.put(&format!("propertyCheckup/{}/approve", id), Body::Empty).await
}

pub async fn reject_property_checkup(gw: &Gateway, id: &str, data: Value) -> Result<Value, ApiError> {
    gw.put(&format!("propertyCheckup/{}/reject", id), data).await
}

// Admin users

pub async fn get_admin_users(gw: &Gateway, page: u32, limit: u32) -> Result<Value, ApiError> {
    gw.get("admin/getAdminUsers", &paging(page, limit)).await
}

pub async fn add_admin_user(gw: &Gateway, data: Value) -> Result<Value, ApiError> {
    gw.post("admin/addAdminUser", data).await
}

pub async fn delete_admin_user(gw: &Gateway, id: &str) -> Result<Value, ApiError> {
    gw.delete(&format!("admin/deleteAdminUser/{}", id)).await
}

/// Fetch one page of a kind's list endpoint
pub async fn list_page(gw: &Gateway, kind: EntityKind, page: u32, limit: u32) -> Result<Page, ApiError> {
    let body = match kind {
        EntityKind::Tenant | EntityKind::Landlord => {
            let account_type = kind.account_type().unwrap_or("Tenant");
            get_users(gw, account_type, page, limit).await?
        }
        EntityKind::Property => get_properties(gw, page, limit).await?,
        EntityKind::Admin => get_admin_users(gw, page, limit).await?,
        EntityKind::MaintenanceRequest => get_service_requests(gw, page, limit).await?,
        EntityKind::Ticket => get_tickets(gw, page, limit).await?,
        EntityKind::Wallet => get_wallets(gw, page, limit).await?,
        EntityKind::ServiceProvider => get_service_providers(gw, page, limit).await?,
        EntityKind::PropertyCheckup => get_property_checkups(gw, page, limit).await?,
    };

    Ok(Page::from_response(kind, &body, page))
}
