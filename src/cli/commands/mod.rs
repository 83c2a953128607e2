pub mod admin;
pub mod asset;
pub mod auth;
pub mod checkup;
pub mod dashboard;
pub mod maintenance;
pub mod property;
pub mod provider;
pub mod scrape;
pub mod ticket;
pub mod user;
pub mod wallet;

use clap::Args;
use serde_json::{json, Value};
use std::future::Future;
use std::time::Duration;

use crate::api::Gateway;
use crate::cli::utils::{output_list, output_success, parse_field};
use crate::cli::OutputFormat;
use crate::config::config;
use crate::error::ApiError;
use crate::models::{Entity, EntityKind};
use crate::views::dashboard::unwrap_data;
use crate::views::{FormModal, FormSpec, ListView, LoadOutcome};

#[derive(Args, Debug, Clone)]
pub struct ListArgs {
    #[arg(long, default_value_t = 1, help = "Page number (1-based)")]
    pub page: u32,
    #[arg(long, help = "Filter the fetched page by name, email, title...")]
    pub search: Option<String>,
    #[arg(long, help = "Rows per page (defaults to LIVEASE_PAGE_SIZE)")]
    pub limit: Option<u32>,
}

#[derive(Args, Debug, Clone, Default)]
pub struct FieldArgs {
    #[arg(short = 'f', long = "field", value_parser = parse_field, help = "Form field as key=value (repeatable)")]
    pub fields: Vec<(String, String)>,
}

impl FieldArgs {
    /// Free-form JSON object for endpoints without a form
    pub fn to_object(&self) -> Value {
        let map = self
            .fields
            .iter()
            .map(|(k, v)| (k.clone(), Value::String(v.clone())))
            .collect();
        Value::Object(map)
    }
}

/// Fetch one page of `kind` and print it, optionally narrowed by search
pub async fn list_entities(
    gw: &Gateway,
    kind: EntityKind,
    args: ListArgs,
    output_format: &OutputFormat,
) -> anyhow::Result<()> {
    let page_size = args.limit.unwrap_or(config().views.page_size);
    let mut view = ListView::new(gw, kind, page_size);

    if let LoadOutcome::Failed(message) = view.load(args.page).await {
        return Err(anyhow::anyhow!(message));
    }
    if let Some(query) = args.search.as_deref() {
        view.search(query);
    }

    output_list(output_format, &view)
}

/// Drive a form modal once: open (or prefill from `existing`), apply the
/// field arguments, submit through `send`, then refresh and print page 1.
pub async fn submit_form<F, Fut>(
    gw: &Gateway,
    spec: &'static FormSpec,
    kind: EntityKind,
    existing: Option<&Entity>,
    fields: FieldArgs,
    send: F,
    output_format: &OutputFormat,
) -> anyhow::Result<()>
where
    F: FnOnce(Value) -> Fut,
    Fut: Future<Output = Result<Value, ApiError>>,
{
    // the terminal prints the success message after submit returns
    let mut modal = FormModal::new(spec).with_success_delay(Duration::ZERO);
    match existing {
        Some(entity) => modal.open_with(entity),
        None => modal.open(),
    }

    for (name, value) in fields.fields {
        if spec.field(&name).is_none() {
            let known: Vec<&str> = spec.fields.iter().map(|f| f.name).collect();
            anyhow::bail!("Unknown field '{}' for {}. Fields: {}", name, spec.title, known.join(", "));
        }
        modal.set(&name, value);
    }

    let mut view = ListView::new(gw, kind, config().views.page_size);
    let list = &mut view;
    let response = modal
        .submit(send, move || async move {
            list.refresh().await;
        })
        .await?;

    output_success(output_format, spec.success_message, Some(json!({ "result": response })))?;
    if matches!(output_format, OutputFormat::Text) {
        output_list(output_format, &view)?;
    }
    Ok(())
}

/// Pick the record out of a detail response (`{key: {...}}`, `{data: {...}}` or bare)
pub fn record_from(body: &Value, key: &str) -> Value {
    body.get(key).cloned().unwrap_or_else(|| unwrap_data(body).clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detail_responses_unwrap() {
        assert_eq!(record_from(&json!({"property": {"title": "Loft"}}), "property")["title"], "Loft");
        assert_eq!(record_from(&json!({"data": {"title": "Loft"}}), "property")["title"], "Loft");
        assert_eq!(record_from(&json!({"title": "Loft"}), "property")["title"], "Loft");
    }

    #[test]
    fn free_form_fields_become_strings() {
        let args = FieldArgs { fields: vec![("name".into(), "PlumbPro".into()), ("phone".into(), "98450".into())] };
        assert_eq!(args.to_object(), json!({"name": "PlumbPro", "phone": "98450"}));
    }
}
