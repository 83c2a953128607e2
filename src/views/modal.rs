use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::future::Future;
use std::time::Duration;
use thiserror::Error;

use crate::error::{ApiError, ValidationError, GENERIC_API_ERROR};
use crate::models::Entity;

static EMAIL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles"));

/// Client-local, uncommitted form state
pub type FormDraft = BTreeMap<String, String>;

/// Extra check applied after the required-field check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldRule {
    None,
    Email,
    MinLength(usize),
    /// Parses as a finite number
    Amount,
}

/// Initial value a field takes when the modal opens
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldDefault {
    Empty,
    Text(&'static str),
    /// Fresh `#NNNNNNNN` request number
    RequestId,
}

#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub required: bool,
    pub rule: FieldRule,
    pub default: FieldDefault,
    /// Message shown when a required field is empty; defaults to "<label> is required."
    pub missing_message: Option<&'static str>,
    /// Message shown when `rule` fails
    pub invalid_message: Option<&'static str>,
}

impl FieldSpec {
    pub const fn required(name: &'static str, label: &'static str) -> Self {
        Self {
            name,
            label,
            required: true,
            rule: FieldRule::None,
            default: FieldDefault::Empty,
            missing_message: None,
            invalid_message: None,
        }
    }

    pub const fn optional(name: &'static str, label: &'static str) -> Self {
        Self {
            required: false,
            ..Self::required(name, label)
        }
    }

    pub const fn rule(self, rule: FieldRule, invalid_message: &'static str) -> Self {
        Self {
            rule,
            invalid_message: Some(invalid_message),
            ..self
        }
    }

    pub const fn default_to(self, default: FieldDefault) -> Self {
        Self { default, ..self }
    }

    pub const fn when_missing(self, message: &'static str) -> Self {
        Self {
            missing_message: Some(message),
            ..self
        }
    }

    fn check(&self, value: &str) -> Result<(), ValidationError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            if self.required {
                let message = self
                    .missing_message
                    .map(str::to_string)
                    .unwrap_or_else(|| format!("{} is required.", self.label));
                return Err(ValidationError::new(self.name, message));
            }
            return Ok(());
        }

        let ok = match self.rule {
            FieldRule::None => true,
            FieldRule::Email => EMAIL_PATTERN.is_match(trimmed),
            FieldRule::MinLength(min) => value.chars().count() >= min,
            FieldRule::Amount => trimmed.parse::<f64>().map(f64::is_finite).unwrap_or(false),
        };
        if ok {
            Ok(())
        } else {
            let message = self
                .invalid_message
                .map(str::to_string)
                .unwrap_or_else(|| format!("{} is invalid.", self.label));
            Err(ValidationError::new(self.name, message))
        }
    }
}

/// Static description of one create/edit form
pub struct FormSpec {
    pub title: &'static str,
    pub fields: &'static [FieldSpec],
    pub success_message: &'static str,
    pub failure_fallback: &'static str,
    /// Lowercase substrings of backend messages and their replacements
    pub error_overrides: &'static [(&'static str, &'static str)],
    /// Turns a validated draft into the request body
    pub payload: fn(&FormDraft) -> Value,
}

impl FormSpec {
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn defaults(&self) -> FormDraft {
        self.fields
            .iter()
            .map(|f| {
                let value = match f.default {
                    FieldDefault::Empty => String::new(),
                    FieldDefault::Text(text) => text.to_string(),
                    FieldDefault::RequestId => generate_request_id(),
                };
                (f.name.to_string(), value)
            })
            .collect()
    }

    /// First failing field, in declaration order
    pub fn validate(&self, draft: &FormDraft) -> Result<(), ValidationError> {
        for field in self.fields {
            let value = draft.get(field.name).map(String::as_str).unwrap_or("");
            field.check(value)?;
        }
        Ok(())
    }

    /// Message shown for a failed submit: the backend's own text, or the
    /// form's fallback when the backend sent none
    pub fn failure_message(&self, err: &ApiError) -> String {
        let raw = err.message();
        if raw.trim().is_empty() || raw == GENERIC_API_ERROR {
            return self.failure_fallback.to_string();
        }
        let lowered = raw.to_lowercase();
        self.error_overrides
            .iter()
            .find(|(needle, _)| lowered.contains(needle))
            .map(|(_, replacement)| replacement.to_string())
            .unwrap_or(raw)
    }
}

/// Random eight-digit request number, `#10000000..=#99999999`
pub fn generate_request_id() -> String {
    let n = 10_000_000 + (uuid::Uuid::new_v4().as_u128() % 90_000_000);
    format!("#{}", n)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalState {
    Closed,
    Open,
    Submitting,
    Succeeded,
}

#[derive(Debug, Error)]
pub enum SubmitError {
    #[error(transparent)]
    Invalid(#[from] ValidationError),

    // Backend rejected the submit; already rewritten for display
    #[error("{0}")]
    Rejected(String),

    #[error("form is not open")]
    NotOpen,
}

/// Create/edit modal: draft, local validation, submit, refresh.
///
/// `Closed -> Open -> Submitting -> (Succeeded -> Closed) | (error -> Open)`
pub struct FormModal {
    spec: &'static FormSpec,
    state: ModalState,
    draft: FormDraft,
    error: Option<String>,
    success: Option<String>,
    success_delay: Duration,
}

impl FormModal {
    pub fn new(spec: &'static FormSpec) -> Self {
        Self {
            spec,
            state: ModalState::Closed,
            draft: FormDraft::new(),
            error: None,
            success: None,
            success_delay: crate::config::config().success_delay(),
        }
    }

    pub fn with_success_delay(mut self, delay: Duration) -> Self {
        self.success_delay = delay;
        self
    }

    pub fn spec(&self) -> &'static FormSpec {
        self.spec
    }

    pub fn state(&self) -> ModalState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        self.state != ModalState::Closed
    }

    pub fn draft(&self) -> &FormDraft {
        &self.draft
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn success(&self) -> Option<&str> {
        self.success.as_deref()
    }

    /// Open with a fresh draft
    pub fn open(&mut self) {
        self.draft = self.spec.defaults();
        self.error = None;
        self.success = None;
        self.state = ModalState::Open;
    }

    /// Open for editing: defaults first, then whatever the entity has
    pub fn open_with(&mut self, entity: &Entity) {
        self.open();
        prefill(&mut self.draft, entity.fields());
    }

    pub fn close(&mut self) {
        self.draft.clear();
        self.error = None;
        self.success = None;
        self.state = ModalState::Closed;
    }

    /// Edit a field; ignored unless the modal is open
    pub fn set(&mut self, field: &str, value: impl Into<String>) {
        if self.state != ModalState::Open {
            return;
        }
        self.draft.insert(field.to_string(), value.into());
        self.error = None;
    }

    /// Validate, send, and on success close and run `refresh`.
    ///
    /// `send` is not called when validation fails. A backend failure keeps
    /// the modal open with the error message set.
    pub async fn submit<F, Fut, R, RFut>(&mut self, send: F, refresh: R) -> Result<Value, SubmitError>
    where
        F: FnOnce(Value) -> Fut,
        Fut: Future<Output = Result<Value, ApiError>>,
        R: FnOnce() -> RFut,
        RFut: Future<Output = ()>,
    {
        if self.state != ModalState::Open {
            return Err(SubmitError::NotOpen);
        }
        self.error = None;
        self.success = None;

        if let Err(invalid) = self.spec.validate(&self.draft) {
            self.error = Some(invalid.message.clone());
            return Err(SubmitError::Invalid(invalid));
        }

        let payload = (self.spec.payload)(&self.draft);
        self.state = ModalState::Submitting;

        match send(payload).await {
            Ok(response) => {
                tracing::info!("{}: {}", self.spec.title, self.spec.success_message);
                self.success = Some(self.spec.success_message.to_string());
                self.state = ModalState::Succeeded;

                if !self.success_delay.is_zero() {
                    tokio::time::sleep(self.success_delay).await;
                }
                self.close();
                refresh().await;
                Ok(response)
            }
            Err(e) => {
                tracing::error!("{} failed: {}", self.spec.title, e);
                let message = self.spec.failure_message(&e);
                self.error = Some(message.clone());
                self.state = ModalState::Open;
                Err(SubmitError::Rejected(message))
            }
        }
    }
}

fn prefill(draft: &mut FormDraft, fields: &Map<String, Value>) {
    for (name, slot) in draft.iter_mut() {
        match fields.get(name) {
            Some(Value::String(s)) => *slot = s.clone(),
            Some(Value::Number(n)) => *slot = n.to_string(),
            Some(Value::Bool(b)) => *slot = b.to_string(),
            Some(Value::Array(items)) => {
                *slot = items
                    .iter()
                    .filter_map(|v| v.as_str().map(str::to_string).or_else(|| v.as_f64().map(|n| n.to_string())))
                    .collect::<Vec<_>>()
                    .join(", ")
            }
            _ => {}
        }
    }
}

/// Trimmed string value of a draft field, or "" when absent
pub fn trimmed<'a>(draft: &'a FormDraft, name: &str) -> &'a str {
    draft.get(name).map(|v| v.trim()).unwrap_or("")
}
