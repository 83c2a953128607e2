use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::{multipart, Method};
use serde_json::Value;
use std::time::Duration;
use url::Url;

use crate::auth::Session;
use crate::config::AppConfig;
use crate::error::ApiError;

/// Header the backend reads the bearer token from
pub const AUTH_HEADER: &str = "x-authorization-token";

/// Request body variants accepted by the gateway
#[derive(Debug, Default)]
pub enum Body {
    #[default]
    Empty,
    Json(Value),
    /// Passed through untouched; the transport sets the multipart boundary
    Multipart(multipart::Form),
}

impl From<Value> for Body {
    fn from(value: Value) -> Self {
        Body::Json(value)
    }
}

/// Single chokepoint for all backend communication
#[derive(Debug, Clone)]
pub struct Gateway {
    client: reqwest::Client,
    base_url: String,
    session: Session,
    log_requests: bool,
}

impl Gateway {
    pub fn new(base_url: &str, session: Session, timeout: Duration) -> Result<Self, ApiError> {
        // Validate early so every endpoint join is infallible in practice
        Url::parse(base_url)?;

        let client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            session,
            log_requests: false,
        })
    }

    pub fn from_config(config: &AppConfig, session: Session) -> Result<Self, ApiError> {
        Ok(Self::new(&config.api.base_url, session, config.request_timeout())?
            .with_request_logging(config.api.enable_request_logging))
    }

    /// Log every completed request at info level
    pub fn with_request_logging(mut self, enabled: bool) -> Self {
        self.log_requests = enabled;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Same transport, different session (after login or logout)
    pub fn with_session(&self, session: Session) -> Self {
        Self {
            client: self.client.clone(),
            base_url: self.base_url.clone(),
            session,
            log_requests: self.log_requests,
        }
    }

    /// Absolute URL for an API path plus query parameters
    pub fn url(&self, path: &str, query: &[(&str, String)]) -> Result<Url, ApiError> {
        let mut url = Url::parse(&format!("{}/{}", self.base_url, path.trim_start_matches('/')))?;
        if !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in query {
                pairs.append_pair(key, value);
            }
        }
        Ok(url)
    }

    /// Send one request and unwrap its JSON body.
    ///
    /// Non-2xx responses fail with the body's `message` or `error` field.
    /// With `requires_auth` the session token is attached when there is one;
    /// a missing token is left for the backend to reject.
    pub async fn request(
        &self,
        endpoint: Url,
        method: Method,
        body: Body,
        requires_auth: bool,
    ) -> Result<Value, ApiError> {
        let mut headers = HeaderMap::new();

        if requires_auth {
            if let Some(token) = self.session.token() {
                match HeaderValue::from_str(token) {
                    Ok(value) => {
                        headers.insert(AUTH_HEADER, value);
                    }
                    Err(_) => tracing::warn!("Session token is not a valid header value; sending without it"),
                }
            }
        }

        let mut builder = self.client.request(method.clone(), endpoint.clone());
        builder = match body {
            Body::Empty => {
                headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
                builder
            }
            Body::Json(value) => {
                headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
                builder.json(&value)
            }
            Body::Multipart(form) => builder.multipart(form),
        };

        tracing::debug!("{} {}", method, endpoint);

        let response = match builder.headers(headers).send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::error!("API Error [{} {}] {}", method, endpoint, e);
                return Err(ApiError::Transport(e));
            }
        };

        let status = response.status();
        if self.log_requests {
            tracing::info!("{} {} -> {}", method, endpoint, status.as_u16());
        }
        let bytes = response.bytes().await?;
        let parsed: Option<Value> = if bytes.is_empty() {
            None
        } else {
            serde_json::from_slice(&bytes).ok()
        };

        if !status.is_success() {
            let err = ApiError::from_response(status.as_u16(), parsed.as_ref().unwrap_or(&Value::Null));
            tracing::error!("API Error [{} {}] {}: {}", method, endpoint, status.as_u16(), err);
            return Err(err);
        }

        match parsed {
            Some(value) => Ok(value),
            None if bytes.is_empty() => Ok(Value::Null),
            None => Err(ApiError::InvalidResponse(format!(
                "{} {} returned a non-JSON body",
                method, endpoint
            ))),
        }
    }

    pub async fn get(&self, path: &str, query: &[(&str, String)]) -> Result<Value, ApiError> {
        self.request(self.url(path, query)?, Method::GET, Body::Empty, true).await
    }

    pub async fn post(&self, path: &str, body: impl Into<Body>) -> Result<Value, ApiError> {
        self.request(self.url(path, &[])?, Method::POST, body.into(), true).await
    }

    pub async fn put(&self, path: &str, body: impl Into<Body>) -> Result<Value, ApiError> {
        self.request(self.url(path, &[])?, Method::PUT, body.into(), true).await
    }

    pub async fn delete(&self, path: &str) -> Result<Value, ApiError> {
        self.request(self.url(path, &[])?, Method::DELETE, Body::Empty, true).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gateway() -> Gateway {
        Gateway::new("http://localhost:4001/api/v1/", Session::anonymous(), Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn url_joins_path_and_query() {
        let url = gateway()
            .url("/admin/getUsers/Tenant", &[("page", "2".to_string()), ("limit", "10".to_string())])
            .unwrap();
        assert_eq!(url.as_str(), "http://localhost:4001/api/v1/admin/getUsers/Tenant?page=2&limit=10");
    }

    #[test]
    fn query_values_are_encoded() {
        let url = gateway().url("property/userProperties", &[("userId", "a b&c".to_string())]).unwrap();
        assert_eq!(url.query(), Some("userId=a+b%26c"));
    }

    #[test]
    fn rejects_invalid_base_url() {
        let err = Gateway::new("not a url", Session::anonymous(), Duration::from_secs(1)).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_URL");
    }

    #[test]
    fn with_session_swaps_only_the_session() {
        let gw = gateway();
        let signed_in = gw.with_session(Session::new("tok", None));
        assert_eq!(signed_in.base_url(), gw.base_url());
        assert_eq!(signed_in.session().token(), Some("tok"));
        assert_eq!(gw.session().token(), None);
    }
}
