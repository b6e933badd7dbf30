// HR/CRM REST client
//
// Wraps `reqwest::Client` with bearer authentication, base-URL joining for
// the main API and the attendance service, response envelope unwrapping and
// server-message extraction. Endpoint groups (departments, assets, leads,
// ...) are implemented as inherent methods in sibling modules to keep this
// file focused on transport mechanics.

use std::time::Duration;

use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use reqwest::multipart::Form;
use secrecy::ExposeSecret;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, trace};
use url::Url;

use crate::auth::AuthContext;
use crate::error::Error;
use crate::transport::TransportConfig;
use crate::upload::Attachment;

/// Which backend a path is resolved against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Service {
    /// Main REST API (`api_url`).
    Api,
    /// Attendance microservice (`attendance_url`).
    Attendance,
}

/// Async client for the HR/CRM backend.
///
/// Every request carries `Authorization: Bearer <token>`; JSON bodies are
/// sent with `Content-Type: application/json`. Responses may be bare JSON or
/// wrapped in `{ "data": ..., "message": ... }`; the wrapper is stripped
/// before the caller sees it.
pub struct HrClient {
    http: reqwest::Client,
    api_url: Url,
    attendance_url: Url,
    company_id: String,
    employee_id: Option<String>,
}

impl HrClient {
    // ── Constructors ─────────────────────────────────────────────────

    /// Build a client from base URLs, an auth context and transport settings.
    ///
    /// The bearer token is injected as a sensitive default header.
    pub fn new(
        api_url: &str,
        attendance_url: &str,
        auth: &AuthContext,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        let mut headers = HeaderMap::new();
        let mut bearer =
            HeaderValue::from_str(&format!("Bearer {}", auth.token.expose_secret()))
                .map_err(|e| Error::InvalidToken(e.to_string()))?;
        bearer.set_sensitive(true);
        headers.insert(AUTHORIZATION, bearer);

        let http = transport.build_client_with_headers(headers)?;

        Ok(Self {
            http,
            api_url: Self::normalize_base_url(api_url)?,
            attendance_url: Self::normalize_base_url(attendance_url)?,
            company_id: auth.company_id.clone(),
            employee_id: auth.employee_id.clone(),
        })
    }

    /// Ensure the base URL ends with `/` so relative joins append.
    fn normalize_base_url(raw: &str) -> Result<Url, Error> {
        let mut url = Url::parse(raw)?;
        let path = url.path().trim_end_matches('/').to_owned();
        url.set_path(&format!("{path}/"));
        Ok(url)
    }

    /// Company all company-scoped endpoints are addressed to.
    pub fn company_id(&self) -> &str {
        &self.company_id
    }

    /// The operator's own employee ID, when the session carried one.
    pub fn employee_id(&self) -> Option<&str> {
        self.employee_id.as_deref()
    }

    pub fn api_url(&self) -> &Url {
        &self.api_url
    }

    pub fn attendance_url(&self) -> &Url {
        &self.attendance_url
    }

    // ── URL builder ──────────────────────────────────────────────────

    pub(crate) fn url(&self, service: Service, path: &str) -> Result<Url, Error> {
        let base = match service {
            Service::Api => &self.api_url,
            Service::Attendance => &self.attendance_url,
        };
        Ok(base.join(path.trim_start_matches('/'))?)
    }

    // ── HTTP verbs ───────────────────────────────────────────────────

    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        service: Service,
        path: &str,
    ) -> Result<T, Error> {
        self.get_with_params(service, path, &[], None).await
    }

    pub(crate) async fn get_with_params<T: DeserializeOwned>(
        &self,
        service: Service,
        path: &str,
        params: &[(&str, String)],
        timeout: Option<Duration>,
    ) -> Result<T, Error> {
        let url = self.url(service, path)?;
        debug!("GET {url} params={params:?}");

        let builder = self.http.get(url).query(params);
        let resp = self.send(builder, timeout).await?;
        self.handle_response(resp).await
    }

    pub(crate) async fn post<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        service: Service,
        path: &str,
        body: &B,
        timeout: Option<Duration>,
    ) -> Result<T, Error> {
        let url = self.url(service, path)?;
        debug!("POST {url}");

        let resp = self.send(self.http.post(url).json(body), timeout).await?;
        self.handle_response(resp).await
    }

    pub(crate) async fn post_no_response<B: Serialize + Sync>(
        &self,
        service: Service,
        path: &str,
        body: &B,
    ) -> Result<(), Error> {
        let url = self.url(service, path)?;
        debug!("POST {url}");

        let resp = self.send(self.http.post(url).json(body), None).await?;
        self.handle_empty(resp).await
    }

    pub(crate) async fn put<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        service: Service,
        path: &str,
        body: &B,
    ) -> Result<T, Error> {
        let url = self.url(service, path)?;
        debug!("PUT {url}");

        let resp = self.send(self.http.put(url).json(body), None).await?;
        self.handle_response(resp).await
    }

    pub(crate) async fn patch<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        service: Service,
        path: &str,
        body: &B,
    ) -> Result<T, Error> {
        let url = self.url(service, path)?;
        debug!("PATCH {url}");

        let resp = self.send(self.http.patch(url).json(body), None).await?;
        self.handle_response(resp).await
    }

    pub(crate) async fn delete(&self, service: Service, path: &str) -> Result<(), Error> {
        let url = self.url(service, path)?;
        debug!("DELETE {url}");

        let resp = self.send(self.http.delete(url), None).await?;
        self.handle_empty(resp).await
    }

    /// POST or PUT a multipart body: one JSON-stringified metadata part
    /// plus one part per attachment.
    pub(crate) async fn send_multipart<T: DeserializeOwned, M: Serialize + Sync>(
        &self,
        method: reqwest::Method,
        path: &str,
        metadata_field: &'static str,
        metadata: &M,
        attachments: Vec<Attachment>,
    ) -> Result<T, Error> {
        let url = self.url(Service::Api, path)?;
        debug!("{method} {url} (multipart, {} attachments)", attachments.len());

        let json = serde_json::to_string(metadata).map_err(|e| Error::Deserialization {
            message: format!("cannot encode {metadata_field}: {e}"),
            body: String::new(),
        })?;
        let mut form = Form::new().text(metadata_field, json);
        for attachment in attachments {
            let field = attachment.field.as_ref().to_owned();
            form = form.part(field, attachment.into_part()?);
        }

        let resp = self
            .send(self.http.request(method, url).multipart(form), None)
            .await?;
        self.handle_response(resp).await
    }

    async fn send(
        &self,
        builder: reqwest::RequestBuilder,
        timeout: Option<Duration>,
    ) -> Result<reqwest::Response, Error> {
        let builder = match timeout {
            Some(t) => builder.timeout(t),
            None => builder,
        };
        builder.send().await.map_err(|e| match timeout {
            Some(t) if e.is_timeout() => Error::Timeout {
                timeout_secs: t.as_secs(),
            },
            _ => Error::Transport(e),
        })
    }

    // ── Response handling ────────────────────────────────────────────

    async fn handle_response<T: DeserializeOwned>(
        &self,
        resp: reqwest::Response,
    ) -> Result<T, Error> {
        let status = resp.status();
        if !status.is_success() {
            return Err(parse_error(status, resp).await);
        }

        let body = resp.text().await?;
        unwrap_envelope(status.as_u16(), &body)
    }

    async fn handle_empty(&self, resp: reqwest::Response) -> Result<(), Error> {
        let status = resp.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(parse_error(status, resp).await)
        }
    }
}

/// Decode a success body, stripping the optional `{ data, message }` wrapper.
///
/// A wrapper that reports `"success": false` is turned into an error even
/// though the HTTP status was 2xx.
pub(crate) fn unwrap_envelope<T: DeserializeOwned>(status: u16, body: &str) -> Result<T, Error> {
    let deser_err = |e: serde_json::Error| {
        let preview = body.char_indices().nth(200).map_or(body, |(i, _)| &body[..i]);
        Error::Deserialization {
            message: format!("{e} (body preview: {preview:?})"),
            body: body.to_owned(),
        }
    };

    let value: Value = if body.trim().is_empty() {
        Value::Null
    } else {
        serde_json::from_str(body).map_err(deser_err)?
    };

    let payload = match value {
        Value::Object(mut map) => {
            if map.get("success").and_then(Value::as_bool) == Some(false) {
                return Err(Error::Http {
                    status,
                    message: extract_message(&Value::Object(map)),
                });
            }
            match map.remove("data") {
                Some(data) => data,
                None => Value::Object(map),
            }
        }
        other => other,
    };

    trace!("response payload decoded");
    serde_json::from_value(payload).map_err(deser_err)
}

async fn parse_error(status: reqwest::StatusCode, resp: reqwest::Response) -> Error {
    let raw = resp.text().await.unwrap_or_default();
    let message = serde_json::from_str::<Value>(&raw)
        .ok()
        .and_then(|v| extract_message(&v));

    if status == reqwest::StatusCode::UNAUTHORIZED {
        return Error::Unauthorized {
            message: message.unwrap_or_else(|| "token missing or expired".into()),
        };
    }

    Error::Http {
        status: status.as_u16(),
        message,
    }
}

/// Pull a human-readable validation message out of an error body.
///
/// Checks `message`, then `error` (string or `{message}`), then the first
/// entry of `errors` (string or `{msg|message}`).
pub(crate) fn extract_message(body: &Value) -> Option<String> {
    let text = |v: &Value| {
        v.as_str()
            .map(str::to_owned)
            .or_else(|| {
                v.get("message")
                    .or_else(|| v.get("msg"))
                    .and_then(Value::as_str)
                    .map(str::to_owned)
            })
            .filter(|s| !s.trim().is_empty())
    };

    body.get("message")
        .and_then(text)
        .or_else(|| body.get("error").and_then(text))
        .or_else(|| {
            body.get("errors")
                .and_then(Value::as_array)
                .and_then(|errs| errs.first())
                .and_then(text)
        })
}
