// src/pixela/mod.rs

//! Minimal Pixela API client.
//!
//! One [`Client`] per process, built from the resolved settings. Resource
//! handles ([`Users`], [`Graphs`], ...) borrow nothing and are cheap to clone.

mod channel;
mod graph;
mod notification;
mod pixel;
mod profile;
mod user;
mod webhook;

pub use channel::{
    ChannelCreateInput, ChannelDefinition, ChannelDetail, ChannelUpdateInput, Channels,
    ListedDetail,
};
pub use graph::{
    GraphCreateInput, GraphDefinition, GraphPixel, GraphQuantityInput, GraphSvgInput,
    GraphUpdateInput, GraphUrlInput, Graphs, PixelDates, PixelDatesInput, PixelWithBody, Stats,
};
pub use notification::{
    NotificationCreateInput, NotificationDefinition, NotificationUpdateInput, Notifications,
};
pub use pixel::{PixelCreateInput, PixelUpdateInput, Pixels, Quantity};
pub use profile::{Profile, ProfileUpdateInput};
pub use user::{UserCreateInput, UserUpdateInput, Users};
pub use webhook::{WebhookCreateInput, WebhookCreated, WebhookDefinition, Webhooks};

use crate::config::Settings;

use reqwest::header::{HeaderValue, CONTENT_LENGTH, CONTENT_TYPE};
use reqwest::{Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::time::Duration;
use thiserror::Error;

const TOKEN_HEADER: &str = "X-USER-TOKEN";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const RETRY_DELAY: Duration = Duration::from_millis(500);

/// Transport-level failures. A completed call that Pixela answered with
/// `isSuccess: false` is not an error; it comes back as an [`Envelope`].
#[derive(Debug, Error)]
pub enum PixelaError {
    #[error("request failed")]
    Http(#[from] reqwest::Error),

    #[error("unexpected status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("invalid response (status {status})")]
    Decode {
        status: u16,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to encode request body")]
    Encode(#[source] serde_json::Error),
}

/// Uniform answer to every mutating call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope {
    #[serde(default)]
    pub message: String,

    #[serde(default)]
    pub is_success: bool,

    #[serde(default)]
    pub is_rejected: bool,

    /// Filled from the HTTP status, not from the body.
    #[serde(default)]
    pub status_code: u16,
}

#[cfg(test)]
impl Envelope {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            is_success: true,
            is_rejected: false,
            status_code: StatusCode::OK.as_u16(),
        }
    }

    pub fn failure(message: impl Into<String>, status_code: u16) -> Self {
        Self {
            message: message.into(),
            is_success: false,
            is_rejected: false,
            status_code,
        }
    }
}

/// Anything that carries an [`Envelope`]: plain results and results with
/// extra fields such as a created webhook hash.
pub trait Outcome {
    fn envelope(&self) -> &Envelope;
    fn envelope_mut(&mut self) -> &mut Envelope;
}

impl Outcome for Envelope {
    fn envelope(&self) -> &Envelope {
        self
    }

    fn envelope_mut(&mut self) -> &mut Envelope {
        self
    }
}

/// Answer to a query: the payload on success, the envelope otherwise.
#[derive(Debug, Clone, PartialEq)]
pub enum Reply<T> {
    Data(T),
    Failure(Envelope),
}

impl<T> Reply<T> {
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Reply<U> {
        match self {
            Reply::Data(data) => Reply::Data(f(data)),
            Reply::Failure(envelope) => Reply::Failure(envelope),
        }
    }
}

/// Raw HTTP answer after retries.
#[derive(Debug)]
struct Raw {
    status: StatusCode,
    body: String,
}

impl Raw {
    fn decode<T: DeserializeOwned>(&self) -> Result<T, PixelaError> {
        serde_json::from_str(&self.body).map_err(|source| PixelaError::Decode {
            status: self.status.as_u16(),
            source,
        })
    }

    fn outcome<T: DeserializeOwned + Outcome>(&self) -> Result<T, PixelaError> {
        let mut out: T = self.decode()?;
        out.envelope_mut().status_code = self.status.as_u16();
        Ok(out)
    }
}

#[derive(Deserialize)]
struct Rejection {
    #[serde(default, rename = "isRejected")]
    is_rejected: bool,
}

/// Pixela rejects a share of requests from non-supporters with
/// `"isRejected": true`; those are the only ones worth retrying.
fn is_rejected(body: &str) -> bool {
    serde_json::from_str::<Rejection>(body)
        .map(|r| r.is_rejected)
        .unwrap_or(false)
}

/// One outgoing request, rebuilt on every retry attempt.
#[derive(Debug, Clone)]
pub(crate) struct Call {
    method: Method,
    url: String,
    query: Vec<(&'static str, String)>,
    body: Option<JsonValue>,
    authenticated: bool,
}

impl Call {
    pub(crate) fn new(method: Method, url: String) -> Self {
        Self {
            method,
            url,
            query: Vec::new(),
            body: None,
            authenticated: true,
        }
    }

    pub(crate) fn json<B: Serialize>(mut self, body: &B) -> Result<Self, PixelaError> {
        self.body = Some(serde_json::to_value(body).map_err(PixelaError::Encode)?);
        Ok(self)
    }

    /// Add a query parameter when the value is present.
    pub(crate) fn param(mut self, key: &'static str, value: Option<&str>) -> Self {
        if let Some(value) = value {
            self.query.push((key, value.to_string()));
        }
        self
    }

    pub(crate) fn anonymous(mut self) -> Self {
        self.authenticated = false;
        self
    }
}

/// Pixela API client.
#[derive(Debug, Clone)]
pub struct Client {
    http: reqwest::Client,
    username: String,
    token: String,
    base_url: String,
    retry: u32,
    retry_delay: Duration,
}

impl Client {
    pub fn new(settings: &Settings) -> Result<Self, PixelaError> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(concat!("pa/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            username: settings.username.clone(),
            token: settings.token.clone(),
            base_url: settings.base_url.clone(),
            retry: settings.retry,
            retry_delay: RETRY_DELAY,
        })
    }

    /// Override the pause between retries of a rejected request.
    #[cfg(test)]
    pub fn with_retry_delay(mut self, delay: Duration) -> Self {
        self.retry_delay = delay;
        self
    }

    pub fn users(&self) -> Users {
        Users::new(self.clone())
    }

    pub fn profile(&self) -> Profile {
        Profile::new(self.clone())
    }

    pub fn graphs(&self) -> Graphs {
        Graphs::new(self.clone())
    }

    pub fn pixels(&self) -> Pixels {
        Pixels::new(self.clone())
    }

    pub fn channels(&self) -> Channels {
        Channels::new(self.clone())
    }

    pub fn notifications(&self) -> Notifications {
        Notifications::new(self.clone())
    }

    pub fn webhooks(&self) -> Webhooks {
        Webhooks::new(self.clone())
    }

    pub(crate) fn username(&self) -> &str {
        &self.username
    }

    pub(crate) fn token(&self) -> &str {
        &self.token
    }

    /// `{base}{path}`
    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// `{base}/v1/users/{username}{tail}`
    pub(crate) fn user_url(&self, tail: &str) -> String {
        format!("{}/v1/users/{}{}", self.base_url, self.username, tail)
    }

    fn build(&self, call: &Call) -> RequestBuilder {
        let mut req = self.http.request(call.method.clone(), &call.url);

        if call.authenticated {
            req = req.header(TOKEN_HEADER, &self.token);
        }
        if !call.query.is_empty() {
            req = req.query(&call.query);
        }

        match &call.body {
            Some(body) => req.json(body),
            None if call.method != Method::GET => req
                .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
                .header(CONTENT_LENGTH, 0),
            None => req,
        }
    }

    async fn send(&self, call: &Call) -> Result<Raw, PixelaError> {
        let mut attempt: u32 = 0;

        loop {
            tracing::debug!(method = %call.method, url = %call.url, attempt, "pixela request");

            let resp = self.build(call).send().await?;
            let status = resp.status();
            let body = resp.text().await?;

            tracing::debug!(status = status.as_u16(), "pixela response");

            if attempt < self.retry && is_rejected(&body) {
                attempt += 1;
                tracing::warn!(attempt, retry = self.retry, "request rejected, retrying");
                tokio::time::sleep(self.retry_delay).await;
                continue;
            }

            return Ok(Raw { status, body });
        }
    }

    /// Mutating call: the body is always an envelope (plus extra fields).
    pub(crate) async fn mutate<T>(&self, call: Call) -> Result<T, PixelaError>
    where
        T: DeserializeOwned + Outcome,
    {
        self.send(&call).await?.outcome()
    }

    /// Query: payload on 2xx, envelope otherwise.
    pub(crate) async fn query<T: DeserializeOwned>(&self, call: Call) -> Result<Reply<T>, PixelaError> {
        let raw = self.send(&call).await?;

        if raw.status.is_success() {
            Ok(Reply::Data(raw.decode()?))
        } else {
            Ok(Reply::Failure(raw.outcome()?))
        }
    }

    /// Query returning the body verbatim; non-2xx is a transport error that
    /// carries the body.
    pub(crate) async fn text(&self, call: Call) -> Result<String, PixelaError> {
        let raw = self.send(&call).await?;

        if !raw.status.is_success() {
            return Err(PixelaError::Status {
                status: raw.status.as_u16(),
                body: raw.body,
            });
        }

        Ok(raw.body)
    }
}
