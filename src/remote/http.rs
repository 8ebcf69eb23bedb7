//! reqwest-backed transport.

use reqwest::header;
use reqwest::{Client, RequestBuilder};
use secrecy::{ExposeSecret, SecretString};
use std::fmt;
use url::Url;

use crate::config::Config;
use crate::error::{Result, TriageError};
use crate::page::FormSubmission;

use super::{ApiError, Method, Request, Response, Transport};

pub struct HttpTransport {
    client: Client,
    base_url: Url,
    /// Raw `Cookie` header value for the authenticated session
    session: Option<SecretString>,
}

impl fmt::Debug for HttpTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpTransport")
            .field("base_url", &self.base_url.as_str())
            .field("session", &self.session.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

impl HttpTransport {
    /// Endpoint paths are resolved relative to `base_url`, which is
    /// normalised to end with a slash.
    pub fn new(base_url: &str, session: Option<SecretString>) -> Result<Self> {
        let mut base_url = Url::parse(base_url)?;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let client = Client::builder().cookie_store(true).build()?;

        Ok(Self {
            client,
            base_url,
            session,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        let base_url = config.base_url().ok_or_else(|| {
            TriageError::Config(
                "base_url not configured. Run: triage config set base_url <url>".to_string(),
            )
        })?;
        Self::new(&base_url, config.session_cookie())
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn url_for(&self, path: &str) -> Result<Url> {
        Ok(self.base_url.join(path)?)
    }

    fn with_session(&self, builder: RequestBuilder) -> RequestBuilder {
        match &self.session {
            Some(cookie) => builder.header(header::COOKIE, cookie.expose_secret()),
            None => builder,
        }
    }

    async fn finish(response: reqwest::Response) -> Result<Response> {
        let status = response.status();
        let location = Some(response.url().path().to_string());
        let body = response.text().await?;

        if !status.is_success() {
            tracing::warn!(%status, "console request failed");
            return Err(ApiError::new(status, body).into());
        }

        Ok(Response {
            status: status.as_u16(),
            body,
            location,
        })
    }
}

impl Transport for HttpTransport {
    async fn send(&self, request: Request) -> Result<Response> {
        let url = self.url_for(request.endpoint.path())?;
        tracing::debug!(endpoint = %request.endpoint, "sending console request");

        let builder = match request.endpoint.method() {
            Method::Get => self.client.get(url).query(&request.params),
            Method::Post => self.client.post(url).form(&request.params),
        };

        let response = self.with_session(builder).send().await?;
        Self::finish(response).await
    }

    async fn submit_form(&self, submission: FormSubmission) -> Result<Response> {
        let url = self.url_for(&submission.action)?;
        tracing::debug!(action = %submission.action, "submitting form");

        let builder = self.client.post(url).form(&submission.fields);
        let response = self.with_session(builder).send().await?;
        Self::finish(response).await
    }
}
