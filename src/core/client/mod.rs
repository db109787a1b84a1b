//! Public client surface, builder and the cookie/crumb session.

mod constants;

use crate::core::YfError;
use constants::{
    DEFAULT_BASE_CHART, DEFAULT_BASE_QUOTE_API, DEFAULT_BASE_TIMESERIES, DEFAULT_COOKIE_URL,
    DEFAULT_CRUMB_URL, USER_AGENT,
};
use reqwest::{Client, RequestBuilder, Response, header::{COOKIE, SET_COOKIE}};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, RwLock};
use url::Url;

#[derive(Debug, Default)]
struct ClientState {
    cookie: Option<String>,
    crumb: Option<String>,
}

/// HTTP client for the Yahoo Finance endpoints the snapshot needs.
///
/// Cheap to clone: clones share the connection pool and the cookie/crumb credentials.
#[derive(Debug, Clone)]
pub struct YfClient {
    http: Client,
    base_chart: Url,
    base_quote_api: Url,
    base_timeseries: Url,
    cookie_url: Url,
    crumb_url: Url,

    state: Arc<RwLock<ClientState>>,
    credential_fetch_lock: Arc<Mutex<()>>,
}

impl YfClient {
    /// Create a new builder.
    pub fn builder() -> YfClientBuilder {
        YfClientBuilder::default()
    }

    /* -------- internal getters used by other modules -------- */

    pub(crate) fn http(&self) -> &Client {
        &self.http
    }
    pub(crate) fn base_chart(&self) -> &Url {
        &self.base_chart
    }
    pub(crate) fn base_quote_api(&self) -> &Url {
        &self.base_quote_api
    }
    pub(crate) fn base_timeseries(&self) -> &Url {
        &self.base_timeseries
    }

    /// Sends a request and turns any non-2xx answer into [`YfError::Status`].
    pub(crate) async fn send_checked(&self, req: RequestBuilder) -> Result<Response, YfError> {
        let resp = req.send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(YfError::Status {
                status: status.as_u16(),
                url: redact_crumb(resp.url()),
            });
        }
        Ok(resp)
    }

    /* -------- session: cookie first, then a crumb bound to it -------- */

    /// Makes sure a crumb is available, running the handshake at most once across clones.
    pub(crate) async fn ensure_credentials(&self) -> Result<(), YfError> {
        if self.has_crumb().await {
            return Ok(());
        }
        let _guard = self.credential_fetch_lock.lock().await;
        // re-check: a concurrent caller may have completed the handshake
        if self.has_crumb().await {
            return Ok(());
        }

        let cookie = self.fetch_cookie().await?;
        self.state.write().await.cookie = Some(cookie);
        let crumb = self.fetch_crumb().await?;
        self.state.write().await.crumb = Some(crumb);
        Ok(())
    }

    /// Drops a crumb Yahoo rejected so the next request renegotiates the session.
    pub(crate) async fn clear_crumb(&self) {
        self.state.write().await.crumb = None;
    }

    pub(crate) async fn crumb(&self) -> Option<String> {
        self.state.read().await.crumb.clone()
    }

    async fn has_crumb(&self) -> bool {
        self.state.read().await.crumb.is_some()
    }

    #[tracing::instrument(skip(self), err)]
    async fn fetch_cookie(&self) -> Result<String, YfError> {
        // the consent endpoint sets the cookie on a 404 too
        let resp = self.http.get(self.cookie_url.clone()).send().await?;
        let header = resp
            .headers()
            .get(SET_COOKIE)
            .ok_or_else(|| YfError::Auth("consent endpoint set no cookie".into()))?;
        header
            .to_str()
            .map(str::to_string)
            .map_err(|_| YfError::Auth("cookie header is not valid ASCII".into()))
    }

    #[tracing::instrument(skip(self), err)]
    async fn fetch_crumb(&self) -> Result<String, YfError> {
        let cookie = self
            .state
            .read()
            .await
            .cookie
            .clone()
            .ok_or_else(|| YfError::Auth("no session cookie to request a crumb with".into()))?;
        // `Set-Cookie` carries attributes after the first `;`; only the pair is sent back
        let pair = cookie.split(';').next().unwrap_or_default().trim().to_string();

        let req = self.http.get(self.crumb_url.clone()).header(COOKIE, pair);
        let resp = self.send_checked(req).await?;
        let crumb = resp.text().await?;

        // an HTML or JSON body means the session was refused
        let looks_valid = !crumb.is_empty() && !crumb.contains(['{', '<']);
        if !looks_valid {
            return Err(YfError::Auth(format!("unusable crumb response: {crumb}")));
        }
        Ok(crumb)
    }
}

/// `url` as text without its `crumb` query pair, for error messages and logs.
pub(crate) fn redact_crumb(url: &Url) -> String {
    let kept: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(key, _)| key != "crumb")
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect();

    let mut out = url.clone();
    if kept.is_empty() {
        out.set_query(None);
    } else {
        out.query_pairs_mut().clear().extend_pairs(kept);
    }
    out.to_string()
}

/* ----------------------- Builder ----------------------- */

#[derive(Default)]
pub struct YfClientBuilder {
    user_agent: Option<String>,
    base_chart: Option<Url>,
    base_quote_api: Option<Url>,
    base_timeseries: Option<Url>,
    cookie_url: Option<Url>,
    crumb_url: Option<Url>,

    preauth_cookie: Option<String>,
    preauth_crumb: Option<String>,

    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
}

impl YfClientBuilder {
    /// Override the User-Agent.
    #[must_use]
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    /// Override the chart API base (e.g., `https://query1.finance.yahoo.com/v8/finance/chart/`).
    #[must_use]
    pub fn base_chart(mut self, url: Url) -> Self {
        self.base_chart = Some(url);
        self
    }

    /// Override the quoteSummary API base (e.g., `https://query1.finance.yahoo.com/v10/finance/quoteSummary/`).
    #[must_use]
    pub fn base_quote_api(mut self, url: Url) -> Self {
        self.base_quote_api = Some(url);
        self
    }

    /// Override the fundamentals timeseries base.
    #[must_use]
    pub fn base_timeseries(mut self, url: Url) -> Self {
        self.base_timeseries = Some(url);
        self
    }

    /// Override the cookie bootstrap URL.
    #[must_use]
    pub fn cookie_url(mut self, url: Url) -> Self {
        self.cookie_url = Some(url);
        self
    }

    /// Override the crumb URL.
    #[must_use]
    pub fn crumb_url(mut self, url: Url) -> Self {
        self.crumb_url = Some(url);
        self
    }

    /// Set a global request timeout (overall). Default: none.
    #[must_use]
    pub fn timeout(mut self, dur: Duration) -> Self {
        self.timeout = Some(dur);
        self
    }

    /// Set a connect timeout. Default: none.
    #[must_use]
    pub fn connect_timeout(mut self, dur: Duration) -> Self {
        self.connect_timeout = Some(dur);
        self
    }

    #[doc(hidden)]
    #[must_use]
    pub fn _preauth(mut self, cookie: impl Into<String>, crumb: impl Into<String>) -> Self {
        self.preauth_cookie = Some(cookie.into());
        self.preauth_crumb = Some(crumb.into());
        self
    }

    /// Builds the client.
    ///
    /// # Errors
    ///
    /// Returns an error if a default endpoint fails to parse or the HTTP client cannot be built.
    pub fn build(self) -> Result<YfClient, YfError> {
        let base_chart = match self.base_chart {
            Some(u) => u,
            None => Url::parse(DEFAULT_BASE_CHART)?,
        };
        let base_quote_api = match self.base_quote_api {
            Some(u) => u,
            None => Url::parse(DEFAULT_BASE_QUOTE_API)?,
        };
        let base_timeseries = match self.base_timeseries {
            Some(u) => u,
            None => Url::parse(DEFAULT_BASE_TIMESERIES)?,
        };
        let cookie_url = match self.cookie_url {
            Some(u) => u,
            None => Url::parse(DEFAULT_COOKIE_URL)?,
        };
        let crumb_url = match self.crumb_url {
            Some(u) => u,
            None => Url::parse(DEFAULT_CRUMB_URL)?,
        };

        let mut httpb = reqwest::Client::builder()
            .user_agent(self.user_agent.as_deref().unwrap_or(USER_AGENT))
            .cookie_store(true);

        if let Some(t) = self.timeout {
            httpb = httpb.timeout(t);
        }
        if let Some(ct) = self.connect_timeout {
            httpb = httpb.connect_timeout(ct);
        }

        let http = httpb.build()?;

        Ok(YfClient {
            http,
            base_chart,
            base_quote_api,
            base_timeseries,
            cookie_url,
            crumb_url,
            state: Arc::new(RwLock::new(ClientState {
                cookie: self.preauth_cookie,
                crumb: self.preauth_crumb,
            })),
            credential_fetch_lock: Arc::new(Mutex::new(())),
        })
    }
}
