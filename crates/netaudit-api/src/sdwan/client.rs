// SD-WAN controller HTTP client
//
// Cookie-based session: login posts form credentials to /j_security_check
// and the controller answers with a JSESSIONID cookie. The quirk of this
// endpoint is that wrong credentials still return HTTP 200 (with an HTML
// login page), so success is judged by the presence of the cookie, not
// the status code.

use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use url::Url;

use crate::error::Error;
use crate::sdwan::types::{DataEnvelope, SdwanDevice};
use crate::transport::TransportConfig;

const SESSION_COOKIE: &str = "JSESSIONID";

/// Async client for the SD-WAN controller REST API.
pub struct SdwanClient {
    http: reqwest::Client,
    base_url: Url,
}

impl SdwanClient {
    /// Create a new client from a base URL (e.g. `https://10.0.0.2`).
    ///
    /// If the transport config doesn't already include a cookie jar, one
    /// is created automatically (session auth requires cookies).
    pub fn new(base_url: Url, transport: &TransportConfig) -> Result<Self, Error> {
        let config = if transport.cookie_jar.is_some() {
            transport.clone()
        } else {
            transport.clone().with_cookie_jar()
        };
        let http = config.build_client()?;
        Ok(Self { http, base_url })
    }

    /// Wrap a pre-built `reqwest::Client` (caller supplies the cookie jar).
    pub fn with_client(http: reqwest::Client, base_url: Url) -> Self {
        Self { http, base_url }
    }

    /// The controller base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn api_url(&self, path: &str) -> Result<Url, Error> {
        self.base_url.join(path).map_err(Error::InvalidUrl)
    }

    // ── Authentication ───────────────────────────────────────────────

    /// Authenticate with the controller using username/password.
    ///
    /// On success the session cookie lands in the client's jar and is
    /// used for all subsequent requests. HTTP 200 without a `JSESSIONID`
    /// cookie means the credentials were rejected.
    pub async fn login(&self, username: &str, password: &SecretString) -> Result<(), Error> {
        let url = self.api_url("j_security_check")?;
        debug!("logging in at {url}");

        let form = [
            ("j_username", username),
            ("j_password", password.expose_secret()),
        ];

        let resp = self
            .http
            .post(url)
            .form(&form)
            .send()
            .await
            .map_err(Error::Transport)?;

        let status = resp.status();
        let got_cookie = resp.cookies().any(|c| c.name() == SESSION_COOKIE);

        if !status.is_success() || !got_cookie {
            return Err(Error::Authentication {
                message: format!("login failed (HTTP {status}): no session cookie issued"),
            });
        }

        debug!("login successful");
        Ok(())
    }

    /// End the current session.
    ///
    /// Logout failure is reported as an error but callers treat it as
    /// best-effort — an orphaned session expires on its own.
    pub async fn logout(&self) -> Result<(), Error> {
        let url = self.api_url("logout")?;
        debug!("logging out at {url}");

        let resp = self.http.get(url).send().await.map_err(Error::Transport)?;

        let status = resp.status();
        if !status.is_success() {
            return Err(Error::Api {
                status: status.as_u16(),
                message: "logout rejected".into(),
            });
        }

        debug!("logout complete");
        Ok(())
    }

    // ── Request helper ───────────────────────────────────────────────

    /// Send a GET request and unwrap the `{ data: [...] }` envelope.
    async fn get_data<T: DeserializeOwned>(&self, path: &str) -> Result<Vec<T>, Error> {
        let url = self.api_url(path)?;
        debug!("GET {url}");

        let resp = self.http.get(url).send().await.map_err(Error::Transport)?;

        let status = resp.status();
        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(Error::SessionExpired);
        }
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(Error::Api {
                status: status.as_u16(),
                message: body[..body.len().min(200)].to_owned(),
            });
        }

        let body = resp.text().await.map_err(Error::Transport)?;
        let envelope: DataEnvelope<T> = serde_json::from_str(&body).map_err(|e| {
            let preview = &body[..body.len().min(200)];
            Error::Deserialization {
                message: format!("{e} (body preview: {preview:?})"),
                body,
            }
        })?;

        Ok(envelope.data)
    }

    // ── Inventory queries ────────────────────────────────────────────

    /// List all managed devices.
    pub async fn list_devices(&self) -> Result<Vec<SdwanDevice>, Error> {
        self.get_data("dataservice/device").await
    }

    // ── Collection ───────────────────────────────────────────────────

    /// Full inventory collection: login, list devices, best-effort logout.
    pub async fn collect(
        &self,
        username: &str,
        password: &SecretString,
    ) -> Result<Vec<SdwanDevice>, Error> {
        self.login(username, password).await?;

        let devices = self.list_devices().await?;

        if let Err(e) = self.logout().await {
            warn!(error = %e, "logout failed, session left to expire");
        }

        Ok(devices)
    }
}
