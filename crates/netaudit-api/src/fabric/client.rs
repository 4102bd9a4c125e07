// Fabric controller HTTP client
//
// Wraps `reqwest::Client` with the controller's URL scheme, the
// `{ totalCount, imdata }` envelope, and session-token bookkeeping. The
// token is captured at login and applied as the `APIC-cookie` cookie on
// every subsequent request.

use std::sync::RwLock;

use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use serde_json::json;
use tracing::{debug, warn};
use url::Url;

use crate::error::Error;
use crate::fabric::types::{
    AaaLoginRecord, ClassEnvelope, FabricNode, FabricNodeAttributes, FabricNodeRecord,
    FirmwareRunningRecord, TopSystemRecord,
};
use crate::transport::TransportConfig;

/// Async client for the fabric controller REST API.
pub struct FabricClient {
    http: reqwest::Client,
    base_url: Url,
    /// Session token from the login response, sent as the `APIC-cookie`
    /// cookie on every request after login.
    token: RwLock<Option<String>>,
}

impl FabricClient {
    /// Create a new client from a base URL (e.g. `https://10.0.0.1`).
    pub fn new(base_url: Url, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self {
            http,
            base_url,
            token: RwLock::new(None),
        })
    }

    /// Wrap a pre-built `reqwest::Client` (used by tests).
    pub fn with_client(http: reqwest::Client, base_url: Url) -> Self {
        Self {
            http,
            base_url,
            token: RwLock::new(None),
        }
    }

    /// The controller base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ── Session token ────────────────────────────────────────────────

    fn set_token(&self, token: String) {
        *self.token.write().expect("token lock poisoned") = Some(token);
    }

    /// Apply the stored session token to a request builder.
    fn apply_token(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        let guard = self.token.read().expect("token lock poisoned");
        match guard.as_deref() {
            Some(token) => builder.header(reqwest::header::COOKIE, format!("APIC-cookie={token}")),
            None => builder,
        }
    }

    // ── URL builder ──────────────────────────────────────────────────

    /// Build a full URL for an API path (e.g. `api/aaaLogin.json`).
    fn api_url(&self, path: &str) -> Result<Url, Error> {
        self.base_url.join(path).map_err(Error::InvalidUrl)
    }

    // ── Request helpers ──────────────────────────────────────────────

    /// Send a GET request and parse the class-query envelope.
    async fn get_class<T: DeserializeOwned>(&self, path: &str) -> Result<ClassEnvelope<T>, Error> {
        let url = self.api_url(path)?;
        debug!("GET {url}");

        let resp = self
            .apply_token(self.http.get(url))
            .send()
            .await
            .map_err(Error::Transport)?;

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
        serde_json::from_str(&body).map_err(|e| {
            let preview = &body[..body.len().min(200)];
            Error::Deserialization {
                message: format!("{e} (body preview: {preview:?})"),
                body,
            }
        })
    }

    // ── Authentication ───────────────────────────────────────────────

    /// Authenticate with the controller.
    ///
    /// POSTs the `aaaUser` credential body to `/api/aaaLogin.json` and
    /// stores the returned session token. A non-2xx response or a
    /// response without a token is an authentication failure.
    pub async fn login(&self, username: &str, password: &SecretString) -> Result<(), Error> {
        let url = self.api_url("api/aaaLogin.json")?;
        debug!("logging in at {url}");

        let body = json!({
            "aaaUser": {
                "attributes": {
                    "name": username,
                    "pwd": password.expose_secret(),
                }
            }
        });

        let resp = self
            .http
            .post(url)
            .json(&body)
            .send()
            .await
            .map_err(Error::Transport)?;

        let status = resp.status();
        if !status.is_success() {
            return Err(Error::Authentication {
                message: format!("login failed (HTTP {status}): bad request or wrong credentials"),
            });
        }

        let body = resp.text().await.map_err(Error::Transport)?;
        let envelope: ClassEnvelope<AaaLoginRecord> =
            serde_json::from_str(&body).map_err(|e| Error::Authentication {
                message: format!("login response not understood: {e}"),
            })?;

        let token = envelope
            .imdata
            .into_iter()
            .next()
            .map(|r| r.aaa_login.attributes.token)
            .ok_or_else(|| Error::Authentication {
                message: "login response carried no session token".into(),
            })?;

        self.set_token(token);
        debug!("login successful");
        Ok(())
    }

    // ── Inventory queries ────────────────────────────────────────────

    /// List all managed fabric nodes.
    pub async fn list_nodes(&self) -> Result<Vec<FabricNodeAttributes>, Error> {
        let envelope: ClassEnvelope<FabricNodeRecord> =
            self.get_class("api/node/class/fabricNode.json").await?;

        Ok(envelope
            .imdata
            .into_iter()
            .map(|r| r.fabric_node.attributes)
            .collect())
    }

    /// Running firmware version for one node, `None` when the controller
    /// has no record for it.
    pub async fn node_firmware(&self, dn: &str) -> Result<Option<String>, Error> {
        let envelope: ClassEnvelope<FirmwareRunningRecord> = self
            .get_class(&format!("api/node/class/{dn}/firmwareRunning.json"))
            .await?;

        if envelope.is_empty() {
            return Ok(None);
        }
        Ok(envelope
            .imdata
            .into_iter()
            .next()
            .map(|r| r.firmware_running.attributes.version))
    }

    /// System uptime for one node as the controller's raw colon-delimited
    /// string, `None` when the controller has no record for it.
    pub async fn node_uptime(&self, dn: &str) -> Result<Option<String>, Error> {
        let envelope: ClassEnvelope<TopSystemRecord> = self
            .get_class(&format!("api/node/class/{dn}/topSystem.json"))
            .await?;

        if envelope.is_empty() {
            return Ok(None);
        }
        Ok(envelope
            .imdata
            .into_iter()
            .next()
            .map(|r| r.top_system.attributes.system_up_time))
    }

    // ── Collection ───────────────────────────────────────────────────

    /// Full inventory collection: login, list nodes, resolve per-node
    /// firmware and uptime.
    ///
    /// Authentication failure aborts this endpoint's collection. A failed
    /// secondary lookup degrades only that node's field — the error is
    /// logged and the field stays `None`.
    pub async fn collect(
        &self,
        username: &str,
        password: &SecretString,
    ) -> Result<Vec<FabricNode>, Error> {
        self.login(username, password).await?;

        let attrs = self.list_nodes().await?;
        let mut nodes = Vec::with_capacity(attrs.len());

        for node in attrs {
            let firmware_version = match self.node_firmware(&node.dn).await {
                Ok(v) => v,
                Err(e) => {
                    warn!(node = %node.dn, error = %e, "firmware lookup failed");
                    None
                }
            };

            let uptime = match self.node_uptime(&node.dn).await {
                Ok(v) => v,
                Err(e) => {
                    warn!(node = %node.dn, error = %e, "uptime lookup failed");
                    None
                }
            };

            nodes.push(FabricNode {
                name: node.name,
                model: node.model,
                serial: node.serial,
                dn: node.dn,
                firmware_version,
                uptime,
            });
        }

        Ok(nodes)
    }
}
