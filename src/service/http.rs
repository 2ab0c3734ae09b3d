//! `PoddService` over HTTP with reqwest
//!
//! All requests accept `application/rdf+json`; submissions send it. Failed
//! requests are reported once and never retried.

use crate::config::ServerConfig;
use crate::error::{Error, TransportError};
use crate::rdf::{json, Databank};
use crate::service::{PoddService, SearchRequest, SubmitTarget};
use reqwest::{header, Client, RequestBuilder, Url};
use std::time::Duration;
use tracing::{debug, info, warn};

static APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// HTTP client for one PODD server
#[derive(Debug, Clone)]
pub struct HttpService {
    client: Client,
    base_url: String,
    timeout_secs: u64,
}

impl HttpService {
    pub fn new(config: &ServerConfig) -> Result<Self, Error> {
        let client = Client::builder()
            .user_agent(APP_USER_AGENT)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| {
                Error::Transport(TransportError::RequestFailed {
                    url: config.base_url.clone(),
                    source: format!("Failed to build HTTP client: {}", e),
                })
            })?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            timeout_secs: config.timeout_secs,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str, params: &[(&str, &str)]) -> Result<Url, Error> {
        let raw = format!("{}/{}", self.base_url, path);
        let parsed = if params.is_empty() {
            Url::parse(&raw)
        } else {
            Url::parse_with_params(&raw, params)
        };
        parsed.map_err(|e| Error::Transport(TransportError::InvalidUrl(format!("{}: {}", raw, e))))
    }

    pub fn metadata_url(&self, object_type_uri: &str) -> Result<Url, Error> {
        self.endpoint("metadata", &[("objecttypeuri", object_type_uri)])
    }

    pub fn artifact_url(&self, artifact_iri: &str) -> Result<Url, Error> {
        self.endpoint("artifact/base", &[("artifacturi", artifact_iri)])
    }

    pub fn search_url(&self, request: &SearchRequest) -> Result<Url, Error> {
        let mut params = vec![("searchterm", request.term.as_str())];
        if let Some(artifact) = &request.artifact_uri {
            params.push(("artifacturi", artifact.as_str()));
        }
        // one searchtypes parameter per type
        for search_type in &request.search_types {
            params.push(("searchtypes", search_type.as_str()));
        }
        self.endpoint("search", &params)
    }

    /// Create goes to `/artifact/new`; edit carries the artifact, version and
    /// object in the query string since the body holds the triples.
    pub fn submit_url(&self, target: &SubmitTarget) -> Result<Url, Error> {
        match target {
            SubmitTarget::Create => self.endpoint("artifact/new", &[]),
            SubmitTarget::Edit {
                artifact_iri,
                version_iri,
                object_uri,
            } => {
                let mut params = vec![
                    ("artifacturi", artifact_iri.as_str()),
                    ("isforce", "true"),
                ];
                if let Some(version) = version_iri {
                    params.push(("versionuri", version.as_str()));
                }
                params.push(("objectUri", object_uri.as_str()));
                self.endpoint("artifact/edit", &params)
            }
        }
    }

    async fn send(&self, request: RequestBuilder, url: &Url) -> Result<Databank, Error> {
        let response = request
            .header(header::ACCEPT, json::MEDIA_TYPE)
            .send()
            .await
            .map_err(|e| self.transport_error(url, e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| self.transport_error(url, e))?;

        if !status.is_success() {
            warn!("{} returned {}", url, status);
            return Err(Error::Transport(TransportError::Status {
                url: url.to_string(),
                status: status.as_u16(),
                body,
            }));
        }

        let bank = json::parse(&body)?;
        debug!("{} returned {} triples", url, bank.len());
        Ok(bank)
    }

    fn transport_error(&self, url: &Url, err: reqwest::Error) -> Error {
        if err.is_timeout() {
            Error::Transport(TransportError::Timeout {
                url: url.to_string(),
                timeout_secs: self.timeout_secs,
            })
        } else {
            Error::Transport(TransportError::RequestFailed {
                url: url.to_string(),
                source: err.to_string(),
            })
        }
    }
}

#[async_trait::async_trait]
impl PoddService for HttpService {
    async fn get_metadata(&self, object_type_uri: &str) -> Result<Databank, Error> {
        let url = self.metadata_url(object_type_uri)?;
        debug!("GET {}", url);
        self.send(self.client.get(url.clone()), &url).await
    }

    async fn get_artifact(&self, artifact_iri: &str) -> Result<Databank, Error> {
        let url = self.artifact_url(artifact_iri)?;
        debug!("GET {}", url);
        self.send(self.client.get(url.clone()), &url).await
    }

    async fn search(&self, request: &SearchRequest) -> Result<Databank, Error> {
        let url = self.search_url(request)?;
        debug!("GET {}", url);
        self.send(self.client.get(url.clone()), &url).await
    }

    async fn submit(&self, target: &SubmitTarget, body: String) -> Result<Databank, Error> {
        let url = self.submit_url(target)?;
        info!("POST {} ({} bytes)", url, body.len());
        let request = self
            .client
            .post(url.clone())
            .header(header::CONTENT_TYPE, json::MEDIA_TYPE)
            .body(body);
        self.send(request, &url).await
    }
}
