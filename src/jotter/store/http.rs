use super::Transport;
use crate::error::{JotterError, Result};
use crate::model::RecordKind;
use reqwest::blocking::Client;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

/// Production transport: the content API over HTTP.
///
/// Collections live at `<base>/api/<kind>` and single records at
/// `<base>/api/<kind>/<id>`, wrapped in the conventional envelopes
/// (`{"tags": [...]}`, `{"page": {...}}`). Any connection error, timeout,
/// or non-2xx status is reported as the one handled fetch-failure kind.
pub struct HttpTransport {
    base: Url,
    client: Client,
}

impl HttpTransport {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let base = Url::parse(base_url)
            .map_err(|e| JotterError::Config(format!("invalid api url '{}': {}", base_url, e)))?;
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| JotterError::Config(format!("http client: {}", e)))?;
        Ok(Self { base, client })
    }

    fn url_for(&self, kind: RecordKind, id: Option<&str>) -> Result<Url> {
        let mut url = self.base.clone();
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| JotterError::Config(format!("api url '{}' cannot be a base", self.base)))?;
            segments.pop_if_empty().push("api").push(kind.endpoint());
            if let Some(id) = id {
                segments.push(id);
            }
        }
        Ok(url)
    }

    fn get_json(&self, url: Url) -> Result<Value> {
        debug!(%url, "GET");
        let response = self
            .client
            .get(url.clone())
            .send()
            .map_err(|e| fetch_error(&url, &e.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            warn!(%url, status = status.as_u16(), "fetch failed");
            return Err(fetch_error(
                &url,
                &format!("http status {}", status.as_u16()),
            ));
        }
        let body = response
            .text()
            .map_err(|e| fetch_error(&url, &e.to_string()))?;
        Ok(serde_json::from_str(&body)?)
    }
}

fn fetch_error(url: &Url, reason: &str) -> JotterError {
    JotterError::Fetch {
        url: url.to_string(),
        reason: reason.to_string(),
    }
}

impl Transport for HttpTransport {
    fn fetch_all(&self, kind: RecordKind) -> Result<Vec<Value>> {
        let url = self.url_for(kind, None)?;
        let body = self.get_json(url)?;
        body.get(kind.endpoint())
            .and_then(Value::as_array)
            .cloned()
            .ok_or_else(|| JotterError::Envelope {
                kind,
                key: kind.endpoint().to_string(),
            })
    }

    fn fetch_one(&self, kind: RecordKind, id: &str) -> Result<Value> {
        let url = self.url_for(kind, Some(id))?;
        let body = self.get_json(url)?;
        body.get(kind.singular())
            .filter(|v| !v.is_null())
            .cloned()
            .ok_or_else(|| JotterError::Envelope {
                kind,
                key: kind.singular().to_string(),
            })
    }
}
