//! API gateway event and response envelopes.

use std::collections::{BTreeMap, HashMap};

use axum::http::header;
use serde::{Deserialize, Serialize};

use crate::http::response::RedirectReply;
use crate::resolver::RedirectRequest;

/// The subset of an API gateway proxy event the redirector reads.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GatewayEvent {
    #[serde(default)]
    pub path_parameters: Option<HashMap<String, String>>,
}

impl GatewayEvent {
    #[cfg(test)]
    pub(crate) fn from_params<'a, I>(params: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        Self {
            path_parameters: Some(
                params
                    .into_iter()
                    .map(|(k, v)| (k.to_string(), v.to_string()))
                    .collect(),
            ),
        }
    }

    fn param(&self, name: &str) -> Option<String> {
        self.path_parameters
            .as_ref()?
            .get(name)
            .filter(|v| !v.is_empty())
            .cloned()
    }

    /// Path segments of the event; empty values count as absent.
    pub fn redirect_request(&self) -> RedirectRequest {
        RedirectRequest::new(
            self.param("segment1").or_else(|| self.param("channel")),
            self.param("segment2"),
        )
    }
}

/// Structured response handed back to the gateway.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GatewayResponse {
    pub status_code: u16,
    #[serde(default)]
    pub headers: BTreeMap<String, String>,
    #[serde(default)]
    pub body: String,
}

impl From<RedirectReply> for GatewayResponse {
    fn from(reply: RedirectReply) -> Self {
        let mut headers = BTreeMap::new();
        match reply.location.as_ref().and_then(|l| l.to_str().ok()) {
            Some(location) => {
                headers.insert("Location".to_string(), location.to_string());
            }
            None => {
                headers.insert(
                    header::CONTENT_TYPE.as_str().to_string(),
                    "text/plain; charset=utf-8".to_string(),
                );
            }
        }
        Self {
            status_code: reply.status.as_u16(),
            headers,
            body: reply.body,
        }
    }
}
