//! Mapping of resolver outcomes to HTTP responses.
//!
//! # Mapping
//! ```text
//! Ok(url)                  → 302 Found, Location: url
//! Err(NotFound)            → 404 Not Found
//! Err(Upstream(cause))     → 500 Internal Server Error, body: cause
//! ```
//!
//! A URL that cannot be carried in a `Location` header (e.g. a control
//! character decoded from the path) can never name a stored artifact, so it
//! is reported as 404.

use axum::{
    body::Body,
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};

use crate::resolver::ResolveError;

/// Body sent with 404 responses.
pub const NOT_FOUND_BODY: &str = "404 page not found";

/// Adapter-neutral response produced from a resolver outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedirectReply {
    pub status: StatusCode,
    pub location: Option<HeaderValue>,
    pub body: String,
}

impl RedirectReply {
    pub fn found(location: HeaderValue) -> Self {
        Self {
            status: StatusCode::FOUND,
            location: Some(location),
            body: String::new(),
        }
    }

    pub fn not_found() -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            location: None,
            body: NOT_FOUND_BODY.to_string(),
        }
    }

    pub fn internal_error(message: String) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            location: None,
            body: message,
        }
    }

    /// Metric/log label for the outcome.
    pub fn outcome(&self) -> &'static str {
        match self.status {
            StatusCode::FOUND => "found",
            StatusCode::NOT_FOUND => "not_found",
            _ => "error",
        }
    }
}

impl From<Result<String, ResolveError>> for RedirectReply {
    fn from(result: Result<String, ResolveError>) -> Self {
        match result {
            Ok(url) => match HeaderValue::try_from(url) {
                Ok(location) => Self::found(location),
                Err(_) => {
                    tracing::warn!("Resolved URL is not a valid Location header");
                    Self::not_found()
                }
            },
            Err(ResolveError::NotFound) => Self::not_found(),
            Err(e @ ResolveError::Upstream(_)) => Self::internal_error(e.to_string()),
        }
    }
}

impl IntoResponse for RedirectReply {
    fn into_response(self) -> Response {
        let mut response = Response::new(Body::from(self.body));
        *response.status_mut() = self.status;
        if let Some(location) = self.location {
            response.headers_mut().insert(header::LOCATION, location);
        } else {
            response.headers_mut().insert(
                header::CONTENT_TYPE,
                HeaderValue::from_static("text/plain; charset=utf-8"),
            );
        }
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::release::ReleaseError;

    #[test]
    fn found_sets_location() {
        let reply = RedirectReply::from(Ok::<_, ResolveError>("https://storage.offen.dev/deb/offen_latest_amd64.deb".to_string()));
        assert_eq!(reply.status, StatusCode::FOUND);
        assert_eq!(reply.outcome(), "found");

        let response = reply.into_response();
        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(
            response.headers()[header::LOCATION],
            "https://storage.offen.dev/deb/offen_latest_amd64.deb"
        );
    }

    #[test]
    fn not_found_and_error() {
        let reply = RedirectReply::from(Err::<String, _>(ResolveError::NotFound));
        assert_eq!(reply.status, StatusCode::NOT_FOUND);
        assert_eq!(reply.body, NOT_FOUND_BODY);

        let reply = RedirectReply::from(Err::<String, _>(ResolveError::Upstream(ReleaseError::InvalidRepo(
            "offen".into(),
        ))));
        assert_eq!(reply.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(reply.outcome(), "error");
        assert_eq!(
            reply.body,
            "error getting latest release: repository `offen` is not of the form owner/name"
        );
    }

    #[test]
    fn unrepresentable_location_is_not_found() {
        let reply = RedirectReply::from(Ok::<_, ResolveError>("https://storage.offen.dev/binaries/offen-a\nb.tar.gz".to_string()));
        assert_eq!(reply.status, StatusCode::NOT_FOUND);
        assert!(reply.location.is_none());
    }
}
