/// Failure taxonomy for the view layer.
///
/// Every variant is caught inside the view controller, logged, and degraded
/// into "no content" (or the chat apology bubble). None of them escape event
/// handling.
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ViewError {
    /// The request never produced a usable response: transport error or a
    /// non-2xx status.
    #[error("network failure on {endpoint}: {reason}")]
    NetworkFailure { endpoint: String, reason: String },

    /// A response body or embedded chart payload was not the JSON we expect.
    #[error("parse failure in {what}: {reason}")]
    ParseFailure { what: String, reason: String },

    /// The page has no region for the element we were asked to update.
    #[error("missing element: {0}")]
    MissingElement(String),
}

impl ViewError {
    pub fn network(endpoint: impl Into<String>, reason: impl ToString) -> Self {
        Self::NetworkFailure {
            endpoint: endpoint.into(),
            reason: reason.to_string(),
        }
    }

    pub fn parse(what: impl Into<String>, reason: impl ToString) -> Self {
        Self::ParseFailure {
            what: what.into(),
            reason: reason.to_string(),
        }
    }

    pub fn missing(element: impl Into<String>) -> Self {
        Self::MissingElement(element.into())
    }

    /// Short category label for log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::NetworkFailure { .. } => "network",
            Self::ParseFailure { .. } => "parse",
            Self::MissingElement(_) => "missing-element",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_context() {
        let err = ViewError::network("/api/chat", "connection refused");
        assert_eq!(
            err.to_string(),
            "network failure on /api/chat: connection refused"
        );
        assert_eq!(err.kind(), "network");

        let err = ViewError::missing("chart9-output");
        assert_eq!(err.to_string(), "missing element: chart9-output");
        assert_eq!(err.kind(), "missing-element");
    }
}
