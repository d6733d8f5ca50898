use thiserror::Error;

/// Shown when a failure carries no message of its own.
pub const FALLBACK_MESSAGE: &str = "Could not fetch weather data. Please try another city.";

/// Failure of a single weather lookup.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// Transport failure or non-success status from the relay.
    #[error("Network response was not ok: {0}")]
    Network(String),

    /// Malformed relay envelope or embedded payload.
    #[error("Could not read weather data: {0}")]
    Parse(String),

    /// Well-formed payload reporting an application-level error.
    #[error("{0}")]
    Upstream(String),
}

impl FetchError {
    /// Text stored in the view state for this failure.
    pub fn user_message(&self) -> String {
        let msg = self.to_string();
        if msg.trim().is_empty() { FALLBACK_MESSAGE.to_string() } else { msg }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            FetchError::Network(_) => "network",
            FetchError::Parse(_) => "parse",
            FetchError::Upstream(_) => "upstream",
        }
    }
}

// The request URL carries the API key, so it is stripped before display.
impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        FetchError::Network(err.without_url().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upstream_message_is_shown_verbatim() {
        let err = FetchError::Upstream("No matching location found.".into());
        assert_eq!(err.user_message(), "No matching location found.");
    }

    #[test]
    fn empty_upstream_message_uses_fallback() {
        let err = FetchError::Upstream("  ".into());
        assert_eq!(err.user_message(), FALLBACK_MESSAGE);
    }

    #[test]
    fn network_and_parse_messages_are_prefixed() {
        let net = FetchError::Network("502 Bad Gateway".into());
        assert!(net.user_message().starts_with("Network response was not ok"));
        assert_eq!(net.kind(), "network");

        let parse = FetchError::Parse("missing field `contents`".into());
        assert!(parse.user_message().contains("missing field `contents`"));
        assert_eq!(parse.kind(), "parse");
    }
}
