use std::fmt;

/// Base URL of the Boxmate member API.
pub const DEFAULT_API_URL: &str = "https://api.boxmateapp.co.uk";

/// Member token handed out by the authenticate endpoint.
///
/// The value is kept out of `Debug` output so it never lands in logs.
#[derive(Clone, PartialEq, Eq)]
pub struct SessionToken(String);

impl SessionToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SessionToken(***)")
    }
}

/// Member login used to obtain a [`SessionToken`].
#[derive(Clone)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"***")
            .finish()
    }
}

/// Connection settings for the leaderboard API.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub base_url: String,
    pub token: SessionToken,
}

impl ApiConfig {
    pub fn new(base_url: impl Into<String>, token: SessionToken) -> Self {
        Self {
            base_url: base_url.into(),
            token,
        }
    }

    /// Joins `path` onto the base URL without doubling slashes.
    pub fn endpoint(&self, path: &str) -> String {
        join_url(&self.base_url, path)
    }
}

pub(crate) fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_is_redacted_in_debug() {
        let config = ApiConfig::new(DEFAULT_API_URL, SessionToken::new("secret"));
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("secret"));
    }

    #[test]
    fn endpoint_joins_cleanly() {
        let config = ApiConfig::new("http://localhost:8080/", SessionToken::new("t"));
        assert_eq!(
            config.endpoint("/leaderboard/Exercise/49"),
            "http://localhost:8080/leaderboard/Exercise/49"
        );
    }
}
