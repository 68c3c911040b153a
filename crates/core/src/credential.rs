use base64::{engine::general_purpose, Engine as _};

/// A fixed username/password pair supplied at startup.
///
/// The pair is injected by the configuration layer and never changes for the
/// lifetime of the process. Empty fields are accepted - they are a
/// misconfigured deployment rather than an error, and the config layer warns
/// when it sees them.
#[derive(Debug, Clone)]
pub struct Credential {
    pub username: String,
    pub password: String,
}

impl Credential {
    pub fn new(username: String, password: String) -> Self {
        Self { username, password }
    }

    /// Derives the exact `Authorization` header value a viewer must present.
    pub fn expected_token(&self) -> ExpectedToken {
        let encoded =
            general_purpose::STANDARD.encode(format!("{}:{}", self.username, self.password));
        ExpectedToken(format!("Basic {}", encoded))
    }
}

/// The pre-computed `Basic <base64>` header value, stable for the process
/// lifetime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpectedToken(String);

impl ExpectedToken {
    /// Exact string comparison against a presented header value.
    ///
    /// Scheme case and whitespace must match byte for byte.
    pub fn matches(&self, presented: &str) -> bool {
        self.0 == presented
    }
}
