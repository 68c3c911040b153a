use crate::credential::{Credential, ExpectedToken};
use crate::event::{Decision, DenyResponse, HeaderEntry, HeaderGroups, ViewerRequest};

/// Challenge sent back with every denial.
pub const CHALLENGE_HEADER_VALUE: &str = "Basic realm=\"Restricted Area\"";

pub const CHALLENGE_CONTENT_TYPE: &str = "text/html; charset=UTF-8";

const UNAUTHORIZED_BODY: &str = r#"<!DOCTYPE html>
<html>
<head>
    <title>Authentication Required</title>
    <meta charset="UTF-8">
</head>
<body style="font-family: Arial, sans-serif; text-align: center; margin-top: 100px;">
    <h1>&#128274; Authentication Required</h1>
    <p>You must authenticate to access this page.</p>
    <p>Please enter a valid username and password.</p>
</body>
</html>
"#;

/// Stateless classifier for inbound viewer requests.
///
/// Holds the two startup constants - the expected `Authorization` value and
/// the canned challenge response - and nothing else, so a single instance can
/// be shared across any number of concurrent evaluations. It never logs and
/// never touches anything outside its input.
pub struct AuthGate {
    expected: ExpectedToken,
    deny: DenyResponse,
}

impl AuthGate {
    pub fn new(credential: Credential) -> Self {
        Self { expected: credential.expected_token(), deny: build_deny_payload() }
    }

    /// Classifies one viewer request.
    ///
    /// A header value exactly equal to the expected token forwards the
    /// request untouched. Everything else - header absent, record without a
    /// `value` field, wrong scheme case, wrong credentials - collapses into
    /// the same undifferentiated denial.
    pub fn evaluate(&self, request: ViewerRequest) -> Decision {
        if self.authorize(request.authorization_value()) {
            Decision::Forward(request)
        } else {
            Decision::Deny(self.deny.clone())
        }
    }

    /// The bare token check, shared with the HTTP guard.
    pub fn authorize(&self, presented: Option<&str>) -> bool {
        presented.map(|value| self.expected.matches(value)).unwrap_or(false)
    }

    /// The canned 401 payload sent on every denial.
    pub fn deny_payload(&self) -> &DenyResponse {
        &self.deny
    }
}

fn build_deny_payload() -> DenyResponse {
    let mut headers = HeaderGroups::new();
    headers.insert(
        "www-authenticate".to_string(),
        vec![HeaderEntry::new("WWW-Authenticate", CHALLENGE_HEADER_VALUE)],
    );
    headers.insert(
        "content-type".to_string(),
        vec![HeaderEntry::new("Content-Type", CHALLENGE_CONTENT_TYPE)],
    );

    DenyResponse {
        status: "401".to_string(),
        status_description: "Unauthorized".to_string(),
        headers,
        body: UNAUTHORIZED_BODY.to_string(),
    }
}
