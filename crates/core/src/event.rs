use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Header groups keyed by lower-cased header name, each holding the ordered
/// value records the edge delivered for that name.
pub type HeaderGroups = BTreeMap<String, Vec<HeaderEntry>>;

/// A single header record inside a viewer request or response.
///
/// Both fields are optional on the wire. Events have been seen with records
/// missing the `value` field and those must deserialize cleanly - the gate
/// treats them as "not authenticated" instead of faulting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeaderEntry {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub value: Option<String>,
    #[serde(flatten, skip_serializing_if = "Map::is_empty", default)]
    pub rest: Map<String, Value>,
}

impl HeaderEntry {
    pub fn new(key: &str, value: &str) -> Self {
        Self { key: Some(key.to_string()), value: Some(value.to_string()), rest: Map::new() }
    }
}

/// The inbound request record as seen at the edge.
///
/// Only the header mapping is consulted; every other field is carried through
/// opaquely so a `Forward` decision hands the record back exactly as it
/// arrived.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewerRequest {
    #[serde(default)]
    pub headers: HeaderGroups,
    #[serde(flatten)]
    pub rest: Map<String, Value>,
}

impl ViewerRequest {
    /// First `authorization` value, matched case-insensitively on the header
    /// name. `None` covers a missing header, an empty group, and a record
    /// with no `value` field.
    pub fn authorization_value(&self) -> Option<&str> {
        self.headers
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case("authorization"))
            .and_then(|(_, entries)| entries.first())
            .and_then(|entry| entry.value.as_deref())
    }
}

/// The synthesized 401 challenge returned on every denial.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DenyResponse {
    pub status: String,
    #[serde(rename = "statusDescription")]
    pub status_description: String,
    pub headers: HeaderGroups,
    pub body: String,
}

/// Outcome of evaluating one viewer request.
///
/// Serializes untagged: the host boundary receives either the unmodified
/// request record or the challenge response record, nothing else.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Decision {
    Forward(ViewerRequest),
    Deny(DenyResponse),
}

/// The invocation envelope handed over by the hosting edge platform.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ViewerEvent {
    #[serde(rename = "Records", default)]
    pub records: Vec<ViewerEventRecord>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ViewerEventRecord {
    pub cf: CfRecord,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CfRecord {
    pub request: ViewerRequest,
}
