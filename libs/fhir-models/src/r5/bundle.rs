//! Bundle: a container for a collection of resources.
//!
//! Bundle is not a DomainResource: it has no narrative, no `contained` and
//! no extensions of its own; entries carry full resources instead.

use ambra_primitives::{Code, Decimal, Id, Instant, UnsignedInt, Uri};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::common::{Identifier, Meta};

use super::resource::Resource;
use super::types::Signature;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BundleType {
    Document,
    Message,
    Transaction,
    TransactionResponse,
    Batch,
    BatchResponse,
    History,
    Searchset,
    Collection,
    #[serde(untagged)]
    Unrecognized(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BundleSearchMode {
    Match,
    Include,
    Outcome,
    #[serde(untagged)]
    Unrecognized(String),
}

/// HTTP verbs allowed in a batch or transaction. `PATCH` joined in R4.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum HttpVerb {
    #[serde(rename = "GET")]
    Get,
    #[serde(rename = "HEAD")]
    Head,
    #[serde(rename = "POST")]
    Post,
    #[serde(rename = "PUT")]
    Put,
    #[serde(rename = "DELETE")]
    Delete,
    #[serde(rename = "PATCH")]
    Patch,
    #[serde(untagged)]
    Unrecognized(String),
}

/// A navigation link, e.g. `self`, `next`, `prev`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BundleLink {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// A registered link relation. A free string until R5 tightened it
    /// to a code.
    pub relation: Code,

    pub url: Uri,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Search metadata for an entry in a searchset.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BundleEntrySearch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<BundleSearchMode>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<Decimal>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Transaction or batch instructions for an entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BundleEntryRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    pub method: HttpVerb,

    pub url: Uri,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub if_none_match: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub if_modified_since: Option<Instant>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub if_match: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub if_none_exist: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Result of processing an entry in a transaction or batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BundleEntryResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// HTTP status line, e.g. `"201 Created"`.
    pub status: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<Uri>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub etag: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<Instant>,

    /// An OperationOutcome with processing hints; absent before R3.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outcome: Option<Box<Resource>>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One resource in the bundle, with its search, request and response
/// envelopes.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BundleEntry {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<Vec<BundleLink>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_url: Option<Uri>,

    /// The resource itself, dispatched on `resourceType`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource: Option<Box<Resource>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<BundleEntrySearch>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub request: Option<BundleEntryRequest>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub response: Option<BundleEntryResponse>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A container for a collection of resources.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bundle {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Id>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<Meta>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub implicit_rules: Option<Uri>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<Code>,

    /// Persistent identifier; absent in R2.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identifier: Option<Identifier>,

    #[serde(rename = "type")]
    pub r#type: BundleType,

    /// When the bundle was assembled; new in R4.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<Instant>,

    /// Total number of matches for a searchset, across pages.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<UnsignedInt>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<Vec<BundleLink>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub entry: Option<Vec<BundleEntry>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub signature: Option<Signature>,

    /// Issues with the bundle as a whole, for `batch-response` and search.
    /// New in R5.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issues: Option<Box<Resource>>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn searchset_entries_dispatch_by_resource_type() {
        let input = json!({
            "type": "searchset",
            "total": 2,
            "entry": [
                {
                    "fullUrl": "http://example.org/Patient/p1",
                    "resource": {"resourceType": "Patient", "id": "p1"},
                    "search": {"mode": "match"}
                },
                {
                    "fullUrl": "http://example.org/Observation/o1",
                    "resource": {
                        "resourceType": "Observation",
                        "id": "o1",
                        "status": "final",
                        "code": {"text": "height"}
                    },
                    "search": {"mode": "include"}
                }
            ]
        });
        let bundle: Bundle = serde_json::from_value(input.clone()).unwrap();
        let entries = bundle.entry.as_ref().unwrap();
        assert!(matches!(entries[0].resource.as_deref(), Some(Resource::Patient(_))));
        assert!(matches!(entries[1].resource.as_deref(), Some(Resource::Observation(_))));
        assert_eq!(serde_json::to_value(&bundle).unwrap(), input);
    }

    #[test]
    fn unknown_resource_type_in_entry_fails() {
        let result = serde_json::from_value::<Bundle>(json!({
            "type": "collection",
            "entry": [{"resource": {"resourceType": "Appointment", "id": "a1"}}]
        }));
        assert!(result.is_err());
    }

    #[test]
    fn transaction_request_verbs() {
        let bundle: Bundle = serde_json::from_value(json!({
            "type": "transaction",
            "entry": [{
                "request": {"method": "POST", "url": "Patient", "ifNoneExist": "identifier=123"}
            }]
        }))
        .unwrap();
        let request = bundle.entry.as_ref().unwrap()[0].request.as_ref().unwrap();
        assert_eq!(request.method, HttpVerb::Post);
    }
}
