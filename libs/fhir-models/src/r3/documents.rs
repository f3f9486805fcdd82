//! Document resources: Composition, DocumentReference.

use ambra_primitives::{Code, DateTime, Id, Instant, Uri};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::choice;
use crate::choice::ChoiceSlot;
use crate::common::{
    CodeableConcept, Coding, Extension, Identifier, Meta, Period, Reference,
};

use super::resource::Resource;
use super::types::{Attachment, Narrative};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CompositionStatus {
    Preliminary,
    Final,
    Amended,
    EnteredInError,
    #[serde(untagged)]
    Unrecognized(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompositionAttestationMode {
    Personal,
    Professional,
    Legal,
    Official,
    #[serde(untagged)]
    Unrecognized(String),
}

/// An attestation of the composition's accuracy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompositionAttester {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub extension: Option<Vec<Extension>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub modifier_extension: Option<Vec<Extension>>,

    /// An array of modes; R4 narrowed this to a single one.
    pub mode: Vec<CompositionAttestationMode>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<DateTime>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub party: Option<Reference>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

choice! {
    /// `Composition.relatesTo.target[x]`.
    pub enum CompositionRelatesToTarget: "target" {
        Identifier(Identifier),
        Reference(Reference),
    }
}

/// Another composition or document this one relates to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompositionRelatesTo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub extension: Option<Vec<Extension>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub modifier_extension: Option<Vec<Extension>>,

    /// replaces | transforms | signs | appends.
    pub code: Code,

    #[serde(flatten)]
    pub target: ChoiceSlot<CompositionRelatesToTarget>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A clinical service the composition is about.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompositionEvent {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub extension: Option<Vec<Extension>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub modifier_extension: Option<Vec<Extension>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<Vec<CodeableConcept>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub period: Option<Period>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<Vec<Reference>>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One section of the document, possibly nested.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompositionSection {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub extension: Option<Vec<Extension>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub modifier_extension: Option<Vec<Extension>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<CodeableConcept>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<Narrative>,

    /// working | snapshot | changes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<Code>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub ordered_by: Option<CodeableConcept>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub entry: Option<Vec<Reference>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub empty_reason: Option<CodeableConcept>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub section: Option<Vec<CompositionSection>>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A set of healthcare-related information assembled into a single coherent
/// statement of meaning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Composition {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Id>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<Meta>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub implicit_rules: Option<Uri>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<Code>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<Narrative>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub contained: Option<Vec<Resource>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub extension: Option<Vec<Extension>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub modifier_extension: Option<Vec<Extension>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub identifier: Option<Identifier>,

    pub status: CompositionStatus,

    /// Kind of composition, e.g. a LOINC document type.
    #[serde(rename = "type")]
    pub r#type: CodeableConcept,

    /// Renamed to `category` (an array) in R4.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class: Option<CodeableConcept>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<Reference>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub encounter: Option<Reference>,

    pub date: DateTime,

    pub author: Vec<Reference>,

    pub title: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidentiality: Option<Code>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub attester: Option<Vec<CompositionAttester>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub custodian: Option<Reference>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub relates_to: Option<Vec<CompositionRelatesTo>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub event: Option<Vec<CompositionEvent>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub section: Option<Vec<CompositionSection>>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DocumentReferenceStatus {
    Current,
    Superseded,
    EnteredInError,
    #[serde(untagged)]
    Unrecognized(String),
}

/// Another document this one relates to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentReferenceRelatesTo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub extension: Option<Vec<Extension>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub modifier_extension: Option<Vec<Extension>>,

    /// replaces | transforms | signs | appends.
    pub code: Code,

    pub target: Reference,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// The document and format referenced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentReferenceContent {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub extension: Option<Vec<Extension>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub modifier_extension: Option<Vec<Extension>>,

    pub attachment: Attachment,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<Coding>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Clinical context in which the document was prepared.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentReferenceContext {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub extension: Option<Vec<Extension>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub modifier_extension: Option<Vec<Extension>>,

    /// A single reference until R4 made it an array.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub encounter: Option<Reference>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub event: Option<Vec<CodeableConcept>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub period: Option<Period>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub facility_type: Option<CodeableConcept>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub practice_setting: Option<CodeableConcept>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_patient_info: Option<Reference>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub related: Option<Vec<DocumentReferenceContextRelated>>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Related identifiers or resources; R4 flattened this backbone into
/// plain references.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentReferenceContextRelated {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub extension: Option<Vec<Extension>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub modifier_extension: Option<Vec<Extension>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub identifier: Option<Identifier>,

    #[serde(rename = "ref", skip_serializing_if = "Option::is_none")]
    pub r#ref: Option<Reference>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A reference to a document of any kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentReference {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Id>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<Meta>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub implicit_rules: Option<Uri>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<Code>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<Narrative>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub contained: Option<Vec<Resource>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub extension: Option<Vec<Extension>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub modifier_extension: Option<Vec<Extension>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub master_identifier: Option<Identifier>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub identifier: Option<Vec<Identifier>>,

    pub status: DocumentReferenceStatus,

    /// preliminary | final | amended | entered-in-error. R4 turned this
    /// into a plain code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub doc_status: Option<CodeableConcept>,

    #[serde(rename = "type")]
    pub r#type: CodeableConcept,

    /// Renamed to `category` (an array) in R4.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class: Option<CodeableConcept>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<Reference>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub created: Option<DateTime>,

    /// When the reference was registered; R4 collapsed `created` and
    /// `indexed` into `date`.
    pub indexed: Instant,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<Vec<Reference>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub authenticator: Option<Reference>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub custodian: Option<Reference>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub relates_to: Option<Vec<DocumentReferenceRelatesTo>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub security_label: Option<Vec<CodeableConcept>>,

    pub content: Vec<DocumentReferenceContent>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<DocumentReferenceContext>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn composition_sections_nest() {
        let input = json!({
            "status": "final",
            "type": {"coding": [{"system": "http://loinc.org", "code": "11488-4"}]},
            "date": "2020-02-05T09:30:00Z",
            "author": [{"reference": "Practitioner/pr1"}],
            "title": "Consultation note",
            "attester": [{"mode": ["legal"], "party": {"reference": "Practitioner/pr1"}}],
            "section": [{
                "title": "Assessment",
                "section": [{"title": "Plan"}]
            }]
        });
        let composition: Composition = serde_json::from_value(input.clone()).unwrap();
        let outer = &composition.section.as_ref().unwrap()[0];
        assert_eq!(outer.section.as_ref().unwrap()[0].title.as_deref(), Some("Plan"));
        assert_eq!(serde_json::to_value(&composition).unwrap(), input);
    }

    #[test]
    fn document_reference_requires_indexed_and_content() {
        let missing = json!({"status": "current", "type": {"text": "note"}});
        assert!(serde_json::from_value::<DocumentReference>(missing).is_err());

        let reference: DocumentReference = serde_json::from_value(json!({
            "status": "current",
            "type": {"coding": [{"system": "http://loinc.org", "code": "34133-9"}]},
            "indexed": "2019-07-01T10:00:00Z",
            "content": [{"attachment": {"contentType": "application/pdf", "url": "http://x/doc"}}]
        }))
        .unwrap();
        assert_eq!(reference.content.len(), 1);
    }
}
