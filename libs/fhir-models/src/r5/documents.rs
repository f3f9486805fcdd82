//! Document resources: Composition, DocumentReference.

use ambra_primitives::{Canonical, Code, DateTime, Id, Instant, Uri};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::choice;
use crate::choice::ChoiceSlot;
use crate::common::{
    Annotation, CodeableConcept, Coding, Extension, Identifier, Meta, Period, Reference,
};

use super::resource::Resource;
use super::types::{Attachment, CodeableReference, Narrative};

/// R5 widened this set well beyond the original four codes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CompositionStatus {
    Registered,
    Partial,
    Preliminary,
    Final,
    Amended,
    Corrected,
    Appended,
    Cancelled,
    EnteredInError,
    Deprecated,
    Unknown,
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

    /// A full concept from R5; a fixed code before.
    pub mode: CodeableConcept,

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
    pub period: Option<Period>,

    /// R5 merged the old `code` concepts and `detail` references here.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<Vec<CodeableReference>>,

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
    pub author: Option<Vec<Reference>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub focus: Option<Reference>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<Narrative>,

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

    /// New in R5.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<Uri>,

    /// An array from R5.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identifier: Option<Vec<Identifier>>,

    /// New in R5.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    pub status: CompositionStatus,

    /// Kind of composition, e.g. a LOINC document type.
    #[serde(rename = "type")]
    pub r#type: CodeableConcept,

    /// `class` before R4.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<Vec<CodeableConcept>>,

    /// An array from R5.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<Vec<Reference>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub encounter: Option<Reference>,

    pub date: DateTime,

    pub author: Vec<Reference>,

    /// A machine-friendly name. New in R5.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    pub title: String,

    /// New in R5. `confidentiality` went the other way and was dropped.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<Vec<Annotation>>,

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

    /// A full concept from R5; a fixed code before.
    pub code: CodeableConcept,

    pub target: Reference,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

choice! {
    /// `DocumentReference.content.profile.value[x]`.
    pub enum DocumentReferenceProfileValue: "value" {
        Coding(Coding),
        Uri(Uri),
        Canonical(Canonical),
    }
}

/// A format or profile the content conforms to. R5 replaced the single
/// `format` Coding with this list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentReferenceContentProfile {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub extension: Option<Vec<Extension>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub modifier_extension: Option<Vec<Extension>>,

    #[serde(flatten)]
    pub value: ChoiceSlot<DocumentReferenceProfileValue>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// The document and the profiles it declares.
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
    pub profile: Option<Vec<DocumentReferenceContentProfile>>,

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

    /// R5 folded the R4 `masterIdentifier` into this list.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identifier: Option<Vec<Identifier>>,

    /// New in R5.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    pub status: DocumentReferenceStatus,

    /// Composition statuses; R5 widened the set to match.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub doc_status: Option<Code>,

    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub r#type: Option<CodeableConcept>,

    /// `class` before R4.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<Vec<CodeableConcept>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<Reference>,

    /// R5 pulled the old context backbone apart; the encounter references
    /// now sit here directly.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<Vec<Reference>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub event: Option<Vec<CodeableReference>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub body_site: Option<Vec<CodeableReference>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub facility_type: Option<CodeableConcept>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub practice_setting: Option<CodeableConcept>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub period: Option<Period>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<Instant>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<Vec<Reference>>,

    /// Attesters replaced the single `authenticator` in R5.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attester: Option<Vec<CompositionAttester>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub custodian: Option<Reference>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub relates_to: Option<Vec<DocumentReferenceRelatesTo>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub security_label: Option<Vec<CodeableConcept>>,

    pub content: Vec<DocumentReferenceContent>,

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
    fn document_reference_requires_content() {
        let missing = json!({"status": "current"});
        assert!(serde_json::from_value::<DocumentReference>(missing).is_err());

        let reference: DocumentReference = serde_json::from_value(json!({
            "status": "current",
            "content": [{"attachment": {"contentType": "application/pdf", "url": "http://x/doc"}}]
        }))
        .unwrap();
        assert_eq!(reference.content.len(), 1);
    }

    #[test]
    fn content_profiles_replace_the_format_coding() {
        let reference: DocumentReference = serde_json::from_value(json!({
            "status": "current",
            "context": [{"reference": "Encounter/e1"}],
            "content": [{
                "attachment": {"url": "http://x/doc"},
                "profile": [{"valueCoding": {"system": "urn:oid:1.3.6.1.4.1.19376.1.2.3", "code": "urn:ihe:pcc:xds-ms:2007"}}]
            }]
        }))
        .unwrap();
        assert!(matches!(
            reference.content[0].profile.as_ref().unwrap()[0].value.get(),
            Some(DocumentReferenceProfileValue::Coding(_))
        ));
        assert_eq!(reference.context.as_ref().unwrap().len(), 1);
    }

    #[test]
    fn attester_mode_is_a_concept() {
        let composition: Composition = serde_json::from_value(json!({
            "status": "final",
            "type": {"text": "Discharge summary"},
            "date": "2024-01-10T08:00:00Z",
            "author": [{"reference": "Practitioner/pr1"}],
            "title": "Discharge summary",
            "attester": [{"mode": {"coding": [{"code": "legal"}]}}]
        }))
        .unwrap();
        let mode = &composition.attester.as_ref().unwrap()[0].mode;
        assert_eq!(mode.coding.as_ref().unwrap()[0].code.as_deref(), Some("legal"));
    }
}
