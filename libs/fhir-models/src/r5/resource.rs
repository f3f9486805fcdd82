//! The R5 resource registry and codec entry points.

use ambra_primitives::{Code, Id, Uri};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::common::{CodeableConcept, Extension, Meta};
use crate::error::Result;
use crate::json::{self, TypedResource};

use super::administrative::{Device, Location, Organization, Patient, Practitioner};
use super::bundle::Bundle;
use super::clinical::{AllergyIntolerance, CarePlan, Condition, Immunization, Procedure};
use super::diagnostics::{DiagnosticReport, Observation, Specimen};
use super::documents::{Composition, DocumentReference};
use super::medications::{Medication, MedicationRequest};
use super::types::Narrative;
use super::workflow::{
    Communication, Consent, Encounter, QuestionnaireResponse, ResearchSubject,
};

/// One hit of an operation's processing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationOutcomeIssue {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub extension: Option<Vec<Extension>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub modifier_extension: Option<Vec<Extension>>,

    /// fatal | error | warning | information.
    pub severity: Code,

    /// Error type from the issue-type value set.
    pub code: Code,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<CodeableConcept>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub diagnostics: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub expression: Option<Vec<String>>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Outcome of an attempted system operation, carried by
/// `Bundle.entry.response.outcome` among other places.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationOutcome {
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
    pub extension: Option<Vec<Extension>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub modifier_extension: Option<Vec<Extension>>,

    pub issue: Vec<OperationOutcomeIssue>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Any R5 resource this catalog knows, discriminated by `resourceType`.
///
/// The registry is closed: a `resourceType` outside this list is a decode
/// error, surfaced as [`crate::Error::UnknownResourceType`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "resourceType")]
pub enum Resource {
    AllergyIntolerance(AllergyIntolerance),
    Bundle(Bundle),
    CarePlan(CarePlan),
    Communication(Communication),
    Composition(Composition),
    Condition(Condition),
    Consent(Consent),
    Device(Device),
    DiagnosticReport(DiagnosticReport),
    DocumentReference(DocumentReference),
    Encounter(Encounter),
    Immunization(Immunization),
    Location(Location),
    Medication(Medication),
    MedicationRequest(MedicationRequest),
    Observation(Observation),
    OperationOutcome(OperationOutcome),
    Organization(Organization),
    Patient(Patient),
    Practitioner(Practitioner),
    Procedure(Procedure),
    QuestionnaireResponse(QuestionnaireResponse),
    ResearchSubject(ResearchSubject),
    Specimen(Specimen),
}

impl Resource {
    /// The wire discriminator of this resource.
    pub fn resource_type(&self) -> &'static str {
        match self {
            Resource::AllergyIntolerance(_) => "AllergyIntolerance",
            Resource::Bundle(_) => "Bundle",
            Resource::CarePlan(_) => "CarePlan",
            Resource::Communication(_) => "Communication",
            Resource::Composition(_) => "Composition",
            Resource::Condition(_) => "Condition",
            Resource::Consent(_) => "Consent",
            Resource::Device(_) => "Device",
            Resource::DiagnosticReport(_) => "DiagnosticReport",
            Resource::DocumentReference(_) => "DocumentReference",
            Resource::Encounter(_) => "Encounter",
            Resource::Immunization(_) => "Immunization",
            Resource::Location(_) => "Location",
            Resource::Medication(_) => "Medication",
            Resource::MedicationRequest(_) => "MedicationRequest",
            Resource::Observation(_) => "Observation",
            Resource::OperationOutcome(_) => "OperationOutcome",
            Resource::Organization(_) => "Organization",
            Resource::Patient(_) => "Patient",
            Resource::Practitioner(_) => "Practitioner",
            Resource::Procedure(_) => "Procedure",
            Resource::QuestionnaireResponse(_) => "QuestionnaireResponse",
            Resource::ResearchSubject(_) => "ResearchSubject",
            Resource::Specimen(_) => "Specimen",
        }
    }
}

macro_rules! typed_resources {
    ($($name:ident),+ $(,)?) => {
        $(
            impl TypedResource for $name {
                const TYPE: &'static str = stringify!($name);
            }

            impl From<$name> for Resource {
                fn from(value: $name) -> Self {
                    Resource::$name(value)
                }
            }
        )+
    };
}

typed_resources!(
    AllergyIntolerance,
    Bundle,
    CarePlan,
    Communication,
    Composition,
    Condition,
    Consent,
    Device,
    DiagnosticReport,
    DocumentReference,
    Encounter,
    Immunization,
    Location,
    Medication,
    MedicationRequest,
    Observation,
    OperationOutcome,
    Organization,
    Patient,
    Practitioner,
    Procedure,
    QuestionnaireResponse,
    ResearchSubject,
    Specimen,
);

/// Decode any R5 resource, dispatching on `resourceType`.
pub fn decode(bytes: &[u8]) -> Result<Resource> {
    json::decode(bytes)
}

/// Decode any R5 resource from a parsed JSON value.
pub fn decode_value(value: Value) -> Result<Resource> {
    json::decode_value(value)
}

/// Decode a specific R5 resource type, checking `resourceType`.
pub fn decode_as<T: TypedResource>(bytes: &[u8]) -> Result<T> {
    json::decode_as(bytes)
}

/// Encode any R5 resource; the variant emits its own `resourceType`.
pub fn encode(resource: &Resource) -> Result<Vec<u8>> {
    json::encode(resource)
}

/// Encode any R5 resource to a JSON value.
pub fn encode_value(resource: &Resource) -> Result<Value> {
    json::encode_value(resource)
}

/// Encode a concrete R5 resource, prepending its `resourceType`.
pub fn encode_as<T: TypedResource>(resource: &T) -> Result<Vec<u8>> {
    json::encode_as(resource)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;
    use serde_json::json;

    #[test]
    fn decode_dispatches_on_resource_type() {
        let bytes = br#"{"resourceType": "Patient", "id": "p1"}"#;
        let resource = decode(bytes).unwrap();
        assert_eq!(resource.resource_type(), "Patient");
    }

    #[test]
    fn unknown_resource_type_is_classified() {
        let err = decode(br#"{"resourceType": "Slot", "id": "s1"}"#).unwrap_err();
        match err {
            Error::UnknownResourceType { resource_type, .. } => {
                assert_eq!(resource_type, "Slot");
            }
            other => panic!("expected UnknownResourceType, got {other:?}"),
        }
    }

    #[test]
    fn typed_decode_checks_the_discriminator() {
        let bytes = br#"{"resourceType": "Patient", "id": "p1"}"#;
        let patient: Patient = decode_as(bytes).unwrap();
        assert_eq!(patient.id.as_deref(), Some("p1"));

        let err = decode_as::<Observation>(bytes).unwrap_err();
        assert!(matches!(err, Error::Schema { .. }));
    }

    #[test]
    fn encode_emits_resource_type_first() {
        let patient = Patient {
            id: Some("p1".into()),
            ..Default::default()
        };
        let bytes = encode(&Resource::Patient(patient)).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert!(text.starts_with(r#"{"resourceType":"Patient""#));
    }
}
