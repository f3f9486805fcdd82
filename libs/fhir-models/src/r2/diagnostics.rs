//! Diagnostic resources: Observation, DiagnosticReport, Specimen.

use ambra_primitives::{Code, DateTime, Id, Instant, Time, Uri};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::choice;
use crate::choice::ChoiceSlot;
use crate::common::{
    CodeableConcept, Extension, Identifier, Meta, Period, Quantity, Reference, SampledData,
};

use super::resource::Resource;
use super::types::{Attachment, Narrative, Range, Ratio};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ObservationStatus {
    Registered,
    Preliminary,
    Final,
    Amended,
    Cancelled,
    EnteredInError,
    Unknown,
    #[serde(untagged)]
    Unrecognized(String),
}

choice! {
    /// `Observation.effective[x]`.
    pub enum ObservationEffective: "effective" {
        DateTime(DateTime),
        Period(Period),
    }
}

choice! {
    /// `Observation.value[x]`.
    pub enum ObservationValue: "value" {
        Quantity(Quantity),
        CodeableConcept(CodeableConcept),
        String(String),
        Range(Range),
        Ratio(Ratio),
        SampledData(SampledData),
        Attachment(Attachment),
        Time(Time),
        DateTime(DateTime),
        Period(Period),
    }
}

/// Reference range for interpreting the value.
///
/// The qualifying concept is `meaning` here; R3 split it into `type`
/// and `appliesTo`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObservationReferenceRange {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub extension: Option<Vec<Extension>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub modifier_extension: Option<Vec<Extension>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub low: Option<Quantity>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub high: Option<Quantity>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub meaning: Option<CodeableConcept>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<Range>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A related measurement; R4 replaced this backbone with the
/// `hasMember` and `derivedFrom` references.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObservationRelated {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub extension: Option<Vec<Extension>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub modifier_extension: Option<Vec<Extension>>,

    /// has-member | derived-from | sequel-to | replaces | qualified-by
    /// | interfered-by.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub r#type: Option<Code>,

    pub target: Reference,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Component results for multi-part observations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObservationComponent {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub extension: Option<Vec<Extension>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub modifier_extension: Option<Vec<Extension>>,

    pub code: CodeableConcept,

    #[serde(flatten)]
    pub value: ChoiceSlot<ObservationValue>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_absent_reason: Option<CodeableConcept>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference_range: Option<Vec<ObservationReferenceRange>>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Measurements and simple assertions about a patient or specimen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Observation {
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
    pub identifier: Option<Vec<Identifier>>,

    pub status: ObservationStatus,

    /// A single concept until R4 made it an array.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<CodeableConcept>,

    pub code: CodeableConcept,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<Reference>,

    /// Renamed to `context` in R3.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub encounter: Option<Reference>,

    #[serde(flatten)]
    pub effective: ChoiceSlot<ObservationEffective>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub issued: Option<Instant>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub performer: Option<Vec<Reference>>,

    #[serde(flatten)]
    pub value: ChoiceSlot<ObservationValue>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_absent_reason: Option<CodeableConcept>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub interpretation: Option<CodeableConcept>,

    /// Renamed to `comment` in R3.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comments: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub body_site: Option<CodeableConcept>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub method: Option<CodeableConcept>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub specimen: Option<Reference>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub device: Option<Reference>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference_range: Option<Vec<ObservationReferenceRange>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub related: Option<Vec<ObservationRelated>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub component: Option<Vec<ObservationComponent>>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DiagnosticReportStatus {
    Registered,
    Partial,
    Final,
    Corrected,
    Appended,
    Cancelled,
    EnteredInError,
    #[serde(untagged)]
    Unrecognized(String),
}

choice! {
    /// `DiagnosticReport.effective[x]`.
    pub enum DiagnosticReportEffective: "effective" {
        DateTime(DateTime),
        Period(Period),
    }
}

/// Key image taken during the study; renamed to `media` in R4.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagnosticReportImage {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub extension: Option<Vec<Extension>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub modifier_extension: Option<Vec<Extension>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,

    pub link: Reference,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Findings and interpretation of diagnostic tests.
///
/// DSTU2 requires the subject, the effective time, `issued` and a
/// single performer; later releases relaxed all four.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagnosticReport {
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
    pub identifier: Option<Vec<Identifier>>,

    pub status: DiagnosticReportStatus,

    /// A single concept until R4 made it an array.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<CodeableConcept>,

    pub code: CodeableConcept,

    pub subject: Reference,

    /// Renamed to `context` in R3.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub encounter: Option<Reference>,

    #[serde(flatten)]
    pub effective: ChoiceSlot<DiagnosticReportEffective>,

    pub issued: Instant,

    pub performer: Reference,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub request: Option<Vec<Reference>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub specimen: Option<Vec<Reference>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Vec<Reference>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub imaging_study: Option<Vec<Reference>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<Vec<DiagnosticReportImage>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub conclusion: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub coded_diagnosis: Option<Vec<CodeableConcept>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub presented_form: Option<Vec<Attachment>>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SpecimenStatus {
    Available,
    Unavailable,
    Unsatisfactory,
    EnteredInError,
    #[serde(untagged)]
    Unrecognized(String),
}

choice! {
    /// `Specimen.collection.collected[x]`.
    pub enum SpecimenCollected: "collected" {
        DateTime(DateTime),
        Period(Period),
    }
}

choice! {
    /// `Specimen.container.additive[x]`.
    pub enum SpecimenContainerAdditive: "additive" {
        CodeableConcept(CodeableConcept),
        Reference(Reference),
    }
}

/// Details of specimen collection.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpecimenCollection {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub extension: Option<Vec<Extension>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub modifier_extension: Option<Vec<Extension>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub collector: Option<Reference>,

    /// Dropped in R3.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<Vec<String>>,

    #[serde(flatten)]
    pub collected: ChoiceSlot<SpecimenCollected>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<Quantity>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub method: Option<CodeableConcept>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub body_site: Option<CodeableConcept>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Processing performed on the specimen; renamed to `processing` in
/// later releases.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpecimenTreatment {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub extension: Option<Vec<Extension>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub modifier_extension: Option<Vec<Extension>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub procedure: Option<CodeableConcept>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub additive: Option<Vec<Reference>>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Direct container holding the specimen.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpecimenContainer {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub extension: Option<Vec<Extension>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub modifier_extension: Option<Vec<Extension>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub identifier: Option<Vec<Identifier>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub r#type: Option<CodeableConcept>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub capacity: Option<Quantity>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub specimen_quantity: Option<Quantity>,

    #[serde(flatten)]
    pub additive: ChoiceSlot<SpecimenContainerAdditive>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A sample for analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Specimen {
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
    pub identifier: Option<Vec<Identifier>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<SpecimenStatus>,

    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub r#type: Option<CodeableConcept>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<Vec<Reference>>,

    /// Required here; optional from R3.
    pub subject: Reference,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub accession_identifier: Option<Identifier>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub received_time: Option<DateTime>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub collection: Option<SpecimenCollection>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub treatment: Option<Vec<SpecimenTreatment>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub container: Option<Vec<SpecimenContainer>>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn observation_comments_and_encounter_keys() {
        let input = json!({
            "status": "final",
            "code": {"text": "glucose"},
            "encounter": {"reference": "Encounter/e1"},
            "valueQuantity": {"value": 6.3, "unit": "mmol/L"},
            "comments": "fasting sample",
            "referenceRange": [{
                "low": {"value": 3.1},
                "high": {"value": 6.2},
                "meaning": {"text": "normal"}
            }]
        });
        let observation: Observation = serde_json::from_value(input.clone()).unwrap();
        assert_eq!(observation.comments.as_deref(), Some("fasting sample"));
        assert!(observation.reference_range.as_ref().unwrap()[0]
            .meaning
            .is_some());
        assert_eq!(serde_json::to_value(&observation).unwrap(), input);
    }

    #[test]
    fn diagnostic_report_requires_issued_and_performer() {
        let missing = json!({
            "status": "final",
            "code": {"text": "CBC"},
            "subject": {"reference": "Patient/p1"}
        });
        assert!(serde_json::from_value::<DiagnosticReport>(missing).is_err());

        let report: DiagnosticReport = serde_json::from_value(json!({
            "status": "final",
            "code": {"text": "CBC"},
            "subject": {"reference": "Patient/p1"},
            "effectiveDateTime": "2015-03-04T10:00:00Z",
            "issued": "2015-03-04T11:45:33Z",
            "performer": {"reference": "Organization/lab"}
        }))
        .unwrap();
        assert_eq!(report.performer.reference.as_deref(), Some("Organization/lab"));
    }

    #[test]
    fn specimen_treatment_keeps_its_old_name() {
        let specimen: Specimen = serde_json::from_value(json!({
            "subject": {"reference": "Patient/p1"},
            "treatment": [{"description": "centrifuged"}],
            "collection": {"comment": ["difficult draw"]}
        }))
        .unwrap();
        assert_eq!(specimen.treatment.as_ref().unwrap().len(), 1);
        assert_eq!(
            specimen.collection.as_ref().unwrap().comment.as_ref().unwrap()[0],
            "difficult draw"
        );
    }
}
