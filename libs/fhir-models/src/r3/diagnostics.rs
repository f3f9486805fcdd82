//! Diagnostic resources: Observation, DiagnosticReport, Specimen.

use ambra_primitives::{Code, DateTime, Id, Instant, Time, Uri};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::choice;
use crate::choice::ChoiceSlot;
use crate::common::{
    Annotation, CodeableConcept, Extension, Identifier, Meta, Period, Quantity, Reference,
    SampledData,
};

use super::resource::Resource;
use super::types::{Attachment, Narrative, Range, Ratio};

/// R3 added `corrected`; otherwise stable since R2.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ObservationStatus {
    Registered,
    Preliminary,
    Final,
    Amended,
    Corrected,
    Cancelled,
    EnteredInError,
    Unknown,
    #[serde(untagged)]
    Unrecognized(String),
}

choice! {
    /// `Observation.effective[x]`; R4 widened this with Timing and instant.
    pub enum ObservationEffective: "effective" {
        DateTime(DateTime),
        Period(Period),
    }
}

choice! {
    /// `Observation.value[x]`. The `Attachment` variant was dropped in R4
    /// in favor of the Media resource.
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

/// How one observation relates to another.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObservationRelated {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub extension: Option<Vec<Extension>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub modifier_extension: Option<Vec<Extension>>,

    /// has-member | derived-from | sequel-to | replaces | qualified-by |
    /// interfered-by.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub r#type: Option<Code>,

    pub target: Reference,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Reference range qualifying an observation value.
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

    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub r#type: Option<CodeableConcept>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub applies_to: Option<Vec<CodeableConcept>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<Range>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Component results, e.g. the systolic and diastolic parts of a blood
/// pressure panel.
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
    pub interpretation: Option<CodeableConcept>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference_range: Option<Vec<ObservationReferenceRange>>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Measurements and simple assertions about a patient, device or other
/// subject.
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

    #[serde(skip_serializing_if = "Option::is_none")]
    pub based_on: Option<Vec<Reference>>,

    pub status: ObservationStatus,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<Vec<CodeableConcept>>,

    /// What was observed; LOINC is the conventional system.
    pub code: CodeableConcept,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<Reference>,

    /// The encounter or episode of care; `encounter` from R4.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<Reference>,

    #[serde(flatten)]
    pub effective: ChoiceSlot<ObservationEffective>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub issued: Option<Instant>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub performer: Option<Vec<Reference>>,

    #[serde(flatten)]
    pub value: ChoiceSlot<ObservationValue>,

    /// Why the value is missing, when it is.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_absent_reason: Option<CodeableConcept>,

    /// A single concept until R4 made it an array.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interpretation: Option<CodeableConcept>,

    /// Free-text remarks; R4 replaced this with `note`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,

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

    /// Split into `hasMember` and `derivedFrom` in R4.
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
    Preliminary,
    Final,
    Amended,
    Corrected,
    Appended,
    Cancelled,
    EnteredInError,
    Unknown,
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

/// Participant in producing the report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagnosticReportPerformer {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub extension: Option<Vec<Extension>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub modifier_extension: Option<Vec<Extension>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<CodeableConcept>,

    pub actor: Reference,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Key image associated with a report; renamed to `media` in R4.
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

    #[serde(skip_serializing_if = "Option::is_none")]
    pub based_on: Option<Vec<Reference>>,

    pub status: DiagnosticReportStatus,

    /// A single concept until R4 made it an array.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<CodeableConcept>,

    pub code: CodeableConcept,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<Reference>,

    /// The encounter or episode of care; `encounter` from R4.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<Reference>,

    #[serde(flatten)]
    pub effective: ChoiceSlot<DiagnosticReportEffective>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub issued: Option<Instant>,

    /// R4 flattened this backbone into plain references.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub performer: Option<Vec<DiagnosticReportPerformer>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub specimen: Option<Vec<Reference>>,

    /// The individual Observation results.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Vec<Reference>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub imaging_study: Option<Vec<Reference>>,

    /// Renamed to `media` in R4.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<Vec<DiagnosticReportImage>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub conclusion: Option<String>,

    /// Renamed to `conclusionCode` in R4.
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
    /// `Specimen.processing.time[x]`.
    pub enum SpecimenProcessingTime: "time" {
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

/// Details concerning specimen collection.
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

/// Treatment performed on the specimen; R2 called this backbone
/// `treatment`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpecimenProcessing {
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
    pub time: ChoiceSlot<SpecimenProcessingTime>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Direct container of the specimen.
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
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
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
    pub accession_identifier: Option<Identifier>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<SpecimenStatus>,

    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub r#type: Option<CodeableConcept>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<Reference>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub received_time: Option<DateTime>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<Vec<Reference>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub request: Option<Vec<Reference>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub collection: Option<SpecimenCollection>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub processing: Option<Vec<SpecimenProcessing>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub container: Option<Vec<SpecimenContainer>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<Vec<Annotation>>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn observation_value_quantity_round_trips() {
        let input = json!({
            "status": "final",
            "code": {"coding": [{"system": "http://loinc.org", "code": "8302-2"}]},
            "valueQuantity": {"value": 185.70, "unit": "cm"}
        });
        let obs: Observation = serde_json::from_value(input.clone()).unwrap();
        assert!(matches!(obs.value.get(), Some(ObservationValue::Quantity(_))));
        assert_eq!(serde_json::to_value(&obs).unwrap(), input);
    }

    #[test]
    fn observation_value_conflict_is_rejected() {
        let err = serde_json::from_value::<Observation>(json!({
            "status": "final",
            "code": {"text": "height"},
            "valueQuantity": {"value": 1},
            "valueString": "tall"
        }))
        .unwrap_err();
        let message = err.to_string();
        assert!(message.contains("conflicting choice fields"));
        assert!(message.contains("for element `value`"));
    }

    #[test]
    fn related_observations_carry_a_type_code() {
        let obs: Observation = serde_json::from_value(json!({
            "status": "final",
            "code": {"text": "panel"},
            "related": [
                {"type": "has-member", "target": {"reference": "Observation/o2"}}
            ]
        }))
        .unwrap();
        let related = obs.related.as_ref().unwrap();
        assert_eq!(related[0].r#type.as_deref(), Some("has-member"));
    }

    #[test]
    fn component_values_are_independent_slots() {
        let obs: Observation = serde_json::from_value(json!({
            "status": "final",
            "code": {"text": "BP"},
            "component": [
                {"code": {"text": "systolic"}, "valueQuantity": {"value": 120}},
                {"code": {"text": "diastolic"}, "valueQuantity": {"value": 80}}
            ]
        }))
        .unwrap();
        assert_eq!(obs.component.as_ref().unwrap().len(), 2);
    }

    #[test]
    fn specimen_collected_choice() {
        let specimen: Specimen = serde_json::from_value(json!({
            "collection": {"collectedDateTime": "2021-03-04T08:30:00Z"}
        }))
        .unwrap();
        assert!(matches!(
            specimen.collection.as_ref().unwrap().collected.get(),
            Some(SpecimenCollected::DateTime(_))
        ));
    }
}
