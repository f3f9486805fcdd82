//! Clinical resources: Condition, Procedure, AllergyIntolerance,
//! Immunization, CarePlan.

use ambra_primitives::{Code, Date, DateTime, Id, Uri};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::choice;
use crate::choice::ChoiceSlot;
use crate::common::{
    Age, Annotation, CodeableConcept, Extension, Identifier, Meta, Period, Quantity, Reference,
};

use super::resource::Resource;
use super::types::{Narrative, Range, Timing};

choice! {
    /// `Condition.onset[x]`.
    pub enum ConditionOnset: "onset" {
        DateTime(DateTime),
        Age(Age),
        Period(Period),
        Range(Range),
        String(String),
    }
}

choice! {
    /// `Condition.abatement[x]`.
    pub enum ConditionAbatement: "abatement" {
        DateTime(DateTime),
        Age(Age),
        Boolean(bool),
        Period(Period),
        Range(Range),
        String(String),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConditionClinicalStatus {
    Active,
    Relapse,
    Remission,
    Resolved,
    #[serde(untagged)]
    Unrecognized(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ConditionVerificationStatus {
    Provisional,
    Differential,
    Confirmed,
    Refuted,
    EnteredInError,
    Unknown,
    #[serde(untagged)]
    Unrecognized(String),
}

/// Stage or grade of the condition.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConditionStage {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub extension: Option<Vec<Extension>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub modifier_extension: Option<Vec<Extension>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<CodeableConcept>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub assessment: Option<Vec<Reference>>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Supporting evidence for the condition. The code is a single concept
/// here; R3 made it an array.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConditionEvidence {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub extension: Option<Vec<Extension>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub modifier_extension: Option<Vec<Extension>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<CodeableConcept>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<Vec<Reference>>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A clinical condition, problem or diagnosis.
///
/// DSTU2 keys the subject under `patient` and requires `code` and
/// `verificationStatus`; R3 reshaped all three.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Condition {
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

    pub patient: Reference,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub encounter: Option<Reference>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub asserter: Option<Reference>,

    /// Renamed to `assertedDate` (a dateTime) in R3.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_recorded: Option<Date>,

    pub code: CodeableConcept,

    /// A single concept until R4 made it an array.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<CodeableConcept>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub clinical_status: Option<ConditionClinicalStatus>,

    /// Required here; optional from R3.
    pub verification_status: ConditionVerificationStatus,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub severity: Option<CodeableConcept>,

    #[serde(flatten)]
    pub onset: ChoiceSlot<ConditionOnset>,

    #[serde(flatten)]
    pub abatement: ChoiceSlot<ConditionAbatement>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub stage: Option<ConditionStage>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub evidence: Option<Vec<ConditionEvidence>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub body_site: Option<Vec<CodeableConcept>>,

    /// Free-text remarks; replaced by `note` in R3.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProcedureStatus {
    InProgress,
    Aborted,
    Completed,
    EnteredInError,
    #[serde(untagged)]
    Unrecognized(String),
}

choice! {
    /// `Procedure.performed[x]`.
    pub enum ProcedurePerformed: "performed" {
        DateTime(DateTime),
        Period(Period),
    }
}

choice! {
    /// `Procedure.reason[x]`; split into `reasonCode` and
    /// `reasonReference` in R3.
    pub enum ProcedureReason: "reason" {
        CodeableConcept(CodeableConcept),
        Reference(Reference),
    }
}

/// Who performed the procedure and in what role.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcedurePerformer {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub extension: Option<Vec<Extension>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub modifier_extension: Option<Vec<Extension>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub actor: Option<Reference>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<CodeableConcept>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// An action performed on or for a patient.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Procedure {
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

    pub subject: Reference,

    pub status: ProcedureStatus,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<CodeableConcept>,

    /// Required here; optional from R3.
    pub code: CodeableConcept,

    /// Renamed to `notDone` in R3.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub not_performed: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason_not_performed: Option<Vec<CodeableConcept>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub body_site: Option<Vec<CodeableConcept>>,

    #[serde(flatten)]
    pub reason: ChoiceSlot<ProcedureReason>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub performer: Option<Vec<ProcedurePerformer>>,

    #[serde(flatten)]
    pub performed: ChoiceSlot<ProcedurePerformed>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub encounter: Option<Reference>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<Reference>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub outcome: Option<CodeableConcept>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub report: Option<Vec<Reference>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub complication: Option<Vec<CodeableConcept>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub follow_up: Option<Vec<CodeableConcept>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub request: Option<Reference>,

    /// Replaced by `note` in R3.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<Vec<Annotation>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub used: Option<Vec<Reference>>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// R3 split this single status into separate clinical and verification
/// codes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AllergyIntoleranceStatus {
    Active,
    Unconfirmed,
    Confirmed,
    Inactive,
    Resolved,
    Refuted,
    EnteredInError,
    #[serde(untagged)]
    Unrecognized(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AllergyIntoleranceType {
    Allergy,
    Intolerance,
    #[serde(untagged)]
    Unrecognized(String),
}

/// A single category; R3 made this an array with different codes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AllergyIntoleranceCategory {
    Food,
    Medication,
    Environment,
    Other,
    #[serde(untagged)]
    Unrecognized(String),
}

/// DSTU2 uses the raw v3 codes; R3 switched to low | high |
/// unable-to-assess.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AllergyIntoleranceCriticality {
    #[serde(rename = "CRITL")]
    Low,
    #[serde(rename = "CRITH")]
    High,
    #[serde(rename = "CRITU")]
    Unable,
    #[serde(untagged)]
    Unrecognized(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AllergyIntoleranceSeverity {
    Mild,
    Moderate,
    Severe,
    #[serde(untagged)]
    Unrecognized(String),
}

/// An adverse reaction event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AllergyIntoleranceReaction {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub extension: Option<Vec<Extension>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub modifier_extension: Option<Vec<Extension>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub substance: Option<CodeableConcept>,

    /// unlikely | likely | confirmed. Dropped in R3.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub certainty: Option<Code>,

    pub manifestation: Vec<CodeableConcept>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub onset: Option<DateTime>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub severity: Option<AllergyIntoleranceSeverity>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub exposure_route: Option<CodeableConcept>,

    /// A single note; an array from R3.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<Annotation>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Risk of harmful reaction to a substance.
///
/// DSTU2 requires the offending `substance` on the resource itself; R3
/// moved it into `code`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AllergyIntolerance {
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

    /// A plain dateTime; R3 widened this to `onset[x]`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub onset: Option<DateTime>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub recorded_date: Option<DateTime>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub recorder: Option<Reference>,

    pub patient: Reference,

    /// Renamed to `asserter` in R3.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reporter: Option<Reference>,

    pub substance: CodeableConcept,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<AllergyIntoleranceStatus>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub criticality: Option<AllergyIntoleranceCriticality>,

    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub r#type: Option<AllergyIntoleranceType>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<AllergyIntoleranceCategory>,

    /// Spelled without the second `r` in the DSTU2 wire format.
    #[serde(rename = "lastOccurence", skip_serializing_if = "Option::is_none")]
    pub last_occurence: Option<DateTime>,

    /// A single note; an array from R3.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<Annotation>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub reaction: Option<Vec<AllergyIntoleranceReaction>>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Why the vaccine was or was not given.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImmunizationExplanation {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub extension: Option<Vec<Extension>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub modifier_extension: Option<Vec<Extension>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<Vec<CodeableConcept>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason_not_given: Option<Vec<CodeableConcept>>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// The event of a patient being administered a vaccine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Immunization {
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

    /// DSTU2 leaves this an open code rather than an enum.
    pub status: Code,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<DateTime>,

    pub vaccine_code: CodeableConcept,

    pub patient: Reference,

    /// Renamed to `notGiven` in R3.
    pub was_not_given: bool,

    /// Renamed to `primarySource` (inverted) in R3.
    pub reported: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub performer: Option<Reference>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub requester: Option<Reference>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub encounter: Option<Reference>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub manufacturer: Option<Reference>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<Reference>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub lot_number: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiration_date: Option<Date>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub site: Option<CodeableConcept>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub route: Option<CodeableConcept>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub dose_quantity: Option<Quantity>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<Vec<Annotation>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub explanation: Option<ImmunizationExplanation>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CarePlanStatus {
    Proposed,
    Draft,
    Active,
    Completed,
    Cancelled,
    #[serde(untagged)]
    Unrecognized(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CarePlanActivityStatus {
    NotStarted,
    Scheduled,
    InProgress,
    OnHold,
    Completed,
    Cancelled,
    #[serde(untagged)]
    Unrecognized(String),
}

choice! {
    /// `CarePlan.activity.detail.scheduled[x]`.
    pub enum CarePlanScheduled: "scheduled" {
        Timing(Timing),
        Period(Period),
        String(String),
    }
}

choice! {
    /// `CarePlan.activity.detail.product[x]`.
    pub enum CarePlanProduct: "product" {
        CodeableConcept(CodeableConcept),
        Reference(Reference),
    }
}

/// Who is involved in carrying out the plan.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CarePlanParticipant {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub extension: Option<Vec<Extension>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub modifier_extension: Option<Vec<Extension>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<CodeableConcept>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub member: Option<Reference>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A plan related to this one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CarePlanRelatedPlan {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub extension: Option<Vec<Extension>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub modifier_extension: Option<Vec<Extension>>,

    /// includes | replaces | fulfills.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<Code>,

    pub plan: Reference,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// In-line definition of a planned activity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CarePlanActivityDetail {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub extension: Option<Vec<Extension>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub modifier_extension: Option<Vec<Extension>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<CodeableConcept>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<CodeableConcept>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason_code: Option<Vec<CodeableConcept>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason_reference: Option<Vec<Reference>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub goal: Option<Vec<Reference>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<CarePlanActivityStatus>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_reason: Option<CodeableConcept>,

    /// Required here; R4 renamed it to `doNotPerform` and made it
    /// optional.
    pub prohibited: bool,

    #[serde(flatten)]
    pub scheduled: ChoiceSlot<CarePlanScheduled>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<Reference>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub performer: Option<Vec<Reference>>,

    #[serde(flatten)]
    pub product: ChoiceSlot<CarePlanProduct>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub daily_amount: Option<Quantity>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<Quantity>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One action scheduled as part of the plan.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CarePlanActivity {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub extension: Option<Vec<Extension>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub modifier_extension: Option<Vec<Extension>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub action_resulting: Option<Vec<Reference>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub progress: Option<Vec<Annotation>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<Reference>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<CarePlanActivityDetail>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Healthcare plan for a patient or group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CarePlan {
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

    /// Optional here; required from R3.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<Reference>,

    pub status: CarePlanStatus,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<Reference>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub period: Option<Period>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<Vec<Reference>>,

    /// Last revision time; dropped in R3.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified: Option<DateTime>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<Vec<CodeableConcept>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub addresses: Option<Vec<Reference>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub support: Option<Vec<Reference>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub related_plan: Option<Vec<CarePlanRelatedPlan>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub participant: Option<Vec<CarePlanParticipant>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub goal: Option<Vec<Reference>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub activity: Option<Vec<CarePlanActivity>>,

    /// A single note; an array from R3.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<Annotation>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn condition_uses_patient_and_date_recorded() {
        let input = json!({
            "patient": {"reference": "Patient/p1"},
            "dateRecorded": "2015-06-12",
            "code": {"text": "Asthma"},
            "clinicalStatus": "active",
            "verificationStatus": "confirmed",
            "onsetAge": {"value": 12, "unit": "a"},
            "notes": "longstanding"
        });
        let condition: Condition = serde_json::from_value(input.clone()).unwrap();
        assert_eq!(
            condition.clinical_status,
            Some(ConditionClinicalStatus::Active)
        );
        assert!(matches!(condition.onset.get(), Some(ConditionOnset::Age(_))));
        assert_eq!(serde_json::to_value(&condition).unwrap(), input);
    }

    #[test]
    fn allergy_substance_is_required() {
        let missing = json!({
            "patient": {"reference": "Patient/p1"}
        });
        assert!(serde_json::from_value::<AllergyIntolerance>(missing).is_err());

        let allergy: AllergyIntolerance = serde_json::from_value(json!({
            "patient": {"reference": "Patient/p1"},
            "substance": {"text": "peanut"},
            "status": "confirmed",
            "criticality": "CRITH",
            "category": "food",
            "lastOccurence": "2012-06"
        }))
        .unwrap();
        assert_eq!(
            allergy.criticality,
            Some(AllergyIntoleranceCriticality::High)
        );
        assert_eq!(allergy.category, Some(AllergyIntoleranceCategory::Food));
    }

    #[test]
    fn immunization_flags_are_required() {
        let immunization: Immunization = serde_json::from_value(json!({
            "status": "completed",
            "date": "2013-01-10",
            "vaccineCode": {"text": "flu"},
            "patient": {"reference": "Patient/p1"},
            "wasNotGiven": false,
            "reported": true
        }))
        .unwrap();
        assert!(!immunization.was_not_given);
        assert!(immunization.reported);
    }

    #[test]
    fn care_plan_detail_requires_prohibited() {
        let plan: CarePlan = serde_json::from_value(json!({
            "status": "active",
            "subject": {"reference": "Patient/p1"},
            "activity": [{
                "detail": {
                    "code": {"text": "walk 30 minutes"},
                    "status": "in-progress",
                    "prohibited": false,
                    "scheduledString": "daily"
                }
            }]
        }))
        .unwrap();
        let detail = plan.activity.as_ref().unwrap()[0].detail.as_ref().unwrap();
        assert!(!detail.prohibited);
        assert!(matches!(
            detail.scheduled.get(),
            Some(CarePlanScheduled::String(_))
        ));
    }
}
