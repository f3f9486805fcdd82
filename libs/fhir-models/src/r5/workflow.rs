//! Workflow resources: Encounter, Communication, QuestionnaireResponse,
//! Consent, ResearchSubject.

use ambra_primitives::{Canonical, Code, Date, DateTime, Decimal, Id, Integer, Time, Uri};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::choice;
use crate::choice::ChoiceSlot;
use crate::common::{
    Annotation, CodeableConcept, Coding, Duration, Extension, Identifier, Meta, Period, Quantity,
    Reference,
};

use super::resource::Resource;
use super::types::{Attachment, CodeableReference, Narrative};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
/// R5 reworked this set; `arrived`, `triaged`, `onleave` and
/// `finished` are gone.
pub enum EncounterStatus {
    Planned,
    InProgress,
    OnHold,
    Discharged,
    Completed,
    Cancelled,
    Discontinued,
    EnteredInError,
    Unknown,
    #[serde(untagged)]
    Unrecognized(String),
}

/// People involved in the encounter besides the patient.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EncounterParticipant {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub extension: Option<Vec<Extension>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub modifier_extension: Option<Vec<Extension>>,

    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub r#type: Option<Vec<CodeableConcept>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub period: Option<Period>,

    /// Renamed from `individual` in R5.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actor: Option<Reference>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A diagnosis relevant to the encounter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EncounterDiagnosis {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub extension: Option<Vec<Extension>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub modifier_extension: Option<Vec<Extension>>,

    /// A list of CodeableReferences from R5; a single required
    /// reference before.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub condition: Option<Vec<CodeableReference>>,

    /// Role of this diagnosis, e.g. admission or discharge. An array
    /// from R5.
    #[serde(rename = "use", skip_serializing_if = "Option::is_none")]
    pub r#use: Option<Vec<CodeableConcept>>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Admission and discharge details. Known as `hospitalization` before
/// R5.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EncounterAdmission {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub extension: Option<Vec<Extension>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub modifier_extension: Option<Vec<Extension>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub pre_admission_identifier: Option<Identifier>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub origin: Option<Reference>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub admit_source: Option<CodeableConcept>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub re_admission: Option<CodeableConcept>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination: Option<Reference>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub discharge_disposition: Option<CodeableConcept>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EncounterLocationStatus {
    Planned,
    Active,
    Reserved,
    Completed,
    #[serde(untagged)]
    Unrecognized(String),
}

/// A location the patient has been at during the encounter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EncounterLocation {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub extension: Option<Vec<Extension>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub modifier_extension: Option<Vec<Extension>>,

    pub location: Reference,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<EncounterLocationStatus>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub physical_type: Option<CodeableConcept>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub period: Option<Period>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Why the encounter takes place. New in R5, replacing the flat
/// `reasonCode` and `reasonReference` lists.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EncounterReason {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub extension: Option<Vec<Extension>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub modifier_extension: Option<Vec<Extension>>,

    #[serde(rename = "use", skip_serializing_if = "Option::is_none")]
    pub r#use: Option<Vec<CodeableConcept>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Vec<CodeableReference>>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// An interaction between a patient and healthcare providers.
///
/// `class` is a required Coding in R4; it was optional in R3 and a plain
/// code (with the patient under `patient`, not `subject`) in R2.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Encounter {
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

    pub status: EncounterStatus,

    pub class: Coding,

    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub r#type: Option<Vec<CodeableConcept>>,

    /// CodeableReferences from R5; a single concept in R4.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_type: Option<Vec<CodeableReference>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<CodeableConcept>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<Reference>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub episode_of_care: Option<Vec<Reference>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub based_on: Option<Vec<Reference>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub participant: Option<Vec<EncounterParticipant>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub appointment: Option<Vec<Reference>>,

    /// Renamed from `period` in R5.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actual_period: Option<Period>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub length: Option<Duration>,

    /// R5 merged `reasonCode` and `reasonReference` into this backbone.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<Vec<EncounterReason>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub diagnosis: Option<Vec<EncounterDiagnosis>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub account: Option<Vec<Reference>>,

    /// Renamed from `hospitalization` in R5.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admission: Option<EncounterAdmission>,

    /// Moved up from the admission backbone in R5.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diet_preference: Option<Vec<CodeableConcept>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub special_courtesy: Option<Vec<CodeableConcept>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub special_arrangement: Option<Vec<CodeableConcept>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<Vec<EncounterLocation>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_provider: Option<Reference>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub part_of: Option<Reference>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CommunicationStatus {
    Preparation,
    InProgress,
    NotDone,
    OnHold,
    Stopped,
    Completed,
    EnteredInError,
    Unknown,
    #[serde(untagged)]
    Unrecognized(String),
}

choice! {
    /// `Communication.payload.content[x]`.
    pub enum CommunicationContent: "content" {
        Attachment(Attachment),
        Reference(Reference),
        CodeableConcept(CodeableConcept),
    }
}

/// Text, attachment or resource being communicated.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommunicationPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub extension: Option<Vec<Extension>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub modifier_extension: Option<Vec<Extension>>,

    #[serde(flatten)]
    pub content: ChoiceSlot<CommunicationContent>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A record of information transmitted from a sender to a receiver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Communication {
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
    pub instantiates_canonical: Option<Vec<Canonical>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub instantiates_uri: Option<Vec<Uri>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub based_on: Option<Vec<Reference>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub part_of: Option<Vec<Reference>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub in_response_to: Option<Vec<Reference>>,

    pub status: CommunicationStatus,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_reason: Option<CodeableConcept>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<Vec<CodeableConcept>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<Code>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub medium: Option<Vec<CodeableConcept>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<Reference>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub topic: Option<CodeableConcept>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub about: Option<Vec<Reference>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub encounter: Option<Reference>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub sent: Option<DateTime>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub received: Option<DateTime>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub recipient: Option<Vec<Reference>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub sender: Option<Reference>,

    /// R5 merged `reasonCode` and `reasonReference` into one list.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<Vec<CodeableReference>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload: Option<Vec<CommunicationPayload>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<Vec<Annotation>>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum QuestionnaireResponseStatus {
    InProgress,
    Completed,
    Amended,
    EnteredInError,
    Stopped,
    #[serde(untagged)]
    Unrecognized(String),
}

choice! {
    /// `QuestionnaireResponse.item.answer.value[x]`.
    pub enum QuestionnaireResponseAnswerValue: "value" {
        Boolean(bool),
        Decimal(Decimal),
        Integer(Integer),
        Date(Date),
        DateTime(DateTime),
        Time(Time),
        String(String),
        Uri(Uri),
        Attachment(Attachment),
        Coding(Coding),
        Quantity(Quantity),
        Reference(Reference),
    }
}

/// One answer to a question, possibly with nested items.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionnaireResponseAnswer {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub extension: Option<Vec<Extension>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub modifier_extension: Option<Vec<Extension>>,

    #[serde(flatten)]
    pub value: ChoiceSlot<QuestionnaireResponseAnswerValue>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub item: Option<Vec<QuestionnaireResponseItem>>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A group or question with its answers. R2 modelled this as a separate
/// `group`/`question` tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionnaireResponseItem {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub extension: Option<Vec<Extension>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub modifier_extension: Option<Vec<Extension>>,

    pub link_id: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub definition: Option<Uri>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub answer: Option<Vec<QuestionnaireResponseAnswer>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub item: Option<Vec<QuestionnaireResponseItem>>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A structured set of answers to a questionnaire.
///
/// `questionnaire` is a canonical URL since R4 (a Reference in R2/R3).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionnaireResponse {
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

    #[serde(skip_serializing_if = "Option::is_none")]
    pub based_on: Option<Vec<Reference>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub part_of: Option<Vec<Reference>>,

    /// Required from R5.
    pub questionnaire: Canonical,

    pub status: QuestionnaireResponseStatus,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<Reference>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub encounter: Option<Reference>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub authored: Option<DateTime>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<Reference>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<Reference>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub item: Option<Vec<QuestionnaireResponseItem>>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
/// R5 swapped `proposed` and `rejected` for `not-done` and `unknown`.
pub enum ConsentStatus {
    Draft,
    Active,
    Inactive,
    NotDone,
    EnteredInError,
    Unknown,
    #[serde(untagged)]
    Unrecognized(String),
}

choice! {
    /// `Consent.source[x]`.
    pub enum ConsentSource: "source" {
        Attachment(Attachment),
        Reference(Reference),
    }
}

/// Whether and how the consent was verified.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsentVerification {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub extension: Option<Vec<Extension>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub modifier_extension: Option<Vec<Extension>>,

    pub verified: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub verified_with: Option<Reference>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub verification_date: Option<DateTime>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Who or what the provision applies to.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsentProvisionActor {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub extension: Option<Vec<Extension>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub modifier_extension: Option<Vec<Extension>>,

    /// Optional from R5.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<CodeableConcept>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<Reference>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Data controlled by the provision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsentProvisionData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub extension: Option<Vec<Extension>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub modifier_extension: Option<Vec<Extension>>,

    /// instance | related | dependents | authoredby.
    pub meaning: Code,

    pub reference: Reference,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// An exception or constraint on the base consent.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsentProvision {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub extension: Option<Vec<Extension>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub modifier_extension: Option<Vec<Extension>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub period: Option<Period>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub actor: Option<Vec<ConsentProvisionActor>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<Vec<CodeableConcept>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub security_label: Option<Vec<Coding>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub purpose: Option<Vec<Coding>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub class: Option<Vec<Coding>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<Vec<CodeableConcept>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_period: Option<Period>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Vec<ConsentProvisionData>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub provision: Option<Vec<ConsentProvision>>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A healthcare consumer's choices about use and disclosure of their data,
/// or about care generally. New in R3.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Consent {
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

    pub status: ConsentStatus,

    /// R5 dropped the R4 `scope` concept and made categories optional.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<Vec<CodeableConcept>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<Reference>,

    /// A plain date from R5; `dateTime` before.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<Date>,

    /// Renamed from `performer` in R5.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grantee: Option<Vec<Reference>>,

    /// Renamed from `organization` in R5.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manager: Option<Vec<Reference>>,

    /// permit | deny. New in R5.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decision: Option<Code>,

    #[serde(flatten)]
    pub source: ChoiceSlot<ConsentSource>,

    /// R5 replaced the policy backbone and `policyRule` with these concepts.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub regulatory_basis: Option<Vec<CodeableConcept>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub verification: Option<Vec<ConsentVerification>>,

    /// An array from R5 (a single root provision before).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provision: Option<Vec<ConsentProvision>>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// R5 reduced this to publication-style codes; the old per-state codes
/// moved to `progress.subjectState`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResearchSubjectStatus {
    Draft,
    Active,
    Retired,
    Unknown,
    #[serde(untagged)]
    Unrecognized(String),
}

/// The subject's journey through the study. New in R5.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResearchSubjectProgress {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub extension: Option<Vec<Extension>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub modifier_extension: Option<Vec<Extension>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub r#type: Option<CodeableConcept>,

    /// candidate | eligible | on-study | withdrawn and the rest of the
    /// codes the status element carried before R5.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject_state: Option<CodeableConcept>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub milestone: Option<CodeableConcept>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<CodeableConcept>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<DateTime>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<DateTime>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A participant in a research study. New in R3.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResearchSubject {
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

    pub status: ResearchSubjectStatus,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub progress: Option<Vec<ResearchSubjectProgress>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub period: Option<Period>,

    pub study: Reference,

    /// Renamed from `individual` in R5.
    pub subject: Reference,

    /// The study arms were renamed to comparison groups in R5. These ride
    /// the wire as ids rather than free strings.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_comparison_group: Option<Id>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub actual_comparison_group: Option<Id>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub consent: Option<Reference>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn encounter_requires_class_coding() {
        let input = json!({
            "status": "finished",
            "class": {"system": "http://terminology.hl7.org/CodeSystem/v3-ActCode", "code": "AMB"},
            "subject": {"reference": "Patient/p1"}
        });
        let encounter: Encounter = serde_json::from_value(input.clone()).unwrap();
        assert_eq!(encounter.class.code.as_deref(), Some("AMB"));
        assert_eq!(serde_json::to_value(&encounter).unwrap(), input);

        let missing_class = json!({"status": "finished"});
        assert!(serde_json::from_value::<Encounter>(missing_class).is_err());
    }

    #[test]
    fn questionnaire_response_items_nest() {
        let response: QuestionnaireResponse = serde_json::from_value(json!({
            "status": "completed",
            "questionnaire": "http://example.org/q/intake",
            "item": [{
                "linkId": "1",
                "item": [{
                    "linkId": "1.1",
                    "answer": [{"valueString": "yes"}]
                }]
            }]
        }))
        .unwrap();
        let inner = &response.item.as_ref().unwrap()[0].item.as_ref().unwrap()[0];
        assert!(matches!(
            inner.answer.as_ref().unwrap()[0].value.get(),
            Some(QuestionnaireResponseAnswerValue::String(_))
        ));
    }

    #[test]
    fn communication_payload_dropped_the_string_variant() {
        let communication: Communication = serde_json::from_value(json!({
            "status": "completed",
            "payload": [{"contentCodeableConcept": {"text": "fasting instructions"}}]
        }))
        .unwrap();
        assert!(matches!(
            communication.payload.as_ref().unwrap()[0].content.get(),
            Some(CommunicationContent::CodeableConcept(_))
        ));

        // The dropped variant is not a slot key anymore; it rides through
        // the preserved-field map like any other unrecognized field.
        let communication: Communication = serde_json::from_value(json!({
            "status": "completed",
            "payload": [{"contentString": "no longer a payload kind"}]
        }))
        .unwrap();
        let payload = &communication.payload.as_ref().unwrap()[0];
        assert!(payload.content.is_none());
        assert_eq!(
            payload.extra.get("contentString"),
            Some(&serde_json::Value::String("no longer a payload kind".into()))
        );
    }

    #[test]
    fn consent_uses_a_plain_date_and_decision() {
        let consent: Consent = serde_json::from_value(json!({
            "status": "active",
            "subject": {"reference": "Patient/p1"},
            "date": "2024-03-01",
            "decision": "permit"
        }))
        .unwrap();
        assert_eq!(consent.decision.as_deref(), Some("permit"));
        assert_eq!(consent.date.as_ref().unwrap().to_string(), "2024-03-01");
    }

    #[test]
    fn research_subject_progress_carries_the_old_states() {
        let subject: ResearchSubject = serde_json::from_value(json!({
            "status": "active",
            "study": {"reference": "ResearchStudy/rs1"},
            "subject": {"reference": "Patient/p1"},
            "progress": [{
                "subjectState": {"coding": [{"code": "on-study"}]}
            }]
        }))
        .unwrap();
        assert!(matches!(subject.status, ResearchSubjectStatus::Active));
        assert!(subject.progress.as_ref().unwrap()[0].subject_state.is_some());
    }
}
