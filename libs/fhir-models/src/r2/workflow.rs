//! Workflow resources: Encounter, Communication, QuestionnaireResponse.

use ambra_primitives::{Code, Date, DateTime, Decimal, Id, Instant, Integer, Time, Uri};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::choice;
use crate::choice::ChoiceSlot;
use crate::common::{
    CodeableConcept, Coding, Duration, Extension, Identifier, Meta, Period, Quantity, Reference,
};

use super::resource::Resource;
use super::types::{Attachment, Narrative};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EncounterStatus {
    Planned,
    Arrived,
    InProgress,
    Onleave,
    Finished,
    Cancelled,
    #[serde(untagged)]
    Unrecognized(String),
}

/// A fixed code here; R3 replaced it with a Coding drawn from the v3
/// ActEncounterCode system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EncounterClass {
    Inpatient,
    Outpatient,
    Ambulatory,
    Emergency,
    Home,
    Field,
    Daytime,
    Virtual,
    Other,
    #[serde(untagged)]
    Unrecognized(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EncounterStatusHistory {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub extension: Option<Vec<Extension>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub modifier_extension: Option<Vec<Extension>>,

    pub status: EncounterStatus,

    pub period: Period,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

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

    #[serde(skip_serializing_if = "Option::is_none")]
    pub individual: Option<Reference>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Admission and discharge details.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EncounterHospitalization {
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

    /// Dropped in R3.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admitting_diagnosis: Option<Vec<Reference>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub re_admission: Option<CodeableConcept>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub diet_preference: Option<Vec<CodeableConcept>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub special_courtesy: Option<Vec<CodeableConcept>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub special_arrangement: Option<Vec<CodeableConcept>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination: Option<Reference>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub discharge_disposition: Option<CodeableConcept>,

    /// Dropped in R3.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discharge_diagnosis: Option<Vec<Reference>>,

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
    pub period: Option<Period>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// An interaction between a patient and healthcare providers.
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

    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_history: Option<Vec<EncounterStatusHistory>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub class: Option<EncounterClass>,

    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub r#type: Option<Vec<CodeableConcept>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<CodeableConcept>,

    /// Renamed to `subject` in R3.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub patient: Option<Reference>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub episode_of_care: Option<Vec<Reference>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub incoming_referral: Option<Vec<Reference>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub participant: Option<Vec<EncounterParticipant>>,

    /// A single appointment until R4.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub appointment: Option<Reference>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub period: Option<Period>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub length: Option<Duration>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<Vec<CodeableConcept>>,

    /// Condition references; R3 folded these into `diagnosis`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub indication: Option<Vec<Reference>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub hospitalization: Option<EncounterHospitalization>,

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
    InProgress,
    Completed,
    Suspended,
    Rejected,
    Failed,
    #[serde(untagged)]
    Unrecognized(String),
}

choice! {
    /// `Communication.payload.content[x]`.
    pub enum CommunicationContent: "content" {
        String(String),
        Attachment(Attachment),
        Reference(Reference),
    }
}

/// Message content.
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
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
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

    /// A single concept until R4 made categories an array.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<CodeableConcept>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub sender: Option<Reference>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub recipient: Option<Vec<Reference>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload: Option<Vec<CommunicationPayload>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub medium: Option<Vec<CodeableConcept>>,

    /// Optional here; required from R3.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<CommunicationStatus>,

    /// Renamed to `context` in R3.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub encounter: Option<Reference>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub sent: Option<DateTime>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub received: Option<DateTime>,

    /// Split into `reasonCode` and `reasonReference` in R3.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<Vec<CodeableConcept>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<Reference>,

    /// Replaced by `basedOn` in R3.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_detail: Option<Reference>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum QuestionnaireResponseStatus {
    InProgress,
    Completed,
    Amended,
    #[serde(untagged)]
    Unrecognized(String),
}

choice! {
    /// `QuestionnaireResponse.group.question.answer.value[x]`.
    pub enum QuestionnaireResponseAnswerValue: "value" {
        Boolean(bool),
        Decimal(Decimal),
        Integer(Integer),
        Date(Date),
        DateTime(DateTime),
        Instant(Instant),
        Time(Time),
        String(String),
        Uri(Uri),
        Attachment(Attachment),
        Coding(Coding),
        Quantity(Quantity),
        Reference(Reference),
    }
}

/// An answer to a question.
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

    /// Nested groups under an answer.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group: Option<Vec<QuestionnaireResponseGroup>>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A question and its answers.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionnaireResponseQuestion {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub extension: Option<Vec<Extension>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub modifier_extension: Option<Vec<Extension>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub link_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub answer: Option<Vec<QuestionnaireResponseAnswer>>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A group of questions; R3 merged groups and questions into the
/// single `item` tree.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionnaireResponseGroup {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub extension: Option<Vec<Extension>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub modifier_extension: Option<Vec<Extension>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub link_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<Reference>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub group: Option<Vec<QuestionnaireResponseGroup>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub question: Option<Vec<QuestionnaireResponseQuestion>>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A structured set of answers to a questionnaire.
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
    pub questionnaire: Option<Reference>,

    pub status: QuestionnaireResponseStatus,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<Reference>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<Reference>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub authored: Option<DateTime>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<Reference>,

    /// Renamed to `context` in R3.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub encounter: Option<Reference>,

    /// A single root group; R3 replaced the group and question split
    /// with the recursive `item` list.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group: Option<QuestionnaireResponseGroup>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn encounter_class_is_a_plain_code() {
        let input = json!({
            "status": "in-progress",
            "class": "inpatient",
            "patient": {"reference": "Patient/p1"},
            "indication": [{"reference": "Condition/c1"}]
        });
        let encounter: Encounter = serde_json::from_value(input.clone()).unwrap();
        assert_eq!(encounter.class, Some(EncounterClass::Inpatient));
        assert_eq!(serde_json::to_value(&encounter).unwrap(), input);
    }

    #[test]
    fn unknown_encounter_class_is_preserved() {
        let encounter: Encounter = serde_json::from_value(json!({
            "status": "finished",
            "class": "telehealth"
        }))
        .unwrap();
        assert_eq!(
            encounter.class,
            Some(EncounterClass::Unrecognized("telehealth".into()))
        );
    }

    #[test]
    fn questionnaire_response_uses_the_group_tree() {
        let response: QuestionnaireResponse = serde_json::from_value(json!({
            "status": "completed",
            "group": {
                "linkId": "root",
                "group": [{
                    "linkId": "vitals",
                    "question": [{
                        "linkId": "smoker",
                        "answer": [{"valueBoolean": false}]
                    }]
                }]
            }
        }))
        .unwrap();
        let root = response.group.as_ref().unwrap();
        let question = &root.group.as_ref().unwrap()[0].question.as_ref().unwrap()[0];
        assert!(matches!(
            question.answer.as_ref().unwrap()[0].value.get(),
            Some(QuestionnaireResponseAnswerValue::Boolean(false))
        ));
    }

    #[test]
    fn communication_keeps_request_detail() {
        let communication: Communication = serde_json::from_value(json!({
            "status": "completed",
            "category": {"text": "alert"},
            "requestDetail": {"reference": "CommunicationRequest/cr1"},
            "payload": [{"contentString": "Patient admitted"}]
        }))
        .unwrap();
        assert!(communication.request_detail.is_some());
        assert!(matches!(
            communication.payload.as_ref().unwrap()[0].content.get(),
            Some(CommunicationContent::String(_))
        ));
    }
}
