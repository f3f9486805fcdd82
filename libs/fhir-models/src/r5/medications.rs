//! Medication resources: Medication, MedicationRequest.

use ambra_primitives::{Code, DateTime, Id, UnsignedInt, Uri};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::choice;
use crate::choice::ChoiceSlot;
use crate::common::{
    Annotation, CodeableConcept, Duration, Extension, Identifier, Meta, Period, Quantity,
    Reference,
};

use super::resource::Resource;
use super::types::{CodeableReference, Dosage, Narrative, Ratio};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MedicationStatus {
    Active,
    Inactive,
    EnteredInError,
    #[serde(untagged)]
    Unrecognized(String),
}

choice! {
    /// `Medication.ingredient.strength[x]`; a plain Ratio before R5.
    pub enum MedicationIngredientStrength: "strength" {
        Ratio(Ratio),
        CodeableConcept(CodeableConcept),
        Quantity(Quantity),
    }
}

/// An active or inactive ingredient. The item became a CodeableReference
/// in R5; before that it was an `item[x]` choice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MedicationIngredient {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub extension: Option<Vec<Extension>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub modifier_extension: Option<Vec<Extension>>,

    pub item: CodeableReference,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,

    #[serde(flatten)]
    pub strength: ChoiceSlot<MedicationIngredientStrength>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Lot information for a batch of medication.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MedicationBatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub extension: Option<Vec<Extension>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub modifier_extension: Option<Vec<Extension>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub lot_number: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiration_date: Option<DateTime>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Definition of a medication.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Medication {
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

    /// RxNorm or another drug vocabulary.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<CodeableConcept>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<MedicationStatus>,

    /// Renamed from `manufacturer` in R5.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marketing_authorization_holder: Option<Reference>,

    /// Renamed from `form` in R5.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dose_form: Option<CodeableConcept>,

    /// Replaced the `amount` ratio in R5.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_volume: Option<Quantity>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub ingredient: Option<Vec<MedicationIngredient>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub batch: Option<MedicationBatch>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MedicationRequestStatus {
    Active,
    OnHold,
    Cancelled,
    Completed,
    EnteredInError,
    Stopped,
    Draft,
    Unknown,
    #[serde(untagged)]
    Unrecognized(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MedicationRequestIntent {
    Proposal,
    Plan,
    Order,
    OriginalOrder,
    ReflexOrder,
    FillerOrder,
    InstanceOrder,
    Option,
    #[serde(untagged)]
    Unrecognized(String),
}

choice! {
    /// `MedicationRequest.substitution.allowed[x]`.
    pub enum MedicationRequestAllowed: "allowed" {
        Boolean(bool),
        CodeableConcept(CodeableConcept),
    }
}

/// Fulfilment authorization.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MedicationRequestDispenseRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub extension: Option<Vec<Extension>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub modifier_extension: Option<Vec<Extension>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub validity_period: Option<Period>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub number_of_repeats_allowed: Option<UnsignedInt>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<Quantity>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected_supply_duration: Option<Duration>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub performer: Option<Reference>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Substitution terms for a dispense.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MedicationRequestSubstitution {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub extension: Option<Vec<Extension>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub modifier_extension: Option<Vec<Extension>>,

    #[serde(flatten)]
    pub allowed: ChoiceSlot<MedicationRequestAllowed>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<CodeableConcept>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// An order for supply and administration of medication. Named
/// `MedicationOrder` in R2.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MedicationRequest {
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

    pub status: MedicationRequestStatus,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_reason: Option<CodeableConcept>,

    pub intent: MedicationRequestIntent,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<Vec<CodeableConcept>>,

    /// routine | urgent | asap | stat.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<Code>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub do_not_perform: Option<bool>,

    /// R5 split the R4 `reported[x]` choice into this flag and
    /// `informationSource`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reported: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub information_source: Option<Vec<Reference>>,

    /// A required CodeableReference from R5; a `medication[x]` choice
    /// before.
    pub medication: CodeableReference,

    pub subject: Reference,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub encounter: Option<Reference>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub supporting_information: Option<Vec<Reference>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub authored_on: Option<DateTime>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub requester: Option<Reference>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub performer: Option<Reference>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub performer_type: Option<CodeableConcept>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub recorder: Option<Reference>,

    /// R5 merged `reasonCode` and `reasonReference` into one list.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<Vec<CodeableReference>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub based_on: Option<Vec<Reference>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_identifier: Option<Identifier>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<Vec<Annotation>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub dosage_instruction: Option<Vec<Dosage>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub dispense_request: Option<MedicationRequestDispenseRequest>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub substitution: Option<MedicationRequestSubstitution>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub prior_prescription: Option<Reference>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn medication_request_round_trips() {
        let input = json!({
            "status": "active",
            "intent": "order",
            "medication": {"concept": {"text": "Amoxicillin 500mg"}},
            "subject": {"reference": "Patient/p1"},
            "authoredOn": "2021-06-01",
            "dosageInstruction": [{"text": "one capsule three times daily"}]
        });
        let request: MedicationRequest = serde_json::from_value(input.clone()).unwrap();
        assert!(request.medication.concept.is_some());
        assert_eq!(serde_json::to_value(&request).unwrap(), input);
    }

    #[test]
    fn ingredient_strength_is_a_choice() {
        let medication: Medication = serde_json::from_value(json!({
            "doseForm": {"text": "capsule"},
            "ingredient": [{
                "item": {"reference": {"reference": "Substance/s1"}},
                "isActive": true,
                "strengthQuantity": {"value": 500, "unit": "mg"}
            }]
        }))
        .unwrap();
        let ingredient = &medication.ingredient.as_ref().unwrap()[0];
        assert!(ingredient.item.reference.is_some());
        assert!(matches!(
            ingredient.strength.get(),
            Some(MedicationIngredientStrength::Quantity(_))
        ));
    }
}
