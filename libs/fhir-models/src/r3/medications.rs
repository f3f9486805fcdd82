//! Medication resources: Medication, MedicationRequest.

use ambra_primitives::{Code, DateTime, Id, PositiveInt, Uri};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::choice;
use crate::choice::ChoiceSlot;
use crate::common::{
    Annotation, CodeableConcept, Duration, Extension, Identifier, Meta, Period, Quantity,
    Reference,
};

use super::resource::Resource;
use super::types::{Attachment, Dosage, Narrative, Ratio};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MedicationStatus {
    Active,
    Inactive,
    EnteredInError,
    #[serde(untagged)]
    Unrecognized(String),
}

/// Packaged content of a medication.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MedicationPackageContent {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub extension: Option<Vec<Extension>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub modifier_extension: Option<Vec<Extension>>,

    #[serde(flatten)]
    pub item: ChoiceSlot<MedicationPackageItem>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<Quantity>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

choice! {
    /// `Medication.package.content.item[x]`.
    pub enum MedicationPackageItem: "item" {
        CodeableConcept(CodeableConcept),
        Reference(Reference),
    }
}

/// Package details; R4 dissolved this backbone into the resource.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MedicationPackage {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub extension: Option<Vec<Extension>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub modifier_extension: Option<Vec<Extension>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub container: Option<CodeableConcept>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<Vec<MedicationPackageContent>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub batch: Option<Vec<MedicationBatch>>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

choice! {
    /// `Medication.ingredient.item[x]`.
    pub enum MedicationIngredientItem: "item" {
        CodeableConcept(CodeableConcept),
        Reference(Reference),
    }
}

/// An active or inactive ingredient.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MedicationIngredient {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub extension: Option<Vec<Extension>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub modifier_extension: Option<Vec<Extension>>,

    #[serde(flatten)]
    pub item: ChoiceSlot<MedicationIngredientItem>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,

    /// Renamed to `strength` in R4.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<Ratio>,

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

    /// Dropped in R4.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_brand: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_over_the_counter: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub manufacturer: Option<Reference>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub form: Option<CodeableConcept>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub ingredient: Option<Vec<MedicationIngredient>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub package: Option<MedicationPackage>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<Vec<Attachment>>,

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
    /// `MedicationRequest.medication[x]`.
    pub enum MedicationRequestMedication: "medication" {
        CodeableConcept(CodeableConcept),
        Reference(Reference),
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

    /// R4 loosened this to an unsignedInt.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number_of_repeats_allowed: Option<PositiveInt>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<Quantity>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected_supply_duration: Option<Duration>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub performer: Option<Reference>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Who signed the order; R4 flattened this backbone into a reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MedicationRequestRequester {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub extension: Option<Vec<Extension>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub modifier_extension: Option<Vec<Extension>>,

    pub agent: Reference,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub on_behalf_of: Option<Reference>,

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

    /// A plain boolean; R4 turned this into `allowed[x]`.
    pub allowed: bool,

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

    #[serde(skip_serializing_if = "Option::is_none")]
    pub definition: Option<Vec<Reference>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub based_on: Option<Vec<Reference>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_identifier: Option<Identifier>,

    /// Required from R4.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<MedicationRequestStatus>,

    pub intent: MedicationRequestIntent,

    /// A single concept until R4 made it an array.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<CodeableConcept>,

    /// routine | urgent | asap | stat.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<Code>,

    #[serde(flatten)]
    pub medication: ChoiceSlot<MedicationRequestMedication>,

    pub subject: Reference,

    /// The encounter or episode of care; `encounter` from R4.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<Reference>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub supporting_information: Option<Vec<Reference>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub authored_on: Option<DateTime>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub requester: Option<MedicationRequestRequester>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub recorder: Option<Reference>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason_code: Option<Vec<CodeableConcept>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason_reference: Option<Vec<Reference>>,

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
            "medicationCodeableConcept": {"text": "Amoxicillin 500mg"},
            "subject": {"reference": "Patient/p1"},
            "authoredOn": "2021-06-01",
            "dosageInstruction": [{"text": "one capsule three times daily"}]
        });
        let request: MedicationRequest = serde_json::from_value(input.clone()).unwrap();
        assert!(matches!(
            request.medication.get(),
            Some(MedicationRequestMedication::CodeableConcept(_))
        ));
        assert_eq!(serde_json::to_value(&request).unwrap(), input);
    }

    #[test]
    fn ingredient_item_choice() {
        let medication: Medication = serde_json::from_value(json!({
            "isBrand": false,
            "ingredient": [{
                "itemReference": {"reference": "Substance/s1"},
                "isActive": true,
                "amount": {
                    "numerator": {"value": 500, "unit": "mg"},
                    "denominator": {"value": 1, "unit": "capsule"}
                }
            }]
        }))
        .unwrap();
        assert!(matches!(
            medication.ingredient.as_ref().unwrap()[0].item.get(),
            Some(MedicationIngredientItem::Reference(_))
        ));
    }
}
