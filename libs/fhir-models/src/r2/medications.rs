//! Medication resources: Medication and MedicationOrder.

use ambra_primitives::{Code, DateTime, Id, PositiveInt, Uri};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::choice;
use crate::choice::ChoiceSlot;
use crate::common::{CodeableConcept, Duration, Extension, Identifier, Meta, Period, Quantity, Reference};

use super::resource::Resource;
use super::types::{Narrative, Range, Ratio, Timing};

/// Active or inactive ingredient. The item is always a reference here;
/// R3 made it a choice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MedicationProductIngredient {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub extension: Option<Vec<Extension>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub modifier_extension: Option<Vec<Extension>>,

    pub item: Reference,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<Ratio>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Details about a packaged batch.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MedicationProductBatch {
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

/// Administrable medication details; DSTU2 nests form, ingredients and
/// batches under `product`. R3 flattened this level away.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MedicationProduct {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub extension: Option<Vec<Extension>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub modifier_extension: Option<Vec<Extension>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub form: Option<CodeableConcept>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub ingredient: Option<Vec<MedicationProductIngredient>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub batch: Option<Vec<MedicationProductBatch>>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// What is in one package unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MedicationPackageContent {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub extension: Option<Vec<Extension>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub modifier_extension: Option<Vec<Extension>>,

    pub item: Reference,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<Quantity>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Packaging details.
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
    pub code: Option<CodeableConcept>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_brand: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub manufacturer: Option<Reference>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub product: Option<MedicationProduct>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub package: Option<MedicationPackage>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Renamed to MedicationRequest in R3.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MedicationOrderStatus {
    Active,
    OnHold,
    Completed,
    EnteredInError,
    Stopped,
    Draft,
    #[serde(untagged)]
    Unrecognized(String),
}

choice! {
    /// `MedicationOrder.medication[x]`.
    pub enum MedicationOrderMedication: "medication" {
        CodeableConcept(CodeableConcept),
        Reference(Reference),
    }
}

choice! {
    /// `MedicationOrder.reason[x]`.
    pub enum MedicationOrderReason: "reason" {
        CodeableConcept(CodeableConcept),
        Reference(Reference),
    }
}

choice! {
    /// `MedicationOrder.dosageInstruction.asNeeded[x]`.
    pub enum MedicationOrderAsNeeded: "asNeeded" {
        Boolean(bool),
        CodeableConcept(CodeableConcept),
    }
}

choice! {
    /// `MedicationOrder.dosageInstruction.site[x]`.
    pub enum MedicationOrderSite: "site" {
        CodeableConcept(CodeableConcept),
        Reference(Reference),
    }
}

choice! {
    /// `MedicationOrder.dosageInstruction.dose[x]`.
    pub enum MedicationOrderDose: "dose" {
        Range(Range),
        Quantity(Quantity),
    }
}

choice! {
    /// `MedicationOrder.dosageInstruction.rate[x]`.
    pub enum MedicationOrderRate: "rate" {
        Ratio(Ratio),
        Range(Range),
    }
}

/// How the medication should be taken. DSTU2 has no shared Dosage
/// datatype, so the instruction is a backbone here.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MedicationOrderDosageInstruction {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub extension: Option<Vec<Extension>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub modifier_extension: Option<Vec<Extension>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_instructions: Option<CodeableConcept>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub timing: Option<Timing>,

    #[serde(flatten)]
    pub as_needed: ChoiceSlot<MedicationOrderAsNeeded>,

    #[serde(flatten)]
    pub site: ChoiceSlot<MedicationOrderSite>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub route: Option<CodeableConcept>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub method: Option<CodeableConcept>,

    #[serde(flatten)]
    pub dose: ChoiceSlot<MedicationOrderDose>,

    #[serde(flatten)]
    pub rate: ChoiceSlot<MedicationOrderRate>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_dose_per_period: Option<Ratio>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

choice! {
    /// `MedicationOrder.dispenseRequest.medication[x]`.
    pub enum MedicationOrderDispenseMedication: "medication" {
        CodeableConcept(CodeableConcept),
        Reference(Reference),
    }
}

/// Dispensing authorization.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MedicationOrderDispenseRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub extension: Option<Vec<Extension>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub modifier_extension: Option<Vec<Extension>>,

    /// Dropped in R3; the order-level medication applies.
    #[serde(flatten)]
    pub medication: ChoiceSlot<MedicationOrderDispenseMedication>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub validity_period: Option<Period>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub number_of_repeats_allowed: Option<PositiveInt>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<Quantity>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected_supply_duration: Option<Duration>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Whether substitution is allowed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MedicationOrderSubstitution {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub extension: Option<Vec<Extension>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub modifier_extension: Option<Vec<Extension>>,

    #[serde(rename = "type")]
    pub r#type: CodeableConcept,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<CodeableConcept>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Prescription of medication; renamed to MedicationRequest in R3.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MedicationOrder {
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
    pub date_written: Option<DateTime>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<MedicationOrderStatus>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_ended: Option<DateTime>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason_ended: Option<CodeableConcept>,

    /// Renamed to `subject` (and widened to groups) in R3.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub patient: Option<Reference>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub prescriber: Option<Reference>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub encounter: Option<Reference>,

    #[serde(flatten)]
    pub reason: ChoiceSlot<MedicationOrderReason>,

    /// Free-text remarks; replaced by `note` annotations in R3.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,

    #[serde(flatten)]
    pub medication: ChoiceSlot<MedicationOrderMedication>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub dosage_instruction: Option<Vec<MedicationOrderDosageInstruction>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub dispense_request: Option<MedicationOrderDispenseRequest>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub substitution: Option<MedicationOrderSubstitution>,

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
    fn medication_nests_ingredients_under_product() {
        let input = json!({
            "code": {"text": "Amoxicillin 250mg"},
            "isBrand": false,
            "product": {
                "form": {"text": "capsule"},
                "ingredient": [{
                    "item": {"reference": "Substance/amox"},
                    "amount": {
                        "numerator": {"value": 250, "unit": "mg"},
                        "denominator": {"value": 1, "unit": "capsule"}
                    }
                }]
            }
        });
        let medication: Medication = serde_json::from_value(input.clone()).unwrap();
        let product = medication.product.as_ref().unwrap();
        assert_eq!(product.ingredient.as_ref().unwrap().len(), 1);
        assert_eq!(serde_json::to_value(&medication).unwrap(), input);
    }

    #[test]
    fn order_dosage_is_a_backbone_with_choices() {
        let order: MedicationOrder = serde_json::from_value(json!({
            "dateWritten": "2015-01-15",
            "status": "active",
            "patient": {"reference": "Patient/p1"},
            "medicationCodeableConcept": {"text": "Amoxicillin"},
            "dosageInstruction": [{
                "text": "one capsule three times daily",
                "asNeededBoolean": false,
                "doseQuantity": {"value": 1, "unit": "capsule"}
            }],
            "dispenseRequest": {
                "numberOfRepeatsAllowed": 2,
                "expectedSupplyDuration": {"value": 10, "unit": "days"}
            }
        }))
        .unwrap();
        let dosage = &order.dosage_instruction.as_ref().unwrap()[0];
        assert!(matches!(
            dosage.as_needed.get(),
            Some(MedicationOrderAsNeeded::Boolean(false))
        ));
        assert!(matches!(
            dosage.dose.get(),
            Some(MedicationOrderDose::Quantity(_))
        ));
    }

    #[test]
    fn conflicting_medication_keys_are_rejected() {
        let err = serde_json::from_value::<MedicationOrder>(json!({
            "medicationCodeableConcept": {"text": "Amoxicillin"},
            "medicationReference": {"reference": "Medication/m1"}
        }))
        .unwrap_err();
        assert!(err.to_string().contains("conflicting choice fields"));
    }
}
