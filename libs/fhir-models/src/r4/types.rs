//! R4 datatypes whose shape differs between releases.

use ambra_primitives::{
    Base64Binary, Code, DateTime, Decimal, Instant, Integer, PositiveInt, Time, UnsignedInt, Url,
    Xhtml,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::choice;
use crate::choice::ChoiceSlot;
use crate::common::{CodeableConcept, Coding, Extension, Period, Quantity, Reference};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NarrativeStatus {
    Generated,
    Extensions,
    Additional,
    Empty,
    #[serde(untagged)]
    Unrecognized(String),
}

/// Human-readable summary of a resource.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Narrative {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub extension: Option<Vec<Extension>>,

    pub status: NarrativeStatus,

    /// Limited XHTML content.
    pub div: Xhtml,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdministrativeGender {
    Male,
    Female,
    Other,
    Unknown,
    #[serde(untagged)]
    Unrecognized(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NameUse {
    Usual,
    Official,
    Temp,
    Nickname,
    Anonymous,
    Old,
    Maiden,
    #[serde(untagged)]
    Unrecognized(String),
}

/// A name of a person. Since R3 `family` is a single string; `given`,
/// `prefix` and `suffix` stay ordered arrays.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HumanName {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub extension: Option<Vec<Extension>>,

    #[serde(rename = "use", skip_serializing_if = "Option::is_none")]
    pub r#use: Option<NameUse>,

    /// Full text representation of the name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    /// Family name, often called surname.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub family: Option<String>,

    /// Given names, in order of appearance.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub given: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub prefix: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub suffix: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub period: Option<Period>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AddressUse {
    Home,
    Work,
    Temp,
    Old,
    /// R4 addition.
    Billing,
    #[serde(untagged)]
    Unrecognized(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AddressType {
    Postal,
    Physical,
    Both,
    #[serde(untagged)]
    Unrecognized(String),
}

/// A postal address.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub extension: Option<Vec<Extension>>,

    #[serde(rename = "use", skip_serializing_if = "Option::is_none")]
    pub r#use: Option<AddressUse>,

    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub r#type: Option<AddressType>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    /// Street name, number, direction, PO box, etc.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub district: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub period: Option<Period>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContactPointSystem {
    Phone,
    Fax,
    Email,
    Pager,
    Url,
    Sms,
    Other,
    #[serde(untagged)]
    Unrecognized(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContactPointUse {
    Home,
    Work,
    Temp,
    Old,
    Mobile,
    #[serde(untagged)]
    Unrecognized(String),
}

/// Technology-mediated contact details.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactPoint {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub extension: Option<Vec<Extension>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<ContactPointSystem>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,

    #[serde(rename = "use", skip_serializing_if = "Option::is_none")]
    pub r#use: Option<ContactPointUse>,

    /// Preference order, lower is higher.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rank: Option<PositiveInt>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub period: Option<Period>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Content in a format defined elsewhere.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attachment {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub extension: Option<Vec<Extension>>,

    /// Mime type, with charset where applicable.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_type: Option<Code>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<Code>,

    /// Inline content.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Base64Binary>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<Url>,

    /// Size of the content in bytes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<UnsignedInt>,

    /// SHA-1 hash of the content.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hash: Option<Base64Binary>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub creation: Option<DateTime>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A set of ordered quantities defined by a low and high limit.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Range {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub extension: Option<Vec<Extension>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub low: Option<Quantity>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub high: Option<Quantity>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A relationship between two Quantity values.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ratio {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub extension: Option<Vec<Extension>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub numerator: Option<Quantity>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub denominator: Option<Quantity>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A digital signature along with supporting context.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Signature {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub extension: Option<Vec<Extension>>,

    /// Indication of the reason the entity signed.
    #[serde(rename = "type")]
    pub r#type: Vec<Coding>,

    /// When the signature was created.
    pub when: Instant,

    /// Who signed.
    pub who: Reference,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub on_behalf_of: Option<Reference>,

    /// Mime type of the target document.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_format: Option<Code>,

    /// Mime type of the signature itself.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sig_format: Option<Code>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Base64Binary>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

choice! {
    /// `Timing.repeat.bounds[x]`.
    pub enum TimingBounds: "bounds" {
        Duration(Quantity),
        Range(Range),
        Period(Period),
    }
}

/// The repeat portion of a timing schedule.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimingRepeat {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub extension: Option<Vec<Extension>>,

    #[serde(flatten)]
    pub bounds: ChoiceSlot<TimingBounds>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<PositiveInt>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub count_max: Option<PositiveInt>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<Decimal>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_max: Option<Decimal>,

    /// UCUM time unit for `duration`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_unit: Option<Code>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub frequency: Option<PositiveInt>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub frequency_max: Option<PositiveInt>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub period: Option<Decimal>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub period_max: Option<Decimal>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub period_unit: Option<Code>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub day_of_week: Option<Vec<Code>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_of_day: Option<Vec<Time>>,

    /// Event timing codes (`MORN`, `AC`, `HS`, ...).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub when: Option<Vec<Code>>,

    /// Minutes from the `when` event.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<UnsignedInt>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A timing schedule: specific events, a repeat pattern, or a code.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Timing {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub extension: Option<Vec<Extension>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub modifier_extension: Option<Vec<Extension>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub event: Option<Vec<DateTime>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub repeat: Option<TimingRepeat>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<CodeableConcept>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

choice! {
    /// `Dosage.asNeeded[x]`.
    pub enum DosageAsNeeded: "asNeeded" {
        Boolean(bool),
        CodeableConcept(CodeableConcept),
    }
}

choice! {
    /// `Dosage.doseAndRate.dose[x]`.
    pub enum DosageDose: "dose" {
        Range(Range),
        Quantity(Quantity),
    }
}

choice! {
    /// `Dosage.doseAndRate.rate[x]`.
    pub enum DosageRate: "rate" {
        Ratio(Ratio),
        Range(Range),
        Quantity(Quantity),
    }
}

/// Amount of medication per dose, R4 style: dose and rate pairs grouped
/// under `doseAndRate` (R3 kept them directly on the dosage).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DosageDoseAndRate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub extension: Option<Vec<Extension>>,

    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub r#type: Option<CodeableConcept>,

    #[serde(flatten)]
    pub dose: ChoiceSlot<DosageDose>,

    #[serde(flatten)]
    pub rate: ChoiceSlot<DosageRate>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// How a medication should be taken.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dosage {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub extension: Option<Vec<Extension>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub modifier_extension: Option<Vec<Extension>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub sequence: Option<Integer>,

    /// Free text dosage instructions.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_instruction: Option<Vec<CodeableConcept>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub patient_instruction: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub timing: Option<Timing>,

    #[serde(flatten)]
    pub as_needed: ChoiceSlot<DosageAsNeeded>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub site: Option<CodeableConcept>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub route: Option<CodeableConcept>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub method: Option<CodeableConcept>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub dose_and_rate: Option<Vec<DosageDoseAndRate>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_dose_per_period: Option<Ratio>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_dose_per_administration: Option<Quantity>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_dose_per_lifetime: Option<Quantity>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn human_name_family_is_single() {
        let name: HumanName = serde_json::from_value(json!({
            "use": "official",
            "family": "Chalmers",
            "given": ["Peter", "James"]
        }))
        .unwrap();
        assert_eq!(name.family.as_deref(), Some("Chalmers"));

        let array_form = json!({"family": ["van", "Dijk"]});
        assert!(serde_json::from_value::<HumanName>(array_form).is_err());
    }

    #[test]
    fn timing_bounds_choice_round_trips() {
        let input = json!({
            "repeat": {
                "boundsPeriod": {"start": "2020-01-01"},
                "frequency": 3,
                "period": 1,
                "periodUnit": "d"
            }
        });
        let timing: Timing = serde_json::from_value(input.clone()).unwrap();
        assert!(matches!(
            timing.repeat.as_ref().unwrap().bounds.get(),
            Some(TimingBounds::Period(_))
        ));
        assert_eq!(serde_json::to_value(&timing).unwrap(), input);
    }

    #[test]
    fn dosage_dose_and_rate() {
        let dosage: Dosage = serde_json::from_value(json!({
            "text": "500mg twice daily",
            "asNeededBoolean": false,
            "doseAndRate": [{
                "doseQuantity": {"value": 500, "unit": "mg"}
            }]
        }))
        .unwrap();
        assert!(matches!(
            dosage.as_needed.get(),
            Some(DosageAsNeeded::Boolean(false))
        ));
        assert!(matches!(
            dosage.dose_and_rate.as_ref().unwrap()[0].dose.get(),
            Some(DosageDose::Quantity(_))
        ));
    }
}
