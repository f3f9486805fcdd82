//! Shared complex datatypes.

use ambra_primitives::{Canonical, Code, DateTime, Decimal, Id, Instant, PositiveInt, Uri};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::choice;
use crate::choice::ChoiceSlot;
use crate::common::extension::Extension;

/// A reference to a code defined by a terminology system.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Coding {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub extension: Option<Vec<Extension>>,

    /// Identity of the terminology system.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<Uri>,

    /// Version of the system, if relevant.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    /// Symbol in syntax defined by the system.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<Code>,

    /// Representation defined by the system.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display: Option<String>,

    /// Whether this coding was chosen directly by the user.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_selected: Option<bool>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A concept, identified by zero or more codings plus free text.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeableConcept {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub extension: Option<Vec<Extension>>,

    /// Codes defined by terminology systems.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coding: Option<Vec<Coding>>,

    /// Plain-text representation of the concept.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CodeableConcept {
    /// Concept with a single coding and no text.
    pub fn from_coding(coding: Coding) -> Self {
        CodeableConcept {
            coding: Some(vec![coding]),
            ..Default::default()
        }
    }

    /// Concept carrying only free text.
    pub fn from_text(text: impl Into<String>) -> Self {
        CodeableConcept {
            text: Some(text.into()),
            ..Default::default()
        }
    }
}

/// Purpose of an identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdentifierUse {
    Usual,
    Official,
    Temp,
    Secondary,
    Old,
    /// A code outside the published set, kept verbatim.
    #[serde(untagged)]
    Unrecognized(String),
}

/// A business identifier.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identifier {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub extension: Option<Vec<Extension>>,

    #[serde(rename = "use", skip_serializing_if = "Option::is_none")]
    pub r#use: Option<IdentifierUse>,

    /// Description of the identifier kind.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub r#type: Option<CodeableConcept>,

    /// The namespace for the identifier value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<Uri>,

    /// The value that is unique within the system.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,

    /// Time period when the identifier is or was valid.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub period: Option<Period>,

    /// Organization that issued the identifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigner: Option<Box<Reference>>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A time period defined by a start and end dateTime.
///
/// When both are present `start <= end` is expected but not enforced;
/// values are carried through verbatim.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Period {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub extension: Option<Vec<Extension>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<DateTime>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub end: Option<DateTime>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// How a quantity value should be understood.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum QuantityComparator {
    #[serde(rename = "<")]
    LessThan,
    #[serde(rename = "<=")]
    LessOrEqual,
    #[serde(rename = ">=")]
    GreaterOrEqual,
    #[serde(rename = ">")]
    GreaterThan,
    #[serde(untagged)]
    Unrecognized(String),
}

/// A measured or measurable amount.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quantity {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub extension: Option<Vec<Extension>>,

    /// Numerical value, with wire-faithful precision.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Decimal>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub comparator: Option<QuantityComparator>,

    /// Unit representation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,

    /// System that defines the coded unit form.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<Uri>,

    /// Coded form of the unit.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<Code>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A duration of time; same shape as [`Quantity`].
pub type Duration = Quantity;
/// An age of a person; same shape as [`Quantity`].
pub type Age = Quantity;
/// A count of discrete items; same shape as [`Quantity`].
pub type Count = Quantity;
/// A length; same shape as [`Quantity`].
pub type Distance = Quantity;

/// An amount of currency.
///
/// R2/R3 spell this as a Quantity profile; the dedicated `currency` field
/// arrived in R4. Older wire forms land in `extra` and round-trip intact.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Money {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub extension: Option<Vec<Extension>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Decimal>,

    /// ISO 4217 currency code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<Code>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A reference from one resource to another.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reference {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub extension: Option<Vec<Extension>>,

    /// Literal reference: relative, internal (`#id`) or absolute URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,

    /// Type the reference refers to, e.g. `Patient` (R4+).
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub r#type: Option<Uri>,

    /// Logical reference, when the literal reference is not known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identifier: Option<Box<Identifier>>,

    /// Text alternative for the resource.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Reference {
    /// Literal reference to `Type/id`.
    pub fn literal(reference: impl Into<String>) -> Self {
        Reference {
            reference: Some(reference.into()),
            ..Default::default()
        }
    }
}

choice! {
    /// `Annotation.author[x]`.
    pub enum AnnotationAuthor: "author" {
        Reference(Reference),
        String(String),
    }
}

/// A text note with attribution.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Annotation {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub extension: Option<Vec<Extension>>,

    #[serde(flatten)]
    pub author: ChoiceSlot<AnnotationAuthor>,

    /// When the annotation was made.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<DateTime>,

    /// The annotation text (markdown from R4 on).
    pub text: String,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A series of measurements taken by a device.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SampledData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub extension: Option<Vec<Extension>>,

    /// Zero value and units; required.
    pub origin: Quantity,

    /// Milliseconds between samples (renamed in R5; the R5 form is
    /// preserved through `extra`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub period: Option<Decimal>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub factor: Option<Decimal>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub lower_limit: Option<Decimal>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub upper_limit: Option<Decimal>,

    /// Number of sample points at each time point; required.
    pub dimensions: PositiveInt,

    /// The packed data stream, decoded as opaque text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Metadata about a resource instance.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Meta {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub extension: Option<Vec<Extension>>,

    /// Version-specific identifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version_id: Option<Id>,

    /// When the resource version last changed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<Instant>,

    /// Where the resource comes from (R4+).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<Uri>,

    /// Profiles this resource claims to conform to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile: Option<Vec<Canonical>>,

    /// Security labels applied to this resource.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub security: Option<Vec<Coding>>,

    /// Tags applied to this resource.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<Vec<Coding>>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn codeable_concept_round_trips() {
        let input = json!({
            "coding": [{
                "system": "http://terminology.hl7.org/CodeSystem/v3-MaritalStatus",
                "code": "M",
                "display": "Married"
            }],
            "text": "Married"
        });
        let concept: CodeableConcept = serde_json::from_value(input.clone()).unwrap();
        assert_eq!(concept.text.as_deref(), Some("Married"));
        assert_eq!(serde_json::to_value(&concept).unwrap(), input);
    }

    #[test]
    fn unknown_codes_are_stored_verbatim() {
        let identifier: Identifier =
            serde_json::from_value(json!({"use": "departmental", "value": "123"})).unwrap();
        assert_eq!(
            identifier.r#use,
            Some(IdentifierUse::Unrecognized("departmental".into()))
        );
        assert_eq!(
            serde_json::to_value(&identifier).unwrap(),
            json!({"use": "departmental", "value": "123"})
        );
    }

    #[test]
    fn quantity_keeps_decimal_form() {
        // Enter through text: a float literal would collapse 185.70 to 185.7
        // before the decoder ever sees it.
        let q: Quantity = serde_json::from_str(r#"{"value": 185.70, "unit": "cm"}"#).unwrap();
        assert_eq!(q.value.as_ref().unwrap().literal(), "185.70");
        assert_eq!(
            serde_json::to_string(&q).unwrap(),
            r#"{"value":185.70,"unit":"cm"}"#
        );
    }

    #[test]
    fn annotation_author_choice() {
        let note: Annotation = serde_json::from_value(json!({
            "authorString": "Dr. Adam Careful",
            "text": "stable"
        }))
        .unwrap();
        assert_eq!(
            note.author.get(),
            Some(&AnnotationAuthor::String("Dr. Adam Careful".into()))
        );
    }

    #[test]
    fn unknown_fields_are_preserved() {
        let input = json!({"system": "http://acme.org", "mysteryField": {"a": 1}});
        let coding: Coding = serde_json::from_value(input.clone()).unwrap();
        assert_eq!(serde_json::to_value(&coding).unwrap(), input);
    }
}
