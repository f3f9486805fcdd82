//! Extensions and their `value[x]` choice.

use ambra_primitives::{
    Base64Binary, Canonical, Code, Date, DateTime, Decimal, Id, Instant, Integer, Markdown, Oid,
    PositiveInt, Time, UnsignedInt, Uri, Url, Uuid,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::choice;
use crate::choice::ChoiceSlot;
use crate::common::types::{
    Annotation, CodeableConcept, Coding, Identifier, Meta, Money, Period, Quantity, Reference,
    SampledData,
};

choice! {
    /// `Extension.value[x]`, restricted to the primitives and the
    /// version-neutral complex types.
    ///
    /// Values of version-shaped types (Attachment, HumanName, Address, …)
    /// are not transcribed; they ride through the extension's `extra` map
    /// unaltered.
    pub enum ExtensionValue: "value" {
        Base64Binary(Base64Binary),
        Boolean(bool),
        Canonical(Canonical),
        Code(Code),
        Date(Date),
        DateTime(DateTime),
        Decimal(Decimal),
        Id(Id),
        Instant(Instant),
        Integer(Integer),
        Markdown(Markdown),
        Oid(Oid),
        PositiveInt(PositiveInt),
        String(String),
        Time(Time),
        UnsignedInt(UnsignedInt),
        Uri(Uri),
        Url(Url),
        Uuid(Uuid),
        Annotation(Annotation),
        CodeableConcept(CodeableConcept),
        Coding(Coding),
        Identifier(Identifier),
        Money(Money),
        Period(Period),
        Quantity(Quantity),
        Reference(Reference),
        SampledData(SampledData),
        Meta(Meta),
    }
}

/// Additional content defined by implementations.
///
/// An extension carries a value, nested extensions, or (for data-absent
/// patterns) neither; it never carries both.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Extension {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Source of the definition for the extension.
    pub url: String,

    /// Nested extensions, for complex extensions.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extension: Option<Vec<Extension>>,

    #[serde(flatten)]
    pub value: ChoiceSlot<ExtensionValue>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Extension {
    pub fn new(url: impl Into<String>, value: ExtensionValue) -> Self {
        Extension {
            id: None,
            url: url.into(),
            extension: None,
            value: ChoiceSlot::some(value),
            extra: Map::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn primitive_value_round_trips() {
        let input = json!({
            "url": "http://hl7.org/fhir/StructureDefinition/patient-birthTime",
            "valueDateTime": "1974-12-25T14:35:45-05:00"
        });
        let ext: Extension = serde_json::from_value(input.clone()).unwrap();
        assert!(matches!(ext.value.get(), Some(ExtensionValue::DateTime(_))));
        assert_eq!(serde_json::to_value(&ext).unwrap(), input);
    }

    #[test]
    fn nested_extensions_round_trip() {
        let input = json!({
            "url": "http://hl7.org/fhir/us/core/StructureDefinition/us-core-race",
            "extension": [
                {
                    "url": "ombCategory",
                    "valueCoding": {
                        "system": "urn:oid:2.16.840.1.113883.6.238",
                        "code": "2106-3"
                    }
                },
                {"url": "text", "valueString": "White"}
            ]
        });
        let ext: Extension = serde_json::from_value(input.clone()).unwrap();
        assert_eq!(ext.extension.as_ref().unwrap().len(), 2);
        assert_eq!(serde_json::to_value(&ext).unwrap(), input);
    }

    #[test]
    fn conflicting_values_fail() {
        let err = serde_json::from_value::<Extension>(json!({
            "url": "http://example.org/x",
            "valueString": "a",
            "valueBoolean": true
        }))
        .unwrap_err();
        assert!(err.to_string().contains("conflicting choice fields"));
    }

    #[test]
    fn untranscribed_value_types_ride_through() {
        let input = json!({
            "url": "http://example.org/photo",
            "valueAttachment": {"contentType": "image/png", "data": "aGk="}
        });
        let ext: Extension = serde_json::from_value(input.clone()).unwrap();
        assert!(ext.value.is_none());
        assert!(ext.extra.contains_key("valueAttachment"));
        assert_eq!(serde_json::to_value(&ext).unwrap(), input);
    }
}
