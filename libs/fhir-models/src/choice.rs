//! Choice elements (`value[x]`, `onset[x]`, `effective[x]`, …).
//!
//! A FHIR choice element `X` with permitted types `{T1, T2, …}` appears on
//! the wire as sibling fields `XT1, XT2, …` of which at most one may be
//! present. [`ChoiceSlot`] models one such element: it is embedded with
//! `#[serde(flatten)]`, claims only its own declared wire keys (so several
//! slots coexist in one struct), fails decode when two variants are present,
//! and emits exactly one key on encode.
//!
//! The [`choice!`] macro generates the per-element enums: the variant
//! identifier doubles as the title-case type suffix, so
//! `Quantity(Quantity)` under prefix `"value"` is the wire key
//! `valueQuantity`.

use std::fmt;
use std::marker::PhantomData;

use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

/// A choice element's variant set.
///
/// Implemented by the enums the [`choice!`] macro generates.
pub trait Choice: Sized {
    /// The element name (the `X` of `X[x]`).
    const ELEMENT: &'static str;

    /// Every permitted wire key, in declaration order.
    const KEYS: &'static [&'static str];

    /// Decode one wire entry into the matching variant.
    fn from_entry(key: &str, value: Value) -> Result<Self, String>;

    /// The wire key of the populated variant.
    fn wire_key(&self) -> &'static str;

    /// Write the populated variant as its single wire entry.
    fn serialize_entry<M: SerializeMap>(&self, map: &mut M) -> Result<(), M::Error>;
}

/// An optional choice element, embedded with `#[serde(flatten)]`.
#[derive(Debug, Clone, PartialEq)]
pub struct ChoiceSlot<T>(pub Option<T>);

impl<T> ChoiceSlot<T> {
    pub fn none() -> Self {
        ChoiceSlot(None)
    }

    pub fn some(value: T) -> Self {
        ChoiceSlot(Some(value))
    }

    pub fn get(&self) -> Option<&T> {
        self.0.as_ref()
    }

    pub fn is_some(&self) -> bool {
        self.0.is_some()
    }

    pub fn is_none(&self) -> bool {
        self.0.is_none()
    }
}

impl<T> Default for ChoiceSlot<T> {
    fn default() -> Self {
        ChoiceSlot(None)
    }
}

impl<T> From<T> for ChoiceSlot<T> {
    fn from(value: T) -> Self {
        ChoiceSlot(Some(value))
    }
}

impl<T> From<Option<T>> for ChoiceSlot<T> {
    fn from(value: Option<T>) -> Self {
        ChoiceSlot(value)
    }
}

impl<'de, T: Choice> Deserialize<'de> for ChoiceSlot<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct SlotVisitor<T>(PhantomData<T>);

        impl<'de, T: Choice> Visitor<'de> for SlotVisitor<T> {
            type Value = ChoiceSlot<T>;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "at most one of {:?}", T::KEYS)
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut found: Option<(String, Value)> = None;
                while let Some(key) = map.next_key::<String>()? {
                    let value: Value = map.next_value()?;
                    // deserialize_struct only yields our declared keys, but a
                    // plain map source may hand us anything.
                    if !T::KEYS.contains(&key.as_str()) {
                        continue;
                    }
                    if let Some((first, _)) = &found {
                        return Err(de::Error::custom(format!(
                            "conflicting choice fields `{first}` and `{key}` for element `{}`",
                            T::ELEMENT
                        )));
                    }
                    found = Some((key, value));
                }
                match found {
                    None => Ok(ChoiceSlot(None)),
                    Some((key, value)) => T::from_entry(&key, value)
                        .map(ChoiceSlot::some)
                        .map_err(de::Error::custom),
                }
            }
        }

        // Claim only this slot's keys from the surrounding flattened content.
        deserializer.deserialize_struct("ChoiceSlot", T::KEYS, SlotVisitor(PhantomData))
    }
}

impl<T: Choice> Serialize for ChoiceSlot<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(usize::from(self.0.is_some())))?;
        if let Some(value) = &self.0 {
            value.serialize_entry(&mut map)?;
        }
        map.end()
    }
}

/// Defines a choice-element enum and its [`Choice`] implementation.
///
/// ```ignore
/// choice! {
///     /// Observation.value[x]
///     pub enum ObservationValue: "value" {
///         Quantity(Quantity),
///         String(String),
///     }
/// }
/// ```
#[macro_export]
macro_rules! choice {
    (
        $(#[$attr:meta])*
        $vis:vis enum $name:ident : $prefix:literal {
            $( $(#[$vattr:meta])* $variant:ident($ty:ty) ),+ $(,)?
        }
    ) => {
        $(#[$attr])*
        #[derive(Debug, Clone, PartialEq)]
        $vis enum $name {
            $( $(#[$vattr])* $variant($ty), )+
        }

        impl $crate::choice::Choice for $name {
            const ELEMENT: &'static str = $prefix;

            const KEYS: &'static [&'static str] =
                &[$(concat!($prefix, stringify!($variant))),+];

            fn from_entry(
                key: &str,
                value: ::serde_json::Value,
            ) -> ::std::result::Result<Self, ::std::string::String> {
                match key {
                    $(
                        concat!($prefix, stringify!($variant)) => {
                            ::serde_json::from_value::<$ty>(value)
                                .map(Self::$variant)
                                .map_err(|e| ::std::format!("`{}`: {}", key, e))
                        }
                    )+
                    other => ::std::result::Result::Err(::std::format!(
                        "unexpected choice field `{}`",
                        other
                    )),
                }
            }

            fn wire_key(&self) -> &'static str {
                match self {
                    $( Self::$variant(_) => concat!($prefix, stringify!($variant)), )+
                }
            }

            fn serialize_entry<M: ::serde::ser::SerializeMap>(
                &self,
                map: &mut M,
            ) -> ::std::result::Result<(), M::Error> {
                match self {
                    $(
                        Self::$variant(value) => map.serialize_entry(
                            concat!($prefix, stringify!($variant)),
                            value,
                        ),
                    )+
                }
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    choice! {
        enum TestValue: "value" {
            String(String),
            Boolean(bool),
        }
    }

    choice! {
        enum TestOnset: "onset" {
            String(String),
        }
    }

    #[derive(Debug, PartialEq, serde::Serialize, serde::Deserialize)]
    struct Host {
        #[serde(skip_serializing_if = "Option::is_none")]
        id: Option<String>,
        #[serde(flatten)]
        value: ChoiceSlot<TestValue>,
        #[serde(flatten)]
        onset: ChoiceSlot<TestOnset>,
    }

    #[test]
    fn decodes_a_single_variant() {
        let host: Host =
            serde_json::from_value(json!({"id": "x", "valueBoolean": true})).unwrap();
        assert_eq!(host.value.get(), Some(&TestValue::Boolean(true)));
        assert!(host.onset.is_none());
    }

    #[test]
    fn two_slots_coexist() {
        let host: Host =
            serde_json::from_value(json!({"valueString": "a", "onsetString": "b"})).unwrap();
        assert_eq!(host.value.get(), Some(&TestValue::String("a".into())));
        assert_eq!(host.onset.get(), Some(&TestOnset::String("b".into())));
    }

    #[test]
    fn conflicting_variants_fail() {
        let err = serde_json::from_value::<Host>(
            json!({"valueString": "a", "valueBoolean": true}),
        )
        .unwrap_err();
        assert!(err.to_string().contains("conflicting choice fields"));
    }

    #[test]
    fn absent_slot_emits_nothing() {
        let host = Host {
            id: None,
            value: ChoiceSlot::some(TestValue::String("a".into())),
            onset: ChoiceSlot::none(),
        };
        let value = serde_json::to_value(&host).unwrap();
        assert_eq!(value, json!({"valueString": "a"}));
    }
}
