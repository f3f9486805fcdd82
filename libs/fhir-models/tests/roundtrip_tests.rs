//! End-to-end decode/encode round-trips across the release catalogs.

use ambra_models::{r2, r3, r4, Error, ExtensionValue};
use ambra_primitives::{DateTime, Precision};
use serde_json::{json, Value};

/// A fully-populated R4 Patient survives a round-trip with every field under
/// the typed core and nothing lost.
#[test]
fn r4_patient_round_trips() {
    let input = json!({
        "resourceType": "Patient",
        "id": "example-patient-001",
        "active": true,
        "identifier": [{
            "use": "usual",
            "system": "http://hospital.example.org/mrn",
            "value": "12345"
        }],
        "name": [{
            "family": "Smith",
            "given": ["John", "David"]
        }],
        "gender": "male",
        "birthDate": "1985-03-15",
        "address": [{
            "line": ["456 Oak Avenue", "Apt 2B"],
            "city": "Springfield"
        }],
        "maritalStatus": {
            "coding": [{
                "system": "http://terminology.hl7.org/CodeSystem/v3-MaritalStatus",
                "code": "M"
            }]
        },
        "contact": [{
            "relationship": [{
                "coding": [{"system": "http://terminology.hl7.org/CodeSystem/v2-0131", "code": "C"}]
            }],
            "name": {"family": "Smith", "given": ["Jane"]}
        }],
        "communication": [{
            "language": {"coding": [{"system": "urn:ietf:bcp:47", "code": "en-US"}]},
            "preferred": true
        }]
    });

    let resource = r4::decode_value(input.clone()).unwrap();
    assert_eq!(resource.resource_type(), "Patient");
    assert_eq!(r4::encode_value(&resource).unwrap(), input);

    let r4::Resource::Patient(patient) = &resource else {
        panic!("expected a Patient");
    };
    assert_eq!(patient.id.as_deref(), Some("example-patient-001"));
    assert_eq!(patient.birth_date.as_ref().unwrap().to_string(), "1985-03-15");
    assert_eq!(
        patient.communication.as_ref().unwrap()[0].preferred,
        Some(true)
    );
}

/// Partial dateTime literals keep their precision and spelling.
#[test]
fn partial_datetimes_keep_precision() {
    let cases = [
        ("2016", Precision::Year),
        ("2016-07", Precision::Month),
        ("2016-07-15", Precision::Day),
        ("2016-07-15T10:20:30Z", Precision::Second),
    ];
    for (literal, precision) in cases {
        let parsed: DateTime = literal.parse().unwrap();
        assert_eq!(parsed.precision(), precision, "precision of {literal}");
        assert_eq!(parsed.to_string(), literal);
    }
}

/// Two variants of one choice element is a decode error naming the element.
#[test]
fn observation_value_conflict_is_rejected() {
    let err = r4::decode_value(json!({
        "resourceType": "Observation",
        "status": "final",
        "code": {"coding": [{"system": "http://loinc.org", "code": "8302-2"}]},
        "valueQuantity": {"value": 185.7, "unit": "cm"},
        "valueString": "tall"
    }))
    .unwrap_err();

    match err {
        Error::ChoiceConflict { path, message } => {
            assert_eq!(path, "Observation.value");
            assert!(message.contains("valueQuantity"), "message: {message}");
            assert!(message.contains("valueString"), "message: {message}");
        }
        other => panic!("expected ChoiceConflict, got {other:?}"),
    }
}

/// A searchset Bundle dispatches each entry to its concrete type and
/// reproduces the envelope.
#[test]
fn searchset_bundle_round_trips() {
    let input = json!({
        "resourceType": "Bundle",
        "type": "searchset",
        "total": 2,
        "link": [{"relation": "self", "url": "http://example.org/fhir/Patient?name=smith"}],
        "entry": [
            {
                "fullUrl": "http://example.org/fhir/Patient/p1",
                "resource": {"resourceType": "Patient", "id": "p1"},
                "search": {"mode": "match"}
            },
            {
                "fullUrl": "http://example.org/fhir/Observation/o1",
                "resource": {
                    "resourceType": "Observation",
                    "id": "o1",
                    "status": "final",
                    "code": {"text": "Body height"}
                },
                "search": {"mode": "include"}
            }
        ]
    });

    let resource = r4::decode_value(input.clone()).unwrap();
    let r4::Resource::Bundle(bundle) = &resource else {
        panic!("expected a Bundle");
    };
    let entries = bundle.entry.as_ref().unwrap();
    let types: Vec<_> = entries
        .iter()
        .map(|entry| entry.resource.as_ref().unwrap().resource_type())
        .collect();
    assert_eq!(types, ["Patient", "Observation"]);
    assert_eq!(r4::encode_value(&resource).unwrap(), input);
}

/// The DSTU2 family-name array does not leak into later releases.
#[test]
fn family_name_shape_separates_r2_from_r3() {
    let input = json!({
        "resourceType": "Patient",
        "name": [{"family": ["van", "Dijk"]}]
    });

    let resource = r2::decode_value(input.clone()).unwrap();
    let r2::Resource::Patient(patient) = &resource else {
        panic!("expected a Patient");
    };
    let family = patient.name.as_ref().unwrap()[0].family.as_ref().unwrap();
    assert_eq!(family, &["van".to_string(), "Dijk".to_string()]);

    let err = r3::decode_value(input).unwrap_err();
    match err {
        Error::Schema { path, message } => {
            assert!(path.starts_with("Patient"), "path: {path}");
            assert!(message.contains("invalid type"), "message: {message}");
        }
        other => panic!("expected Schema, got {other:?}"),
    }
}

/// Extension order, URLs and value variants are stable across a round-trip.
#[test]
fn extensions_round_trip_in_order() {
    let input = json!({
        "resourceType": "Patient",
        "extension": [
            {
                "url": "http://example.org/fhir/ext/nickname",
                "valueString": "Johnny"
            },
            {
                "url": "http://example.org/fhir/ext/confirmed",
                "valueBoolean": false
            },
            {
                "url": "http://example.org/fhir/ext/tribe",
                "valueCodeableConcept": {"coding": [{"code": "x"}], "text": "example"}
            }
        ]
    });

    let resource = r4::decode_value(input.clone()).unwrap();
    let r4::Resource::Patient(patient) = &resource else {
        panic!("expected a Patient");
    };
    let extensions = patient.extension.as_ref().unwrap();
    assert!(matches!(
        extensions[0].value.get(),
        Some(ExtensionValue::String(_))
    ));
    assert!(matches!(
        extensions[1].value.get(),
        Some(ExtensionValue::Boolean(false))
    ));
    assert!(matches!(
        extensions[2].value.get(),
        Some(ExtensionValue::CodeableConcept(_))
    ));
    assert_eq!(r4::encode_value(&resource).unwrap(), input);
}

/// Decimal literals come back character-identical, trailing zeros included.
#[test]
fn decimal_literals_are_wire_faithful() {
    let input = br#"{"resourceType": "Observation", "status": "final", "code": {"text": "t"}, "valueQuantity": {"value": 185.70, "unit": "cm"}}"#;
    let resource = r4::decode(input).unwrap();
    let encoded = r4::encode(&resource).unwrap();
    let text = String::from_utf8(encoded).unwrap();
    assert!(text.contains("185.70"), "encoded: {text}");

    let exponent = br#"{"resourceType": "Observation", "status": "final", "code": {"text": "t"}, "valueQuantity": {"value": 1.0e3}}"#;
    let resource = r4::decode(exponent).unwrap();
    let text = String::from_utf8(r4::encode(&resource).unwrap()).unwrap();
    assert!(text.contains("1.0e3"), "encoded: {text}");
}

/// Fields outside the transcribed core survive through the carrier map,
/// primitive companions included.
#[test]
fn unrecognized_fields_are_preserved() {
    let input = json!({
        "resourceType": "Patient",
        "id": "p1",
        "birthDate": "1985-03-15",
        "_birthDate": {
            "extension": [{
                "url": "http://hl7.org/fhir/StructureDefinition/patient-birthTime",
                "valueDateTime": "1985-03-15T14:30:00Z"
            }]
        }
    });
    let resource = r4::decode_value(input.clone()).unwrap();
    assert_eq!(r4::encode_value(&resource).unwrap(), input);
}

/// Contained resources dispatch through the same closed registry.
#[test]
fn contained_resources_use_the_registry() {
    let err = r4::decode_value(json!({
        "resourceType": "Observation",
        "status": "final",
        "code": {"text": "t"},
        "contained": [{"resourceType": "Basic", "id": "b1"}]
    }))
    .unwrap_err();
    match err {
        Error::UnknownResourceType { resource_type, .. } => {
            assert_eq!(resource_type, "Basic");
        }
        other => panic!("expected UnknownResourceType, got {other:?}"),
    }
}
