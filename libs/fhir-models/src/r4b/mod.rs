//! FHIR R4B (4.3.0) catalog.
//!
//! R4B left every resource transcribed here structurally identical to R4;
//! its changes landed in resources outside this set. The catalog still
//! stands on its own so version identity stays in the type system and the
//! two releases can diverge later without a breaking rearrangement.

pub mod administrative;
pub mod bundle;
pub mod clinical;
pub mod diagnostics;
pub mod documents;
pub mod medications;
pub mod resource;
pub mod types;
pub mod workflow;

pub use administrative::{Device, Location, Organization, Patient, Practitioner};
pub use bundle::{Bundle, BundleEntry, BundleType};
pub use clinical::{AllergyIntolerance, CarePlan, Condition, Immunization, Procedure};
pub use diagnostics::{DiagnosticReport, Observation, Specimen};
pub use documents::{Composition, DocumentReference};
pub use medications::{Medication, MedicationRequest};
pub use resource::{
    decode, decode_as, decode_value, encode, encode_as, encode_value, OperationOutcome, Resource,
};
pub use types::{
    Address, Attachment, ContactPoint, Dosage, HumanName, Narrative, Range, Ratio, Signature,
    Timing,
};
pub use workflow::{Communication, Consent, Encounter, QuestionnaireResponse, ResearchSubject};
