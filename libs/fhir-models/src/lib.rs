//! Strongly-typed FHIR resources and datatypes, one catalog per release.
//!
//! Each supported release (R2 1.0.2, R3 3.0.2, R4 4.0.1, R4B 4.3.0,
//! R5 5.0.0) gets its own module with its own resource structs, code enums
//! and a closed [`Resource`](r4::Resource) registry dispatching on
//! `resourceType`. Types whose shape never changed across releases live in
//! [`common`]; everything with even one field delta is transcribed per
//! version, so R2's `Patient.name[].family` is a scalar while R3's is a
//! list, and the compiler keeps the two apart.
//!
//! Decoding is strict about structure and permissive about content: nulls,
//! missing required fields, choice conflicts and unknown resource types are
//! errors, while fields beyond the transcribed core ride through a flattened
//! carrier map and re-emit verbatim on encode.
//!
//! ```no_run
//! use ambra_models::r4;
//!
//! # fn main() -> ambra_models::Result<()> {
//! let bytes = br#"{"resourceType": "Patient", "id": "example"}"#;
//! let resource = r4::decode(bytes)?;
//! assert_eq!(resource.resource_type(), "Patient");
//! let roundtrip = r4::encode(&resource)?;
//! # Ok(())
//! # }
//! ```

pub mod choice;
pub mod common;
pub mod error;
pub mod json;

pub mod r2;
pub mod r3;
pub mod r4;
pub mod r4b;
pub mod r5;

pub use choice::{Choice, ChoiceSlot};
pub use common::{Extension, ExtensionValue};
pub use error::{Error, Result};
pub use json::TypedResource;
