//! Version-neutral FHIR datatypes.
//!
//! Everything here has the same shape in R2 through R5. Datatypes with even
//! one field delta between releases (HumanName, Address, ContactPoint,
//! Attachment, Timing, Dosage, Narrative, Signature, Range, Ratio) live in
//! the per-version catalogs instead.
//!
//! There is no `Element` struct: every complex datatype carries the element
//! base (`id`, `extension`) as leading fields, and backbone structures add
//! `modifierExtension`. Each struct ends with a flattened `extra` map that
//! preserves unrecognized fields, including `_field` primitive companions,
//! verbatim across a round-trip.

pub mod extension;
pub mod types;

pub use extension::{Extension, ExtensionValue};
pub use types::*;
