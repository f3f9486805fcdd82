//! FHIR primitive value types.
//!
//! This crate provides the scalar layer shared by every FHIR release:
//!
//! - [`Decimal`]: wire-faithful decimals. The JSON literal (trailing zeros,
//!   exponent form) survives a decode/encode round-trip character-identically.
//! - [`Integer`], [`UnsignedInt`], [`PositiveInt`]: bounded integer kinds.
//! - [`Date`], [`DateTime`], [`Time`], [`Instant`]: partial-precision
//!   temporals. A FHIR `dateTime` may be `2016`, `2016-07`, `2016-07-15` or a
//!   full RFC 3339 timestamp; the precision travels with the value and the
//!   serialized form matches the parsed one.
//! - [`Base64Binary`]: base64 content, validated on decode.
//!
//! String-shaped primitives (`code`, `uri`, `id`, …) are plain [`String`]
//! aliases; their constraints are profile-level concerns, not wire-level ones.
//!
//! All types serialize as the FHIR JSON wire form and are `serde`-compatible
//! inside flattened or internally tagged containers.

pub mod binary;
pub mod date;
pub mod datetime;
pub mod decimal;
pub mod error;
pub mod instant;
pub mod integer;
pub mod time;

pub use binary::Base64Binary;
pub use date::{Date, DatePrecision};
pub use datetime::{DateTime, Offset, Precision};
pub use decimal::Decimal;
pub use error::ParseError;
pub use instant::Instant;
pub use integer::{Integer, PositiveInt, UnsignedInt};
pub use time::Time;

/// A FHIR `code`: a string taken from a controlled set.
pub type Code = String;
/// A FHIR `id`: a logical identifier fragment.
pub type Id = String;
/// A FHIR `uri`.
pub type Uri = String;
/// A FHIR `url` (R4+).
pub type Url = String;
/// A FHIR `canonical` reference (R4+).
pub type Canonical = String;
/// A FHIR `oid` (`urn:oid:...`).
pub type Oid = String;
/// A FHIR `uuid` (`urn:uuid:...`).
pub type Uuid = String;
/// A FHIR `markdown` string.
pub type Markdown = String;
/// A FHIR `xhtml` fragment, as carried by `Narrative.div`.
pub type Xhtml = String;
