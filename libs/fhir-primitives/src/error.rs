//! Error type for primitive literal parsing.

use thiserror::Error;

/// A primitive literal that does not match its FHIR grammar.
///
/// Each variant names the offending input so decode errors can surface it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("invalid decimal literal `{0}`")]
    Decimal(String),

    #[error("invalid integer literal `{0}`")]
    Integer(String),

    #[error("invalid base64Binary literal `{0}`")]
    Base64(String),

    #[error("invalid date literal `{0}`")]
    Date(String),

    #[error("invalid dateTime literal `{0}`")]
    DateTime(String),

    #[error("invalid time literal `{0}`")]
    Time(String),

    #[error("invalid instant literal `{0}`")]
    Instant(String),
}
