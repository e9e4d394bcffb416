use super::value::ValueKind;
use thiserror::Error;

/// Errors raised while building, encoding or decoding attributes.
///
/// Construction-time variants (`InvalidSubType`, `InvalidAddressFamily`,
/// `ValueTooLarge`, `KindMismatch`, `InvalidTag`, `TaggedIntegerRange`,
/// `InvalidValueText`) are caller errors.
/// The remaining variants describe malformed wire data and are expected
/// when decoding octets received from a peer.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AttributeError {
    /// Vendor sub-type 0 is reserved
    #[error("Invalid vendor sub-type: {0}")]
    InvalidSubType(u8),

    /// An IPv4 value was built from an address of another family
    #[error("Invalid address family: expected 4 octets, got {0}")]
    InvalidAddressFamily(usize),

    /// The encoded value does not fit in a single attribute
    #[error("Attribute value too long: {length} bytes (max {max})")]
    ValueTooLarge { length: usize, max: usize },

    /// The value does not match the kind declared for the attribute
    #[error("Expected {expected} value, got {found}")]
    KindMismatch { expected: ValueKind, found: ValueKind },

    /// Tunnel tags (RFC 2868) run from 1 to 31
    #[error("Invalid tag: {0} (expected 1-31)")]
    InvalidTag(u8),

    /// A tagged integer keeps only 24 bits for its value
    #[error("Tagged integer {0} does not fit in 24 bits")]
    TaggedIntegerRange(i32),

    /// Operator-supplied text could not be parsed as the declared kind
    #[error("Invalid {kind} value: {text:?}")]
    InvalidValueText { kind: ValueKind, text: String },

    /// The value octets cannot be decoded as the requested kind
    #[error("Malformed attribute: {0}")]
    MalformedAttribute(String),

    /// The outer attribute is not Vendor-Specific (26)
    #[error("Unexpected attribute type: {0} (expected 26)")]
    UnexpectedAttributeType(u8),

    /// A length octet disagrees with the data actually present
    #[error("Length mismatch: length field says {declared}, have {actual}")]
    LengthMismatch { declared: usize, actual: usize },

    /// Not enough octets for the mandatory header fields
    #[error("Truncated attribute: {length} bytes (min {min})")]
    Truncated { length: usize, min: usize },
}
