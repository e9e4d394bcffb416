use crate::attributes::AttributeError;
use std::io;
use thiserror::Error;

/// Errors raised while loading vendor dictionaries or using them to build
/// and describe vendor attributes.
///
/// Parse errors carry the 1-based line number of the offending directive.
#[derive(Error, Debug)]
pub enum DictionaryError {
    #[error("line {line}: {directive} is missing its {field}")]
    MissingField {
        line: usize,
        directive: &'static str,
        field: &'static str,
    },

    #[error("line {line}: invalid number {text:?}")]
    InvalidNumber { line: usize, text: String },

    #[error("line {line}: attribute {name} uses reserved code 0")]
    ReservedCode { line: usize, name: String },

    #[error("line {line}: unknown vendor {name}")]
    UnknownVendor { line: usize, name: String },

    #[error("line {line}: VALUE refers to unknown attribute {name}")]
    UnknownAttribute { line: usize, name: String },

    #[error("line {line}: VALUE {value} given for non-integer attribute {attribute}")]
    ValueForNonInteger {
        line: usize,
        attribute: String,
        value: String,
    },

    #[error("line {line}: duplicate attribute {name} (code {code})")]
    DuplicateAttribute { line: usize, name: String, code: u8 },

    #[error("line {line}: vendor {name} ({vendor_id}) conflicts with an existing vendor")]
    DuplicateVendor {
        line: usize,
        name: String,
        vendor_id: u32,
    },

    #[error("line {line}: ATTRIBUTE {name} outside a BEGIN-VENDOR block and without a vendor field")]
    OutsideVendorBlock { line: usize, name: String },

    #[error("line {line}: vendor {vendor} uses unsupported {format}")]
    UnsupportedFormat {
        line: usize,
        vendor: String,
        format: String,
    },

    #[error("line {line}: END-VENDOR {found} does not close BEGIN-VENDOR {expected}")]
    MismatchedEndVendor {
        line: usize,
        expected: String,
        found: String,
    },

    #[error("line {line}: BEGIN-VENDOR {name} is never closed")]
    UnterminatedVendorBlock { line: usize, name: String },

    #[error("{file}: {source}")]
    File {
        file: String,
        #[source]
        source: Box<DictionaryError>,
    },

    #[error("Failed to read dictionary {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("Unknown vendor: {0}")]
    VendorNotFound(String),

    #[error("Vendor {vendor} has no attribute {attribute}")]
    AttributeNotFound { vendor: String, attribute: String },

    #[error("Attribute {attribute} does not take a tag")]
    UnexpectedTag { attribute: String },

    #[error("Invalid tag in {text:?}")]
    InvalidTagText { text: String },

    #[error("Attribute belongs to vendor {found}, not {expected}")]
    VendorMismatch { expected: u32, found: u32 },

    #[error(transparent)]
    Attribute(#[from] AttributeError),
}

impl DictionaryError {
    /// Line number of a parse error, if the error points at one
    pub fn line(&self) -> Option<usize> {
        match self {
            DictionaryError::MissingField { line, .. }
            | DictionaryError::InvalidNumber { line, .. }
            | DictionaryError::ReservedCode { line, .. }
            | DictionaryError::UnknownVendor { line, .. }
            | DictionaryError::UnknownAttribute { line, .. }
            | DictionaryError::ValueForNonInteger { line, .. }
            | DictionaryError::DuplicateAttribute { line, .. }
            | DictionaryError::DuplicateVendor { line, .. }
            | DictionaryError::OutsideVendorBlock { line, .. }
            | DictionaryError::UnsupportedFormat { line, .. }
            | DictionaryError::MismatchedEndVendor { line, .. }
            | DictionaryError::UnterminatedVendorBlock { line, .. } => Some(*line),
            DictionaryError::File { source, .. } => source.line(),
            _ => None,
        }
    }
}
