//! Dictionary-driven attribute validation
//!
//! Checks vendor attributes against the kinds and enumerations declared in
//! a [`Dictionary`], and standard attributes against their RFC kinds.
//!
//! ## Validation Modes
//!
//! - **Strict Mode** (default): rejects
//!   - values that do not decode as the declared kind
//!   - vendors and vendor sub-types missing from the dictionary
//!   - integers outside an attribute's `VALUE` enumeration
//!
//! - **Lenient Mode**: only rejects values that do not decode as the
//!   declared kind. Unknown vendors, sub-types and unlisted enumeration
//!   values pass for compatibility with newer equipment.

use crate::attributes::{Attribute, AttributeError, AttributeType, AttributeValue, VendorSpecific};
use crate::dictionary::Dictionary;
use crate::packet::Packet;
use thiserror::Error;

/// Validation mode for vendor attributes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValidationMode {
    /// Lenient validation - only enforces wire-level decodability.
    Lenient,
    /// Strict validation - everything must be known to the dictionary.
    #[default]
    Strict,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Malformed Vendor-Specific attribute: {0}")]
    Malformed(#[from] AttributeError),

    #[error("Unknown vendor: {0}")]
    UnknownVendor(u32),

    #[error("Vendor {vendor} has no attribute with sub-type {sub_type}")]
    UnknownAttribute { vendor: String, sub_type: u8 },

    #[error("{attribute}: {source}")]
    InvalidValue {
        attribute: String,
        source: AttributeError,
    },

    #[error("{attribute}: {value} is not a listed value")]
    UnlistedValue { attribute: String, value: i32 },
}

/// Validate one vendor attribute against the dictionary
pub fn validate_vendor_attribute(
    dictionary: &Dictionary,
    vsa: &VendorSpecific,
    mode: ValidationMode,
) -> Result<(), ValidationError> {
    let Some(vendor) = dictionary.vendor(vsa.vendor_id()) else {
        return match mode {
            ValidationMode::Strict => Err(ValidationError::UnknownVendor(vsa.vendor_id())),
            ValidationMode::Lenient => Ok(()),
        };
    };

    let Some(definition) = vendor.attribute_by_code(vsa.sub_type()) else {
        return match mode {
            ValidationMode::Strict => Err(ValidationError::UnknownAttribute {
                vendor: vendor.name().to_string(),
                sub_type: vsa.sub_type(),
            }),
            ValidationMode::Lenient => Ok(()),
        };
    };

    let (_, value) = definition
        .decode_value(vsa.value())
        .map_err(|source| ValidationError::InvalidValue {
            attribute: definition.name().to_string(),
            source,
        })?;

    // Enumerations are advisory for vendors; only strict mode enforces them
    if mode == ValidationMode::Strict && !definition.values().is_empty() {
        if let AttributeValue::Integer(number) = value {
            if definition.name_of_value(number).is_none() {
                return Err(ValidationError::UnlistedValue {
                    attribute: definition.name().to_string(),
                    value: number,
                });
            }
        }
    }

    Ok(())
}

/// Validate every attribute of a packet.
///
/// Each Vendor-Specific attribute must parse and each vendor TLV in it is
/// checked with [`validate_vendor_attribute`]. Standard attributes must
/// decode as their RFC kind.
pub fn validate_packet(
    dictionary: &Dictionary,
    packet: &Packet,
    mode: ValidationMode,
) -> Result<(), ValidationError> {
    for attr in &packet.attributes {
        if attr.attr_type == VendorSpecific::ATTRIBUTE_TYPE {
            for vsa in VendorSpecific::from_attribute_container(attr)? {
                validate_vendor_attribute(dictionary, &vsa, mode)?;
            }
        } else {
            validate_standard_attribute(attr)?;
        }
    }
    Ok(())
}

fn validate_standard_attribute(attr: &Attribute) -> Result<(), ValidationError> {
    let Some(attr_type) = AttributeType::from_u8(attr.attr_type) else {
        return Ok(());
    };
    attr.value_as(attr_type.kind())
        .map(|_| ())
        .map_err(|source| ValidationError::InvalidValue {
            attribute: attr_type.name().to_string(),
            source,
        })
}
