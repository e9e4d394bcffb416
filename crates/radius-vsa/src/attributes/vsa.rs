//! Vendor-Specific Attribute framing (RFC 2865 Section 5.26)
//!
//! A vendor attribute travels inside standard attribute 26:
//!
//! ```text
//!  0                   1                   2                   3
//!  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |  Type (26)    |  Length       |            Vendor-Id
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//!      Vendor-Id (cont)           | Vendor type   | Vendor length |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |  Value ...
//! +-+-+-+-+-+-+-+-+
//! ```
//!
//! `Length` covers the whole attribute (8 + value length) and
//! `Vendor length` covers the inner TLV (2 + value length).

use super::attribute::Attribute;
use super::error::AttributeError;
use super::types::AttributeType;
use super::value::{AttributeValue, ValueKind};

/// One vendor sub-attribute nested in a Vendor-Specific attribute
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VendorSpecific {
    vendor_id: u32,
    sub_type: u8,
    value: Vec<u8>,
}

impl VendorSpecific {
    /// Standard attribute type carrying vendor attributes
    pub const ATTRIBUTE_TYPE: u8 = AttributeType::VendorSpecific as u8;
    /// Type + length + vendor id
    pub const HEADER_LENGTH: usize = 6;
    /// Vendor type + vendor length
    pub const SUB_HEADER_LENGTH: usize = 2;
    /// Smallest valid encoding: headers around an empty value
    pub const MIN_LENGTH: usize = Self::HEADER_LENGTH + Self::SUB_HEADER_LENGTH;
    /// Largest encoding the outer length octet can describe
    pub const MAX_LENGTH: usize = 255;
    /// Ceiling on value length imposed by the inner length octet
    pub const MAX_VALUE_LENGTH: usize = 253;
    /// Ceiling on value length for a complete, encodable attribute
    pub const MAX_FRAMED_VALUE_LENGTH: usize = Self::MAX_LENGTH - Self::MIN_LENGTH;

    /// Build a vendor attribute from already-encoded value octets.
    ///
    /// The octets are copied, so later changes to the caller's buffer do not
    /// affect the attribute.
    pub fn new(vendor_id: u32, sub_type: u8, value: &[u8]) -> Result<Self, AttributeError> {
        if sub_type == 0 {
            return Err(AttributeError::InvalidSubType(sub_type));
        }
        if value.len() > Self::MAX_VALUE_LENGTH {
            return Err(AttributeError::ValueTooLarge {
                length: value.len(),
                max: Self::MAX_VALUE_LENGTH,
            });
        }
        Ok(VendorSpecific {
            vendor_id,
            sub_type,
            value: value.to_vec(),
        })
    }

    /// Build a vendor attribute from a typed value
    pub fn from_value(
        vendor_id: u32,
        sub_type: u8,
        value: &AttributeValue,
    ) -> Result<Self, AttributeError> {
        Self::new(vendor_id, sub_type, &value.encode())
    }

    pub fn vendor_id(&self) -> u32 {
        self.vendor_id
    }

    pub fn sub_type(&self) -> u8 {
        self.sub_type
    }

    /// Raw value octets
    pub fn value(&self) -> &[u8] {
        &self.value
    }

    /// Re-type the raw value octets
    pub fn value_as(&self, kind: ValueKind) -> Result<AttributeValue, AttributeError> {
        AttributeValue::decode(kind, &self.value)
    }

    /// Length of the complete Attribute-26 encoding
    pub fn encoded_length(&self) -> usize {
        Self::MIN_LENGTH + self.value.len()
    }

    /// Encode to the complete Attribute-26 wire form.
    ///
    /// Fails with `ValueTooLarge` when the value is too long for the outer
    /// length octet, i.e. longer than `MAX_FRAMED_VALUE_LENGTH`.
    pub fn encode(&self) -> Result<Vec<u8>, AttributeError> {
        let length = self.encoded_length();
        if length > Self::MAX_LENGTH {
            return Err(AttributeError::ValueTooLarge {
                length: self.value.len(),
                max: Self::MAX_FRAMED_VALUE_LENGTH,
            });
        }

        let mut buffer = Vec::with_capacity(length);
        buffer.push(Self::ATTRIBUTE_TYPE);
        buffer.push(length as u8);
        buffer.extend_from_slice(&self.vendor_id.to_be_bytes());
        buffer.push(self.sub_type);
        buffer.push((Self::SUB_HEADER_LENGTH + self.value.len()) as u8);
        buffer.extend_from_slice(&self.value);

        Ok(buffer)
    }

    /// Decode one complete Attribute-26 carrying a single vendor TLV.
    ///
    /// `data` must hold exactly the attribute, starting at the type octet.
    /// The value is returned as raw octets; re-typing it needs the declared
    /// kind from a vendor dictionary.
    pub fn decode(data: &[u8]) -> Result<Self, AttributeError> {
        let (vendor_id, payload) = Self::split_header(data)?;

        let declared = payload[1] as usize;
        if declared != payload.len() {
            return Err(AttributeError::LengthMismatch {
                declared,
                actual: payload.len(),
            });
        }

        Self::decode_sub_attribute(vendor_id, payload)
    }

    /// Decode an Attribute-26 that may pack several vendor TLVs.
    ///
    /// Every inner TLV is validated like a single one, and together they
    /// must cover the payload exactly.
    pub fn decode_container(data: &[u8]) -> Result<Vec<Self>, AttributeError> {
        let (vendor_id, mut payload) = Self::split_header(data)?;
        let mut attributes = Vec::new();

        while !payload.is_empty() {
            if payload.len() < Self::SUB_HEADER_LENGTH {
                return Err(AttributeError::Truncated {
                    length: payload.len(),
                    min: Self::SUB_HEADER_LENGTH,
                });
            }
            let declared = payload[1] as usize;
            if declared < Self::SUB_HEADER_LENGTH || declared > payload.len() {
                return Err(AttributeError::LengthMismatch {
                    declared,
                    actual: payload.len(),
                });
            }
            attributes.push(Self::decode_sub_attribute(vendor_id, &payload[..declared])?);
            payload = &payload[declared..];
        }

        Ok(attributes)
    }

    /// Wrap this vendor attribute in a generic attribute 26
    pub fn to_attribute(&self) -> Result<Attribute, AttributeError> {
        let encoded = self.encode()?;
        Attribute::new(Self::ATTRIBUTE_TYPE, encoded[2..].to_vec())
    }

    /// Unwrap a generic attribute 26 carrying a single vendor TLV
    pub fn from_attribute(attr: &Attribute) -> Result<Self, AttributeError> {
        Self::decode(&Self::reframe(attr)?)
    }

    /// Unwrap a generic attribute 26 carrying one or more vendor TLVs
    pub fn from_attribute_container(attr: &Attribute) -> Result<Vec<Self>, AttributeError> {
        Self::decode_container(&Self::reframe(attr)?)
    }

    fn reframe(attr: &Attribute) -> Result<Vec<u8>, AttributeError> {
        if attr.attr_type != Self::ATTRIBUTE_TYPE {
            return Err(AttributeError::UnexpectedAttributeType(attr.attr_type));
        }
        attr.encode()
    }

    /// Validate the outer header and return the vendor id and the inner
    /// TLV octets. The returned payload holds at least one sub-header.
    fn split_header(data: &[u8]) -> Result<(u32, &[u8]), AttributeError> {
        if data.is_empty() {
            return Err(AttributeError::Truncated {
                length: 0,
                min: Self::MIN_LENGTH,
            });
        }
        if data[0] != Self::ATTRIBUTE_TYPE {
            return Err(AttributeError::UnexpectedAttributeType(data[0]));
        }
        if data.len() < 2 {
            return Err(AttributeError::Truncated {
                length: data.len(),
                min: Self::MIN_LENGTH,
            });
        }

        let length = data[1] as usize;
        if length != data.len() {
            return Err(AttributeError::LengthMismatch {
                declared: length,
                actual: data.len(),
            });
        }
        if length < Self::MIN_LENGTH {
            return Err(AttributeError::Truncated {
                length,
                min: Self::MIN_LENGTH,
            });
        }

        let vendor_id = u32::from_be_bytes([data[2], data[3], data[4], data[5]]);
        Ok((vendor_id, &data[Self::HEADER_LENGTH..]))
    }

    /// `tlv` is exactly one inner TLV whose length octet matches its size
    fn decode_sub_attribute(vendor_id: u32, tlv: &[u8]) -> Result<Self, AttributeError> {
        let sub_type = tlv[0];
        if sub_type == 0 {
            return Err(AttributeError::InvalidSubType(sub_type));
        }
        Ok(VendorSpecific {
            vendor_id,
            sub_type,
            value: tlv[Self::SUB_HEADER_LENGTH..].to_vec(),
        })
    }
}
