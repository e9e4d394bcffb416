use super::error::AttributeError;
use super::value::{self, AttributeValue, ValueKind};

/// RADIUS Attribute structure as defined in RFC 2865 Section 5
///
/// ```text
///  0                   1                   2
///  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |     Type      |    Length     |  Value ...
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    /// Attribute type (1 byte)
    pub attr_type: u8,
    /// Attribute value (0-253 bytes)
    pub value: Vec<u8>,
}

impl Attribute {
    /// Minimum attribute length (type + length fields = 2 bytes)
    pub const MIN_LENGTH: usize = 2;
    /// Maximum attribute length (255 bytes including type and length)
    pub const MAX_LENGTH: usize = 255;
    /// Maximum value length (253 bytes)
    pub const MAX_VALUE_LENGTH: usize = 253;

    pub fn new(attr_type: u8, value: Vec<u8>) -> Result<Self, AttributeError> {
        if value.len() > Self::MAX_VALUE_LENGTH {
            return Err(AttributeError::ValueTooLarge {
                length: value.len(),
                max: Self::MAX_VALUE_LENGTH,
            });
        }
        Ok(Attribute { attr_type, value })
    }

    /// Create a string attribute
    pub fn string(attr_type: u8, value: impl AsRef<str>) -> Result<Self, AttributeError> {
        Self::new(attr_type, value::encode_text(value.as_ref()))
    }

    /// Create an integer attribute (32-bit big-endian)
    pub fn integer(attr_type: u8, value: i32) -> Result<Self, AttributeError> {
        Self::new(attr_type, value::encode_integer(value).to_vec())
    }

    /// Create an IP address attribute
    pub fn ipv4(attr_type: u8, value: [u8; 4]) -> Result<Self, AttributeError> {
        Self::new(attr_type, value::encode_ipv4(value).to_vec())
    }

    /// Create an opaque octets attribute
    pub fn octets(attr_type: u8, value: &[u8]) -> Result<Self, AttributeError> {
        Self::new(attr_type, value::encode_octets(value))
    }

    pub fn from_value(attr_type: u8, value: &AttributeValue) -> Result<Self, AttributeError> {
        Self::new(attr_type, value.encode())
    }

    /// Encode attribute to bytes
    pub fn encode(&self) -> Result<Vec<u8>, AttributeError> {
        let length = self.encoded_length();
        if length > Self::MAX_LENGTH {
            return Err(AttributeError::ValueTooLarge {
                length: self.value.len(),
                max: Self::MAX_VALUE_LENGTH,
            });
        }

        let mut buffer = Vec::with_capacity(length);
        buffer.push(self.attr_type);
        buffer.push(length as u8);
        buffer.extend_from_slice(&self.value);

        Ok(buffer)
    }

    /// Decode the first attribute in `data`.
    ///
    /// Trailing bytes after the attribute are left for the caller, which
    /// lets a packet parser walk the attribute list with `encoded_length`.
    pub fn decode(data: &[u8]) -> Result<Self, AttributeError> {
        if data.len() < Self::MIN_LENGTH {
            return Err(AttributeError::Truncated {
                length: data.len(),
                min: Self::MIN_LENGTH,
            });
        }

        let attr_type = data[0];
        let length = data[1] as usize;

        if length < Self::MIN_LENGTH {
            return Err(AttributeError::Truncated {
                length,
                min: Self::MIN_LENGTH,
            });
        }

        if data.len() < length {
            return Err(AttributeError::LengthMismatch {
                declared: length,
                actual: data.len(),
            });
        }

        Ok(Attribute {
            attr_type,
            value: data[Self::MIN_LENGTH..length].to_vec(),
        })
    }

    /// Get the encoded length of this attribute
    pub fn encoded_length(&self) -> usize {
        Self::MIN_LENGTH + self.value.len()
    }

    /// Try to interpret value as a string
    pub fn as_string(&self) -> Result<String, AttributeError> {
        value::decode_text(&self.value)
    }

    /// Try to interpret value as an integer (32-bit big-endian)
    pub fn as_integer(&self) -> Result<i32, AttributeError> {
        value::decode_integer(&self.value)
    }

    /// Try to interpret value as an IPv4 address
    pub fn as_ipv4(&self) -> Result<[u8; 4], AttributeError> {
        value::decode_ipv4(&self.value)
    }

    /// Interpret the value as the given kind
    pub fn value_as(&self, kind: ValueKind) -> Result<AttributeValue, AttributeError> {
        AttributeValue::decode(kind, &self.value)
    }
}
