//! Attribute value codec
//!
//! Byte-level encoding of the four value representations used by vendor
//! attributes:
//!
//! | Kind    | Wire form                                   |
//! |---------|---------------------------------------------|
//! | Integer | 4 octets, big-endian two's complement       |
//! | Text    | UTF-8 octets, no length prefix, no NUL       |
//! | Ipv4    | 4 octets, network byte order                |
//! | Octets  | opaque, copied through unchanged            |
//!
//! Lengths are carried by the enclosing TLV header, never by the value.

use super::error::AttributeError;
use std::fmt;
use std::net::{IpAddr, Ipv4Addr};
use std::str::FromStr;

/// Declared representation of an attribute value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Integer,
    Text,
    Ipv4,
    Octets,
}

impl ValueKind {
    /// Map a FreeRADIUS dictionary type name onto a value kind.
    ///
    /// Types without a dedicated representation (`octets`, `abinary`,
    /// `integer64`, `ipv6addr`, ...) are carried as opaque octets.
    pub fn from_dictionary_type(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "integer" | "date" | "time" | "signed" => ValueKind::Integer,
            "string" | "text" => ValueKind::Text,
            "ipaddr" | "ipv4addr" => ValueKind::Ipv4,
            _ => ValueKind::Octets,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ValueKind::Integer => "integer",
            ValueKind::Text => "text",
            ValueKind::Ipv4 => "ipv4",
            ValueKind::Octets => "octets",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Encode a 32-bit integer as 4 big-endian octets
pub fn encode_integer(value: i32) -> [u8; 4] {
    value.to_be_bytes()
}

/// Decode a 32-bit integer; the input must be exactly 4 octets
pub fn decode_integer(bytes: &[u8]) -> Result<i32, AttributeError> {
    let raw: [u8; 4] = bytes.try_into().map_err(|_| {
        AttributeError::MalformedAttribute(format!(
            "Expected 4 bytes for integer, got {}",
            bytes.len()
        ))
    })?;
    Ok(i32::from_be_bytes(raw))
}

/// Encode text as UTF-8 without terminator
pub fn encode_text(value: &str) -> Vec<u8> {
    value.as_bytes().to_vec()
}

/// Decode UTF-8 text, rejecting invalid sequences
pub fn decode_text(bytes: &[u8]) -> Result<String, AttributeError> {
    String::from_utf8(bytes.to_vec())
        .map_err(|e| AttributeError::MalformedAttribute(format!("Invalid UTF-8 in text value: {}", e)))
}

pub fn encode_ipv4(addr: [u8; 4]) -> [u8; 4] {
    addr
}

/// Decode an IPv4 address; the input must be exactly 4 octets
pub fn decode_ipv4(bytes: &[u8]) -> Result<[u8; 4], AttributeError> {
    bytes.try_into().map_err(|_| {
        AttributeError::MalformedAttribute(format!(
            "Expected 4 bytes for IPv4 address, got {}",
            bytes.len()
        ))
    })
}

/// Copy raw octets into a new buffer
pub fn encode_octets(bytes: &[u8]) -> Vec<u8> {
    bytes.to_vec()
}

/// Encode a 64-bit counter as 8 big-endian octets.
///
/// Vendor dictionaries declare such counters as `octets`; the framing
/// layer treats the result as an opaque value.
pub fn encode_counter64(value: u64) -> Vec<u8> {
    value.to_be_bytes().to_vec()
}

/// Read back an 8-octet big-endian counter
pub fn decode_counter64(bytes: &[u8]) -> Result<u64, AttributeError> {
    let raw: [u8; 8] = bytes.try_into().map_err(|_| {
        AttributeError::MalformedAttribute(format!(
            "Expected 8 bytes for 64-bit counter, got {}",
            bytes.len()
        ))
    })?;
    Ok(u64::from_be_bytes(raw))
}

/// A typed attribute value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttributeValue {
    Integer(i32),
    Text(String),
    Ipv4([u8; 4]),
    Octets(Vec<u8>),
}

impl AttributeValue {
    /// Build an IPv4 value, rejecting IPv6 addresses
    pub fn ipv4(addr: IpAddr) -> Result<Self, AttributeError> {
        match addr {
            IpAddr::V4(v4) => Ok(AttributeValue::Ipv4(v4.octets())),
            IpAddr::V6(v6) => Err(AttributeError::InvalidAddressFamily(v6.octets().len())),
        }
    }

    /// Build an IPv4 value from raw address octets.
    ///
    /// Anything other than exactly 4 octets (e.g. a 16-octet IPv6 form) is
    /// rejected before any byte is written.
    pub fn ipv4_from_bytes(bytes: &[u8]) -> Result<Self, AttributeError> {
        let addr: [u8; 4] = bytes
            .try_into()
            .map_err(|_| AttributeError::InvalidAddressFamily(bytes.len()))?;
        Ok(AttributeValue::Ipv4(addr))
    }

    pub fn kind(&self) -> ValueKind {
        match self {
            AttributeValue::Integer(_) => ValueKind::Integer,
            AttributeValue::Text(_) => ValueKind::Text,
            AttributeValue::Ipv4(_) => ValueKind::Ipv4,
            AttributeValue::Octets(_) => ValueKind::Octets,
        }
    }

    /// Encode to wire octets
    pub fn encode(&self) -> Vec<u8> {
        match self {
            AttributeValue::Integer(v) => encode_integer(*v).to_vec(),
            AttributeValue::Text(s) => encode_text(s),
            AttributeValue::Ipv4(addr) => encode_ipv4(*addr).to_vec(),
            AttributeValue::Octets(bytes) => encode_octets(bytes),
        }
    }

    /// Decode wire octets as the given kind
    pub fn decode(kind: ValueKind, bytes: &[u8]) -> Result<Self, AttributeError> {
        Ok(match kind {
            ValueKind::Integer => AttributeValue::Integer(decode_integer(bytes)?),
            ValueKind::Text => AttributeValue::Text(decode_text(bytes)?),
            ValueKind::Ipv4 => AttributeValue::Ipv4(decode_ipv4(bytes)?),
            ValueKind::Octets => AttributeValue::Octets(encode_octets(bytes)),
        })
    }

    /// Parse operator-supplied text as the given kind.
    ///
    /// Integers accept the full signed and unsigned 32-bit ranges; values
    /// above `i32::MAX` keep their bit pattern. Octets are hex, with an
    /// optional `0x` prefix.
    pub fn parse(kind: ValueKind, text: &str) -> Result<Self, AttributeError> {
        let invalid = || AttributeError::InvalidValueText {
            kind,
            text: text.to_string(),
        };

        match kind {
            ValueKind::Integer => {
                let trimmed = text.trim();
                let value = match trimmed.parse::<i32>() {
                    Ok(v) => v,
                    Err(_) => trimmed.parse::<u32>().map_err(|_| invalid())? as i32,
                };
                Ok(AttributeValue::Integer(value))
            }
            ValueKind::Text => Ok(AttributeValue::Text(text.to_string())),
            ValueKind::Ipv4 => {
                let addr = IpAddr::from_str(text.trim()).map_err(|_| invalid())?;
                AttributeValue::ipv4(addr)
            }
            ValueKind::Octets => {
                let trimmed = text.trim();
                let digits = trimmed
                    .strip_prefix("0x")
                    .or_else(|| trimmed.strip_prefix("0X"))
                    .unwrap_or(trimmed);
                let bytes = hex::decode(digits).map_err(|_| invalid())?;
                Ok(AttributeValue::Octets(bytes))
            }
        }
    }

    pub fn as_integer(&self) -> Option<i32> {
        match self {
            AttributeValue::Integer(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            AttributeValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeValue::Integer(v) => write!(f, "{}", v),
            AttributeValue::Text(s) => write!(f, "{}", s),
            AttributeValue::Ipv4(addr) => write!(f, "{}", Ipv4Addr::from(*addr)),
            AttributeValue::Octets(bytes) => write!(f, "0x{}", hex::encode(bytes)),
        }
    }
}

impl From<i32> for AttributeValue {
    fn from(value: i32) -> Self {
        AttributeValue::Integer(value)
    }
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        AttributeValue::Text(value.to_string())
    }
}

impl From<String> for AttributeValue {
    fn from(value: String) -> Self {
        AttributeValue::Text(value)
    }
}

impl From<Ipv4Addr> for AttributeValue {
    fn from(value: Ipv4Addr) -> Self {
        AttributeValue::Ipv4(value.octets())
    }
}
