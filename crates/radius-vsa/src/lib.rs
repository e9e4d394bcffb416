//! RADIUS Vendor-Specific Attribute codec
//!
//! This crate frames vendor attributes inside RADIUS Attribute 26 as
//! defined in RFC 2865 Section 5.26, and interprets them through
//! FreeRADIUS-format vendor dictionaries.
//!
//! # Features
//!
//! - Value codec for integer, text, IPv4 and octet values
//! - Vendor-Specific framing and strict parsing, including multi-TLV containers
//! - Built-in dictionaries for ten vendors, extensible from files
//! - Packet framing and dictionary-driven validation
//!
//! # Example
//!
//! ```rust
//! use radius_vsa::{AttributeValue, Code, Dictionary, Packet, VendorSpecific};
//!
//! // ACC Acc-Reason-Code = 7
//! let vsa = VendorSpecific::from_value(5, 1, &AttributeValue::Integer(7)).unwrap();
//! assert_eq!(
//!     vsa.encode().unwrap(),
//!     vec![0x1A, 0x0C, 0x00, 0x00, 0x00, 0x05, 0x01, 0x06, 0x00, 0x00, 0x00, 0x07]
//! );
//!
//! // Carry it in a packet and read it back by name
//! let mut packet = Packet::new(Code::AccessReject, 1, [0u8; 16]);
//! packet.add_vendor_attribute(&vsa).unwrap();
//! let bytes = packet.encode().unwrap();
//!
//! let dictionary = Dictionary::builtin().unwrap();
//! let decoded = Packet::decode(&bytes).unwrap();
//! let found = decoded.find_vendor_attribute(5, 1).unwrap();
//! let described = dictionary.describe(&found).unwrap();
//! assert_eq!(described.to_string(), "Acc-Reason-Code = No-accounting-response");
//! ```

pub mod attributes;
pub mod dictionary;
pub mod packet;
pub mod validation;

pub use attributes::{
    Attribute, AttributeError, AttributeType, AttributeValue, ValueKind, VendorSpecific,
};
pub use dictionary::{
    AttributeDefinition, DescribedAttribute, Dictionary, DictionaryError, VendorDictionary,
};
pub use packet::{Code, Packet, PacketError};
pub use validation::{
    ValidationError, ValidationMode, validate_packet, validate_vendor_attribute,
};
