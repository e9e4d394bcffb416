use super::Code;
use crate::attributes::{Attribute, AttributeError, VendorSpecific};
use thiserror::Error;

const HEADER_LENGTH: usize = 20;

#[derive(Error, Debug)]
pub enum PacketError {
    #[error("Invalid packet length: {0}")]
    InvalidLength(usize),
    #[error("Invalid packet code: {0}")]
    InvalidCode(u8),
    #[error("Attribute error: {0}")]
    Attribute(#[from] AttributeError),
    #[error("Packet too large: {0} bytes")]
    PacketTooLarge(usize),
}

/// RADIUS Packet structure as defined in RFC 2865 Section 3
///
/// ```text
///  0                   1                   2                   3
///  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |     Code      |  Identifier   |            Length             |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |                                                               |
/// |                         Authenticator                         |
/// |                                                               |
/// |                                                               |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |  Attributes ...
/// +-+-+-+-+-+-+-+-+-+-+-+-+-
/// ```
///
/// The authenticator is carried as given; computing or verifying it needs
/// the shared secret and is left to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Packet {
    /// Packet type (1 byte)
    pub code: Code,
    /// Packet identifier for matching requests/responses (1 byte)
    pub identifier: u8,
    /// Request or Response Authenticator (16 bytes)
    pub authenticator: [u8; 16],
    /// List of attributes
    pub attributes: Vec<Attribute>,
}

impl Packet {
    /// Minimum RADIUS packet size (20 bytes: 1 code + 1 id + 2 length + 16 authenticator)
    pub const MIN_PACKET_SIZE: usize = HEADER_LENGTH;
    /// Maximum RADIUS packet size (4096 bytes as per RFC 2865)
    pub const MAX_PACKET_SIZE: usize = 4096;

    pub fn new(code: Code, identifier: u8, authenticator: [u8; 16]) -> Self {
        Packet {
            code,
            identifier,
            authenticator,
            attributes: Vec::new(),
        }
    }

    pub fn add_attribute(&mut self, attribute: Attribute) {
        self.attributes.push(attribute);
    }

    /// Append a vendor attribute as its own Attribute 26
    pub fn add_vendor_attribute(&mut self, vsa: &VendorSpecific) -> Result<(), PacketError> {
        let attribute = vsa.to_attribute()?;
        self.attributes.push(attribute);
        Ok(())
    }

    /// Encode packet to bytes; the length field is computed from the
    /// attributes.
    pub fn encode(&self) -> Result<Vec<u8>, PacketError> {
        let total_length = self.length();
        if total_length > Self::MAX_PACKET_SIZE {
            return Err(PacketError::PacketTooLarge(total_length));
        }

        let mut buffer = Vec::with_capacity(total_length);
        buffer.push(self.code.as_u8());
        buffer.push(self.identifier);
        buffer.extend_from_slice(&(total_length as u16).to_be_bytes());
        buffer.extend_from_slice(&self.authenticator);
        for attr in &self.attributes {
            buffer.extend_from_slice(&attr.encode()?);
        }

        Ok(buffer)
    }

    /// Decode packet from bytes.
    ///
    /// Octets past the header's length field are ignored (RFC 2865
    /// Section 3 treats them as padding). Vendor-Specific attributes are
    /// kept as generic attributes; see [`Packet::vendor_attributes`].
    pub fn decode(data: &[u8]) -> Result<Self, PacketError> {
        let Some((header, _)) = data.split_first_chunk::<HEADER_LENGTH>() else {
            return Err(PacketError::InvalidLength(data.len()));
        };

        let code = Code::from_u8(header[0]).ok_or(PacketError::InvalidCode(header[0]))?;
        let length = u16::from_be_bytes([header[2], header[3]]) as usize;
        if !(Self::MIN_PACKET_SIZE..=Self::MAX_PACKET_SIZE).contains(&length) {
            return Err(PacketError::InvalidLength(length));
        }
        let mut remaining = data
            .get(Self::MIN_PACKET_SIZE..length)
            .ok_or(PacketError::InvalidLength(data.len()))?;

        let mut authenticator = [0u8; 16];
        authenticator.copy_from_slice(&header[4..]);

        let mut attributes = Vec::new();
        while !remaining.is_empty() {
            let attr = Attribute::decode(remaining)?;
            remaining = &remaining[attr.encoded_length()..];
            attributes.push(attr);
        }

        Ok(Packet {
            code,
            identifier: header[1],
            authenticator,
            attributes,
        })
    }

    /// Get the length of the encoded packet
    pub fn length(&self) -> usize {
        let mut len = Self::MIN_PACKET_SIZE;
        for attr in &self.attributes {
            len += attr.encoded_length();
        }
        len
    }

    /// Find first attribute by type
    pub fn find_attribute(&self, attr_type: u8) -> Option<&Attribute> {
        self.attributes.iter().find(|a| a.attr_type == attr_type)
    }

    /// Find all attributes by type
    pub fn find_all_attributes(&self, attr_type: u8) -> Vec<&Attribute> {
        self.attributes
            .iter()
            .filter(|a| a.attr_type == attr_type)
            .collect()
    }

    /// Parse every Vendor-Specific attribute, in packet order.
    ///
    /// Yields one result per Attribute 26, holding all vendor TLVs packed in
    /// it. A malformed attribute yields an error without hiding the others,
    /// so a caller can drop just that attribute.
    pub fn vendor_attributes(
        &self,
    ) -> impl Iterator<Item = Result<Vec<VendorSpecific>, AttributeError>> + '_ {
        self.attributes
            .iter()
            .filter(|a| a.attr_type == VendorSpecific::ATTRIBUTE_TYPE)
            .map(VendorSpecific::from_attribute_container)
    }

    /// First well-formed vendor attribute with the given vendor id and sub-type
    pub fn find_vendor_attribute(&self, vendor_id: u32, sub_type: u8) -> Option<VendorSpecific> {
        self.vendor_attributes()
            .filter_map(Result::ok)
            .flatten()
            .find(|vsa| vsa.vendor_id() == vendor_id && vsa.sub_type() == sub_type)
    }
}
