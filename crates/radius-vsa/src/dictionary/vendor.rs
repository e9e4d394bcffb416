use super::error::DictionaryError;
use crate::attributes::value::decode_integer;
use crate::attributes::{AttributeError, AttributeValue, ValueKind, VendorSpecific};
use std::collections::HashMap;
use std::fmt;

/// A well-known value of an enumerated integer attribute (`VALUE` line)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedValue {
    pub name: String,
    pub value: i32,
}

/// One vendor attribute declared by an `ATTRIBUTE` line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeDefinition {
    name: String,
    code: u8,
    kind: ValueKind,
    type_name: String,
    flags: Vec<String>,
    values: Vec<NamedValue>,
}

impl AttributeDefinition {
    pub fn new(name: impl Into<String>, code: u8, type_name: impl Into<String>) -> Self {
        let type_name = type_name.into();
        AttributeDefinition {
            name: name.into(),
            code,
            kind: ValueKind::from_dictionary_type(&type_name),
            type_name,
            flags: Vec::new(),
            values: Vec::new(),
        }
    }

    pub fn with_flags(mut self, flags: Vec<String>) -> Self {
        self.flags = flags;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn code(&self) -> u8 {
        self.code
    }

    pub fn kind(&self) -> ValueKind {
        self.kind
    }

    /// Type name as written in the dictionary (`integer`, `abinary`, ...)
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn flags(&self) -> &[String] {
        &self.flags
    }

    pub fn has_tag(&self) -> bool {
        self.flags.iter().any(|f| f == "has_tag")
    }

    pub fn values(&self) -> &[NamedValue] {
        &self.values
    }

    /// Look up an enumerated value by name, ignoring ASCII case
    pub fn value_by_name(&self, name: &str) -> Option<i32> {
        self.values
            .iter()
            .find(|v| v.name.eq_ignore_ascii_case(name))
            .map(|v| v.value)
    }

    /// First name declared for an enumerated value
    pub fn name_of_value(&self, value: i32) -> Option<&str> {
        self.values
            .iter()
            .find(|v| v.value == value)
            .map(|v| v.name.as_str())
    }

    /// Split an RFC 2868 tag off raw value octets and decode the rest.
    ///
    /// A tagged integer carries its tag in the first of its 4 octets, leaving
    /// a 24-bit value; tag 0 means untagged. Tagged text and octets start
    /// with the tag only when the first octet is 0x01-0x1F.
    pub fn decode_value(&self, raw: &[u8]) -> Result<(Option<u8>, AttributeValue), AttributeError> {
        if !self.has_tag() {
            return Ok((None, AttributeValue::decode(self.kind, raw)?));
        }
        match self.kind {
            ValueKind::Integer => {
                let number = decode_integer(raw)?;
                let tag = (number >> 24) as u8;
                Ok((
                    (tag != 0).then_some(tag),
                    AttributeValue::Integer(number & 0x00FF_FFFF),
                ))
            }
            ValueKind::Text | ValueKind::Octets => match raw.split_first() {
                Some((&first, rest)) if is_tag(first) => {
                    Ok((Some(first), AttributeValue::decode(self.kind, rest)?))
                }
                _ => Ok((None, AttributeValue::decode(self.kind, raw)?)),
            },
            ValueKind::Ipv4 => Ok((None, AttributeValue::decode(self.kind, raw)?)),
        }
    }

    /// Encode a value of the declared kind, with an optional tag for
    /// `has_tag` attributes
    pub fn encode_value(
        &self,
        tag: Option<u8>,
        value: &AttributeValue,
    ) -> Result<Vec<u8>, DictionaryError> {
        if value.kind() != self.kind {
            return Err(AttributeError::KindMismatch {
                expected: self.kind,
                found: value.kind(),
            }
            .into());
        }
        if tag.is_some() && (!self.has_tag() || self.kind == ValueKind::Ipv4) {
            return Err(DictionaryError::UnexpectedTag {
                attribute: self.name.clone(),
            });
        }
        if let Some(tag) = tag.filter(|t| !is_tag(*t)) {
            return Err(AttributeError::InvalidTag(tag).into());
        }

        match (value, tag) {
            (AttributeValue::Integer(number), _) if self.has_tag() => {
                if !(0..=0x00FF_FFFF).contains(number) {
                    return Err(AttributeError::TaggedIntegerRange(*number).into());
                }
                let mut bytes = number.to_be_bytes();
                bytes[0] = tag.unwrap_or(0);
                Ok(bytes.to_vec())
            }
            (_, Some(tag)) => {
                let mut bytes = vec![tag];
                bytes.extend_from_slice(&value.encode());
                Ok(bytes)
            }
            (_, None) => Ok(value.encode()),
        }
    }

    /// A redefined name replaces the earlier number; aliases for the same
    /// number are kept in declaration order.
    pub(crate) fn add_value(&mut self, name: String, value: i32) {
        match self.values.iter_mut().find(|v| v.name.eq_ignore_ascii_case(&name)) {
            Some(existing) => existing.value = value,
            None => self.values.push(NamedValue { name, value }),
        }
    }
}

/// The attribute table of a single vendor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VendorDictionary {
    name: String,
    vendor_id: u32,
    attributes: Vec<AttributeDefinition>,
    by_name: HashMap<String, usize>,
    by_code: HashMap<u8, usize>,
}

impl VendorDictionary {
    pub fn new(name: impl Into<String>, vendor_id: u32) -> Self {
        VendorDictionary {
            name: name.into(),
            vendor_id,
            attributes: Vec::new(),
            by_name: HashMap::new(),
            by_code: HashMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn vendor_id(&self) -> u32 {
        self.vendor_id
    }

    /// Attributes in declaration order
    pub fn attributes(&self) -> impl Iterator<Item = &AttributeDefinition> {
        self.attributes.iter()
    }

    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    /// Look up an attribute by name, ignoring ASCII case
    pub fn attribute(&self, name: &str) -> Option<&AttributeDefinition> {
        self.by_name
            .get(&name.to_ascii_lowercase())
            .map(|&i| &self.attributes[i])
    }

    pub fn attribute_by_code(&self, code: u8) -> Option<&AttributeDefinition> {
        self.by_code.get(&code).map(|&i| &self.attributes[i])
    }

    pub(crate) fn attribute_mut(&mut self, name: &str) -> Option<&mut AttributeDefinition> {
        let index = *self.by_name.get(&name.to_ascii_lowercase())?;
        self.attributes.get_mut(index)
    }

    /// Add an attribute; returns the definition back if its name or code is
    /// already taken.
    pub fn insert(&mut self, definition: AttributeDefinition) -> Result<(), AttributeDefinition> {
        let key = definition.name.to_ascii_lowercase();
        if self.by_name.contains_key(&key) || self.by_code.contains_key(&definition.code) {
            return Err(definition);
        }
        let index = self.attributes.len();
        self.by_name.insert(key, index);
        self.by_code.insert(definition.code, index);
        self.attributes.push(definition);
        Ok(())
    }

    fn require(&self, attribute: &str) -> Result<&AttributeDefinition, DictionaryError> {
        self.attribute(attribute)
            .ok_or_else(|| DictionaryError::AttributeNotFound {
                vendor: self.name.clone(),
                attribute: attribute.to_string(),
            })
    }

    /// Build a vendor attribute from a typed value.
    ///
    /// The value must have the kind the dictionary declares for the
    /// attribute; no coercion is attempted. A `Name:tag` attribute name sets
    /// the tag of a `has_tag` attribute.
    pub fn build(
        &self,
        attribute: &str,
        value: &AttributeValue,
    ) -> Result<VendorSpecific, DictionaryError> {
        let (name, tag) = split_tag(attribute)?;
        let definition = self.require(name)?;
        let bytes = definition.encode_value(tag, value)?;
        Ok(VendorSpecific::new(self.vendor_id, definition.code, &bytes)?)
    }

    /// Build a vendor attribute from operator text.
    ///
    /// Integer attributes accept their `VALUE` names as well as numbers.
    pub fn build_from_str(
        &self,
        attribute: &str,
        text: &str,
    ) -> Result<VendorSpecific, DictionaryError> {
        let (name, tag) = split_tag(attribute)?;
        let definition = self.require(name)?;
        let value = match definition.value_by_name(text.trim()) {
            Some(number) if definition.kind == ValueKind::Integer => AttributeValue::Integer(number),
            _ => AttributeValue::parse(definition.kind, text)?,
        };
        let bytes = definition.encode_value(tag, &value)?;
        Ok(VendorSpecific::new(self.vendor_id, definition.code, &bytes)?)
    }

    /// Decode a vendor attribute of this vendor into a named view.
    ///
    /// Sub-types missing from the table are described as raw octets. A value
    /// that does not decode as its declared kind is an error.
    pub fn describe(&self, vsa: &VendorSpecific) -> Result<DescribedAttribute, DictionaryError> {
        if vsa.vendor_id() != self.vendor_id {
            return Err(DictionaryError::VendorMismatch {
                expected: self.vendor_id,
                found: vsa.vendor_id(),
            });
        }

        let Some(definition) = self.attribute_by_code(vsa.sub_type()) else {
            let mut described = DescribedAttribute::unknown(vsa);
            described.vendor_name = Some(self.name.clone());
            return Ok(described);
        };

        let (tag, value) = definition.decode_value(vsa.value())?;
        let value_name = value
            .as_integer()
            .and_then(|n| definition.name_of_value(n))
            .map(str::to_string);

        Ok(DescribedAttribute {
            vendor_id: self.vendor_id,
            vendor_name: Some(self.name.clone()),
            sub_type: vsa.sub_type(),
            name: Some(definition.name.clone()),
            tag,
            value,
            value_name,
        })
    }
}

fn is_tag(octet: u8) -> bool {
    (0x01..=0x1F).contains(&octet)
}

/// Split `Name:tag` into the attribute name and its tag
pub fn split_tag(attribute: &str) -> Result<(&str, Option<u8>), DictionaryError> {
    match attribute.rsplit_once(':') {
        Some((name, tag)) => {
            let tag = tag.parse::<u8>().map_err(|_| DictionaryError::InvalidTagText {
                text: attribute.to_string(),
            })?;
            Ok((name, Some(tag)))
        }
        None => Ok((attribute, None)),
    }
}

/// A vendor attribute decoded against a dictionary
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DescribedAttribute {
    pub vendor_id: u32,
    pub vendor_name: Option<String>,
    pub sub_type: u8,
    /// Attribute name, `None` when the dictionary does not list the sub-type
    pub name: Option<String>,
    /// RFC 2868 tag of a `has_tag` attribute
    pub tag: Option<u8>,
    pub value: AttributeValue,
    /// `VALUE` name of an enumerated integer
    pub value_name: Option<String>,
}

impl DescribedAttribute {
    /// View of an attribute nothing is known about: raw octets only
    pub fn unknown(vsa: &VendorSpecific) -> Self {
        DescribedAttribute {
            vendor_id: vsa.vendor_id(),
            vendor_name: None,
            sub_type: vsa.sub_type(),
            name: None,
            tag: None,
            value: AttributeValue::Octets(vsa.value().to_vec()),
            value_name: None,
        }
    }

    /// Attribute name, falling back to the `Attr-26.<vendor>.<sub-type>`
    /// form for unknown attributes. A tag is appended as `Name:tag`.
    pub fn display_name(&self) -> String {
        let name = match &self.name {
            Some(name) => name.clone(),
            None => format!("Attr-26.{}.{}", self.vendor_id, self.sub_type),
        };
        match self.tag {
            Some(tag) => format!("{}:{}", name, tag),
            None => name,
        }
    }
}

impl fmt::Display for DescribedAttribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value_name {
            Some(value_name) => write!(f, "{} = {}", self.display_name(), value_name),
            None => write!(f, "{} = {}", self.display_name(), self.value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn acc() -> VendorDictionary {
        let mut vendor = VendorDictionary::new("ACC", 5);
        let mut reason = AttributeDefinition::new("Acc-Reason-Code", 1, "integer");
        reason.add_value("Session-Timeout".to_string(), 7);
        reason.add_value("Admin-Reset".to_string(), 2);
        vendor.insert(reason).unwrap();
        vendor
            .insert(AttributeDefinition::new("Acc-Dns-Server-Pri", 8, "ipaddr"))
            .unwrap();
        vendor
            .insert(AttributeDefinition::new("Acc-Customer-Id", 36, "string"))
            .unwrap();
        vendor
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let vendor = acc();
        assert_eq!(vendor.attribute("acc-reason-code").unwrap().code(), 1);
        assert_eq!(
            vendor.attribute_by_code(8).unwrap().name(),
            "Acc-Dns-Server-Pri"
        );
        assert!(vendor.attribute("Acc-Nope").is_none());
        assert_eq!(vendor.len(), 3);
    }

    #[test]
    fn test_insert_rejects_duplicates() {
        let mut vendor = acc();
        assert!(
            vendor
                .insert(AttributeDefinition::new("ACC-REASON-CODE", 99, "integer"))
                .is_err()
        );
        assert!(
            vendor
                .insert(AttributeDefinition::new("Acc-Other", 1, "integer"))
                .is_err()
        );
    }

    #[test]
    fn test_build_checks_declared_kind() {
        let vendor = acc();
        let vsa = vendor
            .build("Acc-Reason-Code", &AttributeValue::Integer(7))
            .unwrap();
        assert_eq!(
            vsa.encode().unwrap(),
            vec![0x1A, 0x0C, 0, 0, 0, 5, 1, 6, 0, 0, 0, 7]
        );

        let err = vendor
            .build("Acc-Reason-Code", &AttributeValue::from("seven"))
            .unwrap_err();
        assert!(matches!(
            err,
            DictionaryError::Attribute(AttributeError::KindMismatch {
                expected: ValueKind::Integer,
                found: ValueKind::Text
            })
        ));

        assert!(matches!(
            vendor.build("Acc-Nope", &AttributeValue::Integer(1)),
            Err(DictionaryError::AttributeNotFound { .. })
        ));
    }

    #[test]
    fn test_build_from_str_accepts_value_names() {
        let vendor = acc();
        let by_name = vendor
            .build_from_str("Acc-Reason-Code", "session-timeout")
            .unwrap();
        let by_number = vendor.build_from_str("Acc-Reason-Code", "7").unwrap();
        assert_eq!(by_name, by_number);

        let dns = vendor
            .build_from_str("Acc-Dns-Server-Pri", "10.0.0.53")
            .unwrap();
        assert_eq!(dns.value(), &[10, 0, 0, 53]);

        assert!(matches!(
            vendor.build_from_str("Acc-Dns-Server-Pri", "fe80::1"),
            Err(DictionaryError::Attribute(
                AttributeError::InvalidAddressFamily(16)
            ))
        ));
    }

    #[test]
    fn test_describe_known_attribute() {
        let vendor = acc();
        let vsa = VendorSpecific::new(5, 1, &[0, 0, 0, 7]).unwrap();
        let described = vendor.describe(&vsa).unwrap();
        assert_eq!(described.name.as_deref(), Some("Acc-Reason-Code"));
        assert_eq!(described.value, AttributeValue::Integer(7));
        assert_eq!(described.value_name.as_deref(), Some("Session-Timeout"));
        assert_eq!(described.to_string(), "Acc-Reason-Code = Session-Timeout");
    }

    #[test]
    fn test_describe_unknown_sub_type() {
        let vendor = acc();
        let vsa = VendorSpecific::new(5, 200, &[0xAB]).unwrap();
        let described = vendor.describe(&vsa).unwrap();
        assert_eq!(described.name, None);
        assert_eq!(described.value, AttributeValue::Octets(vec![0xAB]));
        assert_eq!(described.to_string(), "Attr-26.5.200 = 0xab");
    }

    #[test]
    fn test_describe_rejects_malformed_value() {
        let vendor = acc();
        let vsa = VendorSpecific::new(5, 8, &[10, 0, 0]).unwrap();
        assert!(matches!(
            vendor.describe(&vsa),
            Err(DictionaryError::Attribute(
                AttributeError::MalformedAttribute(_)
            ))
        ));

        let other_vendor = VendorSpecific::new(64, 1, &[0, 0, 0, 7]).unwrap();
        assert!(matches!(
            vendor.describe(&other_vendor),
            Err(DictionaryError::VendorMismatch {
                expected: 5,
                found: 64
            })
        ));
    }

    #[test]
    fn test_value_aliases() {
        let mut definition = AttributeDefinition::new("Example", 1, "integer");
        definition.add_value("On".to_string(), 1);
        definition.add_value("Enabled".to_string(), 1);
        definition.add_value("on".to_string(), 3);
        assert_eq!(definition.value_by_name("ON"), Some(3));
        assert_eq!(definition.name_of_value(1), Some("Enabled"));
        assert_eq!(definition.values().len(), 2);
    }

    #[test]
    fn test_has_tag_flag() {
        let tagged = AttributeDefinition::new("ERX-Service-Activate", 65, "string")
            .with_flags(vec!["has_tag".to_string()]);
        assert!(tagged.has_tag());
        assert_eq!(tagged.kind(), ValueKind::Text);
        assert!(!AttributeDefinition::new("Plain", 1, "string").has_tag());
    }

    fn erx() -> VendorDictionary {
        let mut vendor = VendorDictionary::new("ERX", 4874);
        let tagged = |name: &str, code, type_name: &str| {
            AttributeDefinition::new(name, code, type_name).with_flags(vec!["has_tag".to_string()])
        };
        vendor
            .insert(tagged("ERX-Service-Activate", 65, "string"))
            .unwrap();
        vendor
            .insert(tagged("ERX-Service-Volume", 67, "integer"))
            .unwrap();
        vendor
            .insert(AttributeDefinition::new("ERX-Ingress-Policy-Name", 10, "string"))
            .unwrap();
        vendor
    }

    #[test]
    fn test_describe_tagged_integer() {
        let vendor = erx();
        let vsa = VendorSpecific::new(4874, 67, &[0x01, 0, 0, 0x64]).unwrap();
        let described = vendor.describe(&vsa).unwrap();
        assert_eq!(described.tag, Some(1));
        assert_eq!(described.value, AttributeValue::Integer(100));
        assert_eq!(described.to_string(), "ERX-Service-Volume:1 = 100");

        let untagged = VendorSpecific::new(4874, 67, &[0, 0, 0x01, 0x00]).unwrap();
        let described = vendor.describe(&untagged).unwrap();
        assert_eq!(described.tag, None);
        assert_eq!(described.value, AttributeValue::Integer(256));
    }

    #[test]
    fn test_describe_tagged_text() {
        let vendor = erx();
        let vsa = VendorSpecific::new(4874, 65, &[0x01, b's', b'v', b'c']).unwrap();
        let described = vendor.describe(&vsa).unwrap();
        assert_eq!(described.tag, Some(1));
        assert_eq!(described.value, AttributeValue::from("svc"));

        // a printable first octet is part of the value
        let untagged = VendorSpecific::new(4874, 65, b"svc").unwrap();
        let described = vendor.describe(&untagged).unwrap();
        assert_eq!(described.tag, None);
        assert_eq!(described.value, AttributeValue::from("svc"));

        // the same leading octet on an untagged attribute stays in the value
        let plain = VendorSpecific::new(4874, 10, &[0x01, b'p']).unwrap();
        assert_eq!(
            vendor.describe(&plain).unwrap().value,
            AttributeValue::from("\u{1}p")
        );
    }

    #[test]
    fn test_build_tagged_attributes() {
        let vendor = erx();
        let volume = vendor
            .build_from_str("ERX-Service-Volume:3", "100")
            .unwrap();
        assert_eq!(volume.value(), &[0x03, 0, 0, 0x64]);

        let untagged = vendor.build_from_str("ERX-Service-Volume", "100").unwrap();
        assert_eq!(untagged.value(), &[0, 0, 0, 0x64]);

        let activate = vendor
            .build("erx-service-activate:2", &AttributeValue::from("svc"))
            .unwrap();
        assert_eq!(activate.value(), &[0x02, b's', b'v', b'c']);
        let described = vendor.describe(&activate).unwrap();
        assert_eq!(described.tag, Some(2));
        assert_eq!(described.value, AttributeValue::from("svc"));
    }

    #[test]
    fn test_build_rejects_bad_tags() {
        let vendor = erx();
        assert!(matches!(
            vendor.build_from_str("ERX-Service-Volume:32", "1"),
            Err(DictionaryError::Attribute(AttributeError::InvalidTag(32)))
        ));
        assert!(matches!(
            vendor.build_from_str("ERX-Service-Volume:0", "1"),
            Err(DictionaryError::Attribute(AttributeError::InvalidTag(0)))
        ));
        assert!(matches!(
            vendor.build_from_str("ERX-Service-Volume:x", "1"),
            Err(DictionaryError::InvalidTagText { .. })
        ));
        assert!(matches!(
            vendor.build_from_str("ERX-Ingress-Policy-Name:1", "gold"),
            Err(DictionaryError::UnexpectedTag { .. })
        ));
        assert!(matches!(
            vendor.build_from_str("ERX-Service-Volume:1", "16777216"),
            Err(DictionaryError::Attribute(
                AttributeError::TaggedIntegerRange(16777216)
            ))
        ));
    }

    #[test]
    fn test_split_tag() {
        assert_eq!(split_tag("Tunnel-Type").unwrap(), ("Tunnel-Type", None));
        assert_eq!(split_tag("Tunnel-Type:7").unwrap(), ("Tunnel-Type", Some(7)));
        assert!(split_tag("Tunnel-Type:").is_err());
    }
}
