//! Command output, rendered as text or serialized as JSON

use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VendorSummary {
    pub vendor_id: u32,
    pub name: String,
    pub attributes: usize,
}

impl fmt::Display for VendorSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:>6}  {} ({} attributes)",
            self.vendor_id, self.name, self.attributes
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValueSummary {
    pub name: String,
    pub value: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttributeSummary {
    pub code: u8,
    pub name: String,
    #[serde(rename = "type")]
    pub type_name: String,
    pub kind: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub flags: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub values: Vec<ValueSummary>,
}

impl fmt::Display for AttributeSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:>3}  {}  {}", self.code, self.name, self.type_name)?;
        if !self.flags.is_empty() {
            write!(f, " [{}]", self.flags.join(","))?;
        }
        for value in &self.values {
            write!(f, "\n       {} = {}", value.name, value.value)?;
        }
        Ok(())
    }
}

/// Result of the `encode` command
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EncodeReport {
    pub vendor_id: u32,
    pub vendor: String,
    pub attribute: String,
    pub sub_type: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<u8>,
    pub value: String,
    pub hex: String,
}

impl fmt::Display for EncodeReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.hex)
    }
}

/// One vendor TLV decoded against the dictionary
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttributeReport {
    pub vendor_id: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vendor: Option<String>,
    pub sub_type: u8,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<u8>,
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value_name: Option<String>,
    /// Value octets, hex encoded
    pub raw: String,
    /// Validation or decoding problem
    #[serde(skip_serializing_if = "Option::is_none")]
    pub problem: Option<String>,
}

impl fmt::Display for AttributeReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let shown = self.value_name.as_deref().unwrap_or(&self.value);
        write!(f, "{} = {}", self.name, shown)?;
        if let Some(problem) = &self.problem {
            write!(f, "  (! {})", problem)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PacketAttributeReport {
    Standard {
        attr_type: u8,
        name: String,
        value: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        problem: Option<String>,
    },
    Vendor {
        attributes: Vec<AttributeReport>,
    },
    /// A Vendor-Specific attribute that could not be parsed
    Malformed { raw: String, problem: String },
}

impl fmt::Display for PacketAttributeReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PacketAttributeReport::Standard {
                name,
                value,
                problem,
                ..
            } => {
                write!(f, "  {} = {}", name, value)?;
                if let Some(problem) = problem {
                    write!(f, "  (! {})", problem)?;
                }
                Ok(())
            }
            PacketAttributeReport::Vendor { attributes } => {
                for (i, attribute) in attributes.iter().enumerate() {
                    if i > 0 {
                        writeln!(f)?;
                    }
                    write!(f, "  {}", attribute)?;
                }
                Ok(())
            }
            PacketAttributeReport::Malformed { raw, problem } => {
                write!(f, "  Vendor-Specific = 0x{}  (dropped: {})", raw, problem)
            }
        }
    }
}

/// Result of the `inspect` command
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PacketReport {
    pub code: String,
    pub code_number: u8,
    pub identifier: u8,
    pub length: usize,
    pub authenticator: String,
    pub attributes: Vec<PacketAttributeReport>,
}

impl fmt::Display for PacketReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (id {}, {} bytes)",
            self.code, self.identifier, self.length
        )?;
        for attribute in &self.attributes {
            write!(f, "\n{}", attribute)?;
        }
        Ok(())
    }
}
