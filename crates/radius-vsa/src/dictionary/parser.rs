//! FreeRADIUS dictionary text format
//!
//! ```text
//! VENDOR          ACC                     5
//! BEGIN-VENDOR    ACC
//! ATTRIBUTE       Acc-Reason-Code         1       integer
//! VALUE           Acc-Reason-Code         Session-Timeout  7
//! END-VENDOR      ACC
//! ```
//!
//! Only vendor attributes are supported: every `ATTRIBUTE` must sit inside a
//! `BEGIN-VENDOR` / `END-VENDOR` block or name its vendor in a trailing field
//! (`ATTRIBUTE Acc-Reason-Code 1 integer ACC`). Vendors must use the default
//! `format=1,1` framing. `$INCLUDE` and other directives are skipped with a
//! warning.

use super::Dictionary;
use super::error::DictionaryError;
use super::vendor::AttributeDefinition;
use crate::attributes::ValueKind;
use tracing::{debug, warn};

struct OpenBlock {
    name: String,
    vendor_id: u32,
    line: usize,
}

/// Parse `text` into `dictionary`, stopping at the first error.
///
/// The dictionary may be partially updated on error; callers wanting
/// all-or-nothing semantics parse into a copy.
pub(crate) fn parse_into(dictionary: &mut Dictionary, text: &str) -> Result<(), DictionaryError> {
    let mut block: Option<OpenBlock> = None;

    for (index, raw) in text.lines().enumerate() {
        let line = index + 1;
        let content = match raw.find('#') {
            Some(position) => &raw[..position],
            None => raw,
        };
        let mut tokens = content.split_whitespace();
        let Some(directive) = tokens.next() else {
            continue;
        };
        let fields: Vec<&str> = tokens.collect();

        match directive {
            "VENDOR" => parse_vendor(dictionary, line, &fields)?,
            "BEGIN-VENDOR" => {
                let name = field(&fields, 0, line, "BEGIN-VENDOR", "vendor name")?;
                if let Some(open) = block.take() {
                    return Err(DictionaryError::UnterminatedVendorBlock {
                        line: open.line,
                        name: open.name,
                    });
                }
                let vendor_id = dictionary
                    .vendor_by_name(name)
                    .map(|v| v.vendor_id())
                    .ok_or_else(|| DictionaryError::UnknownVendor {
                        line,
                        name: name.to_string(),
                    })?;
                block = Some(OpenBlock {
                    name: name.to_string(),
                    vendor_id,
                    line,
                });
            }
            "END-VENDOR" => {
                let name = field(&fields, 0, line, "END-VENDOR", "vendor name")?;
                match block.take() {
                    Some(open) if open.name.eq_ignore_ascii_case(name) => {}
                    Some(open) => {
                        return Err(DictionaryError::MismatchedEndVendor {
                            line,
                            expected: open.name,
                            found: name.to_string(),
                        });
                    }
                    None => {
                        return Err(DictionaryError::MismatchedEndVendor {
                            line,
                            expected: "<none>".to_string(),
                            found: name.to_string(),
                        });
                    }
                }
            }
            "ATTRIBUTE" => parse_attribute(dictionary, block.as_ref(), line, &fields)?,
            "VALUE" => parse_value(dictionary, block.as_ref(), line, &fields)?,
            other => {
                warn!(line, directive = other, "Skipping unsupported dictionary directive");
            }
        }
    }

    if let Some(open) = block {
        return Err(DictionaryError::UnterminatedVendorBlock {
            line: open.line,
            name: open.name,
        });
    }

    Ok(())
}

fn field<'a>(
    fields: &[&'a str],
    index: usize,
    line: usize,
    directive: &'static str,
    name: &'static str,
) -> Result<&'a str, DictionaryError> {
    fields
        .get(index)
        .copied()
        .ok_or(DictionaryError::MissingField {
            line,
            directive,
            field: name,
        })
}

/// Decimal, or hexadecimal with a `0x` prefix
fn parse_number(text: &str, line: usize) -> Result<i64, DictionaryError> {
    let parsed = match text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
        Some(digits) => i64::from_str_radix(digits, 16),
        None => text.parse::<i64>(),
    };
    parsed.map_err(|_| DictionaryError::InvalidNumber {
        line,
        text: text.to_string(),
    })
}

fn parse_vendor(
    dictionary: &mut Dictionary,
    line: usize,
    fields: &[&str],
) -> Result<(), DictionaryError> {
    let name = field(fields, 0, line, "VENDOR", "vendor name")?;
    let id_text = field(fields, 1, line, "VENDOR", "vendor id")?;
    let vendor_id =
        u32::try_from(parse_number(id_text, line)?).map_err(|_| DictionaryError::InvalidNumber {
            line,
            text: id_text.to_string(),
        })?;

    // Only the standard one-octet type and length framing is supported
    if let Some(&format) = fields.get(2) {
        if format != "format=1,1" {
            return Err(DictionaryError::UnsupportedFormat {
                line,
                vendor: name.to_string(),
                format: format.to_string(),
            });
        }
    }

    dictionary.declare_vendor(name, vendor_id, line)?;
    debug!(vendor = name, vendor_id, "Registered vendor");
    Ok(())
}

fn parse_attribute(
    dictionary: &mut Dictionary,
    block: Option<&OpenBlock>,
    line: usize,
    fields: &[&str],
) -> Result<(), DictionaryError> {
    let name = field(fields, 0, line, "ATTRIBUTE", "name")?;
    let code_text = field(fields, 1, line, "ATTRIBUTE", "code")?;
    let type_name = field(fields, 2, line, "ATTRIBUTE", "type")?;

    // Old-style lines name the vendor in a trailing field instead of a block
    let trailing_vendor = fields
        .get(3)
        .and_then(|f| dictionary.vendor_by_name(f))
        .map(|v| (v.vendor_id(), v.name().to_string()));
    let (vendor_id, vendor_name, flags_field) = match (trailing_vendor, block) {
        (Some((vendor_id, vendor_name)), _) => (vendor_id, vendor_name, fields.get(4)),
        (None, Some(block)) => (block.vendor_id, block.name.clone(), fields.get(3)),
        (None, None) => {
            return Err(match fields.get(3) {
                Some(trailing) => DictionaryError::UnknownVendor {
                    line,
                    name: trailing.to_string(),
                },
                None => DictionaryError::OutsideVendorBlock {
                    line,
                    name: name.to_string(),
                },
            });
        }
    };
    let flags: Vec<String> = flags_field
        .map(|f| f.split(',').map(str::to_string).collect())
        .unwrap_or_default();

    let code =
        u8::try_from(parse_number(code_text, line)?).map_err(|_| DictionaryError::InvalidNumber {
            line,
            text: code_text.to_string(),
        })?;
    if code == 0 {
        return Err(DictionaryError::ReservedCode {
            line,
            name: name.to_string(),
        });
    }

    let vendor = dictionary
        .vendor_mut(vendor_id)
        .ok_or(DictionaryError::UnknownVendor {
            line,
            name: vendor_name,
        })?;
    vendor
        .insert(AttributeDefinition::new(name, code, type_name).with_flags(flags))
        .map_err(|rejected| DictionaryError::DuplicateAttribute {
            line,
            name: rejected.name().to_string(),
            code: rejected.code(),
        })
}

fn parse_value(
    dictionary: &mut Dictionary,
    block: Option<&OpenBlock>,
    line: usize,
    fields: &[&str],
) -> Result<(), DictionaryError> {
    let attribute = field(fields, 0, line, "VALUE", "attribute name")?;
    let value_name = field(fields, 1, line, "VALUE", "value name")?;
    let number_text = field(fields, 2, line, "VALUE", "number")?;

    let number = parse_number(number_text, line)?;
    let number = i32::try_from(number)
        .or_else(|_| u32::try_from(number).map(|n| n as i32))
        .map_err(|_| DictionaryError::InvalidNumber {
            line,
            text: number_text.to_string(),
        })?;

    // Inside a block the attribute belongs to that vendor; outside one any
    // vendor loaded so far may declare it.
    let vendor_id = match block {
        Some(block) => Some(block.vendor_id),
        None => dictionary
            .vendors()
            .find(|v| v.attribute(attribute).is_some())
            .map(|v| v.vendor_id()),
    };
    let definition = vendor_id
        .and_then(|id| dictionary.vendor_mut(id))
        .and_then(|v| v.attribute_mut(attribute))
        .ok_or_else(|| DictionaryError::UnknownAttribute {
            line,
            name: attribute.to_string(),
        })?;

    if definition.kind() != ValueKind::Integer {
        return Err(DictionaryError::ValueForNonInteger {
            line,
            attribute: attribute.to_string(),
            value: value_name.to_string(),
        });
    }
    definition.add_value(value_name.to_string(), number);
    Ok(())
}
