//! Operations behind the CLI subcommands

use crate::error::ToolError;
use crate::report::{
    AttributeReport, AttributeSummary, EncodeReport, PacketAttributeReport, PacketReport,
    ValueSummary, VendorSummary,
};
use radius_vsa::{
    Attribute, AttributeType, DescribedAttribute, Dictionary, Packet, ValidationMode,
    VendorSpecific, validate_vendor_attribute,
};
use radius_vsa::dictionary::split_tag;
use tracing::{debug, warn};

/// Parse hex input, tolerating whitespace, `:` separators and a `0x` prefix
pub fn parse_hex(input: &str) -> Result<Vec<u8>, ToolError> {
    let trimmed = input.trim();
    let digits = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);
    let cleaned: String = digits
        .chars()
        .filter(|c| !c.is_whitespace() && *c != ':')
        .collect();
    Ok(hex::decode(cleaned)?)
}

pub fn list_vendors(dictionary: &Dictionary) -> Vec<VendorSummary> {
    dictionary
        .vendors()
        .map(|vendor| VendorSummary {
            vendor_id: vendor.vendor_id(),
            name: vendor.name().to_string(),
            attributes: vendor.len(),
        })
        .collect()
}

pub fn list_attributes(
    dictionary: &Dictionary,
    vendor: &str,
) -> Result<Vec<AttributeSummary>, ToolError> {
    let vendor = dictionary.resolve_vendor(vendor)?;
    Ok(vendor
        .attributes()
        .map(|definition| AttributeSummary {
            code: definition.code(),
            name: definition.name().to_string(),
            type_name: definition.type_name().to_string(),
            kind: definition.kind().to_string(),
            flags: definition.flags().to_vec(),
            values: definition
                .values()
                .iter()
                .map(|v| ValueSummary {
                    name: v.name.clone(),
                    value: v.value,
                })
                .collect(),
        })
        .collect())
}

/// Encode one vendor attribute from operator text
pub fn encode(
    dictionary: &Dictionary,
    vendor: &str,
    attribute: &str,
    value: &str,
) -> Result<EncodeReport, ToolError> {
    let vendor = dictionary.resolve_vendor(vendor)?;
    let vsa = vendor.build_from_str(attribute, value)?;
    let bytes = vsa.encode()?;
    debug!(
        vendor = vendor.name(),
        sub_type = vsa.sub_type(),
        length = bytes.len(),
        "Encoded vendor attribute"
    );

    let (name, tag) = split_tag(attribute)?;
    let name = vendor
        .attribute(name)
        .map(|d| d.name().to_string())
        .unwrap_or_else(|| name.to_string());

    Ok(EncodeReport {
        vendor_id: vendor.vendor_id(),
        vendor: vendor.name().to_string(),
        attribute: name,
        sub_type: vsa.sub_type(),
        tag,
        value: value.to_string(),
        hex: hex::encode(bytes),
    })
}

/// Decode one Attribute 26, which may pack several vendor TLVs.
///
/// Malformed framing is an error; values that fail validation are reported
/// with a problem note.
pub fn decode(
    dictionary: &Dictionary,
    input: &str,
    mode: ValidationMode,
) -> Result<Vec<AttributeReport>, ToolError> {
    let bytes = parse_hex(input)?;
    let attributes = VendorSpecific::decode_container(&bytes)?;
    Ok(attributes
        .iter()
        .map(|vsa| report_vendor_attribute(dictionary, vsa, mode))
        .collect())
}

/// Decode a whole RADIUS packet.
///
/// A malformed Vendor-Specific attribute is reported and dropped; the rest
/// of the packet is still shown.
pub fn inspect(
    dictionary: &Dictionary,
    input: &str,
    mode: ValidationMode,
) -> Result<PacketReport, ToolError> {
    let bytes = parse_hex(input)?;
    let packet = Packet::decode(&bytes)?;

    let attributes = packet
        .attributes
        .iter()
        .map(|attr| report_packet_attribute(dictionary, attr, mode))
        .collect();

    Ok(PacketReport {
        code: packet.code.to_string(),
        code_number: packet.code.as_u8(),
        identifier: packet.identifier,
        length: packet.length(),
        authenticator: hex::encode(packet.authenticator),
        attributes,
    })
}

fn report_packet_attribute(
    dictionary: &Dictionary,
    attr: &Attribute,
    mode: ValidationMode,
) -> PacketAttributeReport {
    if attr.attr_type == VendorSpecific::ATTRIBUTE_TYPE {
        return match VendorSpecific::from_attribute_container(attr) {
            Ok(vsas) => PacketAttributeReport::Vendor {
                attributes: vsas
                    .iter()
                    .map(|vsa| report_vendor_attribute(dictionary, vsa, mode))
                    .collect(),
            },
            Err(e) => {
                warn!(error = %e, "Dropping malformed Vendor-Specific attribute");
                PacketAttributeReport::Malformed {
                    raw: hex::encode(&attr.value),
                    problem: e.to_string(),
                }
            }
        };
    }

    let raw = || format!("0x{}", hex::encode(&attr.value));
    match AttributeType::from_u8(attr.attr_type) {
        Some(attr_type) => match attr.value_as(attr_type.kind()) {
            Ok(value) => PacketAttributeReport::Standard {
                attr_type: attr.attr_type,
                name: attr_type.name().to_string(),
                value: value.to_string(),
                problem: None,
            },
            Err(e) => PacketAttributeReport::Standard {
                attr_type: attr.attr_type,
                name: attr_type.name().to_string(),
                value: raw(),
                problem: Some(e.to_string()),
            },
        },
        None => PacketAttributeReport::Standard {
            attr_type: attr.attr_type,
            name: format!("Attr-{}", attr.attr_type),
            value: raw(),
            problem: None,
        },
    }
}

fn report_vendor_attribute(
    dictionary: &Dictionary,
    vsa: &VendorSpecific,
    mode: ValidationMode,
) -> AttributeReport {
    let raw = hex::encode(vsa.value());

    let (described, problem) = match dictionary.describe(vsa) {
        Ok(described) => {
            let problem = validate_vendor_attribute(dictionary, vsa, mode)
                .err()
                .map(|e| e.to_string());
            (described, problem)
        }
        Err(e) => {
            // keep the dictionary name, show the raw octets
            let vendor = dictionary.vendor(vsa.vendor_id());
            let mut described = DescribedAttribute::unknown(vsa);
            described.vendor_name = vendor.map(|v| v.name().to_string());
            described.name = vendor
                .and_then(|v| v.attribute_by_code(vsa.sub_type()))
                .map(|d| d.name().to_string());
            (described, Some(e.to_string()))
        }
    };

    AttributeReport {
        vendor_id: described.vendor_id,
        vendor: described.vendor_name.clone(),
        sub_type: described.sub_type,
        name: described.display_name(),
        tag: described.tag,
        value: described.value.to_string(),
        value_name: described.value_name,
        raw,
        problem,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use radius_vsa::{AttributeValue, Code};

    fn dictionary() -> Dictionary {
        Dictionary::builtin().unwrap()
    }

    #[test]
    fn test_parse_hex_forms() {
        assert_eq!(parse_hex("0x1a0c").unwrap(), vec![0x1A, 0x0C]);
        assert_eq!(parse_hex(" 1a:0c ").unwrap(), vec![0x1A, 0x0C]);
        assert_eq!(parse_hex("1A 0C\n").unwrap(), vec![0x1A, 0x0C]);
        assert!(matches!(parse_hex("1a0"), Err(ToolError::Hex(_))));
        assert!(matches!(parse_hex("zz"), Err(ToolError::Hex(_))));
    }

    #[test]
    fn test_list_vendors() {
        let vendors = list_vendors(&dictionary());
        assert_eq!(vendors.len(), 10);
        assert_eq!(vendors[0].vendor_id, 5);
        assert_eq!(vendors[0].to_string(), "     5  ACC (47 attributes)");
    }

    #[test]
    fn test_list_attributes() {
        let attributes = list_attributes(&dictionary(), "wispr").unwrap();
        assert_eq!(attributes.len(), 11);
        assert_eq!(attributes[0].name, "WISPr-Location-ID");
        assert_eq!(attributes[4].kind, "integer");

        assert!(matches!(
            list_attributes(&dictionary(), "Nobody"),
            Err(ToolError::Dictionary(_))
        ));
    }

    #[test]
    fn test_encode() {
        let report = encode(&dictionary(), "ACC", "acc-reason-code", "7").unwrap();
        assert_eq!(report.hex, "1a0c00000005010600000007");
        assert_eq!(report.attribute, "Acc-Reason-Code");
        assert_eq!(report.to_string(), report.hex);

        let by_name = encode(&dictionary(), "5", "Acc-Reason-Code", "No-accounting-response").unwrap();
        assert_eq!(by_name.hex, report.hex);
    }

    #[test]
    fn test_encode_rejects_bad_value() {
        assert!(matches!(
            encode(&dictionary(), "Juniper", "Juniper-Local-User-Name", &"x".repeat(248)),
            Err(ToolError::Attribute(_))
        ));
        assert!(matches!(
            encode(&dictionary(), "Cisco-ASA", "ASA-Primary-DNS", "2001:db8::1"),
            Err(ToolError::Dictionary(_))
        ));
    }

    #[test]
    fn test_encode_decode_tagged_attribute() {
        let report = encode(&dictionary(), "ERX", "erx-service-volume:1", "100").unwrap();
        assert_eq!(report.attribute, "ERX-Service-Volume");
        assert_eq!(report.tag, Some(1));
        assert_eq!(report.hex, "1a0c0000130a430601000064");

        let decoded = decode(&dictionary(), &report.hex, ValidationMode::Strict).unwrap();
        assert_eq!(decoded[0].tag, Some(1));
        assert_eq!(decoded[0].value, "100");
        assert_eq!(decoded[0].problem, None);
        assert_eq!(decoded[0].to_string(), "ERX-Service-Volume:1 = 100");
    }

    #[test]
    fn test_decode_known_attribute() {
        let reports = decode(&dictionary(), "1a0c00000005010600000007", ValidationMode::Strict).unwrap();
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].name, "Acc-Reason-Code");
        assert_eq!(reports[0].value, "7");
        assert_eq!(reports[0].problem, None);
        assert_eq!(
            reports[0].to_string(),
            "Acc-Reason-Code = No-accounting-response"
        );
    }

    #[test]
    fn test_decode_reports_problems() {
        // Acc-Reason-Code carrying 3 octets
        let reports = decode(&dictionary(), "1a0b000000050105000007", ValidationMode::Lenient).unwrap();
        assert_eq!(reports[0].name, "Acc-Reason-Code");
        assert_eq!(reports[0].value, "0x000007");
        assert!(reports[0].problem.is_some());

        // unknown vendor is only a problem in strict mode
        let hex = "1a0900007a6901 0341";
        let strict = decode(&dictionary(), hex, ValidationMode::Strict).unwrap();
        assert_eq!(strict[0].name, "Attr-26.31337.1");
        assert!(strict[0].problem.is_some());
        let lenient = decode(&dictionary(), hex, ValidationMode::Lenient).unwrap();
        assert_eq!(lenient[0].problem, None);
    }

    #[test]
    fn test_decode_malformed_is_error() {
        assert!(matches!(
            decode(&dictionary(), "1a050000", ValidationMode::Lenient),
            Err(ToolError::Attribute(_))
        ));
    }

    #[test]
    fn test_inspect_packet() {
        let dictionary = dictionary();
        let mut packet = Packet::new(Code::AccessAccept, 9, [0xAA; 16]);
        packet.add_attribute(Attribute::integer(AttributeType::SessionTimeout as u8, 600).unwrap());
        packet
            .add_vendor_attribute(
                &VendorSpecific::from_value(14122, 1, &AttributeValue::from("isp,cc=us")).unwrap(),
            )
            .unwrap();
        packet.add_attribute(Attribute::new(26, vec![0, 0, 0, 5, 1, 9]).unwrap());
        let hex = hex::encode(packet.encode().unwrap());

        let report = inspect(&dictionary, &hex, ValidationMode::Strict).unwrap();
        assert_eq!(report.code, "Access-Accept");
        assert_eq!(report.identifier, 9);
        assert_eq!(report.attributes.len(), 3);
        assert!(matches!(
            &report.attributes[0],
            PacketAttributeReport::Standard { name, value, .. }
                if name == "Session-Timeout" && value == "600"
        ));
        match &report.attributes[1] {
            PacketAttributeReport::Vendor { attributes } => {
                assert_eq!(attributes[0].name, "WISPr-Location-ID");
                assert_eq!(attributes[0].value, "isp,cc=us");
            }
            other => panic!("unexpected {:?}", other),
        }
        assert!(matches!(
            report.attributes[2],
            PacketAttributeReport::Malformed { .. }
        ));

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["attributes"][1]["kind"], "vendor");
        assert_eq!(json["attributes"][2]["kind"], "malformed");
    }

    #[test]
    fn test_inspect_rejects_truncated_packet() {
        assert!(matches!(
            inspect(&dictionary(), "0101", ValidationMode::Lenient),
            Err(ToolError::Packet(_))
        ));
    }
}
