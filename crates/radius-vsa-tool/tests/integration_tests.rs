//! Integration tests for the vendor attribute tool
//!
//! These tests drive the public command layer end to end:
//! configuration and dictionary loading, encoding from operator text,
//! and decoding attributes and packets back into reports.

use radius_vsa::{
    Attribute, AttributeType, Code, DictionaryError, Packet, ValidationError, ValidationMode,
    VendorSpecific, validate_packet,
};
use radius_vsa_tool::{Config, ConfigError, PacketAttributeReport, ToolError, commands};
use std::io::Write;
use tempfile::NamedTempFile;

const LAB_DICTIONARY: &str = "\
# Lab equipment
VENDOR\t\tLab\t\t65000

BEGIN-VENDOR\tLab
ATTRIBUTE\tLab-Rack\t\t1\tstring
ATTRIBUTE\tLab-Port-Speed\t\t2\tinteger
ATTRIBUTE\tLab-Gateway\t\t3\tipaddr

VALUE\tLab-Port-Speed\t\tGigabit\t\t1000
VALUE\tLab-Port-Speed\t\tTen-Gigabit\t10000
END-VENDOR\tLab
";

fn write_temp(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    file.write_all(contents.as_bytes())
        .expect("Failed to write temp file");
    file
}

fn lab_config(dictionary: &NamedTempFile) -> Config {
    Config {
        dictionaries: vec![dictionary.path().display().to_string()],
        ..Config::default()
    }
}

#[test]
fn test_config_file_with_site_dictionary() {
    let dictionary_file = write_temp(LAB_DICTIONARY);
    let config_file = NamedTempFile::new().unwrap();
    lab_config(&dictionary_file).to_file(config_file.path()).unwrap();

    let config = Config::from_file(config_file.path()).unwrap();
    let dictionary = config.load_dictionary().unwrap();

    // built-in tables plus the site file
    assert_eq!(dictionary.len(), 11);
    let vendors = commands::list_vendors(&dictionary);
    assert_eq!(vendors.last().unwrap().name, "Lab");

    let attributes = commands::list_attributes(&dictionary, "65000").unwrap();
    assert_eq!(attributes.len(), 3);
    assert_eq!(attributes[1].values.len(), 2);
}

#[test]
fn test_encode_decode_site_attribute() {
    let dictionary_file = write_temp(LAB_DICTIONARY);
    let dictionary = lab_config(&dictionary_file).load_dictionary().unwrap();

    let encoded = commands::encode(&dictionary, "lab", "lab-port-speed", "Ten-Gigabit").unwrap();
    assert_eq!(encoded.hex, "1a0c0000fde8020600002710");

    let decoded = commands::decode(&dictionary, &encoded.hex, ValidationMode::Strict).unwrap();
    assert_eq!(decoded.len(), 1);
    assert_eq!(decoded[0].vendor.as_deref(), Some("Lab"));
    assert_eq!(decoded[0].value, "10000");
    assert_eq!(decoded[0].value_name.as_deref(), Some("Ten-Gigabit"));
}

#[test]
fn test_unlisted_value_flagged_only_in_strict_mode() {
    let dictionary_file = write_temp(LAB_DICTIONARY);
    let dictionary = lab_config(&dictionary_file).load_dictionary().unwrap();
    let hex = commands::encode(&dictionary, "Lab", "Lab-Port-Speed", "100")
        .unwrap()
        .hex;

    let strict = commands::decode(&dictionary, &hex, ValidationMode::Strict).unwrap();
    assert!(strict[0].problem.is_some());

    let lenient = commands::decode(&dictionary, &hex, ValidationMode::Lenient).unwrap();
    assert_eq!(lenient[0].problem, None);
}

#[test]
fn test_broken_site_dictionary_reports_file_and_line() {
    let dictionary_file = write_temp("VENDOR Lab 65000\nBEGIN-VENDOR Lab\nATTRIBUTE Lab-Rack 0 string\n");
    let err = lab_config(&dictionary_file).load_dictionary().unwrap_err();

    match err {
        ConfigError::Dictionary(e) => {
            assert_eq!(e.line(), Some(3));
            assert!(matches!(e, DictionaryError::File { .. }));
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[test]
fn test_inspect_accounting_request() {
    let dictionary = Config::default().load_dictionary().unwrap();

    let mut packet = Packet::new(Code::AccountingRequest, 42, [0x11; 16]);
    packet.add_attribute(Attribute::string(AttributeType::UserName as u8, "alice").unwrap());
    let location = commands::encode(&dictionary, "WISPr", "WISPr-Location-Name", "Terminal 2").unwrap();
    let reason = commands::encode(&dictionary, "ACC", "Acc-Reason-Code", "No-accounting-response").unwrap();
    for encoded in [&location, &reason] {
        let bytes = commands::parse_hex(&encoded.hex).unwrap();
        let vsa = VendorSpecific::decode(&bytes).unwrap();
        packet.add_vendor_attribute(&vsa).unwrap();
    }
    let bytes = packet.encode().unwrap();

    assert_eq!(validate_packet(&dictionary, &packet, ValidationMode::Strict), Ok(()));

    let report = commands::inspect(&dictionary, &hex::encode(&bytes), ValidationMode::Strict).unwrap();
    assert_eq!(report.code, "Accounting-Request");
    assert_eq!(report.length, bytes.len());
    assert_eq!(report.attributes.len(), 3);

    let text = report.to_string();
    assert!(text.starts_with("Accounting-Request (id 42"));
    assert!(text.contains("User-Name = alice"));
    assert!(text.contains("WISPr-Location-Name = Terminal 2"));
    assert!(text.contains("Acc-Reason-Code = No-accounting-response"));

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["code_number"], 4);
    assert_eq!(json["attributes"][2]["attributes"][0]["value"], "7");
}

#[test]
fn test_inspect_keeps_going_past_malformed_vendor_attribute() {
    let dictionary = Config::default().load_dictionary().unwrap();

    let mut packet = Packet::new(Code::AccessRequest, 1, [0u8; 16]);
    // sub-type 0 is never valid
    packet.add_attribute(Attribute::new(26, vec![0, 0, 0, 5, 0, 3, 0x41]).unwrap());
    packet.add_attribute(Attribute::integer(AttributeType::NasPort as u8, 7).unwrap());

    assert!(matches!(
        validate_packet(&dictionary, &packet, ValidationMode::Lenient),
        Err(ValidationError::Malformed(_))
    ));

    let hex = hex::encode(packet.encode().unwrap());
    let report = commands::inspect(&dictionary, &hex, ValidationMode::Lenient).unwrap();
    assert!(matches!(
        report.attributes[0],
        PacketAttributeReport::Malformed { .. }
    ));
    assert!(matches!(
        &report.attributes[1],
        PacketAttributeReport::Standard { name, .. } if name == "NAS-Port"
    ));
}

#[test]
fn test_bad_input_surfaces_as_tool_errors() {
    let dictionary = Config::default().load_dictionary().unwrap();

    assert!(matches!(
        commands::decode(&dictionary, "not hex", ValidationMode::Strict),
        Err(ToolError::Hex(_))
    ));
    assert!(matches!(
        commands::decode(&dictionary, "0a0c00000005010600000007", ValidationMode::Strict),
        Err(ToolError::Attribute(_))
    ));
    assert!(matches!(
        commands::encode(&dictionary, "ACC", "Acc-Nonexistent", "1"),
        Err(ToolError::Dictionary(_))
    ));
}
