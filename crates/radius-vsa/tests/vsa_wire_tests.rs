//! Wire-format properties of Vendor-Specific attributes
//!
//! Every value kind is framed, parsed back and compared octet for octet,
//! and malformed inputs must fail with a parse error instead of panicking.

use radius_vsa::attributes::value::{
    encode_counter64, encode_integer, encode_ipv4, encode_octets, encode_text,
};
use radius_vsa::{AttributeError, AttributeValue, Dictionary, ValueKind, VendorSpecific};
use std::net::{IpAddr, Ipv6Addr};

fn roundtrip(vendor_id: u32, sub_type: u8, value: &[u8]) {
    let vsa = VendorSpecific::new(vendor_id, sub_type, value).unwrap();
    let encoded = vsa.encode().unwrap();

    assert_eq!(encoded.len(), 8 + value.len());
    assert_eq!(encoded[0], 26);
    assert_eq!(encoded[1] as usize, encoded.len());
    assert_eq!(encoded[7] as usize, 2 + value.len());

    let parsed = VendorSpecific::decode(&encoded).unwrap();
    assert_eq!(parsed.vendor_id(), vendor_id);
    assert_eq!(parsed.sub_type(), sub_type);
    assert_eq!(parsed.value(), value);
}

#[test]
fn test_roundtrip_every_kind() {
    roundtrip(2636, 1, &encode_integer(i32::MIN));
    roundtrip(2636, 1, &encode_integer(0));
    roundtrip(14122, 2, &encode_text("Hotspot Ünïcode"));
    roundtrip(14122, 2, &encode_text(""));
    roundtrip(6527, 9, &encode_ipv4([192, 0, 2, 1]));
    roundtrip(6527, 19, &encode_counter64(u64::MAX));
    roundtrip(4874, 55, &encode_octets(&[0x35, 0x01, 0x03]));
    roundtrip(u32::MAX, 255, &[0xA5; 247]);
}

#[test]
fn test_roundtrip_typed_values() {
    let values = [
        (ValueKind::Integer, AttributeValue::Integer(-42)),
        (ValueKind::Text, AttributeValue::from("juniper-class")),
        (ValueKind::Ipv4, AttributeValue::Ipv4([10, 20, 30, 40])),
        (ValueKind::Octets, AttributeValue::Octets(vec![0, 1, 2, 3, 4])),
    ];
    for (kind, value) in values {
        let vsa = VendorSpecific::from_value(3076, 17, &value).unwrap();
        let parsed = VendorSpecific::decode(&vsa.encode().unwrap()).unwrap();
        assert_eq!(parsed.value_as(kind).unwrap(), value);
    }
}

#[test]
fn test_literal_acc_reason_code() {
    let vsa = VendorSpecific::new(5, 1, &encode_integer(7)).unwrap();
    assert_eq!(
        vsa.encode().unwrap(),
        [0x1A, 0x0C, 0x00, 0x00, 0x00, 0x05, 0x01, 0x06, 0x00, 0x00, 0x00, 0x07]
    );
}

#[test]
fn test_empty_text_has_inner_length_two() {
    let vsa = VendorSpecific::new(14122, 1, &encode_text("")).unwrap();
    assert_eq!(vsa.encode().unwrap()[7], 2);
}

#[test]
fn test_ipv6_never_truncated() {
    let v6 = IpAddr::V6(Ipv6Addr::new(0x2001, 0xdb8, 0, 0, 0, 0, 0, 1));
    assert_eq!(
        AttributeValue::ipv4(v6),
        Err(AttributeError::InvalidAddressFamily(16))
    );
    assert!(AttributeValue::ipv4_from_bytes(&Ipv6Addr::LOCALHOST.octets()).is_err());
}

#[test]
fn test_oversized_values() {
    assert!(VendorSpecific::new(5, 1, &[0u8; 253]).is_ok());
    assert!(matches!(
        VendorSpecific::new(5, 1, &[0u8; 254]),
        Err(AttributeError::ValueTooLarge { .. })
    ));
}

#[test]
fn test_malformed_inputs_fail_cleanly() {
    let cases: &[&[u8]] = &[
        &[],
        &[0x1A],
        &[0x1A, 0x05, 0x00, 0x00],
        &[0x1A, 0x04, 0x00, 0x00],
        &[0x1A, 0x08, 0x00, 0x00, 0x00, 0x05, 0x01],
        &[0x1A, 0x08, 0x00, 0x00, 0x00, 0x05, 0x01, 0x03],
        &[0x1A, 0x08, 0x00, 0x00, 0x00, 0x05, 0x00, 0x02],
        &[0x1A, 0xFF, 0x00],
        &[0x01, 0x08, 0x00, 0x00, 0x00, 0x05, 0x01, 0x02],
    ];
    for case in cases {
        assert!(VendorSpecific::decode(case).is_err(), "accepted {:02x?}", case);
        assert!(VendorSpecific::decode_container(case).is_err());
    }
}

#[test]
fn test_every_single_byte_mutation_is_safe() {
    let encoded = VendorSpecific::new(2011, 100, b"abcdef")
        .unwrap()
        .encode()
        .unwrap();
    for index in 0..encoded.len() {
        for byte in [0x00, 0x01, 0x7F, 0xFF] {
            let mut mutated = encoded.clone();
            mutated[index] = byte;
            // must not panic; the result may be either outcome
            let _ = VendorSpecific::decode(&mutated);
            let _ = VendorSpecific::decode_container(&mutated);
        }
    }
}

#[test]
fn test_same_sub_type_different_vendors() {
    let dictionary = Dictionary::builtin().unwrap();
    let acc = VendorSpecific::new(5, 1, &encode_integer(7)).unwrap();
    let gandalf = VendorSpecific::new(64, 1, &encode_integer(7)).unwrap();

    let acc_name = dictionary.describe(&acc).unwrap().name;
    let gandalf_name = dictionary.describe(&gandalf).unwrap().name;
    assert_eq!(acc_name.as_deref(), Some("Acc-Reason-Code"));
    assert_eq!(gandalf_name.as_deref(), Some("Gandalf-Operational-Modes"));
}

#[test]
fn test_every_builtin_attribute_frames() {
    let dictionary = Dictionary::builtin().unwrap();
    for vendor in dictionary.vendors() {
        for definition in vendor.attributes() {
            let value = match definition.kind() {
                ValueKind::Integer => AttributeValue::Integer(1),
                ValueKind::Text => AttributeValue::from("x"),
                ValueKind::Ipv4 => AttributeValue::Ipv4([127, 0, 0, 1]),
                ValueKind::Octets => AttributeValue::Octets(vec![0xFF]),
            };
            let vsa = vendor.build(definition.name(), &value).unwrap();
            let described = dictionary
                .describe(&VendorSpecific::decode(&vsa.encode().unwrap()).unwrap())
                .unwrap();
            assert_eq!(described.name.as_deref(), Some(definition.name()));
            assert_eq!(described.value, value);
        }
    }
}
