//! Vendor dictionaries compiled into the crate

pub(crate) const BUILTIN_DICTIONARIES: &[(&str, &str)] = &[
    (
        "dictionary.acc",
        include_str!("../../dictionaries/dictionary.acc"),
    ),
    (
        "dictionary.gandalf",
        include_str!("../../dictionaries/dictionary.gandalf"),
    ),
    (
        "dictionary.ascend",
        include_str!("../../dictionaries/dictionary.ascend"),
    ),
    (
        "dictionary.extreme",
        include_str!("../../dictionaries/dictionary.extreme"),
    ),
    (
        "dictionary.huawei",
        include_str!("../../dictionaries/dictionary.huawei"),
    ),
    (
        "dictionary.juniper",
        include_str!("../../dictionaries/dictionary.juniper"),
    ),
    (
        "dictionary.cisco.asa",
        include_str!("../../dictionaries/dictionary.cisco.asa"),
    ),
    (
        "dictionary.erx",
        include_str!("../../dictionaries/dictionary.erx"),
    ),
    (
        "dictionary.alcatel.sr",
        include_str!("../../dictionaries/dictionary.alcatel.sr"),
    ),
    (
        "dictionary.wispr",
        include_str!("../../dictionaries/dictionary.wispr"),
    ),
];
