//! Command-line front end for the `radius-vsa` codec
//!
//! The binary lists the vendor tables, encodes vendor attributes from
//! operator text, and decodes attributes or whole packets captured as hex.
//!
//! # Example
//!
//! ```rust
//! use radius_vsa::{Dictionary, ValidationMode};
//! use radius_vsa_tool::commands;
//!
//! let dictionary = Dictionary::builtin().unwrap();
//! let encoded = commands::encode(&dictionary, "WISPr", "WISPr-Bandwidth-Max-Up", "1024").unwrap();
//!
//! let decoded = commands::decode(&dictionary, &encoded.hex, ValidationMode::Strict).unwrap();
//! assert_eq!(decoded[0].to_string(), "WISPr-Bandwidth-Max-Up = 1024");
//! ```

pub mod commands;
pub mod config;
pub mod error;
pub mod report;

pub use config::{Config, ConfigError};
pub use error::ToolError;
pub use report::{
    AttributeReport, AttributeSummary, EncodeReport, PacketAttributeReport, PacketReport,
    VendorSummary,
};
