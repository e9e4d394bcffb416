use crate::config::ConfigError;
use radius_vsa::{AttributeError, DictionaryError, PacketError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ToolError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("Dictionary error: {0}")]
    Dictionary(#[from] DictionaryError),
    #[error("Invalid hex input: {0}")]
    Hex(#[from] hex::FromHexError),
    #[error("Malformed Vendor-Specific attribute: {0}")]
    Attribute(#[from] AttributeError),
    #[error("Malformed packet: {0}")]
    Packet(#[from] PacketError),
    #[error("JSON output error: {0}")]
    Json(#[from] serde_json::Error),
}
