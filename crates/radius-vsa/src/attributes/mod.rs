//! Attribute encoding: value codec, generic TLV and Vendor-Specific framing

mod attribute;
mod error;
mod types;
pub mod value;
mod vsa;

pub use attribute::Attribute;
pub use error::AttributeError;
pub use types::AttributeType;
pub use value::{AttributeValue, ValueKind};
pub use vsa::VendorSpecific;
