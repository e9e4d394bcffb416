//! Vendor attribute dictionaries
//!
//! Each vendor is a data table of `{name, code, declared kind}` entries plus
//! optional enumerated values, read from FreeRADIUS-format dictionary text.
//! A [`Dictionary`] is a registry of such tables keyed by vendor id.
//!
//! ```rust
//! use radius_vsa::dictionary::Dictionary;
//!
//! let dictionary = Dictionary::builtin().unwrap();
//! let acc = dictionary.vendor_by_name("ACC").unwrap();
//! let vsa = acc.build_from_str("Acc-Reason-Code", "No-accounting-response").unwrap();
//! assert_eq!(vsa.encode().unwrap(), vec![0x1A, 0x0C, 0, 0, 0, 5, 1, 6, 0, 0, 0, 7]);
//! ```

mod builtin;
mod error;
mod parser;
mod vendor;

pub use error::DictionaryError;
pub use vendor::{AttributeDefinition, DescribedAttribute, NamedValue, VendorDictionary, split_tag};

use crate::attributes::VendorSpecific;
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;
use std::str::FromStr;
use tracing::debug;

/// Registry of vendor dictionaries
#[derive(Debug, Clone, Default)]
pub struct Dictionary {
    vendors: BTreeMap<u32, VendorDictionary>,
    names: HashMap<String, u32>,
}

impl Dictionary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Dictionary holding every vendor table compiled into the crate
    pub fn builtin() -> Result<Self, DictionaryError> {
        let mut dictionary = Dictionary::new();
        for (file, text) in builtin::BUILTIN_DICTIONARIES {
            parser::parse_into(&mut dictionary, text).map_err(|e| DictionaryError::File {
                file: file.to_string(),
                source: Box::new(e),
            })?;
        }
        debug!(vendors = dictionary.len(), "Loaded built-in dictionaries");
        Ok(dictionary)
    }

    /// Parse dictionary text into a new registry
    pub fn parse(text: &str) -> Result<Self, DictionaryError> {
        let mut dictionary = Dictionary::new();
        parser::parse_into(&mut dictionary, text)?;
        Ok(dictionary)
    }

    /// Add the definitions in `text` to this registry.
    ///
    /// Blocks may extend vendors already present. On error the registry is
    /// left unchanged.
    pub fn load_str(&mut self, text: &str) -> Result<(), DictionaryError> {
        let mut staged = self.clone();
        parser::parse_into(&mut staged, text)?;
        *self = staged;
        Ok(())
    }

    /// Add the definitions in a dictionary file to this registry
    pub fn load_file(&mut self, path: impl AsRef<Path>) -> Result<(), DictionaryError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| DictionaryError::Io {
            path: path.display().to_string(),
            source,
        })?;
        self.load_str(&text).map_err(|e| DictionaryError::File {
            file: path.display().to_string(),
            source: Box::new(e),
        })?;
        debug!(path = %path.display(), "Loaded dictionary file");
        Ok(())
    }

    /// Layer `other` on top of this registry.
    ///
    /// A vendor in `other` replaces any vendor here with the same id or the
    /// same name.
    pub fn merge(&mut self, other: Dictionary) {
        for vendor in other.vendors.into_values() {
            self.replace_vendor(vendor);
        }
    }

    fn replace_vendor(&mut self, vendor: VendorDictionary) {
        let key = vendor.name().to_ascii_lowercase();
        if let Some(old_id) = self.names.remove(&key) {
            self.vendors.remove(&old_id);
        }
        if let Some(old) = self.vendors.remove(&vendor.vendor_id()) {
            self.names.remove(&old.name().to_ascii_lowercase());
        }
        debug!(vendor = vendor.name(), vendor_id = vendor.vendor_id(), "Replacing vendor");
        self.names.insert(key, vendor.vendor_id());
        self.vendors.insert(vendor.vendor_id(), vendor);
    }

    pub fn vendor(&self, vendor_id: u32) -> Option<&VendorDictionary> {
        self.vendors.get(&vendor_id)
    }

    /// Look up a vendor by name, ignoring ASCII case
    pub fn vendor_by_name(&self, name: &str) -> Option<&VendorDictionary> {
        self.names
            .get(&name.to_ascii_lowercase())
            .and_then(|id| self.vendors.get(id))
    }

    /// Look up a vendor by name or by decimal vendor id
    pub fn resolve_vendor(&self, name_or_id: &str) -> Result<&VendorDictionary, DictionaryError> {
        self.vendor_by_name(name_or_id)
            .or_else(|| {
                name_or_id
                    .parse::<u32>()
                    .ok()
                    .and_then(|id| self.vendor(id))
            })
            .ok_or_else(|| DictionaryError::VendorNotFound(name_or_id.to_string()))
    }

    /// Vendors ordered by vendor id
    pub fn vendors(&self) -> impl Iterator<Item = &VendorDictionary> {
        self.vendors.values()
    }

    pub fn len(&self) -> usize {
        self.vendors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vendors.is_empty()
    }

    /// Decode a vendor attribute against the matching vendor table.
    ///
    /// Attributes of unknown vendors are described as raw octets.
    pub fn describe(&self, vsa: &VendorSpecific) -> Result<DescribedAttribute, DictionaryError> {
        match self.vendor(vsa.vendor_id()) {
            Some(vendor) => vendor.describe(vsa),
            None => Ok(DescribedAttribute::unknown(vsa)),
        }
    }

    pub(crate) fn declare_vendor(
        &mut self,
        name: &str,
        vendor_id: u32,
        line: usize,
    ) -> Result<(), DictionaryError> {
        let key = name.to_ascii_lowercase();
        let by_name = self.names.get(&key).copied();
        let by_id = self.vendors.get(&vendor_id).map(|v| v.name().to_ascii_lowercase());

        match (by_name, by_id) {
            (None, None) => {
                self.names.insert(key, vendor_id);
                self.vendors
                    .insert(vendor_id, VendorDictionary::new(name, vendor_id));
                Ok(())
            }
            (Some(id), Some(existing)) if id == vendor_id && existing == key => Ok(()),
            _ => Err(DictionaryError::DuplicateVendor {
                line,
                name: name.to_string(),
                vendor_id,
            }),
        }
    }

    pub(crate) fn vendor_mut(&mut self, vendor_id: u32) -> Option<&mut VendorDictionary> {
        self.vendors.get_mut(&vendor_id)
    }
}

impl FromStr for Dictionary {
    type Err = DictionaryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Dictionary::parse(s)
    }
}
