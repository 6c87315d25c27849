//! Chip registry - named chips and their metadata sections
//!
//! A design keeps its chips in a [`ChipRegistry`]. Each [`ChipRecord`] is a
//! loose mapping of named sections to arbitrary data, so that whatever a
//! design file holds survives a load. The only section interpreted here is
//! `size`, which is extracted into the fixed-shape [`ChipSize`].

use serde::{Deserialize, Serialize};
use serde_yml::{Mapping, Value};
use std::collections::BTreeMap;
use thiserror::Error;

use crate::core::bounds::BoundingRectangle;

/// Name of the chip seeded into every new planar design
pub const MAIN_CHIP: &str = "main";

/// Name of the section holding center and size information
pub const SIZE_SECTION: &str = "size";

/// Fields a size section must carry, in check order
pub const SIZE_FIELDS: [&str; 4] = ["center_x", "center_y", "size_x", "size_y"];

/// Default chip geometry in meters: 5mm x 5mm centered at the origin.
///
/// Export tooling works in 1 meter units and converts to the user-selected
/// unit only when a file is written.
pub const DEFAULT_CHIP_SIZE: ChipSize = ChipSize {
    center_x: 0.0,
    center_y: 0.0,
    size_x: 0.005,
    size_y: 0.005,
};

/// Problems found while reading a chip's size section
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SizeError {
    #[error("size information is not in the chip record")]
    MissingSection,

    #[error("size information is missing {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),

    #[error("size information field '{0}' is not an int or float")]
    NotNumeric(&'static str),
}

/// Center and full extent of a rectangular chip, in meters
///
/// `size_x` and `size_y` are full width and height, not half-extents.
/// Zero or negative sizes are accepted as-is.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChipSize {
    pub center_x: f64,
    pub center_y: f64,
    pub size_x: f64,
    pub size_y: f64,
}

impl ChipSize {
    /// Read a size section, checking field presence before field types
    pub fn from_section(section: &Value) -> Result<Self, SizeError> {
        let empty = Mapping::new();
        let fields = section.as_mapping().unwrap_or(&empty);

        let missing: Vec<&'static str> = SIZE_FIELDS
            .iter()
            .copied()
            .filter(|name| !fields.contains_key(*name))
            .collect();
        if !missing.is_empty() {
            return Err(SizeError::MissingFields(missing));
        }

        // Booleans count as integers 0 and 1.
        let numeric = |name: &'static str| -> Result<f64, SizeError> {
            match fields.get(name) {
                Some(Value::Number(n)) => n.as_f64().ok_or(SizeError::NotNumeric(name)),
                Some(Value::Bool(b)) => Ok(f64::from(u8::from(*b))),
                _ => Err(SizeError::NotNumeric(name)),
            }
        };

        Ok(Self {
            center_x: numeric("center_x")?,
            center_y: numeric("center_y")?,
            size_x: numeric("size_x")?,
            size_y: numeric("size_y")?,
        })
    }

    /// Convert back into a section value for storage in a chip record.
    ///
    /// Non-finite values are kept as YAML `.inf`/`.nan`.
    pub fn to_section(&self) -> Value {
        let values = [self.center_x, self.center_y, self.size_x, self.size_y];
        let mut fields = Mapping::new();
        for (name, value) in SIZE_FIELDS.iter().zip(values) {
            fields.insert(Value::from(*name), Value::from(value));
        }
        Value::Mapping(fields)
    }

    /// Axis-aligned rectangle covered by this chip
    pub fn bounds(&self) -> BoundingRectangle {
        let half_x = self.size_x / 2.0;
        let half_y = self.size_y / 2.0;
        BoundingRectangle {
            min_x: self.center_x - half_x,
            min_y: self.center_y - half_y,
            max_x: self.center_x + half_x,
            max_y: self.center_y + half_y,
        }
    }
}

/// Metadata sections of a single chip
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChipRecord {
    sections: BTreeMap<String, Value>,
}

impl ChipRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record holding only a size section
    pub fn with_size(size: ChipSize) -> Self {
        let mut record = Self::new();
        record.set_size(size);
        record
    }

    pub fn section(&self, name: &str) -> Option<&Value> {
        self.sections.get(name)
    }

    pub fn set_section(&mut self, name: impl Into<String>, value: Value) {
        self.sections.insert(name.into(), value);
    }

    pub fn has_section(&self, name: &str) -> bool {
        self.sections.contains_key(name)
    }

    pub fn section_names(&self) -> impl Iterator<Item = &str> {
        self.sections.keys().map(String::as_str)
    }

    /// Typed view of the size section
    pub fn size(&self) -> Result<ChipSize, SizeError> {
        let section = self
            .section(SIZE_SECTION)
            .ok_or(SizeError::MissingSection)?;
        ChipSize::from_section(section)
    }

    pub fn set_size(&mut self, size: ChipSize) {
        self.set_section(SIZE_SECTION, size.to_section());
    }
}

/// All chips of a design, keyed by unique chip name
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChipRegistry {
    chips: BTreeMap<String, ChipRecord>,
}

impl ChipRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&ChipRecord> {
        self.chips.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut ChipRecord> {
        self.chips.get_mut(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.chips.contains_key(name)
    }

    /// Insert a chip, replacing any record already under that name
    pub fn insert(&mut self, name: impl Into<String>, record: ChipRecord) -> Option<ChipRecord> {
        self.chips.insert(name.into(), record)
    }

    /// Get a chip record, creating an empty one if needed
    pub fn entry(&mut self, name: impl Into<String>) -> &mut ChipRecord {
        self.chips.entry(name.into()).or_default()
    }

    pub fn remove(&mut self, name: &str) -> Option<ChipRecord> {
        self.chips.remove(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.chips.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ChipRecord)> {
        self.chips.iter().map(|(name, record)| (name.as_str(), record))
    }

    pub fn len(&self) -> usize {
        self.chips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chips.is_empty()
    }
}

/// Seed the `main` chip with the default 5mm x 5mm geometry.
///
/// Any existing `main` record is replaced, including sections other than
/// `size`.
pub fn initialize_default_chip(registry: &mut ChipRegistry) {
    registry.insert(MAIN_CHIP, ChipRecord::with_size(DEFAULT_CHIP_SIZE));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn yaml(src: &str) -> Value {
        serde_yml::from_str(src).unwrap()
    }

    #[test]
    fn test_initialize_default_chip_seeds_main() {
        let mut registry = ChipRegistry::new();
        initialize_default_chip(&mut registry);

        let main = registry.get(MAIN_CHIP).unwrap();
        assert_eq!(main.size().unwrap(), DEFAULT_CHIP_SIZE);
        assert_eq!(main.section_names().collect::<Vec<_>>(), vec!["size"]);
    }

    #[test]
    fn test_initialize_default_chip_overwrites_main() {
        let mut registry = ChipRegistry::new();
        let mut custom = ChipRecord::new();
        custom.set_section("material", Value::from("silicon"));
        custom.set_section("size", yaml("{center_x: 1, center_y: 1, size_x: 2, size_y: 2}"));
        registry.insert(MAIN_CHIP, custom);
        registry.insert("other", ChipRecord::new());

        initialize_default_chip(&mut registry);

        let main = registry.get(MAIN_CHIP).unwrap();
        assert!(!main.has_section("material"));
        assert_eq!(main.size().unwrap(), DEFAULT_CHIP_SIZE);
        assert!(registry.contains("other"));
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_size_missing_section() {
        let record = ChipRecord::new();
        assert_eq!(record.size().unwrap_err(), SizeError::MissingSection);
    }

    #[test]
    fn test_size_missing_fields_listed_in_order() {
        let section = yaml("{center_x: 0.0, size_x: 1.0}");
        let err = ChipSize::from_section(&section).unwrap_err();
        assert_eq!(err, SizeError::MissingFields(vec!["center_y", "size_y"]));
        assert_eq!(
            err.to_string(),
            "size information is missing center_y, size_y"
        );
    }

    #[test]
    fn test_size_presence_checked_before_type() {
        let section = yaml("{center_x: bad, size_x: 1.0, size_y: 1.0}");
        let err = ChipSize::from_section(&section).unwrap_err();
        assert_eq!(err, SizeError::MissingFields(vec!["center_y"]));
    }

    #[test]
    fn test_size_non_numeric_field() {
        let section = yaml("{center_x: 0, center_y: 0, size_x: bad, size_y: 1}");
        let err = ChipSize::from_section(&section).unwrap_err();
        assert_eq!(err, SizeError::NotNumeric("size_x"));
    }

    #[test]
    fn test_size_rejects_null_and_quoted_numbers() {
        let section = yaml("{center_x: ~, center_y: 0, size_x: 1, size_y: 1}");
        assert_eq!(
            ChipSize::from_section(&section).unwrap_err(),
            SizeError::NotNumeric("center_x")
        );

        let section = yaml("{center_x: 0, center_y: '0.5', size_x: 1, size_y: 1}");
        assert_eq!(
            ChipSize::from_section(&section).unwrap_err(),
            SizeError::NotNumeric("center_y")
        );
    }

    #[test]
    fn test_size_treats_bool_as_integer() {
        let section = yaml("{center_x: 0, center_y: false, size_x: true, size_y: 1}");
        let size = ChipSize::from_section(&section).unwrap();
        assert_eq!(size.center_y, 0.0);
        assert_eq!(size.size_x, 1.0);
        assert_eq!(size.bounds().as_tuple(), (-0.5, -0.5, 0.5, 0.5));
    }

    #[test]
    fn test_size_non_mapping_section_has_no_fields() {
        let err = ChipSize::from_section(&Value::from("5mm")).unwrap_err();
        assert_eq!(err, SizeError::MissingFields(SIZE_FIELDS.to_vec()));
    }

    #[test]
    fn test_size_accepts_integers_and_negative_sizes() {
        let section = yaml("{center_x: 1, center_y: -2, size_x: -4, size_y: 0}");
        let size = ChipSize::from_section(&section).unwrap();
        assert_eq!(
            size,
            ChipSize {
                center_x: 1.0,
                center_y: -2.0,
                size_x: -4.0,
                size_y: 0.0
            }
        );
    }

    #[test]
    fn test_non_finite_size_survives_storage() {
        let size = ChipSize {
            center_x: f64::NAN,
            center_y: 0.0,
            size_x: f64::INFINITY,
            size_y: 1.0,
        };
        let stored = ChipRecord::with_size(size).size().unwrap();

        assert!(stored.center_x.is_nan());
        assert_eq!(stored.size_x, f64::INFINITY);
        assert_eq!(stored.size_y, 1.0);
    }

    #[test]
    fn test_yaml_infinity_is_numeric() {
        let section = yaml("{center_x: 0, center_y: 0, size_x: .inf, size_y: -.inf}");
        let size = ChipSize::from_section(&section).unwrap();
        assert_eq!(size.size_x, f64::INFINITY);
        assert_eq!(size.size_y, f64::NEG_INFINITY);
    }

    #[test]
    fn test_registry_serializes_as_plain_mapping() {
        let mut registry = ChipRegistry::new();
        initialize_default_chip(&mut registry);

        let value = serde_json::to_value(&registry).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"main": {"size": {"center_x": 0.0, "center_y": 0.0, "size_x": 0.005, "size_y": 0.005}}})
        );
    }

    #[test]
    fn test_registry_entry_creates_empty_record() {
        let mut registry = ChipRegistry::new();
        registry.entry("q1").set_size(DEFAULT_CHIP_SIZE);
        assert!(registry.contains("q1"));
        assert_eq!(registry.names().collect::<Vec<_>>(), vec!["q1"]);
    }
}
