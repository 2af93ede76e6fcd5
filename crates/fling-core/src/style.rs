//! Style store: named properties resolved per component.
//!
//! A store holds layered YAML style sheets. Each sheet maps selectors to
//! property tables:
//!
//! ```yaml
//! types:
//!   FingerScroll:
//!     decel-rate: 1.2
//! classes:
//!   photo-grid:
//!     column-gap: 8
//! ids:
//!   main-expander:
//!     padding: { top: 4, right: 4, bottom: 4, left: 4 }
//! ```
//!
//! Lookup prefers an id match, then a class match, then a type match.
//! Author sheets beat user-agent sheets; among sheets of equal priority the
//! one loaded last wins. Registered property defaults apply when nothing
//! matches.
//!
//! There is no process-wide store. Construct one and pass it where it is
//! needed; [`StyleStore::with_default_theme`] gives the conventional setup.

use crate::error::{FlingError, Result};
use crate::geometry::Padding;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Environment variable naming the default theme file.
pub const STYLE_FILE_ENV: &str = "FLING_STYLE_FILE";

/// A property value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StyleValue {
    /// Boolean flag
    Flag(bool),
    /// Number (integers are stored as floats)
    Number(f64),
    /// String
    Text(String),
    /// Four-sided padding
    Padding(Padding),
}

impl StyleValue {
    const fn kind(&self) -> &'static str {
        match self {
            Self::Flag(_) => "flag",
            Self::Number(_) => "number",
            Self::Text(_) => "string",
            Self::Padding(_) => "padding",
        }
    }
}

/// Origin of a style sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum StylePriority {
    /// Toolkit theme
    #[default]
    UserAgent,
    /// Application sheet, overrides the theme
    Author,
}

/// Something that can be styled.
pub trait Stylable {
    /// Type selector, usually the component's type name.
    fn style_type(&self) -> &str;

    /// Class selector.
    fn style_class(&self) -> Option<&str> {
        None
    }

    /// Id selector.
    fn style_id(&self) -> Option<&str> {
        None
    }
}

/// Plain selector triple, for callers without a component at hand.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Selector {
    /// Type name
    pub type_name: String,
    /// Optional class
    pub class: Option<String>,
    /// Optional id
    pub id: Option<String>,
}

impl Selector {
    /// Selector matching on type only.
    #[must_use]
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            ..Self::default()
        }
    }

    /// Set the class.
    #[must_use]
    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.class = Some(class.into());
        self
    }

    /// Set the id.
    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }
}

impl Stylable for Selector {
    fn style_type(&self) -> &str {
        &self.type_name
    }

    fn style_class(&self) -> Option<&str> {
        self.class.as_deref()
    }

    fn style_id(&self) -> Option<&str> {
        self.id.as_deref()
    }
}

type PropertyTable = HashMap<String, StyleValue>;

/// One parsed style document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleSheet {
    /// Properties by type name
    pub types: HashMap<String, PropertyTable>,
    /// Properties by class
    pub classes: HashMap<String, PropertyTable>,
    /// Properties by id
    pub ids: HashMap<String, PropertyTable>,
}

impl StyleSheet {
    /// Parse a YAML document.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        Ok(serde_yaml_ng::from_str(yaml)?)
    }

    fn lookup(&self, stylable: &dyn Stylable, property: &str) -> Option<&StyleValue> {
        let by_id = stylable
            .style_id()
            .and_then(|id| self.ids.get(id))
            .and_then(|table| table.get(property));
        let by_class = || {
            stylable
                .style_class()
                .and_then(|class| self.classes.get(class))
                .and_then(|table| table.get(property))
        };
        let by_type = || {
            self.types
                .get(stylable.style_type())
                .and_then(|table| table.get(property))
        };
        by_id.or_else(by_class).or_else(by_type)
    }
}

/// Layered style sheets plus registered property defaults.
#[derive(Debug, Clone, Default)]
pub struct StyleStore {
    // Sorted by priority, then load order.
    sheets: Vec<(StylePriority, StyleSheet)>,
    defaults: PropertyTable,
    generation: u64,
}

impl StyleStore {
    /// Empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store with the theme named by `FLING_STYLE_FILE` loaded at user-agent
    /// priority. A missing variable yields an empty store; an unreadable or
    /// malformed file is logged and skipped.
    #[must_use]
    pub fn with_default_theme() -> Self {
        let mut store = Self::new();
        if let Some(path) = std::env::var_os(STYLE_FILE_ENV) {
            if let Err(err) = store.load_from_file(&path, StylePriority::UserAgent) {
                tracing::error!(
                    path = %Path::new(&path).display(),
                    error = %err,
                    "failed to load default theme"
                );
            }
        }
        store
    }

    /// Register a property with its default value.
    pub fn register_property(&mut self, name: impl Into<String>, default: StyleValue) {
        self.defaults.insert(name.into(), default);
    }

    /// Add an already-parsed sheet.
    pub fn add_sheet(&mut self, sheet: StyleSheet, priority: StylePriority) {
        let index = self.sheets.partition_point(|(p, _)| *p <= priority);
        self.sheets.insert(index, (priority, sheet));
        self.generation += 1;
        tracing::debug!(
            ?priority,
            generation = self.generation,
            sheets = self.sheets.len(),
            "style sheet added"
        );
    }

    /// Parse and add a YAML sheet.
    pub fn load_from_str(&mut self, yaml: &str, priority: StylePriority) -> Result<()> {
        let sheet = StyleSheet::from_yaml(yaml)?;
        self.add_sheet(sheet, priority);
        Ok(())
    }

    /// Read, parse and add a YAML sheet.
    pub fn load_from_file(&mut self, path: impl AsRef<Path>, priority: StylePriority) -> Result<()> {
        let path = path.as_ref();
        let yaml = std::fs::read_to_string(path)?;
        self.load_from_str(&yaml, priority)?;
        tracing::info!(path = %path.display(), "loaded style sheet");
        Ok(())
    }

    /// Bumped every time a sheet is added. Consumers cache against it.
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    /// Number of loaded sheets.
    #[must_use]
    pub fn sheet_count(&self) -> usize {
        self.sheets.len()
    }

    /// Resolve a property, falling back to its registered default.
    #[must_use]
    pub fn get(&self, stylable: &dyn Stylable, property: &str) -> Option<&StyleValue> {
        self.sheets
            .iter()
            .rev()
            .find_map(|(_, sheet)| sheet.lookup(stylable, property))
            .or_else(|| self.defaults.get(property))
    }

    /// Resolve a numeric property.
    pub fn number(&self, stylable: &dyn Stylable, property: &str) -> Result<Option<f64>> {
        match self.get(stylable, property) {
            None => Ok(None),
            Some(StyleValue::Number(n)) => Ok(Some(*n)),
            Some(other) => Err(type_error(property, "number", other)),
        }
    }

    /// Resolve a string property.
    pub fn text(&self, stylable: &dyn Stylable, property: &str) -> Result<Option<&str>> {
        match self.get(stylable, property) {
            None => Ok(None),
            Some(StyleValue::Text(s)) => Ok(Some(s.as_str())),
            Some(other) => Err(type_error(property, "string", other)),
        }
    }

    /// Resolve a boolean property.
    pub fn flag(&self, stylable: &dyn Stylable, property: &str) -> Result<Option<bool>> {
        match self.get(stylable, property) {
            None => Ok(None),
            Some(StyleValue::Flag(b)) => Ok(Some(*b)),
            Some(other) => Err(type_error(property, "flag", other)),
        }
    }

    /// Resolve a padding property. A bare number means uniform padding.
    pub fn padding(&self, stylable: &dyn Stylable, property: &str) -> Result<Option<Padding>> {
        match self.get(stylable, property) {
            None => Ok(None),
            Some(StyleValue::Padding(p)) => Ok(Some(*p)),
            Some(StyleValue::Number(n)) => Ok(Some(Padding::uniform(*n as f32))),
            Some(other) => Err(type_error(property, "padding", other)),
        }
    }
}

fn type_error(property: &str, expected: &'static str, found: &StyleValue) -> FlingError {
    tracing::warn!(property, expected, found = found.kind(), "style type mismatch");
    FlingError::StyleType {
        property: property.to_string(),
        expected,
    }
}
