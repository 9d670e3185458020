//! Dependency classification table
//!
//! Maps raw dependency-relation labels (as produced by a dependency parser)
//! to the `(category, subtype)` pair used to name relation nodes in the
//! ontology. Lookup is exact-match only: composite labels such as
//! `advmod:mnr` are enumerated in the table and never split at runtime.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Subtype for labels that carry no refinement
pub const NONE_SUBTYPE: &str = "NONE";

/// Subtype assigned to labels missing from the table
pub const UNKNOWN_SUBTYPE: &str = "none";

/// Built-in label table: (label, category, subtype)
const STANDARD_DEPENDENCIES: &[(&str, &str, &str)] = &[
    ("root", "ROOT", NONE_SUBTYPE),
    ("nsubj", "NSUBJ", NONE_SUBTYPE),
    ("obj", "OBJ", NONE_SUBTYPE),
    ("iobj", "IOBJ", NONE_SUBTYPE),
    ("nummod", "NUMMOD", NONE_SUBTYPE),
    ("ccomp", "CCOMP", NONE_SUBTYPE),
    ("xcomp", "XCOMP", NONE_SUBTYPE),
    ("acl", "ACL", NONE_SUBTYPE),
    // Adverbial modifiers
    ("advmod", "ADVMOD", NONE_SUBTYPE),
    ("advmod:mnr", "ADVMOD", "MANNER"),
    ("advmod:dgr", "ADVMOD", "DEGREE"),
    ("advmod:plc", "ADVMOD", "PLACE"),
    ("advmod:time", "ADVMOD", "TIME"),
    ("advmod:idf", "ADVMOD", "INDEFINITE_FREQUENCY"),
    ("advmod:df", "ADVMOD", "DEFINITE_FREQUENCY"),
    // Adjectival modifiers, in conventional adjective order
    ("amod", "AMOD", NONE_SUBTYPE),
    ("amod:opn", "AMOD", "OPINION"),
    ("amod:size", "AMOD", "SIZE"),
    ("amod:pq", "AMOD", "PHYSICAL_QUALITY"),
    ("amod:shp", "AMOD", "SHAPE"),
    ("amod:age", "AMOD", "AGE"),
    ("amod:clr", "AMOD", "COLOUR"),
    ("amod:orgn", "AMOD", "ORIGIN"),
    ("amod:mtrl", "AMOD", "MATERIAL"),
    ("amod:type", "AMOD", "TYPES"),
    ("amod:prps", "AMOD", "PURPOSE"),
    ("aux", "AUX", NONE_SUBTYPE),
    ("cop", "COP", NONE_SUBTYPE),
    ("mark", "MARK", NONE_SUBTYPE),
    ("det", "DET", NONE_SUBTYPE),
    ("det:predet", "DET", "PREDET"),
    ("cc", "CC", NONE_SUBTYPE),
    ("compound", "COMPOUND", NONE_SUBTYPE),
];

/// Classification of a dependency label
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DependencyClass {
    /// Relation category (e.g. `ADVMOD`)
    pub category: String,

    /// Refinement of the category, `NONE` when absent
    pub subtype: String,
}

impl DependencyClass {
    /// Create a new classification
    pub fn new(category: impl Into<String>, subtype: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            subtype: subtype.into(),
        }
    }

    /// Local name of the relation node, e.g. `ADVMOD_MANNER`
    pub fn node_name(&self) -> String {
        format!("{}_{}", self.category, self.subtype)
    }
}

impl fmt::Display for DependencyClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.category, self.subtype)
    }
}

/// Immutable label -> classification table
///
/// Built once per process and handed to the generators that need it.
#[derive(Debug, Clone)]
pub struct DependencyTable {
    entries: HashMap<&'static str, (&'static str, &'static str)>,
}

impl DependencyTable {
    /// Build the standard table
    pub fn standard() -> Self {
        let entries = STANDARD_DEPENDENCIES
            .iter()
            .map(|&(label, category, subtype)| (label, (category, subtype)))
            .collect();
        Self { entries }
    }

    /// Classify a label.
    ///
    /// Unknown labels pass through unchanged as `(label, "none")`.
    pub fn classify(&self, label: &str) -> DependencyClass {
        match self.entries.get(label) {
            Some(&(category, subtype)) => DependencyClass::new(category, subtype),
            None => DependencyClass::new(label, UNKNOWN_SUBTYPE),
        }
    }

    /// Whether the label has an entry in the table
    pub fn contains(&self, label: &str) -> bool {
        self.entries.contains_key(label)
    }

    /// Number of known labels
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Known labels in table order
    pub fn labels(&self) -> impl Iterator<Item = &'static str> {
        STANDARD_DEPENDENCIES.iter().map(|&(label, _, _)| label)
    }
}

impl Default for DependencyTable {
    fn default() -> Self {
        Self::standard()
    }
}

// ============================================================================
// Tests
// ============================================================================
