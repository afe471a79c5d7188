use std::collections::BTreeMap;
use std::path::Path;

use crate::config::ConfigError;

/// Folder identifiers of the gearbox/motor collection and what they look like.
const BUILTIN_NAMES: [(&str, &str); 15] = [
    ("new", "light grey vertical industrial gear motor"),
    ("JB00039888", "red and silver vertical planetary gear motor"),
    ("JB00040002", "large red right-angle industrial gearbox"),
    ("JB00047922", "teal vertical electric gear motor"),
    ("JB00024791", "light blue-grey vertical gear motor"),
    ("JB00024827", "red vertical planetary gear motor with black ring"),
    ("JB00028415", "red right-angle bevel gearbox"),
    ("JB00018206", "grey vertical industrial electric motor"),
    ("JB00020032", "red vertical planetary gearbox housing without motor"),
    ("JB00024563", "red vertical gearbox with tall silver electric motor"),
    (
        "2T7094VA79A06",
        "red vertical planetary gearbox with silver aluminum top housing",
    ),
    (
        "JB00015001",
        "red right-angle industrial elbow gearbox with open flange",
    ),
    (
        "JB00015906",
        "short cylindrical planetary gear module with black ring and flat top",
    ),
    (
        "2T704T1004A03",
        "small squat red planetary gear hub with white cap",
    ),
    (
        "2T7094VA79A05",
        "red planetary gearbox with silver right-angle worm drive on top",
    ),
];

/// Read-only mapping from raw class folder identifiers to semantic descriptions.
///
/// Identifiers missing from the table resolve to themselves.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SemanticNames {
    entries: BTreeMap<String, String>,
}

impl SemanticNames {
    /// Table for the gearbox/motor folder identifiers shipped with the tool.
    pub fn builtin() -> Self {
        BUILTIN_NAMES
            .iter()
            .map(|(id, name)| (id.to_string(), name.to_string()))
            .collect()
    }

    /// Parse a TOML file of `identifier = "description"` pairs.
    pub fn load_toml(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let entries: BTreeMap<String, String> =
            toml::from_str(&text).map_err(|source| ConfigError::ParseToml {
                path: path.to_path_buf(),
                source,
            })?;
        Ok(Self { entries })
    }

    /// Return a table with `other` layered on top of `self`.
    pub fn merged(mut self, other: SemanticNames) -> Self {
        self.entries.extend(other.entries);
        self
    }

    /// Semantic name for a class folder, falling back to the folder name.
    ///
    /// Underscores are replaced with spaces in either case.
    pub fn resolve(&self, folder_name: &str) -> String {
        self.entries
            .get(folder_name)
            .map(String::as_str)
            .unwrap_or(folder_name)
            .replace('_', " ")
    }

    pub fn get(&self, folder_name: &str) -> Option<&str> {
        self.entries.get(folder_name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(String, String)> for SemanticNames {
    fn from_iter<T: IntoIterator<Item = (String, String)>>(iter: T) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
