use std::{fs, path::Path};

use serde::{Deserialize, Serialize};

use crate::errors::FilterResult;

/// Automatic-investment descriptions whose records are removed.
pub const DEFAULT_EXCLUSION_PATTERNS: &[&str] = &[
    "RESGATE INVEST FACIL",
    "APLIC.INVEST FACIL",
    "APLIC.AUTOM.INVESTFACIL",
    "RESG.AUTOM.INVEST FACIL",
];

/// Redemption descriptions that banks follow with variable detail text. A
/// memo starting with one of these is reported under the short form.
pub const DEFAULT_DISPLAY_COLLAPSE: &[&str] = &["RESGATE INVEST FACIL", "RESG.AUTOM.INVEST FACIL"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FilterConfig {
    pub exclusion_patterns: Vec<String>,
    pub display_collapse: Vec<String>,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            exclusion_patterns: to_owned(DEFAULT_EXCLUSION_PATTERNS),
            display_collapse: to_owned(DEFAULT_DISPLAY_COLLAPSE),
        }
    }
}

fn to_owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl FilterConfig {
    /// Missing keys fall back to the built-in lists.
    pub fn from_json(json: &str) -> FilterResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> FilterResult<Self> {
        Self::from_json(&fs::read_to_string(path)?)
    }
}
