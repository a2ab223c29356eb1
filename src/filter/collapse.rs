use super::normalize::normalize;
use crate::{config::DEFAULT_DISPLAY_COLLAPSE, types::Memo};

/// Shortens report descriptions that start with a known prefix to that
/// prefix. Affects the report only, never the filtered statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayCollapse {
    /// `(normalized prefix, display form)`
    prefixes: Vec<(String, String)>,
}

impl DisplayCollapse {
    pub fn new<I, S>(prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let prefixes = prefixes
            .into_iter()
            .map(|prefix| (normalize(prefix.as_ref()), prefix.as_ref().trim().to_string()))
            .filter(|(normalized, _)| !normalized.is_empty())
            .collect();

        Self { prefixes }
    }

    pub fn display(&self, memo: &Memo) -> String {
        let Some(text) = memo.as_text() else {
            return memo.to_string();
        };

        let normalized = normalize(text);
        self.prefixes
            .iter()
            .find(|(prefix, _)| normalized.starts_with(prefix.as_str()))
            .map_or_else(|| text.to_string(), |(_, short)| short.clone())
    }
}

impl Default for DisplayCollapse {
    fn default() -> Self {
        Self::new(DEFAULT_DISPLAY_COLLAPSE)
    }
}
