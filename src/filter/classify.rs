use log::{trace, warn};

use super::{normalize::normalize, traits::Classifier};
use crate::{
    config::DEFAULT_EXCLUSION_PATTERNS,
    types::{Memo, Verdict},
};

/// Normalized exclusion patterns, matched as prefixes of the normalized memo.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExclusionPatterns {
    patterns: Vec<String>,
}

impl ExclusionPatterns {
    /// Patterns that normalize to an empty string are dropped, since an empty
    /// prefix would match every record.
    pub fn new<I, S>(patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let patterns = patterns
            .into_iter()
            .filter_map(|pattern| {
                let normalized = normalize(pattern.as_ref());
                if normalized.is_empty() {
                    warn!("ignoring empty exclusion pattern {:?}", pattern.as_ref());
                    None
                } else {
                    Some(normalized)
                }
            })
            .collect();

        Self { patterns }
    }

    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    /// First pattern the memo text starts with, after normalization.
    pub fn matching(&self, text: &str) -> Option<&str> {
        let memo = normalize(text);
        self.patterns
            .iter()
            .find(|pattern| memo.starts_with(pattern.as_str()))
            .map(String::as_str)
    }
}

impl Default for ExclusionPatterns {
    fn default() -> Self {
        Self::new(DEFAULT_EXCLUSION_PATTERNS)
    }
}

impl Classifier for ExclusionPatterns {
    fn classify(&self, memo: &Memo) -> Verdict {
        let Some(text) = memo.as_text() else {
            return Verdict::Keep;
        };

        match self.matching(text) {
            Some(pattern) => {
                trace!("{text:?} matches exclusion pattern {pattern:?}");
                Verdict::Exclude
            }
            None => Verdict::Keep,
        }
    }
}
