use std::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Shown in place of a description for records without a `<MEMO>` line.
pub const NO_MEMO: &str = "(no memo)";

/// Description field of one transaction record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Memo {
    Text(String),
    Missing,
}

impl Memo {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Memo::Text(text) => Some(text),
            Memo::Missing => None,
        }
    }
}

impl fmt::Display for Memo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_text().unwrap_or(NO_MEMO))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Keep,
    Exclude,
}

impl Verdict {
    pub fn is_keep(self) -> bool {
        self == Verdict::Keep
    }

    /// Report label: `kept` or `excluded`.
    pub fn as_str(self) -> &'static str {
        match self {
            Verdict::Keep => "kept",
            Verdict::Exclude => "excluded",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Report entry for one transaction record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockSummary {
    /// Display description; long redemption descriptions are collapsed.
    pub memo: String,
    pub verdict: Verdict,
    pub transaction_type: Option<String>,
    pub posted: Option<NaiveDate>,
    pub amount: Option<Decimal>,
    pub fitid: Option<String>,
}

/// Result of filtering one statement.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterOutcome {
    /// Filtered statement, same encoding as the input.
    pub filtered: Vec<u8>,
    pub excluded: Vec<BlockSummary>,
    pub kept: Vec<BlockSummary>,
}

impl FilterOutcome {
    pub fn excluded_memos(&self) -> Vec<&str> {
        self.excluded.iter().map(|s| s.memo.as_str()).collect()
    }

    pub fn kept_memos(&self) -> Vec<&str> {
        self.kept.iter().map(|s| s.memo.as_str()).collect()
    }

    pub fn block_count(&self) -> usize {
        self.excluded.len() + self.kept.len()
    }

    /// Sum of the amounts that could be read; records without one are skipped.
    pub fn excluded_total(&self) -> Decimal {
        self.excluded.iter().filter_map(|s| s.amount).sum()
    }

    pub fn kept_total(&self) -> Decimal {
        self.kept.iter().filter_map(|s| s.amount).sum()
    }

    /// `(filtered bytes, excluded memos, kept memos)`.
    pub fn into_parts(self) -> (Vec<u8>, Vec<String>, Vec<String>) {
        let memos = |summaries: Vec<BlockSummary>| -> Vec<String> {
            summaries.into_iter().map(|s| s.memo).collect()
        };
        (self.filtered, memos(self.excluded), memos(self.kept))
    }
}
