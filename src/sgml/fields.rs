use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::segment::Block;
use crate::types::Memo;

pub const MEMO_TAG: &str = "<MEMO>";

/// Value of the first line in `block` whose trimmed text starts with `tag`
/// (e.g. `"<TRNAMT>"`).
///
/// SGML leaf tags are unclosed, so the value is the rest of the line. Repeats
/// of the tag and a closing `</TAG>` left by XML-flavoured exporters are
/// dropped.
pub fn leaf_value(block: &Block<'_>, tag: &str) -> Option<String> {
    let line = block
        .lines()
        .iter()
        .map(|line| line.trim())
        .find(|line| line.starts_with(tag))?;

    let value = line[tag.len()..].replace(tag, "");
    let closing = format!("</{}", tag.strip_prefix('<').unwrap_or(tag));
    let value = match value.find(&closing) {
        Some(end) => &value[..end],
        None => value.as_str(),
    };

    Some(value.trim().to_string())
}

pub fn extract_memo(block: &Block<'_>) -> Memo {
    match leaf_value(block, MEMO_TAG) {
        Some(text) => Memo::Text(text),
        None => Memo::Missing,
    }
}

/// `DTPOSTED` value, `YYYYMMDD` optionally followed by time, fraction and a
/// `[offset:TZ]` suffix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OfxDate(String);

impl From<&str> for OfxDate {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for OfxDate {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl OfxDate {
    pub fn to_naive_date(&self) -> Option<NaiveDate> {
        let clean = self.0.split(&['[', '.'][..]).next()?.trim();
        let year = clean.get(0..4)?.parse().ok()?;
        let month = clean.get(4..6)?.parse().ok()?;
        let day = clean.get(6..8)?.parse().ok()?;

        NaiveDate::from_ymd_opt(year, month, day)
    }
}

pub fn posted_date(block: &Block<'_>) -> Option<NaiveDate> {
    leaf_value(block, "<DTPOSTED>").and_then(|value| OfxDate::from(value).to_naive_date())
}

/// `TRNAMT` value. Brazilian exporters sometimes write a decimal comma.
pub fn amount(block: &Block<'_>) -> Option<Decimal> {
    let value = leaf_value(block, "<TRNAMT>")?;
    Decimal::from_str(&value.replace(',', ".")).ok()
}

pub fn transaction_type(block: &Block<'_>) -> Option<String> {
    leaf_value(block, "<TRNTYPE>").filter(|value| !value.is_empty())
}

pub fn fitid(block: &Block<'_>) -> Option<String> {
    leaf_value(block, "<FITID>").filter(|value| !value.is_empty())
}
