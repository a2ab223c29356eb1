use std::io::Write;

use serde::Serialize;

use crate::{errors::FilterResult, types::FilterOutcome};

#[derive(Serialize)]
struct ReportRow<'a> {
    status: &'static str,
    date: String,
    #[serde(rename = "type")]
    transaction_type: &'a str,
    amount: String,
    fitid: &'a str,
    memo: &'a str,
}

/// Write one CSV row per record, excluded records first, each group in
/// statement order.
pub fn write_csv<W: Write>(writer: W, outcome: &FilterOutcome) -> FilterResult<()> {
    let mut out = csv::Writer::from_writer(writer);

    for summary in outcome.excluded.iter().chain(&outcome.kept) {
        out.serialize(ReportRow {
            status: summary.verdict.as_str(),
            date: summary.posted.map(|d| d.to_string()).unwrap_or_default(),
            transaction_type: summary.transaction_type.as_deref().unwrap_or_default(),
            amount: summary.amount.map(|a| a.to_string()).unwrap_or_default(),
            fitid: summary.fitid.as_deref().unwrap_or_default(),
            memo: &summary.memo,
        })?;
    }

    out.flush().map_err(csv::Error::from)?;
    Ok(())
}
