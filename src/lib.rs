//! Remove automatic-investment transactions from SGML OFX bank statements.
//!
//! Records whose `<MEMO>` starts with a known pattern are dropped; everything
//! else in the file, including its byte layout, is left alone.
//!
//! ```rust,ignore
//! use ofx_memo_filter::FilterBuilder;
//!
//! let outcome = FilterBuilder::new()
//!     .content(&bytes)
//!     .filter()?;
//! std::fs::write("extrato_filtrado.ofx", &outcome.filtered)?;
//! ```

mod builder;
mod types;

pub mod config;
pub mod errors;
pub mod filter;
pub mod report;
pub mod sgml;

pub use builder::FilterBuilder;
pub use config::FilterConfig;
pub use filter::prelude::*;
pub use types::{BlockSummary, FilterOutcome, Memo, NO_MEMO, Verdict};
