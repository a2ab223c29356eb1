use std::fs;

use log::{info, warn};

use crate::{
    config::FilterConfig,
    errors::{FilterError, FilterResult},
    filter::prelude::*,
    sgml::{encoding, looks_like_ofx},
    types::FilterOutcome,
};

#[derive(Default)]
pub struct FilterBuilder {
    content: Option<Vec<u8>>,
    filepath: Option<String>,
    config: Option<FilterConfig>,
}

impl FilterBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn content(mut self, content: &[u8]) -> Self {
        self.content = Some(content.to_vec());
        self
    }

    /// Read from this path unless content is given; also used when
    /// checking that the input looks like a statement.
    pub fn filename(mut self, filename: &str) -> Self {
        self.filepath = Some(filename.to_string());
        self
    }

    pub fn config(mut self, config: FilterConfig) -> Self {
        self.config = Some(config);
        self
    }

    pub fn filter(self) -> FilterResult<FilterOutcome> {
        let statement_filter = match &self.config {
            Some(config) => StatementFilter::from_config(config),
            None => StatementFilter::default(),
        };
        self.filter_with(&statement_filter)
    }

    pub fn filter_with<C: Classifier>(self, statement_filter: &StatementFilter<C>) -> FilterResult<FilterOutcome> {
        let content = self.content
            .map(Ok)
            .unwrap_or_else(|| {
                self.filepath
                    .as_deref()
                    .ok_or(FilterError::MissingContentAndFilepath)
                    .and_then(|path| fs::read(path).map_err(Into::into))
            })?;

        if !looks_like_ofx(self.filepath.as_deref(), &encoding::decode(&content)) {
            warn!("input does not look like an OFX statement; filtering anyway");
        }

        let outcome = statement_filter.filter(&content);
        info!(
            "{} records: {} excluded, {} kept",
            outcome.block_count(),
            outcome.excluded.len(),
            outcome.kept.len()
        );
        Ok(outcome)
    }
}
