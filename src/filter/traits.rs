use crate::types::{Memo, Verdict};

/// Decides whether a transaction record stays in the filtered statement.
pub trait Classifier {
    fn classify(&self, memo: &Memo) -> Verdict;
}
