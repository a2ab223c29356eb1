pub mod classify;
pub mod collapse;
pub mod normalize;
pub mod pipeline;
pub mod traits;

pub mod prelude {
    pub use super::classify::ExclusionPatterns;
    pub use super::collapse::DisplayCollapse;
    pub use super::normalize::normalize;
    pub use super::pipeline::{StatementFilter, filter_and_reassemble};
    pub use super::traits::Classifier;
}
