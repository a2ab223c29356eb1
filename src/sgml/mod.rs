//! Line-oriented handling of SGML (OFX 1.x) statements.
//!
//! Leaf tags in this format are never closed, so records are found by
//! scanning lines for literal markers instead of running a markup parser.

pub mod encoding;
pub mod fields;
pub mod lines;
pub mod segment;

pub mod prelude {
    pub use super::fields::{MEMO_TAG, OfxDate, extract_memo};
    pub use super::looks_like_ofx;
    pub use super::segment::{Block, CLOSE_MARKER, Document, OPEN_MARKER, Segment, segment};
}

/// Whether the file name or content suggests an OFX statement.
pub fn looks_like_ofx(filename: Option<&str>, content: &str) -> bool {
    if let Some(name) = filename {
        let name = name.to_lowercase();
        if name.ends_with(".ofx") || name.ends_with(".qfx") {
            return true;
        }
    }

    content.contains("OFXHEADER:") || content.contains("DATA:OFXSGML") || content.contains("<OFX>")
}
