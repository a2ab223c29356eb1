use log::{debug, trace};

use super::lines::lines_with_terminators;

pub const OPEN_MARKER: &str = "<STMTTRN>";
pub const CLOSE_MARKER: &str = "</STMTTRN>";

/// Closing tags of the aggregates that contain `<STMTTRN>` records.
const ENCLOSING_CLOSE_TAGS: &[&str] = &[
    "</BANKTRANLIST>",
    "</STMTRS>",
    "</CCSTMTRS>",
    "</STMTTRNRS>",
    "</CCSTMTTRNRS>",
    "</BANKMSGSRSV1>",
    "</CREDITCARDMSGSRSV1>",
    "</OFX>",
];

/// One `<STMTTRN>` record, every line kept verbatim with its terminator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block<'a> {
    lines: Vec<&'a str>,
    closed: bool,
}

impl<'a> Block<'a> {
    pub fn lines(&self) -> &[&'a str] {
        &self.lines
    }

    /// False when input ended, or another record started, before `</STMTTRN>`.
    pub fn is_closed(&self) -> bool {
        self.closed
    }
}

/// Content between the preamble and the trailer, in input order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment<'a> {
    Block(Block<'a>),
    /// A line inside the transaction region that belongs to no record,
    /// e.g. a blank line between two records or a stray close marker.
    Passthrough(&'a str),
}

/// A statement split into preamble, transaction region and trailer.
///
/// `preamble ++ body ++ trailer` is always the original text.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Document<'a> {
    pub preamble: Vec<&'a str>,
    pub body: Vec<Segment<'a>>,
    pub trailer: Vec<&'a str>,
}

impl<'a> Document<'a> {
    pub fn blocks(&self) -> impl Iterator<Item = &Block<'a>> {
        self.body.iter().filter_map(|segment| match segment {
            Segment::Block(block) => Some(block),
            Segment::Passthrough(_) => None,
        })
    }

    pub fn block_count(&self) -> usize {
        self.blocks().count()
    }

    /// Rebuild the text, emitting only the blocks for which `keep` returns
    /// true. `keep` receives each block's position among all blocks.
    pub fn reassemble<F>(&self, mut keep: F) -> String
    where
        F: FnMut(usize, &Block<'a>) -> bool,
    {
        let mut out = String::new();
        out.extend(self.preamble.iter().copied());

        let mut index = 0;
        for segment in &self.body {
            match segment {
                Segment::Block(block) => {
                    if keep(index, block) {
                        out.extend(block.lines.iter().copied());
                    }
                    index += 1;
                }
                Segment::Passthrough(line) => out.push_str(line),
            }
        }

        out.extend(self.trailer.iter().copied());
        out
    }

    pub fn to_text(&self) -> String {
        self.reassemble(|_, _| true)
    }
}

fn closes_enclosing_section(line: &str) -> bool {
    let trimmed = line.trim_start();
    ENCLOSING_CLOSE_TAGS.iter().any(|tag| trimmed.starts_with(tag))
}

fn is_marker(line: &str) -> bool {
    line.contains(OPEN_MARKER) || line.contains(CLOSE_MARKER)
}

/// Split `text` into preamble, transaction blocks and trailer.
///
/// The preamble is every line before the first marker line and the trailer
/// every line after the last one. An open marker met inside a record closes
/// that record first. A record still open at end of input ends before the
/// first line closing an enclosing section (`</BANKTRANLIST>`, `</OFX>`, ...);
/// that line and the rest form the trailer. Without such a line the record
/// runs to the end.
pub fn segment(text: &str) -> Document<'_> {
    let lines: Vec<&str> = lines_with_terminators(text).collect();

    let (first, last) = match (
        lines.iter().position(|line| is_marker(line)),
        lines.iter().rposition(|line| is_marker(line)),
    ) {
        (Some(first), Some(last)) => (first, last),
        _ => {
            debug!("no {} markers in {} lines", OPEN_MARKER, lines.len());
            return Document {
                preamble: lines,
                ..Document::default()
            };
        }
    };

    let mut body = Vec::new();
    let mut trailer = Vec::new();
    let mut current: Option<Vec<&str>> = None;

    for (i, &line) in lines.iter().enumerate().skip(first) {
        let opens = line.contains(OPEN_MARKER);
        let closes = line.contains(CLOSE_MARKER);

        if opens {
            if let Some(unclosed) = current.take() {
                trace!("record at line {} opened before the previous one closed", i + 1);
                body.push(Segment::Block(Block { lines: unclosed, closed: false }));
            }
            if closes {
                body.push(Segment::Block(Block { lines: vec![line], closed: true }));
            } else {
                current = Some(vec![line]);
            }
        } else if let Some(mut block) = current.take() {
            block.push(line);
            if closes {
                body.push(Segment::Block(Block { lines: block, closed: true }));
            } else {
                current = Some(block);
            }
        } else if i > last {
            trailer.push(line);
        } else {
            body.push(Segment::Passthrough(line));
        }
    }

    if let Some(mut unclosed) = current {
        trace!("record still open at end of input");
        if let Some(cut) = unclosed.iter().skip(1).position(|line| closes_enclosing_section(line)) {
            trailer = unclosed.split_off(cut + 1);
        }
        body.push(Segment::Block(Block { lines: unclosed, closed: false }));
    }

    let document = Document {
        preamble: lines[..first].to_vec(),
        body,
        trailer,
    };
    debug!(
        "segmented {} lines: preamble {}, blocks {}, trailer {}",
        lines.len(),
        document.preamble.len(),
        document.block_count(),
        document.trailer.len()
    );
    document
}
