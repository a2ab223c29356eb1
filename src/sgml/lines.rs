/// Iterator over the lines of `text`, each line keeping its terminator.
///
/// A line ends at `\n`, `\r\n` or a lone `\r`. Concatenating every item
/// gives back `text` unchanged.
pub fn lines_with_terminators(text: &str) -> LinesWithTerminators<'_> {
    LinesWithTerminators { rest: text }
}

pub struct LinesWithTerminators<'a> {
    rest: &'a str,
}

impl<'a> Iterator for LinesWithTerminators<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        if self.rest.is_empty() {
            return None;
        }

        let bytes = self.rest.as_bytes();
        let end = match bytes.iter().position(|&b| b == b'\n' || b == b'\r') {
            Some(i) if bytes[i] == b'\r' && bytes.get(i + 1) == Some(&b'\n') => i + 2,
            Some(i) => i + 1,
            None => bytes.len(),
        };

        let (line, rest) = self.rest.split_at(end);
        self.rest = rest;
        Some(line)
    }
}
