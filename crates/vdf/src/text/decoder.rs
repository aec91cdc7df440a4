//! Line-oriented VDF text decoder.

use std::io::BufRead;
use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use super::TextError;
use crate::mapping::Mapping;
use crate::nesting::Nesting;
use crate::value::Value;
use crate::Error;

/// Byte-order marks stripped from the start of the first line.
const BOMS: &[char] = &['\u{feff}', '\u{fffe}'];

/// `KEY [VALUE]` at the start of a line. Anything after the match is ignored,
/// which is what drops trailing `//` comments.
static KEY_VALUE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r#"(?s)^(?:"(?P<qkey>(?:\\.|[^\\"])+)"|(?P<key>#?[A-Za-z0-9_\-]+))"#,
        r#"(?:[ \t]*(?:"(?P<qval>(?:\\.|[^\\"])*)(?P<vq_end>")?|(?P<val>[A-Za-z0-9_\-*.]+)))?"#,
    ))
    .expect("valid key/value pattern")
});

/// VDF text decoder.
///
/// `merge_duplicate_keys` decides what happens when a key that opens a
/// nested mapping already holds a mapping at the same level: with merging on,
/// parsing continues inside the existing mapping; with merging off, a fresh
/// mapping is bound through [`Mapping::insert`], which for
/// [`VdfDict`](crate::VdfDict) keeps both as siblings.
#[derive(Debug, Clone)]
pub struct VdfDecoder {
    pub merge_duplicate_keys: bool,
}

impl Default for VdfDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl VdfDecoder {
    pub fn new() -> Self {
        Self {
            merge_duplicate_keys: true,
        }
    }

    /// Decodes a whole document held in memory.
    pub fn decode<M: Mapping>(&self, source: &str) -> Result<M, TextError> {
        self.decode_lines(source.split_inclusive('\n').map(Ok))
    }

    /// Decodes a document read line by line from `reader`.
    pub fn decode_reader<M: Mapping, R: BufRead>(&self, reader: R) -> Result<M, Error> {
        self.decode_lines(ReadLines { reader })
    }

    fn decode_lines<M, L, S, E>(&self, mut lines: L) -> Result<M, E>
    where
        M: Mapping,
        L: Iterator<Item = Result<S, E>>,
        S: AsRef<str>,
        E: From<TextError>,
    {
        debug!(merge = self.merge_duplicate_keys, "decoding text vdf");
        let mut nesting = Nesting::<M>::new();
        let mut expect_brace = false;
        let mut line_no = 0;

        while let Some(line) = lines.next() {
            let line = line?;
            line_no += 1;
            let mut text = line.as_ref();
            if line_no == 1 {
                text = text.trim_start_matches(BOMS);
            }
            let text = text.trim_start();

            if text.is_empty() || text.starts_with('/') {
                continue;
            }

            if text.starts_with('{') {
                if !expect_brace {
                    return Err(TextError::UnexpectedToken { line: line_no }.into());
                }
                expect_brace = false;
                continue;
            }

            if expect_brace {
                return Err(TextError::UnexpectedToken { line: line_no }.into());
            }

            if text.starts_with('}') {
                if !nesting.close() {
                    return Err(TextError::UnbalancedNesting { line: line_no }.into());
                }
                continue;
            }

            // A quoted value may run over several physical lines; they are
            // joined, newlines included, until the closing quote shows up.
            let start = line_no;
            let mut joined: Option<String> = None;
            loop {
                let candidate = joined.as_deref().unwrap_or(text);
                let caps = KEY_VALUE
                    .captures(candidate)
                    .ok_or(TextError::InvalidSyntax { line: start })?;

                if caps.name("qval").is_some() && caps.name("vq_end").is_none() {
                    let Some(next) = lines.next() else {
                        return Err(TextError::UnterminatedQuote { line: start }.into());
                    };
                    let next = next?;
                    line_no += 1;
                    joined
                        .get_or_insert_with(|| text.to_owned())
                        .push_str(next.as_ref());
                    continue;
                }

                let key = caps
                    .name("qkey")
                    .or_else(|| caps.name("key"))
                    .ok_or(TextError::InvalidSyntax { line: start })?
                    .as_str()
                    .to_owned();

                match caps.name("qval").or_else(|| caps.name("val")) {
                    Some(value) => {
                        let value = Value::Str(value.as_str().to_owned());
                        nesting.current().insert(key, value);
                    }
                    None => {
                        nesting.open(key, self.merge_duplicate_keys, start);
                        expect_brace = true;
                    }
                }
                break;
            }
        }

        let root = nesting
            .finish()
            .map_err(|line| TextError::UnbalancedNesting { line })?;
        debug!(lines = line_no, entries = root.len(), "decoded text vdf");
        Ok(root)
    }
}

/// Newline-preserving line iterator over a [`BufRead`].
struct ReadLines<R> {
    reader: R,
}

impl<R: BufRead> Iterator for ReadLines<R> {
    type Item = Result<String, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut line = String::new();
        match self.reader.read_line(&mut line) {
            Ok(0) => None,
            Ok(_) => Some(Ok(line)),
            Err(err) => Some(Err(err.into())),
        }
    }
}
