//! VDF text encoder.

use std::io::{self, Write};

use tracing::debug;

use crate::mapping::Mapping;
use crate::value::Value;

/// VDF text encoder.
///
/// Every key and scalar is wrapped in double quotes as-is; the encoder does
/// not escape. A nested mapping is written as its key on one line followed
/// by a `{ ... }` block. With `pretty` set, each nesting level is indented by
/// one tab.
#[derive(Debug, Clone, Default)]
pub struct VdfEncoder {
    pub pretty: bool,
}

impl VdfEncoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pretty() -> Self {
        Self { pretty: true }
    }

    /// Encodes `map` into a `String`.
    pub fn encode<M: Mapping>(&self, map: &M) -> String {
        let mut out = String::new();
        self.write_map(&mut out, map, 0);
        debug!(bytes = out.len(), pretty = self.pretty, "encoded text vdf");
        out
    }

    /// Encodes `map` and writes the result to `writer`.
    pub fn encode_to<M: Mapping, W: Write>(&self, map: &M, mut writer: W) -> io::Result<()> {
        writer.write_all(self.encode(map).as_bytes())
    }

    fn write_map<M: Mapping>(&self, out: &mut String, map: &M, level: usize) {
        let indent = if self.pretty {
            "\t".repeat(level)
        } else {
            String::new()
        };
        for (key, value) in map.iter() {
            match value {
                Value::Map(nested) => {
                    out.push_str(&format!("{indent}\"{key}\"\n{indent}{{\n"));
                    self.write_map(out, nested, level + 1);
                    out.push_str(&format!("{indent}}}\n"));
                }
                scalar => {
                    let text = scalar.to_text().unwrap_or_default();
                    out.push_str(&format!("{indent}\"{key}\" \"{text}\"\n"));
                }
            }
        }
    }
}
