//! Valve KeyValues (VDF) text and binary codecs.
//!
//! Decoders are generic over the [`Mapping`] built at every nesting level:
//! [`Dict`] keeps the last value of a repeated key, [`VdfDict`] keeps every
//! entry in document order.
//!
//! ```
//! use vdf::{Value, VdfDict};
//!
//! let text = "\"a\" \"1\"\n\"a\" \"2\"\n\"s\"\n{\n\t\"k\" \"v\"\n}\n";
//! let tree: VdfDict = vdf::loads(text).unwrap();
//! assert_eq!(tree.count("a"), 2);
//! assert_eq!(tree.get_nth("a", 1).and_then(Value::as_str), Some("2"));
//!
//! let bytes = vdf::binary_dumps(&tree).unwrap();
//! let back: VdfDict = vdf::binary_loads(&bytes).unwrap();
//! assert_eq!(back, tree);
//! ```

mod nesting;

pub mod binary;
pub mod dict;
pub mod error;
pub mod mapping;
pub mod text;
pub mod value;

use std::io::{BufRead, Read, Write};

pub use binary::{BinaryError, BinaryVdfDecoder, BinaryVdfEncoder, Color, Pointer, UInt64};
pub use dict::{DictError, EntryId, OrderedMultiMap};
pub use error::Error;
pub use mapping::{Dict, Mapping, VdfDict};
pub use text::{TextError, VdfDecoder, VdfEncoder};
pub use value::Value;

/// Decodes VDF text, merging repeated nested sections.
pub fn loads<M: Mapping>(source: &str) -> Result<M, TextError> {
    VdfDecoder::new().decode(source)
}

/// Decodes VDF text read line by line from `reader`.
pub fn load<M: Mapping, R: BufRead>(reader: R) -> Result<M, Error> {
    VdfDecoder::new().decode_reader(reader)
}

/// Encodes `map` as VDF text.
pub fn dumps<M: Mapping>(map: &M, pretty: bool) -> String {
    VdfEncoder { pretty }.encode(map)
}

pub fn dump<M: Mapping, W: Write>(map: &M, writer: W, pretty: bool) -> std::io::Result<()> {
    VdfEncoder { pretty }.encode_to(map, writer)
}

/// Decodes binary VDF, merging repeated nested sections.
pub fn binary_loads<M: Mapping>(data: &[u8]) -> Result<M, BinaryError> {
    BinaryVdfDecoder::new().decode(data)
}

pub fn binary_load<M: Mapping, R: Read>(reader: R) -> Result<M, Error> {
    BinaryVdfDecoder::new().decode_reader(reader)
}

/// Encodes `map` as binary VDF.
pub fn binary_dumps<M: Mapping>(map: &M) -> Result<Vec<u8>, BinaryError> {
    BinaryVdfEncoder::new().encode(map)
}

pub fn binary_dump<M: Mapping, W: Write>(map: &M, writer: W) -> Result<(), Error> {
    BinaryVdfEncoder::new().encode_to(map, writer)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_and_binary_agree() {
        let text = "\"root\"\n{\n\t\"name\" \"x\"\n\t\"inner\"\n\t{\n\t\t\"k\" \"v\"\n\t}\n}\n";
        let from_text: Dict = loads(text).unwrap();
        let from_binary: Dict = binary_loads(&binary_dumps(&from_text).unwrap()).unwrap();
        assert_eq!(from_text, from_binary);
        assert_eq!(dumps(&from_binary, true), text);
    }

    #[test]
    fn io_entry_points() {
        let tree: VdfDict = [("a", "1"), ("a", "2")].into_iter().collect();

        let mut text = Vec::new();
        dump(&tree, &mut text, false).unwrap();
        let back: VdfDict = load(&text[..]).unwrap();
        assert_eq!(back, tree);

        let mut bytes = Vec::new();
        binary_dump(&tree, &mut bytes).unwrap();
        let back: VdfDict = binary_load(&bytes[..]).unwrap();
        assert_eq!(back, tree);
    }

    #[test]
    fn umbrella_error_wraps_codec_errors() {
        let err = load::<Dict, _>("\"a\"\n".as_bytes()).unwrap_err();
        assert!(matches!(
            err,
            Error::Text(TextError::UnbalancedNesting { line: 1 })
        ));
        let err = binary_load::<Dict, _>(&b"\x09"[..]).unwrap_err();
        assert!(matches!(err, Error::Binary(BinaryError::UnknownTag { .. })));
    }
}
