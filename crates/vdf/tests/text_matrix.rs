//! VDF text decode/encode matrix.

use vdf::{Dict, TextError, Value, VdfDecoder, VdfDict, VdfEncoder};

fn flat(pairs: &[(&str, &str)]) -> Dict {
    pairs.iter().copied().collect()
}

fn nested(key: &str, inner: Dict) -> Dict {
    [(key, Value::Map(inner))].into_iter().collect()
}

// ---------------------------------------------------------------------------
// Decoding
// ---------------------------------------------------------------------------

#[test]
fn empty_document() {
    assert!(vdf::loads::<Dict>("").unwrap().is_empty());
    assert!(vdf::load::<Dict, _>(" ".as_bytes()).unwrap().is_empty());
}

#[test]
fn key_value_pairs_quoted_and_bare() {
    let input = r#"
        "key1" "value1"
        key2 "value2"
        KEY3 "value3"
        "key4" value4
        "key5" VALUE5
        "#;
    let expected = flat(&[
        ("key1", "value1"),
        ("key2", "value2"),
        ("KEY3", "value3"),
        ("key4", "value4"),
        ("key5", "VALUE5"),
    ]);
    assert_eq!(vdf::loads::<Dict>(input).unwrap(), expected);
}

#[test]
fn open_quoted_value_spans_lines() {
    let input = "\"key1\" \"a\nb\nc\"\nkey2 \"a\nb\nc\"\n";
    let expected = flat(&[("key1", "a\nb\nc"), ("key2", "a\nb\nc")]);
    assert_eq!(vdf::loads::<Dict>(input).unwrap(), expected);
}

#[test]
fn sibling_sections() {
    let input = r#"
        "root1"
        {
            "key1" "value1"
            key2 "value2"
            "key3" value3
        }
        root2
        {
            "key1" "value1"
            key2 "value2"
            "key3" value3
        }
        "#;
    let section = || flat(&[("key1", "value1"), ("key2", "value2"), ("key3", "value3")]);
    let expected: Dict = [
        ("root1", Value::Map(section())),
        ("root2", Value::Map(section())),
    ]
    .into_iter()
    .collect();
    assert_eq!(vdf::loads::<Dict>(input).unwrap(), expected);
}

#[test]
fn deep_nesting() {
    let names = [
        "root", "node1", "node2", "NODE3", "node4", "node5", "node6", "NODE7", "node8",
    ];
    let mut input = String::new();
    for (depth, name) in names.iter().enumerate() {
        let pad = "    ".repeat(depth);
        input.push_str(&format!("{pad}\"{name}\"\n{pad}{{\n"));
    }
    input.push_str(&format!("{}\"key\" \"value\"\n", "    ".repeat(names.len())));
    for depth in (0..names.len()).rev() {
        input.push_str(&format!("{}}}\n", "    ".repeat(depth)));
    }

    let expected = names
        .iter()
        .rev()
        .fold(flat(&[("key", "value")]), |inner, name| nested(name, inner));
    assert_eq!(vdf::loads::<Dict>(&input).unwrap(), expected);
}

#[test]
fn comments_and_blank_lines() {
    let input = r#"
        // this is comment
        "key1" "value1" // another comment
        key2 "value2"   // further comments
        "key3" value3   // useless comment

        key4 // comments comments comments
        {    // is this a comment?

        k v // comment

        }   // you only comment once

        // comment out of nowhere

        "key5" // pretty much anything here
        {      // is this a comment?

        K V    //comment

        }
        "#;
    let mut expected = flat(&[("key1", "value1"), ("key2", "value2"), ("key3", "value3")]);
    expected.insert("key4".into(), Value::Map(flat(&[("k", "v")])));
    expected.insert("key5".into(), Value::Map(flat(&[("K", "V")])));
    assert_eq!(vdf::loads::<Dict>(input).unwrap(), expected);
}

#[test]
fn hash_prefixed_keys() {
    assert_eq!(
        vdf::loads::<Dict>(r#"#include "asd.vdf""#).unwrap(),
        flat(&[("#include", "asd.vdf")])
    );
    assert_eq!(
        vdf::loads::<Dict>("#base asd.vdf").unwrap(),
        flat(&[("#base", "asd.vdf")])
    );
}

#[test]
fn unquoted_value_symbols() {
    let input = "a asd.vdf\nb language_*lol*\nc zxc_-*.sss//";
    let expected = flat(&[("a", "asd.vdf"), ("b", "language_*lol*"), ("c", "zxc_-*.sss")]);
    assert_eq!(vdf::loads::<Dict>(input).unwrap(), expected);
}

#[test]
fn byte_order_marks_are_stripped() {
    for bom in ["\u{feff}", "\u{fffe}"] {
        let input = format!("{bom}\"asd\" \"123\"");
        assert_eq!(
            vdf::loads::<Dict>(&input).unwrap(),
            flat(&[("asd", "123")])
        );
    }
}

#[test]
fn crlf_line_endings() {
    let input = "\"a\"\r\n{\r\n\"b\" \"c\"\r\n}\r\n";
    assert_eq!(
        vdf::loads::<Dict>(input).unwrap(),
        nested("a", flat(&[("b", "c")]))
    );
}

// ---------------------------------------------------------------------------
// Duplicate keys
// ---------------------------------------------------------------------------

const DUPLICATES: &str = "\"s\"\n{\n\"a\" \"1\"\n}\n\"k\" \"x\"\n\"s\"\n{\n\"b\" \"2\"\n}\n\"k\" \"y\"\n";

#[test]
fn dict_keeps_last_scalar_and_merges_sections() {
    let tree: Dict = vdf::loads(DUPLICATES).unwrap();
    let mut expected = nested("s", flat(&[("a", "1"), ("b", "2")]));
    expected.insert("k".into(), "y".into());
    assert_eq!(tree, expected);
}

#[test]
fn vdf_dict_keeps_every_scalar() {
    let tree: VdfDict = vdf::loads(DUPLICATES).unwrap();
    assert_eq!(tree.keys().collect::<Vec<_>>(), vec!["s", "k", "k"]);
    assert_eq!(
        tree.get_all("k").filter_map(Value::as_str).collect::<Vec<_>>(),
        vec!["x", "y"]
    );
    let section = tree.get("s").and_then(Value::as_map).unwrap();
    assert_eq!(section.keys().collect::<Vec<_>>(), vec!["a", "b"]);
}

#[test]
fn merge_off_keeps_sections_apart() {
    let decoder = VdfDecoder {
        merge_duplicate_keys: false,
    };
    let tree: VdfDict = decoder.decode(DUPLICATES).unwrap();
    assert_eq!(tree.keys().collect::<Vec<_>>(), vec!["s", "k", "s", "k"]);
    let second = tree.get_nth("s", 1).and_then(Value::as_map).unwrap();
    assert_eq!(second.keys().collect::<Vec<_>>(), vec!["b"]);
}

#[test]
fn merge_off_with_dict_replaces_section() {
    let decoder = VdfDecoder {
        merge_duplicate_keys: false,
    };
    let tree: Dict = decoder.decode(DUPLICATES).unwrap();
    let section = tree.get("s").and_then(Value::as_map).unwrap();
    assert_eq!(section, &flat(&[("b", "2")]));
}

#[test]
fn duplicate_free_input_decodes_equal_for_both_mappings() {
    let input = "\"a\" \"1\"\n\"b\"\n{\n\"c\" \"2\"\n}\n";
    let plain: Dict = vdf::loads(input).unwrap();
    let multi: VdfDict = vdf::loads(input).unwrap();
    assert_eq!(plain, multi);
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[test]
fn malformed_documents() {
    let cases: &[(&str, TextError)] = &[
        // key awaiting `{`
        ("\"asd\"\n\"zxc\" \"333\"\n\"", TextError::UnexpectedToken { line: 2 }),
        ("asd\nzxc 333\n\"", TextError::UnexpectedToken { line: 2 }),
        // lone quote
        ("\"asd\" \"123\"\n\"zxc\" \"333\"\n\"", TextError::InvalidSyntax { line: 3 }),
        ("asd 123\nzxc 333\n\"", TextError::InvalidSyntax { line: 3 }),
        ("\"asd\n\n\n\n\nzxc", TextError::InvalidSyntax { line: 1 }),
        // quoted value never closed
        ("\"asd\" \"bbb\n\n\n\n\nzxc", TextError::UnterminatedQuote { line: 1 }),
        // too many `}`
        (
            "\"asd\"\n{\n\"zxc\" \"123\"\n}\n}\n}\n}\n",
            TextError::UnbalancedNesting { line: 5 },
        ),
        ("asd\n{\nzxc 123\n}\n}\n}\n}\n", TextError::UnbalancedNesting { line: 5 }),
        // unclosed `{`
        (
            "\"asd\"\n{\n\"zxc\" \"333\"\nasd\n{\nzxc 333\n",
            TextError::UnbalancedNesting { line: 4 },
        ),
        // `{` with no key
        ("{\n\"a\" \"b\"\n}\n", TextError::UnexpectedToken { line: 1 }),
    ];
    for (input, expected) in cases {
        assert_eq!(
            vdf::loads::<Dict>(input).as_ref(),
            Err(expected),
            "input: {input:?}"
        );
    }
}

#[test]
fn error_messages_carry_line_numbers() {
    let err = vdf::loads::<Dict>("a\nb\n").unwrap_err();
    assert_eq!(err.to_string(), "expected opening bracket (line 2)");
}

// ---------------------------------------------------------------------------
// Encoding
// ---------------------------------------------------------------------------

#[test]
fn pretty_output() {
    let cases = [
        (flat(&[("1", "1")]), "\"1\" \"1\"\n"),
        (nested("1", flat(&[("2", "2")])), "\"1\"\n{\n\t\"2\" \"2\"\n}\n"),
        (
            nested("1", nested("2", flat(&[("3", "3")]))),
            "\"1\"\n{\n\t\"2\"\n\t{\n\t\t\"3\" \"3\"\n\t}\n}\n",
        ),
    ];
    for (tree, expected) in cases {
        assert_eq!(vdf::dumps(&tree, true), expected);
    }
}

#[test]
fn compact_output_has_no_indent() {
    let tree = nested("1", nested("2", flat(&[("3", "3")])));
    assert_eq!(
        VdfEncoder::new().encode(&tree),
        "\"1\"\n{\n\"2\"\n{\n\"3\" \"3\"\n}\n}\n"
    );
}

#[test]
fn dump_and_dumps_agree() {
    let tree = flat(&[("asd", "123")]);
    let mut out = Vec::new();
    vdf::dump(&tree, &mut out, false).unwrap();
    assert_eq!(String::from_utf8(out).unwrap(), vdf::dumps(&tree, false));
}

#[test]
fn duplicates_round_trip_through_text() {
    let tree: VdfDict = vdf::loads(DUPLICATES).unwrap();
    let again: VdfDict = vdf::loads(&vdf::dumps(&tree, true)).unwrap();
    assert_eq!(again, tree);
}
