//! Integration tests for directory-tree rendering.
//!
//! Exercises the renderer on dataset layouts the way documentation pages
//! use it: JSON in, preformatted text out.

use bids_macros_filetree::{DirectoryTree, TreeError, render_tree};
use serde_json::{Value, json};

const BOX_GLYPHS: [char; 4] = ['├', '└', '│', '─'];

fn dataset() -> Value {
    json!({
        "my_dataset": {
            "dataset_description.json": "",
            "participants.tsv": "",
            "sub-01": {
                "anat": {
                    "sub-01_T1w.nii.gz": "",
                    "sub-01_T1w.json": "",
                },
                "func": {
                    "sub-01_task-rest_bold.nii.gz": "",
                },
            },
            "sub-02": {},
            "README": "",
        }
    })
}

/// Full dataset example drawn with box-drawing glyphs
#[test]
fn test_dataset_example_unicode() {
    let text = render_tree(&dataset(), true).unwrap();
    let expected = "\
└── my_dataset
    ├── dataset_description.json
    ├── participants.tsv
    ├── sub-01
    │   ├── anat
    │   │   ├── sub-01_T1w.nii.gz
    │   │   └── sub-01_T1w.json
    │   └── func
    │       └── sub-01_task-rest_bold.nii.gz
    ├── sub-02
    └── README";
    assert_eq!(text, expected);
}

/// Same example in ASCII: same structure, no box-drawing characters
#[test]
fn test_dataset_example_ascii_matches_structure() {
    let unicode = render_tree(&dataset(), true).unwrap();
    let ascii = render_tree(&dataset(), false).unwrap();

    assert!(!ascii.contains(BOX_GLYPHS));
    assert_eq!(unicode.lines().count(), ascii.lines().count());

    // Entry names sit at the same column in both renderings
    for (u, a) in unicode.lines().zip(ascii.lines()) {
        assert_eq!(u.chars().count(), a.chars().count());
    }
}

/// One line per entry for every shape of input
#[test]
fn test_one_line_per_entry() {
    let cases = [
        (json!({}), 0),
        (json!({"a": null}), 1),
        (json!({"a": {"b": {"c": {}}}}), 3),
        (json!(["x", "y", {"z": ["w"]}]), 4),
        (dataset(), 11),
    ];

    for (value, expected) in cases {
        let tree = DirectoryTree::from_json(&value, true).unwrap();
        let text = tree.generate();
        let lines = if text.is_empty() { 0 } else { text.lines().count() };
        assert_eq!(lines, expected, "input: {value}");
        assert_eq!(tree.line_count(), expected);
    }
}

/// Rendering never mutates its input and always gives the same result
#[test]
fn test_rendering_is_pure() {
    let value = dataset();
    let before = value.clone();

    let first = render_tree(&value, true).unwrap();
    let second = render_tree(&value, true).unwrap();

    assert_eq!(first, second);
    assert_eq!(value, before);
}

/// Malformed nodes fail with the node path and no output
#[test]
fn test_malformed_input_fails_fast() {
    let value = json!({
        "sub-01": {
            "anat": {"sub-01_T1w.nii.gz": "", "broken": 3.5},
        }
    });

    let err = render_tree(&value, true).unwrap_err();
    assert!(matches!(err, TreeError::UnexpectedValue { found: "number", .. }));
    assert!(err.to_string().contains("sub-01/anat/broken"));
}

/// A scalar at the top level is not a directory
#[test]
fn test_scalar_root_rejected() {
    assert!(matches!(
        render_tree(&json!(true), true),
        Err(TreeError::InvalidRoot { found: "boolean" })
    ));
}
