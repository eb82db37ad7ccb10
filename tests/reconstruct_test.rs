//! Integration tests for ordering, resectioning and the pipeline builder.

use docmodel::{
    order, order_all, order_with_options, reconstruct, section, section_all,
    section_with_options, Block, Coords, Error, Label, LoadOptions, OrderingOptions,
    Reconstruct, Resource, Section, SectioningOptions, Step,
};
use std::path::PathBuf;

fn load_fixture() -> Resource {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("interleaved_resource.json");
    docmodel::load_file(path).unwrap()
}

fn at(page: f64, x: f64, y: f64) -> Coords {
    Coords::new(page, x, y, x + 100.0, y + 10.0)
}

fn texts<'a>(blocks: impl IntoIterator<Item = &'a Block>) -> Vec<&'a str> {
    blocks.into_iter().map(Block::plain_text).collect()
}

fn one_section(blocks: Vec<Block>) -> Resource {
    Resource::new().with_sections(vec![Section::with_blocks(blocks)])
}

// ==================== Ordering Tests ====================

#[test]
fn test_fixture_order() {
    let raw = load_fixture();
    let ordered = order(&raw);

    assert_eq!(ordered.section_count(), 1);
    let blocks = &ordered.sections[0].blocks;
    assert!(blocks[0].plain_text().starts_with("Preprint"));
    assert_eq!(blocks[1].plain_text(), "Chapter One");
    assert_eq!(blocks[2].plain_text(), "It was a bright cold day in April.");
    assert_eq!(blocks[3].label, Some(Label::Figure));
    assert_eq!(blocks[5].plain_text(), "A Second Heading");
    assert_eq!(blocks[9].plain_text(), "The count came up short.");
    assert_eq!(blocks[14].plain_text(), "12");

    // Metadata survives
    assert_eq!(ordered.title, raw.title);
    assert_eq!(ordered.source, raw.source);
}

#[test]
fn test_order_is_stable_for_equal_keys() {
    let raw = one_section(vec![
        Block::text(at(0.0, 120.0, 10.0), "first"),
        Block::text(at(0.0, 80.0, 10.0), "second"),
        Block::text(at(0.0, 0.0, 90.0), "zero band"),
    ]);
    let ordered = order(&raw);
    assert_eq!(
        texts(&ordered.sections[0].blocks),
        vec!["zero band", "first", "second"]
    );
}

#[test]
fn test_column_band_option() {
    let raw = one_section(vec![
        Block::text(at(0.0, 40.0, 50.0), "lower left"),
        Block::text(at(0.0, 10.0, 80.0), "far left"),
    ]);

    // Both snap to 0 with the default band
    let ordered = order(&raw);
    assert_eq!(
        texts(&ordered.sections[0].blocks),
        vec!["lower left", "far left"]
    );

    let narrow = OrderingOptions::new().with_column_band(20.0);
    let ordered = order_with_options(&raw, &narrow);
    assert_eq!(
        texts(&ordered.sections[0].blocks),
        vec!["far left", "lower left"]
    );
}

#[test]
fn test_sections_sorted_by_title_or_first_block() {
    let late = Section::with_blocks(vec![Block::text(at(2.0, 0.0, 0.0), "late")]);
    let titled = Section::with_blocks(vec![Block::text(at(3.0, 0.0, 0.0), "body")])
        .with_title(Block::title(at(1.0, 0.0, 0.0), "early title"));
    let empty = Section::new();

    let raw = Resource::new().with_sections(vec![late, titled, empty]);
    let ordered = order(&raw);
    assert!(ordered.sections[0].is_empty());
    assert_eq!(ordered.sections[1].title_text(), Some("early title"));
    assert_eq!(ordered.sections[2].blocks[0].plain_text(), "late");

    let kept = order_with_options(&raw, &OrderingOptions::new().sort_sections(false));
    assert_eq!(kept.sections[0].blocks[0].plain_text(), "late");
}

#[test]
fn test_order_idempotent() {
    let once = order(&load_fixture());
    assert_eq!(order(&once), once);
}

// ==================== Sectioning Tests ====================

#[test]
fn test_fixture_reconstruct() {
    let raw = load_fixture();
    let doc = reconstruct(&raw).unwrap();

    let titles: Vec<_> = doc.sections.iter().map(|s| s.title_text()).collect();
    assert_eq!(
        titles,
        vec![
            None,
            Some("Chapter One"),
            Some("A Second Heading"),
            Some("Chapter Two"),
        ]
    );

    assert_eq!(
        texts(&doc.sections[0].blocks),
        vec!["Preprint - do not distribute"]
    );
    assert_eq!(
        texts(&doc.sections[1].blocks),
        vec![
            "It was a bright cold day in April.",
            "The clocks were striking thirteen."
        ]
    );
    // The list joins its section and the section carries over to page 1
    assert_eq!(
        texts(&doc.sections[2].blocks),
        vec![
            "Supplies were counted twice.",
            "- ropes\n- lanterns",
            "The count came up short."
        ]
    );
    assert_eq!(
        texts(&doc.sections[3].blocks),
        vec!["We broke camp before dawn.", "The river had risen overnight."]
    );

    let other: Vec<_> = doc
        .other_blocks
        .iter()
        .map(|b| b.label.as_ref().map(Label::as_str))
        .collect();
    assert_eq!(
        other,
        vec![Some("figure"), Some("table"), Some("figure"), None]
    );

    assert_eq!(doc.block_count(), raw.block_count());
    assert_eq!(doc.title.as_deref(), Some("Field Notes"));
    assert_eq!(doc.date_created.as_deref(), Some("2021-03-14"));
}

#[test]
fn test_input_is_not_mutated() {
    let raw = load_fixture();
    let snapshot = raw.clone();
    let _ = order(&raw);
    let _ = section(&raw);
    let _ = reconstruct(&raw).unwrap();
    assert_eq!(raw, snapshot);
    assert_eq!(raw.section_count(), 1);
}

#[test]
fn test_section_idempotent() {
    let once = section(&load_fixture());
    let twice = section(&once);
    assert_eq!(twice.sections, once.sections);
    assert_eq!(twice.other_blocks, once.other_blocks);
}

#[test]
fn test_consecutive_titles_make_empty_sections() {
    let raw = one_section(vec![
        Block::title(at(0.0, 0.0, 0.0), "One"),
        Block::title(at(0.0, 0.0, 10.0), "Two"),
        Block::text(at(0.0, 0.0, 20.0), "body"),
    ]);
    let doc = section(&raw);
    assert_eq!(doc.section_count(), 2);
    assert!(doc.sections[0].blocks.is_empty());
    assert_eq!(doc.sections[0].title_text(), Some("One"));
    assert_eq!(texts(&doc.sections[1].blocks), vec!["body"]);
}

#[test]
fn test_existing_titles_are_pooled() {
    let raw = Resource::new().with_sections(vec![
        Section::with_blocks(vec![Block::text(at(0.0, 0.0, 50.0), "under second")])
            .with_title(Block::title(at(0.0, 0.0, 0.0), "old title"))
            .with_summary("dropped"),
        Section::with_blocks(vec![Block::title(at(0.0, 0.0, 40.0), "second")]),
    ]);
    let doc = section(&raw);
    assert_eq!(doc.section_count(), 2);
    assert_eq!(doc.sections[0].title_text(), Some("old title"));
    assert!(doc.sections[0].blocks.is_empty());
    assert_eq!(doc.sections[1].title_text(), Some("second"));
    assert_eq!(texts(&doc.sections[1].blocks), vec!["under second"]);
    assert!(doc.sections.iter().all(|s| s.summary.is_none()));
}

#[test]
fn test_existing_other_blocks_come_first() {
    let kept = Block::new(at(5.0, 0.0, 0.0)).with_label(Label::Table);
    let raw = one_section(vec![Block::new(at(0.0, 0.0, 0.0)).with_label(Label::Figure)])
        .with_other_blocks(vec![kept.clone()]);
    let doc = section(&raw);
    assert!(doc.sections.is_empty());
    assert_eq!(doc.other_blocks.len(), 2);
    assert_eq!(doc.other_blocks[0], kept);
    assert_eq!(doc.other_blocks[1].label, Some(Label::Figure));
}

#[test]
fn test_unknown_labels_divert_or_reject() {
    let json = r#"{"sections": [{"blocks": [
        {"coords": [0, 0, 0, 10, 10], "text": "body", "label": "text"},
        {"coords": [0, 0, 20, 10, 30], "text": "note", "label": "footnote"}
    ]}]}"#;
    let raw = Resource::from_json_with_options(json, &LoadOptions::new().permissive()).unwrap();

    let doc = section(&raw);
    assert_eq!(texts(&doc.sections[0].blocks), vec!["body"]);
    assert_eq!(texts(&doc.other_blocks), vec!["note"]);

    let err = section_with_options(&raw, &SectioningOptions::new().reject_unknown()).unwrap_err();
    match err {
        Error::InvariantViolation { label, position } => {
            assert_eq!(label, "footnote");
            assert_eq!(position, 1);
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_empty_resource() {
    let doc = section(&Resource::new().with_title("Nothing"));
    assert!(doc.sections.is_empty());
    assert!(doc.other_blocks.is_empty());
    assert_eq!(doc.title.as_deref(), Some("Nothing"));
}

// ==================== Batch and Pipeline Tests ====================

#[test]
fn test_batches_keep_input_order() {
    let batch: Vec<Resource> = (0..8)
        .map(|i| load_fixture().with_title(format!("doc {}", i)))
        .collect();

    let ordered = order_all(&batch, &OrderingOptions::default());
    let sectioned = section_all(&ordered, &SectioningOptions::default()).unwrap();

    assert_eq!(sectioned.len(), 8);
    for (i, doc) in sectioned.iter().enumerate() {
        assert_eq!(doc.title.as_deref(), Some(format!("doc {}", i).as_str()));
        assert_eq!(doc.section_count(), 4);
    }
}

#[test]
fn test_pipeline_steps() {
    assert_eq!(Reconstruct::standard().steps(), &[Step::Order, Step::Section]);
    assert!(Reconstruct::new().steps().is_empty());

    let raw = load_fixture();
    assert_eq!(Reconstruct::new().apply(&raw).unwrap(), raw);

    let section_first = Reconstruct::new().section().order().apply(&raw).unwrap();
    assert_eq!(section_first.section_count(), 4);
    assert_eq!(section_first.sections[1].title_text(), Some("Chapter One"));

    let all = Reconstruct::standard().apply_all(&[raw.clone(), raw]).unwrap();
    assert_eq!(all[0], all[1]);
}
