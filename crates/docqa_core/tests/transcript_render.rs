use docqa_core::{AppState, Author, Confidence, ResponseMetadata, Source};
use pretty_assertions::assert_eq;

fn sample_metadata() -> ResponseMetadata {
    ResponseMetadata {
        sources: vec![Source {
            filename: "manual.txt".to_string(),
            preview: "Chapter 1".to_string(),
        }],
        confidence: Some(Confidence::Error),
        documents_found: Some(1),
        model: Some("phi3".to_string()),
    }
}

#[test]
fn rendering_same_triple_twice_appends_two_identical_entries() {
    let mut state = AppState::new();
    let first = state
        .render("same", Author::Assistant, Some(sample_metadata()))
        .clone();
    let second = state
        .render("same", Author::Assistant, Some(sample_metadata()))
        .clone();

    assert_eq!(first, second);
    assert_eq!(state.transcript().len(), 2);
    assert_eq!(state.view().scroll_to, Some(1));
}

#[test]
fn metadata_without_sources_has_no_sources_block() {
    let mut state = AppState::new();
    let metadata = ResponseMetadata {
        sources: Vec::new(),
        ..sample_metadata()
    };
    let entry = state.render("answer", Author::Assistant, Some(metadata));

    assert!(!entry.lines().iter().any(|l| l.contains("Sources consulted")));
    assert_eq!(entry.lines().last().map(String::as_str), Some("❌ Confidence: error"));
}

#[test]
fn user_render_never_touches_info_panel() {
    let mut state = AppState::new();
    state.render("question", Author::User, Some(sample_metadata()));

    assert_eq!(state.info_panel(), None);
    assert_eq!(state.transcript().entries()[0].metadata(), None);
}

#[test]
fn assistant_without_metadata_leaves_info_panel_alone() {
    let mut state = AppState::new();
    state.render("answer", Author::Assistant, Some(sample_metadata()));
    state.render("plain notice", Author::Assistant, None);

    assert_eq!(
        state.view().info_panel,
        Some(vec![
            "documents: 1".to_string(),
            "confidence: ERROR".to_string(),
            "model: phi3".to_string(),
        ])
    );
}

#[test]
fn every_render_marks_state_dirty_and_scrolls_to_newest() {
    let mut state = AppState::new();
    assert!(!state.consume_dirty());

    state.render("a", Author::User, None);
    assert!(state.consume_dirty());
    state.render("b", Author::Assistant, None);
    assert!(state.consume_dirty());
    assert_eq!(state.view().scroll_to, Some(1));
}
