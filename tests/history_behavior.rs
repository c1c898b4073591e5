use notepad_core::{EditorContext, HISTORY_LIMIT, Selection};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[test]
fn test_undo_walks_back_through_distinct_edits() {
    init_logging();
    let mut ctx = EditorContext::in_memory();
    let values = ["t", "th", "the", "them", "theme"];
    for value in values {
        ctx.set_document(value);
    }

    for k in 1..values.len() {
        assert!(ctx.undo());
        assert_eq!(ctx.state().document(), values[values.len() - 1 - k]);
    }
    // One more step reaches the seed snapshot
    assert!(ctx.undo());
    assert_eq!(ctx.state().document(), "");
}

#[test]
fn test_redo_restores_pre_undo_value() {
    let mut ctx = EditorContext::in_memory();
    ctx.set_document("a");
    ctx.set_document("ab");
    ctx.set_document("abc");
    ctx.undo();

    let before = ctx.state().document().to_string();
    let cursor = ctx.state().history_cursor();
    assert!(ctx.undo());
    assert!(ctx.redo());
    assert_eq!(ctx.state().document(), before);
    assert_eq!(ctx.state().history_cursor(), cursor);

    assert!(ctx.redo());
    assert_eq!(ctx.state().document(), "abc");
}

#[test]
fn test_no_op_assignment_leaves_history_alone() {
    let mut ctx = EditorContext::in_memory();
    ctx.set_document("same");
    let len = ctx.state().history().len();
    let cursor = ctx.state().history_cursor();

    ctx.set_document("same");
    assert_eq!(ctx.state().history().len(), len);
    assert_eq!(ctx.state().history_cursor(), cursor);
}

#[test]
fn test_fifty_first_edit_evicts_oldest() {
    let mut ctx = EditorContext::in_memory();
    for i in 1..=HISTORY_LIMIT + 1 {
        ctx.set_document(format!("edit {}", i));
        assert!(ctx.state().history().len() <= HISTORY_LIMIT);
    }

    let history = ctx.state().history();
    assert_eq!(history.len(), HISTORY_LIMIT);
    assert_eq!(history.entries()[0], "edit 2");
    assert_eq!(history.cursor(), HISTORY_LIMIT - 1);
    assert_eq!(ctx.state().document(), history.current());

    assert!(ctx.undo());
    assert_eq!(ctx.state().document(), format!("edit {}", HISTORY_LIMIT));
}

#[test]
fn test_boundaries_are_no_ops() {
    let mut ctx = EditorContext::in_memory();
    assert!(!ctx.undo());
    assert_eq!(ctx.state().document(), "");
    assert_eq!(ctx.state().history_cursor(), 0);

    ctx.set_document("x");
    assert!(!ctx.redo());
    assert_eq!(ctx.state().document(), "x");
    assert_eq!(ctx.state().history_cursor(), 1);
}

#[test]
fn test_new_edit_prunes_redo_branch() {
    let mut ctx = EditorContext::in_memory();
    ctx.set_document("a");
    ctx.set_document("ab");
    ctx.set_document("abc");

    ctx.undo();
    assert_eq!(ctx.state().document(), "ab");
    ctx.undo();
    assert_eq!(ctx.state().document(), "a");

    ctx.set_document("ax");
    assert!(!ctx.redo());
    assert_eq!(ctx.state().document(), "ax");
    assert_eq!(ctx.state().history().entries(), &["", "a", "ax"]);
}

#[test]
fn test_selection_is_not_recorded() {
    let mut ctx = EditorContext::in_memory();
    ctx.set_document("hello");
    ctx.set_selection(Selection::new(1, 4));
    ctx.set_selection(Selection::caret(99));

    assert_eq!(ctx.state().selection(), Selection::caret(99));
    assert_eq!(ctx.state().history().len(), 2);
    assert!(ctx.undo());
    // Undo only touches the text
    assert_eq!(ctx.state().selection(), Selection::caret(99));
}
