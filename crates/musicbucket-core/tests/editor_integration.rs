// Integration tests for editing sessions.
//
// These exercise the editor, the board edits and the board store together,
// the way the CLI drives them.

use musicbucket_config::{AppConfig, HexColor};
use musicbucket_core::history::{History, HistoryPosition};
use musicbucket_core::{
    run_script, BoardStore, Edit, ItemRef, Location, Tier, TierBoard, TierEditor, TierId,
};

fn s_tier() -> Tier {
    Tier::new("S", "S", HexColor::rgb(255, 127, 127))
}

fn move_to_s(item: &str) -> Edit {
    Edit::MoveItem {
        item: ItemRef::new(item),
        to: Location::Tier(TierId::new("S")),
        index: None,
    }
}

// ── Move A then B into S, undo twice, redo twice ──────────────────────

#[test]
fn test_two_moves_undo_redo_scenario() {
    let s0 = TierBoard::new(Vec::new(), ["A", "B"]);
    let s1 = TierBoard::new(vec![s_tier().with_items(["A"])], ["B"]);
    let s2 = TierBoard::new(vec![s_tier().with_items(["A", "B"])], Vec::<ItemRef>::new());

    // Tier S has to exist before items can move into it; seed the
    // session with S0 and commit the two snapshots directly.
    let mut history = History::unbounded(s0.clone());
    history.commit(s1.clone());
    history.commit(s2.clone());
    let mut editor = TierEditor::new(history);

    assert_eq!(editor.current(), &s2);
    assert!(editor.can_undo());
    assert!(!editor.can_redo());

    assert_eq!(editor.undo(), &s1);
    assert!(editor.can_undo());
    assert!(editor.can_redo());

    assert_eq!(editor.undo(), &s0);
    assert!(!editor.can_undo());
    assert!(editor.can_redo());

    editor.redo();
    assert!(editor.can_undo());
    assert!(editor.can_redo());

    assert_eq!(editor.redo(), &s2);
    assert!(editor.can_undo());
    assert!(!editor.can_redo());
}

#[test]
fn test_scenario_through_edits() {
    let seed = TierBoard::new(vec![s_tier()], ["A", "B"]);
    let mut editor = TierEditor::open(seed.clone(), &AppConfig::default());

    let s1 = editor.apply(move_to_s("A")).unwrap().clone();
    let s2 = editor.apply(move_to_s("B")).unwrap().clone();
    assert_eq!(s2.tier(&TierId::new("S")).unwrap().items.len(), 2);
    assert!(s2.bank_items.is_empty());

    assert_eq!(editor.undo(), &s1);
    assert_eq!(editor.undo(), &seed);
    assert_eq!(editor.position(), HistoryPosition::AtStart);
    editor.redo();
    assert_eq!(editor.redo(), &s2);
    assert_eq!(editor.position(), HistoryPosition::AtHead);
}

// ── Branch discard through the editor ─────────────────────────────────

#[test]
fn test_new_edit_after_undo_drops_redo() {
    let seed = TierBoard::new(vec![s_tier()], ["A", "B"]);
    let mut editor = TierEditor::open(seed, &AppConfig::default());
    editor.apply(move_to_s("A")).unwrap();
    let undone = editor.apply(move_to_s("B")).unwrap().clone();

    editor.undo();
    editor
        .apply(Edit::RenameTier {
            tier: TierId::new("S"),
            label: "Essentials".to_string(),
        })
        .unwrap();

    assert!(!editor.can_redo());
    assert_eq!(editor.history().len(), 3);
    assert!(!editor.history().timeline().contains(&undone));
    assert_eq!(editor.current().tiers[0].label, "Essentials");
}

// ── Persistence sees only the current snapshot ────────────────────────

#[test]
fn test_session_save_and_resume() {
    let dir = tempfile::tempdir().unwrap();
    let store = BoardStore::open(dir.path()).unwrap();
    let config = AppConfig::default();

    let seed = TierBoard::from_presets(&config.default_tiers, ["t1", "t2", "t3"]);
    store.save("summer", &seed).unwrap();

    // Session 1: rank two items, undo one, save.
    let loaded = store.load("summer").unwrap().unwrap();
    let mut editor = TierEditor::open(loaded.board, &config);
    run_script(&mut editor, "move t1 S\nmove t2 A\nundo\n").unwrap();
    assert!(editor.is_dirty());
    store.save("summer", editor.current()).unwrap();
    editor.mark_saved();
    assert!(!editor.is_dirty());
    let expected = editor.into_current();

    // Session 2: history starts fresh from the saved board.
    let loaded = store.load("summer").unwrap().unwrap();
    assert_eq!(loaded.board, expected);
    let editor = TierEditor::open(loaded.board, &config);
    assert!(!editor.can_undo());
    assert!(!editor.can_redo());
    assert_eq!(
        editor.current().locate(&ItemRef::new("t1")),
        Some(Location::Tier(TierId::new("S")))
    );
    assert_eq!(
        editor.current().locate(&ItemRef::new("t2")),
        Some(Location::Bank)
    );
}

#[test]
fn test_bounded_session_from_config() {
    let config = AppConfig {
        max_history_snapshots: Some(3),
        ..Default::default()
    };
    let seed = TierBoard::from_presets(&config.default_tiers, ["a", "b", "c", "d"]);
    let mut editor = TierEditor::open(seed, &config);

    for item in ["a", "b", "c", "d"] {
        editor.apply(move_to_s(item)).unwrap();
    }
    assert_eq!(editor.history().len(), 3);

    editor.undo();
    editor.undo();
    assert!(!editor.can_undo());
    // Oldest survivor has a and b ranked already.
    let s_items = &editor.current().tier(&TierId::new("S")).unwrap().items;
    assert_eq!(s_items, &vec![ItemRef::new("a"), ItemRef::new("b")]);
}
