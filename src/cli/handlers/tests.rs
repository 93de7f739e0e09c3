use super::editor::set_editor;
use super::list::select_notes;
use super::manage::{add_tags, remove_note};
use super::open::{branch_target, find_or_create, project_target};
use super::*;
use crate::cli::ListArgs;
use crate::cli::config::Config;
use crate::cli::output::OutputFormat;
use crate::domain::{NewNote, Note};
use crate::infra::FixedContext;
use crate::store::{NoteFilter, NoteLayout, NoteStore, RecordingOpener};
use pretty_assertions::assert_eq;
use tempfile::{TempDir, tempdir};

// Test helpers
fn store() -> (TempDir, NoteStore) {
    let dir = tempdir().unwrap();
    let store = NoteStore::in_memory(
        NoteLayout::new(dir.path().join("notes")),
        Box::new(RecordingOpener::new()),
    );
    (dir, store)
}

fn widget_main() -> FixedContext {
    FixedContext::new("widget", "main")
}

fn add(store: &mut NoteStore, title: &str, project: &str, branch: &str) -> Note {
    store
        .create(NewNote::new(title).project(project).branch(branch))
        .unwrap()
}

fn list_args() -> ListArgs {
    ListArgs {
        project: None,
        branch: None,
        ticket: None,
        misc: false,
        format: OutputFormat::Human,
    }
}

fn titles(notes: &[Note]) -> Vec<&str> {
    notes.iter().map(Note::title).collect()
}

fn expect_note(target: Target) -> Note {
    match target {
        Target::Note(note) => note,
        Target::Browse(filter) => panic!("expected a single note, got browse {filter:?}"),
    }
}

// ===========================================
// truncate_str tests
// ===========================================

#[test]
fn truncate_str_short_string_unchanged() {
    assert_eq!(truncate_str("hello", 10), "hello");
}

#[test]
fn truncate_str_long_string_gets_ellipsis() {
    assert_eq!(truncate_str("hello world", 6), "hello…");
}

// ===========================================
// resolve_note tests
// ===========================================

#[test]
fn resolve_by_exact_id() {
    let (_dir, mut store) = store();
    let note = add(&mut store, "todo", "widget", "main");

    match resolve_note(&store, &note.id().to_string()).unwrap() {
        ResolveResult::Unique(found) => assert_eq!(found.id(), note.id()),
        other => panic!("unexpected: {other:?}"),
    }
}

#[test]
fn resolve_by_exact_title_across_contexts() {
    let (_dir, mut store) = store();
    let note = add(&mut store, "release checklist", "other", "dev");

    match resolve_note(&store, "  release checklist ").unwrap() {
        ResolveResult::Unique(found) => assert_eq!(found.id(), note.id()),
        other => panic!("unexpected: {other:?}"),
    }
}

#[test]
fn resolve_duplicate_titles_is_ambiguous() {
    let (_dir, mut store) = store();
    add(&mut store, "todo", "widget", "main");
    add(&mut store, "todo", "widget", "dev");

    match resolve_note(&store, "todo").unwrap() {
        ResolveResult::Ambiguous(notes) => assert_eq!(notes.len(), 2),
        other => panic!("unexpected: {other:?}"),
    }
}

#[test]
fn resolve_unknown_is_not_found() {
    let (_dir, store) = store();
    assert!(matches!(
        resolve_note(&store, "nothing").unwrap(),
        ResolveResult::NotFound
    ));
    assert!(matches!(
        resolve_note(&store, "01HQ3K5M7NXJK4QZPW8V2R6T9Y").unwrap(),
        ResolveResult::NotFound
    ));
}

// ===========================================
// open flow tests
// ===========================================

#[test]
fn open_creates_in_current_context() {
    let (_dir, mut store) = store();

    let note = find_or_create(&mut store, &widget_main(), "design", Some("JIRA-7")).unwrap();

    assert_eq!(note.title(), "design");
    assert_eq!(note.project(), "widget");
    assert_eq!(note.branch(), "main");
    assert_eq!(note.ticket(), "JIRA-7");
    assert!(note.path().exists());
}

#[test]
fn open_finds_existing_title_in_context() {
    let (_dir, mut store) = store();
    let existing = add(&mut store, "design", "widget", "main");

    let note = find_or_create(&mut store, &widget_main(), "design", None).unwrap();

    assert_eq!(note.id(), existing.id());
    assert_eq!(store.get_all().unwrap().len(), 1);
}

#[test]
fn open_ignores_same_title_on_other_branch() {
    let (_dir, mut store) = store();
    let other = add(&mut store, "design", "widget", "dev");

    let note = find_or_create(&mut store, &widget_main(), "design", None).unwrap();

    assert_ne!(note.id(), other.id());
    assert_eq!(store.get_all().unwrap().len(), 2);
}

#[test]
fn open_by_id_works_from_any_context() {
    let (_dir, mut store) = store();
    let elsewhere = add(&mut store, "far away", "other", "dev");

    let note = find_or_create(&mut store, &widget_main(), &elsewhere.id().to_string(), None).unwrap();

    assert_eq!(note.id(), elsewhere.id());
}

// ===========================================
// branch flow tests
// ===========================================

#[test]
fn branch_without_notes_creates_default_title() {
    let (_dir, mut store) = store();

    let note = expect_note(branch_target(&mut store, &widget_main(), None).unwrap());

    assert_eq!(note.title(), "main notes");
    assert_eq!(note.project(), "widget");
    assert_eq!(note.branch(), "main");
}

#[test]
fn branch_with_one_note_opens_it() {
    let (_dir, mut store) = store();
    let only = add(&mut store, "anything", "widget", "main");
    add(&mut store, "elsewhere", "widget", "dev");

    let note = expect_note(branch_target(&mut store, &widget_main(), None).unwrap());

    assert_eq!(note.id(), only.id());
}

#[test]
fn branch_with_several_notes_browses() {
    let (_dir, mut store) = store();
    add(&mut store, "one", "widget", "main");
    add(&mut store, "two", "widget", "main");

    match branch_target(&mut store, &widget_main(), None).unwrap() {
        Target::Browse(filter) => assert_eq!(
            filter,
            NoteFilter::ProjectBranch {
                project: "widget".into(),
                branch: "main".into(),
            }
        ),
        Target::Note(note) => panic!("expected browse, got {note:?}"),
    }
}

#[test]
fn branch_with_title_filters_candidates() {
    let (_dir, mut store) = store();
    add(&mut store, "one", "widget", "main");
    let two = add(&mut store, "two", "widget", "main");

    let note = expect_note(branch_target(&mut store, &widget_main(), Some("two")).unwrap());
    assert_eq!(note.id(), two.id());

    let created = expect_note(branch_target(&mut store, &widget_main(), Some("three")).unwrap());
    assert_eq!(created.title(), "three");
    assert_eq!(created.branch(), "main");
}

// ===========================================
// proj flow tests
// ===========================================

#[test]
fn proj_without_notes_creates_misc_note() {
    let (_dir, mut store) = store();

    let note = expect_note(project_target(&mut store, &widget_main(), None).unwrap());

    assert_eq!(note.title(), "widget");
    assert_eq!(note.project(), "widget");
    assert_eq!(note.branch(), "");
    assert_eq!(store.get_project_misc("widget").unwrap().len(), 1);
}

#[test]
fn proj_without_title_ignores_branch_notes() {
    let (_dir, mut store) = store();
    add(&mut store, "on a branch", "widget", "main");
    let misc = add(&mut store, "widget", "widget", "");

    let note = expect_note(project_target(&mut store, &widget_main(), None).unwrap());

    assert_eq!(note.id(), misc.id());
}

#[test]
fn proj_with_title_matches_any_branch() {
    let (_dir, mut store) = store();
    let roadmap = add(&mut store, "roadmap", "widget", "dev");

    let note = expect_note(project_target(&mut store, &widget_main(), Some("roadmap")).unwrap());

    assert_eq!(note.id(), roadmap.id());
}

#[test]
fn proj_with_duplicate_titles_browses_project() {
    let (_dir, mut store) = store();
    add(&mut store, "roadmap", "widget", "dev");
    add(&mut store, "roadmap", "widget", "main");

    match project_target(&mut store, &widget_main(), Some("roadmap")).unwrap() {
        Target::Browse(filter) => assert_eq!(filter, NoteFilter::Project("widget".into())),
        Target::Note(note) => panic!("expected browse, got {note:?}"),
    }
}

#[test]
fn proj_with_new_title_creates_without_branch() {
    let (_dir, mut store) = store();

    let note = expect_note(project_target(&mut store, &widget_main(), Some("ideas")).unwrap());

    assert_eq!(note.title(), "ideas");
    assert_eq!(note.branch(), "");
}

// ===========================================
// list tests
// ===========================================

#[test]
fn list_all_newest_first() {
    let (_dir, mut store) = store();
    add(&mut store, "first", "a", "x");
    add(&mut store, "second", "b", "y");
    let first = store.get_all().unwrap();
    let oldest = first.iter().find(|n| n.title() == "first").unwrap();
    store
        .update(oldest.id(), crate::domain::NotePatch::default())
        .unwrap();

    let notes = select_notes(&list_args(), &store).unwrap();

    assert_eq!(titles(&notes), vec!["first", "second"]);
}

#[test]
fn list_by_project_branch_and_misc() {
    let (_dir, mut store) = store();
    add(&mut store, "a", "widget", "main");
    add(&mut store, "b", "widget", "dev");
    add(&mut store, "c", "widget", "");
    add(&mut store, "d", "gadget", "main");

    let mut args = list_args();
    args.project = Some("widget".into());
    let mut got = titles(&select_notes(&args, &store).unwrap())
        .into_iter()
        .map(str::to_string)
        .collect::<Vec<_>>();
    got.sort();
    assert_eq!(got, vec!["a", "b", "c"]);

    args.branch = Some("main".into());
    assert_eq!(titles(&select_notes(&args, &store).unwrap()), vec!["a"]);

    args.branch = None;
    args.misc = true;
    assert_eq!(titles(&select_notes(&args, &store).unwrap()), vec!["c"]);

    let mut by_branch = list_args();
    by_branch.branch = Some("main".into());
    assert_eq!(select_notes(&by_branch, &store).unwrap().len(), 2);
}

#[test]
fn list_by_ticket_combines_with_project() {
    let (_dir, mut store) = store();
    store
        .create(NewNote::new("t1").project("widget").branch("main").ticket("JIRA-1"))
        .unwrap();
    store
        .create(NewNote::new("t2").project("gadget").branch("main").ticket("JIRA-1"))
        .unwrap();
    add(&mut store, "plain", "widget", "main");

    let mut args = list_args();
    args.ticket = Some("JIRA-1".into());
    assert_eq!(select_notes(&args, &store).unwrap().len(), 2);

    args.project = Some("widget".into());
    assert_eq!(titles(&select_notes(&args, &store).unwrap()), vec!["t1"]);
}

// ===========================================
// tag / rm tests
// ===========================================

#[test]
fn tag_appends_in_order() {
    let (_dir, mut store) = store();
    let note = store
        .create(NewNote::new("todo").tags(["a"]))
        .unwrap();

    let updated = add_tags(
        &mut store,
        "todo",
        &["b".to_string(), " ".to_string(), "a".to_string()],
    )
    .unwrap();

    assert_eq!(updated.id(), note.id());
    assert_eq!(updated.tags(), ["a", "b", "a"]);
    assert_eq!(store.get_by_id(note.id()).unwrap().tags(), ["a", "b", "a"]);
}

#[test]
fn tag_unknown_note_fails() {
    let (_dir, mut store) = store();
    let err = add_tags(&mut store, "missing", &["x".to_string()]).unwrap_err();
    assert!(err.to_string().contains("note not found"));
}

#[test]
fn rm_deletes_record_and_file() {
    let (_dir, mut store) = store();
    let note = add(&mut store, "doomed", "widget", "main");

    let removed = remove_note(&mut store, &note.id().to_string()).unwrap();

    assert_eq!(removed.id(), note.id());
    assert!(store.get_all().unwrap().is_empty());
    assert!(!note.path().exists());
}

#[test]
fn rm_ambiguous_title_fails_and_keeps_notes() {
    let (_dir, mut store) = store();
    add(&mut store, "dup", "widget", "main");
    add(&mut store, "dup", "widget", "dev");

    let err = remove_note(&mut store, "dup").unwrap_err();

    assert!(err.to_string().contains("ambiguous"));
    assert_eq!(store.get_all().unwrap().len(), 2);
}

// ===========================================
// editor tests
// ===========================================

#[test]
fn set_editor_saves_command() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("jot").join("config.toml");

    let config = set_editor(Config::default(), "  code --wait ", &path).unwrap();

    assert_eq!(config.editor.as_deref(), Some("code --wait"));
    assert_eq!(
        Config::load_from(&path).unwrap().editor.as_deref(),
        Some("code --wait")
    );
}

#[test]
fn set_editor_blank_clears_command() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.toml");
    let config = Config {
        editor: Some("vim".into()),
        start_in_search: true,
        ..Config::default()
    };

    let config = set_editor(config, "", &path).unwrap();

    assert_eq!(config.editor, None);
    let saved = Config::load_from(&path).unwrap();
    assert_eq!(saved.editor, None);
    assert!(saved.start_in_search);
}
