use super::*;

fn service() -> NoteService {
    let db = Database::in_memory().expect("failed to create in-memory database");
    NoteService::new(db)
}

#[test]
fn note_service_construction_with_in_memory_database() {
    let service = service();

    // Quick smoke test - verify schema is initialized
    let count: i64 = service
        .database()
        .connection()
        .query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name='notes'",
            [],
            |row| row.get(0),
        )
        .expect("failed to query schema");

    assert_eq!(count, 1, "expected the notes table to exist");
}

// --- CRUD operations ---

#[test]
fn create_note_returns_blank_placeholder_with_valid_id() {
    let service = service();

    let note = service.create_note().expect("failed to create note");

    assert!(note.id.get() > 0, "note ID should be positive");
    assert!(note.is_blank(), "placeholder should be blank");

    let stored = service
        .get_note(note.id)
        .expect("failed to get note")
        .expect("note should exist");
    assert_eq!(stored, note);
}

#[test]
fn insert_note_persists_title_and_content() {
    let service = service();

    let note = service
        .insert_note("Groceries", "milk, eggs, bread")
        .expect("failed to insert note");

    let stored = service
        .get_note(note.id)
        .expect("failed to get note")
        .expect("note should exist");
    assert_eq!(stored.title, "Groceries");
    assert_eq!(stored.content, "milk, eggs, bread");
}

#[test]
fn ids_are_assigned_monotonically() {
    let service = service();

    let first = service.create_note().expect("failed to create note");
    let second = service.create_note().expect("failed to create note");
    let third = service.create_note().expect("failed to create note");

    assert!(first.id < second.id);
    assert!(second.id < third.id);
}

#[test]
fn get_note_returns_none_for_unknown_id() {
    let service = service();

    let result = service.get_note(NoteId::new(999)).expect("get should not fail");
    assert_eq!(result, None);
}

#[test]
fn update_note_replaces_matching_note_in_place() {
    let service = service();

    let note = service.create_note().expect("failed to create note");
    service
        .update_note(note.id, "Plan", "write the quarterly report")
        .expect("failed to update note");

    let stored = service
        .get_note(note.id)
        .expect("failed to get note")
        .expect("note should exist");
    assert_eq!(stored.id, note.id, "id is preserved across update");
    assert_eq!(stored.title, "Plan");
    assert_eq!(stored.content, "write the quarterly report");
}

#[test]
fn update_note_with_unknown_id_is_a_noop() {
    let service = service();

    let existing = service
        .insert_note("Keep", "untouched")
        .expect("failed to insert note");

    // Does not error, does not disturb other rows
    service
        .update_note(NoteId::new(999), "ghost", "ghost")
        .expect("update with unknown id should succeed as no-op");

    let notes = service.list_notes().expect("failed to list notes");
    assert_eq!(notes, vec![existing]);
}

#[test]
fn update_never_changes_any_other_note() {
    let service = service();

    let a = service.insert_note("A", "alpha").expect("insert failed");
    let b = service.insert_note("B", "bravo").expect("insert failed");
    let c = service.insert_note("C", "charlie").expect("insert failed");

    service
        .update_note(b.id, "B2", "bravo two")
        .expect("update failed");

    assert_eq!(service.get_note(a.id).unwrap().unwrap(), a);
    assert_eq!(service.get_note(c.id).unwrap().unwrap(), c);
    let b2 = service.get_note(b.id).unwrap().unwrap();
    assert_eq!(b2.title, "B2");
}

#[test]
fn delete_note_is_idempotent() {
    let service = service();

    let note = service.create_note().expect("failed to create note");

    service.delete_note(note.id).expect("first delete failed");
    service.delete_note(note.id).expect("second delete failed");

    assert_eq!(service.get_note(note.id).unwrap(), None);
}

#[test]
fn list_length_tracks_inserts_minus_deletions() {
    let service = service();

    let mut ids = Vec::new();
    for i in 0..5 {
        let note = service
            .insert_note(&format!("Note {i}"), "")
            .expect("insert failed");
        ids.push(note.id);
    }
    assert_eq!(service.list_notes().unwrap().len(), 5);

    service.delete_note(ids[1]).expect("delete failed");
    service.delete_note(ids[3]).expect("delete failed");
    assert_eq!(service.list_notes().unwrap().len(), 3);
}

#[test]
fn list_notes_orders_by_descending_id() {
    let service = service();

    service.insert_note("first", "").expect("insert failed");
    service.insert_note("second", "").expect("insert failed");
    service.insert_note("third", "").expect("insert failed");

    let notes = service.list_notes().expect("list failed");
    assert_eq!(notes.len(), 3);
    assert_eq!(notes[0].title, "third", "most recent note comes first");
    assert_eq!(notes[2].title, "first");
    assert!(notes[0].id > notes[1].id && notes[1].id > notes[2].id);
}

#[test]
fn deleted_ids_are_not_reused() {
    let service = service();

    let a = service.insert_note("a", "").expect("insert failed");
    service.delete_note(a.id).expect("delete failed");

    let b = service.insert_note("b", "").expect("insert failed");
    assert!(b.id > a.id, "fresh note must not reuse a deleted id");
}

// --- replace_all ---

#[test]
fn replace_all_discards_prior_contents_and_preserves_ids() {
    let service = service();

    service.insert_note("old 1", "x").expect("insert failed");
    service.insert_note("old 2", "y").expect("insert failed");

    let imported = vec![
        Note::new(NoteId::new(10), "imported A", "aaa"),
        Note::new(NoteId::new(3), "imported B", "bbb"),
        Note::new(NoteId::new(7), "imported C", "ccc"),
    ];
    service.replace_all(&imported).expect("replace_all failed");

    let notes = service.list_notes().expect("list failed");
    assert_eq!(notes.len(), 3);
    // Store default order is descending id
    assert_eq!(notes[0].id, NoteId::new(10));
    assert_eq!(notes[1].id, NoteId::new(7));
    assert_eq!(notes[2].id, NoteId::new(3));
    // Every imported record survives field-for-field
    for imported_note in &imported {
        assert!(notes.contains(imported_note));
    }
}

#[test]
fn replace_all_with_empty_set_empties_the_store() {
    let service = service();
    service.insert_note("soon gone", "").expect("insert failed");

    service.replace_all(&[]).expect("replace_all failed");
    assert!(service.list_notes().unwrap().is_empty());
}

#[test]
fn replace_all_rolls_back_on_failure() {
    let service = service();

    let original = service
        .insert_note("survivor", "still here")
        .expect("insert failed");

    // Duplicate ids violate the primary key, failing mid-transaction
    let bad_import = vec![
        Note::new(NoteId::new(1), "dup", "one"),
        Note::new(NoteId::new(1), "dup", "two"),
    ];
    let result = service.replace_all(&bad_import);
    assert!(result.is_err(), "duplicate ids must fail the import");

    // Prior contents are fully restored
    let notes = service.list_notes().expect("list failed");
    assert_eq!(notes, vec![original]);
}

// --- Change notification ---

#[test]
fn every_mutation_publishes_the_full_list() {
    let service = service();
    let updates = service.subscribe();

    let note = service.insert_note("watched", "").expect("insert failed");
    let after_insert = updates.try_recv().expect("insert should notify");
    assert_eq!(after_insert.len(), 1);

    service
        .update_note(note.id, "watched", "edited")
        .expect("update failed");
    let after_update = updates.try_recv().expect("update should notify");
    assert_eq!(after_update[0].content, "edited");

    service.delete_note(note.id).expect("delete failed");
    let after_delete = updates.try_recv().expect("delete should notify");
    assert!(after_delete.is_empty());
}

#[test]
fn replace_all_notifies_once_with_final_state() {
    let service = service();
    service.insert_note("old", "").expect("insert failed");

    let updates = service.subscribe();
    let imported = vec![Note::new(NoteId::new(5), "new", "")];
    service.replace_all(&imported).expect("replace_all failed");

    let snapshot = updates.try_recv().expect("replace_all should notify");
    assert_eq!(snapshot, imported);
    assert!(
        updates.try_recv().is_err(),
        "no intermediate empty snapshot is published"
    );
}

#[test]
fn dropped_subscribers_are_pruned() {
    let service = service();

    let first = service.subscribe();
    drop(first);

    // Must not error even though the first receiver is gone
    service.insert_note("still works", "").expect("insert failed");

    let second = service.subscribe();
    service.insert_note("observed", "").expect("insert failed");
    assert_eq!(second.try_recv().expect("second should observe").len(), 2);
}

#[test]
fn reads_do_not_notify() {
    let service = service();
    let updates = service.subscribe();

    service.list_notes().expect("list failed");
    service.get_note(NoteId::new(1)).expect("get failed");

    assert!(updates.try_recv().is_err(), "reads must not publish");
}
