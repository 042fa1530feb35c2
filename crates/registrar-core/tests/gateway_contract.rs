//! # Gateway Contract Tests
//!
//! The same create/list/update/delete scenarios run against every
//! `StudentStore` implementation. If a backend fails any of them, the two
//! backends are no longer interchangeable.

use chrono::NaiveDate;
use registrar_core::{
    MemoryStore, Major, RedbStore, RegistrarError, Student, StudentId, StudentStore,
};
use tempfile::TempDir;

fn student(name: &str, code: &str, major: Major) -> Student {
    Student {
        id: None,
        name: name.to_string(),
        student_code: code.to_string(),
        date_of_birth: NaiveDate::from_ymd_opt(2001, 7, 14),
        major: Some(major),
        notes: format!("notes for {name}"),
        gender: "Female".to_string(),
        agreed_to_terms: true,
    }
}

fn with_each_store(check: impl Fn(&mut dyn StudentStore)) {
    let mut memory = MemoryStore::new();
    check(&mut memory);

    let temp = TempDir::new().expect("temp dir");
    let mut redb = RedbStore::open(temp.path().join("contract.redb")).expect("open db");
    check(&mut redb);
}

// =============================================================================
// CREATE + LIST
// =============================================================================

#[test]
fn created_record_is_listed_with_all_fields() {
    with_each_store(|store| {
        let input = student("Pham Van D", "PVD12345", Major::Marketing);
        let saved = store.save(input.clone()).expect("save");

        let id = saved.id.expect("identity assigned");
        let listed = store.find_all().expect("list");
        assert_eq!(listed.len(), 1);

        let expected = Student {
            id: Some(id),
            ..input
        };
        assert_eq!(listed[0], expected);
    });
}

#[test]
fn empty_store_lists_nothing() {
    with_each_store(|store| {
        assert!(store.find_all().expect("list").is_empty());
        assert_eq!(store.count().expect("count"), 0);
    });
}

#[test]
fn list_is_ordered_by_identity() {
    with_each_store(|store| {
        for (i, code) in ["AAAA0001", "AAAA0002", "AAAA0003"].iter().enumerate() {
            store
                .save(student(&format!("Student {i}"), code, Major::GraphicDesign))
                .expect("save");
        }
        let ids: Vec<_> = store
            .find_all()
            .expect("list")
            .into_iter()
            .filter_map(|s| s.id)
            .collect();
        assert_eq!(ids, vec![StudentId(1), StudentId(2), StudentId(3)]);
    });
}

// =============================================================================
// UPDATE
// =============================================================================

#[test]
fn update_changes_name_and_keeps_everything_else() {
    with_each_store(|store| {
        let saved = store
            .save(student("Original", "ORIG0001", Major::InformationTechnology))
            .expect("save");
        let id = saved.id.expect("id");

        let edited = Student {
            name: "Renamed".to_string(),
            ..saved.clone()
        };
        store.save(edited).expect("update");

        let found = store.find_by_id(id).expect("find").expect("present");
        assert_eq!(found.id, Some(id));
        assert_eq!(found.name, "Renamed");
        assert_eq!(
            Student {
                name: saved.name.clone(),
                ..found
            },
            saved
        );
        assert_eq!(store.count().expect("count"), 1);
    });
}

#[test]
fn update_unknown_identity_is_not_found() {
    with_each_store(|store| {
        let ghost = Student {
            id: Some(StudentId(77)),
            ..student("Ghost", "GHOST001", Major::Marketing)
        };
        let result = store.save(ghost);
        assert!(matches!(
            result,
            Err(RegistrarError::StudentNotFound(StudentId(77)))
        ));
        assert!(store.find_all().expect("list").is_empty());
    });
}

// =============================================================================
// DELETE
// =============================================================================

#[test]
fn delete_removes_only_the_target() {
    with_each_store(|store| {
        let a = store
            .save(student("Keep Me", "KEEP0001", Major::Marketing))
            .expect("save");
        let b = store
            .save(student("Drop Me", "DROP0001", Major::Marketing))
            .expect("save");

        assert!(store.delete_by_id(b.id.expect("id")).expect("delete"));

        let remaining = store.find_all().expect("list");
        assert_eq!(remaining, vec![a]);
    });
}

#[test]
fn delete_unknown_identity_leaves_others_alone() {
    with_each_store(|store| {
        let a = store
            .save(student("Keep Me", "KEEP0001", Major::Marketing))
            .expect("save");

        assert!(!store.delete_by_id(StudentId(500)).expect("delete"));
        assert_eq!(store.find_all().expect("list"), vec![a]);
    });
}

#[test]
fn delete_is_idempotent() {
    with_each_store(|store| {
        store
            .save(student("Once", "ONCE0001", Major::BusinessAdministration))
            .expect("save");
        let other = store
            .save(student("Other", "OTHR0001", Major::BusinessAdministration))
            .expect("save");

        assert!(store.delete_by_id(StudentId(1)).expect("first delete"));
        let after_first = store.find_all().expect("list");
        assert!(!store.delete_by_id(StudentId(1)).expect("second delete"));
        let after_second = store.find_all().expect("list");

        assert_eq!(after_first, after_second);
        assert_eq!(after_second, vec![other]);
    });
}
