#[cfg(test)]
mod tests {
    use super::super::todo_store::TodoStore;
    use crate::domain::{error::StoreError, repository::TodoRepository, todo::{TodoId, UpdateTodo}};
    use crate::infrastructure::memory_repo::InMemoryRepository;
    use chrono::NaiveDate;
    use std::{cell::RefCell, collections::HashSet, rc::Rc};

    fn store_with(titles: &[&str]) -> (InMemoryRepository, TodoStore<InMemoryRepository>) {
        let repo = InMemoryRepository::default();
        let mut store = TodoStore::open(repo.clone());
        for t in titles { store.add(t, "", None).unwrap(); }
        (repo, store)
    }

    fn titles<R: TodoRepository>(store: &TodoStore<R>) -> Vec<&str> {
        store.items().iter().map(|t| t.title.as_str()).collect()
    }

    #[test]
    fn add_trims_and_defaults() {
        let (_, mut store) = store_with(&[]);
        let id = store.add("  Buy milk  ", "  ", None).unwrap();
        let todo = store.get(id).unwrap();
        assert_eq!(todo.title, "Buy milk");
        assert_eq!(todo.notes, "");
        assert_eq!(todo.due_date, None);
        assert!(!todo.is_completed);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn add_blank_title_is_ignored_without_saving() {
        let (repo, mut store) = store_with(&["A"]);
        assert!(store.add("   ", "notes", None).is_none());
        assert_eq!(store.len(), 1);
        assert_eq!(repo.save_count(), 1);
    }

    #[test]
    fn add_appends_in_order_and_persists_each_time() {
        let (repo, store) = store_with(&["A", "B", "C"]);
        assert_eq!(titles(&store), ["A", "B", "C"]);
        assert_eq!(repo.save_count(), 3);
    }

    #[test]
    fn ids_are_unique() {
        let (_, mut store) = store_with(&["a", "b", "c", "d", "e"]);
        store.delete_at([1, 3]).unwrap();
        store.add("f", "", None);
        let ids: HashSet<TodoId> = store.items().iter().map(|t| t.id).collect();
        assert_eq!(ids.len(), store.len());
    }

    #[test]
    fn delete_at_preserves_relative_order() {
        let (_, mut store) = store_with(&["A", "B", "C", "D"]);
        let removed = store.delete_at([1]).unwrap();
        assert_eq!(removed[0].title, "B");
        assert_eq!(titles(&store), ["A", "C", "D"]);
    }

    #[test]
    fn delete_at_multiple_positions() {
        let (_, mut store) = store_with(&["A", "B", "C", "D", "E"]);
        let removed = store.delete_at([3, 0, 3]).unwrap();
        assert_eq!(removed.iter().map(|t| t.title.as_str()).collect::<Vec<_>>(), ["A", "D"]);
        assert_eq!(titles(&store), ["B", "C", "E"]);
    }

    #[test]
    fn delete_at_out_of_range_changes_nothing() {
        let (repo, mut store) = store_with(&["A", "B"]);
        let err = store.delete_at([0, 2]).unwrap_err();
        assert!(matches!(err, StoreError::IndexOutOfRange { index: 2, len: 2 }));
        assert_eq!(titles(&store), ["A", "B"]);
        assert_eq!(repo.save_count(), 2);
    }

    #[test]
    fn delete_at_empty_set_does_not_save() {
        let (repo, mut store) = store_with(&["A"]);
        assert!(store.delete_at(std::iter::empty()).unwrap().is_empty());
        assert_eq!(repo.save_count(), 1);
    }

    #[test]
    fn delete_by_id() {
        let (_, mut store) = store_with(&["A", "B", "C"]);
        let id = store.items()[1].id;
        assert_eq!(store.delete_by_id(id).unwrap().title, "B");
        assert_eq!(titles(&store), ["A", "C"]);
    }

    #[test]
    fn delete_by_absent_id_is_a_no_op() {
        let (repo, mut store) = store_with(&["A"]);
        assert!(store.delete_by_id(TodoId(uuid::Uuid::new_v4())).is_none());
        assert_eq!(titles(&store), ["A"]);
        assert_eq!(repo.save_count(), 1);
    }

    #[test]
    fn double_toggle_restores() {
        let (_, mut store) = store_with(&["A"]);
        let id = store.items()[0].id;
        assert!(store.toggle_completion(id));
        assert!(store.get(id).unwrap().is_completed);
        assert!(store.toggle_completion(id));
        assert!(!store.get(id).unwrap().is_completed);
    }

    #[test]
    fn toggle_absent_id_does_not_save() {
        let (repo, mut store) = store_with(&["A"]);
        assert!(!store.toggle_completion(TodoId(uuid::Uuid::new_v4())));
        assert_eq!(repo.save_count(), 1);
    }

    #[test]
    fn update_replaces_only_given_fields() {
        let (_, mut store) = store_with(&[]);
        let due = NaiveDate::from_ymd_opt(2025, 6, 1);
        let id = store.add("Plan trip", "book hotel", due).unwrap();
        assert!(store.update(id, UpdateTodo::default().title("  Plan holiday ")));
        let todo = store.get(id).unwrap();
        assert_eq!(todo.title, "Plan holiday");
        assert_eq!(todo.notes, "book hotel");
        assert_eq!(todo.due_date, due);

        assert!(store.update(id, UpdateTodo::default().notes("  ").due_date(None).completed(true)));
        let todo = store.get(id).unwrap();
        assert_eq!(todo.notes, "");
        assert_eq!(todo.due_date, None);
        assert!(todo.is_completed);
        assert_eq!(todo.id, id);
    }

    #[test]
    fn update_with_blank_title_is_rejected_whole() {
        let (repo, mut store) = store_with(&["Keep"]);
        let id = store.items()[0].id;
        assert!(!store.update(id, UpdateTodo::default().title("   ").notes("changed")));
        let todo = store.get(id).unwrap();
        assert_eq!(todo.title, "Keep");
        assert_eq!(todo.notes, "");
        assert_eq!(repo.save_count(), 1);
    }

    #[test]
    fn update_absent_id_is_a_no_op() {
        let (repo, mut store) = store_with(&["A"]);
        assert!(!store.update(TodoId(uuid::Uuid::new_v4()), UpdateTodo::default().title("B")));
        assert_eq!(repo.save_count(), 1);
    }

    #[test]
    fn reopen_restores_the_same_sequence() {
        let (repo, mut store) = store_with(&["A", "B", "C"]);
        let id = store.items()[2].id;
        store.toggle_completion(id);
        store.update(id, UpdateTodo::default().due_date(NaiveDate::from_ymd_opt(2030, 12, 31)));
        store.delete_at([0]).unwrap();
        let reopened = TodoStore::open(repo);
        assert_eq!(reopened.items(), store.items());
        assert!(reopened.load_failure().is_none());
    }

    #[test]
    fn first_run_is_empty() {
        let store = TodoStore::open(InMemoryRepository::default());
        assert!(store.is_empty());
        assert!(store.load_failure().is_none());
    }

    #[test]
    fn corrupt_contents_start_empty_and_are_kept() {
        let repo = InMemoryRepository::with_contents("{ not json");
        let store = TodoStore::open(repo.clone());
        assert!(store.is_empty());
        assert!(matches!(store.load_failure(), Some(StoreError::Decode { .. })));
        assert!(store.load_failure().is_some_and(StoreError::is_load_failure));
        assert_eq!(repo.contents().as_deref(), Some(&b"{ not json"[..]));
    }

    #[test]
    fn duplicate_ids_are_a_load_failure() {
        let raw = r#"[
            {"id":"6f1c2f0e-8f9a-4a43-9d55-1a2b3c4d5e6f","title":"a","isCompleted":false,"notes":""},
            {"id":"6f1c2f0e-8f9a-4a43-9d55-1a2b3c4d5e6f","title":"b","isCompleted":true,"notes":""}
        ]"#;
        let store = TodoStore::open(InMemoryRepository::with_contents(raw));
        assert!(store.is_empty());
        assert!(matches!(store.load_failure(), Some(StoreError::DuplicateId(_))));
    }

    #[test]
    fn write_failure_keeps_memory_and_next_change_retries() {
        let (repo, mut store) = store_with(&["A"]);
        repo.set_fail_writes(true);
        store.add("B", "", None).unwrap();
        assert_eq!(titles(&store), ["A", "B"]);
        assert!(!store.is_synced());
        assert_eq!(TodoStore::open(repo.clone()).len(), 1);

        repo.set_fail_writes(false);
        store.add("C", "", None).unwrap();
        assert!(store.is_synced());
        assert_eq!(titles(&TodoStore::open(repo)), ["A", "B", "C"]);
    }

    #[test]
    fn persist_reports_errors_to_the_caller() {
        let (repo, store) = store_with(&["A"]);
        repo.set_fail_writes(true);
        assert!(store.persist().unwrap_err().is_write_failure());
    }

    #[test]
    fn observers_see_each_change() {
        let (_, mut store) = store_with(&["A"]);
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        let sub = store.subscribe(move |items| sink.borrow_mut().push(items.len()));
        store.add("B", "", None);
        store.add(" ", "", None);
        let id = store.items()[0].id;
        store.toggle_completion(id);
        store.delete_by_id(id);
        let remaining = store.items()[0].id;
        assert!(store.update(remaining, UpdateTodo::default().notes("after")));
        assert!(!store.update(remaining, UpdateTodo::default().title("  ")));
        assert!(store.delete_at([5]).is_err());
        assert_eq!(*seen.borrow(), [2, 2, 1, 1]);

        assert!(store.unsubscribe(sub));
        assert!(!store.unsubscribe(sub));
        store.add("C", "", None);
        assert_eq!(seen.borrow().len(), 4);
    }
}
