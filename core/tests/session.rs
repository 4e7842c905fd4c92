//! `EditSession` driving a real `TodoStore`.

mod support;

use support::{todo, FakeGateway};
use todo_sync::{Draft, DraftChange, EditSession, EditState, ErrorKind, TodoError, TodoId, TodoStore};

async fn store_with_one() -> TodoStore<FakeGateway> {
    let mut original = todo("1", "A", false);
    original.description = "first".into();
    let mut store = TodoStore::new(FakeGateway::with_todos(vec![original]));
    store.load().await.unwrap();
    store
}

#[tokio::test]
async fn cancel_after_editing_leaves_store_untouched() {
    let store = store_with_one().await;
    let id = TodoId::from("1");
    let before = store.get(&id).unwrap().clone();
    let calls = store.gateway().calls();

    let mut session = EditSession::new();
    session.start_edit(&before);
    session
        .update_draft(DraftChange {
            title: Some("rewritten".into()),
            description: Some("entirely".into()),
        })
        .unwrap();
    session.cancel();

    assert_eq!(session.state(), &EditState::Idle);
    assert_eq!(store.get(&id), Some(&before));
    assert_eq!(store.gateway().calls(), calls);
}

#[tokio::test]
async fn save_with_empty_title_stays_editing_without_request() {
    let mut store = store_with_one().await;
    let calls = store.gateway().calls();

    let mut session = EditSession::new();
    session.start_edit(&store.todos()[0].clone());
    session.update_draft(DraftChange::title("   ")).unwrap();

    let err = session.save(&mut store).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Validation);
    assert!(session.is_editing());
    assert_eq!(session.draft(), Some(&Draft::new("   ", "first")));
    assert_eq!(store.gateway().calls(), calls);
}

#[tokio::test]
async fn successful_save_updates_store_and_returns_to_idle() {
    let mut store = store_with_one().await;
    let id = TodoId::from("1");

    let mut session = EditSession::new();
    session.start_edit(store.get(&id).unwrap());
    session.update_draft(DraftChange::title("A, revised")).unwrap();

    let saved = session.save(&mut store).await.unwrap();

    assert_eq!(session.state(), &EditState::Idle);
    assert_eq!(saved.title, "A, revised");
    assert_eq!(saved.description, "first");
    assert_eq!(store.get(&id), Some(&saved));
}

#[tokio::test]
async fn failed_save_keeps_edit_open_for_retry() {
    let mut store = store_with_one().await;
    let id = TodoId::from("1");
    let before = store.todos().to_vec();

    let mut session = EditSession::new();
    session.start_edit(store.get(&id).unwrap());
    session.update_draft(DraftChange::description("second")).unwrap();

    store
        .gateway()
        .fail_next(TodoError::Transport("network unreachable".into()));
    let err = session.save(&mut store).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Transport);
    assert_eq!(session.target_id(), Some(&id));
    assert_eq!(session.draft(), Some(&Draft::new("A", "second")));
    assert_eq!(store.todos(), before.as_slice());

    // retry goes through
    let saved = session.save(&mut store).await.unwrap();
    assert_eq!(saved.description, "second");
    assert!(!session.is_editing());
}

#[tokio::test]
async fn save_after_remote_delete_surfaces_not_found_and_stays_editing() {
    let mut store = store_with_one().await;
    let id = TodoId::from("1");

    let mut session = EditSession::new();
    session.start_edit(store.get(&id).unwrap());
    store.gateway().delete_remotely(&id);

    let err = session.save(&mut store).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert!(session.is_editing());
}

#[tokio::test]
async fn save_while_idle_is_rejected() {
    let mut store = store_with_one().await;
    let calls = store.gateway().calls();

    let err = EditSession::new().save(&mut store).await.unwrap_err();

    assert_eq!(err, TodoError::NotEditing);
    assert_eq!(store.gateway().calls(), calls);
}
