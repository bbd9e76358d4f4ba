use super::*;

#[tokio::test]
async fn fresh_store_has_no_cursor() {
    let storage = Storage::new("sqlite::memory:").await.expect("db");
    let store = DurableCursorStore::new(storage);

    assert_eq!(store.load().await.expect("load"), None);
}

#[tokio::test]
async fn round_trips_the_cursor_value() {
    let storage = Storage::new("sqlite::memory:").await.expect("db");
    let store = DurableCursorStore::new(storage.clone());

    store.store(42).await.expect("store");

    assert_eq!(store.load().await.expect("load"), Some(42));
    assert_eq!(
        storage.session_value(CURSOR_KEY).await.expect("raw read"),
        Some("42".to_string())
    );
}

#[tokio::test]
async fn overwrites_the_previous_cursor() {
    let storage = Storage::new("sqlite::memory:").await.expect("db");
    let store = DurableCursorStore::new(storage);

    store.store(1).await.expect("first");
    store.store(9).await.expect("second");

    assert_eq!(store.load().await.expect("load"), Some(9));
}

#[tokio::test]
async fn unparsable_stored_value_loads_as_absent() {
    let storage = Storage::new("sqlite::memory:").await.expect("db");
    storage
        .set_session_value(CURSOR_KEY, "not-a-number")
        .await
        .expect("seed");
    let store = DurableCursorStore::new(storage);

    assert_eq!(store.load().await.expect("load"), None);
}
