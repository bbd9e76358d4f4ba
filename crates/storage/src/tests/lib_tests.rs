use super::*;

#[tokio::test]
async fn missing_key_reads_as_none() {
    let storage = Storage::new("sqlite::memory:").await.expect("db");
    let value = storage.session_value("current_pair_id").await.expect("read");
    assert_eq!(value, None);
}

#[tokio::test]
async fn stores_and_overwrites_session_value() {
    let storage = Storage::new("sqlite::memory:").await.expect("db");

    storage
        .set_session_value("current_pair_id", "5")
        .await
        .expect("first write");
    assert_eq!(
        storage.session_value("current_pair_id").await.expect("read"),
        Some("5".to_string())
    );

    storage
        .set_session_value("current_pair_id", "6")
        .await
        .expect("overwrite");
    assert_eq!(
        storage.session_value("current_pair_id").await.expect("read"),
        Some("6".to_string())
    );
}

#[tokio::test]
async fn keys_are_independent() {
    let storage = Storage::new("sqlite::memory:").await.expect("db");
    storage
        .set_session_value("current_pair_id", "12")
        .await
        .expect("write");
    assert_eq!(
        storage.session_value("another_key").await.expect("read"),
        None
    );
}

#[tokio::test]
async fn health_check_succeeds_for_live_pool() {
    let storage = Storage::new("sqlite::memory:").await.expect("db");
    storage.health_check().await.expect("health check");
}

#[tokio::test]
async fn creates_database_file_in_missing_directory() {
    let temp_root = tempfile::tempdir().expect("temp dir");
    let db_path = temp_root.path().join("nested").join("annotator.db");
    let database_url = format!("sqlite://{}", db_path.to_string_lossy().replace('\\', "/"));

    let storage = Storage::new(&database_url).await.expect("db");
    drop(storage);

    assert!(
        db_path.exists(),
        "database file should exist: {}",
        db_path.display()
    );
}

#[tokio::test]
async fn values_survive_reopening_the_database() {
    let temp_root = tempfile::tempdir().expect("temp dir");
    let db_path = temp_root.path().join("annotator.db");
    let database_url = format!("sqlite://{}", db_path.to_string_lossy().replace('\\', "/"));

    {
        let storage = Storage::new(&database_url).await.expect("db");
        storage
            .set_session_value("current_pair_id", "41")
            .await
            .expect("write");
    }

    let reopened = Storage::new(&database_url).await.expect("reopen");
    assert_eq!(
        reopened.session_value("current_pair_id").await.expect("read"),
        Some("41".to_string())
    );
}
