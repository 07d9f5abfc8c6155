mod common;
use common::{sample_record, test_db};

#[tokio::test]
async fn test_run_record_round_trip() {
    let db = test_db("round_trip");
    let record = sample_record("forest-loop", 1_700_000_000_000);

    db.insert_run_record(&record)
        .await
        .expect("Failed to insert run");

    let loaded = db
        .get_run_record("forest-loop")
        .await
        .expect("Failed to query run")
        .expect("Run missing after insert");
    assert_eq!(loaded, record);
}

#[tokio::test]
async fn test_missing_run_is_none() {
    let db = test_db("missing");
    let loaded = db.get_run_record("nope").await.expect("Query failed");
    assert!(loaded.is_none());
}

#[tokio::test]
async fn test_duplicate_id_is_rejected() {
    let db = test_db("duplicate");
    let record = sample_record("same", 1);
    db.insert_run_record(&record).await.expect("First insert failed");
    assert!(db.insert_run_record(&record).await.is_err());
    assert_eq!(db.count_run_records().await.unwrap(), 1);
}

#[tokio::test]
async fn test_list_is_newest_first_and_paginates() {
    let db = test_db("listing");
    for (id, date) in [("tuesday", 200), ("monday", 100), ("wednesday", 300)] {
        db.insert_run_record(&sample_record(id, date))
            .await
            .expect("Insert failed");
    }

    let all = db.list_run_records().await.expect("List failed");
    let ids: Vec<&str> = all.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["wednesday", "tuesday", "monday"]);

    let page = db
        .list_run_records_paginated(2, 1)
        .await
        .expect("Paginated list failed");
    let ids: Vec<&str> = page.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["tuesday", "monday"]);

    assert_eq!(db.count_run_records().await.unwrap(), 3);
}

#[tokio::test]
async fn test_reopening_keeps_saved_runs() {
    let path = common::scratch_db_path("reopen");
    {
        let db = trailpace_lib::db::Database::new(path.clone()).expect("Open failed");
        db.insert_run_record(&sample_record("kept", 42))
            .await
            .expect("Insert failed");
    }

    let reopened = trailpace_lib::db::Database::new(path).expect("Reopen failed");
    assert_eq!(reopened.count_run_records().await.unwrap(), 1);
    assert!(reopened.get_run_record("kept").await.unwrap().is_some());
}
