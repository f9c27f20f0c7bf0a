//! Corruption tolerance and crash recovery.
//!
//! A single bad file must never make a leaderboard unusable, but the target
//! shard of a submission is load-bearing: if it cannot be read back, the
//! submission aborts rather than overwrite ranked players.

use podium_store::{FileScoreStore, Leaderboard, StoreError};

fn store() -> (tempfile::TempDir, FileScoreStore) {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = FileScoreStore::new(dir.path());
    (dir, store)
}

#[tokio::test]
async fn foreign_files_are_skipped_not_fatal() {
    let (dir, store) = store();

    store.submit("w", "p1", 1500).await.unwrap();

    let world_dir = dir.path().join("w");
    std::fs::write(world_dir.join("notes.txt"), "not a shard").unwrap();
    std::fs::write(world_dir.join("999 - x.json"), "[]").unwrap();

    // Ranking and reads still work around the foreign files.
    assert_eq!(store.submit("w", "p2", 2500).await.unwrap(), 1);
    assert_eq!(store.top("w", 10).await.unwrap().len(), 2);

    // The foreign files are left untouched.
    assert_eq!(
        std::fs::read_to_string(world_dir.join("notes.txt")).unwrap(),
        "not a shard"
    );
    assert!(world_dir.join("999 - x.json").exists());
}

#[tokio::test]
async fn corrupt_target_shard_aborts_the_submission() {
    let (dir, store) = store();

    store.submit("w", "p1", 500).await.unwrap();
    let world_dir = dir.path().join("w");
    let corrupt = world_dir.join("1000 - 2.json");
    std::fs::write(&corrupt, "{ not json").unwrap();

    let err = store
        .submit("w", "p2", 1500)
        .await
        .expect_err("submission into a corrupt shard must abort");
    assert!(matches!(err, StoreError::Corruption(_)), "got {:?}", err);

    // The corrupt file is left exactly as it was; nothing was overwritten.
    assert_eq!(std::fs::read_to_string(&corrupt).unwrap(), "{ not json");

    // Other buckets are unaffected.
    assert_eq!(store.submit("w", "p3", 2500).await.unwrap(), 1);
}

#[tokio::test]
async fn count_mismatch_in_target_shard_is_corruption() {
    let (dir, store) = store();

    store.submit("w", "p1", 1500).await.unwrap();
    let world_dir = dir.path().join("w");
    // Rename the shard so its count field lies about the content.
    std::fs::rename(
        world_dir.join("1000 - 1.json"),
        world_dir.join("1000 - 2.json"),
    )
    .unwrap();

    let err = store.submit("w", "p2", 1800).await.expect_err("must abort");
    assert!(matches!(err, StoreError::Corruption(_)), "got {:?}", err);
}

#[tokio::test]
async fn unreadable_shard_is_skipped_in_reads_but_keeps_its_rank_slot() {
    let (dir, store) = store();

    store.submit("w", "p1", 2500).await.unwrap();
    store.submit("w", "p2", 500).await.unwrap();

    // Corrupt the top shard's content; its catalog count still offsets ranks.
    let world_dir = dir.path().join("w");
    std::fs::write(world_dir.join("2000 - 1.json"), "garbage").unwrap();

    let page = store.top("w", 10).await.unwrap();
    assert_eq!(page.len(), 1);
    assert_eq!(page[0].player_id, "p2");
    assert_eq!(page[0].rank, 2);
}

#[tokio::test]
async fn duplicate_bucket_files_are_merged_before_use() {
    let (dir, store) = store();

    // Simulate a crash between the rename of the grown shard and the delete
    // of its predecessor: both files present for bucket 1000.
    let world_dir = dir.path().join("w");
    std::fs::create_dir_all(&world_dir).unwrap();
    std::fs::write(
        world_dir.join("1000 - 2.json"),
        r#"[{"playerId":"a","score":1800},{"playerId":"c","score":1200}]"#,
    )
    .unwrap();
    std::fs::write(
        world_dir.join("1000 - 3.json"),
        r#"[{"playerId":"a","score":1800},{"playerId":"b","score":1500},{"playerId":"c","score":1200}]"#,
    )
    .unwrap();

    let stats = store.world_stats("w").await.unwrap();
    assert_eq!(stats.players, 3);
    assert_eq!(stats.buckets, 1);

    assert!(!world_dir.join("1000 - 2.json").exists());
    assert!(world_dir.join("1000 - 3.json").exists());

    // The merged shard ranks normally afterwards.
    assert_eq!(store.submit("w", "d", 1600).await.unwrap(), 2);
}

#[tokio::test]
async fn diverged_duplicates_lose_no_records() {
    let (dir, store) = store();

    // Two concurrent writers from a pre-locking deployment: each file holds a
    // record the other lacks.
    let world_dir = dir.path().join("w");
    std::fs::create_dir_all(&world_dir).unwrap();
    std::fs::write(
        world_dir.join("1000 - 2.json"),
        r#"[{"playerId":"a","score":1800},{"playerId":"d","score":1400}]"#,
    )
    .unwrap();
    std::fs::write(
        world_dir.join("1000 - 3.json"),
        r#"[{"playerId":"a","score":1800},{"playerId":"b","score":1500},{"playerId":"c","score":1200}]"#,
    )
    .unwrap();

    let page = store.top("w", 10).await.unwrap();
    let got: Vec<(&str, u64)> = page
        .iter()
        .map(|r| (r.player_id.as_str(), r.score))
        .collect();
    assert_eq!(
        got,
        vec![("a", 1800), ("b", 1500), ("d", 1400), ("c", 1200)]
    );

    assert!(world_dir.join("1000 - 4.json").exists());
    assert!(!world_dir.join("1000 - 2.json").exists());
    assert!(!world_dir.join("1000 - 3.json").exists());
}
