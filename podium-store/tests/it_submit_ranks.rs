//! Rank semantics of sequential submissions.
//!
//! These pin the contract of `submit`: 1-based ranks computed from the
//! catalog snapshot that predates the submission, equal scores ranking behind
//! earlier submissions, and the sentinel rank 0 for invalid input.

use podium_store::{FileScoreStore, Leaderboard, UNRANKED};

fn store() -> (tempfile::TempDir, FileScoreStore) {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = FileScoreStore::new(dir.path());
    (dir, store)
}

#[tokio::test]
async fn rank_counts_strictly_greater_prior_scores() {
    let (_dir, store) = store();

    // rank = 1 + number of previously-submitted scores strictly greater
    let cases = [
        (300u64, 1u64),
        (2500, 1),
        (1200, 2),
        (2600, 1),
        (50, 5),
    ];

    for (i, (score, expected)) in cases.iter().enumerate() {
        let rank = store
            .submit("w", &format!("p{}", i), *score)
            .await
            .expect("submit should succeed");
        assert_eq!(rank, *expected, "score {} should rank {}", score, expected);
    }
}

#[tokio::test]
async fn each_new_top_bucket_is_rank_one() {
    let (_dir, store) = store();

    // 500, 1500, 2500 each open their own bucket; each new top bucket
    // outranks all lower buckets even though lower-scoring players exist.
    assert_eq!(store.submit("w", "p1", 500).await.unwrap(), 1);
    assert_eq!(store.submit("w", "p2", 1500).await.unwrap(), 1);
    assert_eq!(store.submit("w", "p3", 2500).await.unwrap(), 1);
}

#[tokio::test]
async fn same_bucket_orders_by_score_descending() {
    let (_dir, store) = store();

    assert_eq!(store.submit("w", "p1", 1200).await.unwrap(), 1);
    assert_eq!(store.submit("w", "p2", 1800).await.unwrap(), 1);
    assert_eq!(store.submit("w", "p3", 1500).await.unwrap(), 2);

    let top = store.top("w", 10).await.unwrap();
    let order: Vec<(&str, u64)> = top
        .iter()
        .map(|r| (r.player_id.as_str(), r.score))
        .collect();
    assert_eq!(order, vec![("p2", 1800), ("p3", 1500), ("p1", 1200)]);
}

#[tokio::test]
async fn earlier_submission_keeps_the_better_rank_on_ties() {
    let (_dir, store) = store();

    assert_eq!(store.submit("w", "first", 1500).await.unwrap(), 1);
    assert_eq!(store.submit("w", "second", 1500).await.unwrap(), 2);
    assert_eq!(store.submit("w", "third", 1500).await.unwrap(), 3);

    let top = store.top("w", 10).await.unwrap();
    let players: Vec<&str> = top.iter().map(|r| r.player_id.as_str()).collect();
    assert_eq!(players, vec!["first", "second", "third"]);
    assert_eq!(
        top.iter().map(|r| r.rank).collect::<Vec<_>>(),
        vec![1, 2, 3]
    );
}

#[tokio::test]
async fn worlds_rank_independently() {
    let (_dir, store) = store();

    assert_eq!(store.submit("alpha", "p1", 9000).await.unwrap(), 1);
    assert_eq!(store.submit("beta", "p1", 100).await.unwrap(), 1);
    assert_eq!(store.submit("beta", "p2", 50).await.unwrap(), 2);
}

#[tokio::test]
async fn invalid_submissions_return_the_sentinel_rank() {
    let (dir, store) = store();

    assert_eq!(store.submit("", "p1", 100).await.unwrap(), UNRANKED);
    assert_eq!(store.submit("w", "", 100).await.unwrap(), UNRANKED);
    assert_eq!(store.submit("w", "p1", 0).await.unwrap(), UNRANKED);
    assert_eq!(store.submit("a/b", "p1", 100).await.unwrap(), UNRANKED);
    assert_eq!(store.submit("..", "p1", 100).await.unwrap(), UNRANKED);

    // Nothing is recorded for rejected submissions.
    assert!(!dir.path().join("w").exists());
    let names: Vec<_> = match std::fs::read_dir(dir.path()) {
        Ok(read) => read.map(|e| e.unwrap().file_name()).collect(),
        Err(_) => Vec::new(),
    };
    assert!(names.is_empty(), "rejected submissions left {:?}", names);
}
