use roster_store::{KeyValueBackend, MemoryBackend, Player, RosterEngine, RosterStore};
use std::collections::BTreeSet;
use std::io;
use std::sync::Arc;
use std::time::Duration;

/// Memory backend that sleeps between operations so read-modify-write cycles
/// of concurrent callers overlap.
#[derive(Clone, Default)]
struct SlowBackend {
    inner: MemoryBackend,
}

impl KeyValueBackend for SlowBackend {
    async fn read(&self, key: &str) -> io::Result<Option<Vec<u8>>> {
        let value = self.inner.read(key).await;
        tokio::time::sleep(Duration::from_millis(5)).await;
        value
    }

    async fn write(&self, key: &str, value: &[u8]) -> io::Result<()> {
        tokio::time::sleep(Duration::from_millis(5)).await;
        self.inner.write(key, value).await
    }

    async fn delete(&self, key: &str) -> io::Result<()> {
        self.inner.delete(key).await
    }

    async fn list_keys(&self, prefix: &str) -> io::Result<BTreeSet<String>> {
        self.inner.list_keys(prefix).await
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_adds_to_one_group_are_not_lost() {
    let engine = Arc::new(RosterEngine::new(SlowBackend::default()));

    let handles: Vec<_> = (0..20)
        .map(|i| {
            let engine = Arc::clone(&engine);
            tokio::spawn(async move {
                let team = if i % 2 == 0 { "Time A" } else { "Time B" };
                engine
                    .add_player_to_group(Player::new(format!("player-{}", i), team), "Turma1")
                    .await
            })
        })
        .collect();

    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    let roster = engine.list_players_by_group("Turma1").await.unwrap();
    assert_eq!(roster.len(), 20);
    assert_eq!(
        engine
            .list_players_by_group_and_team("Turma1", "Time A")
            .await
            .unwrap()
            .len(),
        10
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_duplicate_adds_admit_exactly_one() {
    let engine = Arc::new(RosterEngine::new(SlowBackend::default()));

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let engine = Arc::clone(&engine);
            tokio::spawn(async move {
                engine
                    .add_player_to_group(Player::new("Ana", "Time A"), "Turma1")
                    .await
            })
        })
        .collect();

    let mut successes = 0;
    for handle in handles {
        if handle.await.unwrap().is_ok() {
            successes += 1;
        }
    }

    assert_eq!(successes, 1);
    assert_eq!(engine.list_players_by_group("Turma1").await.unwrap().len(), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_mixed_operations_across_groups() {
    let engine = Arc::new(RosterEngine::new(SlowBackend::default()));

    let handles: Vec<_> = (0..12)
        .map(|i| {
            let engine = Arc::clone(&engine);
            tokio::spawn(async move {
                let group = format!("group-{}", i % 3);
                engine
                    .add_player_to_group(Player::new(format!("p{}", i), "Time A"), &group)
                    .await?;
                if i % 4 == 0 {
                    engine
                        .remove_player_from_group(&format!("p{}", i), &group)
                        .await?;
                }
                Ok::<_, roster_store::RosterError>(())
            })
        })
        .collect();

    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    let mut total = 0;
    for group in engine.list_groups().await.unwrap() {
        total += engine.list_players_by_group(&group).await.unwrap().len();
    }
    // p0, p4 and p8 were removed again
    assert_eq!(total, 9);
}
