use anyhow::Result;
use roster_store::{KeyValueBackend, LocalBackend, Player, RosterEngine, RosterStore};
use tempfile::TempDir;

#[tokio::test]
async fn test_rosters_survive_engine_restart() -> Result<()> {
    let temp_dir = TempDir::new()?;

    {
        let engine = RosterEngine::new(LocalBackend::new(temp_dir.path()));
        engine
            .add_player_to_group(Player::new("Ana", "Time A"), "Turma1")
            .await?;
        engine
            .add_player_to_group(Player::new("Bia", "Time B"), "Turma1")
            .await?;
    }

    let engine = RosterEngine::new(LocalBackend::new(temp_dir.path()));
    assert_eq!(
        engine.list_players_by_group_and_team("Turma1", "Time B").await?,
        vec![Player::new("Bia", "Time B")]
    );
    assert!(engine
        .add_player_to_group(Player::new("Ana", "Time B"), "Turma1")
        .await
        .is_err());

    Ok(())
}

#[tokio::test]
async fn test_group_names_with_special_characters() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let engine = RosterEngine::new(LocalBackend::new(temp_dir.path()));

    let groups = ["Turma 1/B", "../escape", "Ação:Noite", "."];
    for group in groups {
        engine
            .add_player_to_group(Player::new("Ana", "Time A"), group)
            .await?;
    }

    let mut expected: Vec<String> = groups.iter().map(|g| g.to_string()).collect();
    expected.sort();
    assert_eq!(engine.list_groups().await?, expected);

    // every roster file stays directly inside the data directory
    for entry in std::fs::read_dir(temp_dir.path())? {
        assert!(entry?.file_type()?.is_file());
    }
    assert!(!temp_dir.path().parent().unwrap().join("escape").exists());

    engine.remove_group("../escape").await?;
    assert_eq!(engine.list_groups().await?.len(), 3);

    Ok(())
}

#[tokio::test]
async fn test_missing_directory_behaves_as_empty_store() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let backend = LocalBackend::new(temp_dir.path().join("not-yet-created"));

    assert_eq!(backend.read("ns:a").await?, None);
    assert!(backend.list_keys("ns:").await?.is_empty());
    backend.delete("ns:a").await?;

    backend.write("ns:a", b"[]").await?;
    assert!(backend.base_path().exists());
    assert_eq!(backend.read("ns:a").await?, Some(b"[]".to_vec()));

    Ok(())
}

#[tokio::test]
async fn test_write_leaves_no_temporary_files() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let backend = LocalBackend::new(temp_dir.path());

    for i in 0..5 {
        backend.write("ns:a", format!("[{}]", i).as_bytes()).await?;
    }

    let names: Vec<String> = std::fs::read_dir(temp_dir.path())?
        .map(|e| e.map(|e| e.file_name().to_string_lossy().into_owned()))
        .collect::<std::io::Result<_>>()?;
    assert_eq!(names, vec!["ns%3Aa"]);
    assert_eq!(backend.read("ns:a").await?, Some(b"[4]".to_vec()));

    Ok(())
}

#[tokio::test]
async fn test_long_non_ascii_group_names() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let engine = RosterEngine::new(LocalBackend::new(temp_dir.path()));
    let group = "Programação ".repeat(10);
    let other = format!("{}2", group);

    assert!(engine.list_players_by_group(&group).await?.is_empty());
    assert!(!engine.group_exists(&group).await?);

    engine
        .add_player_to_group(Player::new("Ana", "Time A"), &group)
        .await?;
    engine
        .add_player_to_group(Player::new("Bia", "Time B"), &group)
        .await?;
    engine
        .add_player_to_group(Player::new("Ana", "Time B"), &other)
        .await?;

    assert_eq!(
        engine.list_players_by_group_and_team(&group, "Time A").await?,
        vec![Player::new("Ana", "Time A")]
    );
    assert!(engine
        .add_player_to_group(Player::new("Ana", "Time A"), &group)
        .await
        .is_err());
    assert_eq!(engine.list_groups().await?, vec![group.clone(), other.clone()]);

    for entry in std::fs::read_dir(temp_dir.path())? {
        assert!(entry?.file_name().len() < 255);
    }

    // a restarted engine finds the same rosters
    let engine = RosterEngine::new(LocalBackend::new(temp_dir.path()));
    assert_eq!(engine.list_players_by_group(&group).await?.len(), 2);

    engine.remove_player_from_group("Ana", &group).await?;
    engine.remove_group(&other).await?;
    assert_eq!(engine.list_groups().await?, vec![group.clone()]);
    assert_eq!(
        engine.list_players_by_group(&group).await?,
        vec![Player::new("Bia", "Time B")]
    );

    Ok(())
}
