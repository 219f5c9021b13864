use clap::Parser;
use roster_store::config::cli::Command;
use roster_store::utils::{logger, validation::Validate};
use roster_store::{open_store, CliConfig, ErrorKind, Player, RosterError, RosterStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    let settings = match cli.settings() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(exit_code(&e));
        }
    };

    logger::init_logger(cli.verbose, settings.log_level(), settings.log_format());
    tracing::debug!("Resolved settings: {:?}", settings);

    if let Err(e) = settings.validate() {
        tracing::error!("Configuration validation failed: {}", e);
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());
        std::process::exit(exit_code(&e));
    }

    let store = match open_store(&settings).await {
        Ok(store) => store,
        Err(e) => {
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(exit_code(&e));
        }
    };

    if let Err(e) = run(store.as_ref(), cli.command).await {
        tracing::error!("Command failed: {} (kind: {:?})", e, e.kind());
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());
        std::process::exit(exit_code(&e));
    }

    Ok(())
}

async fn run(store: &dyn RosterStore, command: Command) -> roster_store::Result<()> {
    match command {
        Command::Add {
            group,
            player,
            team,
        } => {
            store
                .add_player_to_group(Player::new(player.clone(), team.clone()), &group)
                .await?;
            println!("Added {} to {} ({})", player, group, team);
        }
        Command::List { group, team } => {
            let players = match &team {
                Some(team) => store.list_players_by_group_and_team(&group, team).await?,
                None => store.list_players_by_group(&group).await?,
            };
            for player in &players {
                println!("{}\t{}", player.name, player.team);
            }
            tracing::info!("{} players", players.len());
        }
        Command::Remove { group, player } => {
            store.remove_player_from_group(&player, &group).await?;
            println!("Removed {} from {}", player, group);
        }
        Command::CreateGroup { group } => {
            store.create_group(&group).await?;
            println!("Created {}", group);
        }
        Command::RemoveGroup { group } => {
            store.remove_group(&group).await?;
            println!("Removed group {}", group);
        }
        Command::Groups => {
            for group in store.list_groups().await? {
                println!("{}", group);
            }
        }
    }
    Ok(())
}

fn exit_code(error: &RosterError) -> i32 {
    match error.kind() {
        ErrorKind::DuplicatePlayer | ErrorKind::DuplicateGroup | ErrorKind::InvalidInput => 2,
        ErrorKind::Configuration => 3,
        ErrorKind::StorageIoFailure | ErrorKind::DecodeFailure | ErrorKind::EncodeFailure => 1,
    }
}
