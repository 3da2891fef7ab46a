//! Pokedex Sync - headless driver
//!
//! Loads the catalog (store first, network on a miss) and runs one operation
//! against it: list, refresh, show, favorite or battle.

use clap::{Parser, Subcommand};
use pokedex_sync::{
    battle, random_opponent, CatalogConfig, CatalogEntity, CatalogQuery, CatalogSession,
    FetchPipeline, SortOption, SqliteStore,
};
use std::path::PathBuf;
use std::sync::Arc;

/// PokeAPI catalog with a local SQLite cache
#[derive(Parser, Debug)]
#[command(name = "pokedex_sync")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the SQLite database file
    #[arg(short, long, default_value_t = default_db_path())]
    database: String,

    /// PokeAPI root URL
    #[arg(long, default_value = pokedex_sync::config::DEFAULT_BASE_URL)]
    base_url: String,

    /// Maximum concurrent detail requests during a refresh
    #[arg(long, default_value_t = pokedex_sync::config::DEFAULT_MAX_IN_FLIGHT)]
    max_in_flight: usize,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the catalog, optionally filtered and sorted
    List {
        /// Case-insensitive name substring
        #[arg(short, long)]
        search: Option<String>,
        /// Only entries of this type
        #[arg(short = 't', long = "type")]
        type_filter: Option<String>,
        /// Only favorites
        #[arg(short, long, default_value_t = false)]
        favorites: bool,
        /// id, name, attack, defense or speed
        #[arg(long, default_value_t = SortOption::Id)]
        sort: SortOption,
    },
    /// Re-fetch the catalog from the API, replacing the stored copy
    Refresh,
    /// Show one entry
    Show { id: i64 },
    /// Toggle the favorite flag of an entry
    Favorite { id: i64 },
    /// Battle two entries; the opponent is random when omitted
    Battle { player: i64, opponent: Option<i64> },
}

fn default_db_path() -> String {
    pokedex_sync::config::default_db_path()
        .to_string_lossy()
        .to_string()
}

#[tokio::main]
async fn main() {
    // Set RUST_LOG to control log level, e.g. RUST_LOG=pokedex_sync=debug
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    if let Err(e) = run(args).await {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

async fn run(args: Args) -> Result<(), String> {
    let config = CatalogConfig {
        base_url: args.base_url,
        max_in_flight: args.max_in_flight,
        db_path: PathBuf::from(&args.database),
        ..CatalogConfig::default()
    };

    let store = Arc::new(
        SqliteStore::open(&config.db_path).map_err(|e| format!("Failed to open database: {}", e))?,
    );
    let pipeline = FetchPipeline::from_config(&config, Arc::clone(&store));

    if let Command::Refresh = args.command {
        let entities = pipeline
            .refresh()
            .await
            .map_err(|e| format!("Refresh failed: {}", e))?;
        println!("Refreshed {} entries", entities.len());
        return Ok(());
    }

    let entities = pipeline
        .load_catalog()
        .await
        .map_err(|e| format!("Failed to load catalog: {}", e))?;
    let mut session = CatalogSession::new(entities, store);

    match args.command {
        Command::List {
            search,
            type_filter,
            favorites,
            sort,
        } => {
            let query = CatalogQuery {
                search,
                type_filter,
                favorites_only: favorites,
                sort,
            };
            let rows = session.query(&query);
            for entity in &rows {
                println!("{}", format_row(entity));
            }
            println!("{} of {} entries", rows.len(), session.entities().len());
        }
        Command::Show { id } => {
            let entity = session.get(id).ok_or_else(|| format!("No entry with id {}", id))?;
            println!("{}", format_detail(entity));
        }
        Command::Favorite { id } => match session.toggle_favorite(id).await {
            Some(true) => println!("#{} added to favorites", id),
            Some(false) => println!("#{} removed from favorites", id),
            None => return Err(format!("No entry with id {}", id)),
        },
        Command::Battle { player, opponent } => {
            let player = session
                .get(player)
                .ok_or_else(|| format!("No entry with id {}", player))?;
            let opponent = match opponent {
                Some(id) => session.get(id).ok_or_else(|| format!("No entry with id {}", id))?,
                None => random_opponent(session.entities(), &mut rand::rng())
                    .ok_or_else(|| "Catalog is empty".to_string())?,
            };

            let outcome = battle(player, opponent);
            println!(
                "{} ({}) vs {} ({})",
                outcome.player.display_name(),
                outcome.player_score,
                outcome.opponent.display_name(),
                outcome.opponent_score
            );
            println!("{} wins!", outcome.winner.display_name());
        }
        Command::Refresh => {}
    }

    Ok(())
}

fn format_row(entity: &CatalogEntity) -> String {
    format!(
        "#{:<3} {:<12} {:<16} {}",
        entity.id,
        entity.display_name(),
        entity.types,
        if entity.is_favorite { "*" } else { "" }
    )
}

fn format_detail(entity: &CatalogEntity) -> String {
    format!(
        "#{} {}{}\nTypes: {}\nHP: {}\nAttack: {}\nDefense: {}\nSpeed: {}\nImage: {}",
        entity.id,
        entity.display_name(),
        if entity.is_favorite { " (favorite)" } else { "" },
        entity.type_list().collect::<Vec<_>>().join(", "),
        entity.hp,
        entity.attack,
        entity.defense,
        entity.speed,
        entity.image_url
    )
}
