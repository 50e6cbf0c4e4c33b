// Admin scoring driver.
//
// Run sequence:
// 1. Initialize tracing (stderr)
// 2. Load the rule table
// 3. Open the database
// 4. Compute the gameweek's scores
// 5. Persist results atomically (marks the gameweek finalized)
// 6. Print the summary and leaderboard

use gameweek_engine::config;
use gameweek_engine::engine;
use gameweek_engine::leaderboard;
use gameweek_engine::store;

use anyhow::Context;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing()?;

    let mut args = std::env::args().skip(1);
    let gameweek_id: i64 = match args.next() {
        Some(arg) => arg
            .parse()
            .with_context(|| format!("gameweek id must be a number, got `{arg}`"))?,
        None => {
            eprintln!("Usage: gwscore <gameweek-id> [db-path]");
            std::process::exit(2);
        }
    };
    let db_path = args.next().unwrap_or_else(|| "gameweek.db".to_string());

    let rules = config::load_rules().context("failed to load rules configuration")?;
    info!(
        "Rules loaded: {}-player squads, {} starting",
        rules.squad.size, rules.squad.starting
    );

    let db = store::SqliteStore::open(&db_path).context("failed to open database")?;
    info!("Database opened at {}", db_path);

    let scoring = engine::calculate_gameweek_scores(&db, &rules, gameweek_id)
        .await
        .context("scoring run failed")?;

    db.persist_results(gameweek_id, &scoring.results)
        .context("failed to persist results")?;

    println!(
        "Gameweek {}: {} scored, {} skipped",
        gameweek_id, scoring.summary.users_scored, scoring.summary.users_failed
    );
    for row in leaderboard::build_leaderboard(&scoring.results) {
        println!("{:>4}. {:<24} {:>4}", row.rank, row.user_id, row.total_points);
    }
    for error in &scoring.errors {
        println!("skipped: {} ({})", error.user_id, error.reason);
    }

    Ok(())
}

/// Initialize tracing to stderr so the stdout report stays clean.
fn init_tracing() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("gameweek_engine=info,warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    Ok(())
}
