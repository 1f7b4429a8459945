//! Entry point: parse CLI and dispatch to command handlers.

use anyhow::Context;
use clap::Parser;
use mba_stats::{
    cli::{Commands, Mba},
    commands::{
        common::CommandContext, free_agents::handle_free_agents, leaderboard::handle_leaderboard,
        park::handle_park, player::handle_player, record::handle_record,
        register::handle_register, role::handle_role,
    },
    config::Config,
};
use tracing_subscriber::EnvFilter;

/// Log to stderr so stdout stays clean for `--json` output.
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("mba_stats=debug,warn")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Run the CLI.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let app = Mba::parse();
    init_tracing(app.verbose);

    let config = Config::from_env().context("invalid configuration")?;
    let mut ctx = CommandContext::new(config).context("failed to open the stats database")?;

    match app.command {
        Commands::Register {
            id,
            name,
            minecraft,
            team,
        } => handle_register(&mut ctx, id, name, minecraft, team)?,

        Commands::Record {
            player,
            season,
            line,
        } => handle_record(&mut ctx, player, season, line.to_game_line())?,

        Commands::Player {
            id,
            season,
            park,
            json,
        } => handle_player(&ctx, id, season, park, json).await?,

        Commands::Leaderboard {
            stat,
            mode,
            limit,
            season,
            remote,
            refresh,
            json,
        } => handle_leaderboard(&ctx, stat, mode, limit, season, remote, refresh, json).await?,

        Commands::Park {
            player,
            season,
            refresh,
            json,
        } => handle_park(&ctx, player, season, refresh, json).await?,

        Commands::FreeAgents { json } => handle_free_agents(&ctx, json)?,

        Commands::Role { action, user, role } => handle_role(&ctx, action, user, role).await?,
    }

    Ok(())
}
