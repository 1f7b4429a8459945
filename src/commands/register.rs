//! Player registration.

use super::common::CommandContext;
use crate::{
    cli::types::{PlayerId, TeamId},
    storage::Player,
    Result,
};

/// Add or update a player profile and return what was stored
pub fn register_player(
    ctx: &mut CommandContext,
    id: PlayerId,
    name: &str,
    minecraft: Option<String>,
    team: Option<TeamId>,
) -> Result<Player> {
    let player = Player {
        player_id: id,
        display_name: name.trim().to_string(),
        minecraft_username: minecraft
            .map(|m| m.trim().to_string())
            .filter(|m| !m.is_empty()),
        team_id: team.filter(|t| !t.as_str().is_empty()),
    };
    ctx.db.upsert_player(&player)?;
    Ok(player)
}

pub fn handle_register(
    ctx: &mut CommandContext,
    id: PlayerId,
    name: String,
    minecraft: Option<String>,
    team: Option<TeamId>,
) -> Result<()> {
    let player = register_player(ctx, id, &name, minecraft, team)?;
    match &player.team_id {
        Some(team) => println!(
            "✓ Registered {} ({}) on team {}",
            player.display_name, player.player_id, team
        ),
        None => println!(
            "✓ Registered {} ({}) as a free agent",
            player.display_name, player.player_id
        ),
    }
    Ok(())
}
