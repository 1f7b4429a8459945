//! Free agent listing.

use super::common::{print_json, CommandContext};
use crate::Result;

/// List players without a team
pub fn handle_free_agents(ctx: &CommandContext, as_json: bool) -> Result<()> {
    let players = ctx.db.list_free_agents()?;
    if as_json {
        return print_json(&players);
    }

    if players.is_empty() {
        println!("No free agents.");
        return Ok(());
    }
    for p in &players {
        match &p.minecraft_username {
            Some(mc) => println!("{} ({})  [{}]", p.display_name, p.player_id, mc),
            None => println!("{} ({})", p.display_name, p.player_id),
        }
    }
    Ok(())
}
