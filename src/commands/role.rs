//! Discord role grants through the sync proxy.

use super::common::CommandContext;
use crate::{cli::types::RoleAction, Result};

pub async fn handle_role(
    ctx: &CommandContext,
    action: RoleAction,
    user: String,
    role: String,
) -> Result<()> {
    let outcome = ctx.api.sync_role(action, &user, &role).await?;
    if outcome.success {
        println!("✓ {} role {} for {}: {}", action, role, user, outcome.message);
    } else {
        println!("⚠ Could not {} role {} for {}: {}", action, role, user, outcome.message);
    }
    Ok(())
}
