use crate::api::wargaming::{AccountId, TankId, WargamingApi};
use crate::prelude::*;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerIdentity {
    pub name: String,
    pub id: AccountId,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TankIdentity {
    pub short_name: String,
    pub id: TankId,
}

/// The player and the tank the dashboard tracks.
///
/// Resolved once at startup and never re-derived afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identities {
    pub player: PlayerIdentity,
    pub tank: TankIdentity,
}

impl Identities {
    #[instrument(skip_all, fields(player_name = player_name, tank_name = tank_name))]
    pub async fn resolve(api: &WargamingApi, player_name: &str, tank_name: &str) -> Result<Self> {
        let start_instant = Instant::now();
        let player_id = api
            .resolve_player_id(player_name)
            .await
            .with_context(|| format!("failed to resolve the player `{}`", player_name))?;
        let tank_id = api
            .resolve_tank_id(tank_name)
            .await
            .with_context(|| format!("failed to resolve the tank `{}`", tank_name))?;
        info!(player_id, tank_id, elapsed = ?start_instant.elapsed(), "resolved");
        Ok(Self {
            player: PlayerIdentity {
                name: player_name.to_string(),
                id: player_id,
            },
            tank: TankIdentity {
                short_name: tank_name.to_string(),
                id: tank_id,
            },
        })
    }
}
