//! tomato.gg statistics: recent battles and the overall per-tank stats.

use reqwest::Url;

use crate::api::client::Client;
use crate::api::wargaming::{AccountId, TankId};
use crate::api::{Error, Result};
use crate::prelude::*;

pub use self::models::*;

pub mod models;

/// Next.js build ID of the tomato.gg site, it is part of the player stats data URL.
///
/// The site changes it on every deployment, and the old one starts to 404.
/// To update: open any player page on tomato.gg, find the request to
/// `/_next/data/<build ID>/en/stats/…` in the browser network tab
/// (or `buildId` in the page's `__NEXT_DATA__` script), and either change this constant
/// or pass the new value via `--tomato-build-id` / `TOMATO_BUILD_ID`.
pub const DEFAULT_BUILD_ID: &str = "ChBl5gn1Emb2oRQwzfDlf";

const SERVER: &str = "EU";

#[derive(Clone)]
pub struct TomatoApi {
    api_url: Url,
    site_url: Url,
    build_id: Arc<String>,
    client: Client,
}

impl TomatoApi {
    pub const API_URL: &'static str = "https://api.tomato.gg/api/";
    pub const SITE_URL: &'static str = "https://tomato.gg/";

    pub fn new(timeout: StdDuration, build_id: impl Into<String>) -> Result<Self> {
        Self::with_urls(Self::API_URL, Self::SITE_URL, timeout, build_id)
    }

    pub fn with_urls(
        api_url: &str,
        site_url: &str,
        timeout: StdDuration,
        build_id: impl Into<String>,
    ) -> Result<Self> {
        Ok(Self {
            api_url: parse_url(api_url)?,
            site_url: parse_url(site_url)?,
            build_id: Arc::new(build_id.into()),
            client: Client::new(timeout)?,
        })
    }

    /// Retrieves the latest battles in the tank, newest first.
    #[instrument(skip_all, fields(player_id = player_id, tank_id = tank_id))]
    pub async fn fetch_recent_battles(
        &self,
        player_id: AccountId,
        tank_id: TankId,
        page_size: u32,
    ) -> Result<Vec<BattleRecord>> {
        let mut url = join_url(&self.api_url, &format!("player/combined-battles/{}", player_id))?;
        url.query_pairs_mut()
            .append_pair("pageSize", &page_size.to_string())
            .append_pair("sortBy", "battle_time")
            .append_pair("sortDirection", "desc")
            .append_pair("tankId", &tank_id.to_string());
        let battles = self
            .client
            .get::<CombinedBattles>(&url)
            .await?
            .data
            .ok_or_else(|| Error::Upstream("combined battles have no `data`".to_string()))?;
        debug!(n_battles = battles.len());
        Ok(battles)
    }

    pub async fn fetch_most_recent_battle(
        &self,
        player_id: AccountId,
        tank_id: TankId,
    ) -> Result<Option<BattleRecord>> {
        Ok(most_recent(self.fetch_recent_battles(player_id, tank_id, 1).await?))
    }

    /// Retrieves the player's stats page data.
    #[instrument(skip_all, fields(player_name = player_name, player_id = player_id))]
    pub async fn fetch_player_stats(
        &self,
        player_name: &str,
        player_id: AccountId,
    ) -> Result<PlayerStats> {
        let slug = format!("{}-{}", player_name, player_id);
        let mut url = join_url(
            &self.site_url,
            &format!("_next/data/{}/en/stats/{}/{}.json", self.build_id, slug, SERVER),
        )?;
        url.query_pairs_mut()
            .append_pair("id", &slug)
            .append_pair("server", SERVER);
        self.client.get_optional(&url).await?.ok_or_else(|| {
            Error::Upstream(format!(
                "player stats are not found, the build ID `{}` is probably stale",
                self.build_id,
            ))
        })
    }

    /// Retrieves the overall marks and mastery in the tank.
    ///
    /// Never fails: any upstream problem results in [`TankMasteryStats::default`].
    pub async fn get_tank_moe(
        &self,
        player_name: &str,
        player_id: AccountId,
        tank_id: TankId,
    ) -> TankMasteryStats {
        match self.fetch_player_stats(player_name, player_id).await {
            Ok(stats) => stats.tank_mastery(tank_id).unwrap_or_else(|| {
                warn!(tank_id, "the tank is missing in the player stats");
                TankMasteryStats::default()
            }),
            Err(error) => {
                warn!("failed to fetch the player stats: {:#}", anyhow::Error::new(error));
                TankMasteryStats::default()
            }
        }
    }
}

pub fn most_recent(battles: Vec<BattleRecord>) -> Option<BattleRecord> {
    battles.into_iter().next()
}

fn parse_url(url: &str) -> Result<Url> {
    Url::parse(url).map_err(|error| Error::Upstream(format!("invalid URL `{}`: {}", url, error)))
}

fn join_url(base: &Url, path: &str) -> Result<Url> {
    base.join(path)
        .map_err(|error| Error::Upstream(format!("invalid path `{}`: {}", path, error)))
}
