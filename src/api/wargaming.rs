//! World of Tanks EU API, used to resolve the player and the tank once at startup.

use std::collections::HashMap;

use reqwest::Url;
use serde::de::DeserializeOwned;

use crate::api::client::Client;
use crate::api::{Error, Result};
use crate::prelude::*;

pub use self::models::*;

pub mod models;

#[derive(Clone)]
pub struct WargamingApi {
    application_id: Arc<String>,
    base_url: Url,
    client: Client,
}

impl WargamingApi {
    pub const BASE_URL: &'static str = "https://api.worldoftanks.eu/wot/";

    pub fn new(application_id: &str, timeout: StdDuration) -> Result<Self> {
        Self::with_base_url(application_id, Self::BASE_URL, timeout)
    }

    pub fn with_base_url(application_id: &str, base_url: &str, timeout: StdDuration) -> Result<Self> {
        let base_url = Url::parse(base_url).map_err(|error| Error::Upstream(error.to_string()))?;
        Ok(Self {
            application_id: Arc::new(application_id.to_string()),
            base_url,
            client: Client::new(timeout)?,
        })
    }

    /// See: <https://developers.wargaming.net/reference/all/wot/account/list/>.
    #[instrument(skip_all, fields(query = query))]
    pub async fn search_accounts(&self, query: &str) -> Result<Vec<FoundAccount>> {
        self.call("account/list/", &[("search", query)]).await
    }

    /// See <https://developers.wargaming.net/reference/all/wot/encyclopedia/vehicles/>.
    #[instrument(skip_all)]
    pub async fn get_tankopedia(&self) -> Result<Tankopedia> {
        self.call("encyclopedia/vehicles/", &[("fields", "short_name,tank_id")])
            .await
    }

    /// Resolves the player's nickname to the account ID of the first search result.
    pub async fn resolve_player_id(&self, name: &str) -> Result<AccountId> {
        let accounts = self.search_accounts(name).await?;
        first_account_id(name, accounts)
    }

    /// Resolves the tank short name by scanning the entire tankopedia.
    pub async fn resolve_tank_id(&self, short_name: &str) -> Result<TankId> {
        let tankopedia = self.get_tankopedia().await?;
        find_tank_id(&tankopedia, short_name)
    }

    async fn call<T: DeserializeOwned>(&self, path: &str, params: &[(&str, &str)]) -> Result<T> {
        let mut url = self
            .base_url
            .join(path)
            .map_err(|error| Error::Upstream(error.to_string()))?;
        url.query_pairs_mut()
            .append_pair("application_id", &self.application_id)
            .extend_pairs(params);
        self.client.get::<ApiResponse<T>>(&url).await?.into()
    }
}

pub fn first_account_id(name: &str, accounts: Vec<FoundAccount>) -> Result<AccountId> {
    accounts
        .into_iter()
        .next()
        .map(|account| account.id)
        .ok_or_else(|| Error::NotFound(format!("player `{}`", name)))
}

/// Finds the vehicle with the exact short name.
/// The tankopedia is a hash map, so the lowest tank ID wins to stay deterministic.
pub fn find_tank_id(tankopedia: &HashMap<String, Vehicle>, short_name: &str) -> Result<TankId> {
    tankopedia
        .values()
        .filter(|vehicle| vehicle.short_name == short_name)
        .map(|vehicle| vehicle.tank_id)
        .min()
        .ok_or_else(|| Error::NotFound(format!("tank `{}`", short_name)))
}
