#![warn(clippy::all)]

use clap::Parser;

use crate::api::tomato::TomatoApi;
use crate::api::wargaming::WargamingApi;
use crate::models::Identities;
use crate::opts::{ApiOpts, CheckOpts, Opts, Subcommand, TargetOpts, WebOpts};
use crate::prelude::*;
use crate::web::partials::{format_marks, MoeDiff};

mod api;
mod models;
mod opts;
mod prelude;
mod serde;
mod tracing;
mod web;

#[tokio::main]
async fn main() -> Result {
    let opts = Opts::parse();
    let _sentry_guard = crate::tracing::init(opts.sentry_dsn, opts.traces_sample_rate)?;
    info!(version = env!("CARGO_PKG_VERSION"), "starting…");

    let result = match opts.subcommand {
        Subcommand::Web(opts) => run_web(opts).await,
        Subcommand::Check(opts) => run_check(opts).await,
    };
    if let Err(error) = &result {
        error!("fatal error: {:#}", error);
    }
    result
}

async fn run_web(opts: WebOpts) -> Result {
    let identities = resolve_identities(&opts.api, &opts.target).await?;
    let tomato = TomatoApi::new(opts.api.request_timeout, opts.api.tomato_build_id)?;
    let state = web::State::new(tomato, identities, opts.page_size);
    web::run(&opts.host, opts.port, state).await
}

async fn run_check(opts: CheckOpts) -> Result {
    let identities = resolve_identities(&opts.api, &opts.target).await?;
    let player = &identities.player;
    let tank = &identities.tank;
    println!("player: {} #{}", player.name, player.id);
    println!("tank: {} #{}", tank.short_name, tank.id);

    let tomato = TomatoApi::new(opts.api.request_timeout, opts.api.tomato_build_id)?;
    match tomato.fetch_most_recent_battle(player.id, tank.id).await? {
        Some(battle) => println!(
            "latest battle: {} at {}, MOE {:.2}% ({})",
            battle.map_name,
            battle.battle_time,
            battle.moe_percent.unwrap_or_default(),
            MoeDiff::from(battle.moe_diff),
        ),
        None => println!("latest battle: none"),
    }
    let mastery = tomato.get_tank_moe(&player.name, player.id, tank.id).await;
    println!("marks: {}", format_marks(mastery.moe_marks));
    println!("mastery: {}", mastery.mastery_level);
    Ok(())
}

/// Resolves the served player and tank once, before anything else runs.
async fn resolve_identities(api_opts: &ApiOpts, target: &TargetOpts) -> Result<Identities> {
    let api = WargamingApi::new(&api_opts.application_id, api_opts.request_timeout)?;
    Identities::resolve(&api, &target.player_name, &target.tank_name)
        .await
        .context("failed to resolve the player and tank identifiers")
}
