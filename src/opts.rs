//! CLI options.

use clap::Parser;

use crate::api::tomato::DEFAULT_BUILD_ID;
use crate::prelude::*;

pub mod parsers;

#[derive(Parser)]
#[command(version, about, propagate_version = true)]
pub struct Opts {
    /// Sentry DSN
    #[arg(short, long, env = "SENTRY_DSN")]
    pub sentry_dsn: Option<String>,

    /// Performance monitoring sample rate for Sentry
    #[arg(long, default_value = "0", env = "SENTRY_TRACES_SAMPLE_RATE")]
    pub traces_sample_rate: f32,

    #[command(subcommand)]
    pub subcommand: Subcommand,
}

#[derive(clap::Subcommand)]
pub enum Subcommand {
    Web(WebOpts),
    Check(CheckOpts),
}

/// Runs the web application
#[derive(clap::Args)]
pub struct WebOpts {
    #[command(flatten)]
    pub api: ApiOpts,

    #[command(flatten)]
    pub target: TargetOpts,

    /// Web application bind host
    #[arg(long, default_value = "::", env = "MOE_DASHBOARD_HOST")]
    pub host: String,

    /// Web application bind port
    #[arg(short, long, default_value = "8080", env = "MOE_DASHBOARD_PORT")]
    pub port: u16,

    /// Number of recent battles to show
    #[arg(long, default_value = "10", value_parser = parsers::non_zero_u32)]
    pub page_size: u32,
}

/// Resolves the player and the tank, and prints their latest stats
#[derive(clap::Args)]
pub struct CheckOpts {
    #[command(flatten)]
    pub api: ApiOpts,

    #[command(flatten)]
    pub target: TargetOpts,
}

#[derive(clap::Args)]
pub struct ApiOpts {
    /// Wargaming.net API application ID
    #[arg(short, long, env = "APP_ID")]
    pub application_id: String,

    /// tomato.gg Next.js build ID, see `api::tomato::DEFAULT_BUILD_ID` on how to update it
    #[arg(long, default_value = DEFAULT_BUILD_ID, env = "TOMATO_BUILD_ID")]
    pub tomato_build_id: String,

    /// Timeout for every outbound API request
    #[arg(long, default_value = "5s", value_parser = humantime::parse_duration)]
    pub request_timeout: StdDuration,
}

/// The single player and tank the dashboard is built for.
#[derive(clap::Args)]
pub struct TargetOpts {
    /// Player nickname
    #[arg(long, default_value = "Stesio10", env = "MOE_DASHBOARD_PLAYER")]
    pub player_name: String,

    /// Tank short name as listed in the tankopedia
    #[arg(long, default_value = "EBR 105", env = "MOE_DASHBOARD_TANK")]
    pub tank_name: String,
}
