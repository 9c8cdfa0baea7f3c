use std::borrow::Cow;

use sentry::integrations::tracing::EventFilter;
use sentry::{ClientInitGuard, ClientOptions};
use tracing::{Level, Metadata, Subscriber};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

use crate::prelude::*;

/// Initialises Sentry and the console log, the returned guard must be held until exit.
pub fn init(sentry_dsn: Option<String>, traces_sample_rate: f32) -> Result<ClientInitGuard> {
    let guard = sentry::init((
        sentry_dsn,
        ClientOptions {
            release: Some(Cow::Borrowed(env!("CARGO_PKG_VERSION"))),
            traces_sample_rate,
            ..Default::default()
        },
    ));
    tracing_subscriber::Registry::default()
        .with(sentry_layer()?)
        .with(console_layer()?)
        .try_init()
        .context("failed to initialise the tracing subscriber")?;
    Ok(guard)
}

/// Warnings and errors become Sentry events, the rest of the crate's records are breadcrumbs.
fn sentry_layer<S>() -> Result<impl Layer<S>>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    let filter = filter_from_env("MOE_DASHBOARD_SENTRY_LOG", "moe_dashboard=debug")?;
    Ok(sentry::integrations::tracing::layer()
        .event_filter(event_filter)
        .with_filter(filter))
}

fn console_layer<S>() -> Result<impl Layer<S>>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    let filter = filter_from_env("MOE_DASHBOARD_LOG", "moe_dashboard=info,poem=info")?;
    Ok(tracing_subscriber::fmt::layer()
        .without_time()
        .with_filter(filter))
}

fn event_filter(metadata: &Metadata) -> EventFilter {
    if *metadata.level() <= Level::WARN {
        EventFilter::Event
    } else {
        EventFilter::Breadcrumb
    }
}

fn filter_from_env(variable: &str, default: &str) -> Result<EnvFilter> {
    match EnvFilter::try_from_env(variable) {
        Ok(filter) => Ok(filter),
        Err(_) => EnvFilter::try_new(default).with_context(|| format!("invalid filter `{}`", default)),
    }
}
