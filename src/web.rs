use std::net::IpAddr;
use std::str::FromStr;

use poem::listener::TcpListener;
use poem::middleware::{CatchPanic, Tracing};
use poem::{get, Endpoint, EndpointExt, Route, Server};

pub use self::state::State;
use self::middleware::{
    ErrorMiddleware, SecurityHeadersMiddleware, SentryMiddleware, TimeItMiddleware,
};
use crate::prelude::*;

mod middleware;
pub mod partials;
mod state;
mod views;

/// Time for the in-flight requests to complete after Ctrl+C.
const SHUTDOWN_TIMEOUT: StdDuration = StdDuration::from_secs(10);

#[instrument(skip_all, fields(host = host, port = port))]
pub async fn run(host: &str, port: u16, state: State) -> Result {
    let listener = TcpListener::bind((IpAddr::from_str(host)?, port));
    info!("listening…");
    Server::new(listener)
        .run_with_graceful_shutdown(
            create_app(state),
            async {
                if let Err(error) = tokio::signal::ctrl_c().await {
                    error!("failed to listen for Ctrl+C: {:#}", error);
                }
                info!("shutting down…");
            },
            Some(SHUTDOWN_TIMEOUT),
        )
        .await
        .context("the web server has failed")
}

pub fn create_app(state: State) -> impl Endpoint {
    Route::new()
        .at("/", get(views::index::get))
        .at("/moe", get(views::moe::get))
        .at("/health", get(views::api::get_health))
        .data(state)
        .with(Tracing)
        .with(CatchPanic::new())
        .with(ErrorMiddleware)
        .with(TimeItMiddleware)
        .with(SecurityHeadersMiddleware)
        .with(SentryMiddleware)
}

#[cfg(test)]
mod tests {
    use poem::http::StatusCode;

    use super::test::create_unreachable_test_client;
    use crate::prelude::*;

    #[tokio::test]
    async fn index_ok() -> Result {
        let client = create_unreachable_test_client()?;
        let response = client.get("/").send().await;
        response.assert_status_is_ok();
        response.assert_header("X-Content-Type-Options", "nosniff");
        let body = response.0.into_body().into_string().await?;
        assert!(body.contains(r#"href="/moe""#), "{}", body);
        assert!(body.contains("Stesio10 EBR 105 Tracker"), "{}", body);
        Ok(())
    }

    #[tokio::test]
    async fn health_ok() -> Result {
        let client = create_unreachable_test_client()?;
        let response = client.get("/health").send().await;
        response.assert_status(StatusCode::NO_CONTENT);
        response.assert_header("Cache-Control", "no-cache");
        Ok(())
    }

    #[tokio::test]
    async fn moe_unavailable_upstream_ok() -> Result {
        let client = create_unreachable_test_client()?;
        let response = client.get("/moe").send().await;
        response.assert_status_is_ok();
        let body = response.0.into_body().into_string().await?;
        assert!(body.contains("Battle data is currently unavailable"), "{}", body);
        assert!(body.contains("0.00% (Δ 0.00%)"), "{}", body);
        assert!(body.contains("No Marks"), "{}", body);
        assert!(body.contains("3 marks? No"), "{}", body);
        Ok(())
    }

    #[tokio::test]
    async fn not_found_ok() -> Result {
        let client = create_unreachable_test_client()?;
        let response = client.get("/nothing").send().await;
        response.assert_status(StatusCode::NOT_FOUND);
        Ok(())
    }
}
