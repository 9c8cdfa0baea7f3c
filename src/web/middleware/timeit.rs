use poem::{Endpoint, Middleware, Request, Response, Result};

use crate::prelude::*;

/// Pages wait for the upstreams, so anything above this is worth a warning.
const SLOW_THRESHOLD: StdDuration = StdDuration::from_secs(3);

pub struct TimeItMiddleware;

impl<E: Endpoint<Output = Response>> Middleware<E> for TimeItMiddleware {
    type Output = TimeItMiddlewareImpl<E>;

    fn transform(&self, ep: E) -> Self::Output {
        TimeItMiddlewareImpl { ep }
    }
}

pub struct TimeItMiddlewareImpl<E> {
    ep: E,
}

#[poem::async_trait]
impl<E: Endpoint<Output = Response>> Endpoint for TimeItMiddlewareImpl<E> {
    type Output = Response;

    async fn call(&self, request: Request) -> Result<Self::Output> {
        let method = request.method().clone();
        let path = request.uri().path().to_string();
        let start_instant = Instant::now();
        let response = self.ep.call(request).await?;
        let elapsed = start_instant.elapsed();
        let status = response.status();
        if elapsed >= SLOW_THRESHOLD {
            warn!(?method, %path, ?status, ?elapsed, "slow request");
        } else {
            info!(?method, %path, ?status, ?elapsed);
        }
        Ok(response)
    }
}
