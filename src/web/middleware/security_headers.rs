use poem::http::HeaderValue;
use poem::{Endpoint, IntoResponse, Middleware, Request, Response, Result};

/// Stylesheets come from the CDNs, tank images from anywhere over HTTPS.
const CONTENT_SECURITY_POLICY: &str = "default-src 'none'; \
    style-src 'self' 'unsafe-inline' https://cdn.jsdelivr.net https://cdnjs.cloudflare.com; \
    font-src https://cdnjs.cloudflare.com; \
    img-src 'self' https: data:; \
    frame-ancestors 'none'";

const HEADERS: &[(&str, &str)] = &[
    ("Content-Security-Policy", CONTENT_SECURITY_POLICY),
    ("Referrer-Policy", "no-referrer"),
    ("X-Content-Type-Options", "nosniff"),
    ("X-Frame-Options", "deny"),
];

pub struct SecurityHeadersMiddleware;

impl<E: Endpoint> Middleware<E> for SecurityHeadersMiddleware {
    type Output = SecurityHeadersImpl<E>;

    fn transform(&self, ep: E) -> Self::Output {
        SecurityHeadersImpl { ep }
    }
}

pub struct SecurityHeadersImpl<E> {
    ep: E,
}

#[poem::async_trait]
impl<E: Endpoint> Endpoint for SecurityHeadersImpl<E> {
    type Output = Response;

    async fn call(&self, request: Request) -> Result<Self::Output> {
        let mut response = self.ep.call(request).await?.into_response();
        let headers = response.headers_mut();
        headers.remove("Server");
        for (name, value) in HEADERS {
            headers.insert(*name, HeaderValue::from_static(*value));
        }
        Ok(response)
    }
}
