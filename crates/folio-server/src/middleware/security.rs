//! Response security headers.
//!
//! Reader pages pull images from the content API host (which differs per
//! environment) and embed YouTube players, so the policy opens exactly those
//! two sources and nothing else.

use axum::http::HeaderValue;
use axum::http::header::HeaderName;
use tower_http::set_header::SetResponseHeaderLayer;

type HeaderLayer = SetResponseHeaderLayer<HeaderValue>;

/// Content-Security-Policy header value.
const CSP: &str = "default-src 'self'; \
                   script-src 'self'; \
                   style-src 'self' 'unsafe-inline'; \
                   img-src 'self' data: http: https:; \
                   frame-src https://www.youtube.com https://www.youtube-nocookie.com; \
                   connect-src 'self'; \
                   frame-ancestors 'none'";

/// Headers set on every response, in the order they are layered.
const HEADERS: [(&str, &str); 3] = [
    ("content-security-policy", CSP),
    ("x-content-type-options", "nosniff"),
    ("x-frame-options", "DENY"),
];

fn overriding(name: &'static str, value: &'static str) -> HeaderLayer {
    SetResponseHeaderLayer::overriding(
        HeaderName::from_static(name),
        HeaderValue::from_static(value),
    )
}

/// One layer per entry of the security header table.
pub(crate) fn layers() -> [HeaderLayer; 3] {
    HEADERS.map(|(name, value)| overriding(name, value))
}
