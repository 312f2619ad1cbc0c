//! Locale routing policy and the middleware that applies it.
//!
//! Canonical URLs for the default locale carry no prefix, every other locale
//! keeps its `/{tag}` prefix. Internally every page lives under a prefix, so
//! prefix-less requests are rewritten (the browser URL stays put) and
//! default-prefixed requests from humans are redirected to the prefix-less
//! form. Crawlers are never redirected: they only ever get pass-through or
//! rewrite.

use axum::extract::{Request, State};
use axum::http::{header, StatusCode, Uri};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use tracing::{debug, warn};

use crate::crawler::is_crawler;
use crate::i18n::{has_locale_prefix, strip_locale_prefix, with_locale_prefix, LocaleRegistry};
use crate::server::AppState;

/// Path namespaces that bypass locale routing (segment match).
pub const EXCLUDED_PREFIXES: &[&str] = &["/api", "/_next", "/images", "/fonts", "/static"];

/// Exact paths that bypass locale routing.
pub const EXCLUDED_PATHS: &[&str] = &[
    "/robots.txt",
    "/sitemap.xml",
    "/sitemap.xsl",
    "/favicon.ico",
    "/manifest.webmanifest",
    "/healthz",
];

/// File extensions (lowercase) of assets that bypass locale routing.
pub const EXCLUDED_EXTENSIONS: &[&str] = &[
    "svg", "png", "jpg", "jpeg", "gif", "webp", "ico", "css", "js", "woff", "woff2",
];

/// Outcome of the routing policy for one request path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteDecision {
    /// Serve the path as requested.
    PassThrough,
    /// Serve this path instead, without telling the client.
    Rewrite(String),
    /// Answer with `301 Moved Permanently` to this path.
    Redirect(String),
}

/// Whether a path skips locale routing entirely.
pub fn is_excluded(path: &str) -> bool {
    if EXCLUDED_PATHS.contains(&path) {
        return true;
    }

    if EXCLUDED_PREFIXES.iter().any(|prefix| {
        path.strip_prefix(prefix)
            .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
    }) {
        return true;
    }

    let last_segment = path.rsplit('/').next().unwrap_or_default();
    match last_segment.rsplit_once('.') {
        Some((_, extension)) => {
            let extension = extension.to_ascii_lowercase();
            EXCLUDED_EXTENSIONS.contains(&extension.as_str())
        }
        None => false,
    }
}

/// Decide how to route a non-excluded path.
///
/// Rules, first match wins:
/// 1. crawler: prefixed paths pass through, others are rewritten under the default locale
/// 2. human, non-default prefix: pass through
/// 3. human, default prefix: redirect to the prefix-less path
/// 4. human, no prefix: rewrite under the default locale
pub fn decide(registry: &LocaleRegistry, path: &str, crawler: bool) -> RouteDecision {
    let default_tag = registry.default_locale().tag;
    let path_locale = registry.locale_from_path(path);

    if crawler {
        return match path_locale {
            Some(_) => RouteDecision::PassThrough,
            None => RouteDecision::Rewrite(with_locale_prefix(path, default_tag)),
        };
    }

    match path_locale {
        Some(locale) if !locale.is_default => RouteDecision::PassThrough,
        Some(_) if has_locale_prefix(path, default_tag) => {
            RouteDecision::Redirect(strip_locale_prefix(path, default_tag))
        }
        _ => RouteDecision::Rewrite(with_locale_prefix(path, default_tag)),
    }
}

/// Full policy for a request: exclusions first, then [`decide`].
pub fn resolve(registry: &LocaleRegistry, path: &str, user_agent: &str) -> RouteDecision {
    if is_excluded(path) {
        return RouteDecision::PassThrough;
    }
    decide(registry, path, is_crawler(user_agent))
}

/// Axum middleware applying [`resolve`] to every request.
///
/// Must wrap the router from the outside so that rewrites happen before
/// route matching.
pub async fn locale_routing(State(state): State<AppState>, mut req: Request, next: Next) -> Response {
    let path = req.uri().path().to_string();
    let user_agent = req
        .headers()
        .get(header::USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();

    let decision = resolve(state.locales, &path, user_agent);
    let query = req.uri().query().map(|q| format!("?{}", q)).unwrap_or_default();

    match decision {
        RouteDecision::PassThrough => next.run(req).await,
        RouteDecision::Rewrite(target) => {
            debug!("Rewriting {} -> {}", path, target);
            match format!("{}{}", target, query).parse::<Uri>() {
                Ok(uri) => *req.uri_mut() = uri,
                Err(e) => warn!("Could not rewrite {} to {}: {}", path, target, e),
            }
            next.run(req).await
        }
        RouteDecision::Redirect(location) => {
            debug!("Redirecting {} -> {}", path, location);
            (
                StatusCode::MOVED_PERMANENTLY,
                [(header::LOCATION, format!("{}{}", location, query))],
            )
                .into_response()
        }
    }
}
