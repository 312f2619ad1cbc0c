//! Prerendered pages and static assets.
//!
//! Requests reach this handler after locale routing, so page paths always
//! carry a locale prefix (`/en/about`, `/es-ES/`). A page at `/{tag}{path}`
//! is read from `{pages_dir}/{tag}{path}.html` or
//! `{pages_dir}/{tag}{path}/index.html`. Asset paths go to `ServeDir`.

use axum::extract::{Request, State};
use axum::http::{header, HeaderValue, Method, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use maud::{html, Markup, DOCTYPE};
use std::path::{Path, PathBuf};
use tower::ServiceExt;
use tower_http::services::ServeDir;
use tracing::{debug, error};

use crate::i18n::{strip_locale_prefix, Locale, LocaleRegistry, LocaleStrings};
use crate::routing::is_excluded;
use crate::server::AppState;

/// Fallback handler: assets, then pages, then the localized 404.
pub async fn serve(State(state): State<AppState>, req: Request) -> Response {
    if req.method() != Method::GET && req.method() != Method::HEAD {
        return StatusCode::METHOD_NOT_ALLOWED.into_response();
    }

    let path = req.uri().path().to_string();
    let pages_dir = Path::new(&state.config.pages_dir);

    if is_excluded(&path) {
        let assets = ServeDir::new(pages_dir).append_index_html_on_directories(false);
        return match assets.oneshot(req).await {
            Ok(response) => response.into_response(),
            Err(never) => match never {},
        };
    }

    let locale = state
        .locales
        .locale_from_path(&path)
        .unwrap_or_else(|| state.locales.default_locale());
    let page_path = page_path(&path, locale);

    let Some(candidates) = candidate_files(pages_dir, locale, &page_path) else {
        debug!("Rejected page path {}", path);
        return error_page(state.locales, locale, StatusCode::NOT_FOUND);
    };

    for candidate in &candidates {
        match tokio::fs::read_to_string(candidate).await {
            Ok(body) => {
                let mut response = Html(body).into_response();
                let link = link_header(state.locales, &state.config.site_url, &page_path);
                if let Ok(value) = HeaderValue::from_str(&link) {
                    response.headers_mut().insert(header::LINK, value);
                }
                return response;
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => continue,
            Err(e) => {
                error!("Failed to read {}: {}", candidate.display(), e);
                return error_page(state.locales, locale, StatusCode::INTERNAL_SERVER_ERROR);
            }
        }
    }

    debug!("No page for {}", path);
    error_page(state.locales, locale, StatusCode::NOT_FOUND)
}

/// Page path without locale prefix or trailing slash; `""` for home.
fn page_path(path: &str, locale: &Locale) -> String {
    let stripped = strip_locale_prefix(path, locale.tag);
    stripped.trim_end_matches('/').to_string()
}

/// Files that may hold a page, or `None` when the path tries to leave the pages directory.
fn candidate_files(pages_dir: &Path, locale: &Locale, page_path: &str) -> Option<Vec<PathBuf>> {
    let segments: Vec<&str> = page_path.split('/').filter(|s| !s.is_empty()).collect();
    if segments
        .iter()
        .any(|s| *s == "." || *s == ".." || s.contains('\\') || s.contains('\0'))
    {
        return None;
    }

    let mut base = pages_dir.join(locale.tag);
    for segment in &segments {
        base.push(segment);
    }

    let html_file = match segments.last() {
        Some(last) => base.with_file_name(format!("{}.html", last)),
        None => pages_dir.join(format!("{}.html", locale.tag)),
    };

    Some(vec![html_file, base.join("index.html")])
}

/// `Link` header listing every language version of a page.
pub fn link_header(registry: &LocaleRegistry, site_url: &str, page_path: &str) -> String {
    registry
        .hreflang_alternates(site_url, page_path)
        .iter()
        .map(|alternate| {
            format!(
                "<{}>; rel=\"alternate\"; hreflang=\"{}\"",
                alternate.href, alternate.hreflang
            )
        })
        .collect::<Vec<_>>()
        .join(", ")
}

fn error_page(registry: &LocaleRegistry, locale: &Locale, status: StatusCode) -> Response {
    let strings = LocaleStrings::for_tag(locale.tag);
    let (title, message) = if status == StatusCode::NOT_FOUND {
        (strings.not_found_title, strings.not_found_message)
    } else {
        (strings.error_title, strings.error_message)
    };
    let home = registry.localized_path("", locale);

    (status, Html(render_error_page(locale.tag, title, message, strings, &home).into_string())).into_response()
}

fn render_error_page(lang: &str, title: &str, message: &str, strings: &LocaleStrings, home: &str) -> Markup {
    html! {
        (DOCTYPE)
        html lang=(lang) {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                meta name="robots" content="noindex";
                title { (title) }
            }
            body style="font-family: system-ui, sans-serif; text-align: center; padding: 4rem 1rem;" {
                h1 { (title) }
                p { (message) }
                p {
                    button type="button" onclick="window.location.reload()" { (strings.retry_label) }
                    " "
                    a href=(home) { (strings.home_label) }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn en() -> &'static Locale {
        LocaleRegistry::get().default_locale()
    }

    fn es() -> &'static Locale {
        LocaleRegistry::get().get_by_tag("es-ES").unwrap()
    }

    #[test]
    fn test_page_path() {
        assert_eq!(page_path("/en/", en()), "");
        assert_eq!(page_path("/en", en()), "");
        assert_eq!(page_path("/en/about", en()), "/about");
        assert_eq!(page_path("/es-ES/villas/suyai-villa/", es()), "/villas/suyai-villa");
    }

    #[test]
    fn test_candidate_files_home() {
        let files = candidate_files(Path::new("out"), en(), "").unwrap();
        assert_eq!(files, vec![PathBuf::from("out/en.html"), PathBuf::from("out/en/index.html")]);
    }

    #[test]
    fn test_candidate_files_nested() {
        let files = candidate_files(Path::new("out"), es(), "/villas/suyai-villa").unwrap();
        assert_eq!(
            files,
            vec![
                PathBuf::from("out/es-ES/villas/suyai-villa.html"),
                PathBuf::from("out/es-ES/villas/suyai-villa/index.html"),
            ]
        );
    }

    #[test]
    fn test_candidate_files_rejects_traversal() {
        assert!(candidate_files(Path::new("out"), en(), "/../secrets").is_none());
        assert!(candidate_files(Path::new("out"), en(), "/villas/./x").is_none());
        assert!(candidate_files(Path::new("out"), en(), "/a\\b").is_none());
    }

    #[test]
    fn test_link_header() {
        let link = link_header(LocaleRegistry::get(), "https://villas.example", "/about");
        assert_eq!(
            link,
            "<https://villas.example/about>; rel=\"alternate\"; hreflang=\"en\", \
             <https://villas.example/es-ES/about>; rel=\"alternate\"; hreflang=\"es-ES\", \
             <https://villas.example/about>; rel=\"alternate\"; hreflang=\"x-default\""
        );
    }

    #[test]
    fn test_render_error_page_spanish() {
        let strings = LocaleStrings::for_tag("es-ES");
        let page = render_error_page("es-ES", strings.not_found_title, strings.not_found_message, strings, "/es-ES")
            .into_string();

        assert!(page.contains("lang=\"es-ES\""));
        assert!(page.contains("Página no encontrada"));
        assert!(page.contains("Reintentar"));
        assert!(page.contains("href=\"/es-ES\""));
    }

    #[test]
    fn test_error_page_status() {
        let response = error_page(LocaleRegistry::get(), en(), StatusCode::NOT_FOUND);
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = error_page(LocaleRegistry::get(), en(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
