use anyhow::{Context, Result};
use axum::body::Bytes;
use axum::extract::State;
use axum::http::header;
use axum::middleware;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::Utc;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::Config;
use crate::email::Mailer;
use crate::error::ApiError;
use crate::i18n::LocaleRegistry;
use crate::notifications::Notification;
use crate::villas::{load_villas, VillaSource};
use crate::{pages, robots, routing, sitemap};

const CACHE_ONE_HOUR: &str = "public, max-age=3600";

/// Read-only state shared by all handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub locales: &'static LocaleRegistry,
    pub mailer: Mailer,
    pub villas: Option<VillaSource>,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            mailer: Mailer::from_config(&config, client.clone()),
            villas: VillaSource::from_config(&config, client),
            locales: LocaleRegistry::get(),
            config: Arc::new(config),
        })
    }
}

/// Full application: locale routing wrapped around every route.
pub fn build_router(state: AppState) -> Router {
    let routes = Router::new()
        .route("/sitemap.xml", get(sitemap_xml))
        .route("/sitemap.xsl", get(sitemap_xsl))
        .route("/robots.txt", get(robots_txt))
        .route("/healthz", get(health))
        .route("/api/contact", post(contact))
        .fallback(pages::serve)
        .with_state(state.clone());

    // Outer router so the middleware sees the request before route matching.
    Router::new()
        .fallback_service(routes)
        .layer(middleware::from_fn_with_state(state, routing::locale_routing))
        .layer(TraceLayer::new_for_http())
}

async fn sitemap_xml(State(state): State<AppState>) -> impl IntoResponse {
    let villas = load_villas(state.villas.as_ref()).await;
    let xml = sitemap::generate(
        state.locales,
        &state.config.site_url,
        &sitemap::static_pages(),
        &villas,
        Utc::now(),
    );

    (
        [
            (header::CONTENT_TYPE, "application/xml"),
            (header::CACHE_CONTROL, CACHE_ONE_HOUR),
        ],
        xml,
    )
}

async fn sitemap_xsl() -> impl IntoResponse {
    (
        [
            (header::CONTENT_TYPE, "application/xslt+xml"),
            (header::CACHE_CONTROL, CACHE_ONE_HOUR),
        ],
        sitemap::SITEMAP_XSL,
    )
}

async fn robots_txt(State(state): State<AppState>) -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        robots::render(&state.config.site_url),
    )
}

async fn health() -> &'static str {
    "ok"
}

#[derive(Debug, Serialize)]
struct ContactResponse {
    success: bool,
    id: String,
}

async fn contact(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<ContactResponse>, ApiError> {
    let notification = Notification::parse(&body)?;
    let whatsapp_url = state.config.whatsapp_url();
    let content = notification.render_email(whatsapp_url.as_deref());

    let id = state
        .mailer
        .send(&content)
        .await
        .map_err(ApiError::EmailProvider)?;

    info!("Forwarded {} submission (email id {})", notification.kind(), id);
    Ok(Json(ContactResponse { success: true, id }))
}
