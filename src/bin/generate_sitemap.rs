//! Sitemap binary - prints sitemap.xml for the current environment to stdout
//!
//! Usage:
//!   cargo run --bin sitemap > out/sitemap.xml
//!
//! Optional environment variables:
//! - SITE_URL (defaults to http://localhost:3000)
//! - SUPABASE_URL and SUPABASE_ANON_KEY (villa pages are listed only when both are set)

use anyhow::Result;
use chrono::Utc;
use tracing::info;
use villa_site::config::non_empty_var;
use villa_site::i18n::LocaleRegistry;
use villa_site::sitemap;
use villa_site::villas::{load_villas, VillaSource};

/// Minimal config for sitemap output (no email provider required)
struct SitemapConfig {
    site_url: String,
    supabase_url: Option<String>,
    supabase_anon_key: Option<String>,
}

impl SitemapConfig {
    fn from_env() -> Self {
        Self {
            site_url: non_empty_var("SITE_URL")
                .unwrap_or_else(|| "http://localhost:3000".to_string())
                .trim_end_matches('/')
                .to_string(),
            supabase_url: non_empty_var("SUPABASE_URL"),
            supabase_anon_key: non_empty_var("SUPABASE_ANON_KEY"),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();

    // Logs go to stderr so stdout stays a clean XML document
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("villa_site=info".parse()?)
                .add_directive("sitemap=info".parse()?),
        )
        .init();

    let config = SitemapConfig::from_env();

    let source = match (&config.supabase_url, &config.supabase_anon_key) {
        (Some(url), Some(key)) => Some(VillaSource::new(reqwest::Client::new(), url, key)),
        _ => None,
    };
    let villas = load_villas(source.as_ref()).await;

    let xml = sitemap::generate(
        LocaleRegistry::get(),
        &config.site_url,
        &sitemap::static_pages(),
        &villas,
        Utc::now(),
    );

    info!("Generated sitemap for {} ({} villas)", config.site_url, villas.len());
    print!("{}", xml);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_blank_supabase_vars_disable_villa_source() {
        std::env::set_var("SUPABASE_URL", "https://project.supabase.co");
        std::env::set_var("SUPABASE_ANON_KEY", "   ");
        std::env::set_var("SITE_URL", "https://villas.example/");

        let config = SitemapConfig::from_env();
        assert_eq!(config.site_url, "https://villas.example");
        assert_eq!(config.supabase_url.as_deref(), Some("https://project.supabase.co"));
        assert!(config.supabase_anon_key.is_none());

        std::env::remove_var("SUPABASE_URL");
        std::env::remove_var("SUPABASE_ANON_KEY");
        std::env::remove_var("SITE_URL");
    }
}
