use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer};
use tracing::{info, warn};

use crate::config::Config;

/// The slice of a villa row the site needs: enough to list its page.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct VillaRecord {
    pub slug: String,
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub updated_at: DateTime<Utc>,
}

/// Accepts RFC 3339 timestamps and bare `YYYY-MM-DD` dates (midnight UTC).
fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_timestamp(&raw).map_err(serde::de::Error::custom)
}

pub fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>> {
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(raw) {
        return Ok(timestamp.with_timezone(&Utc));
    }

    let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .context(format!("Invalid timestamp: '{}'", raw))?;
    Ok(date.and_time(chrono::NaiveTime::MIN).and_utc())
}

/// Read access to the villa table through the Supabase REST API.
#[derive(Debug, Clone)]
pub struct VillaSource {
    client: reqwest::Client,
    base_url: String,
    anon_key: String,
}

impl VillaSource {
    pub fn new(client: reqwest::Client, base_url: &str, anon_key: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            anon_key: anon_key.to_string(),
        }
    }

    /// A source when both `SUPABASE_URL` and `SUPABASE_ANON_KEY` are configured.
    pub fn from_config(config: &Config, client: reqwest::Client) -> Option<Self> {
        match (&config.supabase_url, &config.supabase_anon_key) {
            (Some(url), Some(key)) => Some(Self::new(client, url, key)),
            _ => None,
        }
    }

    /// Fetch active villas ordered by slug.
    pub async fn fetch_active(&self) -> Result<Vec<VillaRecord>> {
        let url = format!("{}/rest/v1/villas", self.base_url);

        let response = self
            .client
            .get(&url)
            .query(&[
                ("select", "slug,updated_at"),
                ("is_active", "eq.true"),
                ("order", "slug.asc"),
            ])
            .header("apikey", &self.anon_key)
            .header("Authorization", format!("Bearer {}", self.anon_key))
            .send()
            .await
            .context("Failed to send request to Supabase")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Supabase API error ({}): {}", status, body);
        }

        let villas: Vec<VillaRecord> = response
            .json()
            .await
            .context("Failed to parse villa list")?;

        Ok(villas
            .into_iter()
            .filter(|villa| {
                let valid = is_valid_slug(&villa.slug);
                if !valid {
                    warn!("Skipping villa with unusable slug '{}'", villa.slug);
                }
                valid
            })
            .collect())
    }
}

/// Slugs become one URL path segment as-is, so only unreserved ASCII
/// characters are allowed (`a-z`, `A-Z`, `0-9`, `-`, `_`, `.`, `~`), and
/// never a dot segment.
fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty()
        && slug != "."
        && slug != ".."
        && slug
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | '~'))
}

/// Villas for the sitemap; an unconfigured or failing source yields none.
pub async fn load_villas(source: Option<&VillaSource>) -> Vec<VillaRecord> {
    let Some(source) = source else {
        info!("Villa source not configured, listing static pages only");
        return Vec::new();
    };

    match source.fetch_active().await {
        Ok(villas) => {
            info!("Loaded {} villas", villas.len());
            villas
        }
        Err(e) => {
            warn!("Failed to load villas, listing static pages only: {:#}", e);
            Vec::new()
        }
    }
}
