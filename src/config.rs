use anyhow::{bail, Context, Result};

#[derive(Debug, Clone)]
pub struct Config {
    // Site
    pub site_url: String,
    pub port: u16,
    pub pages_dir: String,

    // Resend (transactional email)
    pub resend_api_key: String,
    pub resend_api_url: String,
    pub email_from: String,
    pub email_to: String,

    // Supabase (villa listings)
    pub supabase_url: Option<String>,
    pub supabase_anon_key: Option<String>,

    // Contact
    pub whatsapp_number: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let port = match std::env::var("PORT") {
            Ok(v) => v
                .parse()
                .context(format!("Invalid PORT: '{}'", v))?,
            Err(_) => 3000,
        };

        let site_url = std::env::var("SITE_URL")
            .unwrap_or_else(|_| "http://localhost:3000".to_string());
        let site_url = site_url.trim_end_matches('/').to_string();
        if !site_url.starts_with("http://") && !site_url.starts_with("https://") {
            bail!("SITE_URL must start with http:// or https://, got '{}'", site_url);
        }

        Ok(Self {
            site_url,
            port,
            pages_dir: std::env::var("PAGES_DIR").unwrap_or_else(|_| "out".to_string()),

            // Resend
            resend_api_key: std::env::var("RESEND_API_KEY").context("RESEND_API_KEY not set")?,
            resend_api_url: std::env::var("RESEND_API_URL")
                .unwrap_or_else(|_| "https://api.resend.com".to_string())
                .trim_end_matches('/')
                .to_string(),
            email_from: std::env::var("EMAIL_FROM")
                .unwrap_or_else(|_| "onboarding@resend.dev".to_string()),
            email_to: std::env::var("EMAIL_TO").context("EMAIL_TO not set")?,

            // Supabase
            supabase_url: non_empty_var("SUPABASE_URL").map(|v| v.trim_end_matches('/').to_string()),
            supabase_anon_key: non_empty_var("SUPABASE_ANON_KEY"),

            // Contact
            whatsapp_number: non_empty_var("WHATSAPP_NUMBER"),
        })
    }

    /// `wa.me` link for the configured WhatsApp number, digits only.
    pub fn whatsapp_url(&self) -> Option<String> {
        let digits: String = self
            .whatsapp_number
            .as_deref()?
            .chars()
            .filter(char::is_ascii_digit)
            .collect();

        if digits.is_empty() {
            None
        } else {
            Some(format!("https://wa.me/{}", digits))
        }
    }
}

/// Read an env var, trimmed; unset or blank values are `None`.
pub fn non_empty_var(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const VARS: &[&str] = &[
        "SITE_URL",
        "PORT",
        "PAGES_DIR",
        "RESEND_API_KEY",
        "RESEND_API_URL",
        "EMAIL_FROM",
        "EMAIL_TO",
        "SUPABASE_URL",
        "SUPABASE_ANON_KEY",
        "WHATSAPP_NUMBER",
    ];

    fn clear_env() {
        for var in VARS {
            std::env::remove_var(var);
        }
    }

    fn set_required() {
        std::env::set_var("RESEND_API_KEY", "re_test");
        std::env::set_var("EMAIL_TO", "owner@villas.example");
    }

    fn test_config(whatsapp_number: Option<&str>) -> Config {
        Config {
            site_url: "https://villas.example".to_string(),
            port: 3000,
            pages_dir: "out".to_string(),
            resend_api_key: "re_test".to_string(),
            resend_api_url: "https://api.resend.com".to_string(),
            email_from: "onboarding@resend.dev".to_string(),
            email_to: "owner@villas.example".to_string(),
            supabase_url: None,
            supabase_anon_key: None,
            whatsapp_number: whatsapp_number.map(String::from),
        }
    }

    // ==================== from_env Tests ====================

    #[test]
    #[serial]
    fn test_from_env_defaults() {
        clear_env();
        set_required();

        let config = Config::from_env().expect("Should load with required vars");
        assert_eq!(config.site_url, "http://localhost:3000");
        assert_eq!(config.port, 3000);
        assert_eq!(config.pages_dir, "out");
        assert_eq!(config.resend_api_url, "https://api.resend.com");
        assert_eq!(config.email_from, "onboarding@resend.dev");
        assert!(config.supabase_url.is_none());
        assert!(config.whatsapp_number.is_none());

        clear_env();
    }

    #[test]
    #[serial]
    fn test_from_env_trims_trailing_slashes() {
        clear_env();
        set_required();
        std::env::set_var("SITE_URL", "https://villas.example/");
        std::env::set_var("SUPABASE_URL", "https://abc.supabase.co/");

        let config = Config::from_env().unwrap();
        assert_eq!(config.site_url, "https://villas.example");
        assert_eq!(config.supabase_url.as_deref(), Some("https://abc.supabase.co"));

        clear_env();
    }

    #[test]
    #[serial]
    fn test_from_env_missing_resend_key() {
        clear_env();
        std::env::set_var("EMAIL_TO", "owner@villas.example");

        let err = Config::from_env().unwrap_err();
        assert!(err.to_string().contains("RESEND_API_KEY"));

        clear_env();
    }

    #[test]
    #[serial]
    fn test_from_env_missing_email_to() {
        clear_env();
        std::env::set_var("RESEND_API_KEY", "re_test");

        let err = Config::from_env().unwrap_err();
        assert!(err.to_string().contains("EMAIL_TO"));

        clear_env();
    }

    #[test]
    #[serial]
    fn test_from_env_invalid_port() {
        clear_env();
        set_required();
        std::env::set_var("PORT", "not-a-port");

        assert!(Config::from_env().is_err());

        clear_env();
    }

    #[test]
    #[serial]
    fn test_from_env_rejects_site_url_without_scheme() {
        clear_env();
        set_required();
        std::env::set_var("SITE_URL", "villas.example");

        assert!(Config::from_env().is_err());

        clear_env();
    }

    #[test]
    #[serial]
    fn test_from_env_blank_optional_vars_are_none() {
        clear_env();
        set_required();
        std::env::set_var("SUPABASE_ANON_KEY", "   ");
        std::env::set_var("WHATSAPP_NUMBER", "");

        let config = Config::from_env().unwrap();
        assert!(config.supabase_anon_key.is_none());
        assert!(config.whatsapp_number.is_none());

        clear_env();
    }

    #[test]
    #[serial]
    fn test_non_empty_var_trims() {
        std::env::set_var("VILLA_SITE_TEST_VAR", "  value  ");
        assert_eq!(non_empty_var("VILLA_SITE_TEST_VAR").as_deref(), Some("value"));

        std::env::set_var("VILLA_SITE_TEST_VAR", " \t ");
        assert!(non_empty_var("VILLA_SITE_TEST_VAR").is_none());

        std::env::remove_var("VILLA_SITE_TEST_VAR");
        assert!(non_empty_var("VILLA_SITE_TEST_VAR").is_none());
    }

    // ==================== whatsapp_url Tests ====================

    #[test]
    fn test_whatsapp_url_strips_formatting() {
        let config = test_config(Some("+56 9 1234-5678"));
        assert_eq!(config.whatsapp_url().as_deref(), Some("https://wa.me/56912345678"));
    }

    #[test]
    fn test_whatsapp_url_none_when_unset() {
        assert!(test_config(None).whatsapp_url().is_none());
    }

    #[test]
    fn test_whatsapp_url_none_without_digits() {
        assert!(test_config(Some("n/a")).whatsapp_url().is_none());
    }
}
