//! Locale registry: Single source of truth for all supported locales.
//!
//! The site serves a fixed, closed set of locale tags. Exactly one of them is
//! the default: its pages live at prefix-less URLs, every other locale keeps
//! a `/{tag}` prefix. The global registry is initialized once with `OnceLock`;
//! tests and tools may build their own with [`LocaleRegistry::new`].

use anyhow::{bail, Result};
use std::sync::OnceLock;

/// A supported locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Locale {
    /// BCP 47 tag, also used verbatim as URL prefix and hreflang value
    pub tag: &'static str,

    /// English name of the locale (e.g., "English", "Spanish (Spain)")
    pub name: &'static str,

    /// Native name of the locale (e.g., "English", "Español")
    pub native_name: &'static str,

    /// Whether this is the default locale (exactly one must be true)
    pub is_default: bool,

    /// Whether this locale is served
    pub enabled: bool,
}

/// Registry of supported locales.
#[derive(Debug, Clone)]
pub struct LocaleRegistry {
    locales: Vec<Locale>,
    default_index: usize,
}

/// Global registry instance (initialized lazily)
static REGISTRY: OnceLock<LocaleRegistry> = OnceLock::new();

impl LocaleRegistry {
    /// Build a registry from a locale table.
    ///
    /// Fails unless exactly one enabled locale is marked default and tags are
    /// unique.
    pub fn new(locales: Vec<Locale>) -> Result<Self> {
        let defaults: Vec<usize> = locales
            .iter()
            .enumerate()
            .filter(|(_, l)| l.is_default && l.enabled)
            .map(|(i, _)| i)
            .collect();

        let default_index = match defaults.as_slice() {
            [index] => *index,
            [] => bail!("No enabled default locale in registry"),
            _ => bail!("Multiple default locales in registry"),
        };

        for (i, locale) in locales.iter().enumerate() {
            if locale.tag.is_empty() || locale.tag.contains('/') {
                bail!("Invalid locale tag: '{}'", locale.tag);
            }
            if locales[..i].iter().any(|other| other.tag == locale.tag) {
                bail!("Duplicate locale tag: '{}'", locale.tag);
            }
        }

        Ok(Self {
            locales,
            default_index,
        })
    }

    /// Get the global locale registry instance.
    pub fn get() -> &'static LocaleRegistry {
        REGISTRY.get_or_init(|| LocaleRegistry {
            locales: default_locales(),
            default_index: 0,
        })
    }

    /// Get an enabled locale by its exact tag.
    pub fn get_by_tag(&self, tag: &str) -> Option<&Locale> {
        self.locales
            .iter()
            .find(|locale| locale.enabled && locale.tag == tag)
    }

    /// The default locale.
    pub fn default_locale(&self) -> &Locale {
        &self.locales[self.default_index]
    }

    /// All enabled locales, default first, then registry order.
    pub fn list_enabled(&self) -> Vec<&Locale> {
        std::iter::once(self.default_locale())
            .chain(self.non_default())
            .collect()
    }

    /// Enabled locales other than the default, in registry order.
    pub fn non_default(&self) -> impl Iterator<Item = &Locale> {
        self.locales
            .iter()
            .filter(|locale| locale.enabled && !locale.is_default)
    }

    /// Check if a locale tag is supported and enabled.
    pub fn is_enabled(&self, tag: &str) -> bool {
        self.get_by_tag(tag).is_some()
    }
}

/// Locales served by the site. English is the default.
fn default_locales() -> Vec<Locale> {
    vec![
        Locale {
            tag: "en",
            name: "English",
            native_name: "English",
            is_default: true,
            enabled: true,
        },
        Locale {
            tag: "es-ES",
            name: "Spanish (Spain)",
            native_name: "Español",
            is_default: false,
            enabled: true,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn locale(tag: &'static str, is_default: bool, enabled: bool) -> Locale {
        Locale {
            tag,
            name: tag,
            native_name: tag,
            is_default,
            enabled,
        }
    }

    #[test]
    fn test_registry_get_returns_singleton() {
        let registry1 = LocaleRegistry::get();
        let registry2 = LocaleRegistry::get();
        assert!(std::ptr::eq(registry1, registry2));
    }

    #[test]
    fn test_global_registry_is_valid() {
        let rebuilt = LocaleRegistry::new(default_locales()).expect("Default table should be valid");
        assert_eq!(
            rebuilt.default_locale().tag,
            LocaleRegistry::get().default_locale().tag
        );
    }

    #[test]
    fn test_default_is_english() {
        let registry = LocaleRegistry::get();
        let default = registry.default_locale();
        assert_eq!(default.tag, "en");
        assert!(default.is_default);
    }

    #[test]
    fn test_get_by_tag_spanish() {
        let registry = LocaleRegistry::get();
        let spanish = registry.get_by_tag("es-ES").expect("es-ES should exist");
        assert_eq!(spanish.native_name, "Español");
        assert!(!spanish.is_default);
    }

    #[test]
    fn test_get_by_tag_is_case_sensitive() {
        let registry = LocaleRegistry::get();
        assert!(registry.get_by_tag("es-es").is_none());
        assert!(registry.get_by_tag("EN").is_none());
    }

    #[test]
    fn test_get_by_tag_nonexistent() {
        assert!(LocaleRegistry::get().get_by_tag("fr").is_none());
        assert!(!LocaleRegistry::get().is_enabled("fr"));
    }

    #[test]
    fn test_list_enabled_default_first() {
        let registry = LocaleRegistry::new(vec![
            locale("fr", false, true),
            locale("en", true, true),
            locale("de", false, true),
        ])
        .unwrap();

        let tags: Vec<_> = registry.list_enabled().iter().map(|l| l.tag).collect();
        assert_eq!(tags, vec!["en", "fr", "de"]);
    }

    #[test]
    fn test_disabled_locale_is_hidden() {
        let registry = LocaleRegistry::new(vec![
            locale("en", true, true),
            locale("pt-BR", false, false),
        ])
        .unwrap();

        assert!(registry.get_by_tag("pt-BR").is_none());
        assert_eq!(registry.non_default().count(), 0);
        assert_eq!(registry.list_enabled().len(), 1);
    }

    #[test]
    fn test_new_rejects_missing_default() {
        let result = LocaleRegistry::new(vec![locale("en", false, true)]);
        assert!(result.unwrap_err().to_string().contains("No enabled default"));
    }

    #[test]
    fn test_new_rejects_disabled_default() {
        let result = LocaleRegistry::new(vec![locale("en", true, false), locale("es", false, true)]);
        assert!(result.is_err());
    }

    #[test]
    fn test_new_rejects_multiple_defaults() {
        let result = LocaleRegistry::new(vec![locale("en", true, true), locale("es", true, true)]);
        assert!(result.unwrap_err().to_string().contains("Multiple"));
    }

    #[test]
    fn test_new_rejects_duplicate_tags() {
        let result = LocaleRegistry::new(vec![locale("en", true, true), locale("en", false, true)]);
        assert!(result.unwrap_err().to_string().contains("Duplicate"));
    }

    #[test]
    fn test_new_rejects_slash_in_tag() {
        let result = LocaleRegistry::new(vec![locale("en/us", true, true)]);
        assert!(result.is_err());
    }
}
