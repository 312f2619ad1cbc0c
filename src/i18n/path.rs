//! Locale prefixes in URL paths.
//!
//! A path carries a locale when its first segment is exactly an enabled
//! locale tag: `/es-ES` and `/es-ES/villas` do, `/es-ESx` and `/villas/es-ES`
//! do not.

use super::{Locale, LocaleRegistry};

/// hreflang value for the fallback alternate.
pub const X_DEFAULT: &str = "x-default";

/// One `hreflang` alternate of a page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alternate {
    pub hreflang: &'static str,
    pub href: String,
}

impl LocaleRegistry {
    /// Extract the locale from the first path segment.
    ///
    /// Unknown or disabled tags yield `None`, the path is then treated as
    /// carrying no locale at all.
    pub fn locale_from_path(&self, path: &str) -> Option<&Locale> {
        let rest = path.strip_prefix('/')?;
        let segment = rest.split('/').next().unwrap_or_default();
        self.get_by_tag(segment)
    }

    /// Path of a page for a locale. `page_path` is `""` for home or starts with `/`.
    ///
    /// The default locale is prefix-less (`/`, `/about`); others are prefixed
    /// (`/es-ES`, `/es-ES/about`).
    pub fn localized_path(&self, page_path: &str, locale: &Locale) -> String {
        if locale.is_default {
            if page_path.is_empty() {
                "/".to_string()
            } else {
                page_path.to_string()
            }
        } else {
            format!("/{}{}", locale.tag, page_path)
        }
    }

    /// Absolute canonical URL of a page for a locale.
    pub fn canonical_url(&self, site_url: &str, page_path: &str, locale: &Locale) -> String {
        format!("{}{}", site_url, self.localized_path(page_path, locale))
    }

    /// Every language version of a page plus `x-default`.
    ///
    /// The set is the same whichever locale the caller is rendering, so all
    /// versions cross-link symmetrically.
    pub fn hreflang_alternates(&self, site_url: &str, page_path: &str) -> Vec<Alternate> {
        let mut alternates: Vec<Alternate> = self
            .list_enabled()
            .into_iter()
            .map(|locale| Alternate {
                hreflang: locale.tag,
                href: self.canonical_url(site_url, page_path, locale),
            })
            .collect();

        alternates.push(Alternate {
            hreflang: X_DEFAULT,
            href: self.canonical_url(site_url, page_path, self.default_locale()),
        });

        alternates
    }
}

/// Whether `path` starts with the `/{tag}` segment.
pub fn has_locale_prefix(path: &str, tag: &str) -> bool {
    path.strip_prefix('/')
        .and_then(|rest| rest.strip_prefix(tag))
        .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
}

/// Remove a leading `/{tag}` segment. `/en` becomes `/`, `/en/about` becomes `/about`.
///
/// Paths without the prefix are returned unchanged. Leading slashes and
/// backslashes left after the prefix collapse into one `/`, so the result
/// never reads as a protocol-relative URL (`//host/...`).
pub fn strip_locale_prefix(path: &str, tag: &str) -> String {
    if !has_locale_prefix(path, tag) {
        return path.to_string();
    }

    let rest = path[tag.len() + 1..].trim_start_matches(['/', '\\']);
    format!("/{}", rest)
}

/// Prefix a path with `/{tag}`. `/` becomes `/en/`, `/about` becomes `/en/about`.
pub fn with_locale_prefix(path: &str, tag: &str) -> String {
    if path.starts_with('/') {
        format!("/{}{}", tag, path)
    } else {
        format!("/{}/{}", tag, path)
    }
}
