//! Internationalization (i18n) module for the site's locale handling.
//!
//! All locale-related logic lives here: the registry of supported locales,
//! path prefix parsing, and the small set of strings the server renders
//! itself (pages proper are prerendered elsewhere).
//!
//! # Architecture
//!
//! - `registry`: Single source of truth for all supported locales and the default
//! - `path`: Locale prefix detection, stripping and canonical URL building
//! - `strings`: Localized strings for server-rendered error pages
//!
//! # Example
//!
//! ```rust,ignore
//! use villa_site::i18n::LocaleRegistry;
//!
//! let registry = LocaleRegistry::get();
//! let spanish = registry.locale_from_path("/es-ES/villas");
//! assert_eq!(spanish.map(|l| l.tag), Some("es-ES"));
//! ```

mod path;
mod registry;
mod strings;

pub use path::{has_locale_prefix, strip_locale_prefix, with_locale_prefix, Alternate, X_DEFAULT};
pub use registry::{Locale, LocaleRegistry};
pub use strings::LocaleStrings;
