/// Localized strings for the pages the server renders itself.
///
/// Everything else is prerendered per locale; only the error page is built
/// at request time, so the table stays small. Strings are raw text and are
/// escaped by the HTML templates.
#[derive(Debug, Clone)]
pub struct LocaleStrings {
    // ==================== Not Found ====================
    /// Title of the 404 page
    pub not_found_title: &'static str,

    /// Body text of the 404 page
    pub not_found_message: &'static str,

    // ==================== Generic Error ====================
    /// Title of the generic error page
    pub error_title: &'static str,

    /// Body text of the generic error page
    pub error_message: &'static str,

    // ==================== Actions ====================
    /// Label of the retry button
    pub retry_label: &'static str,

    /// Label of the link back to the home page
    pub home_label: &'static str,
}

impl LocaleStrings {
    /// Strings for a locale tag, English when the tag has no table.
    pub fn for_tag(tag: &str) -> &'static LocaleStrings {
        match tag {
            "es-ES" => &SPANISH_STRINGS,
            _ => &ENGLISH_STRINGS,
        }
    }
}

// ==================== English Strings ====================

pub const ENGLISH_STRINGS: LocaleStrings = LocaleStrings {
    not_found_title: "Page not found",
    not_found_message: "The page you are looking for does not exist or has been moved.",
    error_title: "Something went wrong",
    error_message: "We could not load this page. Please try again in a moment.",
    retry_label: "Try again",
    home_label: "Back to home",
};

// ==================== Spanish Strings ====================

pub const SPANISH_STRINGS: LocaleStrings = LocaleStrings {
    not_found_title: "Página no encontrada",
    not_found_message: "La página que buscas no existe o ha sido movida.",
    error_title: "Algo salió mal",
    error_message: "No pudimos cargar esta página. Inténtalo de nuevo en unos momentos.",
    retry_label: "Reintentar",
    home_label: "Volver al inicio",
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::LocaleRegistry;

    #[test]
    fn test_for_tag_spanish() {
        let strings = LocaleStrings::for_tag("es-ES");
        assert_eq!(strings.home_label, "Volver al inicio");
    }

    #[test]
    fn test_for_tag_unknown_falls_back_to_english() {
        let strings = LocaleStrings::for_tag("fr");
        assert_eq!(strings.not_found_title, ENGLISH_STRINGS.not_found_title);
    }

    #[test]
    fn test_every_enabled_locale_has_distinct_strings() {
        let registry = LocaleRegistry::get();
        for locale in registry.non_default() {
            let strings = LocaleStrings::for_tag(locale.tag);
            assert_ne!(
                strings.not_found_title, ENGLISH_STRINGS.not_found_title,
                "Locale {} falls back to English strings",
                locale.tag
            );
        }
    }

    #[test]
    fn test_no_empty_strings() {
        for strings in [&ENGLISH_STRINGS, &SPANISH_STRINGS] {
            assert!(!strings.not_found_title.is_empty());
            assert!(!strings.not_found_message.is_empty());
            assert!(!strings.error_title.is_empty());
            assert!(!strings.error_message.is_empty());
            assert!(!strings.retry_label.is_empty());
            assert!(!strings.home_label.is_empty());
        }
    }
}
