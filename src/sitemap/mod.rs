//! Sitemap generation with hreflang alternates.
//!
//! Every page appears once per locale: the default locale at its prefix-less
//! URL, each other locale at `/{tag}{path}`. All entries of a page carry the
//! same alternate set (every locale plus `x-default`), so search engines see
//! a fully symmetric language cluster.
//!
//! Output depends only on the page list, the villa list and the generation
//! instant passed in.

mod stylesheet;

pub use stylesheet::SITEMAP_XSL;

use chrono::{DateTime, SecondsFormat, Utc};
use std::fmt::Write;

use crate::i18n::{Alternate, LocaleRegistry};
use crate::villas::VillaRecord;

/// Path of the XSLT stylesheet referenced by the sitemap.
pub const STYLESHEET_PATH: &str = "/sitemap.xsl";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeFrequency {
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl ChangeFrequency {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChangeFrequency::Daily => "daily",
            ChangeFrequency::Weekly => "weekly",
            ChangeFrequency::Monthly => "monthly",
            ChangeFrequency::Yearly => "yearly",
        }
    }
}

/// A page listed in the sitemap. `path` is `""` for home, otherwise starts with `/`.
#[derive(Debug, Clone, PartialEq)]
pub struct PageDescriptor {
    pub path: String,
    pub priority: f64,
    pub change_frequency: ChangeFrequency,
}

impl PageDescriptor {
    pub fn new(path: &str, priority: f64, change_frequency: ChangeFrequency) -> Self {
        Self {
            path: path.to_string(),
            priority: priority.clamp(0.0, 1.0),
            change_frequency,
        }
    }
}

/// Top-level marketing pages.
pub fn static_pages() -> Vec<PageDescriptor> {
    vec![
        PageDescriptor::new("", 1.0, ChangeFrequency::Daily),
        PageDescriptor::new("/villas", 0.9, ChangeFrequency::Weekly),
        PageDescriptor::new("/pricing", 0.8, ChangeFrequency::Weekly),
        PageDescriptor::new("/about", 0.7, ChangeFrequency::Monthly),
        PageDescriptor::new("/contact", 0.7, ChangeFrequency::Monthly),
    ]
}

/// Detail page of one villa.
pub fn villa_page(slug: &str) -> PageDescriptor {
    PageDescriptor::new(&format!("/villas/{}", slug), 0.8, ChangeFrequency::Weekly)
}

#[derive(Debug, Clone, PartialEq)]
pub struct SitemapEntry {
    pub loc: String,
    pub alternates: Vec<Alternate>,
    pub lastmod: DateTime<Utc>,
    pub change_frequency: ChangeFrequency,
    pub priority: f64,
}

/// Expand pages and villas into per-locale entries.
///
/// Static pages are stamped with `generated_at`, villa pages with their
/// record's `updated_at`.
pub fn build_entries(
    registry: &LocaleRegistry,
    site_url: &str,
    pages: &[PageDescriptor],
    villas: &[VillaRecord],
    generated_at: DateTime<Utc>,
) -> Vec<SitemapEntry> {
    let dated_pages = pages
        .iter()
        .cloned()
        .map(|page| (page, generated_at))
        .chain(
            villas
                .iter()
                .map(|villa| (villa_page(&villa.slug), villa.updated_at)),
        );

    let mut entries = Vec::new();
    for (page, lastmod) in dated_pages {
        let alternates = registry.hreflang_alternates(site_url, &page.path);

        for locale in registry.list_enabled() {
            entries.push(SitemapEntry {
                loc: registry.canonical_url(site_url, &page.path, locale),
                alternates: alternates.clone(),
                lastmod,
                change_frequency: page.change_frequency,
                priority: page.priority,
            });
        }
    }

    entries
}

/// Serialize entries as a sitemap document styled by `/sitemap.xsl`.
pub fn render_xml(entries: &[SitemapEntry]) -> String {
    let mut xml = String::new();
    xml.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    let _ = writeln!(
        xml,
        "<?xml-stylesheet type=\"text/xsl\" href=\"{}\"?>",
        STYLESHEET_PATH
    );
    xml.push_str(
        "<urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\" \
         xmlns:xhtml=\"http://www.w3.org/1999/xhtml\">\n",
    );

    for entry in entries {
        xml.push_str("  <url>\n");
        let _ = writeln!(xml, "    <loc>{}</loc>", escape_xml(&entry.loc));
        for alternate in &entry.alternates {
            let _ = writeln!(
                xml,
                "    <xhtml:link rel=\"alternate\" hreflang=\"{}\" href=\"{}\"/>",
                escape_xml(alternate.hreflang),
                escape_xml(&alternate.href)
            );
        }
        let _ = writeln!(
            xml,
            "    <lastmod>{}</lastmod>",
            entry.lastmod.to_rfc3339_opts(SecondsFormat::Secs, true)
        );
        let _ = writeln!(
            xml,
            "    <changefreq>{}</changefreq>",
            entry.change_frequency.as_str()
        );
        let _ = writeln!(xml, "    <priority>{:.1}</priority>", entry.priority);
        xml.push_str("  </url>\n");
    }

    xml.push_str("</urlset>\n");
    xml
}

/// Build and render the sitemap in one step.
pub fn generate(
    registry: &LocaleRegistry,
    site_url: &str,
    pages: &[PageDescriptor],
    villas: &[VillaRecord],
    generated_at: DateTime<Utc>,
) -> String {
    render_xml(&build_entries(registry, site_url, pages, villas, generated_at))
}

/// Escape text for XML element content and attribute values.
pub fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
