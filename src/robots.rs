/// Paths no crawler should index.
pub const DISALLOWED_PATHS: &[&str] = &[
    "/admin/",
    "/api/",
    "/checkout/",
    "/payment/",
    "/internal/",
    "/_next/",
];

/// Render robots.txt for a site URL (no trailing slash).
pub fn render(site_url: &str) -> String {
    let mut lines = vec!["User-agent: *".to_string(), "Allow: /".to_string()];
    lines.extend(DISALLOWED_PATHS.iter().map(|path| format!("Disallow: {}", path)));
    lines.push(String::new());
    lines.push(format!("Sitemap: {}/sitemap.xml", site_url));
    lines.push(format!("Host: {}", site_url));

    let mut robots = lines.join("\n");
    robots.push('\n');
    robots
}
