/// XSLT that renders `sitemap.xml` as an HTML table with one badge per
/// language version of each URL.
pub const SITEMAP_XSL: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<xsl:stylesheet version="1.0"
    xmlns:xsl="http://www.w3.org/1999/XSL/Transform"
    xmlns:sitemap="http://www.sitemaps.org/schemas/sitemap/0.9"
    xmlns:xhtml="http://www.w3.org/1999/xhtml">
  <xsl:output method="html" encoding="UTF-8" indent="yes"/>
  <xsl:template match="/">
    <html lang="en">
      <head>
        <meta charset="UTF-8"/>
        <meta name="robots" content="noindex"/>
        <title>XML Sitemap</title>
        <style>
          body { font-family: system-ui, sans-serif; margin: 2rem; color: #1f2933; }
          h1 { font-size: 1.5rem; margin-bottom: 0.25rem; }
          p.count { color: #52606d; margin-top: 0; }
          table { border-collapse: collapse; width: 100%; font-size: 0.875rem; }
          th, td { text-align: left; padding: 0.5rem 0.75rem; border-bottom: 1px solid #e4e7eb; }
          th { background: #f5f7fa; }
          a { color: #0b6e4f; text-decoration: none; }
          .badge { display: inline-block; margin-right: 0.25rem; padding: 0.1rem 0.4rem;
                   border-radius: 0.25rem; background: #e3f8ef; color: #0b6e4f; font-size: 0.75rem; }
          .badge.default { background: #f0f4f8; color: #52606d; }
        </style>
      </head>
      <body>
        <h1>XML Sitemap</h1>
        <p class="count">
          <xsl:value-of select="count(sitemap:urlset/sitemap:url)"/> URLs
        </p>
        <table>
          <thead>
            <tr>
              <th>URL</th>
              <th>Languages</th>
              <th>Last modified</th>
              <th>Change frequency</th>
              <th>Priority</th>
            </tr>
          </thead>
          <tbody>
            <xsl:for-each select="sitemap:urlset/sitemap:url">
              <tr>
                <td>
                  <a href="{sitemap:loc}"><xsl:value-of select="sitemap:loc"/></a>
                </td>
                <td>
                  <xsl:for-each select="xhtml:link">
                    <a href="{@href}">
                      <xsl:attribute name="class">
                        <xsl:choose>
                          <xsl:when test="@hreflang = 'x-default'">badge default</xsl:when>
                          <xsl:otherwise>badge</xsl:otherwise>
                        </xsl:choose>
                      </xsl:attribute>
                      <xsl:value-of select="@hreflang"/>
                    </a>
                  </xsl:for-each>
                </td>
                <td><xsl:value-of select="substring(sitemap:lastmod, 1, 10)"/></td>
                <td><xsl:value-of select="sitemap:changefreq"/></td>
                <td><xsl:value-of select="sitemap:priority"/></td>
              </tr>
            </xsl:for-each>
          </tbody>
        </table>
      </body>
    </html>
  </xsl:template>
</xsl:stylesheet>
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stylesheet_declares_sitemap_namespaces() {
        assert!(SITEMAP_XSL.contains("xmlns:sitemap=\"http://www.sitemaps.org/schemas/sitemap/0.9\""));
        assert!(SITEMAP_XSL.contains("xmlns:xhtml=\"http://www.w3.org/1999/xhtml\""));
    }

    #[test]
    fn test_stylesheet_renders_language_badges() {
        assert!(SITEMAP_XSL.contains("<xsl:for-each select=\"xhtml:link\">"));
        assert!(SITEMAP_XSL.contains("@hreflang"));
    }
}
