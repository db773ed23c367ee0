//! Sitemap XML generation.
//!
//! The index points at four sub-sitemaps (venues, reviews, guides,
//! static pages), each regenerated from slug/date projections on every
//! request. Output is templated strings, escaped by hand; the sitemap
//! schema is small enough that an XML writer would be overkill.

use chrono::{DateTime, Utc};
use tapeo_core::content::City;
use tapeo_core::storage::{GuideStamp, ReviewStamp, VenueStamp};

use crate::urls;

const XMLNS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

/// One `<url>` entry of a sub-sitemap.
pub struct SitemapUrl {
    pub loc: String,
    pub lastmod: DateTime<Utc>,
    pub changefreq: &'static str,
    pub priority: &'static str,
}

/// The later of a document's publication and update stamps.
pub fn latest_date(
    published_at: Option<DateTime<Utc>>,
    updated_at: Option<DateTime<Utc>>,
) -> Option<DateTime<Utc>> {
    match (published_at, updated_at) {
        (Some(published), Some(updated)) => Some(published.max(updated)),
        (stamp, None) | (None, stamp) => stamp,
    }
}

/// Sitemap index referencing the four sub-sitemaps.
pub fn index(base_url: &str, lastmod: DateTime<Utc>) -> String {
    let mut xml = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    xml.push_str(&format!("<sitemapindex xmlns=\"{XMLNS}\">\n"));
    for name in ["venues", "reviews", "guides", "static"] {
        xml.push_str("  <sitemap>\n");
        xml.push_str(&format!(
            "    <loc>{}</loc>\n",
            escape_xml(&format!("{base_url}/sitemap-{name}.xml"))
        ));
        xml.push_str(&format!("    <lastmod>{}</lastmod>\n", date_stamp(lastmod)));
        xml.push_str("  </sitemap>\n");
    }
    xml.push_str("</sitemapindex>\n");
    xml
}

/// Renders a `<urlset>` document from the given entries.
pub fn urlset(entries: &[SitemapUrl]) -> String {
    let mut xml = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    xml.push_str(&format!("<urlset xmlns=\"{XMLNS}\">\n"));
    for entry in entries {
        xml.push_str("  <url>\n");
        xml.push_str(&format!("    <loc>{}</loc>\n", escape_xml(&entry.loc)));
        xml.push_str(&format!(
            "    <lastmod>{}</lastmod>\n",
            date_stamp(entry.lastmod)
        ));
        xml.push_str(&format!(
            "    <changefreq>{}</changefreq>\n",
            entry.changefreq
        ));
        xml.push_str(&format!("    <priority>{}</priority>\n", entry.priority));
        xml.push_str("  </url>\n");
    }
    xml.push_str("</urlset>\n");
    xml
}

/// Entries for every venue page.
pub fn venue_urls(base_url: &str, stamps: &[VenueStamp]) -> Vec<SitemapUrl> {
    stamps
        .iter()
        .map(|stamp| SitemapUrl {
            loc: urls::absolute(base_url, &urls::venue_path(&stamp.city_slug, &stamp.slug)),
            lastmod: stamp.updated_at,
            changefreq: "weekly",
            priority: "0.8",
        })
        .collect()
}

/// Entries for published reviews. Drafts never reach the sitemap.
pub fn review_urls(base_url: &str, stamps: &[ReviewStamp]) -> Vec<SitemapUrl> {
    stamps
        .iter()
        .filter(|stamp| stamp.published_at.is_some())
        .map(|stamp| SitemapUrl {
            loc: urls::absolute(
                base_url,
                &urls::review_path(&stamp.city_slug, &stamp.venue_slug, &stamp.slug),
            ),
            lastmod: latest_date(stamp.published_at, Some(stamp.updated_at))
                .unwrap_or(stamp.updated_at),
            changefreq: "monthly",
            priority: "0.7",
        })
        .collect()
}

/// Entries for published guides.
pub fn guide_urls(base_url: &str, stamps: &[GuideStamp]) -> Vec<SitemapUrl> {
    stamps
        .iter()
        .filter(|stamp| stamp.published_at.is_some())
        .map(|stamp| SitemapUrl {
            loc: urls::absolute(base_url, &urls::guide_path(&stamp.slug)),
            lastmod: latest_date(stamp.published_at, Some(stamp.updated_at))
                .unwrap_or(stamp.updated_at),
            changefreq: "monthly",
            priority: "0.6",
        })
        .collect()
}

/// Entries for the homepage, the guide listing and the city pages.
pub fn static_urls(base_url: &str, cities: &[City], now: DateTime<Utc>) -> Vec<SitemapUrl> {
    let mut entries = vec![
        SitemapUrl {
            loc: urls::absolute(base_url, "/"),
            lastmod: now,
            changefreq: "daily",
            priority: "1.0",
        },
        SitemapUrl {
            loc: urls::absolute(base_url, "/guias"),
            lastmod: now,
            changefreq: "weekly",
            priority: "0.7",
        },
    ];
    entries.extend(cities.iter().map(|city| SitemapUrl {
        loc: urls::absolute(base_url, &urls::city_path(&city.slug)),
        lastmod: city.updated_at,
        changefreq: "weekly",
        priority: "0.9",
    }));
    entries
}

/// Minimal valid sitemap served when the content store is unreachable.
pub fn fallback(base_url: &str, now: DateTime<Utc>) -> String {
    urlset(&[SitemapUrl {
        loc: urls::absolute(base_url, "/"),
        lastmod: now,
        changefreq: "daily",
        priority: "1.0",
    }])
}

fn date_stamp(date: DateTime<Utc>) -> String {
    date.format("%Y-%m-%d").to_string()
}

fn escape_xml(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
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

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    const BASE: &str = "https://tapeo.example";

    #[test]
    fn test_latest_date_reduces_to_the_max() {
        let older = Utc::now() - Duration::days(7);
        let newer = Utc::now();

        assert_eq!(latest_date(Some(older), Some(newer)), Some(newer));
        assert_eq!(latest_date(Some(newer), Some(older)), Some(newer));
        assert_eq!(latest_date(None, Some(older)), Some(older));
        assert_eq!(latest_date(Some(older), None), Some(older));
        assert_eq!(latest_date(None, None), None);
    }

    #[test]
    fn test_index_lists_the_four_sub_sitemaps() {
        let xml = index(BASE, Utc::now());

        assert!(xml.starts_with("<?xml version=\"1.0\""));
        assert!(xml.contains("<sitemapindex"));
        for name in ["venues", "reviews", "guides", "static"] {
            assert!(xml.contains(&format!("{BASE}/sitemap-{name}.xml")));
        }
    }

    #[test]
    fn test_venue_entries_nest_under_the_city_slug() {
        let stamps = vec![VenueStamp {
            slug: "casa-paco".to_string(),
            city_slug: "sevilla".to_string(),
            updated_at: Utc::now(),
        }];

        let entries = venue_urls(BASE, &stamps);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].loc, "https://tapeo.example/sevilla/casa-paco");
    }

    #[test]
    fn test_draft_reviews_are_skipped() {
        let published = ReviewStamp {
            slug: "gran-barra".to_string(),
            venue_slug: "casa-paco".to_string(),
            city_slug: "sevilla".to_string(),
            published_at: Some(Utc::now()),
            updated_at: Utc::now(),
        };
        let draft = ReviewStamp {
            published_at: None,
            slug: "borrador".to_string(),
            ..published.clone()
        };

        let entries = review_urls(BASE, &[published, draft]);
        assert_eq!(entries.len(), 1);
        assert_eq!(
            entries[0].loc,
            "https://tapeo.example/sevilla/casa-paco/review/gran-barra"
        );
    }

    #[test]
    fn test_urlset_escapes_locations() {
        let entries = vec![SitemapUrl {
            loc: "https://tapeo.example/x?a=1&b=2".to_string(),
            lastmod: Utc::now(),
            changefreq: "weekly",
            priority: "0.5",
        }];

        let xml = urlset(&entries);
        assert!(xml.contains("a=1&amp;b=2"));
        assert!(!xml.contains("a=1&b=2"));
    }

    #[test]
    fn test_static_entries_include_cities() {
        let cities = vec![City::new("Sevilla", "sevilla"), City::new("Cádiz", "cadiz")];
        let entries = static_urls(BASE, &cities, Utc::now());

        let locs: Vec<&str> = entries.iter().map(|e| e.loc.as_str()).collect();
        assert!(locs.contains(&"https://tapeo.example/"));
        assert!(locs.contains(&"https://tapeo.example/guias"));
        assert!(locs.contains(&"https://tapeo.example/sevilla"));
        assert!(locs.contains(&"https://tapeo.example/cadiz"));
    }

    #[test]
    fn test_fallback_is_a_valid_urlset() {
        let xml = fallback(BASE, Utc::now());

        assert!(xml.contains("<urlset"));
        assert!(xml.contains("https://tapeo.example/"));
        assert!(xml.ends_with("</urlset>\n"));
    }
}
