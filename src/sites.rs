//! The six downloader sites and the metadata their pages are rendered with.

use serde_json::{Map, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SiteConfig {
    pub slug: &'static str,
    /// URL path segment of the page.
    pub route: &'static str,
    /// File stem used by the static export.
    pub export_name: &'static str,
    pub display_name: &'static str,
    pub theme_slug: &'static str,
    /// Cobalt options the page form sends along with every URL.
    pub default_options: &'static [(&'static str, &'static str)],
}

pub const DEFAULT_SITE: &str = "all_in_one";

pub static SITES: [SiteConfig; 6] = [
    SiteConfig {
        slug: "tiktok",
        route: "tiktok",
        export_name: "tiktok",
        display_name: "TikTok",
        theme_slug: "tiktok",
        default_options: &[],
    },
    SiteConfig {
        slug: "facebook",
        route: "facebook",
        export_name: "facebook",
        display_name: "Facebook",
        theme_slug: "facebook",
        default_options: &[],
    },
    SiteConfig {
        slug: "instagram",
        route: "instagram",
        export_name: "instagram",
        display_name: "Instagram",
        theme_slug: "instagram",
        default_options: &[],
    },
    SiteConfig {
        slug: "youtube",
        route: "youtube",
        export_name: "youtube",
        display_name: "YouTube",
        theme_slug: "youtube",
        default_options: &[],
    },
    SiteConfig {
        slug: "youtube_mp3",
        route: "youtube-mp3",
        export_name: "youtube-mp3",
        display_name: "YouTube to MP3",
        theme_slug: "youtube-mp3",
        default_options: &[("downloadMode", "audio"), ("audioFormat", "mp3")],
    },
    SiteConfig {
        slug: "all_in_one",
        route: "all-in-one",
        export_name: "index",
        display_name: "All-in-One",
        theme_slug: "all-in-one",
        default_options: &[],
    },
];

impl SiteConfig {
    /// Default options as a JSON object, in table order.
    pub fn default_options_map(&self) -> Map<String, Value> {
        self.default_options
            .iter()
            .map(|(key, value)| (key.to_string(), Value::String(value.to_string())))
            .collect()
    }

    /// The TikTok page uses its own layout.
    pub fn uses_ssstik_template(&self) -> bool {
        self.slug == "tiktok"
    }
}

pub fn find_by_slug(slug: &str) -> Option<&'static SiteConfig> {
    SITES.iter().find(|site| site.slug == slug)
}

pub fn find_by_route(route: &str) -> Option<&'static SiteConfig> {
    SITES.iter().find(|site| site.route == route)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn resolves_sites_by_slug_and_route() {
        assert_eq!(find_by_slug("youtube_mp3").map(|site| site.route), Some("youtube-mp3"));
        assert_eq!(find_by_route("all-in-one").map(|site| site.slug), Some(DEFAULT_SITE));
        assert!(find_by_slug("youtube-mp3").is_none());
        assert!(find_by_route("vimeo").is_none());
        assert!(find_by_slug(DEFAULT_SITE).is_some());
    }

    #[test]
    fn only_youtube_mp3_has_default_options() {
        for site in &SITES {
            let options = site.default_options_map();
            if site.slug == "youtube_mp3" {
                assert_eq!(
                    Value::Object(options),
                    json!({"downloadMode": "audio", "audioFormat": "mp3"})
                );
            } else {
                assert!(options.is_empty(), "{} should have no defaults", site.slug);
            }
        }
    }

    #[test]
    fn default_options_map_follows_the_table() {
        let site = SiteConfig {
            slug: "custom",
            route: "custom",
            export_name: "custom",
            display_name: "Custom",
            theme_slug: "custom",
            default_options: &[("videoQuality", "720"), ("downloadMode", "mute")],
        };
        let keys: Vec<_> = site.default_options_map().keys().cloned().collect();
        assert_eq!(keys, ["videoQuality", "downloadMode"]);
        assert_eq!(
            Value::Object(site.default_options_map()),
            json!({"videoQuality": "720", "downloadMode": "mute"})
        );
    }

    #[test]
    fn only_tiktok_uses_the_ssstik_template() {
        let distinct: Vec<_> = SITES
            .iter()
            .filter(|site| site.uses_ssstik_template())
            .map(|site| site.slug)
            .collect();
        assert_eq!(distinct, ["tiktok"]);
    }
}
