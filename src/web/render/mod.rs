//! HTML rendering.
//!
//! All rendering uses [maud](https://maud.lambda.xyz/): markup is checked
//! at compile time and every dynamic value is escaped.

pub mod blocks;
pub mod components;
pub mod formats;
pub mod json_ld;
pub mod pagination;
pub mod portable_text;

use crate::config::SiteConfig;
use crate::domain::ImageRef;

/// Site-wide values every renderer needs.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    config: &'a SiteConfig,
}

impl<'a> RenderContext<'a> {
    /// Wraps the site configuration.
    #[must_use]
    pub const fn new(config: &'a SiteConfig) -> Self {
        Self { config }
    }

    /// Public site name.
    #[must_use]
    pub fn site_name(&self) -> &'a str {
        &self.config.site_name
    }

    /// Public base URL without a trailing slash.
    #[must_use]
    pub fn site_url(&self) -> &'a str {
        &self.config.site_url
    }

    /// Absolute URL for a site path.
    #[must_use]
    pub fn absolute(&self, path: &str) -> String {
        if path == "/" {
            self.config.site_url.clone()
        } else {
            format!("{}{path}", self.config.site_url)
        }
    }

    /// CDN URL for an image asset at the given size.
    #[must_use]
    pub fn image_url(&self, image: &ImageRef, width: u32, height: u32) -> Option<String> {
        image.url(
            &self.config.content.project_id,
            &self.config.content.dataset,
            width,
            height,
        )
    }
}
