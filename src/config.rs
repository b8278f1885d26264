//! Map surface and feed configuration.

/// GeoJSON feed of significant earthquakes from the past 30 days. Sourced
/// from the USGS.
pub const DEFAULT_EARTHQUAKE_FEED: &str =
    "https://earthquake.usgs.gov/earthquakes/feed/v1.0/summary/significant_month.geojson";

/// Authentication for the external map surface. The key is opaque to this
/// crate and passed through unmodified.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AuthOptions {
    pub subscription_key: String,
}

impl AuthOptions {
    pub fn subscription_key(key: impl Into<String>) -> Self {
        AuthOptions {
            subscription_key: key.into(),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ViewMode {
    #[default]
    Auto,
    Unified,
}

/// Options handed to the map surface at construction, plus the feed URL the
/// session loads once the surface is ready.
#[derive(Clone, Debug, PartialEq)]
pub struct MapOptions {
    /// (longitude, latitude). The upstream default sits on the antimeridian;
    /// kept as configured there.
    pub center: (f64, f64),
    pub view: ViewMode,
    pub auto_resize: bool,
    pub show_logo: bool,
    pub auth: AuthOptions,
    pub feed_url: String,
}

impl Default for MapOptions {
    fn default() -> Self {
        MapOptions {
            center: (-180.0, 0.0),
            view: ViewMode::Auto,
            auto_resize: true,
            show_logo: false,
            auth: AuthOptions::default(),
            feed_url: DEFAULT_EARTHQUAKE_FEED.to_string(),
        }
    }
}

impl MapOptions {
    pub fn with_subscription_key(mut self, key: impl Into<String>) -> Self {
        self.auth.subscription_key = key.into();
        self
    }

    pub fn with_feed_url(mut self, url: impl Into<String>) -> Self {
        self.feed_url = url.into();
        self
    }

    pub fn with_center(mut self, longitude: f64, latitude: f64) -> Self {
        self.center = (longitude, latitude);
        self
    }
}
