use geojson::{Feature, FeatureCollection, Value as GeoValue};

/// A point on the globe as the USGS feed encodes it: `[longitude, latitude,
/// depth]`, depth in kilometers when present.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GeoPosition {
    pub longitude: f64,
    pub latitude: f64,
    pub depth_km: Option<f64>,
}

impl GeoPosition {
    pub fn new(longitude: f64, latitude: f64) -> Self {
        GeoPosition {
            longitude,
            latitude,
            depth_km: None,
        }
    }
}

/// One earthquake from the feed. Immutable once loaded; replaced wholesale
/// when the feed is reloaded into a new session.
#[derive(Clone, Debug, PartialEq)]
pub struct QuakeFeature {
    pub magnitude: f64,
    pub position: GeoPosition,
    pub place: Option<String>,
    pub time_ms: Option<i64>,
}

/// The result set of one feed load.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct QuakeCollection {
    features: Vec<QuakeFeature>,
}

impl QuakeCollection {
    pub fn new(features: Vec<QuakeFeature>) -> Self {
        QuakeCollection { features }
    }

    /// Converts a parsed GeoJSON collection, keeping point features that
    /// carry a numeric `mag` property. Anything else is not renderable as a
    /// magnitude bubble and is skipped.
    pub fn from_geojson(collection: FeatureCollection) -> Self {
        let features = collection
            .features
            .into_iter()
            .filter_map(convert_feature)
            .collect();
        QuakeCollection { features }
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    pub fn features(&self) -> &[QuakeFeature] {
        &self.features
    }

    pub fn iter(&self) -> std::slice::Iter<'_, QuakeFeature> {
        self.features.iter()
    }
}

impl IntoIterator for QuakeCollection {
    type Item = QuakeFeature;
    type IntoIter = std::vec::IntoIter<QuakeFeature>;

    fn into_iter(self) -> Self::IntoIter {
        self.features.into_iter()
    }
}

fn convert_feature(feature: Feature) -> Option<QuakeFeature> {
    let Some(geometry) = &feature.geometry else {
        tracing::debug!("skipping feature without geometry");
        return None;
    };
    let GeoValue::Point(coords) = &geometry.value else {
        tracing::debug!("skipping non-point feature");
        return None;
    };
    if coords.len() < 2 {
        tracing::debug!("skipping point with incomplete coordinates");
        return None;
    }
    let position = GeoPosition {
        longitude: coords[0],
        latitude: coords[1],
        depth_km: coords.get(2).copied(),
    };

    let properties = feature.properties.as_ref();
    let Some(magnitude) = properties
        .and_then(|p| p.get("mag"))
        .and_then(serde_json::Value::as_f64)
    else {
        tracing::debug!("skipping feature without numeric mag property");
        return None;
    };
    let place = properties
        .and_then(|p| p.get("place"))
        .and_then(serde_json::Value::as_str)
        .map(str::to_string);
    let time_ms = properties
        .and_then(|p| p.get("time"))
        .and_then(serde_json::Value::as_i64);

    Some(QuakeFeature {
        magnitude,
        position,
        place,
        time_ms,
    })
}
