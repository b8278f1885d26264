//! Declarative layer specifications handed to the map surface.

use crate::style::{self, Color, StyleRule};

pub const BUBBLE_LAYER_ID: &str = "earthquake-circles";
pub const SYMBOL_LAYER_ID: &str = "earthquake-labels";

/// A bubble per feature, colored and sized by magnitude.
#[derive(Clone, Debug, PartialEq)]
pub struct BubbleLayer {
    pub id: String,
    pub source: String,
    /// Bubbles are made semi-transparent.
    pub opacity: f64,
    pub color: StyleRule<Color>,
    pub radius: StyleRule<f64>,
}

impl BubbleLayer {
    /// The earthquake bubble layer: opacity 0.75, green-to-red gradient,
    /// 2px to 20px radius over magnitude.
    pub fn earthquake(source: impl Into<String>) -> Self {
        BubbleLayer {
            id: BUBBLE_LAYER_ID.to_string(),
            source: source.into(),
            opacity: 0.75,
            color: style::magnitude_color_rule(),
            radius: style::magnitude_radius_rule(),
        }
    }

    pub fn color_for(&self, magnitude: f64) -> Color {
        self.color.resolve(magnitude)
    }

    pub fn radius_for(&self, magnitude: f64) -> f64 {
        self.radius.resolve(magnitude)
    }
}

/// Magnitude rendered as text above each bubble. The icon image is hidden.
#[derive(Clone, Debug, PartialEq)]
pub struct SymbolLayer {
    pub id: String,
    pub source: String,
    pub icon_image: Option<String>,
    pub text_size: f64,
}

impl SymbolLayer {
    pub fn earthquake(source: impl Into<String>) -> Self {
        SymbolLayer {
            id: SYMBOL_LAYER_ID.to_string(),
            source: source.into(),
            icon_image: None,
            text_size: 12.0,
        }
    }

    pub fn label_for(&self, magnitude: f64) -> String {
        style::label_for(magnitude)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum LayerSpec {
    Bubble(BubbleLayer),
    Symbol(SymbolLayer),
}

impl LayerSpec {
    pub fn id(&self) -> &str {
        match self {
            LayerSpec::Bubble(layer) => &layer.id,
            LayerSpec::Symbol(layer) => &layer.id,
        }
    }

    pub fn source(&self) -> &str {
        match self {
            LayerSpec::Bubble(layer) => &layer.source,
            LayerSpec::Symbol(layer) => &layer.source,
        }
    }
}
