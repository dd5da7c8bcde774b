//! Typed property table.
//!
//! Engines expose metadata through string-keyed lookups. Every property the
//! adapter reads is listed once here with its engine name and value kind,
//! and read through a typed accessor instead of a raw string key.

use tracing::warn;

use crate::producer::Producer;

/// How a property's string value is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Text,
    Int,
    Float,
}

/// Producer properties read by the adapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PropertyKey {
    /// Media path or URL.
    Resource,
    /// Engine service that created the producer.
    Service,
    /// Content hash used as an external cache key.
    Hash,
    /// User-assigned clip name.
    Caption,
    /// Title from container metadata.
    Title,
    /// In-point override set when a timeline cut wraps its parent.
    FilterIn,
    /// Out-point override set when a timeline cut wraps its parent.
    FilterOut,
    /// User-forced display aspect ratio.
    ForceAspectRatio,
    /// Display aspect ratio detected by the engine.
    AspectRatio,
    /// Fade-in length in frames.
    FadeIn,
    /// Fade-out length in frames.
    FadeOut,
    /// Speed factor of a timewarp producer.
    WarpSpeed,
}

impl PropertyKey {
    /// Every key, in table order.
    pub const ALL: [PropertyKey; 12] = [
        Self::Resource,
        Self::Service,
        Self::Hash,
        Self::Caption,
        Self::Title,
        Self::FilterIn,
        Self::FilterOut,
        Self::ForceAspectRatio,
        Self::AspectRatio,
        Self::FadeIn,
        Self::FadeOut,
        Self::WarpSpeed,
    ];

    /// Engine-side property name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Resource => "resource",
            Self::Service => "mlt_service",
            Self::Hash => "shotcut:hash",
            Self::Caption => "shotcut:caption",
            Self::Title => "title",
            Self::FilterIn => "shotcut:filter_in",
            Self::FilterOut => "shotcut:filter_out",
            Self::ForceAspectRatio => "force_aspect_ratio",
            Self::AspectRatio => "aspect_ratio",
            Self::FadeIn => "shotcut:fade_in",
            Self::FadeOut => "shotcut:fade_out",
            Self::WarpSpeed => "warp_speed",
        }
    }

    pub const fn kind(self) -> ValueKind {
        match self {
            Self::Resource | Self::Service | Self::Hash | Self::Caption | Self::Title => {
                ValueKind::Text
            }
            Self::FilterIn | Self::FilterOut | Self::FadeIn | Self::FadeOut => ValueKind::Int,
            Self::ForceAspectRatio | Self::AspectRatio | Self::WarpSpeed => ValueKind::Float,
        }
    }
}

/// Typed reads through the property table.
///
/// All readers return `None` for unset, empty, or unparsable values.
pub trait ProducerExt {
    fn text(&self, key: PropertyKey) -> Option<String>;
    fn int(&self, key: PropertyKey) -> Option<i32>;
    fn float(&self, key: PropertyKey) -> Option<f64>;
}

impl<P: Producer + ?Sized> ProducerExt for P {
    fn text(&self, key: PropertyKey) -> Option<String> {
        debug_assert_eq!(key.kind(), ValueKind::Text, "{key:?} is not a text property");
        self.get(key.name()).filter(|value| !value.is_empty())
    }

    fn int(&self, key: PropertyKey) -> Option<i32> {
        debug_assert_eq!(key.kind(), ValueKind::Int, "{key:?} is not an int property");
        let raw = self.get(key.name()).filter(|value| !value.trim().is_empty())?;
        let parsed = parse_int(&raw);
        if parsed.is_none() {
            warn!(property = key.name(), value = %raw, "Ignoring non-integer property value");
        }
        parsed
    }

    fn float(&self, key: PropertyKey) -> Option<f64> {
        debug_assert_eq!(key.kind(), ValueKind::Float, "{key:?} is not a float property");
        let raw = self.get(key.name()).filter(|value| !value.trim().is_empty())?;
        let parsed = parse_float(&raw);
        if parsed.is_none() {
            warn!(property = key.name(), value = %raw, "Ignoring non-numeric property value");
        }
        parsed
    }
}

/// Parse an integer, accepting a decimal value and truncating it.
pub fn parse_int(raw: &str) -> Option<i32> {
    let raw = raw.trim();
    raw.parse::<i32>().ok().or_else(|| {
        raw.parse::<f64>()
            .ok()
            .filter(|v| v.is_finite() && *v >= i32::MIN as f64 && *v <= i32::MAX as f64)
            .map(|v| v.trunc() as i32)
    })
}

/// Parse a number, accepting `"1.5"`, `"16:9"` and `"16/9"`.
pub fn parse_float(raw: &str) -> Option<f64> {
    let raw = raw.trim();
    let value = match raw.split_once([':', '/']) {
        Some((num, den)) => {
            let num: f64 = num.trim().parse().ok()?;
            let den: f64 = den.trim().parse().ok()?;
            if den == 0.0 {
                return None;
            }
            num / den
        }
        None => raw.parse().ok()?,
    };
    value.is_finite().then_some(value)
}
