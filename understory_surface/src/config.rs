// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::time::Duration;

use peniko::Color;
use understory_batch::BatchPolicy;
use understory_painter::StrokeStyle;
use understory_precise_hit::{DEFAULT_STROKE_TOLERANCE, DistanceMode, HitParams};

/// Errors reported by [`SurfaceConfig::validate`].
#[derive(Clone, Copy, Debug, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// Hit tolerance was negative or not finite.
    #[error("hit tolerance must be finite and >= 0, got {0}")]
    InvalidTolerance(f64),
    /// Line width was not positive or not finite.
    #[error("line width must be finite and > 0, got {0}")]
    InvalidLineWidth(f64),
    /// A time-boxed batch policy had a zero budget.
    #[error("time-boxed batches need a non-zero duration")]
    ZeroBatchDuration,
    /// A scale extent bound was not positive or not finite.
    #[error("scale extent [{min}, {max}] must be finite and > 0")]
    InvalidScaleExtent {
        /// Lower bound as given.
        min: f64,
        /// Upper bound as given.
        max: f64,
    },
}

/// Stroke styles of the highlight overlay.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OverlayStyle {
    /// Circle drawn around the pointer.
    pub pointer: StrokeStyle,
    /// Rectangle drawn around the matched segments.
    pub matches: StrokeStyle,
}

impl Default for OverlayStyle {
    fn default() -> Self {
        Self {
            pointer: StrokeStyle::new(Color::BLACK, 1.0),
            matches: StrokeStyle::new(Color::from_rgba8(255, 0, 255, 255), 1.0),
        }
    }
}

/// Configuration of an [`InteractiveSurface`](crate::InteractiveSurface).
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SurfaceConfig {
    /// Pointer hit radius in surface pixels.
    pub hit_tolerance: f64,
    /// Distance measure used for hit testing.
    pub distance_mode: DistanceMode,
    /// How render passes are split into batches.
    pub batch_policy: BatchPolicy,
    /// Segment stroke width in surface pixels.
    pub line_width: f64,
    /// Optional `(min, max)` clamp for the zoom scale.
    pub scale_extent: Option<(f64, f64)>,
    /// Overlay colors and widths.
    #[cfg_attr(feature = "serde", serde(skip))]
    pub overlay_style: OverlayStyle,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            hit_tolerance: DEFAULT_STROKE_TOLERANCE,
            distance_mode: DistanceMode::default(),
            batch_policy: BatchPolicy::default(),
            line_width: 1.0,
            scale_extent: None,
            overlay_style: OverlayStyle::default(),
        }
    }
}

impl SurfaceConfig {
    /// Checks every field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.hit_tolerance.is_finite() && self.hit_tolerance >= 0.0) {
            return Err(ConfigError::InvalidTolerance(self.hit_tolerance));
        }
        if !(self.line_width.is_finite() && self.line_width > 0.0) {
            return Err(ConfigError::InvalidLineWidth(self.line_width));
        }
        if self.batch_policy == BatchPolicy::TimeBoxed(Duration::ZERO) {
            return Err(ConfigError::ZeroBatchDuration);
        }
        if let Some((min, max)) = self.scale_extent {
            if !(min.is_finite() && max.is_finite() && min > 0.0 && max > 0.0) {
                return Err(ConfigError::InvalidScaleExtent { min, max });
            }
        }
        Ok(())
    }

    /// Hit-test parameters derived from this configuration.
    pub fn hit_params(&self) -> HitParams {
        HitParams {
            stroke_tolerance: self.hit_tolerance,
            distance_mode: self.distance_mode,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use understory_batch::BatchPolicy;

    use super::{ConfigError, SurfaceConfig};

    #[test]
    fn default_is_valid() {
        let cfg = SurfaceConfig::default();
        assert_eq!(cfg.validate(), Ok(()));
        assert_eq!(cfg.hit_params().stroke_tolerance, 5.0);
    }

    #[test]
    fn rejects_bad_values() {
        let bad = SurfaceConfig {
            hit_tolerance: -1.0,
            ..SurfaceConfig::default()
        };
        assert_eq!(bad.validate(), Err(ConfigError::InvalidTolerance(-1.0)));

        let bad = SurfaceConfig {
            line_width: 0.0,
            ..SurfaceConfig::default()
        };
        assert_eq!(bad.validate(), Err(ConfigError::InvalidLineWidth(0.0)));

        let bad = SurfaceConfig {
            batch_policy: BatchPolicy::TimeBoxed(Duration::ZERO),
            ..SurfaceConfig::default()
        };
        assert_eq!(bad.validate(), Err(ConfigError::ZeroBatchDuration));

        let bad = SurfaceConfig {
            scale_extent: Some((0.0, 4.0)),
            ..SurfaceConfig::default()
        };
        assert!(matches!(
            bad.validate(),
            Err(ConfigError::InvalidScaleExtent { .. })
        ));
    }

    #[test]
    fn error_messages_name_the_value() {
        let msg = ConfigError::InvalidLineWidth(-2.0).to_string();
        assert!(msg.contains("-2"));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn deserializes_partial_config() {
        let cfg: SurfaceConfig =
            serde_json::from_str(r#"{ "hit_tolerance": 8.0, "distance_mode": "InfiniteLine" }"#)
                .unwrap();
        assert_eq!(cfg.hit_tolerance, 8.0);
        assert_eq!(cfg.line_width, 1.0);
        assert_eq!(cfg.validate(), Ok(()));
    }
}
