//! Snapping configuration.

use crate::error::{SnapError, SnapResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default distance threshold for a snap, in world units.
pub const DEFAULT_SNAP_THRESHOLD: f64 = 5.0;

/// Where the Y offset reads its target coordinate from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum YOffsetSource {
    /// Read the Y snap's own target.
    #[default]
    Corrected,
    /// Read the X snap's target for the Y delta, as older scenes did.
    /// Yields no Y offset when there is no X snap.
    Legacy,
}

/// What happens when a drag starts while another is still live.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RestartPolicy {
    /// Drop the live session and start a new one.
    #[default]
    Replace,
    /// Refuse the new drag with `SnapError::DragAlreadyActive`.
    Reject,
}

/// Tunable snapping behavior.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnapConfig {
    /// Maximum distance (exclusive) at which two anchors snap.
    pub threshold: f64,
    /// Source of the Y target coordinate when computing offsets.
    pub y_offset_source: YOffsetSource,
    /// Behavior of a drag start during a live drag.
    pub restart_policy: RestartPolicy,
    /// Apply snap corrections while dragging.
    pub snap_while_dragging: bool,
}

impl Default for SnapConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_SNAP_THRESHOLD,
            y_offset_source: YOffsetSource::default(),
            restart_policy: RestartPolicy::default(),
            snap_while_dragging: false,
        }
    }
}

impl SnapConfig {
    /// Parse a config from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> SnapResult<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| SnapError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize the config to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Check that the threshold is a non-negative number.
    pub fn validate(&self) -> SnapResult<()> {
        if self.threshold.is_finite() && self.threshold >= 0.0 {
            Ok(())
        } else {
            Err(SnapError::Config(format!(
                "threshold must be a non-negative number, got {}",
                self.threshold
            )))
        }
    }

    /// Load a config file.
    pub fn load(path: impl AsRef<Path>) -> SnapResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .map_err(|e| SnapError::Config(format!("{}: {}", path.display(), e)))?;
        let config = Self::from_json(&json).map_err(|e| match e {
            SnapError::Config(msg) => SnapError::Config(format!("{}: {}", path.display(), msg)),
            other => other,
        })?;
        log::debug!("Loaded snap config from {}", path.display());
        Ok(config)
    }
}
