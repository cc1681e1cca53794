use serde::{Deserialize, Serialize};

use crate::error::{MergeError, MergeResult};

/// How [`apply_resolutions`](crate::apply_resolutions) treats conflicts that
/// have no decision.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionMode {
    /// Every conflict must have a decision, otherwise the call fails.
    #[default]
    Strict,
    /// Undecided conflicts are left out of the final set.
    OmitUnresolved,
}

/// Policy knobs for a merge.
///
/// ```toml
/// prefer_newer = true
/// auto_merge_threshold_hours = 1.0
/// resolution_mode = "strict"
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MergeOptions {
    /// Auto-resolve conflicts in favor of the later `tested_date` when the
    /// two edits are further apart than the threshold.
    pub prefer_newer: bool,
    /// Minimum gap, exclusive, for auto-resolution.
    pub auto_merge_threshold_hours: f64,
    pub resolution_mode: ResolutionMode,
}

impl Default for MergeOptions {
    fn default() -> Self {
        Self {
            prefer_newer: true,
            auto_merge_threshold_hours: 1.0,
            resolution_mode: ResolutionMode::Strict,
        }
    }
}

impl MergeOptions {
    /// Never auto-resolve; every conflict goes to a human.
    pub fn manual() -> Self {
        Self {
            prefer_newer: false,
            ..Default::default()
        }
    }

    pub fn with_prefer_newer(mut self, prefer_newer: bool) -> Self {
        self.prefer_newer = prefer_newer;
        self
    }

    pub fn with_threshold_hours(mut self, hours: f64) -> Self {
        self.auto_merge_threshold_hours = hours;
        self
    }

    pub fn with_resolution_mode(mut self, mode: ResolutionMode) -> Self {
        self.resolution_mode = mode;
        self
    }

    /// Parse options from TOML. Missing keys keep their defaults.
    pub fn from_toml_str(s: &str) -> MergeResult<Self> {
        let options: Self = toml::from_str(s).map_err(|e| MergeError::Config(e.to_string()))?;
        options.validate()?;
        Ok(options)
    }

    pub fn validate(&self) -> MergeResult<()> {
        let hours = self.auto_merge_threshold_hours;
        if !hours.is_finite() || hours < 0.0 {
            return Err(MergeError::InvalidOptions(format!(
                "auto_merge_threshold_hours must be a non-negative number, got {hours}"
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_options() {
        let o = MergeOptions::default();
        assert!(o.prefer_newer);
        assert_eq!(o.auto_merge_threshold_hours, 1.0);
        assert_eq!(o.resolution_mode, ResolutionMode::Strict);
        assert!(o.validate().is_ok());
    }

    #[test]
    fn manual_disables_auto_merge() {
        assert!(!MergeOptions::manual().prefer_newer);
    }

    #[test]
    fn toml_partial_keeps_defaults() {
        let o = MergeOptions::from_toml_str("auto_merge_threshold_hours = 4.5").unwrap();
        assert_eq!(o.auto_merge_threshold_hours, 4.5);
        assert!(o.prefer_newer);
    }

    #[test]
    fn toml_full() {
        let o = MergeOptions::from_toml_str(
            "prefer_newer = false\nauto_merge_threshold_hours = 0.25\nresolution_mode = \"omit_unresolved\"\n",
        )
        .unwrap();
        assert!(!o.prefer_newer);
        assert_eq!(o.resolution_mode, ResolutionMode::OmitUnresolved);
    }

    #[test]
    fn toml_syntax_error() {
        let err = MergeOptions::from_toml_str("prefer_newer = ").unwrap_err();
        assert!(matches!(err, MergeError::Config(_)));
    }

    #[test]
    fn negative_threshold_rejected() {
        let err = MergeOptions::from_toml_str("auto_merge_threshold_hours = -1.0").unwrap_err();
        assert!(matches!(err, MergeError::InvalidOptions(_)));
        assert!(MergeOptions::default()
            .with_threshold_hours(f64::NAN)
            .validate()
            .is_err());
    }
}
