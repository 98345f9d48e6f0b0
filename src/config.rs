// Surface configuration

use crate::error::Error;
use std::path::PathBuf;
use std::time::Duration;

/// Knobs for the scratch surface and its window.
#[derive(Clone, Debug)]
pub struct ScratchConfig {
    /// Age after which a fade point is evicted (strictly older is evicted).
    pub fade_duration: Duration,

    /// Period of the recurring decay sweep.
    pub decay_interval: Duration,

    /// Gradient radius of the first point in a frame; later points grow by one pixel each.
    pub base_radius: f32,

    /// Pause before each point removal while a reset is draining the store.
    pub reset_step_delay: Duration,

    /// Only accept reset requests while decay is paused.
    pub reset_requires_paused_decay: bool,

    /// Window size in pixels.
    pub width: usize,
    pub height: usize,

    /// Hidden picture shown through the scratches.
    pub background_path: PathBuf,
}

impl Default for ScratchConfig {
    fn default() -> Self {
        Self {
            fade_duration: Duration::from_millis(250),
            decay_interval: Duration::from_millis(1),
            base_radius: 35.0,
            reset_step_delay: Duration::from_micros(7_500),
            reset_requires_paused_decay: true,
            width: 640,
            height: 480,
            background_path: PathBuf::from("assets/background.png"),
        }
    }
}

impl ScratchConfig {
    /// Validate configuration.
    pub fn validate(&self) -> Result<(), Error> {
        if self.decay_interval.is_zero() {
            return Err(Error::Config("decay_interval must be > 0".into()));
        }
        if !(self.base_radius.is_finite() && self.base_radius > 0.0) {
            return Err(Error::Config("base_radius must be a positive number".into()));
        }
        if self.width == 0 || self.height == 0 {
            return Err(Error::Config("window size must be non-zero".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_reference_behavior() {
        let config = ScratchConfig::default();
        assert_eq!(config.fade_duration, Duration::from_millis(250));
        assert_eq!(config.decay_interval, Duration::from_millis(1));
        assert_eq!(config.reset_step_delay, Duration::from_micros(7_500));
        assert_eq!(config.base_radius, 35.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_zero_interval() {
        let config = ScratchConfig { decay_interval: Duration::ZERO, ..Default::default() };
        assert!(matches!(config.validate(), Err(Error::Config(_))));
    }

    #[test]
    fn test_rejects_bad_radius_and_size() {
        let config = ScratchConfig { base_radius: 0.0, ..Default::default() };
        assert!(config.validate().is_err());

        let config = ScratchConfig { base_radius: f32::NAN, ..Default::default() };
        assert!(config.validate().is_err());

        let config = ScratchConfig { width: 0, ..Default::default() };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_fade_duration_is_allowed() {
        let config = ScratchConfig { fade_duration: Duration::ZERO, ..Default::default() };
        assert!(config.validate().is_ok());
    }
}
