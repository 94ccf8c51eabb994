//! Optional clamps applied to camera state on every update.

/// An inclusive `[min, max]` clamp that can be switched off.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Range {
    pub enabled: bool,
    pub min: f32,
    pub max: f32,
}

impl Range {
    pub const fn new(min: f32, max: f32) -> Self {
        Self {
            enabled: true,
            min,
            max,
        }
    }

    pub const fn disabled() -> Self {
        Self {
            enabled: false,
            min: 0.0,
            max: 0.0,
        }
    }

    /// Returns `value` limited to the range, or unchanged when disabled.
    pub fn clamp(&self, value: f32) -> f32 {
        if !self.enabled {
            return value;
        }
        // Not f32::clamp: an inverted range must not panic.
        value.max(self.min).min(self.max)
    }

    pub fn contains(&self, value: f32) -> bool {
        !self.enabled || (value >= self.min && value <= self.max)
    }
}

impl Default for Range {
    fn default() -> Self {
        Self::disabled()
    }
}

/// Per-parameter limits of a [`Camera`](super::Camera).
///
/// The three scale axes share one range.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RangeLimits {
    pub x: Range,
    pub y: Range,
    pub z: Range,
    pub zoom: Range,
    pub yaw: Range,
    pub pitch: Range,
    pub scale: Range,
}

impl RangeLimits {
    /// No parameter is limited.
    pub fn unlimited() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_clamp() {
        let range = Range::new(-1.0, 2.0);
        assert_eq!(range.clamp(-5.0), -1.0);
        assert_eq!(range.clamp(5.0), 2.0);
        assert_eq!(range.clamp(0.5), 0.5);
        assert!(range.contains(2.0));
        assert!(!range.contains(2.5));
    }

    #[test]
    fn test_disabled_range_passes_through() {
        let range = Range::disabled();
        assert_eq!(range.clamp(1e6), 1e6);
        assert!(range.contains(f32::MIN));
    }

    #[test]
    fn test_inverted_range_does_not_panic() {
        let range = Range::new(3.0, 1.0);
        assert_eq!(range.clamp(2.0), 1.0);
    }
}
