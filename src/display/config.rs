// Session configuration
//
// Fixed values for one display session: surface size, depth, flags, title,
// circle placement constants and frame pacing. Can be described in TOML.

use super::circle::CircleBounds;
use super::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Color depths accepted for a surface request
pub const SUPPORTED_DEPTHS: [u8; 4] = [8, 16, 24, 32];

/// Depth of the native surface (RGBA, 8 bits per channel)
pub const NATIVE_DEPTH: u8 = 32;

/// Surface request flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurfaceFlags {
    /// Request a hardware-backed surface
    pub hardware: bool,
    /// Request double buffering (presented with vsync)
    pub double_buffered: bool,
    /// Accept the best available pixel format instead of the exact depth
    pub any_format: bool,
}

impl Default for SurfaceFlags {
    fn default() -> Self {
        Self {
            hardware: true,
            double_buffered: true,
            any_format: true,
        }
    }
}

/// Session configuration
///
/// Built once before the session starts and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Surface width in pixels
    pub width: u32,
    /// Surface height in pixels
    pub height: u32,
    /// Requested color depth in bits per pixel
    pub depth: u8,
    /// Surface request flags
    pub flags: SurfaceFlags,
    /// Window title
    pub title: String,
    /// Minimum distance between a circle center and the surface edges
    pub margin: u32,
    /// Smallest circle radius
    pub min_radius: u32,
    /// Largest circle radius
    pub max_radius: u32,
    /// Fixed delay at the end of every frame, in milliseconds
    pub frame_delay_ms: u64,
}

impl SessionConfig {
    /// Create a configuration with default values
    ///
    /// Default: 640x480, 16-bit depth, all flags set, 20ms frame delay
    pub fn new() -> Self {
        Self {
            width: 640,
            height: 480,
            depth: 16,
            flags: SurfaceFlags::default(),
            title: "Circles".to_string(),
            margin: 50,
            min_radius: 5,
            max_radius: 50,
            frame_delay_ms: 20,
        }
    }

    /// Set the surface size
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Set the requested color depth
    pub fn with_depth(mut self, depth: u8) -> Self {
        self.depth = depth;
        self
    }

    /// Set the surface flags
    pub fn with_flags(mut self, flags: SurfaceFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Set the window title
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Set the edge margin and radius range for circles
    pub fn with_circles(mut self, margin: u32, min_radius: u32, max_radius: u32) -> Self {
        self.margin = margin;
        self.min_radius = min_radius;
        self.max_radius = max_radius;
        self
    }

    /// Set the fixed per-frame delay
    ///
    /// The delay is stored in whole milliseconds: any sub-millisecond part is
    /// dropped, and delays too long to count in a `u64` saturate.
    pub fn with_frame_delay(mut self, delay: Duration) -> Self {
        self.frame_delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX);
        self
    }

    /// Get the per-frame delay
    pub fn frame_delay(&self) -> Duration {
        Duration::from_millis(self.frame_delay_ms)
    }

    /// Get the ranges circles are drawn from
    ///
    /// Centers keep `margin` pixels to the first and last pixel of each axis,
    /// so with `margin >= max_radius` every circle lies fully on the surface.
    pub fn circle_bounds(&self) -> CircleBounds {
        let last_x = self.width.saturating_sub(1);
        let last_y = self.height.saturating_sub(1);

        CircleBounds {
            x: self.margin as i32..=last_x.saturating_sub(self.margin) as i32,
            y: self.margin as i32..=last_y.saturating_sub(self.margin) as i32,
            radius: self.min_radius..=self.max_radius,
        }
    }

    /// Check every invariant the session relies on
    ///
    /// # Returns
    /// `Ok(())` if the configuration can be used to start a session
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::invalid(
                "width/height",
                format!("must be non-zero, got {}x{}", self.width, self.height),
            ));
        }

        if !SUPPORTED_DEPTHS.contains(&self.depth) {
            return Err(ConfigError::invalid(
                "depth",
                format!("{} is not one of {:?}", self.depth, SUPPORTED_DEPTHS),
            ));
        }

        if self.depth != NATIVE_DEPTH && !self.flags.any_format {
            return Err(ConfigError::invalid(
                "depth",
                format!(
                    "{}-bit surfaces need the any_format flag (native depth is {})",
                    self.depth, NATIVE_DEPTH
                ),
            ));
        }

        if self.min_radius == 0 || self.min_radius > self.max_radius {
            return Err(ConfigError::invalid(
                "min_radius/max_radius",
                format!(
                    "expected 0 < min <= max, got {}..={}",
                    self.min_radius, self.max_radius
                ),
            ));
        }

        if self.margin < self.max_radius {
            return Err(ConfigError::invalid(
                "margin",
                format!(
                    "{} is smaller than max_radius {}",
                    self.margin, self.max_radius
                ),
            ));
        }

        // Centers need at least one column and row between the margins
        if self.margin.saturating_mul(2) >= self.width.min(self.height) {
            return Err(ConfigError::invalid(
                "margin",
                format!(
                    "{} leaves no room on a {}x{} surface",
                    self.margin, self.width, self.height
                ),
            ));
        }

        Ok(())
    }

    /// Parse a configuration from TOML and validate it
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: SessionConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration from a TOML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Serialize the configuration to TOML
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SessionConfig::new();
        assert_eq!(config.width, 640);
        assert_eq!(config.height, 480);
        assert_eq!(config.depth, 16);
        assert!(config.flags.hardware);
        assert!(config.flags.double_buffered);
        assert!(config.flags.any_format);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_builder() {
        let config = SessionConfig::new()
            .with_size(320, 240)
            .with_depth(32)
            .with_title("Test")
            .with_circles(20, 2, 10)
            .with_frame_delay(Duration::ZERO);

        assert_eq!(config.width, 320);
        assert_eq!(config.height, 240);
        assert_eq!(config.depth, 32);
        assert_eq!(config.title, "Test");
        assert_eq!(config.frame_delay(), Duration::ZERO);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_frame_delay() {
        let config = SessionConfig::new();
        assert_eq!(config.frame_delay().as_millis(), 20);
    }

    #[test]
    fn test_frame_delay_whole_milliseconds() {
        let config = SessionConfig::new().with_frame_delay(Duration::from_micros(2_900));
        assert_eq!(config.frame_delay_ms, 2);

        let config = SessionConfig::new().with_frame_delay(Duration::MAX);
        assert_eq!(config.frame_delay_ms, u64::MAX);
    }

    #[test]
    fn test_circle_bounds() {
        let bounds = SessionConfig::new().circle_bounds();
        assert_eq!(bounds.x, 50..=589);
        assert_eq!(bounds.y, 50..=429);
        assert_eq!(bounds.radius, 5..=50);
    }

    #[test]
    fn test_extreme_circles_are_not_clipped() {
        use crate::display::{Circle, Rgba, Surface};

        let config = SessionConfig::new();
        let bounds = config.circle_bounds();
        let r = *bounds.radius.end();
        let color = Rgba::new(0xFF, 0xFF, 0xFF, 0xFF);

        let mut reference = Surface::new(config.width, config.height);
        let full = reference.fill_circle(&Circle::new(320, 240, r, color));

        for (x, y) in [
            (*bounds.x.start(), *bounds.y.start()),
            (*bounds.x.end(), *bounds.y.start()),
            (*bounds.x.start(), *bounds.y.end()),
            (*bounds.x.end(), *bounds.y.end()),
        ] {
            let mut surface = Surface::new(config.width, config.height);
            let written = surface.fill_circle(&Circle::new(x, y, r, color));
            assert_eq!(written, full, "circle at ({}, {}) was clipped", x, y);
        }
    }

    #[test]
    fn test_smallest_surface_for_margin() {
        let config = SessionConfig::new().with_size(101, 101);
        assert!(config.validate().is_ok());
        assert_eq!(config.circle_bounds().x, 50..=50);

        let config = SessionConfig::new().with_size(100, 101);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_size_rejected() {
        let config = SessionConfig::new().with_size(0, 480);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_unsupported_depth_rejected() {
        let config = SessionConfig::new().with_depth(12);
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("depth"));
    }

    #[test]
    fn test_exact_depth_without_any_format() {
        let flags = SurfaceFlags {
            any_format: false,
            ..SurfaceFlags::default()
        };

        let config = SessionConfig::new().with_flags(flags);
        assert!(config.validate().is_err());

        let config = config.with_depth(NATIVE_DEPTH);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_radius_range_rejected() {
        assert!(SessionConfig::new()
            .with_circles(50, 0, 10)
            .validate()
            .is_err());
        assert!(SessionConfig::new()
            .with_circles(50, 20, 10)
            .validate()
            .is_err());
    }

    #[test]
    fn test_margin_must_fit_largest_circle() {
        let config = SessionConfig::new().with_circles(10, 5, 40);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_margin_must_leave_room() {
        let config = SessionConfig::new().with_size(100, 60).with_circles(40, 5, 20);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_serialization() {
        let config = SessionConfig::new().with_title("Round trip");
        let toml_str = config.to_toml_string().expect("Failed to serialize");
        let deserialized = SessionConfig::from_toml_str(&toml_str).expect("Failed to parse");
        assert_eq!(config, deserialized);
    }

    #[test]
    fn test_invalid_toml_rejected() {
        let toml_str = SessionConfig::new()
            .with_size(0, 0)
            .to_toml_string()
            .unwrap();
        assert!(SessionConfig::from_toml_str(&toml_str).is_err());
        assert!(SessionConfig::from_toml_str("width = \"wide\"").is_err());
    }
}
