//! Output profile configuration.
//!
//! The profile fixes the frame rate and display geometry that producers are
//! rendered into. It supplies the default aspect ratio and the audio
//! samples-per-frame used for level analysis.

use num_rational::Rational64;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{ClipviewError, Result};

/// Video output profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    /// Human-readable name
    #[serde(default)]
    pub description: String,
    pub width: u32,
    pub height: u32,
    pub frame_rate_num: u32,
    pub frame_rate_den: u32,
    /// Sample (pixel) aspect ratio
    #[serde(default = "one")]
    pub sample_aspect_num: u32,
    #[serde(default = "one")]
    pub sample_aspect_den: u32,
}

fn one() -> u32 {
    1
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            description: "HD 1080p 25 fps".to_string(),
            width: 1920,
            height: 1080,
            frame_rate_num: 25,
            frame_rate_den: 1,
            sample_aspect_num: 1,
            sample_aspect_den: 1,
        }
    }
}

impl Profile {
    /// Create a square-pixel profile.
    pub fn new(width: u32, height: u32, frame_rate_num: u32, frame_rate_den: u32) -> Self {
        Self {
            description: format!("{width}x{height}"),
            width,
            height,
            frame_rate_num,
            frame_rate_den,
            sample_aspect_num: 1,
            sample_aspect_den: 1,
        }
    }

    /// Reject profiles that would divide by zero.
    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("width", self.width),
            ("height", self.height),
            ("frame_rate_num", self.frame_rate_num),
            ("frame_rate_den", self.frame_rate_den),
            ("sample_aspect_num", self.sample_aspect_num),
            ("sample_aspect_den", self.sample_aspect_den),
        ];
        for (name, value) in fields {
            if value == 0 {
                return Err(ClipviewError::InvalidParameter(format!(
                    "Profile {name} must be non-zero"
                )));
            }
        }
        Ok(())
    }

    /// Display aspect ratio as an exact fraction.
    pub fn display_aspect(&self) -> Rational64 {
        if self.height == 0 || self.sample_aspect_den == 0 {
            return Rational64::from_integer(1);
        }
        Rational64::new(
            self.width as i64 * self.sample_aspect_num as i64,
            self.height as i64 * self.sample_aspect_den as i64,
        )
    }

    /// Display aspect ratio as a float.
    pub fn display_aspect_ratio(&self) -> f64 {
        let dar = self.display_aspect();
        *dar.numer() as f64 / *dar.denom() as f64
    }

    /// Frames per second as a float.
    pub fn fps(&self) -> f64 {
        if self.frame_rate_den == 0 {
            return 0.0;
        }
        self.frame_rate_num as f64 / self.frame_rate_den as f64
    }

    /// Audio samples per video frame (per channel), rounded up.
    pub fn samples_per_frame(&self, sample_rate: u32) -> usize {
        if self.frame_rate_num == 0 {
            return 0;
        }
        let per_frame = Rational64::new(
            sample_rate as i64 * self.frame_rate_den as i64,
            self.frame_rate_num as i64,
        );
        per_frame.ceil().to_integer().max(0) as usize
    }

    /// Parse a profile from JSON bytes.
    pub fn from_json(data: &[u8]) -> Result<Self> {
        let profile: Self = serde_json::from_slice(data)
            .map_err(|e| ClipviewError::Serialization(format!("Invalid profile: {}", e)))?;
        profile.validate()?;
        Ok(profile)
    }

    /// Serialize to JSON bytes.
    pub fn to_json(&self) -> Result<Vec<u8>> {
        serde_json::to_vec_pretty(self)
            .map_err(|e| ClipviewError::Serialization(format!("Failed to serialize profile: {}", e)))
    }

    /// Load a profile from a file path.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(ClipviewError::NotFound(path.display().to_string()));
        }
        let data = std::fs::read(path)?;
        Self::from_json(&data)
    }

    /// Save the profile to a file path.
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }
}
