//! Input binding: slider and shot-count values, and the label text they drive.

use std::f64::consts::PI;
use std::fmt;

use crate::api::{NoiseAnalysisRequest, SimulateRequest};
use crate::error::ClientError;

/// Angle of the state to teleport, in radians.
pub const DEFAULT_PSI_ANGLE: f64 = 0.78;
pub const DEFAULT_NOISE_LEVEL: f64 = 0.0;
pub const DEFAULT_SHOTS: u32 = 1024;

/// Label shown next to the angle slider after a reset.
pub const RESET_ANGLE_LABEL: &str = "0.78 rad (45.0°)";
/// Label shown next to the noise slider after a reset.
pub const RESET_NOISE_LABEL: &str = "0.00 (Perfect)";

/// Shot counts offered by the page.
pub const SHOT_CHOICES: &[u32] = &[256, 512, 1024, 2048, 4096];

/// Slider ranges as rendered by the page: (min, max, step).
pub const ANGLE_RANGE: (f64, f64, f64) = (0.0, PI, 0.01);
pub const NOISE_RANGE: (f64, f64, f64) = (0.0, 0.5, 0.01);

/// Coarse quality bucket for a noise level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoiseQuality {
    Perfect,
    Good,
    Fair,
    Poor,
}

impl NoiseQuality {
    pub fn classify(noise: f64) -> Self {
        if noise == 0.0 {
            NoiseQuality::Perfect
        } else if noise < 0.1 {
            NoiseQuality::Good
        } else if noise < 0.3 {
            NoiseQuality::Fair
        } else {
            NoiseQuality::Poor
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            NoiseQuality::Perfect => "Perfect",
            NoiseQuality::Good => "Good",
            NoiseQuality::Fair => "Fair",
            NoiseQuality::Poor => "Poor",
        }
    }
}

impl fmt::Display for NoiseQuality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Angle label, e.g. `0.78 rad (44.7°)`.
pub fn angle_label(angle: f64) -> String {
    let degrees = angle * 180.0 / PI;
    format!("{:.2} rad ({:.1}°)", angle, degrees)
}

/// Noise label, e.g. `0.15 (Fair)`.
pub fn noise_label(noise: f64) -> String {
    format!("{:.2} ({})", noise, NoiseQuality::classify(noise))
}

/// Parse the raw value of a range input.
pub fn parse_slider(text: &str) -> Result<f64, ClientError> {
    let value: f64 = text
        .trim()
        .parse()
        .map_err(|_| ClientError::InvalidInput(format!("'{}' is not a number", text)))?;
    if !value.is_finite() {
        return Err(ClientError::InvalidInput(format!(
            "'{}' is not a finite number",
            text
        )));
    }
    Ok(value)
}

/// Parse the raw value of the shots control.
pub fn parse_shots(text: &str) -> Result<u32, ClientError> {
    match text.trim().parse::<u32>() {
        Ok(0) => Err(ClientError::InvalidInput(
            "shots must be at least 1".to_string(),
        )),
        Ok(n) => Ok(n),
        Err(_) => Err(ClientError::InvalidInput(format!(
            "'{}' is not a shot count",
            text
        ))),
    }
}

/// Current values of the page controls.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControlParams {
    pub psi_angle: f64,
    pub noise_level: f64,
    pub shots: u32,
}

impl Default for ControlParams {
    fn default() -> Self {
        Self {
            psi_angle: DEFAULT_PSI_ANGLE,
            noise_level: DEFAULT_NOISE_LEVEL,
            shots: DEFAULT_SHOTS,
        }
    }
}

impl ControlParams {
    pub fn simulate_request(&self) -> SimulateRequest {
        SimulateRequest {
            psi_angle: self.psi_angle,
            noise_level: self.noise_level,
            shots: self.shots,
        }
    }

    pub fn noise_analysis_request(&self) -> NoiseAnalysisRequest {
        NoiseAnalysisRequest {
            psi_angle: self.psi_angle,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_angle_label() {
        assert_eq!(angle_label(0.78), "0.78 rad (44.7°)");
        assert_eq!(angle_label(0.0), "0.00 rad (0.0°)");
        assert_eq!(angle_label(PI / 2.0), "1.57 rad (90.0°)");
    }

    #[test]
    fn test_noise_quality_thresholds() {
        assert_eq!(NoiseQuality::classify(0.0), NoiseQuality::Perfect);
        assert_eq!(NoiseQuality::classify(0.01), NoiseQuality::Good);
        assert_eq!(NoiseQuality::classify(0.09), NoiseQuality::Good);
        assert_eq!(NoiseQuality::classify(0.1), NoiseQuality::Fair);
        assert_eq!(NoiseQuality::classify(0.29), NoiseQuality::Fair);
        assert_eq!(NoiseQuality::classify(0.3), NoiseQuality::Poor);
        assert_eq!(NoiseQuality::classify(0.5), NoiseQuality::Poor);
    }

    #[test]
    fn test_noise_label() {
        assert_eq!(noise_label(0.0), RESET_NOISE_LABEL);
        assert_eq!(noise_label(0.05), "0.05 (Good)");
        assert_eq!(noise_label(0.2), "0.20 (Fair)");
        assert_eq!(noise_label(0.45), "0.45 (Poor)");
    }

    #[test]
    fn test_parse_slider() {
        assert_eq!(parse_slider("0.78").unwrap(), 0.78);
        assert_eq!(parse_slider(" 1 ").unwrap(), 1.0);
        assert!(matches!(
            parse_slider("abc"),
            Err(ClientError::InvalidInput(_))
        ));
        assert!(parse_slider("NaN").is_err());
    }

    #[test]
    fn test_parse_shots() {
        assert_eq!(parse_shots("1024").unwrap(), 1024);
        assert!(parse_shots("0").is_err());
        assert!(parse_shots("-5").is_err());
        assert!(parse_shots("1.5").is_err());
    }

    #[test]
    fn test_requests_carry_params() {
        let params = ControlParams {
            psi_angle: 1.2,
            noise_level: 0.1,
            shots: 512,
        };
        let sim = params.simulate_request();
        assert_eq!(sim.psi_angle, 1.2);
        assert_eq!(sim.noise_level, 0.1);
        assert_eq!(sim.shots, 512);
        assert_eq!(params.noise_analysis_request().psi_angle, 1.2);
    }

    #[test]
    fn test_defaults() {
        let params = ControlParams::default();
        assert_eq!(params.psi_angle, DEFAULT_PSI_ANGLE);
        assert_eq!(params.noise_level, 0.0);
        assert_eq!(params.shots, 1024);
        assert!(SHOT_CHOICES.contains(&DEFAULT_SHOTS));
    }
}
