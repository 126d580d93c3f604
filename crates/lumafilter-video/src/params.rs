use lumafilter_imgproc::filter::BlurMode;
use serde::{Deserialize, Serialize};

use crate::error::VideoFilterError;

/// Lower bound of every sigma property.
pub const SIGMA_MIN: f64 = 0.0;

/// Upper bound of every sigma property.
pub const SIGMA_MAX: f64 = 100.0;

/// Sigma change applied by a single key press.
pub const SIGMA_STEP: f64 = 0.5;

/// Check that a sigma lies within `[SIGMA_MIN, SIGMA_MAX]`.
pub fn check_sigma(name: &str, value: f64) -> Result<(), VideoFilterError> {
    if !(SIGMA_MIN..=SIGMA_MAX).contains(&value) {
        return Err(VideoFilterError::PropertyOutOfRange {
            name: name.to_string(),
            value,
            min: SIGMA_MIN,
            max: SIGMA_MAX,
        });
    }
    Ok(())
}

/// Parameters of the gaussian low/high-pass filter.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlurParams {
    /// Sigma of the gaussian.
    pub sigma: f64,
    /// Which output the filter produces.
    pub mode: BlurMode,
}

impl Default for BlurParams {
    fn default() -> Self {
        Self {
            sigma: 0.0,
            mode: BlurMode::Off,
        }
    }
}

impl BlurParams {
    /// Check that the parameters are within bounds.
    pub fn validate(&self) -> Result<(), VideoFilterError> {
        check_sigma("sigma", self.sigma)
    }

    /// Parse and validate a JSON preset.
    ///
    /// Missing fields keep their default value.
    ///
    /// # Example
    ///
    /// ```
    /// use lumafilter_video::params::BlurParams;
    ///
    /// let params = BlurParams::from_json(r#"{ "sigma": 1.5, "mode": "high_pass" }"#).unwrap();
    /// assert_eq!(params.sigma, 1.5);
    /// ```
    pub fn from_json(s: &str) -> Result<Self, VideoFilterError> {
        let params: Self = serde_json::from_str(s)?;
        params.validate()?;
        Ok(params)
    }
}

/// Parameters of the separable bilateral filter.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BilateralParams {
    /// Sigma of the domain kernel.
    pub sigma_d: f64,
    /// Sigma of the range gaussian.
    pub sigma_r: f64,
    /// Whether the filter is applied.
    pub filtering: bool,
}

impl Default for BilateralParams {
    fn default() -> Self {
        Self {
            sigma_d: 2.0,
            sigma_r: 25.0,
            filtering: false,
        }
    }
}

impl BilateralParams {
    /// Check that the parameters are within bounds.
    pub fn validate(&self) -> Result<(), VideoFilterError> {
        check_sigma("sigmad", self.sigma_d)?;
        check_sigma("sigmar", self.sigma_r)
    }

    /// Parse and validate a JSON preset.
    ///
    /// Missing fields keep their default value.
    pub fn from_json(s: &str) -> Result<Self, VideoFilterError> {
        let params: Self = serde_json::from_str(s)?;
        params.validate()?;
        Ok(params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        assert_eq!(BlurParams::default().mode, BlurMode::Off);
        assert_eq!(BlurParams::default().sigma, 0.0);

        let bilateral = BilateralParams::default();
        assert_eq!(bilateral.sigma_d, 2.0);
        assert_eq!(bilateral.sigma_r, 25.0);
        assert!(!bilateral.filtering);
    }

    #[test]
    fn json_presets() -> Result<(), VideoFilterError> {
        let blur = BlurParams::from_json(r#"{ "sigma": 2.5, "mode": "low_pass" }"#)?;
        assert_eq!(
            blur,
            BlurParams {
                sigma: 2.5,
                mode: BlurMode::LowPass
            }
        );

        let bilateral = BilateralParams::from_json(r#"{ "filtering": true }"#)?;
        assert!(bilateral.filtering);
        assert_eq!(bilateral.sigma_d, 2.0);
        Ok(())
    }

    #[test]
    fn json_out_of_range() {
        let res = BilateralParams::from_json(r#"{ "sigma_r": 250.0 }"#);
        assert!(matches!(
            res,
            Err(VideoFilterError::PropertyOutOfRange { ref name, .. }) if name == "sigmar"
        ));
        assert!(matches!(
            BlurParams::from_json("{ sigma: 1 }"),
            Err(VideoFilterError::ConfigError(_))
        ));
    }
}
