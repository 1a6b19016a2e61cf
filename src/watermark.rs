//! Toy watermarking: additive Gaussian noise over an RGB image.

use std::path::Path;

use image::RgbImage;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal};
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::error::{Error, Result};

/// Noise settings for [`add_watermark_with`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WatermarkConfig {
    /// Standard deviation of the noise, in normalized `[0, 1]` intensity units.
    pub sigma: f32,
    /// Fixed RNG seed; `None` draws from entropy.
    pub seed: Option<u64>,
}

impl Default for WatermarkConfig {
    fn default() -> Self {
        Self {
            sigma: 0.5,
            seed: None,
        }
    }
}

/// Opens `path` and returns it with the default noise watermark applied.
pub fn add_watermark(path: impl AsRef<Path>) -> Result<RgbImage> {
    add_watermark_with(path, &WatermarkConfig::default())
}

pub fn add_watermark_with(path: impl AsRef<Path>, config: &WatermarkConfig) -> Result<RgbImage> {
    let path = path.as_ref();
    let img = image::open(path).map_err(|e| {
        error!(path = %path.display(), error = %e, "cannot read image");
        Error::from(e)
    })?;

    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let marked = apply_noise(&img.to_rgb8(), config.sigma, &mut rng)?;
    debug!(path = %path.display(), width = marked.width(), height = marked.height(), "watermarked");
    Ok(marked)
}

/// Adds `N(0, sigma)` to every channel of every pixel, clipping to the valid range.
pub fn apply_noise<R: Rng + ?Sized>(img: &RgbImage, sigma: f32, rng: &mut R) -> Result<RgbImage> {
    let normal = Normal::new(0.0f32, sigma)
        .map_err(|e| Error::InvalidParameter(format!("noise sigma {sigma}: {e}")))?;

    let mut out = img.clone();
    for channel in out.iter_mut() {
        let v = *channel as f32 / 255.0 + normal.sample(rng);
        *channel = (v.clamp(0.0, 1.0) * 255.0).round() as u8;
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    fn gradient(w: u32, h: u32) -> RgbImage {
        RgbImage::from_fn(w, h, |x, y| Rgb([(x * 10) as u8, (y * 10) as u8, 128]))
    }

    #[test]
    fn zero_sigma_is_identity() {
        let img = gradient(8, 6);
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(apply_noise(&img, 0.0, &mut rng).unwrap(), img);
    }

    #[test]
    fn noise_changes_pixels_and_keeps_shape() {
        let img = gradient(16, 16);
        let mut rng = StdRng::seed_from_u64(1);
        let out = apply_noise(&img, 0.5, &mut rng).unwrap();
        assert_eq!(out.dimensions(), img.dimensions());
        assert_ne!(out, img);
    }

    #[test]
    fn negative_sigma_is_rejected() {
        let mut rng = StdRng::seed_from_u64(2);
        assert!(matches!(
            apply_noise(&gradient(2, 2), -1.0, &mut rng),
            Err(Error::InvalidParameter(_))
        ));
    }

    #[test]
    fn watermark_from_file() {
        let path = std::env::temp_dir().join(format!("octospace-wm-{}.png", std::process::id()));
        gradient(12, 7).save(&path).unwrap();

        let config = WatermarkConfig {
            seed: Some(3),
            ..WatermarkConfig::default()
        };
        let a = add_watermark_with(&path, &config).unwrap();
        let b = add_watermark_with(&path, &config).unwrap();
        assert_eq!(a.dimensions(), (12, 7));
        assert_eq!(a, b);
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(add_watermark("/definitely/not/here.png").is_err());
    }
}
