//! Indexed image dataset with an optional preprocessing pipeline.
//!
//! Rows are stored as three parallel columns (`ids`, `imgs`, `labels`).
//! [`TaskDataset::get`] applies the configured [`Transform`]s and returns the
//! image as a channel-first `f32` tensor scaled to `[0, 1]`.

use image::imageops::FilterType;
use image::DynamicImage;

use crate::error::{Error, Result};

/// Side length of the default resize step.
pub const DEFAULT_SIDE: u32 = 32;

/// A single image preprocessing step.
pub trait Transform {
    fn apply(&self, img: DynamicImage) -> DynamicImage;
}

/// Resizes to exactly `width × height`, ignoring aspect ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resize {
    pub width: u32,
    pub height: u32,
}

impl Resize {
    pub fn square(side: u32) -> Self {
        Self {
            width: side,
            height: side,
        }
    }
}

impl Transform for Resize {
    fn apply(&self, img: DynamicImage) -> DynamicImage {
        if img.width() == self.width && img.height() == self.height {
            return img;
        }
        img.resize_exact(self.width, self.height, FilterType::Triangle)
    }
}

/// Drops alpha and expands grayscale to three channels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ToRgb;

impl Transform for ToRgb {
    fn apply(&self, img: DynamicImage) -> DynamicImage {
        match img {
            DynamicImage::ImageRgb8(_) => img,
            other => DynamicImage::ImageRgb8(other.to_rgb8()),
        }
    }
}

/// Ordered list of transforms.
#[derive(Default)]
pub struct Pipeline {
    steps: Vec<Box<dyn Transform>>,
}

impl Pipeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn then(mut self, step: impl Transform + 'static) -> Self {
        self.steps.push(Box::new(step));
        self
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

impl Transform for Pipeline {
    fn apply(&self, img: DynamicImage) -> DynamicImage {
        self.steps.iter().fold(img, |img, step| step.apply(img))
    }
}

/// Resize to 32×32, then convert to RGB.
pub fn default_pipeline() -> Pipeline {
    Pipeline::new().then(Resize::square(DEFAULT_SIDE)).then(ToRgb)
}

/// Channel-first image tensor with values in `[0, 1]`.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageTensor {
    pub channels: usize,
    pub height: usize,
    pub width: usize,
    pub data: Vec<f32>,
}

impl ImageTensor {
    pub fn from_image(img: &DynamicImage) -> Self {
        let (width, height) = (img.width() as usize, img.height() as usize);
        let channels = img.color().channel_count() as usize;
        let raw = match channels {
            1 => img.to_luma8().into_raw(),
            2 => img.to_luma_alpha8().into_raw(),
            4 => img.to_rgba8().into_raw(),
            _ => img.to_rgb8().into_raw(),
        };
        let channels = if channels == 3 || channels > 4 { 3 } else { channels };

        let plane = width * height;
        let mut data = vec![0.0f32; channels * plane];
        for (i, px) in raw.chunks_exact(channels).enumerate() {
            for (c, &v) in px.iter().enumerate() {
                data[c * plane + i] = v as f32 / 255.0;
            }
        }

        Self {
            channels,
            height,
            width,
            data,
        }
    }

    pub fn shape(&self) -> [usize; 3] {
        [self.channels, self.height, self.width]
    }

    /// Value at channel `c`, row `y`, column `x`.
    pub fn at(&self, c: usize, y: usize, x: usize) -> Option<f32> {
        if c >= self.channels || y >= self.height || x >= self.width {
            return None;
        }
        self.data.get(c * self.height * self.width + y * self.width + x).copied()
    }
}

/// A dataset row after preprocessing.
pub type Sample = (i64, ImageTensor, i64);

pub struct TaskDataset {
    ids: Vec<i64>,
    imgs: Vec<DynamicImage>,
    labels: Vec<i64>,
    transform: Option<Box<dyn Transform>>,
}

impl TaskDataset {
    /// Empty dataset with the given preprocessing.
    pub fn new(transform: Option<Box<dyn Transform>>) -> Self {
        Self {
            ids: Vec::new(),
            imgs: Vec::new(),
            labels: Vec::new(),
            transform,
        }
    }

    /// Empty dataset using [`default_pipeline`].
    pub fn with_default_pipeline() -> Self {
        Self::new(Some(Box::new(default_pipeline())))
    }

    pub fn from_columns(
        ids: Vec<i64>,
        imgs: Vec<DynamicImage>,
        labels: Vec<i64>,
        transform: Option<Box<dyn Transform>>,
    ) -> Result<Self> {
        if ids.len() != imgs.len() || imgs.len() != labels.len() {
            return Err(Error::ColumnMismatch {
                ids: ids.len(),
                imgs: imgs.len(),
                labels: labels.len(),
            });
        }
        Ok(Self {
            ids,
            imgs,
            labels,
            transform,
        })
    }

    pub fn push(&mut self, id: i64, img: DynamicImage, label: i64) {
        self.ids.push(id);
        self.imgs.push(img);
        self.labels.push(label);
    }

    pub fn set_transform(&mut self, transform: Option<Box<dyn Transform>>) {
        self.transform = transform;
    }

    pub fn get(&self, index: usize) -> Result<Sample> {
        let img = self.imgs.get(index).ok_or(Error::IndexOutOfBounds {
            index,
            len: self.len(),
        })?;

        let img = match &self.transform {
            Some(t) => t.apply(img.clone()),
            None => img.clone(),
        };
        Ok((self.ids[index], ImageTensor::from_image(&img), self.labels[index]))
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = Result<Sample>> + '_ {
        (0..self.len()).map(move |i| self.get(i))
    }
}
