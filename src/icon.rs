//! Icon loading with a cached placeholder fallback
//!
//! Icons are turned into square RGBA bitmaps of a fixed size. Anything that
//! goes wrong along the way (missing file, undecodable data, a URL nobody
//! can fetch) produces the orange placeholder instead, so a round is never
//! blocked on a broken icon.

use std::{collections::HashMap, path::PathBuf, sync::Arc};

use image::{DynamicImage, Rgba, RgbaImage, imageops::FilterType};
use thiserror::Error;

use crate::{catalog::IconReference, constants};

/// Errors that can occur while fetching an icon
#[derive(Error, Debug)]
pub enum Error {
    /// The reference is a URL and the source does not fetch remote icons
    #[error("remote icon {0} is not available offline")]
    Remote(String),
    /// The image could not be opened or decoded
    #[error("cannot load icon: {0}")]
    Image(#[from] image::ImageError),
}

/// Something that can produce the image behind an [`IconReference`]
pub trait IconSource {
    /// Fetches and decodes the image
    ///
    /// # Errors
    ///
    /// Returns an error if the image is unavailable or cannot be decoded.
    fn fetch(&self, reference: &IconReference) -> Result<DynamicImage, Error>;
}

/// Reads icon files from a directory; URLs are treated as unavailable
#[derive(Debug, Clone)]
pub struct LocalIconSource {
    dir: PathBuf,
}

impl LocalIconSource {
    /// Creates a source that resolves file names relative to `dir`
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl IconSource for LocalIconSource {
    fn fetch(&self, reference: &IconReference) -> Result<DynamicImage, Error> {
        if reference.is_remote() {
            return Err(Error::Remote(reference.as_str().to_owned()));
        }
        Ok(image::open(self.dir.join(reference.as_str()))?)
    }
}

/// Resolves icon references into bitmaps and remembers the results
#[derive(Debug)]
pub struct IconResolver<S = LocalIconSource> {
    source: S,
    size: u32,
    cache: HashMap<IconReference, Arc<RgbaImage>>,
}

impl<S: IconSource> IconResolver<S> {
    /// Creates a resolver producing `size`×`size` bitmaps
    pub fn new(source: S, size: u32) -> Self {
        Self {
            source,
            size,
            cache: HashMap::new(),
        }
    }

    /// Edge length of every bitmap produced
    pub fn size(&self) -> u32 {
        self.size
    }

    /// Returns the bitmap for `reference`, loading it on first use
    ///
    /// Failures are logged once and answered with the placeholder, which is
    /// cached like any other result.
    pub fn resolve(&mut self, reference: &IconReference) -> Arc<RgbaImage> {
        if let Some(bitmap) = self.cache.get(reference) {
            return Arc::clone(bitmap);
        }

        let bitmap = match self.source.fetch(reference) {
            Ok(image) => image
                .resize_exact(self.size, self.size, FilterType::Lanczos3)
                .to_rgba8(),
            Err(e) => {
                tracing::warn!(icon = reference.as_str(), error = %e, "using placeholder icon");
                placeholder(self.size)
            }
        };

        let bitmap = Arc::new(bitmap);
        self.cache.insert(reference.clone(), Arc::clone(&bitmap));
        bitmap
    }
}

/// A solid `#FF9900` square
pub fn placeholder(size: u32) -> RgbaImage {
    RgbaImage::from_pixel(size, size, Rgba(constants::icon::PLACEHOLDER_RGBA))
}

/// Whether `bitmap` is a solid placeholder rather than a loaded icon
pub fn is_placeholder(bitmap: &RgbaImage) -> bool {
    bitmap
        .pixels()
        .all(|pixel| pixel.0 == constants::icon::PLACEHOLDER_RGBA)
}

/// Short label for a service, drawn on top of placeholder icons
///
/// `AWS Lambda` becomes `LAM`, `Elastic Load Balancing` becomes `ELB`, and a
/// single word such as `Route53` becomes `ROU`.
pub fn abbreviation(name: &str) -> String {
    let words = name.split_whitespace().collect::<Vec<_>>();
    match words.as_slice() {
        [] => String::new(),
        [single] => single.chars().take(3).collect::<String>().to_uppercase(),
        [first, second, ..] if *first == "AWS" || *first == "Amazon" => {
            second.chars().take(3).collect::<String>().to_uppercase()
        }
        _ => words
            .iter()
            .filter(|word| !matches!(**word, "&" | "and" | "of" | "the"))
            .filter_map(|word| word.chars().next())
            .collect(),
    }
}
