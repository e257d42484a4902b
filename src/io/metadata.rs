//! YAML description written next to each rendered image

use crate::algorithm::executor::Artwork;
use crate::analysis::statistics::Analysis;
use crate::io::configuration::{EXTENT, IMAGE_EXTENSION, MAX_ZOOM, METADATA_EXTENSION};
use crate::io::error::{BitartError, Result};
use crate::io::palette::ColorMode;
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// URL-safe unpadded base64 of a string, used for file names and fingerprints
pub fn crunch64(text: &str) -> String {
    URL_SAFE_NO_PAD.encode(text.as_bytes())
}

/// Default image file name: the canonical text without whitespace, crunched
pub fn default_file_name(canonical: &str) -> String {
    let compact: String = canonical.chars().filter(|c| !c.is_whitespace()).collect();
    format!("{}.{IMAGE_EXTENSION}", crunch64(&compact))
}

/// Metadata path for an image: `.png` replaced by `.yaml`, otherwise `.yaml` appended
pub fn metadata_path(image_path: &Path) -> PathBuf {
    if image_path.extension().and_then(|e| e.to_str()) == Some(IMAGE_EXTENSION) {
        image_path.with_extension(METADATA_EXTENSION)
    } else {
        let mut name = image_path.as_os_str().to_os_string();
        name.push(".");
        name.push(METADATA_EXTENSION);
        PathBuf::from(name)
    }
}

/// Description of one rendered image
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Metadata {
    /// Human readable equation, `f(x,y) = ...`
    pub equation: String,
    /// Crunched YAML dump of the canonical text
    pub eqn_serialized: String,
    /// Requested expression depth
    pub depth: usize,
    /// Color mode used for rendering
    pub color_mode: ColorMode,
    /// Modulus the expression was wrapped in
    pub modulo: Option<u32>,
    /// Review problem kept as a diagnostic
    pub problem: Option<String>,
    /// Pixels per grid cell along each axis
    pub scale: u32,
    /// Grid side length in cells
    pub extent: usize,
    /// Value statistics of the grid
    #[serde(flatten)]
    pub statistics: Analysis,
}

impl Metadata {
    /// Describe an artwork rendered at `2^zoom` pixels per cell
    ///
    /// # Errors
    ///
    /// Returns `Metadata` if the canonical text cannot be dumped as YAML
    pub fn new(artwork: &Artwork, depth: usize, zoom: u32) -> Result<Self> {
        let canonical = artwork.expression.to_string();
        let scale = 1_u32 << zoom.min(MAX_ZOOM);
        Ok(Self {
            equation: format!("f(x,y) = {canonical}"),
            eqn_serialized: crunch64(&serde_yaml::to_string(&canonical)?),
            depth,
            color_mode: artwork.color_mode,
            modulo: artwork.modulus,
            problem: artwork.problem.map(|problem| problem.to_string()),
            scale,
            extent: EXTENT / scale as usize,
            statistics: artwork.analysis.clone(),
        })
    }

    /// Serialize as a YAML mapping
    ///
    /// # Errors
    ///
    /// Returns `Metadata` if serialization fails
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Write the YAML mapping to `path`
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write fails
    pub fn write(&self, path: &Path) -> Result<()> {
        let yaml = self.to_yaml()?;
        std::fs::write(path, yaml).map_err(|e| BitartError::FileSystem {
            path: path.to_path_buf(),
            operation: "write metadata",
            source: e,
        })
    }
}
