//! Contents.json data model for the app icon set
//!
//! Mirrors the subset of Apple's asset catalog `Contents.json` schema that an
//! `.appiconset` needs. Entries are transcribed from the [`OutputSpec`] table;
//! nothing here looks at pixel data.

use crate::output_spec::{Idiom, OutputSpec};
use anyhow::{Context, Result};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Platform recorded on the universal (App Store) entry
pub const PLATFORM: &str = "ios";

/// Author recorded in the `info` block, kept as `xcode` for tooling compatibility
pub const AUTHOR: &str = "xcode";

/// File name Xcode expects for the manifest
pub const DEFAULT_MANIFEST_NAME: &str = "Contents.json";

/// Root structure of a Contents.json file
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ContentsFile {
    /// One entry per generated image, in table order
    pub images: Vec<ImageEntry>,

    /// Versioning and authorship information
    pub info: Info,
}

/// Individual image entry within the icon set
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ImageEntry {
    /// The PNG file name inside the icon set (e.g. `icon_60x60@2x.png`)
    pub filename: String,

    /// The device type (`universal`, `iphone`, `ipad`)
    pub idiom: String,

    /// Target platform; only set on the universal entry
    #[serde(skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,

    /// The scale factor (`1x`, `2x`, `3x`); absent for the universal entry
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scale: Option<String>,

    /// The size of the image in points (e.g. `60x60`)
    pub size: String,
}

/// Versioning and authorship information for the asset catalog
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Info {
    /// The tool that authored the catalog
    pub author: String,

    /// The format version of the asset catalog (always 1)
    pub version: u8,
}

impl Default for Info {
    fn default() -> Self {
        Self {
            author: AUTHOR.to_string(),
            version: 1,
        }
    }
}

impl ContentsFile {
    /// Creates an empty manifest with the standard `xcode` / version 1 info block
    pub fn new() -> Self {
        Self {
            images: Vec::new(),
            info: Info::default(),
        }
    }

    /// Appends an image entry, keeping insertion order
    ///
    /// # Arguments
    /// * `image` - The ImageEntry to add
    pub fn add_image(&mut self, image: ImageEntry) {
        self.images.push(image);
    }

    /// Serializes the manifest as pretty-printed JSON
    ///
    /// # Returns
    /// The Contents.json text, or an error if serialization fails
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize Contents.json")
    }
}

impl Default for ContentsFile {
    fn default() -> Self {
        Self::new()
    }
}

impl From<&OutputSpec> for ImageEntry {
    fn from(spec: &OutputSpec) -> Self {
        Self {
            filename: spec.filename(),
            idiom: spec.idiom.to_string(),
            platform: (spec.idiom == Idiom::Universal).then(|| PLATFORM.to_string()),
            scale: spec.scale.map(|s| s.to_string()),
            size: spec.logical_size().to_string(),
        }
    }
}

/// Builds the manifest for `specs`, one entry per spec, order preserved.
pub fn build_manifest(specs: &[OutputSpec]) -> ContentsFile {
    let mut contents = ContentsFile::new();
    for spec in specs {
        contents.add_image(spec.into());
    }
    contents
}

/// Writes `contents` as `<dir>/<name>` and returns the written path.
///
/// # Arguments
/// * `dir` - The icon set directory, which must already exist
/// * `name` - The manifest file name
/// * `contents` - The manifest to serialize
///
/// # Errors
/// Returns an error if serialization or the file write fails.
pub fn write_contents_json(dir: &Path, name: &str, contents: &ContentsFile) -> Result<PathBuf> {
    let json = contents.to_json()?;
    let path = dir.join(name);
    std::fs::write(&path, json).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output_spec::OUTPUT_SPECS;

    #[test]
    fn test_manifest_matches_table() {
        let contents = build_manifest(&OUTPUT_SPECS);
        assert_eq!(contents.images.len(), 10);

        let expected = [
            ("icon_1024x1024.png", "universal", "1024x1024", None),
            ("icon_60x60@3x.png", "iphone", "60x60", Some("3x")),
            ("icon_60x60@2x.png", "iphone", "60x60", Some("2x")),
            ("icon_83.5x83.5@2x.png", "ipad", "83.5x83.5", Some("2x")),
            ("icon_76x76@2x.png", "ipad", "76x76", Some("2x")),
            ("icon_76x76.png", "ipad", "76x76", Some("1x")),
            ("icon_29x29@2x.png", "iphone", "29x29", Some("2x")),
            ("icon_29x29@3x.png", "iphone", "29x29", Some("3x")),
            ("icon_40x40@2x.png", "iphone", "40x40", Some("2x")),
            ("icon_40x40@3x.png", "iphone", "40x40", Some("3x")),
        ];
        for (entry, (filename, idiom, size, scale)) in contents.images.iter().zip(expected) {
            assert_eq!(entry.filename, filename);
            assert_eq!(entry.idiom, idiom);
            let platform = (idiom == "universal").then_some("ios");
            assert_eq!(entry.platform.as_deref(), platform, "{filename}");
            assert_eq!(entry.size, size);
            assert_eq!(entry.scale.as_deref(), scale);
        }
    }

    #[test]
    fn test_info_block() {
        let contents = build_manifest(&OUTPUT_SPECS);
        assert_eq!(contents.info.author, "xcode");
        assert_eq!(contents.info.version, 1);
    }

    #[test]
    fn test_empty_table() {
        assert!(build_manifest(&[]).images.is_empty());
    }

    #[test]
    fn test_json_shape() {
        let json = build_manifest(&OUTPUT_SPECS).to_json().unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed["info"], serde_json::json!({ "author": "xcode", "version": 1 }));

        let images = parsed["images"].as_array().unwrap();
        assert_eq!(images.len(), 10);
        assert_eq!(
            images[0],
            serde_json::json!({
                "filename": "icon_1024x1024.png",
                "idiom": "universal",
                "platform": "ios",
                "size": "1024x1024"
            })
        );
        assert_eq!(
            images[3],
            serde_json::json!({
                "filename": "icon_83.5x83.5@2x.png",
                "idiom": "ipad",
                "scale": "2x",
                "size": "83.5x83.5"
            })
        );
        assert!(images[0].get("scale").is_none());
        assert!(images[1..].iter().all(|image| image.get("platform").is_none()));
    }

    #[test]
    fn test_write_contents_json() {
        let dir = tempfile::tempdir().unwrap();
        let path =
            write_contents_json(dir.path(), DEFAULT_MANIFEST_NAME, &build_manifest(&OUTPUT_SPECS))
                .unwrap();

        assert_eq!(path, dir.path().join("Contents.json"));
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("\"icon_40x40@3x.png\""));
        assert!(text.contains("\"version\": 1"));
    }

    #[test]
    fn test_write_into_missing_dir_fails() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope");
        let err = write_contents_json(&missing, DEFAULT_MANIFEST_NAME, &ContentsFile::new())
            .unwrap_err();
        assert!(err.to_string().contains("Failed to write"));
    }
}
