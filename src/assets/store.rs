use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

use crate::{
    assets::bounds::{OpaqueBounds, compute_opaque_bounds},
    assets::decode::{DecodedImage, decode_image},
    foundation::error::{GarlandError, GarlandResult},
};

/// Named image resources the scene is built from.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum AssetKey {
    /// The garland line every ornament hangs from; its bounds are the reference frame.
    TopLine,
    /// Icicle overlay drawn on top of the line.
    Icicles,
    /// First hanging snowflake.
    Snowflake1,
    /// Second hanging snowflake (carries the spinner).
    Snowflake2,
    /// Spinning snowflake drawn mid-chain.
    Snowflake3,
    /// Center sock.
    Sock1,
    /// Outer socks.
    Sock2,
    /// Candy figures.
    Candy,
    /// Right-hand foliage.
    Leaves1,
    /// Left-hand foliage.
    Leaves2,
    /// Cherry fixtures.
    Cherry,
}

impl AssetKey {
    /// Every key, in load order.
    pub const ALL: [AssetKey; 11] = [
        AssetKey::TopLine,
        AssetKey::Icicles,
        AssetKey::Snowflake1,
        AssetKey::Snowflake2,
        AssetKey::Snowflake3,
        AssetKey::Sock1,
        AssetKey::Sock2,
        AssetKey::Candy,
        AssetKey::Leaves1,
        AssetKey::Leaves2,
        AssetKey::Cherry,
    ];

    /// Stable snake_case name used in configs and error messages.
    pub fn name(self) -> &'static str {
        match self {
            AssetKey::TopLine => "top_line",
            AssetKey::Icicles => "icicles",
            AssetKey::Snowflake1 => "snowflake1",
            AssetKey::Snowflake2 => "snowflake2",
            AssetKey::Snowflake3 => "snowflake3",
            AssetKey::Sock1 => "sock1",
            AssetKey::Sock2 => "sock2",
            AssetKey::Candy => "candy",
            AssetKey::Leaves1 => "leaves1",
            AssetKey::Leaves2 => "leaves2",
            AssetKey::Cherry => "cherry",
        }
    }

    /// File name looked up by [`DirAssetSource`] unless overridden.
    pub fn default_file(self) -> &'static str {
        match self {
            AssetKey::TopLine => "top_line.png",
            AssetKey::Icicles => "sosul.png",
            AssetKey::Snowflake1 => "snowflake1.png",
            AssetKey::Snowflake2 => "snowflake2png.png",
            AssetKey::Snowflake3 => "snowflake3.png",
            AssetKey::Sock1 => "sock1.png",
            AssetKey::Sock2 => "sock2.png",
            AssetKey::Candy => "kendy.png",
            AssetKey::Leaves1 => "leaves1.png",
            AssetKey::Leaves2 => "leaves2.png",
            AssetKey::Cherry => "cherry1.png",
        }
    }
}

/// Where encoded image bytes come from.
pub trait AssetSource {
    /// Return the encoded bytes for `key`.
    fn read(&self, key: AssetKey) -> GarlandResult<Vec<u8>>;
}

/// Reads assets from files under a root directory.
#[derive(Clone, Debug)]
pub struct DirAssetSource {
    root: PathBuf,
    files: BTreeMap<AssetKey, String>,
}

impl DirAssetSource {
    /// Source rooted at `root`, using [`AssetKey::default_file`] names.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            files: BTreeMap::new(),
        }
    }

    /// Replace the file names of selected keys. Paths must be relative to the root.
    pub fn with_overrides(mut self, files: &BTreeMap<AssetKey, String>) -> GarlandResult<Self> {
        for (&key, rel) in files {
            let norm = normalize_rel_path(rel)
                .map_err(|e| GarlandError::asset(key.name(), e.to_string()))?;
            self.files.insert(key, norm);
        }
        Ok(self)
    }

    fn path_for(&self, key: AssetKey) -> PathBuf {
        let rel = self
            .files
            .get(&key)
            .map(String::as_str)
            .unwrap_or_else(|| key.default_file());
        self.root.join(Path::new(rel))
    }
}

impl AssetSource for DirAssetSource {
    fn read(&self, key: AssetKey) -> GarlandResult<Vec<u8>> {
        let p = self.path_for(key);
        std::fs::read(&p)
            .map_err(|e| GarlandError::asset(key.name(), format!("read '{}': {e}", p.display())))
    }
}

/// In-memory asset bytes, for tests and embedded assets.
#[derive(Clone, Debug, Default)]
pub struct MemoryAssetSource {
    bytes: HashMap<AssetKey, Vec<u8>>,
}

impl MemoryAssetSource {
    /// Empty source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register encoded bytes for `key`, replacing any previous entry.
    pub fn insert(&mut self, key: AssetKey, bytes: Vec<u8>) -> &mut Self {
        self.bytes.insert(key, bytes);
        self
    }
}

impl AssetSource for MemoryAssetSource {
    fn read(&self, key: AssetKey) -> GarlandResult<Vec<u8>> {
        self.bytes
            .get(&key)
            .cloned()
            .ok_or_else(|| GarlandError::asset(key.name(), "not present in memory source"))
    }
}

/// A decoded image together with its cached opaque bounds.
#[derive(Clone, Debug)]
pub struct PreparedImage {
    /// Decoded pixels.
    pub image: DecodedImage,
    /// Opaque bounds computed once at load time.
    pub bounds: OpaqueBounds,
}

impl PreparedImage {
    /// Decode-free constructor for already decoded pixels.
    pub fn new(image: DecodedImage) -> Self {
        let bounds = compute_opaque_bounds(&image);
        Self { image, bounds }
    }
}

/// Every scene image, decoded and measured. Construction is all-or-nothing.
#[derive(Clone, Debug)]
pub struct PreparedAssets {
    images: BTreeMap<AssetKey, PreparedImage>,
}

impl PreparedAssets {
    /// Load and decode every [`AssetKey`]. The first failure aborts the whole load.
    #[tracing::instrument(skip(source))]
    pub fn load(source: &dyn AssetSource) -> GarlandResult<Self> {
        let mut images = BTreeMap::new();
        for key in AssetKey::ALL {
            let bytes = source.read(key)?;
            let image =
                decode_image(&bytes).map_err(|e| GarlandError::asset(key.name(), e.to_string()))?;
            let prepared = PreparedImage::new(image);
            tracing::debug!(
                asset = key.name(),
                width = prepared.image.width,
                height = prepared.image.height,
                bounds = ?prepared.bounds,
                "prepared asset"
            );
            images.insert(key, prepared);
        }
        Ok(Self { images })
    }

    /// Build from already decoded images; every key must be present.
    pub fn from_images(images: BTreeMap<AssetKey, DecodedImage>) -> GarlandResult<Self> {
        let mut out = BTreeMap::new();
        for key in AssetKey::ALL {
            let image = images
                .get(&key)
                .cloned()
                .ok_or_else(|| GarlandError::asset(key.name(), "missing decoded image"))?;
            out.insert(key, PreparedImage::new(image));
        }
        Ok(Self { images: out })
    }

    /// Look up a prepared image.
    pub fn get(&self, key: AssetKey) -> GarlandResult<&PreparedImage> {
        self.images
            .get(&key)
            .ok_or_else(|| GarlandError::asset(key.name(), "asset not prepared"))
    }
}

/// Normalize and validate asset paths relative to the asset root.
///
/// The normalized result uses `/` separators, removes `.` segments, and rejects absolute paths or
/// parent traversals (`..`).
pub fn normalize_rel_path(source: &str) -> GarlandResult<String> {
    let s = source.replace('\\', "/");
    if s.starts_with('/') {
        return Err(GarlandError::validation("asset paths must be relative"));
    }
    if s.is_empty() {
        return Err(GarlandError::validation("asset path must be non-empty"));
    }

    let mut out = Vec::<&str>::new();
    for part in s.split('/') {
        if part.is_empty() || part == "." {
            continue;
        }
        if part == ".." {
            return Err(GarlandError::validation("asset paths must not contain '..'"));
        }
        out.push(part);
    }

    if out.is_empty() {
        return Err(GarlandError::validation(
            "asset path must contain a file name",
        ));
    }

    Ok(out.join("/"))
}

#[cfg(test)]
#[path = "../../tests/unit/assets/store.rs"]
mod tests;
