use std::collections::{HashMap, VecDeque};

use crate::assets::catalog::AssetRequest;
use crate::assets::decode::{DecodedAsset, ImagePaint, decode_asset, rasterize_svg};
use crate::assets::fetch::AssetFetcher;
use crate::foundation::error::CardResult;

/// Environment variable overriding [`ImageCache`] capacity.
pub const CACHE_CAPACITY_ENV: &str = "ANIMECARD_IMAGE_CACHE_CAPACITY";
const DEFAULT_CAPACITY: usize = 64;
const MAX_SVG_RASTERS_PER_ASSET: usize = 4;

/// Decoded asset plus the paints built from it.
pub struct CachedAsset {
    asset: DecodedAsset,
    raster_paint: Option<ImagePaint>,
    svg_paints: Vec<((u32, u32), ImagePaint)>,
}

impl CachedAsset {
    fn new(asset: DecodedAsset) -> Self {
        Self {
            asset,
            raster_paint: None,
            svg_paints: Vec::new(),
        }
    }

    pub fn asset(&self) -> &DecodedAsset {
        &self.asset
    }

    /// Natural size: pixel size for bitmaps, document size for SVG.
    pub fn intrinsic_size(&self) -> (f64, f64) {
        match &self.asset {
            DecodedAsset::Raster(img) => (f64::from(img.width), f64::from(img.height)),
            DecodedAsset::Svg(tree) => {
                let s = tree.size();
                (f64::from(s.width()), f64::from(s.height()))
            }
        }
    }

    /// Paint for drawing into a `device_w` x `device_h` pixel box.
    ///
    /// Bitmaps ignore the target size and are resampled by the rasterizer. SVG documents are
    /// rasterized at the target size so they stay sharp; the last few sizes are kept.
    pub fn paint(&mut self, device_w: u32, device_h: u32) -> CardResult<ImagePaint> {
        match &self.asset {
            DecodedAsset::Raster(img) => {
                if let Some(p) = &self.raster_paint {
                    return Ok(p.clone());
                }
                let p = ImagePaint::from_prepared(img)?;
                self.raster_paint = Some(p.clone());
                Ok(p)
            }
            DecodedAsset::Svg(tree) => {
                let key = (device_w.max(1), device_h.max(1));
                if let Some((_, p)) = self.svg_paints.iter().find(|(k, _)| *k == key) {
                    return Ok(p.clone());
                }
                let raster = rasterize_svg(tree, key.0, key.1)?;
                let p = ImagePaint::from_prepared(&raster)?;
                if self.svg_paints.len() >= MAX_SVG_RASTERS_PER_ASSET {
                    self.svg_paints.remove(0);
                }
                self.svg_paints.push((key, p.clone()));
                Ok(p)
            }
        }
    }
}

/// Warm LRU cache of decoded assets keyed by request URL.
///
/// Only successful loads are cached, so a failing asset is retried on the next render.
pub struct ImageCache {
    entries: HashMap<String, CachedAsset>,
    lru: VecDeque<String>,
    capacity: usize,
    hits: u64,
    misses: u64,
}

impl Default for ImageCache {
    fn default() -> Self {
        Self::from_env()
    }
}

impl std::fmt::Debug for ImageCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageCache")
            .field("len", &self.entries.len())
            .field("capacity", &self.capacity)
            .field("hits", &self.hits)
            .field("misses", &self.misses)
            .finish()
    }
}

impl ImageCache {
    /// Capacity from [`CACHE_CAPACITY_ENV`], defaulting to 64 entries.
    pub fn from_env() -> Self {
        let capacity = std::env::var(CACHE_CAPACITY_ENV)
            .ok()
            .and_then(|v| v.parse::<usize>().ok())
            .filter(|&n| n > 0)
            .unwrap_or(DEFAULT_CAPACITY);
        Self::with_capacity(capacity)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: HashMap::new(),
            lru: VecDeque::new(),
            capacity: capacity.max(1),
            hits: 0,
            misses: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn hits(&self) -> u64 {
        self.hits
    }

    pub fn misses(&self) -> u64 {
        self.misses
    }

    pub fn contains(&self, url: &str) -> bool {
        self.entries.contains_key(url)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.lru.clear();
    }

    /// Cached asset for `request`, fetching and decoding it on a miss.
    pub async fn load<F: AssetFetcher>(
        &mut self,
        fetcher: &F,
        request: &AssetRequest,
    ) -> CardResult<&mut CachedAsset> {
        let key = request.url.as_str();
        if self.entries.contains_key(key) {
            self.hits += 1;
            tracing::debug!(url = key, "image cache hit");
            self.touch(key);
        } else {
            self.misses += 1;
            tracing::debug!(url = key, "image cache miss");
            let bytes = fetcher.fetch(request).await?;
            let asset = decode_asset(&bytes)?;
            self.insert(key.to_string(), CachedAsset::new(asset));
        }
        self.entries
            .get_mut(key)
            .ok_or_else(|| crate::foundation::error::CardError::asset("cache entry vanished"))
    }

    fn insert(&mut self, key: String, value: CachedAsset) {
        while self.entries.len() >= self.capacity {
            let Some(old) = self.lru.pop_front() else {
                break;
            };
            self.entries.remove(&old);
        }
        self.lru.push_back(key.clone());
        self.entries.insert(key, value);
    }

    fn touch(&mut self, key: &str) {
        if let Some(pos) = self.lru.iter().position(|k| k == key) {
            if let Some(k) = self.lru.remove(pos) {
                self.lru.push_back(k);
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/cache.rs"]
mod tests;
