use std::sync::Arc;

use anyhow::Context;

use crate::foundation::error::{CardError, CardResult};

/// Decoded raster image in premultiplied RGBA8.
#[derive(Clone, Debug)]
pub struct PreparedImage {
    pub width: u32,
    pub height: u32,
    /// Row-major premultiplied RGBA8.
    pub rgba8_premul: Arc<Vec<u8>>,
}

/// Decoded asset: bitmaps are ready to draw, vector art is rasterized per target size.
#[derive(Clone, Debug)]
pub enum DecodedAsset {
    Raster(PreparedImage),
    Svg(Arc<usvg::Tree>),
}

/// Decode `bytes`, sniffing SVG documents before falling back to the bitmap decoders.
pub fn decode_asset(bytes: &[u8]) -> CardResult<DecodedAsset> {
    if looks_like_svg(bytes) {
        return Ok(DecodedAsset::Svg(parse_svg(bytes)?));
    }
    Ok(DecodedAsset::Raster(decode_image(bytes)?))
}

pub fn decode_image(bytes: &[u8]) -> CardResult<PreparedImage> {
    let dyn_img = image::load_from_memory(bytes).context("decode image from memory")?;
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();
    if width == 0 || height == 0 {
        return Err(CardError::asset("decoded image has no pixels"));
    }

    let mut rgba8_premul = rgba.into_raw();
    premultiply_rgba8_in_place(&mut rgba8_premul);

    Ok(PreparedImage {
        width,
        height,
        rgba8_premul: Arc::new(rgba8_premul),
    })
}

pub fn parse_svg(bytes: &[u8]) -> CardResult<Arc<usvg::Tree>> {
    let opts = usvg::Options::default();
    let tree = usvg::Tree::from_data(bytes, &opts).context("parse svg tree")?;
    Ok(Arc::new(tree))
}

fn looks_like_svg(bytes: &[u8]) -> bool {
    let head = &bytes[..bytes.len().min(512)];
    let Ok(text) = std::str::from_utf8(head) else {
        return false;
    };
    let t = text.trim_start_matches('\u{feff}').trim_start();
    let prolog = t.starts_with("<?xml") || t.starts_with("<!--");
    t.starts_with("<svg") || (prolog && t.contains("<svg"))
}

/// Rasterize `tree` stretched to `width` x `height`, returning premultiplied RGBA8.
pub fn rasterize_svg(tree: &usvg::Tree, width: u32, height: u32) -> CardResult<PreparedImage> {
    const MAX_DIM: u32 = 8_192;
    if width == 0 || height == 0 || width > MAX_DIM || height > MAX_DIM {
        return Err(CardError::asset(format!(
            "svg raster size {width}x{height} out of range"
        )));
    }
    let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height)
        .ok_or_else(|| CardError::asset("failed to allocate svg pixmap"))?;

    let size = tree.size();
    let sx = (width as f32) / size.width();
    let sy = (height as f32) / size.height();
    resvg::render(
        tree,
        resvg::tiny_skia::Transform::from_scale(sx, sy),
        &mut pixmap.as_mut(),
    );

    // tiny-skia pixmaps are already premultiplied RGBA8.
    Ok(PreparedImage {
        width,
        height,
        rgba8_premul: Arc::new(pixmap.data().to_vec()),
    })
}

pub(crate) fn premultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = u16::from(px[3]);
        if a == 0 {
            px[..3].fill(0);
            continue;
        }
        for c in &mut px[..3] {
            *c = crate::foundation::math::mul_div255_u8(u16::from(*c), a);
        }
    }
}

/// Drawable image paint for the CPU rasterizer.
#[derive(Clone)]
pub struct ImagePaint {
    pub paint: vello_cpu::Image,
    pub width: u32,
    pub height: u32,
}

impl ImagePaint {
    pub fn from_prepared(img: &PreparedImage) -> CardResult<Self> {
        let pixmap = pixmap_from_premul_bytes(&img.rgba8_premul, img.width, img.height)?;
        Ok(Self {
            paint: vello_cpu::Image {
                image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
                sampler: vello_cpu::peniko::ImageSampler::default(),
            },
            width: img.width,
            height: img.height,
        })
    }
}

pub(crate) fn pixmap_from_premul_bytes(
    bytes: &[u8],
    width: u32,
    height: u32,
) -> CardResult<vello_cpu::Pixmap> {
    let w: u16 = width
        .try_into()
        .map_err(|_| CardError::asset("pixmap width exceeds u16"))?;
    let h: u16 = height
        .try_into()
        .map_err(|_| CardError::asset("pixmap height exceeds u16"))?;
    if bytes.len()
        != (width as usize)
            .saturating_mul(height as usize)
            .saturating_mul(4)
    {
        return Err(CardError::asset("pixmap byte len mismatch"));
    }
    let pixels = bytes
        .chunks_exact(4)
        .map(|px| {
            vello_cpu::peniko::color::PremulRgba8::from_u8_array([px[0], px[1], px[2], px[3]])
        })
        .collect::<Vec<_>>();
    Ok(vello_cpu::Pixmap::from_parts_with_opacity(pixels, w, h, true))
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
