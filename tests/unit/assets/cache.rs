use std::io::Cursor;

use super::*;
use crate::assets::fetch::MemoryFetcher;

fn png(w: u32, h: u32) -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(w, h, image::Rgba([10, 20, 30, 255]));
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

#[test]
fn second_load_hits_without_fetching() {
    let fetcher = MemoryFetcher::new().with("a.png", png(3, 2));
    let mut cache = ImageCache::with_capacity(4);
    let req = AssetRequest::local("a.png");

    let size = pollster::block_on(cache.load(&fetcher, &req))
        .unwrap()
        .intrinsic_size();
    assert_eq!(size, (3.0, 2.0));
    pollster::block_on(cache.load(&fetcher, &req)).unwrap();

    assert_eq!(fetcher.request_count(), 1);
    assert_eq!((cache.hits(), cache.misses()), (1, 1));
}

#[test]
fn failures_are_not_cached() {
    let fetcher = MemoryFetcher::new();
    let mut cache = ImageCache::with_capacity(4);
    let req = AssetRequest::local("missing.png");
    assert!(pollster::block_on(cache.load(&fetcher, &req)).is_err());
    assert!(pollster::block_on(cache.load(&fetcher, &req)).is_err());
    assert_eq!(fetcher.request_count(), 2);
    assert!(cache.is_empty());
}

#[test]
fn evicts_least_recently_used() {
    let fetcher = MemoryFetcher::new()
        .with("a", png(1, 1))
        .with("b", png(1, 1))
        .with("c", png(1, 1));
    let mut cache = ImageCache::with_capacity(2);
    for url in ["a", "b", "a", "c"] {
        pollster::block_on(cache.load(&fetcher, &AssetRequest::local(url))).unwrap();
    }
    assert!(cache.contains("a"));
    assert!(!cache.contains("b"));
    assert!(cache.contains("c"));
    assert_eq!(cache.len(), 2);
}

#[test]
fn svg_paints_are_rasterized_per_size() {
    let svg = br#"<svg xmlns="http://www.w3.org/2000/svg" width="10" height="10"><circle cx="5" cy="5" r="5"/></svg>"#;
    let fetcher = MemoryFetcher::new().with("s.svg", svg.to_vec());
    let mut cache = ImageCache::with_capacity(2);
    let entry = pollster::block_on(cache.load(&fetcher, &AssetRequest::local("s.svg"))).unwrap();
    assert_eq!(entry.intrinsic_size(), (10.0, 10.0));
    let p = entry.paint(40, 20).unwrap();
    assert_eq!((p.width, p.height), (40, 20));
    let raster = entry.paint(0, 0).unwrap();
    assert_eq!((raster.width, raster.height), (1, 1));
}
