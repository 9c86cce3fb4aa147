/// Warm LRU cache of decoded assets.
pub mod cache;
/// Static asset tables and the image proxy rewrite.
pub mod catalog;
/// Image and SVG decoding.
pub mod decode;
/// Asset byte sources.
pub mod fetch;
