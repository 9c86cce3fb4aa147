/// Anchor/pivot rectangle resolution.
pub mod geometry;
