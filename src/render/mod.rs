/// Layered anchor/pivot card compositor.
pub mod card;
/// Non-layered classic card renderer.
pub mod classic;
/// Drawing surface, rendered canvas and PNG export.
pub mod surface;
/// Font resolution, shaping and bounded word wrap.
pub mod text;
