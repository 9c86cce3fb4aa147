/// Layout configuration data model.
pub mod model;
/// Per-category default configurations.
pub mod presets;
/// Owned, observable configuration store.
pub mod store;
