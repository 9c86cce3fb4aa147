/// Card database records.
pub mod model;
