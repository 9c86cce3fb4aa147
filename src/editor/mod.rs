/// Live preview tying store, editor and renderer together.
pub mod preview;
/// Selection, drag and numeric-entry state machine.
pub mod session;
