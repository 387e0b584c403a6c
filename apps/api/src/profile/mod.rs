// Profile editing: field-level edits, derived experience duration, markdown preview.

pub mod duration;
pub mod edits;
pub mod render;
