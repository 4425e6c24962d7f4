/// Tree printing command.
pub mod dump;
/// Header and statistics command.
pub mod info;
/// Shared JSON payload helpers and the tree JSON form.
pub mod json;
/// JSON-to-archive command.
pub mod pack;
/// Text rendering of archive trees.
pub mod print;
/// Integrity check command.
pub mod verify;
