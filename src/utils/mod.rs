//! Generic utility primitives with zero domain knowledge.
//!
//! - `shell` - Shell escaping and quoting

pub mod shell;
