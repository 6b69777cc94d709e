// src/extractors/mod.rs

pub mod key;
pub mod validated;

pub use key::KeyPath;
pub use validated::{ValidatedJson, ValidatedQuery};
