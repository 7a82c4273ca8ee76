//! The message-format engine.
//!
//! Four pieces, leaves first:
//!
//! - `pattern`: parses one ICU-style pattern into a [`MessagePattern`]
//! - `plurals`: locale-aware CLDR plural category resolution
//! - `render`: substitutes runtime values into a parsed pattern
//! - `catalog`: the per-locale store of message id -> raw template
//!
//! Everything here is synchronous and side-effect free except
//! [`TranslationCatalog::load`], which swaps shared state atomically.

pub mod catalog;
pub mod pattern;
pub mod plurals;
pub mod render;

pub use catalog::{TranslationCatalog, TranslationEntry, extract_locale};
pub use pattern::{CaseKey, MessagePattern, PatternKind, parse};
pub use plurals::{Category, category};
pub use render::{ValueMap, evaluate, render};
