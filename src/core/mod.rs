//! Core conversion logic
//!
//! - front_matter: title capture and header replacement
//! - rules: the ordered table of fence conventions
//! - filter: the `Passing`/`Skipping` block state machine
//! - convert: threads both over one document

pub mod convert;
pub mod filter;
pub mod front_matter;
pub mod rules;

pub use convert::{ConvertStats, Converter, ConverterConfig};
pub use filter::{BlockFilter, BlockState, LineOutcome};
pub use front_matter::{FrontMatterRewriter, HeaderTemplate};
pub use rules::{FenceAction, FenceRule, FenceRules};
