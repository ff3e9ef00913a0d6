//! Brand detection core — pure text logic, no I/O, no network.
//!
//! Three pieces, composed by the client crate:
//! - `normalize` — canonical key for case/accent/punctuation-insensitive equality
//! - `is_brand_like` — ontology type classification with exclusion precedence
//! - `local_match` — dictionary fallback over n-grams of up to 3 tokens

mod classify;
mod matcher;
mod normalize;

pub use classify::is_brand_like;
pub use matcher::local_match;
pub use normalize::normalize;
