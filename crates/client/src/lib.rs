//! Dandelion NEX client — the network half of brand detection.
//!
//! This crate is the single source of truth for the wire contract:
//! token storage, the retry-wrapped annotate call, and the spreadsheet-facing
//! functions composing the client with the core classifier and matcher.
//!
//! Blocking reqwest (no Tokio runtime required). No GUI concepts.

mod client;
mod functions;
mod token;

pub use client::{
    Annotation, AnnotationClient, AnnotationResponse, ApiErrorBody, Error,
    DEFAULT_ENDPOINT, DEFAULT_LANG, DEFAULT_MIN_CONFIDENCE,
};
pub use functions::{
    brand_list, brand_present, brand_present_smart, probe, set_token,
    SMART_MIN_CONFIDENCE,
};
pub use token::{FileTokenStore, MemoryTokenStore, TokenStore};
