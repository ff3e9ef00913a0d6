//! Spreadsheet-facing entry points.
//!
//! These compose the annotation client with the core classifier/matcher.
//! `brand_list` returns grid-shaped output (a column of rows) and always
//! has at least one row, so a host adapter never has to special-case an
//! empty result.

use std::collections::HashSet;

use brandgrid_core::local_match;

use crate::client::{AnnotationClient, Error, DEFAULT_LANG, DEFAULT_MIN_CONFIDENCE};
use crate::token::TokenStore;

/// Confidence floor used by the smart variant before falling back to the
/// local dictionary.
pub const SMART_MIN_CONFIDENCE: f64 = 0.3;

/// Fixed text sent by [`probe`].
const PROBE_TEXT: &str = "J'adore mon iPhone Apple";

fn lang_or_default(lang: Option<&str>) -> &str {
    match lang {
        Some(l) if !l.is_empty() => l,
        _ => DEFAULT_LANG,
    }
}

/// Store `value` as the active token. A missing value stores the empty
/// string — the error for an unusable token is raised at call time, not
/// here. Returns a confirmation message for display.
pub fn set_token(store: &dyn TokenStore, value: Option<&str>) -> Result<String, Error> {
    store.set(value.unwrap_or("")).map_err(Error::Io)?;
    Ok("Token stored for this user".to_string())
}

/// TRUE iff the extraction service returns at least one brand-like
/// annotation. Empty text short-circuits to FALSE without a network call;
/// API failures propagate to the caller.
pub fn brand_present(
    client: &AnnotationClient,
    text: &str,
    lang: Option<&str>,
    min_confidence: Option<f64>,
) -> Result<bool, Error> {
    if text.is_empty() {
        return Ok(false);
    }
    let resp = client.annotate(
        text,
        lang_or_default(lang),
        min_confidence.unwrap_or(DEFAULT_MIN_CONFIDENCE),
    )?;
    Ok(resp.annotations.iter().any(|a| a.is_brand_like()))
}

/// Unique display labels of brand-like annotations, one row each, in
/// first-seen order. Zero matches (or empty input) yields a single empty
/// row so the output keeps grid shape. API failures propagate.
pub fn brand_list(
    client: &AnnotationClient,
    text: &str,
    lang: Option<&str>,
    min_confidence: Option<f64>,
) -> Result<Vec<Vec<String>>, Error> {
    if text.is_empty() {
        return Ok(vec![vec![String::new()]]);
    }
    let resp = client.annotate(
        text,
        lang_or_default(lang),
        min_confidence.unwrap_or(DEFAULT_MIN_CONFIDENCE),
    )?;

    let mut seen = HashSet::new();
    let mut rows: Vec<Vec<String>> = Vec::new();
    for ann in &resp.annotations {
        if !ann.is_brand_like() {
            continue;
        }
        let Some(label) = ann.display_label() else {
            continue;
        };
        if seen.insert(label.to_string()) {
            rows.push(vec![label.to_string()]);
        }
    }

    if rows.is_empty() {
        rows.push(vec![String::new()]);
    }
    Ok(rows)
}

/// Best-effort variant: remote classification first, at a lower confidence
/// floor, then the local dictionary. The remote `Result` is deliberately
/// discarded into the fallback branch — callers of this entry point cannot
/// distinguish "no brand found" from "remote call failed". Never errors.
pub fn brand_present_smart(
    client: &AnnotationClient,
    text: &str,
    dictionary: &[Vec<String>],
    lang: Option<&str>,
    min_confidence: Option<f64>,
) -> bool {
    if text.is_empty() {
        return false;
    }

    match client.annotate(
        text,
        lang_or_default(lang),
        min_confidence.unwrap_or(SMART_MIN_CONFIDENCE),
    ) {
        Ok(resp) if resp.annotations.iter().any(|a| a.is_brand_like()) => return true,
        Ok(_) | Err(_) => {}
    }

    local_match(text, dictionary)
}

/// One fixed probe call, returning the raw response body for manual
/// verification of connectivity and credentials. The body is validated
/// first, so an error descriptor or unparseable response still fails,
/// but everything the service sent back survives for inspection.
pub fn probe(client: &AnnotationClient) -> Result<String, Error> {
    client.annotate_raw(PROBE_TEXT, DEFAULT_LANG, 0.5)
}
