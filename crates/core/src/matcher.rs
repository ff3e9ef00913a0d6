//! Local fallback matcher: dictionary scan over n-grams of the input.

use rustc_hash::FxHashSet;

use crate::normalize::normalize;

/// Punctuation treated as token boundaries, in addition to whitespace.
/// Includes the curly and guillemet quote variants common in French text.
const BOUNDARY: [char; 18] = [
    ',', '.', ';', ':', '!', '?', '(', ')', '[', ']', '\'', '"', '\u{2018}',
    '\u{2019}', '\u{201C}', '\u{201D}', '\u{00AB}', '\u{00BB}',
];

/// Scan `text` for any brand in `dictionary` (a grid of rows, as read
/// from a range or CSV file; blank cells and duplicates are tolerated).
///
/// Candidates are the normalized whole input, each normalized token, and
/// every normalized run of 2–3 adjacent tokens. Multi-token keys shorter
/// than 3 characters are skipped to avoid spurious collisions. Returns on
/// the first hit.
pub fn local_match(text: &str, dictionary: &[Vec<String>]) -> bool {
    if text.is_empty() {
        return false;
    }

    let keys: FxHashSet<String> = dictionary
        .iter()
        .flatten()
        .filter(|cell| !cell.trim().is_empty())
        .map(|cell| normalize(cell))
        .filter(|k| !k.is_empty())
        .collect();
    if keys.is_empty() {
        return false;
    }

    if keys.contains(&normalize(text)) {
        return true;
    }

    let tokens: Vec<&str> = text
        .split(|c: char| c.is_whitespace() || BOUNDARY.contains(&c))
        .filter(|t| !t.is_empty())
        .collect();

    for (i, tok) in tokens.iter().enumerate() {
        if keys.contains(&normalize(tok)) {
            return true;
        }
        let mut chunk = tok.to_string();
        for next in tokens.iter().skip(i + 1).take(2) {
            chunk.push(' ');
            chunk.push_str(next);
            let key = normalize(&chunk);
            if key.len() >= 3 && keys.contains(&key) {
                return true;
            }
        }
    }
    false
}
