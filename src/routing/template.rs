//! Page template parameter substitution.
//!
//! Replaces every `[name]` token in page HTML with the text of
//! `params[name]`, or nothing when the parameter is missing. This is a plain
//! text pass that runs before parsing; it knows nothing about HTML.

use std::sync::OnceLock;

use regex::{Captures, Regex};

use crate::routing::resolver::Params;

fn token_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\[(\w+)\]").expect("static pattern is valid"))
}

/// Substitute `[name]` tokens in `text` with values from `params`.
pub fn substitute(text: &str, params: &Params) -> String {
    token_pattern()
        .replace_all(text, |caps: &Captures<'_>| {
            params
                .get(&caps[1])
                .map(ToString::to_string)
                .unwrap_or_default()
        })
        .into_owned()
}
