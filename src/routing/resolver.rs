//! Hash → route resolution.
//!
//! # Responsibilities
//! - Split the hash into segments (empty tokens dropped)
//! - Substitute purely numeric segments with the `[id]` placeholder
//! - Build the layout chain from the base path down to the page directory
//! - Derive fragment and script paths for each chain directory
//!
//! # Design Decisions
//! - Pure and synchronous, no I/O
//! - Numeric means ASCII digits only; ids beyond `u64` are kept as digit text
//! - Multiple numeric segments overwrite `params.id` (last wins)

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

/// Directory under which all route fragments live.
pub const DEFAULT_BASE_PATH: &str = "/routes";

/// Path segment used in place of a numeric hash segment.
pub const ID_PLACEHOLDER: &str = "[id]";

/// Reserved parameter name for numeric segments.
pub const ID_PARAM: &str = "id";

const LAYOUT_FILE: &str = "+layout.html";
const PAGE_FILE: &str = "+page.html";

/// A route parameter value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ParamValue {
    Number(u64),
    Text(String),
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Number(n) => write!(f, "{}", n),
            ParamValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<u64> for ParamValue {
    fn from(n: u64) -> Self {
        ParamValue::Number(n)
    }
}

impl From<&str> for ParamValue {
    fn from(s: &str) -> Self {
        ParamValue::Text(s.to_string())
    }
}

/// Route parameters by name.
pub type Params = BTreeMap<String, ParamValue>;

/// Ordered route directories, root layout first, page directory last.
///
/// Never empty: the base path alone is always the first entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PathChain {
    dirs: Vec<String>,
}

impl PathChain {
    fn from_segments(base: &str, segments: &[&str]) -> Self {
        let mut dirs = Vec::with_capacity(segments.len() + 1);
        let mut current = base.to_string();
        dirs.push(current.clone());
        for segment in segments {
            current.push('/');
            current.push_str(segment);
            dirs.push(current.clone());
        }
        Self { dirs }
    }

    /// All directories, root to leaf.
    pub fn dirs(&self) -> &[String] {
        &self.dirs
    }

    pub fn len(&self) -> usize {
        self.dirs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dirs.is_empty()
    }

    /// Layout directories: every entry except the terminal one.
    pub fn layouts(&self) -> &[String] {
        &self.dirs[..self.dirs.len().saturating_sub(1)]
    }

    /// The terminal (page) directory.
    pub fn page(&self) -> &str {
        self.dirs.last().map(String::as_str).unwrap_or_default()
    }
}

/// A resolved route. Built per navigation and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Route {
    /// Raw hash tokens, empty ones removed.
    pub segments: Vec<String>,
    /// Extracted parameters (only `id` today).
    pub params: Params,
    /// Layout chain, base path first.
    pub chain: PathChain,
}

impl Route {
    /// Fragment path of the terminal page.
    pub fn page_fragment_path(&self) -> String {
        page_fragment_path(self.chain.page())
    }

    /// Script path of the terminal page.
    pub fn page_script_path(&self) -> String {
        script_path(&self.page_fragment_path())
    }
}

/// Resolve a hash against the default base path.
pub fn resolve(hash: &str) -> Route {
    resolve_with_base(hash, DEFAULT_BASE_PATH)
}

/// Resolve a hash against `base`.
///
/// A single leading `#` is ignored, so both `location.hash` and the bare
/// fragment are accepted.
pub fn resolve_with_base(hash: &str, base: &str) -> Route {
    let hash = hash.strip_prefix('#').unwrap_or(hash);

    let segments: Vec<String> = hash
        .split('/')
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect();

    let mut params = Params::new();
    let mut lookup: Vec<&str> = Vec::with_capacity(segments.len());
    for segment in &segments {
        match parse_numeric(segment) {
            Some(id) => {
                params.insert(ID_PARAM.to_string(), id);
                lookup.push(ID_PLACEHOLDER);
            }
            None => lookup.push(segment),
        }
    }

    Route {
        chain: PathChain::from_segments(base, &lookup),
        segments,
        params,
    }
}

fn parse_numeric(segment: &str) -> Option<ParamValue> {
    if segment.is_empty() || !segment.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some(match segment.parse() {
        Ok(n) => ParamValue::Number(n),
        Err(_) => ParamValue::Text(segment.to_string()),
    })
}

/// `dir/+layout.html`
pub fn layout_fragment_path(dir: &str) -> String {
    format!("{}/{}", dir, LAYOUT_FILE)
}

/// `dir/+page.html`
pub fn page_fragment_path(dir: &str) -> String {
    format!("{}/{}", dir, PAGE_FILE)
}

/// Script path for a fragment path: `.html` replaced by `.js`.
pub fn script_path(fragment_path: &str) -> String {
    match fragment_path.strip_suffix(".html") {
        Some(stem) => format!("{}.js", stem),
        None => format!("{}.js", fragment_path),
    }
}

/// Directory part of a path, `None` at the root.
pub fn parent_dir(path: &str) -> Option<&str> {
    match path.rsplit_once('/') {
        Some((head, _)) if !head.is_empty() => Some(head),
        _ => None,
    }
}
