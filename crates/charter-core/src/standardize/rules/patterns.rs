//! Common regex patterns for contract field normalization.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Dates
    pub static ref ISO_DATE: Regex = Regex::new(
        r"^\d{4}-\d{2}-\d{2}$"
    ).unwrap();

    pub static ref MONTH_YEAR: Regex = Regex::new(
        r"(?i)(January|February|March|April|May|June|July|August|September|October|November|December)\s+(\d{4})"
    ).unwrap();

    pub static ref BARE_YEAR: Regex = Regex::new(
        r"\b(?:19|20)\d{2}\b"
    ).unwrap();

    // Numbers: separators and currency symbols are stripped before matching
    pub static ref NUMERIC_NOISE: Regex = Regex::new(
        r"[,$€£¥\s]"
    ).unwrap();

    pub static ref NUMBER: Regex = Regex::new(
        r"-?\d+\.?\d*"
    ).unwrap();

    // Whitespace runs
    pub static ref WHITESPACE: Regex = Regex::new(
        r"\s+"
    ).unwrap();

    // Vessel prefixes
    pub static ref VESSEL_PREFIX: Regex = Regex::new(
        r"^(?:M/V|MT|MV|M\.V\.|M\.T\.|S\.S\.|SS)"
    ).unwrap();

    pub static ref PREFIX_MV_DOTTED: Regex = Regex::new(
        r"^M\.V\.\s*"
    ).unwrap();

    pub static ref PREFIX_MV: Regex = Regex::new(
        r"^MV\s+"
    ).unwrap();

    pub static ref PREFIX_MT_DOTTED: Regex = Regex::new(
        r"^M\.T\.\s*"
    ).unwrap();

    pub static ref PREFIX_MT: Regex = Regex::new(
        r"^MT\s+"
    ).unwrap();

    // Email (applied to lowercased input)
    pub static ref EMAIL: Regex = Regex::new(
        r"^[a-z0-9._%+-]+@[a-z0-9.-]+\.[a-z]{2,}$"
    ).unwrap();

    // Blank-line runs in extracted page text
    pub static ref NEWLINE_RUN: Regex = Regex::new(
        r"\n{2,}"
    ).unwrap();

    // Markdown code fences around extraction responses
    pub static ref FENCE_OPEN: Regex = Regex::new(
        r"^```(?:json)?\s*\n"
    ).unwrap();

    pub static ref FENCE_CLOSE: Regex = Regex::new(
        r"\n```\s*$"
    ).unwrap();
}

/// Substrings that mark a name as a company rather than a vessel.
pub const COMPANY_KEYWORDS: &[&str] = &[
    "LTD", "INC", "CORP", "COMPANY", "HOLDINGS", "AS", "SA", "LLC",
];
