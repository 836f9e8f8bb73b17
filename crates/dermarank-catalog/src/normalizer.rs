//! Ingredient-list normalizer.
//!
//! Turns a raw, possibly noisy ingredient string into resolved
//! `IngredientEntry` values with their source-order positions. Tokens that
//! match nothing are recorded as unresolved — positions of later entries
//! are NOT renumbered around them, so position stays a faithful proxy for
//! the label's declared concentration order.

use std::sync::OnceLock;

use dermarank_common::IngredientEntry;
use dermarank_reference::IngredientResolver;
use regex::Regex;
use serde::Serialize;
use tracing::warn;

/// A token that matched no canonical entry. Non-fatal; collected for
/// observability.
#[derive(Debug, Clone, Serialize)]
pub struct UnresolvedToken {
    pub position: usize,
    pub token: String,
}

/// Result of normalizing one product's ingredient string.
#[derive(Debug, Clone)]
pub struct NormalizedIngredients {
    pub entries: Vec<IngredientEntry>,
    pub unresolved: Vec<UnresolvedToken>,
}

fn pct_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(\d+(?:\.\d+)?)\s*%").expect("valid percentage regex"))
}

/// Split a raw ingredient string on commas/semicolons at parenthesis
/// depth 0, so qualifiers like "Clay (Kaolin, Bentonite)" stay one token.
/// Empty fragments (trailing commas, doubled delimiters) are formatting
/// artifacts and do not occupy a position.
fn split_tokens(raw: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut depth = 0usize;

    for c in raw.chars() {
        match c {
            '(' => {
                depth += 1;
                current.push(c);
            }
            ')' => {
                depth = depth.saturating_sub(1);
                current.push(c);
            }
            ',' | ';' if depth == 0 => {
                let token = current.trim();
                if !token.is_empty() {
                    tokens.push(token.to_string());
                }
                current.clear();
            }
            _ => current.push(c),
        }
    }
    let token = current.trim();
    if !token.is_empty() {
        tokens.push(token.to_string());
    }
    tokens
}

/// Extract a disclosed percentage ("Niacinamide 10%") from a token,
/// returning the token with the percentage removed.
fn extract_percentage(token: &str) -> (String, Option<f64>) {
    let re = pct_regex();
    match re.captures(token) {
        Some(caps) => {
            let pct = caps[1].parse::<f64>().ok();
            let cleaned = re.replace(token, "").trim().to_string();
            (cleaned, pct)
        }
        None => (token.to_string(), None),
    }
}

/// Alias candidates for one token, tried in order: the full token, the
/// part outside parentheses, then each parenthetical chunk.
fn alias_candidates(token: &str) -> Vec<String> {
    let mut candidates = vec![token.to_string()];
    if let Some(open) = token.find('(') {
        let primary = token[..open].trim();
        if !primary.is_empty() {
            candidates.push(primary.to_string());
        }
        let mut rest = &token[open..];
        while let Some(start) = rest.find('(') {
            let inner = &rest[start + 1..];
            let end = match inner.find(')') {
                Some(end) => end,
                None => inner.len(),
            };
            for chunk in inner[..end].split([',', ';']) {
                let chunk = chunk.trim();
                if !chunk.is_empty() {
                    candidates.push(chunk.to_string());
                }
            }
            rest = &inner[end..];
        }
    }
    candidates
}

/// Normalize a raw ingredient-list string against the resolver.
///
/// Never mutates the registry; never fails the parse — unmatched tokens
/// are collected and the rest of the list still resolves.
pub fn normalize_ingredient_list(
    raw: &str,
    resolver: &dyn IngredientResolver,
) -> NormalizedIngredients {
    let mut entries = Vec::new();
    let mut unresolved = Vec::new();

    for (position, token) in split_tokens(raw).into_iter().enumerate() {
        let (cleaned, disclosed_pct) = extract_percentage(&token);
        let resolved = alias_candidates(&cleaned)
            .into_iter()
            .find_map(|candidate| resolver.resolve(&candidate));

        match resolved {
            Some(canonical) => entries.push(IngredientEntry {
                key: canonical.key.clone(),
                position,
                disclosed_pct,
            }),
            None => {
                warn!("unresolved ingredient token at position {position}: '{cleaned}'");
                unresolved.push(UnresolvedToken {
                    position,
                    token: cleaned,
                });
            }
        }
    }

    NormalizedIngredients { entries, unresolved }
}
