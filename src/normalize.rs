//! Rule-based cleanup of short user-supplied strings.
//! Deterministic and infallible: every function returns a string.

use once_cell::sync::Lazy;
use std::collections::{HashMap, HashSet};

/// Inputs shorter than this (after trimming) come back untouched
const MIN_LEN: usize = 2;

/// Articles, short prepositions and conjunctions kept lowercase inside titles
static MINOR_WORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "a", "an", "the", "and", "but", "or", "nor", "for", "yet", "so", "as", "at", "by", "in",
        "of", "off", "on", "per", "to", "up", "via", "vs",
    ]
    .into_iter()
    .collect()
});

/// Acronyms commonly typed in lowercase
static KNOWN_ACRONYMS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "ai", "ml", "nlp", "iot", "llm", "gpu", "cpu", "dna", "rna", "hiv", "covid", "uk", "usa",
        "eu", "vr", "api", "gps", "mri", "ict",
    ]
    .into_iter()
    .collect()
});

static QUESTION_LEADS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "how", "what", "why", "when", "where", "who", "can", "does", "is", "will",
    ]
    .into_iter()
    .collect()
});

static HONORIFICS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("dr", "Dr."),
        ("dr.", "Dr."),
        ("prof", "Prof."),
        ("prof.", "Prof."),
        ("mr.", "Mr."),
        ("ms.", "Ms."),
        ("mrs.", "Mrs."),
    ])
});

/// Title Case with minor words lowered (except first) and short acronyms kept
pub fn normalize_title(text: &str) -> String {
    let trimmed = text.trim();
    if trimmed.chars().count() < MIN_LEN {
        return text.to_string();
    }

    trimmed
        .split_whitespace()
        .enumerate()
        .map(|(i, token)| title_token(token, i == 0))
        .collect::<Vec<_>>()
        .join(" ")
}

fn title_token(token: &str, first: bool) -> String {
    if is_uppercase_acronym(token) {
        return token.to_string();
    }
    let lower = token.to_lowercase();
    let core = lower.trim_matches(|c: char| !c.is_alphanumeric());
    if KNOWN_ACRONYMS.contains(core) {
        return token.to_uppercase();
    }
    if !first && MINOR_WORDS.contains(lower.as_str()) {
        return lower;
    }
    capitalize(&lower)
}

/// All letters uppercase and at most three of them
fn is_uppercase_acronym(token: &str) -> bool {
    let letters: Vec<char> = token.chars().filter(|c| c.is_alphabetic()).collect();
    !letters.is_empty() && letters.len() <= 3 && letters.iter().all(|c| c.is_uppercase())
}

/// Capitalized, and a `?` when it opens with an interrogative lead word
pub fn normalize_question(text: &str) -> String {
    let trimmed = text.trim();
    if trimmed.chars().count() < MIN_LEN {
        return text.to_string();
    }

    let mut question = capitalize_first(trimmed);
    let lead = question
        .split_whitespace()
        .next()
        .map(|w| {
            w.trim_end_matches(|c: char| !c.is_alphanumeric())
                .to_lowercase()
        })
        .unwrap_or_default();

    if QUESTION_LEADS.contains(lead.as_str()) && !question.ends_with('?') {
        question = question.trim_end_matches('.').trim_end().to_string();
        question.push('?');
    }
    question
}

/// Each token capitalized; honorifics mapped to their punctuated form
pub fn normalize_name(text: &str) -> String {
    let trimmed = text.trim();
    if trimmed.chars().count() < MIN_LEN {
        return text.to_string();
    }

    trimmed
        .split_whitespace()
        .map(|token| {
            let lower = token.to_lowercase();
            match HONORIFICS.get(lower.as_str()) {
                Some(canonical) => canonical.to_string(),
                None => capitalize_name_token(&lower),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Capitalize every hyphen- or apostrophe-separated segment ("o'brien-smith")
fn capitalize_name_token(token: &str) -> String {
    let mut out = String::with_capacity(token.len());
    let mut at_start = true;
    for c in token.chars() {
        if at_start && c.is_alphabetic() {
            out.push(upper_char(c));
            at_start = false;
        } else {
            out.push(c);
            if c == '-' || c == '\'' {
                at_start = true;
            }
        }
    }
    out
}

/// First alphabetic character uppercased, the rest lowercased
fn capitalize(word: &str) -> String {
    let mut out = String::with_capacity(word.len());
    let mut done = false;
    for c in word.chars() {
        if !done && c.is_alphabetic() {
            out.push(upper_char(c));
            done = true;
        } else {
            out.extend(c.to_lowercase());
        }
    }
    out
}

/// Uppercase the first character only, leaving the rest alone
fn capitalize_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => std::iter::once(upper_char(first)).chain(chars).collect(),
        None => String::new(),
    }
}

/// Uppercase form of `c` when it is a single char that lowercases back to `c`.
/// Expanding or lossy mappings ('ß' -> "SS", 'ı' -> 'I') keep `c` as is.
fn upper_char(c: char) -> char {
    let mut upper = c.to_uppercase();
    match (upper.next(), upper.next()) {
        (Some(u), None) if u.to_lowercase().eq(std::iter::once(c)) => u,
        _ => c,
    }
}
