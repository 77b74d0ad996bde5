//! Deterministic password derivation from a short key and the alphabet table.
//!
//! The password is a tag segment carrying the vowel count of the key, followed
//! by one word for each of the key's first three characters. Nothing here is
//! random, so the same inputs always give the same password and passwords never
//! need to be stored.

use crate::alphabet::{AlphabetTable, TAG_KEY};
use crate::error::{Error, Result};

/// Non-alphabetic, so short keys fall through to the positional digits.
const PADDING: &str = "___";
const VOWELS: [char; 5] = ['a', 'e', 'i', 'o', 'u'];
const PLACEHOLDER: char = '$';
const WORD_COUNT: usize = 3;

pub const DEFAULT_MAX_LENGTH: usize = 255;

/// Characters of an account name that seed its password.
pub fn derivation_key(name: &str) -> &str {
    match name.char_indices().nth(WORD_COUNT) {
        Some((end, _)) => &name[..end],
        None => name,
    }
}

fn is_latin_letter(c: char) -> bool {
    let mut lower = c.to_lowercase();
    matches!((lower.next(), lower.next()), (Some(l), None) if l.is_ascii_lowercase())
}

pub fn derive_password(key: &str, max_length: usize, dashless: bool, table: &AlphabetTable) -> Result<String> {
    let padded = format!("{}{}", key, PADDING);

    // Case-sensitive on purpose: callers pass keys as typed.
    let vowel_count = padded.chars().filter(|c| VOWELS.contains(c)).count();

    let template = table.lookup(TAG_KEY).ok_or(Error::MissingTagTemplate)?;
    let mut segments = Vec::with_capacity(WORD_COUNT + 1);
    segments.push(template.replace(PLACEHOLDER, &vowel_count.to_string()));

    for (position, c) in padded.chars().take(WORD_COUNT).enumerate() {
        let lookup_key = if is_latin_letter(c) {
            c.to_string()
        } else {
            (position + 1).to_string()
        };
        let word = table
            .lookup(&lookup_key)
            .ok_or_else(|| Error::MissingCharacterMapping {
                key: lookup_key.clone(),
            })?;
        segments.push(word.to_string());
    }

    let password = segments.join(if dashless { "" } else { "-" });
    Ok(truncate_chars(password, max_length))
}

fn truncate_chars(mut s: String, max_length: usize) -> String {
    if let Some((end, _)) = s.char_indices().nth(max_length) {
        s.truncate(end);
    }
    s
}
