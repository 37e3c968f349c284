//! Identifier normalisation: raw SQL names to Go CamelCase.

use std::collections::BTreeSet;

/// Words rendered fully upper-case when they make up a whole word of an
/// identifier (`user_id` -> `UserID`).
///
/// The set is immutable once built; replacing it means building a new one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Acronyms {
    words: BTreeSet<String>,
}

impl Acronyms {
    /// Builds an acronym set. Words are stored upper-cased; blanks are ignored.
    #[must_use]
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            words: words
                .into_iter()
                .map(|w| w.as_ref().trim().to_ascii_uppercase())
                .filter(|w| !w.is_empty())
                .collect(),
        }
    }

    /// An empty set: every word is merely capitalised.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            words: BTreeSet::new(),
        }
    }

    /// Returns true if `word` (any case) is an acronym.
    #[must_use]
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(&word.to_ascii_uppercase())
    }

    /// Iterates the acronyms in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(String::as_str)
    }

    /// Number of acronyms.
    #[must_use]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Returns true if the set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl Default for Acronyms {
    fn default() -> Self {
        Self::new(["ID", "IP", "RPC"])
    }
}

/// Converts a raw name to CamelCase.
///
/// `_`, space, `-` and `.` end a word; a digit ends a word and is copied
/// verbatim. The first letter of each word is upper-cased and the rest kept
/// as written, unless the word is an acronym, in which case it is emitted
/// fully upper-case. Other characters are dropped.
#[must_use]
pub fn to_camel(raw: &str, acronyms: &Acronyms) -> String {
    let raw = raw.trim();
    let mut out = String::with_capacity(raw.len());
    let mut word = String::new();
    let mut word_first = true;

    for c in raw.chars() {
        if c.is_ascii_alphabetic() {
            word.push(if word_first { c.to_ascii_uppercase() } else { c });
            word_first = false;
            continue;
        }

        let digit = c.is_ascii_digit();
        word_first = digit || matches!(c, '_' | ' ' | '-' | '.');
        if word_first {
            flush_word(&mut out, &mut word, acronyms);
        }
        if digit {
            out.push(c);
        }
    }
    flush_word(&mut out, &mut word, acronyms);
    out
}

fn flush_word(out: &mut String, word: &mut String, acronyms: &Acronyms) {
    if word.is_empty() {
        return;
    }
    if acronyms.contains(word) {
        out.push_str(&word.to_ascii_uppercase());
    } else {
        out.push_str(word);
    }
    word.clear();
}

/// Converts a raw column name to a Go field name: [`to_camel`] followed by
/// the fixed `Id` -> `ID` and `Url` -> `URL` rewrites.
#[must_use]
pub fn field_name(raw: &str, acronyms: &Acronyms) -> String {
    to_camel(raw, acronyms).replace("Id", "ID").replace("Url", "URL")
}
