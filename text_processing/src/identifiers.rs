//Copyright 2024 Felix Engl
//
//Licensed under the Apache License, Version 2.0 (the "License");
//you may not use this file except in compliance with the License.
//You may obtain a copy of the License at
//
//    http://www.apache.org/licenses/LICENSE-2.0
//
//Unless required by applicable law or agreed to in writing, software
//distributed under the License is distributed on an "AS IS" BASIS,
//WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
//See the License for the specific language governing permissions and
//limitations under the License.

use std::collections::{HashMap, HashSet};

/// Words that can not be used as a column name without decoration.
const RESERVED: [&str; 19] = [
    "if", "else", "repeat", "while", "function", "for", "next", "break", "in",
    "TRUE", "FALSE", "NULL", "Inf", "NaN", "NA", "NA_integer_", "NA_real_",
    "NA_character_", "NA_complex_",
];

/// Turns [term] into a syntactically valid column identifier.
///
/// Invalid characters become `.`, names not starting with a letter (or with a dot followed
/// by a digit) are prefixed with `X` and reserved words get a trailing dot.
pub fn sanitize_identifier(term: &str) -> String {
    let mut result: String = term
        .chars()
        .map(|c| if c.is_alphanumeric() || c == '.' || c == '_' { c } else { '.' })
        .collect();

    let mut chars = result.chars();
    let needs_prefix = match (chars.next(), chars.next()) {
        (None, _) => true,
        (Some('.'), Some(second)) => second.is_ascii_digit(),
        (Some('.'), None) => false,
        (Some(first), _) => !first.is_alphabetic(),
    };
    if needs_prefix {
        result.insert(0, 'X');
    }
    if RESERVED.contains(&result.as_str()) {
        result.push('.');
    }
    result
}

/// Sanitizes all [terms] and resolves collisions by appending `.1`, `.2`, ...
/// to every repetition. The first occurrence keeps the plain name.
pub fn sanitize_identifiers<I: IntoIterator<Item = T>, T: AsRef<str>>(terms: I) -> Vec<String> {
    let sanitized: Vec<String> = terms
        .into_iter()
        .map(|term| sanitize_identifier(term.as_ref()))
        .collect();
    let mut taken: HashSet<String> = HashSet::with_capacity(sanitized.len());
    let mut first_seen: HashSet<&str> = HashSet::with_capacity(sanitized.len());
    let mut counters: HashMap<&str, usize> = HashMap::new();
    let originals: HashSet<&str> = sanitized.iter().map(String::as_str).collect();

    let mut result = Vec::with_capacity(sanitized.len());
    for name in &sanitized {
        if first_seen.insert(name.as_str()) {
            taken.insert(name.clone());
            result.push(name.clone());
            continue;
        }
        let counter = counters.entry(name.as_str()).or_insert(0);
        let unique = loop {
            *counter += 1;
            let candidate = format!("{name}.{counter}");
            if !originals.contains(candidate.as_str()) && !taken.contains(&candidate) {
                break candidate;
            }
        };
        taken.insert(unique.clone());
        result.push(unique);
    }
    result
}

#[cfg(test)]
mod test {
    use super::{sanitize_identifier, sanitize_identifiers};

    #[test]
    fn digits_get_a_prefix() {
        assert_eq!("X5", sanitize_identifier("5"));
        assert_eq!("X2020", sanitize_identifier("2020"));
        assert_eq!("X.5x", sanitize_identifier(".5x"));
        assert_eq!("X_id", sanitize_identifier("_id"));
        assert_eq!("X", sanitize_identifier(""));
    }

    #[test]
    fn valid_names_stay() {
        assert_eq!("coffe", sanitize_identifier("coffe"));
        assert_eq!("java8", sanitize_identifier("java8"));
        assert_eq!(".hidden", sanitize_identifier(".hidden"));
        assert_eq!("café", sanitize_identifier("café"));
    }

    #[test]
    fn invalid_characters_and_reserved_words() {
        assert_eq!("c..", sanitize_identifier("c++"));
        assert_eq!("..", sanitize_identifier("😀😀"));
        assert_eq!("if.", sanitize_identifier("if"));
        assert_eq!("NA.", sanitize_identifier("NA"));
    }

    #[test]
    fn collisions_are_numbered() {
        assert_eq!(
            vec!["c..", "c...1", "c...2", "c"],
            sanitize_identifiers(["c++", "c##", "c--", "c"])
        );
        assert_eq!(vec!["a.1", "a", "a.2"], sanitize_identifiers(["a.1", "a", "a"]));
    }
}
