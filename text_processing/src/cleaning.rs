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

use std::borrow::Cow;
use unicode_normalization::UnicodeNormalization;

/// Punctuation outside of ascii that is stripped as well.
const EXTRA_PUNCTUATION: [char; 4] = ['«', '»', '¡', '¿'];

/// Returns true if [c] counts as punctuation for the cleaning step.
///
/// Ascii punctuation, the general punctuation block (U+2010 to U+205E) and
/// a handful of latin-1 quotes.
#[inline]
pub fn is_punctuation(c: char) -> bool {
    c.is_ascii_punctuation()
        || ('\u{2010}'..='\u{205E}').contains(&c)
        || EXTRA_PUNCTUATION.contains(&c)
}

/// Lowercases [text] and deletes every punctuation character.
///
/// Nothing is inserted in place of the deleted characters, "e-mail" becomes "email".
pub fn clean(text: &str, normalize: bool) -> String {
    let text = if normalize {
        Cow::Owned(text.nfc().collect::<String>())
    } else {
        Cow::Borrowed(text)
    };
    text.chars()
        .flat_map(char::to_lowercase)
        .filter(|c| !is_punctuation(*c))
        .collect()
}
