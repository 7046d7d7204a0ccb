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

use isolang::Language;

/// The standard english stopword list (snowball flavour, 174 words).
const ENGLISH: &str = include_str!("../data/stopwords/en.txt");

/// Returns the stopwords shipped with the crate for [language], if there are any.
pub fn bundled_stopwords_for(language: &Language) -> Option<Vec<&'static str>> {
    let raw = match language {
        Language::Eng => ENGLISH,
        _ => return None,
    };
    Some(
        raw.lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect(),
    )
}

#[cfg(test)]
mod test {
    use super::bundled_stopwords_for;
    use isolang::Language;

    #[test]
    fn english_is_bundled() {
        let words = bundled_stopwords_for(&Language::Eng).unwrap();
        assert_eq!(174, words.len());
        assert!(words.contains(&"the"));
        assert!(words.contains(&"don't"));
        assert!(bundled_stopwords_for(&Language::Deu).is_none());
    }
}
