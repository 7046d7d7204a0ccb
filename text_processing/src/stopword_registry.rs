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

use std::borrow::Borrow;
use std::collections::HashSet;
use std::convert::TryFrom;
use std::fs::File;
use std::hash::Hash;
use std::io::{BufRead, BufReader};
use std::path::Path;
use camino::Utf8PathBuf;
use compact_str::{CompactString, ToCompactString};
use isolang::Language;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::bundled::bundled_stopwords_for;
use crate::cleaning::clean;
use crate::configs::StopwordRegistryConfig;

/// A registry for stopwords.
/// May have multiple repositories, the resulting list is the combination of
/// the lists provided by all registered repositories.
#[derive(Debug, Default, Clone)]
pub struct StopWordRegistry {
    repositories: Vec<StopWordRepository>,
}

impl StopWordRegistry {
    pub fn initialize(cfg: &StopwordRegistryConfig) -> Self {
        Self {
            repositories: cfg.to_vec(),
        }
    }

    pub fn register(&mut self, repository: StopWordRepository) {
        self.repositories.push(repository)
    }

    fn load_stop_words(&self, language: &Language) -> Option<Vec<String>> {
        let mut collection = Vec::new();
        for repo in &self.repositories {
            if let Some(found) = repo.load_raw_stop_words(language) {
                collection.extend(found)
            }
        }
        (!collection.is_empty()).then_some(collection)
    }

    /// Loads the combined stopword list for [language].
    /// The normalized half of the list is created with the same cleaning the
    /// normalizer applies to the texts.
    pub fn load(&self, language: &Language, normalize: bool) -> Option<StopWordList> {
        let raw = self.load_stop_words(language)?;
        log::debug!(
            "Loaded {} stopwords for {} from {} repositories.",
            raw.len(),
            language.to_name(),
            self.repositories.len()
        );
        Some(StopWordList::from_raw(
            raw.into_iter().map(CompactString::from).collect(),
            normalize,
        ))
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StopWordList {
    raw: HashSet<CompactString>,
    normalized: HashSet<CompactString>,
    normalize: bool,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum ContainsKind {
    Raw,
    Normalized,
    Both,
}

impl StopWordList {
    pub fn from_raw(raw: HashSet<CompactString>, normalize: bool) -> Self {
        let mut new = Self {
            normalize,
            ..Self::default()
        };
        new.extend(raw);
        new
    }

    pub fn len(&self) -> usize {
        self.raw.len()
    }

    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    #[inline]
    pub fn contains<Q: ?Sized>(&self, kind: ContainsKind, value: &Q) -> bool
    where
        CompactString: Borrow<Q>,
        Q: Hash + Eq,
    {
        match kind {
            ContainsKind::Raw => self.contains_raw(value),
            ContainsKind::Normalized => self.contains_normalized(value),
            ContainsKind::Both => self.contains_both(value),
        }
    }

    #[inline]
    pub fn contains_both<Q: ?Sized>(&self, value: &Q) -> bool
    where
        CompactString: Borrow<Q>,
        Q: Hash + Eq,
    {
        self.contains_raw(value) || self.contains_normalized(value)
    }

    #[inline]
    pub fn contains_raw<Q: ?Sized>(&self, value: &Q) -> bool
    where
        CompactString: Borrow<Q>,
        Q: Hash + Eq,
    {
        self.raw.contains(value)
    }

    #[inline]
    pub fn contains_normalized<Q: ?Sized>(&self, value: &Q) -> bool
    where
        CompactString: Borrow<Q>,
        Q: Hash + Eq,
    {
        self.normalized.contains(value)
    }
}

impl<Q> Extend<Q> for StopWordList
where
    Q: ToCompactString,
{
    fn extend<T: IntoIterator<Item = Q>>(&mut self, iter: T) {
        for value in iter.into_iter() {
            let word = value.to_compact_string();
            let normalized = CompactString::from(clean(&word, self.normalize));
            if !normalized.is_empty() {
                self.normalized.insert(normalized);
            }
            self.raw.insert(word);
        }
        self.raw.shrink_to_fit();
        self.normalized.shrink_to_fit();
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Hash, Eq, PartialEq)]
#[serde(try_from = "StopWordRepositoryDev", into = "StopWordRepositoryDev")]
pub enum StopWordRepository {
    /// The lists compiled into this crate.
    Bundled,
    /// A directory with `<iso 639-1>.txt` or `<iso 639-3>.txt` files.
    DirRepo {
        with_bundled: bool,
        dir: Utf8PathBuf,
    },
    /// A single file for a single language.
    File {
        with_bundled: bool,
        language: Language,
        file: Utf8PathBuf,
    },
}

#[derive(Debug, Error)]
#[error("Was not able to properly convert the definition to a recognized StopWordRepository definition: {0:?}")]
#[repr(transparent)]
pub struct StopWordRepositoryConversionError(StopWordRepositoryDev);

impl TryFrom<StopWordRepositoryDev> for StopWordRepository {
    type Error = StopWordRepositoryConversionError;

    fn try_from(value: StopWordRepositoryDev) -> Result<Self, Self::Error> {
        match value {
            StopWordRepositoryDev {
                with_bundled,
                dir: Some(dir),
                file: None,
                language: None,
            } => Ok(Self::DirRepo { with_bundled, dir }),
            StopWordRepositoryDev {
                with_bundled,
                dir: None,
                file: Some(file),
                language: Some(language),
            } => Ok(Self::File {
                with_bundled,
                file,
                language,
            }),
            StopWordRepositoryDev {
                with_bundled: true,
                dir: None,
                file: None,
                language: None,
            } => Ok(Self::Bundled),
            err => Err(StopWordRepositoryConversionError(err)),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
#[serde(default)]
struct StopWordRepositoryDev {
    #[serde(skip_serializing_if = "std::ops::Not::not", rename = "bundled")]
    with_bundled: bool,
    #[serde(skip_serializing_if = "Option::is_none", alias = "directory")]
    dir: Option<Utf8PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    file: Option<Utf8PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    language: Option<Language>,
}

impl From<StopWordRepository> for StopWordRepositoryDev {
    fn from(value: StopWordRepository) -> Self {
        match value {
            StopWordRepository::Bundled => StopWordRepositoryDev {
                with_bundled: true,
                ..Default::default()
            },
            StopWordRepository::DirRepo { dir, with_bundled } => StopWordRepositoryDev {
                dir: Some(dir),
                with_bundled,
                ..Default::default()
            },
            StopWordRepository::File {
                file,
                language,
                with_bundled,
            } => StopWordRepositoryDev {
                file: Some(file),
                language: Some(language),
                with_bundled,
                ..Default::default()
            },
        }
    }
}

impl StopWordRepository {
    /// Provides the stop word list for a specific language
    fn load_raw_stop_words(&self, language: &Language) -> Option<Vec<String>> {
        fn load_bundled(language: &Language) -> Option<Vec<String>> {
            Some(
                bundled_stopwords_for(language)?
                    .into_iter()
                    .map(str::to_owned)
                    .collect(),
            )
        }

        fn load_file(
            file: impl AsRef<Path>,
            with_bundled: bool,
            language: &Language,
        ) -> Option<Vec<String>> {
            let mut result = BufReader::new(File::open(file).ok()?)
                .lines()
                .collect::<Result<Vec<_>, _>>()
                .ok()?;
            result.retain(|value| !value.trim().is_empty());
            if with_bundled {
                if let Some(default) = load_bundled(language) {
                    result.extend(default)
                }
            }
            Some(result)
        }

        match self {
            StopWordRepository::Bundled => load_bundled(language),
            StopWordRepository::DirRepo { dir, with_bundled } => {
                if dir.exists() {
                    let file = dir.join(format!("{}.txt", language.to_639_3()));
                    if file.exists() {
                        load_file(file, *with_bundled, language)
                    } else if let Some(file) = language
                        .to_639_1()
                        .map(|value| dir.join(format!("{}.txt", value)))
                        .filter(|p| p.exists())
                    {
                        load_file(file, *with_bundled, language)
                    } else {
                        log::warn!("The file {} does not exist! Falling back to the bundled list only if selected for the repo!", file);
                        with_bundled.then(|| load_bundled(language)).flatten()
                    }
                } else {
                    log::warn!("The directory {} does not exist! Falling back to the bundled list only if selected for the repo!", dir);
                    with_bundled.then(|| load_bundled(language)).flatten()
                }
            }
            StopWordRepository::File {
                file,
                language: file_lang,
                with_bundled,
            } => {
                if language != file_lang {
                    None
                } else if file.exists() {
                    load_file(file, *with_bundled, language)
                } else {
                    log::warn!("The file {} does not exist! Falling back to the bundled list only if selected for the repo!", file);
                    with_bundled.then(|| load_bundled(language)).flatten()
                }
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::{ContainsKind, StopWordRegistry, StopWordRepository};
    use crate::configs::StopwordRegistryConfig;
    use camino_tempfile::tempdir;
    use isolang::Language;
    use std::io::Write;

    #[test]
    fn bundled_list_matches_raw_and_cleaned_words() {
        let registry = StopWordRegistry::initialize(&StopwordRegistryConfig::default());
        let list = registry.load(&Language::Eng, true).unwrap();
        assert!(list.contains(ContainsKind::Raw, "don't"));
        assert!(!list.contains(ContainsKind::Raw, "dont"));
        assert!(list.contains(ContainsKind::Both, "dont"));
        assert!(!list.contains(ContainsKind::Both, "coffee"));
    }

    #[test]
    fn file_repository_is_combined_with_bundled() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("eng.txt");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "java").unwrap();
        writeln!(file).unwrap();
        drop(file);

        let mut registry = StopWordRegistry::default();
        registry.register(StopWordRepository::DirRepo {
            with_bundled: true,
            dir: dir.path().to_path_buf(),
        });
        let list = registry.load(&Language::Eng, false).unwrap();
        assert!(list.contains_raw("java"));
        assert!(list.contains_raw("the"));
        assert_eq!(175, list.len());
    }

    #[test]
    fn unknown_language_yields_nothing() {
        let registry = StopWordRegistry::initialize(&StopwordRegistryConfig::default());
        assert!(registry.load(&Language::Deu, true).is_none());
    }

    #[test]
    fn repository_roundtrips_through_serde() {
        let repos: Vec<StopWordRepository> = serde_json::from_str(
            r#"[{"bundled": true}, {"dir": "stopwords"}, {"file": "java.txt", "language": "eng", "bundled": true}]"#,
        )
        .unwrap();
        assert_eq!(StopWordRepository::Bundled, repos[0]);
        assert_eq!(
            StopWordRepository::DirRepo {
                with_bundled: false,
                dir: "stopwords".into()
            },
            repos[1]
        );
        assert!(matches!(repos[2], StopWordRepository::File { with_bundled: true, .. }));
        assert!(serde_json::from_str::<StopWordRepository>(r#"{}"#).is_err());
    }
}
