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

use std::fmt::{Display, Formatter};
use itertools::Itertools;
use serde::{Deserialize, Serialize};

/// The closed, lexicographically ordered set of labels.
/// The position of a label is its class index.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LabelSet {
    labels: Vec<String>,
}

impl LabelSet {
    pub fn from_labels<I: IntoIterator<Item = S>, S: Into<String>>(labels: I) -> Self {
        Self {
            labels: labels.into_iter().map(Into::into).sorted().dedup().collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn index_of(&self, label: &str) -> Option<usize> {
        self.labels.binary_search_by(|value| value.as_str().cmp(label)).ok()
    }

    pub fn contains(&self, label: &str) -> bool {
        self.index_of(label).is_some()
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.labels.get(index).map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.labels
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.labels.iter().map(String::as_str)
    }
}

impl Display for LabelSet {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.labels.iter().join(", "))
    }
}

#[cfg(test)]
mod test {
    use super::LabelSet;

    #[test]
    fn sorted_and_distinct() {
        let labels = LabelSet::from_labels(["jobs", "coffee", "jobs", "learning"]);
        assert_eq!(3, labels.len());
        assert_eq!(vec!["coffee", "jobs", "learning"], labels.iter().collect::<Vec<_>>());
        assert_eq!(Some(1), labels.index_of("jobs"));
        assert_eq!(None, labels.index_of("help"));
        assert_eq!(Some("learning"), labels.get(2));
        assert_eq!("[coffee, jobs, learning]", labels.to_string());
    }
}
