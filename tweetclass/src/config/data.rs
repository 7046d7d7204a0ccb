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

use camino::Utf8PathBuf;
use serde::{Deserialize, Serialize};

/// Where and how the labelled messages are read.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename(serialize = "Data"))]
pub struct DataConfig {
    /// The csv file with the labelled messages
    #[serde(default)]
    pub input: Option<Utf8PathBuf>,

    /// The header of the column with the raw text
    #[serde(default = "_default_text_column")]
    pub text_column: String,

    /// The header of the column with the label
    #[serde(default = "_default_class_column")]
    pub class_column: String,

    /// The closed set of labels. If set, any other label in the input is an error.
    /// Otherwise the labels are derived from the input.
    #[serde(default)]
    pub classes: Option<Vec<String>>,
}

fn _default_text_column() -> String {
    "text".to_string()
}
fn _default_class_column() -> String {
    "class".to_string()
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            input: None,
            text_column: _default_text_column(),
            class_column: _default_class_column(),
            classes: None,
        }
    }
}
