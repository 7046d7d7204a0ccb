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

//! Turns raw short messages into stemmed token streams and a pruned,
//! dense document-term matrix.

pub mod bundled;
pub mod cleaning;
pub mod configs;
pub mod corpus;
pub mod error;
pub mod features;
pub mod identifiers;
pub mod normalizer;
pub mod stopword_registry;

pub use error::FeatureError;
pub use features::{FeatureTable, Vocabulary};
pub use normalizer::Normalizer;
