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
use serde::{Deserialize, Serialize};
use strum::{Display as StrumDisplay, EnumString};
use crate::error::SvmError;

/// The default number of cross validation folds
pub const DEFAULT_FOLDS: usize = 10;

/// The kernel of a support vector machine
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize, StrumDisplay, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Kernel {
    Linear,
    /// Radial basis function `exp(-gamma * |x - y|^2)`
    Rbf,
}

/// A single point of the hyperparameter grid.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct HyperParameters {
    pub kernel: Kernel,
    pub cost: f64,
    /// Only used by [Kernel::Rbf]
    #[serde(default)]
    pub gamma: Option<f64>,
}

impl HyperParameters {
    pub const fn linear(cost: f64) -> Self {
        Self {
            kernel: Kernel::Linear,
            cost,
            gamma: None,
        }
    }

    pub const fn rbf(cost: f64, gamma: f64) -> Self {
        Self {
            kernel: Kernel::Rbf,
            cost,
            gamma: Some(gamma),
        }
    }

    /// Checks that the values can be handed to the solver.
    pub fn validate(&self) -> Result<(), SvmError> {
        if !(self.cost.is_finite() && self.cost > 0.0) {
            return Err(SvmError::InvalidParameters(format!(
                "the cost has to be positive but was {}",
                self.cost
            )));
        }
        match (self.kernel, self.gamma) {
            (Kernel::Linear, _) => Ok(()),
            (Kernel::Rbf, Some(gamma)) if gamma.is_finite() && gamma > 0.0 => Ok(()),
            (Kernel::Rbf, Some(gamma)) => Err(SvmError::InvalidParameters(format!(
                "gamma has to be positive but was {gamma}"
            ))),
            (Kernel::Rbf, None) => Err(SvmError::InvalidParameters(
                "the rbf kernel needs a gamma".to_string(),
            )),
        }
    }
}

impl Display for HyperParameters {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.gamma {
            Some(gamma) if self.kernel == Kernel::Rbf => {
                write!(f, "{} (cost = {}, gamma = {})", self.kernel, self.cost, gamma)
            }
            _ => write!(f, "{} (cost = {})", self.kernel, self.cost),
        }
    }
}

/// The hyperparameter search space and the cross validation setup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridConfig {
    /// The number of cross validation folds
    #[serde(default = "_default_folds")]
    pub folds: usize,
    #[serde(default = "_default_kernels")]
    pub kernels: Vec<Kernel>,
    #[serde(default = "_default_costs")]
    pub costs: Vec<f64>,
    /// Only used for the rbf kernel
    #[serde(default = "_default_gammas")]
    pub gammas: Vec<f64>,
}

const fn _default_folds() -> usize {
    DEFAULT_FOLDS
}
fn _default_kernels() -> Vec<Kernel> {
    vec![Kernel::Linear, Kernel::Rbf]
}
fn _default_costs() -> Vec<f64> {
    vec![0.1, 1.0, 10.0, 100.0]
}
fn _default_gammas() -> Vec<f64> {
    vec![0.001, 0.01, 0.1, 1.0]
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            folds: _default_folds(),
            kernels: _default_kernels(),
            costs: _default_costs(),
            gammas: _default_gammas(),
        }
    }
}

impl GridConfig {
    /// Enumerates the grid in search order: kernels in the configured order,
    /// for the rbf kernel gamma in the outer and cost in the inner loop.
    pub fn points(&self) -> Vec<HyperParameters> {
        let mut points = Vec::new();
        for kernel in &self.kernels {
            match kernel {
                Kernel::Linear => {
                    points.extend(self.costs.iter().map(|cost| HyperParameters::linear(*cost)))
                }
                Kernel::Rbf => {
                    for gamma in &self.gammas {
                        points.extend(
                            self.costs
                                .iter()
                                .map(|cost| HyperParameters::rbf(*cost, *gamma)),
                        )
                    }
                }
            }
        }
        points
    }
}
