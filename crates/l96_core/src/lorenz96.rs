//! The Lorenz-96 model (equation 1 of Lorenz 2005, doi:10.1175/JAS3430.1).
//!
//! N oscillators sit on a ring and are coupled through a quadratic advection
//! term, a linear damping and a constant forcing `F`:
//!
//! ```text
//! forward:   dx[i] =  x[i-1] * (x[i+1] - x[i-2]) - x[i] + F
//! backward:  dx[i] = -x[i+1] * (x[i+2] - x[i-1]) - x[i] + F
//! ```
//!
//! Indices wrap modulo N.

use crate::{
    error::ModelError,
    integrator::{IntegratorSettings, OdeIntegrator},
    traits::{DynamicalSystem, ParameterRecord, Parameterized, Scalar},
};
use anyhow::{Context, Result};
use rand::Rng;
use rand_distr::{Distribution, Normal};
use serde::{Deserialize, Serialize};

/// Direction of the nonlinear advection term.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stencil {
    /// `x[i-1] * (x[i+1] - x[i-2])`
    #[default]
    Forward,
    /// `-x[i+1] * (x[i+2] - x[i-1])`
    Backward,
}

/// Evaluates the Lorenz-96 vector field into `out`.
///
/// `out` must have the same length as `x`. For N < 3 the neighbour indices
/// alias each other and the result is not the Lorenz-96 system; callers are
/// expected to pass N >= 3.
pub fn lorenz96_rhs<T: Scalar>(x: &[T], forcing: T, stencil: Stencil, out: &mut [T]) {
    let n = x.len() as isize;
    let at = |i: isize| x[i.rem_euclid(n) as usize];

    match stencil {
        Stencil::Forward => {
            for i in 0..n {
                out[i as usize] = at(i - 1) * (at(i + 1) - at(i - 2)) - at(i) + forcing;
            }
        }
        Stencil::Backward => {
            for i in 0..n {
                out[i as usize] = -at(i + 1) * (at(i + 2) - at(i - 1)) - at(i) + forcing;
            }
        }
    }
}

/// Allocating convenience wrapper around [`lorenz96_rhs`].
pub fn vector_field(x: &[f64], params: &Lorenz96Parameters) -> Vec<f64> {
    let mut out = vec![0.0; x.len()];
    lorenz96_rhs(x, params.forcing, params.stencil, &mut out);
    out
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Lorenz96Parameters {
    /// Forcing constant `F`.
    pub forcing: f64,
    /// Number of oscillators `N`.
    pub dimension: usize,
    /// Required in config files: the standard choices differ in direction.
    pub stencil: Stencil,
}

impl Lorenz96Parameters {
    pub fn new(forcing: f64, dimension: usize, stencil: Stencil) -> Result<Self, ModelError> {
        let params = Self {
            forcing,
            dimension,
            stencil,
        };
        params.validate()?;
        Ok(params)
    }

    pub fn validate(&self) -> Result<(), ModelError> {
        if self.dimension == 0 {
            return Err(ModelError::ZeroDimension);
        }
        if !self.forcing.is_finite() {
            return Err(ModelError::NonFiniteForcing(self.forcing));
        }
        Ok(())
    }
}

impl Default for Lorenz96Parameters {
    fn default() -> Self {
        StandardChoice::Forcing10Dim30.parameters()
    }
}

/// Reference parameter choices used across the literature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StandardChoice {
    /// F = 8, N = 40, forward stencil.
    Forcing8Dim40,
    /// F = 10, N = 30, backward stencil (Lorenz 2005, p. 1577).
    Forcing10Dim30,
    /// F = 8, N = 50, forward stencil.
    Forcing8Dim50,
}

impl StandardChoice {
    pub fn parameters(self) -> Lorenz96Parameters {
        let (forcing, dimension, stencil) = match self {
            StandardChoice::Forcing8Dim40 => (8.0, 40, Stencil::Forward),
            StandardChoice::Forcing10Dim30 => (10.0, 30, Stencil::Backward),
            StandardChoice::Forcing8Dim50 => (8.0, 50, Stencil::Forward),
        };
        Lorenz96Parameters {
            forcing,
            dimension,
            stencil,
        }
    }
}

/// Normal distribution used to synthesise an initial condition.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InitialCondition {
    pub mean: f64,
    pub std_dev: f64,
}

impl Default for InitialCondition {
    fn default() -> Self {
        Self {
            mean: 6.0,
            std_dev: 2.0,
        }
    }
}

/// Draws `dimension` independent samples from `N(mean, std_dev^2)`.
pub fn random_initial_condition<R: Rng + ?Sized>(
    dimension: usize,
    settings: InitialCondition,
    rng: &mut R,
) -> Result<Vec<f64>, ModelError> {
    let invalid = ModelError::InvalidDistribution {
        mean: settings.mean,
        std_dev: settings.std_dev,
    };
    if !(settings.mean.is_finite() && settings.std_dev.is_finite() && settings.std_dev >= 0.0) {
        return Err(invalid);
    }
    let normal = Normal::new(settings.mean, settings.std_dev).map_err(|_| invalid)?;
    Ok(normal.sample_iter(rng).take(dimension).collect())
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lorenz96 {
    params: Lorenz96Parameters,
}

impl Lorenz96 {
    pub fn new(params: Lorenz96Parameters) -> Result<Self, ModelError> {
        params.validate()?;
        Ok(Self { params })
    }

    pub fn params(&self) -> &Lorenz96Parameters {
        &self.params
    }

    /// Builds a stepping service for this model.
    ///
    /// When `initial_condition` is `None` one is drawn from `rng` with the
    /// default [`InitialCondition`] distribution.
    pub fn integrator<R: Rng + ?Sized>(
        self,
        initial_condition: Option<Vec<f64>>,
        rng: &mut R,
        settings: IntegratorSettings,
    ) -> Result<OdeIntegrator<Self>> {
        let dimension = self.params.dimension;
        let state = match initial_condition {
            Some(ic) => {
                if ic.len() != dimension {
                    return Err(ModelError::InitialConditionLength {
                        expected: dimension,
                        got: ic.len(),
                    }
                    .into());
                }
                ic
            }
            None => random_initial_condition(dimension, InitialCondition::default(), rng)?,
        };
        OdeIntegrator::new(self, state, settings).context("Failed to build Lorenz-96 integrator.")
    }
}

impl<T: Scalar> DynamicalSystem<T> for Lorenz96 {
    fn dimension(&self) -> usize {
        self.params.dimension
    }

    fn apply(&self, _t: T, x: &[T], out: &mut [T]) {
        let forcing = T::from_f64(self.params.forcing).unwrap_or_else(T::nan);
        lorenz96_rhs(x, forcing, self.params.stencil, out);
    }
}

impl Parameterized for Lorenz96 {
    fn parameters(&self) -> ParameterRecord {
        ParameterRecord::from([
            ("F".to_string(), self.params.forcing),
            ("N".to_string(), self.params.dimension as f64),
        ])
    }
}
