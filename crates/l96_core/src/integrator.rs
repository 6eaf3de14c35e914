use crate::{
    solvers::{Euler, RK4},
    traits::{DynamicalSystem, Integrator, ParameterRecord, Parameterized, Steppable},
};
use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepperKind {
    #[default]
    Rk4,
    Euler,
}

impl StepperKind {
    fn build(self, dim: usize) -> InternalStepper {
        match self {
            StepperKind::Rk4 => InternalStepper::Rk4(RK4::new(dim)),
            StepperKind::Euler => InternalStepper::Euler(Euler::new(dim)),
        }
    }
}

enum InternalStepper {
    Rk4(RK4<f64>),
    Euler(Euler<f64>),
}

impl InternalStepper {
    fn step(
        &mut self,
        system: &impl DynamicalSystem<f64>,
        t: &mut f64,
        state: &mut [f64],
        dt: f64,
    ) {
        match self {
            InternalStepper::Rk4(s) => s.step(system, t, state, dt),
            InternalStepper::Euler(s) => s.step(system, t, state, dt),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IntegratorSettings {
    pub dt: f64,
    pub initial_time: f64,
    pub stepper: StepperKind,
}

impl Default for IntegratorSettings {
    fn default() -> Self {
        Self {
            dt: 0.01,
            initial_time: 0.0,
            stepper: StepperKind::Rk4,
        }
    }
}

/// Fixed-step integrator that owns the live time and state of a system.
pub struct OdeIntegrator<S> {
    system: S,
    stepper: InternalStepper,
    state: Vec<f64>,
    t: f64,
    dt: f64,
}

impl<S> OdeIntegrator<S>
where
    S: DynamicalSystem<f64> + Parameterized,
{
    pub fn new(system: S, initial_state: Vec<f64>, settings: IntegratorSettings) -> Result<Self> {
        let dim = system.dimension();
        if initial_state.is_empty() {
            bail!("Initial state must have positive dimension.");
        }
        if initial_state.len() != dim {
            bail!(
                "Initial state dimension mismatch. Expected {}, got {}.",
                dim,
                initial_state.len()
            );
        }
        if !(settings.dt.is_finite() && settings.dt > 0.0) {
            bail!("Step size dt must be positive and finite.");
        }
        if !settings.initial_time.is_finite() {
            bail!("Initial time must be finite.");
        }

        debug!(
            dim,
            dt = settings.dt,
            stepper = ?settings.stepper,
            "built integrator"
        );

        Ok(Self {
            stepper: settings.stepper.build(dim),
            system,
            state: initial_state,
            t: settings.initial_time,
            dt: settings.dt,
        })
    }

    pub fn system(&self) -> &S {
        &self.system
    }

    pub fn dt(&self) -> f64 {
        self.dt
    }

    /// Performs a single step of size dt.
    pub fn step(&mut self) {
        self.stepper
            .step(&self.system, &mut self.t, &mut self.state, self.dt);
    }
}

impl<S> Integrator for OdeIntegrator<S>
where
    S: DynamicalSystem<f64> + Parameterized,
{
    fn time(&self) -> f64 {
        self.t
    }

    fn state(&self) -> &[f64] {
        &self.state
    }

    fn parameters(&self) -> ParameterRecord {
        self.system.parameters()
    }

    fn run(&mut self, steps: usize) {
        for _ in 0..steps {
            self.step();
        }
    }
}
