use num_traits::{Float, FromPrimitive};
use std::collections::BTreeMap;
use std::fmt::Debug;

/// Floating-point element type of states and vector fields (`f32`, `f64`).
pub trait Scalar: Float + FromPrimitive + Debug + 'static {}

impl<T: Float + FromPrimitive + Debug + 'static> Scalar for T {}

/// Named scalar parameters of a model, e.g. `{"F": 8.0, "N": 40.0}`.
pub type ParameterRecord = BTreeMap<String, f64>;

/// An autonomous or time-dependent ODE `dx/dt = f(t, x)`.
pub trait DynamicalSystem<T: Scalar> {
    /// Length of the state vector.
    fn dimension(&self) -> usize;

    /// Writes `f(t, x)` into `out`, which has the same length as `x`.
    ///
    /// Called several times per integration step, so implementations should
    /// not allocate.
    fn apply(&self, t: T, x: &[T], out: &mut [T]);
}

/// Models that can describe themselves as a parameter record.
pub trait Parameterized {
    fn parameters(&self) -> ParameterRecord;
}

/// A one-step scheme. Advances `t` and `state` in place by `dt`.
pub trait Steppable<T: Scalar> {
    fn step(&mut self, system: &impl DynamicalSystem<T>, t: &mut T, state: &mut [T], dt: T);
}

/// A stepping service that owns its time and state and can be advanced
/// by a number of internal steps.
pub trait Integrator {
    fn time(&self) -> f64;

    fn state(&self) -> &[f64];

    /// Parameters of the model being integrated.
    fn parameters(&self) -> ParameterRecord;

    /// Advances the simulation by `steps` internal steps.
    fn run(&mut self, steps: usize);
}

/// Append-only store of `(time, state)` samples.
///
/// Implementations must copy `state`: the caller is free to mutate and reuse
/// the same buffer after `append` returns.
pub trait Accumulator {
    fn append(&mut self, time: f64, state: &[f64]);

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
