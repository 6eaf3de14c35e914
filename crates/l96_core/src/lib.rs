pub mod dataset;
pub mod error;
pub mod integrator;
pub mod lorenz96;
pub mod sampler;
pub mod solvers;
/// The `l96_core` crate generates reference trajectories of the Lorenz-96 system.
///
/// Key components:
/// - **Traits**: `Scalar`, `DynamicalSystem`, `Steppable` (one-step schemes), and the
///   `Integrator`/`Accumulator` capabilities the sampler is written against.
/// - **Lorenz96**: the cyclic vector field with forward and backward stencils, standard
///   parameter choices and random initial conditions.
/// - **Solvers / Integrator**: fixed-step RK4 and Euler schemes and the stepping service
///   that owns time and state.
/// - **Sampler**: `TrajectorySampler`, recording snapshots into a labelled `Trajectory`.
pub mod traits;

pub use dataset::Trajectory;
pub use error::ModelError;
pub use integrator::{IntegratorSettings, OdeIntegrator, StepperKind};
pub use lorenz96::{Lorenz96, Lorenz96Parameters, StandardChoice, Stencil};
pub use sampler::{SampleLog, TrajectorySampler};
