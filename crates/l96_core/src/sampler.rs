use crate::{
    dataset::Trajectory,
    traits::{Accumulator, Integrator},
};
use tracing::{debug, info};

/// Parallel logs of sample times and copied states.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SampleLog {
    times: Vec<f64>,
    snapshots: Vec<Vec<f64>>,
}

impl SampleLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn times(&self) -> &[f64] {
        &self.times
    }

    pub fn snapshots(&self) -> &[Vec<f64>] {
        &self.snapshots
    }
}

impl Accumulator for SampleLog {
    fn append(&mut self, time: f64, state: &[f64]) {
        self.times.push(time);
        self.snapshots.push(state.to_vec());
    }

    fn len(&self) -> usize {
        self.times.len()
    }
}

/// Drives an [`Integrator`] and records its trajectory.
pub struct TrajectorySampler<I> {
    integrator: I,
    log: SampleLog,
    progress: bool,
}

impl<I: Integrator> TrajectorySampler<I> {
    pub fn new(integrator: I) -> Self {
        Self {
            integrator,
            log: SampleLog::new(),
            progress: true,
        }
    }

    /// Enables or disables progress reporting during [`run_sampling`](Self::run_sampling).
    pub fn with_progress(mut self, progress: bool) -> Self {
        self.progress = progress;
        self
    }

    /// Records a copy of `state` at `time`.
    pub fn look(&mut self, time: f64, state: &[f64]) {
        self.log.append(time, state);
    }

    /// Records the initial condition, then `number` further samples spaced
    /// `sub_steps` integrator steps apart. Records `number + 1` samples in total.
    pub fn run_sampling(&mut self, number: usize, sub_steps: usize) {
        self.look_at_integrator();

        let report_every = (number / 10).max(1);
        for done in 1..=number {
            self.integrator.run(sub_steps);
            self.look_at_integrator();

            if self.progress && (done % report_every == 0 || done == number) {
                info!(
                    done,
                    total = number,
                    time = self.integrator.time(),
                    "sampling progress"
                );
            }
        }

        debug!(
            samples = self.log.len(),
            time = self.integrator.time(),
            "sampling finished"
        );
    }

    fn look_at_integrator(&mut self) {
        self.log
            .append(self.integrator.time(), self.integrator.state());
    }

    /// Assembles the recorded samples into a [`Trajectory`].
    ///
    /// Returns `None` when nothing has been recorded yet.
    pub fn observations(&self) -> Option<Trajectory> {
        if self.log.is_empty() {
            info!("no observations recorded yet");
            return None;
        }
        Trajectory::from_samples(
            self.log.times(),
            self.log.snapshots(),
            self.integrator.parameters(),
        )
    }

    pub fn sample_count(&self) -> usize {
        self.log.len()
    }

    pub fn is_empty(&self) -> bool {
        self.log.is_empty()
    }

    pub fn log(&self) -> &SampleLog {
        &self.log
    }

    pub fn integrator(&self) -> &I {
        &self.integrator
    }

    pub fn integrator_mut(&mut self) -> &mut I {
        &mut self.integrator
    }

    pub fn into_parts(self) -> (I, SampleLog) {
        (self.integrator, self.log)
    }
}
