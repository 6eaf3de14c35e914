use crate::traits::ParameterRecord;
use nalgebra::DMatrix;
use serde::{Deserialize, Serialize};

pub const VARIABLE_NAME: &str = "X";
pub const TIME_DIM: &str = "time";
pub const SPACE_DIM: &str = "space";

/// A labelled `(time, space)` array of recorded states.
///
/// Row `i` of `values` is the state recorded at `time[i]`; column `j` is the
/// oscillator labelled `space[j]`, with labels running from 1 to N.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trajectory {
    pub name: String,
    pub dims: [String; 2],
    pub time: Vec<f64>,
    pub space: Vec<usize>,
    pub values: DMatrix<f64>,
    /// Model parameters the trajectory was generated with.
    pub attrs: ParameterRecord,
}

impl Trajectory {
    /// Stacks `snapshots` in order. Returns `None` when there is nothing to stack.
    ///
    /// # Panics
    ///
    /// Panics if `times` and `snapshots` differ in length, if the snapshots
    /// differ in length from each other, or if their length disagrees with an
    /// `N` entry in `attrs`.
    pub fn from_samples(
        times: &[f64],
        snapshots: &[Vec<f64>],
        attrs: ParameterRecord,
    ) -> Option<Self> {
        let width = snapshots.first()?.len();
        assert_eq!(
            times.len(),
            snapshots.len(),
            "sample log has {} times but {} snapshots",
            times.len(),
            snapshots.len()
        );
        if let Some(i) = snapshots.iter().position(|s| s.len() != width) {
            panic!(
                "snapshot {i} has length {}, expected {width}",
                snapshots[i].len()
            );
        }
        if let Some(&n) = attrs.get("N") {
            assert!(
                n == width as f64,
                "snapshots have length {width} but parameter N is {n}"
            );
        }

        let values = DMatrix::from_fn(snapshots.len(), width, |r, c| snapshots[r][c]);

        Some(Self {
            name: VARIABLE_NAME.to_string(),
            dims: [TIME_DIM.to_string(), SPACE_DIM.to_string()],
            time: times.to_vec(),
            space: (1..=width).collect(),
            values,
            attrs,
        })
    }

    /// `(number of samples, N)`
    pub fn shape(&self) -> (usize, usize) {
        self.values.shape()
    }

    /// Value at a time index and a 1-based space label.
    pub fn value(&self, time_index: usize, space_label: usize) -> Option<f64> {
        let column = space_label.checked_sub(1)?;
        self.values.get((time_index, column)).copied()
    }

    pub fn snapshot(&self, time_index: usize) -> Option<Vec<f64>> {
        if time_index >= self.values.nrows() {
            return None;
        }
        Some(self.values.row(time_index).iter().copied().collect())
    }

    pub fn attr(&self, name: &str) -> Option<f64> {
        self.attrs.get(name).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attrs() -> ParameterRecord {
        ParameterRecord::from([("F".to_string(), 8.0), ("N".to_string(), 3.0)])
    }

    #[test]
    fn empty_samples_build_nothing() {
        assert!(Trajectory::from_samples(&[], &[], attrs()).is_none());
    }

    #[test]
    fn stacks_rows_in_recording_order() {
        let times = [0.0, 0.5];
        let snapshots = vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]];
        let trajectory = Trajectory::from_samples(&times, &snapshots, attrs()).expect("dataset");

        assert_eq!(trajectory.name, "X");
        assert_eq!(trajectory.dims, ["time".to_string(), "space".to_string()]);
        assert_eq!(trajectory.shape(), (2, 3));
        assert_eq!(trajectory.time, vec![0.0, 0.5]);
        assert_eq!(trajectory.space, vec![1, 2, 3]);
        assert_eq!(trajectory.value(0, 1), Some(1.0));
        assert_eq!(trajectory.value(1, 3), Some(6.0));
        assert_eq!(trajectory.value(1, 0), None);
        assert_eq!(trajectory.value(2, 1), None);
        assert_eq!(trajectory.snapshot(1), Some(vec![4.0, 5.0, 6.0]));
        assert_eq!(trajectory.snapshot(2), None);
        assert_eq!(trajectory.attr("F"), Some(8.0));
        assert_eq!(trajectory.attr("G"), None);
    }

    #[test]
    #[should_panic(expected = "snapshot 1 has length 3, expected 2")]
    fn ragged_snapshots_are_rejected() {
        let snapshots = vec![vec![1.0, 2.0], vec![3.0, 4.0, 5.0]];
        let _ = Trajectory::from_samples(&[0.0, 1.0], &snapshots, ParameterRecord::new());
    }

    #[test]
    #[should_panic(expected = "parameter N is 3")]
    fn width_must_match_parameter_n() {
        let _ = Trajectory::from_samples(&[0.0], &[vec![1.0, 2.0]], attrs());
    }

    #[test]
    #[should_panic(expected = "2 times but 1 snapshots")]
    fn times_and_snapshots_must_pair_up() {
        let _ = Trajectory::from_samples(&[0.0, 1.0], &[vec![1.0, 2.0, 3.0]], attrs());
    }

    #[test]
    fn serializes_with_labels_and_attributes() {
        let trajectory =
            Trajectory::from_samples(&[0.0], &[vec![1.0, 2.0, 3.0]], attrs()).expect("dataset");
        let json = serde_json::to_value(&trajectory).expect("serialize");
        assert_eq!(json["name"], "X");
        assert_eq!(json["dims"][1], "space");
        assert_eq!(json["attrs"]["N"], 3.0);

        let back: Trajectory = serde_json::from_value(json).expect("deserialize");
        assert_eq!(back, trajectory);
    }
}
