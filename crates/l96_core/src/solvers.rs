use crate::traits::{DynamicalSystem, Scalar, Steppable};

/// Writes `y + h * k` into `out`.
fn offset<T: Scalar>(base: &[T], slope: &[T], h: T, out: &mut [T]) {
    for ((o, &y), &k) in out.iter_mut().zip(base).zip(slope) {
        *o = y + h * k;
    }
}

/// Fourth-order Runge-Kutta with stage buffers sized once at construction.
pub struct RK4<T: Scalar> {
    stages: [Vec<T>; 4],
    point: Vec<T>,
}

impl<T: Scalar> RK4<T> {
    pub fn new(dim: usize) -> Self {
        Self {
            stages: std::array::from_fn(|_| vec![T::zero(); dim]),
            point: vec![T::zero(); dim],
        }
    }
}

impl<T: Scalar> Steppable<T> for RK4<T> {
    fn step(&mut self, system: &impl DynamicalSystem<T>, t: &mut T, state: &mut [T], dt: T) {
        let two = T::one() + T::one();
        let half_dt = dt / two;
        let t0 = *t;
        let [k1, k2, k3, k4] = &mut self.stages;

        system.apply(t0, state, k1);
        offset(state, k1, half_dt, &mut self.point);
        system.apply(t0 + half_dt, &self.point, k2);
        offset(state, k2, half_dt, &mut self.point);
        system.apply(t0 + half_dt, &self.point, k3);
        offset(state, k3, dt, &mut self.point);
        system.apply(t0 + dt, &self.point, k4);

        let weight = dt / (two + two + two);
        for (i, y) in state.iter_mut().enumerate() {
            *y = *y + weight * (k1[i] + two * (k2[i] + k3[i]) + k4[i]);
        }

        *t = t0 + dt;
    }
}

/// Forward Euler, one vector field evaluation per step.
pub struct Euler<T: Scalar> {
    slope: Vec<T>,
}

impl<T: Scalar> Euler<T> {
    pub fn new(dim: usize) -> Self {
        Self {
            slope: vec![T::zero(); dim],
        }
    }
}

impl<T: Scalar> Steppable<T> for Euler<T> {
    fn step(&mut self, system: &impl DynamicalSystem<T>, t: &mut T, state: &mut [T], dt: T) {
        system.apply(*t, state, &mut self.slope);
        for (y, &k) in state.iter_mut().zip(&self.slope) {
            *y = *y + dt * k;
        }
        *t = *t + dt;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Decay {
        rate: f64,
    }

    impl DynamicalSystem<f64> for Decay {
        fn dimension(&self) -> usize {
            1
        }

        fn apply(&self, _t: f64, x: &[f64], out: &mut [f64]) {
            out[0] = -self.rate * x[0];
        }
    }

    #[test]
    fn rk4_matches_exponential_decay() {
        let system = Decay { rate: 1.0 };
        let mut solver = RK4::new(1);
        let mut t = 0.0;
        let mut state = vec![1.0];
        for _ in 0..100 {
            solver.step(&system, &mut t, &mut state, 0.01);
        }
        assert!((t - 1.0).abs() < 1e-12);
        assert!((state[0] - (-1.0f64).exp()).abs() < 1e-10);
    }

    #[test]
    fn euler_takes_a_single_explicit_step() {
        let system = Decay { rate: 2.0 };
        let mut solver = Euler::new(1);
        let mut t = 1.0;
        let mut state = vec![3.0];
        solver.step(&system, &mut t, &mut state, 0.25);
        assert!((t - 1.25).abs() < 1e-15);
        assert!((state[0] - 1.5).abs() < 1e-15);
    }

    #[test]
    fn rk4_works_in_single_precision() {
        let system = ConstantRate;
        let mut solver = RK4::<f32>::new(2);
        let mut t = 0.0f32;
        let mut state = vec![0.0f32, 1.0];
        solver.step(&system, &mut t, &mut state, 0.5);
        assert!((state[0] - 0.5).abs() < 1e-6);
        assert!((state[1] - 0.0).abs() < 1e-6);
    }

    struct ConstantRate;

    impl DynamicalSystem<f32> for ConstantRate {
        fn dimension(&self) -> usize {
            2
        }

        fn apply(&self, _t: f32, _x: &[f32], out: &mut [f32]) {
            out[0] = 1.0;
            out[1] = -2.0;
        }
    }
}
