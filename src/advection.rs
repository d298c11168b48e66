//! # Advection of passive scalars
//! Finite volume solver for
//! $$
//! \partial_t q + \nabla \cdot (u q) = 0
//! $$
//! with a prescribed face-centered velocity `u`.
//!
//! Time stepping schemes, selected by name:
//! - `godunov`: single step with time centered face states
//! - `ssprk2`: two stage strong stability preserving Runge-Kutta,
//!   face states without time centering
//!
//! # Example
//! Advect a top-hat through a periodic box
//! ```
//! use rustfv::advection::Advection2;
//! use rustfv::integrate;
//!
//! let mut advection = Advection2::periodic([32, 8], [1., 0.25], 0.01).unwrap();
//! advection.set_uniform_velocity([1., 0.]);
//! advection.top_hat([0.25, 0.], [0.5, 0.25], 1.);
//! let mass = advection.eval_mass();
//! integrate(&mut advection, 0.1, None);
//! assert!((advection.eval_mass() - mass).abs() < 1e-12);
//! ```
use crate::boundary::{BoundaryCondition, BoundarySet};
use crate::convective::ConvectiveOperator;
use crate::error::{Error, Result};
use crate::level::PatchLevel;
use crate::patch::{CellData, FaceData, IndexBox, Patch};
use crate::reconstruct::Reconstruct;
use crate::Integrate;
use ndarray::{Array, Dim, Dimension, IntoDimension, Ix, Zip};
use std::collections::HashMap;

/// Time integration scheme
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeStepping {
    /// Single step, time centered face states
    Godunov,
    /// Two stage SSP Runge-Kutta
    Ssprk2,
}

impl TimeStepping {
    /// Registered names
    pub const NAMES: &'static [&'static str] = &["godunov", "ssprk2"];

    /// Select scheme by name
    ///
    /// # Errors
    /// When `name` is not registered.
    pub fn from_name(name: &str) -> Result<Self> {
        match name {
            "godunov" => Ok(Self::Godunov),
            "ssprk2" => Ok(Self::Ssprk2),
            _ => Err(Error::unknown_key("time stepping", name, Self::NAMES)),
        }
    }

    /// Registry name
    pub fn name(&self) -> &'static str {
        match self {
            Self::Godunov => "godunov",
            Self::Ssprk2 => "ssprk2",
        }
    }
}

/// Solver for scalar transport on a tiled domain
pub struct Advection<const N: usize> {
    /// Transported components, ghost padded
    pub q: CellData<f64, N>,
    /// Advecting velocity
    pub u: FaceData<f64, N>,
    /// Time
    pub time: f64,
    /// Time step size
    pub dt: f64,
    /// diagnostics like mass, min and max
    pub diagnostics: HashMap<String, Vec<f64>>,
    /// Time intervall for write fields
    /// If none, same intervall as diagnostics
    pub write_intervall: Option<f64>,
    op: ConvectiveOperator<f64, N>,
    level: PatchLevel<f64, N>,
    stepping: TimeStepping,
}

/// Two dimensional advection
pub type Advection2 = Advection<2>;
/// Three dimensional advection
pub type Advection3 = Advection<3>;

impl<const N: usize> Advection<N>
where
    Dim<[Ix; N]>: Dimension,
    [Ix; N]: IntoDimension<Dim = Dim<[Ix; N]>>,
{
    /// Advection on `level` with operator `op`
    ///
    /// Struct must be mutable, to perform the
    /// update step, which advances the solution
    /// by 1 timestep.
    ///
    /// # Arguments
    ///
    /// * `level` - Domain and its tiling into patches
    ///
    /// * `op` - Convective operator, defines the number of components
    ///
    /// * `dt` - Timestep size
    ///
    /// * `stepping` - Time stepping scheme, see [`TimeStepping::NAMES`]
    ///
    /// # Errors
    /// Non-positive time step or grid spacing, unknown time stepping.
    pub fn new(
        level: PatchLevel<f64, N>,
        op: ConvectiveOperator<f64, N>,
        dt: f64,
        stepping: &str,
    ) -> Result<Self> {
        if !(dt > 0.) {
            return Err(Error::invalid("dt", format!("must be positive, got {}", dt)));
        }
        if level.domain().dx.iter().any(|dx| !(*dx > 0.)) {
            return Err(Error::invalid(
                "dx",
                format!("must be positive, got {:?}", level.domain().dx),
            ));
        }
        let stepping = TimeStepping::from_name(stepping)?;
        let bbox = level.domain().bbox;
        let q = CellData::new(bbox, op.depth(), op.min_ghost_width());
        let u = FaceData::new(bbox, 1, 0);
        let mut diagnostics = HashMap::new();
        diagnostics.insert("time".to_string(), Vec::<f64>::new());
        diagnostics.insert("mass".to_string(), Vec::<f64>::new());
        diagnostics.insert("min".to_string(), Vec::<f64>::new());
        diagnostics.insert("max".to_string(), Vec::<f64>::new());
        log::info!(
            "Advection on {:?} with {} patch(es): {}, {}, {}",
            bbox,
            level.len(),
            op.interpolator.scheme.name(),
            op.form.name(),
            stepping.name()
        );
        Ok(Self {
            q,
            u,
            time: 0.,
            dt,
            diagnostics,
            write_intervall: None,
            op,
            level,
            stepping,
        })
    }

    /// Single component in a periodic box of size `length`,
    /// `xsppm7` reconstruction, conservative form, `godunov` stepping
    ///
    /// # Errors
    /// See [`Advection::new`]
    pub fn periodic(shape: [usize; N], length: [f64; N], dt: f64) -> Result<Self> {
        let mut dx = [0.; N];
        for axis in 0..N {
            dx[axis] = length[axis] / shape[axis] as f64;
        }
        let level = PatchLevel::new(Patch::new(IndexBox::from_shape(shape), dx), [1; N])?;
        let bc = vec![BoundarySet::uniform(BoundaryCondition::periodic())];
        let op = ConvectiveOperator::new("xsppm7", "conservative", bc)?;
        Self::new(level, op, dt, "godunov")
    }

    /// Time stepping scheme
    pub fn stepping(&self) -> TimeStepping {
        self.stepping
    }

    /// Convective operator
    pub fn operator(&self) -> &ConvectiveOperator<f64, N> {
        &self.op
    }

    /// Patch level
    pub fn level(&self) -> &PatchLevel<f64, N> {
        &self.level
    }

    /// Reset time
    pub fn reset_time(&mut self) {
        self.time = 0.;
    }

    /// Cell center of cell `index`
    fn cell_center(&self, index: [i32; N]) -> [f64; N] {
        let domain = self.level.domain();
        let mut x = [0.; N];
        for axis in 0..N {
            x[axis] = (f64::from(index[axis] - domain.bbox.lower[axis]) + 0.5) * domain.dx[axis];
        }
        x
    }

    /// Constant velocity `u[axis]` on all faces normal to `axis`
    pub fn set_uniform_velocity(&mut self, u: [f64; N]) {
        for (axis, &value) in u.iter().enumerate() {
            self.u.fill_axis(axis, value);
        }
    }

    /// Evaluate velocity field `f(x)` at the face centers
    pub fn set_velocity<F>(&mut self, f: F)
    where
        F: Fn([f64; N]) -> [f64; N],
    {
        let domain = *self.level.domain();
        for axis in 0..N {
            self.u.fill_with(axis, 0, |index| {
                let mut x = [0.; N];
                for b in 0..N {
                    x[b] = f64::from(index[b] - domain.bbox.lower[b]) * domain.dx[b];
                    if b != axis {
                        x[b] += 0.5 * domain.dx[b];
                    }
                }
                f(x)[axis]
            });
        }
    }

    /// Initialize all components with `amp` inside the box
    /// `lower <= x < upper` and zero elsewhere
    pub fn top_hat(&mut self, lower: [f64; N], upper: [f64; N], amp: f64) {
        self.set_field(|x| {
            if (0..N).all(|a| x[a] >= lower[a] && x[a] < upper[a]) {
                amp
            } else {
                0.
            }
        });
    }

    /// Initialize all components with a Gaussian bump
    ///
    /// q = amp \* exp(-|x - center|^2 / width^2)
    pub fn gaussian(&mut self, center: [f64; N], width: f64, amp: f64) {
        self.set_field(|x| {
            let r2: f64 = (0..N).map(|a| (x[a] - center[a]).powi(2)).sum();
            amp * (-r2 / width.powi(2)).exp()
        });
    }

    /// Add random disturbance \[-amp, amp\] to all components
    pub fn random_disturbance(&mut self, amp: f64) {
        use ndarray_rand::rand_distr::Uniform;
        use ndarray_rand::RandomExt;
        for d in 0..self.q.depth() {
            let mut q = self.q.interior_mut(d);
            let rand = Array::random(q.raw_dim(), Uniform::new(-amp, amp));
            q += &rand;
        }
    }

    /// Evaluate `f(x)` at all cell centers, ghost cells included
    fn set_field<F: Fn([f64; N]) -> f64>(&mut self, f: F) {
        let mut values = CellData::with_ghost_widths(*self.q.bbox(), 1, self.q.ghost_cell_width());
        values.fill_with(0, |index| f(self.cell_center(index)));
        for d in 0..self.q.depth() {
            self.q.data[d].assign(&values.data[0]);
        }
    }

    /// Courant number `dt * sum(max|u| / dx)`
    pub fn courant(&self) -> f64 {
        let dx = self.level.domain().dx;
        let u_max = self.u.max_abs();
        (0..N).map(|a| self.dt * u_max[a] / dx[a]).sum()
    }

    /// Total amount of all components
    pub fn eval_mass(&self) -> f64 {
        let volume: f64 = self.level.domain().dx.iter().product();
        (0..self.q.depth())
            .map(|d| self.q.interior(d).sum() * volume)
            .sum()
    }

    /// Forward Euler step `q += alpha * N(q)`
    fn euler_step(&mut self, alpha: f64, dt: Option<f64>) {
        let rhs = self.level.apply(&self.op, &mut self.q, &self.u, dt);
        for d in 0..self.q.depth() {
            Zip::from(self.q.interior_mut(d))
                .and(rhs.interior(d))
                .for_each(|q, &n| *q += alpha * n);
        }
    }
}

impl<const N: usize> Integrate for Advection<N>
where
    Dim<[Ix; N]>: Dimension,
    [Ix; N]: IntoDimension<Dim = Dim<[Ix; N]>>,
{
    /// Update 1 timestep
    fn update(&mut self) {
        let courant = self.courant();
        if courant > 1. {
            log::warn!(
                "Courant number {:5.3} exceeds one at time {:4.2}",
                courant,
                self.time
            );
        }
        match self.stepping {
            TimeStepping::Godunov => self.euler_step(-self.dt, Some(self.dt)),
            TimeStepping::Ssprk2 => {
                let q0 = self.q.clone();
                self.euler_step(-self.dt, None);
                self.euler_step(-self.dt, None);
                for d in 0..self.q.depth() {
                    Zip::from(self.q.interior_mut(d))
                        .and(q0.interior(d))
                        .for_each(|q, &q0| *q = 0.5 * (*q + q0));
                }
            }
        }
        self.time += self.dt;
        log::debug!("time = {:4.3}", self.time);
    }

    fn get_time(&self) -> f64 {
        self.time
    }

    fn get_dt(&self) -> f64 {
        self.dt
    }

    fn callback(&mut self) {
        #[cfg(feature = "hdf5")]
        {
            let fname = format!("data/advection{:0>8.2}.h5", self.time);
            let write = match self.write_intervall {
                Some(dt_save) => {
                    (self.time % dt_save) < self.dt / 2.
                        || (self.time % dt_save) > dt_save - self.dt / 2.
                }
                None => true,
            };
            if write {
                self.write(&fname);
            }
        }

        let mass = self.eval_mass();
        let (min, max) = self.q.min_max();
        log::info!(
            "time = {:4.2}      mass = {:10.6e}     min = {:5.3e}     max = {:5.3e}",
            self.time,
            mass,
            min,
            max
        );
        if let Some(d) = self.diagnostics.get_mut("time") {
            d.push(self.time);
        }
        if let Some(d) = self.diagnostics.get_mut("mass") {
            d.push(mass);
        }
        if let Some(d) = self.diagnostics.get_mut("min") {
            d.push(min);
        }
        if let Some(d) = self.diagnostics.get_mut("max") {
            d.push(max);
        }
    }

    fn exit(&mut self) -> bool {
        // Break if the solution blew up
        let (min, max) = self.q.min_max();
        min.is_nan() || max.is_nan()
    }
}

#[cfg(feature = "hdf5")]
impl<const N: usize> Advection<N>
where
    Dim<[Ix; N]>: Dimension,
    [Ix; N]: IntoDimension<Dim = Dim<[Ix; N]>>,
{
    /// Restart from file
    ///
    /// # Errors
    /// File or variables not found, or shape mismatch.
    pub fn read(&mut self, filename: &str) -> crate::io::Result<()> {
        use crate::io::{read_from_hdf5, read_scalar_from_hdf5};
        for d in 0..self.q.depth() {
            let data = read_from_hdf5::<f64, Dim<[Ix; N]>>(filename, &format!("q{}", d))?;
            if data.shape() != self.q.interior(d).shape() {
                return Err(hdf5::Error::Internal(format!(
                    "Shape mismatch while reading q{}: {:?}",
                    d,
                    data.shape()
                )));
            }
            self.q.interior_mut(d).assign(&data);
        }
        self.time = read_scalar_from_hdf5::<f64>(filename, "time")?;
        log::info!(" <== {:?}", filename);
        Ok(())
    }

    /// Write field data to hdf5 file
    pub fn write(&mut self, filename: &str) {
        match self.write_return_result(filename) {
            Ok(_) => log::info!(" ==> {:?}", filename),
            Err(e) => log::error!("Error while writing file {:?}: {}", filename, e),
        }
    }

    fn write_return_result(&mut self, filename: &str) -> crate::io::Result<()> {
        use crate::io::{write_scalar_to_hdf5, write_to_hdf5};
        if let Some(parent) = std::path::Path::new(filename).parent() {
            std::fs::create_dir_all(parent).map_err(|e| hdf5::Error::Internal(e.to_string()))?;
        }
        for d in 0..self.q.depth() {
            write_to_hdf5(filename, &format!("q{}", d), &self.q.interior(d))?;
        }
        for axis in 0..N {
            write_to_hdf5(filename, &format!("u{}", axis), &self.u.interior(axis, 0))?;
            write_scalar_to_hdf5(filename, &format!("dx{}", axis), self.level.domain().dx[axis])?;
        }
        write_scalar_to_hdf5(filename, "time", self.time)?;
        write_scalar_to_hdf5(filename, "dt", self.dt)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::integrate;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-10
    }

    const HAT: [f64; 10] = [0., 0., 0., 1., 1., 1., 1., 0., 0., 0.];

    /// 1-D top-hat on a 10 x 1 periodic patch
    fn top_hat(dt: f64, scheme: &str) -> Advection2 {
        let level = PatchLevel::new(Patch::new(IndexBox::from_shape([10, 1]), [1., 1.]), [1, 1])
            .unwrap();
        let bc = vec![BoundarySet::uniform(BoundaryCondition::outflow())
            .with_axis(0, BoundaryCondition::periodic())];
        let op = ConvectiveOperator::new(scheme, "conservative", bc).unwrap();
        let mut advection = Advection2::new(level, op, dt, "godunov").unwrap();
        advection.set_uniform_velocity([1., 0.]);
        advection.top_hat([3., 0.], [7., 1.], 1.);
        advection
    }

    #[test]
    fn test_registry() {
        for name in TimeStepping::NAMES {
            assert_eq!(TimeStepping::from_name(name).unwrap().name(), *name);
        }
        assert!(TimeStepping::from_name("rk4").is_err());
        assert!(Advection2::periodic([8, 8], [1., 1.], 0.).is_err());
        assert!(Advection2::periodic([8, 8], [-1., 1.], 0.1).is_err());
    }

    #[test]
    fn test_top_hat_initial_condition() {
        let advection = top_hat(1., "xsppm7");
        for (i, &v) in HAT.iter().enumerate() {
            assert_eq!(advection.q.get(0, [i as i32, 0]), v);
        }
    }

    #[test]
    fn test_top_hat_moves_one_cell_per_step() {
        let mut advection = top_hat(1., "xsppm7");
        for step in 1..=12 {
            advection.update();
            for i in 0..10 {
                let expected = HAT[(i + 10 - step % 10) % 10];
                assert!(approx_eq(advection.q.get(0, [i as i32, 0]), expected));
            }
        }
        assert!(approx_eq(advection.get_time(), 12.));
    }

    #[test]
    fn test_top_hat_no_overshoot() {
        for scheme in ["xsppm7", "ppm", "plm"].iter() {
            for &dt in [0.1, 0.3, 0.5, 0.7, 0.9].iter() {
                for &vel in [1., -1.].iter() {
                    let mut advection = top_hat(dt, scheme);
                    advection.set_uniform_velocity([vel, 0.]);
                    for step in 0..200 {
                        advection.update();
                        let (min, max) = advection.q.min_max();
                        assert!(
                            min >= -1e-12 && max <= 1. + 1e-12,
                            "{} dt={} u={} step {}: [{}, {}]",
                            scheme,
                            dt,
                            vel,
                            step,
                            min,
                            max
                        );
                    }
                    assert!(approx_eq(advection.eval_mass(), 4.), "{} dt={}", scheme, dt);
                }
            }
        }
    }

    #[test]
    fn test_ssprk2_conserves_mass() {
        let mut advection = Advection2::periodic([16, 16], [1., 1.], 0.01).unwrap();
        advection.stepping = TimeStepping::Ssprk2;
        advection.set_velocity(|[x, y]| [(2. * y - 1.), -(2. * x - 1.)]);
        advection.gaussian([0.5, 0.7], 0.1, 1.);
        let mass = advection.eval_mass();
        integrate(&mut advection, 0.1, Some(0.05));
        assert!(approx_eq(advection.eval_mass(), mass));
        assert_eq!(advection.diagnostics["time"].len(), 2);
        assert!(advection.courant() < 1.);
    }

    #[test]
    fn test_tiled_level_in_3d() {
        let domain = Patch::new(IndexBox::from_shape([8, 6, 6]), [0.125, 0.125, 0.125]);
        let level = PatchLevel::new(domain, [2, 2, 1]).unwrap();
        let bc = vec![BoundarySet::uniform(BoundaryCondition::outflow()); 2];
        let op = ConvectiveOperator::new("ppm", "conservative", bc).unwrap();
        let mut advection = Advection3::new(level, op, 0.02, "godunov").unwrap();
        advection.set_uniform_velocity([1., 0., 0.]);
        advection.random_disturbance(0.1);
        let (min0, max0) = advection.q.min_max();
        advection.update();
        let (min, max) = advection.q.min_max();
        assert!(min >= min0 - 1e-12 && max <= max0 + 1e-12);
        assert!(!advection.exit());
    }
}
