//! # `rustfv`: Godunov-type convective operators on structured patches
//!
//! # Dependencies
//! - cargo >= v1.51
//! - `hdf5` (sudo apt-get install -y libhdf5-dev), only for feature `hdf5`
//!
//! # Details
//!
//! This library advects cell-centered quantities on structured,
//! ghost padded patches with finite volume upwind schemes.
//!
//! The core is the face interpolation, see [`interpolate`]:
//! cell means are reconstructed by a limited polynomial profile,
//! traced along the advecting velocity and resolved by upwinding.
//! Implemented reconstructions, see [`reconstruct`]:
//! - `upwind` (piecewise constant)
//! - `plm` (piecewise linear, monotonized central slopes)
//! - `ppm` (piecewise parabolic, Colella & Woodward)
//! - `xsppm7` (seven point piecewise parabolic, default)
//!
//! On top of the interpolation sit the [`convective`] operator,
//! which forms the convective term in conservative, advective or
//! skew-symmetric form, a [`level`] of patches which are processed
//! in parallel, and an [`advection`] solver.
//!
//! ## Implemented solver
//!
//! - `Scalar advection in 2-D and 3-D`, see [`advection::Advection`]
//!
//! # Example
//! Advect a Gaussian bump through a periodic box (run with `cargo run --release`)
//! ```
//! use rustfv::advection::Advection2;
//! use rustfv::integrate;
//!
//! let mut advection = Advection2::periodic([64, 64], [1., 1.], 0.005).unwrap();
//! advection.set_uniform_velocity([1., 0.5]);
//! advection.gaussian([0.5, 0.5], 0.1, 1.);
//! integrate(&mut advection, 0.05, Some(0.01));
//! ```
//!
//! ## Logging
//!
//! Progress is reported through the `log` crate. The binary
//! initializes `env_logger`, set `RUST_LOG=info` to see it.
//!
//! ## Documentation
//!
//! Download and run:
//!
//! `cargo doc --open`
#![warn(missing_docs)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::module_name_repetitions)]
#[macro_use]
extern crate enum_dispatch;
pub mod advection;
pub mod boundary;
pub mod convective;
pub mod error;
pub mod godunov;
pub mod interpolate;
#[cfg(feature = "hdf5")]
pub mod io;
pub mod level;
pub mod patch;
pub mod reconstruct;
pub mod types;
pub use error::{Error, Result};

const MAX_TIMESTEP: usize = 10_000_000;

/// Integrate trait, step forward in time, and write results
pub trait Integrate {
    /// Update solution
    fn update(&mut self);
    /// Receive current time
    fn get_time(&self) -> f64;
    /// Get timestep
    fn get_dt(&self) -> f64;
    /// Callback function (can be used for i/o)
    fn callback(&mut self);
    /// Additional break criteria
    fn exit(&mut self) -> bool;
}

/// Integrade pde, that implements the Integrate trait.
///
/// Specify `save_intervall` to force writing an output.
///
/// Stop Criteria:
/// 1. Timestep limit
/// 2. Time limit
/// 3. [`Integrate::exit`]
pub fn integrate<T: Integrate>(pde: &mut T, max_time: f64, save_intervall: Option<f64>) {
    let mut timestep: usize = 0;
    let eps_dt = pde.get_dt() * 1e-4;
    log::info!(
        "Integrate from {:4.3} to {:4.3} with dt = {:4.3e}",
        pde.get_time(),
        max_time,
        pde.get_dt()
    );
    loop {
        // Update
        pde.update();
        timestep += 1;

        // Save
        if let Some(dt_save) = &save_intervall {
            if (pde.get_time() % dt_save) < pde.get_dt() / 2.
                || (pde.get_time() % dt_save) > dt_save - pde.get_dt() / 2.
            {
                pde.callback();
            }
        }

        // Break
        if pde.get_time() + eps_dt >= max_time {
            log::info!("time limit reached: {:?}", pde.get_time());
            break;
        }
        if timestep >= MAX_TIMESTEP {
            log::info!("timestep limit reached: {:?}", timestep);
            break;
        }
        if pde.exit() {
            log::warn!("break criteria triggered");
            break;
        }
    }
}
