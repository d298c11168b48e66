//! Run example:
//!
//! RUST_LOG=info cargo run --release
//!
//! Advects a top-hat diagonally through a periodic box
//! on four patches and reports mass and extrema.
fn main() {
    use rustfv::advection::Advection2;
    use rustfv::boundary::{BoundaryCondition, BoundarySet};
    use rustfv::convective::ConvectiveOperator;
    use rustfv::level::PatchLevel;
    use rustfv::patch::{IndexBox, Patch};
    use rustfv::{integrate, Integrate};

    env_logger::init();

    // Parameters
    let (nx, ny) = (128, 128);
    let dx = [1. / nx as f64, 1. / ny as f64];
    let dt = 0.002;
    let domain = Patch::new(IndexBox::from_shape([nx, ny]), dx);

    let run = || -> rustfv::Result<()> {
        let level = PatchLevel::new(domain, [2, 2])?;
        let bc = vec![BoundarySet::uniform(BoundaryCondition::periodic())];
        let op = ConvectiveOperator::new("xsppm7", "conservative", bc)?;
        let mut advection = Advection2::new(level, op, dt, "godunov")?;
        advection.write_intervall = Some(0.5);
        advection.set_uniform_velocity([1., 1.]);
        advection.top_hat([0.25, 0.25], [0.5, 0.5], 1.);
        advection.callback();
        integrate(&mut advection, 1., Some(0.1));
        Ok(())
    };
    if let Err(e) = run() {
        log::error!("{}", e);
        std::process::exit(1);
    }
}
