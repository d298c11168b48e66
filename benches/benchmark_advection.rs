use criterion::{criterion_group, criterion_main, Criterion};
use rustfv::advection::Advection2;
use rustfv::boundary::{BoundaryCondition, BoundarySet};
use rustfv::convective::ConvectiveOperator;
use rustfv::level::PatchLevel;
use rustfv::patch::{IndexBox, Patch};
use rustfv::Integrate;

const SIZES: [usize; 2] = [128, 256];
const TILES: [[usize; 2]; 3] = [[1, 1], [2, 2], [4, 4]];

pub fn bench_advection(c: &mut Criterion) {
    let mut group = c.benchmark_group("Advection");
    group.significance_level(0.1).sample_size(10);
    for n in SIZES.iter() {
        for tiles in TILES.iter() {
            let domain = Patch::new(IndexBox::from_shape([*n, *n]), [1. / *n as f64; 2]);
            let level = PatchLevel::new(domain, *tiles).unwrap();
            let bc = vec![BoundarySet::uniform(BoundaryCondition::periodic())];
            let op = ConvectiveOperator::new("xsppm7", "conservative", bc).unwrap();
            let mut advection = Advection2::new(level, op, 0.1 / *n as f64, "godunov").unwrap();
            advection.set_uniform_velocity([1., 1.]);
            advection.gaussian([0.5, 0.5], 0.1, 1.);
            let id = format!("Size: {} Tiles: {:?}", *n, tiles);
            group.bench_function(&id, |b| b.iter(|| advection.update()));
        }
    }
    group.finish();
}

criterion_group!(benches, bench_advection);
criterion_main!(benches);
