use cadwing::surface::rectangle_outline;
use cadwing::{
    AdaptiveSpacing, BoundedFace, ChordlineMarcher, CylinderMapping, MarchParams, Point3,
    SpacingPlan, SurfacePoint3, Vector3,
};
use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

fn flat_adaptive(c: &mut Criterion) {
    let face =
        BoundedFace::rectangle(Point3::origin(), Vector3::x(), Vector3::y(), 100.0, 50.0).unwrap();
    let marcher = ChordlineMarcher::new(&face, MarchParams::new(0.5)).unwrap();
    let start = SurfacePoint3::new_normalize(Point3::new(0.0, 25.0, 0.0), -Vector3::x());
    let spacing = AdaptiveSpacing::new(2.0, 1.0);

    c.bench_function("adaptive march on a flat rectangle", |b| {
        b.iter(|| marcher.march_adaptive(black_box(&start), &spacing).unwrap())
    });
}

fn cylinder_adaptive(c: &mut Criterion) {
    let mapping =
        CylinderMapping::new(Point3::origin(), Vector3::x(), Vector3::y(), 20.0).unwrap();
    let face = BoundedFace::new(mapping, rectangle_outline(30.0, 40.0)).unwrap();
    let marcher = ChordlineMarcher::new(&face, MarchParams::new(0.5)).unwrap();
    let start = SurfacePoint3::new_normalize(Point3::new(15.0, 0.0, 0.0), -Vector3::y());
    let spacing = AdaptiveSpacing::new(2.0, 1.0);

    c.bench_function("adaptive march on a bent cylinder face", |b| {
        b.iter(|| marcher.march_adaptive(black_box(&start), &spacing).unwrap())
    });
}

fn cylinder_scheduled(c: &mut Criterion) {
    let mapping =
        CylinderMapping::new(Point3::origin(), Vector3::x(), Vector3::y(), 20.0).unwrap();
    let face = BoundedFace::new(mapping, rectangle_outline(30.0, 40.0)).unwrap();
    let marcher = ChordlineMarcher::new(&face, MarchParams::new(0.5)).unwrap();
    let start = SurfacePoint3::new_normalize(Point3::new(15.0, 0.0, 0.0), -Vector3::y());
    let plan = SpacingPlan::new(&[(0.0, 4.0), (20.0, 1.0)]).unwrap();

    c.bench_function("scheduled march on a bent cylinder face", |b| {
        b.iter(|| marcher.march_scheduled(black_box(&start), &plan).unwrap())
    });
}

criterion_group!(benches, flat_adaptive, cylinder_adaptive, cylinder_scheduled);
criterion_main!(benches);
