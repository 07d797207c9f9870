//! Criterion benchmark: one simulated day for companies of growing size.
//!
//! Run with: cargo bench -p greenfield-core --bench advance_day

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};

use greenfield_core::prelude::*;

/// Company with `projects` PV/wind projects spread over the sample
/// counties, each with a developer and a lawyer.
fn build_engine(projects: usize) -> SimulationEngine {
    let config = SimConfig {
        starting_cash: 1e12,
        seed: Some(7),
        ..Default::default()
    };
    let catalog = StaticCatalog::new(
        (0..projects)
            .map(|i| CountyInfo {
                id: format!("bench-{i}"),
                region_id: format!("region-{}", i % 16),
                name: format!("County {i}"),
                land_capacity_mw: 1_000.0,
                grid_capacity_mw: 1_000.0,
            })
            .collect(),
    );
    let counties: Vec<CountyInfo> = catalog.counties.clone();
    let mut engine = SimulationEngine::new(config, catalog);

    for (i, county) in counties.iter().enumerate() {
        let technology = if i % 2 == 0 { Technology::Pv } else { Technology::Wind };
        let scout = engine.hire_staff(Role::Scout, Level::Mid).unwrap();
        engine.assign_lessor(scout, &county.id, technology).unwrap();
        let project = engine
            .start_project(&county.region_id, &county.id, technology)
            .unwrap();
        for role in [Role::Developer, Role::Lawyer] {
            let staff = engine.hire_staff(role, Level::Junior).unwrap();
            engine.assign_staff(staff, project).unwrap();
        }
    }
    engine
}

fn bench_advance_day(c: &mut Criterion) {
    let mut group = c.benchmark_group("advance_day");
    for projects in [10usize, 100, 1_000] {
        group.bench_with_input(BenchmarkId::from_parameter(projects), &projects, |b, &n| {
            let mut engine = build_engine(n);
            b.iter(|| engine.advance_day(GameSpeed::Fast));
        });
    }
    group.finish();
}

fn bench_snapshot(c: &mut Criterion) {
    let mut engine = build_engine(500);
    for _ in 0..30 {
        engine.advance_day(GameSpeed::Normal);
    }
    c.bench_function("save_snapshot_500", |b| b.iter(|| engine.save_snapshot().unwrap()));
}

criterion_group!(benches, bench_advance_day, bench_snapshot);
criterion_main!(benches);
