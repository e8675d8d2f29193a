//! Benchmarks for voxel-prune operations.
//!
//! Run with: cargo bench -p voxel-prune
//!
//! To compare against baseline:
//! 1. First run: cargo bench -p voxel-prune -- --save-baseline main
//! 2. After changes: cargo bench -p voxel-prune -- --baseline main

#![allow(
    missing_docs,
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]

use std::sync::atomic::AtomicBool;

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use voxel_prune::{
    AttributeSet, FillMode, HealParams, RemovalParams, RemovalResult, deactivate_flagged_features,
    detect_voids, heal_voids_with_params, remove_flagged_features,
};
use voxel_types::{AttributeArray, DataArray, GridExtents};

// =============================================================================
// Test Grid Generation
// =============================================================================

/// Cube of `n³` voxels split into 8 octant features, with octant 8 removed.
fn octant_grid(n: usize) -> (GridExtents, Vec<i32>) {
    let extents = GridExtents::new(n, n, n).unwrap();
    let half = n / 2;
    let labels = extents
        .coords()
        .map(|c| {
            let octant = usize::from(c.x >= half)
                + 2 * usize::from(c.y >= half)
                + 4 * usize::from(c.z >= half);
            octant as i32 + 1
        })
        .collect();
    (extents, labels)
}

/// Single row of `len` voxels, labeled only at the first voxel.
///
/// Worst case for healing: one voxel per pass.
fn corridor(len: usize) -> (GridExtents, Vec<i32>) {
    let extents = GridExtents::new(len, 1, 1).unwrap();
    let mut labels = vec![-1; len];
    labels[0] = 1;
    (extents, labels)
}

fn flagged_last_octant() -> Vec<bool> {
    let mut flagged = vec![false; 9];
    flagged[8] = true;
    flagged
}

// =============================================================================
// Healing Benchmarks
// =============================================================================

fn bench_heal(c: &mut Criterion) {
    let mut group = c.benchmark_group("Heal");

    for n in [16usize, 32, 64] {
        let (extents, mut labels) = octant_grid(n);
        deactivate_flagged_features(&mut labels, &flagged_last_octant(), FillMode::MarkForHealing)
            .unwrap();
        let name = format!("octant_{n}");

        group.throughput(Throughput::Elements(extents.voxel_count() as u64));

        for (mode, params) in [
            ("sequential", HealParams::sequential()),
            ("parallel", HealParams::default().with_parallel_threshold(1)),
        ] {
            group.bench_with_input(BenchmarkId::new(mode, &name), &labels, |b, labels| {
                let mut none: [&mut dyn AttributeArray; 0] = [];
                b.iter(|| {
                    let mut work = labels.clone();
                    heal_voids_with_params(
                        black_box(&mut work),
                        &mut none,
                        &extents,
                        &AtomicBool::new(false),
                        &params,
                    )
                })
            });
        }
    }

    for len in [256usize, 1024] {
        let (extents, labels) = corridor(len);
        group.bench_with_input(BenchmarkId::new("corridor", len), &labels, |b, labels| {
            let mut none: [&mut dyn AttributeArray; 0] = [];
            b.iter(|| {
                let mut work = labels.clone();
                heal_voids_with_params(
                    black_box(&mut work),
                    &mut none,
                    &extents,
                    &AtomicBool::new(false),
                    &HealParams::sequential(),
                )
            })
        });
    }

    group.finish();
}

// =============================================================================
// Pipeline Benchmarks
// =============================================================================

fn bench_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("Pipeline");

    let (extents, labels) = octant_grid(32);
    let flagged = flagged_last_octant();
    let phases: Vec<u8> = labels.iter().map(|&l| l as u8).collect();
    let euler: Vec<f32> = labels.iter().flat_map(|&l| [l as f32; 3]).collect();

    group.throughput(Throughput::Elements(extents.voxel_count() as u64));

    group.bench_function("remove_and_heal_32", |b| {
        b.iter(|| {
            let mut work = labels.clone();
            let mut phases = DataArray::from_scalars("Phases", phases.clone());
            let mut euler = DataArray::new("EulerAngles", 3, euler.clone()).unwrap();
            let mut attributes = AttributeSet::new();
            attributes.push(&mut phases);
            attributes.push(&mut euler);
            let mut compactor = |_: &[bool], _: &mut [i32], _: usize| -> RemovalResult<()> { Ok(()) };

            remove_flagged_features(
                black_box(&mut work),
                &flagged,
                &extents,
                &mut attributes,
                &RemovalParams::with_healing(),
                &mut compactor,
                &AtomicBool::new(false),
            )
        })
    });

    group.bench_function("detect_voids_32", |b| {
        let mut work = labels.clone();
        deactivate_flagged_features(&mut work, &flagged, FillMode::MarkForHealing).unwrap();
        b.iter(|| detect_voids(black_box(&work), &extents).unwrap());
    });

    group.finish();
}

// =============================================================================
// Criterion Setup
// =============================================================================

criterion_group!(benches, bench_heal, bench_pipeline);

criterion_main!(benches);
