//! Benchmarks for the camera selection policy.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};

use sightline_core::{pick_back_camera, CameraDevice, CameraId, HardwareTier, LensFacing};

/// A roster where the only qualifying device sits at the very end, the
/// worst case for the first-match scan.
fn roster(size: usize) -> Vec<CameraDevice> {
    let mut devices: Vec<CameraDevice> = (0..size - 1)
        .map(|i| {
            let facing = if i % 2 == 0 {
                LensFacing::Front
            } else {
                LensFacing::Back
            };
            let tier = if i % 2 == 0 {
                HardwareTier::Full
            } else {
                HardwareTier::Legacy
            };
            CameraDevice::new(
                CameraId::new(format!("cam{}", i)).expect("non-empty id"),
                facing,
                tier,
            )
        })
        .collect();
    devices.push(CameraDevice::new(
        CameraId::new("winner").expect("non-empty id"),
        LensFacing::Back,
        HardwareTier::Full,
    ));
    devices
}

fn bench_pick_back_camera(c: &mut Criterion) {
    let mut group = c.benchmark_group("pick_back_camera");
    for size in [4usize, 64, 1024] {
        let devices = roster(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &devices, |b, devices| {
            b.iter(|| pick_back_camera(black_box(devices)));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_pick_back_camera);
criterion_main!(benches);
