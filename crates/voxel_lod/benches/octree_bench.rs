//! Benchmarks for subdivision and the per-frame region store passes.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use glam::IVec3;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use voxel_lod::octree::{refine, RefinementInput};
use voxel_lod::{LodConfig, RegionStore};

/// A wandering camera path, reproducible across runs.
fn camera_path(steps: usize) -> Vec<IVec3> {
  let mut rng = StdRng::seed_from_u64(7);
  let mut position = IVec3::ZERO;
  (0..steps)
    .map(|_| {
      position += IVec3::new(
        rng.random_range(-48..=48),
        rng.random_range(-8..=8),
        rng.random_range(-48..=48),
      );
      position
    })
    .collect()
}

fn bench_refine(c: &mut Criterion) {
  let config = LodConfig::default();
  let mut group = c.benchmark_group("refine");

  for radius in [128, 256, 512] {
    group.bench_with_input(BenchmarkId::from_parameter(radius), &radius, |b, &radius| {
      b.iter(|| {
        black_box(refine(RefinementInput {
          viewpoint: black_box(IVec3::new(37, 5, -81)),
          radius,
          config: &config,
        }))
      })
    });
  }

  group.finish();
}

/// One full store frame per step, payloads being plain counters.
fn bench_store_frames(c: &mut Criterion) {
  let path = camera_path(64);

  c.bench_function("region_store (64 frames, radius 256)", |b| {
    b.iter(|| {
      let mut store: RegionStore<u32> = match RegionStore::new(LodConfig::default()) {
        Ok(store) => store,
        Err(err) => panic!("default config rejected: {err}"),
      };
      let mut released = 0usize;
      for &viewpoint in &path {
        store.reset_in_use_flags();
        store.update_for_viewpoint(viewpoint, 256);
        store.clear_unused_chunks(|_, _| released += 1);
        store.refresh_transition_faces(|_, _| released += 1);
        store.initialize_subchunks(|region| region.payload = Some(region.lod));
      }
      black_box((store.len(), released))
    })
  });
}

criterion_group!(benches, bench_refine, bench_store_frames);
criterion_main!(benches);
