use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use polysweep_core::*;
use rand::prelude::*;
use std::hint::black_box;

fn bench_generate(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate");
    for variant in [Variant::Classic, Variant::Multimines, Variant::Omega] {
        for difficulty in Difficulty::ALL {
            let config = VariantConfig::preset(variant, difficulty);
            let id = BenchmarkId::new(variant.key(), difficulty.key());
            group.bench_with_input(id, &config, |b, config| {
                let mut seed = 0;
                b.iter(|| {
                    seed += 1;
                    RandomLayoutGenerator::new(seed)
                        .generate(black_box(config))
                        .unwrap()
                })
            });
        }
    }
    group.finish();
}

fn bench_cascade(c: &mut Criterion) {
    let mut group = c.benchmark_group("cascade");
    for difficulty in Difficulty::ALL {
        let config = VariantConfig::preset(Variant::Classic, difficulty);
        let (height, width) = config.size;
        // a single corner mine leaves one region covering the whole board
        let layout = MineLayout::from_mine_coords(config.size, &[((height - 1, width - 1), 1)])
            .unwrap();
        group.bench_with_input(
            BenchmarkId::from_parameter(difficulty.key()),
            &layout,
            |b, layout| {
                let mut rng = SmallRng::seed_from_u64(0);
                b.iter(|| {
                    let mut board = Board::from_layout(layout.clone());
                    board.reveal((0, 0), &config, &mut rng)
                })
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_generate, bench_cascade);
criterion_main!(benches);
