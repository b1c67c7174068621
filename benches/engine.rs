use criterion::{black_box, criterion_group, criterion_main, Criterion};
use match3_sim::core::{find_matches, BossTuning, Grid, LevelConfig, Match3Game, SeededRandom};
use match3_sim::types::{Coord, TileColor};

const FIVE: [TileColor; 5] = [
    TileColor::Red,
    TileColor::Blue,
    TileColor::Green,
    TileColor::Yellow,
    TileColor::Purple,
];

fn level() -> LevelConfig {
    LevelConfig::new("bench", 9, 9, &FIVE, 60)
}

fn bench_initialize(c: &mut Criterion) {
    let level = level();

    c.bench_function("initialize_9x9", |b| {
        b.iter(|| Match3Game::start(&level, black_box(12345), BossTuning::default()))
    });
}

fn bench_find_matches(c: &mut Criterion) {
    let stable = Match3Game::start(&level(), 12345, BossTuning::default())
        .unwrap()
        .grid()
        .clone();
    let busy = Grid::from_rows(&[
        "RRRGBBBYY",
        "GBGBGBGBG",
        "RRRRGYYYY",
        "PGPGPGPGP",
        "BBBBBRGRG",
        "GRGRGRGRG",
        "YYYPPPRRR",
        "GBGBGBGBG",
        "RGRGRGRGR",
    ])
    .unwrap();

    c.bench_function("find_matches_stable", |b| {
        b.iter(|| find_matches(black_box(&stable)))
    });
    c.bench_function("find_matches_busy", |b| {
        b.iter(|| find_matches(black_box(&busy)))
    });
}

fn bench_swap_cascade(c: &mut Criterion) {
    // Seed 42 accepts (3,0)<->(3,1) as its first move.
    let game = Match3Game::start(&level(), 42, BossTuning::default()).unwrap();

    c.bench_function("swap_and_cascade", |b| {
        b.iter(|| {
            let mut g = game.clone();
            g.try_swap(black_box(Coord::new(3, 0)), Coord::new(3, 1));
            g.consume_events()
        })
    });
}

fn bench_weighted_select(c: &mut Criterion) {
    let mut rng = SeededRandom::new(12345);
    let weights = [1, 2, 3, 1, 2];

    c.bench_function("weighted_select", |b| {
        b.iter(|| rng.weighted_select(black_box(&weights)))
    });
}

criterion_group!(
    benches,
    bench_initialize,
    bench_find_matches,
    bench_swap_cascade,
    bench_weighted_select
);
criterion_main!(benches);
