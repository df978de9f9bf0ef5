use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::rngs::SmallRng;
use rand::SeedableRng;

use skirmish::board::{Armament, Faction, Position};
use skirmish::combat::Combat;
use skirmish::gen::{random_cave, CaveSpec};
use skirmish::movegen::{goal_cells, next_step};
use skirmish::protocol::parse_grid;
use skirmish::search::PowerSearch;

const SAMPLE: &str = "#######\n#.G...#\n#...EG#\n#.#.#G#\n#..G#E#\n#.....#\n#######";

const MOVEMENT: &str = "#########\n#G..G..G#\n#.......#\n#.......#\n#G..E..G#\n#.......#\n#.......#\n#G..G..G#\n#########";

fn bench_next_step(c: &mut Criterion) {
    let board = parse_grid(MOVEMENT)
        .unwrap()
        .deploy(&Armament::default())
        .unwrap();
    let elf = board.unit_at(Position::new(4, 4)).unwrap().id;
    let goals = goal_cells(&board, elf);
    c.bench_function("next_step_movement_example", |b| {
        b.iter(|| next_step(black_box(&board), black_box(Position::new(4, 4)), black_box(&goals)))
    });
}

fn bench_sample_combat(c: &mut Criterion) {
    let scenario = parse_grid(SAMPLE).unwrap();
    c.bench_function("combat_sample", |b| {
        b.iter(|| {
            let board = scenario.deploy(&Armament::default()).unwrap();
            Combat::new(board).run().unwrap()
        })
    });
}

fn bench_random_cave_combat(c: &mut Criterion) {
    let spec = CaveSpec {
        width: 32,
        height: 32,
        wall_density: 0.12,
        elves: 10,
        goblins: 20,
    };
    let scenario = random_cave(&spec, &mut SmallRng::seed_from_u64(2018));
    c.bench_function("combat_random_32x32", |b| {
        b.iter(|| {
            let board = scenario.deploy(&Armament::default()).unwrap();
            Combat::new(board).with_round_limit(Some(5000)).run()
        })
    });
}

fn bench_power_search(c: &mut Criterion) {
    let scenario = parse_grid(SAMPLE).unwrap();
    let search = PowerSearch::new(&scenario, Armament::default(), Faction::Elf);
    let mut group = c.benchmark_group("power_search");
    group.sample_size(20);
    group.bench_function("linear", |b| b.iter(|| search.run().unwrap()));
    group.bench_function("parallel_4", |b| b.iter(|| search.run_parallel(4).unwrap()));
    group.finish();
}

criterion_group!(
    benches,
    bench_next_step,
    bench_sample_combat,
    bench_random_cave_combat,
    bench_power_search
);
criterion_main!(benches);
