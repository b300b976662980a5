//! Criterion benchmarks for u-timetable.
//!
//! Uses the ITC-2007 "Toy" instance and synthetic instances of growing
//! size to measure evaluation, construction and search throughput.

use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use u_timetable::construct::ConstructiveBuilder;
use u_timetable::evaluator::evaluate;
use u_timetable::ge::GeConfig;
use u_timetable::model::{parse_ctt, Course, Curriculum, Problem, Room};
use u_timetable::random::create_rng;
use u_timetable::search::{SearchConfig, SearchRunner, Solver, SolverConfig, Strategy};

const TOY: &str = "\
Name: Toy
Courses: 4
Rooms: 3
Days: 5
Periods_per_day: 4
Curricula: 2
Constraints: 8

COURSES:
SceCosC Ocra 3 3 30
ArcTec Indaco 3 2 42
TecCos Rosa 5 4 40
Geotec Scarlatti 5 4 18

ROOMS:
A 32
B 50
C 40

CURRICULA:
Cur1 3 SceCosC ArcTec TecCos
Cur2 2 TecCos Geotec

UNAVAILABILITY_CONSTRAINTS:
TecCos 2 0
TecCos 2 1
TecCos 3 2
TecCos 3 3
ArcTec 4 0
ArcTec 4 1
ArcTec 4 2
ArcTec 4 3

END.
";

// ===========================================================================
// Synthetic instances: `courses` courses of 3 lectures on a 5 × 6 grid,
// grouped four to a curriculum, one teacher per two courses.
// ===========================================================================

fn synthetic(courses: usize) -> Arc<Problem> {
    let rooms = courses.div_ceil(6).max(2);
    let mut builder = Problem::builder(format!("synthetic-{courses}"), 5, 6);
    for c in 0..courses {
        builder = builder.course(Course::new(
            format!("c{c}"),
            format!("t{}", c / 2),
            3,
            2,
            20 + (c * 7) % 60,
        ));
    }
    for r in 0..rooms {
        builder = builder.room(Room::new(format!("r{r}"), 30 + 15 * r));
    }
    for (q, group) in (0..courses).collect::<Vec<_>>().chunks(4).enumerate() {
        builder = builder.curriculum(Curriculum::new(
            format!("q{q}"),
            group.iter().map(|c| format!("c{c}")),
        ));
    }
    Arc::new(builder.build().expect("synthetic instance is valid"))
}

fn bench_evaluate(c: &mut Criterion) {
    let mut group = c.benchmark_group("evaluate");

    for courses in [10usize, 40, 80] {
        let problem = synthetic(courses);
        let schedule = ConstructiveBuilder::default()
            .build(&problem, &mut create_rng(42))
            .schedule;
        group.bench_with_input(BenchmarkId::from_parameter(courses), &schedule, |b, s| {
            b.iter(|| black_box(evaluate(black_box(s))))
        });
    }
    group.finish();
}

fn bench_construct(c: &mut Criterion) {
    let mut group = c.benchmark_group("construct");
    group.sample_size(20);

    for courses in [10usize, 40, 80] {
        let problem = synthetic(courses);
        group.bench_with_input(BenchmarkId::from_parameter(courses), &problem, |b, p| {
            b.iter(|| {
                let construction = ConstructiveBuilder::default().build(black_box(p), &mut create_rng(7));
                black_box(construction)
            })
        });
    }
    group.finish();
}

fn bench_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("search");
    group.sample_size(10);

    let toy = Arc::new(parse_ctt(TOY).expect("toy instance parses"));
    let config = SearchConfig::default().with_max_iterations(2_000).with_seed(42);
    group.bench_function("selection_toy_i2000", |b| {
        b.iter(|| black_box(SearchRunner::run(black_box(&toy), &config)))
    });

    let problem = synthetic(40);
    for strategy in [Strategy::Selection, Strategy::Generation, Strategy::Hybrid] {
        let config = SolverConfig::new(strategy)
            .with_search(SearchConfig::default().with_max_iterations(500).with_seed(42))
            .with_ge(GeConfig::default().with_max_generations(10));
        group.bench_with_input(
            BenchmarkId::new("solve_c40", format!("{strategy:?}")),
            &config,
            |b, c| b.iter(|| black_box(Solver::solve(black_box(&problem), c))),
        );
    }
    group.finish();
}

criterion_group!(benches, bench_evaluate, bench_construct, bench_search);
criterion_main!(benches);
