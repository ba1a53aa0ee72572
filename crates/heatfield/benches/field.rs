mod common;

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use glam::Vec2;
use heatfield::prelude::*;

const SENSOR_COUNTS: [usize; 4] = [1, 4, 8, 16];

const CANVAS_WIDTH: u32 = 640;
const CANVAS_HEIGHT: u32 = 480;

fn make_walls() -> Vec<Wall> {
    vec![
        Wall::new(320.0, 0.0, 320.0, 360.0),
        Wall::new(0.0, 240.0, 200.0, 240.0),
        Wall::new(440.0, 240.0, 640.0, 240.0),
        Wall::new(160.0, 360.0, 160.0, 480.0),
    ]
}

fn make_sensors(count: usize) -> Vec<Sensor> {
    (0..count)
        .map(|i| {
            let x = 40.0 + (i as f32 * 83.0) % (CANVAS_WIDTH as f32 - 80.0);
            let y = 40.0 + (i as f32 * 57.0) % (CANVAS_HEIGHT as f32 - 80.0);
            let reading = 18.0 + (i as f32 * 1.3) % 8.0;
            Sensor::new(format!("sensor_{i}"), x, y).with_reading(reading)
        })
        .collect()
}

fn make_config(sensor_count: usize) -> FieldConfig {
    FieldConfig::new(CANVAS_WIDTH, CANVAS_HEIGHT)
        .with_walls(make_walls())
        .with_sensors(make_sensors(sensor_count))
        .with_comfort_zone(20.0, 24.0)
}

fn distance_grid_benches(c: &mut Criterion) {
    let walls = make_walls();
    let config = make_config(1);
    let (grid_width, grid_height) = config.grid_dims();

    let mut group = c.benchmark_group("field/build_distance_grid");
    group.throughput(common::elements_throughput(grid_width * grid_height));

    group.bench_function("open", |b| {
        b.iter(|| {
            let grid = build_distance_grid(
                black_box(Vec2::new(120.0, 200.0)),
                &[],
                grid_width,
                grid_height,
                config.grid_scale,
            );
            black_box(grid);
        });
    });

    group.bench_function("walled", |b| {
        b.iter(|| {
            let grid = build_distance_grid(
                black_box(Vec2::new(120.0, 200.0)),
                &walls,
                grid_width,
                grid_height,
                config.grid_scale,
            );
            black_box(grid);
        });
    });

    group.finish();
}

fn full_frame_benches(c: &mut Criterion) {
    let mut group = c.benchmark_group("render/full_frame");
    let pixels = (CANVAS_WIDTH * CANVAS_HEIGHT) as usize;

    for &sensor_count in &SENSOR_COUNTS {
        group.throughput(common::elements_throughput(pixels));
        group.bench_with_input(
            BenchmarkId::new("cold", sensor_count),
            &sensor_count,
            |b, &count| {
                b.iter(|| {
                    // Fresh engine each iteration so the cache never hits.
                    let mut engine = FieldEngine::new();
                    let frame = engine
                        .render_blocking(make_config(count), &mut ())
                        .expect("render ok");
                    black_box(frame);
                });
            },
        );
    }

    group.bench_function("cached", |b| {
        let mut engine = FieldEngine::new();
        let _ = engine
            .render_blocking(make_config(4), &mut ())
            .expect("render ok");

        b.iter(|| {
            let frame = engine
                .render_blocking(make_config(4), &mut ())
                .expect("render ok");
            black_box(frame);
        });
    });

    group.finish();
}

fn sampling_benches(c: &mut Criterion) {
    let config = make_config(8);
    let mut engine = FieldEngine::new();
    let frame = engine
        .render_blocking(config, &mut ())
        .expect("render ok");

    let queries: Vec<Vec2> = (0..4096)
        .map(|i| {
            let x = (i % 64) as f32 * 10.0;
            let y = (i / 64) as f32 * 7.5;
            Vec2::new(x, y)
        })
        .collect();

    let mut group = c.benchmark_group("field/field_value");
    group.throughput(common::elements_throughput(queries.len()));
    group.bench_function("queries", |b| {
        b.iter(|| {
            let mut acc = 0.0f32;
            for &p in &queries {
                acc += frame.field_value(p.x, p.y);
            }
            black_box(acc);
        });
    });
    group.finish();
}

criterion_group! {
    name = benches;
    config = common::default_criterion();
    targets = distance_grid_benches, full_frame_benches, sampling_benches
}
criterion_main!(benches);
