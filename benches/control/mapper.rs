//! Benchmarks for mapping a control frame to interpolation requests.

use std::hint::black_box;

use criterion::Criterion;
use pmsynth::{
    config::AxisRange,
    io::{ControlFrame, Hand},
    mapping::{build_linear_table, map_axis_to_index, ParameterMapper},
    synth::{PmOscillator, PmParams},
    MapperConfig,
};

pub fn bench_mapper(c: &mut Criterion) {
    let mut group = c.benchmark_group("control/mapper");

    let bounds = build_linear_table(50.0, 400.0, 16).unwrap();
    let gate = AxisRange::half_open(0.0, 500.0);
    group.bench_function("map_axis_to_index", |b| {
        b.iter(|| map_axis_to_index(black_box(233.0), black_box(&bounds), &gate))
    });

    let osc = PmOscillator::new(44_100.0, PmParams::default()).unwrap();
    let mut mapper = ParameterMapper::new(osc, &MapperConfig::default()).unwrap();
    let frame = ControlFrame::empty()
        .with_hand(Hand::left(-120.0, 300.0))
        .with_hand(Hand::right(80.0, 233.0));
    group.bench_function("on_control_update", |b| {
        b.iter(|| mapper.on_control_update(black_box(&frame)))
    });

    group.finish();
}
