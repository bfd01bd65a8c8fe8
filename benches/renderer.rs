use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use decision_tree_renderer::config::RenderConfig;
use decision_tree_renderer::diagram::build_decision_tree;
use decision_tree_renderer::render::{rasterize_png, render_svg};
use decision_tree_renderer::theme::Theme;
use std::hint::black_box;

fn render_config(dpi: f32) -> RenderConfig {
    RenderConfig {
        dpi,
        strict_fonts: false,
        ..Default::default()
    }
}

fn bench_build(c: &mut Criterion) {
    let theme = Theme::dark();
    c.bench_function("build_decision_tree", |b| {
        b.iter(|| {
            let canvas = build_decision_tree(black_box(&theme));
            black_box(canvas.len());
        });
    });
}

fn bench_render(c: &mut Criterion) {
    let theme = Theme::dark();
    let canvas = build_decision_tree(&theme);
    let mut group = c.benchmark_group("render_svg");
    for dpi in [72.0f32, 250.0] {
        let config = render_config(dpi);
        group.bench_with_input(BenchmarkId::from_parameter(dpi), &config, |b, data| {
            b.iter(|| {
                let svg = render_svg(black_box(&canvas), &theme, data);
                black_box(svg.len());
            });
        });
    }
    group.finish();
}

fn bench_rasterize(c: &mut Criterion) {
    let theme = Theme::dark();
    let canvas = build_decision_tree(&theme);
    let mut group = c.benchmark_group("rasterize_png");
    group.sample_size(10);
    for dpi in [72.0f32, 250.0] {
        let config = render_config(dpi);
        let svg = render_svg(&canvas, &theme, &config);
        group.bench_with_input(BenchmarkId::from_parameter(dpi), &svg, |b, data| {
            b.iter(|| {
                let png = rasterize_png(black_box(data), &config, &theme).expect("rasterize failed");
                black_box(png.len());
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_build, bench_render, bench_rasterize);
criterion_main!(benches);
