use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use softraster::bench::{
    rasterize_with_shader, FlatShader, Material, MaterialShader, RasterSettings, Renderer,
    ShadingMode, VertexOut,
};
use softraster::colors::ColorRgb;
use softraster::light::DirectionalLight;
use softraster::math::vec2::Vec2;
use softraster::math::vec3::Vec3;
use softraster::math::vec4::Vec4;
use softraster::Engine;

const BUFFER_WIDTH: u32 = 800;
const BUFFER_HEIGHT: u32 = 600;

fn vertex(uv: Vec2) -> VertexOut {
    VertexOut {
        position: Vec4::new(0.0, 0.0, 0.5, 2.0),
        normal: -Vec3::UNIT_Z,
        tangent: Vec3::UNIT_X,
        view_direction: Vec3::UNIT_Z,
        uv,
    }
}

/// Raster-space triangle with positive signed area (clockwise on screen).
fn triangle(points: [Vec2; 3]) -> ([VertexOut; 3], [Vec2; 3]) {
    (
        [
            vertex(Vec2::new(0.0, 0.0)),
            vertex(Vec2::new(1.0, 0.0)),
            vertex(Vec2::new(0.5, 1.0)),
        ],
        points,
    )
}

fn small_triangle() -> ([VertexOut; 3], [Vec2; 3]) {
    triangle([
        Vec2::new(100.0, 100.0),
        Vec2::new(120.0, 100.0),
        Vec2::new(110.0, 120.0),
    ])
}

fn medium_triangle() -> ([VertexOut; 3], [Vec2; 3]) {
    triangle([
        Vec2::new(100.0, 100.0),
        Vec2::new(300.0, 100.0),
        Vec2::new(200.0, 300.0),
    ])
}

fn large_triangle() -> ([VertexOut; 3], [Vec2; 3]) {
    triangle([
        Vec2::new(50.0, 50.0),
        Vec2::new(750.0, 100.0),
        Vec2::new(400.0, 550.0),
    ])
}

fn benchmark_single_triangle(c: &mut Criterion) {
    let mut group = c.benchmark_group("single_triangle");

    let settings = RasterSettings::default();
    let flat = FlatShader::new(ColorRgb::new(1.0, 0.0, 0.0));
    let light = DirectionalLight::default();
    let material = Material::default();
    let lit = MaterialShader::new(&light, &material, ShadingMode::Combined, true);

    for (name, (vertices, points)) in [
        ("small", small_triangle()),
        ("medium", medium_triangle()),
        ("large", large_triangle()),
    ] {
        let [v0, v1, v2] = &vertices;

        group.bench_with_input(BenchmarkId::new("flat", name), &points, |bench, points| {
            let mut renderer = Renderer::new(BUFFER_WIDTH, BUFFER_HEIGHT);
            bench.iter(|| {
                renderer.reset_depth();
                let mut fb = renderer.as_framebuffer();
                rasterize_with_shader([v0, v1, v2], black_box(*points), &mut fb, &flat, &settings)
            });
        });

        group.bench_with_input(BenchmarkId::new("material", name), &points, |bench, points| {
            let mut renderer = Renderer::new(BUFFER_WIDTH, BUFFER_HEIGHT);
            bench.iter(|| {
                renderer.reset_depth();
                let mut fb = renderer.as_framebuffer();
                rasterize_with_shader([v0, v1, v2], black_box(*points), &mut fb, &lit, &settings)
            });
        });
    }

    group.finish();
}

fn benchmark_many_triangles(c: &mut Criterion) {
    let mut group = c.benchmark_group("many_triangles");

    let settings = RasterSettings::default();
    let flat = FlatShader::new(ColorRgb::new(1.0, 0.0, 0.0));

    // Generate a grid of small triangles
    let triangles: Vec<([VertexOut; 3], [Vec2; 3])> = (0..20)
        .flat_map(|row| {
            (0..20).map(move |col| {
                let x = col as f32 * 40.0;
                let y = row as f32 * 30.0;
                triangle([
                    Vec2::new(x, y),
                    Vec2::new(x + 35.0, y),
                    Vec2::new(x + 17.5, y + 25.0),
                ])
            })
        })
        .collect();

    group.bench_function("edge_function_400_triangles", |b| {
        let mut renderer = Renderer::new(BUFFER_WIDTH, BUFFER_HEIGHT);
        b.iter(|| {
            renderer.reset_depth();
            let mut fb = renderer.as_framebuffer();
            for (vertices, points) in &triangles {
                let [v0, v1, v2] = vertices;
                rasterize_with_shader([v0, v1, v2], black_box(*points), &mut fb, &flat, &settings);
            }
        });
    });

    group.finish();
}

fn benchmark_frame(c: &mut Criterion) {
    let mut engine = Engine::new(BUFFER_WIDTH, BUFFER_HEIGHT);
    if engine.load_demo_scene().is_err() {
        return;
    }
    c.bench_function("demo_scene_frame", |b| b.iter(|| black_box(engine.render())));
}

criterion_group!(
    benches,
    benchmark_single_triangle,
    benchmark_many_triangles,
    benchmark_frame
);
criterion_main!(benches);
