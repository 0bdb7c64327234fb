use broadside::{field_of_view, Elevation, OffsetPoint, TileMap, ViewModifiers};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn criterion_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("field-of-view");

    let open = TileMap::new(64, 64);
    let mut archipelago = TileMap::new(64, 64);
    for col in (0..64).step_by(5) {
        for row in (0..64).step_by(7) {
            archipelago
                .set_elevation(OffsetPoint::new(col, row), Elevation::Hill)
                .unwrap();
        }
    }
    let observer = OffsetPoint::new(32, 32);
    let modifiers = ViewModifiers {
        fog_allowance: 2.0,
        ..Default::default()
    };

    for radius in [4, 12] {
        group.bench_function(format!("open sea r={}", radius), |b| {
            b.iter(|| {
                field_of_view(black_box(observer), radius, &modifiers, &open)
            })
        });
        group.bench_function(format!("archipelago r={}", radius), |b| {
            b.iter(|| {
                field_of_view(
                    black_box(observer),
                    radius,
                    &modifiers,
                    &archipelago,
                )
            })
        });
    }
    group.finish();
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
