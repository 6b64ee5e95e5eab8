use criterion::{black_box, criterion_group, criterion_main, Criterion};
use paracollide::{Circle, CollideType, CollisionWorld, Point, Rect, Shape, Vec2};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Group {
    Faller,
    MouseClick,
}

fn populated_world() -> CollisionWorld<Group, usize> {
    let mut world = CollisionWorld::new();
    for i in 0..64 {
        let x = (i % 8) as f32 * 40.0;
        let y = (i / 8) as f32 * 40.0;
        world.register(Group::Faller, i, Rect::new(x as _, y as _, 20.0, 35.0));
        world.register(Group::MouseClick, i, Point::new((x + 5.0) as _, (y + 5.0) as _));
    }
    world
}

fn criterion_benchmark(c: &mut Criterion) {
    let rect = Shape::from(Rect::new(0.0, 0.0, 20.0, 35.0));
    let circle = Shape::from(Circle::new(6.0, 24.0, 10.0));
    c.bench_function("rect circle dispatch", |b| {
        b.iter(|| black_box(&rect).shape_test(black_box(&circle), CollideType::All))
    });

    let world = populated_world();
    let click = Shape::from(Point::new(125.0, 125.0));
    c.bench_function("all colliding 64", |b| {
        b.iter(|| {
            world
                .all_colliding(black_box(&click), Group::Faller, CollideType::All)
                .len()
        })
    });

    let mover = Shape::from(Rect::new(330.0, 0.0, 20.0, 35.0));
    let vel = Vec2::new(-60.0, 0.0);
    c.bench_function("resolve motion 64", |b| {
        b.iter(|| {
            world.resolve_motion(
                black_box(&mover),
                Group::Faller,
                black_box(vel),
                CollideType::All,
            )
        })
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
