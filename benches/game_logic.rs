use criterion::{black_box, criterion_group, criterion_main, Criterion};
use blockfall::core::{Field, Session, SessionConfig, SimpleRng};
use blockfall::term::{GameView, Viewport};

fn bench_tick(c: &mut Criterion) {
    let mut session = Session::new(SessionConfig::default(), SimpleRng::new(12345));

    c.bench_function("session_tick_16ms", |b| {
        b.iter(|| {
            if session.game_over() {
                session.reset();
            }
            session.tick(black_box(16));
        })
    });
}

fn bench_line_clear(c: &mut Criterion) {
    c.bench_function("clear_4_lines", |b| {
        b.iter(|| {
            let mut field = Field::from_rows(&[
                "IIIIIIIIII",
                "IIIIIIIIII",
                "IIIIIIIIII",
                "IIIIIIIIII",
            ]);
            black_box(field.clear_full_lines());
        })
    });
}

fn bench_hard_drop(c: &mut Criterion) {
    let mut session = Session::new(SessionConfig::default(), SimpleRng::new(12345));

    c.bench_function("hard_drop", |b| {
        b.iter(|| {
            if session.game_over() {
                session.reset();
            }
            black_box(session.hard_drop());
        })
    });
}

fn bench_move_and_rotate(c: &mut Criterion) {
    let mut session = Session::new(SessionConfig::default(), SimpleRng::new(12345));

    c.bench_function("move_and_rotate", |b| {
        b.iter(|| {
            session.move_right();
            session.rotate();
            session.move_left();
        })
    });
}

fn bench_render(c: &mut Criterion) {
    let session = Session::new(SessionConfig::default(), SimpleRng::new(12345));
    let snapshot = session.snapshot();
    let view = GameView::default();
    let mut fb = blockfall::term::FrameBuffer::new(80, 24);

    c.bench_function("render_80x24", |b| {
        b.iter(|| {
            view.render_into(black_box(&snapshot), Viewport::new(80, 24), &mut fb);
        })
    });
}

criterion_group!(
    benches,
    bench_tick,
    bench_line_clear,
    bench_hard_drop,
    bench_move_and_rotate,
    bench_render
);
criterion_main!(benches);
