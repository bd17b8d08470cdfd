use blockfall::core::{GameSnapshot, ScriptedShapes, Session, SessionConfig};
use blockfall::term::{FrameBuffer, GameView, Rgb, Viewport};
use blockfall::types::{Color, PieceKind};

fn all_text(fb: &FrameBuffer) -> String {
    (0..fb.height())
        .map(|y| fb.row_text(y))
        .collect::<Vec<_>>()
        .join("\n")
}

fn o_session() -> Session {
    Session::new(
        SessionConfig::default(),
        ScriptedShapes::new(vec![PieceKind::O, PieceKind::T]),
    )
}

#[test]
fn term_view_renders_border_corners() {
    let snap = GameSnapshot::default();
    let view = GameView::default();

    // cell_w=2: 10*2 by 20 cells plus border => 22x22.
    assert_eq!(view.frame_size(), (22, 22));
    let fb = view.render(&snap, Viewport::new(22, 22));

    assert_eq!(fb.get(0, 0).unwrap().ch, '┌');
    assert_eq!(fb.get(21, 0).unwrap().ch, '┐');
    assert_eq!(fb.get(0, 21).unwrap().ch, '└');
    assert_eq!(fb.get(21, 21).unwrap().ch, '┘');
}

#[test]
fn term_view_renders_locked_cell_as_two_chars_wide() {
    let mut snap = GameSnapshot::default();
    snap.board[19][0] = Some(Color::CYAN);

    let fb = GameView::default().render(&snap, Viewport::new(22, 22));

    // Inside border: (1,1) origin.
    let y0 = 1 + 19;
    for x in [1, 2] {
        let glyph = fb.get(x, y0).unwrap();
        assert_eq!(glyph.ch, '█');
        assert_eq!(glyph.style.fg, Rgb::from(Color::CYAN));
    }
    // Neighbouring empty cell shows the grid dot.
    assert_eq!(fb.get(3, y0).unwrap().ch, '·');
}

#[test]
fn term_view_draws_current_piece_and_ghost() {
    let snap = o_session().snapshot();
    let fb = GameView::default().render(&snap, Viewport::new(22, 22));

    // O at origin (3,0) covers columns 4..=5, rows 2..=3.
    let piece = fb.get(1 + 4 * 2, 1 + 2).unwrap();
    assert_eq!(piece.ch, '█');
    assert_eq!(piece.style.fg, Rgb::from(PieceKind::O.color()));

    // The ghost rests on the floor: rows 18..=19.
    assert_eq!(fb.get(1 + 4 * 2, 1 + 19).unwrap().ch, '░');
    assert_eq!(fb.get(1 + 5 * 2 + 1, 1 + 18).unwrap().ch, '░');
}

#[test]
fn term_view_draws_side_panel_when_wide_enough() {
    let mut snap = o_session().snapshot();
    snap.score = 1234;
    snap.lines = 10;

    let fb = GameView::default().render(&snap, Viewport::new(60, 30));
    let text = all_text(&fb);

    let needles = [
        "NEXT",
        "SCORE",
        "1234",
        "LINES",
        "10",
        "SPEED",
        "500",
        "Controls:",
        "SPACE - Hard drop",
    ];
    for needle in needles {
        assert!(text.contains(needle), "missing {needle:?} in\n{text}");
    }
}

#[test]
fn term_view_skips_panel_when_narrow() {
    let snap = o_session().snapshot();
    let fb = GameView::default().render(&snap, Viewport::new(22, 22));
    assert!(!all_text(&fb).contains("SCORE"));
}

#[test]
fn term_view_shows_game_over_overlay() {
    let mut snap = o_session().snapshot();
    snap.game_over = true;
    snap.ghost_y = None;

    let fb = GameView::default().render(&snap, Viewport::new(22, 22));
    let text = all_text(&fb);
    assert!(text.contains("GAME OVER"));
    assert!(text.contains("Press R to restart"));
    assert!(!text.contains('░'));
}

#[test]
fn term_view_render_into_resizes_buffer() {
    let snap = GameSnapshot::default();
    let mut fb = FrameBuffer::new(1, 1);
    GameView::default().render_into(&snap, Viewport::new(40, 24), &mut fb);
    assert_eq!((fb.width(), fb.height()), (40, 24));
}
