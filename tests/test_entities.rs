use glam::Vec2;
use space_hunter::entities::*;

#[test]
fn rect_from_center_spans_extents() {
    let r = Rect::from_center(Vec2::new(50.0, 40.0), Vec2::new(30.0, 20.0));
    assert_eq!(r.left(), 35.0);
    assert_eq!(r.right(), 65.0);
    assert_eq!(r.top(), 30.0);
    assert_eq!(r.bottom(), 50.0);
    assert_eq!(r.center(), Vec2::new(50.0, 40.0));
}

#[test]
fn rect_contains_edges_inclusive() {
    let area = Rect::new(Vec2::ZERO, Vec2::new(100.0, 100.0));
    assert!(area.contains(&Rect::new(Vec2::ZERO, Vec2::new(100.0, 100.0))));
    assert!(!area.contains(&Rect::new(Vec2::new(-1.0, 0.0), Vec2::new(10.0, 10.0))));
}

#[test]
fn enum_equality() {
    assert_eq!(GameStatus::Playing, GameStatus::Playing);
    assert_ne!(
        GameStatus::Playing,
        GameStatus::GameOver(GameOverReason::Quit)
    );
    assert_ne!(
        GameStatus::GameOver(GameOverReason::Defeated),
        GameStatus::GameOver(GameOverReason::Quit)
    );
    assert_ne!(Tint::Red, Tint::Yellow);
}

#[test]
fn game_state_clone_is_independent() {
    let original = GameState {
        player: Player {
            pos: Vec2::new(400.0, 300.0),
            angle: 90.0,
            extents: Vec2::new(30.0, 60.0),
        },
        enemies: Vec::new(),
        bullets: Vec::new(),
        lives: 10,
        score: 0,
        status: GameStatus::Playing,
        frame: 0,
        area: Vec2::new(800.0, 600.0),
    };
    let mut cloned = original.clone();

    // Mutating the clone must not affect the original
    cloned.player.pos.x = 99.0;
    cloned.score = 999;
    cloned.enemies.push(Enemy {
        pos: Vec2::new(5.0, 5.0),
        variant: 0,
        extents: Vec2::new(30.0, 40.0),
        alive: true,
    });

    assert_eq!(original.player.pos.x, 400.0);
    assert_eq!(original.score, 0);
    assert!(original.enemies.is_empty());
    assert_eq!(cloned.live_enemies(), 1);
    assert!(!original.is_over());
}
