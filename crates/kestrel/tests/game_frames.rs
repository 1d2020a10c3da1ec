//! # Game Frame Tests
//!
//! Drives the demo level through `Game::frame` the way a platform loop
//! would:
//!
//! 1. **Input**: key presses steer the chopper through the event bus
//! 2. **Collision**: the tank and truck meet and are destroyed
//! 3. **Camera**: the view follows the chopper and stays on the map
//! 4. **Draw order**: sprites come back sorted by z-index
//! 5. **Robustness**: stale members and bad deltas do not break the loop
//!
//! Run with: cargo test -p kestrel --test game_frames

use kestrel::components::{Animation, RigidBody, Sprite, Transform, Vec2};
use kestrel::systems::CollisionSystem;
use kestrel::{Game, GameConfig, KeyCode};

fn started_game() -> (Game, kestrel::LevelEntities) {
    let mut game = Game::new(GameConfig::default());
    let level = game.load_level().unwrap();
    game.frame(0.0).unwrap();
    (game, level)
}

// ============================================================================
// INPUT
// ============================================================================

#[test]
fn key_press_steers_chopper() {
    let (mut game, level) = started_game();

    game.handle_key(KeyCode::Right);
    let velocity = game.registry().get_component::<RigidBody>(level.chopper).unwrap().velocity;
    assert_eq!(velocity, Vec2::new(180.0, 0.0));
    assert_eq!(
        game.registry().get_component::<Sprite>(level.chopper).unwrap().src_rect.y,
        32.0
    );

    game.frame(1.0).unwrap();
    let position = game.registry().get_component::<Transform>(level.chopper).unwrap().position;
    assert_eq!(position, Vec2::new(280.0, 100.0));
}

#[test]
fn key_press_before_first_frame_is_dropped() {
    let mut game = Game::new(GameConfig::default());
    let level = game.load_level().unwrap();

    game.handle_key(KeyCode::D);
    game.frame(1.0).unwrap();

    let chopper = game.registry().get_component::<RigidBody>(level.chopper).unwrap();
    assert_eq!(chopper.velocity, Vec2::ZERO);
}

#[test]
fn escape_stops_the_game() {
    let (mut game, _) = started_game();
    game.handle_key(KeyCode::Escape);
    assert!(!game.is_running());
}

// ============================================================================
// COLLISION
// ============================================================================

#[test]
fn tank_and_truck_destroy_each_other() {
    let (mut game, level) = started_game();

    let mut frames = 0;
    loop {
        frames += 1;
        assert!(frames < 200, "tank and truck never met");
        if game.frame(0.1).unwrap().collisions > 0 {
            break;
        }
    }
    // Closing speed 50 units/s over a 458 unit gap.
    assert!((90..=95).contains(&frames), "met after {frames} frames");

    // Killed, but still admitted until the next flush.
    assert_eq!(
        game.registry().system_entities::<CollisionSystem>().unwrap(),
        vec![level.tank, level.truck]
    );

    game.frame(0.1).unwrap();
    assert!(game
        .registry()
        .system_entities::<CollisionSystem>()
        .unwrap()
        .is_empty());
    assert!(!game.registry().has_component::<Transform>(level.tank));
    assert!(!game.registry().has_component::<Transform>(level.truck));
    assert_eq!(game.registry().free_id_count(), 2);

    // The chopper and radar are untouched.
    assert!(game.registry().has_component::<Transform>(level.chopper));
    assert!(game.registry().has_component::<Transform>(level.radar));
}

#[test]
fn destroyed_ids_are_recycled_for_new_spawns() {
    let (mut game, level) = started_game();
    while game.frame(0.5).unwrap().collisions == 0 {}
    game.frame(0.0).unwrap();

    let registry = game.registry_mut();
    let first = registry.create_entity();
    let second = registry.create_entity();
    let mut recycled = [first, second];
    recycled.sort();
    let mut destroyed = [level.tank, level.truck];
    destroyed.sort();
    assert_eq!(recycled, destroyed);
    assert_eq!(registry.signature(first).unwrap().len(), 0);
}

// ============================================================================
// CAMERA
// ============================================================================

#[test]
fn camera_follows_chopper_inside_map() {
    let (mut game, _) = started_game();
    assert_eq!((game.camera().x, game.camera().y), (0.0, 0.0));

    game.handle_key(KeyCode::D);
    for _ in 0..5 {
        game.frame(1.0).unwrap();
    }
    // Chopper at x = 1000, view 800 wide.
    assert_eq!(game.camera().x, 600.0);
    assert_eq!(game.camera().y, 0.0);

    for _ in 0..30 {
        game.frame(1.0).unwrap();
    }
    // Far past the right edge of the 3200 unit map.
    assert_eq!(game.camera().x, 2400.0);
}

// ============================================================================
// ANIMATION AND DRAW ORDER
// ============================================================================

#[test]
fn radar_animation_advances_with_game_time() {
    let (mut game, level) = started_game();

    game.frame(0.45).unwrap();
    // 8 frames at 5 fps: 450 ms is step 2.
    let radar = game.registry().get_component::<Animation>(level.radar).unwrap();
    assert_eq!(radar.current_frame, 2);
    assert_eq!(
        game.registry().get_component::<Sprite>(level.radar).unwrap().src_rect.x,
        128.0
    );
}

#[test]
fn draw_list_is_sorted_by_z_index() {
    let (game, level) = started_game();
    assert_eq!(
        game.render_order().unwrap(),
        vec![level.chopper, level.truck, level.radar, level.tank]
    );
}

// ============================================================================
// ROBUSTNESS
// ============================================================================

#[test]
fn removed_component_does_not_stall_the_frame() {
    let (mut game, level) = started_game();
    let radar_start = game.registry().get_component::<Transform>(level.radar).unwrap().position;

    game.registry_mut().remove_component::<RigidBody>(level.radar).unwrap();
    game.frame(1.0).unwrap();

    let truck = game.registry().get_component::<Transform>(level.truck).unwrap().position;
    assert_eq!(truck, Vec2::new(30.0, 10.0));
    let radar = game.registry().get_component::<Transform>(level.radar).unwrap().position;
    assert_eq!(radar, radar_start);
}

#[test]
fn infinite_delta_is_survivable() {
    let (mut game, level) = started_game();

    game.frame(f64::INFINITY).unwrap();
    game.frame(0.016).unwrap();

    assert_eq!(game.elapsed_ms(), 16);
    let truck = game.registry().get_component::<Transform>(level.truck).unwrap().position;
    assert!((truck.x - 10.32).abs() < 1e-9);
}
