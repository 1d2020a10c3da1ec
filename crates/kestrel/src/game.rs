//! # Kestrel Game
//!
//! Headless frame driver. The platform layer polls input, measures frame
//! time and draws; everything in between happens here:
//!
//! ```text
//! Frame N:
//! ┌─────────────────────────────────────────────────────────────┐
//! │ 1. INPUT (before frame())                                   │
//! │    └─ handle_key() emits KeyPressedEvent                    │
//! │                                                             │
//! │ 2. SUBSCRIBE                                                │
//! │    ├─ Reset the event bus                                   │
//! │    └─ Damage + keyboard control subscribe                   │
//! │                                                             │
//! │ 3. FLUSH                                                    │
//! │    └─ registry.update(): admit new, remove killed           │
//! │                                                             │
//! │ 4. SIMULATE                                                 │
//! │    ├─ Movement                                              │
//! │    ├─ Animation                                             │
//! │    ├─ Collision (emits CollisionEvent -> Damage)            │
//! │    └─ Camera follow                                         │
//! │                                                             │
//! │ 5. RENDER (after frame())                                   │
//! │    └─ render_order() + camera()                             │
//! └─────────────────────────────────────────────────────────────┘
//! ```

use kestrel_core::{Entity, Registry};

use crate::components::{
    Animation, BoxCollider, CameraFollow, KeyboardControlled, Rect, RigidBody, Sprite, Transform,
    Vec2,
};
use crate::config::GameConfig;
use crate::error::GameResult;
use crate::events::{GameEventBus, KeyCode, KeyPressedEvent};
use crate::systems::{
    AnimationSystem, CameraMovementSystem, CollisionSystem, DamageSystem, KeyboardControlSystem,
    MovementSystem, RenderColliderSystem, RenderSystem,
};

/// Speed of the player chopper, in world units per second.
pub const CHOPPER_SPEED: f64 = 180.0;

/// Longest step a single frame simulates, in seconds.
pub const MAX_DELTA_TIME: f64 = 1.0;

/// Per-frame statistics.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameStats {
    /// Frame number, starting at 1.
    pub frame: u64,
    /// Seconds simulated this frame.
    pub delta_time: f64,
    /// Ids ever allocated by the registry.
    pub entities: usize,
    /// Collision events emitted this frame.
    pub collisions: usize,
}

/// Entities spawned by [`Game::load_level`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LevelEntities {
    /// The keyboard-controlled chopper the camera follows.
    pub chopper: Entity,
    /// The HUD radar, fixed to the screen.
    pub radar: Entity,
    /// A tank driving left.
    pub tank: Entity,
    /// A truck driving right, towards the tank.
    pub truck: Entity,
}

/// The game: registry, event bus, camera and run state.
///
/// # Example
///
/// ```rust
/// use kestrel::{Game, GameConfig, KeyCode};
///
/// let mut game = Game::new(GameConfig::default());
/// let level = game.load_level().unwrap();
///
/// game.frame(0.016).unwrap();
/// game.handle_key(KeyCode::Escape);
/// assert!(!game.is_running());
/// # let _ = level;
/// ```
pub struct Game {
    config: GameConfig,
    registry: Registry,
    event_bus: GameEventBus,
    camera: Rect,
    is_running: bool,
    is_debug: bool,
    frame_count: u64,
    /// Simulated game time.
    elapsed_ms: u64,
}

impl Game {
    /// Creates a game with every system registered and no entities.
    #[must_use]
    pub fn new(config: GameConfig) -> Self {
        let mut registry = Registry::with_config(config.ecs.clone());
        registry.add_system(MovementSystem::new());
        registry.add_system(RenderSystem::new());
        registry.add_system(RenderColliderSystem::new());
        registry.add_system(AnimationSystem::new());
        registry.add_system(CollisionSystem::new());
        registry.add_system(DamageSystem::new());
        registry.add_system(KeyboardControlSystem::new());
        registry.add_system(CameraMovementSystem::new());

        let camera = Rect::new(
            0.0,
            0.0,
            f64::from(config.window_width),
            f64::from(config.window_height),
        );

        tracing::info!(
            target_fps = config.target_fps,
            systems = registry.system_count(),
            "game created"
        );

        Self {
            is_debug: config.debug,
            config,
            registry,
            event_bus: GameEventBus::new(),
            camera,
            is_running: true,
            frame_count: 0,
            elapsed_ms: 0,
        }
    }

    /// Spawns the demo level: a keyboard-controlled chopper the camera
    /// follows, a HUD radar and a tank and truck on a collision course.
    ///
    /// The entities become visible to systems at the next [`frame`](Self::frame).
    ///
    /// # Errors
    ///
    /// Propagates registry errors.
    pub fn load_level(&mut self) -> GameResult<LevelEntities> {
        let now = self.elapsed_ms;
        let registry = &mut self.registry;

        let chopper = registry.create_entity();
        registry
            .entity_mut(chopper)
            .add_component(Transform::at(Vec2::new(100.0, 100.0)))?
            .add_component(RigidBody::default())?
            .add_component(Sprite::new("chopper-image", 32.0, 32.0, 1))?
            .add_component(Animation::new(2, 15, true, now))?
            .add_component(KeyboardControlled {
                up_velocity: Vec2::new(0.0, -CHOPPER_SPEED),
                right_velocity: Vec2::new(CHOPPER_SPEED, 0.0),
                down_velocity: Vec2::new(0.0, CHOPPER_SPEED),
                left_velocity: Vec2::new(-CHOPPER_SPEED, 0.0),
            })?
            .add_component(CameraFollow)?;

        let radar = registry.create_entity();
        registry
            .entity_mut(radar)
            .add_component(Transform::at(Vec2::new(
                f64::from(self.config.window_width) - 74.0,
                10.0,
            )))?
            .add_component(RigidBody::default())?
            .add_component(Sprite::new("radar-image", 64.0, 64.0, 2).fixed())?
            .add_component(Animation::new(8, 5, true, now))?;

        let tank = registry.create_entity();
        registry
            .entity_mut(tank)
            .add_component(Transform::at(Vec2::new(500.0, 10.0)))?
            .add_component(RigidBody::new(Vec2::new(-30.0, 0.0)))?
            .add_component(Sprite::new("tank-image", 32.0, 32.0, 2))?
            .add_component(BoxCollider::new(32.0, 32.0))?;

        let truck = registry.create_entity();
        registry
            .entity_mut(truck)
            .add_component(Transform::at(Vec2::new(10.0, 10.0)))?
            .add_component(RigidBody::new(Vec2::new(20.0, 0.0)))?
            .add_component(Sprite::new("truck-image", 32.0, 32.0, 1))?
            .add_component(BoxCollider::new(32.0, 32.0))?;

        tracing::info!(entities = registry.entity_count(), "level loaded");
        Ok(LevelEntities {
            chopper,
            radar,
            tank,
            truck,
        })
    }

    /// Reacts to a key press.
    ///
    /// Escape stops the game and B toggles debug mode. Every key is also
    /// published as a [`KeyPressedEvent`] to the handlers subscribed during
    /// the last frame, so presses before the first frame reach nobody.
    pub fn handle_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Escape => {
                self.is_running = false;
                tracing::info!("stop requested");
            }
            KeyCode::B => {
                self.is_debug = !self.is_debug;
                tracing::debug!(debug = self.is_debug, "debug toggled");
            }
            _ => {}
        }
        self.event_bus
            .emit(&mut self.registry, KeyPressedEvent { key });
    }

    /// Runs one frame with `delta_time` seconds of simulated time.
    ///
    /// # Arguments
    ///
    /// * `delta_time` - Seconds since the previous frame, as measured by the
    ///   caller. Negative and non-finite values are treated as zero; longer
    ///   steps are capped at [`MAX_DELTA_TIME`].
    ///
    /// # Errors
    ///
    /// Propagates registry errors from the systems.
    pub fn frame(&mut self, delta_time: f64) -> GameResult<FrameStats> {
        let delta_time = Self::sanitize_delta(delta_time);
        if delta_time > self.config.frame_duration().as_secs_f64() * 2.0 {
            tracing::debug!(delta_time, "slow frame");
        }

        // Game time advances in whole milliseconds.
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let delta_ms = (delta_time * 1000.0).round() as u64;
        self.elapsed_ms = self.elapsed_ms.saturating_add(delta_ms);

        self.event_bus.reset();
        DamageSystem::subscribe_to_events(&mut self.event_bus);
        KeyboardControlSystem::subscribe_to_events(&mut self.event_bus);

        self.registry.update();

        MovementSystem::update(&mut self.registry, delta_time)?;
        AnimationSystem::update(&mut self.registry, self.elapsed_ms)?;
        let collisions = CollisionSystem::update(&mut self.registry, &mut self.event_bus)?;
        let map_size = Vec2::new(
            f64::from(self.config.map_width),
            f64::from(self.config.map_height),
        );
        CameraMovementSystem::update(&self.registry, &mut self.camera, map_size)?;

        self.frame_count += 1;
        let stats = FrameStats {
            frame: self.frame_count,
            delta_time,
            entities: self.registry.entity_count(),
            collisions,
        };
        tracing::trace!(
            frame = stats.frame,
            collisions = stats.collisions,
            "frame complete"
        );
        Ok(stats)
    }

    fn sanitize_delta(delta_time: f64) -> f64 {
        if !delta_time.is_finite() {
            tracing::warn!(delta_time, "non-finite frame delta ignored");
            return 0.0;
        }
        if delta_time > MAX_DELTA_TIME {
            tracing::warn!(delta_time, max = MAX_DELTA_TIME, "frame delta capped");
            return MAX_DELTA_TIME;
        }
        delta_time.max(0.0)
    }

    /// Entities to draw this frame, back to front.
    ///
    /// # Errors
    ///
    /// Propagates registry errors.
    pub fn render_order(&self) -> GameResult<Vec<Entity>> {
        Ok(RenderSystem::render_order(&self.registry)?)
    }

    /// Screen-space collider outlines for the debug overlay. Empty unless
    /// debug mode is on.
    ///
    /// # Errors
    ///
    /// Propagates registry errors.
    pub fn collider_outlines(&self) -> GameResult<Vec<(Entity, Rect)>> {
        if !self.is_debug {
            return Ok(Vec::new());
        }
        Ok(RenderColliderSystem::outlines(&self.registry, &self.camera)?)
    }

    /// The registry.
    #[must_use]
    pub const fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Mutable access to the registry, for spawning outside `load_level`.
    pub fn registry_mut(&mut self) -> &mut Registry {
        &mut self.registry
    }

    /// The camera view in world space.
    #[must_use]
    pub const fn camera(&self) -> Rect {
        self.camera
    }

    /// The configuration the game was built with.
    #[must_use]
    pub const fn config(&self) -> &GameConfig {
        &self.config
    }

    /// `false` once Escape was pressed.
    #[must_use]
    pub const fn is_running(&self) -> bool {
        self.is_running
    }

    /// Whether debug overlays are on.
    #[must_use]
    pub const fn is_debug(&self) -> bool {
        self.is_debug
    }

    /// Frames run so far.
    #[must_use]
    pub const fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Simulated game time in milliseconds.
    #[must_use]
    pub const fn elapsed_ms(&self) -> u64 {
        self.elapsed_ms
    }
}
