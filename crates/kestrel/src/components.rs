//! # Game Components
//!
//! Plain data attached to entities by the level loader and read by the
//! systems in [`crate::systems`].
//!
//! The math-only components are `#[repr(C)]` plain old data so they can be
//! viewed as raw bytes or flat arrays without copying field by field.

use std::ops::{Add, AddAssign, Mul, Sub};

use bytemuck::{Pod, Zeroable};
use kestrel_core::Component;

/// 2D vector in world units.
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
#[repr(C)]
pub struct Vec2 {
    /// X coordinate.
    pub x: f64,
    /// Y coordinate.
    pub y: f64,
}

impl Vec2 {
    /// The zero vector.
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    /// Creates a new vector.
    #[inline]
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl From<Vec2> for [f64; 2] {
    fn from(v: Vec2) -> Self {
        bytemuck::cast(v)
    }
}

impl Add for Vec2 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Vec2 {
    fn add_assign(&mut self, rhs: Self) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Vec2 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Vec2 {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self {
        Self::new(self.x * rhs, self.y * rhs)
    }
}

/// Axis-aligned rectangle. Used for sprite source rects, collider bounds and
/// the camera view.
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
#[repr(C)]
pub struct Rect {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Width.
    pub w: f64,
    /// Height.
    pub h: f64,
}

impl Rect {
    /// Creates a new rectangle.
    #[inline]
    #[must_use]
    pub const fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }

    /// Returns `true` if the two rectangles overlap. Touching edges do not
    /// count.
    #[inline]
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.x < other.x + other.w
            && self.x + self.w > other.x
            && self.y < other.y + other.h
            && self.y + self.h > other.y
    }
}

// ============================================================================
// ENTITY COMPONENTS
// ============================================================================

/// World placement of an entity.
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
#[repr(C)]
pub struct Transform {
    /// Top-left corner in world space.
    pub position: Vec2,
    /// Per-axis draw and collider scale.
    pub scale: Vec2,
    /// Rotation in degrees.
    pub rotation: f64,
}

impl Component for Transform {}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec2::ZERO,
            scale: Vec2::new(1.0, 1.0),
            rotation: 0.0,
        }
    }
}

impl Transform {
    /// Creates a transform at `position` with unit scale and no rotation.
    #[must_use]
    pub fn at(position: Vec2) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }
}

/// Linear velocity in world units per second.
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
#[repr(C)]
pub struct RigidBody {
    /// Velocity.
    pub velocity: Vec2,
}

impl Component for RigidBody {}

impl RigidBody {
    /// Creates a rigid body moving at `velocity`.
    #[must_use]
    pub const fn new(velocity: Vec2) -> Self {
        Self { velocity }
    }
}

/// Texture reference and the slice of it to draw.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Sprite {
    /// Asset store key of the texture.
    pub asset_id: String,
    /// Frame width in texture pixels.
    pub width: f64,
    /// Frame height in texture pixels.
    pub height: f64,
    /// Draw order; higher is drawn later.
    pub z_index: i32,
    /// Screen-space sprite that ignores the camera (HUD elements).
    pub is_fixed: bool,
    /// Region of the texture to draw.
    pub src_rect: Rect,
}

impl Component for Sprite {}

impl Sprite {
    /// Creates a sprite showing the top-left frame of `asset_id`.
    #[must_use]
    pub fn new(asset_id: impl Into<String>, width: f64, height: f64, z_index: i32) -> Self {
        Self {
            asset_id: asset_id.into(),
            width,
            height,
            z_index,
            is_fixed: false,
            src_rect: Rect::new(0.0, 0.0, width, height),
        }
    }

    /// Marks the sprite as screen-space.
    #[must_use]
    pub fn fixed(mut self) -> Self {
        self.is_fixed = true;
        self
    }
}

/// Frame-based sprite-sheet animation along the sheet's X axis.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Animation {
    /// Frames in the strip.
    pub num_frames: u32,
    /// Frame currently shown.
    pub current_frame: u32,
    /// Frames per second.
    pub frame_speed_rate: u32,
    /// Wrap around after the last frame instead of holding it.
    pub is_loop: bool,
    /// Game time the animation started, in milliseconds.
    pub start_time_ms: u64,
}

impl Component for Animation {}

impl Animation {
    /// Creates an animation starting at `start_time_ms`.
    #[must_use]
    pub const fn new(num_frames: u32, frame_speed_rate: u32, is_loop: bool, start_time_ms: u64) -> Self {
        Self {
            num_frames,
            current_frame: 0,
            frame_speed_rate,
            is_loop,
            start_time_ms,
        }
    }
}

/// Axis-aligned collision box relative to the transform position.
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
#[repr(C)]
pub struct BoxCollider {
    /// Unscaled width.
    pub width: f64,
    /// Unscaled height.
    pub height: f64,
    /// Offset from the transform position.
    pub offset: Vec2,
}

impl Component for BoxCollider {}

impl BoxCollider {
    /// Creates a collider with no offset.
    #[must_use]
    pub const fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            offset: Vec2::ZERO,
        }
    }

    /// World-space bounds for an entity at `transform`.
    #[must_use]
    pub fn bounds(&self, transform: &Transform) -> Rect {
        Rect::new(
            transform.position.x + self.offset.x,
            transform.position.y + self.offset.y,
            self.width * transform.scale.x,
            self.height * transform.scale.y,
        )
    }
}

/// Velocities applied when the player presses a direction key.
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
#[repr(C)]
pub struct KeyboardControlled {
    /// Velocity while moving up.
    pub up_velocity: Vec2,
    /// Velocity while moving right.
    pub right_velocity: Vec2,
    /// Velocity while moving down.
    pub down_velocity: Vec2,
    /// Velocity while moving left.
    pub left_velocity: Vec2,
}

impl Component for KeyboardControlled {}

/// Marks the entity the camera should center on.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CameraFollow;

impl Component for CameraFollow {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec2_math() {
        let mut v = Vec2::new(1.0, 2.0);
        v += Vec2::new(1.0, 1.0) * 2.0;
        assert_eq!(v, Vec2::new(3.0, 4.0));
        assert_eq!(v - Vec2::new(3.0, 4.0), Vec2::ZERO);
        assert_eq!(<[f64; 2]>::from(v), [3.0, 4.0]);
    }

    #[test]
    fn test_rect_overlap() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(a.overlaps(&Rect::new(5.0, 5.0, 10.0, 10.0)));
        // Touching edges are not a collision.
        assert!(!a.overlaps(&Rect::new(10.0, 0.0, 10.0, 10.0)));
        assert!(!a.overlaps(&Rect::new(0.0, 20.0, 10.0, 10.0)));
    }

    #[test]
    fn test_transform_default_has_unit_scale() {
        let t = Transform::default();
        assert_eq!(t.scale, Vec2::new(1.0, 1.0));
        assert_eq!(Transform::at(Vec2::new(4.0, 5.0)).position, Vec2::new(4.0, 5.0));
    }

    #[test]
    fn test_collider_bounds_apply_offset_and_scale() {
        let mut collider = BoxCollider::new(32.0, 16.0);
        collider.offset = Vec2::new(2.0, 3.0);
        let transform = Transform {
            position: Vec2::new(10.0, 20.0),
            scale: Vec2::new(2.0, 0.5),
            rotation: 0.0,
        };
        assert_eq!(collider.bounds(&transform), Rect::new(12.0, 23.0, 64.0, 8.0));
    }

    #[test]
    fn test_sprite_source_rect_covers_first_frame() {
        let sprite = Sprite::new("tank-image", 32.0, 32.0, 2).fixed();
        assert_eq!(sprite.src_rect, Rect::new(0.0, 0.0, 32.0, 32.0));
        assert!(sprite.is_fixed);
    }

    #[test]
    fn test_pod_layouts() {
        assert_eq!(std::mem::size_of::<Vec2>(), 16);
        assert_eq!(std::mem::size_of::<Transform>(), 40);
        assert_eq!(bytemuck::bytes_of(&RigidBody::default()).len(), 16);
    }
}
