use glam::{EulerRot, Quat, Vec3};
use serde::{Deserialize, Serialize};

/// Euler decomposition order used for every rotation conversion in the crate.
///
/// `YXZ` means `rotation = Ry * Rx * Rz`: Z is applied first, then X, then Y.
/// Angles are exchanged in degrees as an `(x, y, z)` triple regardless of order.
pub const EULER_ORDER: EulerRot = EulerRot::YXZ;

/// Decomposes a rotation into `(x, y, z)` Euler degrees, each wrapped into `[0, 360)`.
#[must_use]
pub fn quat_to_euler_degrees(rotation: Quat) -> Vec3 {
    let (y, x, z) = rotation.to_euler(EULER_ORDER);
    Vec3::new(
        wrap_degrees(x.to_degrees()),
        wrap_degrees(y.to_degrees()),
        wrap_degrees(z.to_degrees()),
    )
}

/// Rebuilds a rotation from `(x, y, z)` Euler degrees.
#[must_use]
pub fn quat_from_euler_degrees(euler: Vec3) -> Quat {
    Quat::from_euler(
        EULER_ORDER,
        euler.y.to_radians(),
        euler.x.to_radians(),
        euler.z.to_radians(),
    )
}

fn wrap_degrees(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

/// World-space TRS value captured from a scene object.
///
/// Snapshots are plain values: capturing one never aliases the live object.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TransformSnapshot {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl TransformSnapshot {
    pub const IDENTITY: Self = Self {
        position: Vec3::ZERO,
        rotation: Quat::IDENTITY,
        scale: Vec3::ONE,
    };

    #[must_use]
    pub fn new(position: Vec3, rotation: Quat, scale: Vec3) -> Self {
        Self { position, rotation, scale }
    }

    #[must_use]
    pub fn from_position(position: Vec3) -> Self {
        Self { position, ..Self::IDENTITY }
    }

    /// Component-wise exact comparison, reporting which channels differ.
    #[must_use]
    pub fn changed_channels(&self, other: &Self) -> (bool, bool, bool) {
        (
            self.position != other.position,
            self.rotation != other.rotation,
            self.scale != other.scale,
        )
    }

    /// Rotation as `(x, y, z)` Euler degrees in [`EULER_ORDER`].
    #[must_use]
    pub fn rotation_euler_degrees(&self) -> Vec3 {
        quat_to_euler_degrees(self.rotation)
    }

    /// Within-epsilon equality. Rotations are compared up to quaternion sign.
    #[must_use]
    pub fn abs_diff_eq(&self, other: &Self, max_abs_diff: f32) -> bool {
        self.position.abs_diff_eq(other.position, max_abs_diff)
            && self.scale.abs_diff_eq(other.scale, max_abs_diff)
            && (self.rotation.abs_diff_eq(other.rotation, max_abs_diff)
                || self.rotation.abs_diff_eq(-other.rotation, max_abs_diff))
    }
}

impl Default for TransformSnapshot {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// World-space position, rotation and scale of a scene object, plus the
/// "needs save" flag that hosts raise whenever the transform is written.
#[derive(Debug, Clone)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,

    needs_save: bool,
}

impl Transform {
    #[must_use]
    pub fn new() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
            needs_save: false,
        }
    }

    #[must_use]
    pub fn from_snapshot(snapshot: &TransformSnapshot) -> Self {
        Self {
            position: snapshot.position,
            rotation: snapshot.rotation,
            scale: snapshot.scale,
            needs_save: false,
        }
    }

    #[must_use]
    pub fn snapshot(&self) -> TransformSnapshot {
        TransformSnapshot::new(self.position, self.rotation, self.scale)
    }

    /// Overwrites all three channels and marks the transform as needing save.
    pub fn apply_snapshot(&mut self, snapshot: &TransformSnapshot) {
        self.position = snapshot.position;
        self.rotation = snapshot.rotation;
        self.scale = snapshot.scale;
        self.mark_dirty();
    }

    // ========================================================================
    // Getters & Helpers
    // ========================================================================

    /// Sets the rotation from `(x, y, z)` Euler degrees in [`EULER_ORDER`].
    pub fn set_rotation_euler(&mut self, x: f32, y: f32, z: f32) {
        self.rotation = quat_from_euler_degrees(Vec3::new(x, y, z));
    }

    /// Current rotation as Euler degrees, wrapped into `[0, 360)`.
    #[must_use]
    pub fn rotation_euler(&self) -> Vec3 {
        quat_to_euler_degrees(self.rotation)
    }

    /// Flags the transform as needing save.
    pub fn mark_dirty(&mut self) {
        self.needs_save = true;
    }

    #[inline]
    #[must_use]
    pub fn needs_save(&self) -> bool {
        self.needs_save
    }

    /// Clears the save flag, returning whether it was set.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.needs_save)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::new()
    }
}
