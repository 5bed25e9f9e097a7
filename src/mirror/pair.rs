use serde::{Deserialize, Serialize};

use crate::errors::{MirrorError, Result};
use crate::mirror::TransformHost;
use crate::scene::{ObjectHandle, TransformSnapshot};
use crate::settings::UndoLabels;

/// World axis selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    /// Component index into a `Vec3`.
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }
}

/// Per-axis sign flip applied to propagated position and rotation deltas.
///
/// Scale is never mirrored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AxisMask {
    pub x: bool,
    pub y: bool,
    pub z: bool,
}

impl AxisMask {
    pub const ALL: Self = Self::new(true, true, true);
    pub const NONE: Self = Self::new(false, false, false);

    #[must_use]
    pub const fn new(x: bool, y: bool, z: bool) -> Self {
        Self { x, y, z }
    }

    #[must_use]
    pub const fn get(&self, axis: Axis) -> bool {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
            Axis::Z => self.z,
        }
    }

    pub fn set(&mut self, axis: Axis, mirrored: bool) {
        match axis {
            Axis::X => self.x = mirrored,
            Axis::Y => self.y = mirrored,
            Axis::Z => self.z = mirrored,
        }
    }

    /// `-1.0` for a mirrored axis, `1.0` otherwise.
    #[inline]
    #[must_use]
    pub const fn sign(&self, axis: Axis) -> f32 {
        if self.get(axis) { -1.0 } else { 1.0 }
    }
}

impl Default for AxisMask {
    fn default() -> Self {
        Self::ALL
    }
}

/// Target channels frozen at their captured value. Overrides mirroring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct BypassMask {
    pub position_x: bool,
    pub position_y: bool,
    pub position_z: bool,
    pub rotation_x: bool,
    pub rotation_y: bool,
    pub rotation_z: bool,
}

impl BypassMask {
    pub const NONE: Self = Self {
        position_x: false,
        position_y: false,
        position_z: false,
        rotation_x: false,
        rotation_y: false,
        rotation_z: false,
    };

    #[must_use]
    pub const fn position(&self, axis: Axis) -> bool {
        match axis {
            Axis::X => self.position_x,
            Axis::Y => self.position_y,
            Axis::Z => self.position_z,
        }
    }

    #[must_use]
    pub const fn rotation(&self, axis: Axis) -> bool {
        match axis {
            Axis::X => self.rotation_x,
            Axis::Y => self.rotation_y,
            Axis::Z => self.rotation_z,
        }
    }

    pub fn set_position(&mut self, axis: Axis, bypass: bool) {
        match axis {
            Axis::X => self.position_x = bypass,
            Axis::Y => self.position_y = bypass,
            Axis::Z => self.position_z = bypass,
        }
    }

    pub fn set_rotation(&mut self, axis: Axis, bypass: bool) {
        match axis {
            Axis::X => self.rotation_x = bypass,
            Axis::Y => self.rotation_y = bypass,
            Axis::Z => self.rotation_z = bypass,
        }
    }
}

/// A source/target association plus the baseline it propagates against.
///
/// # Lifecycle
///
/// - Built empty or with both objects assigned
/// - [`capture`](Self::capture) at session start sets `initial_source`,
///   `initial_target` and `last_source`
/// - Each tick may move the target and `last_source`
/// - [`restore`](Self::restore) writes both baselines back; flags persist
///
/// A pair with either reference unset (or pointing at a destroyed object) is
/// inert for capture and propagation.
#[derive(Debug, Clone)]
pub struct TransformPair {
    source: Option<ObjectHandle>,
    target: Option<ObjectHandle>,

    initial_source: TransformSnapshot,
    initial_target: TransformSnapshot,
    last_source: TransformSnapshot,
    captured: bool,

    pub axis_mask: AxisMask,
    pub bypass_mask: BypassMask,
}

impl TransformPair {
    /// An unassigned pair with the given mirror flags and no bypass.
    #[must_use]
    pub fn new(axis_mask: AxisMask) -> Self {
        Self {
            source: None,
            target: None,
            initial_source: TransformSnapshot::IDENTITY,
            initial_target: TransformSnapshot::IDENTITY,
            last_source: TransformSnapshot::IDENTITY,
            captured: false,
            axis_mask,
            bypass_mask: BypassMask::NONE,
        }
    }

    #[must_use]
    pub fn with_objects(source: ObjectHandle, target: ObjectHandle, axis_mask: AxisMask) -> Self {
        Self {
            source: Some(source),
            target: Some(target),
            ..Self::new(axis_mask)
        }
    }

    /// Rebuilds a pair from a persisted baseline. `last_source` is seeded from
    /// the live source so the next tick only fires on a real edit.
    pub(crate) fn from_baseline<H: TransformHost + ?Sized>(
        source: ObjectHandle,
        target: ObjectHandle,
        initial_source: TransformSnapshot,
        initial_target: TransformSnapshot,
        host: &H,
    ) -> Self {
        let last_source = host.world_transform(source).unwrap_or(initial_source);
        Self {
            source: Some(source),
            target: Some(target),
            initial_source,
            initial_target,
            last_source,
            captured: true,
            axis_mask: AxisMask::default(),
            bypass_mask: BypassMask::NONE,
        }
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    #[inline]
    #[must_use]
    pub fn source(&self) -> Option<ObjectHandle> {
        self.source
    }

    #[inline]
    #[must_use]
    pub fn target(&self) -> Option<ObjectHandle> {
        self.target
    }

    #[inline]
    #[must_use]
    pub fn initial_source(&self) -> &TransformSnapshot {
        &self.initial_source
    }

    #[inline]
    #[must_use]
    pub fn initial_target(&self) -> &TransformSnapshot {
        &self.initial_target
    }

    #[inline]
    #[must_use]
    pub fn last_source(&self) -> &TransformSnapshot {
        &self.last_source
    }

    /// Whether a baseline has been captured (or loaded) since construction.
    #[inline]
    #[must_use]
    pub fn is_captured(&self) -> bool {
        self.captured
    }

    pub(crate) fn set_last_source(&mut self, snapshot: TransformSnapshot) {
        self.last_source = snapshot;
    }

    /// Reassigns the object references. Membership across pairs is checked
    /// by [`MirrorSession`](crate::mirror::MirrorSession), not here.
    ///
    /// A baseline belongs to the objects it was read from, so any actual
    /// change of reference drops it and the pair needs a new capture.
    pub fn set_objects(&mut self, source: Option<ObjectHandle>, target: Option<ObjectHandle>) {
        if self.source == source && self.target == target {
            return;
        }
        self.source = source;
        self.target = target;
        self.initial_source = TransformSnapshot::IDENTITY;
        self.initial_target = TransformSnapshot::IDENTITY;
        self.last_source = TransformSnapshot::IDENTITY;
        self.captured = false;
    }

    /// Whether `object` is this pair's source or target.
    #[must_use]
    pub fn involves(&self, object: ObjectHandle) -> bool {
        self.source == Some(object) || self.target == Some(object)
    }

    /// Both references, if set and still alive in `host`.
    #[must_use]
    pub fn resolve<H: TransformHost + ?Sized>(&self, host: &H) -> Option<(ObjectHandle, ObjectHandle)> {
        let source = self.source.filter(|&o| host.contains(o))?;
        let target = self.target.filter(|&o| host.contains(o))?;
        Some((source, target))
    }

    #[must_use]
    pub fn is_complete<H: TransformHost + ?Sized>(&self, host: &H) -> bool {
        self.resolve(host).is_some()
    }

    // ========================================================================
    // Capture / Restore / Swap
    // ========================================================================

    /// Reads both live transforms into the baseline and `last_source`.
    ///
    /// Returns `false` and changes nothing if the pair is incomplete. Calling
    /// it again overwrites the previous baseline.
    pub fn capture<H: TransformHost + ?Sized>(&mut self, host: &H) -> bool {
        let Some((source, target)) = self.resolve(host) else {
            return false;
        };
        let (Some(source_now), Some(target_now)) =
            (host.world_transform(source), host.world_transform(target))
        else {
            return false;
        };

        self.initial_source = source_now;
        self.initial_target = target_now;
        self.last_source = source_now;
        self.captured = true;
        true
    }

    /// Writes the baselines back to whichever objects are still present,
    /// each as an undoable change.
    pub fn restore<H: TransformHost + ?Sized>(&self, host: &mut H) {
        self.restore_with_labels(host, &UndoLabels::default());
    }

    pub fn restore_with_labels<H: TransformHost + ?Sized>(&self, host: &mut H, labels: &UndoLabels) {
        if !self.captured {
            return;
        }
        if let Some(source) = self.source.filter(|&o| host.contains(o)) {
            host.apply_undoable(source, &labels.restore_source, &self.initial_source);
        }
        if let Some(target) = self.target.filter(|&o| host.contains(o)) {
            host.apply_undoable(target, &labels.restore_target, &self.initial_target);
        }
    }

    /// Exchanges source and target along with their baselines, then re-reads
    /// `last_source` from the new source.
    pub fn swap<H: TransformHost + ?Sized>(&mut self, host: &H) -> Result<()> {
        let (source, target) = self.resolve(host).ok_or(MirrorError::MissingReference)?;

        self.source = Some(target);
        self.target = Some(source);
        std::mem::swap(&mut self.initial_source, &mut self.initial_target);

        if let Some(current) = host.world_transform(target) {
            self.last_source = current;
        }
        Ok(())
    }
}

impl Default for TransformPair {
    fn default() -> Self {
        Self::new(AxisMask::default())
    }
}
