//! Delta Propagation
//!
//! Per-tick algorithm that carries a source object's movement since capture
//! over to its target:
//!
//! - **Position**: `initial_target + sign * (current_source - initial_source)` per axis
//! - **Rotation**: the world-space delta `current * initial⁻¹` is decomposed to
//!   Euler degrees ([`EULER_ORDER`](crate::scene::EULER_ORDER)) and added, with
//!   the same per-axis sign, to the target's initial Euler angles
//! - **Scale**: `initial_target * (current_source / initial_source)`, never mirrored
//!
//! A bypassed position/rotation axis keeps the target's initial component.

use glam::{Quat, Vec3};

use crate::errors::{MirrorError, Result};
use crate::mirror::pair::{Axis, TransformPair};
use crate::mirror::TransformHost;
use crate::scene::{ObjectHandle, TransformSnapshot, quat_from_euler_degrees, quat_to_euler_degrees};
use crate::settings::UndoLabels;

/// A transform the engine wrote to a target object.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AppliedTransform {
    pub target: ObjectHandle,
    pub transform: TransformSnapshot,
}

pub struct MirrorEngine;

impl MirrorEngine {
    /// Runs one propagation step for `pair` with the default undo label.
    pub fn tick<H: TransformHost + ?Sized>(
        pair: &mut TransformPair,
        host: &mut H,
    ) -> Result<Option<AppliedTransform>> {
        Self::tick_with_label(pair, host, &UndoLabels::default().mirror)
    }

    /// Runs one propagation step for `pair`.
    ///
    /// Returns `Ok(None)` without touching the host when the pair is
    /// incomplete, has no baseline, or the source is exactly where it was on
    /// the previous successful tick. On error nothing is written and
    /// `last_source` is kept, so the next tick retries from the same baseline.
    pub fn tick_with_label<H: TransformHost + ?Sized>(
        pair: &mut TransformPair,
        host: &mut H,
        label: &str,
    ) -> Result<Option<AppliedTransform>> {
        let Some((source, target)) = pair.resolve(&*host) else {
            return Ok(None);
        };
        if !pair.is_captured() {
            return Ok(None);
        }
        let Some(current) = host.world_transform(source) else {
            return Ok(None);
        };
        if current == *pair.last_source() {
            return Ok(None);
        }

        let transform = Self::compute(pair, &current)?;

        host.apply_undoable(target, label, &transform);
        pair.set_last_source(current);

        log::debug!(
            "Mirrored source {source:?} -> target {target:?}: pos {}, scale {}",
            transform.position,
            transform.scale
        );

        Ok(Some(AppliedTransform { target, transform }))
    }

    /// Pure form of the propagation: the target transform for a given source state.
    pub fn compute(pair: &TransformPair, current: &TransformSnapshot) -> Result<TransformSnapshot> {
        let scale = Self::propagate_scale(pair, current)?;
        Ok(TransformSnapshot {
            position: Self::propagate_position(pair, current),
            rotation: Self::propagate_rotation(pair, current),
            scale,
        })
    }

    fn propagate_position(pair: &TransformPair, current: &TransformSnapshot) -> Vec3 {
        let delta = current.position - pair.initial_source().position;
        let mut position = pair.initial_target().position;

        for axis in Axis::ALL {
            if pair.bypass_mask.position(axis) {
                continue;
            }
            let i = axis.index();
            position[i] += pair.axis_mask.sign(axis) * delta[i];
        }
        position
    }

    fn propagate_rotation(pair: &TransformPair, current: &TransformSnapshot) -> Quat {
        let delta = current.rotation * pair.initial_source().rotation.inverse();
        let delta_euler = quat_to_euler_degrees(delta);
        let mut euler = quat_to_euler_degrees(pair.initial_target().rotation);

        for axis in Axis::ALL {
            if pair.bypass_mask.rotation(axis) {
                continue;
            }
            let i = axis.index();
            euler[i] += pair.axis_mask.sign(axis) * delta_euler[i];
        }
        quat_from_euler_degrees(euler)
    }

    fn propagate_scale(pair: &TransformPair, current: &TransformSnapshot) -> Result<Vec3> {
        let base = pair.initial_source().scale;
        let ratio = current.scale / base;

        if let Some(axis) = Axis::ALL
            .into_iter()
            .find(|a| base[a.index()] == 0.0 || !ratio[a.index()].is_finite())
        {
            return Err(MirrorError::DegenerateScale { axis, scale: base });
        }

        Ok(pair.initial_target().scale * ratio)
    }
}
