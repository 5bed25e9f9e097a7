//! MirrorSession Tests
//!
//! Tests for:
//! - start / tick / stop lifecycle and full rollback on stop
//! - Pair creation boundary: duplicates, self-pairs, selections
//! - Per-pair restore, swap and removal
//! - Failure isolation between pairs within one tick

use glam::{Quat, Vec3};
use mirror_rig::{
    AxisMask, BypassMask, MirrorError, MirrorSession, MirrorSettings, ObjectHandle, Scene,
    TransformHost, TransformSnapshot,
};

// ============================================================================
// Helper
// ============================================================================

struct Rig {
    scene: Scene,
    session: MirrorSession,
    left: ObjectHandle,
    right: ObjectHandle,
}

fn snapshot(x: f32, y: f32, z: f32) -> TransformSnapshot {
    TransformSnapshot::from_position(Vec3::new(x, y, z))
}

/// One pair, LeftHand -> RightHand, mirrored on X only.
fn rig() -> Rig {
    let mut scene = Scene::new();
    let left = scene.add_object("LeftHand", snapshot(-1.0, 1.0, 0.0));
    let right = scene.add_object("RightHand", snapshot(1.0, 1.0, 0.0));

    let mut session = MirrorSession::default();
    let index = session.add_pair(left, right, &scene).unwrap();
    session.set_axis_mask(index, AxisMask::new(true, false, false)).unwrap();

    Rig { scene, session, left, right }
}

fn position(scene: &Scene, object: ObjectHandle) -> Vec3 {
    scene.world_transform(object).unwrap().position
}

// ============================================================================
// Lifecycle
// ============================================================================

#[test]
fn inactive_session_does_not_tick() {
    let mut rig = rig();
    rig.scene.edit_transform(rig.left, |t| t.position.x = -3.0);

    let report = rig.session.tick(&mut rig.scene);
    assert!(report.is_idle());
    assert_eq!(position(&rig.scene, rig.right), Vec3::new(1.0, 1.0, 0.0));
}

#[test]
fn active_session_propagates_each_frame() {
    let mut rig = rig();
    rig.session.start(&rig.scene);
    assert!(rig.session.is_active());

    rig.scene.edit_transform(rig.left, |t| t.position.x = -3.0);
    let report = rig.session.tick(&mut rig.scene);

    assert_eq!(report.applied.len(), 1);
    assert_eq!(report.applied[0].0, 0);
    assert_eq!(position(&rig.scene, rig.right), Vec3::new(3.0, 1.0, 0.0));

    // Idle frame
    assert!(rig.session.tick(&mut rig.scene).is_idle());
}

#[test]
fn stop_restores_source_and_target() {
    let mut rig = rig();
    let left_before = rig.scene.world_transform(rig.left).unwrap();
    let right_before = rig.scene.world_transform(rig.right).unwrap();

    rig.session.start(&rig.scene);
    for step in 1..=4 {
        let s = step as f32;
        rig.scene.edit_transform(rig.left, |t| {
            t.position = Vec3::new(-1.0 - s, 1.0 + s, s);
            t.rotation = Quat::from_rotation_z(0.1 * s);
            t.scale = Vec3::splat(1.0 + s);
        });
        rig.session.tick(&mut rig.scene);
    }
    assert_ne!(rig.scene.world_transform(rig.right).unwrap(), right_before);

    rig.session.stop(&mut rig.scene);
    assert!(!rig.session.is_active());
    assert_eq!(rig.scene.world_transform(rig.left).unwrap(), left_before);
    assert_eq!(rig.scene.world_transform(rig.right).unwrap(), right_before);

    let labels: Vec<_> = rig.scene.history().labels().collect();
    assert_eq!(&labels[labels.len() - 2..], ["Restore Base Transform", "Restore Target Transform"]);
}

#[test]
fn restart_recaptures_baseline() {
    let mut rig = rig();
    rig.session.start(&rig.scene);
    rig.session.stop(&mut rig.scene);

    // Moved while inactive: becomes the new baseline.
    rig.scene.edit_transform(rig.left, |t| t.position.x = -5.0);
    rig.session.start(&rig.scene);
    assert_eq!(rig.session.pair(0).unwrap().initial_source().position.x, -5.0);
    assert!(rig.session.tick(&mut rig.scene).is_idle());
}

#[test]
fn start_twice_keeps_first_baseline() {
    let mut rig = rig();
    rig.session.start(&rig.scene);
    rig.scene.edit_transform(rig.left, |t| t.position.x = -5.0);
    rig.session.start(&rig.scene);

    assert_eq!(rig.session.pair(0).unwrap().initial_source().position.x, -1.0);
}

#[test]
fn stop_without_start_is_noop() {
    let mut rig = rig();
    rig.scene.edit_transform(rig.left, |t| t.position.x = -5.0);
    rig.session.stop(&mut rig.scene);

    assert_eq!(position(&rig.scene, rig.left).x, -5.0);
    assert!(rig.scene.history().is_empty());
}

// ============================================================================
// Pair Creation Boundary
// ============================================================================

#[test]
fn duplicate_membership_is_rejected() {
    let mut rig = rig();
    let other = rig.scene.create_object("Other");

    let err = rig.session.add_pair(rig.right, other, &rig.scene).unwrap_err();
    assert!(matches!(&err, MirrorError::DuplicateMembership { name } if name == "RightHand"));
    assert!(err.is_warning());
    assert_eq!(rig.session.len(), 1);
}

#[test]
fn self_pair_is_rejected() {
    let mut rig = rig();
    let other = rig.scene.create_object("Other");

    let err = rig.session.add_pair(other, other, &rig.scene).unwrap_err();
    assert!(matches!(err, MirrorError::SameObject));
    assert_eq!(rig.session.len(), 1);
}

#[test]
fn destroyed_object_cannot_be_paired() {
    let mut rig = rig();
    let a = rig.scene.create_object("A");
    let b = rig.scene.create_object("B");
    rig.scene.remove_object(b);

    let err = rig.session.add_pair(a, b, &rig.scene).unwrap_err();
    assert!(matches!(err, MirrorError::MissingReference));
}

#[test]
fn selection_needs_exactly_two_objects() {
    let mut scene = Scene::new();
    let a = scene.create_object("A");
    let b = scene.create_object("B");
    let c = scene.create_object("C");
    let mut session = MirrorSession::default();

    assert!(!session.can_add_selection(&[a]));
    assert!(!session.can_add_selection(&[a, b, c]));
    assert!(!session.can_add_selection(&[a, a]));
    assert!(session.can_add_selection(&[a, b]));

    let err = session.add_selected_pair(&[a, b, c], &scene).unwrap_err();
    assert!(matches!(err, MirrorError::InvalidSelection { count: 3 }));

    let index = session.add_selected_pair(&[b, c], &scene).unwrap();
    let pair = session.pair(index).unwrap();
    assert_eq!(pair.source(), Some(b));
    assert_eq!(pair.target(), Some(c));
    assert!(pair.is_captured());
    assert!(!session.can_add_selection(&[a, c]));
}

#[test]
fn new_pairs_use_configured_default_mask() {
    let settings = MirrorSettings {
        default_axis_mask: AxisMask::new(false, true, false),
        ..MirrorSettings::default()
    };
    let mut session = MirrorSession::new(settings);

    let index = session.add_empty_pair();
    assert_eq!(session.pair(index).unwrap().axis_mask, AxisMask::new(false, true, false));
}

#[test]
fn assign_checks_membership_and_captures_while_active() {
    let mut rig = rig();
    let a = rig.scene.add_object("A", snapshot(0.0, 0.0, 0.0));
    let b = rig.scene.add_object("B", snapshot(0.0, 5.0, 0.0));
    let index = rig.session.add_empty_pair();

    let err = rig.session.assign(index, Some(a), Some(rig.left), &rig.scene).unwrap_err();
    assert!(matches!(err, MirrorError::DuplicateMembership { .. }));
    assert!(rig.session.pair(index).unwrap().source().is_none());

    rig.session.start(&rig.scene);
    rig.session.assign(index, Some(a), Some(b), &rig.scene).unwrap();
    assert!(rig.session.pair(index).unwrap().is_captured());

    rig.scene.edit_transform(a, |t| t.position.z = 2.0);
    let report = rig.session.tick(&mut rig.scene);
    assert_eq!(report.applied.len(), 1);
    assert_eq!(report.applied[0].0, index);
    assert_eq!(position(&rig.scene, b), Vec3::new(0.0, 5.0, -2.0));
}

#[test]
fn reassigning_same_pair_is_allowed() {
    let mut rig = rig();
    rig.session
        .assign(0, Some(rig.right), Some(rig.left), &rig.scene)
        .unwrap();
    assert_eq!(rig.session.pair(0).unwrap().source(), Some(rig.right));
}

#[test]
fn out_of_range_index_is_reported() {
    let mut rig = rig();
    let err = rig.session.set_bypass_mask(7, BypassMask::NONE).unwrap_err();
    assert!(matches!(err, MirrorError::PairIndexOutOfBounds { index: 7, len: 1 }));
}

// ============================================================================
// Restore / Swap / Remove
// ============================================================================

#[test]
fn restore_pair_rolls_back_mid_session() {
    let mut rig = rig();
    rig.session.start(&rig.scene);
    rig.scene.edit_transform(rig.left, |t| t.position.x = -4.0);
    rig.session.tick(&mut rig.scene);

    rig.session.restore_pair(0, &mut rig.scene).unwrap();
    assert_eq!(position(&rig.scene, rig.left), Vec3::new(-1.0, 1.0, 0.0));
    assert_eq!(position(&rig.scene, rig.right), Vec3::new(1.0, 1.0, 0.0));
}

#[test]
fn swap_twice_is_identity() {
    let mut rig = rig();
    rig.session.start(&rig.scene);
    let before = rig.session.pair(0).unwrap().clone();

    rig.session.swap_pair(0, &rig.scene).unwrap();
    let swapped = rig.session.pair(0).unwrap();
    assert_eq!(swapped.source(), Some(rig.right));
    assert_eq!(swapped.target(), Some(rig.left));
    assert_eq!(swapped.initial_source(), before.initial_target());
    assert_eq!(swapped.initial_target(), before.initial_source());
    assert_eq!(*swapped.last_source(), rig.scene.world_transform(rig.right).unwrap());

    rig.session.swap_pair(0, &rig.scene).unwrap();
    let back = rig.session.pair(0).unwrap();
    assert_eq!(back.source(), before.source());
    assert_eq!(back.target(), before.target());
    assert_eq!(back.initial_source(), before.initial_source());
    assert_eq!(back.initial_target(), before.initial_target());
    assert_eq!(back.last_source(), before.last_source());
}

#[test]
fn swapped_pair_drives_former_source() {
    let mut rig = rig();
    rig.session.start(&rig.scene);
    rig.session.swap_pair(0, &rig.scene).unwrap();

    rig.scene.edit_transform(rig.right, |t| t.position.x = 2.0);
    rig.session.tick(&mut rig.scene);
    assert_eq!(position(&rig.scene, rig.left), Vec3::new(-2.0, 1.0, 0.0));
}

#[test]
fn swap_incomplete_pair_warns() {
    let mut session = MirrorSession::default();
    let scene = Scene::new();
    let index = session.add_empty_pair();

    let err = session.swap_pair(index, &scene).unwrap_err();
    assert!(matches!(err, MirrorError::MissingReference));
    assert!(err.is_warning());
}

#[test]
fn remove_pair_restores_while_active() {
    let mut rig = rig();
    rig.session.start(&rig.scene);
    rig.scene.edit_transform(rig.left, |t| t.position.x = -4.0);
    rig.session.tick(&mut rig.scene);

    let removed = rig.session.remove_pair(0, &mut rig.scene).unwrap();
    assert_eq!(removed.source(), Some(rig.left));
    assert!(rig.session.is_empty());
    assert_eq!(position(&rig.scene, rig.right), Vec3::new(1.0, 1.0, 0.0));

    // Objects are free again
    assert!(rig.session.can_add_selection(&[rig.left, rig.right]));
}

#[test]
fn reassigned_pair_does_not_restore_old_baseline() {
    let mut rig = rig();
    let s2 = rig.scene.add_object("S2", snapshot(50.0, 0.0, 0.0));
    let t2 = rig.scene.add_object("T2", snapshot(0.0, 7.0, 0.0));

    rig.session.assign(0, Some(s2), Some(t2), &rig.scene).unwrap();
    assert!(!rig.session.pair(0).unwrap().is_captured());

    rig.session.restore_pair(0, &mut rig.scene).unwrap();
    assert_eq!(position(&rig.scene, s2), Vec3::new(50.0, 0.0, 0.0));
    assert_eq!(position(&rig.scene, t2), Vec3::new(0.0, 7.0, 0.0));
    assert!(rig.scene.history().is_empty());
}

#[test]
fn reassign_while_active_captures_new_objects() {
    let mut rig = rig();
    let s2 = rig.scene.add_object("S2", snapshot(50.0, 0.0, 0.0));
    let t2 = rig.scene.add_object("T2", snapshot(0.0, 7.0, 0.0));
    rig.session.start(&rig.scene);

    rig.session.assign(0, Some(s2), Some(t2), &rig.scene).unwrap();
    let pair = rig.session.pair(0).unwrap();
    assert!(pair.is_captured());
    assert_eq!(pair.initial_source().position, Vec3::new(50.0, 0.0, 0.0));
    assert_eq!(pair.initial_target().position, Vec3::new(0.0, 7.0, 0.0));

    rig.scene.edit_transform(s2, |t| t.position.x = 40.0);
    rig.session.tick(&mut rig.scene);
    rig.session.stop(&mut rig.scene);
    assert_eq!(position(&rig.scene, s2), Vec3::new(50.0, 0.0, 0.0));
    assert_eq!(position(&rig.scene, t2), Vec3::new(0.0, 7.0, 0.0));
}

#[test]
fn partial_reassign_while_active_leaves_new_source_alone() {
    let mut rig = rig();
    let s2 = rig.scene.add_object("S2", snapshot(50.0, 0.0, 0.0));
    rig.session.start(&rig.scene);

    rig.session.assign(0, Some(s2), None, &rig.scene).unwrap();
    assert!(!rig.session.pair(0).unwrap().is_captured());

    rig.session.remove_pair(0, &mut rig.scene).unwrap();
    assert_eq!(position(&rig.scene, s2), Vec3::new(50.0, 0.0, 0.0));
    assert!(rig.scene.history().is_empty());
}

#[test]
fn pairs_with_destroyed_objects_are_not_restored() {
    for removal in 0..2 {
        let mut rig = rig();
        rig.session.start(&rig.scene);
        rig.scene.edit_transform(rig.left, |t| t.position.x = -4.0);
        rig.session.tick(&mut rig.scene);
        rig.scene.remove_object(rig.right);
        let recorded = rig.scene.history().len();

        if removal == 0 {
            rig.session.remove_pair(0, &mut rig.scene).unwrap();
        } else {
            rig.session.clear(&mut rig.scene);
        }

        assert_eq!(position(&rig.scene, rig.left), Vec3::new(-4.0, 1.0, 0.0));
        assert_eq!(rig.scene.history().len(), recorded);
    }
}

// ============================================================================
// Failure Isolation
// ============================================================================

#[test]
fn failing_pair_does_not_block_others() {
    let mut scene = Scene::new();
    let flat = scene.add_object(
        "Flat",
        TransformSnapshot::new(Vec3::ZERO, Quat::IDENTITY, Vec3::new(1.0, 0.0, 1.0)),
    );
    let flat_target = scene.create_object("FlatTarget");
    let a = scene.create_object("A");
    let b = scene.create_object("B");

    let mut session = MirrorSession::default();
    session.add_pair(flat, flat_target, &scene).unwrap();
    session.add_pair(a, b, &scene).unwrap();
    session.start(&scene);

    scene.edit_transform(flat, |t| t.position.x = 1.0);
    scene.edit_transform(a, |t| t.position.x = 1.0);

    for _ in 0..2 {
        let report = session.tick(&mut scene);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].index, 0);
        assert!(matches!(report.failures[0].error, MirrorError::DegenerateScale { .. }));
        assert!(!report.is_idle());
    }

    assert_eq!(position(&scene, b).x, -1.0);
    assert_eq!(position(&scene, flat_target), Vec3::ZERO);
}

#[test]
fn incomplete_pairs_are_skipped_silently() {
    let mut rig = rig();
    let lonely = rig.scene.create_object("Lonely");
    let index = rig.session.add_empty_pair();
    rig.session.assign(index, Some(lonely), None, &rig.scene).unwrap();
    rig.session.start(&rig.scene);

    rig.scene.edit_transform(lonely, |t| t.position.x = 9.0);
    rig.scene.edit_transform(rig.left, |t| t.position.x = -2.0);
    let report = rig.session.tick(&mut rig.scene);

    assert!(report.failures.is_empty());
    assert_eq!(report.applied.len(), 1);
}

#[test]
fn clear_restores_and_empties() {
    let mut rig = rig();
    rig.session.start(&rig.scene);
    rig.scene.edit_transform(rig.left, |t| t.position.x = -4.0);
    rig.session.tick(&mut rig.scene);

    rig.session.clear(&mut rig.scene);
    assert!(rig.session.is_empty());
    assert_eq!(position(&rig.scene, rig.left), Vec3::new(-1.0, 1.0, 0.0));
}
