//! Mirror Session Demo
//!
//! Pairs the left and right arm of a small rig, drags the left side around
//! for a few frames and watches the right side follow. Stopping the session
//! puts both arms back. The pair list is then saved as a preset and loaded
//! into a fresh session.
//!
//! Run: `RUST_LOG=info cargo run --example mirror_session`

use glam::{Quat, Vec3};
use mirror_rig::{
    AxisMask, MirrorSession, MirrorSettings, Scene, TransformHost, TransformSnapshot,
};

fn build_rig(scene: &mut Scene) {
    let arm = |x: f32| TransformSnapshot::from_position(Vec3::new(x, 1.4, 0.0));
    scene.add_object("UpperArm.L", arm(-0.3));
    scene.add_object("UpperArm.R", arm(0.3));
    scene.add_object("Hand.L", arm(-0.8));
    scene.add_object("Hand.R", arm(0.8));
}

fn print_object(scene: &Scene, name: &str) {
    let Some(transform) = scene.find_object(name).and_then(|h| scene.world_transform(h)) else {
        return;
    };
    println!(
        "  {name:<12} pos {:>6.2} {:>6.2} {:>6.2}   rot {:>6.1} {:>6.1} {:>6.1}",
        transform.position.x,
        transform.position.y,
        transform.position.z,
        transform.rotation_euler_degrees().x,
        transform.rotation_euler_degrees().y,
        transform.rotation_euler_degrees().z,
    );
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let settings = MirrorSettings {
        default_axis_mask: AxisMask::new(true, false, false),
        presets_dir: std::env::temp_dir().join("mirror_rig_demo_presets"),
        ..MirrorSettings::default()
    };

    let mut scene = settings.new_scene();
    build_rig(&mut scene);

    let mut session = MirrorSession::new(settings.clone());
    let selection: Vec<_> = ["UpperArm.L", "UpperArm.R"]
        .iter()
        .filter_map(|name| scene.find_object(name))
        .collect();
    session.add_selected_pair(&selection, &scene)?;

    let hand_l = scene.find_object("Hand.L").ok_or_else(|| anyhow::anyhow!("Hand.L missing"))?;
    let hand_r = scene.find_object("Hand.R").ok_or_else(|| anyhow::anyhow!("Hand.R missing"))?;
    session.add_pair(hand_l, hand_r, &scene)?;

    session.start(&scene);

    for frame in 1..=3_u8 {
        let step = f32::from(frame);
        scene.edit_transform(hand_l, |t| {
            t.position.x -= 0.1;
            t.position.y += 0.05;
            t.rotation = Quat::from_rotation_y((15.0 * step).to_radians());
        });

        let report = session.tick(&mut scene);
        println!("frame {frame}: {} pair(s) written", report.applied.len());
        print_object(&scene, "Hand.L");
        print_object(&scene, "Hand.R");
    }

    session.stop(&mut scene);
    println!("after stop:");
    print_object(&scene, "Hand.L");
    print_object(&scene, "Hand.R");
    println!("undo entries recorded: {}", scene.history().len());

    let library = settings.open_library()?;
    let preset = session.to_preset("Arms", &scene);
    let path = library.save(&preset, true)?;
    println!("saved preset to {}", path.display());

    let mut reloaded = MirrorSession::new(settings);
    let report = reloaded.load_preset(&library.load("Arms")?, &mut scene);
    println!("reloaded {} pair(s), {} skipped", report.loaded, report.skipped.len());

    Ok(())
}
