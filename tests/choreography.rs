mod common;

use animated_button::widget::choreography::CHANNELS;
use animated_button::widget::{AnimatedButton, PointerEvent};
use common::{SpyContainer, play_props, test_settings};

fn mounted() -> (SpyContainer, AnimatedButton) {
    let mut host = SpyContainer::new();
    let button = AnimatedButton::mount(play_props(), test_settings(), &mut host).unwrap();
    (host, button)
}

#[test]
fn enter_then_immediate_leave_targets_rest_values() {
    let (host, mut button) = mounted();
    host.dispatch(&mut button, PointerEvent::Enter);
    host.dispatch(&mut button, PointerEvent::Leave);

    let targets = button.targets().unwrap();
    let tweens = button.tweens().unwrap();
    for channel in &CHANNELS {
        assert_eq!(tweens.target_of(targets.key(channel)), Some(channel.rest), "{channel:?}");
    }
}

#[test]
fn alternating_hover_ending_on_enter_targets_presented_values() {
    let (mut host, mut button) = mounted();
    for i in 0..7 {
        let event = if i % 2 == 0 { PointerEvent::Enter } else { PointerEvent::Leave };
        host.dispatch(&mut button, event);
        host.run_frames(&mut button, 3, (800.0, 600.0));
    }

    let targets = button.targets().unwrap();
    let tweens = button.tweens().unwrap();
    assert_eq!(tweens.len(), CHANNELS.len());
    for channel in &CHANNELS {
        assert_eq!(tweens.target_of(targets.key(channel)), Some(channel.presented), "{channel:?}");
    }
}

#[test]
fn hover_reveals_shared_material_and_settles() {
    let (mut host, mut button) = mounted();
    host.run_frames(&mut button, 2, (800.0, 600.0));
    assert_eq!(host.coverage(), 0, "shapes start fully transparent");

    host.dispatch(&mut button, PointerEvent::Enter);
    host.run_frames(&mut button, 45, (800.0, 600.0));

    let scene = button.scene().unwrap();
    let material = scene.material(button.shared_material().unwrap()).unwrap();
    assert_eq!(material.opacity(), 1.0);
    let torus = scene.object(button.targets().unwrap().torus).unwrap();
    assert_eq!(torus.scale.x, 1.35);
    assert_eq!((torus.position.x, torus.position.y), (30.0, 40.0));
    assert!(button.tweens().unwrap().is_idle());
    assert!(host.coverage() > 0);
    assert_eq!(button.label().scale, 1.35);
}
