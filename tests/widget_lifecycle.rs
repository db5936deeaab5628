mod common;

use animated_button::widget::{AnimatedButton, ButtonProps, PointerEventKind};
use common::{SpyContainer, play_props, test_settings};

#[test]
fn mount_attaches_one_surface_of_the_requested_size() {
    let mut host = SpyContainer::new();
    let button = AnimatedButton::mount(play_props(), test_settings(), &mut host).unwrap();

    assert_eq!(host.surfaces.len(), 1);
    assert_eq!(host.surfaces.values().next(), Some(&(400, 300)));
    assert_eq!(button.text(), "play");
    assert_eq!(button.label().text, "play");
    assert_eq!(button.renderer().unwrap().size(), (400, 300));
    assert_eq!(host.listener_count(PointerEventKind::MouseMove), 1);
    assert_eq!(host.listener_count(PointerEventKind::PointerEnter), 1);
    assert_eq!(host.listener_count(PointerEventKind::PointerLeave), 1);
    assert_eq!(host.frames_requested, 1);
}

#[test]
fn unmount_leaves_nothing_behind() {
    let mut host = SpyContainer::new();
    let mut button = AnimatedButton::mount(play_props(), test_settings(), &mut host).unwrap();
    host.run_frames(&mut button, 3, (800.0, 600.0));
    assert_eq!(host.presented, 3);

    button.unmount(&mut host);
    assert!(host.listeners.is_empty());
    assert!(host.surfaces.is_empty());
    assert!(button.renderer().is_none());
    assert!(!button.is_mounted());

    // The loop is not rescheduled and a second unmount is harmless.
    let requested = host.frames_requested;
    host.run_frames(&mut button, 2, (800.0, 600.0));
    button.unmount(&mut host);
    assert_eq!(host.frames_requested, requested);
    assert_eq!(host.presented, 3);
}

#[test]
fn each_frame_requests_the_next() {
    let mut host = SpyContainer::new();
    let mut button = AnimatedButton::mount(play_props(), test_settings(), &mut host).unwrap();
    host.run_frames(&mut button, 5, (800.0, 600.0));
    assert_eq!(host.frames_requested, 6);
    let (w, h, rgba) = host.last_frame.as_ref().unwrap();
    assert_eq!((*w, *h), (200, 150));
    assert_eq!(rgba.len(), 200 * 150 * 4);
}

#[test]
fn missing_container_skips_3d_setup() {
    let mut host = SpyContainer::without_surface();
    let mut button = AnimatedButton::mount(play_props(), test_settings(), &mut host).unwrap();

    assert!(!button.has_scene());
    assert_eq!(button.text(), "play");
    assert_eq!(host.listener_count(PointerEventKind::PointerEnter), 0);
    assert_eq!(host.listener_count(PointerEventKind::PointerLeave), 0);
    assert_eq!(host.frames_requested, 0);

    // Hover without a scene is a no-op, frames do nothing.
    button.on_pointer_enter();
    host.run_frames(&mut button, 2, (800.0, 600.0));
    assert_eq!(host.presented, 0);
    assert_eq!(button.label().scale, 1.0);

    button.unmount(&mut host);
    assert!(host.listeners.is_empty());
}

#[test]
fn invalid_props_are_rejected_before_mount() {
    assert!(ButtonProps::new(400, 0, "play").is_err());
}
