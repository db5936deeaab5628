mod common;

use animated_button::widget::{AnimatedButton, Parallax, PointerEvent, PointerState};
use common::{SpyContainer, play_props, test_settings};
use nalgebra::Point3;

#[test]
fn one_frame_from_rest_moves_by_follow_fraction() {
    let (w, h) = (1280.0, 720.0);
    let mut camera = Point3::new(0.0, 0.0, 200.0);
    Parallax::default().step(&mut camera, PointerState::new(1.0, 1.0), (w, h));
    assert_eq!((camera.x, camera.y), (0.02 * w, -0.02 * h));
}

#[test]
fn widget_camera_follows_pointer_and_keeps_looking_at_origin() {
    let mut host = SpyContainer::new();
    let mut button = AnimatedButton::mount(play_props(), test_settings(), &mut host).unwrap();
    let (w, h) = (1000.0, 500.0);

    // Bottom-right corner of the window: pointer (1, -1).
    host.dispatch(
        &mut button,
        PointerEvent::MouseMove {
            client_x: w,
            client_y: h,
            window_width: w,
            window_height: h,
        },
    );
    assert_eq!(button.pointer(), PointerState::new(1.0, -1.0));

    host.run_frames(&mut button, 1, (w, h));
    let camera = button.camera().unwrap();
    assert!((camera.position.x - 20.0).abs() < 1e-4);
    assert!((camera.position.y - 10.0).abs() < 1e-4);
    assert_eq!(camera.position.z, 200.0);
    assert_eq!(camera.target, Point3::origin());
}
