use crate::animation::{Animatable, Property, PropertyKey, TargetId, TweenEngine};
use crate::core::color::from_hex;
use crate::error::Result;
use crate::pipeline::renderer::{Renderer, RendererOptions};
use crate::scene::camera::Camera;
use crate::scene::graph::Scene;
use crate::scene::light::Light;
use crate::scene::material::{Material, MaterialId, NormalMaterial, PhysicalMaterial};
use crate::scene::mesh::Mesh;
use crate::scene::scene_object::SceneObject;
use crate::scene::texture::{CubeTextureLoader, PendingCubeTexture};
use crate::widget::choreography::{self, Role, StageTargets};
use crate::widget::host::{Container, ListenerId, PointerEvent, PointerEventKind, SurfaceFrame, SurfaceId};
use crate::widget::pointer::PointerState;
use crate::widget::props::{ButtonProps, MaterialKind, WidgetSettings};
use log::{debug, info, trace, warn};
use nalgebra::Point3;
use std::sync::Arc;

/// The secondary text that pulses while hovered. Owned by one widget.
#[derive(Debug, Clone, PartialEq)]
pub struct PulseLabel {
    pub text: String,
    pub scale: f32,
}

/// Everything that only exists while the widget has a surface.
struct Stage {
    scene: Scene,
    camera: Camera,
    renderer: Renderer,
    surface: SurfaceId,
    targets: StageTargets,
    tweens: TweenEngine,
    pending_texture: Option<PendingCubeTexture>,
    hover_listeners: [ListenerId; 2],
}

/// Tween target spanning the scene and the widget's own label.
struct StageAnimatable<'a> {
    scene: &'a mut Scene,
    label: &'a mut PulseLabel,
}

impl Animatable for StageAnimatable<'_> {
    fn read(&self, key: PropertyKey) -> Option<f32> {
        match (key.target, key.property) {
            (TargetId::Label, Property::Scale) => Some(self.label.scale),
            (TargetId::Label, _) => None,
            _ => self.scene.read(key),
        }
    }

    fn write(&mut self, key: PropertyKey, value: f32) -> bool {
        match (key.target, key.property) {
            (TargetId::Label, Property::Scale) => {
                self.label.scale = value;
                true
            }
            (TargetId::Label, _) => false,
            _ => self.scene.write(key, value),
        }
    }
}

/// A button overlaid with a sphere, torus and cone that fly in on hover.
///
/// Created with [`AnimatedButton::mount`], driven by the host through
/// [`AnimatedButton::handle_event`] and [`AnimatedButton::on_frame`], and torn
/// down with [`AnimatedButton::unmount`].
pub struct AnimatedButton {
    props: ButtonProps,
    settings: WidgetSettings,
    pointer: PointerState,
    label: PulseLabel,
    mouse_move_listener: Option<ListenerId>,
    stage: Option<Stage>,
}

impl AnimatedButton {
    /// Builds the widget inside `container`.
    ///
    /// When the container has nowhere to put a surface the widget still
    /// tracks the pointer and shows its text, but has no scene, no hover
    /// listeners and no frame loop.
    pub fn mount(props: ButtonProps, settings: WidgetSettings, container: &mut dyn Container) -> Result<Self> {
        let mouse_move_listener = Some(container.add_listener(PointerEventKind::MouseMove));
        let label = PulseLabel {
            text: props.text().to_string(),
            scale: 1.0,
        };

        let stage = match container.attach_surface((props.width(), props.height())) {
            Some(surface) => match Self::build_stage(&props, &settings, surface, container) {
                Ok(stage) => Some(stage),
                Err(e) => {
                    container.detach_surface(surface);
                    if let Some(listener) = mouse_move_listener {
                        container.remove_listener(listener);
                    }
                    return Err(e);
                }
            },
            None => {
                debug!("No container for '{}', skipping 3D setup", props.text());
                None
            }
        };

        info!(
            "Mounted button '{}' ({}x{}, scene: {})",
            props.text(),
            props.width(),
            props.height(),
            stage.is_some()
        );

        Ok(Self {
            props,
            settings,
            pointer: PointerState::default(),
            label,
            mouse_move_listener,
            stage,
        })
    }

    fn build_stage(
        props: &ButtonProps,
        settings: &WidgetSettings,
        surface: SurfaceId,
        container: &mut dyn Container,
    ) -> Result<Stage> {
        // 1. Scene, camera, renderer
        let mut scene = Scene::new();
        let mut camera = Camera::new_perspective(settings.fov, props.aspect_ratio(), settings.near, settings.far);
        camera.position = Point3::new(0.0, 0.0, settings.camera_distance);
        camera.look_at(scene.origin());

        let mut renderer = Renderer::new(RendererOptions {
            width: props.width(),
            height: props.height(),
            pixel_ratio: settings.pixel_ratio,
            antialias: settings.antialias,
            alpha: settings.alpha,
        })?;
        renderer.set_clear_color(settings.clear_color, settings.clear_alpha);

        // 2. Lights
        scene.add_light(Light::new_ambient(from_hex(0xffffff), 0.5));
        scene.add_light(Light::new_spot(
            Point3::new(150.0, 150.0, 0.0),
            from_hex(0xf2056f),
            0.68,
            0.0,
        ));
        scene.add_light(Light::new_hemisphere(from_hex(0xd8c7ff), from_hex(0x61daff), 1.0));

        // 3. Environment texture, loaded in the background
        let pending_texture =
            Some(CubeTextureLoader::new(&settings.texture_dir).load(settings.texture_faces.clone()));

        // 4. Shapes sharing one material
        let material = scene.add_material(match settings.material {
            MaterialKind::Normal => Material::Normal(NormalMaterial {
                opacity: 0.0,
                transparent: true,
            }),
            MaterialKind::Physical => Material::Physical(PhysicalMaterial {
                color: from_hex(0xffffff),
                opacity: 0.0,
                ..Default::default()
            }),
        });
        let sphere = scene.add_object(shape("sphere", Mesh::sphere(24.0, 32, 32), material, Role::Sphere));
        let torus = scene.add_object(shape("torus", Mesh::torus(16.0, 8.0, 16, 100), material, Role::Torus));
        let cone = scene.add_object(shape("cone", Mesh::cone(8.0, 16.0, 32), material, Role::Cone));

        // 5. Hover listeners and the first frame
        let hover_listeners = [
            container.add_listener(PointerEventKind::PointerEnter),
            container.add_listener(PointerEventKind::PointerLeave),
        ];
        container.request_frame();

        Ok(Stage {
            scene,
            camera,
            renderer,
            surface,
            targets: StageTargets {
                sphere,
                torus,
                cone,
                material,
            },
            tweens: TweenEngine::new(),
            pending_texture,
            hover_listeners,
        })
    }

    pub fn handle_event(&mut self, event: PointerEvent) {
        match event {
            PointerEvent::MouseMove {
                client_x,
                client_y,
                window_width,
                window_height,
            } => self.on_mouse_move(client_x, client_y, window_width, window_height),
            PointerEvent::Enter => self.on_pointer_enter(),
            PointerEvent::Leave => self.on_pointer_leave(),
        }
    }

    pub fn on_mouse_move(&mut self, client_x: f32, client_y: f32, window_width: f32, window_height: f32) {
        if self.mouse_move_listener.is_none() {
            return;
        }
        if let Some(pointer) = PointerState::from_client(client_x, client_y, window_width, window_height) {
            self.pointer = pointer;
        }
    }

    pub fn on_pointer_enter(&mut self) {
        let (duration, ease) = (self.settings.duration, self.settings.ease);
        if let Some(stage) = &mut self.stage {
            trace!("Pointer entered '{}'", self.props.text());
            choreography::animate_in(&mut stage.tweens, &stage.targets, duration, ease);
        }
    }

    pub fn on_pointer_leave(&mut self) {
        let (duration, ease) = (self.settings.duration, self.settings.ease);
        if let Some(stage) = &mut self.stage {
            trace!("Pointer left '{}'", self.props.text());
            choreography::animate_out(&mut stage.tweens, &stage.targets, duration, ease);
        }
    }

    /// One tick of the frame loop: tweens, parallax, render, present, and a
    /// request for the next tick. Does nothing once unmounted.
    ///
    /// `dt` is in seconds; `window_size` is the host window in pixels.
    pub fn on_frame(&mut self, dt: f32, window_size: (f32, f32), container: &mut dyn Container) -> Result<()> {
        let Some(stage) = &mut self.stage else {
            return Ok(());
        };

        // 1. Environment map, once it arrives
        if let Some(pending) = &mut stage.pending_texture
            && let Some(result) = pending.poll()
        {
            stage.pending_texture = None;
            match result {
                Ok(cube) => {
                    let cube = Arc::new(cube);
                    if let Some(material) = stage.scene.material_mut(stage.targets.material)
                        && !material.set_env_map(cube)
                    {
                        debug!("Environment map loaded; current material does not use it");
                    }
                }
                Err(e) => warn!("Environment texture unavailable: {}", e),
            }
        }

        // 2. Tweens
        stage.tweens.advance(
            dt,
            &mut StageAnimatable {
                scene: &mut stage.scene,
                label: &mut self.label,
            },
        );

        // 3. Camera parallax
        self.settings
            .parallax
            .step(&mut stage.camera.position, self.pointer, window_size);
        stage.camera.look_at(stage.scene.origin());

        // 4. Draw and hand the frame over
        stage.renderer.render(&stage.scene, &stage.camera)?;
        let (width, height) = stage.renderer.drawing_buffer_size();
        let pixels = stage.renderer.read_pixels();
        container.present(
            stage.surface,
            SurfaceFrame {
                width,
                height,
                rgba: &pixels,
            },
        );
        container.request_frame();
        Ok(())
    }

    /// Detaches the surface, disposes the renderer and removes all listeners.
    /// Safe to call more than once.
    pub fn unmount(&mut self, container: &mut dyn Container) {
        if let Some(mut stage) = self.stage.take() {
            container.detach_surface(stage.surface);
            stage.renderer.dispose();
            for listener in stage.hover_listeners {
                container.remove_listener(listener);
            }
            // Dropping the stage drops any pending texture receiver.
        }
        if let Some(listener) = self.mouse_move_listener.take() {
            container.remove_listener(listener);
            info!("Unmounted button '{}'", self.props.text());
        }
    }

    pub fn is_mounted(&self) -> bool {
        self.mouse_move_listener.is_some()
    }

    pub fn has_scene(&self) -> bool {
        self.stage.is_some()
    }

    pub fn props(&self) -> &ButtonProps {
        &self.props
    }

    /// Text of the anchor and of the pulse label.
    pub fn text(&self) -> &str {
        self.props.text()
    }

    pub fn label(&self) -> &PulseLabel {
        &self.label
    }

    pub fn pointer(&self) -> PointerState {
        self.pointer
    }

    pub fn camera(&self) -> Option<&Camera> {
        self.stage.as_ref().map(|s| &s.camera)
    }

    pub fn scene(&self) -> Option<&Scene> {
        self.stage.as_ref().map(|s| &s.scene)
    }

    pub fn renderer(&self) -> Option<&Renderer> {
        self.stage.as_ref().map(|s| &s.renderer)
    }

    pub fn tweens(&self) -> Option<&TweenEngine> {
        self.stage.as_ref().map(|s| &s.tweens)
    }

    pub fn targets(&self) -> Option<StageTargets> {
        self.stage.as_ref().map(|s| s.targets)
    }

    pub fn shared_material(&self) -> Option<MaterialId> {
        self.stage.as_ref().map(|s| s.targets.material)
    }

    /// True while the environment texture is still loading.
    pub fn texture_pending(&self) -> bool {
        self.stage.as_ref().is_some_and(|s| s.pending_texture.is_some())
    }
}

fn shape(name: &str, mesh: Mesh, material: MaterialId, role: Role) -> SceneObject {
    let (position, rotation) = choreography::mount_pose(role);
    SceneObject::new(name, Arc::new(mesh), material)
        .with_position(position)
        .with_rotation(rotation)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct NullHost {
        next: u64,
        frames_requested: usize,
    }

    impl Container for NullHost {
        fn attach_surface(&mut self, _logical_size: (u32, u32)) -> Option<SurfaceId> {
            self.next += 1;
            Some(SurfaceId(self.next))
        }
        fn present(&mut self, _surface: SurfaceId, _frame: SurfaceFrame<'_>) {}
        fn detach_surface(&mut self, _surface: SurfaceId) {}
        fn add_listener(&mut self, _kind: PointerEventKind) -> ListenerId {
            self.next += 1;
            ListenerId(self.next)
        }
        fn remove_listener(&mut self, _listener: ListenerId) {}
        fn request_frame(&mut self) {
            self.frames_requested += 1;
        }
    }

    fn small_settings() -> WidgetSettings {
        WidgetSettings {
            pixel_ratio: 0.25,
            antialias: false,
            texture_dir: "no/such/dir".into(),
            ..Default::default()
        }
    }

    #[test]
    fn label_pulses_with_hover() {
        let mut host = NullHost::default();
        let props = ButtonProps::new(80, 60, "play").unwrap();
        let mut button = AnimatedButton::mount(props, small_settings(), &mut host).unwrap();

        button.on_pointer_enter();
        for _ in 0..45 {
            button.on_frame(1.0 / 60.0, (800.0, 600.0), &mut host).unwrap();
        }
        assert_eq!(button.label().scale, 1.35);
        assert_eq!(button.label().text, "play");

        button.on_pointer_leave();
        for _ in 0..45 {
            button.on_frame(1.0 / 60.0, (800.0, 600.0), &mut host).unwrap();
        }
        assert_eq!(button.label().scale, 1.0);
        button.unmount(&mut host);
    }

    #[test]
    fn frames_stop_after_unmount() {
        let mut host = NullHost::default();
        let props = ButtonProps::new(80, 60, "play").unwrap();
        let mut button = AnimatedButton::mount(props, small_settings(), &mut host).unwrap();
        button.on_frame(1.0 / 60.0, (800.0, 600.0), &mut host).unwrap();
        let requested = host.frames_requested;

        button.unmount(&mut host);
        button.on_frame(1.0 / 60.0, (800.0, 600.0), &mut host).unwrap();
        assert_eq!(host.frames_requested, requested);
        assert!(!button.is_mounted());
    }
}
