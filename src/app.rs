use crate::error::{Error, Result};
use crate::io::config::Config;
use crate::io::image::save_snapshot;
use crate::ui::shell::ButtonApp;
use crate::widget::{AnimatedButton, Container, ListenerId, PointerEvent, PointerEventKind, SurfaceFrame, SurfaceId};
use image::RgbaImage;
use log::{info, warn};
use std::path::PathBuf;
use std::time::Instant;

/// Runs the widget in a desktop window until it is closed.
pub fn run_gui(config: Config) -> Result<()> {
    let props = config.button_props()?;
    let settings = config.widget_settings()?;
    info!(
        "Starting GUI mode ({}x{} window, {}x{} button)...",
        config.window.width,
        config.window.height,
        props.width(),
        props.height()
    );

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([config.window.width, config.window.height])
            .with_min_inner_size([props.width() as f32, props.height() as f32]),
        ..Default::default()
    };

    eframe::run_native(
        &config.window.title,
        options,
        Box::new(move |cc| Ok(Box::new(ButtonApp::new(cc, props, settings)?))),
    )
    .map_err(|e| Error::Gui(e.to_string()))
}

/// Scripted frames for a headless run.
#[derive(Debug, Clone)]
pub struct HeadlessOptions {
    pub output: PathBuf,
    pub frames: u32,
    /// Frame index at which the pointer enters the anchor.
    pub hover_at: Option<u32>,
    /// Frame index at which it leaves again.
    pub leave_at: Option<u32>,
    /// Pointer position in client pixels, sent once before the first frame.
    pub pointer: Option<(f32, f32)>,
}

impl Default for HeadlessOptions {
    fn default() -> Self {
        Self {
            output: PathBuf::from("button.png"),
            frames: 60,
            hover_at: None,
            leave_at: None,
            pointer: None,
        }
    }
}

/// A [`Container`] without a window: keeps the last presented frame in memory.
#[derive(Debug, Default)]
pub struct HeadlessHost {
    next_id: u64,
    surface: Option<SurfaceId>,
    last_frame: Option<RgbaImage>,
    listeners: Vec<(ListenerId, PointerEventKind)>,
    frame_requested: bool,
}

impl HeadlessHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_frame(&self) -> Option<&RgbaImage> {
        self.last_frame.as_ref()
    }

    pub fn is_subscribed(&self, kind: PointerEventKind) -> bool {
        self.listeners.iter().any(|(_, k)| *k == kind)
    }

    pub fn take_frame_request(&mut self) -> bool {
        std::mem::take(&mut self.frame_requested)
    }

    fn dispatch(&self, button: &mut AnimatedButton, event: PointerEvent) {
        if self.is_subscribed(event.kind()) {
            button.handle_event(event);
        }
    }
}

impl Container for HeadlessHost {
    fn attach_surface(&mut self, _logical_size: (u32, u32)) -> Option<SurfaceId> {
        self.next_id += 1;
        let id = SurfaceId(self.next_id);
        self.surface = Some(id);
        Some(id)
    }

    fn present(&mut self, surface: SurfaceId, frame: SurfaceFrame<'_>) {
        if self.surface != Some(surface) {
            return;
        }
        // Premultiplied in, straight alpha out.
        let image = RgbaImage::from_fn(frame.width as u32, frame.height as u32, |x, y| {
            let i = (y as usize * frame.width + x as usize) * 4;
            let Some(px) = frame.rgba.get(i..i + 4) else {
                return image::Rgba([0, 0, 0, 0]);
            };
            let a = px[3];
            if a == 0 {
                return image::Rgba([0, 0, 0, 0]);
            }
            let unmultiply = |c: u8| ((c as u32 * 255 + a as u32 / 2) / a as u32).min(255) as u8;
            image::Rgba([unmultiply(px[0]), unmultiply(px[1]), unmultiply(px[2]), a])
        });
        self.last_frame = Some(image);
    }

    fn detach_surface(&mut self, surface: SurfaceId) {
        if self.surface == Some(surface) {
            self.surface = None;
        }
    }

    fn add_listener(&mut self, kind: PointerEventKind) -> ListenerId {
        self.next_id += 1;
        let id = ListenerId(self.next_id);
        self.listeners.push((id, kind));
        id
    }

    fn remove_listener(&mut self, listener: ListenerId) {
        self.listeners.retain(|(id, _)| *id != listener);
    }

    fn request_frame(&mut self) {
        self.frame_requested = true;
    }
}

/// Renders a scripted hover timeline at 60 fps and saves the last frame.
pub fn run_headless(config: Config, options: &HeadlessOptions) -> Result<()> {
    let props = config.button_props()?;
    let settings = config.widget_settings()?;
    let window = (config.window.width, config.window.height);
    info!("Starting headless mode: {} frames -> {:?}", options.frames, options.output);

    let start = Instant::now();
    let mut host = HeadlessHost::new();
    let mut button = AnimatedButton::mount(props, settings, &mut host)?;

    if let Some((x, y)) = options.pointer {
        host.dispatch(
            &mut button,
            PointerEvent::MouseMove {
                client_x: x,
                client_y: y,
                window_width: window.0,
                window_height: window.1,
            },
        );
    }

    for frame in 0..options.frames {
        if options.hover_at == Some(frame) {
            host.dispatch(&mut button, PointerEvent::Enter);
        }
        if options.leave_at == Some(frame) {
            host.dispatch(&mut button, PointerEvent::Leave);
        }
        if !host.take_frame_request() {
            warn!("Widget stopped requesting frames at frame {}", frame);
            break;
        }
        button.on_frame(1.0 / 60.0, window, &mut host)?;
    }

    let result = match host.last_frame() {
        Some(image) => save_snapshot(image, &options.output),
        None => {
            warn!("No frame was rendered; nothing to save");
            Ok(())
        }
    };
    button.unmount(&mut host);

    info!("Headless run finished in {:?}", start.elapsed());
    result
}
