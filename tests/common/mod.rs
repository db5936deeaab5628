#![allow(dead_code)]

use animated_button::widget::{
    AnimatedButton, ButtonProps, Container, ListenerId, PointerEvent, PointerEventKind, SurfaceFrame, SurfaceId,
    WidgetSettings,
};
use std::collections::HashMap;

/// Records every call the widget makes on its host.
#[derive(Debug, Default)]
pub struct SpyContainer {
    /// Simulates a host with nowhere to put the surface.
    pub refuse_surface: bool,
    next_id: u64,
    pub surfaces: HashMap<SurfaceId, (u32, u32)>,
    pub listeners: HashMap<ListenerId, PointerEventKind>,
    pub frames_requested: usize,
    pub presented: usize,
    pub last_frame: Option<(usize, usize, Vec<u8>)>,
}

impl SpyContainer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn without_surface() -> Self {
        Self {
            refuse_surface: true,
            ..Self::default()
        }
    }

    pub fn listener_count(&self, kind: PointerEventKind) -> usize {
        self.listeners.values().filter(|k| **k == kind).count()
    }

    /// Delivers `event` only if the widget subscribed to it.
    pub fn dispatch(&self, button: &mut AnimatedButton, event: PointerEvent) {
        if self.listener_count(event.kind()) > 0 {
            button.handle_event(event);
        }
    }

    /// Runs `frames` ticks of 1/60 s, as long as the widget keeps asking.
    pub fn run_frames(&mut self, button: &mut AnimatedButton, frames: usize, window: (f32, f32)) {
        for _ in 0..frames {
            button.on_frame(1.0 / 60.0, window, self).unwrap();
        }
    }

    /// Sum of alpha over the last presented frame.
    pub fn coverage(&self) -> u64 {
        self.last_frame
            .as_ref()
            .map(|(_, _, rgba)| rgba.chunks_exact(4).map(|px| px[3] as u64).sum())
            .unwrap_or(0)
    }
}

impl Container for SpyContainer {
    fn attach_surface(&mut self, logical_size: (u32, u32)) -> Option<SurfaceId> {
        if self.refuse_surface {
            return None;
        }
        self.next_id += 1;
        let id = SurfaceId(self.next_id);
        self.surfaces.insert(id, logical_size);
        Some(id)
    }

    fn present(&mut self, surface: SurfaceId, frame: SurfaceFrame<'_>) {
        assert!(self.surfaces.contains_key(&surface), "present on a detached surface");
        self.presented += 1;
        self.last_frame = Some((frame.width, frame.height, frame.rgba.to_vec()));
    }

    fn detach_surface(&mut self, surface: SurfaceId) {
        self.surfaces.remove(&surface);
    }

    fn add_listener(&mut self, kind: PointerEventKind) -> ListenerId {
        self.next_id += 1;
        let id = ListenerId(self.next_id);
        self.listeners.insert(id, kind);
        id
    }

    fn remove_listener(&mut self, listener: ListenerId) {
        self.listeners.remove(&listener);
    }

    fn request_frame(&mut self) {
        self.frames_requested += 1;
    }
}

/// Small, fast settings with no texture directory.
pub fn test_settings() -> WidgetSettings {
    WidgetSettings {
        pixel_ratio: 0.5,
        antialias: false,
        texture_dir: "tests/does-not-exist".into(),
        ..WidgetSettings::default()
    }
}

pub fn play_props() -> ButtonProps {
    ButtonProps::new(400, 300, "play").unwrap()
}
