use crate::widget::host::{Container, ListenerId, PointerEventKind, SurfaceFrame, SurfaceId};
use egui::{ColorImage, Context, TextureHandle, TextureOptions};
use log::debug;
use std::collections::HashMap;

/// Hosts a widget surface as an egui texture.
pub struct EguiHost {
    ctx: Context,
    surface: Option<SurfaceId>,
    texture: Option<TextureHandle>,
    listeners: HashMap<ListenerId, PointerEventKind>,
    next_id: u64,
    frame_requested: bool,
}

impl EguiHost {
    pub fn new(ctx: Context) -> Self {
        Self {
            ctx,
            surface: None,
            texture: None,
            listeners: HashMap::new(),
            next_id: 0,
            frame_requested: false,
        }
    }

    fn next_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    /// The latest presented frame, if a surface is attached.
    pub fn texture(&self) -> Option<&TextureHandle> {
        self.texture.as_ref()
    }

    pub fn is_subscribed(&self, kind: PointerEventKind) -> bool {
        self.listeners.values().any(|k| *k == kind)
    }

    /// Returns and clears the pending frame request.
    pub fn take_frame_request(&mut self) -> bool {
        std::mem::take(&mut self.frame_requested)
    }
}

impl Container for EguiHost {
    fn attach_surface(&mut self, logical_size: (u32, u32)) -> Option<SurfaceId> {
        let id = SurfaceId(self.next_id());
        debug!("Attached surface {:?} ({}x{})", id, logical_size.0, logical_size.1);
        self.surface = Some(id);
        Some(id)
    }

    fn present(&mut self, surface: SurfaceId, frame: SurfaceFrame<'_>) {
        if self.surface != Some(surface) || frame.rgba.len() != frame.width * frame.height * 4 {
            return;
        }
        let image = ColorImage::from_rgba_premultiplied([frame.width, frame.height], frame.rgba);
        match &mut self.texture {
            Some(texture) => texture.set(image, TextureOptions::LINEAR),
            None => self.texture = Some(self.ctx.load_texture("button_surface", image, TextureOptions::LINEAR)),
        }
    }

    fn detach_surface(&mut self, surface: SurfaceId) {
        if self.surface == Some(surface) {
            self.surface = None;
            self.texture = None;
        }
    }

    fn add_listener(&mut self, kind: PointerEventKind) -> ListenerId {
        let id = ListenerId(self.next_id());
        self.listeners.insert(id, kind);
        id
    }

    fn remove_listener(&mut self, listener: ListenerId) {
        self.listeners.remove(&listener);
    }

    fn request_frame(&mut self) {
        self.frame_requested = true;
        self.ctx.request_repaint();
    }
}
