/// Handle to a drawing surface attached to a host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SurfaceId(pub u64);

/// Handle to a registered pointer listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerEventKind {
    /// Movement anywhere in the window.
    MouseMove,
    /// Pointer entered the button's anchor.
    PointerEnter,
    /// Pointer left the button's anchor.
    PointerLeave,
}

/// Input a host forwards to a mounted widget.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    MouseMove {
        client_x: f32,
        client_y: f32,
        window_width: f32,
        window_height: f32,
    },
    Enter,
    Leave,
}

impl PointerEvent {
    pub fn kind(&self) -> PointerEventKind {
        match self {
            PointerEvent::MouseMove { .. } => PointerEventKind::MouseMove,
            PointerEvent::Enter => PointerEventKind::PointerEnter,
            PointerEvent::Leave => PointerEventKind::PointerLeave,
        }
    }
}

/// One rendered frame handed to the host.
#[derive(Debug, Clone, Copy)]
pub struct SurfaceFrame<'a> {
    /// Drawing buffer size in pixels.
    pub width: usize,
    pub height: usize,
    /// Premultiplied RGBA8, row-major from the top.
    pub rgba: &'a [u8],
}

/// Everything the widget needs from the environment it is mounted in.
///
/// A host without a place to put the 3D surface returns `None` from
/// [`Container::attach_surface`]; the widget then runs without a scene.
pub trait Container {
    /// Reserves a surface of `logical_size` pixels for the widget.
    fn attach_surface(&mut self, logical_size: (u32, u32)) -> Option<SurfaceId>;

    /// Replaces the surface's contents.
    fn present(&mut self, surface: SurfaceId, frame: SurfaceFrame<'_>);

    fn detach_surface(&mut self, surface: SurfaceId);

    /// Subscribes the widget to `kind`. The host delivers matching events
    /// through [`AnimatedButton::handle_event`](crate::widget::AnimatedButton::handle_event).
    fn add_listener(&mut self, kind: PointerEventKind) -> ListenerId;

    fn remove_listener(&mut self, listener: ListenerId);

    /// Asks for one more [`AnimatedButton::on_frame`](crate::widget::AnimatedButton::on_frame) call.
    fn request_frame(&mut self);
}
