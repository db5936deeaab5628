//! The hover-animated 3D button and the host contract it runs against.

pub mod button;
pub mod choreography;
pub mod host;
pub mod parallax;
pub mod pointer;
pub mod props;

pub use button::{AnimatedButton, PulseLabel};
pub use host::{Container, ListenerId, PointerEvent, PointerEventKind, SurfaceFrame, SurfaceId};
pub use parallax::Parallax;
pub use pointer::PointerState;
pub use props::{ButtonProps, MaterialKind, WidgetSettings};
