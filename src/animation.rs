//! Property tweening: easing curves, tween-addressable properties and the
//! engine that drives them once per frame.

pub mod easing;
pub mod engine;
pub mod property;

pub use easing::Ease;
pub use engine::{Tween, TweenEngine};
pub use property::{Animatable, Property, PropertyKey, TargetId};
