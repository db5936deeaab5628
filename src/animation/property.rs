use crate::scene::graph::{ObjectId, Scene};
use crate::scene::material::MaterialId;

/// What a tween writes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TargetId {
    Object(ObjectId),
    Material(MaterialId),
    /// The widget's pulse label.
    Label,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Property {
    PositionX,
    PositionY,
    PositionZ,
    RotationX,
    RotationY,
    RotationZ,
    ScaleX,
    ScaleY,
    ScaleZ,
    Opacity,
    /// Uniform scale of a label.
    Scale,
}

/// One scalar channel of one target; tweens are keyed by it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PropertyKey {
    pub target: TargetId,
    pub property: Property,
}

impl PropertyKey {
    pub const fn new(target: TargetId, property: Property) -> Self {
        Self { target, property }
    }
}

/// Read/write access to tweenable scalars.
///
/// Both return `None`/`false` for keys the implementor does not own.
pub trait Animatable {
    fn read(&self, key: PropertyKey) -> Option<f32>;
    fn write(&mut self, key: PropertyKey, value: f32) -> bool;
}

impl Animatable for Scene {
    fn read(&self, key: PropertyKey) -> Option<f32> {
        match key.target {
            TargetId::Object(id) => {
                let o = self.object(id)?;
                match key.property {
                    Property::PositionX => Some(o.position.x),
                    Property::PositionY => Some(o.position.y),
                    Property::PositionZ => Some(o.position.z),
                    Property::RotationX => Some(o.rotation.x),
                    Property::RotationY => Some(o.rotation.y),
                    Property::RotationZ => Some(o.rotation.z),
                    Property::ScaleX => Some(o.scale.x),
                    Property::ScaleY => Some(o.scale.y),
                    Property::ScaleZ => Some(o.scale.z),
                    Property::Opacity | Property::Scale => None,
                }
            }
            TargetId::Material(id) => match key.property {
                Property::Opacity => self.material(id).map(|m| m.opacity()),
                _ => None,
            },
            TargetId::Label => None,
        }
    }

    fn write(&mut self, key: PropertyKey, value: f32) -> bool {
        match key.target {
            TargetId::Object(id) => {
                let Some(o) = self.object_mut(id) else {
                    return false;
                };
                let slot = match key.property {
                    Property::PositionX => &mut o.position.x,
                    Property::PositionY => &mut o.position.y,
                    Property::PositionZ => &mut o.position.z,
                    Property::RotationX => &mut o.rotation.x,
                    Property::RotationY => &mut o.rotation.y,
                    Property::RotationZ => &mut o.rotation.z,
                    Property::ScaleX => &mut o.scale.x,
                    Property::ScaleY => &mut o.scale.y,
                    Property::ScaleZ => &mut o.scale.z,
                    Property::Opacity | Property::Scale => return false,
                };
                *slot = value;
                true
            }
            TargetId::Material(id) => match (key.property, self.material_mut(id)) {
                (Property::Opacity, Some(m)) => {
                    m.set_opacity(value);
                    true
                }
                _ => false,
            },
            TargetId::Label => false,
        }
    }
}
