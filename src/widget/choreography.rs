//! Hover choreography: which properties move on pointer enter/leave, and
//! between which values.

use crate::animation::{Ease, Property, PropertyKey, TargetId, TweenEngine};
use crate::scene::graph::ObjectId;
use crate::scene::material::MaterialId;
use nalgebra::Vector3;

/// The things a channel animates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Sphere,
    Torus,
    Cone,
    /// The material all three shapes share.
    SharedMaterial,
    PulseLabel,
}

/// One animated scalar with its resting (hover-out) and presented (hover-in)
/// values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Channel {
    pub role: Role,
    pub property: Property,
    pub rest: f32,
    pub presented: f32,
    /// Animate-in restarts from `rest` instead of the current value.
    pub restart_from_rest: bool,
}

const fn from_to(role: Role, property: Property, rest: f32, presented: f32) -> Channel {
    Channel {
        role,
        property,
        rest,
        presented,
        restart_from_rest: true,
    }
}

const fn to(role: Role, property: Property, rest: f32, presented: f32) -> Channel {
    Channel {
        role,
        property,
        rest,
        presented,
        restart_from_rest: false,
    }
}

use Property::*;
use Role::*;

pub const CHANNELS: [Channel; 22] = [
    to(SharedMaterial, Opacity, 0.0, 1.0),
    from_to(Torus, ScaleX, 0.8, 1.35),
    from_to(Torus, ScaleY, 0.8, 1.35),
    from_to(Torus, ScaleZ, 0.8, 1.35),
    from_to(Torus, PositionX, 10.0, 30.0),
    from_to(Torus, PositionY, 20.0, 40.0),
    from_to(Torus, RotationX, 2.0, 2.3),
    from_to(Torus, RotationY, -0.3, 0.3),
    from_to(Sphere, ScaleX, 0.8, 1.15),
    from_to(Sphere, ScaleY, 0.8, 1.15),
    from_to(Sphere, ScaleZ, 0.8, 1.15),
    from_to(Sphere, PositionX, -10.0, -30.0),
    from_to(Sphere, PositionY, -10.0, -40.0),
    from_to(Cone, ScaleX, 0.8, 1.35),
    from_to(Cone, ScaleY, 0.8, 1.35),
    from_to(Cone, ScaleZ, 0.8, 1.35),
    from_to(Cone, PositionX, -30.0, -70.0),
    from_to(Cone, PositionY, 2.0, 12.0),
    from_to(Cone, PositionZ, 3.0, 3.0),
    from_to(Cone, RotationX, -0.2, -0.3),
    from_to(Cone, RotationZ, 0.0, 0.7),
    to(PulseLabel, Scale, 1.0, 1.35),
];

/// Position and rotation a shape is created with, before any hover.
pub fn mount_pose(role: Role) -> (Vector3<f32>, Vector3<f32>) {
    match role {
        Sphere => (Vector3::new(-25.0, -30.0, 0.0), Vector3::zeros()),
        Torus => (Vector3::new(30.0, 30.0, 0.0), Vector3::new(2.3, 0.3, 0.0)),
        Cone => (Vector3::new(-50.0, 12.0, 3.0), Vector3::new(-0.3, 0.0, 0.7)),
        SharedMaterial | PulseLabel => (Vector3::zeros(), Vector3::zeros()),
    }
}

/// Scene handles the channels resolve to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StageTargets {
    pub sphere: ObjectId,
    pub torus: ObjectId,
    pub cone: ObjectId,
    pub material: MaterialId,
}

impl StageTargets {
    pub fn key(&self, channel: &Channel) -> PropertyKey {
        let target = match channel.role {
            Sphere => TargetId::Object(self.sphere),
            Torus => TargetId::Object(self.torus),
            Cone => TargetId::Object(self.cone),
            SharedMaterial => TargetId::Material(self.material),
            PulseLabel => TargetId::Label,
        };
        PropertyKey::new(target, channel.property)
    }
}

/// Starts every hover-in tween at once.
pub fn animate_in(engine: &mut TweenEngine, targets: &StageTargets, duration: f32, ease: Ease) {
    for channel in &CHANNELS {
        let key = targets.key(channel);
        if channel.restart_from_rest {
            engine.from_to(key, channel.rest, channel.presented, duration, ease);
        } else {
            engine.to(key, channel.presented, duration, ease);
        }
    }
}

/// Sends every channel back to its resting value from wherever it is.
pub fn animate_out(engine: &mut TweenEngine, targets: &StageTargets, duration: f32, ease: Ease) {
    for channel in &CHANNELS {
        engine.to(targets.key(channel), channel.rest, duration, ease);
    }
}
