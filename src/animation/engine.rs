use crate::animation::easing::Ease;
use crate::animation::property::{Animatable, PropertyKey};
use log::trace;

/// A scalar transition of one property.
#[derive(Debug, Clone, PartialEq)]
pub struct Tween {
    pub key: PropertyKey,
    /// Starting value; `None` until the first tick captures the current value.
    pub from: Option<f32>,
    pub to: f32,
    /// Seconds.
    pub duration: f32,
    pub ease: Ease,
    elapsed: f32,
}

impl Tween {
    pub fn progress(&self) -> f32 {
        if self.duration <= 0.0 {
            1.0
        } else {
            (self.elapsed / self.duration).clamp(0.0, 1.0)
        }
    }

    pub fn is_complete(&self) -> bool {
        self.progress() >= 1.0
    }

    fn value(&self, from: f32) -> f32 {
        let p = self.progress();
        if p >= 1.0 {
            return self.to;
        }
        from + (self.to - from) * self.ease.apply(p)
    }
}

/// Runs tweens against an [`Animatable`] target.
///
/// At most one tween is live per [`PropertyKey`]: starting a new one replaces
/// whatever was running on that key.
#[derive(Debug, Default)]
pub struct TweenEngine {
    tweens: Vec<Tween>,
}

impl TweenEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tweens from the property's value at the first tick to `to`.
    pub fn to(&mut self, key: PropertyKey, to: f32, duration: f32, ease: Ease) {
        self.insert(Tween {
            key,
            from: None,
            to,
            duration,
            ease,
            elapsed: 0.0,
        });
    }

    /// Tweens from an explicit `from` to `to`.
    pub fn from_to(&mut self, key: PropertyKey, from: f32, to: f32, duration: f32, ease: Ease) {
        self.insert(Tween {
            key,
            from: Some(from),
            to,
            duration,
            ease,
            elapsed: 0.0,
        });
    }

    fn insert(&mut self, tween: Tween) {
        let before = self.tweens.len();
        self.tweens.retain(|t| t.key != tween.key);
        if self.tweens.len() != before {
            trace!("Overwrote running tween on {:?}", tween.key);
        }
        self.tweens.push(tween);
    }

    /// Advances every tween by `dt` seconds and writes the new values.
    /// Finished tweens land exactly on their end value and are removed.
    pub fn advance<A: Animatable + ?Sized>(&mut self, dt: f32, target: &mut A) {
        let dt = dt.max(0.0);
        self.tweens.retain_mut(|tween| {
            let from = match tween.from {
                Some(from) => from,
                None => match target.read(tween.key) {
                    Some(current) => {
                        tween.from = Some(current);
                        current
                    }
                    None => {
                        trace!("Dropping tween on unknown property {:?}", tween.key);
                        return false;
                    }
                },
            };
            tween.elapsed += dt;
            if !target.write(tween.key, tween.value(from)) {
                return false;
            }
            !tween.is_complete()
        });
    }

    /// End value of the live tween on `key`, if any.
    pub fn target_of(&self, key: PropertyKey) -> Option<f32> {
        self.tweens.iter().find(|t| t.key == key).map(|t| t.to)
    }

    pub fn is_idle(&self) -> bool {
        self.tweens.is_empty()
    }

    pub fn len(&self) -> usize {
        self.tweens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tweens.is_empty()
    }

    pub fn tweens(&self) -> &[Tween] {
        &self.tweens
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::property::{Property, TargetId};
    use std::collections::HashMap;

    #[derive(Default)]
    struct Values(HashMap<PropertyKey, f32>);

    impl Animatable for Values {
        fn read(&self, key: PropertyKey) -> Option<f32> {
            self.0.get(&key).copied()
        }

        fn write(&mut self, key: PropertyKey, value: f32) -> bool {
            match self.0.get_mut(&key) {
                Some(slot) => {
                    *slot = value;
                    true
                }
                None => false,
            }
        }
    }

    const LABEL: PropertyKey = PropertyKey::new(TargetId::Label, Property::Scale);

    fn values(initial: f32) -> Values {
        let mut v = Values::default();
        v.0.insert(LABEL, initial);
        v
    }

    #[test]
    fn to_captures_start_value_on_first_tick() {
        let mut engine = TweenEngine::new();
        let mut v = values(1.0);
        engine.to(LABEL, 2.0, 1.0, Ease::Linear);
        // Value changes between scheduling and the first tick.
        v.0.insert(LABEL, 1.5);
        engine.advance(0.5, &mut v);
        assert!((v.0[&LABEL] - 1.75).abs() < 1e-6);
    }

    #[test]
    fn completed_tween_lands_on_target_and_is_removed() {
        let mut engine = TweenEngine::new();
        let mut v = values(0.0);
        engine.from_to(LABEL, 0.8, 1.35, 0.6, Ease::default());
        for _ in 0..40 {
            engine.advance(1.0 / 60.0, &mut v);
        }
        assert_eq!(v.0[&LABEL], 1.35);
        assert!(engine.is_idle());
    }

    #[test]
    fn new_tween_on_same_key_overwrites() {
        let mut engine = TweenEngine::new();
        let mut v = values(1.0);
        engine.to(LABEL, 1.35, 0.6, Ease::default());
        engine.advance(0.1, &mut v);
        let midway = v.0[&LABEL];
        engine.to(LABEL, 1.0, 0.6, Ease::default());
        assert_eq!(engine.len(), 1);
        assert_eq!(engine.target_of(LABEL), Some(1.0));

        // The replacement starts from wherever the first one left off.
        engine.advance(0.0, &mut v);
        assert_eq!(v.0[&LABEL], midway);
        engine.advance(1.0, &mut v);
        assert_eq!(v.0[&LABEL], 1.0);
    }

    #[test]
    fn from_to_applies_start_value_immediately() {
        let mut engine = TweenEngine::new();
        let mut v = values(5.0);
        engine.from_to(LABEL, 0.8, 1.35, 0.6, Ease::Linear);
        engine.advance(0.0, &mut v);
        assert_eq!(v.0[&LABEL], 0.8);
    }

    #[test]
    fn unknown_property_is_dropped() {
        let mut engine = TweenEngine::new();
        let mut v = Values::default();
        engine.to(LABEL, 1.0, 0.6, Ease::Linear);
        engine.advance(0.1, &mut v);
        assert!(engine.is_idle());
    }
}
