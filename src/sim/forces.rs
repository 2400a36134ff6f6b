//! Named forces acting on a velocity
//!
//! The registry is built once and handed to `Vehicle::update` each tick.
//! Forces run in registration order; damping and acceleration do not
//! commute, so that order is part of the behavior.

use serde::{Deserialize, Serialize};

use super::vector::{Vector, VectorOps};

/// A velocity mutation given the frame dt (seconds)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Force {
    /// `v += a * dt`
    Acceleration { vector: Vector },
    /// `v *= factor`
    Damping { factor: f32 },
    /// `v += (w + dt)`: dt is added to each component, not multiplied
    Wind { vector: Vector },
}

impl Force {
    pub fn apply(&self, velocity: &mut Vector, dt: f32) {
        match *self {
            Force::Acceleration { vector } => {
                velocity.accumulate(vector.scale(dt));
            }
            Force::Damping { factor } => {
                velocity.scale_in_place(factor);
            }
            Force::Wind { vector } => {
                velocity.accumulate(vector.add_scalar(dt));
            }
        }
    }
}

/// A force with its registry name (the config representation)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedForce {
    pub name: String,
    #[serde(flatten)]
    pub force: Force,
}

/// Ordered name → force mapping
#[derive(Debug, Clone, Default)]
pub struct ForceRegistry {
    entries: Vec<NamedForce>,
}

impl ForceRegistry {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Build a registry from config entries (later duplicates overwrite)
    pub fn from_config(forces: &[NamedForce]) -> Self {
        let mut registry = Self::new();
        for entry in forces {
            registry.register(&entry.name, entry.force);
        }
        registry
    }

    /// Store a force under `name`. An existing name keeps its slot.
    pub fn register(&mut self, name: &str, force: Force) {
        if let Some(existing) = self.entries.iter_mut().find(|e| e.name == name) {
            existing.force = force;
        } else {
            self.entries.push(NamedForce {
                name: name.to_string(),
                force,
            });
        }
    }

    pub fn register_acceleration(&mut self, name: &str, accel: Vector) {
        self.register(name, Force::Acceleration { vector: accel });
    }

    pub fn register_damping(&mut self, name: &str, factor: f32) {
        self.register(name, Force::Damping { factor });
    }

    pub fn register_wind(&mut self, name: &str, wind: Vector) {
        self.register(name, Force::Wind { vector: wind });
    }

    /// Remove a force, returning it if it was registered
    pub fn remove(&mut self, name: &str) -> Option<Force> {
        let idx = self.entries.iter().position(|e| e.name == name)?;
        Some(self.entries.remove(idx).force)
    }

    pub fn get(&self, name: &str) -> Option<&Force> {
        self.entries.iter().find(|e| e.name == name).map(|e| &e.force)
    }

    /// Apply every registered force to `target`, in registration order
    pub fn apply_all(&self, target: &mut Vector, dt: f32) {
        for entry in &self.entries {
            entry.force.apply(target, dt);
        }
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_acceleration_scales_by_dt() {
        let mut v = Vector::new(1.0, 1.0);
        let gravity = Force::Acceleration {
            vector: Vector::new(0.0, 9.82),
        };
        gravity.apply(&mut v, 0.5);
        assert_eq!(v, Vector::new(1.0, 1.0 + 4.91));
    }

    #[test]
    fn test_wind_adds_dt_to_each_component() {
        let mut v = Vector::ZERO;
        let wind = Force::Wind {
            vector: Vector::new(0.5, 0.0),
        };
        wind.apply(&mut v, 0.25);
        assert_eq!(v, Vector::new(0.75, 0.25));
    }

    #[test]
    fn test_registration_order_is_application_order() {
        // accelerate then damp != damp then accelerate
        let mut first = ForceRegistry::new();
        first.register_acceleration("push", Vector::new(10.0, 0.0));
        first.register_damping("drag", 0.5);

        let mut second = ForceRegistry::new();
        second.register_damping("drag", 0.5);
        second.register_acceleration("push", Vector::new(10.0, 0.0));

        let mut a = Vector::ZERO;
        let mut b = Vector::ZERO;
        first.apply_all(&mut a, 1.0);
        second.apply_all(&mut b, 1.0);
        assert_eq!(a, Vector::new(5.0, 0.0));
        assert_eq!(b, Vector::new(10.0, 0.0));
    }

    #[test]
    fn test_reregister_overwrites_in_place() {
        let mut registry = ForceRegistry::new();
        registry.register_damping("drag", 0.97);
        registry.register_acceleration("gravity", Vector::new(0.0, 9.82));
        registry.register_damping("drag", 0.5);

        assert_eq!(registry.len(), 2);
        assert_eq!(registry.names().collect::<Vec<_>>(), vec!["drag", "gravity"]);
        assert_eq!(registry.get("drag"), Some(&Force::Damping { factor: 0.5 }));
    }

    #[test]
    fn test_remove() {
        let mut registry = ForceRegistry::new();
        registry.register_wind("wind", Vector::new(0.5, 0.0));
        assert!(registry.remove("wind").is_some());
        assert!(registry.remove("wind").is_none());
        assert!(registry.is_empty());
    }

    #[test]
    fn test_from_config_json() {
        let json = r#"[
            {"name": "drag", "kind": "damping", "factor": 0.97},
            {"name": "gravity", "kind": "acceleration", "vector": [0.0, 9.82]}
        ]"#;
        let forces: Vec<NamedForce> = serde_json::from_str(json).unwrap();
        let registry = ForceRegistry::from_config(&forces);
        assert_eq!(registry.len(), 2);
        let gravity = Force::Acceleration {
            vector: Vector::new(0.0, 9.82),
        };
        assert_eq!(registry.get("gravity"), Some(&gravity));
    }

    #[test]
    fn test_empty_registry_is_identity() {
        let registry = ForceRegistry::new();
        let mut v = Vector::new(3.0, -4.0);
        registry.apply_all(&mut v, 0.016);
        assert_eq!(v, Vector::new(3.0, -4.0));
    }

    proptest! {
        #[test]
        fn single_damping_scales_velocity(
            vx in -1e3f32..1e3, vy in -1e3f32..1e3,
            f in 0.01f32..=1.0, dt in 0.0f32..0.1,
        ) {
            let mut registry = ForceRegistry::new();
            registry.register_damping("drag", f);
            let mut v = Vector::new(vx, vy);
            registry.apply_all(&mut v, dt);
            prop_assert_eq!(v, Vector::new(vx * f, vy * f));
        }
    }
}
