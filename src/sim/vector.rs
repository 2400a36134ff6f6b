//! 2D vector helpers
//!
//! Positions, velocities and speeds are plain `glam::Vec2`. `VectorOps` adds
//! the copy/in-place pairs the force code is written against.

use glam::Vec2;

/// All moving quantities are vectors
pub type Vector = Vec2;

pub trait VectorOps {
    /// Multiply by a scalar, returning a new vector
    fn scale(&self, k: f32) -> Self;
    /// Multiply this vector by a scalar
    fn scale_in_place(&mut self, k: f32) -> &mut Self;
    /// Add a scalar to both components, returning a new vector
    fn add_scalar(&self, k: f32) -> Self;
    /// Add another vector into this one
    fn accumulate(&mut self, other: Self) -> &mut Self;
}

impl VectorOps for Vec2 {
    #[inline]
    fn scale(&self, k: f32) -> Self {
        *self * k
    }

    #[inline]
    fn scale_in_place(&mut self, k: f32) -> &mut Self {
        *self *= k;
        self
    }

    #[inline]
    fn add_scalar(&self, k: f32) -> Self {
        *self + k
    }

    #[inline]
    fn accumulate(&mut self, other: Self) -> &mut Self {
        *self += other;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_add_scalar_hits_both_components() {
        let v = Vector::new(1.0, -2.0);
        assert_eq!(v.add_scalar(0.5), Vector::new(1.5, -1.5));
        assert_eq!(v, Vector::new(1.0, -2.0));
    }

    #[test]
    fn test_in_place_ops_chain() {
        let mut v = Vector::new(2.0, 4.0);
        v.scale_in_place(0.5).accumulate(Vector::new(1.0, 1.0));
        assert_eq!(v, Vector::new(2.0, 3.0));
    }

    proptest! {
        #[test]
        fn scale_leaves_input_untouched(x in -1e3f32..1e3, y in -1e3f32..1e3, k in -10f32..10.0) {
            let a = Vector::new(x, y);
            let scaled = a.scale(k);
            prop_assert_eq!(a, Vector::new(x, y));
            prop_assert_eq!(scaled, Vector::new(x * k, y * k));
        }

        #[test]
        fn scale_in_place_mutates(x in -1e3f32..1e3, y in -1e3f32..1e3, k in -10f32..10.0) {
            let mut a = Vector::new(x, y);
            let out = *a.scale_in_place(k);
            prop_assert_eq!(a, Vector::new(x * k, y * k));
            prop_assert_eq!(out, a);
        }

        #[test]
        fn accumulate_adds_componentwise(
            ax in -1e3f32..1e3, ay in -1e3f32..1e3,
            bx in -1e3f32..1e3, by in -1e3f32..1e3,
        ) {
            let mut a = Vector::new(ax, ay);
            a.accumulate(Vector::new(bx, by));
            prop_assert_eq!(a, Vector::new(ax + bx, ay + by));
        }
    }
}
