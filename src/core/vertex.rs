use crate::core::math;
use crate::core::vector;

use std::fmt;
use std::fmt::Display;
use std::ops::{Add, Mul, Sub};

/**
 * One element of a time-step buffer: a 3D position plus one embedded scalar
 * payload. The payload carries the curve radius for curve geometry and is
 * unused (or a user weight) for triangle meshes.
 */
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Vertex {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

impl Vertex {
    pub fn new(x: f32, y: f32, z: f32, w: f32) -> Vertex {
        Vertex {x: x, y: y, z: z, w: w}
    }

    /// A vertex with a zero payload.
    pub fn at(x: f32, y: f32, z: f32) -> Vertex {
        Self::new(x, y, z, 0.0)
    }

    pub fn zero() -> Vertex {
        Self::new(0.0, 0.0, 0.0, 0.0)
    }

    /// The position part of the vertex.
    pub fn position(&self) -> vector::Vec {
        vector::Vec::new(self.x, self.y, self.z)
    }

    /// True when the position components are finite (no NaN or infinity).
    /// The payload is not inspected; triangle meshes tolerate arbitrary
    /// weights.
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }

    /// True when the position and the payload are all finite. Curve control
    /// points interpolate the payload (radius), so it must be well-formed
    /// too.
    pub fn is_finite_with_payload(&self) -> bool {
        self.is_finite() && self.w.is_finite()
    }

    /**
     * Blends every component, payload included, as (1 - f) * a + f * b.
     * f = 0 and f = 1 return self and other exactly.
     */
    pub fn lerp(&self, other: &Vertex, f: f32) -> Vertex {
        Self::new(
            math::lerp(self.x, other.x, f),
            math::lerp(self.y, other.y, f),
            math::lerp(self.z, other.z, f),
            math::lerp(self.w, other.w, f))
    }
}

impl Display for Vertex {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {}, {}; {})", self.x, self.y, self.z, self.w)
    }
}

impl Add for Vertex {
    type Output = Vertex;
    fn add(mut self, _rhs: Vertex) -> Vertex {
        self.x = self.x + _rhs.x;
        self.y = self.y + _rhs.y;
        self.z = self.z + _rhs.z;
        self.w = self.w + _rhs.w;
        self
    }
}

impl Sub for Vertex {
    type Output = Vertex;
    fn sub(mut self, _rhs: Vertex) -> Vertex {
        self.x = self.x - _rhs.x;
        self.y = self.y - _rhs.y;
        self.z = self.z - _rhs.z;
        self.w = self.w - _rhs.w;
        self
    }
}

impl Mul<f32> for Vertex {
    type Output = Vertex;
    fn mul(mut self, _rhs: f32) -> Vertex {
        self.x = self.x * _rhs;
        self.y = self.y * _rhs;
        self.z = self.z * _rhs;
        self.w = self.w * _rhs;
        self
    }
}
