use crate::core::math;
use crate::core::vector;


#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BBox {
    pub min: vector::Vec,
    pub max: vector::Vec
}

impl BBox {
    pub fn new(min: vector::Vec, max: vector::Vec) -> BBox {
        BBox {min: min, max: max}
    }

    pub fn empty() -> BBox {
        BBox {
            min: vector::Vec::new(std::f32::MAX, std::f32::MAX, std::f32::MAX),
            max: vector::Vec::new(std::f32::MIN, std::f32::MIN, std::f32::MIN)
        }
    }

    pub fn is_empty(&self) -> bool {
        self.min.x >= self.max.x || self.min.y >= self.max.y || self.min.z >= self.max.z
    }

    pub fn union_with(&self, k: &vector::Vec) -> BBox {
        BBox {
            min: vector::Vec::new(
                f32::min(self.min.x, k.x), f32::min(self.min.y, k.y), f32::min(self.min.z, k.z)),
            max: vector::Vec::new(
                f32::max(self.max.x, k.x), f32::max(self.max.y, k.y), f32::max(self.max.z, k.z))
        }
    }

    pub fn combine_with(&self, b: &BBox) -> BBox {
        BBox {
            min: vector::Vec::new(
                f32::min(self.min.x, b.min.x),
                f32::min(self.min.y, b.min.y),
                f32::min(self.min.z, b.min.z)),
            max: vector::Vec::new(
                f32::max(self.max.x, b.max.x),
                f32::max(self.max.y, b.max.y),
                f32::max(self.max.z, b.max.z))
        }
    }

    pub fn diagonal(&self) -> vector::Vec {
        self.max - self.min
    }

    /**
     * Interpolates both corners toward the other box. f = 0 and f = 1 return
     * the two boxes exactly; a box-level blend, not a box of blended
     * contents.
     */
    pub fn lerp(&self, other: &BBox, f: f32) -> BBox {
        BBox {
            min: vector::Vec::new(
                math::lerp(self.min.x, other.min.x, f),
                math::lerp(self.min.y, other.min.y, f),
                math::lerp(self.min.z, other.min.z, f)),
            max: vector::Vec::new(
                math::lerp(self.max.x, other.max.x, f),
                math::lerp(self.max.y, other.max.y, f),
                math::lerp(self.max.z, other.max.z, f))
        }
    }

    /// True when the other box lies entirely inside this box.
    pub fn contains_box(&self, b: &BBox) -> bool {
        self.min.x <= b.min.x && self.min.y <= b.min.y && self.min.z <= b.min.z
            && self.max.x >= b.max.x && self.max.y >= b.max.y && self.max.z >= b.max.z
    }
}

/**
 * Linear bounds: a pair of boxes whose linear interpolation over a time range
 * conservatively contains a primitive's motion within that range.
 */
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LBBox {
    pub bounds0: BBox,
    pub bounds1: BBox
}

impl LBBox {
    pub fn new(bounds0: BBox, bounds1: BBox) -> LBBox {
        LBBox {bounds0: bounds0, bounds1: bounds1}
    }

    /// The box the pair predicts at blend fraction f.
    pub fn interpolate(&self, f: f32) -> BBox {
        self.bounds0.lerp(&self.bounds1, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn union_grows_an_empty_box() {
        let b = BBox::empty()
            .union_with(&vector::Vec::new(1.0, 2.0, 3.0))
            .union_with(&vector::Vec::new(-1.0, 0.0, 5.0));
        assert_eq!(b.min, vector::Vec::new(-1.0, 0.0, 3.0));
        assert_eq!(b.max, vector::Vec::new(1.0, 2.0, 5.0));
        assert!(!b.is_empty());
        assert!(BBox::empty().is_empty());
        assert_eq!(b.diagonal(), vector::Vec::new(2.0, 2.0, 2.0));

        let c = b.combine_with(&BBox::new(
            vector::Vec::new(0.0, -4.0, 0.0), vector::Vec::new(0.5, 0.0, 9.0)));
        assert_eq!(c.min, vector::Vec::new(-1.0, -4.0, 0.0));
        assert_eq!(c.max, vector::Vec::new(1.0, 2.0, 9.0));
    }

    #[test]
    fn lerp_is_exact_at_the_endpoints() {
        let a = BBox::new(vector::Vec::new(0.0, 0.0, 0.0), vector::Vec::new(1.0, 1.0, 1.0));
        let b = BBox::new(vector::Vec::new(4.0, 0.0, 0.0), vector::Vec::new(5.0, 1.0, 1.0));
        assert_eq!(a.lerp(&b, 0.0), a);
        assert_eq!(a.lerp(&b, 1.0), b);
        assert_eq!(
            LBBox::new(a, b).interpolate(0.5),
            BBox::new(vector::Vec::new(2.0, 0.0, 0.0), vector::Vec::new(3.0, 1.0, 1.0)));
    }

    #[test]
    fn containment_is_inclusive() {
        let outer = BBox::new(vector::Vec::new(0.0, 0.0, 0.0), vector::Vec::new(2.0, 2.0, 2.0));
        let inner = BBox::new(vector::Vec::new(0.5, 0.0, 1.0), vector::Vec::new(2.0, 1.0, 2.0));
        assert!(outer.contains_box(&inner));
        assert!(outer.contains_box(&outer));
        assert!(!inner.contains_box(&outer));
    }
}
