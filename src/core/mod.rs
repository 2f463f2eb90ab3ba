mod bbox;
pub use self::bbox::BBox;
pub use self::bbox::LBBox;

mod math;
pub use self::math::*;

mod time;
pub use self::time::remap_build_bounds;
pub use self::time::time_segment;
pub use self::time::TimeRange;

mod vector;
pub use self::vector::Vec;
pub use self::vector::Vec3;

mod vertex;
pub use self::vertex::Vertex;
