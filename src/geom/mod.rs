mod buffer;
pub use self::buffer::BufferView;

mod curve;
pub use self::curve::{CurveBasis, CurveGeometry, SegmentFlags};
pub use self::curve::{FLAG_FIRST_SEGMENT, FLAG_LAST_SEGMENT};

mod error;
pub use self::error::GeometryError;

mod mesh;
pub use self::mesh::{Triangle, TriangleMesh};

mod prim;
pub use self::prim::Prim;

mod util;
pub use self::util::{opposite_vertex, rotation, shared_edge};
