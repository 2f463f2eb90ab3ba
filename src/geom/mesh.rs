use crate::geom::buffer::BufferView;
use crate::geom::error::GeometryError;
use crate::geom::prim;

use crate::core;

use log::debug;
use std::fmt;
use std::fmt::Display;

/// Vertex indices of one triangle. The order of the triple defines the
/// winding.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Triangle {
    pub v: [u32; 3],
}

impl Triangle {
    pub fn new(v0: u32, v1: u32, v2: u32) -> Triangle {
        Triangle {v: [v0, v1, v2]}
    }
}

impl Display for Triangle {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Triangle {{ {}, {}, {} }}", self.v[0], self.v[1], self.v[2])
    }
}

/**
 * Indexed triangle mesh with one vertex-position buffer per time sample.
 * Buffers are attached between commits; a commit fixes the derived segment
 * count and the time-sample-0 fast path, after which every query is a pure
 * read and safe to fan out across threads.
 *
 * Out-of-range triangle indices and non-finite vertex data are tolerated
 * conditions, reported through valid() rather than failing any query.
 */
pub struct TriangleMesh {
    triangles: BufferView<Triangle>,
    vertices0: BufferView<core::Vertex>,
    vertices: std::vec::Vec<BufferView<core::Vertex>>,
    vertex_attribs: std::vec::Vec<BufferView<f32>>,
    num_time_steps: usize,
    fnum_time_segments: f32,
}

impl TriangleMesh {
    pub fn new(num_time_steps: usize) -> TriangleMesh {
        let num_time_steps = usize::max(num_time_steps, 1);
        TriangleMesh {
            triangles: BufferView::empty(),
            vertices0: BufferView::empty(),
            vertices: vec![BufferView::empty(); num_time_steps],
            vertex_attribs: vec![],
            num_time_steps: num_time_steps,
            fnum_time_segments: 0.0,
        }
    }

    pub fn set_num_time_steps(&mut self, num_time_steps: usize) {
        let num_time_steps = usize::max(num_time_steps, 1);
        self.vertices.resize(num_time_steps, BufferView::empty());
        self.num_time_steps = num_time_steps;
    }

    pub fn set_triangles(&mut self, triangles: BufferView<Triangle>) {
        self.triangles = triangles;
    }

    /// Attaches the vertex-position buffer of one time sample.
    pub fn set_vertices(&mut self, itime: usize, vertices: BufferView<core::Vertex>) {
        self.vertices[itime] = vertices;
    }

    /// Attaches a non-time-varying per-vertex attribute buffer.
    pub fn set_vertex_attrib(&mut self, slot: usize, attrib: BufferView<f32>) {
        if slot >= self.vertex_attribs.len() {
            self.vertex_attribs.resize(slot + 1, BufferView::empty());
        }
        self.vertex_attribs[slot] = attrib;
    }

    /**
     * Fixes the cached time-sample-0 alias and the derived segment count.
     * Replaced buffers are not visible to queries until the next commit.
     */
    pub fn commit(&mut self) {
        self.vertices0 = self.vertices[0].clone();
        self.fnum_time_segments = (self.num_time_steps - 1) as f32;
        debug!("committed triangle mesh: {} triangles, {} vertices, {} time steps",
               self.size(), self.num_vertices(), self.num_time_steps);
    }

    /// Checks attachment consistency. Out-of-range triangle indices are not
    /// an error here; they surface later as invalid primitives.
    pub fn verify(&self) -> Result<(), GeometryError> {
        let expected = self.vertices[0].len();
        for (itime, vertices) in self.vertices.iter().enumerate() {
            if vertices.is_empty() {
                return Err(GeometryError::MissingBuffer {attr: "vertex", itime: itime});
            }
            if vertices.len() != expected {
                return Err(GeometryError::BufferSizeMismatch {
                    attr: "vertex", itime: itime, len: vertices.len(), expected: expected});
            }
        }
        for (slot, attrib) in self.vertex_attribs.iter().enumerate() {
            if !attrib.is_empty() && attrib.len() != expected {
                return Err(GeometryError::AttribSizeMismatch {
                    slot: slot, len: attrib.len(), expected: expected});
            }
        }
        Ok(())
    }

    /// Number of triangles.
    pub fn size(&self) -> usize {
        self.triangles.len()
    }

    /// Number of vertices per time sample.
    pub fn num_vertices(&self) -> usize {
        self.vertices[0].len()
    }

    pub fn triangle(&self, i: usize) -> Triangle {
        self.triangles[i]
    }

    /// The i'th vertex of the first time sample, through the committed alias.
    pub fn vertex(&self, i: usize) -> core::Vertex {
        self.vertices0[i]
    }

    /// The i'th vertex of the itime'th time sample.
    pub fn vertex_at(&self, i: usize, itime: usize) -> core::Vertex {
        self.vertices[itime][i]
    }

    pub fn vertex_attrib(&self, slot: usize) -> &BufferView<f32> {
        &self.vertex_attribs[slot]
    }

    /// Box over the triangle's corners at the first time sample, read
    /// through the committed fast path.
    pub fn bounds(&self, i: usize) -> core::BBox {
        let tri = self.triangle(i);
        core::BBox::empty()
            .union_with(&self.vertex(tri.v[0] as usize).position())
            .union_with(&self.vertex(tri.v[1] as usize).position())
            .union_with(&self.vertex(tri.v[2] as usize).position())
    }
}

impl prim::Prim for TriangleMesh {
    fn num_prims(&self) -> usize {
        self.size()
    }

    fn num_time_steps(&self) -> usize {
        self.num_time_steps
    }

    fn fnum_time_segments(&self) -> f32 {
        self.fnum_time_segments
    }

    fn bounds_at(&self, i: usize, itime: usize) -> core::BBox {
        let tri = self.triangle(i);
        core::BBox::empty()
            .union_with(&self.vertex_at(tri.v[0] as usize, itime).position())
            .union_with(&self.vertex_at(tri.v[1] as usize, itime).position())
            .union_with(&self.vertex_at(tri.v[2] as usize, itime).position())
    }

    fn valid(&self, i: usize, itime_lower: usize, itime_upper: usize) -> bool {
        let tri = self.triangle(i);
        let num_vertices = self.num_vertices();
        if tri.v[0] as usize >= num_vertices
            || tri.v[1] as usize >= num_vertices
            || tri.v[2] as usize >= num_vertices
        {
            return false;
        }

        for itime in itime_lower..=itime_upper {
            if !self.vertex_at(tri.v[0] as usize, itime).is_finite()
                || !self.vertex_at(tri.v[1] as usize, itime).is_finite()
                || !self.vertex_at(tri.v[2] as usize, itime).is_finite()
            {
                return false;
            }
        }

        true
    }
}

impl Display for TriangleMesh {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "TriangleMesh({} vertices, {} triangles, {} time steps)",
               self.num_vertices(), self.size(), self.num_time_steps)
    }
}
