use crate::geom::buffer::BufferView;
use crate::geom::error::GeometryError;
use crate::geom::prim;

use crate::core;

use log::debug;
use std::fmt;
use std::fmt::Display;

bitflags! {
    /// Per-segment topology flags held in the two low bits of the optional
    /// flags buffer.
    pub struct SegmentFlags: u8 {
        /// Segment is the first of its curve.
        const FLAG_FIRST_SEGMENT = 0b01;
        /// Segment is the last of its curve.
        const FLAG_LAST_SEGMENT  = 0b10;
    }
}

/// Control-point basis of a curve store.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CurveBasis {
    /// Four positions per degree-3 segment.
    Bezier,
    /// Two endpoints plus two tangents per segment.
    Hermite,
}

/**
 * An array of bicubic curve segments over per-time-step control-point
 * buffers. Each entry of the curves buffer is the start offset of a segment:
 * segment k occupies control points [curves[k], curves[k] + 3] of the
 * position buffer of whichever time sample is read. Normal and tangent
 * buffers, when attached, are indexed the same way.
 *
 * Gathers read raw control data with no index checking; a segment whose
 * control-point range exceeds the buffer must have been rejected by the
 * attachment-time verification, not per query.
 */
pub struct CurveGeometry {
    curves: BufferView<u32>,
    vertices0: BufferView<core::Vertex>,
    normals0: BufferView<core::Vertex>,
    tangents0: BufferView<core::Vertex>,
    vertices: std::vec::Vec<BufferView<core::Vertex>>,
    normals: std::vec::Vec<BufferView<core::Vertex>>,
    tangents: std::vec::Vec<BufferView<core::Vertex>>,
    flags: Option<BufferView<u8>>,
    vertex_attribs: std::vec::Vec<BufferView<f32>>,
    basis: CurveBasis,
    tessellation_rate: u32,
    num_time_steps: usize,
    fnum_time_segments: f32,
}

fn blend2(a: &[core::Vertex; 2], b: &[core::Vertex; 2], f: f32) -> [core::Vertex; 2] {
    [a[0].lerp(&b[0], f), a[1].lerp(&b[1], f)]
}

fn blend4(a: &[core::Vertex; 4], b: &[core::Vertex; 4], f: f32) -> [core::Vertex; 4] {
    [a[0].lerp(&b[0], f), a[1].lerp(&b[1], f), a[2].lerp(&b[2], f), a[3].lerp(&b[3], f)]
}

impl CurveGeometry {
    pub fn new(basis: CurveBasis, num_time_steps: usize) -> CurveGeometry {
        let num_time_steps = usize::max(num_time_steps, 1);
        CurveGeometry {
            curves: BufferView::empty(),
            vertices0: BufferView::empty(),
            normals0: BufferView::empty(),
            tangents0: BufferView::empty(),
            vertices: vec![BufferView::empty(); num_time_steps],
            normals: vec![BufferView::empty(); num_time_steps],
            tangents: vec![BufferView::empty(); num_time_steps],
            flags: None,
            vertex_attribs: vec![],
            basis: basis,
            tessellation_rate: 4,
            num_time_steps: num_time_steps,
            fnum_time_segments: 0.0,
        }
    }

    pub fn set_num_time_steps(&mut self, num_time_steps: usize) {
        let num_time_steps = usize::max(num_time_steps, 1);
        self.vertices.resize(num_time_steps, BufferView::empty());
        self.normals.resize(num_time_steps, BufferView::empty());
        self.tangents.resize(num_time_steps, BufferView::empty());
        self.num_time_steps = num_time_steps;
    }

    pub fn set_curves(&mut self, curves: BufferView<u32>) {
        self.curves = curves;
    }

    pub fn set_vertices(&mut self, itime: usize, vertices: BufferView<core::Vertex>) {
        self.vertices[itime] = vertices;
    }

    pub fn set_normals(&mut self, itime: usize, normals: BufferView<core::Vertex>) {
        self.normals[itime] = normals;
    }

    pub fn set_tangents(&mut self, itime: usize, tangents: BufferView<core::Vertex>) {
        self.tangents[itime] = tangents;
    }

    pub fn set_flags(&mut self, flags: BufferView<u8>) {
        self.flags = Some(flags);
    }

    /// Attaches a non-time-varying per-vertex attribute buffer.
    pub fn set_vertex_attrib(&mut self, slot: usize, attrib: BufferView<f32>) {
        if slot >= self.vertex_attribs.len() {
            self.vertex_attribs.resize(slot + 1, BufferView::empty());
        }
        self.vertex_attribs[slot] = attrib;
    }

    /// Stored for downstream tessellation; no query here consumes it.
    pub fn set_tessellation_rate(&mut self, rate: u32) {
        self.tessellation_rate = rate;
    }

    pub fn tessellation_rate(&self) -> u32 {
        self.tessellation_rate
    }

    pub fn basis(&self) -> CurveBasis {
        self.basis
    }

    /**
     * Fixes the cached time-sample-0 aliases and the derived segment count.
     * Replaced buffers are not visible to queries until the next commit.
     */
    pub fn commit(&mut self) {
        self.vertices0 = self.vertices[0].clone();
        self.normals0 = self.normals[0].clone();
        self.tangents0 = self.tangents[0].clone();
        self.fnum_time_segments = (self.num_time_steps - 1) as f32;
        debug!("committed curve geometry: {} segments, {} control points, {} time steps",
               self.size(), self.num_vertices(), self.num_time_steps);
    }

    /// Checks attachment consistency: position buffers on every time sample
    /// with one shared length, tangents for the Hermite basis, all-or-none
    /// normals, and flags covering every segment.
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

        if self.basis == CurveBasis::Hermite {
            for (itime, tangents) in self.tangents.iter().enumerate() {
                if tangents.is_empty() {
                    return Err(GeometryError::MissingBuffer {attr: "tangent", itime: itime});
                }
                if tangents.len() != expected {
                    return Err(GeometryError::BufferSizeMismatch {
                        attr: "tangent", itime: itime, len: tangents.len(), expected: expected});
                }
            }
        }

        if self.normals.iter().any(|normals| !normals.is_empty()) {
            for (itime, normals) in self.normals.iter().enumerate() {
                if normals.is_empty() {
                    return Err(GeometryError::MissingBuffer {attr: "normal", itime: itime});
                }
                if normals.len() != expected {
                    return Err(GeometryError::BufferSizeMismatch {
                        attr: "normal", itime: itime, len: normals.len(), expected: expected});
                }
            }
        }

        if let Some(flags) = &self.flags {
            if flags.len() != self.curves.len() {
                return Err(GeometryError::FlagsSizeMismatch {
                    len: flags.len(), expected: self.curves.len()});
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

    /// Number of curve segments.
    pub fn size(&self) -> usize {
        self.curves.len()
    }

    /// Number of control points per time sample.
    pub fn num_vertices(&self) -> usize {
        self.vertices[0].len()
    }

    /// Start offset of the i'th segment into the control-point buffers.
    pub fn curve(&self, i: usize) -> u32 {
        self.curves[i]
    }

    /**
     * Maps the two low bits of the i'th segment's flags into bits 30-31 of
     * the returned mask; absent flags yield 0. The bits mark curve endpoints
     * for cap and joint handling downstream; this store only packs them.
     */
    pub fn start_end_bit_mask(&self, i: usize) -> u32 {
        match &self.flags {
            Some(flags) => ((flags[i] & SegmentFlags::all().bits()) as u32) << 30,
            None => 0,
        }
    }

    /// The i'th control point of the first time sample, through the
    /// committed alias.
    pub fn vertex(&self, i: usize) -> core::Vertex {
        self.vertices0[i]
    }

    /// The i'th normal of the first time sample.
    pub fn normal(&self, i: usize) -> core::Vertex {
        self.normals0[i]
    }

    /// The i'th tangent of the first time sample.
    pub fn tangent(&self, i: usize) -> core::Vertex {
        self.tangents0[i]
    }

    /// The i'th control-point radius of the first time sample.
    pub fn radius(&self, i: usize) -> f32 {
        self.vertices0[i].w
    }

    pub fn vertex_at(&self, i: usize, itime: usize) -> core::Vertex {
        self.vertices[itime][i]
    }

    pub fn normal_at(&self, i: usize, itime: usize) -> core::Vertex {
        self.normals[itime][i]
    }

    pub fn tangent_at(&self, i: usize, itime: usize) -> core::Vertex {
        self.tangents[itime][i]
    }

    pub fn radius_at(&self, i: usize, itime: usize) -> f32 {
        self.vertices[itime][i].w
    }

    /// The four control points starting at offset i, first time sample.
    pub fn gather(&self, i: usize) -> [core::Vertex; 4] {
        [self.vertex(i), self.vertex(i + 1), self.vertex(i + 2), self.vertex(i + 3)]
    }

    /// The four control points starting at offset i of the itime'th time
    /// sample.
    pub fn gather_at(&self, i: usize, itime: usize) -> [core::Vertex; 4] {
        [self.vertex_at(i, itime),
         self.vertex_at(i + 1, itime),
         self.vertex_at(i + 2, itime),
         self.vertex_at(i + 3, itime)]
    }

    /**
     * The four control points at a continuous time: the bracketing keyframe
     * pair is gathered once and every component, radius included, is blended
     * as (1 - f) * a + f * b. This is linear blending of keyframe snapshots;
     * the true in-between trajectory of the curve is not reconstructed, and
     * bounding logic must treat the result as an approximation of in-between
     * motion. Requires num_time_steps >= 2.
     */
    pub fn gather_at_time(&self, i: usize, time: f32) -> [core::Vertex; 4] {
        let (itime, ftime) = core::time_segment(time, self.fnum_time_segments);
        let a = self.gather_at(i, itime);
        let b = self.gather_at(i, itime + 1);
        blend4(&a, &b, ftime)
    }

    /// The four control points plus the two endpoint normals, first time
    /// sample.
    pub fn gather_with_normals(&self, i: usize) -> ([core::Vertex; 4], [core::Vertex; 2]) {
        (self.gather(i), [self.normal(i), self.normal(i + 1)])
    }

    pub fn gather_with_normals_at(&self, i: usize, itime: usize)
        -> ([core::Vertex; 4], [core::Vertex; 2])
    {
        (self.gather_at(i, itime), [self.normal_at(i, itime), self.normal_at(i + 1, itime)])
    }

    /// Positions and normals blended at a continuous time. One keyframe
    /// mapping and one pair of raw gathers serve both attributes, so a
    /// caller reconstructs a full frame at one timestamp from a single set
    /// of keyframe lookups.
    pub fn gather_with_normals_at_time(&self, i: usize, time: f32)
        -> ([core::Vertex; 4], [core::Vertex; 2])
    {
        let (itime, ftime) = core::time_segment(time, self.fnum_time_segments);
        let (pa, na) = self.gather_with_normals_at(i, itime);
        let (pb, nb) = self.gather_with_normals_at(i, itime + 1);
        (blend4(&pa, &pb, ftime), blend2(&na, &nb, ftime))
    }

    /// Endpoints and tangents of the Hermite segment starting at offset i,
    /// first time sample.
    pub fn gather_hermite(&self, i: usize) -> ([core::Vertex; 2], [core::Vertex; 2]) {
        ([self.vertex(i), self.vertex(i + 1)],
         [self.tangent(i), self.tangent(i + 1)])
    }

    pub fn gather_hermite_at(&self, i: usize, itime: usize)
        -> ([core::Vertex; 2], [core::Vertex; 2])
    {
        ([self.vertex_at(i, itime), self.vertex_at(i + 1, itime)],
         [self.tangent_at(i, itime), self.tangent_at(i + 1, itime)])
    }

    /// Endpoints and tangents blended at a continuous time, sharing one
    /// keyframe mapping and one pair of raw gathers.
    pub fn gather_hermite_at_time(&self, i: usize, time: f32)
        -> ([core::Vertex; 2], [core::Vertex; 2])
    {
        let (itime, ftime) = core::time_segment(time, self.fnum_time_segments);
        let (pa, ta) = self.gather_hermite_at(i, itime);
        let (pb, tb) = self.gather_hermite_at(i, itime + 1);
        (blend2(&pa, &pb, ftime), blend2(&ta, &tb, ftime))
    }

    /// Endpoints, tangents and normals of the Hermite segment starting at
    /// offset i, first time sample.
    pub fn gather_hermite_with_normals(&self, i: usize)
        -> ([core::Vertex; 2], [core::Vertex; 2], [core::Vertex; 2])
    {
        ([self.vertex(i), self.vertex(i + 1)],
         [self.tangent(i), self.tangent(i + 1)],
         [self.normal(i), self.normal(i + 1)])
    }

    pub fn gather_hermite_with_normals_at(&self, i: usize, itime: usize)
        -> ([core::Vertex; 2], [core::Vertex; 2], [core::Vertex; 2])
    {
        ([self.vertex_at(i, itime), self.vertex_at(i + 1, itime)],
         [self.tangent_at(i, itime), self.tangent_at(i + 1, itime)],
         [self.normal_at(i, itime), self.normal_at(i + 1, itime)])
    }

    /// Endpoints, tangents and normals blended at a continuous time, sharing
    /// one keyframe mapping and one pair of raw gathers.
    pub fn gather_hermite_with_normals_at_time(&self, i: usize, time: f32)
        -> ([core::Vertex; 2], [core::Vertex; 2], [core::Vertex; 2])
    {
        let (itime, ftime) = core::time_segment(time, self.fnum_time_segments);
        let (pa, ta, na) = self.gather_hermite_with_normals_at(i, itime);
        let (pb, tb, nb) = self.gather_hermite_with_normals_at(i, itime + 1);
        (blend2(&pa, &pb, ftime), blend2(&ta, &tb, ftime), blend2(&na, &nb, ftime))
    }

    /// The Bezier hull of the i'th segment at one keyframe. A Hermite
    /// segment converts to the equivalent Bezier control points, payload
    /// lane included.
    fn hull_at(&self, i: usize, itime: usize) -> [core::Vertex; 4] {
        let offset = self.curve(i) as usize;
        match self.basis {
            CurveBasis::Bezier => self.gather_at(offset, itime),
            CurveBasis::Hermite => {
                let (p, t) = self.gather_hermite_at(offset, itime);
                [p[0],
                 p[0] + t[0] * (1.0 / 3.0),
                 p[1] - t[1] * (1.0 / 3.0),
                 p[1]]
            }
        }
    }
}

impl prim::Prim for CurveGeometry {
    fn num_prims(&self) -> usize {
        self.size()
    }

    fn num_time_steps(&self) -> usize {
        self.num_time_steps
    }

    fn fnum_time_segments(&self) -> f32 {
        self.fnum_time_segments
    }

    /// Box over the segment's Bezier hull, padded by the largest hull
    /// radius. The curve lies inside the hull by the convex-hull property,
    /// and its surface extends at most the largest radius beyond it.
    fn bounds_at(&self, i: usize, itime: usize) -> core::BBox {
        let hull = self.hull_at(i, itime);
        let bounds = core::BBox::empty()
            .union_with(&hull[0].position())
            .union_with(&hull[1].position())
            .union_with(&hull[2].position())
            .union_with(&hull[3].position());
        let radius = f32::max(
            f32::max(hull[0].w, hull[1].w),
            f32::max(hull[2].w, hull[3].w));
        let radius = f32::max(radius, 0.0);
        let pad = core::Vec::new(radius, radius, radius);
        core::BBox::new(bounds.min - pad, bounds.max + pad)
    }

    fn valid(&self, i: usize, itime_lower: usize, itime_upper: usize) -> bool {
        let offset = self.curve(i) as usize;
        // A plain segment spans four control points, a Hermite segment two
        // endpoints plus their tangents.
        let span = match self.basis {
            CurveBasis::Bezier => 3,
            CurveBasis::Hermite => 1,
        };
        if offset + span >= self.num_vertices() {
            return false;
        }

        for itime in itime_lower..=itime_upper {
            match self.basis {
                CurveBasis::Bezier => {
                    let points = self.gather_at(offset, itime);
                    if points.iter().any(|p| !p.is_finite_with_payload()) {
                        return false;
                    }
                }
                CurveBasis::Hermite => {
                    let (points, tangents) = self.gather_hermite_at(offset, itime);
                    if points.iter().any(|p| !p.is_finite_with_payload())
                        || tangents.iter().any(|t| !t.is_finite_with_payload())
                    {
                        return false;
                    }
                }
            }
        }

        true
    }
}

impl Display for CurveGeometry {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "CurveGeometry({:?}, {} control points, {} segments, {} time steps)",
               self.basis, self.num_vertices(), self.size(), self.num_time_steps)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::TimeRange;
    use crate::geom::prim::Prim;

    /// Four control points in a row at height y, with radii growing along
    /// the segment.
    fn control_row(y: f32) -> std::vec::Vec<core::Vertex> {
        (0..4).map(|i| core::Vertex::new(i as f32, y, 0.0, 0.1 * (i + 1) as f32)).collect()
    }

    fn bezier_with_keyframes(keyframes: std::vec::Vec<std::vec::Vec<core::Vertex>>)
        -> CurveGeometry
    {
        let mut curves = CurveGeometry::new(CurveBasis::Bezier, keyframes.len());
        curves.set_curves(BufferView::from_vec(vec![0u32]));
        for (itime, vertices) in keyframes.into_iter().enumerate() {
            curves.set_vertices(itime, BufferView::from_vec(vertices));
        }
        curves.commit();
        curves
    }

    #[test]
    fn continuous_gather_collapses_to_keyframes() {
        let curves = bezier_with_keyframes(vec![
            control_row(0.0), control_row(1.0), control_row(2.0)]);

        // Integer keyframe times reproduce the discrete gathers exactly.
        assert_eq!(curves.gather_at_time(0, 0.0), curves.gather_at(0, 0));
        assert_eq!(curves.gather_at_time(0, 0.5), curves.gather_at(0, 1));
        assert_eq!(curves.gather_at_time(0, 1.0), curves.gather_at(0, 2));

        // Halfway into the first segment every component blends, the radius
        // payload included.
        let blended = curves.gather_at_time(0, 0.25);
        for (k, point) in blended.iter().enumerate() {
            assert_eq!(*point, core::Vertex::new(k as f32, 0.5, 0.0, 0.1 * (k + 1) as f32));
        }
    }

    #[test]
    fn fast_accessors_read_the_committed_first_sample() {
        let curves = bezier_with_keyframes(vec![control_row(0.0), control_row(1.0)]);
        assert_eq!(curves.vertex(2), curves.vertex_at(2, 0));
        assert_eq!(curves.radius(3), 0.4);
        assert_eq!(curves.gather(0), curves.gather_at(0, 0));
    }

    #[test]
    fn normal_gathers_share_the_position_keyframe_mapping() {
        let mut curves = CurveGeometry::new(CurveBasis::Bezier, 2);
        curves.set_curves(BufferView::from_vec(vec![0u32]));
        curves.set_vertices(0, BufferView::from_vec(control_row(0.0)));
        curves.set_vertices(1, BufferView::from_vec(control_row(2.0)));
        let frame0_normals: std::vec::Vec<_> =
            (0..4).map(|_| core::Vertex::at(0.0, 0.0, 1.0)).collect();
        let frame1_normals: std::vec::Vec<_> =
            (0..4).map(|_| core::Vertex::at(0.0, 1.0, 0.0)).collect();
        curves.set_normals(0, BufferView::from_vec(frame0_normals));
        curves.set_normals(1, BufferView::from_vec(frame1_normals));
        curves.commit();
        assert_eq!(curves.verify(), Ok(()));

        let (points, normals) = curves.gather_with_normals_at_time(0, 0.5);
        assert_eq!(points, curves.gather_at_time(0, 0.5));
        assert_eq!(normals[0], core::Vertex::at(0.0, 0.5, 0.5));
        assert_eq!(normals[1], normals[0]);
        assert_eq!(curves.normal(0), core::Vertex::at(0.0, 0.0, 1.0));

        // The discrete forms pair positions and normals the same way.
        let (points, normals) = curves.gather_with_normals(0);
        assert_eq!(points, curves.gather(0));
        assert_eq!(normals, [curves.normal(0), curves.normal(1)]);
        assert_eq!(curves.gather_with_normals_at(0, 1).1[0], core::Vertex::at(0.0, 1.0, 0.0));
    }

    #[test]
    fn ribbon_gathers_carry_normals_alongside_the_frame() {
        let mut curves = CurveGeometry::new(CurveBasis::Hermite, 2);
        curves.set_curves(BufferView::from_vec(vec![0u32]));
        for itime in 0..2 {
            let y = itime as f32;
            curves.set_vertices(itime, BufferView::from_vec(vec![
                core::Vertex::new(0.0, y, 0.0, 0.5),
                core::Vertex::new(3.0, y, 0.0, 0.25),
            ]));
            curves.set_tangents(itime, BufferView::from_vec(vec![
                core::Vertex::at(1.0, 0.0, 0.0),
                core::Vertex::at(1.0, 0.0, 0.0),
            ]));
            curves.set_normals(itime, BufferView::from_vec(vec![
                core::Vertex::at(0.0, 0.0, 1.0 - y),
                core::Vertex::at(0.0, 0.0, 1.0 - y),
            ]));
        }
        curves.commit();
        assert_eq!(curves.verify(), Ok(()));

        let (points, tangents, normals) = curves.gather_hermite_with_normals(0);
        assert_eq!((points, tangents), curves.gather_hermite(0));
        assert_eq!(normals, [curves.normal(0), curves.normal(1)]);

        // All three attributes blend through one keyframe mapping.
        let (points, tangents, normals) = curves.gather_hermite_with_normals_at_time(0, 0.5);
        let (p, t) = curves.gather_hermite_at_time(0, 0.5);
        assert_eq!((points, tangents), (p, t));
        assert_eq!(normals[0], core::Vertex::at(0.0, 0.0, 0.5));
        assert_eq!(
            curves.gather_hermite_with_normals_at_time(0, 1.0),
            curves.gather_hermite_with_normals_at(0, 1));

        // Radii live in the payload lane of the endpoints.
        assert_eq!(curves.radius_at(1, 1), 0.25);
    }

    fn hermite_segment(num_time_steps: usize) -> CurveGeometry {
        let mut curves = CurveGeometry::new(CurveBasis::Hermite, num_time_steps);
        curves.set_curves(BufferView::from_vec(vec![0u32]));
        for itime in 0..num_time_steps {
            let y = itime as f32;
            curves.set_vertices(itime, BufferView::from_vec(vec![
                core::Vertex::at(0.0, y, 0.0),
                core::Vertex::at(3.0, y, 0.0),
            ]));
            curves.set_tangents(itime, BufferView::from_vec(vec![
                core::Vertex::at(0.0, 3.0, 0.0),
                core::Vertex::at(0.0, 3.0, 0.0),
            ]));
        }
        curves.commit();
        curves
    }

    #[test]
    fn hermite_gathers_pair_endpoints_with_tangents() {
        let curves = hermite_segment(2);
        let (points, tangents) = curves.gather_hermite(0);
        assert_eq!(points, [core::Vertex::at(0.0, 0.0, 0.0), core::Vertex::at(3.0, 0.0, 0.0)]);
        assert_eq!(tangents, [core::Vertex::at(0.0, 3.0, 0.0), core::Vertex::at(0.0, 3.0, 0.0)]);

        // The continuous form blends endpoints and tangents with the same
        // keyframe mapping.
        let (points, tangents) = curves.gather_hermite_at_time(0, 0.5);
        assert_eq!(points[0], core::Vertex::at(0.0, 0.5, 0.0));
        assert_eq!(points[1], core::Vertex::at(3.0, 0.5, 0.0));
        assert_eq!(tangents, [core::Vertex::at(0.0, 3.0, 0.0), core::Vertex::at(0.0, 3.0, 0.0)]);

        assert_eq!(curves.gather_hermite_at_time(0, 1.0), curves.gather_hermite_at(0, 1));
    }

    #[test]
    fn hermite_bounds_follow_the_bezier_hull() {
        let curves = hermite_segment(1);
        // Hull points: (0,0,0), (0,1,0), (3,-1,0), (3,0,0); zero radii.
        let bounds = curves.bounds_at(0, 0);
        assert_eq!(bounds.min, core::Vec::new(0.0, -1.0, 0.0));
        assert_eq!(bounds.max, core::Vec::new(3.0, 1.0, 0.0));
    }

    #[test]
    fn bezier_bounds_pad_by_the_largest_radius() {
        let curves = bezier_with_keyframes(vec![control_row(0.0)]);
        let bounds = curves.bounds_at(0, 0);
        // Control points span [0, 3] in x at y = z = 0; largest radius 0.4.
        assert_eq!(bounds.min, core::Vec::new(-0.4, -0.4, -0.4));
        assert_eq!(bounds.max, core::Vec::new(3.4, 0.4, 0.4));
    }

    #[test]
    fn moving_curves_carry_the_prim_capabilities() {
        let curves = bezier_with_keyframes(vec![control_row(0.0), control_row(4.0)]);
        let lbounds = curves.linear_bounds_validated(0, &TimeRange::full());
        assert!(lbounds.is_some());
        let lbounds = lbounds.unwrap();
        assert!(lbounds.interpolate(0.0).contains_box(&curves.bounds_at(0, 0)));
        assert!(lbounds.interpolate(1.0).contains_box(&curves.bounds_at(0, 1)));
        assert_eq!(curves.build_bounds(0), Some(curves.bounds_at(0, 0)));
    }

    #[test]
    fn validity_rejects_short_buffers_and_corrupt_control_data() {
        // The last segment's control points would run off the buffer end.
        let mut curves = CurveGeometry::new(CurveBasis::Bezier, 1);
        curves.set_curves(BufferView::from_vec(vec![0u32, 2u32]));
        curves.set_vertices(0, BufferView::from_vec(control_row(0.0)));
        curves.commit();
        assert!(curves.valid_at(0, 0));
        assert!(!curves.valid_at(1, 0));

        // A non-finite radius poisons the keyframe that holds it.
        let mut corrupted = control_row(1.0);
        corrupted[2].w = std::f32::NAN;
        let curves = bezier_with_keyframes(vec![control_row(0.0), corrupted]);
        assert!(curves.valid_at(0, 0));
        assert!(!curves.valid_at(0, 1));
        assert_eq!(curves.build_bounds(0), None);

        // A Hermite segment only spans two control points; a healthy one is
        // valid, and a non-finite tangent invalidates it.
        let mut curves = hermite_segment(1);
        assert!(curves.valid_at(0, 0));
        curves.set_tangents(0, BufferView::from_vec(vec![
            core::Vertex::at(0.0, std::f32::INFINITY, 0.0),
            core::Vertex::at(0.0, 3.0, 0.0),
        ]));
        curves.commit();
        assert!(!curves.valid_at(0, 0));
    }

    #[test]
    fn start_end_bits_pack_into_the_mask_high_bits() {
        let mut curves = CurveGeometry::new(CurveBasis::Bezier, 1);
        curves.set_curves(BufferView::from_vec(vec![0u32, 0u32, 0u32, 0u32, 0u32]));
        curves.set_vertices(0, BufferView::from_vec(control_row(0.0)));
        curves.commit();

        // Without flags every mask is empty.
        assert_eq!(curves.start_end_bit_mask(0), 0);

        curves.set_flags(BufferView::from_vec(vec![
            FLAG_FIRST_SEGMENT.bits(),
            FLAG_LAST_SEGMENT.bits(),
            SegmentFlags::all().bits(),
            0,
            0xff,
        ]));
        curves.commit();
        assert_eq!(curves.start_end_bit_mask(0), 1 << 30);
        assert_eq!(curves.start_end_bit_mask(1), 2 << 30);
        assert_eq!(curves.start_end_bit_mask(2), 3 << 30);
        assert_eq!(curves.start_end_bit_mask(3), 0);
        // Bits above the low two never leak into the mask.
        assert_eq!(curves.start_end_bit_mask(4), 3 << 30);
    }

    #[test]
    fn verify_enforces_the_basis_buffer_requirements() {
        // Hermite curves need tangents on every time sample.
        let mut curves = CurveGeometry::new(CurveBasis::Hermite, 2);
        curves.set_curves(BufferView::from_vec(vec![0u32]));
        curves.set_vertices(0, BufferView::from_vec(control_row(0.0)));
        curves.set_vertices(1, BufferView::from_vec(control_row(1.0)));
        curves.set_tangents(0, BufferView::from_vec(control_row(0.0)));
        curves.commit();
        assert_eq!(curves.verify(),
                   Err(GeometryError::MissingBuffer {attr: "tangent", itime: 1}));

        curves.set_tangents(1, BufferView::from_vec(control_row(1.0)));
        curves.commit();
        assert_eq!(curves.verify(), Ok(()));

        // Normals are optional, but once attached must cover every sample.
        curves.set_normals(0, BufferView::from_vec(control_row(0.0)));
        curves.commit();
        assert_eq!(curves.verify(),
                   Err(GeometryError::MissingBuffer {attr: "normal", itime: 1}));

        // Flags must cover every segment.
        curves.set_normals(1, BufferView::from_vec(control_row(1.0)));
        curves.set_flags(BufferView::from_vec(vec![0u8, 0u8]));
        curves.commit();
        assert_eq!(curves.verify(),
                   Err(GeometryError::FlagsSizeMismatch {len: 2, expected: 1}));
    }

    #[test]
    fn tessellation_rate_is_stored_verbatim() {
        let mut curves = CurveGeometry::new(CurveBasis::Bezier, 1);
        assert_eq!(curves.tessellation_rate(), 4);
        curves.set_tessellation_rate(16);
        assert_eq!(curves.tessellation_rate(), 16);
    }
}
