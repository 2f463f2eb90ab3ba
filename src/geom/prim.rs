use crate::core;

/**
 * Capability interface over the small fixed set of primitive kinds the
 * spatial-structure builder consumes. Implementors supply discrete keyframe
 * bounds and validity; the motion-aware queries (continuous-time boxes,
 * conservative linear bounds, build bounds) are derived here so that every
 * primitive kind shares one implementation.
 *
 * Every method is a pure read of committed buffers: no locking, no mutation,
 * no allocation beyond stack temporaries, worst case O(num_time_steps) per
 * query. Many build or render threads may query one committed geometry
 * concurrently; attachment and commit must not overlap with readers.
 */
pub trait Prim : Sync + Send {
    /// Number of primitives in the store.
    fn num_prims(&self) -> usize;

    /// Number of discrete time samples held per attribute.
    fn num_time_steps(&self) -> usize;

    /// Time-step count minus one as a float, cached at commit.
    fn fnum_time_segments(&self) -> f32;

    /**
     * Axis-aligned box over the i'th primitive at the itime'th keyframe.
     * No validity check: the caller either established validity first or
     * accepts a box built from whatever data is present, non-finite values
     * included.
     */
    fn bounds_at(&self, i: usize, itime: usize) -> core::BBox;

    /**
     * Checks the i'th primitive over an inclusive keyframe range: all
     * referenced indices in range, and every referenced position finite at
     * every keyframe of the range. Malformed input reports false here rather
     * than failing anywhere else.
     */
    fn valid(&self, i: usize, itime_lower: usize, itime_upper: usize) -> bool;

    /// Single-keyframe validity.
    fn valid_at(&self, i: usize, itime: usize) -> bool {
        self.valid(i, itime, itime)
    }

    /**
     * Interpolated box at a continuous time in [0, 1]: the two bracketing
     * keyframe boxes are blended at the box level. The box is not re-derived
     * from interpolated vertices, so it only approximates the true swept
     * volume between keyframes. Requires num_time_steps >= 2.
     */
    fn bounds_at_time(&self, i: usize, time: f32) -> core::BBox {
        let (itime, ftime) = core::time_segment(time, self.fnum_time_segments());
        let b0 = self.bounds_at(i, itime);
        let b1 = self.bounds_at(i, itime + 1);
        b0.lerp(&b1, ftime)
    }

    /**
     * A pair of boxes whose linear interpolation across time_range contains
     * the primitive's discrete keyframe boxes at every keyframe inside the
     * range, even when the keyframes do not lie on the straight line between
     * the range's end boxes.
     *
     * Each covered keyframe is compared against the box the current pair
     * predicts at that keyframe's time fraction; any excess pushes the
     * matching side of both boxes out. Keyframes are processed in ascending
     * order, so later keyframes are checked against the already-expanded
     * pair. The result is conservative but not necessarily tight.
     */
    fn linear_bounds(&self, i: usize, time_range: &core::TimeRange) -> core::LBBox {
        let fsegments = self.fnum_time_segments();
        let mut b0 = self.bounds_at_time(i, time_range.lower);
        let mut b1 = self.bounds_at_time(i, time_range.upper);
        let ilower = (time_range.lower * fsegments).ceil() as i32;
        let iupper = (time_range.upper * fsegments).floor() as i32;
        for k in ilower..=iupper {
            let f = (k as f32 / fsegments - time_range.lower) / time_range.size();
            let predicted = b0.lerp(&b1, f);
            let exact = self.bounds_at(i, k as usize);
            let dlower = (exact.min - predicted.min).min_with(&core::Vec::zero());
            let dupper = (exact.max - predicted.max).max_with(&core::Vec::zero());
            b0.min = b0.min + dlower;
            b1.min = b1.min + dlower;
            b0.max = b0.max + dupper;
            b1.max = b1.max + dupper;
        }
        core::LBBox::new(b0, b1)
    }

    /**
     * Validated linear bounds. The keyframe range whose validity gates the
     * query is padded slightly inward to absorb floating-point rounding at
     * segment boundaries; if any touched keyframe is invalid the whole query
     * fails and no bounds are produced.
     */
    fn linear_bounds_validated(&self, i: usize, time_range: &core::TimeRange)
        -> Option<core::LBBox>
    {
        let fsegments = self.fnum_time_segments();
        let itime_lower = (1.0001 * time_range.lower * fsegments).floor() as usize;
        let itime_upper = (0.9999 * time_range.upper * fsegments).ceil() as usize;
        if !self.valid(i, itime_lower, itime_upper) {
            return None;
        }
        Some(self.linear_bounds(i, time_range))
    }

    /// Validity across every keyframe; on success the box of time sample 0.
    /// Used for static-bounds-only builds.
    fn build_bounds(&self, i: usize) -> Option<core::BBox> {
        if !self.valid(i, 0, self.num_time_steps() - 1) {
            return None;
        }
        Some(self.bounds_at(i, 0))
    }

    /**
     * Validity restricted to keyframes itime and itime + 1; on success the
     * box of keyframe itime alone. The box is deliberately not the union of
     * the pair: downstream combines per-segment boxes itself when it needs a
     * union across a local time segment.
     */
    fn build_bounds_segment(&self, i: usize, itime: usize) -> Option<core::BBox> {
        if !self.valid(i, itime, itime + 1) {
            return None;
        }
        Some(self.bounds_at(i, itime))
    }

    /// Build bounds against a scene-global time-step count. See
    /// core::remap_build_bounds for the resampling rules.
    fn build_bounds_global(&self, i: usize, itime_global: usize, num_steps_global: usize)
        -> Option<core::BBox>
    {
        core::remap_build_bounds(
            itime_global, num_steps_global, self.num_time_steps(),
            |itime| {
                if !self.valid_at(i, itime) {
                    return None;
                }
                Some(self.bounds_at(i, itime))
            })
    }
}
