use crate::core::bbox;
use crate::core::math;

/**
 * A sub-range of the shutter interval in continuous time, where 0 is the
 * first time sample of a geometry and 1 the last.
 */
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TimeRange {
    pub lower: f32,
    pub upper: f32,
}

impl TimeRange {
    pub fn new(lower: f32, upper: f32) -> TimeRange {
        TimeRange {lower: lower, upper: upper}
    }

    /// The whole shutter interval.
    pub fn full() -> TimeRange {
        Self::new(0.0, 1.0)
    }

    pub fn size(&self) -> f32 {
        self.upper - self.lower
    }
}

/**
 * Maps a continuous time in [0, 1] onto the discrete keyframe pair bracketing
 * it. Returns the lower keyframe index and the blend fraction toward the next
 * keyframe. fnum_segments is the geometry's time-step count minus one as a
 * float; a single-time-step geometry maps to (0, 0.0).
 */
pub fn time_segment(time: f32, fnum_segments: f32) -> (usize, f32) {
    let scaled = time * fnum_segments;
    let itime = math::clamp(scaled.floor(), 0.0, fnum_segments - 1.0);
    (itime as usize, scaled - itime)
}

/**
 * Maps a primitive's local time axis onto a scene-global time axis for build
 * bounds. The per-keyframe closure yields the box of one local keyframe, or
 * None when that keyframe is invalid, which fails the whole query.
 *
 * When the local and global time-step counts agree, keyframes itime_global
 * and itime_global + 1 are probed and the first keyframe's box is returned
 * (a single time step probes keyframe 0 alone). Otherwise the global segment
 * is resampled onto the local axis and every bracketed local keyframe is
 * probed; the box returned is still that of the first bracketing local
 * keyframe only, not the union. Requires itime_global to name a real global
 * segment, i.e. num_steps_global >= 2 whenever the counts differ.
 */
pub fn remap_build_bounds<F>(
    itime_global: usize,
    num_steps_global: usize,
    num_steps_local: usize,
    per_keyframe: F)
    -> Option<bbox::BBox>
    where F: Fn(usize) -> Option<bbox::BBox>
{
    if num_steps_global == num_steps_local {
        if num_steps_local == 1 {
            return per_keyframe(0);
        }
        let bounds = per_keyframe(itime_global)?;
        per_keyframe(itime_global + 1)?;
        return Some(bounds);
    }

    let fsegments_local = (num_steps_local - 1) as f32;
    let fsegments_global = (num_steps_global - 1) as f32;
    let time_lower = itime_global as f32 / fsegments_global;
    let time_upper = (itime_global + 1) as f32 / fsegments_global;
    let ilower = (time_lower * fsegments_local).floor() as usize;
    let iupper = usize::min((time_upper * fsegments_local).ceil() as usize,
                            num_steps_local - 1);

    let bounds = per_keyframe(ilower)?;
    for itime in (ilower + 1)..=iupper {
        per_keyframe(itime)?;
    }
    Some(bounds)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::vector;

    fn keyframe_box(itime: usize) -> bbox::BBox {
        let k = itime as f32;
        bbox::BBox::new(
            vector::Vec::new(k, 0.0, 0.0),
            vector::Vec::new(k + 1.0, 1.0, 1.0))
    }

    #[test]
    fn segment_mapping_covers_the_interval() {
        // Three time steps, two segments.
        assert_eq!(time_segment(0.0, 2.0), (0, 0.0));
        assert_eq!(time_segment(0.25, 2.0), (0, 0.5));
        assert_eq!(time_segment(0.5, 2.0), (1, 0.0));
        // The final keyframe maps to the last segment at fraction 1.
        assert_eq!(time_segment(1.0, 2.0), (1, 1.0));
    }

    #[test]
    fn segment_mapping_handles_a_single_time_step() {
        assert_eq!(time_segment(0.0, 0.0), (0, 0.0));
        assert_eq!(time_segment(1.0, 0.0), (0, 0.0));
    }

    #[test]
    fn remap_with_equal_counts_probes_the_bracketing_pair() {
        let bounds = remap_build_bounds(1, 3, 3, |itime| Some(keyframe_box(itime)));
        assert_eq!(bounds, Some(keyframe_box(1)));

        // An invalid keyframe anywhere in the pair fails the query.
        let failed = remap_build_bounds(1, 3, 3, |itime| {
            if itime == 2 { None } else { Some(keyframe_box(itime)) }
        });
        assert_eq!(failed, None);
    }

    #[test]
    fn remap_differing_counts_uses_first_bracketing_box() {
        // Global segment 1 of 4 spans local times [0.25, 0.5] of a 3-step
        // geometry: local keyframes 0 and 1 are probed, and the result is the
        // box of local keyframe 0 alone, not the union of the pair.
        let probed = std::sync::Mutex::new(vec![]);
        let bounds = remap_build_bounds(1, 5, 3, |itime| {
            probed.lock().unwrap().push(itime);
            Some(keyframe_box(itime))
        });
        assert_eq!(bounds, Some(keyframe_box(0)));
        assert_eq!(*probed.lock().unwrap(), vec![0, 1]);

        let failed = remap_build_bounds(1, 5, 3, |itime| {
            if itime == 1 { None } else { Some(keyframe_box(itime)) }
        });
        assert_eq!(failed, None);
    }
}
