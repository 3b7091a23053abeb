//! Per-axis source ranges and weights for the separable filter passes.
//!
//! A [`ContributorList`] depends only on the axis geometry and the filter, so
//! one list per axis is built per resize and shared read-only by every
//! channel of the image.
//!
//! # Algorithm
//! For destination index `d`, the source-space center is
//! ```text
//! c = (d + 0.5) × (src_len / dst_len) − 0.5
//! ```
//! The kernel is stretched by `scale = filter_scale × max(1, src_len / dst_len)`
//! and every source index `s` with `|s − c| ≤ support × scale` receives weight
//! `filter((s − c) / scale)`. Indices outside `[0, src_len)` are clamped to the
//! nearest edge, so their weight accumulates on the edge sample. Weights are
//! then normalized to sum to 1.
//!
//! Zero weights at either end of a window are trimmed. Kernels with exact
//! zeros inside their support (Catmull-Rom at ±1) can then leave a window
//! starting after its successor, so trimmed windows are padded back out
//! until both `start` and `end` are non-decreasing in `d`. The streaming
//! vertical pass relies on that ordering to release rows.
//!
//! # Complexity
//! O(dst_len × support width) per axis, independent of channel count.

use crate::error::{ResampleError, try_reserve};
use crate::resample::filter::FilterKind;

/// Weights below this are treated as a degenerate (empty) window.
const MIN_WEIGHT_SUM: f32 = 1e-8;

/// Source range and weights for one destination sample.
///
/// Weight `i` applies to source index `start + i`.
#[derive(Debug, Clone, PartialEq)]
pub struct Contributor {
    pub start: usize,
    pub weights: Vec<f32>,
}

impl Contributor {
    /// One past the last source index this sample reads.
    pub fn end(&self) -> usize {
        self.start + self.weights.len()
    }

    /// Weighted sum over `src[start..end]`.
    #[inline]
    pub fn apply(&self, src: &[f32]) -> f32 {
        self.weights
            .iter()
            .zip(&src[self.start..self.end()])
            .map(|(w, s)| w * s)
            .sum()
    }
}

/// Contributors for every destination sample along one axis.
#[derive(Debug, Clone, PartialEq)]
pub struct ContributorList {
    src_len: usize,
    contributors: Vec<Contributor>,
}

impl ContributorList {
    /// Build the list for resampling `src_len` samples into `dst_len`.
    pub fn new(
        src_len: usize,
        dst_len: usize,
        filter: FilterKind,
        filter_scale: f32,
    ) -> Result<Self, ResampleError> {
        if src_len == 0 || dst_len == 0 {
            return Err(ResampleError::EmptyAxis { src_len, dst_len });
        }
        if !filter_scale.is_finite() || filter_scale <= 0.0 {
            return Err(ResampleError::InvalidFilterScale(filter_scale));
        }

        let ratio = src_len as f32 / dst_len as f32;
        let scale = filter_scale * ratio.max(1.0);
        let half_width = filter.support() * scale;
        let last = src_len as i64 - 1;

        let mut contributors = Vec::new();
        try_reserve(&mut contributors, dst_len)?;

        for d in 0..dst_len {
            let center = (d as f32 + 0.5) * ratio - 0.5;
            let left = (center - half_width).floor() as i64;
            let right = (center + half_width).ceil() as i64;

            let start = left.clamp(0, last) as usize;
            let end = right.clamp(0, last) as usize;
            let mut weights = Vec::new();
            try_reserve(&mut weights, end - start + 1)?;
            weights.resize(end - start + 1, 0.0);

            let mut sum = 0.0_f32;
            for s in left..=right {
                let w = filter.eval((s as f32 - center) / scale);
                weights[s.clamp(0, last) as usize - start] += w;
                sum += w;
            }

            let contributor = if sum.abs() < MIN_WEIGHT_SUM {
                let nearest = center.round().clamp(0.0, last as f32) as usize;
                Contributor { start: nearest, weights: vec![1.0] }
            } else {
                let inv = 1.0 / sum;
                weights.iter_mut().for_each(|w| *w *= inv);
                trim(Contributor { start, weights })
            };
            contributors.push(contributor);
        }

        keep_monotonic(&mut contributors)?;
        debug_assert!(contributors.windows(2).all(|p| {
            p[0].start <= p[1].start && p[0].end() <= p[1].end()
        }));

        let list = Self { src_len, contributors };
        tracing::debug!(
            src_len,
            dst_len,
            %filter,
            scale,
            max_window = list.max_window(),
            "built contributor list"
        );
        Ok(list)
    }

    pub fn src_len(&self) -> usize {
        self.src_len
    }

    pub fn dst_len(&self) -> usize {
        self.contributors.len()
    }

    pub fn get(&self, dst_index: usize) -> Option<&Contributor> {
        self.contributors.get(dst_index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Contributor> {
        self.contributors.iter()
    }

    /// Widest source window of any destination sample.
    pub fn max_window(&self) -> usize {
        self.contributors.iter().map(|c| c.weights.len()).max().unwrap_or(0)
    }

    /// Filter one row of `src_len` samples into `out` (`dst_len` samples).
    pub fn resample_into(&self, src: &[f32], out: &mut [f32]) {
        debug_assert_eq!(src.len(), self.src_len);
        for (dst, contributor) in out.iter_mut().zip(&self.contributors) {
            *dst = contributor.apply(src);
        }
    }
}

/// Drop zero weights at either end so windows stay tight.
fn trim(mut c: Contributor) -> Contributor {
    let lead = c.weights.iter().take_while(|w| **w == 0.0).count();
    if lead == c.weights.len() {
        return c;
    }
    let tail = c.weights.iter().rev().take_while(|w| **w == 0.0).count();
    c.weights.truncate(c.weights.len() - tail);
    c.weights.drain(..lead);
    c.start += lead;
    c
}

/// Pad windows with zero weights so starts and ends never move backwards.
fn keep_monotonic(contributors: &mut [Contributor]) -> Result<(), ResampleError> {
    for d in (1..contributors.len()).rev() {
        let next_start = contributors[d].start;
        let c = &mut contributors[d - 1];
        if c.start > next_start {
            let pad = c.start - next_start;
            let mut weights = Vec::new();
            try_reserve(&mut weights, pad + c.weights.len())?;
            weights.resize(pad, 0.0);
            weights.extend_from_slice(&c.weights);
            c.weights = weights;
            c.start = next_start;
        }
    }
    for d in 1..contributors.len() {
        let prev_end = contributors[d - 1].end();
        let c = &mut contributors[d];
        if c.end() < prev_end {
            let pad = prev_end - c.end();
            try_reserve(&mut c.weights, pad)?;
            c.weights.resize(c.weights.len() + pad, 0.0);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn weight_sum(c: &Contributor) -> f32 {
        c.weights.iter().sum()
    }

    #[test]
    fn test_identity_geometry_selects_single_source() {
        let list = ContributorList::new(8, 8, FilterKind::Lanczos4, 1.0).unwrap();
        for (d, c) in list.iter().enumerate() {
            let peak = c.start + c.weights.iter().enumerate()
                .max_by(|a, b| a.1.total_cmp(b.1))
                .map(|(i, _)| i)
                .unwrap();
            assert_eq!(peak, d);
            assert!((c.weights[d - c.start] - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn test_weights_are_normalized() {
        for &filter in FilterKind::all() {
            for (src, dst) in [(10, 3), (3, 10), (7, 7), (100, 1), (1, 5)] {
                let list = ContributorList::new(src, dst, filter, 1.0).unwrap();
                assert_eq!(list.dst_len(), dst);
                for c in list.iter() {
                    assert!((weight_sum(c) - 1.0).abs() < 1e-4, "{filter} {src}->{dst}");
                    assert!(c.end() <= src);
                }
            }
        }
    }

    #[test]
    fn test_box_downscale_averages_exact_blocks() {
        let list = ContributorList::new(100, 10, FilterKind::Box, 1.0).unwrap();
        for (d, c) in list.iter().enumerate() {
            assert_eq!(c.start, d * 10);
            assert_eq!(c.weights.len(), 10);
            for w in &c.weights {
                assert!((w - 0.1).abs() < 1e-6);
            }
        }
    }

    #[test]
    fn test_out_of_range_weight_clamps_to_edge() {
        // Upscaling 2x with a tent: the first output sits left of source 0,
        // so its out-of-range neighbour folds back onto index 0.
        let list = ContributorList::new(4, 8, FilterKind::Tent, 1.0).unwrap();
        let first = list.get(0).unwrap();
        assert_eq!(first.start, 0);
        assert!((first.weights[0] - 1.0).abs() < 1e-6);
        let last = list.get(7).unwrap();
        assert_eq!(last.end(), 4);
        assert!((last.weights.last().unwrap() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_downscale_widens_kernel() {
        let same = ContributorList::new(64, 64, FilterKind::Tent, 1.0).unwrap();
        let down = ContributorList::new(64, 16, FilterKind::Tent, 1.0).unwrap();
        assert!(down.max_window() > same.max_window());
    }

    #[test]
    fn test_filter_scale_widens_and_narrows_support() {
        let soft = ContributorList::new(32, 32, FilterKind::Tent, 2.0).unwrap();
        let sharp = ContributorList::new(32, 32, FilterKind::Tent, 1.0).unwrap();
        assert!(soft.max_window() > sharp.max_window());
    }

    #[test]
    fn test_windows_advance_monotonically() {
        let list = ContributorList::new(37, 91, FilterKind::Lanczos3, 1.0).unwrap();
        for pair in list.contributors.windows(2) {
            assert!(pair[0].start <= pair[1].start);
            assert!(pair[0].end() <= pair[1].end());
        }
    }

    #[test]
    fn test_windows_advance_monotonically_for_every_filter() {
        for &filter in FilterKind::all() {
            for scale in [0.5, 0.75, 1.0, 1.5] {
                for src in 1..=9 {
                    for dst in 1..=17 {
                        let list = ContributorList::new(src, dst, filter, scale).unwrap();
                        for (d, pair) in list.contributors.windows(2).enumerate() {
                            assert!(
                                pair[0].start <= pair[1].start && pair[0].end() <= pair[1].end(),
                                "{filter} x{scale} {src}->{dst} at {d}: {pair:?}"
                            );
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn test_catmull_rom_zero_taps_keep_window_order() {
        // Centers on integer source positions put Catmull-Rom's ±1 zeros at
        // the edges of the window.
        let list = ContributorList::new(3, 5, FilterKind::CatmullRom, 1.0).unwrap();
        let d2 = list.get(2).unwrap();
        let d3 = list.get(3).unwrap();
        assert!(d2.start <= d3.start);
        assert!((weight_sum(d2) - 1.0).abs() < 1e-5);
        assert!((d2.weights[1 - d2.start] - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_rejects_invalid_arguments() {
        assert!(ContributorList::new(0, 4, FilterKind::Box, 1.0).is_err());
        assert_eq!(
            ContributorList::new(4, 4, FilterKind::Box, 0.0),
            Err(ResampleError::InvalidFilterScale(0.0))
        );
    }

    #[test]
    fn test_resample_into_applies_weights() {
        let list = ContributorList::new(4, 2, FilterKind::Box, 1.0).unwrap();
        let mut out = [0.0; 2];
        list.resample_into(&[1.0, 3.0, 5.0, 7.0], &mut out);
        assert!((out[0] - 2.0).abs() < 1e-6);
        assert!((out[1] - 6.0).abs() < 1e-6);
    }
}
