//! Streaming separable resampler for a single channel.
//!
//! Source rows go in top to bottom through [`ChannelResampler::put_source_row`],
//! which runs the horizontal pass and queues the intermediate row. Destination
//! rows come out in order through [`ChannelResampler::get_dest_row`] as soon as
//! every intermediate row in the next destination row's vertical window has
//! been queued. How many rows must be fed before the first output, and how many
//! outputs each input unlocks, follow directly from the vertical
//! [`ContributorList`].

use std::collections::VecDeque;

use crate::error::{ResampleError, try_reserve};
use crate::resample::contributors::ContributorList;

/// Where the resampler is in its accept/produce cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResamplerState {
    /// The next destination row needs more source rows.
    AcceptingInput,
    /// A destination row can be drained now.
    ProducingOutput,
    /// Every destination row has been produced.
    Done,
}

/// Per-channel filter state. Borrows the contributor lists shared by all
/// channels of the same resize.
#[derive(Debug)]
pub struct ChannelResampler<'a> {
    horizontal: &'a ContributorList,
    vertical: &'a ContributorList,
    /// Horizontally filtered rows `first_pending..next_src_row`.
    pending: VecDeque<Vec<f32>>,
    first_pending: usize,
    next_src_row: usize,
    next_dst_row: usize,
    /// Evicted rows kept for reuse.
    spare: Vec<Vec<f32>>,
    output: Vec<f32>,
}

impl<'a> ChannelResampler<'a> {
    pub fn new(
        horizontal: &'a ContributorList,
        vertical: &'a ContributorList,
    ) -> Result<Self, ResampleError> {
        let mut pending = VecDeque::new();
        pending.try_reserve(vertical.max_window())?;
        let mut output = Vec::new();
        try_reserve(&mut output, horizontal.dst_len())?;
        output.resize(horizontal.dst_len(), 0.0);

        Ok(Self {
            horizontal,
            vertical,
            pending,
            first_pending: 0,
            next_src_row: 0,
            next_dst_row: 0,
            spare: Vec::new(),
            output,
        })
    }

    pub fn state(&self) -> ResamplerState {
        if self.next_dst_row >= self.vertical.dst_len() {
            ResamplerState::Done
        } else if self.has_dest_row() {
            ResamplerState::ProducingOutput
        } else {
            ResamplerState::AcceptingInput
        }
    }

    /// Index of the next source row expected.
    pub fn src_row(&self) -> usize {
        self.next_src_row
    }

    /// Index of the next destination row to be produced.
    pub fn dst_row(&self) -> usize {
        self.next_dst_row
    }

    /// Number of intermediate rows currently buffered.
    pub fn buffered_rows(&self) -> usize {
        self.pending.len()
    }

    /// Filter one source row horizontally and queue it for the vertical pass.
    ///
    /// Rows that no remaining destination row reads are consumed without
    /// being stored.
    pub fn put_source_row(&mut self, row: &[f32]) -> Result<(), ResampleError> {
        if row.len() != self.horizontal.src_len() {
            return Err(ResampleError::BufferSize {
                expected: self.horizontal.src_len(),
                actual: row.len(),
            });
        }
        if self.next_src_row >= self.vertical.src_len() {
            return Err(ResampleError::RowOverflow {
                height: self.vertical.src_len() as u32,
            });
        }

        let index = self.next_src_row;
        self.next_src_row += 1;

        let needed_from = self
            .vertical
            .get(self.next_dst_row)
            .map_or(usize::MAX, |c| c.start);
        if index < needed_from {
            debug_assert!(self.pending.is_empty());
            self.first_pending = self.next_src_row;
            return Ok(());
        }

        let mut filtered = match self.spare.pop() {
            Some(buf) => buf,
            None => {
                let mut buf = Vec::new();
                try_reserve(&mut buf, self.horizontal.dst_len())?;
                buf.resize(self.horizontal.dst_len(), 0.0);
                buf
            }
        };
        self.horizontal.resample_into(row, &mut filtered);

        self.pending.try_reserve(1)?;
        self.pending.push_back(filtered);
        Ok(())
    }

    /// Whether [`get_dest_row`](Self::get_dest_row) would return a row.
    pub fn has_dest_row(&self) -> bool {
        self.vertical
            .get(self.next_dst_row)
            .is_some_and(|c| c.end() <= self.next_src_row)
    }

    /// Produce the next destination row if its vertical window is complete.
    ///
    /// The returned slice is valid until the next call.
    pub fn get_dest_row(&mut self) -> Option<&[f32]> {
        if !self.has_dest_row() {
            return None;
        }
        let contributor = self.vertical.get(self.next_dst_row)?;

        self.output.fill(0.0);
        for (i, &weight) in contributor.weights.iter().enumerate() {
            let row = &self.pending[contributor.start + i - self.first_pending];
            for (out, &v) in self.output.iter_mut().zip(row) {
                *out += weight * v;
            }
        }

        self.next_dst_row += 1;
        self.evict();
        Some(self.output.as_slice())
    }

    /// Release rows below the next destination row's window.
    fn evict(&mut self) {
        let keep_from = self
            .vertical
            .get(self.next_dst_row)
            .map_or(usize::MAX, |c| c.start);
        while self.first_pending < keep_from {
            let Some(row) = self.pending.pop_front() else {
                self.first_pending = self.next_src_row;
                break;
            };
            self.spare.push(row);
            self.first_pending += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resample::filter::FilterKind;

    fn lists(
        src: (usize, usize),
        dst: (usize, usize),
        filter: FilterKind,
    ) -> (ContributorList, ContributorList) {
        (
            ContributorList::new(src.0, dst.0, filter, 1.0).unwrap(),
            ContributorList::new(src.1, dst.1, filter, 1.0).unwrap(),
        )
    }

    /// Feed rows whose samples all equal their row index; collect every output row.
    fn drive(resampler: &mut ChannelResampler<'_>, width: usize, rows: usize) -> Vec<Vec<f32>> {
        let mut produced = Vec::new();
        for y in 0..rows {
            resampler.put_source_row(&vec![y as f32; width]).unwrap();
            while let Some(row) = resampler.get_dest_row() {
                produced.push(row.to_vec());
            }
        }
        produced
    }

    #[test]
    fn test_upscale_emits_every_row_in_order() {
        let (h, v) = lists((4, 6), (8, 15), FilterKind::Lanczos3);
        let mut r = ChannelResampler::new(&h, &v).unwrap();
        let rows = drive(&mut r, 4, 6);
        assert_eq!(rows.len(), 15);
        assert_eq!(r.dst_row(), 15);
        assert_eq!(r.state(), ResamplerState::Done);
        assert!(rows.iter().all(|row| row.len() == 8));
    }

    #[test]
    fn test_downscale_emits_every_row_in_order() {
        let (h, v) = lists((9, 40), (3, 7), FilterKind::Mitchell);
        let mut r = ChannelResampler::new(&h, &v).unwrap();
        let rows = drive(&mut r, 9, 40);
        assert_eq!(rows.len(), 7);
        assert_eq!(r.state(), ResamplerState::Done);
    }

    #[test]
    fn test_rows_follow_source_gradient_monotonically() {
        // Rows hold their own index, so a non-ringing filter must yield a
        // non-decreasing sequence; gaps or repeats would break it.
        let (h, v) = lists((2, 10), (2, 23), FilterKind::Tent);
        let mut r = ChannelResampler::new(&h, &v).unwrap();
        let rows = drive(&mut r, 2, 10);
        assert_eq!(rows.len(), 23);
        for pair in rows.windows(2) {
            assert!(pair[1][0] >= pair[0][0] - 1e-5);
        }
        assert!(rows[0][0] < 0.5);
        assert!(rows[22][0] > 8.5);
    }

    #[test]
    fn test_output_waits_for_vertical_window() {
        let (h, v) = lists((3, 8), (3, 8), FilterKind::Tent);
        let mut r = ChannelResampler::new(&h, &v).unwrap();
        let c0_end = v.get(0).unwrap().end();
        for y in 0..c0_end {
            assert_eq!(r.state(), ResamplerState::AcceptingInput);
            r.put_source_row(&[y as f32; 3]).unwrap();
        }
        assert_eq!(r.state(), ResamplerState::ProducingOutput);
        assert!(r.get_dest_row().is_some());
    }

    #[test]
    fn test_buffer_stays_within_vertical_window() {
        let (h, v) = lists((5, 64), (5, 8), FilterKind::Lanczos4);
        let mut r = ChannelResampler::new(&h, &v).unwrap();
        let mut peak = 0;
        for y in 0..64 {
            r.put_source_row(&[y as f32; 5]).unwrap();
            peak = peak.max(r.buffered_rows());
            while r.get_dest_row().is_some() {}
        }
        assert!(peak <= v.max_window());
    }

    #[test]
    fn test_identity_reproduces_rows() {
        let (h, v) = lists((4, 3), (4, 3), FilterKind::Lanczos4);
        let mut r = ChannelResampler::new(&h, &v).unwrap();
        let src = [[0.1, 0.2, 0.3, 0.4], [0.5, 0.6, 0.7, 0.8], [0.9, 1.0, 0.0, 0.5]];
        let mut out = Vec::new();
        for row in &src {
            r.put_source_row(row).unwrap();
            while let Some(row) = r.get_dest_row() {
                out.push(row.to_vec());
            }
        }
        assert_eq!(out.len(), 3);
        for (got, want) in out.iter().zip(&src) {
            for (g, w) in got.iter().zip(want) {
                assert!((g - w).abs() < 1e-4, "{g} vs {w}");
            }
        }
    }

    #[test]
    fn test_rejects_extra_rows_and_wrong_width() {
        let (h, v) = lists((2, 1), (2, 1), FilterKind::Box);
        let mut r = ChannelResampler::new(&h, &v).unwrap();
        assert_eq!(
            r.put_source_row(&[0.0; 3]),
            Err(ResampleError::BufferSize { expected: 2, actual: 3 })
        );
        r.put_source_row(&[0.0; 2]).unwrap();
        assert_eq!(
            r.put_source_row(&[0.0; 2]),
            Err(ResampleError::RowOverflow { height: 1 })
        );
    }
}
