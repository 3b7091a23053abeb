//! Whole-image resize: one streaming resampler per channel, gamma conversion
//! at the buffer boundary, and interleaving into the destination.
//!
//! # Algorithm
//! 1. Build the gamma tables (or take them from the caller).
//! 2. Build one horizontal and one vertical [`ContributorList`], shared by
//!    every channel.
//! 3. For each source row: split channels, linearize (color channels through
//!    the tables, the non-color channel by `1/255`), feed each channel.
//! 4. Whenever every channel has a destination row ready, drain them all,
//!    re-encode, and interleave into the next destination row.
//!
//! Channels share identical contributor lists, so they become ready in
//! lockstep; the all-channels gate is the only ordering constraint.

use crate::color::tables::{GammaTables, f32_to_unorm, unorm_to_f32};
use crate::config::ResampleConfig;
use crate::error::{ResampleError, try_reserve};
use crate::image::PixelBuffer;
use crate::resample::channel::ChannelResampler;
use crate::resample::contributors::ContributorList;

/// Resize `src` to `dst_width` × `dst_height`, returning a new buffer.
///
/// On error nothing is returned, so a partially written destination can
/// never escape.
pub fn resample(
    src: &PixelBuffer,
    dst_width: u32,
    dst_height: u32,
    config: &ResampleConfig,
) -> Result<PixelBuffer, ResampleError> {
    config.validate()?;
    let tables = config.gamma_tables()?;
    let mut dst = PixelBuffer::try_zeroed(dst_width, dst_height, src.layout())?;
    resample_into(src, &mut dst, &tables, config)?;
    Ok(dst)
}

/// Resize `src` into the preallocated `dst`, using caller-provided tables.
///
/// `dst` must have the same channel layout as `src`; its dimensions define
/// the target size. On error the contents of `dst` are unspecified.
pub fn resample_into(
    src: &PixelBuffer,
    dst: &mut PixelBuffer,
    tables: &GammaTables,
    config: &ResampleConfig,
) -> Result<(), ResampleError> {
    let layout = src.layout();
    if dst.layout() != layout {
        return Err(ResampleError::LayoutMismatch {
            src: layout,
            dst: dst.layout(),
        });
    }
    let channels = layout.channels();
    let src_width = src.width() as usize;

    tracing::debug!(
        src_width = src.width(),
        src_height = src.height(),
        dst_width = dst.width(),
        dst_height = dst.height(),
        %layout,
        filter = %config.filter,
        filter_scale = config.filter_scale,
        "resampling"
    );

    let horizontal = ContributorList::new(
        src_width,
        dst.width() as usize,
        config.filter,
        config.filter_scale,
    )?;
    let vertical = ContributorList::new(
        src.height() as usize,
        dst.height() as usize,
        config.filter,
        config.filter_scale,
    )?;

    let mut resamplers = Vec::new();
    try_reserve(&mut resamplers, channels)?;
    let mut samples: Vec<Vec<f32>> = Vec::new();
    try_reserve(&mut samples, channels)?;
    for _ in 0..channels {
        resamplers.push(ChannelResampler::new(&horizontal, &vertical)?);
        let mut row = Vec::new();
        try_reserve(&mut row, src_width)?;
        row.resize(src_width, 0.0);
        samples.push(row);
    }

    let mut dst_y = 0_u32;
    for row in src.rows() {
        for (c, channel_samples) in samples.iter_mut().enumerate() {
            let pixels = row.chunks_exact(channels);
            if layout.is_color_channel(c) {
                for (slot, px) in channel_samples.iter_mut().zip(pixels) {
                    *slot = tables.to_linear(px[c]);
                }
            } else {
                for (slot, px) in channel_samples.iter_mut().zip(pixels) {
                    *slot = unorm_to_f32(px[c]);
                }
            }
        }

        for (resampler, channel_samples) in resamplers.iter_mut().zip(&samples) {
            resampler.put_source_row(channel_samples)?;
        }

        while resamplers.iter().all(ChannelResampler::has_dest_row) {
            let out_row = dst.row_mut(dst_y);
            for (c, resampler) in resamplers.iter_mut().enumerate() {
                let line = resampler.get_dest_row().ok_or(ResampleError::Incomplete {
                    produced: dst_y,
                    expected: vertical.dst_len() as u32,
                })?;
                let pixels = out_row.chunks_exact_mut(channels);
                if layout.is_color_channel(c) {
                    for (px, &v) in pixels.zip(line) {
                        px[c] = tables.to_encoded(v);
                    }
                } else {
                    for (px, &v) in pixels.zip(line) {
                        px[c] = f32_to_unorm(v);
                    }
                }
            }
            dst_y += 1;
        }
    }

    if dst_y != dst.height() {
        return Err(ResampleError::Incomplete {
            produced: dst_y,
            expected: dst.height(),
        });
    }
    Ok(())
}
