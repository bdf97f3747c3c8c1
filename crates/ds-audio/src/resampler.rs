//! Nearest-neighbour sample rate conversion
//!
//! Each host frame takes the native frame at `floor(i * n_native / n_host)`.
//! There is no interpolation; the stretch is cheap and exact enough for the
//! small ratio between the core's rate and common host rates.

use ds_core::{SampleBatch, StereoSample};

/// Native frames needed to fill one host buffer, rounded to the nearest frame.
///
/// 1024 frames at 48000 Hz need 699 frames at 32768 Hz.
pub fn native_batch_len(host_len: usize, native_rate: u32, host_rate: u32) -> usize {
    if host_rate == 0 {
        return 0;
    }
    let native = host_len as u64 * u64::from(native_rate);
    let host_rate = u64::from(host_rate);
    ((native + host_rate / 2) / host_rate) as usize
}

/// Maps a fixed-size native batch onto a fixed-size host buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NearestResampler {
    native_len: usize,
    host_len: usize,
}

impl NearestResampler {
    pub fn new(native_len: usize, host_len: usize) -> Self {
        Self {
            native_len,
            host_len,
        }
    }

    /// Resampler for a host buffer of `host_len` frames at the given rates
    pub fn for_rates(host_len: usize, native_rate: u32, host_rate: u32) -> Self {
        Self::new(native_batch_len(host_len, native_rate, host_rate), host_len)
    }

    /// Frames requested from the core per host buffer
    pub fn native_len(&self) -> usize {
        self.native_len
    }

    /// Frames written per host buffer
    pub fn host_len(&self) -> usize {
        self.host_len
    }

    /// Native frame feeding host frame `i`
    #[inline]
    pub fn source_index(&self, i: usize) -> usize {
        if self.host_len == 0 {
            return 0;
        }
        i * self.native_len / self.host_len
    }

    /// Fill `output` with `host_len` interleaved stereo frames.
    ///
    /// Frames missing from a short batch are written as silence. `output`
    /// must hold at least `host_len * 2` samples; any excess is left alone.
    pub fn resample(&self, batch: &SampleBatch, output: &mut [i16]) {
        let frames = output.chunks_exact_mut(2).take(self.host_len);
        for (i, frame) in frames.enumerate() {
            let sample = batch
                .get(self.source_index(i))
                .copied()
                .unwrap_or(StereoSample::SILENCE);
            frame[0] = sample.left;
            frame[1] = sample.right;
        }
    }
}
