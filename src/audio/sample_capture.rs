// src/audio/sample_capture.rs
//! Pass-through source that mirrors a mono mix of the audio into a ring buffer.

use std::sync::{Arc, Mutex};

use ringbuf::{HeapRb, traits::*};
use rodio::Source;

/// Shared buffer of the most recent mono samples.
pub type SampleBuffer = Arc<Mutex<HeapRb<f32>>>;

/// Wraps a source, down-mixing each frame to mono into `buffer` while the
/// original interleaved samples flow on to the output unchanged.
pub struct SampleCapture<S> {
    source: S,
    buffer: SampleBuffer,
    /// Sum of the samples seen so far in the current frame
    frame_sum: f32,
    /// Number of channels already summed into `frame_sum`
    frame_fill: u16,
}

impl<S> SampleCapture<S> {
    pub fn new(source: S, buffer: SampleBuffer) -> Self {
        Self {
            source,
            buffer,
            frame_sum: 0.0,
            frame_fill: 0,
        }
    }
}

impl<S> SampleCapture<S>
where
    S: Source<Item = f32>,
{
    fn capture(&mut self, sample: f32) {
        let channels = self.source.channels().max(1);
        self.frame_sum += sample;
        self.frame_fill += 1;

        if self.frame_fill >= channels {
            let mono = self.frame_sum / self.frame_fill as f32;
            self.frame_sum = 0.0;
            self.frame_fill = 0;

            if let Ok(mut buf) = self.buffer.lock() {
                let _ = buf.push_overwrite(mono);
            }
        }
    }
}

impl<S> Iterator for SampleCapture<S>
where
    S: Source<Item = f32>,
{
    type Item = f32;

    fn next(&mut self) -> Option<Self::Item> {
        let sample = self.source.next()?;
        self.capture(sample);
        Some(sample)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.source.size_hint()
    }
}

impl<S> Source for SampleCapture<S>
where
    S: Source<Item = f32>,
{
    fn current_frame_len(&self) -> Option<usize> {
        self.source.current_frame_len()
    }

    fn channels(&self) -> u16 {
        self.source.channels()
    }

    fn sample_rate(&self) -> u32 {
        self.source.sample_rate()
    }

    fn total_duration(&self) -> Option<std::time::Duration> {
        self.source.total_duration()
    }
}
