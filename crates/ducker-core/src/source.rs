//! Pull-based sample streams.
//!
//! A [`SampleSource`] produces interleaved `f32` samples at a fixed
//! [`SampleFormat`]. Hosts chain sources by wrapping one in another: the
//! ducking processor is itself a source that forwards the program format.

/// Sample rate and channel layout of an interleaved stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SampleFormat {
    pub sample_rate: u32,
    pub channels: u16,
}

impl SampleFormat {
    pub const fn new(sample_rate: u32, channels: u16) -> Self {
        Self {
            sample_rate,
            channels,
        }
    }

    pub const fn mono(sample_rate: u32) -> Self {
        Self::new(sample_rate, 1)
    }

    pub const fn stereo(sample_rate: u32) -> Self {
        Self::new(sample_rate, 2)
    }

    /// Channel count used as the interleave stride. Never zero.
    #[inline]
    pub fn stride(&self) -> usize {
        usize::from(self.channels.max(1))
    }
}

impl Default for SampleFormat {
    fn default() -> Self {
        Self::stereo(44100)
    }
}

/// Producer of interleaved samples.
///
/// `read` fills `buffer[offset..offset + count]` and returns how many samples
/// were written. Returning 0 means no data for this call, which is not
/// necessarily the end of the stream.
pub trait SampleSource {
    fn format(&self) -> SampleFormat;

    fn read(&mut self, buffer: &mut [f32], offset: usize, count: usize) -> usize;
}

impl<S: SampleSource + ?Sized> SampleSource for Box<S> {
    #[inline]
    fn format(&self) -> SampleFormat {
        (**self).format()
    }

    #[inline]
    fn read(&mut self, buffer: &mut [f32], offset: usize, count: usize) -> usize {
        (**self).read(buffer, offset, count)
    }
}

impl<S: SampleSource + ?Sized> SampleSource for &mut S {
    #[inline]
    fn format(&self) -> SampleFormat {
        (**self).format()
    }

    #[inline]
    fn read(&mut self, buffer: &mut [f32], offset: usize, count: usize) -> usize {
        (**self).read(buffer, offset, count)
    }
}

/// In-memory source over interleaved samples, optionally looping.
#[derive(Debug, Clone)]
pub struct BufferSource {
    samples: Vec<f32>,
    format: SampleFormat,
    position: usize,
    looping: bool,
    reads: usize,
}

impl BufferSource {
    pub fn new(samples: Vec<f32>, format: SampleFormat) -> Self {
        Self {
            samples,
            format,
            position: 0,
            looping: false,
            reads: 0,
        }
    }

    /// Repeat the buffer forever instead of running dry.
    pub fn looping(mut self) -> Self {
        self.looping = true;
        self
    }

    /// Constant-level source, useful as a steady sidechain.
    pub fn constant(value: f32, len: usize, format: SampleFormat) -> Self {
        Self::new(vec![value; len], format)
    }

    pub fn silence(len: usize, format: SampleFormat) -> Self {
        Self::constant(0.0, len, format)
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn remaining(&self) -> usize {
        if self.looping && !self.samples.is_empty() {
            usize::MAX
        } else {
            self.samples.len() - self.position
        }
    }

    /// Number of `read` calls made against this source.
    pub fn read_calls(&self) -> usize {
        self.reads
    }

    pub fn rewind(&mut self) {
        self.position = 0;
    }

    pub fn into_inner(self) -> Vec<f32> {
        self.samples
    }
}

impl SampleSource for BufferSource {
    fn format(&self) -> SampleFormat {
        self.format
    }

    fn read(&mut self, buffer: &mut [f32], offset: usize, count: usize) -> usize {
        self.reads += 1;

        let Some(dest) = buffer.get_mut(offset..) else {
            return 0;
        };
        let count = count.min(dest.len());

        let mut written = 0;
        while written < count {
            if self.position >= self.samples.len() {
                if self.looping && !self.samples.is_empty() {
                    self.position = 0;
                } else {
                    break;
                }
            }

            let n = (count - written).min(self.samples.len() - self.position);
            dest[written..written + n]
                .copy_from_slice(&self.samples[self.position..self.position + n]);
            self.position += n;
            written += n;
        }

        written
    }
}
