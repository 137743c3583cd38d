//! Pixel access for selection sources.
//!
//! The selection engine never assumes a channel order or bit depth. Both are
//! explicit: the bit depth is the [`Sample`] type parameter and the channel
//! order is a [`PixelFormat`] carried by every [`SourceImage`].
//!
//! ## Supported Layouts
//!
//! | Format | Channels | Description |
//! |--------|----------|-------------|
//! | `GRAY` | 1 | Single luminance channel |
//! | `GRAY_ALPHA` | 2 | Luminance + alpha |
//! | `RGB` / `BGR` | 3 | Color without alpha |
//! | `RGBA` / `BGRA` / `ARGB` | 4 | Color with alpha |
//!
//! Any other order of up to four distinct channels can be described with
//! [`PixelFormat::new`].

use ndarray::ArrayView3;

use crate::error::{Result, SelectionError};

/// Maximum number of channels per pixel.
pub const MAX_CHANNELS: usize = 4;

// ============================================================================
// Samples
// ============================================================================

/// An unsigned channel sample type.
pub trait Sample: Copy + Send + Sync + 'static {
    /// Largest value a channel can hold (255 for 8-bit, 65535 for 16-bit).
    const MAX: u32;

    fn to_u32(self) -> u32;
}

impl Sample for u8 {
    const MAX: u32 = u8::MAX as u32;

    #[inline]
    fn to_u32(self) -> u32 {
        self as u32
    }
}

impl Sample for u16 {
    const MAX: u32 = u16::MAX as u32;

    #[inline]
    fn to_u32(self) -> u32 {
        self as u32
    }
}

// ============================================================================
// Pixel Format
// ============================================================================

/// Meaning of one channel slot in a pixel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Channel {
    Red,
    Green,
    Blue,
    Alpha,
    Gray,
}

/// Ordered channel layout of a pixel, 1 to 4 distinct channels.
#[derive(Clone, Copy, Debug)]
pub struct PixelFormat {
    channels: [Channel; MAX_CHANNELS],
    count: u8,
}

impl PixelFormat {
    pub const GRAY: PixelFormat = PixelFormat::fixed([Channel::Gray; 4], 1);
    pub const GRAY_ALPHA: PixelFormat =
        PixelFormat::fixed([Channel::Gray, Channel::Alpha, Channel::Gray, Channel::Gray], 2);
    pub const RGB: PixelFormat =
        PixelFormat::fixed([Channel::Red, Channel::Green, Channel::Blue, Channel::Gray], 3);
    pub const BGR: PixelFormat =
        PixelFormat::fixed([Channel::Blue, Channel::Green, Channel::Red, Channel::Gray], 3);
    pub const RGBA: PixelFormat =
        PixelFormat::fixed([Channel::Red, Channel::Green, Channel::Blue, Channel::Alpha], 4);
    pub const BGRA: PixelFormat =
        PixelFormat::fixed([Channel::Blue, Channel::Green, Channel::Red, Channel::Alpha], 4);
    pub const ARGB: PixelFormat =
        PixelFormat::fixed([Channel::Alpha, Channel::Red, Channel::Green, Channel::Blue], 4);

    const fn fixed(channels: [Channel; MAX_CHANNELS], count: u8) -> Self {
        PixelFormat { channels, count }
    }

    /// Describe a custom channel order.
    ///
    /// Fails with `UnsupportedPixelFormat` for zero channels, more than
    /// four, or a channel listed twice.
    pub fn new(channels: &[Channel]) -> Result<Self> {
        if channels.is_empty() {
            return Err(SelectionError::UnsupportedPixelFormat(
                "pixel format has zero channels".into(),
            ));
        }
        if channels.len() > MAX_CHANNELS {
            return Err(SelectionError::UnsupportedPixelFormat(format!(
                "pixel format has {} channels, at most {} are supported",
                channels.len(),
                MAX_CHANNELS
            )));
        }
        for (i, c) in channels.iter().enumerate() {
            if channels[..i].contains(c) {
                return Err(SelectionError::UnsupportedPixelFormat(format!(
                    "channel {:?} appears more than once",
                    c
                )));
            }
        }

        let mut slots = [Channel::Gray; MAX_CHANNELS];
        slots[..channels.len()].copy_from_slice(channels);
        Ok(PixelFormat {
            channels: slots,
            count: channels.len() as u8,
        })
    }

    /// Default layout for an interleaved buffer with `count` channels:
    /// 1 = gray, 2 = gray + alpha, 3 = RGB, 4 = RGBA.
    pub fn from_channel_count(count: usize) -> Result<Self> {
        match count {
            1 => Ok(Self::GRAY),
            2 => Ok(Self::GRAY_ALPHA),
            3 => Ok(Self::RGB),
            4 => Ok(Self::RGBA),
            0 => Err(SelectionError::UnsupportedPixelFormat(
                "pixel format has zero channels".into(),
            )),
            n => Err(SelectionError::UnsupportedPixelFormat(format!(
                "pixel format has {} channels, at most {} are supported",
                n, MAX_CHANNELS
            ))),
        }
    }

    #[inline]
    pub fn channel_count(&self) -> usize {
        self.count as usize
    }

    #[inline]
    pub fn channels(&self) -> &[Channel] {
        &self.channels[..self.count as usize]
    }

    /// Position of `channel` within a pixel, if present.
    pub fn index_of(&self, channel: Channel) -> Option<usize> {
        self.channels().iter().position(|&c| c == channel)
    }

    pub fn has_alpha(&self) -> bool {
        self.index_of(Channel::Alpha).is_some()
    }
}

impl PartialEq for PixelFormat {
    fn eq(&self, other: &Self) -> bool {
        self.channels() == other.channels()
    }
}

impl Eq for PixelFormat {}

// ============================================================================
// Source Images
// ============================================================================

/// Read-only pixel source a selection is built from.
///
/// Implementors guarantee that `read_pixel` is valid for every
/// `0 <= x < width()` and `0 <= y < height()`. The selection engine never
/// calls it outside that range.
pub trait SourceImage {
    type Sample: Sample;

    fn width(&self) -> usize;

    fn height(&self) -> usize;

    fn format(&self) -> PixelFormat;

    /// Samples from the start of one row to the start of the next. Must be
    /// at least `width() * format().channel_count()`. Sources without row
    /// padding keep the default.
    fn stride(&self) -> usize {
        self.width() * self.format().channel_count()
    }

    /// Read the samples at (x, y) into `out[..format().channel_count()]`.
    /// Slots past the channel count are left untouched.
    fn read_pixel(&self, x: usize, y: usize, out: &mut [u32; MAX_CHANNELS]);
}

/// Interleaved pixel buffer with an explicit row stride.
///
/// `stride` is measured in samples, not bytes, and may exceed
/// `width * channels` when rows are padded.
#[derive(Clone, Copy, Debug)]
pub struct ImageView<'a, S: Sample> {
    data: &'a [S],
    width: usize,
    height: usize,
    stride: usize,
    format: PixelFormat,
}

impl<'a, S: Sample> ImageView<'a, S> {
    /// Wrap a tightly packed buffer (`stride = width * channels`).
    pub fn new(data: &'a [S], width: usize, height: usize, format: PixelFormat) -> Result<Self> {
        let stride = width.checked_mul(format.channel_count()).ok_or_else(|| {
            SelectionError::UnsupportedPixelFormat("row length overflows".into())
        })?;
        Self::with_stride(data, width, height, stride, format)
    }

    /// Wrap a buffer whose rows start `stride` samples apart.
    pub fn with_stride(
        data: &'a [S],
        width: usize,
        height: usize,
        stride: usize,
        format: PixelFormat,
    ) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(SelectionError::UnsupportedPixelFormat(format!(
                "image is empty ({}x{})",
                width, height
            )));
        }

        let row_len = width
            .checked_mul(format.channel_count())
            .ok_or_else(|| SelectionError::UnsupportedPixelFormat("row length overflows".into()))?;
        if stride < row_len {
            return Err(SelectionError::UnsupportedPixelFormat(format!(
                "stride {} is shorter than a row of {} samples",
                stride, row_len
            )));
        }

        let required = stride
            .checked_mul(height - 1)
            .and_then(|n| n.checked_add(row_len))
            .ok_or_else(|| SelectionError::UnsupportedPixelFormat("buffer size overflows".into()))?;
        if data.len() < required {
            return Err(SelectionError::UnsupportedPixelFormat(format!(
                "buffer holds {} samples, {}x{} with stride {} needs {}",
                data.len(),
                width,
                height,
                stride,
                required
            )));
        }

        Ok(ImageView {
            data,
            width,
            height,
            stride,
            format,
        })
    }
}

impl<S: Sample> SourceImage for ImageView<'_, S> {
    type Sample = S;

    #[inline]
    fn width(&self) -> usize {
        self.width
    }

    #[inline]
    fn height(&self) -> usize {
        self.height
    }

    #[inline]
    fn format(&self) -> PixelFormat {
        self.format
    }

    #[inline]
    fn stride(&self) -> usize {
        self.stride
    }

    #[inline]
    fn read_pixel(&self, x: usize, y: usize, out: &mut [u32; MAX_CHANNELS]) {
        let channels = self.format.channel_count();
        let base = y * self.stride + x * channels;
        for (slot, &sample) in out.iter_mut().zip(&self.data[base..base + channels]) {
            *slot = sample.to_u32();
        }
    }
}

/// `ndarray` view of shape (height, width, channels).
#[derive(Clone, Debug)]
pub struct NdImage<'a, S: Sample> {
    array: ArrayView3<'a, S>,
    format: PixelFormat,
}

impl<'a, S: Sample> NdImage<'a, S> {
    /// Wrap `array` with an explicit channel order. The third axis must
    /// match the format's channel count.
    pub fn new(array: ArrayView3<'a, S>, format: PixelFormat) -> Result<Self> {
        let (height, width, channels) = array.dim();
        if width == 0 || height == 0 {
            return Err(SelectionError::UnsupportedPixelFormat(format!(
                "image is empty ({}x{})",
                width, height
            )));
        }
        if channels != format.channel_count() {
            return Err(SelectionError::UnsupportedPixelFormat(format!(
                "array has {} channels but the format describes {}",
                channels,
                format.channel_count()
            )));
        }
        Ok(NdImage { array, format })
    }

    /// Wrap `array`, taking the channel order from its channel count.
    pub fn infer(array: ArrayView3<'a, S>) -> Result<Self> {
        let format = PixelFormat::from_channel_count(array.dim().2)?;
        Self::new(array, format)
    }
}

impl<S: Sample> SourceImage for NdImage<'_, S> {
    type Sample = S;

    #[inline]
    fn width(&self) -> usize {
        self.array.dim().1
    }

    #[inline]
    fn height(&self) -> usize {
        self.array.dim().0
    }

    #[inline]
    fn format(&self) -> PixelFormat {
        self.format
    }

    #[inline]
    fn read_pixel(&self, x: usize, y: usize, out: &mut [u32; MAX_CHANNELS]) {
        for (c, slot) in out.iter_mut().enumerate().take(self.format.channel_count()) {
            *slot = self.array[[y, x, c]].to_u32();
        }
    }
}
