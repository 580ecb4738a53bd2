#![allow(non_camel_case_types)]

/// The pixel formats allowed in a PNG file.
///
/// This combines a channel ordering (the "color code") with a bit depth per
/// channel. There are fourteen legal combinations; all other (color code,
/// depth) pairs are rejected by the header parser that's external to this
/// crate.
///
/// * The Greyscale (`Y`) and Indexed (`I`) formats allow for pixels that are
///   only 1, 2, or 4 bits each. In this case, the pixels are tightly packed
///   into bytes, with the left-most pixel being the highest bits of the byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Format {
  Y1,
  Y2,
  Y4,
  Y8,
  Y16,
  RGB8,
  RGB16,
  I1,
  I2,
  I4,
  I8,
  YA8,
  YA16,
  RGBA8,
  RGBA16,
}
impl Format {
  /// The bit depth per storage channel: one of 1, 2, 4, 8, or 16.
  #[inline]
  #[must_use]
  pub const fn depth(self) -> u8 {
    match self {
      Self::Y1 | Self::I1 => 1,
      Self::Y2 | Self::I2 => 2,
      Self::Y4 | Self::I4 => 4,
      Self::Y8 | Self::RGB8 | Self::I8 | Self::YA8 | Self::RGBA8 => 8,
      Self::Y16 | Self::RGB16 | Self::YA16 | Self::RGBA16 => 16,
    }
  }

  /// The PNG color code: `grayscale=0, rgb=2, indexed=3, grayscale+alpha=4,
  /// rgba=6`.
  #[inline]
  #[must_use]
  pub const fn color_code(self) -> u8 {
    match self {
      Self::Y1 | Self::Y2 | Self::Y4 | Self::Y8 | Self::Y16 => 0,
      Self::RGB8 | Self::RGB16 => 2,
      Self::I1 | Self::I2 | Self::I4 | Self::I8 => 3,
      Self::YA8 | Self::YA16 => 4,
      Self::RGBA8 | Self::RGBA16 => 6,
    }
  }

  /// `color_code & 1`: this format's pixels are palette indices.
  #[inline]
  #[must_use]
  pub const fn is_indexed(self) -> bool {
    (self.color_code() & 1) != 0
  }

  /// `color_code & 2`: this format's pixels carry direct color channels
  /// (as opposed to only grayscale).
  #[inline]
  #[must_use]
  pub const fn has_color(self) -> bool {
    (self.color_code() & 2) != 0
  }

  /// `color_code & 4`: this format's pixels carry an alpha channel.
  #[inline]
  #[must_use]
  pub const fn has_alpha(self) -> bool {
    (self.color_code() & 4) != 0
  }

  /// Storage channels per pixel, as the bytes are actually laid out
  /// (indexed formats have 1 storage channel, *not* 3).
  #[inline]
  #[must_use]
  pub const fn channels(self) -> usize {
    match self {
      Self::Y1 | Self::Y2 | Self::Y4 | Self::Y8 | Self::Y16 => 1,
      Self::RGB8 | Self::RGB16 => 3,
      Self::I1 | Self::I2 | Self::I4 | Self::I8 => 1,
      Self::YA8 | Self::YA16 => 2,
      Self::RGBA8 | Self::RGBA16 => 4,
    }
  }

  /// Logical components per pixel *after* palette expansion.
  ///
  /// Indexed formats report 3 here (their palette entries are RGB), which is
  /// why this differs from [`channels`](Self::channels) for `I1`..`I8`.
  #[inline]
  #[must_use]
  pub const fn components(self) -> usize {
    1 + (if self.has_color() { 2 } else { 0 }) + (if self.has_alpha() { 1 } else { 0 })
  }

  /// Bytes per pixel, for whole-byte (depth >= 8) formats.
  ///
  /// ## Panics
  /// If called on a sub-byte (depth < 8) format, where less than one byte
  /// holds a single pixel.
  #[inline]
  #[must_use]
  pub const fn bytes_per_pixel(self) -> usize {
    assert!(self.depth() >= 8, "bytes_per_pixel is undefined for sub-byte formats");
    self.channels() * (self.depth() as usize) / 8
  }
}
