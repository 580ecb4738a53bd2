use crate::{Format, InterlacingLayout, Shape};

/// The bundle of everything that's needed to interpret a PNG's raw pixel
/// bytes: its format, the resulting raster geometry, and whether the data
/// is Adam7-interlaced.
///
/// `palette` and `chroma_key` are carried separately from this crate's core
/// (palette RGB triples, and a `tRNS`-style transparent color) since this
/// crate doesn't interpret color, only geometry; they're stored here purely
/// so callers can thread them alongside a `Properties` value without a
/// second lookup structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Properties<'p> {
  pub format: Format,
  pub shape: Shape,
  pub interlacing: InterlacingLayout,
  pub palette: Option<&'p [[u8; 3]]>,
  pub chroma_key: Option<ChromaKey>,
}
impl<'p> Properties<'p> {
  /// Constructs from `(size, format, interlaced?)`, the three facts an
  /// `IHDR` chunk provides.
  #[must_use]
  pub fn new(size: (u32, u32), format: Format, interlaced: bool) -> Self {
    Self {
      format,
      shape: Shape::new(format, size),
      interlacing: if interlaced {
        InterlacingLayout::adam7(format, size)
      } else {
        InterlacingLayout::None
      },
      palette: None,
      chroma_key: None,
    }
  }

  #[must_use]
  pub fn with_palette(mut self, palette: &'p [[u8; 3]]) -> Self {
    self.palette = Some(palette);
    self
  }

  #[must_use]
  pub fn with_chroma_key(mut self, chroma_key: ChromaKey) -> Self {
    self.chroma_key = Some(chroma_key);
    self
  }
}

/// A `tRNS`-style single transparent color, stored as components of the
/// image's own format (grayscale, rgb, or a palette-index table is handled
/// by the caller and not represented here since its length is dynamic).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChromaKey {
  Grayscale(u16),
  Rgb(u16, u16, u16),
}

/// An uncompressed-but-possibly-interlaced pixel buffer.
///
/// `data.len()` must equal, if interlaced, the sum of per-pass shape bytes
/// (i.e. `properties.interlacing.total_bytes()`), or else
/// `properties.shape.bytes()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Uncompressed<'p, 'd> {
  pub properties: Properties<'p>,
  pub data: &'d [u8],
}
impl<'p, 'd> Uncompressed<'p, 'd> {
  /// The byte count this buffer is expected to carry, given its properties.
  #[must_use]
  pub fn expected_len(&self) -> usize {
    match self.properties.interlacing {
      InterlacingLayout::None => self.properties.shape.bytes(),
      InterlacingLayout::Adam7(_) => self.properties.interlacing.total_bytes(),
    }
  }
}

/// A fully deinterlaced raster: one pixel per logical pixel position,
/// `interlacing` always [`InterlacingLayout::None`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rectangular<'p> {
  pub properties: Properties<'p>,
  #[cfg(feature = "alloc")]
  pub data: alloc::vec::Vec<u8>,
  #[cfg(not(feature = "alloc"))]
  pub data: &'p [u8],
}
