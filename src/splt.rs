#[cfg(feature = "alloc")]
use alloc::vec::Vec;

/// One 8-bit-per-component palette-suggestion entry: an RGBA color plus its
/// suggested frequency.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaletteEntry8 {
  pub r: u8,
  pub g: u8,
  pub b: u8,
  pub a: u8,
  pub frequency: u16,
}

/// One 16-bit-per-component palette-suggestion entry: an RGBA color plus its
/// suggested frequency.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaletteEntry16 {
  pub r: u16,
  pub g: u16,
  pub b: u16,
  pub a: u16,
  pub frequency: u16,
}

/// An `sPLT` chunk's entry table, tagged by the sample depth its components
/// were packed at.
///
/// Two variants rather than one entry type widened to `u16` with a separate
/// depth flag: that representation let a depth-8 entry's components hold
/// values above 255, silently truncated on serialization. Splitting by depth
/// makes the out-of-range state unrepresentable instead of merely checked.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg(feature = "alloc")]
pub enum PaletteEntries {
  Eight(Vec<PaletteEntry8>),
  Sixteen(Vec<PaletteEntry16>),
}
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg(not(feature = "alloc"))]
pub enum PaletteEntries<'n> {
  Eight(&'n [PaletteEntry8]),
  Sixteen(&'n [PaletteEntry16]),
}
#[cfg(feature = "alloc")]
impl PaletteEntries {
  #[must_use]
  pub const fn depth(&self) -> SampleDepth {
    match self {
      Self::Eight(_) => SampleDepth::Eight,
      Self::Sixteen(_) => SampleDepth::Sixteen,
    }
  }

  #[must_use]
  fn len(&self) -> usize {
    match self {
      Self::Eight(v) => v.len(),
      Self::Sixteen(v) => v.len(),
    }
  }

  fn frequencies_non_increasing(&self) -> bool {
    match self {
      Self::Eight(v) => v.windows(2).all(|w| w[0].frequency >= w[1].frequency),
      Self::Sixteen(v) => v.windows(2).all(|w| w[0].frequency >= w[1].frequency),
    }
  }
}

/// The depth an `sPLT` chunk's entries are packed at: one byte per
/// component, or two.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleDepth {
  Eight,
  Sixteen,
}
impl SampleDepth {
  #[must_use]
  const fn code(self) -> u8 {
    match self {
      Self::Eight => 8,
      Self::Sixteen => 16,
    }
  }

  #[must_use]
  const fn stride(self) -> usize {
    match self {
      Self::Eight => 6,
      Self::Sixteen => 10,
    }
  }
}

/// A parsed `sPLT` (suggested palette) chunk body.
///
/// `name` holds the raw name bytes (no trailing NUL); construction and
/// parsing both validate it against the PNG text-name rules (see
/// [`validate_name`]).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuggestedPalette<'n> {
  pub name: &'n [u8],
  #[cfg(feature = "alloc")]
  pub entries: PaletteEntries,
  #[cfg(not(feature = "alloc"))]
  pub entries: PaletteEntries<'n>,
}

/// Errors parsing or constructing a [`SuggestedPalette`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum SuggestedPaletteError {
  InvalidName(InvalidNameReason),
  InvalidChunkLength { got: usize, min: usize },
  InvalidDataLength { bytes: usize, stride: usize },
  InvalidDepthCode(u8),
  InvalidFrequency,
}

/// Why a candidate `sPLT` name was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum InvalidNameReason {
  Empty,
  TooLong,
  OutOfRange,
  LeadingOrTrailingSpace,
  ConsecutiveSpaces,
}

/// Validates a candidate `sPLT` name against the PNG text-name rules:
/// length 1..79, scalars in `0x20..=0x7D` or `0xA1..=0xFF`, no leading or
/// trailing space, no two consecutive spaces.
pub fn validate_name(name: &[u8]) -> Result<(), InvalidNameReason> {
  if name.is_empty() {
    return Err(InvalidNameReason::Empty);
  }
  if name.len() > 79 {
    return Err(InvalidNameReason::TooLong);
  }
  if name[0] == b' ' || *name.last().unwrap() == b' ' {
    return Err(InvalidNameReason::LeadingOrTrailingSpace);
  }
  for &b in name {
    let in_range = (0x20..=0x7D).contains(&b) || (0xA1..=0xFF).contains(&b);
    if !in_range {
      return Err(InvalidNameReason::OutOfRange);
    }
  }
  if name.windows(2).any(|w| w[0] == b' ' && w[1] == b' ') {
    return Err(InvalidNameReason::ConsecutiveSpaces);
  }
  Ok(())
}

#[cfg(feature = "alloc")]
impl<'n> SuggestedPalette<'n> {
  /// Builds a [`SuggestedPalette`] from its parts, validating the name and
  /// the descending-frequency invariant.
  pub fn new(name: &'n [u8], entries: PaletteEntries) -> Result<Self, SuggestedPaletteError> {
    validate_name(name).map_err(SuggestedPaletteError::InvalidName)?;
    if !entries.frequencies_non_increasing() {
      crate::trace!("rejecting sPLT construction: frequencies not non-increasing");
      return Err(SuggestedPaletteError::InvalidFrequency);
    }
    Ok(Self { name, entries })
  }

  /// Parses an `sPLT` chunk body: `name\0depth` followed by a table of
  /// fixed-stride entries, the stride and component width set by `depth`.
  pub fn parse(data: &'n [u8]) -> Result<Self, SuggestedPaletteError> {
    let name_end = data.iter().position(|&b| b == 0).ok_or_else(|| {
      crate::trace!("rejecting sPLT: no NUL terminator for name");
      SuggestedPaletteError::InvalidChunkLength { got: data.len(), min: 2 }
    })?;
    let name = &data[..name_end];
    validate_name(name).map_err(|reason| {
      crate::trace!("rejecting sPLT: invalid name ({reason:?})");
      SuggestedPaletteError::InvalidName(reason)
    })?;

    let k = name.len();
    if data.len() < k + 2 {
      crate::trace!("rejecting sPLT: chunk too short for name + depth byte");
      return Err(SuggestedPaletteError::InvalidChunkLength { got: data.len(), min: k + 2 });
    }
    let depth_code = data[k + 1];
    let depth = match depth_code {
      8 => SampleDepth::Eight,
      16 => SampleDepth::Sixteen,
      other => {
        crate::trace!("rejecting sPLT: depth code {other} is neither 8 nor 16");
        return Err(SuggestedPaletteError::InvalidDepthCode(other));
      }
    };

    let body = &data[k + 2..];
    let stride = depth.stride();
    if body.len() % stride != 0 {
      crate::trace!("rejecting sPLT: {} trailing bytes not a multiple of stride {stride}", body.len());
      return Err(SuggestedPaletteError::InvalidDataLength { bytes: body.len(), stride });
    }

    let entries = match depth {
      SampleDepth::Eight => {
        let mut v = Vec::with_capacity(body.len() / stride);
        for chunk in body.chunks_exact(stride) {
          v.push(PaletteEntry8 {
            r: chunk[0],
            g: chunk[1],
            b: chunk[2],
            a: chunk[3],
            frequency: u16::from_be_bytes([chunk[4], chunk[5]]),
          });
        }
        PaletteEntries::Eight(v)
      }
      SampleDepth::Sixteen => {
        let mut v = Vec::with_capacity(body.len() / stride);
        for chunk in body.chunks_exact(stride) {
          v.push(PaletteEntry16 {
            r: u16::from_be_bytes([chunk[0], chunk[1]]),
            g: u16::from_be_bytes([chunk[2], chunk[3]]),
            b: u16::from_be_bytes([chunk[4], chunk[5]]),
            a: u16::from_be_bytes([chunk[6], chunk[7]]),
            frequency: u16::from_be_bytes([chunk[8], chunk[9]]),
          });
        }
        PaletteEntries::Sixteen(v)
      }
    };

    if !entries.frequencies_non_increasing() {
      crate::trace!("rejecting sPLT parse: frequencies not non-increasing");
      return Err(SuggestedPaletteError::InvalidFrequency);
    }

    Ok(Self { name, entries })
  }

  /// Serializes back to an `sPLT` chunk body: the inverse of [`Self::parse`].
  #[must_use]
  pub fn serialize(&self) -> Vec<u8> {
    let depth = self.entries.depth();
    let mut out = Vec::with_capacity(self.name.len() + 2 + self.entries.len() * depth.stride());
    out.extend_from_slice(self.name);
    out.push(0);
    out.push(depth.code());
    match &self.entries {
      PaletteEntries::Eight(v) => {
        for e in v {
          out.push(e.r);
          out.push(e.g);
          out.push(e.b);
          out.push(e.a);
          out.extend_from_slice(&e.frequency.to_be_bytes());
        }
      }
      PaletteEntries::Sixteen(v) => {
        for e in v {
          out.extend_from_slice(&e.r.to_be_bytes());
          out.extend_from_slice(&e.g.to_be_bytes());
          out.extend_from_slice(&e.b.to_be_bytes());
          out.extend_from_slice(&e.a.to_be_bytes());
          out.extend_from_slice(&e.frequency.to_be_bytes());
        }
      }
    }
    out
  }
}

#[cfg(all(test, feature = "alloc"))]
mod tests {
  use super::*;
  use alloc::vec;

  fn entry8(r: u8, g: u8, b: u8, a: u8, frequency: u16) -> PaletteEntry8 {
    PaletteEntry8 { r, g, b, a, frequency }
  }

  fn entry16(r: u16, g: u16, b: u16, a: u16, frequency: u16) -> PaletteEntry16 {
    PaletteEntry16 { r, g, b, a, frequency }
  }

  #[test]
  fn test_serialize_depth8() {
    let palette = SuggestedPalette::new(
      b"x",
      PaletteEntries::Eight(vec![entry8(1, 2, 3, 4, 10), entry8(5, 6, 7, 8, 5)]),
    )
    .unwrap();
    let expected: &[u8] =
      &[b'x', 0x00, 0x08, 1, 2, 3, 4, 0x00, 0x0A, 5, 6, 7, 8, 0x00, 0x05];
    assert_eq!(palette.serialize(), expected);
  }

  #[test]
  fn test_descending_frequency_required_on_construction_and_parse() {
    let result = SuggestedPalette::new(
      b"x",
      PaletteEntries::Eight(vec![entry8(1, 2, 3, 4, 5), entry8(5, 6, 7, 8, 10)]),
    );
    assert_eq!(result, Err(SuggestedPaletteError::InvalidFrequency));

    let bytes: &[u8] = &[b'x', 0x00, 0x08, 1, 2, 3, 4, 0x00, 0x05, 5, 6, 7, 8, 0x00, 0x0A];
    assert_eq!(SuggestedPalette::parse(bytes), Err(SuggestedPaletteError::InvalidFrequency));
  }

  #[test]
  fn test_roundtrip_depth16() {
    let palette = SuggestedPalette::new(
      b"a palette",
      PaletteEntries::Sixteen(vec![
        entry16(1000, 2000, 3000, 65535, 40),
        entry16(10, 20, 30, 40, 40),
        entry16(1, 1, 1, 1, 1),
      ]),
    )
    .unwrap();
    let bytes = palette.serialize();
    let parsed = SuggestedPalette::parse(&bytes).unwrap();
    assert_eq!(parsed, palette);
  }

  #[test]
  fn test_depth8_components_cannot_exceed_u8_range() {
    // PaletteEntry8's fields are `u8`, so a depth-8 entry with an
    // out-of-range component simply doesn't typecheck; there is no runtime
    // state to reject here, unlike a widened-to-u16 representation would
    // need.
    let e = entry8(255, 0, 255, 0, 1);
    assert_eq!(e.r, 255);
  }

  #[test]
  fn test_invalid_name_rejections() {
    assert_eq!(validate_name(b""), Err(InvalidNameReason::Empty));
    assert_eq!(validate_name(b" leading"), Err(InvalidNameReason::LeadingOrTrailingSpace));
    assert_eq!(validate_name(b"trailing "), Err(InvalidNameReason::LeadingOrTrailingSpace));
    assert_eq!(validate_name(b"two  spaces"), Err(InvalidNameReason::ConsecutiveSpaces));
    assert_eq!(validate_name(&[0x01]), Err(InvalidNameReason::OutOfRange));
    assert_eq!(validate_name(&[b'a'; 80]), Err(InvalidNameReason::TooLong));
  }

  #[test]
  fn test_invalid_depth_code() {
    let bytes: &[u8] = &[b'x', 0x00, 0x0C];
    assert_eq!(SuggestedPalette::parse(bytes), Err(SuggestedPaletteError::InvalidDepthCode(0x0C)));
  }

  #[test]
  fn test_invalid_data_length_not_multiple_of_stride() {
    let bytes: &[u8] = &[b'x', 0x00, 0x08, 1, 2, 3, 4, 0x00];
    assert_eq!(
      SuggestedPalette::parse(bytes),
      Err(SuggestedPaletteError::InvalidDataLength { bytes: 5, stride: 6 })
    );
  }

  #[test]
  fn test_chunk_too_short_for_name_and_depth() {
    let bytes: &[u8] = &[b'x', 0x00];
    assert_eq!(
      SuggestedPalette::parse(bytes),
      Err(SuggestedPaletteError::InvalidChunkLength { got: 2, min: 3 })
    );
  }
}
