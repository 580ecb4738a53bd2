use bitfrob::{u8_bit_split_1x8_rev, u8_bit_split_2x4_rev, u8_bit_split_4x2_rev};

use crate::{Format, InterlacingLayout, Properties, Uncompressed};

#[cfg(feature = "alloc")]
use crate::Rectangular;

/// Reads the `depth`-bit field starting at bit offset `bit` (MSB-first)
/// out of one packed byte.
#[inline]
fn extract_field(byte: u8, bit: u32, depth: u32) -> u8 {
  match depth {
    1 => u8_bit_split_1x8_rev(byte)[bit as usize],
    2 => u8_bit_split_2x4_rev(byte)[(bit / 2) as usize],
    4 => u8_bit_split_4x2_rev(byte)[(bit / 4) as usize],
    _ => unreachable!("sub-byte packed path only handles depth 1, 2, or 4"),
  }
}

/// Reconstitutes a rectangular raster from a (possibly Adam7-interlaced)
/// uncompressed pixel buffer, writing into a caller-provided output buffer.
///
/// `output` must be exactly `input.properties.shape.bytes()` long, and must
/// start zero-filled: the sub-byte packed path (`depth` 1/2/4) only ever
/// ORs bits in, it never clears them, so a non-zero starting buffer would
/// leak stale bits into the result.
///
/// ## Panics
/// If `input.data.len()` doesn't match `input.expected_len()`, or `output`
/// is the wrong size. These are caller contract violations, not recoverable
/// decode errors: the byte counts are derived entirely from `properties`,
/// which the caller controls.
pub fn deinterlace_into(input: &Uncompressed<'_, '_>, output: &mut [u8]) {
  assert_eq!(input.data.len(), input.expected_len(), "Uncompressed.data has the wrong length");
  assert_eq!(output.len(), input.properties.shape.bytes(), "output buffer has the wrong length");

  let format = input.properties.format;
  let dst_pitch = input.properties.shape.pitch;

  match input.properties.interlacing {
    InterlacingLayout::None => {
      output.copy_from_slice(input.data);
    }
    InterlacingLayout::Adam7(subimages) => {
      let ranges = input.properties.interlacing.byte_ranges();
      let depth = format.depth();
      if depth >= 8 {
        let bpp = format.bytes_per_pixel();
        for (sub, range) in subimages.iter().zip(ranges.iter()) {
          let base = range.start;
          let src_pitch = sub.shape.pitch;
          for (sy, dy) in sub.strider_y.enumerate(sub.shape.size.1) {
            for (sx, dx) in sub.strider_x.enumerate(sub.shape.size.0) {
              let src_off = base + (sx as usize) * bpp + src_pitch * (sy as usize);
              let dst_off = (dx as usize) * bpp + dst_pitch * (dy as usize);
              output[dst_off..dst_off + bpp]
                .copy_from_slice(&input.data[src_off..src_off + bpp]);
            }
          }
        }
      } else {
        let depth = depth as u32;
        for (sub, range) in subimages.iter().zip(ranges.iter()) {
          let base = range.start;
          let src_pitch = sub.shape.pitch;
          for (sy, dy) in sub.strider_y.enumerate(sub.shape.size.1) {
            for (sx, dx) in sub.strider_x.enumerate(sub.shape.size.0) {
              let src_byte = base + ((sx * depth) >> 3) as usize + src_pitch * (sy as usize);
              let src_bit = (sx * depth) & 7;
              let dst_byte = ((dx * depth) >> 3) as usize + dst_pitch * (dy as usize);
              let dst_bit = (dx * depth) & 7;
              let bits = extract_field(input.data[src_byte], src_bit, depth);
              output[dst_byte] |= bits << (8 - dst_bit - depth);
            }
          }
        }
      }
    }
  }
}

/// Allocating counterpart of [`deinterlace_into`]: allocates a zeroed output
/// buffer sized to `input.properties.shape.bytes()` and fills it.
#[cfg(feature = "alloc")]
#[must_use]
pub fn deinterlace<'p>(input: &Uncompressed<'p, '_>) -> Rectangular<'p> {
  let mut data = alloc::vec![0u8; input.properties.shape.bytes()];
  deinterlace_into(input, &mut data);
  let mut properties = input.properties;
  properties.interlacing = InterlacingLayout::None;
  Rectangular { properties, data }
}

/// Splits an Adam7-interlaced buffer into its seven per-pass rasters,
/// without merging them into the full image. Each output carries a
/// [`Properties`] built from its own sub-image size, non-interlaced.
///
/// ## Panics
/// If `input.properties.interlacing` is [`InterlacingLayout::None`], or if
/// `input.data` has the wrong length for its properties.
#[cfg(feature = "alloc")]
#[must_use]
pub fn decompose<'p>(input: &Uncompressed<'p, '_>) -> [Rectangular<'p>; 7] {
  assert_eq!(input.data.len(), input.expected_len(), "Uncompressed.data has the wrong length");
  let subimages = match input.properties.interlacing {
    InterlacingLayout::Adam7(s) => s,
    InterlacingLayout::None => panic!("decompose requires an Adam7-interlaced input"),
  };
  let ranges = input.properties.interlacing.byte_ranges();
  let format: Format = input.properties.format;
  core::array::from_fn(|i| {
    let sub = subimages[i];
    let range = ranges[i].clone();
    Rectangular {
      properties: Properties::new(sub.shape.size, format, false),
      data: input.data[range].to_vec(),
    }
  })
}
