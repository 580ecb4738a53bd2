use core::ops::Range;

use crate::{Format, Shape};

/// A finite arithmetic sequence `start, start+step, start+2*step, ...`
/// enumerating destination coordinates covered by one Adam7 pass along one
/// axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Strider {
  pub start: u32,
  pub step: u32,
}
impl Strider {
  /// The destination coordinate for sub-image index `i`.
  #[inline]
  #[must_use]
  pub const fn nth(&self, i: u32) -> u32 {
    self.start + i * self.step
  }

  /// Iterates `(sub_image_index, destination_coordinate)` pairs, `count`
  /// values long.
  #[inline]
  pub fn enumerate(&self, count: u32) -> impl Iterator<Item = (u32, u32)> {
    let Strider { start, step } = *self;
    (0..count).map(move |i| (i, start + i * step))
  }
}

/// One of the seven Adam7 sub-images: its own pixel geometry, plus the
/// striders mapping its local coordinates back into the full image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SubImage {
  pub shape: Shape,
  pub strider_x: Strider,
  pub strider_y: Strider,
}

/// Whether pixel data is stored as a single raster or as seven interleaved
/// Adam7 sub-images.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum InterlacingLayout {
  None,
  Adam7([SubImage; 7]),
}
impl InterlacingLayout {
  /// Builds the Adam7 sub-image table for a given format and full image size.
  ///
  /// Pass geometry: reduced dimensions per the PNG Adam7 table, and the
  /// strider pair that maps a pass-local pixel back to its position in the
  /// full raster.
  #[must_use]
  pub fn adam7(format: Format, (w, h): (u32, u32)) -> Self {
    const fn ceil_div(n: u32, d: u32) -> u32 {
      n / d + if n % d != 0 { 1 } else { 0 }
    }
    let sizes: [(u32, u32); 7] = [
      (ceil_div(w, 8), ceil_div(h, 8)),
      (ceil_div(w.saturating_sub(4), 8), ceil_div(h, 8)),
      (ceil_div(w, 4), ceil_div(h.saturating_sub(4), 8)),
      (ceil_div(w.saturating_sub(2), 4), ceil_div(h, 4)),
      (ceil_div(w, 2), ceil_div(h.saturating_sub(2), 4)),
      (ceil_div(w.saturating_sub(1), 2), ceil_div(h, 2)),
      (w, ceil_div(h.saturating_sub(1), 2)),
    ];
    // `ceil_div` of a subtraction that could have gone negative is handled by
    // `saturating_sub`, which reproduces the PNG Adam7 pass-size table's
    // `(w+k)>>3`-style shifts exactly for all non-negative widths/heights.
    let striders_x: [Strider; 7] = [
      Strider { start: 0, step: 8 },
      Strider { start: 4, step: 8 },
      Strider { start: 0, step: 4 },
      Strider { start: 2, step: 4 },
      Strider { start: 0, step: 2 },
      Strider { start: 1, step: 2 },
      Strider { start: 0, step: 1 },
    ];
    let striders_y: [Strider; 7] = [
      Strider { start: 0, step: 8 },
      Strider { start: 0, step: 8 },
      Strider { start: 4, step: 8 },
      Strider { start: 0, step: 4 },
      Strider { start: 2, step: 4 },
      Strider { start: 0, step: 2 },
      Strider { start: 1, step: 2 },
    ];
    let mut subimages: [SubImage; 7] = [SubImage {
      shape: Shape { pitch: 0, size: (0, 0) },
      strider_x: Strider { start: 0, step: 1 },
      strider_y: Strider { start: 0, step: 1 },
    }; 7];
    let mut i = 0;
    while i < 7 {
      subimages[i] = SubImage {
        shape: Shape::new(format, sizes[i]),
        strider_x: striders_x[i],
        strider_y: striders_y[i],
      };
      i += 1;
    }
    Self::Adam7(subimages)
  }

  /// Exclusive byte ranges partitioning a concatenated pass buffer:
  /// `ranges[i] = [acc, acc + subimage[i].bytes)`.
  ///
  /// Returns all-empty ranges at offset 0 for [`InterlacingLayout::None`].
  #[must_use]
  pub fn byte_ranges(&self) -> [Range<usize>; 7] {
    let subimages = match self {
      Self::None => return core::array::from_fn(|_| 0..0),
      Self::Adam7(s) => s,
    };
    let mut ranges: [Range<usize>; 7] = core::array::from_fn(|_| 0..0);
    let mut acc = 0usize;
    for (i, sub) in subimages.iter().enumerate() {
      let bytes = sub.shape.bytes();
      ranges[i] = acc..(acc + bytes);
      acc += bytes;
    }
    ranges
  }

  /// Total bytes across all seven passes (the upper bound of the last byte
  /// range). Zero for [`InterlacingLayout::None`].
  #[must_use]
  pub fn total_bytes(&self) -> usize {
    self.byte_ranges().last().map(|r| r.end).unwrap_or(0)
  }

  /// One pitch value per scanline, in pass order, skipping empty passes.
  ///
  /// This is the interface scanline-filter code (outside this crate) uses to
  /// know how many bytes separate consecutive filter lines.
  pub fn pitches_iterator(&self) -> impl Iterator<Item = usize> + '_ {
    let subimages: &[SubImage] = match self {
      Self::None => &[],
      Self::Adam7(s) => s,
    };
    subimages.iter().filter(|sub| sub.shape.size.0 != 0 && sub.shape.size.1 != 0).flat_map(
      |sub| core::iter::repeat(sub.shape.pitch).take(sub.shape.size.1 as usize),
    )
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use alloc::vec;

  #[test]
  fn test_adam7_sub_image_sizes_and_total_bytes_rgb8_8x8() {
    let layout = InterlacingLayout::adam7(Format::RGB8, (8, 8));
    let subs = match layout {
      InterlacingLayout::Adam7(s) => s,
      _ => unreachable!(),
    };
    let expected_sizes = [(1, 1), (1, 1), (2, 1), (2, 2), (4, 2), (4, 4), (8, 4)];
    for (sub, expected) in subs.iter().zip(expected_sizes) {
      assert_eq!(sub.shape.size, expected);
    }
    let total: usize = subs.iter().map(|s| s.shape.bytes()).sum();
    assert_eq!(total, 8 * 8 * 3);
  }

  #[test]
  fn test_adam7_passes_partition_every_pixel_exactly_once() {
    for (w, h) in [(1u32, 1u32), (7, 7), (8, 8), (9, 13), (17, 5)] {
      let layout = InterlacingLayout::adam7(Format::Y8, (w, h));
      let subs = match layout {
        InterlacingLayout::Adam7(s) => s,
        _ => unreachable!(),
      };
      let mut covered = alloc::vec![false; (w as usize) * (h as usize)];
      for sub in subs.iter() {
        for (_, dy) in sub.strider_y.enumerate(sub.shape.size.1) {
          for (_, dx) in sub.strider_x.enumerate(sub.shape.size.0) {
            let idx = (dy as usize) * (w as usize) + (dx as usize);
            assert!(!covered[idx], "pixel ({dx},{dy}) covered twice");
            covered[idx] = true;
          }
        }
      }
      assert!(covered.iter().all(|&c| c), "not every pixel covered for ({w},{h})");
    }
  }
}
