use crate::{ChunkTag, Format};

/// Bitset over the 18 named [`ChunkTag`] variants. `ChunkTag::Private` tags
/// are never tracked here: unknown/private tags fall through without
/// placement or duplication constraints.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct SeenSet(u32);
impl SeenSet {
  const fn index(tag: ChunkTag) -> Option<u32> {
    Some(match tag {
      ChunkTag::IHDR => 0,
      ChunkTag::PLTE => 1,
      ChunkTag::IDAT => 2,
      ChunkTag::IEND => 3,
      ChunkTag::cHRM => 4,
      ChunkTag::gAMA => 5,
      ChunkTag::iCCP => 6,
      ChunkTag::sBIT => 7,
      ChunkTag::sRGB => 8,
      ChunkTag::bKGD => 9,
      ChunkTag::hIST => 10,
      ChunkTag::tRNS => 11,
      ChunkTag::pHYs => 12,
      ChunkTag::sPLT => 13,
      ChunkTag::tIME => 14,
      ChunkTag::iTXt => 15,
      ChunkTag::tEXt => 16,
      ChunkTag::zTXt => 17,
      ChunkTag::Private(_) => return None,
    })
  }

  fn contains(self, tag: ChunkTag) -> bool {
    match Self::index(tag) {
      Some(i) => (self.0 & (1 << i)) != 0,
      None => false,
    }
  }

  fn insert(&mut self, tag: ChunkTag) {
    if let Some(i) = Self::index(tag) {
      self.0 |= 1 << i;
    }
  }
}

/// Errors the chunk-ordering grammar can reject a pushed tag with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum OrderingError {
  /// A non-`IHDR` chunk arrived before `IHDR`, or the header was never
  /// seen at all.
  MissingHeader,
  /// A chunk arrived after `IEND` was accepted.
  PrematureIEND,
  /// The chunk is forbidden outright for the stream's pixel format.
  IllegalChunk(ChunkTag),
  /// The chunk appears in a position forbidden by the placement rules.
  MisplacedChunk(ChunkTag),
  /// A non-repeatable chunk type was seen twice.
  DuplicateChunk(ChunkTag),
  /// The first `IDAT` of an indexed-color stream arrived without a
  /// preceding `PLTE`.
  MissingPalette,
}

/// A finite-state validator for the order PNG chunk type tags may appear
/// in. Feed it tags in stream order via [`push`](Self::push); it tells you
/// whether the stream so far is still well-formed.
///
/// Construct with [`OrderingValidator::new`]. There is no teardown: once you
/// stop pushing you simply drop the value.
#[derive(Debug, Clone, Copy, Default)]
pub struct OrderingValidator {
  last_valid: Option<ChunkTag>,
  seen: SeenSet,
  format: Option<Format>,
}
impl OrderingValidator {
  #[inline]
  #[must_use]
  pub fn new() -> Self {
    Self { last_valid: None, seen: SeenSet::default(), format: None }
  }

  /// The pixel format derived from `IHDR`, once it's been supplied via
  /// [`set_format`](Self::set_format). `None` before the header is seen.
  #[inline]
  #[must_use]
  pub fn format(&self) -> Option<Format> {
    self.format
  }

  /// Tells the validator the pixel format carried by an `IHDR` chunk that
  /// was just accepted by [`push`](Self::push).
  ///
  /// Format extraction from the `IHDR` chunk's bytes is external to this
  /// validator (see the crate's scope notes); this is the hook the framer
  /// uses to hand the derived value over.
  #[inline]
  pub fn set_format(&mut self, format: Format) {
    self.format = Some(format);
  }

  /// Feeds the next chunk type tag in stream order.
  ///
  /// Returns `Ok(())` on accept. On rejection, the validator's state is
  /// *not* advanced: the offending tag is not added to the seen-set and
  /// `last_valid` is unchanged, so a caller that decides to abandon the
  /// stream can inspect the validator's prior state.
  pub fn push(&mut self, tag: ChunkTag) -> Result<(), OrderingError> {
    // The stream must open with IHDR.
    if self.last_valid.is_none() && tag != ChunkTag::IHDR {
      crate::trace!("rejecting {tag:?}: stream does not open with IHDR");
      return Err(OrderingError::MissingHeader);
    }

    // Once IEND has been accepted, nothing else may push. A naive reading
    // of some PNG encoders' behavior might treat a second IEND specially
    // when no IDAT was ever seen, but that's a degenerate stream to begin
    // with; reject unconditionally instead of carving out that case.
    if self.last_valid == Some(ChunkTag::IEND) {
      crate::trace!("rejecting {tag:?}: already past IEND");
      return Err(OrderingError::PrematureIEND);
    }

    if tag == ChunkTag::IHDR {
      if self.seen.contains(ChunkTag::IHDR) {
        crate::trace!("rejecting duplicate IHDR");
        return Err(OrderingError::DuplicateChunk(tag));
      }
      self.last_valid = Some(tag);
      self.seen.insert(tag);
      return Ok(());
    }

    // By now IHDR must have been seen and its format told to us.
    let format = match self.format {
      Some(format) => format,
      None => {
        crate::trace!("rejecting {tag:?}: IHDR accepted but format never set");
        return Err(OrderingError::MissingHeader);
      }
    };

    // tRNS is illegal once the format already carries its own alpha channel.
    if tag == ChunkTag::tRNS && format.has_alpha() {
      crate::trace!("rejecting tRNS: format already carries alpha");
      return Err(OrderingError::IllegalChunk(tag));
    }

    // PLTE only makes sense for color formats, and must precede bKGD/hIST/tRNS.
    if tag == ChunkTag::PLTE {
      if !format.has_color() {
        crate::trace!("rejecting PLTE: format has no color");
        return Err(OrderingError::IllegalChunk(tag));
      }
      if self.seen.contains(ChunkTag::bKGD)
        || self.seen.contains(ChunkTag::hIST)
        || self.seen.contains(ChunkTag::tRNS)
      {
        crate::trace!("rejecting PLTE: must precede bKGD/hIST/tRNS");
        return Err(OrderingError::MisplacedChunk(tag));
      }
    }

    // Cumulative placement-by-class, driven by the chunk attribute table
    // (see ChunkTag::attrs): some chunks must precede PLTE, some must
    // precede IDAT, some may never repeat.
    let attrs = tag.attrs();
    if attrs.requires_before_plte && self.seen.contains(ChunkTag::PLTE) {
      crate::trace!("rejecting {tag:?}: must precede PLTE");
      return Err(OrderingError::MisplacedChunk(tag));
    }
    if attrs.requires_before_idat && self.seen.contains(ChunkTag::IDAT) {
      crate::trace!("rejecting {tag:?}: must precede IDAT");
      return Err(OrderingError::MisplacedChunk(tag));
    }
    if attrs.non_repeatable && self.seen.contains(tag) {
      crate::trace!("rejecting {tag:?}: non-repeatable, already seen");
      return Err(OrderingError::DuplicateChunk(tag));
    }

    // IDAT blocks must be consecutive; the first IDAT of an indexed stream
    // requires a preceding PLTE.
    if tag == ChunkTag::IDAT {
      if self.last_valid != Some(ChunkTag::IDAT) && self.seen.contains(ChunkTag::IDAT) {
        crate::trace!("rejecting IDAT: blocks must be consecutive");
        return Err(OrderingError::MisplacedChunk(tag));
      }
      if format.is_indexed() && !self.seen.contains(ChunkTag::IDAT) && !self.seen.contains(ChunkTag::PLTE)
      {
        crate::trace!("rejecting first IDAT: indexed format with no PLTE");
        return Err(OrderingError::MissingPalette);
      }
    }

    // Unknown/private tags (and anything else not named above) fall through
    // with no further constraints; `attrs()` already gave them all-false
    // flags.

    self.last_valid = Some(tag);
    self.seen.insert(tag);
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::Format;

  fn accept_ihdr(v: &mut OrderingValidator, format: Format) {
    v.push(ChunkTag::IHDR).unwrap();
    v.set_format(format);
  }

  #[test]
  fn test_minimal_idhr_idat_iend_stream_accepted() {
    let mut v = OrderingValidator::new();
    accept_ihdr(&mut v, Format::Y8);
    assert!(v.push(ChunkTag::IDAT).is_ok());
    assert!(v.push(ChunkTag::IEND).is_ok());
  }

  #[test]
  fn test_plte_requires_color_format() {
    let mut v = OrderingValidator::new();
    accept_ihdr(&mut v, Format::RGB8);
    assert!(v.push(ChunkTag::PLTE).is_ok());
    assert!(v.push(ChunkTag::IDAT).is_ok());
    assert!(v.push(ChunkTag::IEND).is_ok());

    let mut v2 = OrderingValidator::new();
    accept_ihdr(&mut v2, Format::Y8);
    assert_eq!(v2.push(ChunkTag::PLTE), Err(OrderingError::IllegalChunk(ChunkTag::PLTE)));
  }

  #[test]
  fn test_plte_after_idat_is_misplaced() {
    let mut v = OrderingValidator::new();
    accept_ihdr(&mut v, Format::RGB8);
    v.push(ChunkTag::IDAT).unwrap();
    assert_eq!(v.push(ChunkTag::PLTE), Err(OrderingError::MisplacedChunk(ChunkTag::PLTE)));
  }

  #[test]
  fn test_idat_blocks_must_be_consecutive() {
    let mut v = OrderingValidator::new();
    accept_ihdr(&mut v, Format::Y8);
    v.push(ChunkTag::IDAT).unwrap();
    v.push(ChunkTag::IDAT).unwrap();
    v.push(ChunkTag::tEXt).unwrap();
    assert_eq!(v.push(ChunkTag::IDAT), Err(OrderingError::MisplacedChunk(ChunkTag::IDAT)));
  }

  #[test]
  fn test_missing_header() {
    let mut v = OrderingValidator::new();
    assert_eq!(v.push(ChunkTag::IDAT), Err(OrderingError::MissingHeader));
  }

  #[test]
  fn test_missing_palette_for_indexed() {
    let mut v = OrderingValidator::new();
    accept_ihdr(&mut v, Format::I8);
    assert_eq!(v.push(ChunkTag::IDAT), Err(OrderingError::MissingPalette));
  }

  #[test]
  fn test_trns_illegal_with_alpha() {
    let mut v = OrderingValidator::new();
    accept_ihdr(&mut v, Format::RGBA8);
    assert_eq!(v.push(ChunkTag::tRNS), Err(OrderingError::IllegalChunk(ChunkTag::tRNS)));
  }

  #[test]
  fn test_strict_post_iend_rejects_everything() {
    let mut v = OrderingValidator::new();
    accept_ihdr(&mut v, Format::Y8);
    v.push(ChunkTag::IEND).unwrap();
    // Even a second IEND, with no IDAT ever seen, is rejected — no
    // exceptions for degenerate streams.
    assert_eq!(v.push(ChunkTag::IEND), Err(OrderingError::PrematureIEND));
  }

  #[test]
  fn test_rejected_push_does_not_advance_state() {
    let mut v = OrderingValidator::new();
    accept_ihdr(&mut v, Format::Y8);
    v.push(ChunkTag::IDAT).unwrap();
    let before = v;
    assert!(v.push(ChunkTag::PLTE).is_err());
    assert_eq!(v.last_valid, before.last_valid);
    assert_eq!(v.seen, before.seen);
  }

  #[test]
  fn test_duplicate_ancillary_chunk() {
    let mut v = OrderingValidator::new();
    accept_ihdr(&mut v, Format::RGB8);
    v.push(ChunkTag::gAMA).unwrap();
    assert_eq!(v.push(ChunkTag::gAMA), Err(OrderingError::DuplicateChunk(ChunkTag::gAMA)));
  }

  #[test]
  fn test_private_chunk_falls_through() {
    let mut v = OrderingValidator::new();
    accept_ihdr(&mut v, Format::Y8);
    let tag = ChunkTag::from(*b"zzAp");
    v.push(tag).unwrap();
    // repeatable: pushing it again is fine, unknown chunks aren't tracked.
    v.push(tag).unwrap();
    v.push(ChunkTag::IDAT).unwrap();
    v.push(ChunkTag::IEND).unwrap();
  }
}
