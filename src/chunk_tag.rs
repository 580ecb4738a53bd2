#![allow(non_camel_case_types)]

use crate::AsciiArray;

/// The closed set of four-ASCII-byte PNG chunk type tags this crate knows
/// placement rules for, plus a catch-all for any other tag.
///
/// This is a *wire-level* tag set. The validator's pre-stream state ("we
/// haven't seen any chunk yet") is represented separately as
/// `Option<ChunkTag>` rather than as an extra enumerant here, so this type
/// only ever holds values that can actually appear on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ChunkTag {
  IHDR,
  PLTE,
  IDAT,
  IEND,
  cHRM,
  gAMA,
  iCCP,
  sBIT,
  sRGB,
  bKGD,
  hIST,
  tRNS,
  pHYs,
  sPLT,
  tIME,
  iTXt,
  tEXt,
  zTXt,
  /// Any unknown, private, or otherwise unrecognized chunk type tag.
  Private(AsciiArray<4>),
}
impl ChunkTag {
  /// Attribute table driving [`crate::OrderingValidator`]'s placement rules:
  /// which chunks must precede PLTE, which must precede IDAT, which may
  /// only appear once, which require a color format, and which are
  /// forbidden once the format already carries alpha.
  #[must_use]
  pub(crate) const fn attrs(self) -> ChunkAttrs {
    use ChunkAttrs as A;
    match self {
      Self::cHRM | Self::gAMA | Self::iCCP | Self::sBIT | Self::sRGB => A {
        requires_before_plte: true,
        requires_before_idat: true,
        non_repeatable: false,
        requires_color: false,
        forbidden_when_alpha: false,
      },
      Self::PLTE => A {
        requires_before_plte: false,
        requires_before_idat: true,
        non_repeatable: true,
        requires_color: true,
        forbidden_when_alpha: false,
      },
      Self::bKGD | Self::hIST | Self::pHYs | Self::sPLT => A {
        requires_before_plte: false,
        requires_before_idat: true,
        non_repeatable: false,
        requires_color: false,
        forbidden_when_alpha: false,
      },
      Self::tRNS => A {
        requires_before_plte: false,
        requires_before_idat: true,
        non_repeatable: false,
        requires_color: false,
        forbidden_when_alpha: true,
      },
      Self::IHDR | Self::tIME => A {
        requires_before_plte: false,
        requires_before_idat: false,
        non_repeatable: true,
        requires_color: false,
        forbidden_when_alpha: false,
      },
      Self::IDAT | Self::IEND | Self::iTXt | Self::tEXt | Self::zTXt | Self::Private(_) => A {
        requires_before_plte: false,
        requires_before_idat: false,
        non_repeatable: false,
        requires_color: false,
        forbidden_when_alpha: false,
      },
    }
  }
}
impl From<[u8; 4]> for ChunkTag {
  fn from(bytes: [u8; 4]) -> Self {
    match &bytes {
      b"IHDR" => Self::IHDR,
      b"PLTE" => Self::PLTE,
      b"IDAT" => Self::IDAT,
      b"IEND" => Self::IEND,
      b"cHRM" => Self::cHRM,
      b"gAMA" => Self::gAMA,
      b"iCCP" => Self::iCCP,
      b"sBIT" => Self::sBIT,
      b"sRGB" => Self::sRGB,
      b"bKGD" => Self::bKGD,
      b"hIST" => Self::hIST,
      b"tRNS" => Self::tRNS,
      b"pHYs" => Self::pHYs,
      b"sPLT" => Self::sPLT,
      b"tIME" => Self::tIME,
      b"iTXt" => Self::iTXt,
      b"tEXt" => Self::tEXt,
      b"zTXt" => Self::zTXt,
      _ => Self::Private(AsciiArray(bytes)),
    }
  }
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct ChunkAttrs {
  pub requires_before_plte: bool,
  pub requires_before_idat: bool,
  pub non_repeatable: bool,
  pub requires_color: bool,
  pub forbidden_when_alpha: bool,
}
