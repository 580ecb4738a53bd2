#![cfg_attr(not(feature = "trace"), no_std)]
#![forbid(unsafe_code)]

//! Structural core of a PNG image codec.
//!
//! * [Portable Network Graphics Specification (Second Edition)][png-spec]
//!
//! [png-spec]: https://www.w3.org/TR/2003/REC-PNG-20031110/
//!
//! ## Scope
//!
//! This crate models the bit-level geometry and stream grammar of PNG,
//! *not* the full codec pipeline:
//!
//! * [`Format`] and [`Shape`]: the pixel-format enumeration and the
//!   scanline-pitch arithmetic derived from it.
//! * [`InterlacingLayout`]: the Adam7 seven-pass sub-image geometry.
//! * [`deinterlace_into`] / [`deinterlace`]: turn interlaced, already
//!   unfiltered scanline bytes into a single rectangular raster.
//! * [`OrderingValidator`]: a finite-state grammar over the stream of
//!   chunk type tags, rejecting malformed chunk orderings before any
//!   pixel work begins.
//! * [`SuggestedPalette`]: parses and serializes the `sPLT` chunk body,
//!   as a representative variable-layout ancillary chunk.
//!
//! DEFLATE decompression, scanline filter reversal, chunk framing/CRC,
//! and color-space transforms are all out of scope: they're external
//! collaborators that feed this core already-unfiltered bytes and
//! already-framed chunk tags.
//!
//! This crate *can* run in a `no_alloc` scenario; the `alloc` feature
//! (on by default) only gates the owned/allocating convenience paths
//! (e.g. [`decompose`] returning a fixed array of rasters, and
//! [`SuggestedPalette`]'s owned entry storage).

#[cfg(feature = "alloc")]
extern crate alloc;

#[cfg(feature = "trace")]
extern crate std;

#[macro_export]
macro_rules! trace {
  ($($arg:tt)*) => {
    #[cfg(feature = "trace")] {
      ::std::print!("{file}:{line}> ", file = file!(), line = line!());
      ::std::println!($($arg)*);
    }
  }
}

mod ascii_array;
pub use ascii_array::*;

mod format;
pub use format::*;

mod shape;
pub use shape::*;

mod interlace;
pub use interlace::*;

mod properties;
pub use properties::*;

mod deinterlace;
pub use deinterlace::*;

mod chunk_tag;
pub use chunk_tag::*;

mod ordering;
pub use ordering::*;

mod splt;
pub use splt::*;
