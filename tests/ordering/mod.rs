use png_core::{ChunkTag, Format, OrderingValidator};

#[test]
fn test_OrderingValidator_no_panics_on_random_tags() {
  // even totally random chunk tags should never panic the validator.
  for _ in 0..20 {
    let mut validator = OrderingValidator::new();
    validator.set_format(Format::RGBA8);
    let bytes = super::rand_bytes(4 * 64);
    for chunk in bytes.chunks_exact(4) {
      let tag = ChunkTag::from([chunk[0], chunk[1], chunk[2], chunk[3]]);
      let _ = validator.push(tag);
    }
  }
}

#[test]
fn test_minimal_and_misordered_chunk_streams_end_to_end() {
  // minimal stream
  let mut v = OrderingValidator::new();
  v.push(ChunkTag::IHDR).unwrap();
  v.set_format(Format::Y8);
  v.push(ChunkTag::IDAT).unwrap();
  v.push(ChunkTag::IEND).unwrap();

  // rgb8 with palette accepted
  let mut v = OrderingValidator::new();
  v.push(ChunkTag::IHDR).unwrap();
  v.set_format(Format::RGB8);
  v.push(ChunkTag::PLTE).unwrap();
  v.push(ChunkTag::IDAT).unwrap();
  v.push(ChunkTag::IEND).unwrap();

  // plte after idat is rejected
  let mut v = OrderingValidator::new();
  v.push(ChunkTag::IHDR).unwrap();
  v.set_format(Format::RGB8);
  v.push(ChunkTag::IDAT).unwrap();
  assert!(v.push(ChunkTag::PLTE).is_err());

  // interrupted idat block is rejected
  let mut v = OrderingValidator::new();
  v.push(ChunkTag::IHDR).unwrap();
  v.set_format(Format::Y8);
  v.push(ChunkTag::IDAT).unwrap();
  v.push(ChunkTag::IDAT).unwrap();
  v.push(ChunkTag::tEXt).unwrap();
  assert!(v.push(ChunkTag::IDAT).is_err());
}
