use png_core::SuggestedPalette;

#[test]
fn test_SuggestedPalette_parse_no_panics_on_random_bytes() {
  // even totally random chunk bodies should never panic the parser.
  for len in [0, 1, 2, 7, 16, 37, 256] {
    for _ in 0..5 {
      let v = super::rand_bytes(len);
      let _ = SuggestedPalette::parse(&v);
    }
  }
}
