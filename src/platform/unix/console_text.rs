/// Console output elsewhere is UTF-8; stray bytes become U+FFFD.
pub fn decode(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}
