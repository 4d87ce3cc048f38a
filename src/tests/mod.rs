#[cfg(all(feature = "parse", feature = "secure"))]
mod eval;
