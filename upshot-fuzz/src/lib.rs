//! Fuzzing placeholder for upshot-core serialization
//!
//! To use with cargo-fuzz:
//! 1. Install cargo-fuzz: cargo install cargo-fuzz
//! 2. Run fuzzer: cargo fuzz run fuzz_maybe

pub fn fuzz_maybe(data: &[u8]) {
    use upshot_core::Maybe;

    // Deserializing arbitrary bytes - should never panic
    if let Ok(maybe) = serde_json::from_slice::<Maybe<String>>(data) {
        let _ = maybe.map(|s| s.len()).filter(|len| *len < 4096).unwrap_or(0);
    }
}

pub fn fuzz_upshot(data: &[u8]) {
    use upshot_core::{Success, Upshot};

    // Deserializing arbitrary bytes - should never panic
    if let Ok(outcome) = serde_json::from_slice::<Upshot<u64, String>>(data) {
        let _ = outcome
            .map(|n| n.wrapping_add(1))
            .and_then(|n| Success(n / 2))
            .unwrap_or(0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fuzz_maybe_empty() {
        fuzz_maybe(&[]);
    }

    #[test]
    fn test_fuzz_maybe_valid_json() {
        fuzz_maybe(br#"{"Present":"hello"}"#);
    }

    #[test]
    fn test_fuzz_maybe_random() {
        fuzz_maybe(&[0x12, 0x34, 0x56, 0x78]);
    }

    #[test]
    fn test_fuzz_upshot_empty() {
        fuzz_upshot(&[]);
    }

    #[test]
    fn test_fuzz_upshot_valid_json() {
        fuzz_upshot(br#"{"Success":7}"#);
    }

    #[test]
    fn test_fuzz_upshot_random() {
        fuzz_upshot(&[0xFF; 1024]);
    }
}
