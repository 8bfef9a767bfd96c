//! Numeric one-time codes

use rand::{Rng, rngs::OsRng};

/// Uniform random decimal code of exactly `len` digits, leading zeros kept.
///
/// Each digit is drawn independently from `0..10` with `gen_range`, which
/// rejects rather than reduces modulo, so there is no bias.
pub fn generate_numeric_code(len: usize) -> String {
    let mut rng = OsRng;
    (0..len)
        .map(|_| char::from(b'0' + rng.gen_range(0..10u8)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_length_and_digits() {
        for len in [4, 6, 8] {
            let code = generate_numeric_code(len);
            assert_eq!(code.len(), len);
            assert!(code.chars().all(|c| c.is_ascii_digit()));
        }
        assert_eq!(generate_numeric_code(0), "");
    }

    #[test]
    fn test_every_digit_appears() {
        // 6000 draws; missing a digit has probability ~1e-270
        let mut seen = [false; 10];
        for _ in 0..1000 {
            for c in generate_numeric_code(6).chars() {
                seen[c.to_digit(10).unwrap() as usize] = true;
            }
        }
        assert!(seen.iter().all(|s| *s));
    }
}
