//! Unbiased room-code digit generation.
//!
//! The original server draws each digit with a scaled `rand()` and a
//! rejection loop so every value in `0..=9` is equally likely regardless
//! of `RAND_MAX`'s relationship to 10. `rand`'s `Uniform` distribution
//! gives the same guarantee directly, so this just wraps it.

use rand::distributions::{Distribution, Uniform};
use rand::Rng;

/// Draw one ASCII digit `'0'..='9'`, uniformly.
pub fn uniform_digit(rng: &mut impl Rng) -> u8 {
    let between = Uniform::from(0..10u8);
    b'0' + between.sample(rng)
}

/// Draw a 4-digit room code as an ASCII string.
pub fn room_code(rng: &mut impl Rng) -> String {
    (0..4).map(|_| uniform_digit(rng) as char).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn room_code_is_four_ascii_digits() {
        let mut rng = rand::thread_rng();
        for _ in 0..100 {
            let code = room_code(&mut rng);
            assert_eq!(code.len(), 4);
            assert!(code.chars().all(|c| c.is_ascii_digit()));
        }
    }
}
