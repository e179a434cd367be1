//! Random payload generation.
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Character set payloads are drawn from: alphanumerics plus `;` and `'`,
/// picked to exercise unescaped-input paths.
pub const PAYLOAD_ALPHABET: &[u8] =
    b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789;'";

/// Upper bound (inclusive) on generated payload length.
pub const MAX_PAYLOAD_LEN: usize = 1000;

/// Produces random strings for injection. The RNG is injected so tests can
/// seed it; production runs seed once per run from OS entropy.
pub struct PayloadGenerator<R: Rng> {
    rng: R,
}

impl PayloadGenerator<StdRng> {
    #[must_use]
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }
}

impl<R: Rng> PayloadGenerator<R> {
    pub const fn with_rng(rng: R) -> Self {
        Self { rng }
    }

    /// Picks a payload length uniformly in `[1, max]`.
    pub fn random_len(&mut self, max: usize) -> usize {
        self.rng.gen_range(1..=max.max(1))
    }

    /// Generates exactly `len` characters, each independently uniform over
    /// [`PAYLOAD_ALPHABET`].
    pub fn generate(&mut self, len: usize) -> String {
        let mut payload = String::with_capacity(len);
        for _ in 0..len {
            let idx = self.rng.gen_range(0..PAYLOAD_ALPHABET.len());
            payload.push(char::from(PAYLOAD_ALPHABET[idx]));
        }
        payload
    }
}
