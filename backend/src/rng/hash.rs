//! Operand hashing for the deterministic draw path
//!
//! A deterministic draw is a pure function of the seed parameters and the
//! raw bits of the operands, so the same operation on the same values always
//! rounds the same way, whatever ran before it.

/// Raw bit patterns of the 1–3 operands of one arithmetic call
///
/// `tag` identifies the operator and width so that, for example, `a + b` and
/// `a * b` do not share a draw. Double operands contribute their 64 raw bits;
/// float operands are left-aligned in the word (see
/// [`Real::pack_word`](crate::rounding::Real::pack_word)).
///
/// # Example
/// ```
/// use stochastic_fp_core::rng::OperandPack;
///
/// let pack = OperandPack::new(7, &[0.1f64.to_bits(), 0.2f64.to_bits()]);
/// assert_eq!(pack.len(), 2);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OperandPack {
    tag: u64,
    words: [u64; 3],
    len: usize,
}

impl OperandPack {
    /// Build a pack from an operator tag and up to three operand words
    ///
    /// # Panics
    /// Panics if `words` is empty or holds more than three operands
    pub fn new(tag: u64, words: &[u64]) -> Self {
        assert!(
            (1..=3).contains(&words.len()),
            "operand pack holds 1 to 3 operands"
        );
        let mut packed = [0u64; 3];
        packed[..words.len()].copy_from_slice(words);
        Self {
            tag,
            words: packed,
            len: words.len(),
        }
    }

    pub fn tag(&self) -> u64 {
        self.tag
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn words(&self) -> &[u64] {
        &self.words[..self.len]
    }
}

/// Dietzfelbinger multiply-shift hash
///
/// `h = (b ^ tag) + a1*x1 + a2*x2 + a3*x3` in wrapping 64-bit arithmetic,
/// where `params = [b, a1, a2, a3]`. The useful bits are at the top.
pub(crate) fn multiply_shift(params: &[u64; 4], pack: &OperandPack) -> u64 {
    pack.words()
        .iter()
        .zip(&params[1..])
        .fold(params[0] ^ pack.tag(), |h, (&x, &a)| {
            h.wrapping_add(a.wrapping_mul(x))
        })
}

/// Mixing hash: odd-multiplier scramble of each operand fed through the
/// splitmix64 finalizer
pub(crate) fn mixing_hash(params: &[u64; 4], pack: &OperandPack) -> u64 {
    let seed = splitmix_finalize(params[0] ^ pack.tag());
    pack.words()
        .iter()
        .zip(&params[1..])
        .fold(seed, |h, (&x, &a)| splitmix_finalize(h ^ a.wrapping_mul(x)))
}

#[inline]
fn splitmix_finalize(mut z: u64) -> u64 {
    z = z.wrapping_add(0x9e37_79b9_7f4a_7c15);
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    z ^ (z >> 31)
}
