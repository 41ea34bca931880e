/// Seeded generator behind every randomized choice in a session.
///
/// The seed string is folded into a 32-bit state with FNV-1a, then each call
/// steps xorshift32. `next_f64` divides the full 32-bit output by 2^32, so the
/// stream covers [0, 1) without modulus bias. Replaying a session with the
/// same seed reproduces the exact same plan, which is what the retry and
/// review-mistakes flows rely on.
#[derive(Clone, Debug)]
pub struct SessionRng {
    state: u32,
}

const FNV_OFFSET: u32 = 0x811c_9dc5;
const FNV_PRIME: u32 = 0x0100_0193;

// xorshift32 has a single absorbing state at zero.
const ZERO_SEED_FALLBACK: u32 = 0x9e37_79b9;

impl SessionRng {
    pub fn new(seed: &str) -> Self {
        let mut hash = FNV_OFFSET;
        for byte in seed.bytes() {
            hash ^= u32::from(byte);
            hash = hash.wrapping_mul(FNV_PRIME);
        }
        let state = if hash == 0 { ZERO_SEED_FALLBACK } else { hash };
        Self { state }
    }

    pub fn next_f64(&mut self) -> f64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.state = x;
        f64::from(x) / 4_294_967_296.0
    }

    /// Uniform index in `0..len`. `len` must be non-zero.
    pub fn pick_index(&mut self, len: usize) -> usize {
        debug_assert!(len > 0);
        let idx = (self.next_f64() * len as f64) as usize;
        idx.min(len - 1)
    }

    pub fn gen_bool(&mut self, probability: f64) -> bool {
        self.next_f64() < probability
    }

    pub fn range_f64(&mut self, lo: f64, hi: f64) -> f64 {
        lo + self.next_f64() * (hi - lo)
    }

    pub fn choose<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        if items.is_empty() {
            None
        } else {
            Some(&items[self.pick_index(items.len())])
        }
    }

    /// Fisher–Yates, iterating from the back.
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        for i in (1..items.len()).rev() {
            let j = self.pick_index(i + 1);
            items.swap(i, j);
        }
    }
}
