//! In-place radix-2 complex FFT over split real/imaginary buffers.
//!
//! Iterative Cooley-Tukey transform pair for power-of-2 sizes up to
//! [`MAX_SIZE`]: a butterfly network over `log2(N)` stages leaves the
//! coefficients in bit-reversed index order, then a permutation pass
//! restores natural order. Forward and inverse share the same network and
//! differ only in twiddle rotation direction and the inverse's final `1/N`
//! scaling.
//!
//! # Data format
//!
//! A complex sequence of length `N` is stored as two parallel `f32` buffers:
//! `reals[k]` and `imags[k]` hold the real and imaginary parts of element
//! `k`. Both transforms mutate the buffers in place:
//!
//! - [`forward`]: time-domain samples in, unscaled DFT coefficients
//!   `X[k] = Σ x[n]·exp(-2πi·k·n/N)` out, natural bin order.
//! - [`inverse`]: DFT coefficients in, reconstructed signal
//!   `x[n] = (1/N)·Σ X[k]·exp(+2πi·k·n/N)` out, natural sample order.
//!
//! The one-shot entry points build the bit-reversal index table per call;
//! [`Radix2Fft`] precomputes it once for repeated transforms of one size.
//! Both run the identical floating-point operations, so their results are
//! bit-equal on a given platform. Non-finite inputs propagate per IEEE-754
//! arithmetic; nothing panics on `NaN`.

use std::f64::consts::TAU;

/// Largest supported transform size.
///
/// The bit-reversal index table stores positions as `u16`, so sizes above
/// `2^16` are not representable.
pub const MAX_SIZE: usize = 1 << 16;

/// Returns `true` if `size` is a legal transform size: a power of two no
/// larger than [`MAX_SIZE`].
///
/// Size 1 is legal and degenerate (both transforms are the identity).
pub fn is_valid_size(size: usize) -> bool {
    size.is_power_of_two() && size <= MAX_SIZE
}

/// One-shot forward DFT in place.
///
/// The transform size is the buffer length. Builds the bit-reversal table
/// for this call only; use [`Radix2Fft`] to reuse the table across calls.
///
/// # Panics
///
/// Panics if the buffer lengths differ or are not a valid size per
/// [`is_valid_size`].
pub fn forward(reals: &mut [f32], imags: &mut [f32]) {
    assert_eq!(
        reals.len(),
        imags.len(),
        "real and imaginary buffers must have equal length"
    );
    Radix2Fft::new(reals.len()).forward(reals, imags);
}

/// One-shot inverse DFT in place, scaled by `1/N`.
///
/// # Panics
///
/// Panics if the buffer lengths differ or are not a valid size per
/// [`is_valid_size`].
pub fn inverse(reals: &mut [f32], imags: &mut [f32]) {
    assert_eq!(
        reals.len(),
        imags.len(),
        "real and imaginary buffers must have equal length"
    );
    Radix2Fft::new(reals.len()).inverse(reals, imags);
}

/// Radix-2 FFT plan for one transform size.
///
/// Holds the bit-reversal permutation table, computed once at construction,
/// so repeated transforms allocate nothing. Block-based callers (one FFT per
/// audio frame) should construct the plan outside the audio callback.
///
/// # Example
///
/// ```
/// use spectral_fft::radix2::Radix2Fft;
///
/// let fft = Radix2Fft::new(8);
/// let mut reals = [0.0_f32; 8];
/// let mut imags = [0.0_f32; 8];
/// reals[0] = 1.0;
/// fft.forward(&mut reals, &mut imags);
/// // A unit impulse has a flat spectrum.
/// assert!(reals.iter().all(|&re| (re - 1.0).abs() < 1e-6));
/// ```
#[derive(derive_more::Debug, Clone)]
pub struct Radix2Fft {
    size: usize,
    /// Bit-reversed counterpart of each index.
    #[debug(skip)]
    reversed: Vec<u16>,
}

impl Radix2Fft {
    /// Creates a plan for `size`-point transforms.
    ///
    /// # Panics
    ///
    /// Panics if `size` is not a power of two (zero included) or exceeds
    /// [`MAX_SIZE`].
    pub fn new(size: usize) -> Self {
        assert!(
            size.is_power_of_two(),
            "transform size must be a power of two, got {size}"
        );
        assert!(
            size <= MAX_SIZE,
            "transform size must be at most {MAX_SIZE}, got {size}"
        );
        tracing::trace!(size, "prepared radix-2 bit-reversal table");
        Self {
            size,
            reversed: bit_reversal_table(size),
        }
    }

    /// The configured transform size.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Forward DFT in place: `X[k] = Σ x[n]·exp(-2πi·k·n/N)`, natural order.
    ///
    /// # Panics
    ///
    /// Panics if either buffer length differs from [`size`](Self::size).
    pub fn forward(&self, reals: &mut [f32], imags: &mut [f32]) {
        assert_eq!(
            reals.len(),
            self.size,
            "real buffer length must equal the transform size {}",
            self.size
        );
        assert_eq!(
            imags.len(),
            self.size,
            "imaginary buffer length must equal the transform size {}",
            self.size
        );
        butterfly_stages(reals, imags, Rotation::Clockwise);
        permute(&self.reversed, reals, imags);
    }

    /// Inverse DFT in place: `x[n] = (1/N)·Σ X[k]·exp(+2πi·k·n/N)`, natural
    /// order. Every output sample is divided by `N` after reordering.
    ///
    /// # Panics
    ///
    /// Panics if either buffer length differs from [`size`](Self::size).
    pub fn inverse(&self, reals: &mut [f32], imags: &mut [f32]) {
        assert_eq!(
            reals.len(),
            self.size,
            "real buffer length must equal the transform size {}",
            self.size
        );
        assert_eq!(
            imags.len(),
            self.size,
            "imaginary buffer length must equal the transform size {}",
            self.size
        );
        butterfly_stages(reals, imags, Rotation::Counterclockwise);
        permute(&self.reversed, reals, imags);
        let scale = 1.0 / self.size as f32;
        for re in reals.iter_mut() {
            *re *= scale;
        }
        for im in imags.iter_mut() {
            *im *= scale;
        }
    }
}

/// Twiddle rotation direction: the only difference between the forward and
/// inverse butterfly networks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Rotation {
    /// `exp(-2πi·j/block)`, the forward transform.
    Clockwise,
    /// `exp(+2πi·j/block)`, the inverse transform.
    Counterclockwise,
}

impl Rotation {
    fn angle_sign(self) -> f64 {
        match self {
            Rotation::Clockwise => -1.0,
            Rotation::Counterclockwise => 1.0,
        }
    }
}

/// Runs the full butterfly network in place, leaving the coefficients in
/// bit-reversed index order.
///
/// Stage by stage the block length halves from `N` down to 2. Within a
/// block, element `n` in the first half pairs with `m = n + half`; the pair
/// is replaced by `(x[n] + x[m], w·(x[n] - x[m]))` with
/// `w = exp(sign·2πi·j/block)` for offset `j`. Twiddle angles are computed
/// in `f64` and rounded to `f32` coefficients once per butterfly.
fn butterfly_stages(reals: &mut [f32], imags: &mut [f32], rotation: Rotation) {
    let n = reals.len();
    let mut block = n;
    while block > 1 {
        let half = block / 2;
        let step = rotation.angle_sign() * TAU / block as f64;
        for start in (0..n).step_by(block) {
            for j in 0..half {
                let a = start + j;
                let b = a + half;
                let sum_re = reals[a] + reals[b];
                let sum_im = imags[a] + imags[b];
                let diff_re = reals[a] - reals[b];
                let diff_im = imags[a] - imags[b];
                reals[a] = sum_re;
                imags[a] = sum_im;
                if j == 0 {
                    // w = 1: pure sum and difference, every butterfly of the
                    // final stage included.
                    reals[b] = diff_re;
                    imags[b] = diff_im;
                } else {
                    let (sin, cos) = (step * j as f64).sin_cos();
                    let (w_re, w_im) = (cos as f32, sin as f32);
                    reals[b] = w_re * diff_re - w_im * diff_im;
                    imags[b] = w_re * diff_im + w_im * diff_re;
                }
            }
        }
        block = half;
    }
}

/// Builds the bit-reversal index table for `size` entries.
///
/// Grown incrementally: once the first `m` entries are correct, the next `m`
/// are those values offset by half the remaining span. Equivalent to
/// reversing the `log2(size)` low bits of each index.
fn bit_reversal_table(size: usize) -> Vec<u16> {
    let mut reversed = vec![0_u16; size];
    let mut filled = 1;
    let mut span = size;
    while filled < size {
        span /= 2;
        for j in 0..filled {
            reversed[filled + j] = reversed[j] + span as u16;
        }
        filled *= 2;
    }
    reversed
}

/// Reorders both buffers from bit-reversed to natural index order.
///
/// Positions are exchanged only when the reversed index is greater than the
/// current one, so each swap is applied exactly once.
fn permute(reversed: &[u16], reals: &mut [f32], imags: &mut [f32]) {
    for (k, &rev) in reversed.iter().enumerate() {
        let rev = usize::from(rev);
        if rev > k {
            reals.swap(k, rev);
            imags.swap(k, rev);
        }
    }
}
