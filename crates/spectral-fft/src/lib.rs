//! Fourier transforms for spectral audio processing.
//!
//! - [`radix2`] — in-place radix-2 complex FFT pair (forward/inverse) over
//!   split real/imaginary buffers, power-of-2 sizes up to 65536
//!
//! The transform is the shared analysis/synthesis core of spectral effects
//! (pitch shifting, noise suppression, vocal cancellation): the caller
//! windows a block, runs [`radix2::forward`], edits magnitudes and phases,
//! and resynthesizes with [`radix2::inverse`].

#![deny(unsafe_code)]

pub mod radix2;
