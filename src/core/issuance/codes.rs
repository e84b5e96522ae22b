//! Fixed-width unique code generation
//!
//! A code of width `d` is an integer in `[10^(d-1), 10^d - 1]`, so it always
//! prints with exactly `d` digits. For `d == 1` that range is `[1, 9]`.
//! Codes are unique within one call only.

use crate::domain::{Result, TombolaError};
use rand::seq::index;
use rand::Rng;
use std::collections::HashSet;

/// Smallest supported digit width
pub const MIN_DIGITS: u32 = 1;

/// Largest supported digit width
pub const MAX_DIGITS: u32 = 16;

/// A validated code digit width
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CodeWidth(u32);

impl CodeWidth {
    /// Validates a digit count
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` unless `1 <= digit_count <= 16`.
    pub fn new(digit_count: i64) -> Result<Self> {
        if digit_count < i64::from(MIN_DIGITS) || digit_count > i64::from(MAX_DIGITS) {
            return Err(TombolaError::InvalidArgument(format!(
                "digitCount must be between {MIN_DIGITS} and {MAX_DIGITS}, got {digit_count}"
            )));
        }
        Ok(Self(digit_count as u32))
    }

    /// Number of digits
    pub fn digits(&self) -> u32 {
        self.0
    }

    /// Smallest code of this width
    pub fn lower(&self) -> u64 {
        10u64.pow(self.0 - 1)
    }

    /// Largest code of this width
    pub fn upper(&self) -> u64 {
        10u64.pow(self.0) - 1
    }

    /// How many distinct codes this width can address
    pub fn range_size(&self) -> u64 {
        self.upper() - self.lower() + 1
    }

    /// Returns true if `code` has exactly this many digits
    pub fn contains(&self, code: u64) -> bool {
        (self.lower()..=self.upper()).contains(&code)
    }

    /// Fails with `RangeExhausted` when `count` codes cannot fit
    pub fn check_capacity(&self, count: u64) -> Result<()> {
        let available = self.range_size();
        if count > available {
            return Err(TombolaError::RangeExhausted {
                digit_count: self.0,
                requested: count,
                available,
            });
        }
        Ok(())
    }
}

impl std::fmt::Display for CodeWidth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} digits", self.0)
    }
}

/// Generates `count` distinct codes of the given width using the thread RNG
///
/// # Errors
///
/// Returns `RangeExhausted` before sampling if `count` exceeds the range.
pub fn generate_codes(width: CodeWidth, count: usize) -> Result<Vec<u64>> {
    generate_codes_with_rng(&mut rand::thread_rng(), width, count)
}

/// Generates `count` distinct codes of the given width
///
/// Output order is sampling order, not numeric order.
///
/// # Errors
///
/// Returns `RangeExhausted` before sampling if `count` exceeds the range.
pub fn generate_codes_with_rng<R: Rng + ?Sized>(
    rng: &mut R,
    width: CodeWidth,
    count: usize,
) -> Result<Vec<u64>> {
    width.check_capacity(count as u64)?;
    if count == 0 {
        return Ok(Vec::new());
    }

    let lower = width.lower();
    let range = width.range_size();

    if (count as u64).saturating_mul(2) <= range {
        // Sparse: collisions are rare, so redraw until the set is full
        let mut seen = HashSet::with_capacity(count);
        let mut codes = Vec::with_capacity(count);
        while codes.len() < count {
            let code = rng.gen_range(lower..=width.upper());
            if seen.insert(code) {
                codes.push(code);
            }
        }
        return Ok(codes);
    }

    // Dense: range < 2 * count, so sampling offsets without replacement is
    // bounded by the request size
    let range = usize::try_from(range).map_err(|_| {
        TombolaError::InvalidArgument(format!("code range for {width} exceeds platform size"))
    })?;
    Ok(index::sample(rng, range, count)
        .into_iter()
        .map(|offset| lower + offset as u64)
        .collect())
}
