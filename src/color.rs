//! Color distance matching against a tolerance policy
//!
//! Two colors are considered the same when every per-channel absolute
//! difference is within the active threshold. The threshold is stricter when
//! all three channel deltas are equal (a uniform brightness shift) than when
//! they differ.

use crate::error::{Result, TransparencyError};
use image::Rgb;
use serde::{Deserialize, Serialize};

/// Default per-channel tolerance
pub const DEFAULT_TOLERANCE: u8 = 110;

/// Default tolerance applied when all channel deltas are equal
pub const DEFAULT_UNIFORM_TOLERANCE: u8 = 100;

/// Per-channel tolerances used by [`same_color`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TolerancePolicy {
    /// Threshold for deltas that differ between channels
    pub general: u8,
    /// Threshold for deltas that are equal across all channels
    pub uniform: u8,
}

impl Default for TolerancePolicy {
    fn default() -> Self {
        Self {
            general: DEFAULT_TOLERANCE,
            uniform: DEFAULT_UNIFORM_TOLERANCE,
        }
    }
}

impl TolerancePolicy {
    /// Create a policy, rejecting a uniform tolerance looser than the general one
    ///
    /// # Examples
    /// ```rust
    /// use bg_transparent::TolerancePolicy;
    ///
    /// assert!(TolerancePolicy::new(110, 100).is_ok());
    /// assert!(TolerancePolicy::new(50, 60).is_err());
    /// ```
    pub fn new(general: u8, uniform: u8) -> Result<Self> {
        let policy = Self { general, uniform };
        policy.validate()?;
        Ok(policy)
    }

    /// Check that `uniform <= general`
    pub fn validate(&self) -> Result<()> {
        if self.uniform > self.general {
            return Err(TransparencyError::config_value_error(
                "uniform tolerance",
                self.uniform,
                &format!("0-{}", self.general),
            ));
        }
        Ok(())
    }

    /// Threshold that applies to the given channel deltas
    pub fn threshold_for(&self, deltas: [u8; 3]) -> u8 {
        let [d_r, d_g, d_b] = deltas;
        if d_r == d_g && d_g == d_b {
            self.uniform
        } else {
            self.general
        }
    }

    /// Shorthand for [`same_color`] with this policy
    pub fn matches(&self, a: Rgb<u8>, b: Rgb<u8>) -> bool {
        same_color(a, b, self)
    }
}

/// Absolute per-channel differences between two colors
pub fn channel_deltas(a: Rgb<u8>, b: Rgb<u8>) -> [u8; 3] {
    let Rgb([a_r, a_g, a_b]) = a;
    let Rgb([b_r, b_g, b_b]) = b;
    [a_r.abs_diff(b_r), a_g.abs_diff(b_g), a_b.abs_diff(b_b)]
}

/// Compare two colors against a tolerance policy
///
/// Returns `true` iff every channel delta is at most the active threshold,
/// where the threshold is `policy.uniform` if all three deltas are equal and
/// `policy.general` otherwise.
///
/// # Examples
/// ```rust
/// use bg_transparent::{same_color, TolerancePolicy};
/// use image::Rgb;
///
/// let policy = TolerancePolicy::default();
/// assert!(same_color(Rgb([200, 200, 200]), Rgb([100, 100, 100]), &policy));
/// assert!(!same_color(Rgb([201, 201, 201]), Rgb([100, 100, 100]), &policy));
/// assert!(same_color(Rgb([210, 200, 200]), Rgb([100, 100, 100]), &policy));
/// ```
pub fn same_color(a: Rgb<u8>, b: Rgb<u8>, policy: &TolerancePolicy) -> bool {
    let deltas = channel_deltas(a, b);
    let threshold = policy.threshold_for(deltas);
    deltas.iter().all(|&d| d <= threshold)
}
