//! Case codes from corner signs.
//!
//! A bit is set when its sample is negative (inside). Zero counts as
//! outside, so a surface passing exactly through a corner is attributed to
//! the solid side's edges.

use crate::constants::TRANSITION_CASE_BIT_SAMPLE;

/// 8-bit regular case. Bit `i` is corner `i`.
#[inline]
pub fn regular(samples: &[i8; 8]) -> u8 {
  let mut case = 0u8;
  for (i, &sample) in samples.iter().enumerate() {
    if sample < 0 {
      case |= 1 << i;
    }
  }
  case
}

/// 9-bit transition case over the fine samples, bit order walking the face
/// ring from sample 0 with the center sample last.
#[inline]
pub fn transition(fine: &[i8]) -> u16 {
  let mut case = 0u16;
  for (bit, &sample) in TRANSITION_CASE_BIT_SAMPLE.iter().enumerate() {
    if fine[sample] < 0 {
      case |= 1 << bit;
    }
  }
  case
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_all_positive() {
    assert_eq!(regular(&[1, 2, 3, 4, 5, 6, 7, 8]), 0);
    assert_eq!(transition(&[1; 9]), 0);
  }

  #[test]
  fn test_all_negative() {
    assert_eq!(regular(&[-1; 8]), 0xFF);
    assert_eq!(transition(&[-1; 9]), 0x1FF);
  }

  #[test]
  fn test_zero_is_outside() {
    assert_eq!(regular(&[0; 8]), 0);
    assert_eq!(transition(&[0; 9]), 0);
  }

  #[test]
  fn test_regular_bit_order() {
    assert_eq!(regular(&[-1, 1, 1, 1, 1, 1, 1, 1]), 0b0000_0001);
    assert_eq!(regular(&[1, 1, 1, 1, 1, 1, 1, -1]), 0b1000_0000);
    assert_eq!(regular(&[-1, 1, -1, 1, -1, 1, -1, 1]), 0b0101_0101);
  }

  #[test]
  fn test_transition_bit_order() {
    let mut fine = [1i8; 9];
    fine[4] = -1; // center
    assert_eq!(transition(&fine), 0b1_0000_0000);

    let mut fine = [1i8; 9];
    fine[3] = -1; // (0, 1) is the last ring sample
    assert_eq!(transition(&fine), 0b0_1000_0000);

    let mut fine = [1i8; 9];
    fine[5] = -1; // (2, 1)
    assert_eq!(transition(&fine), 0b0_0000_1000);
  }
}
