//! Protocol generation — the human-readable tracking code handed to the
//! citizen at intake.
//!
//! Format: `OUV-<year>-<6 chars of [A-Z0-9]>`. Uniqueness is probabilistic
//! only (36^6 ≈ 2.2e9 combinations); no collision check is made against the
//! store. The store's UNIQUE constraint turns the rare collision into a
//! persistence error rather than silent corruption.

use chrono::{Datelike, Utc};
use rand_core::{OsRng, RngCore};

const CHARSET: &[u8; 36] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
const SUFFIX_LEN: usize = 6;

/// Generate a fresh tracking code. Non-blocking, side-effect-free, never
/// fails.
pub fn generate_protocol() -> String {
  let year = Utc::now().year();
  let mut suffix = String::with_capacity(SUFFIX_LEN);

  // Rejection-sample so each character is drawn uniformly from the 36-char
  // alphabet. 252 is the largest multiple of 36 that fits in a byte.
  let mut buf = [0u8; 16];
  while suffix.len() < SUFFIX_LEN {
    OsRng.fill_bytes(&mut buf);
    for &b in &buf {
      if b < 252 {
        suffix.push(CHARSET[(b % 36) as usize] as char);
        if suffix.len() == SUFFIX_LEN {
          break;
        }
      }
    }
  }

  format!("OUV-{year}-{suffix}")
}
