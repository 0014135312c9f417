#![forbid(unsafe_code)]

//! Golden-fixture text for lane kernels.
//!
//! [`format_literal`] renders one value; [`FixtureWriter`] strings values
//! together into brace-nested initializer blocks that an external codegen
//! step splices into test sources.

pub mod literal;
pub mod writer;

pub use literal::{CapacityError, format_literal, write_literal};
pub use writer::{FixtureWriter, LITERAL_CAPACITY, Position};

use sha2::{Digest, Sha256};
use std::fmt::Write as _;

/// Lowercase hex SHA-256 of rendered fixture text.
#[must_use]
pub fn fixture_digest(text: &str) -> String {
    let digest = Sha256::digest(text.as_bytes());
    let mut out = String::with_capacity(digest.len() * 2);
    for byte in digest {
        let _ = write!(&mut out, "{byte:02x}");
    }
    out
}
