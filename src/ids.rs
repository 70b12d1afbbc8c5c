// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Opaque identifier generation.

use ring::rand::{SecureRandom, SystemRandom};

/// Generate an opaque hex identifier from 16 random bytes.
pub fn opaque_id() -> anyhow::Result<String> {
    let rng = SystemRandom::new();
    let mut bytes = [0u8; 16];
    rng.fill(&mut bytes)
        .map_err(|_| anyhow::anyhow!("system RNG failure"))?;
    Ok(hex::encode(bytes))
}

/// Generate a guest user identifier.
pub fn guest_id() -> anyhow::Result<String> {
    Ok(format!("guest:{}", opaque_id()?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opaque_id_length_and_uniqueness() {
        let a = opaque_id().unwrap();
        let b = opaque_id().unwrap();
        assert_eq!(a.len(), 32);
        assert_ne!(a, b);
    }

    #[test]
    fn test_guest_id_prefix() {
        let id = guest_id().unwrap();
        assert!(id.starts_with("guest:"));
    }
}
