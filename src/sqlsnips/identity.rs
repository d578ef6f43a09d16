//! # Deterministic Identifiers
//!
//! Snippets and folders have no stored id. Their id is recomputed from their
//! names every time the tree is scanned, so the same names always yield the
//! same id, in this process or any later one.
//!
//! The output is UUID-shaped (version nibble `4`, RFC 4122 variant bits) only so
//! that clients validating ids as UUIDs accept it. It is NOT random and NOT a
//! cryptographic digest: the whole id is derived from a 32-bit string hash, so
//! distinct inputs can collide. That weaker guarantee is accepted.
//!
//! ## Algorithm
//!
//! 1. Drop empty parts and join the rest with `_`.
//! 2. `h = h * 31 + codepoint` over the joined string (i32, wrapping), then abs.
//! 3. Seed an LCG with `h`: `seed = (seed * 1103515245 + 12345) mod 2^31`,
//!    16 rounds, byte `i` = `(seed >> 16) & 0xff`.
//! 4. Force version and variant bits on bytes 6 and 8.
//!
//! The constants must not change: ids already handed out to clients depend on
//! them.

use uuid::Uuid;

const LCG_MULTIPLIER: u32 = 1_103_515_245;
const LCG_INCREMENT: u32 = 12_345;
const LCG_MASK: u32 = 0x7fff_ffff;

/// Computes the identifier for an ordered list of name parts.
///
/// Empty parts are ignored. If nothing is left, a random v4 UUID is returned;
/// that path only serves degenerate input and is the one non-deterministic case.
pub fn identify<S: AsRef<str>>(parts: &[S]) -> Uuid {
    let joined = parts
        .iter()
        .map(|p| p.as_ref())
        .filter(|p| !p.is_empty())
        .collect::<Vec<&str>>()
        .join("_");

    if joined.is_empty() {
        return Uuid::new_v4();
    }

    let mut seed = rolling_hash(&joined) as u32;
    let mut bytes = [0u8; 16];
    for byte in bytes.iter_mut() {
        seed = seed.wrapping_mul(LCG_MULTIPLIER).wrapping_add(LCG_INCREMENT) & LCG_MASK;
        *byte = (seed >> 16) as u8;
    }

    bytes[6] = (bytes[6] & 0x0f) | 0x40;
    bytes[8] = (bytes[8] & 0x3f) | 0x80;
    Uuid::from_bytes(bytes)
}

/// Identifier of a top-level folder.
pub fn folder_id(folder_name: &str) -> Uuid {
    identify(&[folder_name])
}

/// Identifier of a snippet. Foldered snippets are keyed by the folder's id,
/// root snippets by file name alone.
pub fn snippet_id(folder_id: Option<&Uuid>, name: &str) -> Uuid {
    let file_name = format!("{}{}", name, crate::model::SNIPPET_EXT);
    match folder_id {
        Some(folder) => identify(&[folder.to_string(), file_name]),
        None => identify(&[file_name]),
    }
}

fn rolling_hash(input: &str) -> i32 {
    let hash = input
        .chars()
        .fold(0i32, |h, c| h.wrapping_mul(31).wrapping_add(c as i32));
    // i32::MIN has no positive counterpart and stays negative
    hash.wrapping_abs()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_vectors_are_stable() {
        assert_eq!(
            identify(&["reports"]).to_string(),
            "2b765f90-a0a8-403e-951c-1afbef8200f5"
        );
        assert_eq!(
            identify(&["a.sql"]).to_string(),
            "6acd8c03-4c0e-4e34-8202-00dca1e2ccd6"
        );
        assert_eq!(
            identify(&["select_all.sql"]).to_string(),
            "0e788608-f669-4abf-abaa-cfbd0be5f7e2"
        );
        assert_eq!(
            identify(&["héllo"]).to_string(),
            "fcf5c87d-5102-4a36-acb6-d3a7e0624ef1"
        );
    }

    #[test]
    fn empty_parts_are_dropped_before_joining() {
        assert_eq!(identify(&["", "a.sql", ""]), identify(&["a.sql"]));
        assert_eq!(identify(&["reports", "a.sql"]), identify(&["reports_a.sql"]));
        assert_eq!(
            identify(&["reports", "a.sql"]).to_string(),
            "fe8284cd-f28c-46fb-a2fe-2fcd16e9b1d2"
        );
    }

    #[test]
    fn case_matters() {
        assert_eq!(
            identify(&["Reports"]).to_string(),
            "36eebddf-a16c-4105-9a0b-146fcb2b3533"
        );
        assert_ne!(identify(&["Reports"]), identify(&["reports"]));
    }

    #[test]
    fn foldered_snippet_is_keyed_by_folder_id() {
        let folder = folder_id("reports");
        assert_eq!(
            snippet_id(Some(&folder), "a").to_string(),
            "46880f18-d328-4b29-be78-d346d72e74e0"
        );
        assert_eq!(snippet_id(None, "a"), identify(&["a.sql"]));
    }

    #[test]
    fn output_carries_version_and_variant_bits() {
        let id = identify(&["anything at all"]);
        assert_eq!(id.get_version_num(), 4);
        assert_eq!(id.get_variant(), uuid::Variant::RFC4122);
    }

    #[test]
    fn degenerate_input_is_random() {
        let empty: [&str; 0] = [];
        assert_ne!(identify(&empty), identify(&empty));
        assert_ne!(identify(&["", ""]), identify(&["", ""]));
    }

    #[test]
    fn hash_wraps_like_signed_32_bit() {
        assert_eq!(rolling_hash("a.sql"), 91_066_049);
        // long enough to overflow many times; must not panic
        let long = "x".repeat(10_000);
        assert!(rolling_hash(&long) >= 0 || rolling_hash(&long) == i32::MIN);
    }
}
