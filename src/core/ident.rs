//! Short letter identifiers derived from a todo's description.
//!
//! Identifiers are lookup keys, not digests: equal descriptions always map to
//! the same identifier, and distinct descriptions may collide. The store is
//! responsible for rejecting collisions.
//!
//! The description is hashed with 64-bit FNV-1a over its UTF-8 bytes, so
//! identifiers are reproducible across runs, platforms and builds. The hash is
//! then spelled out in letters by repeatedly dividing it by a growing step.

use crate::core::todo::Todo;

pub const ALPHABET: &[u8; 26] = b"abcdefghijklmnopqrstuvwxyz";

const FNV_OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// Identifier for `todo`, derived from its description only.
pub fn generate(todo: &Todo) -> String {
    generate_for(todo.description())
}

pub fn generate_for(description: &str) -> String {
    letters_from_hash(stable_hash(description))
}

/// 64-bit FNV-1a.
pub fn stable_hash(input: &str) -> u64 {
    input.bytes().fold(FNV_OFFSET_BASIS, |hash, byte| {
        (hash ^ u64::from(byte)).wrapping_mul(FNV_PRIME)
    })
}

/// Spell `hash` out as lowercase letters.
///
/// Each round emits `ALPHABET[(hash - step) mod 26]`, bumps `step` and divides
/// `hash` by it. A zero hash still yields one letter so identifiers are never
/// empty.
pub fn letters_from_hash(mut hash: u64) -> String {
    if hash == 0 {
        return char::from(ALPHABET[0]).to_string();
    }

    let mut out = String::new();
    let mut step: u64 = 1;
    while hash > 0 {
        // (hash - step) mod 26 without going negative
        let idx = (hash % 26 + 26 - step % 26) % 26;
        out.push(char::from(ALPHABET[idx as usize]));
        step += 1;
        hash /= step;
    }
    out
}
