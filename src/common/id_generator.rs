// src/common/id_generator.rs
//! Crockford Base32 ID Generator
//!
//! Generates human-readable, prefixed IDs for catalog-style rows (users,
//! exercises, plan exercise entries). Workout plans and logs use UUIDs.
//! Format: PREFIX_XXXXXX (e.g., E_K7NP3X for exercises)

use rand::Rng;
use uuid::Uuid;

/// Crockford Base32 alphabet (excludes I, L, O, U to avoid confusion)
const CROCKFORD_ALPHABET: &[u8; 32] = b"0123456789ABCDEFGHJKMNPQRSTVWXYZ";

/// Entity type prefixes for ID generation
#[derive(Debug, Clone, Copy)]
pub enum EntityPrefix {
    /// User account (U_)
    User,
    /// Shared exercise catalog entry (E_)
    Exercise,
    /// Exercise entry inside a workout plan (PE_)
    PlanExercise,
}

impl EntityPrefix {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityPrefix::User => "U",
            EntityPrefix::Exercise => "E",
            EntityPrefix::PlanExercise => "PE",
        }
    }
}

fn generate_crockford_string(length: usize) -> String {
    let mut rng = rand::thread_rng();
    (0..length)
        .map(|_| {
            let idx = rng.gen_range(0..32);
            CROCKFORD_ALPHABET[idx] as char
        })
        .collect()
}

/// Generate a prefixed ID using Crockford Base32 encoding
pub fn generate_id(prefix: EntityPrefix) -> String {
    format!("{}_{}", prefix.as_str(), generate_crockford_string(6))
}

pub fn generate_user_id() -> String {
    generate_id(EntityPrefix::User)
}

pub fn generate_exercise_id() -> String {
    generate_id(EntityPrefix::Exercise)
}

pub fn generate_plan_exercise_id() -> String {
    generate_id(EntityPrefix::PlanExercise)
}

/// Workout plans and logs are keyed by UUID v4
pub fn generate_record_uuid() -> String {
    Uuid::new_v4().to_string()
}

/// Normalizes a path id to the canonical hyphenated UUID form, or `None` if it is not one
pub fn parse_record_uuid(raw: &str) -> Option<String> {
    Uuid::parse_str(raw).ok().map(|u| u.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_generate_id_format() {
        let exercise_id = generate_exercise_id();
        assert!(exercise_id.starts_with("E_"));
        assert_eq!(exercise_id.len(), 8);

        let entry_id = generate_plan_exercise_id();
        assert!(entry_id.starts_with("PE_"));
        assert_eq!(entry_id.len(), 9);
    }

    #[test]
    fn test_crockford_alphabet_only() {
        let id = generate_user_id();
        for c in id[2..].chars() {
            assert!(
                CROCKFORD_ALPHABET.contains(&(c as u8)),
                "Character '{}' not in Crockford alphabet",
                c
            );
        }
    }

    #[test]
    fn test_uniqueness() {
        let mut ids = HashSet::new();
        for _ in 0..1000 {
            assert!(ids.insert(generate_exercise_id()), "Duplicate ID generated");
        }
    }

    #[test]
    fn test_record_uuid_roundtrip_normalizes_case() {
        let id = generate_record_uuid();
        assert_eq!(parse_record_uuid(&id), Some(id.clone()));
        assert_eq!(parse_record_uuid(&id.to_uppercase()), Some(id));
        assert_eq!(parse_record_uuid("not-a-uuid"), None);
    }
}
