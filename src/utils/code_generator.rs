//! Short code generation and validation utilities.
//!
//! Random candidates come from a [`CodeGenerator`], so the allocator can be
//! driven by a seeded or scripted source in tests and by the OS-seeded
//! [`RandomCodeGenerator`] in production.

use crate::domain::errors::LinkError;
use rand::distr::Alphanumeric;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use regex::Regex;
use std::sync::{LazyLock, Mutex};

/// Default length of generated codes. 62^8 is roughly 2.2e14 combinations.
pub const DEFAULT_CODE_LENGTH: usize = 8;

/// Longest code accepted, custom or generated.
pub const MAX_CODE_LENGTH: usize = 32;

/// Codes that would be shadowed by fixed routes.
pub const RESERVED_CODES: &[&str] = &["links", "health"];

static CODE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_-]+$").expect("code pattern is valid"));

/// Source of random code candidates.
///
/// Implementations are pure generators and never consult the store; the
/// allocator relies on the store's uniqueness constraint for collisions.
pub trait CodeGenerator: Send + Sync {
    /// Draws the next candidate code.
    fn generate(&self) -> String;
}

/// Uniform alphanumeric code generator backed by [`StdRng`].
///
/// The RNG sits behind a mutex because candidates are drawn from many request
/// tasks; the lock is never held across an await point.
pub struct RandomCodeGenerator {
    length: usize,
    rng: Mutex<StdRng>,
}

impl RandomCodeGenerator {
    /// Creates a generator seeded from the operating system.
    pub fn new(length: usize) -> Self {
        Self {
            length,
            rng: Mutex::new(StdRng::from_os_rng()),
        }
    }

    /// Creates a deterministic generator, for reproducible tests.
    pub fn with_seed(length: usize, seed: u64) -> Self {
        Self {
            length,
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    pub fn length(&self) -> usize {
        self.length
    }
}

impl Default for RandomCodeGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_CODE_LENGTH)
    }
}

impl CodeGenerator for RandomCodeGenerator {
    fn generate(&self) -> String {
        let mut rng = self
            .rng
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        (0..self.length)
            .map(|_| char::from(rng.sample(Alphanumeric)))
            .collect()
    }
}

/// Returns true if `code` collides with a fixed route.
pub fn is_reserved(code: &str) -> bool {
    RESERVED_CODES.contains(&code)
}

/// Validates a user-provided custom code.
///
/// # Rules
///
/// - Length: 1-32 characters
/// - Allowed characters: ASCII letters, digits, `_` and `-`
/// - Cannot be a reserved route word
///
/// # Errors
///
/// Returns [`LinkError::InvalidCode`] if any rule is violated.
///
/// # Examples
///
/// ```ignore
/// assert!(validate_code("My_Link-2024").is_ok());
/// assert!(validate_code("").is_err());
/// assert!(validate_code("has space").is_err());
/// assert!(validate_code("links").is_err());
/// ```
pub fn validate_code(code: &str) -> Result<(), LinkError> {
    if code.is_empty() || code.len() > MAX_CODE_LENGTH {
        return Err(LinkError::InvalidCode(format!(
            "code must be 1-{} characters, got {}",
            MAX_CODE_LENGTH,
            code.len()
        )));
    }

    if !CODE_REGEX.is_match(code) {
        return Err(LinkError::InvalidCode(format!(
            "code '{}' may only contain letters, digits, '_' and '-'",
            code
        )));
    }

    if is_reserved(code) {
        return Err(LinkError::InvalidCode(format!("code '{}' is reserved", code)));
    }

    Ok(())
}
