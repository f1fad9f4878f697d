//! Hashing of resource names for indexed lookups.

use sha2::{Digest, Sha256};

/// Compute the lookup hash for a builder, master, tag, project, or
/// scheduler name.
///
/// The hash covers the exact bytes of the name, so lookups are
/// case-sensitive.
pub fn name_hash(name: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(name.as_bytes());
    let result = hasher.finalize();
    format!("{:x}", result)
}
