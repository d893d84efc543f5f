//! Content hashing

use sha2::{Digest, Sha256};

/// SHA-256 (hex) over a sequence of optional fields.
///
/// Fields are length-prefixed so `("ab", "c")` and `("a", "bc")` differ,
/// and a missing field hashes differently from an empty one.
pub fn hash_fields<'a, I>(fields: I) -> String
where
    I: IntoIterator<Item = Option<&'a str>>,
{
    let mut hasher = Sha256::new();
    for field in fields {
        match field {
            Some(value) => {
                hasher.update([1u8]);
                hasher.update((value.len() as u64).to_be_bytes());
                hasher.update(value.as_bytes());
            }
            None => hasher.update([0u8]),
        }
    }
    hex::encode(hasher.finalize())
}
