use crate::domain::value_objects::key_name::MAX_KEY_LEN;
use rand::RngCore;

/// Number of random bytes behind the code body (rendered as hex, two chars each).
const CODE_BYTES: usize = 8;

/// Length of the code body that follows `prefix-`.
pub const CODE_LEN: usize = CODE_BYTES * 2;

/// Longest prefix whose generated keys still fit in a key name.
pub const MAX_PREFIX_LEN: usize = MAX_KEY_LEN - 1 - CODE_LEN;

/// Generate a key in the format `<prefix>-<16 uppercase hex chars>`.
///
/// Uniqueness is not guaranteed here; the store rejects collisions on insert.
pub fn generate_key(prefix: &str) -> String {
    let mut bytes = [0u8; CODE_BYTES];
    rand::thread_rng().fill_bytes(&mut bytes);
    format!("{prefix}-{}", hex::encode_upper(bytes))
}
