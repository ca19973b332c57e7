use rand_core::{OsRng, RngCore};

/// Bytes of entropy behind every invitation token.
pub const INVITE_TOKEN_BYTES: usize = 16;

/// Opaque single-use invitation token: 128 random bits as 32 lowercase hex chars.
pub fn new_invite_token() -> String {
    let mut buf = [0u8; INVITE_TOKEN_BYTES];
    OsRng.fill_bytes(&mut buf);
    hex::encode(buf)
}
