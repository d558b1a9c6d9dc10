use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use chrono::{DateTime, Duration, Utc};
use rand::RngCore;

const TOKEN_BYTES: usize = 32;
const MAX_SESSION_TTL_SECONDS: i64 = 100 * 365 * 86_400;

/// Opaque bearer token: 32 random bytes, base64url without padding.
pub fn new_session_token() -> String {
    let mut bytes = [0u8; TOKEN_BYTES];
    rand::thread_rng().fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}

/// Configured TTL, clamped to a century.
pub fn session_ttl(seconds: u64) -> Duration {
    let seconds = i64::try_from(seconds)
        .unwrap_or(MAX_SESSION_TTL_SECONDS)
        .min(MAX_SESSION_TTL_SECONDS);
    Duration::seconds(seconds)
}

pub fn expiry_from(now: DateTime<Utc>, ttl: Duration) -> DateTime<Utc> {
    now.checked_add_signed(ttl).unwrap_or(DateTime::<Utc>::MAX_UTC)
}
