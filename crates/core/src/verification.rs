//! One-time codes and password reset tokens.

use rand::distr::Alphanumeric;
use rand::Rng;

/// Lifetime of an email verification code.
pub const OTP_TTL_MINS: i64 = 5;

/// Lifetime of a password reset link.
pub const RESET_TOKEN_TTL_MINS: i64 = 10;

const RESET_TOKEN_LENGTH: usize = 40;

/// A zero-padded 6-digit numeric code.
pub fn generate_otp() -> String {
    let code: u32 = rand::rng().random_range(0..1_000_000);
    format!("{code:06}")
}

/// A random URL-safe token sent to the user; only its hash is stored.
pub fn generate_reset_token() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(RESET_TOKEN_LENGTH)
        .map(char::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn otp_is_six_digits() {
        for _ in 0..100 {
            let otp = generate_otp();
            assert_eq!(otp.len(), 6);
            assert!(otp.chars().all(|c| c.is_ascii_digit()));
        }
    }

    #[test]
    fn reset_tokens_are_unique() {
        let a = generate_reset_token();
        let b = generate_reset_token();
        assert_eq!(a.len(), RESET_TOKEN_LENGTH);
        assert_ne!(a, b);
    }
}
