use std::str::FromStr;

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde::Deserialize;
use taskgate_core::UserId;

#[derive(Deserialize)]
struct SubjectClaims {
    sub: Option<String>,
}

/// Reads the `sub` claim of a JWT without verifying its signature.
///
/// The claim is unverified. It is only compared against the user the
/// back-end confirms for the same token and never grants anything alone.
pub(crate) fn peek_subject(token: &str) -> Option<UserId> {
    let payload = token.split('.').nth(1)?;
    let bytes = URL_SAFE_NO_PAD
        .decode(payload.trim_end_matches('='))
        .ok()?;
    let claims: SubjectClaims = serde_json::from_slice(&bytes).ok()?;

    claims
        .sub
        .and_then(|subject| UserId::from_str(subject.as_str()).ok())
}

#[cfg(test)]
mod tests {
    use base64::Engine;
    use base64::engine::general_purpose::URL_SAFE_NO_PAD;
    use taskgate_core::UserId;

    use super::peek_subject;

    fn token_with_payload(payload: &str) -> String {
        format!(
            "{}.{}.signature",
            URL_SAFE_NO_PAD.encode(r#"{"alg":"HS256","typ":"JWT"}"#),
            URL_SAFE_NO_PAD.encode(payload)
        )
    }

    #[test]
    fn subject_claim_is_extracted() {
        let user_id = UserId::new();
        let token = token_with_payload(&format!(r#"{{"sub":"{user_id}","exp":1}}"#));
        assert_eq!(peek_subject(&token), Some(user_id));
    }

    #[test]
    fn opaque_or_malformed_tokens_yield_nothing() {
        assert_eq!(peek_subject("opaque-session-token"), None);
        assert_eq!(peek_subject("a.%%%.c"), None);
        assert_eq!(peek_subject(&token_with_payload(r#"{"sub":"alice"}"#)), None);
    }
}
