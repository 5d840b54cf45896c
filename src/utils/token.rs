use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;

use crate::core::error::Error;

type HmacSha256 = Hmac<Sha256>;

/// Session lifetime in seconds. The cookie's Max-Age tracks this value.
pub(crate) const TOKEN_TTL_SECS: i64 = 7 * 24 * 60 * 60;

#[derive(Serialize)]
struct Header {
    alg: &'static str,
    typ: &'static str,
}

const HEADER: Header = Header {
    alg: "HS256",
    typ: "JWT",
};

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub(crate) struct Claims {
    pub(crate) id: i32,
    pub(crate) iat: i64,
    pub(crate) exp: i64,
    #[serde(flatten)]
    pub(crate) extra: serde_json::Map<String, serde_json::Value>,
}

/// Mints and verifies signed session tokens.
///
/// Verification is stateless: any replica holding the secret can validate any
/// token without a database round trip, at the cost of no server-side
/// revocation.
#[derive(Clone)]
pub(crate) struct TokenCodec {
    key: Vec<u8>,
}

impl std::fmt::Debug for TokenCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenCodec").finish()
    }
}

impl TokenCodec {
    pub(crate) fn new(secret: &str) -> Self {
        Self {
            key: secret.as_bytes().to_vec(),
        }
    }

    pub(crate) fn mint(&self, id: i32, now: i64) -> Result<String, Error> {
        let claims = Claims {
            id,
            iat: now,
            exp: now + TOKEN_TTL_SECS,
            extra: serde_json::Map::new(),
        };

        self.encode(&claims)
    }

    fn encode(&self, claims: &Claims) -> Result<String, Error> {
        let header = URL_SAFE_NO_PAD.encode(serde_json::to_vec(&HEADER)?);
        let body = URL_SAFE_NO_PAD.encode(serde_json::to_vec(claims)?);

        let mut mac = self.mac();
        mac.update(header.as_bytes());
        mac.update(b".");
        mac.update(body.as_bytes());
        let signature = URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes());

        Ok(format!("{}.{}.{}", header, body, signature))
    }

    /// Validates signature and expiry. Every failure collapses to `None` so
    /// that callers cannot distinguish a forged token from a missing one.
    pub(crate) fn verify(&self, token: &str, now: i64) -> Option<Claims> {
        let (header, body, signature) = split(token)?;

        let signature = URL_SAFE_NO_PAD.decode(signature).ok()?;

        let mut mac = self.mac();
        mac.update(header.as_bytes());
        mac.update(b".");
        mac.update(body.as_bytes());
        // rejects on length mismatch, compares in constant time
        mac.verify_slice(&signature).ok()?;

        let claims: Claims = serde_json::from_slice(&URL_SAFE_NO_PAD.decode(body).ok()?).ok()?;

        // a token expires exactly at its exp second
        if now >= claims.exp {
            return None;
        }

        Some(claims)
    }

    fn mac(&self) -> HmacSha256 {
        HmacSha256::new_from_slice(&self.key).expect("HMAC accepts keys of any length")
    }
}

pub(crate) fn split(token: &str) -> Option<(&str, &str, &str)> {
    let mut segments = token.split('.');

    let (header, body, signature) = (segments.next()?, segments.next()?, segments.next()?);

    if segments.next().is_some() {
        return None;
    }

    Some((header, body, signature))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn codec() -> TokenCodec {
        TokenCodec::new("test-secret")
    }

    #[test]
    fn test_round_trip() {
        let token = codec().mint(42, 1000).unwrap();

        let claims = codec().verify(&token, 1000).unwrap();

        assert_eq!(claims.id, 42);
        assert_eq!(claims.iat, 1000);
        assert_eq!(claims.exp, 1000 + TOKEN_TTL_SECS);
        assert!(claims.extra.is_empty());
    }

    #[test]
    fn test_distinct_issuance_times_produce_distinct_tokens() {
        let codec = codec();

        assert_ne!(codec.mint(42, 1000).unwrap(), codec.mint(42, 1001).unwrap());
    }

    #[test]
    fn test_expiry_boundary() {
        let token = codec().mint(42, 1000).unwrap();

        assert!(codec().verify(&token, 1000 + TOKEN_TTL_SECS - 1).is_some());
        assert!(codec().verify(&token, 1000 + TOKEN_TTL_SECS).is_none());
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let token = codec().mint(42, 1000).unwrap();

        assert!(TokenCodec::new("other-secret").verify(&token, 1000).is_none());
    }

    #[test]
    fn test_tampering_any_segment_rejected() {
        let codec = codec();
        let token = codec.mint(42, 1000).unwrap();

        // first byte of each of the three segments
        let first_dot = token.find('.').unwrap();
        let second_dot = token.rfind('.').unwrap();

        for index in [0, first_dot + 1, second_dot + 1] {
            let mut bytes = token.as_bytes().to_vec();
            bytes[index] ^= 0x01;
            let tampered = String::from_utf8(bytes).unwrap();

            assert_ne!(tampered, token);
            assert!(codec.verify(&tampered, 1000).is_none());
        }
    }

    #[test]
    fn test_malformed_tokens_rejected() {
        for token in ["", "not-a-token", "a.b", "a.b.c.d"] {
            assert!(codec().verify(token, 0).is_none());
        }
    }

    #[test]
    fn test_garbage_segments_rejected() {
        // three segments, but not base64 / not JSON
        assert!(codec().verify("!!.!!.!!", 0).is_none());
    }

    #[test]
    fn test_claims_missing_exp_rejected() {
        let codec = codec();

        let header = URL_SAFE_NO_PAD.encode(serde_json::to_vec(&HEADER).unwrap());
        let body = URL_SAFE_NO_PAD.encode(br#"{"id":42,"iat":1000}"#);
        let mut mac = codec.mac();
        mac.update(header.as_bytes());
        mac.update(b".");
        mac.update(body.as_bytes());
        let signature = URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes());

        let token = format!("{}.{}.{}", header, body, signature);

        assert!(codec.verify(&token, 1000).is_none());
    }

    #[test]
    fn test_extra_claims_survive_verification() {
        let codec = codec();
        let mut extra = serde_json::Map::new();
        extra.insert("role".to_string(), serde_json::json!("admin"));

        let token = codec
            .encode(&Claims {
                id: 7,
                iat: 1000,
                exp: 1000 + TOKEN_TTL_SECS,
                extra: extra.clone(),
            })
            .unwrap();

        let claims = codec.verify(&token, 1000).unwrap();

        assert_eq!(claims.extra, extra);
    }

    #[test]
    fn test_split() {
        assert_eq!(split("a.b.c"), Some(("a", "b", "c")));
        assert_eq!(split("a.b"), None);
        assert_eq!(split("a.b.c.d"), None);
        assert_eq!(split(""), None);
    }
}
