use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::collections::HashSet;
use std::time::Duration;

use crate::domain::entities::Claims;
use crate::domain::errors::TokenError;
use crate::domain::ports::TokenVerifier;

// Lifetime of tokens minted locally when no TTL is given.
pub const DEFAULT_TOKEN_TTL: Duration = Duration::from_secs(12 * 60 * 60);

/// Shared-secret JWT verifier backed by `jsonwebtoken`.
///
/// Holds the secret and the allow-list of HMAC algorithms. Verification and
/// decoding are separate calls; only [`TokenVerifier::verify`] yields claims that
/// may be trusted.
#[derive(Clone)]
pub struct JwtTokenService {
    secret: Vec<u8>,
    algorithms: Vec<Algorithm>,
}

impl JwtTokenService {
    pub fn new(secret: impl Into<Vec<u8>>, algorithms: Vec<Algorithm>) -> Self {
        Self {
            secret: secret.into(),
            algorithms,
        }
    }

    pub fn algorithms(&self) -> &[Algorithm] {
        &self.algorithms
    }

    /// Signs `claims` with the first allowed algorithm, stamping `iat` and `exp`.
    pub fn issue(
        &self,
        claims: &Claims,
        ttl: Duration,
        now_epoch_seconds: u64,
    ) -> Result<String, TokenError> {
        let algorithm = *self
            .algorithms
            .first()
            .ok_or(TokenError::DisallowedAlgorithm)?;
        let expires_at = now_epoch_seconds
            .checked_add(ttl.as_secs())
            .ok_or_else(|| TokenError::Signing("ttl out of range".to_string()))?;
        let mut claims = claims.clone();
        claims.0.insert("iat".to_string(), Value::from(now_epoch_seconds));
        claims.0.insert("exp".to_string(), Value::from(expires_at));

        jsonwebtoken::encode(
            &Header::new(algorithm),
            &claims,
            &EncodingKey::from_secret(&self.secret),
        )
        .map_err(|err| TokenError::Signing(err.to_string()))
    }
}

impl TokenVerifier for JwtTokenService {
    fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        // Reject on the declared algorithm before touching the signature.
        let header = jsonwebtoken::decode_header(token).map_err(|_| TokenError::Malformed)?;
        if !self.algorithms.contains(&header.alg) {
            return Err(TokenError::DisallowedAlgorithm);
        }

        let mut validation = Validation::new(header.alg);
        validation.algorithms = self.algorithms.clone();
        // `exp` is enforced when present but not required.
        validation.required_spec_claims = HashSet::new();
        validation.validate_exp = true;
        validation.validate_aud = false;
        validation.leeway = 0;

        let claims = jsonwebtoken::decode::<Claims>(
            token,
            &DecodingKey::from_secret(&self.secret),
            &validation,
        )
        .map(|data| data.claims)
        .map_err(|err| map_jwt_error(err.kind()))?;

        // jsonwebtoken skips the expiry check when `exp` is not numeric.
        match claims.get("exp") {
            Some(exp) if !exp.is_number() => Err(TokenError::Malformed),
            _ => Ok(claims),
        }
    }

    fn decode(&self, token: &str) -> Result<Claims, TokenError> {
        decode_unverified(token)
    }
}

/// Reads the payload without checking signature, algorithm or expiry.
///
/// Any `header.payload.signature` token whose header names an `alg` and whose
/// payload is a JSON object decodes, including unsigned `alg: none` tokens.
pub fn decode_unverified(token: &str) -> Result<Claims, TokenError> {
    let mut segments = token.split('.');
    let (Some(header), Some(payload), Some(_signature), None) = (
        segments.next(),
        segments.next(),
        segments.next(),
        segments.next(),
    ) else {
        return Err(TokenError::Malformed);
    };

    let header: Map<String, Value> = decode_segment(header)?;
    if !header.get("alg").is_some_and(Value::is_string) {
        return Err(TokenError::Malformed);
    }
    decode_segment(payload)
}

fn decode_segment<T: DeserializeOwned>(segment: &str) -> Result<T, TokenError> {
    let bytes = URL_SAFE_NO_PAD
        .decode(segment)
        .map_err(|_| TokenError::Malformed)?;
    serde_json::from_slice(&bytes).map_err(|_| TokenError::Malformed)
}

fn map_jwt_error(kind: &ErrorKind) -> TokenError {
    match kind {
        ErrorKind::InvalidSignature => TokenError::BadSignature,
        ErrorKind::ExpiredSignature => TokenError::Expired,
        ErrorKind::InvalidAlgorithm | ErrorKind::MissingAlgorithm => {
            TokenError::DisallowedAlgorithm
        }
        _ => TokenError::Malformed,
    }
}
