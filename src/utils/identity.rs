use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use tracing::debug;

use crate::types::{error::AppError, identity::IdentityClaims};

/// Verifies session tokens issued by the identity provider.
///
/// Only RS256 is accepted; a token signed with anything else is rejected
/// even when its signature would otherwise check out.
#[derive(Clone)]
pub struct IdentityVerifier {
    key: DecodingKey,
    validation: Validation,
}

impl std::fmt::Debug for IdentityVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IdentityVerifier").finish_non_exhaustive()
    }
}

impl IdentityVerifier {
    pub fn from_rsa_pem(pem: &str) -> Result<Self, jsonwebtoken::errors::Error> {
        let key = DecodingKey::from_rsa_pem(pem.as_bytes())?;

        let mut validation = Validation::new(Algorithm::RS256);
        validation.validate_aud = false;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Ok(Self { key, validation })
    }

    /// Returns the external identity id (`sub`) of a valid token.
    pub fn verify(&self, token: &str) -> Result<String, AppError> {
        let data = decode::<IdentityClaims>(token, &self.key, &self.validation).map_err(|e| {
            debug!(error = %e, "identity token rejected");
            AppError::InvalidToken
        })?;

        if data.claims.sub.is_empty() {
            return Err(AppError::InvalidToken);
        }
        Ok(data.claims.sub)
    }
}
