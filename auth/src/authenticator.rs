//! Signature verification and session issuance.

use salus_crypto::{decode_address, verify_signature};
use salus_store::{IdentityStore, Session, SessionStore, WalletIdentity};
use salus_types::{Signature, Timestamp, WalletAddress};

use crate::error::AuthError;
use crate::nonce::{extract_nonce, IssuedChallenge, NonceRegistry};

/// The result of a successful verification: a session plus the identity it
/// was issued to.
#[derive(Clone, Debug)]
pub struct VerifiedSession {
    pub session: Session,
    pub identity: WalletIdentity,
    /// Whether this verification created the identity.
    pub is_new_user: bool,
}

/// Converts a wallet signature over an issued challenge into a session.
///
/// Owns the nonce and session lifecycles; identities are persisted through
/// the injected [`IdentityStore`]. This is the only path that creates
/// identities.
pub struct Authenticator<I: IdentityStore, S: SessionStore> {
    nonces: NonceRegistry,
    identities: I,
    sessions: S,
    session_ttl_secs: u64,
}

impl<I: IdentityStore, S: SessionStore> Authenticator<I, S> {
    pub fn new(
        nonce_ttl_secs: u64,
        max_pending_nonces: usize,
        session_ttl_secs: u64,
        identities: I,
        sessions: S,
    ) -> Self {
        Self {
            nonces: NonceRegistry::new(nonce_ttl_secs, max_pending_nonces),
            identities,
            sessions,
            session_ttl_secs,
        }
    }

    /// Issue a challenge for `address`. Overwrites any prior unconsumed one.
    pub fn issue_challenge(
        &mut self,
        address: &WalletAddress,
        now: Timestamp,
    ) -> Result<IssuedChallenge, AuthError> {
        if decode_address(address.as_str()).is_none() {
            return Err(AuthError::InvalidAddress(address.to_string()));
        }
        self.nonces.issue(address, now)
    }

    /// Verify a signed challenge and issue a session.
    ///
    /// Order matters: the signature is checked before the nonce is touched,
    /// so a forged signature cannot burn a victim's pending challenge.
    pub fn verify(
        &mut self,
        address: &WalletAddress,
        signature: &Signature,
        message: &str,
        now: Timestamp,
    ) -> Result<VerifiedSession, AuthError> {
        let public_key = decode_address(address.as_str())
            .ok_or_else(|| AuthError::InvalidAddress(address.to_string()))?;

        if !verify_signature(message.as_bytes(), signature, &public_key) {
            tracing::debug!(%address, "signature verification failed");
            return Err(AuthError::InvalidSignature);
        }

        let nonce_hex = extract_nonce(message).ok_or(AuthError::MalformedChallenge)?;
        self.nonces.consume(address, nonce_hex, now)?;

        let (identity, is_new_user) = match self.identities.get_by_address(address)? {
            Some(identity) if identity.active => (identity, false),
            Some(_) => return Err(AuthError::IdentityDeactivated),
            None => {
                let identity = self.identities.insert(address, now)?;
                tracing::info!(%address, id = identity.id, "created wallet identity");
                (identity, true)
            }
        };

        let session = Session {
            token: hex::encode(salus_crypto::random_bytes::<32>()),
            identity_id: identity.id,
            address: address.clone(),
            issued_at: now,
            expires_at: Timestamp::new(now.as_secs().saturating_add(self.session_ttl_secs)),
        };
        self.sessions.put(session.clone())?;
        tracing::debug!(%address, is_new_user, "authentication succeeded");

        Ok(VerifiedSession {
            session,
            identity,
            is_new_user,
        })
    }

    /// Resolve a bearer token to its session, rejecting expired ones.
    pub fn resolve_session(&self, token: &str, now: Timestamp) -> Result<Session, AuthError> {
        let session = self.sessions.get(token)?.ok_or(AuthError::SessionUnknown)?;
        if session.is_expired(now) {
            return Err(AuthError::SessionExpired);
        }
        Ok(session)
    }

    /// Deactivate the identity behind an address. It keeps its profile id
    /// but can no longer authenticate.
    pub fn deactivate_identity(&mut self, address: &WalletAddress) -> Result<(), AuthError> {
        self.identities.deactivate(address)?;
        Ok(())
    }

    pub fn identity_count(&self) -> Result<u64, AuthError> {
        Ok(self.identities.identity_count()?)
    }
}
