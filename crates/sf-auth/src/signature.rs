//! Token response signature validation.
//!
//! Salesforce signs every token response with the connected app's consumer
//! secret: `signature = base64(HMAC-SHA256(secret, id ++ issued_at))`.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::error::{Error, ErrorKind, Result};

type HmacSha256 = Hmac<Sha256>;

fn mac(identity_url: &str, issued_at: &str, client_secret: &str) -> Result<HmacSha256> {
    let mut mac = HmacSha256::new_from_slice(client_secret.as_bytes())
        .map_err(|e| Error::new(ErrorKind::Other(format!("HMAC key error: {}", e))))?;
    mac.update(identity_url.as_bytes());
    mac.update(issued_at.as_bytes());
    Ok(mac)
}

/// Compute the signature Salesforce attaches to a token response.
pub fn sign(identity_url: &str, issued_at: &str, client_secret: &str) -> Result<String> {
    let mac = mac(identity_url, issued_at, client_secret)?;
    Ok(STANDARD.encode(mac.finalize().into_bytes()))
}

/// Check a token response signature.
///
/// A missing identity URL, issue time or signature fails the same way a
/// mismatch does. The comparison runs in constant time.
pub fn verify(
    identity_url: Option<&str>,
    issued_at: Option<&str>,
    client_secret: &str,
    signature: Option<&str>,
) -> Result<()> {
    let (Some(identity_url), Some(issued_at), Some(signature)) =
        (identity_url, issued_at, signature)
    else {
        return Err(Error::new(ErrorKind::InvalidSignature));
    };

    let expected = STANDARD
        .decode(signature)
        .map_err(|e| Error::with_source(ErrorKind::InvalidSignature, e))?;

    mac(identity_url, issued_at, client_secret)?
        .verify_slice(&expected)
        .map_err(|_| Error::new(ErrorKind::InvalidSignature))
}

#[cfg(test)]
mod tests {
    use super::*;

    const ID: &str = "https://login.salesforce.com/id/00Dxx0000001gEF/005xx000001SwiU";
    const ISSUED_AT: &str = "1700000000000";

    #[test]
    fn test_sign_and_verify() {
        let signature = sign(ID, ISSUED_AT, "consumer_secret").unwrap();
        verify(Some(ID), Some(ISSUED_AT), "consumer_secret", Some(&signature)).unwrap();
    }

    #[test]
    fn test_known_vector() {
        // HMAC-SHA256(key="key", msg="The quick brown fox jumps over the lazy dog")
        let signature = sign("The quick brown fox ", "jumps over the lazy dog", "key").unwrap();
        assert_eq!(signature, "97yD9DBThCSxMpjmqm+xQ+9NWaFJRhdZl0edvC0aPNg=");
    }

    #[test]
    fn test_wrong_secret_is_rejected() {
        let signature = sign(ID, ISSUED_AT, "consumer_secret").unwrap();
        let err = verify(Some(ID), Some(ISSUED_AT), "other_secret", Some(&signature)).unwrap_err();
        assert!(matches!(err.kind, ErrorKind::InvalidSignature));
        assert_eq!(
            err.to_string(),
            "Token signature does not match. Access token is invalid."
        );
    }

    #[test]
    fn test_tampered_issued_at_is_rejected() {
        let signature = sign(ID, ISSUED_AT, "consumer_secret").unwrap();
        let err = verify(Some(ID), Some("1700000000001"), "consumer_secret", Some(&signature))
            .unwrap_err();
        assert!(matches!(err.kind, ErrorKind::InvalidSignature));
    }

    #[test]
    fn test_missing_parts_are_rejected() {
        let signature = sign(ID, ISSUED_AT, "s").unwrap();
        for (id, issued, sig) in [
            (None, Some(ISSUED_AT), Some(signature.as_str())),
            (Some(ID), None, Some(signature.as_str())),
            (Some(ID), Some(ISSUED_AT), None),
        ] {
            let err = verify(id, issued, "s", sig).unwrap_err();
            assert!(matches!(err.kind, ErrorKind::InvalidSignature));
        }
    }

    #[test]
    fn test_garbage_signature_is_rejected() {
        let err = verify(Some(ID), Some(ISSUED_AT), "s", Some("not base64!")).unwrap_err();
        assert!(matches!(err.kind, ErrorKind::InvalidSignature));
    }
}
