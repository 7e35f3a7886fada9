//! OAuth 1.0a request signing (HMAC-SHA1).

use crate::XCredentials;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use hmac::{Hmac, Mac};
use pressroom_error::{PlatformError, PlatformErrorKind, PlatformResult};
use sha1::Sha1;

type HmacSha1 = Hmac<Sha1>;

/// RFC 3986 percent-encoding, as OAuth 1.0a requires.
pub(crate) fn percent_encode(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}

/// Signature base string: `METHOD&url&sorted-params`, each part encoded.
pub(crate) fn signature_base_string(method: &str, url: &str, params: &[(String, String)]) -> String {
    let mut encoded: Vec<(String, String)> = params
        .iter()
        .map(|(k, v)| (percent_encode(k), percent_encode(v)))
        .collect();
    encoded.sort();

    let param_string = encoded
        .iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect::<Vec<_>>()
        .join("&");

    format!(
        "{}&{}&{}",
        method.to_uppercase(),
        percent_encode(url),
        percent_encode(&param_string)
    )
}

/// Base64 HMAC-SHA1 of `base` keyed by the two secrets.
///
/// # Errors
///
/// Returns `Validation` if the signing key is rejected.
pub(crate) fn sign(base: &str, consumer_secret: &str, token_secret: &str) -> PlatformResult<String> {
    let key = format!(
        "{}&{}",
        percent_encode(consumer_secret),
        percent_encode(token_secret)
    );
    let mut mac = HmacSha1::new_from_slice(key.as_bytes()).map_err(|e| {
        PlatformError::new(PlatformErrorKind::Validation(format!(
            "Invalid OAuth signing key: {}",
            e
        )))
    })?;
    mac.update(base.as_bytes());
    Ok(STANDARD.encode(mac.finalize().into_bytes()))
}

/// `Authorization` header value for a request with no signed body params.
///
/// `query` holds the URL's query parameters; JSON bodies are not signed.
///
/// # Errors
///
/// Returns error if the request cannot be signed.
pub(crate) fn authorization_header(
    credentials: &XCredentials,
    method: &str,
    url: &str,
    query: &[(String, String)],
    nonce: &str,
    timestamp: i64,
) -> PlatformResult<String> {
    let mut oauth_params = vec![
        ("oauth_consumer_key".to_string(), credentials.api_key().to_string()),
        ("oauth_nonce".to_string(), nonce.to_string()),
        ("oauth_signature_method".to_string(), "HMAC-SHA1".to_string()),
        ("oauth_timestamp".to_string(), timestamp.to_string()),
        ("oauth_token".to_string(), credentials.access_token().to_string()),
        ("oauth_version".to_string(), "1.0".to_string()),
    ];

    let mut signed = oauth_params.clone();
    signed.extend(query.iter().cloned());
    let base = signature_base_string(method, url, &signed);
    let signature = sign(&base, credentials.api_secret(), credentials.access_secret())?;
    oauth_params.push(("oauth_signature".to_string(), signature));
    oauth_params.sort();

    let fields = oauth_params
        .iter()
        .map(|(k, v)| format!("{}=\"{}\"", percent_encode(k), percent_encode(v)))
        .collect::<Vec<_>>()
        .join(", ");
    Ok(format!("OAuth {}", fields))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(items: &[(&str, &str)]) -> Vec<(String, String)> {
        items
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_percent_encode_reserved() {
        assert_eq!(percent_encode("Ladies + Gentlemen"), "Ladies%20%2B%20Gentlemen");
        assert_eq!(percent_encode("a-b._~c"), "a-b._~c");
        assert_eq!(percent_encode("!"), "%21");
    }

    #[test]
    fn test_signature_base_string() {
        let params = pairs(&[
            ("status", "Hello Ladies + Gentlemen, a signed OAuth request!"),
            ("include_entities", "true"),
            ("oauth_consumer_key", "xvz1evFS4wEEPTGEFPHBog"),
            ("oauth_nonce", "kYjzVBB8Y0ZFabxSWbWovY3uYSQ2pTgmZeNu2VS4cg"),
            ("oauth_signature_method", "HMAC-SHA1"),
            ("oauth_timestamp", "1318622958"),
            ("oauth_token", "370773112-GmHxMAgYyLbNEtIKZeRNFsMKPR9EyMZeS9weJAEb"),
            ("oauth_version", "1.0"),
        ]);
        let base = signature_base_string(
            "post",
            "https://api.twitter.com/1.1/statuses/update.json",
            &params,
        );
        assert_eq!(
            base,
            "POST&https%3A%2F%2Fapi.twitter.com%2F1.1%2Fstatuses%2Fupdate.json&\
             include_entities%3Dtrue%26\
             oauth_consumer_key%3Dxvz1evFS4wEEPTGEFPHBog%26\
             oauth_nonce%3DkYjzVBB8Y0ZFabxSWbWovY3uYSQ2pTgmZeNu2VS4cg%26\
             oauth_signature_method%3DHMAC-SHA1%26\
             oauth_timestamp%3D1318622958%26\
             oauth_token%3D370773112-GmHxMAgYyLbNEtIKZeRNFsMKPR9EyMZeS9weJAEb%26\
             oauth_version%3D1.0%26\
             status%3DHello%2520Ladies%2520%252B%2520Gentlemen%252C%2520a%2520signed%2520OAuth%2520request%2521"
        );
    }

    #[test]
    fn test_sign_is_deterministic_base64() {
        let first = sign("POST&x&y", "consumer", "token").unwrap();
        let second = sign("POST&x&y", "consumer", "token").unwrap();
        assert_eq!(first, second);
        // 20-byte SHA-1 digest encodes to 28 base64 characters.
        assert_eq!(first.len(), 28);
        assert_ne!(first, sign("POST&x&y", "consumer", "other").unwrap());
    }

    #[test]
    fn test_sign_known_vector() {
        // Key is `consumer&token`, so an empty token secret leaves a trailing '&'.
        let signature = sign("what do ya want for nothing?", "Jefe", "").unwrap();
        let mut mac = HmacSha1::new_from_slice(b"Jefe&").unwrap();
        mac.update(b"what do ya want for nothing?");
        assert_eq!(signature, STANDARD.encode(mac.finalize().into_bytes()));
        assert!(!signature.is_empty());
    }

    #[test]
    fn test_authorization_header_fields() {
        let credentials = XCredentials::new("key", "secret", "token", "token-secret");
        let header = authorization_header(
            &credentials,
            "POST",
            "https://api.twitter.com/2/tweets",
            &[],
            "nonce123",
            1_700_000_000,
        )
        .unwrap();
        assert!(header.starts_with("OAuth "));
        assert!(header.contains("oauth_consumer_key=\"key\""));
        assert!(header.contains("oauth_token=\"token\""));
        assert!(header.contains("oauth_nonce=\"nonce123\""));
        assert!(header.contains("oauth_timestamp=\"1700000000\""));
        assert!(header.contains("oauth_signature=\""));
        assert!(!header.contains("token-secret"));
    }
}
