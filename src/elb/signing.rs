//! AWS Signature Version 4 request signing.
//!
//! # Responsibilities
//! - Build the canonical query string and canonical request
//! - Derive the per-day signing key
//! - Produce the `Authorization` header value
//!
//! # Design Decisions
//! - Only the pieces the Query API needs: GET requests with empty payloads
//! - Timestamp is an input so signatures are reproducible in tests

use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use sha2::{Digest, Sha256};

use crate::config::connection::Credentials;
use crate::elb::types::RemoteFetchError;

type HmacSha256 = Hmac<Sha256>;

const ALGORITHM: &str = "AWS4-HMAC-SHA256";

/// Hex SHA-256 of an empty body.
pub const EMPTY_PAYLOAD_SHA256: &str =
    "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855";

/// Scope of a signature: who signs, for which region/service, and when.
#[derive(Debug, Clone, Copy)]
pub struct SigningParams<'a> {
    pub credentials: &'a Credentials,
    pub region: &'a str,
    pub service: &'a str,
    pub timestamp: DateTime<Utc>,
}

impl SigningParams<'_> {
    /// `X-Amz-Date` header value, e.g. `20150830T123600Z`.
    pub fn amz_date(&self) -> String {
        self.timestamp.format("%Y%m%dT%H%M%SZ").to_string()
    }

    fn date_stamp(&self) -> String {
        self.timestamp.format("%Y%m%d").to_string()
    }

    fn credential_scope(&self) -> String {
        format!(
            "{}/{}/{}/aws4_request",
            self.date_stamp(),
            self.region,
            self.service
        )
    }
}

/// Percent-encode and sort query parameters into canonical form.
pub fn canonical_query(params: &[(&str, &str)]) -> String {
    let mut encoded: Vec<(String, String)> = params
        .iter()
        .map(|(k, v)| (urlencoding::encode(k).into_owned(), urlencoding::encode(v).into_owned()))
        .collect();
    encoded.sort();

    encoded
        .iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect::<Vec<_>>()
        .join("&")
}

/// Canonical request text for `method path?query` with the given headers.
///
/// Header names are lowercased, values trimmed with inner whitespace
/// collapsed. Returns the canonical request and the signed-headers list.
pub fn canonical_request(
    method: &str,
    path: &str,
    query: &str,
    headers: &[(&str, &str)],
    payload_hash: &str,
) -> (String, String) {
    let mut normalized: Vec<(String, String)> = headers
        .iter()
        .map(|(name, value)| {
            let value = value.split_whitespace().collect::<Vec<_>>().join(" ");
            (name.to_ascii_lowercase(), value)
        })
        .collect();
    normalized.sort_by(|a, b| a.0.cmp(&b.0));

    let mut canonical = String::new();
    canonical.push_str(method);
    canonical.push('\n');
    canonical.push_str(if path.is_empty() { "/" } else { path });
    canonical.push('\n');
    canonical.push_str(query);
    canonical.push('\n');

    for (name, value) in &normalized {
        canonical.push_str(name);
        canonical.push(':');
        canonical.push_str(value);
        canonical.push('\n');
    }
    canonical.push('\n');

    let signed_headers = normalized
        .iter()
        .map(|(name, _)| name.as_str())
        .collect::<Vec<_>>()
        .join(";");
    canonical.push_str(&signed_headers);
    canonical.push('\n');
    canonical.push_str(payload_hash);

    (canonical, signed_headers)
}

fn hmac(key: &[u8], data: &str) -> Result<Vec<u8>, RemoteFetchError> {
    let mut mac = HmacSha256::new_from_slice(key)
        .map_err(|e| RemoteFetchError::Signing(format!("Invalid HMAC key: {}", e)))?;
    mac.update(data.as_bytes());
    Ok(mac.finalize().into_bytes().to_vec())
}

/// Derive the signing key for one day, region and service.
pub fn signing_key(
    secret_key: &str,
    date_stamp: &str,
    region: &str,
    service: &str,
) -> Result<Vec<u8>, RemoteFetchError> {
    let k_date = hmac(format!("AWS4{}", secret_key).as_bytes(), date_stamp)?;
    let k_region = hmac(&k_date, region)?;
    let k_service = hmac(&k_region, service)?;
    hmac(&k_service, "aws4_request")
}

/// Compute the `Authorization` header for a request.
///
/// `headers` must include every header that will be sent and signed,
/// `host` and `x-amz-date` at minimum.
pub fn authorization(
    params: &SigningParams<'_>,
    method: &str,
    path: &str,
    query: &str,
    headers: &[(&str, &str)],
    payload_hash: &str,
) -> Result<String, RemoteFetchError> {
    let (canonical, signed_headers) = canonical_request(method, path, query, headers, payload_hash);
    let scope = params.credential_scope();

    let string_to_sign = format!(
        "{}\n{}\n{}\n{}",
        ALGORITHM,
        params.amz_date(),
        scope,
        hex::encode(Sha256::digest(canonical.as_bytes()))
    );

    let key = signing_key(
        &params.credentials.secret_key,
        &params.date_stamp(),
        params.region,
        params.service,
    )?;
    let signature = hex::encode(hmac(&key, &string_to_sign)?);

    Ok(format!(
        "{} Credential={}/{}, SignedHeaders={}, Signature={}",
        ALGORITHM, params.credentials.access_key, scope, signed_headers, signature
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn example_credentials() -> Credentials {
        Credentials {
            access_key: "AKIDEXAMPLE".to_string(),
            secret_key: "wJalrXUtnFEMI/K7MDENG+bPxRfiCYEXAMPLEKEY".to_string(),
            session_token: None,
        }
    }

    #[test]
    fn test_signing_key_matches_published_derivation() {
        let key = signing_key(
            "wJalrXUtnFEMI/K7MDENG+bPxRfiCYEXAMPLEKEY",
            "20120215",
            "us-east-1",
            "iam",
        )
        .unwrap();
        assert_eq!(
            hex::encode(key),
            "f4780e2d9f65fa895f9c67b32ce1baf0b0d8a43505a000a1a9e090d414db404d"
        );
    }

    #[test]
    fn test_authorization_matches_published_example() {
        let credentials = example_credentials();
        let params = SigningParams {
            credentials: &credentials,
            region: "us-east-1",
            service: "iam",
            timestamp: Utc.with_ymd_and_hms(2015, 8, 30, 12, 36, 0).unwrap(),
        };
        let query = canonical_query(&[("Version", "2010-05-08"), ("Action", "ListUsers")]);
        assert_eq!(query, "Action=ListUsers&Version=2010-05-08");

        let amz_date = params.amz_date();
        let auth = authorization(
            &params,
            "GET",
            "/",
            &query,
            &[
                ("Host", "iam.amazonaws.com"),
                ("Content-Type", "application/x-www-form-urlencoded; charset=utf-8"),
                ("X-Amz-Date", amz_date.as_str()),
            ],
            EMPTY_PAYLOAD_SHA256,
        )
        .unwrap();

        assert_eq!(
            auth,
            "AWS4-HMAC-SHA256 Credential=AKIDEXAMPLE/20150830/us-east-1/iam/aws4_request, \
             SignedHeaders=content-type;host;x-amz-date, \
             Signature=5d672d79c15b13162d9279b0855cfba6789a8edb4c82c400e06b5924a6f2b5d7"
        );
    }

    #[test]
    fn test_canonical_query_encodes_reserved_characters() {
        let query = canonical_query(&[("LoadBalancerName", "my elb/1"), ("Action", "A~b")]);
        assert_eq!(query, "Action=A~b&LoadBalancerName=my%20elb%2F1");
    }

    #[test]
    fn test_canonical_request_normalizes_headers() {
        let (canonical, signed) = canonical_request(
            "GET",
            "",
            "Action=X",
            &[("X-Amz-Date", "20240101T000000Z"), ("Host", "  example.com  ")],
            EMPTY_PAYLOAD_SHA256,
        );
        assert_eq!(signed, "host;x-amz-date");
        assert!(canonical.starts_with("GET\n/\nAction=X\nhost:example.com\n"));
        assert!(canonical.ends_with(EMPTY_PAYLOAD_SHA256));
    }
}
