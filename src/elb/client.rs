//! Query API client for `DescribeInstanceHealth`.
//!
//! # Responsibilities
//! - Build and sign the request for one load balancer
//! - Enforce connect/request timeouts
//! - Decode the XML snapshot or the API error document

use chrono::{DateTime, Utc};
use url::Url;

use crate::config::connection::{ConnectionSettings, Credentials};
use crate::elb::response::{into_observed, out_of_service, parse_error, parse_instance_states};
use crate::elb::signing::{self, SigningParams, EMPTY_PAYLOAD_SHA256};
use crate::elb::types::{RemoteFetchError, TimeoutPhase};
use crate::elb::HealthSource;
use crate::health::ObservedHealth;

/// Signing name of the classic load-balancer service.
pub const SERVICE: &str = "elasticloadbalancing";
/// Query API version.
pub const API_VERSION: &str = "2012-06-01";

/// A prepared, signed request.
#[derive(Debug, Clone)]
pub struct SignedRequest {
    pub url: Url,
    pub headers: Vec<(&'static str, String)>,
}

/// Connection to the load-balancer control plane of one region.
#[derive(Debug, Clone)]
pub struct ElbClient {
    http: reqwest::Client,
    endpoint: Url,
    region: String,
    credentials: Credentials,
    connect_timeout_secs: u64,
    request_timeout_secs: u64,
}

impl ElbClient {
    /// Create a client from resolved connection settings.
    pub fn new(settings: ConnectionSettings) -> Result<Self, RemoteFetchError> {
        if settings.endpoint.host_str().is_none() {
            return Err(RemoteFetchError::InvalidEndpoint(settings.endpoint.to_string()));
        }

        let http = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .danger_accept_invalid_certs(!settings.validate_certs)
            .user_agent(concat!("elb-healthcheck/", env!("CARGO_PKG_VERSION")))
            .build()?;

        tracing::debug!(
            endpoint = %settings.endpoint,
            region = %settings.region,
            "Load balancer client initialized"
        );

        Ok(Self {
            http,
            endpoint: settings.endpoint,
            region: settings.region,
            credentials: settings.credentials,
            connect_timeout_secs: settings.connect_timeout.as_secs(),
            request_timeout_secs: settings.request_timeout.as_secs(),
        })
    }

    /// Build the signed `DescribeInstanceHealth` request as of `now`.
    pub fn describe_instance_health_request(
        &self,
        load_balancer: &str,
        now: DateTime<Utc>,
    ) -> Result<SignedRequest, RemoteFetchError> {
        let query = signing::canonical_query(&[
            ("Action", "DescribeInstanceHealth"),
            ("LoadBalancerName", load_balancer),
            ("Version", API_VERSION),
        ]);

        let mut url = self.endpoint.clone();
        url.set_query(Some(&query));

        let host = host_header(&url)?;
        let params = SigningParams {
            credentials: &self.credentials,
            region: &self.region,
            service: SERVICE,
            timestamp: now,
        };
        let amz_date = params.amz_date();

        let mut signed: Vec<(&str, &str)> = vec![("host", host.as_str()), ("x-amz-date", amz_date.as_str())];
        if let Some(token) = &self.credentials.session_token {
            signed.push(("x-amz-security-token", token.as_str()));
        }
        let authorization = signing::authorization(
            &params,
            "GET",
            url.path(),
            &query,
            &signed,
            EMPTY_PAYLOAD_SHA256,
        )?;

        let mut headers = vec![("x-amz-date", amz_date.clone()), ("authorization", authorization)];
        if let Some(token) = &self.credentials.session_token {
            headers.push(("x-amz-security-token", token.clone()));
        }

        Ok(SignedRequest { url, headers })
    }

    fn map_transport(&self, err: reqwest::Error) -> RemoteFetchError {
        if err.is_timeout() {
            // A connect timeout reports both is_connect and is_timeout.
            self.timeout(err.is_connect())
        } else {
            RemoteFetchError::Transport(err)
        }
    }

    fn timeout(&self, during_connect: bool) -> RemoteFetchError {
        if during_connect {
            RemoteFetchError::Timeout {
                phase: TimeoutPhase::Connect,
                secs: self.connect_timeout_secs,
            }
        } else {
            RemoteFetchError::Timeout {
                phase: TimeoutPhase::Request,
                secs: self.request_timeout_secs,
            }
        }
    }
}

/// `Host` header value as reqwest will send it.
fn host_header(url: &Url) -> Result<String, RemoteFetchError> {
    let host = url
        .host_str()
        .ok_or_else(|| RemoteFetchError::InvalidEndpoint(url.to_string()))?;
    Ok(match url.port() {
        Some(port) => format!("{}:{}", host, port),
        None => host.to_string(),
    })
}

impl HealthSource for ElbClient {
    async fn fetch_health(&self, load_balancer: &str) -> Result<ObservedHealth, RemoteFetchError> {
        let request = self.describe_instance_health_request(load_balancer, Utc::now())?;

        tracing::debug!(
            load_balancer = %load_balancer,
            endpoint = %self.endpoint,
            "Fetching instance health"
        );

        let mut builder = self.http.get(request.url);
        for (name, value) in request.headers {
            builder = builder.header(name, value);
        }

        let response = builder.send().await.map_err(|e| self.map_transport(e))?;
        let status = response.status();
        let body = response.text().await.map_err(|e| self.map_transport(e))?;

        if !status.is_success() {
            let err = parse_error(status.as_u16(), &body);
            tracing::warn!(
                load_balancer = %load_balancer,
                status = status.as_u16(),
                code = err.api_code().unwrap_or("unknown"),
                "DescribeInstanceHealth failed"
            );
            return Err(err);
        }

        let members = parse_instance_states(&body)?;
        for member in out_of_service(&members) {
            tracing::warn!(
                load_balancer = %load_balancer,
                instance_id = %member.instance_id,
                state = %member.state,
                reason_code = member.reason_code.as_deref().unwrap_or("N/A"),
                description = member.description.as_deref().unwrap_or(""),
                "Instance not in service"
            );
        }

        let observed = into_observed(members);
        tracing::info!(
            load_balancer = %load_balancer,
            instances = observed.len(),
            "Instance health fetched"
        );
        Ok(observed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::time::Duration;

    fn settings(endpoint: &str, session_token: Option<&str>) -> ConnectionSettings {
        ConnectionSettings {
            region: "eu-west-1".to_string(),
            endpoint: Url::parse(endpoint).unwrap(),
            credentials: Credentials {
                access_key: "AKIDEXAMPLE".to_string(),
                secret_key: "secret".to_string(),
                session_token: session_token.map(str::to_string),
            },
            connect_timeout: Duration::from_secs(1),
            request_timeout: Duration::from_secs(2),
            validate_certs: true,
        }
    }

    #[test]
    fn test_request_carries_query_and_signature() {
        let client = ElbClient::new(settings("https://elb.example.com", None)).unwrap();
        let now = Utc.with_ymd_and_hms(2024, 3, 1, 8, 0, 0).unwrap();
        let request = client.describe_instance_health_request("my-elb", now).unwrap();

        assert_eq!(
            request.url.as_str(),
            "https://elb.example.com/?Action=DescribeInstanceHealth&LoadBalancerName=my-elb&Version=2012-06-01"
        );
        let auth = &request.headers.iter().find(|(n, _)| *n == "authorization").unwrap().1;
        assert!(auth.starts_with(
            "AWS4-HMAC-SHA256 Credential=AKIDEXAMPLE/20240301/eu-west-1/elasticloadbalancing/aws4_request, SignedHeaders=host;x-amz-date, Signature="
        ));
        assert!(request.headers.contains(&("x-amz-date", "20240301T080000Z".to_string())));
    }

    #[test]
    fn test_session_token_is_signed_and_sent() {
        let client = ElbClient::new(settings("http://127.0.0.1:4566", Some("tok"))).unwrap();
        let now = Utc.with_ymd_and_hms(2024, 3, 1, 8, 0, 0).unwrap();
        let request = client.describe_instance_health_request("my-elb", now).unwrap();

        let auth = &request.headers.iter().find(|(n, _)| *n == "authorization").unwrap().1;
        assert!(auth.contains("SignedHeaders=host;x-amz-date;x-amz-security-token"));
        assert!(request.headers.contains(&("x-amz-security-token", "tok".to_string())));
    }

    #[test]
    fn test_host_header_keeps_explicit_port() {
        assert_eq!(host_header(&Url::parse("http://127.0.0.1:4566/").unwrap()).unwrap(), "127.0.0.1:4566");
        assert_eq!(host_header(&Url::parse("https://elb.example.com:443/").unwrap()).unwrap(), "elb.example.com");
    }

    #[test]
    fn test_timeout_reports_the_phase_that_fired() {
        let client = ElbClient::new(settings("http://127.0.0.1:4566", None)).unwrap();
        assert!(matches!(
            client.timeout(true),
            RemoteFetchError::Timeout { phase: TimeoutPhase::Connect, secs: 1 }
        ));
        assert!(matches!(
            client.timeout(false),
            RemoteFetchError::Timeout { phase: TimeoutPhase::Request, secs: 2 }
        ));
    }
}
