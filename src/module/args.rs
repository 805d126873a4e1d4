//! Host argument file parsing.

use serde::{Deserialize, Deserializer};

use crate::config::schema::CheckConfig;

/// Arguments as passed by the automation host.
///
/// Unknown keys (host bookkeeping such as `_ansible_check_mode`) are ignored.
#[derive(Clone, Default, Deserialize)]
pub struct ModuleArgs {
    /// Name of the load balancer.
    pub name: String,

    /// Instance ids, as a list or a comma-separated string.
    #[serde(default, deserialize_with = "string_or_list")]
    pub instances: Option<Vec<String>>,

    #[serde(default, alias = "aws_region", alias = "ec2_region")]
    pub region: Option<String>,

    #[serde(default, alias = "endpoint")]
    pub ec2_url: Option<String>,

    #[serde(default, alias = "ec2_access_key", alias = "access_key")]
    pub aws_access_key: Option<String>,

    #[serde(default, alias = "ec2_secret_key", alias = "secret_key")]
    pub aws_secret_key: Option<String>,

    #[serde(default, alias = "aws_security_token", alias = "session_token")]
    pub security_token: Option<String>,

    #[serde(default)]
    pub validate_certs: Option<bool>,
}

impl std::fmt::Debug for ModuleArgs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModuleArgs")
            .field("name", &self.name)
            .field("instances", &self.instances)
            .field("region", &self.region)
            .field("ec2_url", &self.ec2_url)
            .field("aws_access_key", &self.aws_access_key)
            .field("aws_secret_key", &self.aws_secret_key.as_ref().map(|_| "<redacted>"))
            .field("security_token", &self.security_token.as_ref().map(|_| "<redacted>"))
            .field("validate_certs", &self.validate_certs)
            .finish()
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StringOrList {
    One(String),
    Many(Vec<String>),
}

fn string_or_list<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<StringOrList>::deserialize(deserializer)?;
    Ok(value.map(|v| match v {
        StringOrList::One(s) => s
            .split(',')
            .map(|id| id.trim().to_string())
            .filter(|id| !id.is_empty())
            .collect(),
        StringOrList::Many(list) => list,
    }))
}

impl ModuleArgs {
    /// Overlay these arguments onto `config`; values present here win.
    pub fn apply_to(self, config: &mut CheckConfig) {
        config.load_balancer = self.name;
        if self.instances.is_some() {
            config.instances = self.instances;
        }

        let aws = &mut config.aws;
        if self.region.is_some() {
            aws.region = self.region;
        }
        if self.ec2_url.is_some() {
            aws.endpoint = self.ec2_url;
        }
        if self.aws_access_key.is_some() {
            aws.access_key = self.aws_access_key;
        }
        if self.aws_secret_key.is_some() {
            aws.secret_key = self.aws_secret_key;
        }
        if self.security_token.is_some() {
            aws.session_token = self.security_token;
        }
        if let Some(validate) = self.validate_certs {
            aws.validate_certs = validate;
        }
    }
}
