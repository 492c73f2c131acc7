use {
    crate::time_oracle::source::{
        ntp::{
            self,
            NtpSource,
            QueryOptions,
        },
        ServerAddress,
        TimeSource,
    },
    anyhow::Result,
    clap::{
        crate_authors,
        crate_description,
        crate_name,
        crate_version,
        Args,
        Parser,
    },
    std::{
        fs,
        net::IpAddr,
        sync::Arc,
        time::Duration,
    },
};

mod server;

// `Options` is a structup definition to provide clean command-line args for the auction server.
#[derive(Parser, Debug)]
#[command(name = crate_name!())]
#[command(author = crate_authors!())]
#[command(about = crate_description!())]
#[command(version = crate_version!())]
#[allow(clippy::large_enum_variant)]
pub enum Options {
    /// Run the auction server service.
    Run(RunOptions),
}

#[derive(Args, Clone, Debug)]
pub struct RunOptions {
    /// Server Options
    #[command(flatten)]
    pub server: server::Options,

    #[command(flatten)]
    pub config: ConfigOptions,
}

#[derive(Args, Clone, Debug)]
#[command(next_help_heading = "Config Options")]
#[group(id = "Config")]
pub struct ConfigOptions {
    /// Path to a configuration file with the time oracle and auction settings
    #[arg(long = "config")]
    #[arg(env = "OUTCRY_CONFIG")]
    #[arg(default_value = "config.yaml")]
    pub config: String,
}

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Config {
    #[serde(default)]
    pub time_oracle: TimeOracleConfig,
    #[serde(default)]
    pub auction:     AuctionConfig,
}

impl Config {
    pub fn load(path: &str) -> Result<Config> {
        // Open and read the YAML file
        let yaml_content = fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&yaml_content)?;
        Ok(config)
    }
}

fn default_time_servers() -> Vec<String> {
    vec![
        "time.google.com".to_string(),
        "time1.google.com".to_string(),
        "time2.google.com".to_string(),
        "time3.google.com".to_string(),
        "time4.google.com".to_string(),
    ]
}

fn default_query_timeout() -> Duration {
    Duration::from_secs(1)
}

fn default_ttl() -> u32 {
    ntp::DEFAULT_TTL
}

fn default_version() -> u8 {
    ntp::DEFAULT_VERSION
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TimeOracleConfig {
    /// NTP servers as `host` or `host|port`.
    #[serde(default = "default_time_servers")]
    pub servers:       Vec<String>,
    /// Timeout of a single server query.
    #[serde(default = "default_query_timeout", with = "humantime_serde")]
    pub timeout:       Duration,
    /// IP time to live of the queries.
    #[serde(default = "default_ttl")]
    pub ttl:           u32,
    /// NTP protocol version of the queries.
    #[serde(default = "default_version")]
    pub version:       u8,
    /// Local address to send queries from.
    #[serde(default)]
    pub local_address: Option<IpAddr>,
}

impl Default for TimeOracleConfig {
    fn default() -> Self {
        Self {
            servers:       default_time_servers(),
            timeout:       default_query_timeout(),
            ttl:           default_ttl(),
            version:       default_version(),
            local_address: None,
        }
    }
}

impl TimeOracleConfig {
    pub fn sources(&self) -> Result<Vec<Arc<dyn TimeSource>>> {
        let options = QueryOptions {
            ttl:           self.ttl,
            version:       self.version,
            local_address: self.local_address,
        };
        self.servers
            .iter()
            .map(|server| {
                let address: ServerAddress = server.parse()?;
                Ok(Arc::new(NtpSource::new(address, options.clone())) as Arc<dyn TimeSource>)
            })
            .collect()
    }
}

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AuctionConfig {
    /// Stores a revealed bid as invalid when its organization already has a valid bid on the auction.
    #[serde(default)]
    pub single_valid_bid_per_org: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: Config = serde_yaml::from_str("{}").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.time_oracle.servers.len(), 5);
        assert_eq!(config.time_oracle.timeout, Duration::from_secs(1));
        assert_eq!(config.time_oracle.ttl, 128);
        assert_eq!(config.time_oracle.version, 4);
        assert!(!config.auction.single_valid_bid_per_org);
    }

    #[test]
    fn test_parse_config() {
        let config: Config = serde_yaml::from_str(
            r#"
time_oracle:
  servers:
    - time.google.com
    - 127.0.0.1|10123
  timeout: 500ms
  ttl: 64
  local_address: 127.0.0.1
auction:
  single_valid_bid_per_org: true
"#,
        )
        .unwrap();
        assert_eq!(config.time_oracle.timeout, Duration::from_millis(500));
        assert_eq!(config.time_oracle.ttl, 64);
        assert_eq!(config.time_oracle.version, 4);
        assert_eq!(
            config.time_oracle.local_address,
            Some("127.0.0.1".parse().unwrap())
        );
        assert!(config.auction.single_valid_bid_per_org);

        let names: Vec<String> = config
            .time_oracle
            .sources()
            .unwrap()
            .iter()
            .map(|source| source.name())
            .collect();
        assert_eq!(names, vec!["time.google.com:123", "127.0.0.1:10123"]);
    }

    #[test]
    fn test_invalid_server_is_rejected() {
        let config = TimeOracleConfig {
            servers: vec!["time.google.com|abc".to_string()],
            ..TimeOracleConfig::default()
        };
        assert!(config.sources().is_err());
    }
}
