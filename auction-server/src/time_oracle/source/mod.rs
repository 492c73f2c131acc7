#[cfg(test)]
use mockall::automock;
use {
    anyhow::anyhow,
    axum::async_trait,
    std::{
        fmt,
        str::FromStr,
    },
    time::OffsetDateTime,
};

pub mod ntp;

pub const DEFAULT_NTP_PORT: u16 = 123;

/// An independent source of wall clock time.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait TimeSource: Send + Sync {
    /// Label used in logs and metrics.
    fn name(&self) -> String;
    /// Local clock corrected by the offset the source reports, in UTC.
    async fn query(&self) -> anyhow::Result<OffsetDateTime>;
}

/// A `host|port` pair. The port is optional.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServerAddress {
    pub host: String,
    pub port: u16,
}

impl FromStr for ServerAddress {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (host, port) = match s.split_once('|') {
            Some((host, port)) => (
                host,
                port.trim()
                    .parse::<u16>()
                    .map_err(|e| anyhow!("invalid port in time server {:?}: {}", s, e))?,
            ),
            None => (s, DEFAULT_NTP_PORT),
        };
        let host = host.trim();
        if host.is_empty() {
            return Err(anyhow!("time server {:?} has no host", s));
        }
        Ok(Self {
            host: host.to_string(),
            port,
        })
    }
}

impl fmt::Display for ServerAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_server_address() {
        assert_eq!(
            "time.google.com".parse::<ServerAddress>().unwrap(),
            ServerAddress {
                host: "time.google.com".to_string(),
                port: 123,
            }
        );
        assert_eq!(
            "127.0.0.1|10123".parse::<ServerAddress>().unwrap(),
            ServerAddress {
                host: "127.0.0.1".to_string(),
                port: 10123,
            }
        );
        assert!("pool.ntp.org|ntp".parse::<ServerAddress>().is_err());
        assert!("|123".parse::<ServerAddress>().is_err());
    }
}
