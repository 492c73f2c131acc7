//! A minimal SNTP client (RFC 4330) over UDP.
use {
    super::{
        ServerAddress,
        TimeSource,
    },
    anyhow::{
        anyhow,
        bail,
        Context,
    },
    axum::async_trait,
    socket2::SockRef,
    std::net::{
        IpAddr,
        Ipv4Addr,
        Ipv6Addr,
        SocketAddr,
    },
    time::{
        Duration,
        OffsetDateTime,
    },
    tokio::net::{
        lookup_host,
        UdpSocket,
    },
};

const PACKET_LEN: usize = 48;
const MAX_PACKET_LEN: usize = 1024;
/// Seconds between the NTP epoch (1900-01-01) and the unix epoch.
const NTP_UNIX_EPOCH_DELTA: i64 = 2_208_988_800;
const NANOS_PER_SECOND: u64 = 1_000_000_000;

const MODE_CLIENT: u8 = 3;
const MODE_SERVER: u8 = 4;
const LEAP_NOT_IN_SYNC: u8 = 3;
const MAX_STRATUM: u8 = 15;
const MAX_ROOT_DISTANCE: Duration = Duration::seconds(16);

pub const DEFAULT_TTL: u32 = 128;
pub const DEFAULT_VERSION: u8 = 4;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QueryOptions {
    /// IPv4 time to live or IPv6 hop limit of the request.
    pub ttl:           u32,
    /// NTP protocol version written into the request, 2 to 4.
    pub version:       u8,
    /// Address to send the request from. Any local address when absent.
    pub local_address: Option<IpAddr>,
}

impl Default for QueryOptions {
    fn default() -> Self {
        Self {
            ttl:           DEFAULT_TTL,
            version:       DEFAULT_VERSION,
            local_address: None,
        }
    }
}

/// 32.32 fixed point seconds since the NTP epoch.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct NtpTimestamp(u64);

impl NtpTimestamp {
    fn is_zero(self) -> bool {
        self.0 == 0
    }

    fn to_datetime(self) -> anyhow::Result<OffsetDateTime> {
        let seconds = (self.0 >> 32) as i64 - NTP_UNIX_EPOCH_DELTA;
        let nanos = ((self.0 & 0xffff_ffff) * NANOS_PER_SECOND) >> 32;
        OffsetDateTime::from_unix_timestamp_nanos(
            seconds as i128 * NANOS_PER_SECOND as i128 + nanos as i128,
        )
        .map_err(|e| anyhow!("ntp timestamp out of range: {}", e))
    }
}

/// 16.16 fixed point seconds.
fn short_to_duration(value: u32) -> Duration {
    let seconds = (value >> 16) as i64;
    let nanos = ((value & 0xffff) as u64 * NANOS_PER_SECOND) >> 16;
    Duration::new(seconds, nanos as i32)
}

#[derive(Clone, Debug, PartialEq, Eq)]
struct Packet {
    leap:            u8,
    version:         u8,
    mode:            u8,
    stratum:         u8,
    root_delay:      u32,
    root_dispersion: u32,
    reference_id:    [u8; 4],
    reference_time:  NtpTimestamp,
    origin_time:     NtpTimestamp,
    receive_time:    NtpTimestamp,
    transmit_time:   NtpTimestamp,
}

impl Packet {
    /// Client request carrying `nonce` in the transmit timestamp, so the local clock is not disclosed.
    fn request(version: u8, nonce: u64) -> [u8; PACKET_LEN] {
        let mut buf = [0u8; PACKET_LEN];
        buf[0] = ((version & 0x7) << 3) | MODE_CLIENT;
        buf[40..48].copy_from_slice(&nonce.to_be_bytes());
        buf
    }

    fn decode(buf: &[u8]) -> anyhow::Result<Self> {
        if buf.len() < PACKET_LEN {
            bail!("short ntp response of {} bytes", buf.len());
        }
        let u32_at = |i: usize| u32::from_be_bytes([buf[i], buf[i + 1], buf[i + 2], buf[i + 3]]);
        let timestamp_at = |i: usize| NtpTimestamp(((u32_at(i) as u64) << 32) | u32_at(i + 4) as u64);
        Ok(Self {
            leap:            buf[0] >> 6,
            version:         (buf[0] >> 3) & 0x7,
            mode:            buf[0] & 0x7,
            stratum:         buf[1],
            root_delay:      u32_at(4),
            root_dispersion: u32_at(8),
            reference_id:    [buf[12], buf[13], buf[14], buf[15]],
            reference_time:  timestamp_at(16),
            origin_time:     timestamp_at(24),
            receive_time:    timestamp_at(32),
            transmit_time:   timestamp_at(40),
        })
    }

    /// Sanity checks the response and returns the offset of the local clock to the server's.
    fn clock_offset(
        &self,
        nonce: u64,
        sent_at: OffsetDateTime,
        received_at: OffsetDateTime,
    ) -> anyhow::Result<Duration> {
        if self.mode != MODE_SERVER {
            bail!("invalid mode {} in response", self.mode);
        }
        if self.origin_time.0 != nonce {
            bail!("response does not match the request");
        }
        if self.leap == LEAP_NOT_IN_SYNC {
            bail!("server clock is not synchronized");
        }
        if self.stratum == 0 {
            bail!(
                "kiss of death received: {}",
                String::from_utf8_lossy(&self.reference_id)
            );
        }
        if self.stratum > MAX_STRATUM {
            bail!("invalid stratum {} in response", self.stratum);
        }
        if self.transmit_time.is_zero() {
            bail!("invalid transmit time in response");
        }

        let receive_time = self.receive_time.to_datetime()?;
        let transmit_time = self.transmit_time.to_datetime()?;
        let round_trip = (received_at - sent_at) - (transmit_time - receive_time);
        if round_trip.is_negative() {
            bail!("invalid round trip time {}", round_trip);
        }
        let root_distance = round_trip / 2
            + short_to_duration(self.root_delay) / 2
            + short_to_duration(self.root_dispersion);
        if root_distance > MAX_ROOT_DISTANCE {
            bail!("root distance {} too large", root_distance);
        }
        if self.reference_time.to_datetime()? > transmit_time {
            bail!("reference time is later than transmit time");
        }

        Ok(((receive_time - sent_at) + (transmit_time - received_at)) / 2)
    }
}

/// Applies `ttl` as the IPv4 time to live or the IPv6 unicast hop limit, depending on the
/// family the socket is bound to.
fn set_hop_limit(socket: &UdpSocket, ttl: u32) -> anyhow::Result<()> {
    match socket.local_addr()? {
        SocketAddr::V4(_) => socket.set_ttl(ttl)?,
        SocketAddr::V6(_) => SockRef::from(socket).set_unicast_hops_v6(ttl)?,
    }
    Ok(())
}

#[derive(Clone, Debug)]
pub struct NtpSource {
    server:  ServerAddress,
    options: QueryOptions,
}

impl NtpSource {
    pub fn new(server: ServerAddress, options: QueryOptions) -> Self {
        Self { server, options }
    }

    async fn exchange(&self) -> anyhow::Result<Duration> {
        if !(2..=4).contains(&self.options.version) {
            bail!("invalid ntp protocol version {}", self.options.version);
        }
        let remote = lookup_host((self.server.host.as_str(), self.server.port))
            .await
            .with_context(|| format!("failed to resolve {}", self.server))?
            .next()
            .ok_or_else(|| anyhow!("{} did not resolve to any address", self.server))?;
        let local = match (self.options.local_address, remote) {
            (Some(address), _) => SocketAddr::new(address, 0),
            (None, SocketAddr::V4(_)) => SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), 0),
            (None, SocketAddr::V6(_)) => SocketAddr::new(IpAddr::V6(Ipv6Addr::UNSPECIFIED), 0),
        };

        let socket = UdpSocket::bind(local).await?;
        socket.connect(remote).await?;
        set_hop_limit(&socket, self.options.ttl)?;

        let nonce: u64 = rand::random();
        let request = Packet::request(self.options.version, nonce);
        let sent_at = OffsetDateTime::now_utc();
        socket.send(&request).await?;

        let mut buf = [0u8; MAX_PACKET_LEN];
        let len = socket.recv(&mut buf).await?;
        let received_at = OffsetDateTime::now_utc();

        Packet::decode(&buf[..len])?.clock_offset(nonce, sent_at, received_at)
    }
}

#[async_trait]
impl TimeSource for NtpSource {
    fn name(&self) -> String {
        self.server.to_string()
    }

    async fn query(&self) -> anyhow::Result<OffsetDateTime> {
        let offset = self.exchange().await?;
        Ok(OffsetDateTime::now_utc() + offset)
    }
}
