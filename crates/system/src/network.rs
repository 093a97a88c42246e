use graph_core::{Interface, SampleError};

const FILE: &str = "net/dev";

/// Byte counters summed over every non-loopback interface in `/proc/net/dev`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NetCounters {
    pub rx_bytes: u64,
    pub tx_bytes: u64,
}

impl NetCounters {
    pub fn parse(netdev: &str) -> Result<Self, SampleError> {
        interfaces(netdev)?
            .into_iter()
            .filter(|(name, _)| name != "lo")
            .try_fold(Self::default(), |acc, (_, c)| {
                Ok(Self {
                    rx_bytes: acc.rx_bytes.saturating_add(c.rx_bytes),
                    tx_bytes: acc.tx_bytes.saturating_add(c.tx_bytes),
                })
            })
    }

    /// Counters for the interfaces `interface` selects.
    ///
    /// `Index` counts non-loopback interfaces only; `Named` may pick any,
    /// loopback included.
    pub fn select(netdev: &str, interface: &Interface) -> Result<Self, SampleError> {
        let table = interfaces(netdev)?;
        let found = match interface {
            Interface::All => return Self::parse(netdev),
            Interface::Named(name) => table.into_iter().find(|(n, _)| n == name),
            Interface::Index(i) => table.into_iter().filter(|(n, _)| n != "lo").nth(*i),
        };
        found.map(|(_, c)| c).ok_or_else(|| SampleError::NoInterface {
            name: match interface {
                Interface::Index(i) => format!("#{i}"),
                Interface::Named(name) => name.clone(),
                Interface::All => String::new(),
            },
        })
    }

    /// Bytes moved since `previous`; `None` if either counter went backwards
    /// (wrap-around or an interface disappeared).
    pub fn since(self, previous: NetCounters) -> Option<NetCounters> {
        Some(NetCounters {
            rx_bytes: self.rx_bytes.checked_sub(previous.rx_bytes)?,
            tx_bytes: self.tx_bytes.checked_sub(previous.tx_bytes)?,
        })
    }

    pub fn total(self) -> u64 {
        self.rx_bytes.saturating_add(self.tx_bytes)
    }
}

/// Per-interface counters in file order.  The two header lines are skipped.
pub fn interfaces(netdev: &str) -> Result<Vec<(String, NetCounters)>, SampleError> {
    netdev
        .lines()
        .skip(2)
        .filter(|l| !l.trim().is_empty())
        .map(|line| -> Result<(String, NetCounters), SampleError> {
            let (name, stats) = line
                .split_once(':')
                .ok_or_else(|| SampleError::malformed(FILE, format!("no interface name in '{line}'")))?;
            let fields: Vec<&str> = stats.split_whitespace().collect();
            let field = |i: usize| -> Result<u64, SampleError> {
                fields
                    .get(i)
                    .and_then(|v| v.parse::<u64>().ok())
                    .ok_or_else(|| SampleError::malformed(FILE, format!("bad column {i} for {}", name.trim())))
            };
            Ok((
                name.trim().to_string(),
                NetCounters {
                    rx_bytes: field(0)?,
                    tx_bytes: field(8)?,
                },
            ))
        })
        .collect()
}
