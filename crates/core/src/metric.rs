use std::borrow::Cow;
use std::fmt;

/// Which interfaces a network metric covers.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Interface {
    /// Sum over every non-loopback interface.
    All,
    /// The n-th non-loopback interface in `/proc/net/dev` order.
    Index(usize),
    /// An interface by name, e.g. `eth0`.
    Named(String),
}

/// Traffic direction of a network metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Direction {
    /// Receive + transmit.
    Both,
    Rx,
    Tx,
}

impl Direction {
    /// How many directions the metric adds up; scales the bandwidth maximum.
    pub fn lanes(self) -> f64 {
        match self {
            Direction::Both => 2.0,
            Direction::Rx | Direction::Tx => 1.0,
        }
    }
}

/// A network throughput metric.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NetMetric {
    pub interface: Interface,
    pub direction: Direction,
}

/// A resource kind the sampler knows how to read.
///
/// Format strings refer to metrics by their [`Display`](fmt::Display) name,
/// resolved with [`Metric::from_name`].
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Metric {
    /// Aggregate CPU busy time over the last interval.
    Cpu,
    /// Used fraction of physical memory.
    Mem,
    /// Used fraction of swap space.
    Swap,
    /// 1-minute load average per CPU.
    Load1,
    /// 5-minute load average per CPU.
    Load5,
    /// 15-minute load average per CPU.
    Load15,
    /// Network throughput, for all interfaces or a single one.
    Net(NetMetric),
}

impl Metric {
    pub const NET: Metric = Metric::net(Direction::Both);
    pub const NET_RX: Metric = Metric::net(Direction::Rx);
    pub const NET_TX: Metric = Metric::net(Direction::Tx);

    /// Every metric that does not depend on an interface name.
    pub const ALL: [Metric; 9] = [
        Metric::Cpu,
        Metric::Mem,
        Metric::Swap,
        Metric::Load1,
        Metric::Load5,
        Metric::Load15,
        Metric::NET,
        Metric::NET_RX,
        Metric::NET_TX,
    ];

    /// Network metric summed over all non-loopback interfaces.
    pub const fn net(direction: Direction) -> Self {
        Metric::Net(NetMetric {
            interface: Interface::All,
            direction,
        })
    }

    /// Network metric for a single interface.
    pub fn interface(interface: Interface, direction: Direction) -> Self {
        Metric::Net(NetMetric {
            interface,
            direction,
        })
    }

    /// Prefix drawn in front of the glyphs when a directive asks for a label.
    pub fn label(&self) -> Cow<'static, str> {
        let fixed = match self {
            Metric::Cpu    => "CPU:",
            Metric::Mem    => "Mem:",
            Metric::Swap   => "Swap:",
            Metric::Load1  => "Load:",
            Metric::Load5  => "Load5:",
            Metric::Load15 => "Load15:",
            Metric::Net(net) => {
                let suffix = match net.direction {
                    Direction::Both => "",
                    Direction::Rx => " Rx",
                    Direction::Tx => " Tx",
                };
                return match &net.interface {
                    Interface::All => match net.direction {
                        Direction::Both => "Net:",
                        Direction::Rx => "Rx:",
                        Direction::Tx => "Tx:",
                    }
                    .into(),
                    Interface::Index(i) => format!("Net{i}{suffix}:").into(),
                    Interface::Named(name) => format!("{name}{suffix}:").into(),
                };
            }
        };
        fixed.into()
    }

    /// Rate metrics need two successive raw readings before they can
    /// produce a value.
    pub fn is_rate(&self) -> bool {
        matches!(self, Metric::Cpu | Metric::Net(_))
    }

    /// Resolve a directive name.  `load` is an alias for `load.1`.
    ///
    /// Network names are `net[.<interface>][.rx|.tx]`, where an all-digit
    /// interface selects by position.
    pub fn from_name(name: &str) -> Option<Self> {
        let metric = match name {
            "cpu"             => Metric::Cpu,
            "mem"             => Metric::Mem,
            "swap"            => Metric::Swap,
            "load" | "load.1" => Metric::Load1,
            "load.5"          => Metric::Load5,
            "load.15"         => Metric::Load15,
            _ => return Self::net_from_name(name),
        };
        Some(metric)
    }

    fn net_from_name(name: &str) -> Option<Self> {
        let rest = name.strip_prefix("net")?;
        let (rest, direction) = if let Some(rest) = rest.strip_suffix(".rx") {
            (rest, Direction::Rx)
        } else if let Some(rest) = rest.strip_suffix(".tx") {
            (rest, Direction::Tx)
        } else {
            (rest, Direction::Both)
        };

        if rest.is_empty() {
            return Some(Metric::net(direction));
        }

        let iface = rest.strip_prefix('.')?;
        if iface.is_empty() || iface.contains(char::is_whitespace) {
            return None;
        }
        let interface = if iface.bytes().all(|b| b.is_ascii_digit()) {
            Interface::Index(iface.parse().ok()?)
        } else {
            Interface::Named(iface.to_string())
        };
        Some(Metric::interface(interface, direction))
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let net = match self {
            Metric::Cpu    => return f.write_str("cpu"),
            Metric::Mem    => return f.write_str("mem"),
            Metric::Swap   => return f.write_str("swap"),
            Metric::Load1  => return f.write_str("load.1"),
            Metric::Load5  => return f.write_str("load.5"),
            Metric::Load15 => return f.write_str("load.15"),
            Metric::Net(net) => net,
        };

        f.write_str("net")?;
        match &net.interface {
            Interface::All => {}
            Interface::Index(i) => write!(f, ".{i}")?,
            Interface::Named(name) => write!(f, ".{name}")?,
        }
        match net.direction {
            Direction::Both => Ok(()),
            Direction::Rx => f.write_str(".rx"),
            Direction::Tx => f.write_str(".tx"),
        }
    }
}
