//! IP addresses as the lookup front end handles them.
//!
//! The resolver and the interface inventory both deal in concrete IPv4 and
//! IPv6 addresses. This module provides [`IpAddress`], the sum of the two,
//! and [`Ipv6Address`], an IPv6 address paired with its zone identifier.
//! The ordering core internally widens every address into the IPv4-mapped
//! IPv6 form via [`IpAddress::to_mapped`] so it only ever has to classify a
//! single shape.

use std::fmt;
use std::net::{Ipv4Addr, Ipv6Addr};
use std::str::FromStr;

//------------ Ipv6Address ---------------------------------------------------

/// An IPv6 address together with its zone identifier.
///
/// The zone identifier selects the interface a non-global address lives on.
/// It is zero for addresses that don’t need one and is carried through into
/// the scope identifier of the socket addresses produced by the lookup
/// functions.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Ipv6Address {
    /// The bare address.
    pub addr: Ipv6Addr,

    /// The zone identifier.
    pub zone: u32,
}

impl Ipv6Address {
    /// Creates a new address from its parts.
    #[must_use]
    pub const fn new(addr: Ipv6Addr, zone: u32) -> Self {
        Ipv6Address { addr, zone }
    }
}

//--- From

impl From<Ipv6Addr> for Ipv6Address {
    fn from(addr: Ipv6Addr) -> Self {
        Ipv6Address::new(addr, 0)
    }
}

//--- FromStr

impl FromStr for Ipv6Address {
    type Err = AddrParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once('%') {
            Some((addr, zone)) => {
                let addr =
                    Ipv6Addr::from_str(addr).map_err(|_| AddrParseError(()))?;
                let zone =
                    u32::from_str(zone).map_err(|_| AddrParseError(()))?;
                Ok(Ipv6Address::new(addr, zone))
            }
            None => Ipv6Addr::from_str(s)
                .map(Into::into)
                .map_err(|_| AddrParseError(())),
        }
    }
}

//--- Display

impl fmt::Display for Ipv6Address {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.zone == 0 {
            self.addr.fmt(f)
        } else {
            write!(f, "{}%{}", self.addr, self.zone)
        }
    }
}

//------------ IpAddress -----------------------------------------------------

/// An IP address of either family.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum IpAddress {
    /// An IPv4 address.
    V4(Ipv4Addr),

    /// An IPv6 address with its zone identifier.
    V6(Ipv6Address),
}

impl IpAddress {
    /// Returns the unspecified “any” address of the requested family.
    #[must_use]
    pub const fn any(v6: bool) -> Self {
        if v6 {
            IpAddress::V6(Ipv6Address::new(Ipv6Addr::UNSPECIFIED, 0))
        } else {
            IpAddress::V4(Ipv4Addr::UNSPECIFIED)
        }
    }

    /// Returns the loopback address of the requested family.
    #[must_use]
    pub const fn loopback(v6: bool) -> Self {
        if v6 {
            IpAddress::V6(Ipv6Address::new(Ipv6Addr::LOCALHOST, 0))
        } else {
            IpAddress::V4(Ipv4Addr::LOCALHOST)
        }
    }

    /// Returns whether this is an IPv4 address.
    #[must_use]
    pub const fn is_v4(self) -> bool {
        matches!(self, IpAddress::V4(_))
    }

    /// Returns whether this is an IPv6 address.
    #[must_use]
    pub const fn is_v6(self) -> bool {
        matches!(self, IpAddress::V6(_))
    }

    /// Returns whether this is the unspecified address of its family.
    #[must_use]
    pub fn is_unspecified(self) -> bool {
        match self {
            IpAddress::V4(addr) => addr.is_unspecified(),
            IpAddress::V6(addr) => addr.addr.is_unspecified(),
        }
    }

    /// Returns the zone identifier. Always zero for IPv4 addresses.
    #[must_use]
    pub const fn zone(self) -> u32 {
        match self {
            IpAddress::V4(_) => 0,
            IpAddress::V6(addr) => addr.zone,
        }
    }

    /// Widens the address into the uniform IPv6 shape.
    ///
    /// IPv6 addresses are returned as they are, dropping the zone. An IPv4
    /// address `a.b.c.d` becomes the IPv4-mapped address `::ffff:a.b.c.d`.
    #[must_use]
    pub const fn to_mapped(self) -> Ipv6Addr {
        match self {
            IpAddress::V4(addr) => addr.to_ipv6_mapped(),
            IpAddress::V6(addr) => addr.addr,
        }
    }
}

//--- From

impl From<Ipv4Addr> for IpAddress {
    fn from(addr: Ipv4Addr) -> Self {
        IpAddress::V4(addr)
    }
}

impl From<Ipv6Addr> for IpAddress {
    fn from(addr: Ipv6Addr) -> Self {
        IpAddress::V6(addr.into())
    }
}

impl From<Ipv6Address> for IpAddress {
    fn from(addr: Ipv6Address) -> Self {
        IpAddress::V6(addr)
    }
}

//--- FromStr

impl FromStr for IpAddress {
    type Err = AddrParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Ok(addr) = Ipv4Addr::from_str(s) {
            return Ok(addr.into());
        }
        Ipv6Address::from_str(s).map(Into::into)
    }
}

//--- Display

impl fmt::Display for IpAddress {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            IpAddress::V4(addr) => addr.fmt(f),
            IpAddress::V6(addr) => addr.fmt(f),
        }
    }
}

//------------ AddrParseError ------------------------------------------------

/// An error happened while parsing an IP address.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AddrParseError(());

impl fmt::Display for AddrParseError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("invalid IP address syntax")
    }
}

impl std::error::Error for AddrParseError {}

//============ Testing =======================================================

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn parse_and_display() {
        assert_eq!(
            IpAddress::from_str("192.0.2.1").unwrap(),
            IpAddress::V4(Ipv4Addr::new(192, 0, 2, 1))
        );
        assert_eq!(
            IpAddress::from_str("2001:db8::1").unwrap(),
            IpAddress::V6(Ipv6Addr::new(0x2001, 0xdb8, 0, 0, 0, 0, 0, 1).into())
        );
        assert_eq!(
            IpAddress::from_str("fe80::1%3").unwrap(),
            IpAddress::V6(Ipv6Address::new(
                Ipv6Addr::new(0xfe80, 0, 0, 0, 0, 0, 0, 1),
                3
            ))
        );
        assert!(IpAddress::from_str("not-an-address").is_err());
        assert!(IpAddress::from_str("fe80::1%eth0").is_err());
        assert!(IpAddress::from_str("fe80::1%").is_err());

        assert_eq!(
            IpAddress::from_str("fe80::1%3").unwrap().to_string(),
            "fe80::1%3"
        );
        assert_eq!(
            IpAddress::from_str("2001:db8::1").unwrap().to_string(),
            "2001:db8::1"
        );
        assert_eq!(
            IpAddress::from_str("192.0.2.1").unwrap().to_string(),
            "192.0.2.1"
        );
    }

    #[test]
    fn widen_to_mapped() {
        let addr = IpAddress::V4(Ipv4Addr::new(198, 51, 100, 121));
        assert_eq!(
            addr.to_mapped(),
            Ipv6Addr::from_str("::ffff:198.51.100.121").unwrap()
        );
        let addr = IpAddress::from_str("fe80::1%7").unwrap();
        assert_eq!(addr.to_mapped(), Ipv6Addr::from_str("fe80::1").unwrap());
    }

    #[test]
    fn any_and_loopback() {
        assert_eq!(IpAddress::any(false).to_string(), "0.0.0.0");
        assert_eq!(IpAddress::any(true).to_string(), "::");
        assert_eq!(IpAddress::loopback(false).to_string(), "127.0.0.1");
        assert_eq!(IpAddress::loopback(true).to_string(), "::1");
        assert!(IpAddress::any(false).is_unspecified());
        assert!(IpAddress::any(true).is_unspecified());
        assert!(!IpAddress::loopback(false).is_unspecified());
        assert!(!IpAddress::loopback(true).is_unspecified());
    }

    #[test]
    fn zone() {
        assert_eq!(IpAddress::from_str("fe80::1%3").unwrap().zone(), 3);
        assert_eq!(IpAddress::from_str("fe80::1").unwrap().zone(), 0);
        assert_eq!(IpAddress::from_str("192.0.2.1").unwrap().zone(), 0);
    }
}
