//! Socket addresses in their wire shape.
//!
//! The lookup functions hand their results to code that passes them straight
//! into a socket layer, so the records here are bit-exact: every field sits
//! at a fixed offset and multi-byte fields are kept in network byte order
//! through the [`zerocopy`] endian-aware integer types. [`Sockaddr`] is the
//! family-tagged sum of the two records and what a result entry carries
//! inline.

use crate::base::addr::{IpAddress, Ipv6Address};
use std::net::{Ipv4Addr, Ipv6Addr};
use zerocopy::byteorder::network_endian::{U16, U32};
use zerocopy::{Immutable, IntoBytes};

//------------ Address family tags -------------------------------------------

/// The address family tag for unspecified.
pub const AF_UNSPEC: u8 = 0;

/// The address family tag for IPv4.
pub const AF_INET: u8 = 2;

/// The address family tag for IPv6.
pub const AF_INET6: u8 = 10;

//------------ Family --------------------------------------------------------

int_enum! {
    /// An address family.
    ///
    /// The raw values are the numeric family tags used in socket addresses.
    /// Hints carrying a family outside the well-defined set are rejected by
    /// the lookup functions.
    =>
    Family, u8;

    /// No particular family, either will do.
    (Unspec => 0, "unspec")

    /// IPv4.
    (V4 => 2, "inet")

    /// IPv6.
    (V6 => 10, "inet6")
}

//--- Default

impl Default for Family {
    fn default() -> Self {
        Family::Unspec
    }
}

//------------ SockaddrIn ----------------------------------------------------

/// An IPv4 socket address in its wire shape.
#[derive(
    Clone, Copy, Debug, Eq, Immutable, IntoBytes, PartialEq,
)]
#[repr(C)]
pub struct SockaddrIn {
    /// The length of the record. Filled in when the platform ABI wants it.
    pub len: u8,

    /// The address family tag, always [`AF_INET`].
    pub family: u8,

    /// The port in network byte order.
    pub port: U16,

    /// The address in network byte order.
    pub addr: [u8; 4],

    /// Padding up to the common record size.
    pub zero: [u8; 8],
}

impl SockaddrIn {
    /// Creates a record for the given address and port.
    #[must_use]
    pub fn new(addr: Ipv4Addr, port: u16) -> Self {
        SockaddrIn {
            len: if cfg!(feature = "sa-len") { 16 } else { 0 },
            family: AF_INET,
            port: U16::new(port),
            addr: addr.octets(),
            zero: [0; 8],
        }
    }
}

//------------ SockaddrIn6 ---------------------------------------------------

/// An IPv6 socket address in its wire shape.
#[derive(
    Clone, Copy, Debug, Eq, Immutable, IntoBytes, PartialEq,
)]
#[repr(C)]
pub struct SockaddrIn6 {
    /// The length of the record. Filled in when the platform ABI wants it.
    pub len: u8,

    /// The address family tag, always [`AF_INET6`].
    pub family: u8,

    /// The port in network byte order.
    pub port: U16,

    /// The flow information. Always zero.
    pub flowinfo: U32,

    /// The address octets.
    pub addr: [u8; 16],

    /// The scope identifier, taken from the address’s zone.
    pub scope_id: U32,
}

impl SockaddrIn6 {
    /// Creates a record for the given address and port.
    #[must_use]
    pub fn new(addr: Ipv6Address, port: u16) -> Self {
        SockaddrIn6 {
            len: if cfg!(feature = "sa-len") { 28 } else { 0 },
            family: AF_INET6,
            port: U16::new(port),
            flowinfo: U32::new(0),
            addr: addr.addr.octets(),
            scope_id: U32::new(addr.zone),
        }
    }
}

//------------ Sockaddr ------------------------------------------------------

/// A socket address of either family.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Sockaddr {
    /// An IPv4 socket address.
    V4(SockaddrIn),

    /// An IPv6 socket address.
    V6(SockaddrIn6),
}

impl Sockaddr {
    /// Creates a socket address for the given address and port.
    #[must_use]
    pub fn new(addr: IpAddress, port: u16) -> Self {
        match addr {
            IpAddress::V4(addr) => Sockaddr::V4(SockaddrIn::new(addr, port)),
            IpAddress::V6(addr) => Sockaddr::V6(SockaddrIn6::new(addr, port)),
        }
    }

    /// Returns the address family tag of the record.
    #[must_use]
    pub fn family(&self) -> u8 {
        match self {
            Sockaddr::V4(sa) => sa.family,
            Sockaddr::V6(sa) => sa.family,
        }
    }

    /// Returns the port.
    #[must_use]
    pub fn port(&self) -> u16 {
        match self {
            Sockaddr::V4(sa) => sa.port.get(),
            Sockaddr::V6(sa) => sa.port.get(),
        }
    }

    /// Returns the carried IP address.
    #[must_use]
    pub fn addr(&self) -> IpAddress {
        match self {
            Sockaddr::V4(sa) => IpAddress::V4(sa.addr.into()),
            Sockaddr::V6(sa) => IpAddress::V6(Ipv6Address::new(
                Ipv6Addr::from(sa.addr),
                sa.scope_id.get(),
            )),
        }
    }

    /// Returns the raw bytes of the record.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Sockaddr::V4(sa) => sa.as_bytes(),
            Sockaddr::V6(sa) => sa.as_bytes(),
        }
    }
}

//============ Testing =======================================================

#[cfg(test)]
mod test {
    use super::*;
    use std::str::FromStr;

    fn sa_len(len: u8) -> u8 {
        if cfg!(feature = "sa-len") {
            len
        } else {
            0
        }
    }

    #[test]
    fn v4_layout() {
        let sa = Sockaddr::new(
            IpAddress::from_str("192.0.2.1").unwrap(),
            0x1234,
        );
        assert_eq!(sa.family(), AF_INET);
        assert_eq!(sa.port(), 0x1234);
        let expected = [
            sa_len(16), AF_INET, 0x12, 0x34, 192, 0, 2, 1, 0, 0, 0, 0, 0, 0,
            0, 0,
        ];
        assert_eq!(sa.as_bytes(), &expected[..]);
    }

    #[test]
    fn v6_layout() {
        let sa = Sockaddr::new(
            IpAddress::from_str("2001:db8::1%3").unwrap(),
            443,
        );
        assert_eq!(sa.family(), AF_INET6);
        assert_eq!(sa.port(), 443);
        let mut expected = vec![sa_len(28), AF_INET6, 0x01, 0xBB];
        expected.extend_from_slice(&[0; 4]); // flow info
        expected.extend_from_slice(&[
            0x20, 0x01, 0x0D, 0xB8, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1,
        ]);
        expected.extend_from_slice(&[0, 0, 0, 3]); // scope id
        assert_eq!(sa.as_bytes(), expected.as_slice());
    }

    #[test]
    fn round_trip_addr() {
        for addr in ["192.0.2.1", "2001:db8::1", "fe80::1%9"] {
            let addr = IpAddress::from_str(addr).unwrap();
            assert_eq!(Sockaddr::new(addr, 53).addr(), addr);
        }
    }

    #[test]
    fn family_values() {
        assert_eq!(Family::Unspec.to_int(), 0);
        assert_eq!(Family::V4.to_int(), 2);
        assert_eq!(Family::V6.to_int(), 10);
        assert_eq!(Family::from_int(10), Family::V6);
        assert_eq!(Family::from_int(5), Family::Int(5));
        assert_eq!(Family::default(), Family::Unspec);
    }
}
