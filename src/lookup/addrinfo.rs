//! Building socket-ready address lists.
//!
//! [`getaddrinfo`] is the main entry point of the crate: it translates a
//! host name and an optional numeric port into a list of entries, each
//! carrying a filled-in socket address, ready to be handed to `connect` or
//! `bind`. When the resolver answers for both address families the list is
//! ordered by [`sort_destinations_for`][crate::select::sort_destinations_for]
//! so callers that simply try entries front to back get the destination the
//! local configuration can actually reach.
//!
//! Only numeric service strings are supported, and the resolver yields at
//! most one address per family, so a result list never has more than two
//! entries.

use crate::base::addr::IpAddress;
use crate::base::sockaddr::{Family, Sockaddr};
use crate::netif::Netifs;
use crate::resolver::{QueryFamily, Resolver, MAX_NAME_LEN};
#[cfg(feature = "dynamic-sort")]
use crate::select::sort_destinations_for;
use smallvec::SmallVec;
use std::{fmt, ops};

//------------ AiFlags -------------------------------------------------------

/// The flags of a lookup hint.
///
/// Flags are a bit set. Only [`PASSIVE`][Self::PASSIVE] and
/// [`NUMERICHOST`][Self::NUMERICHOST] change behaviour; the remaining
/// constants are accepted for interface compatibility but not acted upon.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct AiFlags(u16);

impl AiFlags {
    /// The returned addresses are intended for binding, not connecting.
    pub const PASSIVE: AiFlags = AiFlags(0x01);

    /// Fill in the canonical name of the host.
    pub const CANONNAME: AiFlags = AiFlags(0x02);

    /// The node name is a literal address string; no lookup is made.
    pub const NUMERICHOST: AiFlags = AiFlags(0x04);

    /// The service string is a numeric port. Always the case here.
    pub const NUMERICSERV: AiFlags = AiFlags(0x08);

    // TODO: Act on V4MAPPED and ADDRCONFIG.

    /// Map IPv4 answers into IPv6 form. Not acted upon.
    pub const V4MAPPED: AiFlags = AiFlags(0x10);

    /// Return all matching addresses. Not acted upon.
    pub const ALL: AiFlags = AiFlags(0x20);

    /// Only return families with a configured address. Not acted upon.
    pub const ADDRCONFIG: AiFlags = AiFlags(0x40);

    /// Returns the empty flag set.
    #[must_use]
    pub const fn empty() -> Self {
        AiFlags(0)
    }

    /// Returns a flag set from its raw bits.
    #[must_use]
    pub const fn from_int(bits: u16) -> Self {
        AiFlags(bits)
    }

    /// Returns the raw bits of the flag set.
    #[must_use]
    pub const fn to_int(self) -> u16 {
        self.0
    }

    /// Returns whether all flags in `other` are set in `self`.
    #[must_use]
    pub const fn contains(self, other: AiFlags) -> bool {
        self.0 & other.0 == other.0
    }
}

//--- BitOr and BitOrAssign

impl ops::BitOr for AiFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        AiFlags(self.0 | rhs.0)
    }
}

impl ops::BitOrAssign for AiFlags {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

//------------ Hints ---------------------------------------------------------

/// Input values narrowing down a lookup.
#[derive(Clone, Copy, Debug, Default)]
pub struct Hints {
    /// The requested address family.
    pub family: Family,

    /// The lookup flags.
    pub flags: AiFlags,

    /// The socket type, carried into the result entries verbatim.
    pub socktype: i32,

    /// The protocol, carried into the result entries verbatim.
    pub protocol: i32,
}

//------------ AddrInfo ------------------------------------------------------

/// One entry of a lookup result list.
///
/// Entries form a singly linked list through [`next`][Self::next]. The
/// caller owns the head; dropping it releases the whole chain exactly once.
#[derive(Clone, Debug)]
pub struct AddrInfo {
    /// The address family of the entry.
    pub family: Family,

    /// The socket type from the hints.
    pub socktype: i32,

    /// The protocol from the hints.
    pub protocol: i32,

    /// The socket address.
    pub addr: Sockaddr,

    /// The canonical name of the host, if a node name was looked up.
    pub canonname: Option<String>,

    /// The next entry of the list.
    pub next: Option<Box<AddrInfo>>,
}

impl AddrInfo {
    /// Returns an iterator over the entries of the list.
    #[must_use]
    pub fn iter(&self) -> AddrInfoIter<'_> {
        AddrInfoIter { next: Some(self) }
    }
}

//------------ AddrInfoIter --------------------------------------------------

/// An iterator over the entries of a lookup result list.
#[derive(Clone, Debug)]
pub struct AddrInfoIter<'a> {
    next: Option<&'a AddrInfo>,
}

impl<'a> Iterator for AddrInfoIter<'a> {
    type Item = &'a AddrInfo;

    fn next(&mut self) -> Option<Self::Item> {
        let res = self.next?;
        self.next = res.next.as_deref();
        Some(res)
    }
}

//------------ getaddrinfo ---------------------------------------------------

/// Translates a host name and service into a list of socket addresses.
///
/// `nodename` is the name or literal address string of the host; if it is
/// missing, the loopback address is used, or the any address if
/// [`AiFlags::PASSIVE`] is set. `servname` is a port number in decimal; if
/// it is missing, the port is zero. Service *names* are not supported. At
/// least one of the two must be given.
///
/// With an unspecified family in `hints`, both families are queried and the
/// result list is ordered against the locally configured source addresses,
/// so the first entry is the destination to try first.
pub fn getaddrinfo<R: Resolver, N: Netifs>(
    resolver: &R,
    netifs: &N,
    nodename: Option<&str>,
    servname: Option<&str>,
    hints: Option<&Hints>,
) -> Result<Box<AddrInfo>, LookupError> {
    #[cfg(not(feature = "dynamic-sort"))]
    let _ = netifs;

    if nodename.is_none() && servname.is_none() {
        return Err(LookupError::NoName);
    }

    let (family, flags, socktype, protocol) = match hints {
        Some(hints) => {
            match hints.family {
                Family::Unspec | Family::V4 | Family::V6 => {}
                Family::Int(_) => return Err(LookupError::Family),
            }
            (hints.family, hints.flags, hints.socktype, hints.protocol)
        }
        None => (Family::Unspec, AiFlags::empty(), 0, 0),
    };

    let port = match servname {
        Some(servname) => {
            let port = servname
                .parse::<u32>()
                .map_err(|_| LookupError::Service)?;
            if port > 0xFFFF {
                return Err(LookupError::Service);
            }
            port as u16
        }
        None => 0,
    };

    let mut addrs: SmallVec<[IpAddress; 2]> = SmallVec::new();
    match nodename {
        Some(nodename) => {
            if flags.contains(AiFlags::NUMERICHOST) {
                // No lookup, just parse an address literal.
                let addr: IpAddress = nodename
                    .parse()
                    .map_err(|_| LookupError::NoName)?;
                if (addr.is_v6() && family == Family::V4)
                    || (addr.is_v4() && family == Family::V6)
                {
                    return Err(LookupError::NoName);
                }
                addrs.push(addr);
            } else {
                match family {
                    Family::Unspec => {
                        #[cfg(feature = "dynamic-sort")]
                        {
                            if let Ok(addr) =
                                resolver.resolve(nodename, QueryFamily::V6)
                            {
                                addrs.push(addr);
                            }
                            if let Ok(addr) =
                                resolver.resolve(nodename, QueryFamily::V4)
                            {
                                addrs.push(addr);
                            }
                            if addrs.is_empty() {
                                return Err(LookupError::Fail);
                            }
                            sort_destinations_for(netifs, &mut addrs);
                        }
                        #[cfg(not(feature = "dynamic-sort"))]
                        {
                            // Either family; the resolver prefers IPv4.
                            let addr = resolver
                                .resolve(nodename, QueryFamily::V4OrV6)
                                .map_err(|_| LookupError::Fail)?;
                            addrs.push(addr);
                        }
                    }
                    Family::V4 => {
                        let addr = resolver
                            .resolve(nodename, QueryFamily::V4)
                            .map_err(|_| LookupError::Fail)?;
                        addrs.push(addr);
                    }
                    Family::V6 => {
                        let addr = resolver
                            .resolve(nodename, QueryFamily::V6)
                            .map_err(|_| LookupError::Fail)?;
                        addrs.push(addr);
                    }
                    Family::Int(_) => return Err(LookupError::Family),
                }
            }
        }
        None => {
            // Service only: bind to anything or talk to ourselves.
            let v6 = family == Family::V6;
            addrs.push(if flags.contains(AiFlags::PASSIVE) {
                IpAddress::any(v6)
            } else {
                IpAddress::loopback(v6)
            });
        }
    }

    if let Some(nodename) = nodename {
        if nodename.len() > MAX_NAME_LEN {
            return Err(LookupError::Fail);
        }
    }

    // Build the result list in reverse order, linking each new entry to the
    // previous head. No reversal pass needed afterwards.
    let mut head = None;
    for addr in addrs.iter().rev() {
        head = Some(Box::new(AddrInfo {
            family: if addr.is_v6() { Family::V6 } else { Family::V4 },
            socktype,
            protocol,
            addr: Sockaddr::new(*addr, port),
            canonname: nodename.map(String::from),
            next: head,
        }));
    }
    head.ok_or(LookupError::Fail)
}

//------------ LookupError ---------------------------------------------------

/// An error returned by [`getaddrinfo`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum LookupError {
    /// The node name is not known or neither node nor service was given.
    NoName,

    /// The service string is not a port number.
    Service,

    /// The lookup failed.
    Fail,

    /// No memory to build the result list.
    ///
    /// Only produced by ports that allocate result entries from a bounded
    /// pool; the code stays defined so the numeric values remain stable.
    Memory,

    /// The requested address family is not supported.
    Family,
}

impl LookupError {
    /// Returns the numeric code for this error.
    #[must_use]
    pub const fn to_int(self) -> i32 {
        match self {
            LookupError::NoName => 200,
            LookupError::Service => 201,
            LookupError::Fail => 202,
            LookupError::Memory => 203,
            LookupError::Family => 204,
        }
    }
}

//--- Display and Error

impl fmt::Display for LookupError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match self {
            LookupError::NoName => "node name not known",
            LookupError::Service => "invalid service",
            LookupError::Fail => "lookup failed",
            LookupError::Memory => "out of memory",
            LookupError::Family => "address family not supported",
        })
    }
}

impl std::error::Error for LookupError {}

//============ Testing =======================================================
