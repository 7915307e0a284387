//! The legacy single-address lookup.
//!
//! [`gethostbyname`] predates [`getaddrinfo`][super::getaddrinfo] and
//! survives for callers that still speak its shape: one address, a name, an
//! always-empty alias list, and an error side channel instead of a result
//! type. Failures are reported through [`h_errno`], a per-thread variable
//! holding one of the `HOST_NOT_FOUND` family of codes.
//!
//! [`gethostbyname_r`] is the reentrant variant. It neither touches the
//! error variable nor allocates: the caller supplies a scratch buffer that
//! receives the resolved address and the name copy, and the returned
//! [`HostEntView`] borrows from it.

use crate::base::addr::IpAddress;
use crate::base::sockaddr::{Family, AF_INET, AF_INET6};
use crate::resolver::{QueryFamily, Resolver, MAX_NAME_LEN};
use std::cell::Cell;
use std::{fmt, str};
use tracing::debug;

//------------ Error side channel --------------------------------------------

/// The host was not found.
pub const HOST_NOT_FOUND: i32 = 210;

/// The name exists but has no address.
pub const NO_DATA: i32 = 211;

/// A non-recoverable error occurred.
pub const NO_RECOVERY: i32 = 212;

/// A temporary error occurred; trying again may help.
pub const TRY_AGAIN: i32 = 213;

thread_local! {
    /// The legacy error variable, kept per thread.
    static H_ERRNO: Cell<i32> = const { Cell::new(0) };
}

/// Returns the calling thread’s last [`gethostbyname`] error.
///
/// The value is only meaningful after a call on the same thread returned
/// `None`. Keeping the variable per thread stands in for the per-thread
/// copy hook a multi-threaded port of the traditional interface needs.
#[must_use]
pub fn h_errno() -> i32 {
    H_ERRNO.with(Cell::get)
}

/// Sets the calling thread’s error variable.
fn set_h_errno(value: i32) {
    H_ERRNO.with(|cell| cell.set(value));
}

//------------ HostEnt -------------------------------------------------------

/// The result of a legacy host lookup.
///
/// The shape is fixed: exactly one address in the address list and no
/// aliases.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct HostEnt {
    /// The host name the lookup was made for.
    pub name: String,

    /// The aliases of the host. Always empty.
    pub aliases: Vec<String>,

    /// The address family of the entries of the address list.
    pub family: Family,

    /// The length of an address in octets.
    pub length: u8,

    /// The addresses of the host. Always exactly one entry.
    pub addr_list: Vec<IpAddress>,
}

//------------ gethostbyname -------------------------------------------------

/// Looks up the address of a host.
///
/// Only a single address is returned, with the resolver deciding between
/// the families by its own preference. On failure, `None` is returned and
/// the reason is left in the calling thread’s [`h_errno`]. The stored name
/// is truncated to [`MAX_NAME_LEN`] octets.
pub fn gethostbyname<R: Resolver>(
    resolver: &R,
    name: &str,
) -> Option<HostEnt> {
    let addr = match resolver.resolve(name, QueryFamily::Any) {
        Ok(addr) => addr,
        Err(err) => {
            debug!(name, %err, "gethostbyname failed");
            set_h_errno(HOST_NOT_FOUND);
            return None;
        }
    };
    debug!(name, %addr, "gethostbyname answered");
    let (family, length) = family_of(addr);
    Some(HostEnt {
        name: truncate_name(name).into(),
        aliases: Vec::new(),
        family,
        length,
        addr_list: vec![addr],
    })
}

/// Truncates a name to [`MAX_NAME_LEN`] octets on a character boundary.
fn truncate_name(name: &str) -> &str {
    if name.len() <= MAX_NAME_LEN {
        return name;
    }
    let mut end = MAX_NAME_LEN;
    while !name.is_char_boundary(end) {
        end -= 1;
    }
    &name[..end]
}

/// Returns the family tag and address length for an address.
fn family_of(addr: IpAddress) -> (Family, u8) {
    match addr {
        IpAddress::V4(_) => (Family::V4, 4),
        IpAddress::V6(_) => (Family::V6, 16),
    }
}

//------------ gethostbyname_r -----------------------------------------------

/// The size of the scratch record written in front of the name copy:
/// the family tag, the address octets, and the zone identifier.
const HELPER_LEN: usize = 21;

/// Returns the scratch buffer size [`gethostbyname_r`] needs for `name`.
#[must_use]
pub const fn min_buffer_len(name: &str) -> usize {
    HELPER_LEN + name.len() + 1
}

/// A host lookup result borrowing caller-supplied scratch memory.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct HostEntView<'a> {
    /// The host name the lookup was made for.
    pub name: &'a str,

    /// The address family of the address.
    pub family: Family,

    /// The length of the address in octets.
    pub length: u8,

    /// The single address of the host.
    pub addr: IpAddress,
}

/// Looks up the address of a host without shared state.
///
/// The thread-safe variant of [`gethostbyname`]: instead of static storage
/// and the [`h_errno`] variable, the caller supplies the scratch buffer the
/// result lives in and receives errors by value. The buffer must be at
/// least [`min_buffer_len`] bytes for the given name, otherwise
/// [`HostError::Range`] is returned before any lookup is made.
pub fn gethostbyname_r<'buf, R: Resolver>(
    resolver: &R,
    name: &str,
    buf: &'buf mut [u8],
) -> Result<HostEntView<'buf>, HostError> {
    if buf.len() < min_buffer_len(name) {
        return Err(HostError::Range);
    }

    let addr = match resolver.resolve(name, QueryFamily::Any) {
        Ok(addr) => addr,
        Err(err) => {
            debug!(name, %err, "gethostbyname failed");
            return Err(HostError::HostNotFound);
        }
    };

    let (helper, name_buf) = buf.split_at_mut(HELPER_LEN);
    match addr {
        IpAddress::V4(ip4) => {
            helper[0] = AF_INET;
            helper[1..5].copy_from_slice(&ip4.octets());
            helper[5..].fill(0);
        }
        IpAddress::V6(ip6) => {
            helper[0] = AF_INET6;
            helper[1..17].copy_from_slice(&ip6.addr.octets());
            helper[17..21].copy_from_slice(&ip6.zone.to_be_bytes());
        }
    }
    name_buf[..name.len()].copy_from_slice(name.as_bytes());
    name_buf[name.len()] = 0;

    let (family, length) = family_of(addr);
    Ok(HostEntView {
        // The copy came from a `str`, so this never actually falls back.
        name: str::from_utf8(&name_buf[..name.len()]).unwrap_or_default(),
        family,
        length,
        addr,
    })
}

//------------ HostError -----------------------------------------------------

/// An error returned by [`gethostbyname_r`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum HostError {
    /// The host was not found.
    HostNotFound,

    /// The supplied buffer is too small for the result.
    Range,
}

//--- Display and Error

impl fmt::Display for HostError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match self {
            HostError::HostNotFound => "host not found",
            HostError::Range => "buffer too small",
        })
    }
}

impl std::error::Error for HostError {}

//============ Testing =======================================================

#[cfg(test)]
mod test {
    use super::*;
    use crate::resolver::ResolveError;
    use std::net::Ipv4Addr;

    /// A resolver knowing exactly one IPv4 address.
    struct OneAddr(Option<Ipv4Addr>);

    impl Resolver for OneAddr {
        fn resolve(
            &self,
            _name: &str,
            _family: QueryFamily,
        ) -> Result<IpAddress, ResolveError> {
            self.0.map(IpAddress::from).ok_or(ResolveError::HostNotFound)
        }
    }

    #[test]
    fn fixed_envelope() {
        let resolver = OneAddr(Some(Ipv4Addr::new(192, 0, 2, 1)));
        let ent = gethostbyname(&resolver, "example.com").unwrap();
        assert_eq!(ent.name, "example.com");
        assert!(ent.aliases.is_empty());
        assert_eq!(ent.family, Family::V4);
        assert_eq!(ent.length, 4);
        assert_eq!(
            ent.addr_list,
            [IpAddress::V4(Ipv4Addr::new(192, 0, 2, 1))]
        );
    }

    #[test]
    fn failure_goes_to_h_errno() {
        let resolver = OneAddr(None);
        assert!(gethostbyname(&resolver, "example.invalid").is_none());
        assert_eq!(h_errno(), HOST_NOT_FOUND);
    }

    #[test]
    fn overlong_names_are_truncated() {
        let resolver = OneAddr(Some(Ipv4Addr::new(192, 0, 2, 1)));
        let name = "x".repeat(MAX_NAME_LEN + 10);
        let ent = gethostbyname(&resolver, &name).unwrap();
        assert_eq!(ent.name.len(), MAX_NAME_LEN);
    }

    #[test]
    fn reentrant_buffer_boundary() {
        let resolver = OneAddr(Some(Ipv4Addr::new(192, 0, 2, 1)));
        let name = "example.com";

        let mut buf = vec![0xFF; min_buffer_len(name)];
        let ent = gethostbyname_r(&resolver, name, &mut buf).unwrap();
        assert_eq!(ent.name, name);
        assert_eq!(ent.family, Family::V4);
        assert_eq!(ent.length, 4);
        assert_eq!(ent.addr, IpAddress::V4(Ipv4Addr::new(192, 0, 2, 1)));

        let mut buf = vec![0xFF; min_buffer_len(name) - 1];
        assert_eq!(
            gethostbyname_r(&resolver, name, &mut buf).unwrap_err(),
            HostError::Range
        );
    }

    #[test]
    fn reentrant_failure_by_value() {
        let resolver = OneAddr(None);
        let mut buf = [0u8; 64];
        assert_eq!(
            gethostbyname_r(&resolver, "example.invalid", &mut buf)
                .unwrap_err(),
            HostError::HostNotFound
        );
    }

    #[test]
    fn scratch_holds_the_record() {
        let resolver = OneAddr(Some(Ipv4Addr::new(192, 0, 2, 1)));
        let name = "host";
        let mut buf = vec![0xFF; min_buffer_len(name)];
        gethostbyname_r(&resolver, name, &mut buf).unwrap();
        assert_eq!(buf[0], AF_INET);
        assert_eq!(&buf[1..5], &[192, 0, 2, 1]);
        assert_eq!(&buf[HELPER_LEN..HELPER_LEN + 4], b"host");
        assert_eq!(buf[HELPER_LEN + 4], 0);
    }
}
