//! The resolver facade.
//!
//! The lookup functions don’t speak DNS themselves. They consult a resolver
//! through the [`Resolver`] trait, asking for a single address of a
//! particular family per query. How the resolver answers, over which
//! transport and with what caching or retry policy, is entirely its own
//! business; the lookup functions simply block on it.

use crate::base::addr::IpAddress;
use std::fmt;

//------------ MAX_NAME_LEN --------------------------------------------------

/// The maximum length of a host name in octets.
pub const MAX_NAME_LEN: usize = 253;

//------------ QueryFamily ---------------------------------------------------

/// The address family constraint of a resolver query.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum QueryFamily {
    /// Whatever the resolver prefers, conventionally IPv4 first.
    Any,

    /// An IPv4 address only.
    V4,

    /// An IPv6 address only.
    V6,

    /// Either family, a single answer.
    V4OrV6,
}

//--- Display

impl fmt::Display for QueryFamily {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match self {
            QueryFamily::Any => "any",
            QueryFamily::V4 => "v4",
            QueryFamily::V6 => "v6",
            QueryFamily::V4OrV6 => "v4-or-v6",
        })
    }
}

//------------ Resolver ------------------------------------------------------

/// A source of name-to-address resolution.
///
/// A resolver turns a host name into at most one address per query. It may
/// block for the duration of its own timeout. Implementations are expected
/// to honour the family constraint: a [`QueryFamily::V6`] query must never
/// produce an IPv4 address and vice versa.
pub trait Resolver {
    /// Resolves a host name into a single address.
    fn resolve(
        &self,
        name: &str,
        family: QueryFamily,
    ) -> Result<IpAddress, ResolveError>;
}

//------------ ResolveError --------------------------------------------------

/// A resolver query failed.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ResolveError {
    /// The name does not exist or has no address of the requested family.
    HostNotFound,

    /// The resolver gave up waiting for an answer.
    Timeout,
}

//--- Display and Error

impl fmt::Display for ResolveError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match self {
            ResolveError::HostNotFound => "host not found",
            ResolveError::Timeout => "query timed out",
        })
    }
}

impl std::error::Error for ResolveError {}
