//! Looking up hosts.
//!
//! Two generations of entry point live here. [`getaddrinfo`] builds a list
//! of socket-ready addresses for a node and service, ordering dual-stack
//! answers so the reachable family comes first. [`gethostbyname`] and its
//! reentrant sibling [`gethostbyname_r`] are the traditional single-address
//! interface kept for old callers.

pub use self::addrinfo::{
    getaddrinfo, AddrInfo, AddrInfoIter, AiFlags, Hints, LookupError,
};
pub use self::host::{
    gethostbyname, gethostbyname_r, h_errno, min_buffer_len, HostEnt,
    HostEntView, HostError, HOST_NOT_FOUND, NO_DATA, NO_RECOVERY, TRY_AGAIN,
};

pub mod addrinfo;
pub mod host;
