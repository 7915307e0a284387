//! Basics.
//!
//! This module provides the fundamental types the lookup front end is built
//! from: addresses as the resolver and the interface inventory present them,
//! the scope and precedence-label classification used to order candidate
//! destinations, and the bit-exact socket address records handed back to the
//! caller. These are:
//!
//! * [addr](addr/index.html) for IP addresses and zone identifiers,
//! * [policy](policy/index.html) for the address classification of RFC 6724,
//! * [sockaddr](sockaddr/index.html) for address families and the socket
//!   address wire shapes.

#[macro_use]
mod macros;

pub mod addr;
pub mod policy;
pub mod sockaddr;
