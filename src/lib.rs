//! Host name resolution for dual-stack IP stacks.
//!
//! This crate provides the name-resolution front end of an IP stack: the
//! layer that turns a host name and an optional port into a list of
//! socket-ready addresses. Its centre is the destination-address ordering
//! of [RFC 6724](https://www.rfc-editor.org/rfc/rfc6724), which decides,
//! based on the kinds of source addresses configured on the local
//! interfaces, whether a dual-stack host should be approached over IPv6 or
//! IPv4 first.
//!
//! The crate does not talk DNS and does not enumerate interfaces itself.
//! Both are consumed through traits, keeping the front end independent of
//! any particular resolver or stack:
//!
//! * [resolver] defines the [`Resolver`][resolver::Resolver] facade the
//!   lookups query, one address per call;
//! * [netif] defines the [`Netifs`][netif::Netifs] facade the ordering
//!   core samples source addresses from.
//!
//! On top of these sit the working parts:
//!
//! * [base] holds the fundamental types: addresses, the scope and
//!   precedence-label classification, and the bit-exact socket address
//!   records;
//! * [select] orders candidate destinations along RFC 6724 §6;
//! * [lookup] assembles results: [`getaddrinfo`][lookup::getaddrinfo] and
//!   the legacy [`gethostbyname`][lookup::gethostbyname] pair.
//!
//! # Reference of feature flags
//!
//! * `dynamic-sort`: order dual-stack answers by destination preference.
//!   Part of the default set. Without it, a lookup with an unspecified
//!   family asks the resolver for a single answer of either family
//!   instead.
//! * `sa-len`: populate the leading length byte of the socket address
//!   records, for platforms whose ABI carries one.
//! * `logging`: enables the [logging] module with a ready-made
//!   subscriber setup for examples and test harnesses.

pub mod base;
pub mod logging;
pub mod lookup;
pub mod netif;
pub mod resolver;
pub mod select;
