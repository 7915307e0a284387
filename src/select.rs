//! Ordering candidate destination addresses.
//!
//! When a lookup produces both an IPv4 and an IPv6 answer for a host, the
//! caller should try the address it is actually able to reach first. This
//! module orders candidate destinations along the lines of RFC 6724 §6,
//! restricted to the rules that matter for answer sets of at most one
//! address per family: prefer matching scope (rule 2), prefer matching
//! label (rule 5), prefer higher precedence (rule 6), and prefer smaller
//! scope (rule 8). Rules 1, 3, 4, 7, and 9 are not implemented and rule 10
//! falls out of using a stable sort.
//!
//! Rules 2 and 5 are defined over the source address that would be selected
//! for each destination. Running full source address selection is not
//! necessary here: if any locally configured source has the scope or label
//! in question, selection would prefer it and the rule succeeds, and if
//! none does, the rule cannot succeed. [`SourceSummary`] therefore only
//! records *which* scopes and labels are present among the configured
//! source addresses, not which source carries them.

use crate::base::addr::IpAddress;
use crate::base::policy::{is_v4_mapped, Label, Scope};
use crate::netif::Netifs;
use smallvec::SmallVec;
use std::cmp::Ordering;
use std::net::Ipv6Addr;
use tracing::{debug, trace};

//------------ MAX_CANDIDATE_SOURCES -----------------------------------------

/// The maximum number of source addresses sampled per summary.
///
/// Bounds the scan when there are many interfaces or many addresses per
/// interface.
pub const MAX_CANDIDATE_SOURCES: usize = 24;

//------------ SourceSummary -------------------------------------------------

/// A summary of the locally configured source addresses.
///
/// Three bit sets, each indexed by `1 << value`: the scopes present among
/// IPv6 sources, the scopes present among IPv4 sources, and the precedence
/// labels present among sources of either family. A set flag means at least
/// one such source exists on some interface; the summary does not record
/// which one.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct SourceSummary {
    /// The scopes present among IPv6 source addresses.
    v6_scopes: u32,

    /// The scopes present among IPv4 source addresses.
    v4_scopes: u32,

    /// The precedence labels present among all source addresses.
    labels: u32,
}

impl SourceSummary {
    /// Creates an empty summary.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a summary of the given source addresses.
    #[must_use]
    pub fn of_sources(sources: &[IpAddress]) -> Self {
        let mut res = Self::new();
        for addr in sources {
            res.add(addr);
        }
        debug!(
            "summarised sources: labels {:#x}, v6 scopes {:#x}, \
             v4 scopes {:#x}",
            res.labels, res.v6_scopes, res.v4_scopes
        );
        res
    }

    /// Folds one source address into the summary.
    pub fn add(&mut self, addr: &IpAddress) {
        let mapped = addr.to_mapped();
        self.labels |= 1 << Label::of(&mapped).to_int();
        if is_v4_mapped(&mapped) {
            self.v4_scopes |= 1 << Scope::of(&mapped).to_int();
        } else {
            self.v6_scopes |= 1 << Scope::of(&mapped).to_int();
        }
    }

    /// Returns whether a source scope matching the destination exists.
    ///
    /// The mask consulted is chosen by the destination’s family: an
    /// IPv4-mapped destination can only be reached from an IPv4 source.
    fn matches_scope(&self, mapped: &Ipv6Addr, scope: Scope) -> bool {
        let mask = if is_v4_mapped(mapped) {
            self.v4_scopes
        } else {
            self.v6_scopes
        };
        mask & (1 << scope.to_int()) != 0
    }

    /// Returns whether a source with the given label exists.
    fn matches_label(&self, label: Label) -> bool {
        self.labels & (1 << label.to_int()) != 0
    }
}

//------------ compare_destinations ------------------------------------------

/// Compares two candidate destinations in the uniform IPv6 shape.
///
/// Returns [`Ordering::Greater`] if `a` is the preferred destination,
/// [`Ordering::Less`] if `b` is, and [`Ordering::Equal`] if the rules don’t
/// tell them apart, in which case their relative order is to be left
/// unchanged.
#[must_use]
pub fn compare_destinations(
    a: &Ipv6Addr,
    b: &Ipv6Addr,
    sources: &SourceSummary,
) -> Ordering {
    let a_scope = Scope::of(a);
    let b_scope = Scope::of(b);
    let a_label = Label::of(a);
    let b_label = Label::of(b);

    trace!(
        %a, %a_scope, %a_label, %b, %b_scope, %b_label,
        "comparing candidate destinations"
    );

    // Rule 1, avoid unusable destinations: not implemented.
    // Rules 3 and 4 are not applicable.
    // Rule 7 is not applicable, rule 9 not implemented.
    rule_2(
        sources.matches_scope(a, a_scope),
        sources.matches_scope(b, b_scope),
    )
    .then_with(|| {
        rule_5(
            sources.matches_label(a_label),
            sources.matches_label(b_label),
        )
    })
    .then_with(|| rule_6(a_label, b_label))
    .then_with(|| rule_8(a_scope, b_scope))
    // Rule 10: otherwise, leave the order unchanged.
}

/// Rule 2: Prefer matching scope.
fn rule_2(a_matches: bool, b_matches: bool) -> Ordering {
    match (a_matches, b_matches) {
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        _ => Ordering::Equal,
    }
}

/// Rule 5: Prefer matching label.
///
/// IPv4-mapped is a label of its own, so IPv4 and IPv6 destinations are
/// compared on the same footing.
fn rule_5(a_matches: bool, b_matches: bool) -> Ordering {
    match (a_matches, b_matches) {
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        _ => Ordering::Equal,
    }
}

/// Rule 6: Prefer higher precedence.
fn rule_6(a_label: Label, b_label: Label) -> Ordering {
    a_label.precedence().cmp(&b_label.precedence())
}

/// Rule 8: Prefer smaller scope.
fn rule_8(a_scope: Scope, b_scope: Scope) -> Ordering {
    b_scope.to_int().cmp(&a_scope.to_int())
}

//------------ sort_destinations ---------------------------------------------

/// Sorts candidate destinations, most preferred first.
///
/// `sources` are the candidate source addresses the summary is built from.
/// Destinations are widened into scratch copies of the uniform IPv6 shape
/// for comparison; the slice keeps the original representations.
pub fn sort_destinations(dests: &mut [IpAddress], sources: &[IpAddress]) {
    debug!(
        destinations = dests.len(),
        sources = sources.len(),
        "sorting candidate destinations"
    );
    if dests.len() <= 1 {
        return;
    }

    let summary = SourceSummary::of_sources(sources);
    let mut scratch: SmallVec<[(Ipv6Addr, IpAddress); 2]> =
        dests.iter().map(|addr| (addr.to_mapped(), *addr)).collect();
    scratch.sort_by(|(a, _), (b, _)| {
        compare_destinations(a, b, &summary).reverse()
    });
    for (slot, (_, addr)) in dests.iter_mut().zip(scratch) {
        *slot = addr;
    }
}

/// Sorts candidate destinations against the interface inventory.
///
/// Collects up to [`MAX_CANDIDATE_SOURCES`] source addresses from all
/// interfaces and sorts with those. We don’t know what the result will be
/// used for, so every interface counts. Lists of at most one entry are
/// returned unchanged without consulting the interfaces at all.
pub fn sort_destinations_for<N: Netifs>(
    netifs: &N,
    dests: &mut [IpAddress],
) {
    if dests.len() <= 1 {
        return;
    }

    let mut sources: SmallVec<[IpAddress; MAX_CANDIDATE_SOURCES]> =
        SmallVec::new();
    netifs.for_each_interface(|netif| {
        if let Some(ip4) = netif.ip4 {
            if !ip4.is_unspecified()
                && sources.len() < MAX_CANDIDATE_SOURCES
            {
                sources.push(ip4.into());
            }
        }
        for ip6 in netif.ip6 {
            if !ip6.addr.is_unspecified()
                && sources.len() < MAX_CANDIDATE_SOURCES
            {
                sources.push((*ip6).into());
            }
        }
    });
    sort_destinations(dests, &sources);
}

//============ Testing =======================================================
