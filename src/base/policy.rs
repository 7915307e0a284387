//! Classifying addresses for destination ordering.
//!
//! Ordering candidate destinations requires two facts about every address:
//! its *scope*, that is how far packets sent to it can travel, and its
//! *precedence label*, the row of the default policy table of RFC 6724
//! it falls into. Both are derived from the uniform IPv6 shape produced by
//! [`IpAddress::to_mapped`][crate::base::addr::IpAddress::to_mapped], so
//! IPv4 addresses take part through their IPv4-mapped form.
//!
//! [`Scope::of`] and [`Label::of`] are pure and total. They can safely be
//! called concurrently.

use std::net::Ipv6Addr;

//------------ Scope ---------------------------------------------------------

int_enum! {
    /// The scope of an address.
    ///
    /// Scopes follow the definition of RFC 6724, which matches unicast
    /// addresses to the equivalent multicast scope values of RFC 4007. The
    /// scope taken from a multicast address can therefore be used directly.
    ///
    /// Link-local and loopback addresses are considered link-local, as are
    /// the corresponding ranges of IPv4-mapped addresses. Everything else,
    /// including unique-local and NAT64-synthesised addresses, is global
    /// scope.
    =>
    Scope, u8;

    /// The reserved scope value.
    (Reserved => 0x0, "reserved")

    /// Link-local scope.
    (LinkLocal => 0x2, "link-local")

    /// Site-local scope.
    (SiteLocal => 0x5, "site-local")

    /// Global scope.
    (Global => 0xE, "global")
}

impl Scope {
    /// Determines the scope of an address in the uniform IPv6 shape.
    ///
    /// The returned value is always within `0..=0xF`.
    #[must_use]
    pub fn of(addr: &Ipv6Addr) -> Self {
        if addr.is_multicast() {
            Scope::from_int((addr.segments()[0] & 0x000F) as u8)
        } else if is_link_local(addr)
            || addr.is_loopback()
            || is_v4_mapped_link_local(addr)
            || is_v4_mapped_loopback(addr)
        {
            Scope::LinkLocal
        } else if is_site_local(addr) {
            Scope::SiteLocal
        } else {
            Scope::Global
        }
    }
}

//------------ Label ---------------------------------------------------------

int_enum! {
    /// A precedence label from the default policy table of RFC 6724.
    ///
    /// A label names the equivalence class an address belongs to. The set of
    /// labels present among local source addresses is kept as bit flags in a
    /// `u32`, so all values are limited to `0..=0x1F`.
    =>
    Label, u8;

    /// The loopback address, `::1/128`.
    (Localhost => 0x0, "localhost")

    /// Everything not matched by a more specific prefix, `::/0`.
    (General => 0x1, "general")

    /// 6to4 transition addresses, `2002::/16`.
    (SixToFour => 0x2, "6to4")

    /// Deprecated IPv4-compatible addresses, `::/96`.
    (V4Compatible => 0x3, "v4-compatible")

    /// IPv4-mapped addresses, `::ffff:0:0/96`.
    (V4Mapped => 0x4, "v4-mapped")

    /// Teredo tunnel addresses, `2001::/32`.
    (Teredo => 0x5, "teredo")

    /// Deprecated site-local addresses, `fec0::/10`.
    (SiteLocal => 0xB, "site-local")

    /// Deprecated 6bone test addresses, `3ffe::/16`.
    (SixBone => 0xC, "6bone")

    /// Unique local addresses, `fc00::/7`.
    (UniqueLocal => 0xD, "unique-local")
}

impl Label {
    /// Determines the precedence label of an address in the uniform shape.
    ///
    /// Prefixes are matched from longest to shortest with the first match
    /// winning. The fallback for everything unmatched is [`Label::General`],
    /// the `::/0` row of the policy table.
    #[must_use]
    pub fn of(addr: &Ipv6Addr) -> Self {
        // Prefix length 128.
        if addr.is_loopback() {
            return Label::Localhost;
        }
        // Prefix length 96.
        if is_v4_mapped(addr) {
            return Label::V4Mapped;
        }
        if is_v4_compatible(addr) {
            return Label::V4Compatible;
        }
        // Prefix length 32.
        if is_teredo(addr) {
            return Label::Teredo;
        }
        // Prefix length 16.
        if is_6to4(addr) {
            return Label::SixToFour;
        }
        if is_6bone(addr) {
            return Label::SixBone;
        }
        // Prefix length 10.
        if is_site_local(addr) {
            return Label::SiteLocal;
        }
        // Prefix length 7.
        if is_unique_local(addr) {
            return Label::UniqueLocal;
        }
        Label::General
    }

    /// Returns the precedence for this label. Higher is preferred.
    ///
    /// The values are the defaults from the policy table of RFC 6724.
    /// Unknown labels get a precedence of zero.
    #[must_use]
    pub const fn precedence(self) -> u8 {
        match self {
            Label::Localhost => 50,
            Label::General => 40,
            Label::V4Mapped => 35,
            Label::SixToFour => 30,
            Label::Teredo => 5,
            Label::UniqueLocal => 3,
            Label::V4Compatible | Label::SiteLocal | Label::SixBone => 1,
            Label::Int(_) => 0,
        }
    }
}

//------------ Prefix predicates ---------------------------------------------

/// Returns whether the address is an IPv4-mapped IPv6 address.
///
/// These are the addresses within `::ffff:0:0/96`.
#[must_use]
pub fn is_v4_mapped(addr: &Ipv6Addr) -> bool {
    let seg = addr.segments();
    seg[..5] == [0; 5] && seg[5] == 0xFFFF
}

/// `fe80::/10`, unicast link-local.
fn is_link_local(addr: &Ipv6Addr) -> bool {
    addr.segments()[0] & 0xFFC0 == 0xFE80
}

/// `fec0::/10`, deprecated site-local.
fn is_site_local(addr: &Ipv6Addr) -> bool {
    addr.segments()[0] & 0xFFC0 == 0xFEC0
}

/// `::/96`, deprecated IPv4-compatible.
fn is_v4_compatible(addr: &Ipv6Addr) -> bool {
    addr.segments()[..6] == [0; 6]
}

/// `::ffff:169.254.0.0/112`, the IPv4 link-local range in mapped form.
fn is_v4_mapped_link_local(addr: &Ipv6Addr) -> bool {
    is_v4_mapped(addr) && addr.segments()[6] == 0xA9FE
}

/// `::ffff:127.0.0.0/104`, the IPv4 loopback range in mapped form.
fn is_v4_mapped_loopback(addr: &Ipv6Addr) -> bool {
    is_v4_mapped(addr) && addr.segments()[6] >> 8 == 0x7F
}

/// `2001::/32`, Teredo.
fn is_teredo(addr: &Ipv6Addr) -> bool {
    let seg = addr.segments();
    seg[0] == 0x2001 && seg[1] == 0
}

/// `2002::/16`, 6to4.
fn is_6to4(addr: &Ipv6Addr) -> bool {
    addr.segments()[0] == 0x2002
}

/// `3ffe::/16`, 6bone.
fn is_6bone(addr: &Ipv6Addr) -> bool {
    addr.segments()[0] == 0x3FFE
}

/// `fc00::/7`, unique local.
fn is_unique_local(addr: &Ipv6Addr) -> bool {
    addr.segments()[0] & 0xFE00 == 0xFC00
}

//============ Testing =======================================================

#[cfg(test)]
mod test {
    use super::*;
    use std::str::FromStr;

    fn addr(s: &str) -> Ipv6Addr {
        Ipv6Addr::from_str(s).unwrap()
    }

    #[test]
    fn scope_of_unicast() {
        assert_eq!(Scope::of(&addr("::1")), Scope::LinkLocal);
        assert_eq!(Scope::of(&addr("fe80::1")), Scope::LinkLocal);
        assert_eq!(Scope::of(&addr("::ffff:169.254.13.78")), Scope::LinkLocal);
        assert_eq!(Scope::of(&addr("::ffff:127.0.0.1")), Scope::LinkLocal);
        assert_eq!(Scope::of(&addr("fec0::1")), Scope::SiteLocal);
        assert_eq!(Scope::of(&addr("2001:db8:1::1")), Scope::Global);
        assert_eq!(Scope::of(&addr("::ffff:198.51.100.121")), Scope::Global);
        // Unique local and NAT64 synthesis count as global.
        assert_eq!(Scope::of(&addr("fc00::1")), Scope::Global);
        assert_eq!(Scope::of(&addr("fd12::1")), Scope::Global);
        assert_eq!(Scope::of(&addr("64:ff9b::c633:6479")), Scope::Global);
    }

    #[test]
    fn scope_of_multicast() {
        // Multicast addresses carry their scope in the low nibble of the
        // first word.
        assert_eq!(Scope::of(&addr("ff02::1")), Scope::LinkLocal);
        assert_eq!(Scope::of(&addr("ff05::1")), Scope::SiteLocal);
        assert_eq!(Scope::of(&addr("ff0e::1")), Scope::Global);
        assert_eq!(Scope::of(&addr("ff00::1")), Scope::Reserved);
        assert_eq!(Scope::of(&addr("ff08::1")), Scope::Int(0x8));
    }

    #[test]
    fn label_of() {
        assert_eq!(Label::of(&addr("::1")), Label::Localhost);
        assert_eq!(Label::of(&addr("::ffff:10.1.2.3")), Label::V4Mapped);
        assert_eq!(Label::of(&addr("::10.1.2.3")), Label::V4Compatible);
        assert_eq!(Label::of(&addr("2001::1")), Label::Teredo);
        assert_eq!(Label::of(&addr("2002:c633:6401::1")), Label::SixToFour);
        assert_eq!(Label::of(&addr("3ffe::1")), Label::SixBone);
        assert_eq!(Label::of(&addr("fec0::1")), Label::SiteLocal);
        assert_eq!(Label::of(&addr("fc00::1")), Label::UniqueLocal);
        assert_eq!(Label::of(&addr("fd00::1")), Label::UniqueLocal);
        assert_eq!(Label::of(&addr("2001:db8:1::1")), Label::General);
        assert_eq!(Label::of(&addr("fe80::1")), Label::General);
        assert_eq!(Label::of(&addr("64:ff9b::c633:6479")), Label::General);
    }

    #[test]
    fn label_longest_prefix_wins() {
        // `::1` lies within `::/96` but the /128 row wins.
        assert_eq!(Label::of(&addr("::1")), Label::Localhost);
        // `::ffff:0:0/96` wins over `::/0`.
        assert_eq!(Label::of(&addr("::ffff:0.0.0.1")), Label::V4Mapped);
        // `2001::/32` wins over `::/0` but `2001:db8::` is not Teredo.
        assert_eq!(Label::of(&addr("2001:0:1::1")), Label::Teredo);
        assert_eq!(Label::of(&addr("2001:db8::1")), Label::General);
    }

    #[test]
    fn precedence() {
        assert_eq!(Label::Localhost.precedence(), 50);
        assert_eq!(Label::General.precedence(), 40);
        assert_eq!(Label::V4Mapped.precedence(), 35);
        assert_eq!(Label::SixToFour.precedence(), 30);
        assert_eq!(Label::Teredo.precedence(), 5);
        assert_eq!(Label::UniqueLocal.precedence(), 3);
        assert_eq!(Label::V4Compatible.precedence(), 1);
        assert_eq!(Label::SiteLocal.precedence(), 1);
        assert_eq!(Label::SixBone.precedence(), 1);
        assert_eq!(Label::Int(0x1F).precedence(), 0);
    }

    #[test]
    fn classification_is_total() {
        let corpus = [
            "::", "::1", "::ffff:127.0.0.1", "::ffff:169.254.1.1",
            "::ffff:8.8.8.8", "::10.0.0.1", "fe80::1", "fec0::1", "fc00::1",
            "2001::1", "2001:db8::1", "2002::1", "3ffe::1",
            "64:ff9b::c633:6479", "ff02::1", "ff05::1", "ff0e::1", "ff1f::1",
        ];
        for s in corpus {
            let a = addr(s);
            assert!(Scope::of(&a).to_int() <= 0xF, "scope of {}", s);
            assert!(Label::of(&a).to_int() <= 0x1F, "label of {}", s);
        }
    }

    #[test]
    fn int_enum_conversions() {
        assert_eq!(Scope::from_int(0x2), Scope::LinkLocal);
        assert_eq!(Scope::from_int(0x7), Scope::Int(0x7));
        assert_eq!(Scope::LinkLocal.to_int(), 0x2);
        assert_eq!(Scope::LinkLocal.to_string(), "link-local");
        assert_eq!(Scope::Int(0x7).to_string(), "7");
        assert_eq!(Label::from_int(0xD), Label::UniqueLocal);
        assert_eq!(Label::Int(0xD), Label::UniqueLocal);
        assert!(Scope::LinkLocal < Scope::Global);
    }
}
