//! Macros making implementing the integer-backed types easier.

/// Creates a standard type wrapping an integer.
///
/// This adds impls for `From`, `PartialEq`, `Eq`, `PartialOrd`, `Ord`,
/// `Hash`, and `Display`. Values without a well-defined variant are kept in
/// the raw `Int` variant.
macro_rules! int_enum {
    ( $(#[$attr:meta])* =>
      $name:ident, $int:path;
      $( $(#[$variant_attr:meta])* ( $variant:ident =>
                                        $value:expr, $mnemonic:expr) )* ) => {
        $(#[$attr])*
        #[derive(Clone, Copy, Debug)]
        pub enum $name {
            $( $(#[$variant_attr])* $variant ),*,

            /// A raw value given through its integer.
            Int($int)
        }

        impl $name {
            /// Returns a value from its raw integer value.
            #[must_use]
            pub const fn from_int(value: $int) -> Self {
                match value {
                    $( $value => $name::$variant ),*,
                    _ => $name::Int(value)
                }
            }

            /// Returns the raw integer value for a value.
            #[must_use]
            pub const fn to_int(self) -> $int {
                match self {
                    $( $name::$variant => $value ),*,
                    $name::Int(value) => value
                }
            }

            /// Returns the mnemonic for this value if there is one.
            ///
            /// This will also return a mnemonic if a well-defined variant
            /// is hidden in a `Int` variant.
            #[must_use]
            pub const fn to_mnemonic(self) -> Option<&'static str> {
                match self {
                    $( $name::$variant => Some($mnemonic) ),*,
                    $name::Int(value) => {
                        match $name::from_int(value) {
                            $name::Int(_) => None,
                            value => value.to_mnemonic()
                        }
                    }
                }
            }
        }

        //--- From

        impl From<$int> for $name {
            fn from(value: $int) -> Self {
                $name::from_int(value)
            }
        }

        impl From<$name> for $int {
            fn from(value: $name) -> Self {
                value.to_int()
            }
        }

        //--- PartialEq and Eq

        impl PartialEq for $name {
            fn eq(&self, other: &Self) -> bool {
                self.to_int() == other.to_int()
            }
        }

        impl PartialEq<$int> for $name {
            fn eq(&self, other: &$int) -> bool {
                self.to_int() == *other
            }
        }

        impl PartialEq<$name> for $int {
            fn eq(&self, other: &$name) -> bool {
                *self == other.to_int()
            }
        }

        impl Eq for $name {}

        //--- PartialOrd and Ord

        impl PartialOrd for $name {
            fn partial_cmp(
                &self, other: &Self
            ) -> Option<::std::cmp::Ordering> {
                Some(self.cmp(other))
            }
        }

        impl PartialOrd<$int> for $name {
            fn partial_cmp(
                &self, other: &$int
            ) -> Option<::std::cmp::Ordering> {
                self.to_int().partial_cmp(other)
            }
        }

        impl PartialOrd<$name> for $int {
            fn partial_cmp(
                &self, other: &$name
            ) -> Option<::std::cmp::Ordering> {
                self.partial_cmp(&other.to_int())
            }
        }

        impl Ord for $name {
            fn cmp(&self, other: &Self) -> ::std::cmp::Ordering {
                self.to_int().cmp(&other.to_int())
            }
        }

        //--- Hash

        impl ::std::hash::Hash for $name {
            fn hash<H: ::std::hash::Hasher>(&self, state: &mut H) {
                self.to_int().hash(state)
            }
        }

        //--- Display

        impl ::std::fmt::Display for $name {
            fn fmt(
                &self, f: &mut ::std::fmt::Formatter
            ) -> ::std::fmt::Result {
                match self.to_mnemonic() {
                    Some(m) => f.write_str(m),
                    None => write!(f, "{}", self.to_int()),
                }
            }
        }
    }
}
