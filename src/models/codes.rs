//! Strongly-typed code wrappers for all entity types
//!
//! Entities are keyed by small integer codes. Newtype wrappers prevent
//! accidentally looking up a service with a charge code at compile time.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

/// Macro to generate code newtype wrappers
macro_rules! define_code {
    ($name:ident, $display_prefix:literal) => {
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(u32);

        impl $name {
            /// Wrap a raw code
            pub const fn new(code: u32) -> Self {
                Self(code)
            }

            /// Get the raw code
            pub const fn value(&self) -> u32 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}{}", $display_prefix, self.0)
            }
        }

        impl From<u32> for $name {
            fn from(code: u32) -> Self {
                Self(code)
            }
        }

        impl From<$name> for u32 {
            fn from(code: $name) -> Self {
                code.0
            }
        }

        impl FromStr for $name {
            type Err = ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let s = s.trim();
                let s = s.strip_prefix($display_prefix).unwrap_or(s);
                let s = s.strip_prefix('#').unwrap_or(s);
                Ok(Self(s.parse()?))
            }
        }
    };
}

define_code!(StreetCode, "str-");
define_code!(ServiceCode, "svc-");
define_code!(AccountCode, "acc-");
define_code!(ChargeCode, "chg-");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_display() {
        assert_eq!(AccountCode::new(1).to_string(), "acc-1");
        assert_eq!(ChargeCode::new(10).to_string(), "chg-10");
    }

    #[test]
    fn test_code_parse() {
        assert_eq!("3".parse::<ServiceCode>().unwrap(), ServiceCode::new(3));
        assert_eq!("svc-3".parse::<ServiceCode>().unwrap(), ServiceCode::new(3));
        assert_eq!("#3".parse::<ServiceCode>().unwrap(), ServiceCode::new(3));
        assert!("svc-x".parse::<ServiceCode>().is_err());
    }

    #[test]
    fn test_code_serializes_as_number() {
        let code = StreetCode::new(2);
        assert_eq!(serde_json::to_string(&code).unwrap(), "2");
        let back: StreetCode = serde_json::from_str("2").unwrap();
        assert_eq!(back, code);
    }

    #[test]
    fn test_codes_order_numerically() {
        let mut codes = vec![ChargeCode::new(10), ChargeCode::new(2), ChargeCode::new(1)];
        codes.sort();
        assert_eq!(codes, vec![ChargeCode::new(1), ChargeCode::new(2), ChargeCode::new(10)]);
    }
}
