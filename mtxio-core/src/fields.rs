//! Reference scalar fields
//!
//! Small [`Field`] implementations used by the bundled demos and tests.
//! Any other arithmetic engine plugs in by implementing the trait.

use core::fmt::Write;

use crate::traits::Field;

/// Prime field `Z/pZ` with elements stored as canonical residues
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Modular {
    modulus: u64,
}

impl Modular {
    /// Create the field with the given modulus
    ///
    /// Returns `None` for moduli below 2.
    pub const fn new(modulus: u64) -> Option<Self> {
        if modulus < 2 {
            None
        } else {
            Some(Self { modulus })
        }
    }

    pub const fn modulus(&self) -> u64 {
        self.modulus
    }

    /// Reduce a signed integer into `[0, p)`
    pub fn reduce(&self, value: i128) -> u64 {
        value.rem_euclid(self.modulus as i128) as u64
    }
}

impl Field for Modular {
    type Element = u64;

    fn parse_scalar(&self, token: &str) -> Option<u64> {
        let value: i128 = token.parse().ok()?;
        Some(self.reduce(value))
    }

    fn write_scalar<W: Write>(&self, out: &mut W, a: &u64) -> core::fmt::Result {
        write!(out, "{a}")
    }

    fn is_zero(&self, a: &u64) -> bool {
        *a % self.modulus == 0
    }

    fn zero(&self) -> u64 {
        0
    }

    fn one(&self) -> u64 {
        1
    }
}

/// Two-element field, elements are `bool`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Gf2;

impl Field for Gf2 {
    type Element = bool;

    fn parse_scalar(&self, token: &str) -> Option<bool> {
        let value: i128 = token.parse().ok()?;
        Some(value.rem_euclid(2) == 1)
    }

    fn write_scalar<W: Write>(&self, out: &mut W, a: &bool) -> core::fmt::Result {
        out.write_char(if *a { '1' } else { '0' })
    }

    fn is_zero(&self, a: &bool) -> bool {
        !*a
    }

    fn zero(&self) -> bool {
        false
    }

    fn one(&self) -> bool {
        true
    }
}

/// Machine integers
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Integers;

impl Field for Integers {
    type Element = i64;

    fn parse_scalar(&self, token: &str) -> Option<i64> {
        token.parse().ok()
    }

    fn write_scalar<W: Write>(&self, out: &mut W, a: &i64) -> core::fmt::Result {
        write!(out, "{a}")
    }

    fn is_zero(&self, a: &i64) -> bool {
        *a == 0
    }

    fn zero(&self) -> i64 {
        0
    }

    fn one(&self) -> i64 {
        1
    }
}

/// Double precision reals
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Reals;

impl Field for Reals {
    type Element = f64;

    fn parse_scalar(&self, token: &str) -> Option<f64> {
        token.parse().ok()
    }

    fn write_scalar<W: Write>(&self, out: &mut W, a: &f64) -> core::fmt::Result {
        write!(out, "{a}")
    }

    fn is_zero(&self, a: &f64) -> bool {
        *a == 0.0
    }

    fn zero(&self) -> f64 {
        0.0
    }

    fn one(&self) -> f64 {
        1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::String;

    #[test]
    fn test_modular_reduces_tokens() {
        let field = Modular::new(7).unwrap();
        assert_eq!(field.parse_scalar("10"), Some(3));
        assert_eq!(field.parse_scalar("-1"), Some(6));
        assert_eq!(field.parse_scalar("x"), None);
        assert!(field.is_zero(&0));
        assert!(Modular::new(1).is_none());
    }

    #[test]
    fn test_gf2_parity() {
        assert_eq!(Gf2.parse_scalar("3"), Some(true));
        assert_eq!(Gf2.parse_scalar("-2"), Some(false));
        let mut out = String::new();
        Gf2.write_scalar(&mut out, &true).unwrap();
        Gf2.write_scalar(&mut out, &false).unwrap();
        assert_eq!(out, "10");
    }

    #[test]
    fn test_reals_and_integers() {
        assert_eq!(Reals.parse_scalar("2.5"), Some(2.5));
        assert!(Reals.is_zero(&0.0));
        assert_eq!(Integers.parse_scalar("-42"), Some(-42));
        assert_eq!(Integers.parse_scalar("4.2"), None);
        let mut out = String::new();
        Integers.write_scalar(&mut out, &-42).unwrap();
        assert_eq!(out, "-42");
    }
}
