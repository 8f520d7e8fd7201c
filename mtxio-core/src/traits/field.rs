//! Scalar collaborator for matrix exchange
//!
//! This module defines the trait through which readers and writers touch
//! matrix entries. The exchange layer never inspects a scalar beyond these
//! operations.

/// Field or ring whose elements populate a matrix
///
/// Implementations supply:
/// - token parsing for readers
/// - token printing for writers
/// - the zero test used to skip entries in sparse shapes
/// - the constants `zero` and `one`, used to materialize zero-one entries
pub trait Field {
    /// Element type stored in dense and sparse vectors
    type Element: Clone;

    /// Parse one scalar token
    ///
    /// The token never contains whitespace or bracket punctuation.
    /// Returns `None` if the token is not a valid element.
    fn parse_scalar(&self, token: &str) -> Option<Self::Element>;

    /// Write one scalar token
    fn write_scalar<W: core::fmt::Write>(&self, out: &mut W, a: &Self::Element)
        -> core::fmt::Result;

    /// Test for the additive identity
    fn is_zero(&self, a: &Self::Element) -> bool;

    /// Additive identity
    fn zero(&self) -> Self::Element;

    /// Multiplicative identity
    fn one(&self) -> Self::Element;
}

impl<F: Field + ?Sized> Field for &F {
    type Element = F::Element;

    fn parse_scalar(&self, token: &str) -> Option<Self::Element> {
        (**self).parse_scalar(token)
    }

    fn write_scalar<W: core::fmt::Write>(
        &self,
        out: &mut W,
        a: &Self::Element,
    ) -> core::fmt::Result {
        (**self).write_scalar(out, a)
    }

    fn is_zero(&self, a: &Self::Element) -> bool {
        (**self).is_zero(a)
    }

    fn zero(&self) -> Self::Element {
        (**self).zero()
    }

    fn one(&self) -> Self::Element {
        (**self).one()
    }
}
