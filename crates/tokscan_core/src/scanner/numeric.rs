//! Numeric token recognition and typed readers.
//!
//! Recognition and conversion are separate steps. Recognition consumes a
//! token of the right lexical shape or fails with [`ScanError::Malformed`],
//! putting back whatever it consumed. Conversion then hands the token text
//! to [`FromToken`]; a token that does not fit the target type fails with
//! [`ScanError::Conversion`] and stays consumed.
//!
//! Every recognizer fails with [`ScanError::EndOfSource`] rather than
//! `Malformed` when no characters remain where the token should start.
//!
//! Accepted decimal shapes: `123`, `-123`, `123.45`, `.45`, `-.45`, `123.`.
//! Rejected: the empty token, bare `-`, bare `.`, and `-.`.

use super::Scanner;
use crate::{CharSource, Decimal, FromToken, ScanError, ScanResult, TokenShape};

/// Generates the fixed-type reader methods, all forwarding to [`Scanner::read`].
macro_rules! typed_readers {
    ($($(#[$doc:meta])* $name:ident => $ty:ty;)*) => {
        $(
            $(#[$doc])*
            #[inline]
            pub fn $name(&mut self) -> ScanResult<$ty> {
                self.read::<$ty>()
            }
        )*
    };
}

impl<S: CharSource + ?Sized> Scanner<'_, S> {
    // === Token shapes ===

    /// Consume a run of ASCII digits onto `token`.
    ///
    /// Returns whether at least one digit was consumed.
    fn eat_digits(&mut self, token: &mut String) -> ScanResult<bool> {
        let start = token.len();
        while let Some(c) = self.try_peek()? {
            if !c.is_ascii_digit() {
                break;
            }
            token.push(c);
            self.advance();
        }
        Ok(token.len() > start)
    }

    /// Consume a leading `-` onto `token`, if present.
    fn eat_minus(&mut self, token: &mut String) -> ScanResult<()> {
        if self.try_peek()? == Some('-') {
            self.advance();
            token.push('-');
        }
        Ok(())
    }

    /// Fail with [`ScanError::EndOfSource`] if nothing is left to recognize.
    fn expect_more(&mut self) -> ScanResult<()> {
        if self.is_at_end()? {
            return Err(ScanError::EndOfSource);
        }
        Ok(())
    }

    /// Read one or more decimal digits, without skipping whitespace.
    ///
    /// Fails with [`ScanError::Malformed`] if the next character is not a
    /// digit; nothing is consumed in that case.
    pub fn read_digits(&mut self) -> ScanResult<String> {
        self.expect_more()?;
        self.speculate(|this, token| {
            if this.eat_digits(token)? {
                Ok(())
            } else {
                Err(ScanError::Malformed(TokenShape::Digits))
            }
        })
    }

    /// Skip whitespace, then read an unsigned digit run.
    #[tracing::instrument(level = "trace", skip(self))]
    pub fn read_unsigned_int_token(&mut self) -> ScanResult<String> {
        self.discard_whitespace()?;
        self.expect_more()?;
        self.speculate(|this, token| {
            if this.eat_digits(token)? {
                Ok(())
            } else {
                Err(ScanError::Malformed(TokenShape::Unsigned))
            }
        })
    }

    /// Skip whitespace, then read digits with an optional leading `-`.
    ///
    /// A `-` not followed by a digit is put back.
    #[tracing::instrument(level = "trace", skip(self))]
    pub fn read_int_token(&mut self) -> ScanResult<String> {
        self.discard_whitespace()?;
        self.expect_more()?;
        self.speculate(|this, token| {
            this.eat_minus(token)?;
            if this.eat_digits(token)? {
                Ok(())
            } else {
                Err(ScanError::Malformed(TokenShape::Signed))
            }
        })
    }

    /// Skip whitespace, then read a decimal number token.
    ///
    /// Both the integer part and the fraction are optional, but not both.
    /// On failure the whole partial token (sign, point) is put back at the
    /// front of the buffer regardless of how much lookahead is buffered.
    #[tracing::instrument(level = "trace", skip(self))]
    pub fn read_decimal_token(&mut self) -> ScanResult<String> {
        self.discard_whitespace()?;
        self.expect_more()?;
        self.speculate(|this, token| {
            this.eat_minus(token)?;
            let has_whole = this.eat_digits(token)?;
            let has_fraction = if this.try_peek()? == Some('.') {
                this.advance();
                token.push('.');
                this.eat_digits(token)?
            } else {
                false
            };
            if has_whole || has_fraction {
                Ok(())
            } else {
                Err(ScanError::Malformed(TokenShape::Decimal))
            }
        })
    }

    // === Typed readers ===

    /// Skip whitespace, recognize a token of `T`'s shape, and convert it.
    pub fn read<T: FromToken>(&mut self) -> ScanResult<T> {
        let token = match T::SHAPE {
            TokenShape::Digits | TokenShape::Unsigned => self.read_unsigned_int_token()?,
            TokenShape::Signed => self.read_int_token()?,
            TokenShape::Decimal => self.read_decimal_token()?,
        };
        T::from_token(&token).map_err(|reason| ScanError::Conversion {
            token,
            target: T::NAME,
            reason,
        })
    }

    typed_readers! {
        /// Read an unsigned byte.
        read_u8 => u8;
        /// Read a signed byte.
        read_i8 => i8;
        read_i16 => i16;
        read_u16 => u16;
        read_i32 => i32;
        read_u32 => u32;
        read_i64 => i64;
        read_u64 => u64;
        /// Read a single-precision float. Values outside the `f32` range are
        /// conversion failures, not infinities.
        read_f32 => f32;
        read_f64 => f64;
        /// Read an arbitrary-precision decimal.
        read_decimal => Decimal;
    }
}

#[cfg(test)]
mod tests;
