//! Conversion from recognized token text to typed values.

use crate::TokenShape;

/// A type the scanner can read with [`Scanner::read`](crate::Scanner::read).
///
/// `SHAPE` picks the recognizer that produces the token; `from_token`
/// converts it. The token handed to `from_token` always matches `SHAPE`,
/// so conversion only has to deal with range and precision.
pub trait FromToken: Sized {
    /// Lexical shape of tokens for this type.
    const SHAPE: TokenShape;

    /// Type name used in conversion errors.
    const NAME: &'static str;

    /// Convert token text, returning a human-readable reason on failure.
    fn from_token(token: &str) -> Result<Self, String>;
}

macro_rules! integer_from_token {
    ($shape:expr => $($ty:ty),* $(,)?) => {
        $(
            impl FromToken for $ty {
                const SHAPE: TokenShape = $shape;
                const NAME: &'static str = stringify!($ty);

                fn from_token(token: &str) -> Result<Self, String> {
                    token.parse().map_err(|e: std::num::ParseIntError| e.to_string())
                }
            }
        )*
    };
}

integer_from_token!(TokenShape::Unsigned => u8, u16, u32, u64, u128, usize);
integer_from_token!(TokenShape::Signed => i8, i16, i32, i64, i128, isize);

macro_rules! float_from_token {
    ($($ty:ty),* $(,)?) => {
        $(
            impl FromToken for $ty {
                const SHAPE: TokenShape = TokenShape::Decimal;
                const NAME: &'static str = stringify!($ty);

                /// Tokens whose magnitude overflows to infinity are rejected.
                fn from_token(token: &str) -> Result<Self, String> {
                    let value: $ty = token
                        .parse()
                        .map_err(|e: std::num::ParseFloatError| e.to_string())?;
                    if value.is_finite() {
                        Ok(value)
                    } else {
                        Err(format!("number out of range for {}", stringify!($ty)))
                    }
                }
            }
        )*
    };
}

float_from_token!(f32, f64);
