use pretty_assertions::assert_eq;

use crate::{Decimal, ScanError, ScanResult, Scanner, StrSource, TokenShape};

fn read_ok<T>(result: ScanResult<T>) -> T {
    match result {
        Ok(value) => value,
        Err(e) => panic!("expected success, got {e}"),
    }
}

fn is_malformed<T>(result: &ScanResult<T>, shape: TokenShape) -> bool {
    matches!(result, Err(ScanError::Malformed(s)) if *s == shape)
}

/// Recognize one decimal token from `input`, returning it and the rest.
fn decimal_token(input: &str) -> (ScanResult<String>, String) {
    let mut source = StrSource::new(input);
    let mut scanner = Scanner::new(&mut source);
    let token = scanner.read_decimal_token();
    let rest = read_ok(scanner.read_all());
    (token, rest)
}

// === Digits ===

#[test]
fn read_digits_stops_at_non_digit() {
    let mut source = StrSource::new("0123abc");
    let mut scanner = Scanner::new(&mut source);
    assert_eq!(read_ok(scanner.read_digits()), "0123");
    assert_eq!(read_ok(scanner.read_all()), "abc");
}

#[test]
fn read_digits_does_not_skip_whitespace() {
    let mut source = StrSource::new(" 12");
    let mut scanner = Scanner::new(&mut source);
    assert!(is_malformed(&scanner.read_digits(), TokenShape::Digits));
    assert_eq!(read_ok(scanner.read_all()), " 12");
}

#[test]
fn read_digits_failure_keeps_peeked_chars() {
    let mut source = StrSource::new("x12");
    let mut scanner = Scanner::new(&mut source);
    read_ok(scanner.peek_n(3));
    assert!(is_malformed(&scanner.read_digits(), TokenShape::Digits));
    assert_eq!(read_ok(scanner.peek_n(3)), &['x', '1', '2']);
}

#[test]
fn read_digits_at_end_of_source() {
    let mut source = StrSource::new("");
    let mut scanner = Scanner::new(&mut source);
    assert!(matches!(scanner.read_digits(), Err(ScanError::EndOfSource)));
}

#[test]
fn read_digits_rejects_non_ascii_digits() {
    // ARABIC-INDIC DIGIT ONE
    let mut source = StrSource::new("\u{661}");
    let mut scanner = Scanner::new(&mut source);
    assert!(is_malformed(&scanner.read_digits(), TokenShape::Digits));
}

// === Integer tokens ===

#[test]
fn unsigned_token_skips_whitespace() {
    let mut source = StrSource::new("  \n42 7");
    let mut scanner = Scanner::new(&mut source);
    assert_eq!(read_ok(scanner.read_unsigned_int_token()), "42");
    assert_eq!(read_ok(scanner.read_unsigned_int_token()), "7");
    assert!(matches!(
        scanner.read_unsigned_int_token(),
        Err(ScanError::EndOfSource)
    ));
}

#[test]
fn unsigned_token_rejects_sign() {
    let mut source = StrSource::new("-5");
    let mut scanner = Scanner::new(&mut source);
    assert!(is_malformed(
        &scanner.read_unsigned_int_token(),
        TokenShape::Unsigned
    ));
    assert_eq!(read_ok(scanner.read_all()), "-5");
}

#[test]
fn int_token_with_and_without_sign() {
    let mut source = StrSource::new("-12 34 -0");
    let mut scanner = Scanner::new(&mut source);
    assert_eq!(read_ok(scanner.read_int_token()), "-12");
    assert_eq!(read_ok(scanner.read_int_token()), "34");
    assert_eq!(read_ok(scanner.read_int_token()), "-0");
}

#[test]
fn int_token_bare_minus_is_rolled_back() {
    let mut source = StrSource::new(" -x");
    let mut scanner = Scanner::new(&mut source);
    assert!(is_malformed(&scanner.read_int_token(), TokenShape::Signed));
    assert_eq!(read_ok(scanner.read_char()), '-');
    assert_eq!(read_ok(scanner.read_char()), 'x');
}

#[test]
fn int_token_stops_before_fraction() {
    let mut source = StrSource::new("12.5");
    let mut scanner = Scanner::new(&mut source);
    assert_eq!(read_ok(scanner.read_int_token()), "12");
    assert_eq!(read_ok(scanner.read_all()), ".5");
}

// === Decimal tokens ===

#[test]
fn decimal_token_valid_shapes() {
    for (input, token) in [
        ("123", "123"),
        ("-123", "-123"),
        ("123.45", "123.45"),
        (".45", ".45"),
        ("-.45", "-.45"),
        ("123.", "123."),
        ("  -0.5 ", "-0.5"),
    ] {
        let (result, _) = decimal_token(input);
        assert_eq!(read_ok(result), token, "input {input:?}");
    }
}

#[test]
fn decimal_token_leaves_following_text() {
    let (result, rest) = decimal_token("1.5.2");
    assert_eq!(read_ok(result), "1.5");
    assert_eq!(rest, ".2");

    let (result, rest) = decimal_token("7.x");
    assert_eq!(read_ok(result), "7.");
    assert_eq!(rest, "x");
}

#[test]
fn decimal_token_rejects_bare_minus() {
    let (result, rest) = decimal_token("-");
    assert!(is_malformed(&result, TokenShape::Decimal));
    assert_eq!(rest, "-");
}

#[test]
fn decimal_token_rejects_bare_point() {
    let (result, rest) = decimal_token(".");
    assert!(is_malformed(&result, TokenShape::Decimal));
    assert_eq!(rest, ".");
}

#[test]
fn decimal_token_rejects_minus_point() {
    let (result, rest) = decimal_token("-.abc");
    assert!(is_malformed(&result, TokenShape::Decimal));
    assert_eq!(rest, "-.abc");
}

#[test]
fn decimal_token_rejects_word() {
    let (result, rest) = decimal_token("  abc");
    assert!(is_malformed(&result, TokenShape::Decimal));
    // Leading whitespace was discarded; the word is untouched.
    assert_eq!(rest, "abc");
}

#[test]
fn decimal_token_end_of_source() {
    let (result, _) = decimal_token("   ");
    assert!(matches!(result, Err(ScanError::EndOfSource)));

    let (result, _) = decimal_token("");
    assert!(matches!(result, Err(ScanError::EndOfSource)));
}

#[test]
fn typed_reader_after_trailing_whitespace_is_end_of_source() {
    let mut source = StrSource::new("1 2 \n ");
    let mut scanner = Scanner::new(&mut source);
    assert_eq!(read_ok(scanner.read_u16()), 1);
    assert_eq!(read_ok(scanner.read_u16()), 2);
    assert!(matches!(scanner.read_u16(), Err(ScanError::EndOfSource)));
}

// Rollback restores the whole partial token no matter how much lookahead is
// buffered when the parse fails (not only when exactly one char is buffered).

#[test]
fn decimal_rollback_with_single_char_buffered() {
    let mut source = StrSource::new("-.");
    let mut scanner = Scanner::new(&mut source);
    assert!(is_malformed(
        &scanner.read_decimal_token(),
        TokenShape::Decimal
    ));
    assert_eq!(scanner.buffered(), 2);
    assert_eq!(read_ok(scanner.read_all()), "-.");
}

#[test]
fn decimal_rollback_with_deep_lookahead() {
    let mut source = StrSource::new("-.q rest of input");
    let mut scanner = Scanner::new(&mut source);
    read_ok(scanner.peek_n(12));
    assert!(is_malformed(
        &scanner.read_decimal_token(),
        TokenShape::Decimal
    ));
    assert_eq!(scanner.buffered(), 12);
    assert_eq!(read_ok(scanner.read_token()), "-.q");
    assert_eq!(read_ok(scanner.read_all()), " rest of input");
}

#[test]
fn decimal_retry_after_failure_sees_original_stream() {
    let mut source = StrSource::new("-abc");
    let mut scanner = Scanner::new(&mut source);
    assert!(scanner.read_decimal_token().is_err());
    assert!(scanner.read_decimal_token().is_err());
    assert_eq!(read_ok(scanner.read_token()), "-abc");
}

// === Typed readers ===

#[test]
fn typed_integers() {
    let mut source = StrSource::new("255 -128 -32768 65535 -2147483648 4294967295 -9 18446744073709551615");
    let mut scanner = Scanner::new(&mut source);
    assert_eq!(read_ok(scanner.read_u8()), 255);
    assert_eq!(read_ok(scanner.read_i8()), -128);
    assert_eq!(read_ok(scanner.read_i16()), i16::MIN);
    assert_eq!(read_ok(scanner.read_u16()), u16::MAX);
    assert_eq!(read_ok(scanner.read_i32()), i32::MIN);
    assert_eq!(read_ok(scanner.read_u32()), u32::MAX);
    assert_eq!(read_ok(scanner.read_i64()), -9);
    assert_eq!(read_ok(scanner.read_u64()), u64::MAX);
}

#[test]
fn typed_floats() {
    let mut source = StrSource::new("1.5 -.25 3. 10");
    let mut scanner = Scanner::new(&mut source);
    assert!((read_ok(scanner.read_f32()) - 1.5).abs() < f32::EPSILON);
    assert!((read_ok(scanner.read_f64()) + 0.25).abs() < f64::EPSILON);
    assert!((read_ok(scanner.read_f64()) - 3.0).abs() < f64::EPSILON);
    assert!((read_ok(scanner.read_f64()) - 10.0).abs() < f64::EPSILON);
}

#[test]
fn typed_decimal_keeps_precision() {
    let digits = "3.14159265358979323846264338327950288419716939937510";
    let mut source = StrSource::new(digits);
    let mut scanner = Scanner::new(&mut source);
    let value: Decimal = read_ok(scanner.read_decimal());
    assert_eq!(value.to_string(), digits);
}

#[test]
fn generic_read() {
    let mut source = StrSource::new("12 -3 0.5");
    let mut scanner = Scanner::new(&mut source);
    let a: usize = read_ok(scanner.read());
    let b: i128 = read_ok(scanner.read());
    let c: f64 = read_ok(scanner.read());
    assert_eq!((a, b), (12, -3));
    assert!((c - 0.5).abs() < f64::EPSILON);
}

#[test]
fn conversion_failure_is_distinct_and_consumes_token() {
    let mut source = StrSource::new("256 7");
    let mut scanner = Scanner::new(&mut source);
    match scanner.read_u8() {
        Err(ScanError::Conversion { token, target, .. }) => {
            assert_eq!(token, "256");
            assert_eq!(target, "u8");
        }
        other => panic!("expected conversion error, got {other:?}"),
    }
    assert_eq!(read_ok(scanner.read_u8()), 7);
}

#[test]
fn out_of_range_integers() {
    let mut source = StrSource::new("-129 99999999999999999999 -1");
    let mut scanner = Scanner::new(&mut source);
    assert!(matches!(scanner.read_i8(), Err(ScanError::Conversion { .. })));
    assert!(matches!(scanner.read_i64(), Err(ScanError::Conversion { .. })));
    // Unsigned readers never accept a sign; that is a shape failure.
    assert!(is_malformed(&scanner.read_u32(), TokenShape::Unsigned));
}

#[test]
fn float_overflow_is_conversion_failure() {
    let huge = format!("{}.0", "9".repeat(50));
    let mut source = StrSource::new(&huge);
    let mut scanner = Scanner::new(&mut source);
    assert!(matches!(
        scanner.read_f32(),
        Err(ScanError::Conversion { target: "f32", .. })
    ));
}

#[test]
fn malformed_number_then_token() {
    let mut source = StrSource::new("  abc 5");
    let mut scanner = Scanner::new(&mut source);
    assert!(is_malformed(&scanner.read_i32(), TokenShape::Signed));
    assert_eq!(read_ok(scanner.read_token()), "abc");
    assert_eq!(read_ok(scanner.read_i32()), 5);
}

// === Properties ===

mod proptest_numeric {
    use proptest::prelude::*;

    use crate::{Decimal, ScanError, Scanner, StrSource};

    proptest! {
        #[test]
        fn integers_round_trip(values in proptest::collection::vec(any::<i64>(), 0..16)) {
            let text = values
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(" \n");
            let mut source = StrSource::new(&text);
            let mut scanner = Scanner::new(&mut source);
            for expected in &values {
                prop_assert_eq!(scanner.read_i64().ok(), Some(*expected));
            }
            prop_assert!(matches!(scanner.read_i64(), Err(ScanError::EndOfSource)));
        }

        #[test]
        fn decimal_text_round_trips(
            negative in any::<bool>(),
            whole in "[0-9]{0,30}",
            fraction in proptest::option::of("[0-9]{0,30}"),
        ) {
            prop_assume!(!whole.is_empty() || fraction.as_ref().is_some_and(|f| !f.is_empty()));
            let mut text = String::new();
            if negative {
                text.push('-');
            }
            text.push_str(&whole);
            if let Some(fraction) = &fraction {
                text.push('.');
                text.push_str(fraction);
            }
            let mut source = StrSource::new(&text);
            let mut scanner = Scanner::new(&mut source);
            let read = scanner.read_decimal().ok();
            let parsed: Option<Decimal> = text.parse().ok();
            prop_assert!(read.is_some());
            prop_assert_eq!(&read, &parsed);
            let reparsed: Option<Decimal> = read.as_ref().and_then(|d| d.to_string().parse().ok());
            prop_assert_eq!(reparsed, read);
        }

        #[test]
        fn failed_decimal_leaves_stream_unchanged(
            junk in "[-.]{1,2}[a-z ]{0,10}",
            lookahead in 0usize..16,
        ) {
            let mut source = StrSource::new(&junk);
            let mut scanner = Scanner::new(&mut source);
            let _ = scanner.peek_n(lookahead);
            prop_assert!(scanner.read_decimal_token().is_err());
            prop_assert_eq!(scanner.read_all().ok(), Some(junk.clone()));
        }
    }
}
