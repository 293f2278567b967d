//! Fast/slow path equivalence: for digit-string lengths 1..=24 the engine
//! must agree with a reference wide-arithmetic parser, on both sides of
//! every SWAR word boundary.

use rstest::rstest;
use textscan::{ScanError, ScanInt, Sign, parse_int};

/// Reference decimal parser in 128-bit arithmetic.
fn reference_parse(digits: &[u8], limit: u64) -> Result<u64, ()> {
    let mut acc: u128 = 0;
    for &unit in digits {
        assert!(unit.is_ascii_digit());
        acc = acc * 10 + u128::from(unit - b'0');
        if acc > u128::from(limit) {
            return Err(());
        }
    }
    Ok(u64::try_from(acc).unwrap())
}

fn check_against_reference<T>(digits: &[u8], sign: Sign, limit: u64)
where
    T: ScanInt + PartialEq + core::fmt::Debug,
{
    let mut parsed = T::from_magnitude(0, Sign::Plus);
    let engine = parse_int(digits, &mut parsed, sign, 10);
    let text = core::str::from_utf8(digits).unwrap();
    match reference_parse(digits, limit) {
        Ok(magnitude) => {
            assert_eq!(engine, Ok(digits.len()), "engine rejected {text:?}");
            assert_eq!(
                parsed,
                T::from_magnitude(magnitude, sign),
                "wrong value for {text:?}"
            );
        }
        Err(()) => {
            match engine {
                Err(ScanError::ValueOutOfRange(_)) => {}
                other => panic!("expected out of range for {text:?}, got {other:?}"),
            }
            assert_eq!(parsed, T::saturated(sign), "missing saturation for {text:?}");
        }
    }
}

fn patterns(len: usize) -> Vec<Vec<u8>> {
    let template = b"123456789012345678901234";
    let mut cases = vec![
        template[..len].to_vec(),
        vec![b'9'; len],
        vec![b'0'; len],
        vec![b'1'; len],
    ];
    // A leading-zero run pushing the significant digits across a word
    // boundary.
    let mut padded = vec![b'0'; len.saturating_sub(3)];
    padded.extend_from_slice(&template[..len - padded.len()]);
    cases.push(padded);
    cases
}

#[rstest]
fn engine_matches_reference(
    #[values(1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16, 17, 18, 19, 20, 21, 22, 23, 24)]
    len: usize,
) {
    for digits in patterns(len) {
        check_against_reference::<u64>(&digits, Sign::Plus, u64::MAX);
        check_against_reference::<i64>(&digits, Sign::Plus, i64::MAX as u64);
        check_against_reference::<i64>(&digits, Sign::Minus, i64::MAX as u64 + 1);
        check_against_reference::<u32>(&digits, Sign::Plus, u64::from(u32::MAX));
        check_against_reference::<i32>(&digits, Sign::Plus, i32::MAX as u64);
        // Fast path disabled for the narrow types: the same inputs must
        // agree through the scalar loop alone.
        check_against_reference::<i16>(&digits, Sign::Plus, i16::MAX as u64);
        check_against_reference::<u8>(&digits, Sign::Plus, u64::from(u8::MAX));
    }
}

#[rstest]
fn word_boundary_tail_handling(#[values(7, 8, 9, 15, 16, 17)] len: usize) {
    // Around each SWAR word boundary, vary the final digit to cross the
    // overflow threshold one unit at a time.
    for last in b'0'..=b'9' {
        let mut digits = vec![b'9'; len - 1];
        digits.push(last);
        check_against_reference::<u64>(&digits, Sign::Plus, u64::MAX);
        check_against_reference::<i32>(&digits, Sign::Plus, i32::MAX as u64);
        check_against_reference::<i32>(&digits, Sign::Minus, i32::MAX as u64 + 1);
    }
}

#[test]
fn mixed_tail_terminates_identically() {
    // The engine stops at the first non-digit; the reference sees only the
    // digit prefix. Exercise a non-digit at every offset within the first
    // two words.
    let base = b"123456789012345678";
    for cut in 1..base.len() {
        let mut digits = base.to_vec();
        digits[cut] = b'x';
        let mut parsed = 0u64;
        let consumed = parse_int(&digits, &mut parsed, Sign::Plus, 10).unwrap();
        assert_eq!(consumed, cut, "wrong stop at offset {cut}");
        let mut reference = 0u64;
        let reference_consumed =
            parse_int(&digits[..cut], &mut reference, Sign::Plus, 10).unwrap();
        assert_eq!(reference_consumed, cut);
        assert_eq!(parsed, reference);
    }
}
