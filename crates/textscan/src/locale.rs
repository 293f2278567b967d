//! The locale collaborator interface.
//!
//! The engine only needs character classification from a locale: whether a
//! character is a space, whether it is a digit, and the digit's numeric
//! value. Fields that did not request the `L` flag never touch a locale at
//! all; they use a fixed classification table instead (see
//! [`crate::SpacePredicate`]).

/// Character classification as presented by a locale.
///
/// Implementations must be pure: classifying the same character twice must
/// give the same answer within one scan.
pub trait Locale {
    /// Whether `ch` is considered whitespace.
    fn is_space(&self, ch: char) -> bool;

    /// Whether `ch` is considered a decimal digit.
    fn is_digit(&self, ch: char) -> bool;

    /// The numeric value of `ch` as a decimal digit, if it is one.
    fn digit_value(&self, ch: char) -> Option<u32>;
}

/// The classic fixed-table classification: ASCII space and `\t`..`\r`
/// (tab, line feed, vertical tab, form feed, carriage return), ASCII digits.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultLocale;

impl Locale for DefaultLocale {
    #[inline]
    fn is_space(&self, ch: char) -> bool {
        ch == ' ' || ('\t'..='\r').contains(&ch)
    }

    #[inline]
    fn is_digit(&self, ch: char) -> bool {
        ch.is_ascii_digit()
    }

    #[inline]
    fn digit_value(&self, ch: char) -> Option<u32> {
        ch.to_digit(10)
    }
}

/// A localized classification using Unicode's notion of whitespace and
/// numeric characters. The engine engages it only for fields that carry the
/// `L` flag.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnicodeLocale;

impl Locale for UnicodeLocale {
    #[inline]
    fn is_space(&self, ch: char) -> bool {
        ch.is_whitespace()
    }

    #[inline]
    fn is_digit(&self, ch: char) -> bool {
        ch.is_numeric()
    }

    #[inline]
    fn digit_value(&self, ch: char) -> Option<u32> {
        ch.to_digit(10)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_locale_space_table() {
        for ch in [' ', '\t', '\n', '\u{b}', '\u{c}', '\r'] {
            assert!(DefaultLocale.is_space(ch), "{ch:?} should be space");
        }
        for ch in ['a', '0', '\u{a0}', '\u{2028}'] {
            assert!(!DefaultLocale.is_space(ch), "{ch:?} should not be space");
        }
    }

    #[test]
    fn unicode_locale_extends_space_set() {
        assert!(UnicodeLocale.is_space('\u{a0}'));
        assert!(UnicodeLocale.is_space('\u{2028}'));
        assert!(!UnicodeLocale.is_space('x'));
    }

    #[test]
    fn digit_values() {
        assert_eq!(DefaultLocale.digit_value('7'), Some(7));
        assert_eq!(DefaultLocale.digit_value('x'), None);
    }
}
