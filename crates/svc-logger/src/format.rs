//! printf-style message formatting for [`Logger::printf`](crate::Logger::printf).
//!
//! Supported directives are `%v`, `%s`, `%d`, `%f`, `%q` and `%%`, with an
//! optional `-` or `0` flag, a width and a `.precision`. Every argument is
//! rendered through its `Display` impl. Mismatches never panic; they are
//! written inline instead:
//!
//! | problem                  | output          |
//! |--------------------------|-----------------|
//! | too few arguments        | `%!d(MISSING)`  |
//! | too many arguments       | `%!(EXTRA 4, 5)`|
//! | unknown verb             | `%!x(value)`    |
//! | `%` at end of the format | `%!(NOVERB)`    |
//! | width above 1_000_000    | `%!(BADWIDTH)`  |
//! | precision above 1_000_000| `%!(BADPREC)`   |
//!
//! An out-of-range width or precision is reported and then ignored; the
//! argument is still formatted.

use std::fmt::{Display, Write as _};
use std::iter::Peekable;
use std::str::Chars;

/// Largest accepted width or precision.
const MAX_NUMBER: usize = 1_000_000;

/// Substitute `args` into `format` in order.
pub fn sprintf(format: &str, args: &[&dyn Display]) -> String {
    let mut out = String::with_capacity(format.len() + args.len() * 8);
    let mut next_arg = 0usize;
    let mut chars = format.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '%' {
            out.push(c);
            continue;
        }

        let spec = parse_spec(&mut chars);
        if spec.bad_width {
            out.push_str("%!(BADWIDTH)");
        }
        if spec.bad_precision {
            out.push_str("%!(BADPREC)");
        }
        let Some(verb) = spec.verb else {
            out.push_str("%!(NOVERB)");
            break;
        };
        if verb == '%' {
            out.push('%');
            continue;
        }

        let Some(arg) = args.get(next_arg) else {
            let _ = write!(out, "%!{verb}(MISSING)");
            continue;
        };
        next_arg += 1;

        match verb {
            'v' | 's' | 'd' | 'f' => out.push_str(&spec.pad(render(*arg, spec.precision))),
            'q' => {
                let quoted = format!("{:?}", render(*arg, spec.precision));
                out.push_str(&spec.pad(quoted));
            }
            other => {
                let _ = write!(out, "%!{other}({arg})");
            }
        }
    }

    if next_arg < args.len() {
        let extra: Vec<String> = args[next_arg..].iter().map(|a| a.to_string()).collect();
        let _ = write!(out, "%!(EXTRA {})", extra.join(", "));
    }

    out
}

/// Space-separated `Display` forms of `args`.
pub fn sprint(args: &[&dyn Display]) -> String {
    args.iter()
        .map(|a| a.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

#[derive(Debug, Default)]
struct Spec {
    left: bool,
    zero: bool,
    width: Option<usize>,
    precision: Option<usize>,
    bad_width: bool,
    bad_precision: bool,
    verb: Option<char>,
}

impl Spec {
    fn pad(&self, s: String) -> String {
        let Some(width) = self.width else {
            return s;
        };
        let len = s.chars().count();
        if len >= width {
            return s;
        }
        let fill = width - len;
        if self.left {
            format!("{s}{}", " ".repeat(fill))
        } else if self.zero {
            match s.strip_prefix('-') {
                Some(rest) => format!("-{}{rest}", "0".repeat(fill)),
                None => format!("{}{s}", "0".repeat(fill)),
            }
        } else {
            format!("{}{s}", " ".repeat(fill))
        }
    }
}

fn parse_spec(chars: &mut Peekable<Chars<'_>>) -> Spec {
    let mut spec = Spec::default();

    while let Some(&c) = chars.peek() {
        match c {
            '-' => spec.left = true,
            '0' => spec.zero = true,
            _ => break,
        }
        chars.next();
    }
    match parse_number(chars) {
        Some(n) if n > MAX_NUMBER => spec.bad_width = true,
        width => spec.width = width,
    }
    if chars.peek() == Some(&'.') {
        chars.next();
        match parse_number(chars).unwrap_or(0) {
            n if n > MAX_NUMBER => spec.bad_precision = true,
            n => spec.precision = Some(n),
        }
    }
    spec.verb = chars.next();
    spec
}

/// Consume a run of digits. Values past [`MAX_NUMBER`] are clamped to
/// `MAX_NUMBER + 1` so callers can tell them apart without overflow.
fn parse_number(chars: &mut Peekable<Chars<'_>>) -> Option<usize> {
    let mut value: Option<usize> = None;
    while let Some(digit) = chars.peek().and_then(|c| c.to_digit(10)) {
        chars.next();
        let next = value.unwrap_or(0) * 10 + digit as usize;
        value = Some(next.min(MAX_NUMBER + 1));
    }
    value
}

fn render(arg: &dyn Display, precision: Option<usize>) -> String {
    match precision {
        Some(p) => format!("{arg:.p$}"),
        None => arg.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_substitution() {
        assert_eq!(sprintf("count=%d", &[&3]), "count=3");
        assert_eq!(sprintf("%s has %d books", &[&"alice", &12]), "alice has 12 books");
        assert_eq!(sprintf("%v", &[&true]), "true");
    }

    #[test]
    fn test_percent_literal() {
        assert_eq!(sprintf("100%% of %d", &[&7]), "100% of 7");
    }

    #[test]
    fn test_precision_and_width() {
        assert_eq!(sprintf("%.2f", &[&3.14159]), "3.14");
        assert_eq!(sprintf("[%5d]", &[&42]), "[   42]");
        assert_eq!(sprintf("[%-5s]", &[&"ab"]), "[ab   ]");
        assert_eq!(sprintf("%05d", &[&-42]), "-0042");
        assert_eq!(sprintf("%.3s", &[&"abcdef"]), "abc");
    }

    #[test]
    fn test_quoted() {
        assert_eq!(sprintf("id=%q", &[&"a\"b"]), "id=\"a\\\"b\"");
    }

    #[test]
    fn test_missing_argument() {
        assert_eq!(sprintf("a=%d b=%d", &[&1]), "a=1 b=%!d(MISSING)");
    }

    #[test]
    fn test_extra_arguments() {
        assert_eq!(sprintf("a=%d", &[&1, &2, &"x"]), "a=1%!(EXTRA 2, x)");
    }

    #[test]
    fn test_bad_verb_and_noverb() {
        assert_eq!(sprintf("%x", &[&255]), "%!x(255)");
        assert_eq!(sprintf("trailing %", &[]), "trailing %!(NOVERB)");
    }

    #[test]
    fn test_oversized_width_is_reported_not_applied() {
        assert_eq!(sprintf("[%99999999999999999999d]", &[&1]), "[%!(BADWIDTH)1]");
        assert_eq!(sprintf("[%1000001s]", &[&"x"]), "[%!(BADWIDTH)x]");
        assert_eq!(sprintf("%1000000d", &[&1]).len(), 1_000_000);
    }

    #[test]
    fn test_oversized_precision_is_reported_not_applied() {
        assert_eq!(sprintf("%.99999999999999999999f", &[&1.5]), "%!(BADPREC)1.5");
        assert_eq!(sprintf("%5.2000000s", &[&"abc"]), "%!(BADPREC)  abc");
    }

    #[test]
    fn test_sprint_joins_with_spaces() {
        assert_eq!(sprint(&[&"user", &42, &'x']), "user 42 x");
        assert_eq!(sprint(&[]), "");
    }
}
