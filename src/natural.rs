//! Natural ("human") ordering of file names.
//!
//! Embedded runs of ASCII digits compare by numeric value, so `img2` sorts
//! before `img10`. Everything else compares character by character, upper-cased
//! first unless the comparison is case-sensitive. Leading whitespace is ignored
//! and leading zeros inside a digit run do not count towards its value; when two
//! runs have the same value, the comparison continues with the text after them.
//!
//! ```
//! # use dirpreview::natural::natural_compare;
//! use std::cmp::Ordering;
//!
//! assert_eq!(natural_compare("img2", "img10", false), Ordering::Less);
//! assert_eq!(natural_compare("Img2", "img2", false), Ordering::Equal);
//! assert_eq!(natural_compare("Img2", "img2", true), Ordering::Less);
//! ```

use std::cmp::Ordering;

/// Compare two names in natural order.
pub fn natural_compare(a: &str, b: &str, case_sensitive: bool) -> Ordering {
    let a: Vec<char> = a.trim_start().chars().collect();
    let b: Vec<char> = b.trim_start().chars().collect();

    let (mut i, mut j) = (0usize, 0usize);
    loop {
        if is_digit_at(&a, i) && is_digit_at(&b, j) {
            let numeric = compare_digit_runs(&a, &mut i, &b, &mut j);
            if numeric != Ordering::Equal {
                return numeric;
            }
        }

        let (ca, cb) = match (a.get(i), b.get(j)) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(&ca), Some(&cb)) => (ca, cb),
        };

        let ordering = if case_sensitive {
            ca.cmp(&cb)
        } else {
            fold(ca).cmp(&fold(cb))
        };
        if ordering != Ordering::Equal {
            return ordering;
        }

        i += 1;
        j += 1;
    }
}

/// Sort names ascending in case-insensitive natural order.
pub fn sort_natural(names: &mut [String]) {
    names.sort_by(|a, b| natural_compare(a, b, false));
}

fn is_digit_at(chars: &[char], index: usize) -> bool {
    chars.get(index).is_some_and(char::is_ascii_digit)
}

fn fold(c: char) -> char {
    c.to_uppercase().next().unwrap_or(c)
}

/// Compare the digit runs starting at `i` and `j`, leaving both cursors on
/// the first character after their run.
///
/// The longer run (after stripping leading zeros) is the larger number; for
/// runs of equal length the first differing digit decides.
fn compare_digit_runs(a: &[char], i: &mut usize, b: &[char], j: &mut usize) -> Ordering {
    while a.get(*i) == Some(&'0') {
        *i += 1;
    }
    while b.get(*j) == Some(&'0') {
        *j += 1;
    }

    let mut bias = Ordering::Equal;
    loop {
        let da = a.get(*i).filter(|c| c.is_ascii_digit());
        let db = b.get(*j).filter(|c| c.is_ascii_digit());
        match (da, db) {
            (None, None) => return bias,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(x), Some(y)) => {
                if bias == Ordering::Equal {
                    bias = x.cmp(y);
                }
            }
        }
        *i += 1;
        *j += 1;
    }
}
