use regex::Regex;
use std::cmp;

const LOWER: u8 = 1;
const UPPER: u8 = 1 << 1;
const DIGIT: u8 = 1 << 2;
const SYMBOL: u8 = 1 << 3;
const UNICODE: u8 = 1 << 4;

/// Alphabet sizes credited for each character class present in a token.
const CLASS_SIZES: [(u8, u64); 5] = [
    (LOWER, 26),
    (UPPER, 26),
    (DIGIT, 10),
    (SYMBOL, 33),
    (UNICODE, 100),
];

/// Size of the alphabet a brute-force attacker would have to draw from
/// to cover every character class appearing in `token`.
///
/// One bit per class: a character can only ever count its class once.
pub(crate) fn bruteforce_cardinality(token: &str) -> u64 {
    let mut classes = 0u8;
    for c in token.chars() {
        if c.is_ascii_lowercase() {
            classes |= LOWER;
        } else if c.is_ascii_uppercase() {
            classes |= UPPER;
        } else if c.is_ascii_digit() {
            classes |= DIGIT;
        } else if c <= '\u{7f}' {
            classes |= SYMBOL;
        } else {
            classes |= UNICODE;
        }
    }
    CLASS_SIZES
        .iter()
        .filter(|(flag, _)| classes & flag != 0)
        .map(|(_, size)| size)
        .sum()
}

/// Exact binomial coefficient, saturating at `u64::MAX` on overflow.
pub(crate) fn binomial(n: usize, k: usize) -> u64 {
    // http://blog.plover.com/math/choose.html
    if k > n {
        return 0;
    }
    if k == 0 {
        return 1;
    }
    let k = cmp::min(k, n - k);
    let mut r: u64 = 1;
    for d in 0..k {
        r = match r.checked_mul((n - d) as u64) {
            Some(res) => res,
            None => return u64::MAX,
        };
        r /= (d + 1) as u64;
    }
    r
}

lazy_static! {
    pub(crate) static ref ALL_LOWER: Regex = Regex::new("^[^A-Z]*$").unwrap();
    pub(crate) static ref ALL_UPPER: Regex = Regex::new("^[^a-z]*$").unwrap();
    pub(crate) static ref START_UPPER: Regex = Regex::new("^[A-Z][^A-Z]*$").unwrap();
    pub(crate) static ref END_UPPER: Regex = Regex::new("^[^A-Z]*[A-Z]$").unwrap();
}

/// Extra bits a capitalization scheme adds on top of the lowercase form.
///
/// The common schemes (first-capped, last-capped, allcaps) cost a single
/// bit; anything else pays for the number of ways its uppercase letters
/// could have been placed.
pub(crate) fn uppercase_entropy(word: &str) -> f64 {
    if ALL_LOWER.is_match(word) {
        return 0.0;
    }
    if START_UPPER.is_match(word) || END_UPPER.is_match(word) || ALL_UPPER.is_match(word) {
        return 1.0;
    }
    let upper = word.chars().filter(|c| c.is_ascii_uppercase()).count();
    let lower = word.chars().filter(|c| c.is_ascii_lowercase()).count();
    let possibilities: u64 = (0..=cmp::min(upper, lower))
        .map(|i| binomial(upper + lower, i))
        .sum();
    (possibilities as f64).log2()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_binomial() {
        let test_data = [
            (0, 0, 1),
            (1, 0, 1),
            (5, 0, 1),
            (0, 1, 0),
            (0, 5, 0),
            (2, 1, 2),
            (4, 2, 6),
            (33, 7, 4272048),
        ];
        for &(n, k, result) in &test_data {
            assert_eq!(binomial(n, k), result);
        }
    }

    quickcheck! {
        fn test_binomial_mul_overflow(n: usize, k: usize) -> quickcheck::TestResult {
            if n >= 63 {
                binomial(n, k); // Must not panic
                quickcheck::TestResult::from_bool(true)
            } else {
                quickcheck::TestResult::discard()
            }
        }

        fn test_binomial_mirror_identity(n: usize, k: usize) -> quickcheck::TestResult {
            if k > n || n >= 63 {
                return quickcheck::TestResult::discard();
            }
            quickcheck::TestResult::from_bool(binomial(n, k) == binomial(n, n - k))
        }

        fn test_binomial_pascals_triangle(n: usize, k: usize) -> quickcheck::TestResult {
            if n == 0 || k == 0 || n >= 63 {
                return quickcheck::TestResult::discard();
            }
            quickcheck::TestResult::from_bool(
                binomial(n, k) == binomial(n - 1, k - 1) + binomial(n - 1, k)
            )
        }
    }

    #[test]
    fn test_bruteforce_cardinality() {
        assert_eq!(bruteforce_cardinality("abc"), 26);
        assert_eq!(bruteforce_cardinality("ABC"), 26);
        assert_eq!(bruteforce_cardinality("123"), 10);
        assert_eq!(bruteforce_cardinality("!@#"), 33);
        assert_eq!(bruteforce_cardinality("aA1"), 62);
        assert_eq!(bruteforce_cardinality("aA1!"), 95);
        assert_eq!(bruteforce_cardinality("丂"), 100);
        // repeated characters add their class only once
        assert_eq!(bruteforce_cardinality("aaaa"), 26);
        assert_eq!(bruteforce_cardinality(""), 0);
    }

    #[test]
    fn test_uppercase_entropy() {
        assert_eq!(uppercase_entropy("password"), 0.0);
        assert_eq!(uppercase_entropy("p4ss!"), 0.0);
        assert_eq!(uppercase_entropy("Password"), 1.0);
        assert_eq!(uppercase_entropy("passworD"), 1.0);
        assert_eq!(uppercase_entropy("PASSWORD"), 1.0);
        // 4 upper + 4 lower: sum of C(8, 0..=4) = 163
        let expected = 163f64.log2();
        assert!((uppercase_entropy("PaSsWoRd") - expected).abs() < 1e-10);
    }
}
