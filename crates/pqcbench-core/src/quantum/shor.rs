//! Shor's algorithm scoring: period finding and peak detection.
//!
//! The measured control register of an order-finding circuit peaks near
//! multiples of `Q / r`, where `Q = 2^L` for an `L`-bit register and `r` is
//! the multiplicative order of `a` modulo `N`.

use std::collections::BTreeMap;

use crate::config::ShorConfig;

/// `base^exp mod modulus` by repeated squaring. `modulus == 0` yields 0.
pub fn mod_pow(base: u64, exp: u64, modulus: u64) -> u64 {
    if modulus == 0 {
        return 0;
    }
    if modulus == 1 {
        return 0;
    }
    let m = modulus as u128;
    let mut result: u128 = 1;
    let mut b = (base as u128) % m;
    let mut e = exp;
    while e > 0 {
        if e & 1 == 1 {
            result = result * b % m;
        }
        b = b * b % m;
        e >>= 1;
    }
    result as u64
}

/// Smallest `r >= 1` with `a^r mod n == 1`, trying at most `limit` exponents.
///
/// Degenerate inputs never fail: `n <= 1` gives 1, and when no order is found
/// (`gcd(a, n) != 1`, or the order lies beyond `limit`) the result is `n`.
pub fn period(a: u64, n: u64, limit: u64) -> u64 {
    if n <= 1 {
        return 1;
    }
    let mut r = 1;
    while r < n {
        if mod_pow(a, r, n) == 1 {
            return r;
        }
        if r >= limit {
            break;
        }
        r += 1;
    }
    n
}

/// Read an integer parameter like `N=15` out of a free-form label.
///
/// The key must not be glued to a preceding letter or digit, so `a=` does not
/// match inside `data=`. Whitespace after `=` is allowed.
pub fn parse_label_param(label: &str, key: char) -> Option<u64> {
    let bytes = label.as_bytes();
    label.match_indices(key).find_map(|(idx, _)| {
        if idx > 0 && (bytes[idx - 1] as char).is_ascii_alphanumeric() {
            return None;
        }
        let rest = label[idx + key.len_utf8()..].trim_start();
        let rest = rest.strip_prefix('=')?.trim_start();
        let digits: String = rest.chars().take_while(|c| c.is_ascii_digit()).collect();
        digits.parse().ok()
    })
}

/// Peak tolerance for a register of `q` outcomes and period `r`.
pub fn peak_tolerance(q: u64, r: u64, config: &ShorConfig) -> u64 {
    let spacing = r.max(1).saturating_mul(config.peak_tolerance_divisor.max(1));
    config.min_peak_tolerance.max(q / spacing)
}

/// True when the measured bitstring lies within tolerance of a predicted peak.
pub fn near_peak(bits: &str, r: u64, config: &ShorConfig) -> bool {
    let Some((value, len)) = parse_bits(bits) else {
        return false;
    };
    let q = 1u64 << len;
    let r = r.max(1);
    let tolerance = peak_tolerance(q, r, config) as f64;
    let step = q as f64 / r as f64;
    let nearest = (value as f64 / step).round() as u64;
    (nearest.saturating_sub(1)..=nearest.saturating_add(1))
        .filter(|j| *j < r)
        .any(|j| (value as f64 - j as f64 * step).abs() <= tolerance)
}

/// Fraction of hardware shots that landed near a predicted peak.
pub fn hardware_confidence(counts: &BTreeMap<String, u64>, r: u64, config: &ShorConfig) -> f64 {
    let total: u64 = counts.values().sum();
    if total == 0 {
        return 0.0;
    }
    let correct: u64 = counts
        .iter()
        .filter(|(bits, _)| near_peak(bits, r, config))
        .map(|(_, c)| *c)
        .sum();
    correct as f64 / total as f64
}

/// Recover a factor pair of `n` from one measured control-register value.
///
/// Phase `y / 2^t` is approximated by the closest fraction with denominator
/// at most `n`; that denominator is the candidate period. It must satisfy
/// `a^r ≡ 1 (mod n)`, be even, and not give `a^(r/2) ≡ -1`.
pub fn factors_from_measurement(bits: &str, a: u64, n: u64) -> Option<(u64, u64)> {
    if n < 3 {
        return None;
    }
    let (y, t) = parse_bits(bits)?;
    if y == 0 {
        return None;
    }
    let (_, r) = limit_denominator(y, 1u64 << t, n);
    if r == 0 || mod_pow(a, r, n) != 1 || r % 2 != 0 {
        return None;
    }
    let term = mod_pow(a, r / 2, n);
    if (term + 1) % n == 0 {
        return None;
    }
    [gcd(term + n - 1, n), gcd(term + 1, n)]
        .into_iter()
        .find(|f| *f != 1 && *f != n)
        .map(|f| (f.min(n / f), f.max(n / f)))
}

/// Try outcomes from most to least frequent until one yields factors.
/// `factor_search_outcomes` caps how many are tried; `None` tries them all.
pub fn recover_factors(
    counts: &BTreeMap<String, u64>,
    a: u64,
    n: u64,
    config: &ShorConfig,
) -> Option<Vec<u64>> {
    let mut ranked: Vec<(&String, &u64)> = counts.iter().collect();
    ranked.sort_by(|x, y| y.1.cmp(x.1).then_with(|| x.0.cmp(y.0)));
    ranked
        .into_iter()
        .take(config.factor_search_outcomes.unwrap_or(usize::MAX))
        .find_map(|(bits, _)| factors_from_measurement(bits, a, n))
        .map(|(p, q)| vec![p, q])
}

/// Parse a measured bitstring into (value, bit length). Whitespace between
/// register groups is ignored; strings longer than 63 bits are rejected.
fn parse_bits(bits: &str) -> Option<(u64, u32)> {
    let cleaned: String = bits.chars().filter(|c| !c.is_whitespace()).collect();
    if cleaned.is_empty() || cleaned.len() > 63 {
        return None;
    }
    let value = u64::from_str_radix(&cleaned, 2).ok()?;
    Some((value, cleaned.len() as u32))
}

fn gcd(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

/// Closest fraction to `num/den` whose denominator is at most `max_den`.
fn limit_denominator(num: u64, den: u64, max_den: u64) -> (u64, u64) {
    let g = gcd(num, den).max(1);
    let (num, den) = (num / g, den / g);
    if den <= max_den || max_den == 0 {
        return (num, den);
    }

    let (mut p0, mut q0, mut p1, mut q1) = (0u64, 1u64, 1u64, 0u64);
    let (mut n, mut d) = (num, den);
    while d != 0 {
        let a = n / d;
        let q2 = q0 + a * q1;
        if q2 > max_den {
            break;
        }
        (p0, q0, p1, q1) = (p1, q1, p0 + a * p1, q2);
        (n, d) = (d, n - a * d);
    }

    let k = (max_den - q0) / q1.max(1);
    let bound1 = (p0 + k * p1, q0 + k * q1);
    let bound2 = (p1, q1.max(1));
    let target = num as f64 / den as f64;
    let dist = |(p, q): (u64, u64)| (p as f64 / q as f64 - target).abs();
    if dist(bound2) <= dist(bound1) {
        bound2
    } else {
        bound1
    }
}
