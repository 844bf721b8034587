//! Synthetic request-data generators.
//!
//! Every generator takes its RNG as a parameter so callers (and tests) can
//! seed it. Draw lists are fixed; the disambiguating number keeps emails
//! practically collision-free across a test run.

use rand::Rng;

use crate::{Error, Result};

const EMAIL_NAMES: &[&str] = &[
    "alder", "birch", "cedar", "dahlia", "elm", "fern", "hazel", "iris", "juniper", "laurel",
    "maple", "olive", "poplar", "rowan", "willow",
];

const EMAIL_DOMAINS: &[&str] = &[
    "northwind", "acme", "globex", "initech", "umbrella", "wayfarer", "oakvale", "riverton",
];

const EMAIL_TLDS: &[&str] = &["com", "net", "org", "io", "dev"];

const FIRST_NAMES: &[&str] = &[
    "James", "Oliver", "Henry", "Lucas", "Theo", "Arthur", "Felix", "Jasper", "Miles", "Ethan",
];

const LAST_NAMES: &[&str] = &[
    "Walker", "Turner", "Harris", "Bennett", "Foster", "Hayes", "Murray", "Sutton", "Parker",
    "Quinn",
];

const PHONE_PREFIXES: &[&str] = &["+420", "+421"];

/// Generate an EAN-13 barcode: twelve random digits plus the weighted-sum
/// check digit (digits at odd positions count threefold).
pub fn ean13(rng: &mut impl Rng) -> String {
    let mut digits = [0u8; 13];
    for digit in digits.iter_mut().take(12) {
        *digit = rng.gen_range(0..10);
    }

    let sum: u32 = digits
        .iter()
        .take(12)
        .enumerate()
        .map(|(i, d)| if i % 2 == 0 { u32::from(*d) } else { u32::from(*d) * 3 })
        .sum();
    digits[12] = ((10 - sum % 10) % 10) as u8;

    digits.iter().map(|d| char::from(b'0' + d)).collect()
}

/// Generate an email like `hazel-412@acme.io` from the fixed word lists.
pub fn email(rng: &mut impl Rng) -> String {
    let name = pick(rng, EMAIL_NAMES);
    let number: u16 = rng.gen_range(0..1000);
    let domain = pick(rng, EMAIL_DOMAINS);
    let tld = pick(rng, EMAIL_TLDS);
    format!("{name}-{number}@{domain}.{tld}")
}

/// Generate a phone number with a `+420`/`+421` prefix and nine digits, the
/// first one nonzero.
pub fn phone(rng: &mut impl Rng) -> String {
    let prefix = pick(rng, PHONE_PREFIXES);
    let number: u32 = rng.gen_range(100_000_000..1_000_000_000);
    format!("{prefix}{number}")
}

pub fn first_name(rng: &mut impl Rng) -> &'static str {
    pick(rng, FIRST_NAMES)
}

pub fn last_name(rng: &mut impl Rng) -> &'static str {
    pick(rng, LAST_NAMES)
}

/// Uniform integer in `1..=max`. A bound below 1 is a caller error.
pub fn number_up_to(rng: &mut impl Rng, max: i64) -> Result<i64> {
    if max < 1 {
        return Err(Error::InvalidLimit { given: max });
    }
    Ok(rng.gen_range(1..=max))
}

fn pick<'a>(rng: &mut impl Rng, options: &'a [&'a str]) -> &'a str {
    options[rng.gen_range(0..options.len())]
}
