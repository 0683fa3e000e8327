#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Heuristic free-text parser for Vietnamese addresses.
//!
//! Splits a raw address string on a guessed separator, strips a trailing
//! country token, and infers which part plays which administrative role:
//!
//! - 2 parts: positional — district, province
//! - 3-4 parts: per-part keyword classification, then an ordered table of
//!   interpretation rules, with positional convention as the fallback
//! - more than 4 parts: the last three are ward, district, province; the
//!   rest rejoin as the street address
//!
//! Mixed separators within one string are not supported; the first
//! candidate separator that occurs anywhere in the string wins, and the
//! string is split on that one kind only.

mod classify;

use thiserror::Error;
use vn_address_models::{Address, AddressLevel};

/// Candidate separators, tested in this order.
const SEPARATORS: &[char] = &[',', ';', '|', '-'];

/// Country-name tokens dropped from the end of an address.
const COUNTRY_TOKENS: &[&str] = &["việt nam", "vietnam", "vn"];

/// Errors from address parsing. Always recoverable by correcting the
/// input; never retried automatically.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The input was empty or whitespace-only.
    #[error("address string cannot be empty")]
    EmptyInput,

    /// Fewer than two parts remained after splitting.
    #[error("address must have at least a district and a province")]
    TooFewParts,
}

/// Ordered interpretation rules for 3- and 4-part addresses.
///
/// Each entry is the set of classified labels that must each claim a
/// distinct part, plus the field the single leftover part (if any) is
/// assigned to. Rules are tried top to bottom; the first that consumes
/// all parts wins. Full ward+district+province beats every partial
/// combination, and the two-label pairs mirror the triple priority order.
const INTERPRETATIONS: &[(&[AddressLevel], Option<AddressLevel>)] = &[
    (
        &[
            AddressLevel::Street,
            AddressLevel::Ward,
            AddressLevel::District,
            AddressLevel::Province,
        ],
        None,
    ),
    (
        &[
            AddressLevel::Ward,
            AddressLevel::District,
            AddressLevel::Province,
        ],
        Some(AddressLevel::Street),
    ),
    (
        &[
            AddressLevel::Street,
            AddressLevel::District,
            AddressLevel::Province,
        ],
        Some(AddressLevel::Ward),
    ),
    (
        &[
            AddressLevel::Street,
            AddressLevel::Ward,
            AddressLevel::Province,
        ],
        Some(AddressLevel::District),
    ),
    (
        &[
            AddressLevel::Street,
            AddressLevel::Ward,
            AddressLevel::District,
        ],
        Some(AddressLevel::Province),
    ),
    (
        &[AddressLevel::District, AddressLevel::Province],
        Some(AddressLevel::Ward),
    ),
    (
        &[AddressLevel::Ward, AddressLevel::Province],
        Some(AddressLevel::District),
    ),
    (
        &[AddressLevel::Ward, AddressLevel::District],
        Some(AddressLevel::Province),
    ),
];

/// Parses a raw address string into a structured [`Address`].
///
/// # Errors
///
/// Returns [`ParseError::EmptyInput`] for empty/whitespace input and
/// [`ParseError::TooFewParts`] when fewer than a district and a province
/// remain after splitting.
pub fn parse(text: &str) -> Result<Address, ParseError> {
    if text.trim().is_empty() {
        return Err(ParseError::EmptyInput);
    }

    let separator = SEPARATORS.iter().copied().find(|sep| text.contains(*sep));
    let mut parts: Vec<&str> = match separator {
        Some(sep) => text
            .split(sep)
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .collect(),
        None => vec![text.trim()],
    };

    if let Some(last) = parts.last()
        && COUNTRY_TOKENS.contains(&last.to_lowercase().as_str())
    {
        parts.pop();
    }

    match parts.len() {
        0 | 1 => Err(ParseError::TooFewParts),
        2 => Ok(Address::new(
            None,
            None,
            Some(parts[0].to_string()),
            Some(parts[1].to_string()),
        )),
        3 | 4 => Ok(interpret(&parts)),
        n => {
            // Beyond 4 parts only the convention form is assumed: the
            // last three parts are ward, district, province, and the
            // rest rejoin as the street address.
            let sep = separator.unwrap_or(',');
            let street = parts[..n - 3].join(&format!("{sep} "));
            Ok(Address::new(
                Some(street),
                Some(parts[n - 3].to_string()),
                Some(parts[n - 2].to_string()),
                Some(parts[n - 1].to_string()),
            ))
        }
    }
}

/// Part-to-field assignment produced by a matched interpretation rule.
#[derive(Debug, Default)]
struct Slots<'a> {
    street: Option<&'a str>,
    ward: Option<&'a str>,
    district: Option<&'a str>,
    province: Option<&'a str>,
}

impl<'a> Slots<'a> {
    fn set(&mut self, level: AddressLevel, part: &'a str) {
        match level {
            AddressLevel::Street => self.street = Some(part),
            AddressLevel::Ward => self.ward = Some(part),
            AddressLevel::District => self.district = Some(part),
            AddressLevel::Province => self.province = Some(part),
        }
    }

    fn into_address(self) -> Address {
        Address::new(
            self.street.map(str::to_string),
            self.ward.map(str::to_string),
            self.district.map(str::to_string),
            self.province.map(str::to_string),
        )
    }
}

/// Runs the classifier over all parts and selects the first
/// interpretation rule that consumes them, falling back to positional
/// convention when no rule applies.
fn interpret(parts: &[&str]) -> Address {
    let labels = classify::classify_parts(parts);

    for (required, leftover_field) in INTERPRETATIONS {
        if let Some(address) = try_rule(parts, &labels, required, *leftover_field) {
            return address;
        }
    }

    // Positional convention: ward, district, province — preceded by the
    // street address for 4-part inputs.
    match parts {
        [ward, district, province] => Address::new(
            None,
            Some((*ward).to_string()),
            Some((*district).to_string()),
            Some((*province).to_string()),
        ),
        [street, ward, district, province] => Address::new(
            Some((*street).to_string()),
            Some((*ward).to_string()),
            Some((*district).to_string()),
            Some((*province).to_string()),
        ),
        _ => unreachable!("interpret is only called with 3 or 4 parts"),
    }
}

/// Attempts one interpretation rule: every required label claims the
/// first unclaimed part carrying that label, and at most one part may
/// remain, which is assigned to the rule's leftover field.
fn try_rule<'a>(
    parts: &[&'a str],
    labels: &[AddressLevel],
    required: &[AddressLevel],
    leftover_field: Option<AddressLevel>,
) -> Option<Address> {
    let mut claimed = vec![false; parts.len()];
    let mut slots = Slots::default();

    for &level in required {
        let index = labels
            .iter()
            .enumerate()
            .position(|(i, &label)| !claimed[i] && label == level)?;
        claimed[index] = true;
        slots.set(level, parts[index]);
    }

    let mut unclaimed = (0..parts.len()).filter(|&i| !claimed[i]);
    match (unclaimed.next(), unclaimed.next()) {
        (None, _) => Some(slots.into_address()),
        (Some(index), None) => {
            let field = leftover_field?;
            slots.set(field, parts[index]);
            Some(slots.into_address())
        }
        (Some(_), Some(_)) => None,
    }
}
