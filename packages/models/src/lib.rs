#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Core address types for the Vietnamese address conversion toolchain.
//!
//! This crate defines the [`Address`] value record shared by the parser,
//! converter, and administrative database, plus the [`AddressLevel`]
//! enumeration used to select normalization rules and to tag resolution
//! failures with the administrative tier that produced them.

use std::fmt;

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// An administrative hierarchy level.
///
/// `Street` is not an administrative unit; it exists so the free-text
/// parser can tag a part that matched no administrative keyword.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "lowercase")]
pub enum AddressLevel {
    /// Top-level unit (province or centrally-governed city).
    Province,
    /// Second-level unit, eliminated by the 2024-2025 reform.
    District,
    /// Lowest-level unit (ward, commune, or commune-level town).
    Ward,
    /// Street-address component; no administrative meaning.
    Street,
}

/// A structured Vietnamese address.
///
/// No field is required to be present at construction; completeness is
/// checked at conversion time. The parser and converter both return new
/// values rather than mutating their input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    /// Free-form street address (house number, street name).
    pub street_address: Option<String>,
    /// Ward, commune, or commune-level town name.
    pub ward: Option<String>,
    /// District name under the pre-reform hierarchy. Always `None` in a
    /// converted address.
    pub district: Option<String>,
    /// Province or centrally-governed city name.
    pub province: Option<String>,
}

impl Address {
    /// Creates an address from owned components.
    #[must_use]
    pub const fn new(
        street_address: Option<String>,
        ward: Option<String>,
        district: Option<String>,
        province: Option<String>,
    ) -> Self {
        Self {
            street_address,
            ward,
            district,
            province,
        }
    }

    /// Returns the field for the given administrative level, if set.
    #[must_use]
    pub fn level(&self, level: AddressLevel) -> Option<&str> {
        match level {
            AddressLevel::Province => self.province.as_deref(),
            AddressLevel::District => self.district.as_deref(),
            AddressLevel::Ward => self.ward.as_deref(),
            AddressLevel::Street => self.street_address.as_deref(),
        }
    }
}

impl fmt::Display for Address {
    /// Formats the address as its non-empty components joined with `", "`,
    /// most specific first (street, ward, district, province).
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for part in [
            self.street_address.as_deref(),
            self.ward.as_deref(),
            self.district.as_deref(),
            self.province.as_deref(),
        ]
        .into_iter()
        .flatten()
        .filter(|p| !p.trim().is_empty())
        {
            if !first {
                write!(f, ", ")?;
            }
            write!(f, "{part}")?;
            first = false;
        }
        Ok(())
    }
}
