#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Old-to-new hierarchy conversion for Vietnamese addresses.
//!
//! Resolves an address written against the retired province → district →
//! ward hierarchy into its post-reform equivalent: the ward's payload
//! supplies the new province and ward names, the district tier is
//! cleared, and the street address passes through untouched.
//!
//! Resolution is all-or-nothing. The first unresolvable level aborts with
//! an error tagged with that level and the offending input value, so
//! batch callers can report precisely which administrative tier failed.

use thiserror::Error;
use vn_address_database::{AdministrativeDatabase, ResolveError};
use vn_address_parser::ParseError;

pub use vn_address_models::{Address, AddressLevel};
pub use vn_address_parser::parse;

/// Errors from address conversion.
///
/// `IncompleteAddress` and `Parse` are invalid-input errors, recoverable
/// by correcting the input. `Unresolved` is the dominant expected failure
/// mode in practice: the dataset is incomplete or the input uses an
/// unlisted alias.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConvertError {
    /// A required field (province, district, or ward) was absent or
    /// blank after trimming.
    #[error("incomplete address: province, district, and ward are all required")]
    IncompleteAddress,

    /// A supplied name exhausted the lookup chain without a hit. Carries
    /// the administrative level and the exact input value.
    #[error(transparent)]
    Unresolved(#[from] ResolveError),

    /// The free-text input could not be parsed into components.
    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// What to do with an input whose district field is missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MissingDistrictPolicy {
    /// Reject with [`ConvertError::IncompleteAddress`]. The primary
    /// policy: conversion requires all three administrative fields.
    #[default]
    Reject,
    /// Treat the address as already written against the new hierarchy
    /// and return it unchanged.
    PassThrough,
}

/// Converts an address to the post-reform hierarchy under the strict
/// [`MissingDistrictPolicy::Reject`] policy.
///
/// On success the result carries the ward payload's new province name
/// (authoritative — a ward may be reassigned to a different province
/// under the reform), the new ward name, an empty district, and the
/// input's street address byte-for-byte.
///
/// # Errors
///
/// [`ConvertError::IncompleteAddress`] if province, district, or ward is
/// missing or blank after trimming; [`ConvertError::Unresolved`] if any
/// level cannot be resolved.
pub fn convert(db: &AdministrativeDatabase, address: &Address) -> Result<Address, ConvertError> {
    convert_with_policy(db, address, MissingDistrictPolicy::Reject)
}

/// Converts an address with an explicit missing-district policy.
///
/// # Errors
///
/// As [`convert`], except that under
/// [`MissingDistrictPolicy::PassThrough`] a district-less input is
/// returned unchanged instead of rejected.
pub fn convert_with_policy(
    db: &AdministrativeDatabase,
    address: &Address,
    policy: MissingDistrictPolicy,
) -> Result<Address, ConvertError> {
    let province = non_blank(address.province.as_deref());
    let district = non_blank(address.district.as_deref());
    let ward = non_blank(address.ward.as_deref());

    if district.is_none() && policy == MissingDistrictPolicy::PassThrough {
        log::debug!("district missing, passing address through as new-format");
        return Ok(address.clone());
    }

    let (Some(province), Some(district), Some(ward)) = (province, district, ward) else {
        return Err(ConvertError::IncompleteAddress);
    };

    let province_key = db.resolve_province(province)?;
    let district_key = db.resolve_district(province_key, district)?;
    let (_, record) = db.resolve_ward(province_key, district_key, ward)?;

    Ok(Address::new(
        address.street_address.clone(),
        Some(record.new_ward_name.clone()),
        None,
        Some(record.new_province_name.clone()),
    ))
}

/// Parses a free-text address and converts it, using the strict policy.
///
/// # Errors
///
/// [`ConvertError::Parse`] if the text cannot be split into components,
/// otherwise as [`convert`].
pub fn convert_str(db: &AdministrativeDatabase, text: &str) -> Result<Address, ConvertError> {
    let address = vn_address_parser::parse(text)?;
    convert(db, &address)
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}
