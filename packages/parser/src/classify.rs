//! Per-part administrative-role classification.
//!
//! Each part of a split address string is tagged with the
//! [`AddressLevel`] its leading keyword suggests. The keyword checks run
//! in a fixed order that must not be reordered: `"tp"` alone is a
//! district marker, but only after the longer `"tp "`/`"tp."` city forms
//! (which may denote a province) have been ruled out.

use vn_address_models::AddressLevel;

/// Ward-level keywords (ward, commune, commune-level town), with and
/// without diacritics.
const WARD_PREFIXES: &[&str] = &["phường", "phuong", "xã", "xa", "thị trấn", "thi tran"];

/// Unambiguous province keyword.
const PROVINCE_PREFIXES: &[&str] = &["tỉnh", "tinh"];

/// City keywords that may denote either a provincial city (province
/// tier) or a provincial city acting as a district-equivalent.
const CITY_PREFIXES: &[&str] = &["thành phố", "thanh pho", "tp ", "tp."];

/// District-level keywords, including the bare `"tp"` fallback.
const DISTRICT_PREFIXES: &[&str] = &["quận", "quan", "huyện", "huyen", "tp"];

fn starts_with_any(part: &str, prefixes: &[&str]) -> bool {
    prefixes.iter().any(|prefix| part.starts_with(prefix))
}

/// Classifies every part of a split address.
///
/// Classification is case-insensitive and context-sensitive: a part
/// starting with a city keyword is a district when any *other* part
/// carries an explicit province token, because a correctly formed address
/// never contains both a province-level city and a separate province.
pub(crate) fn classify_parts(parts: &[&str]) -> Vec<AddressLevel> {
    let lowered: Vec<String> = parts.iter().map(|part| part.to_lowercase()).collect();
    (0..lowered.len())
        .map(|index| classify_one(index, &lowered))
        .collect()
}

fn classify_one(index: usize, lowered: &[String]) -> AddressLevel {
    let part = lowered[index].as_str();

    if starts_with_any(part, WARD_PREFIXES) {
        return AddressLevel::Ward;
    }
    if starts_with_any(part, PROVINCE_PREFIXES) {
        return AddressLevel::Province;
    }
    if starts_with_any(part, CITY_PREFIXES) {
        let other_has_province_token = lowered.iter().enumerate().any(|(other_index, other)| {
            other_index != index
                && PROVINCE_PREFIXES.iter().any(|token| other.contains(token))
        });
        if other_has_province_token {
            return AddressLevel::District;
        }
        return if part.split_whitespace().count() >= 3 {
            AddressLevel::Province
        } else {
            AddressLevel::District
        };
    }
    if starts_with_any(part, DISTRICT_PREFIXES) {
        return AddressLevel::District;
    }
    AddressLevel::Street
}
