//! Serde models for the canonical mapping file and the manual alias
//! overlay file.
//!
//! The mapping file is a three-level JSON record: province name →
//! district name → ward name → new-hierarchy payload. A province record
//! may carry one extra sibling key, `legacy_district_mapping`, redirecting
//! a district name retired before the reform (or its normalized form) to
//! a currently valid district key in the same province.

use std::collections::BTreeMap;

use serde::Deserialize;

/// New-hierarchy payload for a single ward.
///
/// The historical dataset spells the province field `new_provine_name`;
/// both spellings are accepted.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct WardRecord {
    /// Province the ward belongs to after the reform. Authoritative even
    /// when it differs from the ward's pre-reform province.
    #[serde(alias = "new_provine_name")]
    pub new_province_name: String,
    /// Ward name after the reform.
    pub new_ward_name: String,
}

/// All wards of one pre-reform district, keyed by canonical ward name.
pub type DistrictRecord = BTreeMap<String, WardRecord>;

/// One province's districts plus its legacy-district redirects.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProvinceRecord {
    /// Redirects from retired district names (raw or normalized) to a
    /// currently valid district key within this province.
    #[serde(default)]
    pub legacy_district_mapping: BTreeMap<String, String>,
    /// Districts keyed by canonical district name.
    #[serde(flatten)]
    pub districts: BTreeMap<String, DistrictRecord>,
}

/// The full canonical mapping tree, keyed by canonical province name.
pub type MappingTree = BTreeMap<String, ProvinceRecord>;

/// Hand-curated extra aliases for specific provinces, districts, and
/// wards (e.g., colloquial or pre-1975 names). All aliases are applied
/// lowercase with no further normalization.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ManualAliases {
    /// Canonical province name → extra aliases.
    #[serde(default)]
    pub provinces: BTreeMap<String, Vec<String>>,
    /// Province name → district name → extra aliases.
    #[serde(default)]
    pub districts: BTreeMap<String, BTreeMap<String, Vec<String>>>,
    /// Province name → district name → ward name → extra aliases.
    #[serde(default)]
    pub wards: BTreeMap<String, BTreeMap<String, BTreeMap<String, Vec<String>>>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "Tỉnh Long An": {
            "legacy_district_mapping": {
                "Huyện Thạnh Hóa": "Huyện Châu Thành"
            },
            "Huyện Châu Thành": {
                "Xã Tân Phú": {
                    "new_provine_name": "Tỉnh Tây Ninh",
                    "new_ward_name": "Xã Tân Phú"
                }
            }
        }
    }"#;

    #[test]
    fn parses_mapping_with_legacy_sibling_key() {
        let tree: MappingTree = serde_json::from_str(SAMPLE).unwrap();
        let province = &tree["Tỉnh Long An"];
        assert_eq!(province.districts.len(), 1);
        assert_eq!(
            province.legacy_district_mapping["Huyện Thạnh Hóa"],
            "Huyện Châu Thành"
        );
        let ward = &province.districts["Huyện Châu Thành"]["Xã Tân Phú"];
        assert_eq!(ward.new_province_name, "Tỉnh Tây Ninh");
        assert_eq!(ward.new_ward_name, "Xã Tân Phú");
    }

    #[test]
    fn accepts_corrected_province_field_spelling() {
        let json = r#"{"new_province_name": "Tỉnh Tây Ninh", "new_ward_name": "Xã Tân Phú"}"#;
        let ward: WardRecord = serde_json::from_str(json).unwrap();
        assert_eq!(ward.new_province_name, "Tỉnh Tây Ninh");
    }

    #[test]
    fn overlay_sections_all_default_to_empty() {
        let overlay: ManualAliases = serde_json::from_str("{}").unwrap();
        assert!(overlay.provinces.is_empty());
        assert!(overlay.districts.is_empty());
        assert!(overlay.wards.is_empty());
    }
}
