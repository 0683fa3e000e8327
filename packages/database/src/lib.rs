#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Administrative mapping database for Vietnamese address conversion.
//!
//! Owns the three-level canonical mapping tree (province → district →
//! ward → new-hierarchy payload) plus three alias indices: province,
//! district scoped per province, and ward scoped per province+district.
//! The indices are built once from programmatically derived aliases
//! ([`normalize::get_aliases`]) merged with a manual overlay of
//! hand-curated aliases, and are read-only afterwards.
//!
//! A bundled dataset is embedded at compile time and exposed via
//! [`AdministrativeDatabase::bundled`]; external datasets load through
//! [`AdministrativeDatabase::from_files`].

pub mod mapping;
pub mod normalize;

use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::Path;
use std::sync::LazyLock;

use thiserror::Error;
use vn_address_models::AddressLevel;

use crate::mapping::{ManualAliases, MappingTree, WardRecord};

/// Errors loading a mapping or overlay file.
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// File read failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A supplied name that the lookup chain (exact match, alias index, and
/// for districts the legacy redirect table) could not resolve to a
/// canonical key.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unrecognized {level} name: {name:?}")]
pub struct ResolveError {
    /// Administrative tier the lookup failed at.
    pub level: AddressLevel,
    /// The input value exactly as supplied by the caller.
    pub name: String,
}

/// Alias-to-canonical-key index for one scope. Many-to-one: if two source
/// aliases normalize identically, the lexicographically-later canonical
/// name wins.
type AliasIndex = BTreeMap<String, String>;

/// The administrative mapping tree plus its alias indices.
///
/// Immutable after construction; shares freely across threads.
#[derive(Debug, Clone)]
pub struct AdministrativeDatabase {
    tree: MappingTree,
    province_aliases: AliasIndex,
    district_aliases: BTreeMap<String, AliasIndex>,
    ward_aliases: BTreeMap<String, BTreeMap<String, AliasIndex>>,
}

const BUNDLED_MAPPING: &str = include_str!("../data/ward_mapping.json");
const BUNDLED_OVERLAY: &str = include_str!("../data/manual_aliases.json");

static BUNDLED: LazyLock<AdministrativeDatabase> = LazyLock::new(|| {
    AdministrativeDatabase::from_json(BUNDLED_MAPPING, Some(BUNDLED_OVERLAY))
        .unwrap_or_else(|e| panic!("Failed to parse bundled ward mapping: {e}"))
});

impl AdministrativeDatabase {
    /// Builds the database from an already-deserialized mapping tree and
    /// overlay, registering every alias eagerly.
    #[must_use]
    pub fn new(tree: MappingTree, overlay: &ManualAliases) -> Self {
        let mut province_aliases = AliasIndex::new();
        let mut district_aliases: BTreeMap<String, AliasIndex> = BTreeMap::new();
        let mut ward_aliases: BTreeMap<String, BTreeMap<String, AliasIndex>> = BTreeMap::new();

        for (province_name, province) in &tree {
            for alias in normalize::get_aliases(province_name, AddressLevel::Province) {
                province_aliases.insert(alias, province_name.clone());
            }
            if let Some(extra) = overlay.provinces.get(province_name) {
                for alias in extra {
                    province_aliases.insert(alias.to_lowercase(), province_name.clone());
                }
            }

            let districts = district_aliases.entry(province_name.clone()).or_default();
            let province_wards = ward_aliases.entry(province_name.clone()).or_default();

            for (district_name, district) in &province.districts {
                for alias in normalize::get_aliases(district_name, AddressLevel::District) {
                    districts.insert(alias, district_name.clone());
                }
                if let Some(extra) = overlay
                    .districts
                    .get(province_name)
                    .and_then(|d| d.get(district_name))
                {
                    for alias in extra {
                        districts.insert(alias.to_lowercase(), district_name.clone());
                    }
                }

                let wards = province_wards.entry(district_name.clone()).or_default();

                for ward_name in district.keys() {
                    for alias in normalize::get_aliases(ward_name, AddressLevel::Ward) {
                        wards.insert(alias, ward_name.clone());
                    }
                    if let Some(extra) = overlay
                        .wards
                        .get(province_name)
                        .and_then(|d| d.get(district_name))
                        .and_then(|w| w.get(ward_name))
                    {
                        for alias in extra {
                            wards.insert(alias.to_lowercase(), ward_name.clone());
                        }
                    }
                }
            }
        }

        log::debug!(
            "administrative database built: {} provinces, {} province aliases",
            tree.len(),
            province_aliases.len()
        );

        Self {
            tree,
            province_aliases,
            district_aliases,
            ward_aliases,
        }
    }

    /// Builds the database from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`DatabaseError::Json`] if either document is malformed.
    pub fn from_json(mapping: &str, overlay: Option<&str>) -> Result<Self, DatabaseError> {
        let tree: MappingTree = serde_json::from_str(mapping)?;
        let overlay: ManualAliases = match overlay {
            Some(text) => serde_json::from_str(text)?,
            None => ManualAliases::default(),
        };
        Ok(Self::new(tree, &overlay))
    }

    /// Builds the database from files on disk. A missing overlay file is
    /// treated as an empty overlay, not an error.
    ///
    /// # Errors
    ///
    /// Returns [`DatabaseError::Io`] if the mapping file cannot be read
    /// (or the overlay file exists but cannot be read), or
    /// [`DatabaseError::Json`] if either document is malformed.
    pub fn from_files(
        mapping: impl AsRef<Path>,
        overlay: Option<impl AsRef<Path>>,
    ) -> Result<Self, DatabaseError> {
        let mapping_text = std::fs::read_to_string(mapping)?;
        let overlay_text = match overlay {
            Some(path) => match std::fs::read_to_string(path) {
                Ok(text) => Some(text),
                Err(e) if e.kind() == ErrorKind::NotFound => {
                    log::debug!("no manual alias overlay found, using empty overlay");
                    None
                }
                Err(e) => return Err(e.into()),
            },
            None => None,
        };
        Self::from_json(&mapping_text, overlay_text.as_deref())
    }

    /// Returns the process-wide database built from the bundled dataset.
    ///
    /// The build runs at most once, on first call, behind a
    /// one-time-initialization primitive; afterwards the instance is
    /// shared read-only across threads.
    ///
    /// # Panics
    ///
    /// Panics if the embedded dataset is malformed. Since the dataset is
    /// a compile-time constant this indicates a development error and is
    /// caught by the test suite.
    #[must_use]
    pub fn bundled() -> &'static Self {
        &BUNDLED
    }

    /// Resolves a province name to its canonical key.
    ///
    /// Precedence: exact case-sensitive key match first (canonical-keyed
    /// callers skip normalization entirely), then the alias index on the
    /// normalized name.
    ///
    /// # Errors
    ///
    /// Returns a `PROVINCE`-tagged [`ResolveError`] on a miss.
    pub fn resolve_province(&self, name: &str) -> Result<&str, ResolveError> {
        if let Some((key, _)) = self.tree.get_key_value(name) {
            return Ok(key);
        }
        let normalized = normalize::normalize_alias(name, AddressLevel::Province);
        self.province_aliases
            .get(&normalized)
            .map(String::as_str)
            .ok_or_else(|| ResolveError {
                level: AddressLevel::Province,
                name: name.to_string(),
            })
    }

    /// Resolves a district name to its canonical key within a province.
    ///
    /// Precedence: exact key match, then the per-province alias index,
    /// then the province's legacy redirect table (raw name first, then
    /// normalized). A legacy redirect is honored only when its target is
    /// a live district key.
    ///
    /// # Errors
    ///
    /// Returns a `DISTRICT`-tagged [`ResolveError`] on a miss (also when
    /// `province_key` itself is unknown, since no district can resolve
    /// under a missing province).
    pub fn resolve_district(&self, province_key: &str, name: &str) -> Result<&str, ResolveError> {
        let miss = || ResolveError {
            level: AddressLevel::District,
            name: name.to_string(),
        };
        let province = self.tree.get(province_key).ok_or_else(miss)?;

        if let Some((key, _)) = province.districts.get_key_value(name) {
            return Ok(key);
        }

        let normalized = normalize::normalize_alias(name, AddressLevel::District);
        if let Some(key) = self
            .district_aliases
            .get(province_key)
            .and_then(|aliases| aliases.get(&normalized))
        {
            return Ok(key);
        }

        let redirect = province
            .legacy_district_mapping
            .get(name)
            .or_else(|| province.legacy_district_mapping.get(&normalized));
        if let Some(target) = redirect
            && let Some((key, _)) = province.districts.get_key_value(target)
        {
            return Ok(key);
        }

        Err(miss())
    }

    /// Resolves a ward name within a province+district to its canonical
    /// key and new-hierarchy payload.
    ///
    /// Precedence: exact key match, then the per-province-per-district
    /// alias index.
    ///
    /// # Errors
    ///
    /// Returns a `WARD`-tagged [`ResolveError`] on a miss.
    pub fn resolve_ward(
        &self,
        province_key: &str,
        district_key: &str,
        name: &str,
    ) -> Result<(&str, &WardRecord), ResolveError> {
        let miss = || ResolveError {
            level: AddressLevel::Ward,
            name: name.to_string(),
        };
        let district = self
            .tree
            .get(province_key)
            .and_then(|province| province.districts.get(district_key))
            .ok_or_else(miss)?;

        if let Some((key, record)) = district.get_key_value(name) {
            return Ok((key.as_str(), record));
        }

        let normalized = normalize::normalize_alias(name, AddressLevel::Ward);
        self.ward_aliases
            .get(province_key)
            .and_then(|districts| districts.get(district_key))
            .and_then(|aliases| aliases.get(&normalized))
            .and_then(|key| district.get_key_value(key))
            .map(|(key, record)| (key.as_str(), record))
            .ok_or_else(miss)
    }

    /// Number of provinces in the mapping tree.
    #[must_use]
    pub fn province_count(&self) -> usize {
        self.tree.len()
    }

    /// Iterates provinces and their records, in key order.
    pub fn provinces(&self) -> impl Iterator<Item = (&str, &mapping::ProvinceRecord)> {
        self.tree.iter().map(|(key, record)| (key.as_str(), record))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIXTURE_MAPPING: &str = r#"{
        "Thành phố Hồ Chí Minh": {
            "legacy_district_mapping": {
                "Quận 2": "Thành phố Thủ Đức",
                "2": "Thành phố Thủ Đức"
            },
            "Quận 1": {
                "Phường Bến Nghé": {
                    "new_provine_name": "Thành phố Hồ Chí Minh",
                    "new_ward_name": "Phường Sài Gòn"
                },
                "Phường 01": {
                    "new_provine_name": "Thành phố Hồ Chí Minh",
                    "new_ward_name": "Phường Tân Định"
                }
            },
            "Thành phố Thủ Đức": {
                "Phường Thảo Điền": {
                    "new_provine_name": "Thành phố Hồ Chí Minh",
                    "new_ward_name": "Phường An Khánh"
                }
            }
        },
        "Tỉnh Long An": {
            "Huyện Châu Thành": {
                "Xã Tân Phú": {
                    "new_provine_name": "Tỉnh Tây Ninh",
                    "new_ward_name": "Xã Tân Phú"
                }
            }
        }
    }"#;

    const FIXTURE_OVERLAY: &str = r#"{
        "provinces": {
            "Thành phố Hồ Chí Minh": ["tp.hcm", "sài gòn"]
        },
        "districts": {
            "Thành phố Hồ Chí Minh": {
                "Quận 1": ["q1"]
            }
        },
        "wards": {
            "Thành phố Hồ Chí Minh": {
                "Quận 1": {
                    "Phường Bến Nghé": ["ben nghe ward"]
                }
            }
        }
    }"#;

    fn fixture() -> AdministrativeDatabase {
        AdministrativeDatabase::from_json(FIXTURE_MAPPING, Some(FIXTURE_OVERLAY)).unwrap()
    }

    #[test]
    fn resolves_exact_canonical_province() {
        let db = fixture();
        assert_eq!(
            db.resolve_province("Thành phố Hồ Chí Minh").unwrap(),
            "Thành phố Hồ Chí Minh"
        );
    }

    #[test]
    fn resolves_province_via_derived_aliases() {
        let db = fixture();
        for name in [
            "hồ chí minh",
            "Hồ Chí Minh",
            "thành phố hồ chí minh",
            "thanh pho ho chi minh",
            "THÀNH PHỐ HỒ CHÍ MINH",
        ] {
            assert_eq!(
                db.resolve_province(name).unwrap(),
                "Thành phố Hồ Chí Minh",
                "failed for {name:?}"
            );
        }
    }

    #[test]
    fn resolves_province_via_manual_alias() {
        let db = fixture();
        assert_eq!(
            db.resolve_province("TP.HCM").unwrap(),
            "Thành phố Hồ Chí Minh"
        );
        assert_eq!(
            db.resolve_province("Sài Gòn").unwrap(),
            "Thành phố Hồ Chí Minh"
        );
    }

    #[test]
    fn unknown_province_is_province_tagged() {
        let db = fixture();
        let err = db.resolve_province("Tỉnh Không Tồn Tại").unwrap_err();
        assert_eq!(err.level, AddressLevel::Province);
        assert_eq!(err.name, "Tỉnh Không Tồn Tại");
    }

    #[test]
    fn resolves_district_via_alias_and_manual_alias() {
        let db = fixture();
        assert_eq!(
            db.resolve_district("Thành phố Hồ Chí Minh", "quận 1")
                .unwrap(),
            "Quận 1"
        );
        assert_eq!(
            db.resolve_district("Thành phố Hồ Chí Minh", "Q1").unwrap(),
            "Quận 1"
        );
    }

    #[test]
    fn resolves_zero_padded_district_number() {
        let db = fixture();
        assert_eq!(
            db.resolve_district("Thành phố Hồ Chí Minh", "Quận 01")
                .unwrap(),
            "Quận 1"
        );
    }

    #[test]
    fn resolves_legacy_district_by_raw_name() {
        let db = fixture();
        assert_eq!(
            db.resolve_district("Thành phố Hồ Chí Minh", "Quận 2")
                .unwrap(),
            "Thành phố Thủ Đức"
        );
    }

    #[test]
    fn resolves_legacy_district_by_normalized_name() {
        // "quận 02" normalizes to "2", which the redirect table carries.
        let db = fixture();
        assert_eq!(
            db.resolve_district("Thành phố Hồ Chí Minh", "quận 02")
                .unwrap(),
            "Thành phố Thủ Đức"
        );
    }

    #[test]
    fn unknown_district_is_district_tagged() {
        let db = fixture();
        let err = db
            .resolve_district("Thành phố Hồ Chí Minh", "Quận 99")
            .unwrap_err();
        assert_eq!(err.level, AddressLevel::District);
        assert_eq!(err.name, "Quận 99");
    }

    #[test]
    fn resolves_ward_with_zero_padded_input() {
        let db = fixture();
        let (key, record) = db
            .resolve_ward("Thành phố Hồ Chí Minh", "Quận 1", "Phường 1")
            .unwrap();
        assert_eq!(key, "Phường 01");
        assert_eq!(record.new_ward_name, "Phường Tân Định");
    }

    #[test]
    fn resolves_ward_via_manual_alias() {
        let db = fixture();
        let (key, _) = db
            .resolve_ward("Thành phố Hồ Chí Minh", "Quận 1", "Ben Nghe Ward")
            .unwrap();
        assert_eq!(key, "Phường Bến Nghé");
    }

    #[test]
    fn ward_payload_can_reassign_province() {
        let db = fixture();
        let (_, record) = db
            .resolve_ward("Tỉnh Long An", "Huyện Châu Thành", "Xã Tân Phú")
            .unwrap();
        assert_eq!(record.new_province_name, "Tỉnh Tây Ninh");
    }

    #[test]
    fn unknown_ward_is_ward_tagged() {
        let db = fixture();
        let err = db
            .resolve_ward("Thành phố Hồ Chí Minh", "Quận 1", "Phường Không Có")
            .unwrap_err();
        assert_eq!(err.level, AddressLevel::Ward);
        assert_eq!(err.name, "Phường Không Có");
    }

    #[test]
    fn missing_overlay_is_empty_overlay() {
        let db = AdministrativeDatabase::from_json(FIXTURE_MAPPING, None).unwrap();
        assert!(db.resolve_province("TP.HCM").is_err());
        assert!(db.resolve_province("Hồ Chí Minh").is_ok());
    }

    #[test]
    fn bundled_database_builds() {
        let db = AdministrativeDatabase::bundled();
        assert!(db.province_count() > 0);
    }

    #[test]
    fn database_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<AdministrativeDatabase>();
    }
}
