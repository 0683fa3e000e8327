//! Administrative-name normalization and alias generation.
//!
//! Vietnamese administrative names arrive in many shapes:
//! - Canonical: `"Thành phố Hồ Chí Minh"`, `"Quận 1"`
//! - Prefix-less: `"Hồ Chí Minh"`, `"Bến Thành"`
//! - Zero-padded: `"Phường 01"`, `"Quận 03"`
//! - Accent-stripped: `"thanh pho ho chi minh"`
//!
//! This module produces, for a given name and hierarchy level, one
//! canonical lookup key plus the full ordered alias set the database
//! registers at build time. The same normalization is applied
//! symmetrically at build time and query time.

use regex::Regex;
use std::borrow::Cow;
use std::sync::LazyLock;
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;
use vn_address_models::AddressLevel;

/// Leading administrative prefixes stripped at the province level.
static PROVINCE_PREFIX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:thành phố|tỉnh)\s*").expect("valid regex"));

/// Leading administrative prefixes stripped at the district level.
static DISTRICT_PREFIX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:thành phố|quận|huyện)\s*").expect("valid regex"));

/// Leading administrative prefixes stripped at the ward level.
static WARD_PREFIX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:phường|xã)\s*").expect("valid regex"));

/// Zero-padded digit groups: `"01"` → `"1"`. Bounded by word boundaries,
/// so an embedded run like `"05A"` is left alone.
static LEADING_ZEROS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b0+(\d+)\b").expect("valid regex"));

/// Normalizes an administrative-unit name into its canonical lookup key.
///
/// The pipeline:
/// 1. Trim and NFC-normalize
/// 2. Lowercase
/// 3. Strip one leading level-specific administrative prefix
///    (province: `thành phố`/`tỉnh`; district: `thành phố`/`quận`/`huyện`;
///    ward: `phường`/`xã`)
/// 4. Trim again
/// 5. For wards and districts, collapse zero-padded digit groups
///    (`"01"` → `"1"`)
///
/// [`AddressLevel::Street`] skips steps 3 and 5.
#[must_use]
pub fn normalize_alias(name: &str, level: AddressLevel) -> String {
    let composed: String = name.trim().nfc().collect();
    let lowered = composed.to_lowercase();

    let stripped = match level {
        AddressLevel::Province => PROVINCE_PREFIX_RE.replace(&lowered, ""),
        AddressLevel::District => DISTRICT_PREFIX_RE.replace(&lowered, ""),
        AddressLevel::Ward => WARD_PREFIX_RE.replace(&lowered, ""),
        AddressLevel::Street => Cow::Borrowed(lowered.as_str()),
    };
    let trimmed = stripped.trim();

    match level {
        AddressLevel::District | AddressLevel::Ward => {
            LEADING_ZEROS_RE.replace_all(trimmed, "$1").into_owned()
        }
        AddressLevel::Province | AddressLevel::Street => trimmed.to_string(),
    }
}

/// Removes diacritics: NFC-compose, NFD-decompose, drop combining marks,
/// lowercase. `đ`/`Đ` are base letters, not combining marks, so they
/// survive folding.
#[must_use]
pub fn fold_accents(input: &str) -> String {
    let composed: String = input.nfc().collect();
    composed
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_lowercase()
}

/// Returns the ordered alias set for a name at a level:
///
/// 1. The [`normalize_alias`] key, if non-empty
/// 2. The trimmed raw input, lowercased
/// 3. The accent-folded lowercase form
///
/// Duplicates are collapsed preserving first-seen order. Pure function of
/// `(name, level)` — no I/O, no shared state.
#[must_use]
pub fn get_aliases(name: &str, level: AddressLevel) -> Vec<String> {
    let mut aliases = Vec::with_capacity(3);

    let normalized = normalize_alias(name, level);
    if !normalized.is_empty() {
        aliases.push(normalized);
    }

    let raw = name.trim().to_lowercase();
    if !raw.is_empty() && !aliases.contains(&raw) {
        aliases.push(raw);
    }

    let folded = fold_accents(name.trim());
    if !folded.is_empty() && !aliases.contains(&folded) {
        aliases.push(folded);
    }

    aliases
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_province_prefixes() {
        assert_eq!(
            normalize_alias("Thành phố Hồ Chí Minh", AddressLevel::Province),
            "hồ chí minh"
        );
        assert_eq!(
            normalize_alias("Tỉnh Long An", AddressLevel::Province),
            "long an"
        );
    }

    #[test]
    fn strips_district_prefixes() {
        assert_eq!(normalize_alias("Quận 1", AddressLevel::District), "1");
        assert_eq!(
            normalize_alias("Huyện Châu Thành", AddressLevel::District),
            "châu thành"
        );
        assert_eq!(
            normalize_alias("Thành phố Thủ Đức", AddressLevel::District),
            "thủ đức"
        );
    }

    #[test]
    fn strips_ward_prefixes() {
        assert_eq!(
            normalize_alias("Phường Bến Thành", AddressLevel::Ward),
            "bến thành"
        );
        assert_eq!(normalize_alias("Xã Tân Phú", AddressLevel::Ward), "tân phú");
    }

    #[test]
    fn prefix_match_is_anchored() {
        // "quận" not at the start of the string is left alone
        assert_eq!(
            normalize_alias("Khu phố quận cũ", AddressLevel::District),
            "khu phố quận cũ"
        );
    }

    #[test]
    fn collapses_zero_padded_numbers() {
        assert_eq!(normalize_alias("Phường 01", AddressLevel::Ward), "1");
        assert_eq!(normalize_alias("Quận 03", AddressLevel::District), "3");
        assert_eq!(normalize_alias("Phường 010", AddressLevel::Ward), "10");
    }

    #[test]
    fn leaves_embedded_digit_groups_alone() {
        // "05A" has no trailing word boundary after the digits, so the
        // zero-padding collapse does not fire inside it.
        assert_eq!(normalize_alias("Khu 05A", AddressLevel::Ward), "khu 05a");
    }

    #[test]
    fn does_not_depad_province_numbers() {
        assert_eq!(
            normalize_alias("Tỉnh 01", AddressLevel::Province),
            "01"
        );
    }

    #[test]
    fn folds_accents() {
        assert_eq!(fold_accents("Thành phố Hồ Chí Minh"), "thanh pho ho chi minh");
        assert_eq!(fold_accents("Phường Bến Nghé"), "phuong ben nghe");
    }

    #[test]
    fn fold_keeps_d_with_stroke() {
        assert_eq!(fold_accents("Thành phố Đà Nẵng"), "thanh pho đa nang");
    }

    #[test]
    fn alias_order_is_normalized_then_raw_then_folded() {
        assert_eq!(
            get_aliases("Phường Bến Nghé", AddressLevel::Ward),
            vec![
                "bến nghé".to_string(),
                "phường bến nghé".to_string(),
                "phuong ben nghe".to_string(),
            ]
        );
    }

    #[test]
    fn aliases_collapse_duplicates() {
        // An unprefixed ASCII name yields identical forms
        assert_eq!(
            get_aliases("An Khanh", AddressLevel::Ward),
            vec!["an khanh".to_string()]
        );
    }

    #[test]
    fn aliases_are_deterministic() {
        let first = get_aliases("Quận Bình Thạnh", AddressLevel::District);
        let second = get_aliases("Quận Bình Thạnh", AddressLevel::District);
        assert_eq!(first, second);
    }

    #[test]
    fn aliases_trim_surrounding_whitespace() {
        assert_eq!(
            get_aliases("  Quận 1  ", AddressLevel::District),
            get_aliases("Quận 1", AddressLevel::District)
        );
    }
}
