//! Static bidirectional table between the local store's type display names and the
//! reference service's type names. Enumerated once; never derived at runtime.

use serde::Serialize;

use crate::error::UnmappableType;

/// (local display name, reference name) for all 18 elemental types.
pub const TYPE_NAME_TABLE: [(&str, &str); 18] = [
    ("노말", "normal"),
    ("불꽃", "fire"),
    ("물", "water"),
    ("풀", "grass"),
    ("전기", "electric"),
    ("얼음", "ice"),
    ("격투", "fighting"),
    ("독", "poison"),
    ("땅", "ground"),
    ("비행", "flying"),
    ("에스퍼", "psychic"),
    ("벌레", "bug"),
    ("바위", "rock"),
    ("고스트", "ghost"),
    ("드래곤", "dragon"),
    ("강철", "steel"),
    ("악", "dark"),
    ("페어리", "fairy"),
];

#[derive(Debug, Clone, Serialize)]
pub struct TypeNameEntry {
    pub local: &'static str,
    pub reference: &'static str,
}

/// Lookup over [TYPE_NAME_TABLE].
#[derive(Debug, Clone, Copy, Default)]
pub struct TypeNames;

impl TypeNames {
    /// Reference-service name for a type. Accepts the local display name or an
    /// already-canonical reference name (case-insensitive).
    pub fn to_reference(&self, name: &str) -> Result<&'static str, UnmappableType> {
        let name = name.trim();
        TYPE_NAME_TABLE
            .iter()
            .find(|(local, reference)| *local == name || reference.eq_ignore_ascii_case(name))
            .map(|(_, reference)| *reference)
            .ok_or_else(|| UnmappableType(name.to_string()))
    }

    /// Local display name for a reference type name, if known.
    pub fn to_local(&self, reference: &str) -> Option<&'static str> {
        TYPE_NAME_TABLE
            .iter()
            .find(|(_, r)| r.eq_ignore_ascii_case(reference.trim()))
            .map(|(local, _)| *local)
    }

    pub fn entries(&self) -> Vec<TypeNameEntry> {
        TYPE_NAME_TABLE
            .iter()
            .map(|(local, reference)| TypeNameEntry { local, reference })
            .collect()
    }
}
