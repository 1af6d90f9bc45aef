//! Destination identity: readable slugs for URLs, GUIDs for the backend.
//!
//! Every lookup degrades to passthrough on a miss. An unknown slug is handed
//! to the backend as-is rather than rejected, and a miss is logged at `warn`.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

static GUID_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^[0-9a-f]{8}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{12}$")
        .expect("valid guid regex")
});

/// Slug to backend GUID. Each slug maps to exactly one GUID and no GUID repeats.
const SLUG_GUIDS: &[(&str, &str)] = &[
    ("queenstown", "f8a7b3c1-2d4e-4f6a-9b8c-1e2d3f4a5b6c"),
    ("auckland", "a1b2c3d4-e5f6-4789-a0b1-c2d3e4f5a6b7"),
    ("rotorua", "b7c8d9e0-f1a2-4b3c-8d4e-5f6a7b8c9d0e"),
    ("milford-sound", "c3d4e5f6-a7b8-4c9d-8e0f-1a2b3c4d5e6f"),
    ("wellington", "d9e0f1a2-b3c4-4d5e-9f6a-7b8c9d0e1f2a"),
    ("christchurch", "e5f6a7b8-c9d0-4e1f-8a2b-3c4d5e6f7a8b"),
    ("franz-josef", "f1a2b3c4-d5e6-4f7a-9b8c-9d0e1f2a3b4c"),
    ("bay-of-islands", "0a1b2c3d-4e5f-4a6b-8c7d-8e9f0a1b2c3d"),
    ("taupo", "1b2c3d4e-5f6a-4b7c-9d8e-9f0a1b2c3d4e"),
    ("wanaka", "2c3d4e5f-6a7b-4c8d-8e9f-0a1b2c3d4e5f"),
    ("tekapo", "3d4e5f6a-7b8c-4d9e-9f0a-1b2c3d4e5f6a"),
    ("hobbiton", "4e5f6a7b-8c9d-4e0f-8a1b-2c3d4e5f6a7b"),
];

/// A destination identifier as received at the API boundary.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum DestinationId {
    Slug(String),
    Guid(String),
}

impl DestinationId {
    /// Classifies `raw` once. Surrounding whitespace is ignored.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if is_guid(trimmed) {
            DestinationId::Guid(trimmed.to_owned())
        } else {
            DestinationId::Slug(trimmed.to_owned())
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            DestinationId::Slug(s) | DestinationId::Guid(s) => s,
        }
    }

    /// GUID form for backend calls; unmapped slugs pass through unchanged.
    #[must_use]
    pub fn to_guid(&self) -> String {
        match self {
            DestinationId::Guid(guid) => guid.clone(),
            DestinationId::Slug(slug) => guid_for_slug(slug).map_or_else(
                || {
                    tracing::warn!(destination_id = %slug, "no GUID mapping for destination slug");
                    slug.clone()
                },
                str::to_owned,
            ),
        }
    }

    /// Slug form for display; unmapped GUIDs pass through unchanged.
    #[must_use]
    pub fn to_slug(&self) -> String {
        match self {
            DestinationId::Slug(slug) => slug.clone(),
            DestinationId::Guid(guid) => slug_for_guid(guid).map_or_else(
                || {
                    tracing::warn!(destination_id = %guid, "no slug mapping for destination GUID");
                    guid.clone()
                },
                str::to_owned,
            ),
        }
    }

    /// Whether the identifier is present in the static mapping table.
    #[must_use]
    pub fn is_known(&self) -> bool {
        match self {
            DestinationId::Slug(slug) => guid_for_slug(slug).is_some(),
            DestinationId::Guid(guid) => slug_for_guid(guid).is_some(),
        }
    }
}

impl std::fmt::Display for DestinationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returns `true` when `value` has the 8-4-4-4-12 hex shape.
#[must_use]
pub fn is_guid(value: &str) -> bool {
    GUID_RE.is_match(value)
}

/// Backend GUID for a slug. Matching ignores case and surrounding
/// whitespace; anything that does not map comes back exactly as given.
#[must_use]
pub fn map_to_guid(id: &str) -> String {
    passthrough_unless_mapped(id, DestinationId::to_guid)
}

/// Slug for a backend GUID, with the same passthrough rule as [`map_to_guid`].
#[must_use]
pub fn map_to_slug(guid: &str) -> String {
    passthrough_unless_mapped(guid, DestinationId::to_slug)
}

fn passthrough_unless_mapped(raw: &str, map: fn(&DestinationId) -> String) -> String {
    let parsed = DestinationId::parse(raw);
    let mapped = map(&parsed);
    if mapped == parsed.as_str() {
        raw.to_owned()
    } else {
        mapped
    }
}

/// Identifier to show in URLs: the slug when one is known.
#[must_use]
pub fn display_id(id: &str) -> String {
    map_to_slug(id)
}

/// Identifier to send to the backend: the GUID when one is known.
#[must_use]
pub fn api_id(id: &str) -> String {
    map_to_guid(id)
}

/// All known `(slug, guid)` pairs.
#[must_use]
pub fn known_mappings() -> &'static [(&'static str, &'static str)] {
    SLUG_GUIDS
}

fn guid_for_slug(slug: &str) -> Option<&'static str> {
    let needle = slug.trim().to_ascii_lowercase();
    SLUG_GUIDS
        .iter()
        .find(|(s, _)| *s == needle)
        .map(|(_, g)| *g)
}

fn slug_for_guid(guid: &str) -> Option<&'static str> {
    SLUG_GUIDS
        .iter()
        .find(|(_, g)| g.eq_ignore_ascii_case(guid.trim()))
        .map(|(s, _)| *s)
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn every_table_guid_is_guid_shaped() {
        for (slug, guid) in SLUG_GUIDS {
            assert!(is_guid(guid), "{slug} maps to malformed guid {guid}");
            assert!(!is_guid(slug), "slug {slug} must not look like a guid");
        }
    }

    #[test]
    fn table_has_no_duplicate_slugs_or_guids() {
        let slugs: HashSet<_> = SLUG_GUIDS.iter().map(|(s, _)| *s).collect();
        let guids: HashSet<_> = SLUG_GUIDS.iter().map(|(_, g)| *g).collect();
        assert_eq!(slugs.len(), SLUG_GUIDS.len());
        assert_eq!(guids.len(), SLUG_GUIDS.len());
    }

    #[test]
    fn slugs_and_guids_round_trip() {
        for (slug, guid) in SLUG_GUIDS {
            assert_eq!(map_to_guid(&map_to_slug(guid)), *guid);
            assert_eq!(map_to_slug(&map_to_guid(slug)), *slug);
        }
    }

    #[test]
    fn guid_shaped_input_passes_through_unchanged() {
        let unknown = "12345678-9abc-def0-1234-56789abcdef0";
        assert_eq!(map_to_guid(unknown), unknown);
        let upper = "F8A7B3C1-2D4E-4F6A-9B8C-1E2D3F4A5B6C";
        assert_eq!(map_to_guid(upper), upper);
    }

    #[test]
    fn unknown_slug_passes_through() {
        assert_eq!(map_to_guid("unknown-place"), "unknown-place");
        assert_eq!(api_id("unknown-place"), "unknown-place");
    }

    #[test]
    fn unknown_guid_passes_through_inverse_lookup() {
        let unknown = "00000000-0000-4000-8000-000000000000";
        assert_eq!(map_to_slug(unknown), unknown);
        assert_eq!(display_id(unknown), unknown);
    }

    #[test]
    fn misses_return_input_untouched() {
        assert_eq!(map_to_guid(" unknown "), " unknown ");
        let padded = " 00000000-0000-4000-8000-000000000000\n";
        assert_eq!(map_to_slug(padded), padded);
        assert_eq!(map_to_guid("  Queenstown "), "f8a7b3c1-2d4e-4f6a-9b8c-1e2d3f4a5b6c");
    }

    #[test]
    fn parse_discriminates_once() {
        assert_eq!(
            DestinationId::parse(" queenstown "),
            DestinationId::Slug("queenstown".into())
        );
        assert!(matches!(
            DestinationId::parse("f8a7b3c1-2d4e-4f6a-9b8c-1e2d3f4a5b6c"),
            DestinationId::Guid(_)
        ));
        // wrong group lengths
        assert!(matches!(
            DestinationId::parse("f8a7b3c-2d4e-4f6a-9b8c-1e2d3f4a5b6c"),
            DestinationId::Slug(_)
        ));
    }

    #[test]
    fn slug_lookup_ignores_case() {
        assert_eq!(
            map_to_guid("Queenstown"),
            "f8a7b3c1-2d4e-4f6a-9b8c-1e2d3f4a5b6c"
        );
    }

    #[test]
    fn reverse_lookup_ignores_guid_case() {
        assert_eq!(
            display_id("F8A7B3C1-2D4E-4F6A-9B8C-1E2D3F4A5B6C"),
            "queenstown"
        );
    }

    #[test]
    fn is_known_reflects_table_membership() {
        assert!(DestinationId::parse("rotorua").is_known());
        assert!(!DestinationId::parse("atlantis").is_known());
    }
}
