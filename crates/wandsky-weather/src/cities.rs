//! Destination ids and Chinese display names to WeatherAPI city names.

use wandsky_core::destinations;

/// Catalog slug to the place name WeatherAPI recognises. Several destinations
/// are not towns (a fiord, a film set) and are pointed at the nearest one.
const SLUG_CITIES: &[(&str, &str)] = &[
    ("queenstown", "Queenstown"),
    ("auckland", "Auckland"),
    ("rotorua", "Rotorua"),
    ("milford-sound", "Milford Sound"),
    ("wellington", "Wellington"),
    ("christchurch", "Christchurch"),
    ("franz-josef", "Franz Josef"),
    ("bay-of-islands", "Paihia"),
    ("taupo", "Taupo"),
    ("wanaka", "Wanaka"),
    ("tekapo", "Lake Tekapo"),
    ("hobbiton", "Matamata"),
];

/// Chinese names for places outside the catalog, plus common alternates.
const CHINESE_CITIES: &[(&str, &str)] = &[
    ("但尼丁", "Dunedin"),
    ("达尼丁", "Dunedin"),
    ("纳尔逊", "Nelson"),
    ("凯库拉", "Kaikoura"),
    ("蒂阿瑙", "Te Anau"),
    ("汉密尔顿", "Hamilton"),
    ("内皮尔", "Napier"),
    ("新普利茅斯", "New Plymouth"),
    ("克赖斯特彻奇", "Christchurch"),
    ("特卡波湖", "Lake Tekapo"),
    ("陶波湖", "Taupo"),
    ("霍比屯", "Matamata"),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedCity {
    /// The input as received, trimmed.
    pub requested: String,
    /// The name to query WeatherAPI with.
    pub city: String,
}

/// Resolves a destination id (catalog id, slug, GUID) or a Chinese display
/// name to an English city name. Anything unrecognised is used verbatim.
#[must_use]
pub fn resolve_city(input: &str) -> ResolvedCity {
    let requested = input.trim().to_owned();

    let city = destinations::find(&requested)
        .or_else(|| destinations::find_by_chinese_name(&requested))
        .and_then(|d| city_for_slug(d.slug))
        .or_else(|| {
            CHINESE_CITIES
                .iter()
                .find(|(zh, _)| *zh == requested)
                .map(|(_, en)| *en)
        })
        .map_or_else(|| requested.clone(), str::to_owned);

    ResolvedCity { requested, city }
}

fn city_for_slug(slug: &str) -> Option<&'static str> {
    SLUG_CITIES
        .iter()
        .find(|(s, _)| *s == slug)
        .map(|(_, city)| *city)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_catalog_destination_has_a_weather_city() {
        for d in destinations::all() {
            assert!(
                city_for_slug(d.slug).is_some(),
                "{} has no weather city",
                d.slug
            );
        }
    }

    #[test]
    fn resolves_catalog_id_slug_and_guid() {
        assert_eq!(resolve_city("2").city, "Auckland");
        assert_eq!(resolve_city("bay-of-islands").city, "Paihia");
        assert_eq!(
            resolve_city("f8a7b3c1-2d4e-4f6a-9b8c-1e2d3f4a5b6c").city,
            "Queenstown"
        );
    }

    #[test]
    fn resolves_chinese_names() {
        assert_eq!(resolve_city("皇后镇").city, "Queenstown");
        assert_eq!(resolve_city("米尔福德峡湾").city, "Milford Sound");
        assert_eq!(resolve_city("但尼丁").city, "Dunedin");
    }

    #[test]
    fn unknown_input_passes_through_trimmed() {
        let resolved = resolve_city("  Nelson ");
        assert_eq!(resolved.requested, "Nelson");
        assert_eq!(resolved.city, "Nelson");
    }
}
