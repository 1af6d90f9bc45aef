//! Static destination catalog served without a backend round-trip.

use serde::Serialize;

use crate::destination_id::DestinationId;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Destination {
    pub id: &'static str,
    pub slug: &'static str,
    pub name: &'static str,
    pub chinese_name: &'static str,
    pub region: &'static str,
    pub description: &'static str,
    pub image: &'static str,
    pub rating: f32,
    pub price_from: u32,
    pub tags: &'static [&'static str],
}

/// Optional filters for [`search`]. Both are case-insensitive.
#[derive(Debug, Default, Clone)]
pub struct DestinationFilter<'a> {
    pub region: Option<&'a str>,
    pub query: Option<&'a str>,
}

static DESTINATIONS: &[Destination] = &[
    Destination {
        id: "1",
        slug: "queenstown",
        name: "Queenstown",
        chinese_name: "皇后镇",
        region: "Otago",
        description: "Adventure capital on the shores of Lake Wakatipu, ringed by the Remarkables.",
        image: "/images/destinations/queenstown.jpg",
        rating: 4.9,
        price_from: 1299,
        tags: &["adventure", "lakes", "skiing"],
    },
    Destination {
        id: "2",
        slug: "auckland",
        name: "Auckland",
        chinese_name: "奥克兰",
        region: "Auckland",
        description: "City of Sails spread across volcanic cones between two harbours.",
        image: "/images/destinations/auckland.jpg",
        rating: 4.7,
        price_from: 899,
        tags: &["city", "harbour", "food"],
    },
    Destination {
        id: "3",
        slug: "rotorua",
        name: "Rotorua",
        chinese_name: "罗托鲁瓦",
        region: "Bay of Plenty",
        description: "Geothermal valleys, bubbling mud pools and living Māori culture.",
        image: "/images/destinations/rotorua.jpg",
        rating: 4.6,
        price_from: 799,
        tags: &["geothermal", "culture"],
    },
    Destination {
        id: "4",
        slug: "milford-sound",
        name: "Milford Sound",
        chinese_name: "米尔福德峡湾",
        region: "Southland",
        description: "Sheer fiord walls and waterfalls inside Fiordland National Park.",
        image: "/images/destinations/milford-sound.jpg",
        rating: 4.9,
        price_from: 1099,
        tags: &["fiords", "cruise", "nature"],
    },
    Destination {
        id: "5",
        slug: "wellington",
        name: "Wellington",
        chinese_name: "惠灵顿",
        region: "Wellington",
        description: "Compact harbour capital known for Te Papa, coffee and creative streets.",
        image: "/images/destinations/wellington.jpg",
        rating: 4.5,
        price_from: 849,
        tags: &["city", "museums", "food"],
    },
    Destination {
        id: "6",
        slug: "christchurch",
        name: "Christchurch",
        chinese_name: "基督城",
        region: "Canterbury",
        description: "Garden city on the Avon River and gateway to the Southern Alps.",
        image: "/images/destinations/christchurch.jpg",
        rating: 4.4,
        price_from: 829,
        tags: &["gardens", "city"],
    },
    Destination {
        id: "7",
        slug: "franz-josef",
        name: "Franz Josef Glacier",
        chinese_name: "弗朗茨约瑟夫冰川",
        region: "West Coast",
        description: "Temperate rainforest running up to a descending glacier.",
        image: "/images/destinations/franz-josef.jpg",
        rating: 4.7,
        price_from: 1199,
        tags: &["glacier", "hiking", "heli"],
    },
    Destination {
        id: "8",
        slug: "bay-of-islands",
        name: "Bay of Islands",
        chinese_name: "岛屿湾",
        region: "Northland",
        description: "Subtropical bay of 144 islands, dolphins and historic Waitangi.",
        image: "/images/destinations/bay-of-islands.jpg",
        rating: 4.6,
        price_from: 949,
        tags: &["sailing", "beaches", "history"],
    },
    Destination {
        id: "9",
        slug: "taupo",
        name: "Lake Taupo",
        chinese_name: "陶波",
        region: "Waikato",
        description: "New Zealand's largest lake with Huka Falls and the Tongariro Crossing nearby.",
        image: "/images/destinations/taupo.jpg",
        rating: 4.5,
        price_from: 749,
        tags: &["lakes", "hiking"],
    },
    Destination {
        id: "10",
        slug: "wanaka",
        name: "Wanaka",
        chinese_name: "瓦纳卡",
        region: "Otago",
        description: "Quiet lakeside town beneath Mount Aspiring, home of that tree.",
        image: "/images/destinations/wanaka.jpg",
        rating: 4.8,
        price_from: 1049,
        tags: &["lakes", "skiing", "hiking"],
    },
    Destination {
        id: "11",
        slug: "tekapo",
        name: "Lake Tekapo",
        chinese_name: "蒂卡波湖",
        region: "Canterbury",
        description: "Turquoise lake inside a dark-sky reserve, lupins in early summer.",
        image: "/images/destinations/tekapo.jpg",
        rating: 4.8,
        price_from: 979,
        tags: &["stargazing", "lakes"],
    },
    Destination {
        id: "12",
        slug: "hobbiton",
        name: "Hobbiton Movie Set",
        chinese_name: "霍比特人村",
        region: "Waikato",
        description: "The Shire, preserved on a working sheep farm near Matamata.",
        image: "/images/destinations/hobbiton.jpg",
        rating: 4.8,
        price_from: 399,
        tags: &["film", "farm"],
    },
];

#[must_use]
pub fn all() -> &'static [Destination] {
    DESTINATIONS
}

/// Finds a destination by catalog id, slug, or mapped GUID.
#[must_use]
pub fn find(id: &str) -> Option<&'static Destination> {
    let id = id.trim();
    if id.is_empty() {
        return None;
    }
    let slug = DestinationId::parse(id).to_slug();
    DESTINATIONS
        .iter()
        .find(|d| d.id == id || d.slug.eq_ignore_ascii_case(&slug))
}

/// Finds a destination by its Chinese display name.
#[must_use]
pub fn find_by_chinese_name(name: &str) -> Option<&'static Destination> {
    let name = name.trim();
    DESTINATIONS.iter().find(|d| d.chinese_name == name)
}

#[must_use]
pub fn search(filter: &DestinationFilter<'_>) -> Vec<&'static Destination> {
    let query = filter
        .query
        .map(|q| q.trim().to_lowercase())
        .filter(|q| !q.is_empty());
    DESTINATIONS
        .iter()
        .filter(|d| {
            filter
                .region
                .is_none_or(|r| d.region.eq_ignore_ascii_case(r.trim()))
        })
        .filter(|d| {
            query.as_deref().is_none_or(|q| {
                d.name.to_lowercase().contains(q)
                    || d.description.to_lowercase().contains(q)
                    || d.chinese_name.contains(q)
                    || d.tags.iter().any(|t| *t == q)
            })
        })
        .collect()
}
