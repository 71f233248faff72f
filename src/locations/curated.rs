//! The built-in curated map catalog. Each map carries the badge unlocked by
//! mastering every one of its locations.

use crate::geo::LatLng;

#[derive(Debug)]
pub struct CuratedMap {
    pub id: &'static str,
    pub title: &'static str,
    pub master_badge: &'static str,
    pub locations: &'static [LatLng],
}

const TOURIST_TRAPS: &[LatLng] = &[
    LatLng::new(40.758141918218215, -73.98556339059482), // Times Square
    LatLng::new(48.85837, 2.29448),                      // Eiffel Tower
    LatLng::new(43.72302, 10.39663),                     // Leaning Tower of Pisa
    LatLng::new(36.43211, 25.42274),                     // Santorini
    LatLng::new(34.1016, -118.3267),                     // Hollywood Walk of Fame
    LatLng::new(-8.431615675788212, 115.27931372545669), // Bali Rice Terrace
    LatLng::new(41.90094, 12.48282),                     // Fontana di Trevi
    LatLng::new(41.88263, -87.62347),                    // Cloud Gate
];

const POP_CULTURE_HOTSPOTS: &[LatLng] = &[
    LatLng::new(51.53208661844163, -0.17733156427290014), // Abbey Road Crossing
    LatLng::new(51.531662597646516, -0.12359504241888854), // Kings Cross Station
    LatLng::new(-37.857915721189194, 175.68038076424554), // Hobbit Filming Locations
    LatLng::new(47.95960899040987, -124.3927660840214),   // Forks Welcome Sign
    LatLng::new(39.174966450733045, 23.651502126166665),  // Mamma Mia Church
];

const CANCELLED_DESTINATIONS: &[LatLng] = &[
    LatLng::new(28.4112021983323, -81.46125968952879), // SeaWorld Orlando
    LatLng::new(25.208835973937937, 55.27398067222927), // Dubai
    LatLng::new(34.044508292092836, -118.25072321819881), // Cecil Hotel, LA
    LatLng::new(25.289639817407693, 51.53303514499203), // Doha
    LatLng::new(55.757845632424775, 37.60879438959731), // Moscow
];

const CONSPIRACY_CORE: &[LatLng] = &[
    LatLng::new(57.290986309158036, -4.447722401522474), // Loch Ness
    LatLng::new(39.84638651968429, -104.67407641614274), // Denver International Airport
    LatLng::new(33.392645753115154, -104.5229393417492), // Roswell, New Mexico
    LatLng::new(51.17889, -1.82611),                     // Stonehenge
    LatLng::new(41.90184100097306, 12.457251348781584),  // Vatican
    LatLng::new(-27.12502092798182, -109.27716304844438), // Moai
    LatLng::new(34.101518239914036, -118.32819749158988), // Scientology
];

pub const CURATED_MAPS: &[CuratedMap] = &[
    CuratedMap {
        id: "tourist_traps",
        title: "Tourist Traps",
        master_badge: "TOURIST_TRAPS_MASTER",
        locations: TOURIST_TRAPS,
    },
    CuratedMap {
        id: "pop_culture_hotspots",
        title: "Pop Culture Hotspots",
        master_badge: "POP_CULTURE_MASTER",
        locations: POP_CULTURE_HOTSPOTS,
    },
    CuratedMap {
        id: "cancelled_destinations",
        title: "Cancelled Destinations",
        master_badge: "CANCELLED_DESTINATIONS_MASTER",
        locations: CANCELLED_DESTINATIONS,
    },
    CuratedMap {
        id: "conspiracy_core",
        title: "Conspiracy Core",
        master_badge: "CONSPIRACY_CORE_MASTER",
        locations: CONSPIRACY_CORE,
    },
];

pub fn curated_map(map_id: &str) -> Option<&'static CuratedMap> {
    CURATED_MAPS.iter().find(|map| map.id == map_id)
}

/// Locations for a curated map; empty for an unknown id.
pub fn locations_for_map(map_id: &str) -> &'static [LatLng] {
    curated_map(map_id).map(|map| map.locations).unwrap_or(&[])
}

pub fn curated_map_ids() -> impl Iterator<Item = &'static str> {
    CURATED_MAPS.iter().map(|map| map.id)
}
