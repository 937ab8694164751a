use serde::Serialize;

/// Police station directory entry (WGS84 coordinates).
#[derive(Debug, Clone, Serialize)]
pub struct PoliceStation {
    pub id: i32,
    pub name: &'static str,
    pub phone: &'static str,
    pub address: &'static str,
    pub latitude: f64,
    pub longitude: f64,
}

// Static directory; the authoritative list lives with dispatch, this copy
// only serves the nearest-station lookup.
pub const STATIONS: [PoliceStation; 5] = [
    PoliceStation {
        id: 1,
        name: "Astana City Police Department",
        phone: "+7 (7172) 71-61-71",
        address: "7 Republic Ave",
        latitude: 51.1605,
        longitude: 71.4704,
    },
    PoliceStation {
        id: 2,
        name: "Almaty City Police Department",
        phone: "+7 (727) 254-42-22",
        address: "57 Masanchi St",
        latitude: 43.2551,
        longitude: 76.9456,
    },
    PoliceStation {
        id: 3,
        name: "Shymkent City Police Department",
        phone: "+7 (7252) 53-47-71",
        address: "36 Kazybek Bi St",
        latitude: 42.3174,
        longitude: 69.5872,
    },
    PoliceStation {
        id: 4,
        name: "Akmola Region Police Department",
        phone: "+7 (7162) 25-50-02",
        address: "29 Abai St, Kokshetau",
        latitude: 53.2948,
        longitude: 69.3944,
    },
    PoliceStation {
        id: 5,
        name: "Aktobe Region Police Department",
        phone: "+7 (7132) 54-45-96",
        address: "36 Abilkayir Khan Ave, Aktobe",
        latitude: 50.2985,
        longitude: 57.1487,
    },
];

/// Haversine distance between two WGS84 points, in kilometers.
pub fn distance_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    const EARTH_RADIUS_KM: f64 = 6371.0;

    let lat1_rad = lat1.to_radians();
    let lat2_rad = lat2.to_radians();
    let delta_lat = (lat2 - lat1).to_radians();
    let delta_lon = (lon2 - lon1).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

/// Nearest station to the given point, with its distance in kilometers.
pub fn nearest(latitude: f64, longitude: f64) -> (&'static PoliceStation, f64) {
    let mut best = &STATIONS[0];
    let mut best_distance = f64::MAX;

    for station in STATIONS.iter() {
        let distance = distance_km(latitude, longitude, station.latitude, station.longitude);
        if distance < best_distance {
            best_distance = distance;
            best = station;
        }
    }

    (best, best_distance)
}
