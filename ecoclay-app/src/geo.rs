//! # Geocoding stub
//! Address-to-coordinate resolution is a placeholder: every address lands at a
//! small perturbation around the fixed city center, exactly like the original
//! prototype. The jitter is derived from a hash of the address rather than a
//! random draw so the same address always resolves to the same point. A real
//! deployment swaps this module for an actual geocoding collaborator.

use xxhash_rust::xxh3::xxh3_64;

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

pub const CITY_CENTER: Coordinates = Coordinates {
    latitude: 40.4168,
    longitude: -3.7038,
};

/// Maximum distance from the city center, in degrees, on each axis.
const JITTER_DEGREES: f64 = 0.05;

pub fn geocode_address(address: &str) -> Coordinates {
    let hash = xxh3_64(address.trim().to_lowercase().as_bytes());

    // independent 32-bit lanes for the two axes
    let lat_lane = (hash >> 32) as u32;
    let lon_lane = hash as u32;

    Coordinates {
        latitude: CITY_CENTER.latitude + jitter(lat_lane),
        longitude: CITY_CENTER.longitude + jitter(lon_lane),
    }
}

fn jitter(lane: u32) -> f64 {
    (lane as f64 / u32::MAX as f64 - 0.5) * 2.0 * JITTER_DEGREES
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_address_always_resolves_to_the_same_point() {
        let a = geocode_address("Calle 19 con Carrera 100");
        let b = geocode_address("Calle 19 con Carrera 100");
        assert_eq!(a, b);

        // whitespace and case don't matter
        let c = geocode_address("  calle 19 CON carrera 100 ");
        assert_eq!(a, c);
    }

    #[test]
    fn different_addresses_scatter() {
        let a = geocode_address("Calle 19 con Carrera 100");
        let b = geocode_address("Av. Ciudad de Cali con Calle 38 Sur");
        assert_ne!(a, b);
    }

    #[test]
    fn everything_lands_near_the_city_center() {
        for address in [
            "",
            "Calle 19 con Carrera 100",
            "Vía al Relleno Sanitario Doña Juana",
            "Calle 152 con Autopista Norte",
        ] {
            let point = geocode_address(address);
            assert!((point.latitude - CITY_CENTER.latitude).abs() <= JITTER_DEGREES);
            assert!((point.longitude - CITY_CENTER.longitude).abs() <= JITTER_DEGREES);
        }
    }
}
