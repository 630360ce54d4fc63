//! # Zones
//! The map page's catalog of polluted zones of Bogotá. Reference data, not a
//! stored collection. Users pick a zone off the map and organize a cleanup
//! event there.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    /// The label the map shows next to a zone's contamination level.
    pub fn label(self) -> &'static str {
        match self {
            Priority::High => "Alto",
            Priority::Medium => "Medio",
            Priority::Low => "Bajo",
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct Zone {
    pub id: u32,
    pub name: &'static str,
    pub upz: &'static str,
    pub address: &'static str,
    pub latitude: f64,
    pub longitude: f64,
    pub priority: Priority,
    pub description: &'static str,
}

pub fn contaminated_zones() -> &'static [Zone] {
    CONTAMINATED_ZONES
}

pub fn zones_with_priority(priority: Priority) -> impl Iterator<Item = &'static Zone> {
    CONTAMINATED_ZONES
        .iter()
        .filter(move |zone| zone.priority == priority)
}

const CONTAMINATED_ZONES: &[Zone] = &[
    Zone {
        id: 1,
        name: "Kennedy - Patio Bonito",
        upz: "UPZ 80 Patio Bonito / UPZ 39 Kennedy Central",
        address: "Av. Ciudad de Cali con Calle 38 Sur",
        latitude: 4.6097,
        longitude: -74.1506,
        priority: Priority::High,
        description: "Alta densidad vehicular y emisiones cerca de Portal Américas",
    },
    Zone {
        id: 2,
        name: "Bosa - El Porvenir",
        upz: "UPZ 86 El Porvenir / UPZ 83 Bosa Occidental",
        address: "Calle 69 Sur con Carrera 78G",
        latitude: 4.5847,
        longitude: -74.1742,
        priority: Priority::High,
        description: "Zona industrial sin zonas verdes, límite con Soacha",
    },
    Zone {
        id: 3,
        name: "Ciudad Bolívar - Mochuelo Bajo",
        upz: "UPZ 67 Mochuelo Bajo / UPZ 69 El Tesoro",
        address: "Vía al Relleno Sanitario Doña Juana",
        latitude: 4.5234,
        longitude: -74.1836,
        priority: Priority::High,
        description: "Acumulación de residuos y escombros cerca del relleno sanitario",
    },
    Zone {
        id: 4,
        name: "Puente Aranda - San Rafael",
        upz: "UPZ 43 San Rafael / Carvajal",
        address: "Calle 3ra con Carrera 53",
        latitude: 4.6351,
        longitude: -74.1201,
        priority: Priority::High,
        description: "Zona industrial cerca a Av. 68 y Av. de Las Américas",
    },
    Zone {
        id: 5,
        name: "Tunjuelito - Venecia",
        upz: "UPZ 55 Venecia / UPZ 54 San Carlos",
        address: "Calle 47B Sur con Carrera 24",
        latitude: 4.5892,
        longitude: -74.1372,
        priority: Priority::Medium,
        description: "Fluctuaciones por condiciones de viento y congestión vehicular",
    },
    Zone {
        id: 6,
        name: "Fontibón - Centro",
        upz: "UPZ 98 Fontibón Centro / UPZ 97 Capellanía",
        address: "Calle 19 con Carrera 100",
        latitude: 4.6704,
        longitude: -74.1436,
        priority: Priority::Medium,
        description: "Influencia de tráfico aéreo y carga industrial",
    },
    Zone {
        id: 7,
        name: "Suba - Rincón",
        upz: "UPZ 71 Suba Rincón / UPZ 72 Tibabuyes",
        address: "Calle 129 con Avenida Suba",
        latitude: 4.7582,
        longitude: -74.0861,
        priority: Priority::Medium,
        description: "Afectación ocasional por tráfico denso y urbanización",
    },
    Zone {
        id: 8,
        name: "Suba - Mazurén",
        upz: "UPZ 75 Niza Norte",
        address: "Calle 152 con Autopista Norte",
        latitude: 4.7889,
        longitude: -74.0536,
        priority: Priority::Low,
        description: "Buena arborización y planeación urbana",
    },
    Zone {
        id: 9,
        name: "Suba - Colina Campestre",
        upz: "UPZ 76",
        address: "Calle 138 con Carrera 58",
        latitude: 4.7736,
        longitude: -74.0694,
        priority: Priority::Low,
        description: "Sector residencial con bajo impacto industrial y buena ventilación",
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn the_catalog_partitions_by_priority() {
        let total = contaminated_zones().len();
        let by_priority = [Priority::High, Priority::Medium, Priority::Low]
            .into_iter()
            .map(|p| zones_with_priority(p).count())
            .sum::<usize>();
        assert_eq!(total, by_priority);
        assert_eq!(zones_with_priority(Priority::High).count(), 4);
    }

    #[test]
    fn zone_ids_are_unique() {
        let mut ids: Vec<_> = contaminated_zones().iter().map(|z| z.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), contaminated_zones().len());
    }
}
