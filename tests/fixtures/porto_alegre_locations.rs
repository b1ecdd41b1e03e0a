//! Porto Alegre locations for realistic test fixtures.
//!
//! Coordinates are approximate street-level positions of public landmarks.

use route_planner::traits::Coordinate;

/// A named location with coordinates.
#[derive(Debug, Clone, Copy)]
pub struct Location {
    pub name: &'static str,
    pub lon: f64,
    pub lat: f64,
}

impl Location {
    pub const fn new(name: &'static str, lon: f64, lat: f64) -> Self {
        Self { name, lon, lat }
    }

    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.lon, self.lat)
    }

    /// Google Maps viewport link centered on the location.
    pub fn maps_link(&self) -> String {
        format!("https://www.google.com/maps/@{},{},17z", self.lat, self.lon)
    }
}

/// Delivery hub the scenarios start from.
pub const ORIGIN: Location = Location::new("Depot", -51.2177, -30.0346);

// ============================================================================
// Centro Historico (all within ~1 km of each other)
// ============================================================================

pub const CENTRO: &[Location] = &[
    Location::new("Mercado Publico", -51.2281, -30.0272),
    Location::new("Casa de Cultura Mario Quintana", -51.2334, -30.0314),
    Location::new("Praca da Matriz", -51.2301, -30.0335),
];

// ============================================================================
// Outlying neighbourhoods (each > 10 km from Centro and from each other)
// ============================================================================

pub const CAMPUS_DO_VALE: Location = Location::new("UFRGS Campus do Vale", -51.1219, -30.0711);
pub const BELEM_NOVO: Location = Location::new("Belem Novo", -51.1780, -30.2050);

// ============================================================================
// Spread across the city
// ============================================================================

pub const CITY: &[Location] = &[
    Location::new("Mercado Publico", -51.2281, -30.0272),
    Location::new("Usina do Gasometro", -51.2419, -30.0343),
    Location::new("Parque Farroupilha", -51.2131, -30.0386),
    Location::new("Parcao", -51.2010, -30.0261),
    Location::new("Shopping Iguatemi", -51.1622, -30.0268),
    Location::new("Arena do Gremio", -51.1953, -29.9742),
    Location::new("Aeroporto Salgado Filho", -51.1753, -29.9939),
    Location::new("Estadio Beira-Rio", -51.2364, -30.0652),
    Location::new("Barra Shopping Sul", -51.2277, -30.0846),
    Location::new("PUCRS", -51.1729, -30.0586),
    Location::new("UFRGS Campus do Vale", -51.1219, -30.0711),
    Location::new("Belem Novo", -51.1780, -30.2050),
];

/// Final drop-off used when a scenario needs a fixed end.
pub const HOME: Location = Location::new("Home", -51.1850, -30.0450);
