//! Model of the map surface: markers in, clicks out, camera commands down.
//!
//! The tile renderer itself is external. This module only decides what it is
//! told to draw and where it is told to look.

#[cfg(test)]
#[path = "map_test.rs"]
mod map_test;

use serde::{Deserialize, Serialize};

use crate::types::{Coordinates, Professional, ProfessionalId, ServiceType};

/// Initial camera center (Plaça de Catalunya).
pub const BARCELONA_CENTER: Coordinates = Coordinates { lng: 2.1734, lat: 41.3851 };

/// Hard pan limits of the map.
pub const BARCELONA_BOUNDS: Bounds =
    Bounds { south_west: Coordinates { lng: 2.0, lat: 41.30 }, north_east: Coordinates { lng: 2.3, lat: 41.47 } };

/// Zoom level when the map first loads.
pub const DEFAULT_ZOOM: f64 = 13.0;
/// Zoom level when flying to a selected professional.
pub const FOCUS_ZOOM: f64 = 15.0;
/// Zoom level when flying to the device location.
pub const LOCATION_ZOOM: f64 = 14.0;

/// Axis-aligned geographic rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub south_west: Coordinates,
    pub north_east: Coordinates,
}

impl Bounds {
    /// Whether `point` lies inside the rectangle (edges included).
    #[must_use]
    pub fn contains(&self, point: Coordinates) -> bool {
        (self.south_west.lng..=self.north_east.lng).contains(&point.lng)
            && (self.south_west.lat..=self.north_east.lat).contains(&point.lat)
    }

    /// Nearest point inside the rectangle.
    #[must_use]
    pub fn clamp(&self, point: Coordinates) -> Coordinates {
        Coordinates {
            lng: point.lng.clamp(self.south_west.lng, self.north_east.lng),
            lat: point.lat.clamp(self.south_west.lat, self.north_east.lat),
        }
    }
}

/// One pin on the map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    pub professional_id: ProfessionalId,
    pub coordinates: Coordinates,
    pub service: ServiceType,
    pub selected: bool,
}

/// Camera instruction sent to the map surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MapCommand {
    FlyTo { center: Coordinates, zoom: f64 },
}

impl MapCommand {
    /// Fly to a professional's pin.
    #[must_use]
    pub fn focus(professional: &Professional) -> Self {
        Self::FlyTo { center: professional.coordinates, zoom: FOCUS_ZOOM }
    }

    /// Fly to a device location, kept inside the map bounds.
    #[must_use]
    pub fn locate(location: Coordinates) -> Self {
        Self::FlyTo { center: BARCELONA_BOUNDS.clamp(location), zoom: LOCATION_ZOOM }
    }
}

/// Notification coming back from the map surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MapEvent {
    MarkerClicked { professional_id: ProfessionalId },
}

/// Build one marker per professional, flagging the selected one.
#[must_use]
pub fn markers(professionals: &[Professional], selected: Option<&str>) -> Vec<Marker> {
    professionals
        .iter()
        .map(|p| Marker {
            professional_id: p.id.clone(),
            coordinates: p.coordinates,
            service: p.service,
            selected: selected == Some(p.id.as_str()),
        })
        .collect()
}
