//! Great-circle distance and pedestrian travel time between venues.
//!
//! Travel estimates are a geometric approximation: straight-line haversine
//! distance at walking speed, plus a flat buffer. There is no routing.
//!
//! A venue without coordinates contributes zero distance, so a pair
//! involving it only ever needs the buffer.

use crate::config::TravelModel;
use crate::model::{Coordinates, Venue};

impl TravelModel {
    /// Haversine distance in kilometres, or 0 when either venue lacks
    /// coordinates.
    pub fn distance_km(&self, a: &Venue, b: &Venue) -> f64 {
        match (a.coordinates, b.coordinates) {
            (Some(from), Some(to)) => haversine_km(from, to, self.earth_radius_km),
            _ => 0.0,
        }
    }

    /// Minutes needed to walk from `a` to `b`, buffer included.
    ///
    /// The walking time is rounded up to a whole minute before the buffer is
    /// added.
    pub fn travel_minutes(&self, a: &Venue, b: &Venue) -> u32 {
        let hours = self.distance_km(a, b) / self.walking_speed_kmh;
        // `as` saturates, so an extreme model caps at u32::MAX.
        let walking = (hours * 60.0).ceil() as u32;
        walking.saturating_add(self.buffer_minutes)
    }
}

/// Distance between two venues under the default travel model.
///
/// # Examples
///
/// ```
/// use schedule_engine::geo::distance_km;
/// use schedule_engine::model::Venue;
///
/// let annex = Venue {
///     id: "annex".into(),
///     name: "Annex".into(),
///     address: "Unknown".into(),
///     coordinates: None,
///     capacity: None,
/// };
/// assert_eq!(distance_km(&annex, &annex), 0.0);
/// ```
pub fn distance_km(a: &Venue, b: &Venue) -> f64 {
    TravelModel::default().distance_km(a, b)
}

/// Walking minutes plus the 5-minute buffer under the default travel model.
pub fn travel_minutes(a: &Venue, b: &Venue) -> u32 {
    TravelModel::default().travel_minutes(a, b)
}

fn haversine_km(from: Coordinates, to: Coordinates, radius_km: f64) -> f64 {
    let lat1 = from.latitude.to_radians();
    let lat2 = to.latitude.to_radians();
    let d_lat = (to.latitude - from.latitude).to_radians();
    let d_lon = (to.longitude - from.longitude).to_radians();

    let a = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
    // Rounding can push `a` a hair above 1 for antipodal points.
    let a = a.clamp(0.0, 1.0);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    radius_km * c
}
