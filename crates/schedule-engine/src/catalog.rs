//! The festival catalog: films, venues and their screenings.
//!
//! A [`Catalog`] is built once (from JSON or [`Catalog::demo`]) and handed
//! by reference to whatever needs it. Nothing in this crate keeps a global
//! copy.

use std::collections::HashSet;
use std::path::Path;

use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::conflict::is_same_calendar_day;
use crate::error::{Result, ScheduleError};
use crate::model::{Coordinates, Film, Screening, TimeOfDay, Venue};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    films: Vec<Film>,
    venues: Vec<Venue>,
    screenings: Vec<Screening>,
}

impl Catalog {
    /// Build a catalog, checking every screening's window and film reference.
    pub fn new(films: Vec<Film>, venues: Vec<Venue>, screenings: Vec<Screening>) -> Result<Self> {
        let film_ids: HashSet<&str> = films.iter().map(|f| f.id.as_str()).collect();
        for screening in &screenings {
            screening.validate()?;
            if !film_ids.contains(screening.film_id.as_str()) {
                return Err(ScheduleError::UnknownFilm(format!(
                    "screening {} references {}",
                    screening.id, screening.film_id
                )));
            }
        }
        Ok(Self {
            films,
            venues,
            screenings,
        })
    }

    pub fn from_json_str(s: &str) -> Result<Self> {
        let raw: Catalog = serde_json::from_str(s)?;
        Self::new(raw.films, raw.venues, raw.screenings)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn films(&self) -> &[Film] {
        &self.films
    }

    pub fn venues(&self) -> &[Venue] {
        &self.venues
    }

    pub fn screenings(&self) -> &[Screening] {
        &self.screenings
    }

    pub fn film(&self, id: &str) -> Option<&Film> {
        self.films.iter().find(|f| f.id == id)
    }

    pub fn venue(&self, id: &str) -> Option<&Venue> {
        self.venues.iter().find(|v| v.id == id)
    }

    pub fn screening(&self, id: &str) -> Option<&Screening> {
        self.screenings.iter().find(|s| s.id == id)
    }

    pub fn screenings_for_film(&self, film_id: &str) -> Vec<&Screening> {
        self.screenings
            .iter()
            .filter(|s| s.film_id == film_id)
            .collect()
    }

    /// Screenings whose date falls on the same calendar day as `date`.
    pub fn screenings_on<D: Datelike>(&self, date: &D) -> Vec<&Screening> {
        self.screenings
            .iter()
            .filter(|s| is_same_calendar_day(&s.date, date))
            .collect()
    }

    /// The selected screenings, in catalog order. Unknown ids are skipped.
    pub fn resolve_selection<S: AsRef<str>>(&self, ids: &[S]) -> Vec<Screening> {
        let wanted: HashSet<&str> = ids.iter().map(|id| id.as_ref()).collect();
        self.screenings
            .iter()
            .filter(|s| wanted.contains(s.id.as_str()))
            .cloned()
            .collect()
    }

    /// Summed film runtime of the selected screenings, in minutes.
    pub fn total_runtime_minutes<S: AsRef<str>>(&self, ids: &[S]) -> u32 {
        ids.iter()
            .filter_map(|id| self.screening(id.as_ref()))
            .filter_map(|s| self.film(&s.film_id))
            .map(|f| f.duration)
            .sum()
    }

    /// A small fixed festival starting on `start`: three Strasbourg venues,
    /// four films, one screening per film on each of three days.
    ///
    /// Film `i` plays at venue `i % 3`, starting at `14 + 2i + day` o'clock
    /// and running for its full duration.
    pub fn demo(start: NaiveDate) -> Self {
        let venues = demo_venues();
        let films = demo_films();

        let mut screenings = Vec::new();
        for (film_index, film) in films.iter().enumerate() {
            for day in 0..3u32 {
                let Some(date) = start.checked_add_days(Days::new(u64::from(day))) else {
                    continue;
                };
                let start_hour = 14 + 2 * film_index as u32 + day;
                let end_total = start_hour * 60 + film.duration;
                // Every demo window ends well before midnight.
                let (Ok(start_time), Ok(end_time)) = (
                    TimeOfDay::from_hm(start_hour, 0),
                    TimeOfDay::from_hm(end_total / 60, end_total % 60),
                ) else {
                    continue;
                };
                screenings.push(Screening {
                    id: format!("proj-{}-{day}", film.id),
                    film_id: film.id.clone(),
                    date,
                    start_time,
                    end_time,
                    venue: venues[film_index % venues.len()].clone(),
                    tickets_available: true,
                    price: Some(8.5),
                });
            }
        }
        screenings.sort_by_key(|s| s.date);

        Self {
            films,
            venues,
            screenings,
        }
    }
}

fn demo_venues() -> Vec<Venue> {
    fn venue(id: &str, name: &str, address: &str, lat: f64, lon: f64, capacity: u32) -> Venue {
        Venue {
            id: id.into(),
            name: name.into(),
            address: address.into(),
            coordinates: Some(Coordinates {
                latitude: lat,
                longitude: lon,
            }),
            capacity: Some(capacity),
        }
    }
    vec![
        venue(
            "venue-1",
            "Cinéma Star Saint-Exupéry",
            "17 Rue du 22 novembre, 67000 Strasbourg",
            48.5734053,
            7.7521113,
            400,
        ),
        venue(
            "venue-2",
            "Cinéma Odyssée",
            "3 Rue des Francs Bourgeois, 67000 Strasbourg",
            48.5839,
            7.7455,
            300,
        ),
        venue(
            "venue-3",
            "Star UGC",
            "Place des Halles, 67000 Strasbourg",
            48.5798,
            7.7507,
            250,
        ),
    ]
}

fn demo_films() -> Vec<Film> {
    fn film(id: &str, title: &str, director: &str, duration: u32, genre: &[&str], country: &str) -> Film {
        Film {
            id: id.into(),
            title: title.into(),
            original_title: Some(title.into()),
            director: director.into(),
            year: 2024,
            duration,
            genre: genre.iter().map(|g| g.to_string()).collect(),
            country: country.into(),
            synopsis: String::new(),
            poster_url: format!("https://example.com/{id}.jpg"),
            trailer_url: None,
        }
    }
    vec![
        film("film-1", "Nosferatu", "Robert Eggers", 132, &["Horror", "Fantasy"], "USA"),
        film(
            "film-2",
            "The Substance",
            "Coralie Fargeat",
            141,
            &["Horror", "Science Fiction", "Thriller"],
            "France",
        ),
        film("film-3", "Longlegs", "Oz Perkins", 101, &["Horror", "Thriller"], "USA"),
        film("film-4", "Cuckoo", "Tilman Singer", 102, &["Horror", "Mystery"], "Germany"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conflict::{check_conflicts, validate_full_schedule, ConflictKind};

    fn start() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 9, 18).unwrap()
    }

    #[test]
    fn test_demo_shape() {
        let catalog = Catalog::demo(start());
        assert_eq!(catalog.venues().len(), 3);
        assert_eq!(catalog.films().len(), 4);
        assert_eq!(catalog.screenings().len(), 12);
    }

    #[test]
    fn test_demo_screening_windows() {
        let catalog = Catalog::demo(start());
        let s = catalog.screening("proj-film-2-1").unwrap();
        // Film index 1, day 1: 14 + 2 + 1 = 17:00, runtime 141 min.
        assert_eq!(s.start_time.to_string(), "17:00");
        assert_eq!(s.end_time.to_string(), "19:21");
        assert_eq!(s.venue.id, "venue-2");
        assert_eq!(s.date, NaiveDate::from_ymd_opt(2026, 9, 19).unwrap());
        assert_eq!(s.price, Some(8.5));

        let last = catalog.screening("proj-film-4-2").unwrap();
        assert_eq!(last.venue.id, "venue-1");
        assert_eq!(last.start_time.to_string(), "22:00");
        assert_eq!(last.end_time.to_string(), "23:42");
    }

    #[test]
    fn test_demo_sorted_by_date() {
        let catalog = Catalog::demo(start());
        let dates: Vec<NaiveDate> = catalog.screenings().iter().map(|s| s.date).collect();
        let mut sorted = dates.clone();
        sorted.sort();
        assert_eq!(dates, sorted);
        assert_eq!(catalog.screenings()[0].id, "proj-film-1-0");
    }

    #[test]
    fn test_lookups() {
        let catalog = Catalog::demo(start());
        assert_eq!(catalog.film("film-3").unwrap().title, "Longlegs");
        assert_eq!(catalog.venue("venue-2").unwrap().name, "Cinéma Odyssée");
        assert!(catalog.screening("nope").is_none());
        assert_eq!(catalog.screenings_for_film("film-1").len(), 3);
        assert_eq!(catalog.screenings_on(&start()).len(), 4);
    }

    #[test]
    fn test_resolve_selection_skips_unknown_and_keeps_catalog_order() {
        let catalog = Catalog::demo(start());
        let picked = catalog.resolve_selection(&["proj-film-2-0", "ghost", "proj-film-1-0"]);
        let ids: Vec<&str> = picked.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["proj-film-1-0", "proj-film-2-0"]);
    }

    #[test]
    fn test_total_runtime() {
        let catalog = Catalog::demo(start());
        let ids = vec!["proj-film-1-0".to_string(), "proj-film-3-1".to_string()];
        assert_eq!(catalog.total_runtime_minutes(&ids), 132 + 101);
        assert_eq!(catalog.total_runtime_minutes::<&str>(&[]), 0);
    }

    #[test]
    fn test_demo_day_one_clash() {
        // Nosferatu 14:00-16:12 overlaps The Substance 16:00-18:21.
        let catalog = Catalog::demo(start());
        let selection = catalog.resolve_selection(&["proj-film-1-0", "proj-film-2-0"]);
        let report = validate_full_schedule(&selection);
        assert!(!report.is_valid);
        assert_eq!(report.conflicts[0].kind, ConflictKind::Time);

        let candidate = catalog.screening("proj-film-2-0").unwrap();
        let existing = catalog.resolve_selection(&["proj-film-1-0"]);
        assert_eq!(check_conflicts(candidate, &existing).len(), 1);
    }

    #[test]
    fn test_json_roundtrip_preserves_catalog() {
        let catalog = Catalog::demo(start());
        let json = catalog.to_json_string().unwrap();
        let loaded = Catalog::from_json_str(&json).unwrap();
        assert_eq!(loaded.films(), catalog.films());
        assert_eq!(loaded.screenings().len(), catalog.screenings().len());
        for (a, b) in loaded.screenings().iter().zip(catalog.screenings()) {
            assert_eq!(a.id, b.id);
            assert_eq!(a.date, b.date);
            assert_eq!((a.start_time, a.end_time), (b.start_time, b.end_time));
            assert_eq!(a.venue.id, b.venue.id);
        }
    }

    #[test]
    fn test_unknown_film_rejected() {
        let mut catalog = Catalog::demo(start());
        catalog.screenings[0].film_id = "film-99".into();
        let json = serde_json::to_string(&catalog).unwrap();
        let err = Catalog::from_json_str(&json).unwrap_err();
        assert!(matches!(err, ScheduleError::UnknownFilm(_)));
    }

    #[test]
    fn test_inverted_window_rejected() {
        let mut catalog = Catalog::demo(start());
        let s = &mut catalog.screenings[0];
        std::mem::swap(&mut s.start_time, &mut s.end_time);
        let json = serde_json::to_string(&catalog).unwrap();
        let err = Catalog::from_json_str(&json).unwrap_err();
        assert!(matches!(err, ScheduleError::InvalidScreening(_)));
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let err = Catalog::load("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, ScheduleError::Io(_)));
    }
}
