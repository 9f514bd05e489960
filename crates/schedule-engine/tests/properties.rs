//! Property tests for the conflict engine.

use chrono::NaiveDate;
use proptest::prelude::*;
use schedule_engine::{
    check_conflicts, distance_km, has_time_overlap, travel_conflict, validate_full_schedule,
    ConflictKind, Coordinates, Screening, TimeOfDay, Venue,
};

fn venue(id: &str, latitude: f64, longitude: f64) -> Venue {
    Venue {
        id: id.into(),
        name: id.into(),
        address: "Strasbourg".into(),
        coordinates: Some(Coordinates {
            latitude,
            longitude,
        }),
        capacity: None,
    }
}

fn screening(id: &str, day: u32, start: u32, end: u32, venue: Venue) -> Screening {
    Screening {
        id: id.into(),
        film_id: "film-1".into(),
        date: NaiveDate::from_ymd_opt(2026, 9, day).unwrap(),
        start_time: TimeOfDay::from_hm(start / 60, start % 60).unwrap(),
        end_time: TimeOfDay::from_hm(end / 60, end % 60).unwrap(),
        venue,
        tickets_available: true,
        price: None,
    }
}

/// (start, end) minutes with start < end inside one day.
fn window() -> impl Strategy<Value = (u32, u32)> {
    (0u32..1439).prop_flat_map(|start| (Just(start), (start + 1)..1440))
}

fn strasbourg_point() -> impl Strategy<Value = (f64, f64)> {
    (48.55f64..48.62, 7.70f64..7.80)
}

proptest! {
    #[test]
    fn prop_different_days_never_conflict(
        (s1, e1) in window(),
        (s2, e2) in window(),
        (lat1, lon1) in strasbourg_point(),
        (lat2, lon2) in strasbourg_point(),
        offset in 1u32..10,
    ) {
        let a = screening("a", 10, s1, e1, venue("v1", lat1, lon1));
        let b = screening("b", 10 + offset, s2, e2, venue("v2", lat2, lon2));
        prop_assert!(!has_time_overlap(&a, &b));
        prop_assert!(travel_conflict(&a, &b).is_none());
        prop_assert!(travel_conflict(&b, &a).is_none());
        prop_assert!(check_conflicts(&a, &[b]).is_empty());
    }

    #[test]
    fn prop_back_to_back_never_overlaps(start in 0u32..1200, len1 in 1u32..120, len2 in 1u32..119) {
        let v = venue("v", 48.58, 7.75);
        let a = screening("a", 18, start, start + len1, v.clone());
        let b = screening("b", 18, start + len1, start + len1 + len2, v);
        prop_assert!(!has_time_overlap(&a, &b));
        prop_assert!(!has_time_overlap(&b, &a));
    }

    #[test]
    fn prop_overlap_is_symmetric((s1, e1) in window(), (s2, e2) in window()) {
        let v = venue("v", 48.58, 7.75);
        let a = screening("a", 18, s1, e1, v.clone());
        let b = screening("b", 18, s2, e2, v);
        let expected = s1 < e2 && s2 < e1;
        prop_assert_eq!(has_time_overlap(&a, &b), expected);
        prop_assert_eq!(has_time_overlap(&b, &a), expected);
    }

    #[test]
    fn prop_overlapping_pair_reports_time_only((s1, e1) in window(), (s2, e2) in window()) {
        prop_assume!(s1 < e2 && s2 < e1);
        let a = screening("a", 18, s1, e1, venue("v1", 48.58, 7.75));
        let b = screening("b", 18, s2, e2, venue("v2", 48.60, 7.76));
        let conflicts = check_conflicts(&a, &[b]);
        prop_assert_eq!(conflicts.len(), 1);
        prop_assert_eq!(conflicts[0].kind, ConflictKind::Time);
        prop_assert!(conflicts[0].travel_minutes.is_none());
    }

    #[test]
    fn prop_distance_is_symmetric((lat1, lon1) in strasbourg_point(), (lat2, lon2) in strasbourg_point()) {
        let v1 = venue("v1", lat1, lon1);
        let v2 = venue("v2", lat2, lon2);
        prop_assert_eq!(distance_km(&v1, &v2), distance_km(&v2, &v1));
        prop_assert!(distance_km(&v1, &v2) >= 0.0);
    }

    #[test]
    fn prop_check_against_empty_is_empty((s, e) in window(), day in 1u32..28) {
        let a = screening("a", day, s, e, venue("v", 48.58, 7.75));
        prop_assert!(check_conflicts(&a, &[]).is_empty());
    }

    #[test]
    fn prop_single_screening_schedule_is_valid((s, e) in window(), day in 1u32..28) {
        let a = screening("a", day, s, e, venue("v", 48.58, 7.75));
        let report = validate_full_schedule(&[a]);
        prop_assert!(report.is_valid);
        prop_assert!(report.conflicts.is_empty());
    }

    #[test]
    fn prop_validation_ignores_input_order(
        windows in prop::collection::vec(window(), 0..6),
    ) {
        let v = venue("v", 48.58, 7.75);
        let screenings: Vec<Screening> = windows
            .iter()
            .enumerate()
            .map(|(i, &(s, e))| screening(&format!("s{i}"), 18, s, e, v.clone()))
            .collect();
        let mut reversed = screenings.clone();
        reversed.reverse();
        let forward = validate_full_schedule(&screenings);
        let backward = validate_full_schedule(&reversed);
        prop_assert_eq!(forward.is_valid, backward.is_valid);
        prop_assert_eq!(forward.conflicts.len(), backward.conflicts.len());
    }
}
