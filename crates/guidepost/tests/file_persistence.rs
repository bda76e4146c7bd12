#![forbid(unsafe_code)]

//! Tour state persisted to a JSON file.
//!
//! # Invariants Tested
//!
//! - Completion written by one engine is seen by a fresh engine reading the
//!   same file.
//! - A corrupt file degrades to defaults instead of failing construction.
//! - `reset_all` leaves no tour keys behind.

use guidepost::prelude::*;
use guidepost::{FileStorage, StorageBackend};
use guidepost_harness::SimulatedPage;
use tempfile::TempDir;

fn page() -> SimulatedPage {
    let mut page = SimulatedPage::new(1024.0, 768.0);
    page.add("#a", Rect::new(50.0, 150.0, 100.0, 30.0));
    page.add("#b", Rect::new(50.0, 250.0, 100.0, 30.0));
    page
}

fn options() -> TourOptions {
    let mut options = TourOptions::with_steps(vec![
        Step::new("#a", "A", "First"),
        Step::new("#b", "B", "Second"),
    ]);
    options.id = "onboarding".into();
    options.animation.enabled = false;
    options
}

#[test]
fn completion_round_trips_through_the_file() {
    let dir = TempDir::new().expect("tempdir");
    let path = dir.path().join("tour.json");

    let mut tour = Tour::new(page(), options(), FileStorage::new(&path));
    tour.start();
    tour.next();
    tour.next();
    assert!(tour.is_completed());
    assert!(path.exists());

    let fresh = Tour::new(page(), options(), FileStorage::new(&path));
    assert!(fresh.is_completed());
    assert!(fresh.state().is_step_completed(0));
    assert!(fresh.state().is_step_completed(1));

    let storage = FileStorage::new(&path);
    assert_eq!(
        storage
            .load("guided-tour-state:onboarding:completed")
            .expect("load")
            .as_deref(),
        Some("true")
    );
}

#[test]
fn corrupt_file_falls_back_to_defaults() {
    let dir = TempDir::new().expect("tempdir");
    let path = dir.path().join("tour.json");
    std::fs::write(&path, "{ not json").expect("write");

    let mut tour = Tour::new(page(), options(), FileStorage::new(&path));
    assert!(!tour.is_completed());
    assert!(tour.state().completed_steps.is_empty());

    // Writes fail too, but the tour still runs.
    tour.start();
    tour.next();
    tour.stop();
    assert!(!tour.is_active());
}

#[test]
fn reset_all_clears_the_file() {
    let dir = TempDir::new().expect("tempdir");
    let path = dir.path().join("tour.json");

    let mut tour = Tour::new(page(), options(), FileStorage::new(&path));
    tour.start();
    tour.complete();
    tour.reset_all();

    let storage = FileStorage::new(&path);
    assert_eq!(storage.load("guided-tour-state").expect("load"), None);
    assert_eq!(
        storage
            .load("guided-tour-state:onboarding:completed")
            .expect("load"),
        None
    );
}
