//! Walkthrough Example
//!
//! Drives a three-step tour over a simulated page at 60 fps and prints what
//! a renderer would draw after each step settles. The second target sits
//! below the fold, so the tour scrolls before highlighting it; the third is
//! missing, so the tour reports it and completes on its own.
//!
//! Run: `RUST_LOG=guidepost=debug cargo run -p guidepost --example walkthrough`

use std::time::Duration;

use guidepost::prelude::*;
use guidepost_harness::{FrameClock, SimulatedPage};
use tracing_subscriber::EnvFilter;

fn settle(tour: &mut Tour<SimulatedPage>, clock: &FrameClock) {
    for dt in clock.frames_for(Duration::from_secs(2)) {
        tour.advance(dt);
    }
}

fn describe(tour: &Tour<SimulatedPage>) {
    let Some(index) = tour.current_step_index() else {
        println!("  (idle)");
        return;
    };
    let (_, scroll_y) = tour.host().scroll_position();
    println!("  step {index} scroll_y={scroll_y}");
    if let Some(rect) = tour.highlight_rect() {
        println!(
            "  cutout at ({}, {}) {}x{}",
            rect.left, rect.top, rect.width, rect.height
        );
    }
    if let (Some(content), Some(placed)) = (tour.tooltip().content(), tour.tooltip().placement()) {
        println!(
            "  tooltip {:?} [{}] {} at ({:.0}, {:.0})",
            content.title,
            content.progress_label(),
            placed.placement,
            placed.position.x,
            placed.position.y
        );
    }
}

fn main() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .try_init();

    let mut page = SimulatedPage::new(1280.0, 720.0);
    page.add("#search", Rect::new(480.0, 24.0, 320.0, 40.0));
    page.add("#pricing", Rect::new(120.0, 1600.0, 400.0, 240.0));

    let options = TourOptions::with_steps(vec![
        Step::new("#search", "Search", "Find anything from here."),
        Step::new("#pricing", "Plans", "Compare plans side by side."),
        Step::new("#chat", "Support", "Talk to us any time."),
    ]);

    let mut tour = Tour::in_memory(page, options);
    let _log = tour.on_any(|event| println!("event: {event:?}"));

    let clock = FrameClock::default();
    tour.start();
    settle(&mut tour, &clock);
    describe(&tour);

    tour.handle_event(&Event::Key(KeyEvent::new(KeyCode::ArrowRight)));
    settle(&mut tour, &clock);
    describe(&tour);

    tour.handle_event(&Event::Click(ClickTarget::Next));
    settle(&mut tour, &clock);
    describe(&tour);

    println!("completed: {}", tour.is_completed());
}
