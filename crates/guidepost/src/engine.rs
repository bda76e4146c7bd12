#![forbid(unsafe_code)]

//! The tour engine.
//!
//! [`Tour`] owns the step list, the current index, [`TourState`], and the
//! three on-screen controllers. The host feeds it input through
//! [`Tour::handle_event`] and time through [`Tour::advance`]; everything else
//! happens through the [`Host`] it was built with.
//!
//! # State Machine
//!
//! ```text
//!            start()                     next() on last / complete()
//!   Idle ───────────────▶ Active(index) ─────────────────────────────▶ Idle
//!    ▲                     │   ▲    │
//!    │  stop() / skip()    │   └────┘ next() / previous() / go_to_step()
//!    └─────────────────────┘
//! ```
//!
//! `paused` is a flag, not a state: it only holds back the missing-target
//! auto-advance. Explicit navigation still works while paused.
//!
//! # Step Display
//!
//! Displaying step `i` is a strictly ordered chain of phases, each waiting
//! for its animation before the next starts:
//!
//! `HideTooltip` → `Resolve` → `Scroll` → `Settle` → `Highlight` →
//! `Position` → `Reveal`
//!
//! Zero-length phases finish inside the call that started them, so with
//! animations disabled a step is fully displayed when `next()` returns.
//! Starting a new display replaces the one in flight. The old chain never
//! resumes, so overlapping navigation cannot interleave view updates.
//!
//! # Invariants
//!
//! 1. `current_step_index()` is `None` exactly when the tour is inactive.
//! 2. At most one display chain runs at a time.
//! 3. The highlight is never computed before scrolling settles, and the
//!    tooltip is never revealed before it has been positioned.
//! 4. No public method panics or returns an error. Failures become
//!    [`TourEvent::Error`] events.
//!
//! # Failure Modes
//!
//! | Failure | Event | Recovery |
//! |---------|-------|----------|
//! | Selector resolves to nothing | `element-not-found` | `next()` after `timing.missingTargetDelay` |
//! | Host refuses to scroll, target detaches mid-chain | `show-step-error` | stay on the step |
//! | Displayed target leaves the document | `target-removed` | display the step again |
//! | Storage read/write fails | none (logged) | behave as if nothing was stored |

use std::fmt;
use std::time::Duration;

use guidepost_core::animation::{Animation, Countdown, Tween};
use guidepost_core::event::{ClickTarget, Event, KeyEvent};
use guidepost_core::geometry::Rect;
use guidepost_core::host::{ElementId, Host};
use guidepost_core::keybinding::NavAction;
use guidepost_runtime::{MemoryStorage, Notifier, StorageBackend, Subscription};
use guidepost_widgets::{
    Binding, Overlay, PositionOutcome, ToggleButton, Tooltip, TooltipContent, TooltipSignal,
};
use tracing::{debug, info, warn};

use crate::config::TourOptions;
use crate::error::{Recovery, TourError};
use crate::events::{TourEvent, TourEventKind};
use crate::persistence::TourPersistence;
use crate::state::TourState;
use crate::step::Step;

/// Forward label on every step but the last.
pub const NEXT_LABEL: &str = "Next";
/// Forward label on the last step.
pub const END_LABEL: &str = "End Tour";

// ============================================================================
// Display chain
// ============================================================================

#[derive(Debug, Clone, Copy)]
enum Phase {
    HideTooltip(Countdown),
    Resolve,
    Scroll {
        element: ElementId,
        scroll_x: f64,
        tween: Tween,
    },
    Settle {
        element: ElementId,
        wait: Countdown,
    },
    Highlight {
        element: ElementId,
    },
    HighlightWait {
        element: ElementId,
        wait: Countdown,
    },
    Position {
        element: ElementId,
    },
    Reveal(Countdown),
}

#[derive(Debug, Clone, Copy)]
struct Sequence {
    index: usize,
    phase: Phase,
}

enum Progress {
    /// The phase is still waiting; all of `dt` was used.
    Waiting(Phase),
    /// The phase finished; continue with the next one and the unused time.
    Continue(Phase, Duration),
    /// The chain ended (displayed, or failed and reported).
    Finished,
}

// ============================================================================
// Tour
// ============================================================================

/// A product tour bound to a host page.
pub struct Tour<H: Host> {
    host: H,
    options: TourOptions,
    state: TourState,
    active: bool,
    destroyed: bool,
    overlay: Overlay,
    tooltip: Tooltip,
    toggle: ToggleButton,
    persistence: TourPersistence,
    notifier: Notifier<TourEvent>,
    sequence: Option<Sequence>,
    auto_advance: Option<Countdown>,
    current_element: Option<ElementId>,
    current_highlight: Option<Rect>,
}

impl<H: Host> fmt::Debug for Tour<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tour")
            .field("id", &self.options.id)
            .field("steps", &self.options.steps.len())
            .field("active", &self.active)
            .field("state", &self.state)
            .field("sequence", &self.sequence)
            .finish_non_exhaustive()
    }
}

impl<H: Host> Tour<H> {
    /// Build a tour over `host`, restoring progress from `storage`.
    ///
    /// Invalid options are logged and used as given.
    pub fn new(host: H, options: TourOptions, storage: impl StorageBackend + 'static) -> Self {
        for problem in options.validate() {
            warn!(tour = %options.id, %problem, "questionable tour option");
        }

        let persistence = TourPersistence::new(
            storage,
            options.persistence.key.clone(),
            options.persistence.enabled,
        );

        let mut state = TourState::default();
        if let Some(record) = persistence.load_record() {
            state.completed_steps = record.completed.into_iter().collect();
        }
        if persistence.is_completed(&options.id) {
            state.mark_tour_complete(&options.id);
        }

        let mut toggle = ToggleButton::new(options.to_toggle_settings());
        toggle.mount();
        if options.persistence.remember_completed && state.is_tour_completed(&options.id) {
            toggle.hide_badge();
        }

        debug!(
            tour = %options.id,
            steps = options.steps.len(),
            restored_steps = state.completed_steps.len(),
            "tour created"
        );

        Self {
            overlay: Overlay::new(options.to_overlay_settings()),
            tooltip: Tooltip::new(options.to_tooltip_settings()),
            toggle,
            host,
            state,
            active: false,
            destroyed: false,
            persistence,
            notifier: Notifier::new(),
            sequence: None,
            auto_advance: None,
            current_element: None,
            current_highlight: None,
            options,
        }
    }

    /// Build a tour that keeps its progress in memory only.
    pub fn in_memory(host: H, options: TourOptions) -> Self {
        Self::new(host, options, MemoryStorage::new())
    }

    // ------------------------------------------------------------------------
    // Subscriptions
    // ------------------------------------------------------------------------

    /// Subscribe to one event kind. Dropping the guard unsubscribes.
    pub fn on(&self, kind: TourEventKind, callback: impl Fn(&TourEvent) + 'static) -> Subscription {
        self.notifier.on(kind, callback)
    }

    /// Subscribe to every event.
    pub fn on_any(&self, callback: impl Fn(&TourEvent) + 'static) -> Subscription {
        self.notifier.on_any(callback)
    }

    fn emit(&self, event: TourEvent) {
        self.notifier.emit(&event);
    }

    // ------------------------------------------------------------------------
    // Lifecycle
    // ------------------------------------------------------------------------

    /// Start at step 0. No-op when already active, destroyed, or without steps.
    pub fn start(&mut self) {
        if self.destroyed || self.active || self.options.steps.is_empty() {
            return;
        }
        info!(tour = %self.options.id, steps = self.options.steps.len(), "tour started");

        self.active = true;
        self.state.current_step_index = Some(0);
        self.state.current_tour_id = Some(self.options.id.clone());

        let classes = self.options.theme.classes();
        if !classes.is_empty() {
            self.host.apply_theme(classes, true);
        }

        self.emit(TourEvent::Start {
            total_steps: self.options.steps.len(),
        });

        if self.options.overlay.enabled {
            self.overlay.show();
        }
        self.toggle.set_active(true);
        self.show_step(0, true);
    }

    /// End the tour and save progress. No-op when inactive.
    pub fn stop(&mut self) {
        if !self.active {
            return;
        }
        let last_step = self.state.current_step_or_sentinel();
        info!(tour = %self.options.id, last_step, "tour stopped");

        self.active = false;
        self.state.current_step_index = None;
        self.sequence = None;
        self.auto_advance = None;

        let classes = self.options.theme.classes();
        if !classes.is_empty() {
            self.host.apply_theme(classes, false);
        }

        self.emit(TourEvent::Stop);

        self.overlay.hide();
        self.tooltip.hide();
        self.tooltip.unbind();
        self.toggle.set_active(false);
        self.clear_highlight();

        self.persistence
            .save_record(self.state.completed_steps.iter().copied(), last_step);

        if self.options.persistence.remember_completed
            && self.state.is_tour_completed(&self.options.id)
        {
            self.toggle.hide_badge();
        }
    }

    /// Suspend auto-advance. No-op when inactive.
    pub fn pause(&mut self) {
        let Some(step) = self.active_index() else {
            return;
        };
        self.state.set_paused(true);
        self.emit(TourEvent::Pause { step });
    }

    /// Lift a pause. No-op when inactive or not paused.
    pub fn resume(&mut self) {
        let Some(step) = self.active_index() else {
            return;
        };
        if !self.state.paused {
            return;
        }
        self.state.set_paused(false);
        self.emit(TourEvent::Resume { step });
    }

    /// Advance one step, or complete the tour from the last one.
    pub fn next(&mut self) {
        self.step_forward(true);
    }

    /// Move past the current step. `seen` is false when the step is being
    /// passed over because its target never displayed; such a step is not
    /// recorded as completed.
    fn step_forward(&mut self, seen: bool) {
        let Some(index) = self.active_index() else {
            return;
        };
        if index + 1 >= self.options.steps.len() {
            self.finish(seen);
            return;
        }
        if seen {
            self.state.mark_step_complete(index);
        }
        self.state.current_step_index = Some(index + 1);
        self.show_step(index + 1, true);
    }

    /// Go back one step. No-op at step 0.
    pub fn previous(&mut self) {
        let Some(index) = self.active_index() else {
            return;
        };
        if index == 0 {
            return;
        }
        self.state.current_step_index = Some(index - 1);
        self.show_step(index - 1, true);
    }

    /// Jump to `index`. No-op when inactive or out of range.
    pub fn go_to_step(&mut self, index: usize) {
        if self.active_index().is_none() || index >= self.options.steps.len() {
            return;
        }
        self.state.current_step_index = Some(index);
        self.show_step(index, true);
    }

    /// Leave the tour without completing it.
    pub fn skip(&mut self) {
        let Some(step) = self.active_index() else {
            return;
        };
        self.emit(TourEvent::Skip { step });
        self.stop();
    }

    /// Finish the tour: record completion, then stop.
    pub fn complete(&mut self) {
        self.finish(true);
    }

    fn finish(&mut self, last_seen: bool) {
        let Some(index) = self.active_index() else {
            return;
        };
        self.emit(TourEvent::Complete {
            total_steps: self.options.steps.len(),
        });
        if last_seen {
            self.state.mark_step_complete(index);
        }
        self.state.mark_tour_complete(&self.options.id);
        self.persistence.mark_completed(&self.options.id);
        self.stop();
    }

    /// Stop, forget step progress, and clear this tour's completion marker.
    pub fn reset(&mut self) {
        self.stop();
        self.state.reset();
        self.state.completed_tours.remove(&self.options.id);
        self.persistence.clear_record();
        self.persistence.clear_completed(&self.options.id);
        self.toggle.show_badge();
        debug!(tour = %self.options.id, "tour reset");
    }

    /// [`Tour::reset`] plus forgetting every completed tour.
    pub fn reset_all(&mut self) {
        self.reset();
        self.state.reset_all();
    }

    /// Stop, drop every subscriber, and unmount the toggle. The tour cannot
    /// be started again.
    pub fn destroy(&mut self) {
        self.stop();
        self.notifier.clear();
        self.toggle.destroy();
        self.overlay.clear_highlight();
        self.destroyed = true;
        debug!(tour = %self.options.id, "tour destroyed");
    }

    // ------------------------------------------------------------------------
    // Input and time
    // ------------------------------------------------------------------------

    /// Route one host input event. Returns whether the tour consumed it.
    ///
    /// An [`Event::OverlayPress`] inside the highlight cutout is left for
    /// the page.
    pub fn handle_event(&mut self, event: &Event) -> bool {
        if self.destroyed {
            return false;
        }
        match event {
            Event::Key(key) => self.handle_key(key),
            Event::Resize { .. } => {
                if self.active {
                    self.tooltip.on_resize();
                }
                false
            }
            Event::Scroll { .. } => {
                if self.active {
                    self.tooltip.on_scroll();
                }
                false
            }
            Event::Click(target) => self.handle_click(*target),
            Event::OverlayPress(point) => {
                if self.overlay.passes_click(*point) {
                    return false;
                }
                self.handle_click(ClickTarget::Overlay)
            }
        }
    }

    fn handle_key(&mut self, key: &KeyEvent) -> bool {
        if !self.active {
            return false;
        }
        match self.options.keyboard.map(key) {
            Some(NavAction::Next) => self.next(),
            Some(NavAction::Previous) => self.previous(),
            Some(NavAction::Close) => self.stop(),
            None => return false,
        }
        true
    }

    fn handle_click(&mut self, target: ClickTarget) -> bool {
        match target {
            ClickTarget::Toggle => {
                if !self.toggle.is_mounted() {
                    return false;
                }
                if self.active {
                    self.stop();
                } else {
                    self.start();
                }
                true
            }
            ClickTarget::Overlay => {
                if self.active && self.options.overlay.click_to_close {
                    self.stop();
                    true
                } else {
                    false
                }
            }
            _ if !self.active => false,
            ClickTarget::Next => {
                self.next();
                true
            }
            ClickTarget::Previous => {
                self.previous();
                true
            }
            ClickTarget::Skip => {
                self.skip();
                true
            }
            ClickTarget::Close => {
                self.stop();
                true
            }
        }
    }

    /// Advance every animation, timer, and the display chain by `dt`.
    pub fn advance(&mut self, dt: Duration) {
        // Only a countdown that existed before this frame may fire in it.
        if self.active && !self.state.paused {
            let due = self.auto_advance.as_mut().is_some_and(|wait| {
                wait.tick(dt);
                wait.is_complete()
            });
            if due {
                self.auto_advance = None;
                debug!(tour = %self.options.id, "auto-advancing past missing target");
                self.step_forward(false);
            }
        }

        self.overlay.tick(dt);
        self.toggle.tick(dt);
        if let Some(TooltipSignal::TargetRemoved(element)) = self.tooltip.tick(dt, &self.host) {
            if let Some(step) = self.active_index() {
                self.fail(TourError::TargetRemoved { step, element });
            }
        }

        self.run_sequence(dt);
    }

    // ------------------------------------------------------------------------
    // Step display
    // ------------------------------------------------------------------------

    fn show_step(&mut self, index: usize, announce: bool) {
        let Some(step) = self.options.steps.get(index) else {
            warn!(index, "no step at index");
            return;
        };
        debug!(tour = %self.options.id, index, target = %step.target, "showing step");

        if announce {
            self.emit(TourEvent::StepChange {
                index,
                step: step.clone(),
                total: self.options.steps.len(),
            });
        }

        self.auto_advance = None;
        let fade = self.tooltip.hide();
        self.sequence = Some(Sequence {
            index,
            phase: Phase::HideTooltip(Countdown::new(fade)),
        });
        self.run_sequence(Duration::ZERO);
    }

    fn run_sequence(&mut self, mut dt: Duration) {
        while let Some(Sequence { index, phase }) = self.sequence {
            let progress = match self.step_phase(index, phase, dt) {
                Ok(progress) => progress,
                Err(err) => {
                    self.sequence = None;
                    self.fail(err);
                    return;
                }
            };
            match progress {
                Progress::Waiting(phase) => {
                    self.sequence = Some(Sequence { index, phase });
                    return;
                }
                Progress::Continue(phase, rest) => {
                    self.sequence = Some(Sequence { index, phase });
                    dt = rest;
                }
                Progress::Finished => {
                    self.sequence = None;
                    return;
                }
            }
        }
    }

    fn step_phase(&mut self, index: usize, phase: Phase, dt: Duration) -> Result<Progress, TourError> {
        match phase {
            Phase::HideTooltip(mut wait) => {
                let rest = wait.tick(dt);
                if !wait.is_complete() {
                    return Ok(Progress::Waiting(Phase::HideTooltip(wait)));
                }
                // The old cutout stays until the new one replaces it, so the
                // highlight can travel between targets.
                self.unmark_target();
                self.tooltip.unbind();
                Ok(Progress::Continue(Phase::Resolve, rest))
            }

            Phase::Resolve => self.resolve_target(index).map(|phase| match phase {
                Some(phase) => Progress::Continue(phase, dt),
                None => Progress::Finished,
            }),

            Phase::Scroll {
                element,
                scroll_x,
                mut tween,
            } => {
                let rest = tween.tick(dt);
                self.host
                    .scroll_to(scroll_x, tween.current())
                    .map_err(|e| TourError::from_host(index, &e))?;
                if !tween.is_complete() {
                    return Ok(Progress::Waiting(Phase::Scroll {
                        element,
                        scroll_x,
                        tween,
                    }));
                }
                let settle = Countdown::new(Duration::from_millis(self.options.timing.scroll_settle));
                Ok(Progress::Continue(
                    Phase::Settle {
                        element,
                        wait: settle,
                    },
                    rest,
                ))
            }

            Phase::Settle { element, mut wait } => {
                let rest = wait.tick(dt);
                if wait.is_complete() {
                    Ok(Progress::Continue(Phase::Highlight { element }, rest))
                } else {
                    Ok(Progress::Waiting(Phase::Settle { element, wait }))
                }
            }

            Phase::Highlight { element } => {
                let wait = self.highlight(index, element)?;
                Ok(Progress::Continue(
                    Phase::HighlightWait {
                        element,
                        wait: Countdown::new(wait),
                    },
                    dt,
                ))
            }

            Phase::HighlightWait { element, mut wait } => {
                let rest = wait.tick(dt);
                if !wait.is_complete() {
                    return Ok(Progress::Waiting(Phase::HighlightWait { element, wait }));
                }
                self.host.mark_target(element, self.options.highlight.pulse);
                self.current_element = Some(element);
                Ok(Progress::Continue(Phase::Position { element }, rest))
            }

            Phase::Position { element } => self.position_tooltip(index, element).map(|phase| {
                match phase {
                    Some(phase) => Progress::Continue(phase, dt),
                    None => Progress::Finished,
                }
            }),

            Phase::Reveal(mut wait) => {
                wait.tick(dt);
                if wait.is_complete() {
                    debug!(tour = %self.options.id, index, "step displayed");
                    Ok(Progress::Finished)
                } else {
                    Ok(Progress::Waiting(Phase::Reveal(wait)))
                }
            }
        }
    }

    /// Resolve the step target and decide whether to scroll. `Ok(None)`
    /// means the chain ended because the target is missing.
    fn resolve_target(&mut self, index: usize) -> Result<Option<Phase>, TourError> {
        let selector = self.step_at(index)?.target.clone();
        let Some(element) = self.host.resolve(&selector) else {
            self.clear_highlight();
            self.fail(TourError::ElementNotFound {
                step: index,
                selector,
            });
            return Ok(None);
        };
        let rect = self.target_rect(index, element)?;
        let viewport = self.host.viewport();

        if viewport.comfortably_contains(&rect, self.options.timing.scroll_margin) {
            return Ok(Some(Phase::Highlight { element }));
        }

        // Center the target vertically.
        let center = rect.top + viewport.scroll_y + rect.height / 2.0;
        let goal = (center - viewport.height / 2.0 - self.options.scroll.offset).max(0.0);
        let tween = Tween::new(
            viewport.scroll_y,
            goal,
            Duration::from_millis(self.options.scroll.duration),
        )
        .easing(self.options.scroll.easing);
        debug!(index, from = viewport.scroll_y, to = goal, "scrolling target into view");
        Ok(Some(Phase::Scroll {
            element,
            scroll_x: viewport.scroll_x,
            tween,
        }))
    }

    /// Cut the highlight around `element`. Returns the transition time.
    fn highlight(&mut self, index: usize, element: ElementId) -> Result<Duration, TourError> {
        let rect = self.target_rect(index, element)?;
        let step = self.step_at(index)?;
        let padding = step.padding.unwrap_or(self.options.highlight.padding);
        let highlight = self.host.viewport().to_document(&rect.expand(padding));
        let options = self.options.to_highlight_options(step.shape);
        self.current_highlight = Some(highlight);
        Ok(self.overlay.highlight(highlight, options))
    }

    /// Fill and place the tooltip. `Ok(None)` means the chain ended without
    /// revealing it (target out of view under the hide behavior).
    fn position_tooltip(&mut self, index: usize, element: ElementId) -> Result<Option<Phase>, TourError> {
        let total = self.options.steps.len();
        let step = self.step_at(index)?.clone();
        let last = index + 1 == total;
        self.tooltip.set_content(TooltipContent {
            title: step.title.clone(),
            body: step.content.clone(),
            step_number: index + 1,
            total_steps: total,
            show_previous: index > 0,
            next_label: if last { END_LABEL } else { NEXT_LABEL }.to_string(),
            show_progress: self.options.tooltip.show_progress,
            show_navigation: self.options.tooltip.show_navigation,
            show_close: self.options.tooltip.show_close,
        });
        self.tooltip.bind(Binding {
            target: element,
            position: step.position,
            anchor: step.anchor_position,
        });

        match self.tooltip.position(&self.host) {
            PositionOutcome::Placed(_) => Ok(Some(Phase::Reveal(Countdown::new(self.tooltip.show())))),
            PositionOutcome::HiddenOutOfView => {
                debug!(index, "target out of view; tooltip waits for scroll");
                Ok(None)
            }
            PositionOutcome::TargetRemoved => Err(TourError::TargetRemoved {
                step: index,
                element,
            }),
            PositionOutcome::Unbound => Err(TourError::ShowStep {
                step: index,
                message: "tooltip lost its target".into(),
            }),
        }
    }

    fn step_at(&self, index: usize) -> Result<&Step, TourError> {
        self.options.steps.get(index).ok_or_else(|| TourError::ShowStep {
            step: index,
            message: "no step at this index".into(),
        })
    }

    fn target_rect(&self, index: usize, element: ElementId) -> Result<Rect, TourError> {
        self.host
            .bounding_rect(element)
            .ok_or_else(|| TourError::ShowStep {
                step: index,
                message: format!("target {element} is no longer attached"),
            })
    }

    fn unmark_target(&mut self) {
        if let Some(element) = self.current_element.take() {
            self.host.unmark_target(element);
        }
    }

    fn clear_highlight(&mut self) {
        self.unmark_target();
        self.current_highlight = None;
        self.overlay.clear_highlight();
    }

    /// Report `err` and apply its recovery.
    fn fail(&mut self, err: TourError) {
        warn!(tour = %self.options.id, kind = err.error_type(), error = %err, "tour step failed");

        if let Some(kind) = err.event_kind() {
            let (step, selector, error) = match &err {
                TourError::ElementNotFound { step, selector } => (*step, Some(selector.clone()), None),
                other => (other.step().unwrap_or_default(), None, Some(other.to_string())),
            };
            self.emit(TourEvent::Error {
                kind,
                step,
                selector,
                error,
            });
        }

        // Subscribers may not touch the tour, but the tour may have been
        // stopped by a host between frames; recover only while active.
        if !self.active {
            return;
        }
        match err.recovery() {
            Recovery::AdvanceAfterDelay => {
                self.auto_advance = Some(Countdown::new(Duration::from_millis(
                    self.options.timing.missing_target_delay,
                )));
            }
            Recovery::RedisplayStep => {
                if let Some(index) = err.step() {
                    self.show_step(index, false);
                }
            }
            Recovery::StayOnStep | Recovery::UseDefaults => {}
        }
    }

    fn active_index(&self) -> Option<usize> {
        if self.active {
            self.state.current_step_index
        } else {
            None
        }
    }

    // ------------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------------

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active
    }

    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.state.paused
    }

    /// Index of the displayed step; `None` while inactive.
    #[must_use]
    pub fn current_step_index(&self) -> Option<usize> {
        self.active_index()
    }

    #[must_use]
    pub fn current_step(&self) -> Option<&Step> {
        self.active_index().and_then(|i| self.options.steps.get(i))
    }

    #[must_use]
    pub fn steps(&self) -> &[Step] {
        &self.options.steps
    }

    #[must_use]
    pub fn options(&self) -> &TourOptions {
        &self.options
    }

    /// Tour identifier.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.options.id
    }

    #[must_use]
    pub fn state(&self) -> &TourState {
        &self.state
    }

    /// Whether this tour has been completed, now or in an earlier session.
    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.state.is_tour_completed(&self.options.id)
    }

    /// Whether a step display chain is still running.
    #[must_use]
    pub fn is_transitioning(&self) -> bool {
        self.sequence.is_some()
    }

    /// Whether a missing-target auto-advance is pending.
    #[must_use]
    pub fn is_auto_advance_pending(&self) -> bool {
        self.auto_advance.is_some()
    }

    /// The highlighted element, once the highlight has settled.
    #[must_use]
    pub fn current_target(&self) -> Option<ElementId> {
        self.current_element
    }

    /// The highlight rectangle in document coordinates.
    #[must_use]
    pub fn highlight_rect(&self) -> Option<Rect> {
        self.current_highlight
    }

    #[must_use]
    pub fn overlay(&self) -> &Overlay {
        &self.overlay
    }

    #[must_use]
    pub fn tooltip(&self) -> &Tooltip {
        &self.tooltip
    }

    #[must_use]
    pub fn toggle(&self) -> &ToggleButton {
        &self.toggle
    }

    #[must_use]
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Mutable host access, for pages that change between frames.
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use guidepost_core::geometry::{Size, Viewport};
    use guidepost_core::host::HostError;
    use std::collections::HashMap;

    /// Minimal page: every element is visible and scrolling always works.
    struct Page {
        elements: HashMap<String, (ElementId, Rect)>,
        scroll_y: f64,
    }

    impl Page {
        fn new(selectors: &[&str]) -> Self {
            let elements = selectors
                .iter()
                .enumerate()
                .map(|(i, s)| {
                    let rect = Rect::new(100.0, 200.0 + i as f64 * 10.0, 50.0, 20.0);
                    (s.to_string(), (ElementId(i as u64), rect))
                })
                .collect();
            Self {
                elements,
                scroll_y: 0.0,
            }
        }
    }

    impl Host for Page {
        fn resolve(&self, selector: &str) -> Option<ElementId> {
            self.elements.get(selector).map(|(id, _)| *id)
        }
        fn bounding_rect(&self, element: ElementId) -> Option<Rect> {
            self.elements
                .values()
                .find(|(id, _)| *id == element)
                .map(|(_, r)| r.translate(0.0, -self.scroll_y))
        }
        fn viewport(&self) -> Viewport {
            Viewport::new(1024.0, 768.0).with_scroll(0.0, self.scroll_y)
        }
        fn scroll_to(&mut self, _x: f64, y: f64) -> Result<(), HostError> {
            self.scroll_y = y;
            Ok(())
        }
        fn tooltip_size(&self, _max_width: f64) -> Size {
            Size::new(300.0, 150.0)
        }
    }

    fn instant_options(selectors: &[&str]) -> TourOptions {
        let mut options = TourOptions::with_steps(
            selectors
                .iter()
                .map(|s| Step::new(*s, format!("Title {s}"), "Body"))
                .collect(),
        );
        options.animation.enabled = false;
        options.scroll.duration = 0;
        options.timing.scroll_settle = 0;
        options
    }

    #[test]
    fn instant_display_finishes_synchronously() {
        let page = Page::new(&["#a", "#b"]);
        let mut tour = Tour::in_memory(page, instant_options(&["#a", "#b"]));
        tour.start();
        assert!(!tour.is_transitioning());
        assert_eq!(tour.current_target(), Some(ElementId(0)));
        let content = tour.tooltip().content().expect("content");
        assert_eq!(content.step_number, 1);
        assert_eq!(content.next_label, NEXT_LABEL);
        assert!(!content.show_previous);

        tour.next();
        let content = tour.tooltip().content().expect("content");
        assert_eq!(content.next_label, END_LABEL);
        assert!(content.show_previous);
    }

    #[test]
    fn highlight_is_padded_in_document_space() {
        let page = Page::new(&["#a"]);
        let mut tour = Tour::in_memory(page, instant_options(&["#a"]));
        tour.start();
        assert_eq!(tour.highlight_rect(), Some(Rect::new(92.0, 192.0, 66.0, 36.0)));
    }

    #[test]
    fn animated_chain_waits_for_each_phase() {
        let page = Page::new(&["#a", "#b"]);
        let mut options = instant_options(&["#a", "#b"]);
        options.animation.enabled = true;
        let mut tour = Tour::in_memory(page, options);

        tour.start();
        // First highlight never animates, so the tooltip is already fading in.
        assert!(tour.is_transitioning());
        tour.advance(Duration::from_millis(300));
        assert!(!tour.is_transitioning());

        tour.next();
        // The tooltip fades out first; the old target stays marked meanwhile.
        assert!(tour.is_transitioning());
        assert_eq!(tour.current_target(), Some(ElementId(0)));
        tour.advance(Duration::from_millis(300));
        // The cutout travels to the new target; it is marked on arrival.
        assert_eq!(tour.current_target(), None);
        assert!(tour.overlay().is_animating());
        tour.advance(Duration::from_millis(300));
        assert_eq!(tour.current_target(), Some(ElementId(1)));
        tour.advance(Duration::from_millis(300));
        assert!(!tour.is_transitioning());
    }

    #[test]
    fn new_navigation_replaces_chain_in_flight() {
        let page = Page::new(&["#a", "#b", "#c"]);
        let mut options = instant_options(&["#a", "#b", "#c"]);
        options.animation.enabled = true;
        let mut tour = Tour::in_memory(page, options);
        tour.start();
        tour.advance(Duration::from_millis(300));

        tour.next();
        tour.next();
        assert_eq!(tour.current_step_index(), Some(2));
        tour.advance(Duration::from_secs(5));
        assert_eq!(tour.current_target(), Some(ElementId(2)));
        assert_eq!(tour.tooltip().content().map(|c| c.step_number), Some(3));
    }

    #[test]
    fn destroyed_tour_never_restarts() {
        let page = Page::new(&["#a"]);
        let mut tour = Tour::in_memory(page, instant_options(&["#a"]));
        tour.start();
        tour.destroy();
        assert!(!tour.is_active());
        tour.start();
        assert!(!tour.is_active());
        assert!(!tour.handle_event(&Event::Click(ClickTarget::Toggle)));
    }
}
