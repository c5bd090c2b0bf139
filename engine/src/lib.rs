//! Core engine for Scrim - overlay visibility state machine and orchestration.
//!
//! A [`Hud`] arbitrates show/hide requests for one modal overlay over one
//! host surface, reconciling the grace delay, the minimum show time, and the
//! serialized enter/exit animations. All state lives on a single owning
//! context: the owner holds the `Hud` and drains the paired event channel
//! into [`Hud::handle_event`]. Timers, animations, and supervised tasks
//! complete elsewhere and report back through that channel; nothing else
//! crosses contexts and nothing blocks.

use std::time::{Duration, Instant};

mod boundary;
mod event;
mod runtime;
mod supervisor;
mod timing;
mod transition;


pub use boundary::{Animator, HostSurface, Renderer, Scheduler};
pub use event::{HudEvent, HudEventReceiver, HudEvents, event_channel};
pub use runtime::{TokioAnimator, TokioScheduler};
pub use supervisor::TaskToken;
pub use timing::TimerToken;
pub use transition::{AnimationId, AnimationRequest, TransitionKind};

// Re-export the domain types for downstream convenience.
pub use scrim_types::{
    CustomContent, EmptyContentError, HudChanges, HudFrame, HudMode, HudOptions, HudState,
    Progress,
};

use crate::supervisor::TaskCounter;
use crate::timing::{TimerPurpose, TimerSlot};
use crate::transition::{Outcome, TransitionQueue};

// ============================================================================
// Callbacks
// ============================================================================

/// How a hide request's completion resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HideOutcome {
    /// The overlay reached `Hidden` (or never became visible at all, which
    /// callers treat as shown-and-hidden instantly).
    Hidden,
    /// A later request superseded this hide before it could finish. Fired so
    /// completion-driven cleanup is never left waiting.
    Cancelled,
}

/// One-shot completion for a single hide request.
pub type HideCompletion = Box<dyn FnOnce(HideOutcome) + Send>;

/// Single-slot observer callback; the latest registration wins.
type HudCallback = Box<dyn FnMut(&Hud) + Send>;

// ============================================================================
// Hud
// ============================================================================

/// Timing configuration captured when a show request is accepted. Option
/// changes made mid-cycle only affect the next cycle.
#[derive(Debug, Clone, Copy)]
struct ShowCycle {
    grace_delay: Duration,
    minimum_show_time: Duration,
    animated: bool,
}

struct SupervisedHide {
    token: TaskToken,
    animated: bool,
    completion: Option<HideCompletion>,
}

/// The overlay controller.
///
/// Guarantees at most one visible overlay per host, idempotent show/hide,
/// and deterministic ordering between timers, animations, and supervised
/// task completion. Every operation returns immediately; delay is always
/// expressed through the [`Scheduler`].
pub struct Hud {
    state: HudState,
    frame: HudFrame,
    options: HudOptions,
    cycle: Option<ShowCycle>,
    shown_at: Option<Instant>,
    hide_animated: bool,
    hide_completion: Option<HideCompletion>,
    supervised: Option<SupervisedHide>,
    tasks: TaskCounter,
    timers: TimerSlot,
    transitions: TransitionQueue,
    host: Box<dyn HostSurface>,
    renderer: Box<dyn Renderer>,
    animator: Box<dyn Animator>,
    scheduler: Box<dyn Scheduler>,
    events: HudEvents,
    on_tapped: Option<HudCallback>,
    on_hidden: Option<HudCallback>,
}

impl Hud {
    #[must_use]
    pub fn new(
        options: HudOptions,
        host: Box<dyn HostSurface>,
        renderer: Box<dyn Renderer>,
        animator: Box<dyn Animator>,
        scheduler: Box<dyn Scheduler>,
        events: HudEvents,
    ) -> Self {
        let frame = HudFrame {
            mode: options.mode,
            ..HudFrame::default()
        };
        Self {
            state: HudState::Hidden,
            frame,
            options,
            cycle: None,
            shown_at: None,
            hide_animated: false,
            hide_completion: None,
            supervised: None,
            tasks: TaskCounter::default(),
            timers: TimerSlot::default(),
            transitions: TransitionQueue::default(),
            host,
            renderer,
            animator,
            scheduler,
            events,
            on_tapped: None,
            on_hidden: None,
        }
    }

    // ------------------------------------------------------------------
    // Read access
    // ------------------------------------------------------------------

    #[must_use]
    pub fn state(&self) -> HudState {
        self.state
    }

    #[must_use]
    pub fn mode(&self) -> HudMode {
        self.frame.mode
    }

    #[must_use]
    pub fn progress(&self) -> Progress {
        self.frame.progress
    }

    #[must_use]
    pub fn frame(&self) -> &HudFrame {
        &self.frame
    }

    #[must_use]
    pub fn options(&self) -> &HudOptions {
        &self.options
    }

    /// Mutable configuration access. Timing fields of a cycle already in
    /// flight were snapshotted when its show was accepted.
    pub fn options_mut(&mut self) -> &mut HudOptions {
        &mut self.options
    }

    // ------------------------------------------------------------------
    // Callback registration (single slot, latest wins)
    // ------------------------------------------------------------------

    pub fn set_on_tapped(&mut self, callback: impl FnMut(&Hud) + Send + 'static) {
        self.on_tapped = Some(Box::new(callback));
    }

    pub fn clear_on_tapped(&mut self) {
        self.on_tapped = None;
    }

    pub fn set_on_hidden(&mut self, callback: impl FnMut(&Hud) + Send + 'static) {
        self.on_hidden = Some(Box::new(callback));
    }

    pub fn clear_on_hidden(&mut self) {
        self.on_hidden = None;
    }

    // ------------------------------------------------------------------
    // Public operations
    // ------------------------------------------------------------------

    /// Requests the overlay to appear.
    ///
    /// With a configured grace delay the overlay stays off screen until the
    /// delay elapses; a hide arriving first cancels the show outright. A
    /// show that lands on a pending or in-flight hide cancels it and keeps
    /// the overlay visible without re-animating entry. Idempotent while
    /// already showing.
    pub fn show(&mut self, animated: bool) {
        match self.state {
            HudState::Hidden => {
                let cycle = ShowCycle {
                    grace_delay: self.options.grace_delay,
                    minimum_show_time: self.options.minimum_show_time,
                    animated,
                };
                self.cycle = Some(cycle);
                if cycle.grace_delay.is_zero() {
                    self.become_visible(animated);
                } else {
                    self.set_state(HudState::PendingShow);
                    let token = self.timers.arm(TimerPurpose::GraceElapsed);
                    self.scheduler.after(cycle.grace_delay, token);
                }
            }
            HudState::PendingShow | HudState::Visible => {
                tracing::trace!(state = ?self.state, "show request already satisfied");
            }
            HudState::PendingHide => {
                self.timers.cancel();
                self.resolve_hide_completion(HideOutcome::Cancelled);
                self.set_state(HudState::Visible);
            }
            HudState::Hiding => {
                self.transitions.clear_queued();
                if self.transitions.running_kind() == Some(TransitionKind::Exit) {
                    // Cancellation is authoritative here; the animator's own
                    // completion for this id arrives stale and is dropped.
                    if let Some((id, kind)) = self.transitions.cancel_running() {
                        self.animator.cancel(id);
                        self.on_transition_done(kind, true);
                    }
                }
                self.resolve_hide_completion(HideOutcome::Cancelled);
                self.set_state(HudState::Visible);
                self.renderer.apply(&self.frame, false);
            }
        }
    }

    /// Requests the overlay to disappear.
    ///
    /// From `PendingShow` the show is cancelled and the overlay never
    /// appears; `on_hidden` still fires. From `Visible` the hide is deferred
    /// until the minimum show time has elapsed. Idempotent while a hide is
    /// already pending or in flight.
    pub fn hide(&mut self, animated: bool) {
        self.hide_inner(animated, None);
    }

    /// [`Hud::hide`] with a one-shot completion. The completion fires with
    /// [`HideOutcome::Hidden`] once the overlay is gone, or with
    /// [`HideOutcome::Cancelled`] if a later request supersedes this hide.
    pub fn hide_then(
        &mut self,
        animated: bool,
        completion: impl FnOnce(HideOutcome) + Send + 'static,
    ) {
        self.hide_inner(animated, Some(Box::new(completion)));
    }

    /// Updates determinate progress. Clamped to `[0, 1]`; ignored unless the
    /// mode is [`HudMode::Determinate`]. With `animated` the renderer
    /// interpolates instead of jumping.
    pub fn set_progress(&mut self, value: f32, animated: bool) {
        if self.frame.mode != HudMode::Determinate {
            tracing::trace!(mode = ?self.frame.mode, "progress update ignored outside determinate mode");
            return;
        }
        let progress = Progress::new(value);
        if self.frame.progress == progress {
            return;
        }
        self.frame.progress = progress;
        if self.state.is_on_screen() {
            self.renderer.apply(&self.frame, animated);
        }
    }

    /// Applies a batch of field mutations (mode, labels, custom content,
    /// progress) as one visual transition: a single renderer push and a
    /// single restyle animation for the net diff, instead of one per field.
    pub fn perform_changes(&mut self, mutator: impl FnOnce(&mut HudChanges)) {
        let mut changes = HudChanges::default();
        mutator(&mut changes);
        if !changes.apply(&mut self.frame) {
            return;
        }
        // Off screen (or already on the way out) the model update is enough;
        // the next show presents the updated frame.
        if !matches!(self.state, HudState::Visible | HudState::PendingHide) {
            return;
        }
        self.renderer.apply(&self.frame, true);
        let frame = self.frame.clone();
        let duration = self.options.transition;
        let outcome = self
            .transitions
            .request(TransitionKind::Restyle, frame, duration);
        self.launch(outcome);
    }

    /// Brackets a unit of work with the overlay's lifetime: shows, runs
    /// `task` on the blocking pool, and hides once it returns - also when it
    /// panics. If another caller hides first, the bracketing hide is the
    /// usual idempotent no-op.
    pub fn run_while_visible(&mut self, animated: bool, task: impl FnOnce() + Send + 'static) {
        self.run_supervised(animated, task, None);
    }

    /// [`Hud::run_while_visible`] with a completion invoked after the
    /// bracketing hide resolves.
    pub fn run_while_visible_then(
        &mut self,
        animated: bool,
        task: impl FnOnce() + Send + 'static,
        completion: impl FnOnce(HideOutcome) + Send + 'static,
    ) {
        self.run_supervised(animated, task, Some(Box::new(completion)));
    }

    /// Host gesture entry point: the overlay was tapped.
    pub fn notify_tapped(&mut self) {
        if !self.state.is_on_screen() {
            return;
        }
        if let Some(mut callback) = self.on_tapped.take() {
            callback(self);
            self.on_tapped = Some(callback);
        }
    }

    /// Feeds one marshalled completion signal into the state machine. The
    /// owning context drains the paired [`HudEventReceiver`] into this.
    pub fn handle_event(&mut self, event: HudEvent) {
        match event {
            HudEvent::TimerFired(token) => {
                let Some(purpose) = self.timers.accept(token) else {
                    tracing::trace!("stale timer fire discarded");
                    return;
                };
                match purpose {
                    TimerPurpose::GraceElapsed => {
                        if self.state == HudState::PendingShow {
                            let animated = self.cycle.is_some_and(|cycle| cycle.animated);
                            self.become_visible(animated);
                        }
                    }
                    TimerPurpose::MinimumShowElapsed => {
                        if self.state == HudState::PendingHide {
                            self.begin_hiding(self.hide_animated);
                        }
                    }
                }
            }
            HudEvent::TransitionFinished { id, cancelled } => {
                if let Some((kind, cancelled)) = self.transitions.finished(id, cancelled) {
                    self.on_transition_done(kind, cancelled);
                }
            }
            HudEvent::TaskFinished(token) => {
                // A token minted for a superseded supervision must not
                // consume its successor's bracketing hide.
                if let Some(supervised) = self
                    .supervised
                    .take_if(|supervised| supervised.token == token)
                {
                    self.hide_inner(supervised.animated, supervised.completion);
                } else {
                    tracing::trace!("stale task completion discarded");
                }
            }
        }
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    fn run_supervised(
        &mut self,
        animated: bool,
        task: impl FnOnce() + Send + 'static,
        completion: Option<HideCompletion>,
    ) {
        self.show(animated);
        if let Some(displaced) = self.supervised.take()
            && let Some(displaced) = displaced.completion
        {
            displaced(HideOutcome::Cancelled);
        }
        let token = self.tasks.next();
        self.supervised = Some(SupervisedHide {
            token,
            animated,
            completion,
        });
        supervisor::supervise(task, token, self.events.clone());
    }

    fn hide_inner(&mut self, animated: bool, completion: Option<HideCompletion>) {
        // Latest hide wins the completion slot; the displaced completion
        // must not be left waiting.
        if let Some(displaced) = self.hide_completion.take() {
            displaced(HideOutcome::Cancelled);
        }
        self.hide_completion = completion;

        match self.state {
            HudState::Hidden => {
                self.resolve_hide_completion(HideOutcome::Hidden);
            }
            HudState::PendingShow => {
                // The overlay never appeared; callers treat this as shown
                // and hidden instantly.
                self.timers.cancel();
                self.cycle = None;
                self.set_state(HudState::Hidden);
                self.notify_hidden();
                self.resolve_hide_completion(HideOutcome::Hidden);
            }
            HudState::Visible => {
                self.hide_animated = animated;
                let minimum = self
                    .cycle
                    .map(|cycle| cycle.minimum_show_time)
                    .unwrap_or_default();
                let shown_at = self.shown_at.unwrap_or_else(|| self.scheduler.now());
                let elapsed = self.scheduler.now().saturating_duration_since(shown_at);
                let remaining = minimum.saturating_sub(elapsed);
                if remaining.is_zero() {
                    self.begin_hiding(animated);
                } else {
                    self.set_state(HudState::PendingHide);
                    let token = self.timers.arm(TimerPurpose::MinimumShowElapsed);
                    self.scheduler.after(remaining, token);
                }
            }
            HudState::PendingHide | HudState::Hiding => {
                tracing::trace!(state = ?self.state, "hide already pending");
            }
        }
    }

    fn become_visible(&mut self, animated: bool) {
        if !self.host.is_attached() {
            self.host.attach();
        }
        self.set_state(HudState::Visible);
        self.shown_at = Some(self.scheduler.now());
        // Initial presentation jumps; the enter transition animates it in.
        self.renderer.apply(&self.frame, false);
        let duration = if animated {
            self.options.transition
        } else {
            Duration::ZERO
        };
        let frame = self.frame.clone();
        let outcome = self.transitions.request(TransitionKind::Enter, frame, duration);
        self.launch(outcome);
    }

    fn begin_hiding(&mut self, animated: bool) {
        self.set_state(HudState::Hiding);
        let duration = if animated {
            self.options.transition
        } else {
            Duration::ZERO
        };
        let frame = self.frame.clone();
        let outcome = self.transitions.request(TransitionKind::Exit, frame, duration);
        self.launch(outcome);
    }

    fn launch(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Immediate(kind) => self.on_transition_done(kind, false),
            Outcome::Start(request) => self.animator.animate(request),
            Outcome::Enqueued => {}
        }
    }

    fn on_transition_done(&mut self, kind: TransitionKind, cancelled: bool) {
        let mut done = Some((kind, cancelled));
        while let Some((kind, cancelled)) = done.take() {
            tracing::trace!(?kind, cancelled, "transition finished");
            if kind == TransitionKind::Exit && !cancelled {
                self.finish_hidden();
            }
            match self.transitions.start_next() {
                Some(Outcome::Immediate(next)) => done = Some((next, false)),
                Some(Outcome::Start(request)) => self.animator.animate(request),
                Some(Outcome::Enqueued) | None => {}
            }
        }
    }

    fn finish_hidden(&mut self) {
        self.set_state(HudState::Hidden);
        self.shown_at = None;
        self.cycle = None;
        self.renderer.clear();
        if self.options.remove_from_host_on_hide && self.host.is_attached() {
            self.host.detach();
        }
        self.notify_hidden();
        self.resolve_hide_completion(HideOutcome::Hidden);
    }

    fn notify_hidden(&mut self) {
        if let Some(mut callback) = self.on_hidden.take() {
            callback(self);
            self.on_hidden = Some(callback);
        }
    }

    fn resolve_hide_completion(&mut self, outcome: HideOutcome) {
        if let Some(completion) = self.hide_completion.take() {
            completion(outcome);
        }
    }

    fn set_state(&mut self, next: HudState) {
        debug_assert!(
            self.state.permits(next),
            "illegal transition {:?} -> {next:?}",
            self.state
        );
        tracing::debug!(from = ?self.state, to = ?next, "visibility state");
        self.state = next;
    }
}
