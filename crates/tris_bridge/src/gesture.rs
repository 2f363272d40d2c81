//! # Gesture Classification
//!
//! Turns raw contact samples into [`InputEvent`]s and posts them to the
//! render context.
//!
//! ## Classification
//!
//! ```text
//! Down ──┬── held > long_press_timeout, inside slop ──> LongPress
//!        ├── moved > touch_slop ──────────────────────> Scroll (per move)
//!        └── Up inside slop ──┬── second quick tap ───> DoubleTap
//!                             └── otherwise ──────────> Tap
//! Up ───────────────────────────────────────────────────> PointerUp (always, last)
//! ```
//!
//! [`GestureClassifier`] is pure: it owns no clock and no channel, so a
//! scripted timeline always produces the same events.

use std::time::Duration;

use tris_shared::{
    ContactPhase, ContactSample, InputEvent, DEFAULT_DOUBLE_TAP_SLOP_PX,
    DEFAULT_DOUBLE_TAP_TIMEOUT, DEFAULT_LONG_PRESS_TIMEOUT, DEFAULT_TOUCH_SLOP_PX,
};

use crate::queue::{RenderTask, TaskSender};

/// Thresholds for gesture classification.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GestureConfig {
    /// Maximum travel (px) still classified as stationary.
    pub touch_slop: f32,
    /// Maximum distance (px) between the two downs of a double tap.
    pub double_tap_slop: f32,
    /// Maximum time between first release and second down of a double tap.
    pub double_tap_timeout: Duration,
    /// Hold time after which a stationary contact is a long press.
    pub long_press_timeout: Duration,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            touch_slop: DEFAULT_TOUCH_SLOP_PX,
            double_tap_slop: DEFAULT_DOUBLE_TAP_SLOP_PX,
            double_tap_timeout: DEFAULT_DOUBLE_TAP_TIMEOUT,
            long_press_timeout: DEFAULT_LONG_PRESS_TIMEOUT,
        }
    }
}

/// The contact currently on the surface.
#[derive(Clone, Copy, Debug)]
struct ActiveContact {
    down_x: f32,
    down_y: f32,
    down_time: Duration,
    /// Position of the previous scroll callback (the down position until then).
    last_x: f32,
    last_y: f32,
    scrolling: bool,
    long_pressed: bool,
    /// Went down close enough, soon enough after a tap.
    double_tap_candidate: bool,
}

impl ActiveContact {
    fn new(sample: ContactSample, double_tap_candidate: bool) -> Self {
        Self {
            down_x: sample.x,
            down_y: sample.y,
            down_time: sample.time,
            last_x: sample.x,
            last_y: sample.y,
            scrolling: false,
            long_pressed: false,
            double_tap_candidate,
        }
    }
}

/// The most recent single tap, kept for double-tap detection.
#[derive(Clone, Copy, Debug)]
struct LastTap {
    down_x: f32,
    down_y: f32,
    up_time: Duration,
}

/// Pure single-pointer gesture state machine.
#[derive(Debug)]
pub struct GestureClassifier {
    config: GestureConfig,
    active: Option<ActiveContact>,
    last_tap: Option<LastTap>,
}

impl GestureClassifier {
    /// Creates a classifier.
    #[must_use]
    pub fn new(config: GestureConfig) -> Self {
        Self {
            config,
            active: None,
            last_tap: None,
        }
    }

    /// Returns the thresholds in use.
    #[must_use]
    pub fn config(&self) -> &GestureConfig {
        &self.config
    }

    /// Returns true while a contact is down.
    #[must_use]
    pub fn has_active_contact(&self) -> bool {
        self.active.is_some()
    }

    /// Classifies one sample. Events are returned in delivery order.
    pub fn feed(&mut self, sample: ContactSample) -> Vec<InputEvent> {
        let mut out = Vec::with_capacity(2);

        match sample.phase {
            ContactPhase::Down => self.on_down(sample),
            ContactPhase::Move => {
                self.check_long_press(sample.time, &mut out);
                self.on_move(sample, &mut out);
            }
            ContactPhase::Up => {
                self.check_long_press(sample.time, &mut out);
                self.on_up(sample, &mut out);
            }
            ContactPhase::Cancel => {
                self.active = None;
                self.last_tap = None;
            }
        }

        out
    }

    /// Reports time-driven events (long press) with no new sample.
    pub fn poll(&mut self, now: Duration) -> Vec<InputEvent> {
        let mut out = Vec::new();
        self.check_long_press(now, &mut out);
        out
    }

    fn on_down(&mut self, sample: ContactSample) {
        if self.active.is_some() {
            // Lost the release of the previous contact; it never completes.
            tracing::debug!("contact down while another was active; previous contact discarded");
        }

        let double_tap_candidate = self.last_tap.take().is_some_and(|tap| {
            sample.time.saturating_sub(tap.up_time) <= self.config.double_tap_timeout
                && sample.distance_to(tap.down_x, tap.down_y) <= self.config.double_tap_slop
        });

        self.active = Some(ActiveContact::new(sample, double_tap_candidate));
    }

    fn on_move(&mut self, sample: ContactSample, out: &mut Vec<InputEvent>) {
        let touch_slop = self.config.touch_slop;
        let Some(contact) = self.active.as_mut() else {
            return;
        };

        if contact.long_pressed {
            return;
        }

        if !contact.scrolling {
            if sample.distance_to(contact.down_x, contact.down_y) <= touch_slop {
                return;
            }
            contact.scrolling = true;
            contact.double_tap_candidate = false;
        }

        let dx = contact.last_x - sample.x;
        let dy = contact.last_y - sample.y;
        if dx == 0.0 && dy == 0.0 {
            return;
        }

        out.push(InputEvent::Scroll {
            x1: contact.down_x,
            y1: contact.down_y,
            x2: sample.x,
            y2: sample.y,
            dx,
            dy,
        });
        contact.last_x = sample.x;
        contact.last_y = sample.y;
    }

    fn on_up(&mut self, sample: ContactSample, out: &mut Vec<InputEvent>) {
        if let Some(contact) = self.active.take() {
            if !contact.scrolling && !contact.long_pressed {
                let (x, y) = (contact.down_x, contact.down_y);
                if contact.double_tap_candidate {
                    out.push(InputEvent::DoubleTap { x, y });
                } else {
                    out.push(InputEvent::Tap { x, y });
                    self.last_tap = Some(LastTap {
                        down_x: x,
                        down_y: y,
                        up_time: sample.time,
                    });
                }
            }
        }

        out.push(InputEvent::PointerUp {
            x: sample.x,
            y: sample.y,
        });
    }

    fn check_long_press(&mut self, now: Duration, out: &mut Vec<InputEvent>) {
        let timeout = self.config.long_press_timeout;
        let Some(contact) = self.active.as_mut() else {
            return;
        };

        if contact.scrolling || contact.long_pressed {
            return;
        }

        if now.saturating_sub(contact.down_time) >= timeout {
            contact.long_pressed = true;
            contact.double_tap_candidate = false;
            out.push(InputEvent::LongPress {
                x: contact.down_x,
                y: contact.down_y,
            });
        }
    }
}

/// Classifies contacts on the UI context and posts every event to the render context.
///
/// Never calls the engine inline.
pub struct GestureDispatcher {
    classifier: GestureClassifier,
    sender: TaskSender,
    posted: u64,
    dropped: u64,
}

impl GestureDispatcher {
    /// Creates a dispatcher posting into `sender`.
    #[must_use]
    pub fn new(config: GestureConfig, sender: TaskSender) -> Self {
        Self {
            classifier: GestureClassifier::new(config),
            sender,
            posted: 0,
            dropped: 0,
        }
    }

    /// Classifies a raw sample and posts the resulting events. Returns how many were posted.
    pub fn on_contact(&mut self, sample: ContactSample) -> usize {
        let events = self.classifier.feed(sample);
        self.post(events)
    }

    /// Posts time-driven events (long press). Call from the UI loop.
    pub fn on_tick(&mut self, now: Duration) -> usize {
        let events = self.classifier.poll(now);
        self.post(events)
    }

    /// Total events posted.
    #[inline]
    #[must_use]
    pub fn posted_count(&self) -> u64 {
        self.posted
    }

    /// Events dropped because the render side was gone.
    #[inline]
    #[must_use]
    pub fn dropped_count(&self) -> u64 {
        self.dropped
    }

    fn post(&mut self, events: Vec<InputEvent>) -> usize {
        let mut posted = 0;
        for event in events {
            let (x, y) = event.position();
            if self.sender.send(RenderTask::Input(event)) {
                tracing::debug!(event = event.name(), x, y, "input posted");
                self.posted += 1;
                posted += 1;
            } else {
                tracing::warn!(event = event.name(), "render context gone; input dropped");
                self.dropped += 1;
            }
        }
        posted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::queue::task_queue;

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    fn run(samples: &[ContactSample]) -> Vec<InputEvent> {
        let mut classifier = GestureClassifier::new(GestureConfig::default());
        samples.iter().flat_map(|s| classifier.feed(*s)).collect()
    }

    #[test]
    fn test_quick_contact_is_tap_then_pointer_up() {
        let events = run(&[
            ContactSample::down(10.0, 10.0, ms(0)),
            ContactSample::up(11.0, 11.0, ms(80)),
        ]);
        assert_eq!(
            events,
            vec![
                InputEvent::Tap { x: 10.0, y: 10.0 },
                InputEvent::PointerUp { x: 11.0, y: 11.0 },
            ]
        );
    }

    #[test]
    fn test_movement_past_slop_is_scroll() {
        let events = run(&[
            ContactSample::down(10.0, 10.0, ms(0)),
            ContactSample::moved(50.0, 10.0, ms(30)),
            ContactSample::up(50.0, 10.0, ms(60)),
        ]);
        assert_eq!(
            events,
            vec![
                InputEvent::Scroll {
                    x1: 10.0,
                    y1: 10.0,
                    x2: 50.0,
                    y2: 10.0,
                    dx: -40.0,
                    dy: 0.0,
                },
                InputEvent::PointerUp { x: 50.0, y: 10.0 },
            ]
        );
    }

    #[test]
    fn test_scroll_deltas_are_incremental() {
        let events = run(&[
            ContactSample::down(0.0, 0.0, ms(0)),
            ContactSample::moved(4.0, 0.0, ms(10)),
            ContactSample::moved(20.0, 0.0, ms(20)),
            ContactSample::moved(20.0, 0.0, ms(25)),
            ContactSample::moved(30.0, 5.0, ms(30)),
        ]);
        assert_eq!(events.len(), 2);
        let InputEvent::Scroll { dx, dy, x1, .. } = events[1] else {
            panic!("expected scroll, got {:?}", events[1]);
        };
        assert_eq!((dx, dy), (-10.0, -5.0));
        assert_eq!(x1, 0.0);
    }

    #[test]
    fn test_second_quick_tap_is_double_tap_instead_of_tap() {
        let events = run(&[
            ContactSample::down(100.0, 100.0, ms(0)),
            ContactSample::up(100.0, 100.0, ms(50)),
            ContactSample::down(104.0, 102.0, ms(200)),
            ContactSample::up(104.0, 102.0, ms(250)),
        ]);
        assert_eq!(
            events,
            vec![
                InputEvent::Tap { x: 100.0, y: 100.0 },
                InputEvent::PointerUp { x: 100.0, y: 100.0 },
                InputEvent::DoubleTap { x: 104.0, y: 102.0 },
                InputEvent::PointerUp { x: 104.0, y: 102.0 },
            ]
        );
    }

    #[test]
    fn test_double_tap_does_not_chain() {
        let mut samples = Vec::new();
        for i in 0..3 {
            samples.push(ContactSample::down(10.0, 10.0, ms(i * 100)));
            samples.push(ContactSample::up(10.0, 10.0, ms(i * 100 + 30)));
        }
        let taps: Vec<_> = run(&samples)
            .into_iter()
            .filter(|e| !matches!(e, InputEvent::PointerUp { .. }))
            .collect();
        assert_eq!(
            taps,
            vec![
                InputEvent::Tap { x: 10.0, y: 10.0 },
                InputEvent::DoubleTap { x: 10.0, y: 10.0 },
                InputEvent::Tap { x: 10.0, y: 10.0 },
            ]
        );
    }

    #[test]
    fn test_late_or_distant_second_tap_is_plain_tap() {
        let late = run(&[
            ContactSample::down(10.0, 10.0, ms(0)),
            ContactSample::up(10.0, 10.0, ms(50)),
            ContactSample::down(10.0, 10.0, ms(400)),
            ContactSample::up(10.0, 10.0, ms(450)),
        ]);
        assert_eq!(late[2], InputEvent::Tap { x: 10.0, y: 10.0 });

        let distant = run(&[
            ContactSample::down(10.0, 10.0, ms(0)),
            ContactSample::up(10.0, 10.0, ms(50)),
            ContactSample::down(300.0, 10.0, ms(100)),
            ContactSample::up(300.0, 10.0, ms(150)),
        ]);
        assert_eq!(distant[2], InputEvent::Tap { x: 300.0, y: 10.0 });
    }

    #[test]
    fn test_long_press_via_poll_suppresses_tap() {
        let mut classifier = GestureClassifier::new(GestureConfig::default());
        assert!(classifier.feed(ContactSample::down(5.0, 6.0, ms(0))).is_empty());
        assert!(classifier.poll(ms(499)).is_empty());
        assert_eq!(classifier.poll(ms(500)), vec![InputEvent::LongPress { x: 5.0, y: 6.0 }]);
        assert!(classifier.poll(ms(900)).is_empty());

        assert!(classifier.feed(ContactSample::moved(60.0, 6.0, ms(950))).is_empty());
        assert_eq!(
            classifier.feed(ContactSample::up(60.0, 6.0, ms(1000))),
            vec![InputEvent::PointerUp { x: 60.0, y: 6.0 }]
        );
    }

    #[test]
    fn test_long_press_detected_lazily_on_release() {
        let events = run(&[
            ContactSample::down(1.0, 1.0, ms(0)),
            ContactSample::up(1.0, 1.0, ms(700)),
        ]);
        assert_eq!(
            events,
            vec![
                InputEvent::LongPress { x: 1.0, y: 1.0 },
                InputEvent::PointerUp { x: 1.0, y: 1.0 },
            ]
        );
    }

    #[test]
    fn test_scrolling_contact_never_long_presses() {
        let mut classifier = GestureClassifier::new(GestureConfig::default());
        classifier.feed(ContactSample::down(0.0, 0.0, ms(0)));
        classifier.feed(ContactSample::moved(30.0, 0.0, ms(100)));
        assert!(classifier.poll(ms(2000)).is_empty());
    }

    #[test]
    fn test_cancel_reports_nothing_and_resets() {
        let mut classifier = GestureClassifier::new(GestureConfig::default());
        classifier.feed(ContactSample::down(0.0, 0.0, ms(0)));
        assert!(classifier.feed(ContactSample::cancel(ms(10))).is_empty());
        assert!(!classifier.has_active_contact());
    }

    #[test]
    fn test_stray_release_still_reports_pointer_up() {
        let events = run(&[ContactSample::up(7.0, 8.0, ms(0))]);
        assert_eq!(events, vec![InputEvent::PointerUp { x: 7.0, y: 8.0 }]);
    }

    #[test]
    fn test_dispatcher_posts_in_classification_order() {
        let (sender, receiver) = task_queue();
        let mut dispatcher = GestureDispatcher::new(GestureConfig::default(), sender);

        assert_eq!(dispatcher.on_contact(ContactSample::down(10.0, 10.0, ms(0))), 0);
        assert_eq!(dispatcher.on_contact(ContactSample::up(11.0, 11.0, ms(40))), 2);
        assert_eq!(dispatcher.on_contact(ContactSample::down(400.0, 400.0, ms(1000))), 0);
        assert_eq!(dispatcher.on_tick(ms(1600)), 1);

        assert_eq!(
            receiver.drain(),
            vec![
                RenderTask::Input(InputEvent::Tap { x: 10.0, y: 10.0 }),
                RenderTask::Input(InputEvent::PointerUp { x: 11.0, y: 11.0 }),
                RenderTask::Input(InputEvent::LongPress { x: 400.0, y: 400.0 }),
            ]
        );
        assert_eq!(dispatcher.posted_count(), 3);
    }

    #[test]
    fn test_dispatcher_counts_drops_when_render_side_gone() {
        let (sender, receiver) = task_queue();
        drop(receiver);
        let mut dispatcher = GestureDispatcher::new(GestureConfig::default(), sender);

        dispatcher.on_contact(ContactSample::down(0.0, 0.0, ms(0)));
        assert_eq!(dispatcher.on_contact(ContactSample::up(0.0, 0.0, ms(10))), 0);
        assert_eq!(dispatcher.dropped_count(), 2);
    }
}
