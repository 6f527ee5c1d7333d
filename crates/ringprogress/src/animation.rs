//! Linear sweep of every ring from zero to its target value.
//!
//! The host owns the actual frame scheduling. It hands the driver a
//! [`TickHandle`] for the callback it registered and then forwards each frame
//! timestamp to [`AnimationDriver::tick`].

use crate::ring::RingSet;
use std::time::Duration;

pub const SWEEP_DURATION: Duration = Duration::from_millis(1000);

pub type OnComplete = Box<dyn FnOnce()>;

/// A scheduled per-frame callback registered with the host.
pub trait TickHandle {
    /// Unregisters the callback so it never fires again.
    fn cancel(self: Box<Self>);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Keep ticking.
    Continue,
    /// The sweep reached its targets on this tick; stop ticking.
    Finished,
    /// Nothing is running.
    Idle,
}

struct Run {
    targets: Vec<f64>,
    started_at: Option<Duration>,
    fraction: f64,
    on_complete: Option<OnComplete>,
    handle: Option<Box<dyn TickHandle>>,
}

impl Run {
    fn cancel(mut self) {
        if let Some(handle) = self.handle.take() {
            handle.cancel();
        }
    }
}

enum State {
    Idle,
    Running(Run),
}

pub struct AnimationDriver {
    state: State,
    duration: Duration,
}

impl Default for AnimationDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl AnimationDriver {
    pub fn new() -> Self {
        Self::with_duration(SWEEP_DURATION)
    }

    pub fn with_duration(duration: Duration) -> Self {
        Self {
            state: State::Idle,
            duration,
        }
    }

    pub fn is_running(&self) -> bool {
        matches!(self.state, State::Running(_))
    }

    pub fn elapsed_fraction(&self) -> Option<f64> {
        match &self.state {
            State::Running(run) => Some(run.fraction),
            State::Idle => None,
        }
    }

    /// Begins a new sweep toward `targets` and resets the live values in
    /// `rings` to zero. A sweep already in flight is dropped: its tick
    /// callback is cancelled and its completion callback never runs.
    pub fn start(
        &mut self,
        targets: Vec<f64>,
        rings: &mut RingSet,
        on_complete: Option<OnComplete>,
    ) {
        rings.write_live_progress(targets.iter().map(|_| 0.0));
        let run = Run {
            targets,
            started_at: None,
            fraction: 0.0,
            on_complete,
            handle: None,
        };

        if let State::Running(old) = std::mem::replace(&mut self.state, State::Running(run)) {
            log::debug!(
                "sweep superseded at {:.0}% of its duration",
                old.fraction * 100.0
            );
            old.cancel();
        }
        log::debug!("sweep started");
    }

    /// Stores the host callback driving the current sweep. When idle the
    /// handle is cancelled straight away.
    pub fn attach(&mut self, handle: Box<dyn TickHandle>) {
        match &mut self.state {
            State::Running(run) => {
                if let Some(previous) = run.handle.replace(handle) {
                    previous.cancel();
                }
            }
            State::Idle => handle.cancel(),
        }
    }

    /// Advances the sweep to the frame time `now` and writes the live values
    /// into `rings`. The first tick after `start` marks time zero.
    pub fn tick(&mut self, now: Duration, rings: &mut RingSet) -> TickOutcome {
        let State::Running(run) = &mut self.state else {
            return TickOutcome::Idle;
        };

        let started_at = *run.started_at.get_or_insert(now);
        let elapsed = now.saturating_sub(started_at);
        let fraction = if self.duration.is_zero() {
            1.0
        } else {
            (elapsed.as_secs_f64() / self.duration.as_secs_f64()).min(1.0)
        };
        run.fraction = run.fraction.max(fraction);

        let fraction = run.fraction;
        rings.write_live_progress(run.targets.iter().map(|target| target * fraction));
        log::trace!("sweep tick at {:.3}", fraction);

        if fraction < 1.0 {
            return TickOutcome::Continue;
        }

        if let State::Running(mut run) = std::mem::replace(&mut self.state, State::Idle) {
            // The host stops ticking on `Finished`; the handle only needs dropping.
            run.handle = None;
            log::debug!("sweep finished");
            if let Some(on_complete) = run.on_complete.take() {
                on_complete();
            }
        }
        TickOutcome::Finished
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    struct MockHandle(Rc<Cell<u32>>);

    impl TickHandle for MockHandle {
        fn cancel(self: Box<Self>) {
            self.0.set(self.0.get() + 1);
        }
    }

    fn counter() -> (Rc<Cell<u32>>, OnComplete) {
        let count = Rc::new(Cell::new(0));
        let hook = count.clone();
        (count, Box::new(move || hook.set(hook.get() + 1)))
    }

    fn ms(millis: u64) -> Duration {
        Duration::from_millis(millis)
    }

    #[test]
    fn test_linear_sweep() {
        let mut rings = RingSet::new(3, 1.0);
        let mut driver = AnimationDriver::new();
        let targets = vec![0.0, 0.5, 1.0];
        driver.start(targets.clone(), &mut rings, None);
        assert_eq!(driver.elapsed_fraction(), Some(0.0));

        let base = ms(5_000);
        for (offset, expected) in [(0, 0.0), (250, 0.25), (500, 0.5), (900, 0.9)] {
            assert_eq!(driver.tick(base + ms(offset), &mut rings), TickOutcome::Continue);
            let fraction = driver.elapsed_fraction().unwrap();
            assert!((fraction - expected).abs() < 1e-9);
            for (live, target) in rings.progress().iter().zip(&targets) {
                assert_eq!(*live, target * fraction);
            }
        }

        assert_eq!(driver.tick(base + ms(1_000), &mut rings), TickOutcome::Finished);
        assert_eq!(rings.progress(), &[0.0, 0.5, 1.0]);
        assert!(!driver.is_running());
        assert_eq!(driver.tick(base + ms(1_100), &mut rings), TickOutcome::Idle);
    }

    #[test]
    fn test_start_zeroes_live_values() {
        let mut rings = RingSet::new(2, 1.0);
        rings.set_progress_list(vec![0.4, 0.8]);
        let mut driver = AnimationDriver::new();
        driver.start(rings.progress().to_vec(), &mut rings, None);

        assert!(driver.is_running());
        assert_eq!(rings.progress(), &[0.0, 0.0]);
    }

    #[test]
    fn test_fraction_never_decreases() {
        let mut rings = RingSet::new(1, 1.0);
        let mut driver = AnimationDriver::new();
        driver.start(vec![0.8], &mut rings, None);

        driver.tick(ms(0), &mut rings);
        driver.tick(ms(400), &mut rings);
        driver.tick(ms(300), &mut rings);
        assert!((driver.elapsed_fraction().unwrap() - 0.4).abs() < 1e-9);
        assert!((rings.progress()[0] - 0.32).abs() < 1e-9);

        assert_eq!(driver.tick(ms(2_500), &mut rings), TickOutcome::Finished);
        assert_eq!(rings.progress()[0], 0.8);
    }

    #[test]
    fn test_completion_fires_once() {
        let mut rings = RingSet::new(2, 1.0);
        let mut driver = AnimationDriver::new();
        let (completed, on_complete) = counter();
        driver.start(vec![0.3, 0.6], &mut rings, Some(on_complete));

        driver.tick(ms(0), &mut rings);
        assert_eq!(completed.get(), 0);
        driver.tick(ms(1_000), &mut rings);
        driver.tick(ms(1_016), &mut rings);
        driver.tick(ms(2_000), &mut rings);
        assert_eq!(completed.get(), 1);
    }

    #[test]
    fn test_restart_supersedes_previous_run() {
        let mut rings = RingSet::new(1, 1.0);
        let mut driver = AnimationDriver::new();
        let cancelled = Rc::new(Cell::new(0));
        let (first_done, first) = counter();
        let (second_done, second) = counter();

        driver.start(vec![1.0], &mut rings, Some(first));
        driver.attach(Box::new(MockHandle(cancelled.clone())));
        driver.tick(ms(0), &mut rings);
        driver.tick(ms(600), &mut rings);

        driver.start(vec![0.5], &mut rings, Some(second));
        assert_eq!(cancelled.get(), 1);
        assert_eq!(rings.progress()[0], 0.0);
        assert_eq!(driver.elapsed_fraction(), Some(0.0));

        driver.attach(Box::new(MockHandle(cancelled.clone())));
        driver.tick(ms(700), &mut rings);
        assert_eq!(rings.progress()[0], 0.0);
        assert_eq!(driver.tick(ms(1_700), &mut rings), TickOutcome::Finished);

        assert_eq!(first_done.get(), 0);
        assert_eq!(second_done.get(), 1);
        // finishing lets the host stop its own callback
        assert_eq!(cancelled.get(), 1);
        assert_eq!(rings.progress()[0], 0.5);
    }

    #[test]
    fn test_attach_while_idle_cancels() {
        let mut driver = AnimationDriver::new();
        let cancelled = Rc::new(Cell::new(0));
        driver.attach(Box::new(MockHandle(cancelled.clone())));
        assert_eq!(cancelled.get(), 1);
    }

    #[test]
    fn test_targets_shorter_than_rings() {
        let mut rings = RingSet::new(3, 1.0);
        rings.set_progress_list(vec![0.1, 0.2, 0.3]);
        let mut driver = AnimationDriver::with_duration(Duration::ZERO);
        driver.start(vec![0.9], &mut rings, None);
        assert_eq!(rings.progress(), &[0.0, 0.2, 0.3]);
        assert_eq!(driver.tick(ms(0), &mut rings), TickOutcome::Finished);
        assert_eq!(rings.progress(), &[0.9, 0.2, 0.3]);
    }
}
