//! The controller tying the timer to the task list.
//!
//! One [`Pomodoro`] owns one timer, one task list and the current status.
//! Every state change is pushed to subscribed observers.

use std::time::Instant;

use log::{debug, info, warn};
use serde::Serialize;

use super::events::{Event, Observer, Status};
use crate::error::PomodoError;
use crate::features::focus::{Mode, Timer};
use crate::features::tasks::{Summary, Task, TaskId, TaskList};
use crate::storage::KeyValueStore;

/// Outcome of a finished session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Completion {
    /// Mode of the session that ended.
    pub mode: Mode,
    /// Task checked off because a focus session ended.
    pub auto_completed: Option<TaskId>,
}

/// Pomodoro timer plus to-do list.
pub struct Pomodoro<S> {
    timer: Timer,
    tasks: TaskList<S>,
    status: Status,
    observers: Vec<Box<dyn Observer>>,
}

impl<S: KeyValueStore> Pomodoro<S> {
    /// Create a controller in focus mode, loading tasks from `store`.
    pub fn new(store: S) -> Self {
        Self::with_timer(store, Timer::default())
    }

    /// Create a controller around a prepared timer.
    pub fn with_timer(store: S, timer: Timer) -> Self {
        Self {
            timer,
            tasks: TaskList::load(store),
            status: Status::Ready,
            observers: Vec::new(),
        }
    }

    /// Register an observer for state changes.
    pub fn subscribe(&mut self, observer: Box<dyn Observer>) {
        self.observers.push(observer);
    }

    // ==================== Timer ====================

    /// Start the countdown now. No-op while running.
    pub fn start(&mut self) -> bool {
        self.start_at(Instant::now())
    }

    /// Start the countdown with the first tick due one period after `now`.
    pub fn start_at(&mut self, now: Instant) -> bool {
        if !self.timer.start(now) {
            return false;
        }

        let mode = self.timer.mode();
        debug!("started {mode} with {}s left", self.timer.time_left());
        self.status = Status::running(mode);
        self.emit(&Event::Started { mode });
        true
    }

    /// Pause the countdown. No-op unless running.
    pub fn pause(&mut self) -> bool {
        if !self.timer.pause() {
            return false;
        }

        let time_left = self.timer.time_left();
        debug!("paused with {time_left}s left");
        self.status = Status::Paused;
        self.emit(&Event::Paused { time_left });
        true
    }

    /// Stop and restore the full duration of the current mode.
    pub fn reset(&mut self) {
        self.timer.reset();
        self.status = Status::Ready;
        self.emit(&Event::Reset {
            mode: self.timer.mode(),
        });
    }

    /// Switch mode, interrupting any running session.
    pub fn switch_mode(&mut self, mode: Mode) {
        debug!("switching to {mode}");
        self.timer.switch_mode(mode);
        self.status = Status::Ready;
        self.emit(&Event::ModeSwitched { mode });
    }

    /// Advance the countdown by one second.
    ///
    /// # Errors
    ///
    /// Returns an error if completing a focus session fails to persist the
    /// auto-completed task.
    pub fn tick(&mut self) -> Result<Option<Completion>, PomodoError> {
        if !self.timer.is_running() {
            return Ok(None);
        }

        match self.timer.tick() {
            Some(mode) => self.finish(mode).map(Some),
            None => {
                self.emit(&Event::Ticked {
                    time_left: self.timer.time_left(),
                });
                Ok(None)
            }
        }
    }

    /// Deliver every tick that has come due by `now`, in order.
    ///
    /// Stops at completion; later ticks are dropped with the schedule.
    ///
    /// # Errors
    ///
    /// Returns an error if a completion fails to persist.
    pub fn poll(&mut self, now: Instant) -> Result<Option<Completion>, PomodoError> {
        while self.timer.take_due_tick(now) {
            if let Some(completion) = self.tick()? {
                return Ok(Some(completion));
            }
        }
        Ok(None)
    }

    /// End the current session immediately.
    ///
    /// # Errors
    ///
    /// Returns an error if the auto-completed task cannot be persisted.
    pub fn complete(&mut self) -> Result<Completion, PomodoError> {
        let mode = self.timer.complete();
        self.finish(mode)
    }

    /// Record a finished session and notify observers.
    ///
    /// `Completed` is emitted even when the auto-complete write fails; the
    /// write error is returned afterwards.
    fn finish(&mut self, mode: Mode) -> Result<Completion, PomodoError> {
        self.status = Status::completed(mode);

        let checked_off = if mode.is_break() {
            Ok(None)
        } else {
            self.tasks.auto_complete_oldest_incomplete()
        };
        let auto_completed = match &checked_off {
            Ok(id) => *id,
            Err(e) => {
                warn!("could not check off a task: {e}");
                None
            }
        };
        info!("{mode} session complete");
        if let Some(id) = auto_completed {
            info!("auto-completed task {id}");
        }

        self.emit(&Event::Completed {
            mode,
            auto_completed,
        });
        if auto_completed.is_some() {
            self.emit(&Event::TasksChanged);
        }

        checked_off?;
        Ok(Completion {
            mode,
            auto_completed,
        })
    }

    // ==================== Tasks ====================

    /// Add a task; blank text is ignored.
    ///
    /// # Errors
    ///
    /// Returns an error if the task list cannot be persisted.
    pub fn add_task(&mut self, text: &str) -> Result<Option<Task>, PomodoError> {
        let added = self.tasks.add(text)?;
        if added.is_some() {
            self.emit(&Event::TasksChanged);
        }
        Ok(added)
    }

    /// Toggle a task's completed flag; unknown ids are ignored.
    ///
    /// # Errors
    ///
    /// Returns an error if the task list cannot be persisted.
    pub fn toggle_task(&mut self, id: TaskId) -> Result<Option<bool>, PomodoError> {
        let toggled = self.tasks.toggle(id)?;
        if toggled.is_some() {
            self.emit(&Event::TasksChanged);
        }
        Ok(toggled)
    }

    /// Delete a task; unknown ids are ignored.
    ///
    /// # Errors
    ///
    /// Returns an error if the task list cannot be persisted.
    pub fn delete_task(&mut self, id: TaskId) -> Result<Option<Task>, PomodoError> {
        let removed = self.tasks.delete(id)?;
        if removed.is_some() {
            self.emit(&Event::TasksChanged);
        }
        Ok(removed)
    }

    /// Remove all completed tasks.
    ///
    /// # Errors
    ///
    /// Returns an error if the task list cannot be persisted.
    pub fn clear_completed(&mut self) -> Result<usize, PomodoError> {
        let removed = self.tasks.clear_completed()?;
        if removed > 0 {
            self.emit(&Event::TasksChanged);
        }
        Ok(removed)
    }

    // ==================== Display values ====================

    /// The timer.
    #[must_use]
    pub const fn timer(&self) -> &Timer {
        &self.timer
    }

    /// The task list.
    #[must_use]
    pub const fn tasks(&self) -> &TaskList<S> {
        &self.tasks
    }

    /// Current status line.
    #[must_use]
    pub const fn status(&self) -> Status {
        self.status
    }

    /// Remaining time as MM:SS.
    #[must_use]
    pub fn clock(&self) -> String {
        self.timer.format_remaining()
    }

    /// Remaining fraction of the session, 1.0 down to 0.0.
    #[must_use]
    pub fn progress(&self) -> f64 {
        self.timer.progress()
    }

    /// Task counter.
    #[must_use]
    pub fn summary(&self) -> Summary {
        self.tasks.summary()
    }

    fn emit(&mut self, event: &Event) {
        for observer in &mut self.observers {
            observer.on_event(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::time::Duration;

    use super::*;
    use crate::core::events::MockObserver;
    use crate::storage::{MemoryStore, MockKeyValueStore};

    /// Records events for assertions.
    struct Recorder(Rc<RefCell<Vec<Event>>>);

    impl Observer for Recorder {
        fn on_event(&mut self, event: &Event) {
            self.0.borrow_mut().push(event.clone());
        }
    }

    fn recorded() -> (Pomodoro<MemoryStore>, Rc<RefCell<Vec<Event>>>) {
        let events = Rc::new(RefCell::new(Vec::new()));
        let mut app = Pomodoro::new(MemoryStore::new());
        app.subscribe(Box::new(Recorder(Rc::clone(&events))));
        (app, events)
    }

    fn run_out(app: &mut Pomodoro<MemoryStore>) -> Completion {
        app.start();
        loop {
            if let Some(completion) = app.tick().unwrap() {
                return completion;
            }
        }
    }

    #[test]
    fn test_initial_state() {
        let app = Pomodoro::new(MemoryStore::new());
        assert_eq!(app.timer().mode(), Mode::Focus);
        assert_eq!(app.clock(), "25:00");
        assert_eq!(app.status(), Status::Ready);
        assert!((app.progress() - 1.0).abs() < f64::EPSILON);
        assert_eq!(app.summary(), Summary::Empty);
    }

    #[test]
    fn test_start_sets_status_by_mode() {
        let mut app = Pomodoro::new(MemoryStore::new());
        assert!(app.start());
        assert_eq!(app.status(), Status::Focus);

        app.switch_mode(Mode::ShortBreak);
        assert!(app.start());
        assert_eq!(app.status(), Status::Break);
    }

    #[test]
    fn test_start_twice_emits_once() {
        let mut observer = MockObserver::new();
        observer
            .expect_on_event()
            .withf(|event| matches!(event, Event::Started { .. }))
            .times(1)
            .return_const(());

        let mut app = Pomodoro::new(MemoryStore::new());
        app.subscribe(Box::new(observer));

        assert!(app.start());
        assert!(!app.start());
        assert!(app.timer().ticker().is_armed());
    }

    #[test]
    fn test_pause_when_idle_is_silent() {
        let mut observer = MockObserver::new();
        observer.expect_on_event().never();

        let mut app = Pomodoro::new(MemoryStore::new());
        app.subscribe(Box::new(observer));
        assert!(!app.pause());
        assert_eq!(app.status(), Status::Ready);
    }

    #[test]
    fn test_pause_and_reset_status() {
        let mut app = Pomodoro::new(MemoryStore::new());
        app.start();
        app.tick().unwrap();

        assert!(app.pause());
        assert_eq!(app.status(), Status::Paused);
        assert_eq!(app.clock(), "24:59");

        app.reset();
        assert_eq!(app.status(), Status::Ready);
        assert_eq!(app.clock(), "25:00");
    }

    #[test]
    fn test_switch_mode_yields_full_duration() {
        let mut app = Pomodoro::new(MemoryStore::new());
        for mode in Mode::ALL {
            app.start();
            app.tick().unwrap();
            app.switch_mode(mode);

            assert_eq!(app.timer().time_left(), mode.seconds());
            assert!(!app.timer().is_running());
            assert_eq!(app.status(), Status::Ready);
        }
    }

    #[test]
    fn test_tick_events() {
        let (mut app, events) = recorded();
        app.switch_mode(Mode::ShortBreak);
        app.start();
        app.tick().unwrap();
        app.tick().unwrap();

        assert_eq!(
            *events.borrow(),
            vec![
                Event::ModeSwitched {
                    mode: Mode::ShortBreak
                },
                Event::Started {
                    mode: Mode::ShortBreak
                },
                Event::Ticked { time_left: 299 },
                Event::Ticked { time_left: 298 },
            ]
        );
    }

    #[test]
    fn test_focus_completion_checks_off_oldest_incomplete() {
        let (mut app, events) = recorded();
        let first = app.add_task("first").unwrap().unwrap();
        let second = app.add_task("second").unwrap().unwrap();
        events.borrow_mut().clear();

        let completion = run_out(&mut app);

        assert_eq!(completion.mode, Mode::Focus);
        assert_eq!(completion.auto_completed, Some(second.id));
        assert!(app.tasks().get(second.id).unwrap().completed);
        assert!(!app.tasks().get(first.id).unwrap().completed);
        assert_eq!(app.status(), Status::TimeForBreak);
        assert_eq!(app.timer().time_left(), 0);
        assert!(!app.timer().is_running());

        let events = events.borrow();
        let tail = &events[events.len() - 2..];
        assert_eq!(
            tail,
            &[
                Event::Completed {
                    mode: Mode::Focus,
                    auto_completed: Some(second.id)
                },
                Event::TasksChanged,
            ]
        );
        assert!(!events.iter().any(|e| matches!(e, Event::Ticked { time_left: 0 })));
    }

    #[test]
    fn test_focus_completion_with_all_done_changes_nothing() {
        let mut app = Pomodoro::new(MemoryStore::new());
        let task = app.add_task("done already").unwrap().unwrap();
        app.toggle_task(task.id).unwrap();

        let completion = run_out(&mut app);
        assert_eq!(completion.auto_completed, None);
        assert_eq!(app.tasks().completed_count(), 1);
    }

    #[test]
    fn test_break_completion_leaves_tasks_alone() {
        let mut app = Pomodoro::new(MemoryStore::new());
        app.add_task("open").unwrap();
        app.switch_mode(Mode::LongBreak);

        let completion = run_out(&mut app);
        assert_eq!(completion.mode, Mode::LongBreak);
        assert_eq!(completion.auto_completed, None);
        assert_eq!(app.status(), Status::BreakOver);
        assert_eq!(app.tasks().completed_count(), 0);
        assert_eq!(app.timer().mode(), Mode::LongBreak);
    }

    #[test]
    fn test_completion_is_announced_when_check_off_fails() {
        let mut store = MockKeyValueStore::new();
        store.expect_get().returning(|_| Ok(None));
        let mut writes = 0;
        store.expect_set().returning(move |_, _| {
            writes += 1;
            if writes == 1 {
                Ok(())
            } else {
                Err(PomodoError::Database("disk full".to_string()))
            }
        });

        let events = Rc::new(RefCell::new(Vec::new()));
        let mut app = Pomodoro::new(store);
        app.subscribe(Box::new(Recorder(Rc::clone(&events))));
        let task = app.add_task("Write report").unwrap().unwrap();
        app.start();

        assert!(matches!(app.complete(), Err(PomodoError::Database(_))));
        assert_eq!(app.status(), Status::TimeForBreak);
        assert!(!app.timer().is_running());
        assert!(!app.tasks().get(task.id).unwrap().completed);
        assert!(events.borrow().contains(&Event::Completed {
            mode: Mode::Focus,
            auto_completed: None,
        }));
    }

    #[test]
    fn test_complete_directly() {
        let mut app = Pomodoro::new(MemoryStore::new());
        app.add_task("write").unwrap();
        app.start();

        let completion = app.complete().unwrap();
        assert!(completion.auto_completed.is_some());
        assert!(!app.timer().ticker().is_armed());
    }

    #[test]
    fn test_poll_delivers_due_ticks() {
        let mut app = Pomodoro::new(MemoryStore::new());
        let now = Instant::now();
        app.start_at(now);

        assert_eq!(app.poll(now).unwrap(), None);
        assert_eq!(app.poll(now + Duration::from_millis(3200)).unwrap(), None);
        assert_eq!(app.timer().time_left(), 1497);
    }

    #[test]
    fn test_poll_after_pause_fires_nothing() {
        let mut app = Pomodoro::new(MemoryStore::new());
        let now = Instant::now();
        app.start_at(now);
        app.pause();

        assert_eq!(app.poll(now + Duration::from_secs(10)).unwrap(), None);
        assert_eq!(app.timer().time_left(), 1500);
    }

    #[test]
    fn test_poll_stops_at_completion() {
        let mut app = Pomodoro::new(MemoryStore::new());
        app.switch_mode(Mode::ShortBreak);
        let now = Instant::now();
        app.start_at(now);

        let completion = app.poll(now + Duration::from_secs(3600)).unwrap();
        assert_eq!(completion.map(|c| c.mode), Some(Mode::ShortBreak));
        assert_eq!(app.timer().time_left(), 0);
        assert!(!app.timer().ticker().is_armed());
        assert_eq!(app.poll(now + Duration::from_secs(7200)).unwrap(), None);
    }

    #[test]
    fn test_task_noops_emit_nothing() {
        let (mut app, events) = recorded();
        app.add_task("   ").unwrap();
        app.toggle_task(404).unwrap();
        app.delete_task(404).unwrap();
        app.clear_completed().unwrap();

        assert!(events.borrow().is_empty());
    }

    #[test]
    fn test_task_changes_emit() {
        let (mut app, events) = recorded();
        let task = app.add_task("Buy milk").unwrap().unwrap();
        app.toggle_task(task.id).unwrap();
        assert_eq!(app.clear_completed().unwrap(), 1);

        assert_eq!(events.borrow().len(), 3);
        assert!(events.borrow().iter().all(|e| *e == Event::TasksChanged));
        assert_eq!(app.summary(), Summary::Empty);
    }

    #[test]
    fn test_independent_instances() {
        let mut a = Pomodoro::new(MemoryStore::new());
        let b = Pomodoro::new(MemoryStore::new());
        a.start();
        a.tick().unwrap();
        a.add_task("only in a").unwrap();

        assert_eq!(b.timer().time_left(), 1500);
        assert!(b.tasks().is_empty());
    }
}
