//! Scheduling of deferred calls.
//!
//! [`crate::delay`] does not talk to a clock or a thread directly; it hands
//! its call to a [`Scheduler`]. [`TimerThread`] runs calls on a background
//! thread with a tokio timer once their time has come. [`ManualScheduler`]
//! runs them only when its clock is advanced by hand, which makes delayed
//! behavior testable without sleeping.

use std::cell::{Cell, RefCell};
use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::io;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use tokio::runtime;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::{JoinError, JoinSet};
use tokio::time;
use tracing::{debug, trace, warn};

/// A unit of deferred work.
pub type Task = Box<dyn FnOnce() + Send + 'static>;

/// Something that can run a task after a delay.
pub trait Scheduler {
    /// Arrange for `task` to run once, no earlier than `wait` from now.
    ///
    /// This must return without running the task.
    fn schedule(&self, wait: Duration, task: Task);
}

impl<S: Scheduler + ?Sized> Scheduler for &S {
    fn schedule(&self, wait: Duration, task: Task) {
        (**self).schedule(wait, task)
    }
}

struct Entry<T> {
    deadline: T,
    order: u64,
    task: Task,
}

impl<T: Ord> PartialEq for Entry<T> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<T: Ord> Eq for Entry<T> {}

impl<T: Ord> PartialOrd for Entry<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

// reversed, so that the binary heap pops the earliest deadline first;
// equal deadlines pop in submission order
impl<T: Ord> Ord for Entry<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .deadline
            .cmp(&self.deadline)
            .then_with(|| other.order.cmp(&self.order))
    }
}

/// Pending tasks ordered by deadline.
struct TaskQueue<T> {
    heap: BinaryHeap<Entry<T>>,
    submitted: u64,
}

impl<T: Ord + Copy> TaskQueue<T> {
    fn new() -> Self {
        Self {
            heap: BinaryHeap::new(),
            submitted: 0,
        }
    }

    fn push(&mut self, deadline: T, task: Task) {
        let order = self.submitted;
        self.submitted += 1;
        self.heap.push(Entry {
            deadline,
            order,
            task,
        });
    }

    fn next_deadline(&self) -> Option<T> {
        self.heap.peek().map(|entry| entry.deadline)
    }

    /// Remove the earliest task if its deadline is at or before `now`.
    fn pop_due(&mut self, now: T) -> Option<(T, Task)> {
        if self.next_deadline()? > now {
            return None;
        }
        self.heap.pop().map(|entry| (entry.deadline, entry.task))
    }

    fn len(&self) -> usize {
        self.heap.len()
    }
}

/// A scheduler that runs tasks on one background thread.
///
/// The thread drives a single-threaded tokio runtime; each scheduled task is
/// a runtime task that sleeps out its wait and then runs. Tasks run one at a
/// time, never on the thread that scheduled them. A task that panics is
/// logged and does not disturb the others. Dropping the scheduler does not
/// cancel anything: the thread keeps running until every scheduled task has
/// run. Use [`TimerThread::join`] to wait for that.
#[derive(Debug)]
pub struct TimerThread {
    sender: UnboundedSender<(Instant, Duration, Task)>,
    handle: JoinHandle<()>,
}

impl TimerThread {
    /// Start a timer thread with the default configuration.
    pub fn spawn() -> io::Result<Self> {
        TimerThreadBuilder::default().build()
    }

    /// Wait until every task scheduled so far has run.
    pub fn join(self) -> thread::Result<()> {
        drop(self.sender);
        self.handle.join()
    }
}

impl Scheduler for TimerThread {
    fn schedule(&self, wait: Duration, task: Task) {
        trace!(?wait, "scheduling task");
        if self.sender.send((Instant::now(), wait, task)).is_err() {
            warn!("timer thread has stopped; task dropped");
        }
    }
}

/// Configuration for a [`TimerThread`].
#[derive(Debug, Clone, Default)]
pub struct TimerThreadBuilder {
    thread_name: Option<String>,
}

impl TimerThreadBuilder {
    /// Set the name of the background thread.
    ///
    /// Defaults to `underbar-timer`.
    pub fn thread_name(&mut self, thread_name: impl Into<String>) -> &mut Self {
        self.thread_name = Some(thread_name.into());
        self
    }

    /// Spawn the timer thread.
    pub fn build(&self) -> io::Result<TimerThread> {
        let name = self
            .thread_name
            .clone()
            .unwrap_or_else(|| "underbar-timer".to_string());
        let runtime = runtime::Builder::new_current_thread()
            .enable_time()
            .build()?;
        let (sender, receiver) = mpsc::unbounded_channel();
        let handle = thread::Builder::new()
            .name(name.clone())
            .spawn(move || runtime.block_on(run_timer(receiver)))?;
        debug!(thread = %name, "timer thread started");
        Ok(TimerThread { sender, handle })
    }
}

async fn run_timer(mut receiver: UnboundedReceiver<(Instant, Duration, Task)>) {
    let mut running = JoinSet::new();
    loop {
        tokio::select! {
            message = receiver.recv() => match message {
                Some((scheduled_at, wait, task)) => {
                    running.spawn(async move {
                        // the wait counts from the schedule call; tokio
                        // saturates waits too long to represent
                        time::sleep(wait.saturating_sub(scheduled_at.elapsed())).await;
                        trace!("running task");
                        task();
                    });
                }
                None => break,
            },
            Some(finished) = running.join_next() => report(finished),
        }
    }
    while let Some(finished) = running.join_next().await {
        report(finished);
    }
    debug!("timer thread stopped");
}

fn report(finished: Result<(), JoinError>) {
    if let Err(error) = finished {
        warn!(%error, "scheduled task failed");
    }
}

/// A scheduler with a clock that only moves when told to.
///
/// Scheduled tasks run inside [`ManualScheduler::advance`], in the order a
/// real clock would run them. While a task runs, [`ManualScheduler::now`]
/// reports that task's deadline.
pub struct ManualScheduler {
    now: Cell<Duration>,
    queue: RefCell<TaskQueue<Duration>>,
}

impl Default for ManualScheduler {
    fn default() -> Self {
        Self {
            now: Cell::new(Duration::ZERO),
            queue: RefCell::new(TaskQueue::new()),
        }
    }
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// The time elapsed on this scheduler's clock since it was created.
    pub fn now(&self) -> Duration {
        self.now.get()
    }

    /// The number of tasks that have not run yet.
    pub fn pending(&self) -> usize {
        self.queue.borrow().len()
    }

    /// Move the clock forward by `by`, running every task that falls due.
    /// Returns the number of tasks run.
    pub fn advance(&self, by: Duration) -> usize {
        let target = self.now.get().saturating_add(by);
        let mut ran = 0;
        loop {
            // the queue must not be borrowed while a task runs
            let due = self.queue.borrow_mut().pop_due(target);
            let Some((deadline, task)) = due else {
                break;
            };
            self.now.set(deadline);
            task();
            ran += 1;
        }
        self.now.set(target);
        ran
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&self, wait: Duration, task: Task) {
        let deadline = self.now.get().saturating_add(wait);
        self.queue.borrow_mut().push(deadline, task);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;

    fn recorder() -> (Arc<Mutex<Vec<&'static str>>>, impl Fn(&'static str) -> Task) {
        let log = Arc::new(Mutex::new(Vec::new()));
        let task_log = log.clone();
        let make = move |label: &'static str| -> Task {
            let log = task_log.clone();
            Box::new(move || log.lock().unwrap().push(label))
        };
        (log, make)
    }

    #[test]
    fn test_manual_runs_nothing_until_advanced() {
        let scheduler = ManualScheduler::new();
        let (log, task) = recorder();
        scheduler.schedule(Duration::ZERO, task("a"));
        assert!(log.lock().unwrap().is_empty());
        assert_eq!(scheduler.pending(), 1);
        assert_eq!(scheduler.advance(Duration::ZERO), 1);
        assert_eq!(*log.lock().unwrap(), vec!["a"]);
        assert_eq!(scheduler.pending(), 0);
    }

    #[test]
    fn test_manual_runs_in_deadline_order() {
        let scheduler = ManualScheduler::new();
        let (log, task) = recorder();
        scheduler.schedule(Duration::from_millis(30), task("late"));
        scheduler.schedule(Duration::from_millis(10), task("early"));
        scheduler.schedule(Duration::from_millis(10), task("early-second"));
        assert_eq!(scheduler.advance(Duration::from_millis(20)), 2);
        assert_eq!(*log.lock().unwrap(), vec!["early", "early-second"]);
        assert_eq!(scheduler.now(), Duration::from_millis(20));
        assert_eq!(scheduler.advance(Duration::from_millis(10)), 1);
        assert_eq!(*log.lock().unwrap(), vec!["early", "early-second", "late"]);
    }

    #[test]
    fn test_manual_waits_from_current_time() {
        let scheduler = ManualScheduler::new();
        let (log, task) = recorder();
        scheduler.schedule(Duration::from_millis(5), task("first"));
        assert_eq!(scheduler.advance(Duration::from_millis(5)), 1);
        scheduler.schedule(Duration::from_millis(5), task("second"));
        assert_eq!(scheduler.advance(Duration::from_millis(4)), 0);
        assert_eq!(scheduler.advance(Duration::from_millis(1)), 1);
        assert_eq!(*log.lock().unwrap(), vec!["first", "second"]);
        assert_eq!(scheduler.now(), Duration::from_millis(10));
    }

    #[test]
    fn test_manual_saturates_long_waits() {
        let scheduler = ManualScheduler::new();
        let (log, task) = recorder();
        scheduler.advance(Duration::from_secs(1));
        scheduler.schedule(Duration::MAX, task("never"));
        assert_eq!(scheduler.advance(Duration::from_secs(3600)), 0);
        assert_eq!(scheduler.pending(), 1);
        assert_eq!(scheduler.advance(Duration::MAX), 1);
        assert_eq!(scheduler.now(), Duration::MAX);
        assert_eq!(*log.lock().unwrap(), vec!["never"]);
    }

    #[test]
    fn test_timer_thread_survives_a_panicking_task() {
        let timer = TimerThread::spawn().unwrap();
        let (log, task) = recorder();
        timer.schedule(Duration::from_millis(5), Box::new(|| panic!("task failed")));
        timer.schedule(Duration::from_millis(30), task("independent"));
        assert!(timer.join().is_ok());
        assert_eq!(*log.lock().unwrap(), vec!["independent"]);
    }

    #[test]
    fn test_timer_thread_accepts_any_wait() {
        let timer = TimerThread::spawn().unwrap();
        let (log, task) = recorder();
        timer.schedule(Duration::MAX, task("far"));
        assert!(log.lock().unwrap().is_empty());
        // the far task keeps the thread alive, so it is left running
        drop(timer);
    }

    #[test]
    fn test_timer_thread_runs_off_the_calling_thread() {
        let timer = TimerThread::spawn().unwrap();
        let caller = thread::current().id();
        let ran_on = Arc::new(Mutex::new(None));
        let ran_on_task = ran_on.clone();
        timer.schedule(
            Duration::ZERO,
            Box::new(move || *ran_on_task.lock().unwrap() = Some(thread::current().id())),
        );
        timer.join().unwrap();
        let ran_on = ran_on.lock().unwrap().expect("task did not run");
        assert_ne!(ran_on, caller);
    }

    #[test]
    fn test_timer_thread_runs_in_deadline_order() {
        let timer = TimerThreadBuilder::default()
            .thread_name("test-timer")
            .build()
            .unwrap();
        let (log, task) = recorder();
        timer.schedule(Duration::from_millis(60), task("slow"));
        timer.schedule(Duration::from_millis(5), task("fast"));
        timer.join().unwrap();
        assert_eq!(*log.lock().unwrap(), vec!["fast", "slow"]);
    }

    #[test]
    fn test_timer_thread_name() {
        let timer = TimerThreadBuilder::default()
            .thread_name("named-timer")
            .build()
            .unwrap();
        let name = Arc::new(Mutex::new(String::new()));
        let name_task = name.clone();
        timer.schedule(
            Duration::ZERO,
            Box::new(move || {
                *name_task.lock().unwrap() = thread::current().name().unwrap_or("").to_string()
            }),
        );
        timer.join().unwrap();
        assert_eq!(*name.lock().unwrap(), "named-timer");
    }
}
