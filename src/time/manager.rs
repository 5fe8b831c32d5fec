use std::{
    sync::{
        atomic::{AtomicU64, Ordering},
        mpsc::{self, Receiver, RecvTimeoutError, Sender},
        Arc,
    },
    thread::{self, JoinHandle},
    time::{Duration, Instant},
};

use parking_lot::Mutex;
use tracing::{debug, info, warn};

use super::{
    layout::{LayoutParameters, PositionMap, SimultaneousLayout},
    Error, LongitudinalGraph,
};

/// Kind of change a subscriber can filter on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Signal {
    Time,
    Animation,
    Positions,
}

/// Change notification sent to subscribers.
#[derive(Debug, Clone)]
pub enum Event<N> {
    /// Current time changed. Carries the positions of the nodes visible at
    /// the new time.
    TimeChanged { time: f64, positions: PositionMap<N> },
    /// Layout task was started (`true`) or stopped (`false`).
    AnimationChanged(bool),
    /// Layout iterated. Carries the positions of the nodes visible at the
    /// current time.
    PositionsChanged(PositionMap<N>),
}

impl<N> Event<N> {
    pub fn signal(&self) -> Signal {
        match self {
            Event::TimeChanged { .. } => Signal::Time,
            Event::AnimationChanged(_) => Signal::Animation,
            Event::PositionsChanged(_) => Signal::Positions,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Receiving end of a subscription created by
/// [`TimeGraphManager::subscribe`].
///
/// Dropping the subscription unsubscribes it on the next notification.
#[derive(Debug)]
pub struct Subscription<N> {
    id: SubscriptionId,
    receiver: Receiver<Event<N>>,
}

impl<N> Subscription<N> {
    pub fn id(&self) -> SubscriptionId {
        self.id
    }

    /// Blocks until an event arrives. Returns `None` if the manager was
    /// dropped or the subscription was removed.
    pub fn recv(&self) -> Option<Event<N>> {
        self.receiver.recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<Event<N>> {
        self.receiver.recv_timeout(timeout).ok()
    }

    pub fn try_recv(&self) -> Option<Event<N>> {
        self.receiver.try_recv().ok()
    }

    /// Iterates over the events that already arrived.
    pub fn try_iter(&self) -> impl Iterator<Item = Event<N>> + '_ {
        self.receiver.try_iter()
    }
}

struct Subscriber<N> {
    id: SubscriptionId,
    filter: Option<Signal>,
    sender: Sender<Event<N>>,
}

struct Subscribers<N> {
    next_id: AtomicU64,
    list: Mutex<Vec<Subscriber<N>>>,
}

impl<N: Clone> Subscribers<N> {
    fn new() -> Self {
        Self {
            next_id: AtomicU64::new(0),
            list: Mutex::new(Vec::new()),
        }
    }

    fn subscribe(&self, filter: Option<Signal>) -> Subscription<N> {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        let (sender, receiver) = mpsc::channel();

        self.list.lock().push(Subscriber {
            id,
            filter,
            sender,
        });

        Subscription { id, receiver }
    }

    fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut list = self.list.lock();
        let len = list.len();
        list.retain(|subscriber| subscriber.id != id);
        list.len() != len
    }

    fn notify(&self, event: Event<N>) {
        let signal = event.signal();

        self.list.lock().retain(|subscriber| {
            if subscriber.filter.map_or(true, |filter| filter == signal) {
                // Receiver dropped, prune the subscriber.
                subscriber.sender.send(event.clone()).is_ok()
            } else {
                true
            }
        });
    }
}

/// Configuration of the background layout task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskConfig {
    /// Pause between two ticks.
    pub delay: Duration,
    /// Layout iterations performed in one tick.
    pub iterations_per_tick: usize,
    /// Computing the position map for longer than this is reported.
    pub slow_update_threshold: Duration,
}

impl Default for TaskConfig {
    fn default() -> Self {
        Self {
            delay: Duration::from_millis(30),
            iterations_per_tick: 2,
            slow_update_threshold: Duration::from_millis(50),
        }
    }
}

impl TaskConfig {
    pub fn delay(self, delay: Duration) -> Self {
        Self { delay, ..self }
    }

    pub fn iterations_per_tick(self, iterations_per_tick: usize) -> Self {
        Self {
            iterations_per_tick,
            ..self
        }
    }

    pub fn slow_update_threshold(self, slow_update_threshold: Duration) -> Self {
        Self {
            slow_update_threshold,
            ..self
        }
    }
}

/// Counters of layout activity of one manager.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LayoutStats {
    /// Completed layout iterations.
    pub iterations: u64,
    /// Iterations skipped because the graph changed.
    pub skipped: u64,
    /// Ticks of the background task that took longer than the delay.
    pub slow_ticks: u64,
}

#[derive(Default)]
struct Counters {
    iterations: AtomicU64,
    skipped: AtomicU64,
    slow_ticks: AtomicU64,
}

struct State<L: LongitudinalGraph> {
    graph: L,
    layout: SimultaneousLayout<L::Node>,
    time: f64,
}

struct Shared<L: LongitudinalGraph> {
    state: Mutex<State<L>>,
    subscribers: Subscribers<L::Node>,
    counters: Counters,
    config: Mutex<TaskConfig>,
}

impl<L: LongitudinalGraph> Shared<L> {
    fn iterate_locked(&self, state: &mut State<L>) {
        match state.layout.iterate(&state.graph) {
            Ok(()) => {
                self.counters.iterations.fetch_add(1, Ordering::Relaxed);
            }
            Err(error) => {
                debug!(%error, version = state.graph.version(), "skipping layout iteration");
                self.counters.skipped.fetch_add(1, Ordering::Relaxed);
            }
        }
    }

    fn tick(&self, iterations: usize) {
        let positions = {
            let mut state = self.state.lock();
            let state = &mut *state;

            for _ in 0..iterations {
                self.iterate_locked(state);
            }

            state.layout.position_map(&state.graph, state.time)
        };

        self.subscribers.notify(Event::PositionsChanged(positions));
    }

    fn position_map(&self) -> PositionMap<L::Node> {
        let threshold = self.config.lock().slow_update_threshold;
        let started = Instant::now();

        let positions = {
            let state = self.state.lock();
            state.layout.position_map(&state.graph, state.time)
        };

        let elapsed = started.elapsed();
        if elapsed > threshold {
            debug!(?elapsed, ?threshold, nodes = positions.len(), "slow position update");
        }

        positions
    }
}

struct LayoutTask {
    stop: Sender<()>,
    handle: JoinHandle<()>,
}

impl LayoutTask {
    /// Signals the task to stop without waiting for it. A tick in progress
    /// completes and notifies its subscribers, then the thread exits.
    fn cancel(self) {
        // The task may have already exited.
        let _ = self.stop.send(());
    }

    /// Signals the task to stop and waits until the tick in progress, if any,
    /// finishes.
    fn join(self) {
        let _ = self.stop.send(());

        if self.handle.join().is_err() {
            warn!("layout task panicked");
        }
    }
}

fn run<L: LongitudinalGraph>(shared: Arc<Shared<L>>, stop: Receiver<()>, delay: Duration, iterations: usize) {
    info!(?delay, iterations_per_tick = iterations, "layout task started");

    while let Err(RecvTimeoutError::Timeout) = stop.recv_timeout(delay) {
        let started = Instant::now();
        shared.tick(iterations);

        let elapsed = started.elapsed();
        if elapsed > delay {
            shared.counters.slow_ticks.fetch_add(1, Ordering::Relaxed);
            warn!(?elapsed, ?delay, "slow layout tick");
        }
    }

    info!("layout task stopped");
}

/// Owner of a longitudinal graph and its layout.
///
/// The manager controls two independent things: the current time, which
/// selects the visible slice, and the layout animation, a background thread
/// that iterates the layout periodically. Graph, layout and current time are
/// guarded by a single lock, so an iteration, a position map snapshot and a
/// graph update never interleave.
///
/// Changes are announced to subscribers over channels, see
/// [`subscribe`](TimeGraphManager::subscribe). Every tick of the layout task
/// sends [`Event::PositionsChanged`] before the next tick starts.
///
/// Starting and stopping the task return immediately. Only dropping the
/// manager waits for the tick in progress, so that the thread does not outlive
/// it.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
///
/// use tempograph::{
///     core::Create,
///     storage::SparseGraph,
///     time::{Event, LayoutParameters, Signal, SlicedGraph, TimeGraphManager},
/// };
///
/// let mut graph = SlicedGraph::new(false);
/// graph.push(0.0, SparseGraph::from_edges(false, [1, 2], [(1, 2)])).unwrap();
/// graph.push(1.0, SparseGraph::from_edges(false, [1, 2, 3], [(1, 2), (2, 3)])).unwrap();
///
/// let manager = TimeGraphManager::new(graph, LayoutParameters::default());
/// let positions = manager.subscribe(Some(Signal::Positions));
///
/// manager.start_layout_task(Duration::from_millis(1), 5).unwrap();
/// let event = positions.recv_timeout(Duration::from_secs(5));
/// manager.stop_layout_task();
///
/// assert!(matches!(event, Some(Event::PositionsChanged(map)) if map.len() == 2));
///
/// assert!(manager.set_time(1.0, true));
/// assert_eq!(manager.position_map().len(), 3);
/// ```
pub struct TimeGraphManager<L: LongitudinalGraph> {
    shared: Arc<Shared<L>>,
    task: Mutex<Option<LayoutTask>>,
}

impl<L> TimeGraphManager<L>
where
    L: LongitudinalGraph + Send + 'static,
    L::Node: Send + 'static,
{
    /// Takes ownership of the graph and lays it out. The current time starts
    /// at the minimum time of the graph, or zero if it has no event times.
    pub fn new(graph: L, params: LayoutParameters) -> Self {
        let layout = SimultaneousLayout::new(&graph, params);
        let time = graph.minimum_time().unwrap_or(0.0);

        Self {
            shared: Arc::new(Shared {
                state: Mutex::new(State {
                    graph,
                    layout,
                    time,
                }),
                subscribers: Subscribers::new(),
                counters: Counters::default(),
                config: Mutex::new(TaskConfig::default()),
            }),
            task: Mutex::new(None),
        }
    }

    pub fn with_task_config(self, config: TaskConfig) -> Self {
        *self.shared.config.lock() = config;
        self
    }

    pub fn task_config(&self) -> TaskConfig {
        *self.shared.config.lock()
    }

    pub fn time(&self) -> f64 {
        self.shared.state.lock().time
    }

    /// Sets the current time. With `exact`, the time must be an event time,
    /// otherwise nothing changes and false is returned. Subscribers are
    /// notified with [`Event::TimeChanged`].
    pub fn set_time(&self, time: f64, exact: bool) -> bool {
        let positions = {
            let mut state = self.shared.state.lock();

            if exact && state.graph.slice(time, true).is_none() {
                return false;
            }

            state.time = time;
            state.layout.position_map(&state.graph, time)
        };

        self.shared
            .subscribers
            .notify(Event::TimeChanged { time, positions });
        true
    }

    pub fn minimum_time(&self) -> Option<f64> {
        self.shared.state.lock().graph.minimum_time()
    }

    pub fn maximum_time(&self) -> Option<f64> {
        self.shared.state.lock().graph.maximum_time()
    }

    pub fn times(&self) -> Vec<f64> {
        self.shared.state.lock().graph.times()
    }

    pub fn is_layout_animating(&self) -> bool {
        self.task.lock().is_some()
    }

    /// Starts or stops the layout task using the stored [`TaskConfig`].
    pub fn set_layout_animating(&self, animating: bool) -> Result<(), Error> {
        if animating == self.is_layout_animating() {
            return Ok(());
        }

        if animating {
            let config = self.task_config();
            self.start_layout_task(config.delay, config.iterations_per_tick)
        } else {
            self.stop_layout_task();
            Ok(())
        }
    }

    /// Starts the layout task, replacing the running one, if any. The delay
    /// and the number of iterations are stored in the task configuration.
    pub fn start_layout_task(&self, delay: Duration, iterations_per_tick: usize) -> Result<(), Error> {
        let mut task = self.task.lock();
        let was_running = task.is_some();

        if let Some(previous) = task.take() {
            previous.cancel();
        }

        {
            let mut config = self.shared.config.lock();
            config.delay = delay;
            config.iterations_per_tick = iterations_per_tick;
        }

        let (stop, stopped) = mpsc::channel();
        let shared = Arc::clone(&self.shared);

        let spawned = thread::Builder::new()
            .name("layout".to_owned())
            .spawn(move || run(shared, stopped, delay, iterations_per_tick));

        match spawned {
            Ok(handle) => {
                *task = Some(LayoutTask { stop, handle });
                drop(task);

                if !was_running {
                    self.shared
                        .subscribers
                        .notify(Event::AnimationChanged(true));
                }

                Ok(())
            }
            Err(error) => {
                drop(task);

                if was_running {
                    self.shared
                        .subscribers
                        .notify(Event::AnimationChanged(false));
                }

                Err(error.into())
            }
        }
    }

    /// Stops the layout task without waiting for it. A tick in progress still
    /// finishes and notifies subscribers, later ticks do not happen.
    pub fn stop_layout_task(&self) {
        let task = self.task.lock().take();

        if let Some(task) = task {
            task.cancel();
            self.shared
                .subscribers
                .notify(Event::AnimationChanged(false));
        }
    }

    /// Performs one layout iteration and notifies subscribers with
    /// [`Event::PositionsChanged`].
    pub fn iterate(&self) {
        self.shared.tick(1);
    }

    /// Positions of the nodes visible at the current time.
    pub fn position_map(&self) -> PositionMap<L::Node> {
        self.shared.position_map()
    }

    /// Mutates the graph. The layout picks up the change on its next
    /// iteration.
    pub fn update_graph<F, R>(&self, update: F) -> R
    where
        F: FnOnce(&mut L) -> R,
    {
        update(&mut self.shared.state.lock().graph)
    }

    /// Reads the graph.
    pub fn with_graph<F, R>(&self, read: F) -> R
    where
        F: FnOnce(&L) -> R,
    {
        read(&self.shared.state.lock().graph)
    }

    pub fn stats(&self) -> LayoutStats {
        let counters = &self.shared.counters;

        LayoutStats {
            iterations: counters.iterations.load(Ordering::Relaxed),
            skipped: counters.skipped.load(Ordering::Relaxed),
            slow_ticks: counters.slow_ticks.load(Ordering::Relaxed),
        }
    }

    /// Subscribes to events of given signal, or to all events if `filter`
    /// is `None`.
    pub fn subscribe(&self, filter: Option<Signal>) -> Subscription<L::Node> {
        self.shared.subscribers.subscribe(filter)
    }

    /// Removes the subscription. Returns false if there was no such
    /// subscription.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.shared.subscribers.unsubscribe(id)
    }
}

impl<L: LongitudinalGraph> Drop for TimeGraphManager<L> {
    fn drop(&mut self) {
        if let Some(task) = self.task.get_mut().take() {
            task.join();
        }
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;
    use crate::{core::Create, storage::SparseGraph, time::SlicedGraph};

    const WAIT: Duration = Duration::from_secs(5);

    fn manager() -> TimeGraphManager<SlicedGraph<u32>> {
        let mut graph = SlicedGraph::new(false);
        graph
            .push(0.0, SparseGraph::from_edges(false, [1u32, 2], [(1u32, 2u32)]))
            .unwrap();
        graph
            .push(
                2.0,
                SparseGraph::from_edges(false, [1, 2, 3], [(1u32, 2u32), (2, 3)]),
            )
            .unwrap();

        TimeGraphManager::new(graph, LayoutParameters::default().seed(3))
    }

    #[test]
    fn time_control() {
        let manager = manager();

        assert_eq!(manager.time(), 0.0);
        assert_eq!(manager.times(), vec![0.0, 2.0]);
        assert_eq!(manager.minimum_time(), Some(0.0));
        assert_eq!(manager.maximum_time(), Some(2.0));
        assert_eq!(manager.position_map().len(), 2);

        assert!(manager.set_time(2.5, false));
        assert_eq!(manager.time(), 2.5);
        assert_eq!(manager.position_map().len(), 3);
    }

    #[test]
    fn time_change_is_notified() {
        let manager = manager();
        let events = manager.subscribe(Some(Signal::Time));

        manager.set_time(2.0, true);

        assert_matches!(
            events.try_recv(),
            Some(Event::TimeChanged { time, positions }) if time == 2.0 && positions.len() == 3
        );
    }

    #[test]
    fn exact_time_miss_changes_nothing() {
        let manager = manager();
        let events = manager.subscribe(None);

        assert!(!manager.set_time(1.0, true));
        assert_eq!(manager.time(), 0.0);
        assert!(events.try_recv().is_none());
    }

    #[test]
    fn subscription_filter() {
        let manager = manager();
        let time = manager.subscribe(Some(Signal::Time));
        let positions = manager.subscribe(Some(Signal::Positions));
        let all = manager.subscribe(None);

        manager.iterate();
        manager.set_time(2.0, false);

        assert_eq!(
            time.try_iter().map(|event| event.signal()).collect::<Vec<_>>(),
            vec![Signal::Time]
        );
        assert_eq!(
            positions.try_iter().map(|event| event.signal()).collect::<Vec<_>>(),
            vec![Signal::Positions]
        );
        assert_eq!(
            all.try_iter().map(|event| event.signal()).collect::<Vec<_>>(),
            vec![Signal::Positions, Signal::Time]
        );
    }

    #[test]
    fn unsubscribe_and_prune() {
        let manager = manager();
        let kept = manager.subscribe(None);
        let removed = manager.subscribe(None);
        let dropped = manager.subscribe(None);
        drop(dropped);

        assert!(manager.unsubscribe(removed.id()));
        assert!(!manager.unsubscribe(removed.id()));

        manager.iterate();

        assert!(kept.try_recv().is_some());
        assert!(removed.try_recv().is_none());
        assert_eq!(manager.shared.subscribers.list.lock().len(), 1);
    }

    #[test]
    fn manual_iteration() {
        let manager = manager();
        let before = manager.position_map();

        manager.iterate();

        assert_eq!(manager.stats().iterations, 1);
        assert_ne!(manager.position_map(), before);
    }

    #[test]
    fn graph_update_skips_one_iteration() {
        let manager = manager();

        manager.update_graph(|graph| {
            graph
                .push(3.0, SparseGraph::from_edges(false, [3, 4], [(3u32, 4u32)]))
                .unwrap()
        });
        manager.iterate();
        manager.iterate();

        assert_eq!(
            manager.stats(),
            LayoutStats {
                iterations: 1,
                skipped: 1,
                slow_ticks: 0,
            }
        );

        manager.set_time(3.0, true);
        let positions = manager.position_map();
        assert_eq!(positions.len(), 2);
        assert!(positions.contains_key(&4));
        assert_eq!(manager.with_graph(|graph| graph.len()), 3);
    }

    #[test]
    fn layout_task_ticks_and_stops() {
        let manager = manager();
        let animation = manager.subscribe(Some(Signal::Animation));
        let positions = manager.subscribe(Some(Signal::Positions));

        manager
            .start_layout_task(Duration::from_millis(1), 3)
            .unwrap();
        assert!(manager.is_layout_animating());
        assert_matches!(animation.try_recv(), Some(Event::AnimationChanged(true)));

        assert_matches!(
            positions.recv_timeout(WAIT),
            Some(Event::PositionsChanged(map)) if map.len() == 2
        );

        manager.stop_layout_task();
        assert!(!manager.is_layout_animating());
        assert_matches!(animation.try_recv(), Some(Event::AnimationChanged(false)));

        // A tick in progress may still finish, nothing follows it.
        thread::sleep(Duration::from_millis(20));
        positions.try_iter().for_each(drop);
        let stats = manager.stats();
        assert!(stats.iterations >= 3);
        assert_eq!(stats.iterations % 3, 0);

        thread::sleep(Duration::from_millis(20));
        assert!(positions.try_recv().is_none());
        assert_eq!(manager.stats(), stats);
    }

    #[test]
    fn stopping_does_not_wait_for_tick() {
        let manager = manager();
        let animation = manager.subscribe(Some(Signal::Animation));
        let positions = manager.subscribe(Some(Signal::Positions));

        manager.start_layout_task(Duration::from_millis(1), 1).unwrap();

        {
            // The task blocks on the state inside its tick.
            let _state = manager.shared.state.lock();
            thread::sleep(Duration::from_millis(20));

            manager.stop_layout_task();
            assert!(!manager.is_layout_animating());
        }

        assert_eq!(animation.try_iter().count(), 2);

        thread::sleep(Duration::from_millis(20));
        positions.try_iter().for_each(drop);
        thread::sleep(Duration::from_millis(20));
        assert!(positions.try_recv().is_none());
    }

    #[test]
    fn restarting_task_does_not_notify() {
        let manager = manager();
        let animation = manager.subscribe(Some(Signal::Animation));

        manager.start_layout_task(Duration::from_millis(5), 1).unwrap();
        manager.start_layout_task(Duration::from_millis(2), 1).unwrap();

        assert_eq!(animation.try_iter().count(), 1);
        assert_eq!(manager.task_config().delay, Duration::from_millis(2));
    }

    #[test]
    fn animating_flag() {
        let manager = manager().with_task_config(TaskConfig::default().delay(Duration::from_millis(1)));
        let animation = manager.subscribe(Some(Signal::Animation));

        manager.set_layout_animating(true).unwrap();
        manager.set_layout_animating(true).unwrap();
        assert!(manager.is_layout_animating());

        manager.set_layout_animating(false).unwrap();
        manager.set_layout_animating(false).unwrap();
        assert!(!manager.is_layout_animating());

        assert_eq!(
            animation
                .try_iter()
                .map(|event| matches!(event, Event::AnimationChanged(true)))
                .collect::<Vec<_>>(),
            vec![true, false]
        );
    }

    #[test]
    fn dropping_manager_stops_task() {
        let manager = manager();
        let positions = manager.subscribe(Some(Signal::Positions));

        manager.start_layout_task(Duration::from_millis(1), 1).unwrap();
        drop(manager);

        // All senders are gone once the task is joined.
        positions.try_iter().for_each(drop);
        assert!(positions.recv().is_none());
    }
}
