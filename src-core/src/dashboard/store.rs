use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::api::{DashboardAggregate, SustainabilityApi};

/// Banner text shown while the service is unreachable.
pub const CONNECTION_ERROR: &str = "Could not connect to the greenlint API.";

/// What a refresh attempt did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// A new aggregate replaced the old one.
    Updated,
    /// The fetch failed; the previous aggregate is still shown.
    Failed,
    /// A refresh was already running; this one runs when it finishes.
    Queued,
    /// A poll tick arrived while a refresh was running and was dropped.
    Skipped,
    /// The store was stopped before the response arrived.
    Discarded,
    /// `tick` or `refresh` was called on a stopped store.
    Stopped,
}

/// Owned view of the store for display.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardSnapshot {
    pub aggregate: Option<DashboardAggregate>,
    pub error: Option<String>,
    /// False until the first refresh has completed, successfully or not.
    pub loaded: bool,
}

impl DashboardSnapshot {
    pub fn is_connected(&self) -> bool {
        self.error.is_none()
    }

    pub fn sustainability_score(&self) -> Option<f64> {
        self.aggregate.as_ref().map(|a| a.sustainability_score)
    }
}

type Observer = Box<dyn Fn(&DashboardSnapshot)>;

/// Latest dashboard aggregate, kept current by polling.
///
/// The aggregate is only ever replaced as a whole. A failed refresh keeps
/// the previous aggregate and sets the error banner. At most one fetch is
/// in flight: overlapping poll ticks are skipped, and an overlapping
/// explicit [`refresh`](Self::refresh) is queued behind the running one.
pub struct DashboardStore<A> {
    api: Rc<A>,
    poll_interval: Duration,
    snapshot: RefCell<DashboardSnapshot>,
    running: Cell<bool>,
    /// Bumped on start and stop; responses from an older generation are dropped.
    generation: Cell<u64>,
    in_flight: Cell<bool>,
    pending: Cell<bool>,
    observers: RefCell<Vec<Observer>>,
}

/// Clears the in-flight flag even if the refresh future is dropped early.
struct InFlight<'a>(&'a Cell<bool>);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.set(false);
    }
}

impl<A: SustainabilityApi> DashboardStore<A> {
    pub fn new(api: Rc<A>, poll_interval: Duration) -> Self {
        Self {
            api,
            poll_interval,
            snapshot: RefCell::new(DashboardSnapshot::default()),
            running: Cell::new(false),
            generation: Cell::new(0),
            in_flight: Cell::new(false),
            pending: Cell::new(false),
            observers: RefCell::new(Vec::new()),
        }
    }

    pub fn poll_interval(&self) -> Duration {
        self.poll_interval
    }

    pub fn subscribe(&self, observer: impl Fn(&DashboardSnapshot) + 'static) {
        self.observers.borrow_mut().push(Box::new(observer));
    }

    pub fn snapshot(&self) -> DashboardSnapshot {
        self.snapshot.borrow().clone()
    }

    pub fn is_running(&self) -> bool {
        self.running.get()
    }

    pub fn is_refreshing(&self) -> bool {
        self.in_flight.get()
    }

    /// Begin a polling lifecycle. The caller performs the initial
    /// [`refresh`](Self::refresh) and then calls [`tick`](Self::tick) every
    /// [`poll_interval`](Self::poll_interval). Returns false if already running.
    pub fn start(&self) -> bool {
        if self.running.replace(true) {
            return false;
        }
        self.generation.set(self.generation.get() + 1);
        info!("Dashboard polling started (every {:?})", self.poll_interval);
        true
    }

    /// End the polling lifecycle. Responses still in flight and refreshes
    /// queued behind them are discarded.
    pub fn stop(&self) {
        if self.running.replace(false) {
            self.generation.set(self.generation.get() + 1);
            self.pending.set(false);
            info!("Dashboard polling stopped");
        }
    }

    /// One poll tick. Skipped while another refresh is outstanding.
    pub async fn tick(&self) -> RefreshOutcome {
        if !self.running.get() {
            return RefreshOutcome::Stopped;
        }
        if self.in_flight.get() {
            debug!("Dashboard refresh still running; skipping tick");
            return RefreshOutcome::Skipped;
        }
        self.refresh().await
    }

    /// Fetch the aggregate now. Does nothing on a stopped store.
    pub async fn refresh(&self) -> RefreshOutcome {
        if !self.running.get() {
            return RefreshOutcome::Stopped;
        }
        if self.in_flight.get() {
            debug!("Dashboard refresh queued behind the running one");
            self.pending.set(true);
            return RefreshOutcome::Queued;
        }
        self.in_flight.set(true);
        let _guard = InFlight(&self.in_flight);

        let mut generation = self.generation.get();
        loop {
            let result = self.api.dashboard().await;

            let outcome = if self.generation.get() == generation {
                self.apply(result)
            } else {
                debug!("Discarding dashboard response from a previous polling session");
                RefreshOutcome::Discarded
            };

            // `stop` clears `pending`, so a queued refresh here was requested
            // by the session that is running now.
            if !self.pending.replace(false) {
                return outcome;
            }
            generation = self.generation.get();
        }
    }

    fn apply(&self, result: Result<DashboardAggregate, crate::error::ApiError>) -> RefreshOutcome {
        let outcome = {
            let mut snapshot = self.snapshot.borrow_mut();
            snapshot.loaded = true;
            match result {
                Ok(aggregate) => {
                    debug!(
                        "Dashboard refreshed: {} optimizations, score {}",
                        aggregate.total_optimizations, aggregate.sustainability_score
                    );
                    snapshot.aggregate = Some(aggregate);
                    snapshot.error = None;
                    RefreshOutcome::Updated
                }
                Err(e) => {
                    warn!("Dashboard refresh failed: {}", e);
                    snapshot.error = Some(CONNECTION_ERROR.to_string());
                    RefreshOutcome::Failed
                }
            }
        };
        self.notify();
        outcome
    }

    fn notify(&self) {
        let snapshot = self.snapshot();
        for observer in self.observers.borrow().iter() {
            observer(&snapshot);
        }
    }

    /// Run the polling lifecycle until `shutdown` flips to true or its
    /// sender is dropped: refresh immediately, then once per interval.
    #[cfg(not(target_arch = "wasm32"))]
    pub async fn run_polling(&self, mut shutdown: tokio::sync::watch::Receiver<bool>) {
        use tokio::time::{interval, MissedTickBehavior};

        self.start();
        self.refresh().await;

        let mut ticker = interval(self.poll_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        // The first tick of a tokio interval fires immediately.
        ticker.tick().await;

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    self.tick().await;
                }
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        break;
                    }
                }
            }
        }
        self.stop();
    }
}
