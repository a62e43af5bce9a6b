use std::{
    sync::{Arc, Mutex as SyncMutex, PoisonError},
    time::Duration,
};

use chrono::{DateTime, NaiveDateTime, Utc};
use rand::{rngs::StdRng, RngCore, SeedableRng};
use serde::Serialize;
use shared::{
    domain::{Exhibitor, Notification, Order},
    protocol::{ExhibitorOrdersResponse, SystemStatus},
};
use tokio::sync::{watch, Mutex};
use tracing::{debug, error, info, warn};

pub mod api;
pub mod config;
pub mod fallback;
pub mod notifications;
pub mod ordering;
pub mod session;
pub mod timer;

pub use api::{HttpOrderApi, OrderApi};
pub use config::{load_settings, ClientSettings};
pub use ordering::{sort_orders_by_status, OrderSummary};
pub use session::SessionState;

use fallback::fallback_orders;
use notifications::derive_notifications;
use timer::PollTimer;

/// How a call to [`OrderSyncController::refresh`] ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// Backend orders were published.
    Synced,
    /// The backend failed and fallback orders were published instead.
    FellBack,
    /// Another sync was already running.
    AlreadyInFlight,
    NotAuthenticated,
    /// The session changed while the fetch was running; its result was dropped.
    Discarded,
}

/// Read-only view of everything the dashboard renders.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DashboardSnapshot {
    pub selected_exhibitor: Option<&'static Exhibitor>,
    pub authenticated_exhibitor: Option<&'static Exhibitor>,
    pub last_sync: Option<DateTime<Utc>>,
    pub orders: Vec<Order>,
    pub notifications: Vec<Notification>,
    pub summary: OrderSummary,
    pub system_status: Option<SystemStatus>,
    pub syncing: bool,
}

impl DashboardSnapshot {
    pub fn is_authenticated(&self) -> bool {
        self.authenticated_exhibitor.is_some()
    }
}

struct ControllerState {
    session: SessionState,
    orders: Vec<Order>,
    notifications: Vec<Notification>,
    system_status: Option<SystemStatus>,
    /// Bumped whenever the session starts or ends; fetches started under an
    /// older generation are discarded.
    generation: u64,
    poll_timer: Option<PollTimer>,
    rng: Box<dyn RngCore + Send>,
}

impl ControllerState {
    fn snapshot(&self, syncing: bool) -> DashboardSnapshot {
        DashboardSnapshot {
            selected_exhibitor: self.session.selected_exhibitor(),
            authenticated_exhibitor: self.session.authenticated_exhibitor(),
            last_sync: self.session.last_sync(),
            orders: self.orders.clone(),
            notifications: self.notifications.clone(),
            summary: OrderSummary::from_orders(&self.orders),
            system_status: self.system_status.clone(),
            syncing,
        }
    }

    fn clear_orders(&mut self) {
        self.orders.clear();
        self.notifications.clear();
    }

    fn end_session(&mut self) {
        self.session.sign_out();
        self.clear_orders();
        self.generation += 1;
        self.poll_timer = None;
    }

    fn publish_orders(&mut self, mut orders: Vec<Order>, synced_at: DateTime<Utc>) {
        sort_orders_by_status(&mut orders);
        self.notifications = derive_notifications(&orders, &mut *self.rng);
        self.orders = orders;
        self.session.record_sync(synced_at);
    }
}

/// Owns the dashboard session: exhibitor selection, login, the periodic order
/// sync and everything derived from it.
///
/// Must be created inside a Tokio runtime; [`OrderSyncController::init`]
/// spawns the system status probe and login spawns the poll timer.
pub struct OrderSyncController {
    api: Arc<dyn OrderApi>,
    refresh_interval: Duration,
    inner: Mutex<ControllerState>,
    /// Generation of the sync currently running, if any. Kept outside `inner`
    /// so a cancelled sync can release it without awaiting.
    in_flight: SyncMutex<Option<u64>>,
    snapshots: watch::Sender<DashboardSnapshot>,
}

impl OrderSyncController {
    pub fn init(api: Arc<dyn OrderApi>, settings: &ClientSettings) -> Arc<Self> {
        Self::init_with_rng(
            api,
            settings.refresh_interval,
            Box::new(StdRng::from_entropy()),
        )
    }

    pub fn init_with_rng(
        api: Arc<dyn OrderApi>,
        refresh_interval: Duration,
        rng: Box<dyn RngCore + Send>,
    ) -> Arc<Self> {
        let (snapshots, _) = watch::channel(DashboardSnapshot::default());
        let controller = Arc::new(Self {
            api,
            refresh_interval,
            inner: Mutex::new(ControllerState {
                session: SessionState::default(),
                orders: Vec::new(),
                notifications: Vec::new(),
                system_status: None,
                generation: 0,
                poll_timer: None,
                rng,
            }),
            in_flight: SyncMutex::new(None),
            snapshots,
        });

        let weak = Arc::downgrade(&controller);
        tokio::spawn(async move {
            if let Some(controller) = weak.upgrade() {
                controller.probe_system_status().await;
            }
        });

        controller
    }

    /// Fetches the backend status once for passive display. Failures are
    /// logged and otherwise ignored.
    pub async fn probe_system_status(&self) {
        match self.api.fetch_system_status().await {
            Ok(status) => {
                info!(status = ?status.field("status"), "system status received");
                let mut state = self.inner.lock().await;
                state.system_status = Some(status);
                self.publish(&state);
            }
            Err(err) => warn!(error = %err, "system status probe failed"),
        }
    }

    pub async fn select_exhibitor(&self, exhibitor_id: &str) -> Option<&'static Exhibitor> {
        let mut state = self.inner.lock().await;
        let selected = state.session.select(exhibitor_id);
        if selected.is_none() && !exhibitor_id.trim().is_empty() {
            debug!(exhibitor_id, "unknown exhibitor id; selection cleared");
        }
        self.publish(&state);
        selected
    }

    /// Signs in as the selected exhibitor, runs an immediate sync and starts
    /// the recurring one. Returns `false` without doing anything when no
    /// exhibitor is selected.
    ///
    /// Confirming again while signed in restarts the session for the current
    /// selection.
    pub async fn confirm_login(self: &Arc<Self>) -> bool {
        let exhibitor = {
            let mut state = self.inner.lock().await;
            let Some(exhibitor) = state.session.authenticate() else {
                debug!("login confirmation ignored: no exhibitor selected");
                return false;
            };
            state.generation += 1;
            self.reset_in_flight();
            state.clear_orders();
            state.poll_timer = Some(self.start_poll_timer());
            self.publish(&state);
            exhibitor
        };

        info!(
            exhibitor = exhibitor.display_name,
            interval_secs = self.refresh_interval.as_secs(),
            "exhibitor signed in"
        );
        self.refresh().await;
        true
    }

    pub async fn sign_out(&self) {
        let mut state = self.inner.lock().await;
        if let Some(exhibitor) = state.session.authenticated_exhibitor() {
            info!(exhibitor = exhibitor.display_name, "exhibitor signed out");
        }
        state.end_session();
        self.reset_in_flight();
        self.publish(&state);
    }

    /// Stops polling and drops all session data. Dropping the last handle to
    /// the controller has the same effect on the timer.
    pub async fn teardown(&self) {
        let mut state = self.inner.lock().await;
        state.end_session();
        self.reset_in_flight();
        state.system_status = None;
        self.publish(&state);
        debug!("order sync controller torn down");
    }

    /// Syncs orders for the signed-in exhibitor. Backend failures never reach
    /// the caller: fallback orders are published instead.
    ///
    /// Dropping the returned future part way through releases the in-flight
    /// slot, so a timed-out sync does not block later ones.
    pub async fn refresh(&self) -> RefreshOutcome {
        let (exhibitor, guard) = {
            let state = self.inner.lock().await;
            let Some(exhibitor) = state.session.authenticated_exhibitor() else {
                return RefreshOutcome::NotAuthenticated;
            };
            let Some(guard) = InFlightGuard::acquire(self, state.generation) else {
                debug!(exhibitor = exhibitor.display_name, "sync already in flight");
                return RefreshOutcome::AlreadyInFlight;
            };
            self.publish(&state);
            (exhibitor, guard)
        };
        let generation = guard.generation;

        debug!(exhibitor = exhibitor.display_name, "fetching orders");
        let result = self.api.fetch_orders(exhibitor.display_name).await;

        let mut state = self.inner.lock().await;
        if state.generation != generation {
            debug!(
                exhibitor = exhibitor.display_name,
                "discarding orders fetched for an ended session"
            );
            return RefreshOutcome::Discarded;
        }
        guard.release();

        let outcome = match result {
            Ok(response) => {
                let synced_at = server_timestamp(&response);
                let orders = response.orders.unwrap_or_default();
                info!(
                    exhibitor = exhibitor.display_name,
                    orders = orders.len(),
                    "orders synced"
                );
                state.publish_orders(orders, synced_at);
                RefreshOutcome::Synced
            }
            Err(err) => {
                if err.is_transient() {
                    warn!(exhibitor = exhibitor.display_name, error = %err, "order fetch failed; using fallback orders");
                } else {
                    error!(exhibitor = exhibitor.display_name, error = %err, "order fetch misconfigured; using fallback orders");
                }
                let now = Utc::now();
                let orders = fallback_orders(exhibitor.display_name, now, &mut *state.rng);
                state.publish_orders(orders, now);
                RefreshOutcome::FellBack
            }
        };

        self.publish(&state);
        outcome
    }

    pub async fn snapshot(&self) -> DashboardSnapshot {
        let state = self.inner.lock().await;
        state.snapshot(self.is_syncing())
    }

    /// Receives a fresh snapshot after every state change.
    pub fn subscribe(&self) -> watch::Receiver<DashboardSnapshot> {
        self.snapshots.subscribe()
    }

    fn start_poll_timer(self: &Arc<Self>) -> PollTimer {
        let weak = Arc::downgrade(self);
        PollTimer::start(self.refresh_interval, move || {
            let weak = weak.clone();
            async move {
                match weak.upgrade() {
                    Some(controller) => {
                        controller.refresh().await;
                        true
                    }
                    None => false,
                }
            }
        })
    }

    fn publish(&self, state: &ControllerState) {
        self.snapshots.send_replace(state.snapshot(self.is_syncing()));
    }

    fn in_flight_slot(&self) -> std::sync::MutexGuard<'_, Option<u64>> {
        self.in_flight.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn is_syncing(&self) -> bool {
        self.in_flight_slot().is_some()
    }

    fn reset_in_flight(&self) {
        *self.in_flight_slot() = None;
    }

    /// Clears the slot if it still belongs to `generation`.
    fn clear_in_flight(&self, generation: u64) -> bool {
        let mut slot = self.in_flight_slot();
        if *slot == Some(generation) {
            *slot = None;
            true
        } else {
            false
        }
    }
}

/// Holds the controller's in-flight slot for one sync. Released explicitly
/// once the result is applied, or on drop if the sync never finishes.
struct InFlightGuard<'a> {
    controller: &'a OrderSyncController,
    generation: u64,
    released: bool,
}

impl<'a> InFlightGuard<'a> {
    fn acquire(controller: &'a OrderSyncController, generation: u64) -> Option<Self> {
        let mut slot = controller.in_flight_slot();
        if slot.is_some() {
            return None;
        }
        *slot = Some(generation);
        Some(Self {
            controller,
            generation,
            released: false,
        })
    }

    fn release(mut self) {
        self.controller.clear_in_flight(self.generation);
        self.released = true;
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        if self.released {
            return;
        }
        if self.controller.clear_in_flight(self.generation) {
            debug!("sync cancelled before completing; in-flight slot released");
            self.controller
                .snapshots
                .send_modify(|snapshot| snapshot.syncing = false);
        }
    }
}

/// Parses the backend's `last_updated`. The backend emits naive ISO-8601
/// timestamps, which are taken as UTC; anything unparseable falls back to now.
fn server_timestamp(response: &ExhibitorOrdersResponse) -> DateTime<Utc> {
    let Some(raw) = response.last_updated.as_deref() else {
        return Utc::now();
    };
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return parsed.with_timezone(&Utc);
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return naive.and_utc();
    }
    warn!(last_updated = raw, "unparseable last_updated; using local time");
    Utc::now()
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
