

use tokio::sync::{watch, RwLock};
use tracing::debug;

use super::transform::MetricsView;
use crate::api::models::{ForecastResult, Ticket};


/// One independently loaded piece of view state.
#[derive(Debug, Clone, PartialEq)]
pub enum Slot<T> {
    Loading,
    Loaded(T),
    Failed(String),
}

impl<T> Default for Slot<T> {
    fn default() -> Self {
        Slot::Loading
    }
}

impl<T> Slot<T> {
    pub fn loaded(&self) -> Option<&T> {
        match self {
            Slot::Loaded(value) => Some(value),
            _ => None,
        }
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self, Slot::Loaded(_))
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Slot::Failed(_))
    }

    pub fn is_settled(&self) -> bool {
        !matches!(self, Slot::Loading)
    }
}


#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewState {
    pub tickets: Slot<Vec<Ticket>>,
    pub metrics: Slot<MetricsView>,
    pub forecast: Slot<ForecastResult>,
}

impl ViewState {
    pub fn is_settled(&self) -> bool {
        self.tickets.is_settled() && self.metrics.is_settled() && self.forecast.is_settled()
    }
}


/// Shared owner of the dashboard's [`ViewState`].
///
/// Each slot has its own writer; every write bumps a revision published to subscribers so a
/// host can re-render.
pub struct ViewStore {
    state: RwLock<ViewState>,
    revision: watch::Sender<u64>,
}

impl ViewStore {
    #[must_use]
    pub fn new() -> Self {
        let (revision, _) = watch::channel(0);
        Self {
            state: RwLock::new(ViewState::default()),
            revision,
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.revision.subscribe()
    }

    pub fn revision(&self) -> u64 {
        *self.revision.borrow()
    }

    pub async fn snapshot(&self) -> ViewState {
        self.state.read().await.clone()
    }

    pub async fn set_tickets(&self, tickets: Vec<Ticket>) {
        debug!("tickets slot loaded ({} records)", tickets.len());
        self.update(|s| s.tickets = Slot::Loaded(tickets)).await;
    }

    pub async fn set_metrics(&self, metrics: MetricsView) {
        debug!("metrics slot loaded (total_tickets={})", metrics.total_tickets);
        self.update(|s| s.metrics = Slot::Loaded(metrics)).await;
    }

    pub async fn set_forecast(&self, forecast: ForecastResult) {
        debug!(
            "forecast slot loaded ({} historical weeks)",
            forecast.historical_weekly_throughput.len()
        );
        self.update(|s| s.forecast = Slot::Loaded(forecast)).await;
    }

    pub async fn fail_tickets(&self, reason: impl Into<String>) {
        let reason = reason.into();
        self.update(|s| s.tickets = Slot::Failed(reason)).await;
    }

    pub async fn fail_metrics(&self, reason: impl Into<String>) {
        let reason = reason.into();
        self.update(|s| s.metrics = Slot::Failed(reason)).await;
    }

    pub async fn fail_forecast(&self, reason: impl Into<String>) {
        let reason = reason.into();
        self.update(|s| s.forecast = Slot::Failed(reason)).await;
    }

    async fn update(&self, apply: impl FnOnce(&mut ViewState)) {
        {
            let mut state = self.state.write().await;
            apply(&mut *state);
        }
        self.revision.send_modify(|rev| *rev += 1);
    }
}

impl Default for ViewStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_starts_all_loading() {
        let store = ViewStore::new();
        let state = store.snapshot().await;

        assert_eq!(state.tickets, Slot::Loading);
        assert_eq!(state.metrics, Slot::Loading);
        assert_eq!(state.forecast, Slot::Loading);
        assert!(!state.is_settled());
        assert_eq!(store.revision(), 0);
    }

    #[tokio::test]
    async fn test_setters_touch_only_their_slot() {
        let store = ViewStore::new();
        store.set_tickets(vec![Ticket(json!({"key": "SUPPORT-1"}))]).await;
        store.fail_forecast("Error fetching forecast").await;

        let state = store.snapshot().await;
        assert_eq!(state.tickets.loaded().map(Vec::len), Some(1));
        assert_eq!(state.metrics, Slot::Loading);
        assert!(state.forecast.is_failed());
        assert_eq!(store.revision(), 2);
    }

    #[test]
    fn test_second_write_overwrites() {
        let store = ViewStore::new();
        tokio_test::block_on(async {
            store.fail_tickets("boom").await;
            store.set_tickets(vec![]).await;
        });

        let state = tokio_test::block_on(store.snapshot());
        assert_eq!(state.tickets, Slot::Loaded(vec![]));
    }

    #[tokio::test]
    async fn test_subscribers_see_every_write() {
        let store = ViewStore::new();
        let mut rx = store.subscribe();

        store.set_tickets(vec![]).await;
        rx.changed().await.unwrap();
        assert_eq!(*rx.borrow_and_update(), 1);

        store.fail_metrics("down").await;
        rx.changed().await.unwrap();
        assert_eq!(*rx.borrow_and_update(), 2);
    }
}
