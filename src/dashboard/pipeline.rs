

use std::sync::Arc;

use futures::future::join_all;
use serde::{Deserialize, Serialize};
use strum::{EnumString, IntoStaticStr};
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use super::labels::DateLabeler;
use super::state::ViewStore;
use super::transform::format_metrics;
use crate::api::{DashboardApi, Endpoint};


/// What happens to in-flight fetches when the mounted dashboard goes away.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, EnumString, IntoStaticStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum TeardownPolicy {
    /// Abort every fetch still running.
    #[default]
    Cancel,
    /// Let fetches run to completion and write into the store anyway.
    Detach,
}


/// The three fetch tasks launched by [`mount`].
pub struct Mounted {
    handles: Vec<(Endpoint, JoinHandle<()>)>,
    policy: TeardownPolicy,
}

impl Mounted {
    pub fn policy(&self) -> TeardownPolicy {
        self.policy
    }

    /// Waits until every fetch has either populated or failed its slot.
    pub async fn settled(&mut self) {
        let handles = std::mem::take(&mut self.handles);
        let results = join_all(
            handles
                .into_iter()
                .map(|(endpoint, handle)| async move { (endpoint, handle.await) }),
        )
        .await;

        for (endpoint, result) in results {
            match result {
                Err(e) if e.is_cancelled() => debug!("{} fetch cancelled", endpoint),
                Err(e) => warn!("{} fetch task did not complete: {}", endpoint, e),
                Ok(()) => {}
            }
        }
    }

    /// Under `Cancel`, returns only once every aborted fetch has stopped, so nothing can
    /// write into the store afterwards. Under `Detach`, fetches keep running.
    pub async fn teardown(mut self) {
        debug!(
            "tearing down dashboard ({} fetches in flight, policy={:?})",
            self.in_flight(),
            self.policy
        );
        if self.policy == TeardownPolicy::Cancel {
            for (_, handle) in &self.handles {
                handle.abort();
            }
            self.settled().await;
        }
    }

    pub fn in_flight(&self) -> usize {
        self.handles.iter().filter(|(_, h)| !h.is_finished()).count()
    }
}

impl Drop for Mounted {
    fn drop(&mut self) {
        if self.policy == TeardownPolicy::Cancel {
            for (_, handle) in &self.handles {
                handle.abort();
            }
        }
    }
}


/// Starts the tickets, metrics and forecast fetches without waiting on any of them.
///
/// Each task owns exactly one slot of `store`. A failure is logged and recorded as
/// `Slot::Failed`; it never reaches the other slots.
pub fn mount<A>(
    api: Arc<A>,
    store: Arc<ViewStore>,
    labeler: DateLabeler,
    policy: TeardownPolicy,
) -> Mounted
where
    A: DashboardApi + ?Sized + 'static,
{
    info!("mounting dashboard (teardown policy={:?})", policy);

    let tickets = {
        let api = Arc::clone(&api);
        let store = Arc::clone(&store);
        tokio::spawn(async move {
            match api.fetch_tickets().await {
                Ok(tickets) => store.set_tickets(tickets).await,
                Err(e) => {
                    error!("Error fetching tickets: {}", e);
                    store.fail_tickets(e.to_string()).await;
                }
            }
        })
    };

    let metrics = {
        let api = Arc::clone(&api);
        let store = Arc::clone(&store);
        tokio::spawn(async move {
            match api.fetch_metrics().await {
                Ok(raw) => store.set_metrics(format_metrics(&raw, &labeler)).await,
                Err(e) => {
                    error!("Error fetching metrics: {}", e);
                    store.fail_metrics(e.to_string()).await;
                }
            }
        })
    };

    let forecast = tokio::spawn(async move {
        match api.fetch_forecast().await {
            Ok(forecast) => store.set_forecast(forecast).await,
            Err(e) => {
                error!("Error fetching forecast: {}", e);
                store.fail_forecast(e.to_string()).await;
            }
        }
    });

    Mounted {
        handles: vec![
            (Endpoint::Tickets, tickets),
            (Endpoint::Metrics, metrics),
            (Endpoint::Forecast, forecast),
        ],
        policy,
    }
}
