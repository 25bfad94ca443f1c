

use std::sync::Arc;

use perfdash::{mount, render, render_text, ApiClient, DashboardConfig, ViewStore};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("perfdash=info")),
        )
        .init();

    let config = DashboardConfig::load()?;
    let labeler = config.labeler();
    let api = Arc::new(ApiClient::from_config(&config)?);
    let store = Arc::new(ViewStore::new());
    let mut revisions = store.subscribe();

    println!("{}", render_text(&render(&store.snapshot().await, &labeler)));
    let mounted = mount(api, Arc::clone(&store), labeler.clone(), config.teardown);

    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            changed = revisions.changed() => {
                if changed.is_err() {
                    break;
                }
                let state = store.snapshot().await;
                println!("{}", render_text(&render(&state, &labeler)));
                if state.is_settled() {
                    break;
                }
            }
            _ = &mut shutdown => {
                info!("interrupted, {} fetches still in flight", mounted.in_flight());
                break;
            }
        }
    }

    mounted.teardown().await;
    Ok(())
}
