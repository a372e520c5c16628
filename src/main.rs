//! # Ride RFQ Engine
//!
//! Single-process demo: REST API, an in-memory bus and stores, and a pool
//! of bidder workers wired onto the broadcast topic.

use ride_rfq::api::rest::{AppState, create_router};
use ride_rfq::application::links::UrlLinkBuilder;
use ride_rfq::application::use_cases::{
    QuoteWorker, RandomSpreadQuoter, ResponseCollector, RfqQueryUseCase, SubmitRfqUseCase,
};
use ride_rfq::config::{AppConfig, LogFormat};
use ride_rfq::domain::value_objects::{BidderId, Perk};
use ride_rfq::infrastructure::messaging::in_memory::InMemoryBus;
use ride_rfq::infrastructure::persistence::in_memory::{
    InMemoryRequestStore, InMemoryResponseStore,
};
use std::sync::Arc;
use tracing::{info, warn};

fn init_tracing(config: &AppConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(config.log.level.clone()));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    match config.log.format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Pretty => builder.pretty().init(),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load()?;
    init_tracing(&config);
    info!("starting ride-rfq engine v{}", env!("CARGO_PKG_VERSION"));

    let bus = Arc::new(InMemoryBus::new());
    let request_store = Arc::new(InMemoryRequestStore::new());
    let response_store = Arc::new(InMemoryResponseStore::new());
    info!(
        topic = %config.bus.request_topic,
        reply_queue = %config.bus.reply_queue,
        request_table = %config.store.request_table,
        response_table = %config.store.response_table,
        "in-memory bus and stores ready"
    );

    // Bidder pool: each worker owns its identity and a spread quoter so
    // concurrent bids come back with distinct prices.
    for i in 1..=config.bidder.count {
        let worker = QuoteWorker::new(
            BidderId::new(format!("U{i}")),
            Arc::new(RandomSpreadQuoter::new(
                250,
                150,
                vec![Perk::FreeDrinksNonAlc, Perk::FreeSnacks],
            )),
            bus.clone(),
            config.bus.clone(),
        );
        info!(bidder = %worker.bidder_id(), "bidder online");
        tokio::spawn(worker.run(bus.subscribe()));
    }

    // Collector drains the reply queue into the response store.
    let mut replies = bus.declare_queue(&config.bus.reply_queue).await;
    let collector = ResponseCollector::new(response_store.clone(), config.bus.clone());
    tokio::spawn(async move {
        while let Some(record) = replies.recv().await {
            if let Err(e) = collector.process_record(&record).await {
                warn!(error = %e, "dropping reply record");
            }
        }
    });

    let state = AppState {
        submit: Arc::new(SubmitRfqUseCase::new(
            request_store.clone(),
            bus.clone(),
            config.bus.clone(),
        )),
        query: Arc::new(RfqQueryUseCase::new(
            request_store,
            response_store,
            Arc::new(UrlLinkBuilder),
        )),
        links: Arc::new(UrlLinkBuilder),
    };

    let addr = config.rest.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, bidders = config.bidder.count, "listening");

    axum::serve(listener, create_router(state))
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("shutting down ride-rfq engine");
        })
        .await?;

    Ok(())
}
