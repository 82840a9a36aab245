use std::{net::SocketAddr, sync::Arc};
use tokio::net::TcpListener;
use tracing::info;

use backoffice_rs::{
    clients::{HttpBackofficeApi, HttpMenuApi, HttpOrderApi, HttpRateSource, RateSource},
    handlers::create_app,
    init_observability,
    observability::Metrics,
    services::{CartService, DashboardService, ExchangeRates, MenuService, OrderService},
    shutdown_observability, Config,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration first (basic logging only)
    let config = Config::from_environment()?;
    println!("Configuration loaded successfully");

    // Initialize observability
    init_observability(
        &config.observability.service_name,
        &config.observability.service_version,
        config.observability.otlp_endpoint.as_deref(),
        config.observability.enable_json_logging,
    )?;

    info!("Starting backoffice-rs service");
    info!(
        "Service: {} v{}",
        config.observability.service_name, config.observability.service_version
    );
    info!("Remote API: {}", config.upstream.api_base_url);

    // Initialize metrics
    let metrics = Arc::new(Metrics::new()?);
    info!("Metrics initialized successfully");

    // Shared HTTP client for the remote REST API
    let http_client = reqwest::Client::builder()
        .timeout(config.upstream.upstream_timeout())
        .build()?;
    info!("HTTP client initialized successfully");

    // Initialize remote API clients
    let menu_api = Arc::new(HttpMenuApi::new(
        http_client.clone(),
        config.upstream.api_base_url.clone(),
    ));
    let order_api = Arc::new(HttpOrderApi::new(
        http_client.clone(),
        config.upstream.api_base_url.clone(),
    ));
    let backoffice_api = Arc::new(HttpBackofficeApi::new(
        http_client.clone(),
        config.upstream.api_base_url.clone(),
    ));
    info!("Remote API clients initialized successfully");

    // Exchange rate cache, refreshed in the background when a live source is
    // configured; otherwise the configured rate is used as-is.
    let rates = match &config.currency.rate_endpoint {
        Some(endpoint) => {
            info!("Live exchange rate source: {}", endpoint);
            let source: Arc<dyn RateSource> =
                Arc::new(HttpRateSource::new(http_client.clone(), endpoint.clone()));
            let rates = Arc::new(ExchangeRates::with_source(
                config.currency.default_exchange_rate,
                source,
            ));
            let _refresh_task =
                Arc::clone(&rates).spawn_refresh_task(config.currency.rate_refresh_interval());
            rates
        }
        None => {
            info!(
                "No live rate source configured, using fixed rate {}",
                config.currency.default_exchange_rate
            );
            Arc::new(ExchangeRates::fixed(config.currency.default_exchange_rate))
        }
    };

    // Initialize services
    let cart_service = Arc::new(CartService::new(rates));
    let menu_service = Arc::new(MenuService::new(menu_api));
    let order_service = Arc::new(OrderService::new(order_api, cart_service.clone()));
    let dashboard_service = Arc::new(DashboardService::new(backoffice_api));
    info!("Services initialized successfully");

    // Build the application router
    let app = create_app(
        metrics,
        menu_service,
        cart_service,
        order_service,
        dashboard_service,
    );

    // Create socket address
    let addr = SocketAddr::new(config.server.host.parse()?, config.server.port);

    info!("Server listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;

    // Set up graceful shutdown
    let shutdown_signal = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install CTRL+C signal handler");
        info!("Shutdown signal received");
        shutdown_observability().await;
    };

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal)
        .await?;

    info!("Server shutdown complete");
    Ok(())
}
