//! Toll service runtime.
//!
//! [`build_toll_service`] turns an [`AppConfig`] into a ready [`TollService`];
//! [`ServerHandle`] owns the HTTP server built around it and its graceful
//! shutdown.

use std::net::SocketAddr;
use std::sync::{Arc, OnceLock};

use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use crate::application::{RequestValidator, TollCalculator, TollService};
use crate::config::{AppConfig, ConfigError, LoggingConfig};
use crate::domain::{ExemptionPolicy, HolidayCalendar};
use crate::infrastructure::{
    load_fee_schedule, load_vehicle_types, CompositeHolidayCalendar, FixedHolidayCalendar,
    SwedishHolidayCalendar,
};
use crate::interfaces::http::modules::metrics::describe_metrics;
use crate::interfaces::http::create_api_router;
use crate::shared::shutdown::{ShutdownCoordinator, ShutdownSignal};

/// Load the configured tables once and assemble the toll service.
///
/// Missing or malformed data files do not fail here; they yield an empty fee
/// schedule or an unavailable vehicle-type table. Only an unknown reference
/// time zone is an error.
pub fn build_toll_service(config: &AppConfig) -> Result<TollService, ConfigError> {
    let zone = config.toll.reference_zone()?;

    let fee_schedule = Arc::new(load_fee_schedule(&config.toll.fee_schedule_path));
    let vehicle_types = Arc::new(load_vehicle_types(&config.toll.vehicle_types_path));

    let rules = config.calendar.rules();
    let mut calendar = CompositeHolidayCalendar::default().with(Arc::new(SwedishHolidayCalendar));
    if !config.calendar.extra_holidays.is_empty() {
        calendar = calendar.with(Arc::new(FixedHolidayCalendar::new(
            rules.jurisdiction.clone(),
            config.calendar.extra_holidays.iter().copied(),
        )));
    }
    let calendar: Arc<dyn HolidayCalendar> = Arc::new(calendar);

    info!(
        fee_ranges = fee_schedule.len(),
        vehicle_types = vehicle_types.entries().len(),
        jurisdiction = %rules.jurisdiction,
        daily_cap = config.toll.daily_cap,
        time_zone = %zone,
        "Toll tables loaded"
    );

    let policy = Arc::new(ExemptionPolicy::new(vehicle_types.clone(), calendar, rules));
    let calculator =
        TollCalculator::new(fee_schedule, policy).with_daily_cap(config.toll.daily_cap);

    Ok(TollService::new(
        RequestValidator::new(vehicle_types, zone),
        calculator,
        config.toll.currency.clone(),
        zone,
    ))
}

/// The global recorder can only be installed once per process; later starts
/// reuse the first handle.
fn prometheus_handle() -> Result<PrometheusHandle, Box<dyn std::error::Error>> {
    static PROM_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

    if let Some(handle) = PROM_HANDLE.get() {
        return Ok(handle.clone());
    }
    let handle = PrometheusBuilder::new().install_recorder()?;
    describe_metrics();
    info!("📊 Prometheus metrics recorder installed");
    Ok(PROM_HANDLE.get_or_init(|| handle).clone())
}

/// Handle to a running toll service.
///
/// ```rust,no_run
/// use toll_calculator::server::ServerHandle;
/// use toll_calculator::AppConfig;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let handle = ServerHandle::start(AppConfig::default()).await?;
///     handle.install_signal_handler();
///     handle.wait().await;
///     Ok(())
/// }
/// ```
pub struct ServerHandle {
    /// The configuration the server was started with.
    pub config: AppConfig,
    /// Address actually bound (port 0 resolves here).
    pub local_addr: SocketAddr,
    pub service: Arc<TollService>,

    shutdown: ShutdownCoordinator,
    api_task: JoinHandle<()>,
}

impl ServerHandle {
    pub async fn start(config: AppConfig) -> Result<Self, Box<dyn std::error::Error>> {
        info!("Starting toll service...");

        let prometheus_handle = prometheus_handle()?;
        let service = Arc::new(build_toll_service(&config)?);
        let router = create_api_router(service.clone(), prometheus_handle);

        let addr = format!("{}:{}", config.server.host, config.server.port);
        let listener = tokio::net::TcpListener::bind(&addr).await?;
        let local_addr = listener.local_addr()?;
        info!("REST API server listening on http://{}", local_addr);
        info!("Swagger UI available at http://{}/docs/", local_addr);

        let shutdown = ShutdownCoordinator::new(config.server.shutdown_timeout);
        let api_shutdown = shutdown.signal();
        let api_server = axum::serve(listener, router).with_graceful_shutdown(async move {
            api_shutdown.wait().await;
            info!("🛑 REST API server received shutdown signal");
        });

        let api_task = tokio::spawn(async move {
            if let Err(e) = api_server.await {
                error!("REST API server error: {}", e);
            }
        });

        info!("🚀 Toll service started");

        Ok(Self {
            config,
            local_addr,
            service,
            shutdown,
            api_task,
        })
    }

    pub fn shutdown_signal(&self) -> ShutdownSignal {
        self.shutdown.signal()
    }

    /// Install OS signal listeners (SIGTERM, SIGINT) that trigger shutdown.
    pub fn install_signal_handler(&self) {
        self.shutdown.start_signal_listener();
    }

    pub fn trigger_shutdown(&self) {
        self.shutdown.signal().trigger();
    }

    /// Wait until the server stops, either on its own or after shutdown was
    /// triggered, in which case in-flight requests get `shutdown_timeout`.
    pub async fn wait(self) {
        let Self {
            shutdown,
            mut api_task,
            ..
        } = self;
        let signal = shutdown.signal();

        tokio::select! {
            result = &mut api_task => {
                report_api_task(result);
                return;
            }
            _ = signal.wait() => {}
        }

        let drained = shutdown
            .drain(async {
                report_api_task((&mut api_task).await);
            })
            .await;
        if !drained {
            warn!("Aborting REST API server with requests still in flight");
            api_task.abort();
        }

        info!("👋 Toll service shutdown complete");
    }

    /// Trigger shutdown and wait for completion.
    pub async fn shutdown(self) {
        info!("🛑 Shutting down toll service...");
        self.trigger_shutdown();
        self.wait().await;
    }

    pub fn is_running(&self) -> bool {
        !self.api_task.is_finished()
    }
}

fn report_api_task(result: Result<(), tokio::task::JoinError>) {
    match result {
        Ok(()) => info!("REST API server stopped"),
        Err(e) => error!("REST API server task failed: {}", e),
    }
}

/// Initialize tracing from the logging config. `RUST_LOG` takes precedence.
///
/// Call this once at process startup (before [`ServerHandle::start`]).
pub fn init_tracing(config: &LoggingConfig) {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;
    use tracing_subscriber::{fmt, EnvFilter};

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(env_filter);

    if config.format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(true))
            .init();
    } else {
        registry.with(fmt::layer()).init();
    }
}
