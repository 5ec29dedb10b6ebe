//! Sudovisor reconcile loop runtime.

#![forbid(unsafe_code)]

use std::collections::HashMap;
use std::env;
use std::sync::Arc;
use std::time::Duration as StdDuration;

use chrono::{DateTime, Duration, Utc};
use sudovisor_application::{AccessRequestStore, Clock, ReconcileOutcome, ReconcileService};
use sudovisor_core::{AppError, AppResult};
use sudovisor_domain::ExpiryBounds;
use sudovisor_infrastructure::{
    PlatformAccessRequestStore, PlatformAccessReviewer, PlatformApi, PlatformApiConfig,
    PlatformGrantStore, SystemClock,
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone)]
struct ControllerConfig {
    platform_base_url: String,
    platform_token: String,
    poll_interval_ms: u64,
    resync_interval_secs: i64,
    retry_interval_secs: i64,
    default_duration_secs: i64,
    max_duration_secs: i64,
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = ControllerConfig::load()?;
    let http_client = reqwest::Client::builder()
        .timeout(StdDuration::from_secs(15))
        .build()
        .map_err(|error| AppError::Internal(format!("failed to build HTTP client: {error}")))?;

    let api = PlatformApi::new(
        http_client,
        PlatformApiConfig {
            base_url: config.platform_base_url.clone(),
            token: config.platform_token.clone(),
        },
    );
    let request_store = Arc::new(PlatformAccessRequestStore::new(api.clone()));
    let grant_store = Arc::new(PlatformGrantStore::new(api.clone()));
    let access_reviewer = Arc::new(PlatformAccessReviewer::new(api));
    let clock = Arc::new(SystemClock::new());
    let bounds = ExpiryBounds {
        default_duration: Duration::seconds(config.default_duration_secs),
        max_duration: Duration::seconds(config.max_duration_secs),
    };
    let reconciler = ReconcileService::new(
        request_store.clone(),
        grant_store,
        access_reviewer,
        clock.clone(),
        bounds,
    );

    info!(
        platform_base_url = %config.platform_base_url,
        poll_interval_ms = config.poll_interval_ms,
        resync_interval_secs = config.resync_interval_secs,
        default_duration_secs = config.default_duration_secs,
        max_duration_secs = config.max_duration_secs,
        "sudovisor-controller started"
    );

    run_reconcile_loop(&config, request_store, reconciler, clock).await
}

async fn run_reconcile_loop(
    config: &ControllerConfig,
    request_store: Arc<PlatformAccessRequestStore>,
    reconciler: ReconcileService,
    clock: Arc<SystemClock>,
) -> Result<(), AppError> {
    let mut next_runs: HashMap<String, DateTime<Utc>> = HashMap::new();

    loop {
        match request_store.list_requests().await {
            Ok(requests) => {
                let now = clock.now();
                next_runs.retain(|name, _| requests.iter().any(|request| request.name == *name));

                for request in requests {
                    let due = next_runs
                        .get(&request.name)
                        .is_none_or(|next_run| *next_run <= now);
                    if !due {
                        continue;
                    }

                    match reconciler.reconcile(&request.name).await {
                        Ok(outcome) => {
                            let next_run = match outcome {
                                ReconcileOutcome::Done => {
                                    now + Duration::seconds(config.resync_interval_secs)
                                }
                                ReconcileOutcome::Requeue => now + Duration::seconds(1),
                                ReconcileOutcome::RequeueAfter(delay) => {
                                    now + delay.max(Duration::zero())
                                }
                            };
                            next_runs.insert(request.name.clone(), next_run);
                            info!(
                                request = %request.name,
                                outcome = ?outcome,
                                "reconciled access request"
                            );
                        }
                        Err(error) => {
                            next_runs.insert(
                                request.name.clone(),
                                now + Duration::seconds(config.retry_interval_secs),
                            );
                            warn!(
                                request = %request.name,
                                error = %error,
                                "reconcile pass failed"
                            );
                        }
                    }
                }
            }
            Err(error) => {
                warn!(error = %error, "failed to list access requests");
            }
        }

        tokio::time::sleep(StdDuration::from_millis(config.poll_interval_ms)).await;
    }
}

impl ControllerConfig {
    fn load() -> AppResult<Self> {
        let platform_base_url = required_env("PLATFORM_API_BASE_URL")?
            .trim_end_matches('/')
            .to_owned();
        let platform_token = required_env("PLATFORM_API_TOKEN")?;
        let poll_interval_ms = parse_env_u64("CONTROLLER_POLL_INTERVAL_MS", 1000)?;
        let resync_interval_secs = parse_env_i64("CONTROLLER_RESYNC_INTERVAL_SECONDS", 300)?;
        let retry_interval_secs = parse_env_i64("CONTROLLER_RETRY_INTERVAL_SECONDS", 10)?;
        let default_duration_secs = parse_env_i64("GRANT_DEFAULT_DURATION_SECONDS", 600)?;
        let max_duration_secs = parse_env_i64("GRANT_MAX_DURATION_SECONDS", 3600)?;

        if poll_interval_ms == 0 {
            return Err(AppError::Validation(
                "CONTROLLER_POLL_INTERVAL_MS must be greater than zero".to_owned(),
            ));
        }

        for (name, value) in [
            ("CONTROLLER_RESYNC_INTERVAL_SECONDS", resync_interval_secs),
            ("CONTROLLER_RETRY_INTERVAL_SECONDS", retry_interval_secs),
            ("GRANT_DEFAULT_DURATION_SECONDS", default_duration_secs),
            ("GRANT_MAX_DURATION_SECONDS", max_duration_secs),
        ] {
            if value <= 0 {
                return Err(AppError::Validation(format!(
                    "{name} must be greater than zero"
                )));
            }
        }

        Ok(Self {
            platform_base_url,
            platform_token,
            poll_interval_ms,
            resync_interval_secs,
            retry_interval_secs,
            default_duration_secs,
            max_duration_secs,
        })
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .init();
}

fn required_env(name: &str) -> AppResult<String> {
    env::var(name).map_err(|_| AppError::Validation(format!("{name} is required")))
}

fn parse_env_u64(name: &str, default: u64) -> AppResult<u64> {
    match env::var(name) {
        Ok(value) => value.parse::<u64>().map_err(|error| {
            AppError::Validation(format!("invalid {name} value '{value}': {error}"))
        }),
        Err(_) => Ok(default),
    }
}

fn parse_env_i64(name: &str, default: i64) -> AppResult<i64> {
    match env::var(name) {
        Ok(value) => value.parse::<i64>().map_err(|error| {
            AppError::Validation(format!("invalid {name} value '{value}': {error}"))
        }),
        Err(_) => Ok(default),
    }
}
