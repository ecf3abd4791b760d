//! Process entry shared by the three service binaries.

use std::process::ExitCode;

use common::ServiceKind;
use configs::AppConfig;
use dotenvy::dotenv;
use tracing::{error, info};
use uuid::Uuid;

fn init_logging(kind: ServiceKind) {
    // .env first so RUST_LOG and LOG_FORMAT take effect
    dotenv().ok();
    common::utils::logging::init_logging_from_env();
    info!(service = %kind, event = "logger_init", "tracing subscriber initialized");
}

pub fn run_service(kind: ServiceKind) -> ExitCode {
    init_logging(kind);

    let service_id = Uuid::new_v4();
    let pid = std::process::id();
    let version = env!("CARGO_PKG_VERSION");

    std::panic::set_hook(Box::new(move |info| {
        error!(
            service = %kind,
            event = "panic",
            %service_id,
            pid,
            message = %info,
            "unhandled panic occurred"
        );
    }));

    let cfg = match AppConfig::load_for(kind.default_port()) {
        Ok(cfg) => cfg,
        Err(e) => {
            error!(service = %kind, event = "config_invalid", error = %e, "failed to load configuration");
            return ExitCode::FAILURE;
        }
    };
    let worker_threads = cfg.server.worker_threads.unwrap_or(configs::DEFAULT_WORKER_THREADS);

    let rt = match tokio::runtime::Builder::new_multi_thread()
        .worker_threads(worker_threads)
        .enable_all()
        .build()
    {
        Ok(rt) => rt,
        Err(e) => {
            error!(service = %kind, event = "runtime_build_failed", error = %e, "failed to build tokio runtime");
            return ExitCode::FAILURE;
        }
    };

    info!(
        service = %kind,
        event = "start",
        %service_id,
        pid,
        version,
        threads = worker_threads,
        "service starting"
    );

    match rt.block_on(crate::startup::run(kind, cfg)) {
        Ok(()) => {
            info!(service = %kind, event = "stop", %service_id, pid, "service stopped normally");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(service = %kind, event = "run_failed", %service_id, error = %format!("{e:#}"), "service exited with error");
            ExitCode::FAILURE
        }
    }
}
