use std::sync::Arc;

use actix_web::web;
use colored::Colorize;
use tracing::{error, info};

use crate::api;
use crate::infrastructure::config::{build_config, MaintenanceConfig};
use crate::infrastructure::telemetry::initialize_telemetry;
use crate::infrastructure::ServiceProvider;

pub fn run() {
    let runtime = match tokio::runtime::Builder::new_multi_thread().enable_all().build() {
        Ok(x) => x,
        Err(e) => {
            return eprintln!("{}: {}", "Cannot build runtime".red(), e);
        }
    };
    runtime.block_on(async_run());
}

pub async fn async_run() {
    let config = match build_config() {
        Ok(x) => x,
        Err(e) => {
            return eprintln!("{}: {}", "Cannot build config".red(), e);
        }
    };

    let config: MaintenanceConfig = match config.try_deserialize() {
        Ok(x) => x,
        Err(e) => {
            return eprintln!("{}: {}", "Cannot read config".red(), e);
        }
    };
    if let Err(e) = initialize_telemetry(&config.telemetry) {
        return eprintln!("{}: {}", "Cannot build logger".red(), e);
    };

    let service_provider = match ServiceProvider::build(config).await {
        Ok(x) => Arc::new(x),
        Err(e) => {
            return eprintln!("{}: {}", "Cannot build Service Provider".red(), e);
        }
    };

    tokio::select! {
        result = initialize_web_host(service_provider) => {
            match result {
                Ok(()) => info!("Web server stopped successfully."),
                Err(e) => error!("Web server stopped with error: {e}"),
            }
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Stopping services (ctrl-c handling).");
        }
    }
}

pub async fn initialize_web_host(sp: Arc<ServiceProvider>) -> anyhow::Result<()> {
    let host = sp.config.host.clone();
    info!("Listening on {}:{}", host.bind_address, host.bind_port);
    actix_web::HttpServer::new(move || {
        let cors = actix_cors::Cors::default()
            .allow_any_origin()
            .allow_any_header()
            .allow_any_method()
            .max_age(86400);

        actix_web::App::new()
            .wrap(tracing_actix_web::TracingLogger::default())
            .wrap(cors)
            .app_data(web::Data::from(sp.programming_service.clone()))
            .app_data(web::Data::from(sp.order_service.clone()))
            .configure(api::configure)
    })
    .bind((host.bind_address.to_owned(), host.bind_port))?
    .disable_signals()
    .run()
    .await?;
    Ok(())
}
