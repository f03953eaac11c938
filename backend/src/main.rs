mod classifier;
mod config;
mod predict;
mod routes;

use actix_web::middleware::Logger;
use actix_web::{App, HttpServer, web};
use config::ServerConfig;
use routes::{configure_routes, cors};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = match ServerConfig::load() {
        Ok(config) => config,
        Err(e) => {
            log::error!("Failed to load configuration: {}", e);
            return Err(std::io::Error::new(std::io::ErrorKind::InvalidInput, e));
        }
    };

    let classifier = classifier::from_kind(config.classifier);
    log::info!("Using {:?} classifier", config.classifier);

    let bind_address = config.bind_address();
    let allowed_origins = config.allowed_origins.clone();
    log::info!("Starting server on {}", bind_address);

    let server = HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(cors(&allowed_origins))
            .app_data(web::Data::from(classifier.clone()))
            .configure(configure_routes)
    })
    .bind(&bind_address)
    .inspect_err(|e| log::error!("Failed to bind {}: {}", bind_address, e))?;

    log::info!("Server running on http://{}", bind_address);
    server.run().await
}
