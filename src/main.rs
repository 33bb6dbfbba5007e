use std::io;

use actix_web::{middleware::Logger, web, App, HttpServer};
use dotenv::dotenv;
use log::{error, info};

use group_registry::{app_config, cors};
use group_registry::config::{Config, StorageBackend};
use group_registry::models::TopicCatalog;
use group_registry::service::GroupService;
use group_registry::store::{GroupStore, MemoryGroupStore, MySqlGroupStore};

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::load().map_err(|e| {
        error!("Invalid configuration: {}", e);
        io::Error::new(io::ErrorKind::InvalidInput, e.to_string())
    })?;

    match &config.storage {
        StorageBackend::MySql { database_url, max_connections } => {
            let store = MySqlGroupStore::connect(database_url, *max_connections)
                .await
                .map_err(|e| {
                    error!("Failed to create pool: {}", e);
                    io::Error::other(e.to_string())
                })?;
            store.run_migrations().await.map_err(|e| {
                error!("Failed to run migrations: {}", e);
                io::Error::other(e.to_string())
            })?;
            serve(store, &config).await
        }
        StorageBackend::Memory => {
            info!("Using in-memory storage, groups are lost on shutdown");
            serve(MemoryGroupStore::new(), &config).await
        }
    }
}

async fn serve<S>(store: S, config: &Config) -> io::Result<()>
where
    S: GroupStore + Send + Sync + 'static,
{
    let service = web::Data::new(GroupService::new(store, TopicCatalog::default()));
    let client_url = config.client_url.clone();
    info!("Server running at http://{}", config.server_address);

    HttpServer::new(move || {
        App::new()
            .wrap(cors(client_url.as_deref()))
            .wrap(Logger::default())
            .configure(app_config(service.clone()))
    })
    .bind(&config.server_address)?
    .run()
    .await
}
