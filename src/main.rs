use actix_cors::Cors;
use actix_web::{App, HttpServer, middleware::Logger};
use anyhow::Result;

use leave_portal::database::init_database;
use leave_portal::middleware::RequestId;
use leave_portal::{AppState, Clock, Config, routes};

#[actix_web::main]
async fn main() -> Result<()> {
    // Load configuration (reads .env when present)
    let config = Config::from_env()?;

    env_logger::init();

    log::info!(
        "Starting leave portal (environment: {})",
        config.environment
    );

    let database = init_database(config.seed_data).await?;
    let state = AppState::new(config.clone(), database, Clock::System);

    let server_address = config.server_address();
    let client_base_url = config.client_base_url.clone();
    log::info!("Listening on http://{}", server_address);

    HttpServer::new(move || {
        let state = state.clone();

        App::new()
            .configure(|cfg| state.register(cfg))
            .wrap(
                Cors::default()
                    .allowed_origin(&client_base_url)
                    .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
                    .allowed_headers(vec![
                        "Authorization",
                        "Content-Type",
                        "Accept",
                        "X-Requested-With",
                        "X-Correlation-ID",
                    ])
                    .expose_headers(vec!["Content-Disposition", "X-Correlation-ID"])
                    .max_age(3600),
            )
            .wrap(RequestId)
            .wrap(Logger::new(
                r#"%a "%r" %s %b "%{Referer}i" "%{User-Agent}i" %T correlation_id=%{x-correlation-id}o"#,
            ))
            .configure(routes::configure)
    })
    .bind(&server_address)?
    .run()
    .await
    .map_err(|e| anyhow::anyhow!("Server error: {}", e))
}
