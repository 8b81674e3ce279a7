use actix_cors::Cors;
use actix_web::middleware::Logger;
use actix_web::{web, App, HttpServer};
use sqlx::PgPool;

use goaltrack::auth::{AuthMiddleware, TokenService};
use goaltrack::config::Config;
use goaltrack::routes::{self, health};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::init();

    let config = Config::from_env();
    let pool = PgPool::connect(&config.database_url)
        .await
        .expect("Failed to connect to database");

    // Signing secret and admin allowlist are fixed here, once; nothing in
    // the request path reads the environment.
    let tokens = web::Data::new(TokenService::from_config(&config.auth));
    let auth_config = web::Data::new(config.auth.clone());

    log::info!("Starting goaltrack server at {}", config.server_url());
    let bind_addr = (config.server_host.clone(), config.server_port);

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(pool.clone()))
            .app_data(tokens.clone())
            .app_data(auth_config.clone())
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600),
            )
            .wrap(Logger::default())
            .service(health::health)
            .service(
                web::scope("/api")
                    .wrap(AuthMiddleware)
                    .configure(routes::config),
            )
    })
    .bind(bind_addr)?
    .run()
    .await
}
