use actix_cors::Cors;
use actix_files::Files;
use actix_web::{middleware::Logger, web, App, HttpServer};
use gamedex_server::{config::Settings, db, http, metrics};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init();

    let settings = Settings::from_env();
    std::fs::create_dir_all(&settings.upload_dir)?;

    // Database: connect (creating the target database if needed), then run
    // the idempotent schema / seed step before accepting traffic.
    let db_pool = db::bootstrap::connect(&settings.database_url)
        .await
        .expect("Failed to connect to Postgres");
    db::bootstrap::prepare(&db_pool)
        .await
        .expect("Database bootstrap failed");

    log::info!("listening on {}", settings.server_addr);

    let server_addr = settings.server_addr.clone();
    let settings = web::Data::new(settings);
    let db_pool = web::Data::new(db_pool);

    HttpServer::new(move || {
        // Credentials ride on a cross-site cookie, so echo the caller's
        // origin instead of using a wildcard.
        let cors = Cors::default()
            .allowed_origin_fn(|_origin, _req_head| true)
            .allow_any_method()
            .allow_any_header()
            .supports_credentials();

        App::new()
            .wrap(Logger::default())
            .wrap(metrics::METRICS.clone())
            .wrap(cors)
            .app_data(db_pool.clone())
            .app_data(settings.clone())
            .configure(http::routes::init_routes)
            .service(Files::new("/static/uploads", settings.upload_dir.clone()))
    })
    .bind(&server_addr)?
    .run()
    .await
}
