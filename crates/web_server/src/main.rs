//! Main entry point for the event booking backend server.
//! This crate provides REST API endpoints and serves the frontend application.

use std::path::Path;
use std::sync::Arc;

use actix_files::Files;
use actix_web::{App, HttpResponse, HttpServer, Result, middleware::Logger, web};
use booking_core::OrderGateway;
use order_services::OrderClient;
use postgres::database::*;
use web_handlers::*;

async fn api_hello() -> Result<HttpResponse> {
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "Hello from the event booking backend!",
        "status": "running"
    })))
}

fn get_frontend_path() -> &'static str {
    // Check multiple possible locations for frontend files
    if Path::new("./frontend-build").exists() {
        log::info!("✅ Using Docker frontend path: ./frontend-build");
        "./frontend-build"
    } else if Path::new("../frontend/build").exists() {
        log::info!("✅ Using local frontend path: ../frontend/build");
        "../frontend/build"
    } else {
        log::info!("❌ Frontend files not found in either location");
        "./frontend-build" // fallback
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize logger
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    log::info!("🚀 Starting event booking server...");

    // Create database connection pool
    let pool = match create_connection_pool().await {
        Ok(pool) => {
            log::info!("🗃️ Database pool created successfully");

            if let Err(e) = test_connection(&pool).await {
                log::error!("❌ Database connection test failed: {}", e);
            }
            pool
        }
        Err(e) => {
            log::error!("❌ Failed to create database pool: {}", e);
            log::error!("💡 Make sure PostgreSQL is running: brew services start postgresql@16");
            std::process::exit(1);
        }
    };

    // Create the order service gateway used at checkout
    let order_gateway: Arc<dyn OrderGateway> = match OrderClient::from_env() {
        Ok(client) => {
            log::info!("🧾 Order service client initialized successfully");
            Arc::new(client)
        }
        Err(e) => {
            log::error!("❌ Failed to initialize order service client: {}", e);
            log::warn!("🔧 Check ORDER_SERVICE_URL and ORDER_SERVICE_API_KEY");
            std::process::exit(1);
        }
    };

    let frontend_path = get_frontend_path();
    log::info!("📁 Frontend files location: {}", frontend_path);
    log::info!("🌐 Server will be available at: http://0.0.0.0:8080");

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(pool.clone()))
            .app_data(web::Data::from(order_gateway.clone()))
            .wrap(Logger::default())
            .service(
                web::scope("/api")
                    .route("/hello", web::get().to(api_hello))
                    // Shopper-facing availability views
                    .service(
                        web::scope("/campgrounds")
                            .route(
                                "/{campground_id}/availability",
                                web::get().to(get_campground_availability),
                            )
                            .route(
                                "/{campground_id}/occupancy-report",
                                web::get().to(get_occupancy_report),
                            ),
                    )
                    // Stay pricing
                    .service(
                        web::scope("/campsites")
                            .route("/{site_id}/quote", web::post().to(quote_stay)),
                    )
                    // Cart and checkout
                    .service(web::scope("/cart").route("/items", web::post().to(add_cart_item)))
                    .route("/checkout", web::post().to(checkout)),
            )
            .route(
                "/health",
                web::get().to(|| async { HttpResponse::Ok().body("OK") }),
            )
            .service(Files::new("/", frontend_path).index_file("index.html"))
    })
    .bind("0.0.0.0:8080")?
    .run()
    .await
}
