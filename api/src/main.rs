use actix_web::{middleware::Logger, web, App, HttpResponse, HttpServer};
use dotenvy::dotenv;
use log::info;
use std::sync::Arc;

use gx_core::services::entitlement::EntitlementService;
use gx_core::services::otp::cleanup::OtpCleanupService;
use gx_core::services::otp::service::OtpService;
use gx_core::services::otp::traits::SmsGateway;
use gx_infra::database::{DatabasePool, MySqlOtpRepository, MySqlPlanRepository};
use gx_infra::sms::create_sms_gateway;
use gx_shared::config::AppConfig;

use gx_api::routes::{self, AppState};

type OtpSvc = OtpService<MySqlOtpRepository, Box<dyn SmsGateway>>;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    info!("Starting GovExams API server");

    let config = AppConfig::from_env();
    info!(
        "Environment: {:?}, SMS provider: {}",
        config.environment, config.sms.provider
    );

    let pool = DatabasePool::new(&config.database)
        .await
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e.to_string()))?;

    let otp_repository = Arc::new(MySqlOtpRepository::new(pool.get_pool().clone()));
    let plan_repository = Arc::new(MySqlPlanRepository::new(pool.get_pool().clone()));

    // A misconfigured gateway is a startup failure, not a runtime surprise
    let gateway = create_sms_gateway(&config.sms)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e.to_string()))?;
    let gateway: Arc<Box<dyn SmsGateway>> = Arc::new(gateway);

    let otp_service: Arc<OtpSvc> = Arc::new(OtpService::new(
        otp_repository.clone(),
        gateway,
        config.otp.clone(),
        config.rate_limit.clone(),
    ));
    let entitlement_service = Arc::new(EntitlementService::new(plan_repository));

    // Fold any remaining legacy subject lists into exam_ids
    match entitlement_service.migrate_legacy_subjects().await {
        Ok(0) => {}
        Ok(n) => info!("Migrated legacy subjects on {} plan(s)", n),
        Err(e) => log::error!("Legacy subject migration failed: {}", e),
    }

    let cleanup = OtpCleanupService::new(otp_repository, config.otp.clone());
    tokio::spawn(cleanup.run_periodic());

    let bind_address = config.server.bind_address();
    info!("Server listening on {}", bind_address);

    let state = web::Data::new(AppState {
        otp_service,
        entitlement_service,
    });

    HttpServer::new(move || {
        let cors = gx_api::middleware::cors::create_cors();

        App::new()
            .wrap(Logger::default())
            .wrap(cors)
            .app_data(state.clone())
            .configure(
                routes::configure::<MySqlOtpRepository, Box<dyn SmsGateway>, MySqlPlanRepository>,
            )
            .default_service(web::route().to(|| async {
                HttpResponse::NotFound().json(serde_json::json!({
                    "error": "NOT_FOUND",
                    "message": "The requested resource was not found"
                }))
            }))
    })
    .bind(&bind_address)?
    .run()
    .await
}
