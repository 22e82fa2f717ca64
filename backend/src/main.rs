use std::net::SocketAddr;
use std::sync::Arc;

use axum::http::{HeaderValue, Method};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;
use tracing_subscriber::EnvFilter;

use salon_booking_backend::config::SalonConfig;
use salon_booking_backend::domain::{
    BookingService, FlowService, IdentityService, ServiceCatalog, SlotService,
};
use salon_booking_backend::rest::{api_router, AppState};
use salon_booking_backend::storage::memory::{MemoryBookingStore, MemoryIdentity};
use salon_booking_backend::storage::traits::{BookingStore, IdentityProvider};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = SalonConfig::load("salon.yaml")?;
    let catalog = Arc::new(ServiceCatalog::load("services.yaml")?);
    info!(
        "Salon open {:02}:00-{:02}:00, {} services in catalog",
        config.open_hour,
        config.close_hour,
        catalog.services().len()
    );

    // Collaborator doubles; a production build wires hosted adapters here
    // instead. SALON_DEMO_MODE simulates the hosted store denying writes
    // through its access policy.
    let demo_mode = std::env::var("SALON_DEMO_MODE").is_ok_and(|v| v == "1");
    let store: Arc<dyn BookingStore> = if demo_mode {
        info!("Demo mode: bookings will be accepted but not stored");
        Arc::new(MemoryBookingStore::with_policy_rejection())
    } else {
        Arc::new(MemoryBookingStore::new())
    };
    let identity: Arc<dyn IdentityProvider> = Arc::new(MemoryIdentity::new());

    let slot_service = SlotService::new(config, catalog.clone());
    let state = AppState {
        catalog: catalog.clone(),
        store: store.clone(),
        slot_service: slot_service.clone(),
        flow_service: FlowService::new(store.clone(), slot_service, catalog),
        identity_service: IdentityService::new(identity),
        booking_service: BookingService::new(store),
    };

    // CORS setup to allow the frontend to make requests
    let cors = CorsLayer::new()
        .allow_origin("http://localhost:8080".parse::<HeaderValue>()?)
        .allow_methods([Method::GET, Method::POST, Method::DELETE])
        .allow_headers(Any);

    let app = Router::new()
        .nest("/api", api_router())
        .layer(cors)
        .with_state(state);

    let addr = SocketAddr::from(([127, 0, 0, 1], 3000));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Listening on {}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
