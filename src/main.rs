use std::net::{IpAddr, Ipv4Addr, SocketAddr, UdpSocket};
use std::sync::Arc;

use tokio::net::TcpListener;

use phonoscreen::application::services::DetectionService;
use phonoscreen::infrastructure::detectors::DetectorFactory;
use phonoscreen::infrastructure::observability::{TracingConfig, init_tracing};
use phonoscreen::infrastructure::storage::LocalUploadStore;
use phonoscreen::presentation::{AppState, Settings, create_router};

/// Outbound-facing local IP. Connecting a UDP socket selects the routing
/// interface without sending any packets.
fn local_ip() -> IpAddr {
    UdpSocket::bind(("0.0.0.0", 0))
        .and_then(|socket| {
            socket.connect(("8.8.8.8", 80))?;
            socket.local_addr()
        })
        .map(|addr| addr.ip())
        .unwrap_or(IpAddr::V4(Ipv4Addr::LOCALHOST))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::from_env();

    init_tracing(TracingConfig::default(), settings.server.port);

    let registry = DetectorFactory::build_registry(&settings.models)?;
    let upload_store = Arc::new(LocalUploadStore::new(settings.upload.dir.clone())?);
    let detection_service = Arc::new(DetectionService::new(registry, upload_store));

    let state = AppState {
        detection_service,
        settings: settings.clone(),
    };
    let router = create_router(state);

    let ip = match settings.server.host.as_deref() {
        Some(host) => host.parse()?,
        None => local_ip(),
    };
    let addr = SocketAddr::new(ip, settings.server.port);
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
