use productos::{
    build_router,
    infrastructure::{config::Config, logger::Logger, snapshot::Snapshot},
    AppState,
};
use tokio::{net::TcpListener, signal};
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load();
    Logger::init(&config.logging.level);

    if let Err(e) = config.validate() {
        error!("配置无效: {}", e);
        return Err(e.into());
    }

    let snapshot = Snapshot::load_or_empty(&config.data.snapshot_path);
    let state = AppState::in_memory(snapshot.productos, &config.http.service_name);
    let app = build_router(state, &config);

    let listener = TcpListener::bind((config.http.host.as_str(), config.http.port)).await?;
    let addr = listener.local_addr()?;
    info!("🚀 Backend 监听端口 {} (http://{})", config.http.port, addr);
    info!("📖 API 端点:");
    info!("   GET    /api/health        - 健康检查");
    info!("   GET    /api/productos     - 商品列表 (q, categoria, provincia, _page, _limit, _sort, _order)");
    info!("   POST   /api/productos     - 创建商品");
    info!("   GET    /api/productos/:id - 获取商品");
    info!("   DELETE /api/productos/:id - 删除商品");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("服务已停止");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match signal::ctrl_c().await {
            Ok(()) => info!("收到 Ctrl+C，正在关闭"),
            Err(e) => {
                error!("无法监听 Ctrl+C: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("收到终止信号，正在关闭");
            }
            Err(e) => {
                error!("无法监听终止信号: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
