use crate::server::config::ServerConfig;
use crate::server::database::Database;
use crate::server::router::create_router;
use crate::server::state::AppState;
use log::info;
use std::future::Future;
use std::sync::Arc;
use tokio::net::TcpListener;

pub struct Server {
    pub db: Arc<Database>,
    pub config: ServerConfig,
}

impl Server {
    /// Bind the configured address and serve until Ctrl-C or SIGTERM.
    pub async fn run(&self) -> anyhow::Result<()> {
        let listener = self.bind().await?;
        self.serve(listener, shutdown_signal()).await
    }

    pub async fn bind(&self) -> std::io::Result<TcpListener> {
        TcpListener::bind(self.config.bind_address()).await
    }

    /// Serve on an already bound listener until `shutdown` resolves.
    pub async fn serve<F>(&self, listener: TcpListener, shutdown: F) -> anyhow::Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let app = create_router(AppState::new(self.db.clone()));
        info!("[SERVER] Listening on http://{}", listener.local_addr()?);

        axum::serve(listener, app).with_graceful_shutdown(shutdown).await?;
        info!("[SERVER] Server exiting");
        Ok(())
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            log::error!("[SERVER] Unable to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                log::error!("[SERVER] Unable to listen for SIGTERM: {}", e);
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
    info!("[SERVER] Shutdown Server ...");
}
