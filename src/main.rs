#![allow(non_snake_case)]

mod client;
mod model;

#[cfg(feature = "server")]
use lotus::server;

fn main() {
    #[cfg(not(feature = "server"))]
    dioxus::launch(client::App);

    #[cfg(feature = "server")]
    dioxus::serve(|| async move {
        use dioxus_logger::tracing;

        use crate::server::{config::Config, router, startup};

        dotenvy::dotenv().ok();
        let config = match Config::from_env() {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Configuration error: {}", e);
                std::process::exit(1);
            }
        };

        let state = startup::build_app_state(&config)?;
        let session = startup::connect_to_session(&config).await?;

        tracing::info!(backend_url = %config.backend_url, "Starting server");

        let mut router = dioxus::server::router(client::App);
        let server_routes = router::routes().with_state(state).layer(session);
        router = router.merge(server_routes);

        Ok(router)
    })
}
