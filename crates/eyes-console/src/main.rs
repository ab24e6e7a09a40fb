#![allow(non_snake_case)]

#[cfg(feature = "ssr")]
mod config {
    use eyes_types::BackendSettings;
    use serde::Deserialize;

    #[derive(Deserialize, Clone, Debug, Default)]
    #[serde(default)]
    pub struct Config {
        pub server: ServerConfig,
        pub backend: BackendConfig,
        pub session: SessionConfig,
    }

    #[derive(Deserialize, Clone, Debug)]
    #[serde(default)]
    pub struct ServerConfig {
        pub bind: String,
        pub port: u16,
    }

    impl Default for ServerConfig {
        fn default() -> Self {
            Self {
                bind: "0.0.0.0".into(),
                port: 3000,
            }
        }
    }

    #[derive(Deserialize, Clone, Debug)]
    #[serde(default)]
    pub struct BackendConfig {
        pub base_url: String,
        /// Send `Cache-Control: no-store` on every backend call.
        pub bypass_cache: bool,
    }

    impl Default for BackendConfig {
        fn default() -> Self {
            let settings = BackendSettings::default();
            Self {
                base_url: settings.base_url,
                bypass_cache: settings.bypass_cache,
            }
        }
    }

    #[derive(Deserialize, Clone, Debug, Default)]
    #[serde(default)]
    pub struct SessionConfig {
        pub secure_cookie: bool,
    }

    impl Config {
        pub fn backend_settings(&self) -> BackendSettings {
            BackendSettings {
                base_url: self.backend.base_url.trim_end_matches('/').to_string(),
                bypass_cache: self.backend.bypass_cache,
                secure_cookie: self.session.secure_cookie,
            }
        }
    }

    pub fn load(path: &str) -> Config {
        match std::fs::read_to_string(path) {
            Ok(contents) => match toml::from_str(&contents) {
                Ok(config) => config,
                Err(e) => {
                    tracing::warn!("failed to parse config {path}: {e}, using defaults");
                    Config::default()
                }
            },
            Err(e) => {
                tracing::warn!("failed to read config {path}: {e}, using defaults");
                Config::default()
            }
        }
    }

}

#[cfg(feature = "ssr")]
#[tokio::main]
async fn main() {
    use axum::Router;
    use eyes_api::middleware::access::{require_route_access, AppState};
    use eyes_client::CookieSettings;
    use eyes_ui::{shell, App};
    use leptos::prelude::*;
    use leptos_axum::{generate_route_list, LeptosRoutes};
    use tower_http::trace::TraceLayer;
    use tracing_subscriber::{fmt, EnvFilter};

    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args: Vec<String> = std::env::args().collect();
    let configPath = if let Some(idx) = args.iter().position(|a| a == "--config") {
        args.get(idx + 1)
            .cloned()
            .unwrap_or_else(|| "config.example.toml".into())
    } else {
        "config.example.toml".into()
    };

    let appConfig = config::load(&configPath);
    let backendSettings = appConfig.backend_settings();
    tracing::info!(
        "loaded config from {configPath}: bind={}:{} backend={}",
        appConfig.server.bind,
        appConfig.server.port,
        backendSettings.base_url
    );

    let appState = AppState {
        cookie: CookieSettings {
            secure: backendSettings.secure_cookie,
            ..CookieSettings::default()
        },
        backend: backendSettings.clone(),
    };

    let conf = get_configuration(None).expect("failed to load Leptos configuration");
    let leptosOptions = conf.leptos_options;
    let routes = generate_route_list(App);

    let apiRouter = eyes_api::api_router(appState.clone());
    let accessLayer = axum::middleware::from_fn_with_state(appState, require_route_access);

    // Server functions are registered here too, so they see the same context.
    let app = Router::new()
        .leptos_routes_with_context(
            &leptosOptions,
            routes,
            {
                let backendSettings = backendSettings.clone();
                move || provide_context(backendSettings.clone())
            },
            {
                let leptosOptions = leptosOptions.clone();
                move || shell(leptosOptions.clone())
            },
        )
        .fallback(leptos_axum::file_and_error_handler(shell))
        .with_state(leptosOptions)
        .merge(apiRouter)
        .layer(accessLayer)
        .layer(TraceLayer::new_for_http());

    let addr = format!("{}:{}", appConfig.server.bind, appConfig.server.port);
    tracing::info!("listening on {addr}");
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind to {addr}: {e}"));
    axum::serve(listener, app.into_make_service())
        .await
        .expect("server exited with error");
}

#[cfg(not(feature = "ssr"))]
fn main() {}
