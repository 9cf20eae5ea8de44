use std::sync::Arc;

use axum::{routing::get, Router};
use maud::{html, Markup, PreEscaped, DOCTYPE};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::{config::Config, data::DataStore};

use self::generate::generate;

mod generate;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<DataStore>,
    pub config: Arc<Config>,
}

pub fn router(app_state: AppState) -> Router {
    Router::new()
        .route("/", get(generate))
        .with_state(app_state)
        .layer(TraceLayer::new_for_http())
}

pub async fn web_server(config: Config, store: Arc<DataStore>) -> anyhow::Result<()> {
    let listener = TcpListener::bind(config.bind).await?;
    info!("listening on {}", config.bind);

    let app_state = AppState {
        store,
        config: Arc::new(config),
    };
    axum::serve(listener, router(app_state)).await?;
    Ok(())
}

const HIGHLIGHT_JS: &str = "https://cdnjs.cloudflare.com/ajax/libs/highlight.js/11.9.0";

fn layout(body: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html {
            head {
                meta charset="utf-8";
                title { "Template Generator" }
                link rel="stylesheet" href="https://cdn.simplecss.org/simple.css";
                link rel="stylesheet" href={(HIGHLIGHT_JS)"/styles/default.min.css"};
                script src={(HIGHLIGHT_JS)"/highlight.min.js"} {}
            }
            body {
                header {
                    h1 { "Template Generator" }
                    p {
                        "Web version of "
                        a href="https://github.com/online-judge-tools/template-generator" { "online-judge-tools/template-generator" }
                    }
                }
                main { (body) }
                script { (PreEscaped("hljs.highlightAll();")) }
            }
        }
    }
}
