use aula::logging::init_tracing;
use aula::router::init_router;
use aula::state::init_app_state;
use dotenvy::dotenv;

#[tokio::main]
async fn main() {
    dotenv().ok();

    init_tracing();

    let state = init_app_state().await;
    let bind_addr = state.http_config.bind_addr.clone();
    let app = init_router(state);

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .expect("Failed to bind server address");
    tracing::info!("Aula API listening on http://{bind_addr}");
    tracing::info!("Swagger UI available at http://{bind_addr}/swagger-ui");
    axum::serve(listener, app).await.expect("Server error");
}
