// src/main.rs

use axum::{
    middleware as axum_middleware,
    routing::{get, patch, post, put},
    Router,
};
use tokio::net::TcpListener;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod common;
mod config;
mod db;
mod docs;
mod handlers;
mod middleware;
mod models;
mod services;

use crate::config::AppState;
use crate::middleware::auth::auth_guard;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt().with_target(false).compact().init();

    // .expect() é bom aqui: se a configuração falhar, a aplicação não deve iniciar.
    let app_state = AppState::new()
        .await
        .expect("Falha ao inicializar o estado da aplicação.");

    sqlx::migrate!()
        .run(&app_state.db_pool)
        .await
        .expect("Falha ao rodar as migrações do banco de dados.");

    tracing::info!("✅ Migrações do banco de dados executadas com sucesso!");

    // Rotas públicas de autenticação
    let auth_routes = Router::new()
        .route("/register", post(handlers::auth::register))
        .route("/login", post(handlers::auth::login));

    // Usuários da agência (o /me é de qualquer autenticado; o resto é do
    // agency_admin, via extractor)
    let user_routes = Router::new()
        .route("/me", get(handlers::auth::get_me))
        .route(
            "/",
            post(handlers::users::create_agency_user).get(handlers::users::list_agency_users),
        )
        .route("/{id}", axum::routing::delete(handlers::users::deactivate_user))
        .route(
            "/{id}/permissions",
            put(handlers::users::set_user_permission).get(handlers::users::list_user_permissions),
        );

    // Painel da plataforma (super_admin via extractor)
    let admin_routes = Router::new()
        .route("/modules", get(handlers::admin::list_module_catalog))
        .route("/agencies", get(handlers::admin::list_agencies))
        .route(
            "/agencies/{id}/status",
            patch(handlers::admin::update_agency_status),
        )
        .route(
            "/agencies/{id}/subscription",
            put(handlers::admin::upsert_subscription),
        )
        .route(
            "/agencies/{id}/modules",
            get(handlers::admin::list_agency_modules),
        )
        .route(
            "/agencies/{id}/modules/{module}/enable",
            post(handlers::admin::enable_module),
        )
        .route(
            "/agencies/{id}/modules/{module}/disable",
            post(handlers::admin::disable_module),
        )
        .route(
            "/agencies/{id}/payment-records",
            get(handlers::admin::list_agency_payment_records),
        )
        .route("/agencies/{id}/debt", post(handlers::admin::generate_debt))
        .route(
            "/payment-records/generate",
            post(handlers::admin::generate_payment_records),
        )
        .route(
            "/payment-records/{id}",
            patch(handlers::admin::update_payment_record),
        );

    let stock_routes = Router::new()
        .route(
            "/vehicles",
            post(handlers::vehicles::create_vehicle).get(handlers::vehicles::list_vehicles),
        )
        .route(
            "/vehicles/{id}",
            get(handlers::vehicles::get_vehicle)
                .patch(handlers::vehicles::update_vehicle)
                .delete(handlers::vehicles::delete_vehicle),
        );

    let settings_routes = Router::new().route(
        "/stock",
        get(handlers::settings::get_stock_settings).put(handlers::settings::update_stock_settings),
    );

    let client_routes = Router::new()
        .route(
            "/",
            post(handlers::clients::create_client).get(handlers::clients::list_clients),
        )
        .route(
            "/{id}",
            get(handlers::clients::get_client)
                .patch(handlers::clients::update_client)
                .delete(handlers::clients::delete_client),
        );

    // /balance antes de /{id} para não colidir com o path param
    let cashflow_routes = Router::new()
        .route("/balance", get(handlers::cashflow::get_balance))
        .route(
            "/",
            post(handlers::cashflow::create_transaction)
                .get(handlers::cashflow::list_transactions),
        )
        .route(
            "/{id}",
            axum::routing::delete(handlers::cashflow::delete_transaction),
        );

    let financing_routes = Router::new()
        .route(
            "/",
            post(handlers::financing::create_financing).get(handlers::financing::list_financing),
        )
        .route(
            "/{id}",
            get(handlers::financing::get_financing).patch(handlers::financing::update_financing),
        );

    let inspection_routes = Router::new()
        .route(
            "/",
            post(handlers::inspections::create_inspection)
                .get(handlers::inspections::list_inspections),
        )
        .route(
            "/{id}",
            patch(handlers::inspections::update_inspection),
        );

    let invoice_routes = Router::new()
        .route(
            "/",
            post(handlers::invoices::create_invoice).get(handlers::invoices::list_invoices),
        )
        .route(
            "/{id}",
            get(handlers::invoices::get_invoice).patch(handlers::invoices::update_invoice),
        );

    // Tudo que não é /api/auth passa pelo auth_guard
    let protected_routes = Router::new()
        .nest("/api/users", user_routes)
        .nest("/api/admin", admin_routes)
        .nest("/api/stock", stock_routes)
        .nest("/api/settings", settings_routes)
        .nest("/api/clients", client_routes)
        .nest("/api/cashflow", cashflow_routes)
        .nest("/api/financing", financing_routes)
        .nest("/api/inspections", inspection_routes)
        .nest("/api/invoices", invoice_routes)
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let app = Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .nest("/api/auth", auth_routes)
        .merge(protected_routes)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", docs::ApiDoc::openapi()))
        .with_state(app_state);

    let addr = "0.0.0.0:3000";
    let listener = TcpListener::bind(addr)
        .await
        .expect("Falha ao iniciar o listener TCP");
    tracing::info!("🚀 Servidor escutando em {}", listener.local_addr().unwrap());
    axum::serve(listener, app)
        .await
        .expect("Erro no servidor Axum");
}
