use std::{process, sync::Arc};

use blog_api::{
    application::{
        categories::CategoryService,
        error::AppError,
        pagination::PaginationPolicy,
        posts::{CategoryTotalScope, PostService},
        repos::{CategoriesRepo, CategoriesWriteRepo, HealthRepo, PostsRepo},
    },
    cache::{CacheConfig, CategoryListCache},
    config,
    infra::{
        db::PostgresRepositories,
        error::InfraError,
        http::{self, ApiState},
        telemetry,
    },
};
use tracing::{Dispatch, Level, dispatcher, error, info};
use tracing_subscriber::fmt as tracing_fmt;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        report_application_error(&error);
        process::exit(1);
    }
}

fn report_application_error(error: &AppError) {
    if dispatcher::has_been_set() {
        error!(error = %error, "application error");
        return;
    }

    let subscriber = tracing_fmt().with_max_level(Level::ERROR).finish();
    let dispatch = Dispatch::new(subscriber);
    dispatcher::with_default(&dispatch, || {
        error!(error = %error, "application error");
    });
}

async fn run() -> Result<(), AppError> {
    let (cli_args, settings) = config::load_with_cli()
        .map_err(|err| AppError::unexpected(format!("failed to load configuration: {err}")))?;

    let command = cli_args
        .command
        .unwrap_or(config::Command::Serve(Box::<config::ServeArgs>::default()));

    telemetry::init(&settings.logging).map_err(AppError::from)?;

    match command {
        config::Command::Serve(_) => run_serve(settings).await,
        config::Command::Migrate(_) => run_migrate(settings).await,
    }
}

async fn run_serve(settings: config::Settings) -> Result<(), AppError> {
    let repositories = init_repositories(&settings.database).await?;
    let state = build_api_state(repositories, &settings);
    let router = http::build_router(state);

    let listener = tokio::net::TcpListener::bind(settings.server.addr)
        .await
        .map_err(|err| AppError::from(InfraError::from(err)))?;
    info!(addr = %settings.server.addr, "blog api listening");

    axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|err| AppError::unexpected(format!("server error: {err}")))?;

    info!("blog api stopped");
    Ok(())
}

async fn run_migrate(settings: config::Settings) -> Result<(), AppError> {
    init_repositories(&settings.database).await?;
    info!("database migrations applied");
    Ok(())
}

async fn init_repositories(
    database: &config::DatabaseSettings,
) -> Result<Arc<PostgresRepositories>, AppError> {
    let database_url = database
        .url
        .as_ref()
        .ok_or_else(|| InfraError::configuration("database url is not configured"))?;

    let pool = PostgresRepositories::connect(database_url, database.max_connections.get())
        .await
        .map_err(InfraError::from)?;

    PostgresRepositories::run_migrations(&pool)
        .await
        .map_err(InfraError::from)?;

    Ok(Arc::new(PostgresRepositories::new(pool)))
}

fn build_api_state(repositories: Arc<PostgresRepositories>, settings: &config::Settings) -> ApiState {
    let categories_reader: Arc<dyn CategoriesRepo> = repositories.clone();
    let categories_writer: Arc<dyn CategoriesWriteRepo> = repositories.clone();
    let posts_reader: Arc<dyn PostsRepo> = repositories.clone();
    let health: Arc<dyn HealthRepo> = repositories;

    let cache = CategoryListCache::new(CacheConfig::from(&settings.cache));
    let categories = CategoryService::new(categories_reader, categories_writer, cache);
    let posts = PostService::new(
        posts_reader,
        CategoryTotalScope::from(settings.posts.filtered_category_total),
    );

    ApiState {
        categories: Arc::new(categories),
        posts: Arc::new(posts),
        health,
        pagination: PaginationPolicy::from(&settings.pagination),
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            error!(error = %err, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                error!(error = %err, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    info!("shutdown signal received");
}
