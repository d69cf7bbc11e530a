use apps::{AppError, AppProperties, AppResult};
use axum::Router;
use config::AppConfig;
use dotenv::dotenv;
use error_stack::ResultExt;
use error_stack::fmt::ColorMode;
use movies_core::MovieRepository;
use movies_routes::state::MovieAppState;
use repositories::mongodb::ConnectionDetails;
use repositories::mongodb::movies::MovieRepo;
use tracing::{debug, error, info, instrument, warn};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

mod config;

#[tokio::main]
async fn main() {
    match try_main().await {
        Ok(_) => info!("movie service shutting down"),
        Err(e) => {
            error!("movie service exited with error: {e:?}");
            std::process::exit(1);
        }
    }
}

fn init_logging() {
    error_stack::Report::set_color_mode(ColorMode::None);

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_env("MOVIES_LOG"))
        .init();
}

async fn try_main() -> AppResult<()> {
    init_logging();

    if let Err(e) = dotenv() {
        warn!("failed to load .env file: {e}");
    }

    let config = AppConfig::from_env().change_context(AppError)?;
    let routes = build_routes(&config).await?;

    apps::run(
        routes,
        AppProperties {
            name: "movie service",
            port: config.port,
        },
    )
    .await
}

async fn build_routes(config: &AppConfig) -> AppResult<Router> {
    let engine = MovieEngine::new(build_repo(config).await?);

    debug!("building routes..");
    let app_state = if config.metrics_enabled {
        MovieAppState::new_with_metrics(engine, config.operation_timeout)
            .change_context(AppError)?
    } else {
        MovieAppState::new_without_metrics(engine, config.operation_timeout)
    };

    Ok(movies_routes::routes::build(app_state)).inspect(|_| debug!("routes built"))
}

#[instrument(skip_all, fields(database = %config.database_name))]
async fn build_repo(config: &AppConfig) -> AppResult<MovieRepo> {
    debug!("initializing mongodb repository");
    MovieRepo::init(
        ConnectionDetails::Url(config.database_url.clone()),
        &config.database_name,
    )
    .await
    .change_context(AppError)
    .attach("could not reach the movie store")
}

#[derive(Debug, Clone)]
struct MovieEngine<T> {
    repo: T,
}

impl<T> MovieEngine<T> {
    fn new(repo: T) -> Self {
        Self { repo }
    }
}

impl<T> movies_core::MovieEngine for MovieEngine<T>
where
    T: MovieRepository + Clone + Send + Sync + 'static,
{
    type MovieId = T::MovieId;
    type Repo = T;

    fn repo(&self) -> Self::Repo {
        self.repo.clone()
    }
}
