use anyhow::{anyhow, Context, Result};
use chrono::{NaiveDate, TimeZone, Utc};
use clap::{Args, Parser, Subcommand};
use gallery::api::rest::dto::{AlbumsPageDto, ImagesPageDto, ListQueryDto};
use gallery::config::GalleryConfig;
use gallery::infra::storage::seed;
use gallery::Gallery;
use mimalloc::MiMalloc;
use paging_core::PaginationMode;
use runtime::{AppConfig, CliArgs, DatabaseConfig};
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;
use uuid::Uuid;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

const MODULE_NAME: &str = "gallery";
const MOCK_IMAGES: i64 = 25;

/// Idle timeout and max lifetime for in-memory pools (about a century).
const IN_MEMORY_KEEP_ALIVE: Duration = Duration::from_secs(100 * 365 * 24 * 60 * 60);

/// Owner of the data set loaded by `--mock`.
const MOCK_OWNER: Uuid = Uuid::from_u128(1);

/// Expand a sqlite DSN into an absolute-path DSN using a base directory.
/// - Keeps "sqlite::memory:" as-is.
/// - Normalizes backslashes into forward slashes (important on Windows).
fn absolutize_sqlite_dsn(dsn: &str, base_dir: &Path) -> Result<String> {
    if dsn.eq_ignore_ascii_case("sqlite::memory:") || dsn.eq_ignore_ascii_case("sqlite://:memory:")
    {
        return Ok("sqlite::memory:".to_string());
    }
    let db_path = dsn
        .strip_prefix("sqlite://")
        .ok_or_else(|| anyhow!("DSN must start with sqlite:// (got: {})", dsn))?;

    let (path_str, query) = match db_path.split_once('?') {
        Some((p, q)) => (p, Some(q)),
        None => (db_path, None),
    };

    let mut p = PathBuf::from(path_str);
    if p.as_os_str().is_empty() {
        return Err(anyhow!("Empty SQLite path in DSN"));
    }
    if p.is_relative() {
        p = base_dir.join(p);
    }
    if let Some(dir) = p.parent() {
        std::fs::create_dir_all(dir)?;
    }

    let mut out = String::from("sqlite://");
    out.push_str(&p.to_string_lossy().replace('\\', "/"));
    if let Some(q) = query {
        out.push('?');
        out.push_str(q);
    }
    Ok(out)
}

/// Gallery Server - paginated photo and album listings
#[derive(Parser)]
#[command(name = "gallery-server")]
#[command(about = "Gallery Server - paginated photo and album listings")]
#[command(version = "0.1.0")]
struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print current configuration and exit
    #[arg(long)]
    print_config: bool,

    /// Log verbosity level (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Use an in-memory database loaded with demo data
    #[arg(long)]
    mock: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Run,
    /// Check configuration
    Check,
    /// Print one page of an owner's images as JSON
    Images(ListArgs),
    /// Print one page of an owner's albums as JSON
    Albums(ListArgs),
}

#[derive(Args, Debug)]
struct ListArgs {
    /// Owner whose records are listed (defaults to the mock owner)
    #[arg(long)]
    owner: Option<Uuid>,

    /// offset | cursor
    #[arg(long, default_value = "offset")]
    pagination_type: PaginationMode,

    #[arg(long)]
    page: Option<i64>,

    #[arg(long)]
    limit: Option<i64>,

    #[arg(long)]
    next_cursor: Option<String>,

    #[arg(long, alias = "prev-cursor")]
    previous_cursor: Option<String>,

    #[arg(long)]
    album_id: Option<i64>,

    /// Inclusive start date (YYYY-MM-DD)
    #[arg(long)]
    from: Option<NaiveDate>,

    /// Inclusive end date (YYYY-MM-DD)
    #[arg(long)]
    to: Option<NaiveDate>,
}

impl ListArgs {
    fn to_query(&self) -> gallery::contract::ListQuery {
        let dto = ListQueryDto {
            pagination_type: Some(self.pagination_type),
            page: self.page,
            limit: self.limit,
            next_cursor: self.next_cursor.clone(),
            previous_cursor: self.previous_cursor.clone(),
            album_id: self.album_id,
            from: self.from,
            to: self.to,
        };
        dto.into_query(self.owner.unwrap_or(MOCK_OWNER))
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let args = CliArgs {
        config: cli.config.as_ref().map(|p| p.to_string_lossy().to_string()),
        print_config: cli.print_config,
        verbose: cli.verbose,
        mock: cli.mock,
    };

    // Load configuration (normalized home_dir is applied inside)
    let mut config = AppConfig::load_or_default(cli.config.as_deref())?;
    config.apply_cli_overrides(&args);

    let logging_config = config.logging.as_ref().cloned().unwrap_or_default();
    runtime::init_logging_from_config(&logging_config, Path::new(&config.home_dir));
    tracing::info!("Gallery Server starting");

    if cli.print_config {
        println!("{}", config.to_yaml()?);
        return Ok(());
    }

    let mut module_cfg: GalleryConfig = config.module_config(MODULE_NAME)?;
    if args.mock {
        module_cfg.bootstrap_schema = true;
    }

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => run_server(&config, module_cfg, &args).await,
        Commands::Check => check_config(&config, &module_cfg),
        Commands::Images(list) => {
            let gallery = open_gallery(&config, module_cfg, &args).await?;
            let page = gallery.service().list_images(&list.to_query()).await?;
            println!("{}", serde_json::to_string_pretty(&ImagesPageDto::from(page))?);
            Ok(())
        }
        Commands::Albums(list) => {
            let gallery = open_gallery(&config, module_cfg, &args).await?;
            let page = gallery.service().list_albums(&list.to_query()).await?;
            println!("{}", serde_json::to_string_pretty(&AlbumsPageDto::from(page))?);
            Ok(())
        }
    }
}

/// Pool settings for `dsn`. An in-memory database lives only as long as one of
/// its connections, so that pool always keeps a connection open.
fn connect_options(db_config: &DatabaseConfig, dsn: &str) -> ConnectOptions {
    let mut opts = ConnectOptions::new(dsn.to_owned());
    if let Some(max) = db_config.max_conns {
        opts.max_connections(max);
    }
    if let Some(ms) = db_config.connect_timeout_ms {
        opts.connect_timeout(Duration::from_millis(ms));
    }
    if dsn == "sqlite::memory:" {
        opts.min_connections(1)
            .idle_timeout(IN_MEMORY_KEEP_ALIVE)
            .max_lifetime(IN_MEMORY_KEEP_ALIVE);
    }
    opts.sqlx_logging(db_config.log_statements);
    opts
}

async fn connect(db_config: &DatabaseConfig, base_dir: &Path) -> Result<DatabaseConnection> {
    let raw = db_config.url.trim();
    if raw.is_empty() {
        return Err(anyhow!("Database URL not configured"));
    }
    let dsn = if raw.starts_with("sqlite:") {
        absolutize_sqlite_dsn(raw, base_dir)?
    } else {
        raw.to_owned()
    };

    let opts = connect_options(db_config, &dsn);
    tracing::info!("Connecting to database: {}", dsn);
    let db = Database::connect(opts)
        .await
        .with_context(|| format!("cannot connect to {dsn}"))?;
    tracing::info!("Connected DB backend: {:?}", db.get_database_backend());
    Ok(db)
}

async fn open_gallery(
    config: &AppConfig,
    module_cfg: GalleryConfig,
    args: &CliArgs,
) -> Result<Gallery> {
    let db_config = config
        .database
        .as_ref()
        .ok_or_else(|| anyhow!("No database configuration found"))?;
    let db = connect(db_config, Path::new(&config.home_dir)).await?;
    let gallery = Gallery::init(db.clone(), module_cfg).await?;

    if args.mock {
        let start = Utc
            .with_ymd_and_hms(2024, 1, 1, 0, 0, 0)
            .single()
            .ok_or_else(|| anyhow!("invalid demo start date"))?;
        seed::demo(&db, MOCK_OWNER, MOCK_IMAGES, start)
            .await
            .context("loading demo data failed")?;
        tracing::info!(
            owner = %MOCK_OWNER,
            images = MOCK_IMAGES,
            last_upload = %(start + chrono::Duration::days(MOCK_IMAGES - 1)),
            "Demo data loaded"
        );
    }
    Ok(gallery)
}

async fn run_server(config: &AppConfig, module_cfg: GalleryConfig, args: &CliArgs) -> Result<()> {
    tracing::info!("Initializing modules...");
    let addr: SocketAddr = module_cfg
        .bind_addr
        .parse()
        .with_context(|| format!("invalid bind address '{}'", module_cfg.bind_addr))?;

    let gallery = open_gallery(config, module_cfg, args).await?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("cannot bind {addr}"))?;
    tracing::info!("HTTP server listening on {}", addr);

    axum::serve(listener, gallery.router())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")?;

    tracing::info!("Gallery Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
    tracing::info!("Shutdown signal received");
}

fn check_config(config: &AppConfig, module_cfg: &GalleryConfig) -> Result<()> {
    tracing::info!("Checking configuration...");

    module_cfg
        .bind_addr
        .parse::<SocketAddr>()
        .with_context(|| format!("invalid bind address '{}'", module_cfg.bind_addr))?;
    if module_cfg.paging.default_limit == 0 || module_cfg.paging.max_limit == 0 {
        return Err(anyhow!("paging limits must be positive"));
    }
    match &config.database {
        Some(db) if !db.url.trim().is_empty() => {}
        _ => tracing::warn!("No database configuration found"),
    }

    tracing::info!("Configuration is valid");
    println!("Configuration check passed");
    println!("{}", config.to_yaml()?);
    Ok(())
}
