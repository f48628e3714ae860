use clap::{Args, Parser, Subcommand, ValueEnum};
use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::process::ExitCode;
use thiserror::Error;

use qr_history::cli::{Config, ConfigError, LoggingError, init_logging};
use qr_history::history::{format_timestamp, read_logo, view};
use qr_history::{
    Contact, FjallStorage, HistoryError, HistoryStore, Kind, KindFilter, Payload, QrRecord,
    RecordId, Security, StorageError, Style, ValidationError, WifiCredentials,
};

#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Logging(#[from] LoggingError),

    #[error(transparent)]
    History(#[from] qr_history::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("No record with id '{0}'")]
    RecordNotFound(String),
}

impl From<HistoryError> for AppError {
    fn from(e: HistoryError) -> Self {
        Self::History(e.into())
    }
}

impl From<StorageError> for AppError {
    fn from(e: StorageError) -> Self {
        Self::History(e.into())
    }
}

impl From<ValidationError> for AppError {
    fn from(e: ValidationError) -> Self {
        Self::History(e.into())
    }
}

/// Record kinds accepted by `--kind`.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum KindArg {
    Url,
    Wifi,
    Contact,
    Text,
}

impl From<KindArg> for Kind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Url => Kind::Url,
            KindArg::Wifi => Kind::Wifi,
            KindArg::Contact => Kind::Contact,
            KindArg::Text => Kind::Text,
        }
    }
}

/// WiFi security modes accepted by `--security`.
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
enum SecurityArg {
    #[default]
    Wpa,
    Wep,
    #[value(alias = "none")]
    Nopass,
}

impl From<SecurityArg> for Security {
    fn from(security: SecurityArg) -> Self {
        match security {
            SecurityArg::Wpa => Security::Wpa,
            SecurityArg::Wep => Security::Wep,
            SecurityArg::Nopass => Security::NoPass,
        }
    }
}

/// Rendering hints saved with a new record.
#[derive(Args, Debug, Default)]
struct StyleArgs {
    /// Foreground (dot) color
    #[arg(long)]
    dot_color: Option<String>,

    /// Background color
    #[arg(long)]
    background_color: Option<String>,

    /// Logo image to overlay (PNG, JPEG, GIF, WebP, SVG; max 5 MiB)
    #[arg(long)]
    logo_file: Option<PathBuf>,

    /// Corner square color
    #[arg(long)]
    corner_square_color: Option<String>,

    /// Corner dot color
    #[arg(long)]
    corner_dot_color: Option<String>,
}

impl StyleArgs {
    fn into_style(self) -> qr_history::Result<Style> {
        let logo = self.logo_file.map(read_logo).transpose()?;
        Ok(Style {
            dot_color: Some(
                self.dot_color
                    .unwrap_or_else(|| Style::DEFAULT_DOT_COLOR.to_string()),
            ),
            background_color: Some(
                self.background_color
                    .unwrap_or_else(|| Style::DEFAULT_BACKGROUND_COLOR.to_string()),
            ),
            logo,
            corner_square_color: self.corner_square_color,
            corner_dot_color: self.corner_dot_color,
        })
    }
}

#[derive(Parser)]
#[command(name = "qr-history")]
#[command(about = "Record, list and manage the history of generated QR codes")]
struct Cli {
    /// Path to the configuration file
    #[arg(long, global = true, default_value = "qr-history.toml")]
    config: PathBuf,

    /// Store path (overrides the configuration file)
    #[arg(long, global = true, env = "QR_HISTORY_PATH")]
    path: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Save a URL code
    AddUrl {
        /// URL to encode
        url: String,

        #[command(flatten)]
        style: StyleArgs,
    },

    /// Save a free-text code
    AddText {
        /// Text to encode
        text: String,

        #[command(flatten)]
        style: StyleArgs,
    },

    /// Save a WiFi network code
    AddWifi {
        /// Network name
        #[arg(long)]
        ssid: String,

        /// Network password
        #[arg(long, default_value = "")]
        password: String,

        /// Security mode
        #[arg(long, value_enum, default_value_t = SecurityArg::Wpa)]
        security: SecurityArg,

        #[command(flatten)]
        style: StyleArgs,
    },

    /// Save a contact card code
    AddContact {
        /// Full name
        #[arg(long)]
        name: String,

        /// Phone number
        #[arg(long, default_value = "")]
        phone: String,

        /// Email address
        #[arg(long, default_value = "")]
        email: String,

        /// Organization name
        #[arg(long)]
        organization: Option<String>,

        #[command(flatten)]
        style: StyleArgs,
    },

    /// List saved codes, most recent first
    List {
        /// Only show codes of this kind
        #[arg(long, value_enum)]
        kind: Option<KindArg>,

        /// Page to show (1-based)
        #[arg(long, default_value_t = 1)]
        page: usize,

        /// Codes per page (overrides the configuration file)
        #[arg(long)]
        page_size: Option<NonZeroUsize>,
    },

    /// Show one saved code as JSON, with its QR content
    Show {
        /// Record id
        id: String,
    },

    /// Delete one saved code
    Remove {
        /// Record id
        id: String,
    },

    /// Delete all saved codes
    Clear,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(AppError::History(e)) if e.is_budget_exceeded() => {
            eprintln!("Storage warning: {}. Consider clearing some old items.", e);
            ExitCode::FAILURE
        }
        Err(AppError::History(e)) if e.is_storage() => {
            eprintln!("Error: {}. Check that the history store is writable.", e);
            ExitCode::FAILURE
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), AppError> {
    let config = Config::from_file_or_default(&cli.config)?;
    init_logging(&config.logging)?;

    let path = cli.path.unwrap_or(config.store.path);
    tracing::debug!(path = %path.display(), "opening history store");

    let storage = FjallStorage::open_or_init(&path)?;
    let mut store = HistoryStore::load(storage);
    if let Some(e) = store.load_error() {
        eprintln!("Warning: {} (starting with an empty history)", e);
    }

    match cli.command {
        Commands::AddUrl { url, style } => save(&mut store, Payload::Url(url), style),
        Commands::AddText { text, style } => save(&mut store, Payload::Text(text), style),
        Commands::AddWifi {
            ssid,
            password,
            security,
            style,
        } => save(
            &mut store,
            Payload::Wifi(WifiCredentials {
                ssid,
                password,
                security: security.into(),
            }),
            style,
        ),
        Commands::AddContact {
            name,
            phone,
            email,
            organization,
            style,
        } => save(
            &mut store,
            Payload::Contact(Contact {
                name,
                phone,
                email,
                organization,
            }),
            style,
        ),
        Commands::List {
            kind,
            page,
            page_size,
        } => {
            let filter = KindFilter::from(kind.map(Kind::from));
            let page_size = page_size.unwrap_or(config.history.page_size);
            print_list(store.list(), filter, page, page_size);
            Ok(())
        }
        Commands::Show { id } => {
            let record = store
                .get(&RecordId::from(id.as_str()))
                .ok_or(AppError::RecordNotFound(id))?;
            println!("{}", serde_json::to_string_pretty(record)?);
            println!("content: {}", record.content());
            Ok(())
        }
        Commands::Remove { id } => {
            match store.remove(&RecordId::from(id.as_str()))? {
                Some(record) => println!("Removed {}", record.title()),
                None => println!("No record with id '{}'", id),
            }
            Ok(())
        }
        Commands::Clear => {
            let count = store.len();
            store.clear()?;
            println!("Cleared {} records", count);
            Ok(())
        }
    }
}

fn save(
    store: &mut HistoryStore<FjallStorage>,
    payload: Payload,
    style: StyleArgs,
) -> Result<(), AppError> {
    let record = QrRecord::new(payload, Some(style.into_style()?));
    record.validate()?;

    let id = record.id().clone();
    let content = record.content();
    store.add(record)?;

    println!("Saved {}", id);
    println!("content: {}", content);
    Ok(())
}

fn print_list(records: &[QrRecord], filter: KindFilter, page: usize, page_size: NonZeroUsize) {
    for line in list_lines(records, filter, page, page_size) {
        println!("{}", line);
    }
}

fn list_lines(
    records: &[QrRecord],
    filter: KindFilter,
    page: usize,
    page_size: NonZeroUsize,
) -> Vec<String> {
    if records.is_empty() {
        return vec!["No QR codes generated yet".to_string()];
    }

    let counts = view::KindCounts::of(records);
    let mut lines = vec![format!(
        "All ({})  URLs ({})  WiFi ({})  Contacts ({})  Text ({})",
        counts.total, counts.url, counts.wifi, counts.contact, counts.text
    )];

    let page = view::paginate(records, filter, page, page_size);
    if page.items.is_empty() {
        lines.push("No matching QR codes".to_string());
    }
    lines.extend(page.items.iter().map(|record| {
        format!(
            "{}  {}  {}",
            record.id(),
            format_timestamp(&record.created_at()),
            record.title()
        )
    }));
    // An empty view still reads as one page
    lines.push(format!(
        "Page {} of {}",
        page.number,
        page.total_pages.max(1)
    ));
    lines
}
