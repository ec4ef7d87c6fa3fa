use clap::{Parser, ValueEnum};
use color_eyre::Result;
use color_eyre::eyre::{WrapErr, eyre};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use datagrid::config::Config;
use datagrid::core::{ColumnConfigs, Dataset, PageSize};
use datagrid::grid::{GridViewModel, text_table};
use datagrid::logging::LogLevel;
use datagrid::tui::{App, KeyBindings};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use std::io;
use std::path::PathBuf;
use tracing::{debug, error, info};

/// Browse a JSON dataset as a searchable, sortable, paginated grid
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// JSON array of objects to load, or '-' for stdin
    #[arg(value_name = "PATH")]
    path: PathBuf,
    /// Path to a config file (overrides default config discovery)
    #[arg(long = "config", value_name = "PATH")]
    config: Option<PathBuf>,
    /// Enable file logging at the given level (overrides RUST_LOG)
    #[arg(long = "logging", value_enum)]
    logging: Option<LogLevel>,
    /// JSON file with per-column directives, layered over the config's columns
    #[arg(long = "columns", value_name = "PATH")]
    columns: Option<PathBuf>,
    /// Initial search text
    #[arg(long = "search", value_name = "TEXT")]
    search: Option<String>,
    /// Activate a column header; repeat to cycle asc -> desc -> unsorted
    #[arg(long = "sort", value_name = "COLUMN")]
    sort: Vec<String>,
    /// Page to show, 1-based
    #[arg(long = "page", value_name = "N", default_value_t = 1)]
    page: usize,
    /// Rows per page: 10, 25, 50 or 100
    #[arg(long = "page-size", value_name = "N")]
    page_size: Option<usize>,
    #[arg(long = "output", value_enum, default_value_t = Output::Table)]
    output: Output,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum Output {
    Table,
    Json,
    Tui,
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let args = Args::parse();
    datagrid::logging::init_with(None, args.logging.map(Into::into))?;

    let config = Config::from_path(args.config.as_deref()).wrap_err("failed to load config")?;
    let columns = match &args.columns {
        Some(path) => {
            let file = std::fs::File::open(path)
                .wrap_err_with(|| format!("failed to open {}", path.display()))?;
            let overlay: ColumnConfigs = serde_json::from_reader(io::BufReader::new(file))
                .wrap_err_with(|| format!("invalid column config {}", path.display()))?;
            config.columns.clone().merged(&overlay)
        }
        None => config.columns.clone(),
    };

    let dataset = if args.path.as_os_str() == "-" {
        Dataset::from_reader(io::stdin().lock())?
    } else {
        Dataset::from_path(&args.path)
            .wrap_err_with(|| format!("failed to load {}", args.path.display()))?
    };
    info!(
        "Loaded {} rows with columns {:?}",
        dataset.row_count(),
        dataset.columns()
    );

    let mut settings = config.grid.clone();
    if let Some(size) = args.page_size {
        settings.default_page_size = PageSize::try_from(size)?;
    }
    let mut model = GridViewModel::with_settings(dataset, columns, settings, config.render.clone());

    if let Some(search) = &args.search {
        model.set_search(search.as_str());
    }
    for column in &args.sort {
        if !model.dataset().has_column(column) {
            return Err(eyre!("unknown sort column '{column}'"));
        }
        model.set_sort(column);
    }
    if args.page == 0 {
        return Err(eyre!("--page is 1-based"));
    }
    model.set_page(args.page - 1);
    debug!("Initial state: {:?}", model.state());

    match args.output {
        Output::Table => println!("{}", text_table(model.view())),
        Output::Json => println!("{}", serde_json::to_string_pretty(model.view())?),
        Output::Tui => {
            let keybindings = KeyBindings::default().with_overrides(&config.keybindings);
            run_tui(App::new(model, keybindings))?;
        }
    }
    Ok(())
}

fn run_tui(mut app: App) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = app.run(&mut terminal);

    // Restore terminal
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    if let Err(e) = &res {
        error!("Error: {e}");
    }
    res
}
