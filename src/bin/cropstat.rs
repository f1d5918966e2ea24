use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use cropstat_rs::format::format_number;
use cropstat_rs::viz::{ChartSpec, RenderOutcome};
use cropstat_rs::{AppState, DataType, storage, viz};
use std::io::Read;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(
    name = "cropstat",
    version,
    about = "Enter, paste, edit, export & chart crop statistics by year"
)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create a state file with the default (or example) table.
    Init(InitArgs),
    /// Merge tab-separated rows (stdin, file, or system clipboard) into the table.
    Paste(PasteArgs),
    /// Add or remove a crop column.
    Crop {
        #[command(subcommand)]
        action: CropAction,
    },
    /// Add or remove a year row.
    Year {
        #[command(subcommand)]
        action: YearAction,
    },
    /// Set a single cell; non-numeric text stores 0.
    Set(SetArgs),
    /// Write JSON and/or CSV exports using the standard file names.
    Export(ExportArgs),
    /// Render the chart to an .svg or .png file.
    Plot(PlotArgs),
    /// Print the table as tab-separated text.
    Show(StateArgs),
}

#[derive(Args, Debug)]
struct StateArgs {
    /// JSON state file (same layout as the JSON export).
    #[arg(short, long)]
    state: PathBuf,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum DataTypeArg {
    Production,
    Import,
    Consumption,
}

impl From<DataTypeArg> for DataType {
    fn from(v: DataTypeArg) -> Self {
        match v {
            DataTypeArg::Production => DataType::Production,
            DataTypeArg::Import => DataType::Import,
            DataTypeArg::Consumption => DataType::Consumption,
        }
    }
}

#[derive(Args, Debug)]
struct InitArgs {
    #[command(flatten)]
    state: StateArgs,
    /// Country name shown in titles and used in export file names.
    #[arg(long)]
    country: Option<String>,
    #[arg(long, value_enum)]
    data_type: Option<DataTypeArg>,
    /// Start from the bundled example figures instead of zeros.
    #[arg(long, default_value_t = false)]
    example: bool,
    /// Overwrite an existing state file.
    #[arg(long, default_value_t = false)]
    force: bool,
}

#[derive(Args, Debug)]
struct PasteArgs {
    #[command(flatten)]
    state: StateArgs,
    /// Read rows from this file instead of stdin.
    #[arg(long, conflicts_with = "clipboard")]
    input: Option<PathBuf>,
    /// Read rows from the system clipboard.
    #[arg(long, default_value_t = false)]
    clipboard: bool,
}

#[derive(Subcommand, Debug)]
enum CropAction {
    Add {
        name: String,
        #[command(flatten)]
        state: StateArgs,
    },
    Remove {
        name: String,
        #[command(flatten)]
        state: StateArgs,
    },
}

#[derive(Subcommand, Debug)]
enum YearAction {
    Add {
        year: i32,
        #[command(flatten)]
        state: StateArgs,
    },
    Remove {
        year: i32,
        #[command(flatten)]
        state: StateArgs,
    },
}

#[derive(Args, Debug)]
struct SetArgs {
    #[command(flatten)]
    state: StateArgs,
    #[arg(long)]
    year: i32,
    #[arg(long)]
    crop: String,
    /// Cell text, e.g. `1,234`.
    #[arg(long, allow_hyphen_values = true)]
    value: String,
}

#[derive(ValueEnum, Clone, Debug)]
enum OutFormat {
    Csv,
    Json,
}

#[derive(Args, Debug)]
struct ExportArgs {
    #[command(flatten)]
    state: StateArgs,
    /// Only write this format (default: both).
    #[arg(long, value_enum)]
    format: Option<OutFormat>,
    /// Directory for the exported files.
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,
}

#[derive(Args, Debug)]
struct PlotArgs {
    #[command(flatten)]
    state: StateArgs,
    /// Output path (.svg or .png).
    #[arg(long)]
    out: PathBuf,
    /// Width of the plot (default 1000).
    #[arg(long, default_value_t = 1000)]
    width: u32,
    /// Height of the plot (default 600).
    #[arg(long, default_value_t = 600)]
    height: u32,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    match cli.cmd {
        Command::Init(args) => cmd_init(args),
        Command::Paste(args) => cmd_paste(args),
        Command::Crop { action } => cmd_crop(action),
        Command::Year { action } => cmd_year(action),
        Command::Set(args) => cmd_set(args),
        Command::Export(args) => cmd_export(args),
        Command::Plot(args) => cmd_plot(args),
        Command::Show(args) => cmd_show(&args.state),
    }
}

fn load(path: &Path) -> Result<AppState> {
    storage::load_json(path)
}

fn store(state: &AppState, path: &Path) -> Result<()> {
    storage::save_json(state, path)
}

fn cmd_init(args: InitArgs) -> Result<()> {
    let path = &args.state.state;
    if path.exists() && !args.force {
        anyhow::bail!("{} already exists (use --force to overwrite)", path.display());
    }
    let mut state = AppState::default();
    if args.example {
        state = state.load_example();
    }
    if let Some(country) = &args.country {
        state = state.with_country(country);
    }
    if let Some(dt) = args.data_type {
        state = state.with_data_type(dt.into());
    }
    store(&state, path)?;
    eprintln!(
        "Created {} ({} years, {} crops)",
        path.display(),
        state.data.len(),
        state.crops.len()
    );
    Ok(())
}

fn read_clipboard() -> Result<String> {
    let mut clipboard = arboard::Clipboard::new().context("opening system clipboard")?;
    clipboard.get_text().context("reading clipboard text")
}

fn cmd_paste(args: PasteArgs) -> Result<()> {
    let path = &args.state.state;
    let state = load(path)?;
    let text = if args.clipboard {
        read_clipboard()?
    } else if let Some(input) = &args.input {
        std::fs::read_to_string(input).with_context(|| format!("reading {}", input.display()))?
    } else {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        buf
    };

    let (next, report) = state.paste(&text)?;
    store(&next, path)?;
    eprintln!(
        "Data successfully pasted: {} row(s) applied, {} skipped",
        report.rows_applied, report.rows_skipped
    );
    Ok(())
}

fn cmd_crop(action: CropAction) -> Result<()> {
    match action {
        CropAction::Add { name, state } => {
            let next = load(&state.state)?.add_crop(&name)?;
            store(&next, &state.state)?;
            eprintln!("Added {} to crops", name.trim());
        }
        CropAction::Remove { name, state } => {
            let next = load(&state.state)?.remove_crop(&name)?;
            store(&next, &state.state)?;
            eprintln!("Removed {name} from crops");
        }
    }
    Ok(())
}

fn cmd_year(action: YearAction) -> Result<()> {
    match action {
        YearAction::Add { year, state } => {
            let next = load(&state.state)?.add_year(year)?;
            store(&next, &state.state)?;
            eprintln!("Added year {year}");
        }
        YearAction::Remove { year, state } => {
            let current = load(&state.state)?;
            let next = current.remove_year(year);
            if next.data.len() == current.data.len() {
                eprintln!("Year {year} not present; nothing removed");
            } else {
                store(&next, &state.state)?;
                eprintln!("Removed year {year}");
            }
        }
    }
    Ok(())
}

fn cmd_set(args: SetArgs) -> Result<()> {
    let path = &args.state.state;
    let current = load(path)?;
    if !current.data.iter().any(|r| r.year == args.year) {
        anyhow::bail!("year {} is not in the table", args.year);
    }
    if !current.crops.contains(&args.crop) {
        anyhow::bail!("unknown crop: {}", args.crop);
    }
    let next = current.set_value(args.year, &args.crop, &args.value);
    store(&next, path)?;
    let stored = next
        .data
        .iter()
        .find(|r| r.year == args.year)
        .map(|r| r.get(&args.crop))
        .unwrap_or(0);
    eprintln!("{} {} = {}", args.year, args.crop, format_number(stored));
    Ok(())
}

fn cmd_export(args: ExportArgs) -> Result<()> {
    let state = load(&args.state.state)?;
    let (csv, json) = match args.format {
        Some(OutFormat::Csv) => (true, false),
        Some(OutFormat::Json) => (false, true),
        None => (true, true),
    };
    if json {
        let path = args
            .out_dir
            .join(storage::json_file_name(state.data_type, &state.country));
        storage::save_json(&state, &path)?;
        eprintln!("Saved {}", path.display());
    }
    if csv {
        let path = args
            .out_dir
            .join(storage::csv_file_name_today(state.data_type, &state.country));
        storage::save_csv(&state, &path)?;
        eprintln!("Saved {} rows to {}", state.data.len(), path.display());
    }
    Ok(())
}

fn cmd_plot(args: PlotArgs) -> Result<()> {
    let state = load(&args.state.state)?;
    let spec = ChartSpec::from_state(&state);
    match viz::plot_chart(&spec, &args.out, args.width, args.height)? {
        RenderOutcome::Rendered => eprintln!("Wrote plot to {}", args.out.display()),
        RenderOutcome::Empty => {
            eprintln!("No Data Available: add years or load example data to see the chart.")
        }
    }
    Ok(())
}

fn cmd_show(path: &Path) -> Result<()> {
    let state = load(path)?;
    println!("{}", state.heading());
    let mut header = vec!["Year".to_string()];
    header.extend(state.crops.iter().map(str::to_string));
    println!("{}", header.join("\t"));
    for rec in &state.data {
        let mut row = vec![rec.year.to_string()];
        row.extend(state.crops.iter().map(|c| format_number(rec.get(c))));
        println!("{}", row.join("\t"));
    }
    Ok(())
}
