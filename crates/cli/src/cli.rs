use std::env;
use std::path::PathBuf;

use chrono::NaiveDate;
use clap::Args;
use clap::Parser;
use clap::Subcommand;
use clap::ValueEnum;
use stromschau_production::window::FilterWindow;

use crate::error::CliError;

/// The Swissgrid production export published by the Swiss Federal Office of
/// Energy.
pub(crate) const DEFAULT_EXPORT_URL: &str =
    "https://www.uvek-gis.admin.ch/BFE/ogd/104/ogd104_stromproduktion_swissgrid.csv";
pub(crate) const DEFAULT_EXPORT_FILE_NAME: &str = "ogd104_stromproduktion_swissgrid.csv";

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub(crate) command: Commands,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Render the production of a time window into an HTML dashboard.
    View(ViewArgs),
    /// Print the renewable and non-renewable split of a year.
    Summary(SummaryArgs),
    /// List the years that have production data.
    Years(SourceArgs),
    /// Download the production export.
    Fetch(FetchArgs),
}

#[derive(Args)]
pub(crate) struct SourceArgs {
    /// Specify the path of the production CSV export.
    /// The path must exist and it must point to a file.
    #[arg(short, long, value_parser(parse_file_path))]
    pub(crate) path: PathBuf,

    /// Specify a JSON file that lists the renewable and non-renewable sources.
    /// If it is not specified the Swissgrid sources are used.
    #[arg(short, long, value_parser(parse_file_path))]
    pub(crate) classification: Option<PathBuf>,
}

#[derive(Args)]
pub(crate) struct ViewArgs {
    #[command(flatten)]
    pub(crate) source: SourceArgs,

    /// Specify the path where the dashboard will be created.
    /// If the output path is not specified then the current working
    /// directory is used.
    #[arg(short, long, value_parser(parse_dir_path))]
    pub(crate) output_path: Option<PathBuf>,

    /// Specify the time window to show.
    #[arg(short, long, value_enum, default_value_t = Window::RecentDay)]
    pub(crate) window: Window,

    /// Specify the year for the `year` window.
    #[arg(short, long)]
    pub(crate) year: Option<i32>,

    /// Specify the day that windows are relative to.
    /// If it is not specified then today is used.
    #[arg(short, long)]
    pub(crate) today: Option<NaiveDate>,
}

#[derive(Args)]
pub(crate) struct SummaryArgs {
    #[command(flatten)]
    pub(crate) source: SourceArgs,

    /// Specify the year to summarize.
    #[arg(short, long)]
    pub(crate) year: i32,

    /// Fail when a source is neither renewable nor non-renewable.
    #[arg(short, long)]
    pub(crate) strict: bool,
}

#[derive(Args)]
pub(crate) struct FetchArgs {
    /// Specify the URL of the production CSV export.
    #[arg(short, long, default_value = DEFAULT_EXPORT_URL)]
    pub(crate) url: String,

    /// Specify the path where the export will be stored.
    /// If the path is not specified then the export is stored in the
    /// current working directory.
    #[arg(short, long)]
    pub(crate) file: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub(crate) enum Window {
    RecentDay,
    CurrentMonth,
    LastMonth,
    Year,
    All,
}

impl Window {
    pub(crate) fn to_filter_window(self, year: Option<i32>) -> Result<FilterWindow, CliError> {
        let window = match self {
            Window::RecentDay => FilterWindow::RecentDay,
            Window::CurrentMonth => FilterWindow::CurrentMonth,
            Window::LastMonth => FilterWindow::LastMonth,
            Window::Year => FilterWindow::Year(year.ok_or(CliError::MissingYear)?),
            Window::All => FilterWindow::All,
        };

        Ok(window)
    }
}

fn parse_file_path(path: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(path);

    if !path.exists() {
        return Err(format!("The `{}` path does not exist.", path.display()));
    }

    if !path.is_file() {
        return Err(format!("The `{}` path must point to a file.", path.display()));
    }

    Ok(path)
}

fn parse_dir_path(path: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(path);

    if !path.exists() {
        return Err(format!("The `{}` path does not exist.", path.display()));
    }

    if !path.is_dir() {
        return Err(format!(
            "The `{}` path must point to a directory.",
            path.display()
        ));
    }

    Ok(path)
}

pub(crate) trait PathExt {
    fn or_current_dir(self) -> Result<PathBuf, CliError>;
}

impl PathExt for Option<PathBuf> {
    fn or_current_dir(self) -> Result<PathBuf, CliError> {
        if let Some(path) = self {
            Ok(path)
        } else {
            env::current_dir().map_err(|e| CliError::Path(e.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn year_window_requires_year() {
        assert_eq!(FilterWindow::Year(2022), Window::Year.to_filter_window(Some(2022)).unwrap());
        assert!(matches!(Window::Year.to_filter_window(None), Err(CliError::MissingYear)));
        assert_eq!(FilterWindow::All, Window::All.to_filter_window(None).unwrap());
    }

    #[test]
    fn fetch_defaults_to_swissgrid_export() {
        let cli = Cli::try_parse_from(["stromschau", "fetch"]).unwrap();

        match cli.command {
            Commands::Fetch(args) => {
                assert_eq!(DEFAULT_EXPORT_URL, args.url);
                assert!(args.file.is_none());
            }
            _ => panic!("expected the fetch command"),
        }
    }

    #[test]
    fn window_names_are_kebab_case() {
        let window = Window::from_str("last-month", false).unwrap();

        assert_eq!(Window::LastMonth, window);
    }
}
