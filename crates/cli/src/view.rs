use chrono::Local;
use chrono::NaiveDateTime;
use chrono::NaiveTime;
use stromschau_production::error::SummaryError;
use stromschau_production::window::FilterWindow;
use stromschau_vis::layout::DashboardLayout;
use stromschau_vis::layout::Report;
use tracing::info;

use crate::cli::PathExt;
use crate::cli::ViewArgs;
use crate::error::CliError;
use crate::load::open_session;

pub(crate) fn view(args: ViewArgs) -> Result<(), CliError> {
    let output_path = args.output_path.or_current_dir()?;
    let window = args.window.to_filter_window(args.year)?;
    let reference_now = args
        .today
        .map(|day| NaiveDateTime::new(day, NaiveTime::MIN))
        .unwrap_or_else(|| Local::now().naive_local());

    println!(
        "stromschau reads production data from: `{}` and generates a dashboard in: `{}`",
        args.source.path.display(),
        output_path.display()
    );

    let session = open_session(&args.source, false)?;
    let series = session.select(window, reference_now);

    // The year window additionally shows the renewable split. A year without
    // data shows no summary at all.
    let summary = match window {
        FilterWindow::Year(year) => match session.year_summary(year) {
            Ok(summary) => Some(summary),
            Err(SummaryError::NoData { year }) => {
                info!(year, "no production data to summarize");
                None
            }
            Err(error) => return Err(error.into()),
        },
        _ => None,
    };

    let report = Report {
        window,
        series: &series,
        summary: summary.as_ref(),
    };

    let layout = DashboardLayout::init(&output_path)?;
    layout.generate_report(&report)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::fs;
    use std::path::Path;
    use std::path::PathBuf;

    use chrono::NaiveDate;

    use crate::cli::SourceArgs;
    use crate::cli::Window;

    const EXPORT: &str = "\
Datum,Energietraeger,Produktion_GWh
2024-01-01,Wind,30
2024-01-01,Kernkraft,70
2024-01-02,Wind,12
";

    fn temp_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("stromschau-{name}-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn view_args(dir: &Path, window: Window, year: Option<i32>) -> ViewArgs {
        let path = dir.join("export.csv");
        fs::write(&path, EXPORT).unwrap();

        ViewArgs {
            source: SourceArgs {
                path,
                classification: None,
            },
            output_path: Some(dir.to_path_buf()),
            window,
            year,
            today: NaiveDate::from_ymd_opt(2024, 1, 4),
        }
    }

    fn page(dir: &Path) -> String {
        fs::read_to_string(dir.join("vis").join("index.html")).unwrap()
    }

    #[test]
    fn year_view_shows_production_and_summary() {
        let dir = temp_dir("view-year");

        view(view_args(&dir, Window::Year, Some(2024))).unwrap();

        let page = page(&dir);
        assert!(page.contains(r#"Plotly.newPlot("production""#));
        assert!(page.contains(r#"Plotly.newPlot("summary""#));
        assert!(page.contains("Renewable: 37.5 %"));
        assert!(page.contains("Non-renewable: 62.5 %"));

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn year_without_data_shows_neither_chart() {
        let dir = temp_dir("view-empty-year");

        view(view_args(&dir, Window::Year, Some(2019))).unwrap();

        let page = page(&dir);
        assert!(page.contains("No production data in the selected window."));
        assert!(!page.contains("Plotly.newPlot"));
        assert!(!page.contains("Renewable:"));

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn recent_day_is_relative_to_today() {
        let dir = temp_dir("view-recent-day");

        view(view_args(&dir, Window::RecentDay, None)).unwrap();

        let page = page(&dir);
        assert!(page.contains(r#""x":["2024-01-01","2024-01-01T01:00"]"#));
        assert!(!page.contains("2024-01-02"));
        assert!(!page.contains(r#"Plotly.newPlot("summary""#));

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn year_window_requires_a_year() {
        let dir = temp_dir("view-missing-year");

        let result = view(view_args(&dir, Window::Year, None));

        assert!(matches!(result, Err(CliError::MissingYear)));
        assert!(!dir.join("vis").exists());

        fs::remove_dir_all(&dir).unwrap();
    }
}
