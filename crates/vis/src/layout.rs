//! The dashboard directory and the report that is rendered into it.

use std::fs;
use std::path::Path;
use std::path::PathBuf;

use stromschau_production::series::AggregatedSeries;
use stromschau_production::summary::YearSummary;
use stromschau_production::window::FilterWindow;
use tracing::info;

use crate::chart::Chart;
use crate::error::Result;
use crate::template::Context;
use crate::template::SummaryFigures;
use crate::template::TemplateEngine;

/// What a dashboard page shows: the series of one window and, optionally,
/// the summary of the selected year.
#[derive(Debug, Clone, Copy)]
pub struct Report<'a> {
    /// The selected time window.
    pub window: FilterWindow,
    /// The aggregated readings of the window.
    pub series: &'a AggregatedSeries,
    /// The summary of the selected year, if any.
    pub summary: Option<&'a YearSummary>,
}

/// The dashboard directory is structured as follows:
///
/// ./vis/index.html
///
/// The __index__ file is a self-contained page that loads Plotly and embeds
/// the chart specs.
pub struct DashboardLayout {
    index_file_path: PathBuf,
}

impl DashboardLayout {
    const MAIN_DIR_NAME: &str = "vis";
    const INDEX_FILE_NAME: &str = "index.html";
    const TITLE: &str = "Electricity production";

    /// Creates the dashboard directory under `path`. An existing directory is
    /// reused and its page overwritten.
    pub fn init(path: &Path) -> Result<DashboardLayout> {
        let root_path = path.join(Self::MAIN_DIR_NAME);
        let index_file_path = root_path.join(Self::INDEX_FILE_NAME);

        fs::create_dir_all(&root_path)?;

        Ok(Self { index_file_path })
    }

    /// The path of the dashboard page.
    pub fn index_file_path(&self) -> &Path {
        &self.index_file_path
    }

    /// Renders the report into the dashboard page.
    pub fn generate_report(&self, report: &Report<'_>) -> Result<()> {
        let context = Self::context(report)?;

        let template = TemplateEngine::new(&self.index_file_path);
        template.render(&context)?;

        info!(path = %self.index_file_path.display(), "dashboard written");
        Ok(())
    }

    fn context(report: &Report<'_>) -> Result<Context> {
        // An empty selection renders no chart rather than an empty one.
        let production = (!report.series.is_empty())
            .then(|| Chart::production(report.series, report.window));
        let summary_chart = report.summary.map(Chart::summary);

        let figures = report
            .summary
            .zip(summary_chart.as_ref())
            .map(|(summary, chart)| SummaryFigures {
                year: summary.year,
                renewable_percent: summary.renewable_percent,
                non_renewable_percent: summary.non_renewable_percent,
                unclassified: &summary.unclassified,
                chart,
            });

        Context::new(
            Self::TITLE.to_owned(),
            report.window.to_string(),
            production.as_ref(),
            figures,
        )
    }
}
