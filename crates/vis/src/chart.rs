mod axes;

use serde::Serialize;
use stromschau_production::series::AggregatedSeries;
use stromschau_production::summary::YearSummary;
use stromschau_production::window::FilterWindow;

pub(crate) use crate::chart::axes::AxisType;
pub(crate) use crate::chart::axes::TickFormat;

const PALETTE: [&str; 6] = [
    "#3498db", "#f1c40f", "#e74c3c", "#1abc9c", "#2ecc71", "#9b59b6",
];

/// The colour of the `index`-th source, cycling through a fixed palette.
pub(crate) fn color(index: usize) -> &'static str {
    PALETTE[index % PALETTE.len()]
}

/// A Plotly trace.
#[derive(Serialize, Debug)]
#[serde(untagged)]
pub(crate) enum Trace {
    Line(LineTrace),
    Pie(PieTrace),
}

#[derive(Serialize, Debug)]
pub(crate) struct LineTrace {
    #[serde(rename = "type")]
    kind: TraceKind,
    name: String,
    x: Vec<String>,
    y: Vec<f64>,
    mode: Mode,
    #[serde(rename = "stackgroup")]
    stack_group: &'static str,
    line: Line,
    #[serde(rename = "fillcolor")]
    fill_color: &'static str,
}

#[derive(Serialize, Debug)]
pub(crate) struct PieTrace {
    #[serde(rename = "type")]
    kind: TraceKind,
    name: String,
    labels: Vec<String>,
    values: Vec<f64>,
    hole: f64,
    marker: Marker,
    #[serde(rename = "textinfo")]
    text_info: &'static str,
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "lowercase")]
enum TraceKind {
    Scatter,
    Pie,
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "lowercase")]
enum Mode {
    Lines,
}

#[derive(Serialize, Debug)]
struct Line {
    color: &'static str,
    width: u32,
}

#[derive(Serialize, Debug)]
struct Marker {
    colors: Vec<&'static str>,
}

/// A Plotly layout.
#[derive(Serialize, Debug)]
pub(crate) struct Layout {
    title: String,
    #[serde(rename = "xaxis", skip_serializing_if = "Option::is_none")]
    x_axis: Option<Axis>,
    #[serde(rename = "yaxis", skip_serializing_if = "Option::is_none")]
    y_axis: Option<Axis>,
    #[serde(rename = "showlegend")]
    show_legend: bool,
    legend: Legend,
    #[serde(rename = "autosize")]
    auto_size: bool,
    #[serde(rename = "hovermode")]
    hover_mode: HoverMode,
}

#[derive(Serialize, Debug, Default)]
struct Axis {
    #[serde(rename = "type")]
    kind: AxisType,
    #[serde(rename = "tickvals", skip_serializing_if = "Vec::is_empty")]
    tick_values: Vec<String>,
    #[serde(rename = "ticktext", skip_serializing_if = "Vec::is_empty")]
    tick_text: Vec<String>,
    #[serde(rename = "tickangle")]
    tick_angle: i32,
    #[serde(rename = "showgrid")]
    show_grid: bool,
    title: String,
}

#[derive(Serialize, Debug)]
struct Legend {
    orientation: &'static str,
    y: f64,
}

impl Default for Legend {
    /// Above the plot area.
    fn default() -> Self {
        Self {
            orientation: "h",
            y: 1.15,
        }
    }
}

#[derive(Serialize, Debug)]
enum HoverMode {
    #[serde(rename = "x unified")]
    XUnified,
}

/// A chart ready to be embedded into the dashboard page.
#[derive(Serialize, Debug)]
pub(crate) struct Chart {
    pub(crate) id: &'static str,
    pub(crate) traces: Vec<Trace>,
    pub(crate) layout: Layout,
}

impl Chart {
    const PRODUCTION_ID: &str = "production";
    const SUMMARY_ID: &str = "summary";

    /// A stacked, filled line chart with one trace per source.
    pub(crate) fn production(series: &AggregatedSeries, window: FilterWindow) -> Chart {
        let x: Vec<String> = series.labels.iter().map(ToString::to_string).collect();

        let traces = series
            .series_by_source
            .iter()
            .enumerate()
            .map(|(idx, (source, values))| {
                Trace::Line(LineTrace {
                    kind: TraceKind::Scatter,
                    name: source.clone(),
                    x: x.clone(),
                    y: values.clone(),
                    mode: Mode::Lines,
                    stack_group: "production",
                    line: Line {
                        color: color(idx),
                        width: 1,
                    },
                    fill_color: color(idx),
                })
            })
            .collect();

        let tick_format = TickFormat::for_window(window);
        let (tick_values, tick_text): (Vec<String>, Vec<String>) = series
            .labels
            .iter()
            .map(|label| (label.to_string(), tick_format.format(label)))
            .filter(|(_, text)| !text.is_empty())
            .unzip();

        let layout = Layout {
            title: format!("Production ({window})"),
            x_axis: Some(Axis {
                kind: AxisType::Category,
                tick_values,
                tick_text,
                ..Axis::default()
            }),
            y_axis: Some(Axis {
                kind: AxisType::Linear,
                show_grid: true,
                title: String::from("GWh"),
                ..Axis::default()
            }),
            show_legend: true,
            legend: Legend::default(),
            auto_size: true,
            hover_mode: HoverMode::XUnified,
        };

        Chart {
            id: Self::PRODUCTION_ID,
            traces,
            layout,
        }
    }

    /// A donut chart of the per-source totals of a year.
    pub(crate) fn summary(summary: &YearSummary) -> Chart {
        let (labels, values): (Vec<String>, Vec<f64>) = summary
            .per_source_total
            .iter()
            .map(|(source, total)| (source.clone(), *total))
            .unzip();
        let colors = (0..labels.len()).map(color).collect();

        let trace = Trace::Pie(PieTrace {
            kind: TraceKind::Pie,
            name: summary.year.to_string(),
            labels,
            values,
            hole: 0.5,
            marker: Marker { colors },
            text_info: "label+percent",
        });

        let layout = Layout {
            title: format!("Production mix {}", summary.year),
            x_axis: None,
            y_axis: None,
            show_legend: true,
            legend: Legend::default(),
            auto_size: true,
            hover_mode: HoverMode::XUnified,
        };

        Chart {
            id: Self::SUMMARY_ID,
            traces: vec![trace],
            layout,
        }
    }
}
