use std::fs::File;
use std::io::Write;
use std::path::Path;

use serde::Serialize;
use tinytemplate::TinyTemplate;

use crate::chart::Chart;
use crate::error::Result;

const INDEX_TEMPLATE_NAME: &str = "index";
const INDEX_TEMPLATE: &str = include_str!("./template/index.html.tt");

pub(crate) struct TemplateEngine<'a> {
    index_file_path: &'a Path,
}

impl<'a> TemplateEngine<'a> {
    pub fn new(index_file_path: &'a Path) -> TemplateEngine<'a> {
        Self { index_file_path }
    }

    pub fn render(&self, context: &Context) -> Result<()> {
        let text = render_page(context)?;

        let mut file = File::create(self.index_file_path)?;
        file.write_all(text.as_bytes())?;
        file.flush()?;

        Ok(())
    }
}

pub(crate) fn render_page(context: &Context) -> Result<String> {
    let mut template = TinyTemplate::new();
    template.add_template(INDEX_TEMPLATE_NAME, INDEX_TEMPLATE)?;

    Ok(template.render(INDEX_TEMPLATE_NAME, context)?)
}

/// The values the page template is rendered with. Chart specs are embedded
/// as JSON.
#[derive(Serialize)]
pub(crate) struct Context {
    title: String,
    window: String,
    production: Option<ChartContext>,
    summary: Option<SummaryContext>,
}

#[derive(Serialize)]
struct ChartContext {
    id: &'static str,
    traces: String,
    layout: String,
}

impl ChartContext {
    fn new(chart: &Chart) -> Result<ChartContext> {
        Ok(Self {
            id: chart.id,
            traces: script_json(&chart.traces)?,
            layout: script_json(&chart.layout)?,
        })
    }
}

/// Serializes `value` for an inline `<script>`. Markup characters only occur
/// inside JSON strings, where their `\u` escapes decode to the same text.
fn script_json<T: Serialize>(value: &T) -> Result<String> {
    let json = serde_json::to_string(value)?;

    Ok(json
        .replace('<', "\\u003c")
        .replace('>', "\\u003e")
        .replace('&', "\\u0026"))
}

#[derive(Serialize)]
struct SummaryContext {
    year: i32,
    renewable_percent: String,
    non_renewable_percent: String,
    unclassified: Option<String>,
    chart: ChartContext,
}

/// A summary of a year in the form the page shows it.
pub(crate) struct SummaryFigures<'a> {
    pub(crate) year: i32,
    pub(crate) renewable_percent: f64,
    pub(crate) non_renewable_percent: f64,
    pub(crate) unclassified: &'a [String],
    pub(crate) chart: &'a Chart,
}

impl Context {
    pub fn new(
        title: String,
        window: String,
        production: Option<&Chart>,
        summary: Option<SummaryFigures<'_>>,
    ) -> Result<Context> {
        let production = production.map(ChartContext::new).transpose()?;
        let summary = summary
            .map(|figures| -> Result<SummaryContext> {
                Ok(SummaryContext {
                    year: figures.year,
                    renewable_percent: format!("{:.1}", figures.renewable_percent),
                    non_renewable_percent: format!("{:.1}", figures.non_renewable_percent),
                    unclassified: (!figures.unclassified.is_empty())
                        .then(|| figures.unclassified.join(", ")),
                    chart: ChartContext::new(figures.chart)?,
                })
            })
            .transpose()?;

        Ok(Self {
            title,
            window,
            production,
            summary,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn script_json_escapes_markup() {
        let json = script_json(&["</script>", "a & b"]).unwrap();

        assert_eq!(r#"["\u003c/script\u003e","a \u0026 b"]"#, json);

        let decoded: Vec<String> = serde_json::from_str(&json).unwrap();
        assert_eq!(vec!["</script>", "a & b"], decoded);
    }
}
