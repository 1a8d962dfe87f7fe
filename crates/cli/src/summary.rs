use stromschau_production::summary::YearSummary;

use crate::cli::SourceArgs;
use crate::cli::SummaryArgs;
use crate::error::CliError;
use crate::load::open_session;

pub(crate) fn summary(args: SummaryArgs) -> Result<(), CliError> {
    let session = open_session(&args.source, args.strict)?;

    let summary = session.year_summary(args.year)?;
    print!("{}", format_summary(&summary));

    Ok(())
}

pub(crate) fn years(args: SourceArgs) -> Result<(), CliError> {
    let session = open_session(&args, false)?;

    for year in session.years() {
        println!("{year}");
    }

    Ok(())
}

fn format_summary(summary: &YearSummary) -> String {
    let shares = summary.per_source_percent();
    let width = summary
        .per_source_total
        .keys()
        .map(String::len)
        .max()
        .unwrap_or(0)
        .max("Non-renewable".len());

    let mut out = format!("Production {}\n", summary.year);
    for (source, total) in &summary.per_source_total {
        let share = shares.get(source).copied().unwrap_or(0.0);
        out.push_str(&format!("  {source:<width$}  {total:>12.2} GWh  {share:>5.1} %\n"));
    }

    out.push('\n');
    out.push_str(&format!(
        "  {:<width$}  {:>5.1} %\n",
        "Renewable", summary.renewable_percent
    ));
    out.push_str(&format!(
        "  {:<width$}  {:>5.1} %\n",
        "Non-renewable", summary.non_renewable_percent
    ));

    if !summary.unclassified.is_empty() {
        out.push_str(&format!(
            "  Unclassified: {}\n",
            summary.unclassified.join(", ")
        ));
    }

    out
}
