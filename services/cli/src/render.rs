use cvss_v3::batch::BatchRow;
use cvss_v3::config::OutputFormat;
use cvss_v3::scoring::{format_score, CalculationReport, MetricRegistry};
use serde::Serialize;

pub(crate) fn render_report(
    report: &CalculationReport,
    format: OutputFormat,
) -> Result<String, serde_json::Error> {
    if format == OutputFormat::Json {
        return to_json(report);
    }

    let mut out = String::new();
    out.push_str(&format!("CVSS v3.0 Vector: {}\n", report.vector));
    for (label, score) in report.display_lines() {
        out.push_str(&format!("{label:<26} {score}\n"));
    }
    out.push_str(&format!("{:<26} {}\n", "Severity", report.overall_severity));
    Ok(out)
}

pub(crate) fn render_batch(
    rows: &[BatchRow],
    format: OutputFormat,
) -> Result<String, serde_json::Error> {
    if format == OutputFormat::Json {
        return to_json(&rows);
    }

    let mut out = String::new();
    for row in rows {
        let label = row.id.as_deref().unwrap_or("-");
        match (&row.report, &row.error) {
            (Some(report), _) => out.push_str(&format!(
                "{:>4} | {} | {} | {} | {}\n",
                row.row,
                label,
                format_score(report.overall_score),
                report.overall_severity,
                report.vector
            )),
            (None, error) => out.push_str(&format!(
                "{:>4} | {} | error: {}\n",
                row.row,
                label,
                error.as_deref().unwrap_or("unknown")
            )),
        }
    }

    let scored = rows.iter().filter(|row| row.is_scored()).count();
    out.push_str(&format!("\n{scored}/{} vectors scored\n", rows.len()));
    Ok(out)
}

#[derive(Serialize)]
struct GroupCatalogue {
    group: &'static str,
    metrics: Vec<cvss_v3::scoring::MetricDefinition>,
}

pub(crate) fn render_metrics(
    registries: &[&'static MetricRegistry],
    format: OutputFormat,
) -> Result<String, serde_json::Error> {
    if format == OutputFormat::Json {
        let catalogue: Vec<GroupCatalogue> = registries
            .iter()
            .map(|registry| GroupCatalogue {
                group: registry.group().label(),
                metrics: registry.definitions(),
            })
            .collect();
        return to_json(&catalogue);
    }

    let mut out = String::new();
    for registry in registries {
        out.push_str(&format!("{} metrics\n", registry.group()));
        for definition in registry.definitions() {
            let options = definition
                .options
                .iter()
                .map(|option| format!("{}={}", option.title, option.value))
                .collect::<Vec<_>>()
                .join(", ");
            out.push_str(&format!("- {} ({}): {}\n", definition.name, definition.key, options));
        }
        out.push('\n');
    }
    Ok(out)
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String, serde_json::Error> {
    let mut rendered = serde_json::to_string_pretty(value)?;
    rendered.push('\n');
    Ok(rendered)
}
