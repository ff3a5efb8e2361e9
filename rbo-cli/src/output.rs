//! Output formatting: terminal report and JSON.
use rbo_core::RboResult;
use serde::Serialize;

/// Everything reported for one comparison.
#[derive(Debug, Serialize)]
pub struct Report {
    #[serde(flatten)]
    pub result: RboResult,
    pub upper: f64,
    pub average_overlap: f64,
    pub p: f64,
    /// Depth actually evaluated (requested depth, or the shorter length).
    pub depth: usize,
    pub len_a: usize,
    pub len_b: usize,
}

/// Print the report as aligned text.
pub fn print_table(report: &Report) {
    println!("{}", render_table(report));
}

fn render_table(report: &Report) -> String {
    let rows = [
        ("RBO min (lower bound)", report.result.min),
        ("RBO res (residual)", report.result.res),
        ("RBO ext (extrapolated)", report.result.ext),
        ("RBO upper (min + res)", report.upper),
        ("Average overlap", report.average_overlap),
    ];
    let label_width = rows.iter().map(|(label, _)| label.len()).max().unwrap_or(0);

    let mut out = String::new();
    for (label, value) in rows {
        out.push_str(&format!("{label:<label_width$} | {value:.8}\n"));
    }
    out.push_str(&format!(
        "\np = {}, depth {} ({} vs {} ranks)",
        report.p, report.depth, report.len_a, report.len_b,
    ));
    out
}

/// Print the report as JSON.
pub fn print_json(report: &Report) {
    match serde_json::to_string_pretty(report) {
        Ok(json) => println!("{json}"),
        Err(e) => crate::bail(format!("Failed to serialize report: {e}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Report {
        let result = RboResult { min: 0.48919503, res: 0.47747164, ext: 0.96666667 };
        Report {
            result,
            upper: result.upper(),
            average_overlap: 0.8,
            p: 0.9,
            depth: 3,
            len_a: 3,
            len_b: 3,
        }
    }

    #[test]
    fn test_json_fields_are_flat() {
        let value = serde_json::to_value(sample()).unwrap();
        assert_eq!(value["min"], 0.48919503);
        assert_eq!(value["ext"], 0.96666667);
        assert_eq!(value["depth"], 3);
        assert!(value.get("result").is_none());
    }

    #[test]
    fn test_table_lists_every_estimate() {
        let table = render_table(&sample());
        assert!(table.contains("RBO min (lower bound)  | 0.48919503"), "table was:\n{table}");
        assert!(table.contains("0.96666667"));
        assert!(table.contains("depth 3 (3 vs 3 ranks)"));
    }
}
