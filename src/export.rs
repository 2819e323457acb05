use crate::types::XYPoint;
use anyhow::Context as _;
use std::io::Write;
use std::path::Path;

/// Fraction digits used for every exported value (matches `%f`).
const EXPORT_DECIMALS: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableFormat {
    /// Comma-separated, used for file export.
    Csv,
    /// Tab-separated, used for the clipboard so spreadsheets split columns.
    Tsv,
}

impl TableFormat {
    const fn delimiter(self) -> u8 {
        match self {
            Self::Csv => b',',
            Self::Tsv => b'\t',
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Csv => "CSV",
            Self::Tsv => "TSV",
        }
    }
}

pub fn format_value(value: f64) -> String {
    format!("{value:.EXPORT_DECIMALS$}")
}

/// Render points as a table with an `x`/`y` header and one row per point.
///
/// Rows are joined by `\n` with no newline after the last one; a table with
/// no rows is just the header line.
pub fn table_to_string(points: &[XYPoint], format: TableFormat) -> anyhow::Result<String> {
    let mut wtr = csv::WriterBuilder::new()
        .delimiter(format.delimiter())
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());
    wtr.write_record(["x", "y"])?;
    for p in points {
        wtr.write_record([format_value(p.x), format_value(p.y)])?;
    }
    let mut buf = wtr.into_inner().map_err(|err| {
        anyhow::anyhow!("Failed to finish {} table: {}", format.label(), err.error())
    })?;
    if !points.is_empty() && buf.last() == Some(&b'\n') {
        buf.pop();
    }
    String::from_utf8(buf).context("Exported table is not valid UTF-8")
}

pub fn export_to_csv(path: &Path, points: &[XYPoint]) -> anyhow::Result<()> {
    let text = table_to_string(points, TableFormat::Csv)?;
    let mut file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    file.write_all(text.as_bytes())
        .with_context(|| format!("Failed to write {}", path.display()))?;
    tracing::info!(path = %path.display(), rows = points.len(), "exported samples");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_points() -> Vec<XYPoint> {
        vec![XYPoint::new(1.0, 2.5), XYPoint::new(-0.125, 1234.5678901)]
    }

    #[test]
    fn csv_has_header_and_fixed_decimals() {
        let text = table_to_string(&sample_points(), TableFormat::Csv).unwrap();
        assert_eq!(
            text,
            "x,y\n1.000000,2.500000\n-0.125000,1234.567890"
        );
    }

    #[test]
    fn tsv_uses_tabs() {
        let text = table_to_string(&sample_points(), TableFormat::Tsv).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("x\ty"));
        assert_eq!(lines.next(), Some("1.000000\t2.500000"));
        assert_eq!(lines.next(), Some("-0.125000\t1234.567890"));
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn empty_table_is_header_only() {
        let text = table_to_string(&[], TableFormat::Csv).unwrap();
        assert_eq!(text, "x,y\n");
    }

    #[test]
    fn export_writes_file() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("samples.csv");
        export_to_csv(&path, &sample_points()).expect("export");
        let written = std::fs::read_to_string(&path).expect("read back");
        assert_eq!(written, "x,y\n1.000000,2.500000\n-0.125000,1234.567890");
    }
}
