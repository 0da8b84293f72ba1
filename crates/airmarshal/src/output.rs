//! Output formatting: CSV, table, JSON, YAML.
//!
//! CSV rows are written and flushed as each match arrives, with no header.
//! The other formats need the whole result set, so rows are buffered and
//! rendered once when the search finishes.

use std::io::{self, Write};

use tabled::{Table, Tabled, settings::Style};
use tracing::debug;

use meraki_core::{AppleTvMatch, ReportRow, SsidMatch};

use crate::cli::OutputFormat;
use crate::error::CliError;

// ── Table rows ───────────────────────────────────────────────────────

/// A report row that can be shown as a table line.
pub trait TableView {
    type Row: Tabled;

    fn to_row(&self) -> Self::Row;
}

#[derive(Tabled)]
pub struct SsidRow {
    #[tabled(rename = "Network")]
    network: String,
    #[tabled(rename = "SSID")]
    ssid: String,
}

impl TableView for SsidMatch {
    type Row = SsidRow;

    fn to_row(&self) -> SsidRow {
        SsidRow {
            network: self.network.clone(),
            ssid: self.ssid.clone(),
        }
    }
}

#[derive(Tabled)]
pub struct AppleTvRow {
    #[tabled(rename = "Network")]
    network: String,
    #[tabled(rename = "Device")]
    device: String,
    #[tabled(rename = "MAC")]
    mac: String,
    #[tabled(rename = "IP")]
    ip: String,
    #[tabled(rename = "Description")]
    description: String,
    #[tabled(rename = "DHCP Hostname")]
    dhcp_hostname: String,
    #[tabled(rename = "Reason")]
    reason: String,
}

impl TableView for AppleTvMatch {
    type Row = AppleTvRow;

    fn to_row(&self) -> AppleTvRow {
        AppleTvRow {
            network: self.network.clone(),
            device: self.device.clone(),
            mac: self.mac.clone(),
            ip: self.ip.clone(),
            description: self.description.clone(),
            dhcp_hostname: self.dhcp_hostname.clone(),
            reason: self.reason.to_string(),
        }
    }
}

// ── Reporter ─────────────────────────────────────────────────────────

enum Sink<T, W: Write> {
    Discard,
    Csv(csv::Writer<W>),
    Buffered {
        format: OutputFormat,
        out: W,
        rows: Vec<T>,
    },
}

/// Writes report rows to `W` in the selected format.
///
/// A reader that goes away mid-report (`| head`) closes the reporter
/// instead of failing it; later rows are counted and dropped.
pub struct Reporter<T, W: Write> {
    sink: Sink<T, W>,
    count: usize,
    closed: bool,
}

impl<T, W> Reporter<T, W>
where
    T: ReportRow + TableView,
    W: Write,
{
    pub fn new(format: OutputFormat, quiet: bool, out: W) -> Self {
        let sink = if quiet {
            Sink::Discard
        } else if format == OutputFormat::Csv {
            Sink::Csv(
                csv::WriterBuilder::new()
                    .has_headers(false)
                    .terminator(csv::Terminator::Any(b'\n'))
                    .from_writer(out),
            )
        } else {
            Sink::Buffered {
                format,
                out,
                rows: Vec::new(),
            }
        };
        Self {
            sink,
            count: 0,
            closed: false,
        }
    }

    /// Matches seen so far, whether or not they were printed.
    pub fn count(&self) -> usize {
        self.count
    }

    /// Whether the output went away and nothing more will be written.
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn push(&mut self, row: T) -> Result<(), CliError> {
        self.count += 1;
        let written = match &mut self.sink {
            Sink::Discard => Ok(()),
            Sink::Csv(writer) => write_csv_row(writer, &row),
            Sink::Buffered { rows, .. } => {
                rows.push(row);
                Ok(())
            }
        };
        match written {
            Err(err) if is_broken_pipe(&err) => {
                debug!("output closed, discarding remaining rows");
                self.sink = Sink::Discard;
                self.closed = true;
                Ok(())
            }
            other => other,
        }
    }

    /// Render anything buffered and flush.
    pub fn finish(self) -> Result<(), CliError> {
        let written = match self.sink {
            Sink::Discard => Ok(()),
            Sink::Csv(mut writer) => writer.flush().map_err(CliError::from),
            Sink::Buffered { format, out, rows } => write_rendered(format, &rows, out),
        };
        match written {
            Err(err) if is_broken_pipe(&err) => Ok(()),
            other => other,
        }
    }
}

fn write_csv_row<W: Write>(writer: &mut csv::Writer<W>, row: &impl ReportRow) -> Result<(), CliError> {
    writer.write_record(row.fields())?;
    writer.flush()?;
    Ok(())
}

fn write_rendered<T, W>(format: OutputFormat, rows: &[T], mut out: W) -> Result<(), CliError>
where
    T: ReportRow + TableView,
    W: Write,
{
    let rendered = render(format, rows)?;
    writeln!(out, "{}", rendered.trim_end_matches('\n'))?;
    out.flush()?;
    Ok(())
}

fn is_broken_pipe(err: &CliError) -> bool {
    match err {
        CliError::Io(e) => e.kind() == io::ErrorKind::BrokenPipe,
        CliError::Csv(e) => {
            matches!(e.kind(), csv::ErrorKind::Io(e) if e.kind() == io::ErrorKind::BrokenPipe)
        }
        _ => false,
    }
}

fn render<T>(format: OutputFormat, rows: &[T]) -> Result<String, CliError>
where
    T: ReportRow + TableView,
{
    Ok(match format {
        OutputFormat::Table => {
            let rows: Vec<T::Row> = rows.iter().map(TableView::to_row).collect();
            Table::new(rows).with(Style::rounded()).to_string()
        }
        OutputFormat::Json => serde_json::to_string_pretty(rows)?,
        OutputFormat::JsonCompact => serde_json::to_string(rows)?,
        OutputFormat::Yaml => serde_yaml::to_string(rows)?,
        // CSV never buffers; render it anyway so every format is total.
        OutputFormat::Csv => {
            let mut writer = csv::WriterBuilder::new()
                .has_headers(false)
                .terminator(csv::Terminator::Any(b'\n'))
                .from_writer(Vec::new());
            for row in rows {
                writer.write_record(row.fields())?;
            }
            let bytes = writer.into_inner().map_err(|e| e.into_error())?;
            String::from_utf8_lossy(&bytes).into_owned()
        }
    })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use meraki_core::MatchReason;

    use super::*;

    fn ssid(network: &str, ssid: &str) -> SsidMatch {
        SsidMatch {
            network: network.into(),
            ssid: ssid.into(),
        }
    }

    fn apple_tv() -> AppleTvMatch {
        AppleTvMatch {
            network: "HQ-WiFi".into(),
            device: "Lobby AP".into(),
            mac: "5c:f9:38:aa:bb:cc".into(),
            ip: "10.0.0.20".into(),
            description: "unknown".into(),
            dhcp_hostname: "atv".into(),
            reason: MatchReason::MacPrefix,
        }
    }

    fn run<T: ReportRow + TableView>(format: OutputFormat, quiet: bool, rows: Vec<T>) -> String {
        let mut buf = Vec::new();
        let mut reporter = Reporter::new(format, quiet, &mut buf);
        for row in rows {
            reporter.push(row).unwrap();
        }
        reporter.finish().unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn csv_has_no_header_and_one_line_per_match() {
        let out = run(
            OutputFormat::Csv,
            false,
            vec![ssid("HQ-WiFi", "CorpGuest"), ssid("HQ-WiFi", "evil-corpguest-clone")],
        );
        assert_eq!(out, "HQ-WiFi,CorpGuest\nHQ-WiFi,evil-corpguest-clone\n");
    }

    #[test]
    fn csv_quotes_fields_with_commas() {
        let out = run(OutputFormat::Csv, false, vec![ssid("HQ, Floor 2", "Guest")]);
        insta::assert_snapshot!(out, @r#""HQ, Floor 2",Guest"#);
    }

    #[test]
    fn csv_apple_tv_omits_reason() {
        let out = run(OutputFormat::Csv, false, vec![apple_tv()]);
        insta::assert_snapshot!(out, @"HQ-WiFi,Lobby AP,5c:f9:38:aa:bb:cc,10.0.0.20,unknown,atv");
    }

    #[test]
    fn hidden_ssid_is_an_empty_field() {
        let out = run(OutputFormat::Csv, false, vec![ssid("HQ-WiFi", "")]);
        assert_eq!(out, "HQ-WiFi,\n");
    }

    #[test]
    fn json_includes_reason() {
        let out = run(OutputFormat::JsonCompact, false, vec![apple_tv()]);
        insta::assert_snapshot!(out, @r#"[{"network":"HQ-WiFi","device":"Lobby AP","mac":"5c:f9:38:aa:bb:cc","ip":"10.0.0.20","description":"unknown","dhcp_hostname":"atv","reason":"mac-prefix"}]"#);
    }

    #[test]
    fn yaml_lists_rows() {
        let out = run(OutputFormat::Yaml, false, vec![ssid("HQ-WiFi", "CorpGuest")]);
        insta::assert_snapshot!(out, @r"
        - network: HQ-WiFi
          ssid: CorpGuest
        ");
    }

    #[test]
    fn table_has_headers_and_values() {
        let out = run(OutputFormat::Table, false, vec![apple_tv()]);
        assert!(out.contains("DHCP Hostname"), "got:\n{out}");
        assert!(out.contains("5c:f9:38:aa:bb:cc"), "got:\n{out}");
        assert!(out.contains("mac-prefix"), "got:\n{out}");
    }

    #[test]
    fn empty_json_is_an_empty_array() {
        let out = run::<SsidMatch>(OutputFormat::Json, false, vec![]);
        assert_eq!(out, "[]\n");
    }

    struct ClosedPipe;

    impl Write for ClosedPipe {
        fn write(&mut self, _: &[u8]) -> io::Result<usize> {
            Err(io::ErrorKind::BrokenPipe.into())
        }

        fn flush(&mut self) -> io::Result<()> {
            Err(io::ErrorKind::BrokenPipe.into())
        }
    }

    struct Unplugged;

    impl Write for Unplugged {
        fn write(&mut self, _: &[u8]) -> io::Result<usize> {
            Err(io::ErrorKind::PermissionDenied.into())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn csv_stops_quietly_when_reader_goes_away() {
        let mut reporter = Reporter::new(OutputFormat::Csv, false, ClosedPipe);
        reporter.push(ssid("HQ-WiFi", "CorpGuest")).unwrap();
        assert!(reporter.is_closed());
        reporter.push(ssid("HQ-WiFi", "Guest")).unwrap();
        assert_eq!(reporter.count(), 2);
        reporter.finish().unwrap();
    }

    #[test]
    fn buffered_output_tolerates_closed_reader() {
        let mut reporter = Reporter::new(OutputFormat::Json, false, ClosedPipe);
        reporter.push(apple_tv()).unwrap();
        assert!(!reporter.is_closed());
        reporter.finish().unwrap();
    }

    #[test]
    fn other_write_errors_still_fail() {
        let mut reporter = Reporter::new(OutputFormat::Csv, false, Unplugged);
        let err = reporter.push(ssid("HQ-WiFi", "CorpGuest")).unwrap_err();
        assert!(!is_broken_pipe(&err), "got {err:?}");
        assert!(!reporter.is_closed());
    }

    #[test]
    fn quiet_prints_nothing_but_still_counts() {
        let mut buf = Vec::new();
        let mut reporter = Reporter::new(OutputFormat::Csv, true, &mut buf);
        reporter.push(ssid("HQ-WiFi", "CorpGuest")).unwrap();
        assert_eq!(reporter.count(), 1);
        reporter.finish().unwrap();
        assert!(buf.is_empty());
    }
}
