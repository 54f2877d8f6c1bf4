// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2025 Daniel Negri
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.

use banknote_tally::command::help_text;
use banknote_tally::{Command, Mode, Report, ReportFormat, Session, TallyEvent};
use clap::Parser;
use crossbeam::channel::Receiver;
use csv::WriterBuilder;
use rust_decimal::Decimal;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::PathBuf;
use std::process;
use tracing_subscriber::EnvFilter;

/// Banknote Tally - Count banknotes into a running total
///
/// Reads commands from a file or stdin, one or more per line, and prints
/// the total after every change.
#[derive(Parser, Debug)]
#[command(name = "banknote-tally")]
#[command(about = "Tally banknotes and report how many of each make up the total", long_about = None)]
struct Args {
    /// Command script to read instead of stdin
    ///
    /// Example line: + 50 20 20 - 10 r
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Symbol printed in front of amounts
    #[arg(long, env = "TALLY_CURRENCY_SYMBOL", default_value = "€")]
    currency_symbol: String,

    /// Report output format (text or csv)
    #[arg(long, env = "TALLY_REPORT_FORMAT", default_value = "text")]
    report_format: ReportFormat,

    /// Log filter level, written to stderr
    #[arg(long, env = "TALLY_LOG", default_value = "warn")]
    log_level: String,
}

/// Rendering options taken from the command line.
#[derive(Debug, Clone)]
struct View {
    symbol: String,
    format: ReportFormat,
}

impl View {
    fn amount(&self, amount: Decimal) -> String {
        format!("{}{:.2}", self.symbol, amount)
    }

    /// Total and mode; negative totals get a trailing marker.
    fn status(&self, total: Decimal, mode: Mode) -> String {
        let status = format!("{} [{}]", self.amount(total), mode.symbol());
        if total < Decimal::ZERO {
            format!("{status} (below zero)")
        } else {
            status
        }
    }
}

fn main() {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(format!(
            "banknote_tally={level}",
            level = args.log_level
        )))
        .with_writer(io::stderr)
        .init();

    let reader: Box<dyn BufRead> = match &args.input {
        Some(path) => match File::open(path) {
            Ok(f) => Box::new(BufReader::new(f)),
            Err(e) => {
                eprintln!("Error opening file '{}': {}", path.display(), e);
                process::exit(1);
            }
        },
        None => Box::new(io::stdin().lock()),
    };

    let view = View {
        symbol: args.currency_symbol,
        format: args.report_format,
    };

    let session = Session::new();
    if let Err(e) = run(&session, reader, io::stdout().lock(), &view) {
        eprintln!("Error writing output: {}", e);
        process::exit(1);
    }
    tracing::info!(total = %session.total(), "session ended");
}

/// Reads commands from `reader` until end of input or `quit`.
///
/// Unknown tokens are reported on `out` and skipped. State changes are
/// rendered from session events rather than by polling the session.
///
/// # Errors
///
/// Returns an error if reading input or writing output fails.
fn run<R: BufRead, W: Write>(
    session: &Session,
    reader: R,
    mut out: W,
    view: &View,
) -> Result<(), csv::Error> {
    let events = session.subscribe();

    writeln!(out, "{}", help_text())?;
    writeln!(out, "{}", view.status(session.total(), session.mode()))?;

    for line in reader.lines() {
        let line = line?;
        for parsed in Command::parse_line(&line) {
            let command = match parsed {
                Ok(command) => command,
                Err(e) => {
                    tracing::debug!("rejected input: {}", e);
                    writeln!(out, "error: {}", e)?;
                    continue;
                }
            };

            if command.execute(session) {
                render_events(&events, &mut out, view)?;
                continue;
            }

            match command {
                Command::Report => show_report(session, &mut out, view)?,
                Command::Help => writeln!(out, "{}", help_text())?,
                Command::Quit => return flush(out),
                Command::Apply(_) | Command::SetMode(_) | Command::Reset => {}
            }
        }
    }

    flush(out)
}

fn flush<W: Write>(mut out: W) -> Result<(), csv::Error> {
    out.flush()?;
    Ok(())
}

/// Prints one status line per pending event.
fn render_events<W: Write>(
    events: &Receiver<TallyEvent>,
    out: &mut W,
    view: &View,
) -> io::Result<()> {
    for event in events.try_iter() {
        match event {
            TallyEvent::Applied { mode, total, .. } => {
                writeln!(out, "{}", view.status(total, mode))?
            }
            TallyEvent::ModeChanged { mode } => writeln!(out, "mode: {}", mode)?,
            TallyEvent::Reset => writeln!(out, "{}", view.status(Decimal::ZERO, Mode::Add))?,
        }
    }
    Ok(())
}

/// Prints the report when the total is positive, a notice otherwise.
fn show_report<W: Write>(
    session: &Session,
    out: &mut W,
    view: &View,
) -> Result<(), csv::Error> {
    let Some(report) = session.gated_report() else {
        writeln!(out, "report unavailable: total must be positive")?;
        return Ok(());
    };

    match view.format {
        ReportFormat::Text => write_report_text(&report, out, view)?,
        ReportFormat::Csv => write_report_csv(&report, out)?,
    }
    Ok(())
}

/// Write a report as text lines.
///
/// # Example
///
/// ```text
/// Total: €30.00
/// €20   1×
/// €5    2×
/// ```
fn write_report_text<W: Write>(report: &Report, out: &mut W, view: &View) -> io::Result<()> {
    writeln!(out, "Total: {}", view.amount(report.total()))?;

    if report.is_empty() {
        writeln!(out, "No banknotes make up this total")?;
        return Ok(());
    }

    for line in report.lines() {
        let note = format!("{}{}", view.symbol, line.denomination);
        writeln!(out, "{:<6}{}×", note, line.count)?;
    }
    Ok(())
}

/// Write report lines to a CSV writer.
///
/// # CSV Format
///
/// Columns: `denomination, count`
///
/// ```csv
/// denomination,count
/// 20,1
/// 5,2
/// ```
///
/// # Errors
///
/// Returns a CSV error if writing fails.
fn write_report_csv<W: Write>(report: &Report, writer: W) -> Result<(), csv::Error> {
    // Header is written explicitly so an empty report still has one.
    let mut wtr = WriterBuilder::new().has_headers(false).from_writer(writer);
    wtr.write_record(["denomination", "count"])?;

    for line in report.lines() {
        wtr.serialize(line)?;
    }

    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use banknote_tally::{Denomination, build_report};
    use rust_decimal_macros::dec;
    use std::io::Cursor;

    fn text_view() -> View {
        View {
            symbol: "€".to_string(),
            format: ReportFormat::Text,
        }
    }

    fn run_script(script: &str, view: &View) -> (Session, String) {
        let session = Session::new();
        let mut output = Vec::new();
        run(&session, Cursor::new(script), &mut output, view).unwrap();
        (session, String::from_utf8(output).unwrap())
    }

    #[test]
    fn prints_total_after_each_note() {
        let (session, output) = run_script("10\n10 20\n", &text_view());

        assert_eq!(session.total(), dec!(40));
        assert!(output.contains("€10.00 [+]"));
        assert!(output.contains("€20.00 [+]"));
        assert!(output.contains("€40.00 [+]"));
    }

    #[test]
    fn subtract_mode_goes_negative() {
        let (session, output) = run_script("- 50\n", &text_view());

        assert_eq!(session.total(), dec!(-50));
        assert!(output.contains("mode: subtract"));
        assert!(output.contains("€-50.00 [-]"));
    }

    #[test]
    fn report_lists_largest_first() {
        let (_, output) = run_script("5 5 20 report\n", &text_view());

        assert!(output.contains("Total: €30.00"));
        let twenty = output.find("€20   1×").unwrap();
        let five = output.find("€5    2×").unwrap();
        assert!(twenty < five);
    }

    #[test]
    fn report_is_gated_at_non_positive_total() {
        let (_, output) = run_script("10 - 10 r\n", &text_view());

        assert!(output.contains("report unavailable: total must be positive"));
        assert!(!output.contains("Total:"));
    }

    #[test]
    fn reset_returns_to_zero_and_add_mode() {
        let (session, output) = run_script("- 100 ac\n", &text_view());

        assert_eq!(session.total(), Decimal::ZERO);
        assert_eq!(session.mode(), Mode::Add);
        assert!(output.trim_end().ends_with("€0.00 [+]"));
    }

    #[test]
    fn bad_tokens_are_reported_and_skipped() {
        let (session, output) = run_script("10 7 banana 20\n", &text_view());

        assert_eq!(session.total(), dec!(30));
        assert!(output.contains("error: unrecognized denomination: 7"));
        assert!(output.contains("error: unknown command: banana"));
    }

    #[test]
    fn quit_stops_processing() {
        let (session, _) = run_script("10\nq\n20\n", &text_view());
        assert_eq!(session.total(), dec!(10));
    }

    #[test]
    fn csv_report_format() {
        let view = View {
            symbol: "€".to_string(),
            format: ReportFormat::Csv,
        };
        let (_, output) = run_script("5 5 20 r\n", &view);

        assert!(output.contains("denomination,count\n20,1\n5,2\n"));
    }

    #[test]
    fn csv_empty_report_keeps_header() {
        let report = build_report(Default::default(), Decimal::ZERO);
        let mut output = Vec::new();
        write_report_csv(&report, &mut output).unwrap();

        assert_eq!(String::from_utf8(output).unwrap(), "denomination,count\n");
    }

    #[test]
    fn text_empty_report_shows_message() {
        let usage = [(Denomination(50), -1)].into_iter().collect();
        let report = build_report(usage, dec!(-50));
        let mut output = Vec::new();
        write_report_text(&report, &mut output, &text_view()).unwrap();

        let output = String::from_utf8(output).unwrap();
        assert!(output.contains("Total: €-50.00"));
        assert!(output.contains("No banknotes make up this total"));
    }

    #[test]
    fn negative_total_is_marked() {
        let (_, output) = run_script("- 20 + 50\n", &text_view());

        assert!(output.contains("€-20.00 [-] (below zero)"));
        assert!(output.contains("€30.00 [+]\n"));
        assert!(!output.contains("€30.00 [+] (below zero)"));
    }

    #[test]
    fn custom_currency_symbol() {
        let view = View {
            symbol: "$".to_string(),
            format: ReportFormat::Text,
        };
        assert_eq!(view.amount(dec!(12.5)), "$12.50");
        assert_eq!(view.status(dec!(0), Mode::Subtract), "$0.00 [-]");
    }
}
