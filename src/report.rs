//! Report sinks for a finished decode.
//!
//! States print as `Z1..ZK` and symbols as `O1..OM`: 1-based labels exist
//! only here.

use std::io::Write;

use serde::Serialize;

use crate::engine::Decoding;
use crate::error::ReportError;
use crate::traits::{Problem, ReportSink};

const SCORES_TITLE: &str =
    "Probability on each Observation with State Z (row) vs Observations (column):";
const BACKPOINTERS_TITLE: &str =
    "Transition Z(t-1) -> Z(t) with Previous State Z (row) vs Time (column):";
const PATH_TITLE: &str = "Most probable path through the states for the observed sequence:";

/// Placeholder for a missing backpointer.
const NO_PREDECESSOR: &str = "-";

fn state_label(state: usize) -> String {
    format!("Z{}", state + 1)
}

fn symbol_label(symbol: usize) -> String {
    format!("O{}", symbol + 1)
}

fn path_line(path: &[usize]) -> String {
    path.iter()
        .map(|&z| state_label(z))
        .collect::<Vec<_>>()
        .join(" -> ")
}

fn predecessor_label(predecessor: Option<usize>) -> String {
    predecessor.map_or_else(|| NO_PREDECESSOR.to_string(), |z| (z + 1).to_string())
}

fn header(observations: &[usize]) -> Vec<String> {
    std::iter::once(String::new())
        .chain(observations.iter().map(|&o| symbol_label(o)))
        .collect()
}

/// CSV report: score section, backpointer section, path line.
///
/// Scores are written in probability space. Sections are separated by an
/// empty line.
pub struct CsvReport<W: Write> {
    out: W,
}

fn csv_writer<W: Write>(out: W) -> csv::Writer<W> {
    csv::WriterBuilder::new()
        .flexible(true)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(out)
}

impl<W: Write> CsvReport<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> ReportSink for CsvReport<W> {
    fn write_report(&mut self, problem: &Problem, decoding: &Decoding) -> Result<(), ReportError> {
        let scores = decoding.scores();
        let back = decoding.backpointers();
        let header = header(&problem.observations);

        {
            let mut section = csv_writer(&mut self.out);
            section.write_record([SCORES_TITLE])?;
            section.write_record(&header)?;
            for z in 0..scores.n_states() {
                let cells = (0..scores.n_steps()).map(|t| scores.probability(z, t).to_string());
                section.write_record(std::iter::once(state_label(z)).chain(cells))?;
            }
            section.flush()?;
        }
        self.out.write_all(b"\n")?;

        {
            let mut section = csv_writer(&mut self.out);
            section.write_record([BACKPOINTERS_TITLE])?;
            section.write_record(&header)?;
            for z in 0..back.n_states() {
                let cells = (0..back.n_steps()).map(|t| predecessor_label(back.predecessor(z, t)));
                section.write_record(std::iter::once(state_label(z)).chain(cells))?;
            }
            section.flush()?;
        }
        self.out.write_all(b"\n")?;

        {
            let mut section = csv_writer(&mut self.out);
            section.write_record([PATH_TITLE])?;
            section.write_record([path_line(decoding.path())])?;
            section.flush()?;
        }
        self.out.flush()?;
        Ok(())
    }
}

/// Column-aligned plain-text report.
pub struct TableReport<W: Write> {
    out: W,
}

impl<W: Write> TableReport<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_grid(&mut self, header: &[String], rows: &[Vec<String>]) -> std::io::Result<()> {
        let mut widths: Vec<usize> = header.iter().map(String::len).collect();
        for row in rows {
            for (w, cell) in widths.iter_mut().zip(row) {
                *w = (*w).max(cell.len());
            }
        }
        let line = |cells: &[String]| {
            cells
                .iter()
                .zip(&widths)
                .map(|(c, &w)| format!("{c:>w$}"))
                .collect::<Vec<_>>()
                .join("  ")
        };
        writeln!(self.out, "{}", line(header))?;
        for row in rows {
            writeln!(self.out, "{}", line(row))?;
        }
        Ok(())
    }
}

impl<W: Write> ReportSink for TableReport<W> {
    fn write_report(&mut self, problem: &Problem, decoding: &Decoding) -> Result<(), ReportError> {
        let scores = decoding.scores();
        let back = decoding.backpointers();
        let header = header(&problem.observations);

        let score_rows: Vec<Vec<String>> = (0..scores.n_states())
            .map(|z| {
                let cells =
                    (0..scores.n_steps()).map(|t| format!("{:.6e}", scores.probability(z, t)));
                std::iter::once(state_label(z)).chain(cells).collect()
            })
            .collect();
        let back_rows: Vec<Vec<String>> = (0..back.n_states())
            .map(|z| {
                std::iter::once(state_label(z))
                    .chain((0..back.n_steps()).map(|t| predecessor_label(back.predecessor(z, t))))
                    .collect()
            })
            .collect();

        writeln!(self.out, "{SCORES_TITLE}")?;
        self.write_grid(&header, &score_rows)?;
        writeln!(self.out)?;
        writeln!(self.out, "{BACKPOINTERS_TITLE}")?;
        self.write_grid(&header, &back_rows)?;
        writeln!(self.out)?;
        writeln!(self.out, "{PATH_TITLE}")?;
        writeln!(self.out, "{}", path_line(decoding.path()))?;
        writeln!(self.out, "log probability: {:.6}", decoding.log_probability())?;
        self.out.flush()?;
        Ok(())
    }
}

/// Machine-readable report. Indices stay 0-based; `-inf` scores and missing
/// backpointers serialise as `null`.
pub struct JsonReport<W: Write> {
    out: W,
    pretty: bool,
}

#[derive(Serialize)]
struct JsonDocument<'a> {
    n_states: usize,
    n_symbols: usize,
    observations: &'a [usize],
    path: &'a [usize],
    log_probability: f64,
    /// `[state][time]`
    log_scores: Vec<Vec<Option<f64>>>,
    /// `[state][time]`
    backpointers: Vec<Vec<Option<usize>>>,
}

impl<W: Write> JsonReport<W> {
    pub fn new(out: W) -> Self {
        Self { out, pretty: true }
    }

    pub fn compact(mut self) -> Self {
        self.pretty = false;
        self
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> ReportSink for JsonReport<W> {
    fn write_report(&mut self, problem: &Problem, decoding: &Decoding) -> Result<(), ReportError> {
        let scores = decoding.scores();
        let back = decoding.backpointers();
        let doc = JsonDocument {
            n_states: problem.model.n_states(),
            n_symbols: problem.model.n_symbols(),
            observations: &problem.observations,
            path: decoding.path(),
            log_probability: decoding.log_probability(),
            log_scores: (0..scores.n_states())
                .map(|z| {
                    (0..scores.n_steps())
                        .map(|t| Some(scores.log_score(z, t)).filter(|v| v.is_finite()))
                        .collect()
                })
                .collect(),
            backpointers: (0..back.n_states())
                .map(|z| (0..back.n_steps()).map(|t| back.predecessor(z, t)).collect())
                .collect(),
        };
        if self.pretty {
            serde_json::to_writer_pretty(&mut self.out, &doc)?;
        } else {
            serde_json::to_writer(&mut self.out, &doc)?;
        }
        writeln!(self.out)?;
        self.out.flush()?;
        Ok(())
    }
}
