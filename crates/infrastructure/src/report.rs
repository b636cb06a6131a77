//! Plain-text suite report.
//!
//! Prints results as they arrive, grouped resource → case → expectation,
//! then a summary with every failure listed with expected and observed
//! values:
//!
//! ```text
//!   GET /api/v2/ability
//!     No 'limit' Query Parameter Provided
//!       ✓ status code is 200
//!       ✗ `results` has 20 elements (1)
//!
//!   3 passing (412ms)
//!   1 failing
//!
//!   1) GET /api/v2/ability › No 'limit' Query Parameter Provided
//!      GET https://pokeapi.co/api/v2/ability
//!      `results` has 20 elements
//!        `results`: expected 20 elements, got 9
//!        observed: 9
//! ```

use std::io::{self, Write};

use pokecheck_domain::{ScenarioResult, SuiteReport};

const PASS: &str = "✓";
const FAIL: &str = "✗";

/// Writes a hierarchical pass/fail listing to any writer.
pub struct TextReporter<W: Write> {
    out: W,
    current_resource: Option<String>,
    failures_seen: usize,
}

impl<W: Write> TextReporter<W> {
    /// Creates a reporter writing to `out`.
    pub const fn new(out: W) -> Self {
        Self {
            out,
            current_resource: None,
            failures_seen: 0,
        }
    }

    /// Consumes the reporter, returning the writer.
    pub fn into_inner(self) -> W {
        self.out
    }

    /// Prints one scenario result, opening a new resource heading if needed.
    ///
    /// # Errors
    ///
    /// Returns any error from the underlying writer.
    pub fn scenario(&mut self, result: &ScenarioResult) -> io::Result<()> {
        if self.current_resource.as_deref() != Some(result.id.resource.as_str()) {
            writeln!(self.out)?;
            writeln!(self.out, "  {}", result.id.resource)?;
            self.current_resource = Some(result.id.resource.clone());
        }

        writeln!(self.out, "    {}", result.id.case)?;

        if !result.passed() {
            self.failures_seen += 1;
        }
        let number = self.failures_seen;

        if let Some(error) = &result.transport_error {
            writeln!(self.out, "      {FAIL} request failed: {error} ({number})")?;
        }

        for expectation in &result.expectations {
            if expectation.passed {
                writeln!(self.out, "      {PASS} {}", expectation.expectation.description())?;
            } else {
                writeln!(
                    self.out,
                    "      {FAIL} {} ({number})",
                    expectation.expectation.description()
                )?;
            }
        }

        self.out.flush()
    }

    /// Prints the closing summary and the detailed failure list.
    ///
    /// # Errors
    ///
    /// Returns any error from the underlying writer.
    pub fn summary(&mut self, report: &SuiteReport) -> io::Result<()> {
        writeln!(self.out)?;
        writeln!(self.out, "  {} passing ({}ms)", report.passed, report.duration_ms)?;
        if report.failed > 0 {
            writeln!(self.out, "  {} failing", report.failed)?;
        }
        if report.total == 0 {
            writeln!(self.out, "  no scenarios ran")?;
        }

        for (number, result) in report.results.iter().filter(|r| !r.passed()).enumerate() {
            writeln!(self.out)?;
            writeln!(self.out, "  {}) {}", number + 1, result.id)?;
            writeln!(self.out, "     GET {}", result.url)?;

            if let Some(error) = &result.transport_error {
                writeln!(self.out, "     request failed: {error}")?;
            }

            for failure in result.failures() {
                writeln!(self.out, "     {}", failure.expectation.description())?;
                if let Some(error) = &failure.error {
                    writeln!(self.out, "       {error}")?;
                }
                if let Some(actual) = &failure.actual {
                    writeln!(self.out, "       observed: {actual}")?;
                }
            }
        }

        writeln!(self.out)?;
        self.out.flush()
    }
}
