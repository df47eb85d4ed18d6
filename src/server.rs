//! Persistent request loop and line-oriented protocol
//!
//! One file path per input line, one JSON response line per non-blank input
//! line, in the same order, each flushed immediately. A failure on one line
//! never terminates the loop. The only exit is input exhaustion.

use anyhow::Result;
use serde::Serialize;
use serde_json::json;
use std::io::{BufRead, Write};
use std::path::Path;

use crate::document::Convert;
use crate::error::ExtractError;
use crate::language::ClassifyLanguage;
use crate::pipeline::{self, ExtractionResult};

#[derive(Serialize)]
struct SuccessResponse<'a> {
    success: bool,
    #[serde(flatten)]
    result: &'a ExtractionResult,
}

#[derive(Serialize)]
struct FailureResponse {
    success: bool,
    error: String,
}

/// Scoped suppression of the diagnostic channel.
///
/// Converter diagnostics go through the `log` facade; raising the max level
/// to `Off` for the duration of one call keeps them from interleaving with
/// the response protocol. The previous level is restored on every exit path.
struct QuietDiagnostics {
    previous: log::LevelFilter,
}

impl QuietDiagnostics {
    fn engage() -> Self {
        let previous = log::max_level();
        log::set_max_level(log::LevelFilter::Off);
        Self { previous }
    }
}

impl Drop for QuietDiagnostics {
    fn drop(&mut self) {
        log::set_max_level(self.previous);
    }
}

fn write_json_line<W: Write, T: Serialize>(output: &mut W, value: &T) -> Result<()> {
    serde_json::to_writer(&mut *output, value)?;
    output.write_all(b"\n")?;
    output.flush()?;
    Ok(())
}

/// Run the full service: handshake, converter construction, request loop.
///
/// `{"ready": true}` is emitted before the converter is built and
/// `{"initialized": true}` after, so a supervisor can detect readiness
/// without guessing from timing.
pub fn serve<C, F, L, R, W>(
    build_converter: F,
    classifier: &L,
    input: R,
    mut output: W,
) -> Result<()>
where
    C: Convert,
    F: FnOnce() -> Result<C>,
    L: ClassifyLanguage + ?Sized,
    R: BufRead,
    W: Write,
{
    write_json_line(&mut output, &json!({"ready": true}))?;
    let converter = build_converter()?;
    write_json_line(&mut output, &json!({"initialized": true}))?;

    run_loop(&converter, classifier, input, output)
}

/// Consume input lines until exhaustion, emitting one response per
/// non-blank line. Blank lines are skipped silently.
pub fn run_loop<C, L, R, W>(converter: &C, classifier: &L, input: R, mut output: W) -> Result<()>
where
    C: Convert + ?Sized,
    L: ClassifyLanguage + ?Sized,
    R: BufRead,
    W: Write,
{
    for line in input.lines() {
        let line = line?;
        let path = line.trim();
        if path.is_empty() {
            continue;
        }

        match handle_request(converter, classifier, path) {
            Ok(result) => write_json_line(
                &mut output,
                &SuccessResponse {
                    success: true,
                    result: &result,
                },
            )?,
            Err(err) => write_json_line(
                &mut output,
                &FailureResponse {
                    success: false,
                    error: err.to_string(),
                },
            )?,
        }
    }

    Ok(())
}

fn handle_request<C, L>(
    converter: &C,
    classifier: &L,
    path: &str,
) -> Result<ExtractionResult, ExtractError>
where
    C: Convert + ?Sized,
    L: ClassifyLanguage + ?Sized,
{
    if !Path::new(path).exists() {
        return Err(ExtractError::NotFound {
            path: path.to_string(),
        });
    }

    let _quiet = QuietDiagnostics::engage();
    pipeline::extract(converter, classifier, Path::new(path)).map_err(ExtractError::Conversion)
}
