use std::path::Path;

use miette::{Diagnostic, NamedSource, SourceSpan};
use xinfo_parser::{Error as ParserError, Location};

/// Rich error wrapper for miette display with the descriptor source
#[derive(Debug, Diagnostic, thiserror::Error)]
#[error("{message}")]
#[diagnostic(code(xinfo::rejected))]
pub(crate) struct RichError {
    message: String,

    #[help]
    advice: Option<String>,

    #[source_code]
    src: NamedSource<String>,

    #[label("{position_advice}")]
    span: Option<SourceSpan>,
    position_advice: String,
}

fn source_span_from_location(location: &Location) -> SourceSpan {
    SourceSpan::new(location.absolute_start.into(), location.len())
}

/// Builds the report for a rejected descriptor read from `path`.
pub(crate) fn report(error: &ParserError, path: &Path, source: &str) -> miette::Report {
    let location = error.location();
    let position_advice = match (location, error.keyword()) {
        (Some(location), Some(keyword)) => {
            format!("'{keyword}' rejected here (line {})", location.line)
        }
        (Some(location), None) => format!("rejected here (line {})", location.line),
        (None, _) => String::new(),
    };

    miette::Report::new(RichError {
        message: error.to_string(),
        advice: error.advice().map(ToString::to_string),
        src: NamedSource::new(path.display().to_string(), source.to_string()),
        span: location.map(source_span_from_location),
        position_advice,
    })
}
