use crate::{
    Error, ErrorDetail,
    constants::{FIRST_KEYWORD, LAST_KEYWORD},
    document::lines::Line,
};

/// Where the assembler is relative to the mandatory first and last lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Stage {
    BeforeFirst,
    Body,
    AfterLast,
}

impl Stage {
    /// The stage after `line` has been consumed.
    pub(crate) fn advance(self, line: &Line<'_>) -> Self {
        match (self, line.keyword) {
            (Self::AfterLast, _) | (_, LAST_KEYWORD) => Self::AfterLast,
            (Self::BeforeFirst, FIRST_KEYWORD) => Self::Body,
            (stage, _) => stage,
        }
    }
}

// Checks that `line` sits inside the span opened by `extra-info` and closed by
// `router-signature`.
pub(crate) fn placement(stage: Stage, line: &Line<'_>) -> Option<Error> {
    let detail = ErrorDetail::at(line.location);
    if line.is_blank() {
        return Some(Error::BlankLine(detail));
    }
    match stage {
        Stage::BeforeFirst if line.keyword != FIRST_KEYWORD => {
            Some(Error::LeadingContent(detail, line.raw.to_string()))
        }
        Stage::AfterLast => Some(Error::TrailingContent(detail, line.raw.to_string())),
        Stage::BeforeFirst | Stage::Body => None,
    }
}

// The `router-signature` line must carry a complete signature block.
pub(crate) fn signature(line: &Line<'_>) -> Option<Error> {
    match &line.block {
        None => Some(Error::MissingSignature(ErrorDetail::at(line.location))),
        Some(block) if !block.terminated => Some(Error::UnterminatedSignature(ErrorDetail::at(
            line.location.extend_to(block.location),
        ))),
        Some(_) => None,
    }
}

// Both mandatory lines have to show up somewhere.
pub(crate) fn mandatory_keywords(lines: &[Line<'_>]) -> Vec<Error> {
    [FIRST_KEYWORD, LAST_KEYWORD]
        .into_iter()
        .filter(|keyword| !lines.iter().any(|line| line.keyword == *keyword))
        .map(|keyword| Error::MissingKeyword(keyword.to_string()))
        .collect()
}
