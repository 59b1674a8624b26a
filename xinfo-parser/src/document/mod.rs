mod lines;
mod validate;

use rustc_hash::FxHashSet;
use tracing::instrument;

use crate::{
    Error, ErrorDetail, ExtraInfo,
    constants::{FIRST_KEYWORD, LAST_KEYWORD},
    grammar::{self, Pattern},
};

use lines::Line;
use validate::Stage;

/// A fully populated record plus every violation found on the way, in document order.
#[derive(Debug)]
pub(crate) struct Assembly {
    pub(crate) record: ExtraInfo,
    pub(crate) violations: Vec<Error>,
}

/// Builds a record out of `input`, recording every structural and field problem
/// instead of stopping at it.
#[instrument(level = "trace", skip(input))]
pub(crate) fn assemble(input: &str) -> Assembly {
    let lines = lines::split_lines(input);
    let mut record = ExtraInfo::default();
    let mut violations = Vec::new();
    let mut stage = Stage::BeforeFirst;
    let mut leading_content = false;
    let mut seen = FxHashSet::default();

    for line in &lines {
        if let Some(violation) = validate::placement(stage, line) {
            leading_content |= matches!(violation, Error::LeadingContent(..));
            violations.push(violation);
        }
        if line.is_blank() {
            continue;
        }
        if !seen.insert(line.keyword) {
            tracing::warn!(
                keyword = line.keyword,
                line = line.location.line,
                "duplicate keyword, the last occurrence wins"
            );
        }

        match line.keyword {
            FIRST_KEYWORD => {
                if stage == Stage::BeforeFirst && !leading_content {
                    violations.extend(identity(line, &mut record));
                } else {
                    // only the line that opens the descriptor names the relay
                    violations.push(Error::MalformedIdentity(
                        ErrorDetail::at(line.location),
                        "'extra-info' has to be the first line of the descriptor".to_string(),
                    ));
                }
            }
            LAST_KEYWORD => {
                if let Some(block) = line.block.as_ref().filter(|block| block.terminated) {
                    record.signature = Some(block.text.to_string());
                }
                violations.extend(validate::signature(line));
            }
            keyword => match grammar::lookup(keyword) {
                Some(family) => {
                    if let Err(problem) = family.apply(line.value, &mut record) {
                        tracing::debug!(
                            keyword,
                            tolerance = ?family.tolerance(),
                            %problem,
                            "field failed validation"
                        );
                        violations.push(Error::InvalidField(
                            ErrorDetail::at(line.location),
                            keyword.to_string(),
                            problem,
                        ));
                    }
                }
                None => {
                    tracing::debug!(keyword, "unrecognized line");
                    record.unrecognized_lines.push(line.raw.to_string());
                }
            },
        }

        stage = stage.advance(line);
    }

    violations.extend(validate::mandatory_keywords(&lines));
    Assembly { record, violations }
}

// The `extra-info` line carries exactly a nickname and a fingerprint.
fn identity(line: &Line<'_>, record: &mut ExtraInfo) -> Vec<Error> {
    let detail = || ErrorDetail::at(line.location);
    let tokens: Vec<&str> = line.value.split_whitespace().collect();
    let [nickname, fingerprint] = tokens.as_slice() else {
        return vec![Error::MalformedIdentity(
            detail(),
            format!(
                "expected a nickname and a fingerprint, found '{}'",
                line.value
            ),
        )];
    };

    let mut problems = Vec::new();
    let nickname = grammar::identity(nickname, Pattern::Nickname);
    let fingerprint = grammar::identity(fingerprint, Pattern::HexDigest);
    problems.extend(nickname.problem);
    problems.extend(fingerprint.problem);
    record.nickname = nickname.value;
    record.fingerprint = fingerprint.value;

    problems
        .into_iter()
        .map(|problem| Error::MalformedIdentity(detail(), problem))
        .collect()
}
