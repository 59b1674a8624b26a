use crate::{
    constants::{BLOCK_BEGIN, BLOCK_END, LAST_KEYWORD, OPT_PREFIX},
    model::Location,
};

/// One keyword line of a descriptor.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Line<'a> {
    pub(crate) keyword: &'a str,
    pub(crate) value: &'a str,
    /// The line as written, `opt` prefix included.
    pub(crate) raw: &'a str,
    pub(crate) location: Location,
    /// The block attached to a `router-signature` line.
    pub(crate) block: Option<Block<'a>>,
}

impl Line<'_> {
    pub(crate) fn is_blank(&self) -> bool {
        self.raw.trim().is_empty()
    }
}

/// A `-----BEGIN ...-----` to `-----END ...-----` span, markers included.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Block<'a> {
    pub(crate) text: &'a str,
    pub(crate) location: Location,
    pub(crate) terminated: bool,
}

#[derive(Debug, Clone, Copy)]
struct PhysicalLine<'a> {
    text: &'a str,
    location: Location,
}

fn physical_lines(input: &str) -> impl Iterator<Item = PhysicalLine<'_>> {
    input
        .split_inclusive('\n')
        .scan(0, |offset, chunk| {
            let start = *offset;
            *offset += chunk.len();
            let text = chunk.strip_suffix('\n').unwrap_or(chunk);
            let text = text.strip_suffix('\r').unwrap_or(text);
            Some((start, text))
        })
        .enumerate()
        .map(|(index, (start, text))| PhysicalLine {
            text,
            location: Location::new(index + 1, start, start + text.len()),
        })
}

fn keyword_and_value(raw: &str) -> (&str, &str) {
    let content = raw.strip_prefix(OPT_PREFIX).unwrap_or(raw);
    content.split_once(' ').unwrap_or((content, ""))
}

/// Splits a descriptor into its keyword lines.
///
/// The lines following `router-signature` that form a `-----BEGIN`/`-----END` block are
/// folded into that line instead of being returned on their own. A block without an
/// end marker runs to the end of the input.
///
/// Line terminators are stripped from every keyword line, but a block is a verbatim
/// slice of the input, so with CRLF input its interior lines keep their `\r`.
pub(crate) fn split_lines(input: &str) -> Vec<Line<'_>> {
    let mut lines = Vec::new();
    let mut physical = physical_lines(input).peekable();

    while let Some(PhysicalLine { text, location }) = physical.next() {
        let (keyword, value) = keyword_and_value(text);
        let block = if keyword == LAST_KEYWORD
            && physical
                .peek()
                .is_some_and(|next| next.text.starts_with(BLOCK_BEGIN))
        {
            let mut block_location = location;
            let mut terminated = false;
            let mut first = None;
            for next in physical.by_ref() {
                if first.is_none() {
                    first = Some(next.location);
                }
                block_location = next.location;
                if next.text.starts_with(BLOCK_END) {
                    terminated = true;
                    break;
                }
            }
            first.map(|first| {
                let location = first.extend_to(block_location);
                Block {
                    text: input
                        .get(location.absolute_start..location.absolute_end)
                        .unwrap_or_default(),
                    location,
                    terminated,
                }
            })
        } else {
            None
        };

        lines.push(Line {
            keyword,
            value,
            raw: text,
            location,
            block,
        });
    }
    lines
}
