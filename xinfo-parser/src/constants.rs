// Structural markers of the extra-info descriptor format.
//
// Field keywords live in the grammar registry, only the lines and markers the
// document assembler handles itself are listed here.

/// Keyword every descriptor must open with.
pub const FIRST_KEYWORD: &str = "extra-info";

/// Keyword every descriptor must close with. Its value is followed by the signature block.
pub const LAST_KEYWORD: &str = "router-signature";

/// Legacy prefix that older relays put in front of optional keywords.
pub(crate) const OPT_PREFIX: &str = "opt ";

pub(crate) const BLOCK_BEGIN: &str = "-----BEGIN ";
pub(crate) const BLOCK_END: &str = "-----END ";
