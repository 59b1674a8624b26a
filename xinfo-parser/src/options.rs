use std::str::FromStr;

/// How strictly a descriptor is checked while it is parsed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Validation {
    /// Reject the descriptor on the first structural or field violation.
    #[default]
    Strict,

    /// Never reject. Malformed or missing fields keep their default value (`None` or an
    /// empty collection) and everything else is still parsed.
    Lenient,
}

impl FromStr for Validation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "strict" => Ok(Self::Strict),
            "lenient" => Ok(Self::Lenient),
            _ => Err(format!(
                "invalid validation mode: '{s}', expected: strict, lenient"
            )),
        }
    }
}

#[derive(Debug, Clone, Default)]
#[non_exhaustive]
pub struct Options {
    pub validation: Validation,
}

impl Options {
    /// Create a new `OptionsBuilder` for fluent configuration.
    ///
    /// # Example
    ///
    /// ```
    /// use xinfo_parser::Options;
    ///
    /// let options = Options::builder().with_lenient().build();
    /// ```
    #[must_use]
    pub fn builder() -> OptionsBuilder {
        OptionsBuilder::default()
    }

    /// Create a new `Options` with default settings (strict validation).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Options for lenient parsing.
    #[must_use]
    pub fn lenient() -> Self {
        Self {
            validation: Validation::Lenient,
        }
    }

    #[must_use]
    pub fn is_strict(&self) -> bool {
        self.validation == Validation::Strict
    }
}

/// Builder for `Options`.
///
/// Create an `OptionsBuilder` using `Options::builder()`.
#[derive(Debug, Clone, Default)]
#[non_exhaustive]
pub struct OptionsBuilder {
    validation: Validation,
}

impl OptionsBuilder {
    /// Set the validation mode.
    ///
    /// # Example
    ///
    /// ```
    /// use xinfo_parser::{Options, Validation};
    ///
    /// let options = Options::builder()
    ///     .with_validation(Validation::Lenient)
    ///     .build();
    /// assert!(!options.is_strict());
    /// ```
    #[must_use]
    pub fn with_validation(mut self, validation: Validation) -> Self {
        self.validation = validation;
        self
    }

    /// Enable lenient mode.
    ///
    /// Problems that would reject the descriptor in strict mode only leave the
    /// affected attributes at their defaults.
    #[must_use]
    pub fn with_lenient(mut self) -> Self {
        self.validation = Validation::Lenient;
        self
    }

    /// Build the `Options` from this builder.
    #[must_use]
    pub fn build(self) -> Options {
        Options {
            validation: self.validation,
        }
    }
}
