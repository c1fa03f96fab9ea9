//! Identifier quoting.

use std::collections::HashSet;

use crate::dialect::Paramstyle;
use crate::schema::Sequence;

/// Reserved words of the ANSI core, used by the generic dialect.
pub const ANSI_RESERVED_WORDS: &[&str] = &[
    "all", "alter", "and", "as", "between", "by", "case", "check", "constraint", "create",
    "default", "delete", "distinct", "drop", "else", "end", "false", "foreign", "from", "group",
    "having", "in", "index", "inner", "insert", "into", "is", "join", "key", "left", "like",
    "limit", "not", "null", "offset", "on", "or", "order", "outer", "primary", "references",
    "right", "select", "table", "then", "true", "union", "update", "user", "when", "where",
];

/// Decides when identifiers need quoting and renders them.
///
/// An identifier is quoted when it is a reserved word, starts with a digit
/// or `$`, contains characters outside `[a-z0-9_$]`, or is not lowercase.
/// Quoting doubles embedded quote characters; when `double_percents` is set
/// and the paramstyle uses `%`, it also doubles `%`.
#[derive(Debug, Clone)]
pub struct IdentifierPreparer {
    reserved_words: HashSet<&'static str>,
    initial_quote: char,
    double_percents: bool,
    quote_all: bool,
    paramstyle: Paramstyle,
}

impl IdentifierPreparer {
    /// Creates a preparer for the given reserved-word set.
    #[must_use]
    pub fn new(reserved_words: &[&'static str], paramstyle: Paramstyle) -> Self {
        Self {
            reserved_words: reserved_words.iter().copied().collect(),
            initial_quote: '"',
            double_percents: paramstyle.escapes_percent(),
            quote_all: false,
            paramstyle,
        }
    }

    /// Enables or disables `%` doubling inside quoted identifiers.
    #[must_use]
    pub const fn with_double_percents(mut self, enabled: bool) -> Self {
        self.double_percents = enabled;
        self
    }

    /// Quotes every identifier, reserved or not.
    #[must_use]
    pub const fn with_quote_all(mut self, enabled: bool) -> Self {
        self.quote_all = enabled;
        self
    }

    /// The parameter style statements are rendered for.
    #[must_use]
    pub const fn paramstyle(&self) -> Paramstyle {
        self.paramstyle
    }

    /// Whether `%` is doubled inside quoted identifiers.
    #[must_use]
    pub const fn double_percents(&self) -> bool {
        self.double_percents && self.paramstyle.escapes_percent()
    }

    /// Returns whether `word` is reserved (case-insensitive).
    #[must_use]
    pub fn is_reserved(&self, word: &str) -> bool {
        self.reserved_words.contains(word.to_lowercase().as_str())
    }

    /// Number of reserved words.
    #[must_use]
    pub fn reserved_word_count(&self) -> usize {
        self.reserved_words.len()
    }

    /// Returns whether `name` must be quoted.
    #[must_use]
    pub fn requires_quotes(&self, name: &str) -> bool {
        if self.quote_all {
            return true;
        }
        let Some(first) = name.chars().next() else {
            return true;
        };
        let lower = name.to_lowercase();
        self.reserved_words.contains(lower.as_str())
            || first.is_ascii_digit()
            || first == '$'
            || !name
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_' || c == '$')
            || lower != name
    }

    /// Quotes `name` unconditionally.
    #[must_use]
    pub fn quote_identifier(&self, name: &str) -> String {
        let q = self.initial_quote;
        let mut escaped = name.replace(q, &format!("{q}{q}"));
        if self.double_percents() {
            escaped = escaped.replace('%', "%%");
        }
        format!("{q}{escaped}{q}")
    }

    /// Quotes `name` only if required.
    #[must_use]
    pub fn quote(&self, name: &str) -> String {
        if self.requires_quotes(name) {
            self.quote_identifier(name)
        } else {
            name.to_string()
        }
    }

    /// Formats a possibly schema-qualified table name.
    #[must_use]
    pub fn format_table(&self, schema: Option<&str>, name: &str) -> String {
        match schema {
            Some(schema) => format!("{}.{}", self.quote(schema), self.quote(name)),
            None => self.quote(name),
        }
    }

    /// Formats a column name, optionally qualified by a table.
    #[must_use]
    pub fn format_column(&self, table: Option<&str>, name: &str) -> String {
        match table {
            Some(table) => format!("{}.{}", self.quote(table), self.quote(name)),
            None => self.quote(name),
        }
    }

    /// Formats a possibly schema-qualified index name.
    #[must_use]
    pub fn format_index(&self, schema: Option<&str>, name: &str) -> String {
        self.format_table(schema, name)
    }

    /// Formats a sequence name.
    #[must_use]
    pub fn format_sequence(&self, sequence: &Sequence) -> String {
        self.format_table(sequence.schema.as_deref(), &sequence.name)
    }
}
