//! MonetDB reserved words.

use oxide_sql_core::compiler::IdentifierPreparer;
use oxide_sql_core::Paramstyle;

/// Words MonetDB's SQL grammar reserves. Identifiers matching one of these
/// (case-insensitively) are quoted.
pub const RESERVED_WORDS: &[&str] = &[
    "asc", "action", "add", "admin", "after", "aggregate", "all", "alter", "always", "and", "any",
    "as", "asymmetric", "atomic", "authorization", "autoincrement", "before", "begin", "between",
    "bigint", "bigserial", "blob", "boolean", "by", "cache", "call", "cascade", "case", "char",
    "character", "check", "clob", "cluster", "clustered", "column", "commit", "comparison",
    "constraint", "copy", "create", "cross", "currentdate", "currentrole", "currenttime",
    "currenttimestamp", "currentuser", "cycle", "data", "datetime", "day", "decimal", "declare",
    "default", "delete", "delimiters", "distinct", "do", "double", "drop", "each", "else",
    "elseif", "encrypted", "end", "escape", "execute", "exists", "external", "extract", "false",
    "for", "foreign", "from", "full", "function", "generated", "global", "grant", "group",
    "having", "hour", "identity", "if", "in", "increment", "index", "inner", "insert", "int",
    "interval", "into", "is", "join", "key", "left", "like", "limit", "local", "localtime",
    "localtimestamp", "lockedcopy", "match", "maxvalue", "minute", "minvalue", "month", "name",
    "natural", "new", "no", "nomaxvalue", "nominvalue", "noncycle", "noncyclecreate", "not",
    "null", "of", "offset", "old", "on", "only", "option", "options", "or", "order", "outer",
    "overlaps", "partial", "password", "path", "position", "precision", "preferences",
    "preserve", "primary", "privileges", "procedure", "public", "read", "real", "records",
    "references", "referencing", "rename", "restart", "restrict", "return", "returns", "revoke",
    "right", "role", "rollback", "row", "rows", "schema", "second", "select", "sequence",
    "serial", "session", "set", "simple", "smallint", "some", "start", "statement", "stdin",
    "substring", "symmetric", "table", "temporary", "then", "time", "timestamp", "tinyint", "to",
    "transaction", "trigger", "true", "type", "unencrypted", "union", "unique", "unknown",
    "update", "user", "using", "values", "varchar", "view", "when", "where", "while", "with",
    "year", "zone",
];

/// Builds the MonetDB identifier preparer.
///
/// Percent signs inside quoted identifiers are never doubled.
#[must_use]
pub fn monet_preparer(paramstyle: Paramstyle, quote_all: bool) -> IdentifierPreparer {
    IdentifierPreparer::new(RESERVED_WORDS, paramstyle)
        .with_double_percents(false)
        .with_quote_all(quote_all)
}
