//! Generic SQL dialect.

use super::{Dialect, Paramstyle};
use crate::compiler::{
    DdlCompiler, GenericCompiler, GenericDdlCompiler, IdentifierPreparer, SqlCompiler,
    ANSI_RESERVED_WORDS,
};

/// A generic SQL dialect using ANSI SQL standards.
#[derive(Debug, Clone)]
pub struct GenericDialect {
    compiler: GenericCompiler,
    ddl: GenericDdlCompiler<GenericCompiler>,
}

impl GenericDialect {
    /// Creates a new generic dialect.
    #[must_use]
    pub fn new() -> Self {
        Self::with_paramstyle(Paramstyle::Qmark)
    }

    /// Creates a generic dialect emitting the given placeholder style.
    #[must_use]
    pub fn with_paramstyle(paramstyle: Paramstyle) -> Self {
        let compiler =
            GenericCompiler::new(IdentifierPreparer::new(ANSI_RESERVED_WORDS, paramstyle));
        Self {
            ddl: GenericDdlCompiler::new(compiler.clone()),
            compiler,
        }
    }
}

impl Default for GenericDialect {
    fn default() -> Self {
        Self::new()
    }
}

impl Dialect for GenericDialect {
    fn name(&self) -> &'static str {
        "generic"
    }

    fn paramstyle(&self) -> Paramstyle {
        self.compiler.paramstyle()
    }

    fn identifier_preparer(&self) -> &IdentifierPreparer {
        self.compiler.preparer()
    }

    fn statement_compiler(&self) -> &dyn SqlCompiler {
        &self.compiler
    }

    fn ddl_compiler(&self) -> &dyn DdlCompiler {
        &self.ddl
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{Expr, SelectStatement, TableRef};
    use crate::dialect::PoolClass;

    #[test]
    fn test_generic_dialect() {
        let dialect = GenericDialect::new();
        assert_eq!(dialect.name(), "generic");
        assert_eq!(dialect.driver(), "generic");
        assert_eq!(dialect.paramstyle(), Paramstyle::Qmark);
        assert_eq!(dialect.quote_identifier("order"), "\"order\"");
        assert!(!dialect.supports_sequences());
        assert_eq!(dialect.pool_class(), PoolClass::Queue);
    }

    #[test]
    fn test_compile_through_dialect() {
        let dialect = GenericDialect::with_paramstyle(Paramstyle::Named);
        let out = dialect
            .compile(
                &SelectStatement::new()
                    .from(TableRef::table("users"))
                    .filter(Expr::column("id").eq(Expr::bind_named("id", 7_i64)))
                    .into(),
            )
            .unwrap();
        assert_eq!(out.sql, "SELECT * FROM users WHERE id = :id");
    }
}
