use std::io::Write;

use oxide_sql_core::compiler::{DdlElement, TypeCompiler};
use oxide_sql_core::schema::{
    AutoIncrement, Column, ColumnDefault, Constraint, Index, Sequence, Table,
};
use oxide_sql_core::{Dialect, SqlValue, TypeEngine};
use oxide_sql_monetdb::types::resolve;
use oxide_sql_monetdb::{MonetDialect, MonetTypeCompiler, SchemaDocument, MONETDB_TYPE_NAMES};

fn ddl(element: DdlElement) -> String {
    MonetDialect::new().compile_ddl(&element).unwrap()
}

fn create(table: Table) -> String {
    ddl(DdlElement::CreateTable {
        table,
        if_not_exists: false,
    })
}

fn orders() -> Table {
    Table::new("orders")
        .column(Column::new("id", TypeEngine::Integer).primary_key())
        .column(
            Column::new("customer_id", TypeEngine::Integer)
                .not_null()
                .references("customers", "id"),
        )
        .column(Column::new(
            "total",
            TypeEngine::Decimal {
                precision: Some(12),
                scale: Some(2),
            },
        ))
        .column(
            Column::new("note", TypeEngine::Text)
                .default(ColumnDefault::Value(SqlValue::Text("n/a".into()))),
        )
        .constraint(Constraint::Check {
            name: Some(String::from("ck_total")),
            sqltext: String::from("total >= 0"),
        })
        .constraint(Constraint::Unique {
            name: Some(String::from("uq_orders_ref")),
            columns: vec![String::from("customer_id"), String::from("total")],
        })
}

#[test]
fn test_create_table() {
    assert_eq!(
        create(orders()),
        "CREATE TABLE orders (\n    \
         id INT AUTO_INCREMENT NOT NULL,\n    \
         customer_id INTEGER NOT NULL,\n    \
         total DECIMAL(12, 2),\n    \
         note CLOB DEFAULT 'n/a',\n    \
         PRIMARY KEY (id),\n    \
         FOREIGN KEY (customer_id) REFERENCES customers (id),\n    \
         CONSTRAINT uq_orders_ref UNIQUE (customer_id, total)\n)"
    );
}

#[test]
fn test_check_constraints_are_skipped() {
    let sql = create(orders());
    assert!(!sql.contains("CHECK"));
    assert!(!sql.contains("ck_total"));
}

#[test]
fn test_bigint_auto_increment() {
    let table = Table::new("events").column(Column::new("id", TypeEngine::BigInteger).primary_key());
    assert_eq!(
        create(table),
        "CREATE TABLE events (\n    id BIGINT AUTO_INCREMENT NOT NULL,\n    PRIMARY KEY (id)\n)"
    );
}

#[test]
fn test_auto_increment_requires_single_integer_key() {
    let composite = Table::new("lines")
        .column(Column::new("order_id", TypeEngine::Integer).primary_key())
        .column(Column::new("line", TypeEngine::Integer).primary_key());
    let sql = create(composite);
    assert!(!sql.contains("AUTO_INCREMENT"));
    assert!(sql.contains("PRIMARY KEY (order_id, line)"));

    let disabled = Table::new("codes").column(
        Column::new("id", TypeEngine::Integer)
            .primary_key()
            .autoincrement(AutoIncrement::Never),
    );
    assert!(create(disabled).contains("id INTEGER NOT NULL"));
}

#[test]
fn test_optional_sequence_defers_to_auto_increment() {
    let table = Table::new("tickets").column(
        Column::new("id", TypeEngine::Integer)
            .primary_key()
            .default(ColumnDefault::Sequence(Sequence::new("ticket_seq").optional())),
    );
    assert!(create(table).contains("id INT AUTO_INCREMENT NOT NULL"));
}

#[test]
fn test_guard_flags_are_not_rendered() {
    assert_eq!(
        ddl(DdlElement::CreateTable {
            table: Table::new("t").column(Column::new("a", TypeEngine::Boolean)),
            if_not_exists: true,
        }),
        "CREATE TABLE t (\n    a BOOLEAN\n)"
    );
    assert_eq!(
        ddl(DdlElement::DropTable {
            table: Table::new("t").schema("shop"),
            if_exists: true,
        }),
        "DROP TABLE shop.t"
    );
}

#[test]
fn test_temporary_table() {
    let table = Table::new("scratch")
        .column(Column::new("v", TypeEngine::Varchar(Some(20))))
        .temporary();
    assert!(create(table).starts_with("CREATE TEMPORARY TABLE scratch ("));
}

#[test]
fn test_sequences() {
    assert_eq!(
        ddl(DdlElement::CreateSequence {
            sequence: Sequence::new("order_seq").schema("shop").start(1000),
            if_not_exists: false,
        }),
        "CREATE SEQUENCE shop.order_seq AS INTEGER START WITH 1000"
    );
    assert_eq!(
        ddl(DdlElement::DropSequence {
            sequence: Sequence::new("order_seq"),
            if_exists: false,
        }),
        "DROP SEQUENCE order_seq"
    );
}

#[test]
fn test_indexes() {
    let index = Index {
        name: String::from("ix_orders_day"),
        table: String::from("orders"),
        schema: None,
        columns: vec![String::from("day"), String::from("total")],
        unique: true,
    };
    assert_eq!(
        ddl(DdlElement::CreateIndex(index.clone())),
        r#"CREATE UNIQUE INDEX ix_orders_day ON orders ("day", total)"#
    );
    assert_eq!(ddl(DdlElement::DropIndex(index)), "DROP INDEX ix_orders_day");
}

#[test]
fn test_catalog_types_round_trip_to_ddl() {
    let expected = [
        ("tinyint", "TINYINT"),
        ("wrd", "WRD"),
        ("url", "URL"),
        ("inet", "INET"),
        ("bigint", "BIGINT"),
        ("blob", "BLOB"),
        ("boolean", "BOOLEAN"),
        ("char", "CHAR(12)"),
        ("clob", "CLOB"),
        ("date", "DATE"),
        ("decimal", "DECIMAL(12, 2)"),
        ("double", "DOUBLE PRECISION"),
        ("int", "INTEGER"),
        ("real", "REAL"),
        ("smallint", "SMALLINT"),
        ("time", "TIME"),
        ("timestamp", "TIMESTAMP"),
        ("timestamptz", "TIMESTAMP WITH TIME ZONE"),
        ("varchar", "VARCHAR(12)"),
    ];
    assert_eq!(expected.len(), MONETDB_TYPE_NAMES.len());
    for (name, rendered) in expected {
        let type_ = resolve(name, Some(12), Some(2)).unwrap();
        assert_eq!(MonetTypeCompiler.process(&type_).unwrap(), rendered, "{name}");
    }
}

#[test]
fn test_schema_document_statements() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{
            "sequences": [{{"name": "order_seq", "start": 100}}],
            "tables": [
                {{"name": "customers", "columns": [
                    {{"name": "id", "type": {{"type": "integer"}}, "primary_key": true, "nullable": false}}
                ]}},
                {{"name": "orders", "columns": [
                    {{"name": "id", "type": {{"type": "integer"}}, "primary_key": true, "nullable": false}},
                    {{"name": "customer_id", "type": {{"type": "integer"}},
                      "foreign_key": {{"table": "customers", "column": "id"}}}}
                ]}}
            ],
            "indexes": [{{"name": "ix_orders_customer", "table": "orders", "columns": ["customer_id"]}}]
        }}"#
    )
    .unwrap();

    let document = SchemaDocument::from_path(file.path()).unwrap();
    let dialect = MonetDialect::new();

    let create = dialect.create_statements(&document).unwrap();
    assert_eq!(create.len(), 4);
    assert_eq!(create[0], "CREATE SEQUENCE order_seq AS INTEGER START WITH 100");
    assert!(create[1].starts_with("CREATE TABLE customers"));
    assert!(create[2].contains("FOREIGN KEY (customer_id) REFERENCES customers (id)"));
    assert_eq!(
        create[3],
        "CREATE INDEX ix_orders_customer ON orders (customer_id)"
    );

    let drop = dialect.drop_statements(&document).unwrap();
    assert_eq!(
        drop,
        vec![
            "DROP INDEX ix_orders_customer",
            "DROP TABLE orders",
            "DROP TABLE customers",
            "DROP SEQUENCE order_seq",
        ]
    );
}

#[test]
fn test_schema_document_missing_file() {
    assert!(SchemaDocument::from_path("/nonexistent/schema.json").is_err());
}
