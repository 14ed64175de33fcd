//! PostgreSQL implementation of [`DocumentStore`].
//!
//! Documents live in one `documents` table with a JSONB `body` column.
//! Filters compile to `EXISTS` sub-queries over the field's elements, so array
//! fields and scalar fields share one code path:
//!
//! ```sql
//! EXISTS (SELECT 1 FROM jsonb_array_elements(
//!     CASE jsonb_typeof(body #> $path) WHEN 'array' THEN body #> $path
//!     ELSE jsonb_build_array(body #> $path) END) AS e(v)
//!   WHERE CASE jsonb_typeof(e.v) WHEN 'number' THEN ... END)
//! ```
//!
//! Each element is compared according to its own JSON type, matching the
//! rules in [`crate::matching`].

use async_trait::async_trait;
use serde_json::Value;
use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Postgres, QueryBuilder};
use tracing::{debug, info};
use uuid::Uuid;

use devcamper_core::{Condition, Filter, Operand, Predicate, SortKey};

use crate::error::StoreError;
use crate::store::{Document, DocumentStore, FindQuery, prepare_insert, strip_reserved};

/// Opens a connection pool to `database_url`.
pub async fn connect(database_url: &str) -> Result<PgPool, StoreError> {
    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(database_url)
        .await?;
    Ok(pool)
}

#[derive(Clone, Debug)]
pub struct PgDocumentStore {
    pool: PgPool,
}

impl PgDocumentStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Applies the embedded migrations.
    pub async fn migrate(&self) -> Result<(), StoreError> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        info!("Database migrations applied");
        Ok(())
    }
}

fn into_document(body: Value) -> Result<Document, StoreError> {
    match body {
        Value::Object(doc) => Ok(doc),
        other => Err(StoreError::InvalidDocument(format!(
            "expected an object body, found {}",
            other
        ))),
    }
}

fn map_write_error(collection: &str, err: sqlx::Error) -> StoreError {
    if let sqlx::Error::Database(db) = &err {
        if db.is_unique_violation() {
            return StoreError::Duplicate {
                collection: collection.to_string(),
                field: db.constraint().unwrap_or("id").to_string(),
            };
        }
    }
    StoreError::Database(err)
}

fn to_i64(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

fn sql_operator(predicate: &Predicate) -> &'static str {
    match predicate {
        Predicate::Eq(_) | Predicate::In(_) => "=",
        Predicate::Gt(_) => ">",
        Predicate::Gte(_) => ">=",
        Predicate::Lt(_) => "<",
        Predicate::Lte(_) => "<=",
    }
}

fn push_comparison(
    builder: &mut QueryBuilder<'static, Postgres>,
    op: &'static str,
    operand: &Operand,
) {
    builder.push("CASE jsonb_typeof(e.v) WHEN 'number' THEN (e.v #>> '{}')::float8 ");
    builder.push(op);
    builder.push(" ");
    builder.push_bind(operand.as_number());
    builder.push("::float8 WHEN 'string' THEN (e.v #>> '{}') COLLATE \"C\" ");
    builder.push(op);
    builder.push(" ");
    builder.push_bind(operand.as_str().to_string());
    builder.push("::text WHEN 'boolean' THEN (e.v #>> '{}')::boolean ");
    builder.push(op);
    builder.push(" ");
    builder.push_bind(operand.as_bool());
    builder.push("::boolean ELSE FALSE END");
}

fn push_condition(builder: &mut QueryBuilder<'static, Postgres>, condition: &Condition) {
    let path = condition.field.segments().to_vec();

    builder.push("EXISTS (SELECT 1 FROM jsonb_array_elements(CASE jsonb_typeof(body #> ");
    builder.push_bind(path.clone());
    builder.push(") WHEN 'array' THEN body #> ");
    builder.push_bind(path.clone());
    builder.push(" ELSE jsonb_build_array(body #> ");
    builder.push_bind(path);
    builder.push(") END) AS e(v) WHERE ");

    let op = sql_operator(&condition.predicate);
    match &condition.predicate {
        Predicate::Eq(operand)
        | Predicate::Gt(operand)
        | Predicate::Gte(operand)
        | Predicate::Lt(operand)
        | Predicate::Lte(operand) => push_comparison(builder, op, operand),
        Predicate::In(operands) if operands.is_empty() => {
            builder.push("FALSE");
        }
        Predicate::In(operands) => {
            for (i, operand) in operands.iter().enumerate() {
                builder.push(if i == 0 { "(" } else { ") OR (" });
                push_comparison(builder, op, operand);
            }
            builder.push(")");
        }
    }

    builder.push(")");
}

fn push_filter(builder: &mut QueryBuilder<'static, Postgres>, filter: &Filter) {
    for condition in filter.conditions() {
        builder.push(" AND ");
        push_condition(builder, condition);
    }
}

fn push_order(builder: &mut QueryBuilder<'static, Postgres>, sort: &[SortKey]) {
    builder.push(" ORDER BY ");
    for key in sort {
        builder.push("body #> ");
        builder.push_bind(key.field.segments().to_vec());
        builder.push(if key.descending {
            " DESC NULLS LAST, "
        } else {
            " ASC NULLS FIRST, "
        });
    }
    builder.push("id ASC");
}

fn scoped(prefix: &str, collection: &str) -> QueryBuilder<'static, Postgres> {
    let mut builder = QueryBuilder::new(prefix);
    builder.push(" WHERE collection = ");
    builder.push_bind(collection.to_string());
    builder
}

fn find_statement(collection: &str, query: &FindQuery) -> QueryBuilder<'static, Postgres> {
    let mut builder = scoped("SELECT body FROM documents", collection);
    push_filter(&mut builder, &query.filter);
    push_order(&mut builder, &query.sort);
    if let Some(limit) = query.limit {
        builder.push(" LIMIT ");
        builder.push_bind(to_i64(limit));
    }
    if query.skip > 0 {
        builder.push(" OFFSET ");
        builder.push_bind(to_i64(query.skip));
    }
    builder
}

#[async_trait]
impl DocumentStore for PgDocumentStore {
    async fn find(&self, collection: &str, query: &FindQuery) -> Result<Vec<Document>, StoreError> {
        let mut builder = find_statement(collection, query);
        debug!(collection = %collection, sql = %builder.sql(), "Finding documents");

        let rows = builder
            .build_query_scalar::<Value>()
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(into_document).collect()
    }

    async fn count(&self, collection: &str, filter: &Filter) -> Result<u64, StoreError> {
        let mut builder = scoped("SELECT COUNT(*) FROM documents", collection);
        push_filter(&mut builder, filter);

        let total = builder
            .build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await?;

        Ok(u64::try_from(total).unwrap_or(0))
    }

    async fn find_by_id(&self, collection: &str, id: Uuid) -> Result<Option<Document>, StoreError> {
        let body = sqlx::query_scalar::<_, Value>(
            "SELECT body FROM documents WHERE collection = $1 AND id = $2",
        )
        .bind(collection)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        body.map(into_document).transpose()
    }

    async fn insert(&self, collection: &str, mut doc: Document) -> Result<Document, StoreError> {
        let id = prepare_insert(&mut doc)?;

        let body = sqlx::query_scalar::<_, Value>(
            "INSERT INTO documents (id, collection, body) VALUES ($1, $2, $3) RETURNING body",
        )
        .bind(id)
        .bind(collection)
        .bind(Value::Object(doc))
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_write_error(collection, e))?;

        into_document(body)
    }

    async fn update_by_id(
        &self,
        collection: &str,
        id: Uuid,
        patch: Document,
    ) -> Result<Option<Document>, StoreError> {
        let body = sqlx::query_scalar::<_, Value>(
            "UPDATE documents SET body = body || $1 WHERE collection = $2 AND id = $3 RETURNING body",
        )
        .bind(Value::Object(strip_reserved(patch)))
        .bind(collection)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_write_error(collection, e))?;

        body.map(into_document).transpose()
    }

    async fn delete_by_id(
        &self,
        collection: &str,
        id: Uuid,
    ) -> Result<Option<Document>, StoreError> {
        let body = sqlx::query_scalar::<_, Value>(
            "DELETE FROM documents WHERE collection = $1 AND id = $2 RETURNING body",
        )
        .bind(collection)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        body.map(into_document).transpose()
    }

    async fn delete_many(&self, collection: &str, filter: &Filter) -> Result<u64, StoreError> {
        let mut builder = scoped("DELETE FROM documents", collection);
        push_filter(&mut builder, filter);

        let result = builder.build().execute(&self.pool).await?;
        Ok(result.rows_affected())
    }
}
