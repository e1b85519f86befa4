//! Hand-written member repository.
//!
//! Every query here is a fixed SQL string with positional parameters,
//! executed through the low-level connection API. Compare with
//! [`MemberRepository`](super::MemberRepository), which builds the same
//! queries with the SeaORM query builder.

use anyhow::Result;
use log::debug;
use sea_orm::{ActiveModelTrait, ConnectionTrait, EntityTrait, FromQueryResult, ModelTrait, Statement, Value};

use crate::entities::member;
use crate::error::RepositoryError;

const SELECT_MEMBERS: &str = "SELECT id, username, age, team_id FROM members";

/// Repository issuing fixed SQL strings for member operations.
pub struct MemberJpaRepository;

impl MemberJpaRepository {
    fn statement<C, I>(conn: &C, sql: &str, values: I) -> Statement
    where
        C: ConnectionTrait,
        I: IntoIterator<Item = Value>,
    {
        debug!("sql: {}", sql);
        Statement::from_sql_and_values(conn.get_database_backend(), sql, values)
    }

    async fn fetch_members<C>(conn: &C, stmt: Statement) -> Result<Vec<member::Model>>
    where
        C: ConnectionTrait,
    {
        Ok(member::Model::find_by_statement(stmt).all(conn).await?)
    }

    async fn fetch_count<C>(conn: &C, stmt: Statement) -> Result<u64>
    where
        C: ConnectionTrait,
    {
        let count = match conn.query_one(stmt).await? {
            Some(row) => row.try_get::<i64>("", "count")?,
            None => 0,
        };
        Ok(count as u64)
    }

    /// Persist a new member and return it with its generated id.
    pub async fn save<C>(conn: &C, member: member::ActiveModel) -> Result<member::Model>
    where
        C: ConnectionTrait,
    {
        let saved = member.insert(conn).await?;
        debug!("Persisted member {} ({})", saved.id, saved.username);
        Ok(saved)
    }

    pub async fn delete<C>(conn: &C, member: member::Model) -> Result<()>
    where
        C: ConnectionTrait,
    {
        member.delete(conn).await?;
        Ok(())
    }

    pub async fn find_all<C>(conn: &C) -> Result<Vec<member::Model>>
    where
        C: ConnectionTrait,
    {
        let stmt = Self::statement(conn, SELECT_MEMBERS, Vec::<Value>::new());
        Self::fetch_members(conn, stmt).await
    }

    pub async fn find_by_id<C>(conn: &C, id: i64) -> Result<Option<member::Model>>
    where
        C: ConnectionTrait,
    {
        Ok(member::Entity::find_by_id(id).one(conn).await?)
    }

    /// Like [`find_by_id`](Self::find_by_id) but a missing member is an error.
    pub async fn find<C>(conn: &C, id: i64) -> Result<member::Model>
    where
        C: ConnectionTrait,
    {
        Self::find_by_id(conn, id)
            .await?
            .ok_or_else(|| RepositoryError::not_found("Member", id).into())
    }

    pub async fn count<C>(conn: &C) -> Result<u64>
    where
        C: ConnectionTrait,
    {
        let stmt = Self::statement(conn, "SELECT COUNT(*) AS count FROM members", Vec::<Value>::new());
        Self::fetch_count(conn, stmt).await
    }

    /// Members named `username` whose age is at least `age`.
    pub async fn find_by_username_and_age_greater_then<C>(
        conn: &C,
        username: &str,
        age: i32,
    ) -> Result<Vec<member::Model>>
    where
        C: ConnectionTrait,
    {
        let stmt = Self::statement(
            conn,
            "SELECT id, username, age, team_id FROM members WHERE username = ? AND age >= ?",
            [Value::from(username), Value::from(age)],
        );
        Self::fetch_members(conn, stmt).await
    }

    pub async fn find_by_username<C>(conn: &C, username: &str) -> Result<Vec<member::Model>>
    where
        C: ConnectionTrait,
    {
        let sql = member::named_query(member::FIND_BY_USERNAME)
            .ok_or_else(|| RepositoryError::UnknownNamedQuery(member::FIND_BY_USERNAME.to_string()))?;
        let stmt = Self::statement(conn, sql, [Value::from(username)]);
        Self::fetch_members(conn, stmt).await
    }

    /// Members of the given age ordered by username descending, skipping
    /// `offset` rows and returning at most `limit`.
    pub async fn find_by_page<C>(conn: &C, age: i32, offset: u64, limit: u64) -> Result<Vec<member::Model>>
    where
        C: ConnectionTrait,
    {
        let bound = |name: &str, value: u64| {
            i64::try_from(value)
                .map_err(|_| RepositoryError::InvalidPageRequest(format!("{} {} does not fit a SQL integer", name, value)))
        };
        let limit = bound("limit", limit)?;
        let offset = bound("offset", offset)?;

        let stmt = Self::statement(
            conn,
            "SELECT id, username, age, team_id FROM members WHERE age = ? ORDER BY username DESC LIMIT ? OFFSET ?",
            [Value::from(age), Value::from(limit), Value::from(offset)],
        );
        Self::fetch_members(conn, stmt).await
    }

    pub async fn total_count<C>(conn: &C, age: i32) -> Result<u64>
    where
        C: ConnectionTrait,
    {
        let stmt = Self::statement(
            conn,
            "SELECT COUNT(*) AS count FROM members WHERE age = ?",
            [Value::from(age)],
        );
        Self::fetch_count(conn, stmt).await
    }

    /// Add one to the age of every member aged `age` or older and return the
    /// number of rows changed.
    ///
    /// Models loaded before this call keep their old age.
    pub async fn bulk_age_plus<C>(conn: &C, age: i32) -> Result<u64>
    where
        C: ConnectionTrait,
    {
        let stmt = Self::statement(
            conn,
            "UPDATE members SET age = age + 1 WHERE age >= ?",
            [Value::from(age)],
        );
        let result = conn.execute(stmt).await?;
        debug!("Bulk age update touched {} members", result.rows_affected());
        Ok(result.rows_affected())
    }
}
