//! Member repository for database operations.
//!
//! Each method corresponds to one query, spelled out with the SeaORM query
//! builder. Names follow the derived-query convention: the prefix says what
//! is returned and the `By...` suffix lists the predicates.

use anyhow::Result;
use log::debug;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, EntityTrait, JoinType, ModelTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, RelationTrait, Select,
};

use crate::entities::member::{self, MemberDto, MemberWithTeam};
use crate::entities::team;
use crate::error::RepositoryError;
use crate::paging::{Page, PageRequest, Slice};

/// Repository for member-related database operations.
pub struct MemberRepository;

impl MemberRepository {
    /// Insert the member when its id is unset, otherwise update the columns
    /// marked as set.
    pub async fn save<C>(conn: &C, member: member::ActiveModel) -> Result<member::Model>
    where
        C: ConnectionTrait,
    {
        let saved = if matches!(member.id, ActiveValue::NotSet) {
            member.insert(conn).await?
        } else {
            member.update(conn).await?
        };
        debug!("Saved member {} ({})", saved.id, saved.username);
        Ok(saved)
    }

    pub async fn find_by_id<C>(conn: &C, id: i64) -> Result<Option<member::Model>>
    where
        C: ConnectionTrait,
    {
        Ok(member::Entity::find_by_id(id).one(conn).await?)
    }

    pub async fn find_all<C>(conn: &C) -> Result<Vec<member::Model>>
    where
        C: ConnectionTrait,
    {
        Ok(member::Entity::find().order_by_asc(member::Column::Id).all(conn).await?)
    }

    pub async fn count<C>(conn: &C) -> Result<u64>
    where
        C: ConnectionTrait,
    {
        Ok(member::Entity::find().count(conn).await?)
    }

    pub async fn delete<C>(conn: &C, member: member::Model) -> Result<()>
    where
        C: ConnectionTrait,
    {
        member.delete(conn).await?;
        Ok(())
    }

    /// Delete by id. Returns whether a row was removed.
    pub async fn delete_by_id<C>(conn: &C, id: i64) -> Result<bool>
    where
        C: ConnectionTrait,
    {
        let result = member::Entity::delete_by_id(id).exec(conn).await?;
        Ok(result.rows_affected > 0)
    }

    pub async fn delete_all<C>(conn: &C) -> Result<u64>
    where
        C: ConnectionTrait,
    {
        let result = member::Entity::delete_many().exec(conn).await?;
        Ok(result.rows_affected)
    }

    /// Members named `username` strictly older than `age`.
    pub async fn find_by_username_and_age_greater_than<C>(
        conn: &C,
        username: &str,
        age: i32,
    ) -> Result<Vec<member::Model>>
    where
        C: ConnectionTrait,
    {
        Ok(member::Entity::find()
            .filter(member::Column::Username.eq(username))
            .filter(member::Column::Age.gt(age))
            .order_by_asc(member::Column::Id)
            .all(conn)
            .await?)
    }

    /// A subject with no predicate selects every member.
    pub async fn find_hello_by<C>(conn: &C) -> Result<Vec<member::Model>>
    where
        C: ConnectionTrait,
    {
        Self::find_all(conn).await
    }

    pub async fn find_top3_hello_by<C>(conn: &C) -> Result<Vec<member::Model>>
    where
        C: ConnectionTrait,
    {
        Ok(member::Entity::find()
            .order_by_asc(member::Column::Id)
            .limit(3)
            .all(conn)
            .await?)
    }

    /// Runs the `Member.findByUsername` named query.
    pub async fn find_by_username<C>(conn: &C, username: &str) -> Result<Vec<member::Model>>
    where
        C: ConnectionTrait,
    {
        crate::repositories::MemberJpaRepository::find_by_username(conn, username).await
    }

    pub async fn find_user<C>(conn: &C, username: &str, age: i32) -> Result<Vec<member::Model>>
    where
        C: ConnectionTrait,
    {
        Ok(member::Entity::find()
            .filter(member::Column::Username.eq(username))
            .filter(member::Column::Age.eq(age))
            .order_by_asc(member::Column::Id)
            .all(conn)
            .await?)
    }

    pub async fn find_username_list<C>(conn: &C) -> Result<Vec<String>>
    where
        C: ConnectionTrait,
    {
        Ok(member::Entity::find()
            .select_only()
            .column(member::Column::Username)
            .order_by_asc(member::Column::Id)
            .into_tuple::<String>()
            .all(conn)
            .await?)
    }

    /// Projection of members that belong to a team. Members without a team
    /// are left out by the inner join.
    pub async fn find_member_dto<C>(conn: &C) -> Result<Vec<MemberDto>>
    where
        C: ConnectionTrait,
    {
        Ok(member::Entity::find()
            .select_only()
            .column(member::Column::Id)
            .column(member::Column::Username)
            .column_as(team::Column::Name, "team_name")
            .join(JoinType::InnerJoin, member::Relation::Team.def())
            .order_by_asc(member::Column::Id)
            .into_model::<MemberDto>()
            .all(conn)
            .await?)
    }

    pub async fn find_by_names<C, S>(conn: &C, names: &[S]) -> Result<Vec<member::Model>>
    where
        C: ConnectionTrait,
        S: AsRef<str>,
    {
        if names.is_empty() {
            return Ok(Vec::new());
        }
        Ok(member::Entity::find()
            .filter(member::Column::Username.is_in(names.iter().map(|name| name.as_ref())))
            .order_by_asc(member::Column::Id)
            .all(conn)
            .await?)
    }

    pub async fn find_list_by_username<C>(conn: &C, username: &str) -> Result<Vec<member::Model>>
    where
        C: ConnectionTrait,
    {
        Ok(Self::by_username(username).all(conn).await?)
    }

    /// Exactly one member with this username.
    pub async fn find_member_by_username<C>(conn: &C, username: &str) -> Result<member::Model>
    where
        C: ConnectionTrait,
    {
        Self::find_optional_by_username(conn, username)
            .await?
            .ok_or_else(|| RepositoryError::not_found("Member", username).into())
    }

    /// At most one member with this username.
    pub async fn find_optional_by_username<C>(conn: &C, username: &str) -> Result<Option<member::Model>>
    where
        C: ConnectionTrait,
    {
        // Two rows are enough to tell "one" from "more than one".
        let mut found = Self::by_username(username).limit(2).all(conn).await?;
        if found.len() > 1 {
            let actual = Self::by_username(username).count(conn).await? as usize;
            return Err(RepositoryError::IncorrectResultSize { expected: 1, actual }.into());
        }
        Ok(found.pop())
    }

    fn by_username(username: &str) -> Select<member::Entity> {
        member::Entity::find()
            .filter(member::Column::Username.eq(username))
            .order_by_asc(member::Column::Id)
    }

    fn by_age(age: i32) -> Select<member::Entity> {
        member::Entity::find().filter(member::Column::Age.eq(age))
    }

    /// One page of members of the given age.
    ///
    /// The content query left-joins the team; the count query runs against
    /// `members` alone and is skipped when the content already gives the total.
    pub async fn find_by_age<C>(conn: &C, age: i32, pageable: &PageRequest) -> Result<Page<member::Model>>
    where
        C: ConnectionTrait,
    {
        let content_query = Self::by_age(age).join(JoinType::LeftJoin, member::Relation::Team.def());
        let content = pageable
            .sort()
            .apply(content_query)?
            .order_by_asc(member::Column::Id)
            .offset(pageable.offset())
            .limit(pageable.size())
            .all(conn)
            .await?;

        let total = match pageable.known_total(content.len()) {
            Some(total) => total,
            None => Self::by_age(age).count(conn).await?,
        };
        debug!(
            "Page {} of members aged {}: {} of {} rows",
            pageable.page(),
            age,
            content.len(),
            total
        );
        Ok(Page::new(content, pageable, total))
    }

    /// One slice of members of the given age; no count query is issued.
    pub async fn find_slice_by_age<C>(conn: &C, age: i32, pageable: &PageRequest) -> Result<Slice<member::Model>>
    where
        C: ConnectionTrait,
    {
        let rows = pageable
            .sort()
            .apply(Self::by_age(age))?
            .order_by_asc(member::Column::Id)
            .offset(pageable.offset())
            .limit(pageable.overfetch_limit())
            .all(conn)
            .await?;
        Ok(Slice::from_overfetched(rows, pageable))
    }

    /// Add one to the age of every member aged `age` or older.
    ///
    /// Returns the number of rows changed. The update goes straight to the
    /// database: models loaded earlier keep their old age until re-read.
    pub async fn bulk_age_plus<C>(conn: &C, age: i32) -> Result<u64>
    where
        C: ConnectionTrait,
    {
        let result = member::Entity::update_many()
            .col_expr(member::Column::Age, Expr::col(member::Column::Age).add(1))
            .filter(member::Column::Age.gte(age))
            .exec(conn)
            .await?;
        debug!("Bulk age update touched {} members", result.rows_affected);
        Ok(result.rows_affected)
    }

    /// Every member with its team, loaded in one left-joined query.
    pub async fn find_member_fetch_join<C>(conn: &C) -> Result<Vec<MemberWithTeam>>
    where
        C: ConnectionTrait,
    {
        Ok(member::Entity::find()
            .find_also_related(team::Entity)
            .order_by_asc(member::Column::Id)
            .all(conn)
            .await?
            .into_iter()
            .map(MemberWithTeam::from)
            .collect())
    }

    /// Members named `username` with their team fetched eagerly.
    pub async fn find_entity_graph_by_username<C>(conn: &C, username: &str) -> Result<Vec<MemberWithTeam>>
    where
        C: ConnectionTrait,
    {
        Ok(Self::by_username(username)
            .find_also_related(team::Entity)
            .all(conn)
            .await?
            .into_iter()
            .map(MemberWithTeam::from)
            .collect())
    }

    /// Load a member's team on demand. Calling this for each member of a
    /// list issues one query per member.
    pub async fn find_team<C>(conn: &C, member: &member::Model) -> Result<Option<team::Model>>
    where
        C: ConnectionTrait,
    {
        if member.team_id.is_none() {
            return Ok(None);
        }
        Ok(member.find_related(team::Entity).one(conn).await?)
    }
}
