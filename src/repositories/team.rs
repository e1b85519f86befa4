//! Team repository for database operations.

use anyhow::Result;
use sea_orm::{ActiveModelTrait, ActiveValue, ConnectionTrait, EntityTrait, ModelTrait, PaginatorTrait, QueryOrder};

use crate::entities::{member, team};

/// Repository for team-related database operations.
pub struct TeamRepository;

impl TeamRepository {
    /// Insert the team when its id is unset, otherwise update it.
    pub async fn save<C>(conn: &C, team: team::ActiveModel) -> Result<team::Model>
    where
        C: ConnectionTrait,
    {
        if matches!(team.id, ActiveValue::NotSet) {
            Ok(team.insert(conn).await?)
        } else {
            Ok(team.update(conn).await?)
        }
    }

    pub async fn find_by_id<C>(conn: &C, id: i64) -> Result<Option<team::Model>>
    where
        C: ConnectionTrait,
    {
        Ok(team::Entity::find_by_id(id).one(conn).await?)
    }

    pub async fn find_all<C>(conn: &C) -> Result<Vec<team::Model>>
    where
        C: ConnectionTrait,
    {
        Ok(team::Entity::find().order_by_asc(team::Column::Id).all(conn).await?)
    }

    pub async fn count<C>(conn: &C) -> Result<u64>
    where
        C: ConnectionTrait,
    {
        Ok(team::Entity::find().count(conn).await?)
    }

    /// Delete a team. Fails while members still reference it.
    pub async fn delete<C>(conn: &C, team: team::Model) -> Result<()>
    where
        C: ConnectionTrait,
    {
        team.delete(conn).await?;
        Ok(())
    }

    /// The members of a team, in id order.
    pub async fn find_members<C>(conn: &C, team: &team::Model) -> Result<Vec<member::Model>>
    where
        C: ConnectionTrait,
    {
        Ok(team
            .find_related(member::Entity)
            .order_by_asc(member::Column::Id)
            .all(conn)
            .await?)
    }

    /// Every team with its member collection.
    pub async fn find_all_with_members<C>(conn: &C) -> Result<Vec<(team::Model, Vec<member::Model>)>>
    where
        C: ConnectionTrait,
    {
        Ok(team::Entity::find()
            .find_with_related(member::Entity)
            .order_by_asc(team::Column::Id)
            .order_by_asc(member::Column::Id)
            .all(conn)
            .await?)
    }
}
