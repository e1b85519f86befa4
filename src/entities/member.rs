use sea_orm::entity::prelude::*;
use sea_orm::{ActiveValue, FromQueryResult};
use serde::{Deserialize, Serialize};

/// Named query looked up by `MemberJpaRepository::find_by_username` and
/// `MemberRepository::find_by_username`.
pub const FIND_BY_USERNAME: &str = "Member.findByUsername";

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "members")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub username: String,
    pub age: i32,
    pub team_id: Option<i64>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::team::Entity",
        from = "Column::TeamId",
        to = "super::team::Column::Id"
    )]
    Team,
}

impl Related<super::team::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Team.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl ActiveModel {
    /// A member with age 0 and no team.
    pub fn new(username: impl Into<String>) -> Self {
        Self::with_age(username, 0)
    }

    pub fn with_age(username: impl Into<String>, age: i32) -> Self {
        Self {
            id: ActiveValue::NotSet,
            username: ActiveValue::Set(username.into()),
            age: ActiveValue::Set(age),
            team_id: ActiveValue::Set(None),
        }
    }

    /// Assign the member to an already saved team.
    pub fn in_team(mut self, team: &super::team::Model) -> Self {
        self.team_id = ActiveValue::Set(Some(team.id));
        self
    }
}

impl Model {
    /// Build an update that moves this member to `team`. Only `team_id` is
    /// marked dirty.
    pub fn change_team(&self, team: &super::team::Model) -> ActiveModel {
        let mut active: ActiveModel = self.clone().into();
        active.team_id = ActiveValue::Set(Some(team.id));
        active
    }
}

/// Resolve a named query to its SQL text.
///
/// Named queries select every member column so that the rows map straight
/// onto [`Model`].
pub fn named_query(name: &str) -> Option<&'static str> {
    match name {
        FIND_BY_USERNAME => Some("SELECT id, username, age, team_id FROM members WHERE username = ?"),
        _ => None,
    }
}

/// Member projection carrying the team name instead of the foreign key.
#[derive(Clone, Debug, PartialEq, Eq, FromQueryResult, Serialize, Deserialize)]
pub struct MemberDto {
    pub id: i64,
    pub username: String,
    pub team_name: Option<String>,
}

impl MemberDto {
    pub fn new(id: i64, username: impl Into<String>, team_name: Option<String>) -> Self {
        Self {
            id,
            username: username.into(),
            team_name,
        }
    }
}

impl From<&Model> for MemberDto {
    fn from(member: &Model) -> Self {
        Self::new(member.id, member.username.clone(), None)
    }
}

/// A member loaded together with its team in a single query.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MemberWithTeam {
    pub member: Model,
    pub team: Option<super::team::Model>,
}

impl From<(Model, Option<super::team::Model>)> for MemberWithTeam {
    fn from((member, team): (Model, Option<super::team::Model>)) -> Self {
        Self { member, team }
    }
}
