#![allow(dead_code)]

use roster::entities::{member, team};
use roster::repositories::{MemberRepository, TeamRepository};
use roster::storage::Storage;
use sea_orm::ConnectionTrait;

/// Fresh in-memory database with the schema in place.
pub async fn storage() -> Storage {
    Storage::in_memory().await.expect("in-memory storage should open")
}

pub async fn save_member<C: ConnectionTrait>(conn: &C, username: &str, age: i32) -> member::Model {
    MemberRepository::save(conn, member::ActiveModel::with_age(username, age))
        .await
        .expect("member should save")
}

pub async fn save_member_in<C: ConnectionTrait>(conn: &C, username: &str, age: i32, team: &team::Model) -> member::Model {
    MemberRepository::save(conn, member::ActiveModel::with_age(username, age).in_team(team))
        .await
        .expect("member should save")
}

pub async fn save_team<C: ConnectionTrait>(conn: &C, name: &str) -> team::Model {
    TeamRepository::save(conn, team::ActiveModel::new(name))
        .await
        .expect("team should save")
}
