mod common;

use roster::entities::team;
use roster::repositories::{MemberRepository, TeamRepository};
use sea_orm::ActiveValue;

#[tokio::test]
async fn test_team_crud() {
    let storage = common::storage().await;
    let conn = &storage.conn;

    let team_a = common::save_team(conn, "teamA").await;
    let team_b = common::save_team(conn, "teamB").await;

    assert_eq!(TeamRepository::find_by_id(conn, team_a.id).await.unwrap(), Some(team_a.clone()));
    assert_eq!(TeamRepository::find_all(conn).await.unwrap(), vec![team_a.clone(), team_b.clone()]);
    assert_eq!(TeamRepository::count(conn).await.unwrap(), 2);

    let mut renamed: team::ActiveModel = team_b.into();
    renamed.name = ActiveValue::Set("teamC".to_string());
    let renamed = TeamRepository::save(conn, renamed).await.unwrap();
    assert_eq!(renamed.name, "teamC");

    TeamRepository::delete(conn, renamed).await.unwrap();
    TeamRepository::delete(conn, team_a).await.unwrap();
    assert_eq!(TeamRepository::count(conn).await.unwrap(), 0);
}

#[tokio::test]
async fn test_find_members() {
    let storage = common::storage().await;
    let conn = &storage.conn;

    let team_a = common::save_team(conn, "teamA").await;
    let team_b = common::save_team(conn, "teamB").await;
    let m1 = common::save_member_in(conn, "member1", 10, &team_a).await;
    let m2 = common::save_member_in(conn, "member2", 20, &team_a).await;
    let m3 = common::save_member_in(conn, "member3", 30, &team_b).await;

    assert_eq!(TeamRepository::find_members(conn, &team_a).await.unwrap(), vec![m1.clone(), m2.clone()]);

    let with_members = TeamRepository::find_all_with_members(conn).await.unwrap();
    assert_eq!(with_members.len(), 2);
    assert_eq!(with_members[0], (team_a, vec![m1, m2]));
    assert_eq!(with_members[1], (team_b, vec![m3]));
}

#[tokio::test]
async fn test_delete_team_with_members_fails() {
    let storage = common::storage().await;
    let conn = &storage.conn;

    let team = common::save_team(conn, "teamA").await;
    let member = common::save_member_in(conn, "member1", 10, &team).await;

    assert!(TeamRepository::delete(conn, team.clone()).await.is_err());

    MemberRepository::delete(conn, member).await.unwrap();
    TeamRepository::delete(conn, team).await.unwrap();
    assert_eq!(TeamRepository::count(conn).await.unwrap(), 0);
}

#[tokio::test]
async fn test_storage_helpers() {
    let storage = common::storage().await;

    assert!(!storage.has_data().await.unwrap());

    let team = common::save_team(&storage.conn, "teamA").await;
    common::save_member_in(&storage.conn, "member1", 10, &team).await;
    assert!(storage.has_data().await.unwrap());

    storage.clear_all_data().await.unwrap();
    assert!(!storage.has_data().await.unwrap());
}
