use anyhow::Result;
use log::info;

use roster::config::Config;
use roster::entities::{member, team};
use roster::logger::Logger;
use roster::paging::{Direction, Sort};
use roster::repositories::{MemberRepository, TeamRepository};
use roster::storage::Storage;

#[tokio::main]
async fn main() -> Result<()> {
    if std::env::args().any(|arg| arg == "--generate-config") {
        Config::generate_default_config(Config::get_default_config_path()?)?;
        return Ok(());
    }

    let config = Config::load()?;
    let logger = Logger::from_config(&config.logging)?.with_sqlx_logging(config.database.sqlx_logging);
    logger.install()?;

    let storage = Storage::new(&config.database).await?;
    if storage.has_data().await? {
        info!("Existing data found, clearing it before seeding");
        storage.clear_all_data().await?;
    }

    seed(&storage).await?;

    let sort = Sort::by(Direction::Desc, ["username"]);
    let request = config.paging.page_request(0, Some(3), sort)?;
    let page = MemberRepository::find_by_age(&storage.conn, 10, &request).await?;
    println!("{}", serde_json::to_string_pretty(&page)?);

    for row in MemberRepository::find_member_fetch_join(&storage.conn).await? {
        let team_name = row.team.as_ref().map(|t| t.name.as_str()).unwrap_or("-");
        println!("{:<10} {:>3}  {}", row.member.username, row.member.age, team_name);
    }

    let updated = MemberRepository::bulk_age_plus(&storage.conn, 20).await?;
    println!("bulk age update: {} members", updated);

    Ok(())
}

async fn seed(storage: &Storage) -> Result<()> {
    let txn = storage.begin().await?;

    let team_a = TeamRepository::save(&txn, team::ActiveModel::new("teamA")).await?;
    let team_b = TeamRepository::save(&txn, team::ActiveModel::new("teamB")).await?;

    let members = [
        ("member1", 10, &team_a),
        ("member2", 10, &team_a),
        ("member3", 10, &team_b),
        ("member4", 20, &team_b),
        ("member5", 40, &team_b),
    ];
    for (username, age, team) in members {
        MemberRepository::save(&txn, member::ActiveModel::with_age(username, age).in_team(team)).await?;
    }

    txn.commit().await?;
    info!("Seeded 2 teams and {} members", members.len());
    Ok(())
}
