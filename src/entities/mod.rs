pub mod member;
pub mod team;

pub use member::Entity as Member;
pub use team::Entity as Team;
