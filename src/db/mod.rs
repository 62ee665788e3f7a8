pub mod applications;
pub mod companies;
pub mod education;
pub mod experience;
pub mod jobs;
pub mod projects;
pub mod referrals;
pub mod skills;
pub mod users;
