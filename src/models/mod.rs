mod application;
mod company;
mod education;
mod experience;
mod job;
mod project;
mod referral;
mod skill;
mod user;

pub use application::{Application, ApplicationDetail, ApplicationStatus};
pub use company::{Company, CompanyChanges};
pub use education::Education;
pub use experience::Experience;
pub use job::Job;
pub use project::Project;
pub use referral::Referral;
pub use skill::Skill;
pub use user::{Role, User};
