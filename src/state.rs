use std::sync::Arc;

use sqlx::PgPool;

use crate::config::Config;
use crate::directory::CompanyStore;
use crate::rate_limit::LoginRateLimiter;
use crate::upload::storage::UploadDir;

pub type SharedState = Arc<AppState>;

pub struct AppState {
    pub pool: PgPool,
    pub config: Config,
    pub companies: Arc<dyn CompanyStore>,
    pub uploads: UploadDir,
    pub login_limiter: LoginRateLimiter,
}
