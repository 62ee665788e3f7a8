//! Startup data: the configured super admin and a sample job for an empty
//! board.

use sqlx::PgPool;

use crate::auth::password;
use crate::config::BootstrapAdmin;
use crate::db;
use crate::error::AppError;
use crate::models::Role;

pub async fn run(pool: &PgPool, bootstrap: Option<&BootstrapAdmin>) -> Result<(), AppError> {
    if let Some(admin) = bootstrap {
        ensure_super_admin(pool, admin).await?;
    }
    seed_sample_job(pool).await
}

/// Create the account, or promote it if it exists. An existing password is
/// left untouched.
async fn ensure_super_admin(pool: &PgPool, admin: &BootstrapAdmin) -> Result<(), AppError> {
    let email = admin.email.trim().to_lowercase();

    match db::users::find_by_email(pool, &email).await? {
        Some(user) if user.role() == Role::SuperAdmin => {}
        Some(user) => {
            db::users::set_role(pool, user.id, Role::SuperAdmin).await?;
            tracing::info!(user_id = user.id, "Promoted bootstrap account to super admin");
        }
        None => {
            let password_hash = password::hash(&admin.password).map_err(AppError::Internal)?;
            let user = db::users::create(
                pool,
                &db::users::NewUser {
                    email: &email,
                    password_hash: &password_hash,
                    role: Role::SuperAdmin,
                    full_name: admin.full_name.as_deref(),
                    phone: None,
                    location: None,
                },
            )
            .await?;
            tracing::info!(user_id = user.id, "Created bootstrap super admin");
        }
    }

    Ok(())
}

async fn seed_sample_job(pool: &PgPool) -> Result<(), AppError> {
    let mut tx = pool.begin().await?;

    if db::jobs::count_all(&mut *tx).await? > 0 {
        return Ok(());
    }
    let Some(owner) = db::users::find_super_admin(&mut *tx).await? else {
        tracing::debug!("No super admin yet, skipping sample job");
        return Ok(());
    };

    let tags = ["Python", "JavaScript", "React"].map(String::from);
    let job = db::jobs::create(
        &mut *tx,
        &db::jobs::NewJob {
            company: "Sample Company",
            title: "Software Developer",
            description: "This is a sample job posting for a software developer position.",
            location: "Remote",
            salary: "$80,000 - $100,000",
            tags: &tags,
            date_posted: None,
            admin_id: owner.id,
        },
    )
    .await?;
    tx.commit().await?;

    tracing::info!(job_id = job.id, "Seeded sample job");
    Ok(())
}
