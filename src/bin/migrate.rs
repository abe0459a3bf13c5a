use ozinshe_api::{
    config::AppConfig,
    db::{create_orm_conn, run_migrations},
    services::auth_service::bootstrap_admin,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;
    let orm = create_orm_conn(&config.database_url).await?;
    run_migrations(&orm).await?;

    if let (Some(email), Some(password)) = (&config.admin_email, &config.admin_password) {
        bootstrap_admin(&orm, email, password).await?;
    }

    println!("Migrations applied");
    Ok(())
}
