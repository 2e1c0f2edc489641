use crate::auth::{
    jwt::JwtKeys,
    repo::{PgUserStore, UserStore},
};
use crate::config::AppConfig;
use crate::db;
use crate::properties::repo::{PgPropertyStore, PropertyStore};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub keys: JwtKeys,
    pub users: Arc<dyn UserStore>,
    pub properties: Arc<dyn PropertyStore>,
}

impl AppState {
    pub async fn init(config: AppConfig) -> anyhow::Result<Self> {
        let pool = db::connect(&config).await?;
        db::migrate(&pool).await;

        let users = Arc::new(PgUserStore::new(pool.clone())) as Arc<dyn UserStore>;
        let properties = Arc::new(PgPropertyStore::new(pool)) as Arc<dyn PropertyStore>;
        Ok(Self::from_parts(Arc::new(config), users, properties))
    }

    pub fn from_parts(
        config: Arc<AppConfig>,
        users: Arc<dyn UserStore>,
        properties: Arc<dyn PropertyStore>,
    ) -> Self {
        Self {
            keys: JwtKeys::from_config(&config.jwt),
            config,
            users,
            properties,
        }
    }
}
