use sqlx::postgres::PgPool;

use crate::controllers::comment::CommentController;
use crate::controllers::image::ImageController;
use crate::controllers::user::UserController;
use crate::core::client::Client;
use crate::core::config::Args;
use crate::core::error::ConfigError;
use crate::utils::token::TokenCodec;

#[derive(Clone, Debug)]
pub(crate) struct AppState {
    pub(crate) pool: PgPool,
    pub(crate) client: Client,
    pub(crate) tokens: TokenCodec,
    pub(crate) users: UserController,
    pub(crate) images: ImageController,
    pub(crate) comments: CommentController,
    pub(crate) media_dir: String,
    pub(crate) secure_cookies: bool,
}

impl AppState {
    pub(crate) async fn new(database_url: &str, config: &Args) -> Result<Self, ConfigError> {
        let pool = PgPool::connect(database_url).await?;

        let secret = config.session_secret()?;

        Ok(AppState {
            pool: pool.clone(),
            client: Client::new(config.openai_api_key.clone())?,
            tokens: TokenCodec::new(&secret),
            users: UserController::new(pool.clone())?,
            images: ImageController::new(pool.clone()),
            comments: CommentController::new(pool),
            media_dir: config.media_dir.clone(),
            secure_cookies: config.is_production(),
        })
    }
}
