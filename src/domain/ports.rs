use crate::domain::model::FileData;
use crate::utils::error::Result;
use async_trait::async_trait;

/// Anything that can hand over raw card-list or package files.
#[async_trait]
pub trait CardListSource: Send + Sync {
    async fn load(&self) -> Result<Vec<FileData>>;
}

pub trait ConfigProvider: Send + Sync {
    fn card_directories(&self) -> &[String];
    fn package_directory(&self) -> Option<&str>;
    fn deck_name(&self) -> &str;
    fn commander_name(&self) -> &str;
}
