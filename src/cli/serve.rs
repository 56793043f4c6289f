use anyhow::Result;
use tracing::info;

use super::CommonArgs;
use crate::server;

pub async fn run(common: CommonArgs, bind: Option<String>, topics: Option<String>) -> Result<()> {
    let mut config = common.load_config()?;

    if let Some(bind) = bind {
        info!("CLI override: bind = {}", bind);
        config.server.bind = bind;
    }
    if let Some(topics) = topics {
        info!("CLI override: topics_path = {}", topics);
        config.server.topics_path = Some(topics);
    }

    server::serve(config, common.dry_run).await
}
