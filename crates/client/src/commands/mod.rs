//! 子命令实现：每个命令把结果写入给定的输出流。

pub mod browse;
pub mod show;
pub mod watchlist;

use std::io::Write;
use std::sync::Arc;
use std::time::Duration;
use stockwatch_store::file::FileSlotStorage;
use stockwatch_store::watchlist::WatchlistStore;

use crate::cli::{Cli, Command};
use crate::error::ClientError;
use crate::http::{ApiClient, HttpDirectory};

/// # Summary
/// 执行解析后的命令。
///
/// # Logic
/// 1. 构建服务端客户端。
/// 2. 自选股命令先从数据目录下的指定存储槽加载本地存储。
/// 3. 分发到对应命令。
pub async fn run<W: Write>(cli: &Cli, out: &mut W) -> Result<(), ClientError> {
    let api = ApiClient::new(&cli.server_url, Duration::from_secs(cli.timeout_secs))?;

    match &cli.command {
        Command::Watchlist(args) => {
            let storage = Arc::new(FileSlotStorage::with_root(&cli.data_dir).await?);
            let mut store = WatchlistStore::load_from(storage, &cli.watchlist_slot).await;
            let directory = HttpDirectory::new(api);
            watchlist::run(args.action.as_ref(), &mut store, &directory, out).await
        }
        Command::Browse(args) => {
            let directory = HttpDirectory::new(api);
            browse::run(args, &directory, out).await
        }
        Command::Show(args) => show::run(&args.symbol, &api, out).await,
    }
}
