//! 命令行参数定义。

use clap::{Args, Parser, Subcommand};
use stockwatch_core::config::{BrowserConfig, ClientConfig, StorageConfig};

/// stockwatch - 在终端里跟踪股票代码
#[derive(Debug, Parser)]
#[command(name = "stockwatch", version, about = "Track stock tickers from the terminal")]
pub struct Cli {
    /// stockwatch 服务端地址
    #[arg(long, global = true, env = "STOCKWATCH_SERVER_URL", default_value_t = ClientConfig::default().server_url)]
    pub server_url: String,

    /// 本地数据目录 (自选股保存于 <data-dir>/watchlist.json)
    #[arg(long, global = true, env = "STOCKWATCH_DATA_DIR", default_value_t = StorageConfig::default().data_dir)]
    pub data_dir: String,

    /// 自选股所在的存储槽 (文件名为 <slot>.json)
    #[arg(long, global = true, env = "STOCKWATCH_WATCHLIST_SLOT", default_value_t = StorageConfig::default().watchlist_slot)]
    pub watchlist_slot: String,

    /// 单次请求超时 (秒)
    #[arg(long, global = true, default_value_t = 10)]
    pub timeout_secs: u64,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// 查看或编辑自选股 (默认列出)
    Watchlist(WatchlistArgs),
    /// 浏览全部股票，热门股票排在最前
    Browse(BrowseArgs),
    /// 查看单只股票的报价与最近 7 天收盘价
    Show(ShowArgs),
}

#[derive(Debug, Args)]
pub struct WatchlistArgs {
    #[command(subcommand)]
    pub action: Option<WatchlistAction>,
}

#[derive(Debug, Subcommand)]
pub enum WatchlistAction {
    /// 列出自选股
    List,
    /// 添加股票代码 (先向服务端校验)
    Add {
        ticker: String,
        /// 跳过服务端校验
        #[arg(long)]
        no_validate: bool,
    },
    /// 移除股票代码
    Remove { ticker: String },
    /// 清空自选股
    Clear,
}

#[derive(Debug, Args)]
pub struct BrowseArgs {
    /// 按代码或名称搜索
    #[arg(long, short)]
    pub query: Option<String>,

    /// 跳转到指定页
    #[arg(long, short)]
    pub page: Option<String>,

    /// 只浏览热门股票，不加载完整目录
    #[arg(long)]
    pub popular_only: bool,

    /// 每页记录数
    #[arg(long, default_value_t = BrowserConfig::default().page_size)]
    pub page_size: usize,
}

#[derive(Debug, Args)]
pub struct ShowArgs {
    pub symbol: String,
}
