use std::io::Write;
use stockwatch_core::common::normalize_ticker;
use stockwatch_core::directory::port::SymbolDirectory;
use stockwatch_store::watchlist::WatchlistStore;

use crate::cli::WatchlistAction;
use crate::error::ClientError;

/// # Summary
/// 自选股命令 (首页视图)。
///
/// # Logic
/// 1. 无子命令时等同 `list`。
/// 2. `add` 先规范化代码，再向代码目录校验 (可跳过)，通过后写入本地存储。
/// 3. `remove`、`clear` 直接修改本地存储。
/// 4. 每次修改后输出当前列表。
pub async fn run<W: Write>(
    action: Option<&WatchlistAction>,
    store: &mut WatchlistStore,
    directory: &dyn SymbolDirectory,
    out: &mut W,
) -> Result<(), ClientError> {
    match action {
        None | Some(WatchlistAction::List) => {}
        Some(WatchlistAction::Add {
            ticker,
            no_validate,
        }) => {
            let ticker = normalize_ticker(ticker)
                .ok_or_else(|| ClientError::Usage("ticker must not be empty".to_string()))?;
            if store.contains(&ticker) {
                writeln!(out, "{} is already in your watchlist", ticker)?;
            } else {
                if !no_validate {
                    let valid = directory
                        .validate(&ticker)
                        .await
                        .map_err(ClientError::Validation)?;
                    if !valid {
                        return Err(ClientError::InvalidTicker(ticker));
                    }
                }
                store.add(&ticker).await?;
                writeln!(out, "Added {}", ticker)?;
            }
        }
        Some(WatchlistAction::Remove { ticker }) => {
            let display = ticker.trim().to_uppercase();
            if store.remove(ticker).await? {
                writeln!(out, "Removed {}", display)?;
            } else {
                writeln!(out, "{} was not in your watchlist", display)?;
            }
        }
        Some(WatchlistAction::Clear) => {
            store.clear().await?;
            writeln!(out, "Watchlist cleared")?;
        }
    }

    render(store, out)
}

fn render<W: Write>(store: &WatchlistStore, out: &mut W) -> Result<(), ClientError> {
    writeln!(out, "Watched Stocks")?;
    if store.is_empty() {
        writeln!(out, "  No stocks added yet.")?;
    }
    for symbol in store.symbols() {
        writeln!(out, "  {}", symbol)?;
    }
    Ok(())
}
