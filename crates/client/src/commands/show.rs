use std::io::Write;
use stockwatch_api::types::QuoteSnapshotResponse;
use stockwatch_core::common::normalize_ticker;

use crate::error::ClientError;
use crate::http::ApiClient;

/// # Summary
/// 单只股票详情视图。
///
/// # Logic
/// 1. 规范化代码，空输入视为用法错误。
/// 2. 请求服务端行情快照；失败时服务端信息 (例如 "error fetching data for X") 原样返回。
/// 3. 输出报价字段与最近 7 天收盘价 (保持数据源顺序)。
pub async fn run<W: Write>(symbol: &str, api: &ApiClient, out: &mut W) -> Result<(), ClientError> {
    let symbol = normalize_ticker(symbol)
        .ok_or_else(|| ClientError::Usage("symbol must not be empty".to_string()))?;
    let snapshot = api.quote(&symbol).await?;
    render(&snapshot, out)
}

fn render<W: Write>(s: &QuoteSnapshotResponse, out: &mut W) -> Result<(), ClientError> {
    writeln!(out, "{} Stock ({})", s.symbol, s.display_name)?;
    writeln!(out, "Current Price: ${}", s.price)?;

    match (&s.change_percent, &s.change_absolute) {
        (Some(pct), Some(abs)) => writeln!(out, "Change: {}% ({})", signed(pct), signed(abs))?,
        (Some(pct), None) => writeln!(out, "Change: {}%", signed(pct))?,
        (None, Some(abs)) => writeln!(out, "Change: {}", signed(abs))?,
        (None, None) => writeln!(out, "Change: n/a")?,
    }

    let volume = s.volume.map(format_volume).unwrap_or_else(|| "n/a".to_string());
    writeln!(out, "Volume: {}", volume)?;

    match (&s.week52_low, &s.week52_high) {
        (Some(low), Some(high)) => writeln!(out, "52-Week Range: ${} - ${}", low, high)?,
        _ => writeln!(out, "52-Week Range: n/a")?,
    }

    writeln!(out, "Last 7 days:")?;
    if s.history.is_empty() {
        writeln!(out, "  No price history available.")?;
    }
    for point in &s.history {
        writeln!(out, "  {}  {}", point.date, point.close_price)?;
    }
    Ok(())
}

// 非负数补上 "+" 号
fn signed(value: &str) -> String {
    if value.starts_with('-') {
        value.to_string()
    } else {
        format!("+{}", value)
    }
}

/// 成交量缩写，例如 75_300_000 → "75.3M"
pub fn format_volume(volume: u64) -> String {
    const UNITS: [(u64, &str); 3] = [(1_000_000_000, "B"), (1_000_000, "M"), (1_000, "K")];
    for (size, suffix) in UNITS {
        if volume >= size {
            let whole = volume / size;
            let tenth = volume % size / (size / 10);
            return if tenth == 0 {
                format!("{}{}", whole, suffix)
            } else {
                format!("{}.{}{}", whole, tenth, suffix)
            };
        }
    }
    volume.to_string()
}
