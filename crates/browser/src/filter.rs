use stockwatch_core::common::StockSymbol;

/// 触发子串回退所需的最少查询字符数
pub const SUBSTRING_FALLBACK_MIN_CHARS: usize = 2;

/// # Summary
/// 规范化查询串：去首尾空白并转小写。
pub fn normalize_query(query: &str) -> String {
    query.trim().to_lowercase()
}

/// # Summary
/// 按 "前缀优先、子串回退" 策略过滤股票列表。
///
/// # Logic
/// 1. 查询为空 (或全为空白) 时返回完整列表。
/// 2. 计算前缀集合：代码或名称以查询开头 (不区分大小写)。
/// 3. 前缀集合非空，或查询少于 2 个字符时，直接返回前缀集合 (可能为空)。
/// 4. 否则回退为子串集合：代码或名称任意位置包含查询。
///
/// # Arguments
/// * `stocks`: 待过滤的有效列表。
/// * `query`: 原始查询串。
///
/// # Returns
/// 命中记录的引用，保持 `stocks` 中的相对顺序。
pub fn filter_stocks<'a>(stocks: &'a [StockSymbol], query: &str) -> Vec<&'a StockSymbol> {
    filter_indices(stocks, query)
        .into_iter()
        .filter_map(|i| stocks.get(i))
        .collect()
}

/// # Summary
/// 与 `filter_stocks` 相同的策略，返回命中记录在 `stocks` 中的下标。
pub fn filter_indices(stocks: &[StockSymbol], query: &str) -> Vec<usize> {
    let q = normalize_query(query);
    if q.is_empty() {
        return (0..stocks.len()).collect();
    }

    let lowered: Vec<(String, String)> = stocks
        .iter()
        .map(|s| (s.symbol.to_lowercase(), s.name.to_lowercase()))
        .collect();

    let prefix: Vec<usize> = lowered
        .iter()
        .enumerate()
        .filter(|(_, (symbol, name))| symbol.starts_with(&q) || name.starts_with(&q))
        .map(|(i, _)| i)
        .collect();

    if !prefix.is_empty() || q.chars().count() < SUBSTRING_FALLBACK_MIN_CHARS {
        return prefix;
    }

    lowered
        .iter()
        .enumerate()
        .filter(|(_, (symbol, name))| symbol.contains(&q) || name.contains(&q))
        .map(|(i, _)| i)
        .collect()
}
