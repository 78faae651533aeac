use std::collections::HashSet;
use stockwatch_core::common::StockSymbol;

/// # Summary
/// 合并热门列表与补充目录：`base ++ (supplemental − base)`。
///
/// # Logic
/// 1. 收集 `base` 中的全部代码。
/// 2. 依次保留 `base` 全部条目。
/// 3. 追加 `supplemental` 中代码未出现在 `base` 的条目，保持到达顺序。
///
/// # Invariants
/// - 纯函数，相同输入得到逐位相同的输出。
/// - 去重仅以代码完全相等判断；`base`、`supplemental` 内部自身的重复不做处理。
///
/// # Arguments
/// * `base`: 热门列表。
/// * `supplemental`: 异步加载的完整目录。
///
/// # Returns
/// 合并后的有效列表。
pub fn merge_candidates(base: &[StockSymbol], supplemental: &[StockSymbol]) -> Vec<StockSymbol> {
    let base_symbols: HashSet<&str> = base.iter().map(|s| s.symbol.as_str()).collect();

    let mut merged = Vec::with_capacity(base.len() + supplemental.len());
    merged.extend(base.iter().cloned());
    merged.extend(
        supplemental
            .iter()
            .filter(|s| !base_symbols.contains(s.symbol.as_str()))
            .cloned(),
    );
    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    fn s(symbol: &str) -> StockSymbol {
        StockSymbol::new(symbol, format!("{} Corp", symbol))
    }

    #[test]
    fn test_base_first_then_new_supplemental() {
        let base = vec![s("AAPL"), s("TSLA")];
        let supplemental = vec![s("ZZZ"), s("TSLA"), s("AAA"), s("AAPL")];
        let merged = merge_candidates(&base, &supplemental);
        let symbols: Vec<&str> = merged.iter().map(|s| s.symbol.as_str()).collect();
        assert_eq!(symbols, vec!["AAPL", "TSLA", "ZZZ", "AAA"]);
    }

    #[test]
    fn test_base_entry_wins_over_supplemental_duplicate() {
        let base = vec![StockSymbol::new("AAPL", "Apple Inc.")];
        let supplemental = vec![StockSymbol::new("AAPL", "APPLE INC")];
        let merged = merge_candidates(&base, &supplemental);
        assert_eq!(merged, vec![StockSymbol::new("AAPL", "Apple Inc.")]);
    }

    #[test]
    fn test_deterministic_and_idempotent() {
        let base = vec![s("MSFT"), s("GOOGL")];
        let supplemental = vec![s("GOOGL"), s("IBM"), s("ORCL")];
        let first = merge_candidates(&base, &supplemental);
        let second = merge_candidates(&base, &supplemental);
        assert_eq!(first, second);
        // 以合并结果再次作为 base 合并同一补充列表，结果不变
        assert_eq!(merge_candidates(&first, &supplemental), first);
    }

    #[test]
    fn test_empty_inputs() {
        assert!(merge_candidates(&[], &[]).is_empty());
        assert_eq!(merge_candidates(&[s("A")], &[]), vec![s("A")]);
        assert_eq!(merge_candidates(&[], &[s("B")]), vec![s("B")]);
    }
}
