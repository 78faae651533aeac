use stockwatch_core::common::StockSymbol;

// 热门股票，浏览时始终排在最前
const POPULAR: &[(&str, &str)] = &[
    ("AAPL", "Apple Inc."),
    ("TSLA", "Tesla Inc."),
    ("GOOGL", "Alphabet Inc."),
    ("AMZN", "Amazon.com Inc."),
    ("MSFT", "Microsoft Corp."),
    ("NVDA", "NVIDIA Corp."),
    ("META", "Meta Platforms Inc."),
    ("NFLX", "Netflix Inc."),
    ("AMD", "Advanced Micro Devices Inc."),
    ("INTC", "Intel Corp."),
    ("JPM", "JPMorgan Chase & Co."),
    ("V", "Visa Inc."),
    ("WMT", "Walmart Inc."),
    ("DIS", "Walt Disney Co."),
    ("KO", "Coca-Cola Co."),
];

/// # Summary
/// 返回内置的热门股票列表，作为浏览器的基础列表。
///
/// # Invariants
/// - 顺序固定，以 AAPL、TSLA、GOOGL、AMZN、MSFT 开头。
/// - 代码互不重复。
pub fn popular_stocks() -> Vec<StockSymbol> {
    POPULAR
        .iter()
        .map(|(symbol, name)| StockSymbol::new(*symbol, *name))
        .collect()
}
