use crate::filter::filter_indices;
use crate::merge::merge_candidates;
use crate::pagination::{
    DEFAULT_PAGE_SIZE, DEFAULT_PAGE_WINDOW, JUMP_TO_MIN_PAGES, in_range, page_bounds,
    page_window, parse_page_input, total_pages,
};
use crate::popular::popular_stocks;
use serde::Serialize;
use stockwatch_core::common::StockSymbol;
use stockwatch_core::config::BrowserConfig;
use stockwatch_core::directory::error::DirectoryError;
use stockwatch_core::directory::port::SymbolDirectory;
use tracing::{debug, info, warn};

/// 过滤结果为空时的提示
pub const EMPTY_MESSAGE: &str = "No stocks match your search.";

/// 完整目录的加载状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SupplementState {
    NotRequested,
    Pending,
    Loaded,
    Failed,
}

/// # Summary
/// 一次浏览计算的结果：当前页记录及其分页信息。
///
/// # Invariants
/// - `1 <= current_page <= total_pages`。
/// - `records.len() == end_index - start_index`，下标以 0 起算，`end_index` 不含。
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VisiblePage {
    pub records: Vec<StockSymbol>,
    pub current_page: usize,
    pub total_pages: usize,
    pub filtered_count: usize,
    pub start_index: usize,
    pub end_index: usize,
}

/// # Summary
/// 纯函数形式的浏览流水线：合并 → 过滤 → 分页。
///
/// # Logic
/// 1. 以 `base ++ (supplemental − base)` 得到有效列表。
/// 2. 按前缀优先、子串回退的规则过滤。
/// 3. 将 `page` 夹到 `[1, total_pages]` 并切出该页。
///
/// # Arguments
/// * `base`: 热门列表。
/// * `supplemental`: 完整目录 (尚未加载时传空切片)。
/// * `query`: 查询串。
/// * `page`: 请求的页码 (1 起算)，越界会被夹紧。
/// * `page_size`: 每页记录数。
///
/// # Returns
/// 当前可见页。
pub fn compute_visible_page(
    base: &[StockSymbol],
    supplemental: &[StockSymbol],
    query: &str,
    page: usize,
    page_size: usize,
) -> VisiblePage {
    let effective = merge_candidates(base, supplemental);
    let filtered = filter_indices(&effective, query);
    let total = total_pages(filtered.len(), page_size);
    slice_page(&effective, &filtered, page.clamp(1, total), page_size)
}

fn slice_page(
    effective: &[StockSymbol],
    filtered: &[usize],
    page: usize,
    page_size: usize,
) -> VisiblePage {
    let bounds = page_bounds(page, page_size, filtered.len());
    let records = filtered
        .get(bounds.clone())
        .unwrap_or_default()
        .iter()
        .filter_map(|i| effective.get(*i).cloned())
        .collect();
    VisiblePage {
        records,
        current_page: page,
        total_pages: total_pages(filtered.len(), page_size),
        filtered_count: filtered.len(),
        start_index: bounds.start,
        end_index: bounds.end,
    }
}

/// # Summary
/// 股票列表浏览器，维护查询、当前页与完整目录的加载状态。
///
/// # Invariants
/// - `effective` 始终等于 `merge(base, supplemental)`，`filtered` 始终对应当前查询。
/// - `current_page` 始终位于 `[1, total_pages]`。
/// - 完整目录最多请求一次；失败时保持热门列表可用，不向调用方报错。
pub struct StockListBrowser {
    base: Vec<StockSymbol>,
    supplemental: Vec<StockSymbol>,
    effective: Vec<StockSymbol>,
    query: String,
    // 命中记录在 effective 中的下标
    filtered: Vec<usize>,
    current_page: usize,
    page_size: usize,
    page_window: usize,
    supplement: SupplementState,
}

impl StockListBrowser {
    /// 以默认页长 (21) 与窗口宽度 (7) 创建浏览器
    pub fn new(base: Vec<StockSymbol>) -> Self {
        Self::with_sizes(base, DEFAULT_PAGE_SIZE, DEFAULT_PAGE_WINDOW)
    }

    /// 以内置热门列表作为基础列表
    pub fn popular() -> Self {
        Self::new(popular_stocks())
    }

    /// 按浏览器配置创建
    pub fn with_config(base: Vec<StockSymbol>, config: &BrowserConfig) -> Self {
        Self::with_sizes(base, config.page_size, config.page_window)
    }

    /// # Summary
    /// 以指定页长与窗口宽度创建浏览器。
    ///
    /// # Invariants
    /// - 页长与窗口宽度至少为 1。
    pub fn with_sizes(base: Vec<StockSymbol>, page_size: usize, page_window: usize) -> Self {
        let effective = base.clone();
        let filtered = (0..effective.len()).collect();
        Self {
            base,
            supplemental: Vec::new(),
            effective,
            query: String::new(),
            filtered,
            current_page: 1,
            page_size: page_size.max(1),
            page_window: page_window.max(1),
            supplement: SupplementState::NotRequested,
        }
    }

    pub fn base(&self) -> &[StockSymbol] {
        &self.base
    }

    /// 合并后的有效列表
    pub fn effective(&self) -> &[StockSymbol] {
        &self.effective
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn supplement_state(&self) -> SupplementState {
        self.supplement
    }

    pub fn filtered_count(&self) -> usize {
        self.filtered.len()
    }

    pub fn total_pages(&self) -> usize {
        total_pages(self.filtered.len(), self.page_size)
    }

    /// # Summary
    /// 更新查询串。
    ///
    /// # Logic
    /// 1. 重新过滤有效列表。
    /// 2. 当前页重置为 1。
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
        self.filtered = filter_indices(&self.effective, &self.query);
        self.current_page = 1;
    }

    /// # Summary
    /// 跳转到指定页。
    ///
    /// # Returns
    /// 页码合法并完成跳转返回 `true`；越界时状态不变并返回 `false`。
    pub fn go_to(&mut self, page: usize) -> bool {
        if !in_range(page, self.total_pages()) {
            return false;
        }
        self.current_page = page;
        true
    }

    /// 下一页；已在最后一页时返回 `false`
    pub fn next(&mut self) -> bool {
        self.go_to(self.current_page.saturating_add(1))
    }

    /// 上一页；已在第一页时返回 `false`
    pub fn previous(&mut self) -> bool {
        self.go_to(self.current_page.saturating_sub(1))
    }

    /// # Summary
    /// 处理跳页输入。
    ///
    /// # Returns
    /// 输入为合法页码时跳转并返回 `true`；非整数或越界输入不做任何事。
    pub fn jump_to(&mut self, input: &str) -> bool {
        match parse_page_input(input, self.total_pages()) {
            Some(page) => self.go_to(page),
            None => false,
        }
    }

    /// 当前可见页
    pub fn visible_page(&self) -> VisiblePage {
        slice_page(
            &self.effective,
            &self.filtered,
            self.current_page,
            self.page_size,
        )
    }

    /// 当前页码按钮窗口
    pub fn page_numbers(&self) -> Vec<usize> {
        page_window(self.current_page, self.total_pages(), self.page_window)
    }

    /// 多于一页时才展示翻页控件
    pub fn show_pagination(&self) -> bool {
        self.total_pages() > 1
    }

    /// 多于 10 页时才提供跳页输入
    pub fn show_jump_to(&self) -> bool {
        self.total_pages() > JUMP_TO_MIN_PAGES
    }

    /// # Summary
    /// 列表上方的状态说明。
    ///
    /// # Logic
    /// 1. 完整目录加载中：提示正在展示热门列表。
    /// 2. 其余情况：提示可搜索的记录总数。
    pub fn status_line(&self) -> String {
        match self.supplement {
            SupplementState::Pending => format!(
                "Showing {} popular stocks while loading full list...",
                self.base.len()
            ),
            _ => format!(
                "Search through {} stocks (popular stocks always shown first):",
                self.effective.len()
            ),
        }
    }

    /// # Summary
    /// 结果区间说明，例如 `Showing 1-21 of 47 stocks | Page 1 of 3`。
    ///
    /// # Returns
    /// 无命中记录时返回 None (此时应展示 `EMPTY_MESSAGE`)。
    pub fn results_line(&self) -> Option<String> {
        if self.filtered.is_empty() {
            return None;
        }
        let page = self.visible_page();
        let mut line = format!(
            "Showing {}-{} of {} stocks",
            page.start_index + 1,
            page.end_index,
            page.filtered_count
        );
        if page.total_pages > 1 {
            line.push_str(&format!(
                " | Page {} of {}",
                page.current_page, page.total_pages
            ));
        }
        Some(line)
    }

    /// # Summary
    /// 标记开始加载完整目录。
    ///
    /// # Returns
    /// 首次调用返回 `true` 并进入 Pending；此后的调用返回 `false`。
    pub fn begin_supplement(&mut self) -> bool {
        if self.supplement != SupplementState::NotRequested {
            debug!("Supplement already requested ({:?}), ignoring", self.supplement);
            return false;
        }
        self.supplement = SupplementState::Pending;
        true
    }

    /// # Summary
    /// 应用完整目录的加载结果。
    ///
    /// # Logic
    /// 1. 仅在 Pending 状态下生效。
    /// 2. 成功：记录补充列表，重新合并与过滤；当前页仍合法则保留，否则回到第 1 页。
    /// 3. 失败：记录告警日志，保持热门列表。
    pub fn apply_supplement(&mut self, result: Result<Vec<StockSymbol>, DirectoryError>) {
        if self.supplement != SupplementState::Pending {
            debug!("Supplement result arrived in state {:?}, dropped", self.supplement);
            return;
        }
        match result {
            Ok(stocks) => {
                self.supplemental = stocks;
                self.effective = merge_candidates(&self.base, &self.supplemental);
                self.filtered = filter_indices(&self.effective, &self.query);
                if !in_range(self.current_page, self.total_pages()) {
                    self.current_page = 1;
                }
                self.supplement = SupplementState::Loaded;
                info!(
                    "Full stock list loaded: {} browsable stocks",
                    self.effective.len()
                );
            }
            Err(e) => {
                self.supplement = SupplementState::Failed;
                warn!("Failed to load full stock list, keeping popular stocks: {}", e);
            }
        }
    }

    /// # Summary
    /// 从代码目录加载完整列表并合并。
    ///
    /// # Logic
    /// 1. 每个浏览器只尝试一次，后续调用直接返回。
    /// 2. 请求目录并应用结果；失败不会向调用方传播。
    pub async fn load_supplement(&mut self, directory: &dyn SymbolDirectory) {
        if !self.begin_supplement() {
            return;
        }
        let result = directory.list_all().await;
        self.apply_supplement(result);
    }
}
