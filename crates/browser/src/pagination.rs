use std::ops::Range;

/// 默认每页记录数
pub const DEFAULT_PAGE_SIZE: usize = 21;
/// 默认页码按钮窗口宽度
pub const DEFAULT_PAGE_WINDOW: usize = 7;
/// 总页数超过该值时才提供跳页输入
pub const JUMP_TO_MIN_PAGES: usize = 10;

/// # Summary
/// 计算总页数：`max(1, ceil(count / page_size))`。
///
/// # Invariants
/// - 结果至少为 1，空结果集也有一页 (用于展示空提示)。
/// - `page_size` 为 0 时按 1 处理。
pub fn total_pages(count: usize, page_size: usize) -> usize {
    count.div_ceil(page_size.max(1)).max(1)
}

/// 页码是否落在 `[1, total]`
pub fn in_range(page: usize, total: usize) -> bool {
    (1..=total).contains(&page)
}

/// 将页码夹到 `[1, total]`
pub fn clamp_page(page: usize, total: usize) -> usize {
    page.clamp(1, total.max(1))
}

/// # Summary
/// 计算某一页在过滤结果中的下标区间 `[start, end)`。
///
/// # Logic
/// 1. `start = (page - 1) * page_size`，不超过 `count`。
/// 2. `end = min(start + page_size, count)`。
pub fn page_bounds(page: usize, page_size: usize, count: usize) -> Range<usize> {
    let page_size = page_size.max(1);
    let start = page.saturating_sub(1).saturating_mul(page_size).min(count);
    let end = start.saturating_add(page_size).min(count);
    start..end
}

/// # Summary
/// 计算页码按钮的滑动窗口。
///
/// # Logic
/// 以 `width = 7` 为例 (`half = 3`)：
/// 1. `total ≤ 7`：展示全部页码。
/// 2. `current ≤ 4`：固定在前 7 页。
/// 3. `current ≥ total − 3`：固定在最后 7 页。
/// 4. 其余情况：`current − 3 ..= current + 3`。
///
/// # Arguments
/// * `current`: 当前页 (会先被夹到合法区间)。
/// * `total`: 总页数。
/// * `width`: 窗口最大宽度，0 按 1 处理。
///
/// # Returns
/// 升序页码列表，长度为 `min(total, width)`。
pub fn page_window(current: usize, total: usize, width: usize) -> Vec<usize> {
    let total = total.max(1);
    let width = width.max(1);
    if total <= width {
        return (1..=total).collect();
    }

    let current = clamp_page(current, total);
    let half = width / 2;
    let start = if current <= half + 1 {
        1
    } else if current + half >= total {
        total + 1 - width
    } else {
        current - half
    };
    (start..start + width).collect()
}

/// # Summary
/// 解析跳页输入。
///
/// # Returns
/// 输入为整数且落在 `[1, total]` 内时返回页码，否则返回 None。
pub fn parse_page_input(input: &str, total: usize) -> Option<usize> {
    input
        .trim()
        .parse::<usize>()
        .ok()
        .filter(|page| in_range(*page, total))
}
