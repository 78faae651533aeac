use std::io::Write;
use stockwatch_browser::StockListBrowser;
use stockwatch_browser::browser::EMPTY_MESSAGE;
use stockwatch_browser::pagination::DEFAULT_PAGE_WINDOW;
use stockwatch_browser::popular::popular_stocks;
use stockwatch_core::directory::port::SymbolDirectory;

use crate::cli::BrowseArgs;
use crate::error::ClientError;

/// # Summary
/// 全部股票浏览视图。
///
/// # Logic
/// 1. 以热门列表创建浏览器；除非指定 `--popular-only`，加载一次完整目录 (失败时保留热门列表)。
/// 2. 应用查询与跳页输入；页码不是整数或超出范围时分别提示，并停留在第 1 页。
/// 3. 输出状态行、结果区间、当前页记录与翻页提示。
pub async fn run<W: Write>(
    args: &BrowseArgs,
    directory: &dyn SymbolDirectory,
    out: &mut W,
) -> Result<(), ClientError> {
    let mut browser =
        StockListBrowser::with_sizes(popular_stocks(), args.page_size, DEFAULT_PAGE_WINDOW);
    if !args.popular_only {
        browser.load_supplement(directory).await;
    }

    if let Some(query) = &args.query {
        browser.set_query(query.as_str());
    }
    if let Some(page) = &args.page
        && !browser.jump_to(page)
    {
        let page = page.trim();
        if page.parse::<usize>().is_ok() {
            writeln!(
                out,
                "Page {} is out of range (1-{}), showing page 1",
                page,
                browser.total_pages()
            )?;
        } else {
            writeln!(out, "Invalid page {:?}, showing page 1", page)?;
        }
    }

    render(&browser, out)
}

fn render<W: Write>(browser: &StockListBrowser, out: &mut W) -> Result<(), ClientError> {
    writeln!(out, "{}", browser.status_line())?;

    let Some(results) = browser.results_line() else {
        writeln!(out, "{}", EMPTY_MESSAGE)?;
        return Ok(());
    };
    writeln!(out, "{}", results)?;

    let page = browser.visible_page();
    let width = page
        .records
        .iter()
        .map(|s| s.symbol.chars().count())
        .max()
        .unwrap_or(0);
    for stock in &page.records {
        writeln!(out, "  {:<width$}  {}", stock.symbol, stock.name, width = width)?;
    }

    if browser.show_pagination() {
        let pages: Vec<String> = browser
            .page_numbers()
            .into_iter()
            .map(|n| {
                if n == page.current_page {
                    format!("[{}]", n)
                } else {
                    n.to_string()
                }
            })
            .collect();
        writeln!(out, "Pages: {}", pages.join(" "))?;
        if page.current_page < page.total_pages {
            writeln!(out, "Next: --page {}", page.current_page + 1)?;
        }
    }
    if browser.show_jump_to() {
        writeln!(out, "Jump to page: --page <1-{}>", page.total_pages)?;
    }
    Ok(())
}
