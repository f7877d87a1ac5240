// User-facing strings, kept in one place
//
// The product ships in Chinese; these are the exact strings the backend's
// web UI used, so the terminal client reads the same.

pub const EMPTY_KEYWORD: &str = "请输入搜索关键词";
pub const SEARCH_FAILED: &str = "搜索失败，请稍后重试";
pub const NO_RESULTS: &str = "没有找到相关结果";
pub const NETWORK_ERROR: &str = "网络错误，请检查您的连接";
pub const TIMEOUT_ERROR: &str = "请求超时，请稍后重试";

pub const EMPTY_SELECTION: &str = "请至少选择一条数据进行保存";
pub const SAVE_SUCCESS: &str = "保存成功";
pub const SAVE_FAILED: &str = "保存失败";

pub const QUERY_FAILED: &str = "查询失败";
pub const QUERY_RETRY_HINT: &str = "查询失败，请稍后重试";
pub const NO_MATCHING_DATA: &str = "没有找到符合条件的数据";
pub const ENTER_QUERY_HINT: &str = "请输入查询条件获取数据";

pub const NO_TITLE: &str = "无标题";
pub const NO_SUMMARY: &str = "N/A";

pub const LOADING: &str = "加载中...";

/// Count summary shown after a successful repository query.
pub fn found_count(count: usize) -> String {
    format!("共找到 {} 条数据", count)
}
