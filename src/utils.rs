use chrono::{DateTime, Local};

pub fn current_timestamp() -> DateTime<Local> {
    Local::now()
}

/// 用于界面显示的时间格式
pub fn format_timestamp(ts: &DateTime<Local>) -> String {
    ts.format("%Y-%m-%d %H:%M:%S").to_string()
}
