use chrono::NaiveDate;

/// Distance between the pointer and the tooltip's top-left corner. The page
/// script positions the shared tooltip with this value.
pub const TOOLTIP_OFFSET_PX: f64 = 10.0;

/// `"Mon, Jan 1, 2024: 5 tasks"`.
pub fn tooltip_text(date: NaiveDate, count: u64) -> String {
    let noun = if count == 1 { "task" } else { "tasks" };
    format!("{}: {count} {noun}", date.format("%a, %b %-d, %Y"))
}
