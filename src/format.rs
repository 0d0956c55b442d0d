use crate::col::ColumnDefinition;

/// Left-pad `value` with `'0'` up to the display size of a ZEROFILL column.
///
/// Values that are already at least as wide as the column, and values of
/// columns without ZEROFILL, are returned unchanged.
pub fn zero_fill_if_needed(value: String, col: &ColumnDefinition) -> String {
    if !col.is_zero_fill() {
        return value;
    }
    let width = col.display_size();
    if value.len() >= width {
        return value;
    }
    let mut out = String::with_capacity(width);
    out.extend(std::iter::repeat_n('0', width - value.len()));
    out.push_str(&value);
    out
}
