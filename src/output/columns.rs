#![forbid(unsafe_code)]

//! Fixed-width column alignment for listings

/// Column width used by the process and application listings
pub const LIST_COLUMN_WIDTH: usize = 16;

/// Lays out `fields` on one line so that field `i` starts at column `width * i`
///
/// When a field overflows its slot the next field is separated from it by a
/// single space instead.
pub fn align_column<S: AsRef<str>>(fields: &[S], width: usize) -> String {
    let mut line = String::new();
    let mut column = 0;

    for (i, field) in fields.iter().enumerate() {
        let field = field.as_ref();
        if i > 0 {
            let slot = width * i;
            let padding = if slot > column { slot - column } else { 1 };
            line.extend(std::iter::repeat_n(' ', padding));
            column += padding;
        }
        line.push_str(field);
        column += field.chars().count();
    }

    line
}
