/// Mark of excellence stars.
pub const fn format_marks(n_marks: i32) -> &'static str {
    match n_marks {
        3 => "*** (3 Marks)",
        2 => "** (2 Marks)",
        1 => "* (1 Mark)",
        _ => "No Marks",
    }
}

pub const fn three_marks_answer(n_marks: i32) -> &'static str {
    if n_marks >= 3 {
        "Yes"
    } else {
        "No"
    }
}
