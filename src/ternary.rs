/// Conditional expression as a one-liner.  `cargo fmt` spreads an
/// `if/else` across five lines, and the edge-clamping tables in the
/// energy calculation read far better as a column of `cq!`s.
#[macro_export]
macro_rules! cq {
    ($condition: expr, $_true: expr, $_false: expr) => {
        if $condition {
            $_true
        } else {
            $_false
        }
    };
}
