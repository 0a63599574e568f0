use crate::foundation::{config::SizeRange, error::TableResult};

/// Widths to emit for every source image: `max, max - step, ...` while `width >= min`.
pub fn cascade_widths(range: SizeRange) -> TableResult<Vec<u32>> {
    range.validate()?;

    let mut out = Vec::with_capacity(cascade_len(range) as usize);
    let mut width = Some(range.max_width);
    while let Some(w) = width.filter(|w| *w >= range.min_width) {
        out.push(w);
        width = w.checked_sub(range.step);
    }
    Ok(out)
}

/// Number of cascade levels as `round((max - min + step) / step)`, rounding half to even.
///
/// Agrees with `cascade_widths(range).len()` whenever `step` divides `max - min`. For other
/// steps the two can differ by one; this value is only a planning figure (table layout,
/// capacity hints), while [`cascade_widths`] decides which widths are actually emitted.
pub fn cascade_len(range: SizeRange) -> u32 {
    if range.step == 0 || range.max_width < range.min_width {
        return 0;
    }
    let span = f64::from(range.max_width - range.min_width) + f64::from(range.step);
    (span / f64::from(range.step)).round_ties_even() as u32
}

/// Height that keeps the source aspect ratio at `width`, derived from the source dimensions.
///
/// Never returns 0, so extremely wide sources still produce a valid geometry.
pub fn derived_height(width: u32, source_width: u32, source_height: u32) -> u32 {
    if source_width == 0 {
        return 1;
    }
    let h = (f64::from(width) * f64::from(source_height) / f64::from(source_width))
        .round_ties_even();
    (h as u32).max(1)
}

#[cfg(test)]
#[path = "../../tests/unit/table/sizes.rs"]
mod tests;
