//! Box contents at creation time.
//!
//! A box gets one slot per normal style of its series, in catalog order. With
//! probability `hidden_probability`, and only if the series has hidden styles,
//! one uniformly chosen normal slot is overwritten by a uniformly chosen hidden
//! style. That normal style then has no slot in the box at all.

use super::error::StockError;
use crate::catalog::StyleSummary;
use crate::model::{SeriesId, StyleId};
use crate::random::DrawSource;
use tracing::debug;

pub fn seal_box_contents(
    series_id: SeriesId,
    styles: &[StyleSummary],
    hidden_probability: f64,
    source: &dyn DrawSource,
) -> Result<Vec<StyleId>, StockError> {
    let (hidden, normal): (Vec<&StyleSummary>, Vec<&StyleSummary>) =
        styles.iter().partition(|style| style.is_hidden);

    if normal.is_empty() {
        return Err(StockError::NotFound(format!("normal styles of {series_id}")));
    }

    let mut contents: Vec<StyleId> = normal.iter().map(|style| style.id).collect();

    if source.roll() < hidden_probability && !hidden.is_empty() {
        let hidden_style = hidden[source.pick(hidden.len()).min(hidden.len() - 1)].id;
        let slot = source.pick(contents.len()).min(contents.len() - 1);
        debug!(%series_id, replaced = %contents[slot], %hidden_style, "Hidden style sealed");
        contents[slot] = hidden_style;
    }

    Ok(contents)
}
