use crate::dates::{canonical, display, resolve};
use crate::models::{DevotionalRecord, DevotionalView};
use crate::progress::{initialize, summarize};
use crate::storage::KeyValueStore;
use chrono::NaiveDate;

/// A missing record leaves `progress` empty, which hides the checklist and
/// keeps the complete button disabled.
pub fn build_view(
    store: &dyn KeyValueStore,
    date: NaiveDate,
    records: &[DevotionalRecord],
) -> DevotionalView {
    let devotional = resolve(date, records).cloned();
    let progress = devotional
        .as_ref()
        .map(|_| summarize(store, &initialize(store, date)));

    DevotionalView {
        date: canonical(date),
        display_date: display(date),
        devotional,
        progress,
    }
}
