use std::borrow::Borrow;
use std::cmp::Ordering;
use crate::core::types::NormalizedRecord;
use crate::query::types::{SortKey, SortOrder};

/// Orders result sets.
///
/// The primary key honours the requested direction. Ties fall through a fixed
/// chain that ignores direction: conference A → Z, newest year first, then
/// `order` ascending (steps for the primary key itself are skipped).
pub struct ResultSorter;

impl ResultSorter {
    /// Stable in-place sort
    pub fn sort<T: Borrow<NormalizedRecord>>(records: &mut [T], key: SortKey, order: SortOrder) {
        records.sort_by(|a, b| Self::compare(a.borrow(), b.borrow(), key, order));
    }

    pub fn compare(a: &NormalizedRecord, b: &NormalizedRecord, key: SortKey, order: SortOrder) -> Ordering {
        let primary = match key {
            SortKey::Conference => a.record.conference.cmp(&b.record.conference),
            SortKey::Year => a.year_num.cmp(&b.year_num),
            SortKey::Title => a.record.title.cmp(&b.record.title),
            SortKey::Order => a.record.order.cmp(&b.record.order),
        };

        let primary = match order {
            SortOrder::Asc => primary,
            SortOrder::Desc => primary.reverse(),
        };

        primary.then_with(|| Self::tie_break(a, b, key))
    }

    fn tie_break(a: &NormalizedRecord, b: &NormalizedRecord, key: SortKey) -> Ordering {
        if key != SortKey::Conference {
            let by_conference = a.record.conference.cmp(&b.record.conference);
            if by_conference != Ordering::Equal {
                return by_conference;
            }
        }

        if key != SortKey::Year {
            let by_year = b.year_num.cmp(&a.year_num);
            if by_year != Ordering::Equal {
                return by_year;
            }
        }

        a.record.order.cmp(&b.record.order)
    }
}
