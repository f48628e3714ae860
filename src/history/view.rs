//! Filtered, paginated views over a record list.
//!
//! Views hold no state of their own; they are recomputed from
//! [`HistoryStore::list`](super::HistoryStore::list) on every access.

use std::num::NonZeroUsize;

use super::types::{Kind, QrRecord};

/// Records shown per page unless the caller picks otherwise.
pub const DEFAULT_PAGE_SIZE: NonZeroUsize = match NonZeroUsize::new(5) {
    Some(n) => n,
    None => NonZeroUsize::MIN,
};

/// Which records a view includes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KindFilter {
    #[default]
    All,
    Only(Kind),
}

impl KindFilter {
    pub fn matches(self, record: &QrRecord) -> bool {
        match self {
            KindFilter::All => true,
            KindFilter::Only(kind) => record.kind() == kind,
        }
    }
}

impl From<Option<Kind>> for KindFilter {
    fn from(kind: Option<Kind>) -> Self {
        kind.map_or(KindFilter::All, KindFilter::Only)
    }
}

/// Records matching `filter`, in list order.
pub fn filter(records: &[QrRecord], filter: KindFilter) -> Vec<&QrRecord> {
    records.iter().filter(|r| filter.matches(r)).collect()
}

/// Number of records per kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct KindCounts {
    pub total: usize,
    pub url: usize,
    pub wifi: usize,
    pub contact: usize,
    pub text: usize,
}

impl KindCounts {
    pub fn of(records: &[QrRecord]) -> Self {
        records.iter().fold(Self::default(), |mut counts, record| {
            counts.total += 1;
            match record.kind() {
                Kind::Url => counts.url += 1,
                Kind::Wifi => counts.wifi += 1,
                Kind::Contact => counts.contact += 1,
                Kind::Text => counts.text += 1,
            }
            counts
        })
    }

    pub fn get(&self, filter: KindFilter) -> usize {
        match filter {
            KindFilter::All => self.total,
            KindFilter::Only(Kind::Url) => self.url,
            KindFilter::Only(Kind::Wifi) => self.wifi,
            KindFilter::Only(Kind::Contact) => self.contact,
            KindFilter::Only(Kind::Text) => self.text,
        }
    }
}

/// One page of a filtered view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<'a> {
    /// Records on this page.
    pub items: Vec<&'a QrRecord>,
    /// 1-based page number that was requested.
    pub number: usize,
    /// Number of pages in the filtered view (0 when it is empty).
    pub total_pages: usize,
    /// Number of records in the filtered view.
    pub total_items: usize,
}

impl Page<'_> {
    pub fn has_next(&self) -> bool {
        self.number < self.total_pages
    }

    pub fn has_previous(&self) -> bool {
        self.number > 1
    }
}

/// Page `number` (1-based; 0 is read as 1) of the records matching `kind`.
///
/// Pages past the end are empty.
pub fn paginate(
    records: &[QrRecord],
    kind: KindFilter,
    number: usize,
    page_size: NonZeroUsize,
) -> Page<'_> {
    let number = number.max(1);
    let size = page_size.get();
    let matching = filter(records, kind);
    let total_items = matching.len();

    let items = matching
        .into_iter()
        .skip((number - 1).saturating_mul(size))
        .take(size)
        .collect();

    Page {
        items,
        number,
        total_pages: total_items.div_ceil(size),
        total_items,
    }
}
