//! Client-side list filtering and pagination
//!
//! Every list screen loads the whole collection once, then filters by a
//! free-text query over a fixed set of fields and slices the result into
//! pages. Nothing here talks to the server.

use shared::models::{
    Account, Branch, Device, HardwareKiosk, Organization, PaymentTransaction, Promotion,
    RfidCard, Service, WashSession,
};
use shared::util::contains_folded;

/// Selectable page sizes
pub const PAGE_SIZES: [usize; 4] = [10, 25, 50, 100];

pub const DEFAULT_PAGE_SIZE: usize = 25;

/// Most page links rendered before collapsing into ellipses
const MAX_VISIBLE_PAGES: usize = 5;

/// Fields matched by the list search box
pub trait Searchable {
    fn search_fields(&self) -> Vec<&str>;

    /// Case-insensitive substring match on any field; `needle` is lowercase
    fn matches(&self, needle: &str) -> bool {
        needle.is_empty()
            || self
                .search_fields()
                .into_iter()
                .any(|field| contains_folded(field, needle))
    }
}

/// Items matching `query`; an empty query keeps everything
///
/// The query is matched as typed, surrounding whitespace included.
pub fn filter_items<'a, T: Searchable>(items: &'a [T], query: &str) -> Vec<&'a T> {
    let needle = query.to_lowercase();
    items.iter().filter(|item| item.matches(&needle)).collect()
}

impl Searchable for Organization {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.name.as_str(), self.status.as_str()];
        if let Some(partner_type) = self.partner_type {
            fields.push(partner_type.as_str());
        }
        fields
    }
}

impl Searchable for Branch {
    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.name.as_str(),
            self.address.as_str(),
            self.phone.as_str(),
            self.status.as_str(),
        ]
    }
}

impl Searchable for Device {
    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.name.as_str(),
            self.mac_id.as_deref().unwrap_or_default(),
            self.status.as_str(),
        ]
    }
}

impl Searchable for Service {
    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.name.as_str(),
            self.category.as_str(),
            self.description.as_deref().unwrap_or_default(),
        ]
    }
}

impl Searchable for Promotion {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.title.as_str()]
    }
}

impl Searchable for RfidCard {
    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.number.as_str(),
            self.holder.as_str(),
            self.status.as_str(),
        ]
    }
}

impl Searchable for Account {
    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.email.as_str(),
            self.full_name.as_str(),
            self.role.as_str(),
        ]
    }
}

impl Searchable for WashSession {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.kiosk_id.as_str(), self.status.as_str()]
    }
}

impl Searchable for PaymentTransaction {
    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.id.as_str(),
            self.kiosk_id.as_str(),
            self.payment_type.as_str(),
            self.description.as_deref().unwrap_or_default(),
        ]
    }
}

/// Kiosk list row, resolved against the organization and branch lists
#[derive(Debug, Clone)]
pub struct KioskRow {
    pub kiosk: HardwareKiosk,
    pub org_name: Option<String>,
    pub branch_name: Option<String>,
}

impl KioskRow {
    pub fn build(
        kiosks: Vec<HardwareKiosk>,
        organizations: &[Organization],
        branches: &[Branch],
    ) -> Vec<KioskRow> {
        kiosks
            .into_iter()
            .map(|kiosk| {
                let org_name = kiosk.org_id().and_then(|id| {
                    organizations
                        .iter()
                        .find(|o| o.id == id)
                        .map(|o| o.name.clone())
                });
                let branch_name = kiosk.branch_id().and_then(|id| {
                    branches
                        .iter()
                        .find(|b| b.id == id)
                        .map(|b| b.name.clone())
                });
                KioskRow {
                    kiosk,
                    org_name,
                    branch_name,
                }
            })
            .collect()
    }
}

impl Searchable for KioskRow {
    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.kiosk.name.as_str(),
            self.kiosk.mac_id.as_str(),
            self.org_name.as_deref().unwrap_or_default(),
            self.branch_name.as_deref().unwrap_or_default(),
            self.kiosk.status.as_str(),
        ]
    }
}

/// Search query and paging position of one list screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableState {
    query: String,
    page: usize,
    page_size: usize,
}

impl Default for TableState {
    fn default() -> Self {
        Self {
            query: String::new(),
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl TableState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    pub fn set_page(&mut self, page: usize) {
        self.page = page.max(1);
    }

    /// Switch page size and go back to page 1
    ///
    /// Sizes outside [`PAGE_SIZES`] are rejected and leave the state as is.
    pub fn set_page_size(&mut self, page_size: usize) -> bool {
        if !PAGE_SIZES.contains(&page_size) {
            return false;
        }
        self.page_size = page_size;
        self.page = 1;
        true
    }

    /// Filter `items` and cut out the current page
    ///
    /// A page past the end (after the data shrank) falls back to page 1.
    pub fn view<'a, T: Searchable>(&mut self, items: &'a [T]) -> PageView<'a, T> {
        let filtered = filter_items(items, &self.query);
        let total_items = filtered.len();
        let total_pages = total_items.div_ceil(self.page_size);
        if self.page > total_pages && total_pages > 0 {
            self.page = 1;
        }

        let start = ((self.page - 1) * self.page_size).min(total_items);
        let end = (start + self.page_size).min(total_items);
        PageView {
            items: filtered[start..end].to_vec(),
            page: self.page,
            page_size: self.page_size,
            total_items,
            total_pages,
        }
    }
}

/// Entry of the page-number strip
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageLink {
    Page(usize),
    Ellipsis,
}

/// One rendered page of a filtered list
#[derive(Debug, Clone)]
pub struct PageView<'a, T> {
    pub items: Vec<&'a T>,
    pub page: usize,
    pub page_size: usize,
    pub total_items: usize,
    pub total_pages: usize,
}

impl<T> PageView<'_, T> {
    /// 1-based inclusive item range on this page; `(0, 0)` when empty
    pub fn range(&self) -> (usize, usize) {
        if self.total_items == 0 {
            return (0, 0);
        }
        let start = (self.page - 1) * self.page_size + 1;
        let end = (self.page * self.page_size).min(self.total_items);
        (start, end)
    }

    pub fn summary(&self) -> String {
        let (start, end) = self.range();
        format!("Showing {}–{} of {}", start, end, self.total_items)
    }

    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    /// Page links around the current page, at most five numbers
    pub fn page_numbers(&self) -> Vec<PageLink> {
        let total = self.total_pages;
        let current = self.page;
        if total <= MAX_VISIBLE_PAGES {
            return (1..=total).map(PageLink::Page).collect();
        }

        let mut links = Vec::with_capacity(7);
        if current <= 3 {
            links.extend((1..=4).map(PageLink::Page));
            links.push(PageLink::Ellipsis);
            links.push(PageLink::Page(total));
        } else if current >= total - 2 {
            links.push(PageLink::Page(1));
            links.push(PageLink::Ellipsis);
            links.extend((total - 3..=total).map(PageLink::Page));
        } else {
            links.push(PageLink::Page(1));
            links.push(PageLink::Ellipsis);
            links.extend((current - 1..=current + 1).map(PageLink::Page));
            links.push(PageLink::Ellipsis);
            links.push(PageLink::Page(total));
        }
        links
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::{BranchStatus, KioskStatus};

    fn branch(id: usize, name: &str, status: BranchStatus) -> Branch {
        serde_json::from_value(serde_json::json!({
            "id": format!("b{}", id),
            "orgId": "org-1",
            "name": name,
            "address": "Amir Temur 1",
            "phone": "+998",
            "status": status,
        }))
        .unwrap()
    }

    fn branches(n: usize) -> Vec<Branch> {
        (1..=n)
            .map(|i| branch(i, &format!("Branch {}", i), BranchStatus::Open))
            .collect()
    }

    fn pages(links: &[PageLink]) -> Vec<Option<usize>> {
        links
            .iter()
            .map(|l| match l {
                PageLink::Page(p) => Some(*p),
                PageLink::Ellipsis => None,
            })
            .collect()
    }

    #[test]
    fn test_empty_query_matches_all() {
        let items = branches(3);
        assert_eq!(filter_items(&items, "").len(), 3);
    }

    #[test]
    fn test_whitespace_query_is_not_trimmed() {
        let items = vec![
            branch(1, "Chilonzor", BranchStatus::Open),
            branch(2, "Yunusobod", BranchStatus::Open),
        ];
        assert!(filter_items(&items, "   ").is_empty());
        assert!(filter_items(&items, " chilonzor").is_empty());
        assert_eq!(filter_items(&items, "chilonzor").len(), 1);
    }

    #[test]
    fn test_query_is_case_insensitive() {
        let items = vec![
            branch(1, "Chilonzor", BranchStatus::Open),
            branch(2, "Yunusobod", BranchStatus::Maintenance),
        ];
        let found = filter_items(&items, "CHILON");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, "b1");

        let found = filter_items(&items, "maint");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, "b2");
    }

    #[test]
    fn test_kiosk_rows_search_org_and_branch_names() {
        let kiosk: HardwareKiosk = serde_json::from_value(serde_json::json!({
            "id": "k1",
            "name": "Box 1",
            "macId": "AA:BB:CC:DD:EE:01",
            "orgId": "o1",
            "branchId": "b1",
            "status": KioskStatus::Active,
        }))
        .unwrap();
        let orgs: Vec<Organization> =
            serde_json::from_value(serde_json::json!([{ "id": "o1", "name": "Aqua Wash" }]))
                .unwrap();
        let rows = KioskRow::build(vec![kiosk], &orgs, &[branch(1, "Sergeli", BranchStatus::Open)]);

        assert_eq!(filter_items(&rows, "aqua").len(), 1);
        assert_eq!(filter_items(&rows, "sergeli").len(), 1);
        assert_eq!(filter_items(&rows, "aa:bb").len(), 1);
        assert_eq!(filter_items(&rows, "registered").len(), 0);
    }

    #[test]
    fn test_paging_and_summary() {
        let items = branches(60);
        let mut state = TableState::new();
        state.set_page(3);

        let view = state.view(&items);
        assert_eq!(view.total_pages, 3);
        assert_eq!(view.items.len(), 10);
        assert_eq!(view.range(), (51, 60));
        assert_eq!(view.summary(), "Showing 51–60 of 60");
        assert!(!view.has_next());
    }

    #[test]
    fn test_pages_cover_filtered_list_exactly_once() {
        for n in 0..=120 {
            let items = branches(n);
            for &size in &PAGE_SIZES {
                let mut state = TableState::new();
                assert!(state.set_page_size(size));
                let total_pages = state.view(&items).total_pages;
                assert_eq!(total_pages, n.div_ceil(size), "n={} size={}", n, size);

                let mut seen = Vec::with_capacity(n);
                for page in 1..=total_pages {
                    state.set_page(page);
                    let view = state.view(&items);
                    assert_eq!(view.page, page);
                    if page < total_pages {
                        assert_eq!(view.items.len(), size, "n={} size={} page={}", n, size, page);
                    } else {
                        let expected = if n % size == 0 { size } else { n % size };
                        assert_eq!(view.items.len(), expected, "n={} size={} last page", n, size);
                    }
                    seen.extend(view.items.iter().map(|b| b.id.clone()));
                }

                let all: Vec<String> = items.iter().map(|b| b.id.clone()).collect();
                assert_eq!(seen, all, "n={} size={}", n, size);
            }
        }
    }

    #[test]
    fn test_filtered_pages_follow_filter_order() {
        let items = branches(120);
        let filtered: Vec<String> = filter_items(&items, "branch 1")
            .into_iter()
            .map(|b| b.id.clone())
            .collect();

        let mut state = TableState::new();
        state.set_page_size(10);
        state.set_query("branch 1");
        let total_pages = state.view(&items).total_pages;

        let mut seen = Vec::new();
        for page in 1..=total_pages {
            state.set_page(page);
            seen.extend(state.view(&items).items.iter().map(|b| b.id.clone()));
        }
        assert_eq!(seen, filtered);
    }

    #[test]
    fn test_narrowing_query_never_grows_result() {
        let mut items = branches(120);
        items.push(branch(201, "Car Wash Sergeli", BranchStatus::Open));
        items.push(branch(202, "Car Service Chilonzor", BranchStatus::Maintenance));
        items.push(branch(203, "Carwash Express", BranchStatus::Closed));

        let chains: [&[&str]; 3] = [
            &["", "b", "br", "branch", "branch 1", "branch 10", "branch 100"],
            &["c", "ca", "car", "car ", "car wash", "car wash sergeli"],
            &["a", "an", "anc", "anch", "branch 2", "branch 21"],
        ];
        for chain in chains {
            for pair in chain.windows(2) {
                let wide: Vec<&str> = filter_items(&items, pair[0])
                    .into_iter()
                    .map(|b| b.id.as_str())
                    .collect();
                let narrow = filter_items(&items, pair[1]);
                assert!(
                    narrow.len() <= wide.len(),
                    "{:?} -> {:?} grew from {} to {}",
                    pair[0],
                    pair[1],
                    wide.len(),
                    narrow.len()
                );
                assert!(narrow.iter().all(|b| wide.contains(&b.id.as_str())));
            }
        }
    }

    #[test]
    fn test_page_size_change_resets_page() {
        let items = branches(60);
        let mut state = TableState::new();
        state.set_page(2);
        assert!(state.set_page_size(50));
        assert_eq!(state.page(), 1);
        assert!(!state.set_page_size(30));
        assert_eq!(state.page_size(), 50);
        assert_eq!(state.view(&items).items.len(), 50);
    }

    #[test]
    fn test_page_past_end_falls_back() {
        let items = branches(60);
        let mut state = TableState::new();
        state.set_page(3);
        state.set_query("Branch 1");

        // "Branch 1", "Branch 10".."Branch 19" => 11 items, one page
        let view = state.view(&items);
        assert_eq!(view.page, 1);
        assert_eq!(view.total_items, 11);
        assert_eq!(state.page(), 1);
    }

    #[test]
    fn test_empty_list_summary() {
        let items: Vec<Branch> = Vec::new();
        let mut state = TableState::new();
        let view = state.view(&items);
        assert_eq!(view.summary(), "Showing 0–0 of 0");
        assert!(view.page_numbers().is_empty());
    }

    #[test]
    fn test_page_numbers_window() {
        let items = branches(250);
        let mut state = TableState::new();
        state.set_page_size(10);

        state.set_page(2);
        assert_eq!(
            pages(&state.view(&items).page_numbers()),
            vec![Some(1), Some(2), Some(3), Some(4), None, Some(25)]
        );

        state.set_page(12);
        assert_eq!(
            pages(&state.view(&items).page_numbers()),
            vec![Some(1), None, Some(11), Some(12), Some(13), None, Some(25)]
        );

        state.set_page(24);
        assert_eq!(
            pages(&state.view(&items).page_numbers()),
            vec![Some(1), None, Some(22), Some(23), Some(24), Some(25)]
        );

        let few = branches(30);
        state.set_page(1);
        assert_eq!(
            pages(&state.view(&few).page_numbers()),
            vec![Some(1), Some(2), Some(3)]
        );
    }
}
