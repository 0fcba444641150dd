pub struct Paginator<'a, T> {
    items: &'a [T],
    page_size: u32,
    page_count: u32,
}

impl<'a, T> Paginator<'a, T> {
    /// An empty list still has one (empty) page. A page size of 0 is
    /// treated as 1.
    pub fn from(items: &'a [T], page_size: u32) -> Self {
        let page_size = page_size.max(1);
        if items.is_empty() {
            return Paginator {
                items,
                page_size,
                page_count: 1,
            };
        }
        let item_count = items.len() as u32;
        let upper_bound = item_count - 1;
        let page_count = (upper_bound / page_size) + 1;

        Paginator {
            items,
            page_size,
            page_count,
        }
    }

    pub fn page_count(&self) -> u32 {
        self.page_count
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn clamp_page(&self, page: u32) -> u32 {
        page.clamp(1, self.page_count)
    }

    /// Out-of-range pages are clamped to the nearest valid page.
    pub fn get_page(&self, page: u32) -> &'a [T] {
        let page = self.clamp_page(page);
        let index = ((page - 1) * self.page_size) as usize;
        let index = index.min(self.items.len());
        let end = (index + self.page_size as usize).min(self.items.len());
        &self.items[index..end]
    }
}
