use crate::app::Result;
use crate::domain::{Item, Page, PageRequest};
use crate::feed::PageAssembler;

/// Infinite-loading state for one reader: follows `next_cursor` from page to
/// page and keeps everything loaded so far.
pub struct FeedSession {
    assembler: PageAssembler,
    page_size: usize,
    cursor: Option<usize>,
    pages: Vec<Page>,
    exhausted: bool,
}

impl FeedSession {
    pub fn new(assembler: PageAssembler, page_size: usize) -> Result<Self> {
        Self::starting_at(assembler, page_size, None)
    }

    pub fn starting_at(
        assembler: PageAssembler,
        page_size: usize,
        cursor: Option<usize>,
    ) -> Result<Self> {
        PageRequest::new(page_size, cursor)?;
        Ok(Self {
            assembler,
            page_size,
            cursor,
            pages: Vec::new(),
            exhausted: false,
        })
    }

    pub fn has_next_page(&self) -> bool {
        !self.exhausted
    }

    /// Cursor the next `load_next` call will request.
    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    /// Load the following page. Returns `None` once the feed is exhausted.
    ///
    /// On error nothing changes, so the call can simply be repeated.
    pub async fn load_next(&mut self) -> Result<Option<&Page>> {
        if self.exhausted {
            return Ok(None);
        }

        let request = PageRequest::new(self.page_size, self.cursor)?;
        let page = self.assembler.top_stories(request).await?;

        self.cursor = page.next_cursor;
        self.exhausted = page.is_last();
        self.pages.push(page);

        Ok(self.pages.last())
    }

    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    /// Every loaded story with its 1-based position across pages.
    pub fn stories(&self) -> impl Iterator<Item = (usize, &Item)> {
        self.pages
            .iter()
            .flat_map(|page| page.stories.iter())
            .enumerate()
            .map(|(i, story)| (i + 1, story))
    }

    pub fn story_count(&self) -> usize {
        self.pages.iter().map(|p| p.stories.len()).sum()
    }
}
