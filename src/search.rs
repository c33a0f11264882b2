//! Full-book text indexing and search.
//!
//! # Overview
//! A [`TextIndexer`] extracts the plain text of every chapter of an [`Epub`]
//! once, then answers substring queries over it with surrounding context.
//! A [`SearchResult`] can be displayed on a reading surface with
//! [`ReaderSession::reveal`](crate::reader::ReaderSession::reveal).
//!
//! # Examples
//! ```
//! # use rpage::search::{SearchOptions, TextIndexer};
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let epub = rpage::Epub::open("tests/ebooks/example_epub")?;
//! let mut indexer = TextIndexer::new();
//! indexer.build_index(&epub);
//!
//! let results = indexer.search("whale", &SearchOptions::default())?;
//!
//! for result in &results {
//!     println!(
//!         "[{}] ...{}[{}]{}...",
//!         result.chapter_title(),
//!         result.context_before(),
//!         result.match_text(),
//!         result.context_after(),
//!     );
//! }
//! # Ok(())
//! # }
//! ```

pub mod errors;
mod extract;

use crate::ebook::epub::Epub;
use crate::search::errors::SearchError;
use crate::util::sync::Shared;
use std::sync::atomic::{AtomicBool, Ordering};

/// Number of characters of context kept on each side of a match.
pub const CONTEXT_LENGTH: usize = 50;

/// The extracted text of one chapter.
#[derive(Clone, Debug, PartialEq)]
pub struct TextIndexEntry {
    chapter_index: usize,
    chapter_title: String,
    markup: String,
    searchable_text: String,
}

impl TextIndexEntry {
    pub fn chapter_index(&self) -> usize {
        self.chapter_index
    }

    /// The table of contents label of the chapter.
    pub fn chapter_title(&self) -> &str {
        &self.chapter_title
    }

    /// The raw chapter markup the text was extracted from.
    ///
    /// Empty if the chapter could not be read.
    pub fn markup(&self) -> &str {
        &self.markup
    }

    /// Body text without scripts or styles, whitespace-collapsed and trimmed.
    pub fn searchable_text(&self) -> &str {
        &self.searchable_text
    }
}

/// A single occurrence of a query.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SearchResult {
    chapter_index: usize,
    chapter_title: String,
    match_text: String,
    context_before: String,
    context_after: String,
    position: usize,
}

impl SearchResult {
    pub fn chapter_index(&self) -> usize {
        self.chapter_index
    }

    pub fn chapter_title(&self) -> &str {
        &self.chapter_title
    }

    /// The matched text as it appears in the chapter (original casing).
    pub fn match_text(&self) -> &str {
        &self.match_text
    }

    /// Up to [`CONTEXT_LENGTH`] characters preceding the match.
    pub fn context_before(&self) -> &str {
        &self.context_before
    }

    /// Up to [`CONTEXT_LENGTH`] characters following the match.
    pub fn context_after(&self) -> &str {
        &self.context_after
    }

    /// Character offset of the match within
    /// [`TextIndexEntry::searchable_text`].
    pub fn position(&self) -> usize {
        self.position
    }

    fn sort_key(&self) -> (usize, usize, &str) {
        (self.chapter_index, self.position, &self.match_text)
    }
}

/// Options for [`TextIndexer::search`].
#[non_exhaustive]
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchOptions {
    /// Match letter case exactly.
    ///
    /// Default: `false`
    pub case_sensitive: bool,
    /// Restrict the search to one chapter index.
    ///
    /// Default: [`None`] (all chapters)
    pub chapter_scope: Option<usize>,
}

impl SearchOptions {
    pub fn builder() -> SearchOptionsBuilder {
        SearchOptionsBuilder(Self::default())
    }
}

impl From<SearchOptionsBuilder> for SearchOptions {
    fn from(value: SearchOptionsBuilder) -> Self {
        value.build()
    }
}

/// Builder to construct a [`SearchOptions`] instance.
#[derive(Clone, Debug)]
pub struct SearchOptionsBuilder(SearchOptions);

impl SearchOptionsBuilder {
    pub fn build(self) -> SearchOptions {
        self.0
    }

    /// See [`SearchOptions::case_sensitive`].
    pub fn case_sensitive(mut self, case_sensitive: bool) -> Self {
        self.0.case_sensitive = case_sensitive;
        self
    }

    /// See [`SearchOptions::chapter_scope`].
    pub fn chapter_scope(mut self, chapter: usize) -> Self {
        self.0.chapter_scope = Some(chapter);
        self
    }
}

/// Outcome of [`TextIndexer::build_index`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum IndexOutcome {
    /// The index already covers a book with the same identity.
    Skipped,
    /// The index was rebuilt from scratch.
    Built { chapters: usize },
}

/// Summary returned by [`TextIndexer::info`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct IndexInfo {
    pub ready: bool,
    pub chapter_count: usize,
    /// Sum of the character counts of all searchable texts.
    pub total_text_length: usize,
}

/// Identifies a book across index builds by its title and chapter count.
#[derive(Clone, Debug, PartialEq, Eq)]
struct BookIdentity {
    title: Option<String>,
    chapter_count: usize,
}

impl BookIdentity {
    fn of(epub: &Epub) -> Self {
        Self {
            title: epub.metadata().title().map(str::to_owned),
            chapter_count: epub.chapter_count(),
        }
    }
}

/// Observes whether a [`TextIndexer`] is currently building its index.
///
/// Obtained from [`TextIndexer::status`]; remains usable while the indexer
/// itself is mutably borrowed by a build.
#[derive(Clone, Debug)]
pub struct IndexStatus(Shared<AtomicBool>);

impl IndexStatus {
    pub fn is_indexing(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

/// Raises the indexing flag for its lifetime.
struct IndexingGuard<'a>(&'a AtomicBool);

impl<'a> IndexingGuard<'a> {
    fn raise(flag: &'a AtomicBool) -> Self {
        flag.store(true, Ordering::Release);
        Self(flag)
    }
}

impl Drop for IndexingGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Plain-text index over every chapter of one book.
///
/// Searching while an index is being built is not supported;
/// callers check [`TextIndexer::is_indexing`] (or an [`IndexStatus`]) first.
#[derive(Debug, Default)]
pub struct TextIndexer {
    entries: Vec<TextIndexEntry>,
    identity: Option<BookIdentity>,
    indexing: Shared<AtomicBool>,
}

impl TextIndexer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Indexes every chapter of `epub` in table of contents order.
    ///
    /// Indexing a book with the same title and chapter count as the
    /// currently indexed book is a no-op.
    /// Chapters that cannot be read or parsed are indexed with empty text.
    pub fn build_index(&mut self, epub: &Epub) -> IndexOutcome {
        let identity = BookIdentity::of(epub);

        if self.identity.as_ref() == Some(&identity) {
            log::debug!("index already covers `{:?}`; skipping", identity.title);
            return IndexOutcome::Skipped;
        }
        let indexing = Shared::clone(&self.indexing);
        let _guard = IndexingGuard::raise(&indexing);
        self.clear();

        let entries = extract::extract_all(epub);
        self.install(identity, entries)
    }

    /// Indexes `epub` on a blocking task of the tokio runtime.
    ///
    /// See [`Self::build_index`].
    ///
    /// # Errors
    /// - [`SearchError::IndexTask`]: The indexing task panicked.
    #[cfg(feature = "async-tokio")]
    pub async fn build_index_async(
        &mut self,
        epub: std::sync::Arc<Epub>,
    ) -> Result<IndexOutcome, SearchError> {
        let identity = BookIdentity::of(&epub);

        if self.identity.as_ref() == Some(&identity) {
            log::debug!("index already covers `{:?}`; skipping", identity.title);
            return Ok(IndexOutcome::Skipped);
        }
        let indexing = Shared::clone(&self.indexing);
        let _guard = IndexingGuard::raise(&indexing);
        self.clear();

        let entries = tokio::task::spawn_blocking(move || extract::extract_all(&epub)).await?;
        Ok(self.install(identity, entries))
    }

    fn install(&mut self, identity: BookIdentity, entries: Vec<TextIndexEntry>) -> IndexOutcome {
        let chapters = entries.len();

        self.entries = entries;
        self.identity = Some(identity);
        log::info!(
            "indexed {chapters} chapters ({} characters)",
            self.info().total_text_length
        );
        IndexOutcome::Built { chapters }
    }

    /// Finds every occurrence of `query` in the index.
    ///
    /// Occurrences within a chapter do not overlap; scanning resumes after
    /// the end of each match. Results are sorted by chapter, then position.
    /// A blank `query`, or an index that was never built, yields no results.
    ///
    /// # Errors
    /// - [`SearchError::InvalidChapterScope`]: [`SearchOptions::chapter_scope`]
    ///   does not refer to an indexed chapter. An index that was never built
    ///   has no chapters, so any scope is rejected.
    pub fn search(&self, query: &str, options: &SearchOptions) -> Result<Vec<SearchResult>, SearchError> {
        if query.trim().is_empty() {
            return Ok(Vec::new());
        }
        let entries = match options.chapter_scope {
            Some(scope) => {
                let entry = self.entries.get(scope).ok_or(SearchError::InvalidChapterScope {
                    scope,
                    len: self.entries.len(),
                })?;
                std::slice::from_ref(entry)
            }
            None => self.entries.as_slice(),
        };
        if !self.is_ready() {
            log::debug!("search before the index was built");
            return Ok(Vec::new());
        }

        let fold = |c: char| fold_char(c, options.case_sensitive);
        let needle = query.chars().map(fold).collect::<Vec<_>>();
        let mut results = Vec::new();

        for entry in entries {
            scan_entry(entry, &needle, fold, &mut results);
        }
        Ok(merge_results([results]))
    }

    /// Returns `true` while [`Self::build_index`] is running.
    pub fn is_indexing(&self) -> bool {
        self.indexing.load(Ordering::Acquire)
    }

    /// A handle observing [`Self::is_indexing`] from elsewhere.
    pub fn status(&self) -> IndexStatus {
        IndexStatus(Shared::clone(&self.indexing))
    }

    pub fn is_ready(&self) -> bool {
        self.identity.is_some()
    }

    pub fn info(&self) -> IndexInfo {
        IndexInfo {
            ready: self.is_ready(),
            chapter_count: self.entries.len(),
            total_text_length: self
                .entries
                .iter()
                .map(|entry| entry.searchable_text.chars().count())
                .sum(),
        }
    }

    pub fn entries(&self) -> &[TextIndexEntry] {
        &self.entries
    }

    /// The searchable text of `chapter`, or an empty string if it is not indexed.
    pub fn chapter_text(&self, chapter: usize) -> &str {
        self.entries
            .get(chapter)
            .map_or("", |entry| entry.searchable_text())
    }

    /// Discards the index; the next [`Self::build_index`] always rebuilds.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.identity = None;
    }
}

/// Combines the results of independent searches, removing duplicate
/// `(chapter, position, match)` occurrences and sorting by chapter, then position.
pub fn merge_results(batches: impl IntoIterator<Item = Vec<SearchResult>>) -> Vec<SearchResult> {
    let mut results = batches.into_iter().flatten().collect::<Vec<_>>();

    results.sort_by(|a, b| a.sort_key().cmp(&b.sort_key()));
    results.dedup_by(|a, b| a.sort_key() == b.sort_key());
    results
}

/// Maps `c` to a single comparable char, preserving character offsets.
fn fold_char(c: char, case_sensitive: bool) -> char {
    if case_sensitive {
        return c;
    }
    let mut lower = c.to_lowercase();

    match (lower.next(), lower.next()) {
        (Some(folded), None) => folded,
        // Multi-char lowercase forms are compared as-is
        _ => c,
    }
}

fn scan_entry(
    entry: &TextIndexEntry,
    needle: &[char],
    fold: impl Fn(char) -> char,
    results: &mut Vec<SearchResult>,
) {
    let text = entry.searchable_text.chars().collect::<Vec<_>>();
    let haystack = text.iter().copied().map(fold).collect::<Vec<_>>();
    let mut position = 0;

    while position + needle.len() <= haystack.len() {
        if !haystack[position..].starts_with(needle) {
            position += 1;
            continue;
        }
        let end = position + needle.len();
        let context_start = position.saturating_sub(CONTEXT_LENGTH);
        let context_end = (end + CONTEXT_LENGTH).min(text.len());

        results.push(SearchResult {
            chapter_index: entry.chapter_index,
            chapter_title: entry.chapter_title.clone(),
            match_text: text[position..end].iter().collect(),
            context_before: text[context_start..position].iter().collect(),
            context_after: text[end..context_end].iter().collect(),
            position,
        });
        position = end;
    }
}
