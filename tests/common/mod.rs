//! Shared test harness for integration tests.

#![allow(dead_code)]

use std::cell::RefCell;

use bookshelf::application::service::BookService;
use bookshelf::domain::model::book::Book;
use bookshelf::domain::model::id::BookId;
use bookshelf::domain::repository::{BookRepository, SearchQuery};

// =============================================================================
// InMemoryRepo — テスト用リポジトリ
// =============================================================================

#[derive(Debug, thiserror::Error)]
#[error("in-memory store error")]
pub struct InMemoryError;

/// ファイルI/O不要のインメモリリポジトリ。
pub struct InMemoryRepo {
    books: RefCell<Vec<Book>>,
}

impl InMemoryRepo {
    pub fn new() -> Self {
        Self {
            books: RefCell::new(Vec::new()),
        }
    }
}

impl BookRepository for InMemoryRepo {
    type Error = InMemoryError;

    fn add(&self, book: Book) -> Result<(), Self::Error> {
        self.books.borrow_mut().push(book);
        Ok(())
    }

    fn delete_by_id(&self, id: BookId) -> Result<(), Self::Error> {
        self.books.borrow_mut().retain(|b| b.id() != id);
        Ok(())
    }

    fn get_by_id(&self, id: BookId) -> Result<Option<Book>, Self::Error> {
        Ok(self.books.borrow().iter().find(|b| b.id() == id).cloned())
    }

    fn search(&self, query: &SearchQuery) -> Result<Vec<Book>, Self::Error> {
        Ok(self
            .books
            .borrow()
            .iter()
            .filter(|b| query.matches(b))
            .cloned()
            .collect())
    }

    fn list_all(&self) -> Result<Vec<Book>, Self::Error> {
        Ok(self.books.borrow().clone())
    }

    fn update(&self, book: Book) -> Result<(), Self::Error> {
        let mut books = self.books.borrow_mut();
        if let Some(slot) = books.iter_mut().find(|b| b.id() == book.id()) {
            *slot = book;
        }
        Ok(())
    }
}

// =============================================================================
// Fixtures
// =============================================================================

/// 空のインメモリServiceを返す。
pub fn empty_service() -> BookService<InMemoryRepo> {
    BookService::new(InMemoryRepo::new())
}

/// 定番の蔵書4冊を投入したServiceを返す。IDは1〜4。
///
/// ```text
/// 1. The Hobbit         — J. R. R. Tolkien, 1937
/// 2. The Silmarillion   — J. R. R. Tolkien, 1977
/// 3. Dune               — Frank Herbert,    1965
/// 4. Neuromancer        — William Gibson,   1984
/// ```
pub fn seeded_service() -> BookService<InMemoryRepo> {
    let service = empty_service();
    service
        .add_book("The Hobbit", "J. R. R. Tolkien", 1937)
        .unwrap();
    service
        .add_book("The Silmarillion", "J. R. R. Tolkien", 1977)
        .unwrap();
    service.add_book("Dune", "Frank Herbert", 1965).unwrap();
    service
        .add_book("Neuromancer", "William Gibson", 1984)
        .unwrap();
    service
}

// =============================================================================
// Assertion helpers
// =============================================================================

/// 結果がErrで、メッセージに指定文字列を含むことをassert。
pub fn assert_error_contains<T: std::fmt::Debug>(
    result: Result<T, impl std::fmt::Display>,
    expected: &str,
) {
    match result {
        Err(e) => {
            let msg = e.to_string();
            assert!(
                msg.contains(expected),
                "Expected error containing '{expected}', got: '{msg}'"
            );
        }
        Ok(v) => panic!("Expected error containing '{expected}', got Ok({v:?})"),
    }
}
