//! Property-based tests — invariant verification with proptest.

mod common;

use common::empty_service;
use proptest::prelude::*;

use bookshelf::domain::model::book::{Book, BookStatus};
use bookshelf::domain::model::id::BookId;
use bookshelf::domain::repository::SearchQuery;

// =============================================================================
// Id generation
// =============================================================================

proptest! {
    /// 削除しない限り、add_bookのIDは1から始まる狭義単調増加の連番。
    #[test]
    fn ids_are_unique_and_strictly_increasing(
        titles in prop::collection::vec("[A-Za-z ]{1,20}", 1..10),
    ) {
        let service = empty_service();
        let mut last = 0u64;
        for title in &titles {
            let book = service.add_book(title.clone(), "Author", 2000).unwrap();
            prop_assert!(book.id().value() > last);
            last = book.id().value();
        }
        prop_assert_eq!(last, titles.len() as u64);
    }
}

// =============================================================================
// Search invariants
// =============================================================================

proptest! {
    /// 自分のタイトル(大文字化)で検索すると必ず自分がヒットする。
    #[test]
    fn search_finds_book_by_its_own_title(title in "[a-z]{1,15}") {
        let service = empty_service();
        let added = service.add_book(title.clone(), "Author", 2000).unwrap();

        let query = SearchQuery {
            title: Some(title.to_uppercase()),
            ..Default::default()
        };
        let results = service.search_books(&query).unwrap();
        prop_assert!(results.iter().any(|b| b.id() == added.id()));
    }

    /// 年の完全一致検索は他の年の書籍を返さない。
    #[test]
    fn year_search_is_exact(year in 1800i32..2100) {
        let service = empty_service();
        service.add_book("A", "X", year).unwrap();
        service.add_book("B", "Y", year + 1).unwrap();

        let query = SearchQuery {
            year: Some(year),
            ..Default::default()
        };
        let results = service.search_books(&query).unwrap();
        prop_assert_eq!(results.len(), 1);
        prop_assert_eq!(results[0].year(), year);
    }
}

// =============================================================================
// Status invariants
// =============================================================================

proptest! {
    /// 未知のステータス文字列は常に拒否され、保存済みレコードは変わらない。
    #[test]
    fn unknown_status_never_changes_record(status in "[a-z]{1,12}") {
        prop_assume!(status != "available" && status != "borrowed");

        let service = empty_service();
        let book = service.add_book("T", "A", 2000).unwrap();

        let result = service.set_book_status(book.id(), &status);
        prop_assert!(result.is_err());

        let stored = service.get_book_by_id(book.id()).unwrap().unwrap();
        prop_assert_eq!(stored.status(), BookStatus::Available);
    }
}

// =============================================================================
// Entity invariants
// =============================================================================

proptest! {
    /// Book DisplayにはIDとタイトルが常に含まれる。
    #[test]
    fn display_contains_id_and_title(
        title in "[A-Za-z]{1,20}",
        id in 1u64..10_000,
    ) {
        let book = Book::new(BookId::new(id), title.clone(), "Author", 1999);
        let rendered = book.to_string();
        let id_tag = format!("#{id}");
        prop_assert!(rendered.contains(&id_tag));
        prop_assert!(rendered.contains(&title));
    }

    /// シリアライズ往復で内容が変わらない。
    #[test]
    fn serde_roundtrip_is_lossless(
        title in "[A-Za-z ]{1,20}",
        author in "[A-Za-z ]{1,20}",
        year in -500i32..2100,
    ) {
        let book = Book::new(BookId::new(1), title, author, year);
        let json = serde_json::to_string(&book).unwrap();
        let back: Book = serde_json::from_str(&json).unwrap();
        prop_assert_eq!(back, book);
    }
}
