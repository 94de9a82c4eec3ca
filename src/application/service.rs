use crate::domain::model::book::Book;
use crate::domain::model::id::BookId;
use crate::domain::repository::{BookRepository, SearchQuery};

use super::error::AppError;

/// 蔵書カタログに対するユースケース。
/// リポジトリの上にID採番と存在チェックを足したもので、
/// フロントエンドが呼ぶのはこの層だけ。
pub struct BookService<R: BookRepository> {
    repo: R,
}

impl<R: BookRepository> BookService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// 書籍を追加する。IDは既存の最大値 + 1(空なら1)。
    pub fn add_book(
        &self,
        title: impl Into<String>,
        author: impl Into<String>,
        year: i32,
    ) -> Result<Book, AppError> {
        let books = self.list_books()?;
        let id = next_id(&books);
        let book = Book::new(id, title, author, year);
        self.repo
            .add(book.clone())
            .map_err(|e| AppError::Storage(Box::new(e)))?;
        tracing::info!(%id, "book added");
        Ok(book)
    }

    /// 書籍をIDで削除する。存在しなければ`BookNotFound`。
    pub fn delete_book_by_id(&self, id: BookId) -> Result<(), AppError> {
        if self.get_book_by_id(id)?.is_none() {
            return Err(AppError::BookNotFound(id));
        }
        self.repo
            .delete_by_id(id)
            .map_err(|e| AppError::Storage(Box::new(e)))?;
        tracing::info!(%id, "book deleted");
        Ok(())
    }

    /// 書籍をIDで取得する。
    pub fn get_book_by_id(&self, id: BookId) -> Result<Option<Book>, AppError> {
        self.repo
            .get_by_id(id)
            .map_err(|e| AppError::Storage(Box::new(e)))
    }

    /// タイトル・著者・出版年で検索する。
    pub fn search_books(&self, query: &SearchQuery) -> Result<Vec<Book>, AppError> {
        self.repo
            .search(query)
            .map_err(|e| AppError::Storage(Box::new(e)))
    }

    /// 全書籍を挿入順で返す。
    pub fn list_books(&self) -> Result<Vec<Book>, AppError> {
        self.repo
            .list_all()
            .map_err(|e| AppError::Storage(Box::new(e)))
    }

    /// 書籍のステータスを変更し、更新後のエンティティを返す。
    /// IDが無ければ`BookNotFound`、ステータス不正なら`InvalidStatus`で
    /// 保存済みレコードは変更されない。
    pub fn set_book_status(&self, id: BookId, new_status: &str) -> Result<Book, AppError> {
        let mut book = self
            .get_book_by_id(id)?
            .ok_or(AppError::BookNotFound(id))?;
        book.set_status(new_status)?;
        self.repo
            .update(book.clone())
            .map_err(|e| AppError::Storage(Box::new(e)))?;
        tracing::info!(%id, status = %book.status(), "book status changed");
        Ok(book)
    }
}

/// 既存IDの最大値 + 1。永続カウンタは持たないため、最大IDの書籍を
/// 削除した直後のaddは同じ番号を再利用する。
fn next_id(books: &[Book]) -> BookId {
    let max = books.iter().map(|b| b.id().value()).max().unwrap_or(0);
    BookId::new(max + 1)
}
