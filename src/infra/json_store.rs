use std::cell::RefCell;
use std::fs;
use std::path::PathBuf;

use crate::domain::model::book::Book;
use crate::domain::model::id::BookId;
use crate::domain::repository::{BookRepository, SearchQuery};

#[derive(Debug, thiserror::Error)]
pub enum JsonStoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// JSONファイルによるBookRepository実装。
/// openで全件をメモリへ読み込み、変更のたびにキャッシュを
/// ファイルへ丸ごと書き戻す。追記型の永続化やWALは無い。
pub struct JsonBookRepository {
    path: PathBuf,
    books: RefCell<Vec<Book>>,
}

impl JsonBookRepository {
    /// ファイルを開いてキャッシュを構築する。ファイルが無ければ
    /// 空のJSON配列で作成する。壊れたJSONはここでエラーになる。
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, JsonStoreError> {
        let path = path.into();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let books: Vec<Book> = if path.exists() {
            let content = fs::read_to_string(&path)?;
            serde_json::from_str(&content)?
        } else {
            fs::write(&path, "[]")?;
            Vec::new()
        };

        tracing::debug!(path = %path.display(), count = books.len(), "book store opened");
        Ok(Self {
            path,
            books: RefCell::new(books),
        })
    }

    /// キャッシュ全体をファイルへ書き戻す。
    fn persist(&self) -> Result<(), JsonStoreError> {
        let books = self.books.borrow();
        let content = serde_json::to_string_pretty(&*books)?;
        fs::write(&self.path, content)?;
        tracing::debug!(count = books.len(), "book store persisted");
        Ok(())
    }
}

impl BookRepository for JsonBookRepository {
    type Error = JsonStoreError;

    fn add(&self, book: Book) -> Result<(), Self::Error> {
        self.books.borrow_mut().push(book);
        self.persist()
    }

    fn delete_by_id(&self, id: BookId) -> Result<(), Self::Error> {
        self.books.borrow_mut().retain(|b| b.id() != id);
        self.persist()
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
        {
            let mut books = self.books.borrow_mut();
            if let Some(slot) = books.iter_mut().find(|b| b.id() == book.id()) {
                *slot = book;
            }
        }
        self.persist()
    }
}
