use super::model::book::Book;
use super::model::id::BookId;

/// 検索条件。指定された条件のAND結合で絞り込む。
/// Noneまたは空文字列の条件は適用されない。
#[derive(Debug, Clone, Default)]
pub struct SearchQuery {
    /// タイトルの部分一致(大文字小文字を無視)
    pub title: Option<String>,
    /// 著者の部分一致(大文字小文字を無視)
    pub author: Option<String>,
    /// 出版年の完全一致
    pub year: Option<i32>,
}

impl SearchQuery {
    /// 有効な条件がひとつも無いか。
    pub fn is_empty(&self) -> bool {
        effective(self.title.as_deref()).is_none()
            && effective(self.author.as_deref()).is_none()
            && self.year.is_none()
    }

    /// 指定した全条件をbookが満たすか。
    pub fn matches(&self, book: &Book) -> bool {
        if let Some(title) = effective(self.title.as_deref()) {
            if !contains_ignore_case(book.title(), title) {
                return false;
            }
        }
        if let Some(author) = effective(self.author.as_deref()) {
            if !contains_ignore_case(book.author(), author) {
                return false;
            }
        }
        if let Some(year) = self.year {
            if book.year() != year {
                return false;
            }
        }
        true
    }
}

fn effective(criterion: Option<&str>) -> Option<&str> {
    criterion.filter(|s| !s.is_empty())
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// 永続化の抽象。Infra層が実装する。
///
/// ID採番や存在チェックはこの層の責務ではない。addは呼び出し側が
/// 採番済みのIDを渡す前提で重複チェックをせず、delete_by_idは
/// 該当なしでもエラーにしない(冪等)。
pub trait BookRepository {
    type Error: std::error::Error + Send + Sync + 'static;

    /// 末尾に追加して永続化する。
    fn add(&self, book: Book) -> Result<(), Self::Error>;

    /// IDが一致する全エントリを取り除いて永続化する。
    fn delete_by_id(&self, id: BookId) -> Result<(), Self::Error>;

    /// 最初に一致したエントリを返す。状態は変更しない。
    fn get_by_id(&self, id: BookId) -> Result<Option<Book>, Self::Error>;

    /// 条件に一致するエントリのスナップショットを返す。
    fn search(&self, query: &SearchQuery) -> Result<Vec<Book>, Self::Error>;

    /// 全件を挿入順のまま返す。
    fn list_all(&self) -> Result<Vec<Book>, Self::Error>;

    /// `book.id`が一致するエントリを置き換えて永続化する。該当なしならno-op。
    fn update(&self, book: Book) -> Result<(), Self::Error>;
}
