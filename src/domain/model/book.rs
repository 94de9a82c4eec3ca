use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::id::BookId;
use crate::domain::error::DomainError;

/// 書籍の貸出状態。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookStatus {
    #[default]
    Available,
    Borrowed,
}

impl BookStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookStatus::Available => "available",
            BookStatus::Borrowed => "borrowed",
        }
    }
}

impl fmt::Display for BookStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BookStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "available" => Ok(BookStatus::Available),
            "borrowed" => Ok(BookStatus::Borrowed),
            other => Err(DomainError::InvalidStatus {
                given: other.to_string(),
            }),
        }
    }
}

/// 蔵書1冊。書誌情報(title / author / year)は作成後に変更できず、
/// statusのみ`set_status`で変更する。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    id: BookId,
    title: String,
    author: String,
    year: i32,
    #[serde(default)]
    status: BookStatus,
}

impl Book {
    pub fn new(
        id: BookId,
        title: impl Into<String>,
        author: impl Into<String>,
        year: i32,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            author: author.into(),
            year,
            status: BookStatus::default(),
        }
    }

    pub fn id(&self) -> BookId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn status(&self) -> BookStatus {
        self.status
    }

    /// ステータス文字列を検証してから置き換える。不正値なら現状維持でエラー。
    pub fn set_status(&mut self, new_status: &str) -> Result<(), DomainError> {
        self.status = new_status.parse()?;
        Ok(())
    }
}

impl fmt::Display for Book {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{} \"{}\" by {} ({}) — {}",
            self.id, self.title, self.author, self.year, self.status
        )
    }
}
