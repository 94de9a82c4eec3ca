//! Console front end.
//!
//! stdin/stdout <-> application::BookService
//!
//! 6 menu options: add, delete, search, list, set-status, exit

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use crate::application::service::BookService;
use crate::domain::model::book::Book;
use crate::domain::model::id::BookId;
use crate::domain::repository::{BookRepository, SearchQuery};
use crate::infra::json_store::JsonBookRepository;

// =============================================================================
// Public entry point
// =============================================================================

/// コンソールメニューを起動する。data_pathは蔵書JSONファイル。
/// 1セッションにつきリポジトリとサービスを1組だけ作る。
pub fn run(data_path: PathBuf) -> anyhow::Result<()> {
    let repo = JsonBookRepository::open(data_path)?;
    let service = BookService::new(repo);

    let stdin = io::stdin();
    let stdout = io::stdout();
    run_loop(&service, stdin.lock(), stdout.lock())?;
    Ok(())
}

// =============================================================================
// Menu
// =============================================================================

const MENU: &str = "\n--- Library menu ---\n\
                    1. Add a book\n\
                    2. Delete a book\n\
                    3. Search books\n\
                    4. List all books\n\
                    5. Change book status\n\
                    6. Exit";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuOption {
    Add,
    Delete,
    Search,
    List,
    SetStatus,
    Exit,
}

impl MenuOption {
    /// メニュー入力("1"〜"6")をパースする。
    fn parse(s: &str) -> Option<MenuOption> {
        match s {
            "1" => Some(MenuOption::Add),
            "2" => Some(MenuOption::Delete),
            "3" => Some(MenuOption::Search),
            "4" => Some(MenuOption::List),
            "5" => Some(MenuOption::SetStatus),
            "6" => Some(MenuOption::Exit),
            _ => None,
        }
    }
}

// =============================================================================
// Input parsing
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("a number is required, got: '{given}'")]
    InvalidNumericInput { given: String },
}

fn parse_id(s: &str) -> Result<BookId, CliError> {
    s.parse::<u64>()
        .map(BookId::new)
        .map_err(|_| CliError::InvalidNumericInput {
            given: s.to_string(),
        })
}

fn parse_year(s: &str) -> Result<i32, CliError> {
    s.parse::<i32>().map_err(|_| CliError::InvalidNumericInput {
        given: s.to_string(),
    })
}

/// 検索用の年入力。空ならNone(条件を適用しない)。
fn parse_optional_year(s: &str) -> Result<Option<i32>, CliError> {
    if s.is_empty() {
        return Ok(None);
    }
    parse_year(s).map(Some)
}

/// 検索用の文字列入力。空ならNone(条件を適用しない)。
fn non_empty(s: &str) -> Option<String> {
    if s.is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}

// =============================================================================
// Session loop
// =============================================================================

/// メインループ。Exit選択または入力のEOFで抜ける。
/// サービス層のエラーは表示して次の周回へ進み、I/Oエラーだけを伝播する。
pub fn run_loop<R, In, Out>(service: &BookService<R>, mut input: In, mut out: Out) -> io::Result<()>
where
    R: BookRepository,
    In: BufRead,
    Out: Write,
{
    loop {
        writeln!(out, "{MENU}")?;
        let Some(choice) = prompt(&mut input, &mut out, "Select an option: ")? else {
            break;
        };

        match MenuOption::parse(&choice) {
            Some(MenuOption::Add) => handle_add(service, &mut input, &mut out)?,
            Some(MenuOption::Delete) => handle_delete(service, &mut input, &mut out)?,
            Some(MenuOption::Search) => handle_search(service, &mut input, &mut out)?,
            Some(MenuOption::List) => handle_list(service, &mut out)?,
            Some(MenuOption::SetStatus) => handle_set_status(service, &mut input, &mut out)?,
            Some(MenuOption::Exit) => {
                writeln!(out, "Thanks for visiting the library. Goodbye!")?;
                break;
            }
            None => {
                writeln!(out, "Invalid option. Enter a number from 1 to 6.")?;
            }
        }
    }
    Ok(())
}

/// プロンプトを表示して1行読む。EOFならNone。入力はtrim済み。
fn prompt<In: BufRead, Out: Write>(
    input: &mut In,
    out: &mut Out,
    message: &str,
) -> io::Result<Option<String>> {
    write!(out, "{message}")?;
    out.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

// =============================================================================
// Handlers
// =============================================================================

fn handle_add<R: BookRepository, In: BufRead, Out: Write>(
    service: &BookService<R>,
    input: &mut In,
    out: &mut Out,
) -> io::Result<()> {
    let Some(title) = prompt(input, out, "Title: ")? else {
        return Ok(());
    };
    let Some(author) = prompt(input, out, "Author: ")? else {
        return Ok(());
    };
    let Some(raw_year) = prompt(input, out, "Publication year: ")? else {
        return Ok(());
    };

    let year = match parse_year(&raw_year) {
        Ok(year) => year,
        Err(e) => {
            writeln!(out, "{e}")?;
            return Ok(());
        }
    };

    match service.add_book(title, author, year) {
        Ok(book) => writeln!(out, "Added: {book}"),
        Err(e) => writeln!(out, "{e}"),
    }
}

fn handle_delete<R: BookRepository, In: BufRead, Out: Write>(
    service: &BookService<R>,
    input: &mut In,
    out: &mut Out,
) -> io::Result<()> {
    let Some(raw_id) = prompt(input, out, "Book ID to delete: ")? else {
        return Ok(());
    };

    let id = match parse_id(&raw_id) {
        Ok(id) => id,
        Err(e) => {
            writeln!(out, "{e}")?;
            return Ok(());
        }
    };

    match service.delete_book_by_id(id) {
        Ok(()) => writeln!(out, "Deleted book with ID {id}"),
        Err(e) => writeln!(out, "{e}"),
    }
}

fn handle_search<R: BookRepository, In: BufRead, Out: Write>(
    service: &BookService<R>,
    input: &mut In,
    out: &mut Out,
) -> io::Result<()> {
    let Some(title) = prompt(input, out, "Title (press Enter to skip): ")? else {
        return Ok(());
    };
    let Some(author) = prompt(input, out, "Author (press Enter to skip): ")? else {
        return Ok(());
    };
    let Some(raw_year) = prompt(input, out, "Year (press Enter to skip): ")? else {
        return Ok(());
    };

    let year = match parse_optional_year(&raw_year) {
        Ok(year) => year,
        Err(e) => {
            writeln!(out, "{e}")?;
            return Ok(());
        }
    };

    let query = SearchQuery {
        title: non_empty(&title),
        author: non_empty(&author),
        year,
    };

    match service.search_books(&query) {
        Ok(books) if books.is_empty() => writeln!(out, "No books matched your search."),
        Ok(books) => write_books(out, "--- Search results ---", &books),
        Err(e) => writeln!(out, "{e}"),
    }
}

fn handle_list<R: BookRepository, Out: Write>(
    service: &BookService<R>,
    out: &mut Out,
) -> io::Result<()> {
    match service.list_books() {
        Ok(books) if books.is_empty() => writeln!(out, "The library is empty."),
        Ok(books) => write_books(out, "--- Library books ---", &books),
        Err(e) => writeln!(out, "{e}"),
    }
}

fn handle_set_status<R: BookRepository, In: BufRead, Out: Write>(
    service: &BookService<R>,
    input: &mut In,
    out: &mut Out,
) -> io::Result<()> {
    let Some(raw_id) = prompt(input, out, "Book ID to update: ")? else {
        return Ok(());
    };
    let Some(raw_status) = prompt(input, out, "New status (available / borrowed): ")? else {
        return Ok(());
    };

    let id = match parse_id(&raw_id) {
        Ok(id) => id,
        Err(e) => {
            writeln!(out, "{e}")?;
            return Ok(());
        }
    };

    match service.set_book_status(id, &raw_status.to_lowercase()) {
        Ok(book) => writeln!(out, "Updated: {book}"),
        Err(e) => writeln!(out, "{e}"),
    }
}

fn write_books<Out: Write>(out: &mut Out, header: &str, books: &[Book]) -> io::Result<()> {
    writeln!(out, "\n{header}")?;
    for book in books {
        writeln!(out, "{book}")?;
    }
    Ok(())
}

// =============================================================================
// Tests
// =============================================================================
