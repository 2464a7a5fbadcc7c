//! Books repository for database operations.
//!
//! All queries are parameterized; results come back as thin storage
//! outcomes (`Option`, `bool`, affected-row counts) and the service layer
//! decides what they mean for the caller.

use sqlx::{Pool, Sqlite};

use crate::{
    error::{AppError, AppResult},
    models::book::Book,
};

#[derive(Clone)]
pub struct BooksRepository {
    pool: Pool<Sqlite>,
}

impl BooksRepository {
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }

    /// Insert a new book. A primary-key violation on `isbn` is reported as
    /// a conflict; that signal is authoritative even when the caller's
    /// existence pre-check passed.
    pub async fn insert(&self, book: &Book) -> AppResult<()> {
        let result = sqlx::query(
            r#"
            INSERT INTO books (isbn, title, author, short_description, page_count, release_date)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&book.isbn)
        .bind(&book.title)
        .bind(&book.author)
        .bind(&book.short_description)
        .bind(book.page_count)
        .bind(book.release_date)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => Err(AppError::Conflict(
                format!("Book with ISBN {} already exists", book.isbn),
            )),
            Err(e) => Err(e.into()),
        }
    }

    /// Point lookup by ISBN
    pub async fn get_by_isbn(&self, isbn: &str) -> AppResult<Option<Book>> {
        let book = sqlx::query_as::<_, Book>("SELECT * FROM books WHERE isbn = ? LIMIT 1")
            .bind(isbn)
            .fetch_optional(&self.pool)
            .await?;

        Ok(book)
    }

    /// Whether a book with this ISBN exists
    pub async fn exists(&self, isbn: &str) -> AppResult<bool> {
        let found: Option<i32> = sqlx::query_scalar("SELECT 1 FROM books WHERE isbn = ? LIMIT 1")
            .bind(isbn)
            .fetch_optional(&self.pool)
            .await?;

        Ok(found.is_some())
    }

    /// Every stored book, in provider order (no ORDER BY is issued and
    /// callers must not rely on the ordering)
    pub async fn list_all(&self) -> AppResult<Vec<Book>> {
        let books = sqlx::query_as::<_, Book>("SELECT * FROM books")
            .fetch_all(&self.pool)
            .await?;

        Ok(books)
    }

    /// Books whose title contains `term`. Case sensitivity follows the
    /// store's LIKE semantics.
    pub async fn search_by_title(&self, term: &str) -> AppResult<Vec<Book>> {
        let books =
            sqlx::query_as::<_, Book>("SELECT * FROM books WHERE title LIKE '%' || ? || '%'")
                .bind(term)
                .fetch_all(&self.pool)
                .await?;

        Ok(books)
    }

    /// Overwrite every field except `isbn`. Returns false when no row
    /// matched.
    pub async fn update(&self, book: &Book) -> AppResult<bool> {
        let result = sqlx::query(
            r#"
            UPDATE books
            SET title = ?, author = ?, short_description = ?, page_count = ?, release_date = ?
            WHERE isbn = ?
            "#,
        )
        .bind(&book.title)
        .bind(&book.author)
        .bind(&book.short_description)
        .bind(book.page_count)
        .bind(book.release_date)
        .bind(&book.isbn)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Delete by ISBN. Returns the affected-row count.
    pub async fn delete(&self, isbn: &str) -> AppResult<u64> {
        let result = sqlx::query("DELETE FROM books WHERE isbn = ?")
            .bind(isbn)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
