//! Book catalog service.
//!
//! Owns the existence-gated mutation protocol around the books table:
//! create refuses an occupied ISBN, update and delete refuse a missing one.
//! Those outcomes come back as `Conflict`/`NotFound` error values; only
//! store failures are unexpected here.

use crate::{
    error::{AppError, AppResult},
    models::book::Book,
    repository::Repository,
};

#[derive(Clone)]
pub struct BookService {
    repository: Repository,
}

impl BookService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Create a new book. The existence pre-check rejects an occupied ISBN
    /// without attempting the write; the insert itself still maps a
    /// primary-key violation to the same conflict, so two racing creates
    /// cannot both succeed.
    pub async fn create(&self, book: &Book) -> AppResult<()> {
        if self.repository.books.exists(&book.isbn).await? {
            return Err(AppError::Conflict(format!(
                "Book with ISBN {} already exists",
                book.isbn
            )));
        }

        self.repository.books.insert(book).await
    }

    /// Point lookup by ISBN
    pub async fn get_by_isbn(&self, isbn: &str) -> AppResult<Book> {
        self.repository
            .books
            .get_by_isbn(isbn)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Book with ISBN {} not found", isbn)))
    }

    /// Every stored book, in provider order
    pub async fn get_all(&self) -> AppResult<Vec<Book>> {
        self.repository.books.list_all().await
    }

    /// Books whose title contains `term`
    pub async fn search_by_title(&self, term: &str) -> AppResult<Vec<Book>> {
        self.repository.books.search_by_title(term).await
    }

    /// Update an existing book in place. The ISBN is the key and is never
    /// changed; a missing record is reported without writing anything.
    pub async fn update(&self, book: &Book) -> AppResult<()> {
        if !self.repository.books.exists(&book.isbn).await? {
            return Err(AppError::NotFound(format!(
                "Book with ISBN {} not found",
                book.isbn
            )));
        }

        if self.repository.books.update(book).await? {
            Ok(())
        } else {
            Err(AppError::NotFound(format!(
                "Book with ISBN {} not found",
                book.isbn
            )))
        }
    }

    /// Delete by ISBN. A zero affected-row count means the book was absent.
    pub async fn delete(&self, isbn: &str) -> AppResult<()> {
        let deleted = self.repository.books.delete(isbn).await?;
        if deleted == 0 {
            return Err(AppError::NotFound(format!(
                "Book with ISBN {} not found",
                isbn
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use sqlx::sqlite::SqlitePoolOptions;

    use super::*;
    use crate::repository;

    async fn service() -> BookService {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .expect("in-memory pool");
        repository::ensure_schema(&pool).await.expect("schema");
        BookService::new(Repository::new(pool))
    }

    fn book(isbn: &str, title: &str) -> Book {
        Book {
            isbn: isbn.to_string(),
            title: title.to_string(),
            author: "David Mendoza".to_string(),
            short_description: "All my tricks in one book".to_string(),
            page_count: 420,
            release_date: NaiveDate::from_ymd_opt(2026, 10, 1).unwrap(),
        }
    }

    #[tokio::test]
    async fn create_then_get_round_trips_all_fields() {
        let service = service().await;
        let book = book("123-4567890123", "The Dirty Coder");

        service.create(&book).await.expect("create");
        let stored = service.get_by_isbn(&book.isbn).await.expect("get");

        assert_eq!(book, stored);
    }

    #[tokio::test]
    async fn create_twice_reports_conflict_and_keeps_first_record() {
        let service = service().await;
        let first = book("123-4567890123", "The Dirty Coder");
        service.create(&first).await.expect("first create");

        let mut second = first.clone();
        second.title = "A Different Title".to_string();
        let err = service.create(&second).await.expect_err("second create");
        assert!(matches!(err, AppError::Conflict(_)));

        let stored = service.get_by_isbn(&first.isbn).await.expect("get");
        assert_eq!(first, stored);
    }

    #[tokio::test]
    async fn duplicate_insert_is_rejected_without_the_precheck() {
        // Hit the primary key directly, bypassing the service fast path.
        let service = service().await;
        let book = book("123-4567890123", "The Dirty Coder");

        service.repository.books.insert(&book).await.expect("insert");
        let err = service
            .repository
            .books
            .insert(&book)
            .await
            .expect_err("duplicate insert");

        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn get_missing_book_reports_not_found() {
        let service = service().await;
        let err = service.get_by_isbn("123-4567890123").await.expect_err("get");
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn update_missing_book_reports_not_found_and_writes_nothing() {
        let service = service().await;
        let book = book("123-4567890123", "The Dirty Coder");

        let err = service.update(&book).await.expect_err("update");
        assert!(matches!(err, AppError::NotFound(_)));

        let err = service.get_by_isbn(&book.isbn).await.expect_err("get");
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn update_overwrites_every_field_except_isbn() {
        let service = service().await;
        let original = book("123-4567890123", "The Dirty Coder");
        service.create(&original).await.expect("create");

        let mut changed = original.clone();
        changed.title = "The Clean Coder".to_string();
        changed.author = "Someone Else".to_string();
        changed.short_description = "Second edition".to_string();
        changed.page_count = 512;
        changed.release_date = NaiveDate::from_ymd_opt(2027, 1, 15).unwrap();
        service.update(&changed).await.expect("update");

        let stored = service.get_by_isbn(&original.isbn).await.expect("get");
        assert_eq!(changed, stored);
    }

    #[tokio::test]
    async fn delete_missing_book_reports_not_found() {
        let service = service().await;
        let err = service.delete("123-4567890123").await.expect_err("delete");
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn delete_removes_the_record() {
        let service = service().await;
        let book = book("123-4567890123", "The Dirty Coder");
        service.create(&book).await.expect("create");

        service.delete(&book.isbn).await.expect("delete");

        let err = service.get_by_isbn(&book.isbn).await.expect_err("get");
        assert!(matches!(err, AppError::NotFound(_)));

        let err = service.delete(&book.isbn).await.expect_err("second delete");
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn search_matches_title_substring() {
        let service = service().await;
        service
            .create(&book("123-4567890123", "The Dirty Coder"))
            .await
            .expect("create");
        service
            .create(&book("456-7890123456", "Clean Architecture"))
            .await
            .expect("create");

        let found = service.search_by_title("oder").await.expect("search");
        assert_eq!(1, found.len());
        assert_eq!("The Dirty Coder", found[0].title);

        let none = service.search_by_title("zzzzzz").await.expect("search");
        assert!(none.is_empty());
    }

    #[tokio::test]
    async fn list_all_on_empty_store_is_empty() {
        let service = service().await;
        assert!(service.get_all().await.expect("list").is_empty());
    }

    #[tokio::test]
    async fn list_all_returns_every_record() {
        let service = service().await;
        service
            .create(&book("123-4567890123", "The Dirty Coder"))
            .await
            .expect("create");
        service
            .create(&book("456-7890123456", "Clean Architecture"))
            .await
            .expect("create");

        let books = service.get_all().await.expect("list");
        assert_eq!(2, books.len());
    }
}
