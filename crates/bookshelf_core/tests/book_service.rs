use bookshelf_core::{
    Book, BookId, BookRepository, BookService, BookValidationError, RepoError, RepoResult,
};
use std::sync::Mutex;

/// Records every repository call so tests can assert on delegation.
#[derive(Default)]
struct RecordingRepository {
    calls: Mutex<Vec<String>>,
}

impl RecordingRepository {
    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

impl BookRepository for RecordingRepository {
    fn create_book(&self, book: &mut Book) -> RepoResult<BookId> {
        self.record(format!("create:{}", book.title));
        book.id = 11;
        Ok(book.id)
    }

    fn list_books(&self) -> RepoResult<Vec<Book>> {
        self.record("list".to_string());
        Ok(vec![Book::with_id(11, "Dune", 1965)])
    }

    fn get_book(&self, id: BookId) -> RepoResult<Book> {
        self.record(format!("get:{id}"));
        Err(RepoError::NotFound(id))
    }

    fn update_book(&self, book: &Book) -> RepoResult<()> {
        self.record(format!("update:{}", book.id));
        Ok(())
    }

    fn delete_book(&self, id: BookId) -> RepoResult<()> {
        self.record(format!("delete:{id}"));
        Ok(())
    }
}

impl BookRepository for &RecordingRepository {
    fn create_book(&self, book: &mut Book) -> RepoResult<BookId> {
        (*self).create_book(book)
    }

    fn list_books(&self) -> RepoResult<Vec<Book>> {
        (*self).list_books()
    }

    fn get_book(&self, id: BookId) -> RepoResult<Book> {
        (*self).get_book(id)
    }

    fn update_book(&self, book: &Book) -> RepoResult<()> {
        (*self).update_book(book)
    }

    fn delete_book(&self, id: BookId) -> RepoResult<()> {
        (*self).delete_book(id)
    }
}

#[test]
fn service_passes_calls_through_to_repository() {
    let repo = RecordingRepository::default();
    let service = BookService::new(&repo);

    let mut book = Book::new("Dune", 1965);
    assert_eq!(service.create_book(&mut book).unwrap(), 11);
    assert_eq!(book.id, 11);
    assert_eq!(service.list_books().unwrap().len(), 1);
    assert!(matches!(service.get_book(5), Err(RepoError::NotFound(5))));
    service.update_book(&Book::with_id(11, "Dune", 1966)).unwrap();
    service.delete_book(11).unwrap();

    assert_eq!(
        repo.calls(),
        vec!["create:Dune", "list", "get:5", "update:11", "delete:11"]
    );
}

#[test]
fn update_without_id_is_rejected_before_repository() {
    let repo = RecordingRepository::default();
    let service = BookService::new(&repo);

    let err = service.update_book(&Book::new("Dune", 1965)).unwrap_err();

    assert!(matches!(
        err,
        RepoError::Validation(BookValidationError::MissingId)
    ));
    assert!(repo.calls().is_empty());
}
