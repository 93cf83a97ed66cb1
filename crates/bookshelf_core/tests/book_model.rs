use bookshelf_core::{Book, BookValidationError};

#[test]
fn book_serialization_uses_expected_wire_fields() {
    let book = Book::with_id(1, "Dune", 1965);

    let json = serde_json::to_value(&book).unwrap();
    assert_eq!(
        json,
        serde_json::json!({"id": 1, "title": "Dune", "year": 1965})
    );

    let decoded: Book = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, book);
}

#[test]
fn validation_errors_have_readable_messages() {
    assert_eq!(BookValidationError::EmptyTitle.to_string(), "title is required");
    assert_eq!(BookValidationError::MissingYear.to_string(), "year is required");
    assert_eq!(
        BookValidationError::MissingId.to_string(),
        "book id is required for update"
    );
}
