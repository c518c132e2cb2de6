//! Fixture data shared by lending and API tests.

use chrono::{DateTime, TimeZone, Utc};
use libris_lending::application::library::Library;
use libris_lending::domain::book::Book;
use libris_lending::domain::member::Member;
use libris_store::InMemoryRepository;

/// Midnight UTC on the given day.
///
/// # Panics
///
/// Panics if the date does not exist.
#[must_use]
pub fn date(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 0, 0, 0)
        .single()
        .expect("fixture date must exist")
}

/// Four Soseki novels, isbns `978-4-00-000001-0` through `978-4-00-000004-0`.
#[must_use]
pub fn sample_books() -> Vec<Book> {
    [
        ("978-4-00-000001-0", "I Am a Cat"),
        ("978-4-00-000002-0", "Botchan"),
        ("978-4-00-000003-0", "Kokoro"),
        ("978-4-00-000004-0", "Sanshiro"),
    ]
    .into_iter()
    .map(|(isbn, title)| Book::new(isbn, "literature", title, "Natsume Soseki"))
    .collect()
}

/// Members `M001` and `M002`.
#[must_use]
pub fn sample_members() -> Vec<Member> {
    vec![
        Member::new("M001", "Taro Tanaka"),
        Member::new("M002", "Hanako Sato"),
    ]
}

/// A library over in-memory stores holding the sample books and members,
/// with the standard rule chain and no notifier.
#[must_use]
pub fn fixture_library() -> Library {
    Library::new(
        sample_books().into_iter().collect::<InMemoryRepository<Book>>(),
        sample_members()
            .into_iter()
            .collect::<InMemoryRepository<Member>>(),
    )
}
