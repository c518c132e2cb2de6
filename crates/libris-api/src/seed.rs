//! Startup seeding of the catalog and membership from a YAML file.
//!
//! ```yaml
//! books:
//!   - isbn: 978-4-00-000001-0
//!     genre: literature
//!     title: I Am a Cat
//!     author: Natsume Soseki
//! members:
//!   - id: M001
//!     name: Taro Tanaka
//! ```

use std::path::Path;

use libris_core::error::LendingError;
use libris_lending::application::library::Library;
use libris_lending::domain::book::Book;
use libris_lending::domain::member::Member;
use serde::Deserialize;

use crate::error::AppError;

/// A catalog entry in the seed file.
#[derive(Debug, Clone, Deserialize)]
pub struct BookSeed {
    /// The isbn.
    pub isbn: String,
    /// The genre.
    pub genre: String,
    /// The title.
    pub title: String,
    /// The author.
    pub author: String,
}

/// A member entry in the seed file.
#[derive(Debug, Clone, Deserialize)]
pub struct MemberSeed {
    /// The member identifier.
    pub id: String,
    /// The member's name.
    pub name: String,
}

/// Books and members to register at startup.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SeedFile {
    /// Catalog entries.
    #[serde(default)]
    pub books: Vec<BookSeed>,
    /// Member entries.
    #[serde(default)]
    pub members: Vec<MemberSeed>,
}

impl SeedFile {
    /// Parses a seed document.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Seed` if the YAML is malformed.
    pub fn parse(yaml: &str) -> Result<Self, AppError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Reads and parses the seed file at `path`.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Server` if the file cannot be read and
    /// `AppError::Seed` if it is malformed.
    pub fn load(path: &Path) -> Result<Self, AppError> {
        let yaml = std::fs::read_to_string(path)?;
        Self::parse(&yaml)
    }

    /// Registers every seeded book and member, returning how many of each.
    ///
    /// # Errors
    ///
    /// Returns `LendingError::Infrastructure` if a store rejects a write.
    pub fn apply(self, library: &mut Library) -> Result<(usize, usize), LendingError> {
        let counts = (self.books.len(), self.members.len());
        for seed in self.books {
            library.add_book(Book::new(seed.isbn, seed.genre, seed.title, seed.author))?;
        }
        for seed in self.members {
            library.add_member(Member::new(seed.id, seed.name))?;
        }
        Ok(counts)
    }
}
