//! Static fallback datasets
//!
//! Bundled book data served when the live catalog cannot be reached. List
//! operations return these sets exactly as defined here.

use crate::catalog::{Book, BookDetails, Condition, Format};

/// Builds a plausible frontcover URL for a sample volume
fn cover(id: &str) -> String {
    format!(
        "https://books.google.com/books/content?id={}&printsec=frontcover&img=1&zoom=2",
        id
    )
}

#[allow(clippy::too_many_arguments)]
fn sample(
    id: &str,
    title: &str,
    author: &str,
    description: &str,
    rating: f64,
    review_count: u32,
    category: &str,
    published_date: &str,
    format: Format,
) -> Book {
    Book {
        id: id.to_string(),
        title: title.to_string(),
        author: author.to_string(),
        description: description.to_string(),
        cover_url: cover(id),
        rating,
        review_count,
        categories: vec![category.to_string()],
        published_date: Some(published_date.to_string()),
        is_used: false,
        condition: Condition::New,
        format,
        download_link: None,
        preview_link: Some(format!("https://books.google.com/books?id={}", id)),
        purchase_link: None,
    }
}

/// Fallback dataset for search, category browse, and top-rated sections
pub fn sample_books() -> Vec<Book> {
    vec![
        sample(
            "s1gVAAAAYAAJ",
            "Pride and Prejudice",
            "Jane Austen",
            "Elizabeth Bennet navigates manners, upbringing, and marriage in Regency England.",
            4.6,
            1843,
            "Fiction",
            "1813",
            Format::Paperback,
        ),
        sample(
            "XV8XAAAAYAAJ",
            "Moby-Dick",
            "Herman Melville",
            "Captain Ahab's obsessive pursuit of the white whale.",
            4.1,
            967,
            "Fiction",
            "1851",
            Format::Paperback,
        ),
        sample(
            "LXp0AAAAMAAJ",
            "Jane Eyre",
            "Charlotte Brontë",
            "An orphan's path from a harsh childhood to governess at Thornfield Hall.",
            4.5,
            1211,
            "Fiction",
            "1847",
            Format::Ebook,
        ),
        sample(
            "7nAMAAAAYAAJ",
            "The Picture of Dorian Gray",
            "Oscar Wilde",
            "A portrait bears the marks of its subject's corruption.",
            4.3,
            822,
            "Fiction",
            "1890",
            Format::Ebook,
        ),
        sample(
            "CfcMAQAAMAAJ",
            "Walden",
            "Henry David Thoreau",
            "Two years of simple living in the woods beside Walden Pond.",
            4.0,
            534,
            "Philosophy",
            "1854",
            Format::Paperback,
        ),
        sample(
            "ZBYuAAAAYAAJ",
            "The Adventures of Sherlock Holmes",
            "Arthur Conan Doyle",
            "Twelve cases for the consulting detective of Baker Street.",
            4.7,
            1504,
            "Mystery",
            "1892",
            Format::Ebook,
        ),
        sample(
            "3WA9AAAAYAAJ",
            "Frankenstein",
            "Mary Shelley",
            "A scientist abandons the creature he brought to life.",
            4.2,
            1102,
            "Science Fiction",
            "1818",
            Format::Paperback,
        ),
        sample(
            "qZcQAQAAMAAJ",
            "The War of the Worlds",
            "H. G. Wells",
            "Martian invaders land in Victorian England.",
            4.1,
            689,
            "Science Fiction",
            "1898",
            Format::Ebook,
        ),
    ]
}

/// Fallback dataset for the editor's picks section
pub fn editors_pick_books() -> Vec<Book> {
    vec![
        sample(
            "Wir9zQEACAAJ",
            "The Midnight Library",
            "Matt Haig",
            "Between life and death sits a library of lives not lived.",
            4.2,
            1320,
            "Fiction",
            "2020-08-13",
            Format::Paperback,
        ),
        sample(
            "GE_hDwAAQBAJ",
            "Project Hail Mary",
            "Andy Weir",
            "A lone astronaut wakes with no memory and one impossible task.",
            4.8,
            1764,
            "Science Fiction",
            "2021-05-04",
            Format::Ebook,
        ),
        sample(
            "wS7UzQEACAAJ",
            "Klara and the Sun",
            "Kazuo Ishiguro",
            "An Artificial Friend watches the world from a storefront window.",
            4.0,
            845,
            "Fiction",
            "2021-03-02",
            Format::Paperback,
        ),
        sample(
            "1qYhDgAAQBAJ",
            "The Song of Achilles",
            "Madeline Miller",
            "The Iliad retold through Patroclus's eyes.",
            4.6,
            1497,
            "Fiction",
            "2012-03-06",
            Format::Ebook,
        ),
        sample(
            "2ObWDgAAQBAJ",
            "Educated",
            "Tara Westover",
            "A memoir of a childhood without schooling and the pull of learning.",
            4.7,
            1903,
            "Biography & Autobiography",
            "2018-02-20",
            Format::Paperback,
        ),
        sample(
            "lbNvEAAAQBAJ",
            "Tomorrow, and Tomorrow, and Tomorrow",
            "Gabrielle Zevin",
            "Two friends build video games and a life's collaboration.",
            4.3,
            1188,
            "Fiction",
            "2022-07-05",
            Format::Ebook,
        ),
    ]
}

/// Fallback detail record for the single-book view
///
/// Carries the requested id so links on the detail page stay coherent.
pub fn sample_book_details(id: &str) -> BookDetails {
    let mut book = sample(
        id,
        "Pride and Prejudice",
        "Jane Austen",
        "Elizabeth Bennet navigates manners, upbringing, and marriage in Regency England.",
        4.6,
        1843,
        "Fiction",
        "1813",
        Format::Paperback,
    );
    book.preview_link = Some(format!("https://books.google.com/books?id={}", id));

    BookDetails {
        book,
        subtitle: None,
        authors: vec!["Jane Austen".to_string()],
        isbn: Some("9780141439518".to_string()),
        language: Some("en".to_string()),
        page_count: Some(480),
        publisher: Some("Penguin Classics".to_string()),
    }
}
