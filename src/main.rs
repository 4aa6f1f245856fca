//! Bookscout - search and browse books from the terminal
//!
//! A thin front end over the book discovery service: each subcommand maps to
//! one catalog operation and prints plain-text results.

mod cache;
mod catalog;
mod cli;
mod services;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use catalog::{Book, BookDetails};
use cli::{parse_sort_arg, Cli, Command};
use services::BookService;

/// Initializes log output, filtered by RUST_LOG with an info default
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

/// Prints a numbered list of books
fn print_books(books: &[Book]) {
    if books.is_empty() {
        println!("No books found.");
        return;
    }
    for (index, book) in books.iter().enumerate() {
        println!(
            "{:2}. {} — {} [{:.1}★, {} reviews] ({})",
            index + 1,
            book.title,
            book.author,
            book.rating,
            book.review_count,
            book.id
        );
    }
}

/// Prints the full detail view of one book
fn print_details(details: &BookDetails) {
    let book = &details.book;
    println!("{}", book.title);
    if let Some(subtitle) = &details.subtitle {
        println!("{}", subtitle);
    }
    println!("by {}", details.authors.join(", "));
    println!();
    println!("Rating:     {:.1} ({} reviews)", book.rating, book.review_count);
    println!("Condition:  {}", book.condition.label());
    if let Some(publisher) = &details.publisher {
        println!("Publisher:  {}", publisher);
    }
    if let Some(date) = &book.published_date {
        println!("Published:  {}", date);
    }
    if let Some(pages) = details.page_count {
        println!("Pages:      {}", pages);
    }
    if let Some(isbn) = &details.isbn {
        println!("ISBN:       {}", isbn);
    }
    if let Some(language) = &details.language {
        println!("Language:   {}", language);
    }
    println!("Cover:      {}", book.cover_url);
    if let Some(preview) = &book.preview_link {
        println!("Preview:    {}", preview);
    }
    if !book.description.is_empty() {
        println!();
        println!("{}", book.description);
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let cli = Cli::parse();
    let service = BookService::with_defaults();

    match cli.command {
        Command::Search {
            query,
            category,
            sort,
            offset,
            limit,
        } => {
            let sort = parse_sort_arg(&sort)?;
            let results = service
                .search(&query, category.as_deref(), sort, offset, limit)
                .await;
            println!("{} matches total", results.total);
            print_books(&results.books);
        }
        Command::TopRated => {
            let books = service.highly_rated().await;
            print_books(&books);
        }
        Command::Picks => {
            let books = service.editors_picks().await;
            print_books(&books);
        }
        Command::Category { name, limit, sort } => {
            let sort = parse_sort_arg(&sort)?;
            let books = service.category_search(&name, limit, sort).await;
            print_books(&books);
        }
        Command::Details { id } => {
            let details = service.book_details(&id).await?;
            print_details(&details);
        }
    }

    Ok(())
}
