//! Search command implementation

use super::{print_json, Context};
use anyhow::{Context as _, Result};

/// Search the book API and print the results
pub async fn search(ctx: &Context, query: &str, full_text: bool, json: bool) -> Result<()> {
    let books = if full_text {
        ctx.search.search_full_text(query).await
    } else {
        ctx.search.search(query).await
    }
    .with_context(|| format!("Search for {:?} failed", query))?;

    if json {
        return print_json(&books);
    }

    if books.is_empty() {
        println!("No books found.");
        return Ok(());
    }
    for book in &books {
        match book.primary_author() {
            Some(author) => println!("{}  {} ({})", book.id, book.title, author),
            None => println!("{}  {}", book.id, book.title),
        }
    }
    Ok(())
}
