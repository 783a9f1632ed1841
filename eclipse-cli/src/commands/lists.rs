//! List and rented-book command implementations

use super::{print_json, Context};
use anyhow::{Context as _, Result};

/// Show a user's status or custom lists
pub async fn lists(ctx: &Context, user: Option<String>, custom: bool, json: bool) -> Result<()> {
    let user_id = ctx.user_id(user)?;
    let lists = if custom {
        ctx.resolver.fetch_custom_lists(&user_id).await
    } else {
        ctx.resolver.fetch_status_lists(&user_id).await
    }
    .with_context(|| format!("Failed to fetch lists for {}", user_id))?;

    if json {
        return print_json(&lists);
    }

    if lists.is_empty() {
        println!("No lists found.");
        return Ok(());
    }
    for list in &lists {
        let visibility = if list.is_private { "private" } else { "public" };
        println!(
            "{} ({}, {} books, {})",
            list.title,
            visibility,
            list.len(),
            list.created_at.format("%Y-%m-%d")
        );
    }
    Ok(())
}

/// Show the books a user currently has rented
pub async fn rented(ctx: &Context, user: Option<String>, json: bool) -> Result<()> {
    let user_id = ctx.user_id(user)?;
    let books = ctx
        .resolver
        .fetch_currently_rented_books(&user_id)
        .await
        .with_context(|| format!("Failed to fetch rented books for {}", user_id))?;

    if json {
        return print_json(&books);
    }

    if books.is_empty() {
        println!("No rented books.");
        return Ok(());
    }
    for book in &books {
        println!(
            "{}  {} ({}) {:.2}/day",
            book.id,
            book.title,
            book.authors.join(", "),
            book.price
        );
    }
    Ok(())
}
