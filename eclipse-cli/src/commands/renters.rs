//! Renter command implementations

use super::{print_json, Context};
use anyhow::{Context as _, Result};
use eclipse_core::Rating;

/// List all renters with their offered books
pub async fn renters(ctx: &Context, json: bool) -> Result<()> {
    let renters = ctx
        .resolver
        .fetch_renters()
        .await
        .context("Failed to fetch renters")?;

    if json {
        return print_json(&renters);
    }

    if renters.is_empty() {
        println!("No renters found.");
        return Ok(());
    }
    for renter in &renters {
        let rating = renter
            .average_rating()
            .map(|avg| format!("{:.1}", avg))
            .unwrap_or_else(|| "unrated".to_string());
        println!("{} ({}) - {} [{}]", renter.name, renter.id, rating, renter.books.len());
        for book in &renter.books {
            println!("    {}  {:.2}/day", book.title, book.price);
        }
    }
    Ok(())
}

/// Show one renter's name and rating
pub async fn renter(ctx: &Context, renter_id: &str) -> Result<()> {
    let details = ctx.resolver.fetch_renter_details(renter_id).await;

    let name = details
        .name
        .with_context(|| format!("Renter {} not found", renter_id))?;
    println!("Name:    {}", name);

    match details.rating.as_ref().and_then(Rating::from_partial) {
        Some(rating) => {
            println!("Rating:  {:.1}", rating.average());
            println!("  Book quality:       {}", rating.book_quality());
            println!("  Communication:      {}", rating.communication());
            println!("  Overall experience: {}", rating.overall_experience());
        }
        None => println!("Rating:  unrated"),
    }
    Ok(())
}

/// Record a rating for a renter
pub async fn rate(
    ctx: &Context,
    renter_id: &str,
    quality: f64,
    communication: f64,
    experience: f64,
) -> Result<()> {
    let rating = Rating::compose(quality, communication, experience);
    ctx.resolver
        .update_renter_rating(renter_id, &rating)
        .await
        .with_context(|| format!("Failed to rate renter {}", renter_id))?;

    println!("Rated {} ({:.1})", renter_id, rating.average());
    Ok(())
}
