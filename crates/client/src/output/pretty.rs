//! Pretty output formatting.

use tapeo_core::auth::User;
use tapeo_core::content::{Category, City, Review, Venue};

/// Format a user for display.
pub fn format_user(user: &User) -> String {
    format!(
        "{}\n  ID: {}\n  Email: {}\n  Role: {}",
        user.name,
        user.id,
        user.email,
        user.role.as_str()
    )
}

/// Format users for display.
pub fn format_users(users: &[User]) -> String {
    if users.is_empty() {
        return "No users found.".to_string();
    }
    let mut output = format!("USERS ({})\n", users.len());
    output.push_str(&"-".repeat(40));
    for user in users {
        output.push_str(&format!("\n{}", format_user(user)));
        output.push('\n');
    }
    output
}

/// Format a city for display.
pub fn format_city(city: &City) -> String {
    let mut output = format!("{} (/{})\n  ID: {}", city.title, city.slug, city.id);
    if let Some(region) = &city.region {
        output.push_str(&format!("\n  Region: {}", region));
    }
    output
}

/// Format cities for display.
pub fn format_cities(cities: &[City]) -> String {
    if cities.is_empty() {
        return "No cities found.".to_string();
    }
    let mut output = format!("CITIES ({})\n", cities.len());
    output.push_str(&"-".repeat(40));
    for city in cities {
        output.push_str(&format!("\n{}", format_city(city)));
        output.push('\n');
    }
    output
}

/// Format a venue for display.
pub fn format_venue(venue: &Venue) -> String {
    let mut output = format!(
        "{} ({})\n  ID: {}\n  City: {}\n  Address: {}",
        venue.title, venue.slug, venue.id, venue.city_id, venue.address
    );
    if let Some(price) = &venue.price_range {
        output.push_str(&format!("\n  Price: {}", price));
    }
    if let Some(phone) = &venue.phone {
        output.push_str(&format!("\n  Phone: {}", phone));
    }
    if let Some(website) = &venue.website {
        output.push_str(&format!("\n  Website: {}", website));
    }
    output
}

/// Format venues for display.
pub fn format_venues(venues: &[Venue]) -> String {
    if venues.is_empty() {
        return "No venues found.".to_string();
    }
    let mut output = format!("VENUES ({})\n", venues.len());
    output.push_str(&"-".repeat(40));
    for venue in venues {
        output.push_str(&format!("\n{}", format_venue(venue)));
        output.push('\n');
    }
    output
}

/// Format a review for display.
pub fn format_review(review: &Review) -> String {
    let state = if review.is_published() {
        "published"
    } else {
        "draft"
    };
    format!(
        "{} ({})\n  ID: {}\n  Venue: {}\n  Author: {}\n  Score: {:.1}\n  State: {}",
        review.title,
        review.slug,
        review.id,
        review.venue_id,
        review.author,
        review.ratings.overall_score(),
        state
    )
}

/// Format reviews for display.
pub fn format_reviews(reviews: &[Review]) -> String {
    if reviews.is_empty() {
        return "No reviews found.".to_string();
    }
    let mut output = format!("REVIEWS ({})\n", reviews.len());
    output.push_str(&"-".repeat(40));
    for review in reviews {
        output.push_str(&format!("\n{}", format_review(review)));
        output.push('\n');
    }
    output
}

/// Format a category for display.
pub fn format_category(category: &Category) -> String {
    let mut output = format!(
        "{} (/categorias/{})\n  ID: {}",
        category.title, category.slug, category.id
    );
    if let Some(description) = &category.description {
        output.push_str(&format!("\n  Description: {}", description));
    }
    output
}

/// Format categories for display.
pub fn format_categories(categories: &[Category]) -> String {
    if categories.is_empty() {
        return "No categories found.".to_string();
    }
    let mut output = format!("CATEGORIES ({})\n", categories.len());
    output.push_str(&"-".repeat(40));
    for category in categories {
        output.push_str(&format!("\n{}", format_category(category)));
        output.push('\n');
    }
    output
}
