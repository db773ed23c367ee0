//! schema.org structured data for the public pages.
//!
//! Each builder returns a compact JSON string ready to drop into a
//! `<script type="application/ld+json">` block. Optional source fields
//! are omitted from the output instead of serialized as null.

use serde_json::{json, Value};
use tapeo_core::content::{Category, City, FaqEntry, Guide, Review, Venue};

/// LocalBusiness document for a venue page.
///
/// The aggregate rating is computed over the venue's published reviews
/// and omitted entirely while there are none.
pub fn local_business(
    venue: &Venue,
    city: &City,
    categories: &[Category],
    reviews: &[Review],
    url: &str,
) -> String {
    let mut address = json!({
        "@type": "PostalAddress",
        "streetAddress": venue.address,
        "addressLocality": city.title,
        "addressCountry": "ES",
    });
    if let Some(region) = &city.region {
        address["addressRegion"] = json!(region);
    }

    let mut doc = json!({
        "@context": "https://schema.org",
        "@type": "Restaurant",
        "name": venue.title,
        "url": url,
        "address": address,
    });

    if let Some(phone) = &venue.phone {
        doc["telephone"] = json!(phone);
    }
    if let Some(price_range) = &venue.price_range {
        doc["priceRange"] = json!(price_range.symbol());
    }
    if let Some(geo) = &venue.geo {
        doc["geo"] = json!({
            "@type": "GeoCoordinates",
            "latitude": geo.lat,
            "longitude": geo.lng,
        });
    }
    if !categories.is_empty() {
        let cuisines: Vec<&str> = categories.iter().map(|c| c.title.as_str()).collect();
        doc["servesCuisine"] = json!(cuisines);
    }

    let published: Vec<&Review> = reviews.iter().filter(|r| r.is_published()).collect();
    if !published.is_empty() {
        let sum: f64 = published.iter().map(|r| r.ratings.overall_score()).sum();
        doc["aggregateRating"] = json!({
            "@type": "AggregateRating",
            "ratingValue": round1(sum / published.len() as f64),
            "bestRating": 10,
            "worstRating": 0,
            "reviewCount": published.len(),
        });
    }

    doc.to_string()
}

/// Review document for a review page, nesting the reviewed venue.
pub fn review(review: &Review, venue: &Venue, venue_url: &str, review_url: &str) -> String {
    let mut doc = json!({
        "@context": "https://schema.org",
        "@type": "Review",
        "name": review.title,
        "url": review_url,
        "author": {
            "@type": "Person",
            "name": review.author,
        },
        "reviewRating": {
            "@type": "Rating",
            "ratingValue": round1(review.ratings.overall_score()),
            "bestRating": 10,
            "worstRating": 0,
        },
        "itemReviewed": {
            "@type": "Restaurant",
            "name": venue.title,
            "url": venue_url,
        },
    });

    if let Some(published_at) = review.published_at {
        doc["datePublished"] = json!(published_at.format("%Y-%m-%d").to_string());
    }
    if let Some(summary) = &review.summary {
        doc["reviewBody"] = json!(summary);
    }

    doc.to_string()
}

/// FAQPage document; `None` when the review has no FAQ entries.
pub fn faq_page(faqs: &[FaqEntry]) -> Option<String> {
    if faqs.is_empty() {
        return None;
    }

    let questions: Vec<Value> = faqs
        .iter()
        .map(|faq| {
            json!({
                "@type": "Question",
                "name": faq.question,
                "acceptedAnswer": {
                    "@type": "Answer",
                    "text": faq.answer,
                },
            })
        })
        .collect();

    Some(
        json!({
            "@context": "https://schema.org",
            "@type": "FAQPage",
            "mainEntity": questions,
        })
        .to_string(),
    )
}

/// Recipe document for a guide page; `None` when the guide carries no
/// recipe.
pub fn recipe(guide: &Guide) -> Option<String> {
    let recipe = guide.recipe.as_ref()?;

    let mut doc = json!({
        "@context": "https://schema.org",
        "@type": "Recipe",
        "name": recipe.name,
    });

    if let Some(description) = &recipe.description {
        doc["description"] = json!(description);
    }
    if let Some(minutes) = recipe.prep_minutes {
        doc["prepTime"] = json!(iso_duration(minutes));
    }
    if let Some(minutes) = recipe.cook_minutes {
        doc["cookTime"] = json!(iso_duration(minutes));
    }
    if let Some(minutes) = recipe.total_minutes() {
        doc["totalTime"] = json!(iso_duration(minutes));
    }
    if let Some(servings) = &recipe.servings {
        doc["recipeYield"] = json!(servings);
    }
    if !recipe.ingredients.is_empty() {
        doc["recipeIngredient"] = json!(recipe.ingredients);
    }
    if !recipe.steps.is_empty() {
        let steps: Vec<Value> = recipe
            .steps
            .iter()
            .map(|step| json!({"@type": "HowToStep", "text": step}))
            .collect();
        doc["recipeInstructions"] = json!(steps);
    }
    if let Some(published_at) = guide.published_at {
        doc["datePublished"] = json!(published_at.format("%Y-%m-%d").to_string());
    }

    Some(doc.to_string())
}

/// ISO 8601 duration for whole minutes, e.g. `PT15M`.
fn iso_duration(minutes: u32) -> String {
    format!("PT{minutes}M")
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use tapeo_core::content::{Ratings, Recipe as RecipeData};
    use uuid::Uuid;

    fn venue_with_city() -> (Venue, City) {
        let city = City::new("Sevilla", "sevilla").with_region("Andalucía");
        let venue = Venue::new(city.id, "Casa Paco", "casa-paco", "Calle Sierpes 12")
            .with_phone("+34 954 221 133");
        (venue, city)
    }

    #[test]
    fn local_business_without_reviews_omits_aggregate_rating() {
        let (venue, city) = venue_with_city();

        let doc: Value =
            serde_json::from_str(&local_business(&venue, &city, &[], &[], "https://t/x")).unwrap();

        assert_eq!(doc["@type"], "Restaurant");
        assert_eq!(doc["address"]["addressLocality"], "Sevilla");
        assert_eq!(doc["address"]["addressRegion"], "Andalucía");
        assert_eq!(doc["telephone"], "+34 954 221 133");
        assert!(doc.get("aggregateRating").is_none());
    }

    #[test]
    fn local_business_averages_published_reviews_only() {
        let (venue, city) = venue_with_city();
        let published = Review::new(venue.id, "A", "a", "Ana")
            .with_ratings(Ratings::new(8.0, 8.0, 8.0, 8.0))
            .with_published_at(Utc::now());
        let draft = Review::new(venue.id, "B", "b", "Ana")
            .with_ratings(Ratings::new(0.0, 0.0, 0.0, 0.0));

        let doc: Value = serde_json::from_str(&local_business(
            &venue,
            &city,
            &[],
            &[published, draft],
            "https://t/x",
        ))
        .unwrap();

        assert_eq!(doc["aggregateRating"]["ratingValue"], 8.0);
        assert_eq!(doc["aggregateRating"]["reviewCount"], 1);
    }

    #[test]
    fn review_rating_uses_the_editorial_override() {
        let (venue, _city) = venue_with_city();
        let entry = Review::new(venue.id, "Gran barra", "gran-barra", "Ana")
            .with_ratings(Ratings::new(5.0, 5.0, 5.0, 5.0).with_overall(9.1))
            .with_published_at(Utc::now());

        let doc: Value =
            serde_json::from_str(&review(&entry, &venue, "https://t/v", "https://t/r")).unwrap();

        assert_eq!(doc["reviewRating"]["ratingValue"], 9.1);
        assert_eq!(doc["itemReviewed"]["name"], "Casa Paco");
        assert!(doc.get("datePublished").is_some());
    }

    #[test]
    fn faq_page_requires_entries() {
        assert!(faq_page(&[]).is_none());

        let entries = vec![FaqEntry {
            question: "¿Reservas?".to_string(),
            answer: "Solo mesas.".to_string(),
        }];
        let doc: Value = serde_json::from_str(&faq_page(&entries).unwrap()).unwrap();
        assert_eq!(doc["@type"], "FAQPage");
        assert_eq!(doc["mainEntity"][0]["name"], "¿Reservas?");
    }

    #[test]
    fn recipe_formats_iso_durations() {
        let guide = Guide::new("Salmorejo", "salmorejo", "Texto").with_recipe(RecipeData {
            name: "Salmorejo cordobés".to_string(),
            description: None,
            prep_minutes: Some(15),
            cook_minutes: Some(5),
            servings: Some("4 raciones".to_string()),
            ingredients: vec!["Tomate".to_string()],
            steps: vec!["Triturar".to_string()],
        });

        let doc: Value = serde_json::from_str(&recipe(&guide).unwrap()).unwrap();
        assert_eq!(doc["prepTime"], "PT15M");
        assert_eq!(doc["cookTime"], "PT5M");
        assert_eq!(doc["totalTime"], "PT20M");
        assert_eq!(doc["recipeInstructions"][0]["@type"], "HowToStep");

        let plain = Guide::new("Ruta", "ruta", "Texto");
        assert!(recipe(&plain).is_none());
    }

    #[test]
    fn uuid_fields_never_leak_into_documents() {
        let (venue, city) = venue_with_city();
        let rendered = local_business(&venue, &city, &[], &[], "https://t/x");
        assert!(!rendered.contains(&Uuid::nil().to_string()));
        assert!(!rendered.contains(&venue.id.to_string()));
    }
}
