//! Public HTML pages.
//!
//! Every listing renders through [`FeaturedCard`] so the templates
//! share one card partial; handlers resolve documents into cards and
//! keep the templates free of store lookups. Entity pages carry their
//! JSON-LD blocks as pre-rendered strings.

use std::collections::HashMap;

use askama::Template;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};
use chrono::Utc;
use serde::Deserialize;

use tapeo_auth::OptionalUser;
use tapeo_core::auth::{validate_return_to, User};
use tapeo_core::content::{
    live_featured, visible_sections, Category, City, FeaturedCard, FeaturedTarget, Guide, Review,
    SectionKind, Venue,
};

use crate::{
    handlers::error::{not_found_page, PageError},
    seo,
    state::AppState,
    urls,
};

/// Template wrapper that converts Askama templates into HTML responses.
pub struct HtmlTemplate<T>(pub T);

impl<T> IntoResponse for HtmlTemplate<T>
where
    T: Template,
{
    fn into_response(self) -> Response {
        match self.0.render() {
            Ok(html) => Html(html).into_response(),
            Err(err) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to render template: {err}"),
            )
                .into_response(),
        }
    }
}

/// One resolved homepage section: heading plus its cards.
pub struct HomeSection {
    pub title: String,
    pub cards: Vec<FeaturedCard>,
}

#[derive(Template)]
#[template(path = "home.html")]
struct HomeTemplate {
    sections: Vec<HomeSection>,
    cities: Vec<City>,
}

#[derive(Template)]
#[template(path = "city.html")]
struct CityTemplate {
    city: City,
    venues: Vec<FeaturedCard>,
}

#[derive(Template)]
#[template(path = "venue.html")]
struct VenueTemplate {
    city: City,
    venue: Venue,
    categories: Vec<Category>,
    reviews: Vec<FeaturedCard>,
    score: Option<String>,
    json_ld: String,
}

#[derive(Template)]
#[template(path = "review.html")]
struct ReviewTemplate {
    city: City,
    venue: Venue,
    review: Review,
    score: String,
    json_ld: Vec<String>,
}

#[derive(Template)]
#[template(path = "guides.html")]
struct GuidesTemplate {
    guides: Vec<FeaturedCard>,
}

#[derive(Template)]
#[template(path = "guide.html")]
struct GuideTemplate {
    guide: Guide,
    json_ld: Option<String>,
}

#[derive(Template)]
#[template(path = "category.html")]
struct CategoryTemplate {
    category: Category,
    venues: Vec<FeaturedCard>,
}

#[derive(Template)]
#[template(path = "login.html")]
struct LoginTemplate {
    return_to: String,
}

#[derive(Template)]
#[template(path = "admin.html")]
struct AdminTemplate {
    user: User,
}

#[derive(Template)]
#[template(path = "qr_landing.html")]
pub struct QrLandingTemplate {
    pub code: String,
    pub venue: Venue,
    pub city: City,
}

#[derive(Template)]
#[template(path = "qr_invalid.html")]
pub struct QrInvalidTemplate {
    pub reason: &'static str,
}

#[derive(Template)]
#[template(path = "not_found.html")]
pub struct NotFoundTemplate;

#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorTemplate;

/// Homepage (GET /), assembled from the enabled sections in order.
///
/// Sections that resolve to nothing (no live slots, no published
/// content yet) are skipped instead of rendering empty headings.
pub async fn home(State(state): State<AppState>) -> Result<impl IntoResponse, PageError> {
    let sections = state.content.list_homepage_sections().await?;

    let mut resolved = Vec::new();
    for section in visible_sections(&sections) {
        let limit = section.item_limit as usize;
        let cards = match section.kind {
            SectionKind::Featured => featured_cards(&state, limit).await?,
            SectionKind::LatestReviews => latest_review_cards(&state, limit).await?,
            SectionKind::TopVenues => top_venue_cards(&state, limit).await?,
            SectionKind::Categories => category_cards(&state, limit).await?,
            SectionKind::Guides => guide_cards(&state, limit).await?,
        };
        if !cards.is_empty() {
            resolved.push(HomeSection {
                title: section.title.clone(),
                cards,
            });
        }
    }

    let cities = state.content.list_cities().await?;

    Ok(HtmlTemplate(HomeTemplate {
        sections: resolved,
        cities,
    }))
}

/// City page (GET /{city}).
pub async fn city_page(
    State(state): State<AppState>,
    Path(city_slug): Path<String>,
) -> Result<Response, PageError> {
    let Some(city) = state.content.find_city_by_slug(&city_slug).await? else {
        return Ok(not_found_page());
    };

    let venues = state
        .content
        .list_venues(Some(city.id))
        .await?
        .into_iter()
        .map(|venue| FeaturedCard {
            kind: "venue".to_string(),
            url: urls::venue_path(&city.slug, &venue.slug),
            subtitle: Some(venue.address.clone()),
            title: venue.title,
        })
        .collect();

    Ok(HtmlTemplate(CityTemplate { city, venues }).into_response())
}

/// Venue page (GET /{city}/{venue}) with LocalBusiness JSON-LD.
pub async fn venue_page(
    State(state): State<AppState>,
    Path((city_slug, venue_slug)): Path<(String, String)>,
) -> Result<Response, PageError> {
    let Some(city) = state.content.find_city_by_slug(&city_slug).await? else {
        return Ok(not_found_page());
    };
    let Some(venue) = state.content.find_venue_by_slug(city.id, &venue_slug).await? else {
        return Ok(not_found_page());
    };

    let reviews = state.content.list_reviews(Some(venue.id)).await?;
    let categories: Vec<Category> = state
        .content
        .list_categories()
        .await?
        .into_iter()
        .filter(|category| venue.category_ids.contains(&category.id))
        .collect();

    let mut published: Vec<&Review> = reviews.iter().filter(|r| r.is_published()).collect();
    published.sort_by(|a, b| b.published_at.cmp(&a.published_at));

    let score = average_score(&published);
    let review_cards = published
        .iter()
        .map(|review| FeaturedCard {
            kind: "review".to_string(),
            title: review.title.clone(),
            url: urls::review_path(&city.slug, &venue.slug, &review.slug),
            subtitle: Some(format!(
                "{:.1} · {}",
                review.ratings.overall_score(),
                review.author
            )),
        })
        .collect();

    let json_ld = seo::local_business(
        &venue,
        &city,
        &categories,
        &reviews,
        &urls::absolute(&state.base_url, &urls::venue_path(&city.slug, &venue.slug)),
    );

    Ok(HtmlTemplate(VenueTemplate {
        city,
        venue,
        categories,
        reviews: review_cards,
        score,
        json_ld,
    })
    .into_response())
}

/// Review page (GET /{city}/{venue}/review/{slug}).
///
/// Drafts are not public; an unpublished slug renders the 404.
pub async fn review_page(
    State(state): State<AppState>,
    Path((city_slug, venue_slug, review_slug)): Path<(String, String, String)>,
) -> Result<Response, PageError> {
    let Some(city) = state.content.find_city_by_slug(&city_slug).await? else {
        return Ok(not_found_page());
    };
    let Some(venue) = state.content.find_venue_by_slug(city.id, &venue_slug).await? else {
        return Ok(not_found_page());
    };
    let Some(review) = state.content.find_review_by_slug(venue.id, &review_slug).await? else {
        return Ok(not_found_page());
    };
    if !review.is_published() {
        return Ok(not_found_page());
    }

    let venue_url = urls::absolute(&state.base_url, &urls::venue_path(&city.slug, &venue.slug));
    let review_url = urls::absolute(
        &state.base_url,
        &urls::review_path(&city.slug, &venue.slug, &review.slug),
    );

    let mut json_ld = vec![seo::review(&review, &venue, &venue_url, &review_url)];
    if let Some(faq) = seo::faq_page(&review.faqs) {
        json_ld.push(faq);
    }

    let score = format!("{:.1}", review.ratings.overall_score());

    Ok(HtmlTemplate(ReviewTemplate {
        city,
        venue,
        review,
        score,
        json_ld,
    })
    .into_response())
}

/// Guide listing (GET /guias).
pub async fn guides_index(State(state): State<AppState>) -> Result<impl IntoResponse, PageError> {
    let guides = guide_cards(&state, usize::MAX).await?;

    Ok(HtmlTemplate(GuidesTemplate { guides }))
}

/// Guide page (GET /guias/{slug}) with Recipe JSON-LD when one is
/// embedded.
pub async fn guide_page(
    State(state): State<AppState>,
    Path(guide_slug): Path<String>,
) -> Result<Response, PageError> {
    let Some(guide) = state.content.find_guide_by_slug(&guide_slug).await? else {
        return Ok(not_found_page());
    };
    if !guide.is_published() {
        return Ok(not_found_page());
    }

    let json_ld = seo::recipe(&guide);

    Ok(HtmlTemplate(GuideTemplate { guide, json_ld }).into_response())
}

/// Category page (GET /categorias/{slug}) listing the venues tagged
/// with it across all cities.
pub async fn category_page(
    State(state): State<AppState>,
    Path(category_slug): Path<String>,
) -> Result<Response, PageError> {
    let Some(category) = state.content.find_category_by_slug(&category_slug).await? else {
        return Ok(not_found_page());
    };

    let cities: HashMap<_, _> = state
        .content
        .list_cities()
        .await?
        .into_iter()
        .map(|city| (city.id, city))
        .collect();

    let venues = state
        .content
        .list_venues(None)
        .await?
        .into_iter()
        .filter(|venue| venue.category_ids.contains(&category.id))
        .filter_map(|venue| {
            let city = cities.get(&venue.city_id)?;
            Some(FeaturedCard {
                kind: "venue".to_string(),
                url: urls::venue_path(&city.slug, &venue.slug),
                subtitle: Some(city.title.clone()),
                title: venue.title,
            })
        })
        .collect();

    Ok(HtmlTemplate(CategoryTemplate { category, venues }).into_response())
}

#[derive(Debug, Deserialize)]
pub struct LoginQuery {
    pub return_to: Option<String>,
}

/// Login form (GET /login). Signed-in users go straight to the panel.
pub async fn login_page(
    OptionalUser(user): OptionalUser,
    Query(query): Query<LoginQuery>,
) -> Response {
    if user.is_some() {
        return Redirect::to("/admin").into_response();
    }

    let return_to = query
        .return_to
        .as_deref()
        .and_then(validate_return_to)
        .unwrap_or_default()
        .to_string();

    HtmlTemplate(LoginTemplate { return_to }).into_response()
}

/// Admin landing page (GET /admin), the post-login destination.
pub async fn admin_home(
    tapeo_auth::CurrentEditor(user): tapeo_auth::CurrentEditor,
) -> impl IntoResponse {
    HtmlTemplate(AdminTemplate { user })
}

/// Live featured slots resolved to cards. Slots pointing at deleted or
/// unpublished documents are skipped.
async fn featured_cards(state: &AppState, limit: usize) -> Result<Vec<FeaturedCard>, PageError> {
    let items = state.content.list_featured_items().await?;
    let now = Utc::now();

    let mut cards = Vec::new();
    for item in live_featured(&items, now) {
        if cards.len() >= limit {
            break;
        }
        if let Some(card) = resolve_target(state, &item.target).await? {
            cards.push(card);
        }
    }

    Ok(cards)
}

async fn resolve_target(
    state: &AppState,
    target: &FeaturedTarget,
) -> Result<Option<FeaturedCard>, PageError> {
    let card = match target {
        FeaturedTarget::Review { review_id } => {
            let Some(review) = state.content.get_review(*review_id).await? else {
                return Ok(None);
            };
            if !review.is_published() {
                return Ok(None);
            }
            let Some((venue, city)) = venue_with_city(state, review.venue_id).await? else {
                return Ok(None);
            };
            FeaturedCard {
                kind: "review".to_string(),
                title: review.title,
                url: urls::review_path(&city.slug, &venue.slug, &review.slug),
                subtitle: Some(venue.title),
            }
        }
        FeaturedTarget::Venue { venue_id } => {
            let Some((venue, city)) = venue_with_city(state, *venue_id).await? else {
                return Ok(None);
            };
            FeaturedCard {
                kind: "venue".to_string(),
                url: urls::venue_path(&city.slug, &venue.slug),
                subtitle: Some(city.title),
                title: venue.title,
            }
        }
        FeaturedTarget::Category { category_id } => {
            let Some(category) = state.content.get_category(*category_id).await? else {
                return Ok(None);
            };
            FeaturedCard {
                kind: "category".to_string(),
                url: urls::category_path(&category.slug),
                title: category.title,
                subtitle: None,
            }
        }
        FeaturedTarget::Guide { guide_id } => {
            let Some(guide) = state.content.get_guide(*guide_id).await? else {
                return Ok(None);
            };
            if !guide.is_published() {
                return Ok(None);
            }
            FeaturedCard {
                kind: "guide".to_string(),
                url: urls::guide_path(&guide.slug),
                title: guide.title,
                subtitle: guide.excerpt,
            }
        }
        FeaturedTarget::Collection { title, url } => FeaturedCard {
            kind: "collection".to_string(),
            title: title.clone(),
            url: url.clone(),
            subtitle: None,
        },
    };

    Ok(Some(card))
}

async fn venue_with_city(
    state: &AppState,
    venue_id: uuid::Uuid,
) -> Result<Option<(Venue, City)>, PageError> {
    let Some(venue) = state.content.get_venue(venue_id).await? else {
        return Ok(None);
    };
    let Some(city) = state.content.get_city(venue.city_id).await? else {
        return Ok(None);
    };
    Ok(Some((venue, city)))
}

async fn latest_review_cards(
    state: &AppState,
    limit: usize,
) -> Result<Vec<FeaturedCard>, PageError> {
    let reviews = state.content.list_recent_reviews(limit as u32).await?;

    let mut cards = Vec::new();
    for review in reviews {
        let Some((venue, city)) = venue_with_city(state, review.venue_id).await? else {
            continue;
        };
        cards.push(FeaturedCard {
            kind: "review".to_string(),
            title: review.title,
            url: urls::review_path(&city.slug, &venue.slug, &review.slug),
            subtitle: Some(format!(
                "{} · {:.1}",
                venue.title,
                review.ratings.overall_score()
            )),
        });
    }

    Ok(cards)
}

/// Venues ranked by their average published-review score. Unreviewed
/// venues rank last in listing order.
async fn top_venue_cards(state: &AppState, limit: usize) -> Result<Vec<FeaturedCard>, PageError> {
    let venues = state.content.list_venues(None).await?;
    let reviews = state.content.list_reviews(None).await?;
    let cities: HashMap<_, _> = state
        .content
        .list_cities()
        .await?
        .into_iter()
        .map(|city| (city.id, city))
        .collect();

    let mut scored: Vec<(Venue, Option<f64>)> = venues
        .into_iter()
        .map(|venue| {
            let published: Vec<&Review> = reviews
                .iter()
                .filter(|r| r.venue_id == venue.id && r.is_published())
                .collect();
            let score = (!published.is_empty()).then(|| {
                published
                    .iter()
                    .map(|r| r.ratings.overall_score())
                    .sum::<f64>()
                    / published.len() as f64
            });
            (venue, score)
        })
        .collect();
    scored.sort_by(|a, b| {
        b.1.partial_cmp(&a.1)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.0.title.cmp(&b.0.title))
    });

    let cards = scored
        .into_iter()
        .take(limit)
        .filter_map(|(venue, score)| {
            let city = cities.get(&venue.city_id)?;
            let subtitle = match score {
                Some(score) => format!("{} · {score:.1}", city.title),
                None => city.title.clone(),
            };
            Some(FeaturedCard {
                kind: "venue".to_string(),
                url: urls::venue_path(&city.slug, &venue.slug),
                subtitle: Some(subtitle),
                title: venue.title,
            })
        })
        .collect();

    Ok(cards)
}

async fn category_cards(state: &AppState, limit: usize) -> Result<Vec<FeaturedCard>, PageError> {
    let cards = state
        .content
        .list_categories()
        .await?
        .into_iter()
        .take(limit)
        .map(|category| FeaturedCard {
            kind: "category".to_string(),
            url: urls::category_path(&category.slug),
            title: category.title,
            subtitle: category.description,
        })
        .collect();

    Ok(cards)
}

async fn guide_cards(state: &AppState, limit: usize) -> Result<Vec<FeaturedCard>, PageError> {
    let cards = state
        .content
        .list_published_guides()
        .await?
        .into_iter()
        .take(limit)
        .map(|guide| FeaturedCard {
            kind: "guide".to_string(),
            url: urls::guide_path(&guide.slug),
            title: guide.title,
            subtitle: guide.excerpt,
        })
        .collect();

    Ok(cards)
}

/// Average published score formatted for display, `None` when the
/// venue has no published reviews yet.
fn average_score(published: &[&Review]) -> Option<String> {
    if published.is_empty() {
        return None;
    }
    let mean = published
        .iter()
        .map(|r| r.ratings.overall_score())
        .sum::<f64>()
        / published.len() as f64;
    Some(format!("{mean:.1}"))
}
