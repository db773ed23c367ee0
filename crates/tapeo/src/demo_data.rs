//! Demo catalog for local development.
//!
//! Seeds the in-memory backend with a small but complete data set:
//! every document kind is represented, including drafts and an expired
//! featured slot, so the public pages and the admin API have something
//! realistic to chew on.

use chrono::{Duration, Utc};
use tapeo_core::content::{
    Category, City, FaqEntry, FeaturedItem, FeaturedTarget, GeoPoint, Guide, HomepageSection,
    PriceRange, Ratings, Recipe, Review, SectionKind, Venue,
};
use tapeo_core::qr::QrCode;

/// Everything the demo store is seeded with.
pub struct DemoDocuments {
    pub cities: Vec<City>,
    pub venues: Vec<Venue>,
    pub reviews: Vec<Review>,
    pub categories: Vec<Category>,
    pub guides: Vec<Guide>,
    pub qr_codes: Vec<QrCode>,
    pub featured: Vec<FeaturedItem>,
    pub sections: Vec<HomepageSection>,
}

/// Builds the demo data set. Ids are fresh on every call; relations are
/// wired through the returned documents.
pub fn documents() -> DemoDocuments {
    let days_ago = |n: i64| Utc::now() - Duration::days(n);

    // Categories
    let tabernas = Category::new("Tabernas clásicas", "tabernas-clasicas")
        .with_description("Barras de toda la vida, vermut de grifo y mucho mármol.");
    let marisquerias = Category::new("Marisquerías", "marisquerias")
        .with_description("Gambas, ortiguillas y lo que traiga la lonja.");
    let de_tapas = Category::new("De tapas", "de-tapas");
    let arrocerias = Category::new("Arrocerías", "arrocerias");

    // Cities
    let sevilla = City::new("Sevilla", "sevilla").with_region("Andalucía");
    let madrid = City::new("Madrid", "madrid").with_region("Comunidad de Madrid");
    let cadiz = City::new("Cádiz", "cadiz").with_region("Andalucía");

    // Venues
    let casa_paco = Venue::new(sevilla.id, "Casa Paco", "casa-paco", "Calle Sierpes 12, Sevilla")
        .with_phone("+34 954 221 133")
        .with_website("https://casapaco.example.com")
        .with_price_range(PriceRange::Moderate)
        .with_geo(GeoPoint::new(37.3891, -5.9845))
        .with_categories(vec![tabernas.id, de_tapas.id]);

    let mut la_brunilda = Venue::new(
        sevilla.id,
        "La Brunilda",
        "la-brunilda",
        "Calle Galera 5, Sevilla",
    )
    .with_price_range(PriceRange::Moderate)
    .with_categories(vec![de_tapas.id]);
    la_brunilda.summary = Some("Tapas de autor junto al río, colas merecidas.".to_string());

    let la_ardosa = Venue::new(
        madrid.id,
        "Bodega de la Ardosa",
        "bodega-de-la-ardosa",
        "Calle Colón 13, Madrid",
    )
    .with_phone("915 213 049")
    .with_price_range(PriceRange::Moderate)
    .with_geo(GeoPoint::new(40.4223, -3.7016))
    .with_categories(vec![tabernas.id]);

    let el_puerto = Venue::new(
        madrid.id,
        "Marisquería El Puerto",
        "marisqueria-el-puerto",
        "Calle Ponzano 41, Madrid",
    )
    .with_price_range(PriceRange::Premium)
    .with_categories(vec![marisquerias.id]);

    let casa_manteca = Venue::new(
        cadiz.id,
        "Casa Manteca",
        "casa-manteca",
        "Corralón de los Carros 66, Cádiz",
    )
    .with_price_range(PriceRange::Budget)
    .with_categories(vec![tabernas.id, de_tapas.id]);

    // Published reviews
    let mut paco_review = Review::new(
        casa_paco.id,
        "Casa Paco: el solomillo al whisky que manda",
        "solomillo-al-whisky-que-manda",
        "Ana Romero",
    )
    .with_ratings(Ratings::new(8.5, 7.0, 8.0, 9.0))
    .with_body(
        "La barra de Casa Paco lleva tres generaciones haciendo lo mismo \
         y haciéndolo bien. El solomillo al whisky llega en su salsa, con \
         ajo frito por encima y pan para no dejar ni rastro.",
    )
    .with_faqs(vec![
        FaqEntry {
            question: "¿Hace falta reservar?".to_string(),
            answer: "No aceptan reservas en la barra; las mesas del fondo sí, \
                     llamando por teléfono."
                .to_string(),
        },
        FaqEntry {
            question: "¿Tienen opciones sin gluten?".to_string(),
            answer: "El solomillo y las espinacas con garbanzos se preparan sin \
                     gluten si lo pides."
                .to_string(),
        },
    ])
    .with_published_at(days_ago(9));
    paco_review.summary = Some("Taberna sevillana de manual con un solomillo memorable.".to_string());
    paco_review.tags = vec!["tabernas".to_string(), "sevilla".to_string()];
    paco_review.visit_date = Some(days_ago(12).date_naive());

    let ardosa_review = Review::new(
        la_ardosa.id,
        "La Ardosa y la mejor tortilla de Malasaña",
        "mejor-tortilla-de-malasana",
        "Jorge Castaño",
    )
    .with_ratings(Ratings::new(9.0, 8.0, 9.5, 8.5).with_overall(9.0))
    .with_body(
        "Agacharse para pasar por debajo de la barra ya vale la visita. \
         La tortilla, poco cuajada y templada, justifica la fama. El \
         vermut de grifo acompaña sin discusión.",
    )
    .with_published_at(days_ago(3));

    let manteca_review = Review::new(
        casa_manteca.id,
        "Chicharrones sobre papel de estraza en Casa Manteca",
        "chicharrones-sobre-papel",
        "Ana Romero",
    )
    .with_ratings(Ratings::new(8.0, 7.5, 9.0, 9.5))
    .with_body(
        "El Viña entero pasa por aquí antes o después del carnaval. \
         Chicharrones de Chiclana cortados finos, payoyo y una caña: no \
         hace falta más para entender Cádiz.",
    )
    .with_published_at(days_ago(30));

    // Draft, kept out of public listings
    let brunilda_draft = Review::new(
        la_brunilda.id,
        "La Brunilda: borrador pendiente de segunda visita",
        "pendiente-segunda-visita",
        "Jorge Castaño",
    )
    .with_ratings(Ratings::new(7.5, 6.5, 7.0, 7.0));

    // Guides
    let mut triana_guide = Guide::new(
        "Ruta del tapeo por Triana",
        "ruta-del-tapeo-por-triana",
        "Cruzar el puente de Isabel II con hambre es empezar bien la tarde. \
         Esta ruta encadena cinco barras históricas del barrio, del \
         mercado a la calle Betis, con qué pedir en cada una.",
    )
    .with_published_at(days_ago(20));
    triana_guide.excerpt = Some("Cinco barras, un puente y ninguna prisa.".to_string());

    let salmorejo_guide = Guide::new(
        "Cómo hacer salmorejo como en Córdoba",
        "salmorejo-como-en-cordoba",
        "Más espeso que el gazpacho y con solo cinco ingredientes, el \
         salmorejo perdona pocos atajos: tomate maduro, pan de telera y \
         un buen aceite de oliva virgen extra.",
    )
    .with_recipe(Recipe {
        name: "Salmorejo cordobés".to_string(),
        description: Some("La receta clásica, sin pepino y sin discusiones.".to_string()),
        prep_minutes: Some(15),
        cook_minutes: None,
        servings: Some("4 raciones".to_string()),
        ingredients: vec![
            "1 kg de tomate maduro".to_string(),
            "200 g de pan de telera asentado".to_string(),
            "100 ml de aceite de oliva virgen extra".to_string(),
            "1 diente de ajo".to_string(),
            "Sal, huevo duro y jamón para rematar".to_string(),
        ],
        steps: vec![
            "Tritura el tomate y cuélalo para retirar pieles y pepitas.".to_string(),
            "Añade el pan troceado y deja que se empape diez minutos.".to_string(),
            "Incorpora el ajo y la sal y tritura a máxima potencia.".to_string(),
            "Emulsiona añadiendo el aceite en hilo fino.".to_string(),
            "Enfría dos horas y sirve con huevo duro y jamón picados.".to_string(),
        ],
    })
    .with_published_at(days_ago(6));

    let vermut_draft = Guide::new(
        "Vermut de grifo: por dónde empezar",
        "vermut-de-grifo",
        "Borrador. Falta la tanda de catas de marzo.",
    );

    // QR codes
    let paco_qr = QrCode::new(casa_paco.id, "CP-MESA-1").with_label("Mesa 1");
    let ardosa_qr = QrCode::new(la_ardosa.id, "ARDOSA-BARRA")
        .with_label("Barra")
        .with_expires_at(Utc::now() + Duration::days(90))
        .with_max_uses(500);

    // Homepage curation: one live slot per kind plus an expired one
    let featured = vec![
        FeaturedItem::new(FeaturedTarget::Review {
            review_id: ardosa_review.id,
        })
        .with_position(0),
        FeaturedItem::new(FeaturedTarget::Venue {
            venue_id: casa_manteca.id,
        })
        .with_position(1),
        FeaturedItem::new(FeaturedTarget::Guide {
            guide_id: salmorejo_guide.id,
        })
        .with_position(2),
        FeaturedItem::new(FeaturedTarget::Collection {
            title: "Terrazas de verano".to_string(),
            url: "/colecciones/terrazas".to_string(),
        })
        .with_position(3)
        .with_window(None, Some(days_ago(1))),
    ];

    let sections = vec![
        HomepageSection::new(SectionKind::Featured, "Destacados").with_position(0),
        HomepageSection::new(SectionKind::LatestReviews, "Últimas reseñas")
            .with_position(1)
            .with_item_limit(6),
        HomepageSection::new(SectionKind::Guides, "Guías y recetas")
            .with_position(2)
            .with_item_limit(3),
        HomepageSection::new(SectionKind::Categories, "Explora por categorías").with_position(3),
        HomepageSection::new(SectionKind::TopVenues, "Los más valorados")
            .with_position(4)
            .with_enabled(false),
    ];

    DemoDocuments {
        cities: vec![sevilla, madrid, cadiz],
        venues: vec![casa_paco, la_brunilda, la_ardosa, el_puerto, casa_manteca],
        reviews: vec![paco_review, ardosa_review, manteca_review, brunilda_draft],
        categories: vec![tabernas, marisquerias, de_tapas, arrocerias],
        guides: vec![triana_guide, salmorejo_guide, vermut_draft],
        qr_codes: vec![paco_qr, ardosa_qr],
        featured,
        sections,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_demo_relations_are_consistent() {
        let docs = documents();

        let city_ids: HashSet<_> = docs.cities.iter().map(|c| c.id).collect();
        assert!(docs.venues.iter().all(|v| city_ids.contains(&v.city_id)));

        let venue_ids: HashSet<_> = docs.venues.iter().map(|v| v.id).collect();
        assert!(docs.reviews.iter().all(|r| venue_ids.contains(&r.venue_id)));
        assert!(docs.qr_codes.iter().all(|q| venue_ids.contains(&q.venue_id)));

        let category_ids: HashSet<_> = docs.categories.iter().map(|c| c.id).collect();
        assert!(docs
            .venues
            .iter()
            .flat_map(|v| &v.category_ids)
            .all(|id| category_ids.contains(id)));
    }

    #[test]
    fn test_demo_documents_pass_validation() {
        let docs = documents();

        assert!(docs.cities.iter().all(|c| c.validate().is_ok()));
        assert!(docs.venues.iter().all(|v| v.validate().is_ok()));
        assert!(docs.reviews.iter().all(|r| r.validate().is_ok()));
        assert!(docs.categories.iter().all(|c| c.validate().is_ok()));
        assert!(docs.guides.iter().all(|g| g.validate().is_ok()));
        assert!(docs.sections.iter().all(|s| s.validate().is_ok()));
    }

    #[test]
    fn test_demo_includes_drafts_and_expired_slots() {
        let docs = documents();

        assert!(docs.reviews.iter().any(|r| !r.is_published()));
        assert!(docs.reviews.iter().any(|r| r.is_published()));
        assert!(docs.guides.iter().any(|g| !g.is_published()));

        let now = Utc::now();
        assert!(docs.featured.iter().any(|item| !item.is_live(now)));
        assert!(docs.sections.iter().any(|s| !s.enabled));
    }

    #[test]
    fn test_demo_slugs_are_unique_per_scope() {
        let docs = documents();

        let city_slugs: HashSet<_> = docs.cities.iter().map(|c| c.slug.as_str()).collect();
        assert_eq!(city_slugs.len(), docs.cities.len());

        let venue_keys: HashSet<_> = docs
            .venues
            .iter()
            .map(|v| (v.city_id, v.slug.as_str()))
            .collect();
        assert_eq!(venue_keys.len(), docs.venues.len());
    }
}
