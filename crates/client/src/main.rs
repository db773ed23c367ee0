//! tapeo-client CLI entry point.

use clap::Parser;
use tapeo_client::cli::{Cli, Commands, OutputFormat};
use tapeo_client::client::categories::CreateCategoryRequest;
use tapeo_client::client::cities::CreateCityRequest;
use tapeo_client::client::reviews::CreateReviewRequest;
use tapeo_client::client::seed::SeedFile;
use tapeo_client::client::users::CreateUserRequest;
use tapeo_client::client::venues::CreateVenueRequest;
use tapeo_client::client::TapeoClient;
use tapeo_client::output::{format_output, pretty};
use tapeo_client::ClientError;
use tapeo_core::content::{GeoPoint, Ratings};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = TapeoClient::new(&cli.base_url, cli.admin_secret.clone())?;

    // Content commands need an editor session; the user commands can
    // also run on the provisioning secret alone.
    if let (Some(email), Some(password)) = (&cli.email, &cli.password) {
        client.login(email, password).await?;
    }

    match cli.command {
        Commands::Users(users_cmd) => {
            use tapeo_client::cli::users::UsersAction;
            match users_cmd.action {
                UsersAction::List => {
                    let users = client.list_users().await?;
                    match cli.format {
                        OutputFormat::Json => println!("{}", format_output(&users, cli.format)),
                        OutputFormat::Pretty => println!("{}", pretty::format_users(&users)),
                    }
                }
                UsersAction::Create {
                    email,
                    password,
                    name,
                    role,
                } => {
                    let user = client
                        .create_user(CreateUserRequest {
                            email,
                            password,
                            name,
                            role: role.map(Into::into),
                        })
                        .await?;
                    match cli.format {
                        OutputFormat::Json => println!("{}", format_output(&user, cli.format)),
                        OutputFormat::Pretty => {
                            println!("Created:\n{}", pretty::format_user(&user))
                        }
                    }
                }
                UsersAction::Get { id } => {
                    let user = client.get_user(id).await?;
                    match cli.format {
                        OutputFormat::Json => println!("{}", format_output(&user, cli.format)),
                        OutputFormat::Pretty => println!("{}", pretty::format_user(&user)),
                    }
                }
                UsersAction::Delete { id } => {
                    client.delete_user(id).await?;
                    if !cli.quiet {
                        println!("Deleted user {}", id);
                    }
                }
            }
        }
        Commands::Cities(cities_cmd) => {
            use tapeo_client::cli::cities::CitiesAction;
            match cities_cmd.action {
                CitiesAction::List => {
                    let cities = client.list_cities().await?;
                    match cli.format {
                        OutputFormat::Json => println!("{}", format_output(&cities, cli.format)),
                        OutputFormat::Pretty => println!("{}", pretty::format_cities(&cities)),
                    }
                }
                CitiesAction::Create {
                    title,
                    slug,
                    region,
                } => {
                    let city = client
                        .create_city(CreateCityRequest {
                            title,
                            slug,
                            region,
                        })
                        .await?;
                    match cli.format {
                        OutputFormat::Json => println!("{}", format_output(&city, cli.format)),
                        OutputFormat::Pretty => {
                            println!("Created:\n{}", pretty::format_city(&city))
                        }
                    }
                }
                CitiesAction::Get { id } => {
                    let city = client.get_city(id).await?;
                    match cli.format {
                        OutputFormat::Json => println!("{}", format_output(&city, cli.format)),
                        OutputFormat::Pretty => println!("{}", pretty::format_city(&city)),
                    }
                }
                CitiesAction::Delete { id } => {
                    client.delete_city(id).await?;
                    if !cli.quiet {
                        println!("Deleted city {}", id);
                    }
                }
            }
        }
        Commands::Venues(venues_cmd) => {
            use tapeo_client::cli::venues::VenuesAction;
            match venues_cmd.action {
                VenuesAction::List { city_id } => {
                    let venues = client.list_venues(city_id).await?;
                    match cli.format {
                        OutputFormat::Json => println!("{}", format_output(&venues, cli.format)),
                        OutputFormat::Pretty => println!("{}", pretty::format_venues(&venues)),
                    }
                }
                VenuesAction::Create {
                    city_id,
                    title,
                    slug,
                    address,
                    summary,
                    price,
                    phone,
                    website,
                    lat,
                    lng,
                    category_ids,
                } => {
                    // Clap enforces that --lat and --lng come together.
                    let geo = match (lat, lng) {
                        (Some(lat), Some(lng)) => Some(GeoPoint::new(lat, lng)),
                        _ => None,
                    };
                    let venue = client
                        .create_venue(CreateVenueRequest {
                            city_id,
                            title,
                            slug,
                            address,
                            summary,
                            geo,
                            price_range: price.map(Into::into),
                            phone,
                            website,
                            category_ids,
                        })
                        .await?;
                    match cli.format {
                        OutputFormat::Json => println!("{}", format_output(&venue, cli.format)),
                        OutputFormat::Pretty => {
                            println!("Created:\n{}", pretty::format_venue(&venue))
                        }
                    }
                }
                VenuesAction::Get { id } => {
                    let venue = client.get_venue(id).await?;
                    match cli.format {
                        OutputFormat::Json => println!("{}", format_output(&venue, cli.format)),
                        OutputFormat::Pretty => println!("{}", pretty::format_venue(&venue)),
                    }
                }
                VenuesAction::Delete { id } => {
                    client.delete_venue(id).await?;
                    if !cli.quiet {
                        println!("Deleted venue {}", id);
                    }
                }
            }
        }
        Commands::Reviews(reviews_cmd) => {
            use tapeo_client::cli::reviews::ReviewsAction;
            match reviews_cmd.action {
                ReviewsAction::List { venue_id } => {
                    let reviews = client.list_reviews(venue_id).await?;
                    match cli.format {
                        OutputFormat::Json => println!("{}", format_output(&reviews, cli.format)),
                        OutputFormat::Pretty => println!("{}", pretty::format_reviews(&reviews)),
                    }
                }
                ReviewsAction::Create {
                    venue_id,
                    title,
                    slug,
                    author,
                    food,
                    service,
                    ambience,
                    value,
                    overall,
                    body,
                    summary,
                    tags,
                    visit_date,
                    published,
                } => {
                    let ratings = build_ratings(food, service, ambience, value, overall)?;
                    let review = client
                        .create_review(CreateReviewRequest {
                            venue_id,
                            title,
                            slug,
                            author,
                            ratings,
                            body,
                            summary,
                            tags,
                            visit_date,
                            published,
                        })
                        .await?;
                    match cli.format {
                        OutputFormat::Json => println!("{}", format_output(&review, cli.format)),
                        OutputFormat::Pretty => {
                            println!("Created:\n{}", pretty::format_review(&review))
                        }
                    }
                }
                ReviewsAction::Get { id } => {
                    let review = client.get_review(id).await?;
                    match cli.format {
                        OutputFormat::Json => println!("{}", format_output(&review, cli.format)),
                        OutputFormat::Pretty => println!("{}", pretty::format_review(&review)),
                    }
                }
                ReviewsAction::Delete { id } => {
                    client.delete_review(id).await?;
                    if !cli.quiet {
                        println!("Deleted review {}", id);
                    }
                }
            }
        }
        Commands::Categories(categories_cmd) => {
            use tapeo_client::cli::categories::CategoriesAction;
            match categories_cmd.action {
                CategoriesAction::List => {
                    let categories = client.list_categories().await?;
                    match cli.format {
                        OutputFormat::Json => {
                            println!("{}", format_output(&categories, cli.format))
                        }
                        OutputFormat::Pretty => {
                            println!("{}", pretty::format_categories(&categories))
                        }
                    }
                }
                CategoriesAction::Create {
                    title,
                    slug,
                    description,
                } => {
                    let category = client
                        .create_category(CreateCategoryRequest {
                            title,
                            slug,
                            description,
                        })
                        .await?;
                    match cli.format {
                        OutputFormat::Json => println!("{}", format_output(&category, cli.format)),
                        OutputFormat::Pretty => {
                            println!("Created:\n{}", pretty::format_category(&category))
                        }
                    }
                }
                CategoriesAction::Get { id } => {
                    let category = client.get_category(id).await?;
                    match cli.format {
                        OutputFormat::Json => println!("{}", format_output(&category, cli.format)),
                        OutputFormat::Pretty => println!("{}", pretty::format_category(&category)),
                    }
                }
                CategoriesAction::Delete { id } => {
                    client.delete_category(id).await?;
                    if !cli.quiet {
                        println!("Deleted category {}", id);
                    }
                }
            }
        }
        Commands::Seed(seed_cmd) => {
            let raw = std::fs::read_to_string(&seed_cmd.file)?;
            let seed: SeedFile = serde_json::from_str(&raw)?;
            let report = client.apply_seed(seed).await?;
            match cli.format {
                OutputFormat::Json => println!("{}", format_output(&report, cli.format)),
                OutputFormat::Pretty => println!(
                    "Seeded {} categories, {} cities, {} venues, {} reviews, {} guides ({} skipped)",
                    report.categories,
                    report.cities,
                    report.venues,
                    report.reviews,
                    report.guides,
                    report.skipped
                ),
            }
        }
        Commands::Health(health_cmd) => {
            use tapeo_client::cli::health::HealthAction;
            match health_cmd.action {
                HealthAction::Live => {
                    client.health_live().await?;
                    if !cli.quiet {
                        println!("OK");
                    }
                }
                HealthAction::Ready => {
                    let readiness = client.health_ready().await?;
                    match cli.format {
                        OutputFormat::Json => {
                            println!("{}", format_output(&readiness, cli.format))
                        }
                        OutputFormat::Pretty => {
                            if readiness.ready {
                                println!("Ready");
                            } else {
                                println!(
                                    "Not ready: {}",
                                    readiness.error.unwrap_or_else(|| "unknown".to_string())
                                );
                            }
                        }
                    }
                }
            }
        }
    }

    Ok(())
}

/// Build ratings from the individual score flags. The four base scores
/// come together or not at all.
fn build_ratings(
    food: Option<f64>,
    service: Option<f64>,
    ambience: Option<f64>,
    value: Option<f64>,
    overall: Option<f64>,
) -> Result<Option<Ratings>, ClientError> {
    match (food, service, ambience, value) {
        (Some(food), Some(service), Some(ambience), Some(value)) => {
            let ratings = Ratings::new(food, service, ambience, value);
            Ok(Some(match overall {
                Some(overall) => ratings.with_overall(overall),
                None => ratings,
            }))
        }
        (None, None, None, None) => {
            if overall.is_some() {
                Err(ClientError::InvalidInput(
                    "--overall needs the four base scores".to_string(),
                ))
            } else {
                Ok(None)
            }
        }
        _ => Err(ClientError::InvalidInput(
            "provide all of --food, --service, --ambience and --value, or none".to_string(),
        )),
    }
}
