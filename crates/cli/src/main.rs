use anyhow::{Context, Result, anyhow, bail, ensure};
use catalog::{Amenity, Coordinates, Cuisine, PriceRange, RestaurantId};
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use ranking::filters::{
    AmenityFilter, CuisineFilter, DistanceFilter, MinimumRatingFilter, PriceRangeFilter, PromotionFilter,
    SuburbFilter,
};
use ranking::{FilterPipeline, RecommendationContext};
use server::{Recommendation, Recommender};
use std::path::PathBuf;
use std::thread;
use std::time::{Duration, Instant};
use tracing::debug;

/// Longest list any command returns
const MAX_COUNT: usize = 20;

/// Bounds on the quick-lunch walking distance (km)
const MIN_LUNCH_DISTANCE_KM: f64 = 0.1;
const MAX_LUNCH_DISTANCE_KM: f64 = 10.0;

/// Narrm Eats - Melbourne restaurant recommendations
#[derive(Parser)]
#[command(name = "narrm-eats")]
#[command(about = "Restaurant recommendations from content similarity and weighted scoring", long_about = None)]
struct Cli {
    /// Path to the restaurant catalog (JSON)
    #[arg(short, long, default_value = "data/melbourne_restaurants.json")]
    data: PathBuf,

    /// Path to the promotions file (JSON)
    #[arg(short, long)]
    promos: Option<PathBuf>,

    /// Your latitude (requires --lng)
    #[arg(long, allow_negative_numbers = true)]
    lat: Option<f64>,

    /// Your longitude (requires --lat)
    #[arg(long, allow_negative_numbers = true)]
    lng: Option<f64>,

    /// Print results as JSON
    #[arg(long)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Restaurants similar to a given one
    Similar {
        /// Restaurant ID to find neighbours for
        #[arg(long)]
        id: RestaurantId,

        #[arg(long, default_value = "5")]
        count: usize,
    },

    /// Recommendations matching your preferences
    Personalized {
        /// Preferred cuisines, comma separated (e.g. thai,middle-eastern)
        #[arg(long = "cuisine", value_delimiter = ',')]
        cuisines: Vec<Cuisine>,

        /// Preferred price ranges, comma separated ($, $$ or 1-4)
        #[arg(long = "price", value_delimiter = ',')]
        prices: Vec<PriceRange>,

        /// Distance beyond which proximity earns nothing (km)
        #[arg(long, default_value = "10.0")]
        max_distance: f64,

        #[arg(long, default_value = "10")]
        count: usize,
    },

    /// Popular places with good deals
    Trending {
        #[arg(long, default_value = "6")]
        count: usize,
    },

    /// Good food on a budget
    Budget {
        /// Highest price range you will pay
        #[arg(long, default_value = "$$")]
        max_price: PriceRange,

        #[arg(long, default_value = "8")]
        count: usize,
    },

    /// Top picks for one cuisine
    Cuisine {
        cuisine: Cuisine,

        #[arg(long, default_value = "5")]
        count: usize,
    },

    /// Lunch-friendly places nearby
    QuickLunch {
        /// How far you will walk (km)
        #[arg(long, default_value = "2.0")]
        max_distance: f64,
    },

    /// Student-friendly picks
    Students,

    /// Highest-rated places for one cuisine
    TopRated {
        cuisine: Cuisine,

        #[arg(long, default_value = "5")]
        count: usize,
    },

    /// Search names, descriptions, cuisines and suburbs
    Search {
        query: String,

        /// Only this cuisine
        #[arg(long)]
        cuisine: Option<Cuisine>,

        /// Drop places known to be farther than this (km)
        #[arg(long)]
        max_distance: Option<f64>,
    },

    /// List restaurants matching every given filter, in catalog order
    List(ListArgs),

    /// Places priced within a budget
    CheapEats {
        /// Highest price range you will pay
        #[arg(long, default_value = "$$")]
        max_price: PriceRange,
    },

    /// Places running a promotion
    Deals,

    /// Show one restaurant with its promotions
    Show {
        #[arg(long)]
        id: RestaurantId,
    },

    /// Run benchmark to test query performance
    Benchmark {
        /// Number of requests to make
        #[arg(long, default_value = "100")]
        requests: usize,

        /// Number of concurrent workers
        #[arg(long, default_value = "4")]
        concurrent: usize,
    },
}

/// Filters for the `list` command; each one given narrows the listing.
#[derive(Args, Debug, Default)]
struct ListArgs {
    /// Cuisines, comma separated
    #[arg(long = "cuisine", value_delimiter = ',')]
    cuisines: Vec<Cuisine>,

    /// Price ranges, comma separated ($, $$ or 1-4)
    #[arg(long = "price", value_delimiter = ',')]
    prices: Vec<PriceRange>,

    /// Suburbs, comma separated
    #[arg(long = "suburb", value_delimiter = ',')]
    suburbs: Vec<String>,

    /// Lowest acceptable rating (0-5)
    #[arg(long)]
    min_rating: Option<f32>,

    #[arg(long)]
    delivery: bool,

    #[arg(long)]
    takeaway: bool,

    #[arg(long)]
    outdoor_seating: bool,

    #[arg(long)]
    wheelchair_accessible: bool,

    #[arg(long)]
    reservations: bool,

    #[arg(long)]
    lunch_specials: bool,

    #[arg(long)]
    happy_hour: bool,

    #[arg(long)]
    student_discount: bool,

    /// Only places with an active promotion
    #[arg(long)]
    promos_only: bool,

    /// Drop places known to be farther than this (km)
    #[arg(long)]
    max_distance: Option<f64>,
}

impl ListArgs {
    /// Build the filter pipeline, cheapest checks first.
    fn pipeline(&self) -> Result<FilterPipeline> {
        let mut pipeline = FilterPipeline::new();

        if !self.cuisines.is_empty() {
            pipeline = pipeline.add_filter(CuisineFilter::new(self.cuisines.iter().copied()));
        }
        if !self.prices.is_empty() {
            pipeline = pipeline.add_filter(PriceRangeFilter::new(self.prices.iter().copied()));
        }
        if !self.suburbs.is_empty() {
            pipeline = pipeline.add_filter(SuburbFilter::new(&self.suburbs));
        }
        if let Some(min_rating) = self.min_rating {
            ensure!(
                (0.0..=5.0).contains(&min_rating),
                "--min-rating must be between 0 and 5, got {}",
                min_rating
            );
            pipeline = pipeline.add_filter(MinimumRatingFilter::new(min_rating));
        }

        let amenities = [
            (self.delivery, Amenity::Delivery),
            (self.takeaway, Amenity::Takeaway),
            (self.outdoor_seating, Amenity::OutdoorSeating),
            (self.wheelchair_accessible, Amenity::WheelchairAccessible),
            (self.reservations, Amenity::Reservations),
            (self.lunch_specials, Amenity::LunchSpecials),
            (self.happy_hour, Amenity::HappyHour),
            (self.student_discount, Amenity::StudentDiscount),
        ];
        for (_, amenity) in amenities.into_iter().filter(|(wanted, _)| *wanted) {
            pipeline = pipeline.add_filter(AmenityFilter::requiring(amenity));
        }

        if self.promos_only {
            pipeline = pipeline.add_filter(PromotionFilter);
        }
        if let Some(max_distance) = self.max_distance {
            pipeline = pipeline.add_filter(DistanceFilter::new(check_distance(max_distance)?));
        }

        debug!("List pipeline has {} filters", pipeline.len());
        Ok(pipeline)
    }
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let location = user_location(cli.lat, cli.lng)?;

    let start = Instant::now();
    let recommender = Recommender::load_from_files(&cli.data, cli.promos.as_deref())
        .context("Failed to load restaurant catalog")?;
    if !cli.json {
        let (total, active, promotions) = recommender.snapshot().catalog.counts();
        eprintln!(
            "{} Loaded {} restaurants ({} active, {} promotions) in {:?}",
            "✓".green(),
            total,
            active,
            promotions,
            start.elapsed()
        );
    }

    // Dispatch to appropriate command handler
    let output = Output { json: cli.json };
    match cli.command {
        Commands::Similar { id, count } => {
            let count = check_count(count)?;
            let target = recommender
                .restaurant(id, None)
                .ok_or_else(|| anyhow!("Restaurant {} not found", id))?;
            let title = format!("Similar to {}", target.restaurant.name);
            output.recommendations(&title, &recommender.similar_restaurants(id, count))?;
        }
        Commands::Personalized {
            cuisines,
            prices,
            max_distance,
            count,
        } => {
            let context = RecommendationContext::new()
                .with_cuisines(cuisines)
                .with_price_ranges(prices)
                .with_location(location)
                .with_max_distance(check_distance(max_distance)?)
                .with_limit(check_count(count)?);
            output.recommendations("Recommended for you", &recommender.personalized(&context))?;
        }
        Commands::Trending { count } => {
            output.recommendations("Trending", &recommender.trending(check_count(count)?))?;
        }
        Commands::Budget { max_price, count } => {
            let recs = recommender.budget_friendly(max_price, location, check_count(count)?);
            output.recommendations(&format!("Budget friendly (up to {})", max_price), &recs)?;
        }
        Commands::Cuisine { cuisine, count } => {
            let recs = recommender.by_cuisine(cuisine, location, check_count(count)?);
            output.recommendations(&format!("Top {}", cuisine), &recs)?;
        }
        Commands::QuickLunch { max_distance } => {
            let recs = recommender.quick_lunch(location, check_lunch_distance(max_distance)?);
            output.recommendations(&format!("Quick lunch within {} km", max_distance), &recs)?;
        }
        Commands::Students => {
            output.recommendations("Student friendly", &recommender.student_friendly(location))?;
        }
        Commands::TopRated { cuisine, count } => {
            let recs = recommender.top_rated_by_cuisine(cuisine, check_count(count)?, location);
            output.recommendations(&format!("Highest rated {}", cuisine), &recs)?;
        }
        Commands::Search {
            query,
            cuisine,
            max_distance,
        } => {
            ensure!(!query.trim().is_empty(), "Search query must not be empty");
            let max_distance = max_distance.map(check_distance).transpose()?;
            let recs = recommender.search(&query, cuisine, max_distance, location);
            output.recommendations(&format!("Search results for '{}'", query), &recs)?;
        }
        Commands::List(args) => {
            let pipeline = args.pipeline()?;
            let context = RecommendationContext::new().with_location(location);
            output.recommendations("Restaurants", &recommender.browse(&pipeline, &context))?;
        }
        Commands::CheapEats { max_price } => {
            let recs = recommender.cheap_eats(max_price);
            output.recommendations(&format!("Cheap eats (up to {})", max_price), &recs)?;
        }
        Commands::Deals => {
            output.recommendations("Current deals", &recommender.with_promotions())?;
        }
        Commands::Show { id } => {
            let rec = recommender
                .restaurant(id, location)
                .ok_or_else(|| anyhow!("Restaurant {} not found", id))?;
            output.details(&rec)?;
        }
        Commands::Benchmark {
            requests,
            concurrent,
        } => handle_benchmark(&recommender, location, requests, concurrent)?,
    }

    Ok(())
}

/// Both coordinates or neither.
fn user_location(lat: Option<f64>, lng: Option<f64>) -> Result<Option<Coordinates>> {
    match (lat, lng) {
        (None, None) => Ok(None),
        (Some(lat), Some(lng)) => {
            ensure!((-90.0..=90.0).contains(&lat), "Latitude {} out of range", lat);
            ensure!((-180.0..=180.0).contains(&lng), "Longitude {} out of range", lng);
            Ok(Some(Coordinates::new(lat, lng)))
        }
        _ => bail!("--lat and --lng must be given together"),
    }
}

fn check_count(count: usize) -> Result<usize> {
    ensure!(
        (1..=MAX_COUNT).contains(&count),
        "--count must be between 1 and {}, got {}",
        MAX_COUNT,
        count
    );
    Ok(count)
}

fn check_distance(km: f64) -> Result<f64> {
    ensure!(km.is_finite() && km > 0.0, "--max-distance must be positive, got {}", km);
    Ok(km)
}

fn check_lunch_distance(km: f64) -> Result<f64> {
    ensure!(
        (MIN_LUNCH_DISTANCE_KM..=MAX_LUNCH_DISTANCE_KM).contains(&km),
        "--max-distance must be between {} and {} km, got {}",
        MIN_LUNCH_DISTANCE_KM,
        MAX_LUNCH_DISTANCE_KM,
        km
    );
    Ok(km)
}

/// Handle the 'benchmark' command
fn handle_benchmark(
    recommender: &Recommender,
    location: Option<Coordinates>,
    requests: usize,
    concurrent: usize,
) -> Result<()> {
    ensure!(requests > 0, "--requests must be positive");
    ensure!(concurrent > 0, "--concurrent must be positive");

    let ids: Vec<RestaurantId> = recommender.snapshot().similarity.ids().to_vec();
    ensure!(!ids.is_empty(), "The catalog has no active restaurants to benchmark");

    // Pick a random restaurant and cuisine per request
    let plan: Vec<(RestaurantId, Cuisine)> = (0..requests)
        .map(|_| {
            let id = ids[rand::random::<u32>() as usize % ids.len()];
            let cuisine = Cuisine::ALL[rand::random::<u32>() as usize % Cuisine::ALL.len()];
            (id, cuisine)
        })
        .collect();

    let wall = Instant::now();
    let chunk = requests.div_ceil(concurrent);
    let mut timings: Vec<Duration> = thread::scope(|scope| {
        let workers: Vec<_> = plan
            .chunks(chunk)
            .map(|batch| {
                scope.spawn(move || {
                    batch
                        .iter()
                        .map(|&(id, cuisine)| {
                            let start = Instant::now();
                            recommender.similar_restaurants(id, 5);
                            let context = RecommendationContext::new()
                                .with_cuisines([cuisine])
                                .with_location(location);
                            recommender.personalized(&context);
                            start.elapsed()
                        })
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        workers
            .into_iter()
            .map(|worker| worker.join().map_err(|_| anyhow!("Benchmark worker panicked")))
            .collect::<Result<Vec<_>>>()
    })?
    .into_iter()
    .flatten()
    .collect();
    let wall_time = wall.elapsed();
    debug!("Benchmark finished {} requests", timings.len());

    // Statistics
    let total_time: Duration = timings.iter().sum();
    let avg_latency = total_time / (timings.len() as u32);
    timings.sort();
    let p50 = timings[timings.len() / 2];
    let p95 = timings[(timings.len() as f32 * 0.95) as usize];
    let p99 = timings[(timings.len() as f32 * 0.99) as usize];
    let throughput = requests as f64 / wall_time.as_secs_f64();

    println!("{}", "Benchmark results:".bold().blue());
    println!("Requests: {} across {} workers", requests, concurrent);
    println!("Wall time: {:?}", wall_time);
    println!("Average latency: {:?}", avg_latency);
    println!("P50 latency: {:?}", p50);
    println!("P95 latency: {:?}", p95);
    println!("P99 latency: {:?}", p99);
    println!("Throughput: {:.2} requests/second", throughput);

    Ok(())
}

/// Prints results as coloured text or JSON
struct Output {
    json: bool,
}

impl Output {
    fn recommendations(&self, title: &str, recommendations: &[Recommendation]) -> Result<()> {
        if self.json {
            println!("{}", serde_json::to_string_pretty(recommendations)?);
            return Ok(());
        }

        println!("{}", title.bold().blue());
        if recommendations.is_empty() {
            println!("  {}", "No matching restaurants".yellow());
        }
        for (rank, rec) in recommendations.iter().enumerate() {
            let r = &rec.restaurant;
            println!(
                "{}. {} [{} | {} | ★ {:.1}] {} - Score: {:.3}",
                (rank + 1).to_string().green(),
                r.name.bold(),
                r.cuisine_type,
                r.price_range,
                r.rating,
                distance_label(rec.distance_km),
                rec.score
            );
            for promo in &rec.promotions {
                println!("   {} {}", "%".magenta(), promo.title);
            }
        }
        Ok(())
    }

    fn details(&self, rec: &Recommendation) -> Result<()> {
        if self.json {
            println!("{}", serde_json::to_string_pretty(rec)?);
            return Ok(());
        }

        let r = &rec.restaurant;
        println!("{}", format!("{} (#{})", r.name, r.id).bold().blue());
        println!("{}{} | {} | ★ {:.1}", "• ".green(), r.cuisine_type, r.price_range, r.rating);
        if !r.address.is_empty() {
            println!("{}{}, {} {}", "• ".green(), r.address, r.suburb, r.postcode);
        }
        if rec.distance_km.is_some() {
            println!("{}{}", "• ".green(), distance_label(rec.distance_km));
        }
        if !r.description.is_empty() {
            println!("{}{}", "• ".green(), r.description);
        }
        let amenities: Vec<&str> = [
            (r.amenities.has_delivery, "delivery"),
            (r.amenities.has_takeaway, "takeaway"),
            (r.amenities.has_outdoor_seating, "outdoor seating"),
            (r.amenities.is_wheelchair_accessible, "wheelchair accessible"),
            (r.amenities.accepts_reservations, "reservations"),
            (r.amenities.has_lunch_specials, "lunch specials"),
            (r.amenities.has_happy_hour, "happy hour"),
            (r.amenities.student_discount, "student discount"),
        ]
        .into_iter()
        .filter_map(|(has, label)| has.then_some(label))
        .collect();
        if !amenities.is_empty() {
            println!("{}{}", "• ".cyan(), amenities.join(", "));
        }
        for (day, hours) in &r.opening_hours {
            println!("  {:<10} {}", day, hours);
        }
        for promo in &rec.promotions {
            let code = promo.promo_code.as_deref().unwrap_or("no code needed");
            println!("{}{} ({}, until {})", "% ".magenta(), promo.title, code, promo.valid_until);
        }
        Ok(())
    }
}

fn distance_label(distance_km: Option<f64>) -> String {
    match distance_km {
        Some(km) => format!("{:.1} km away", km),
        None => String::new(),
    }
}
