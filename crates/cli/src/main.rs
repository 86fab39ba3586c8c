use anyhow::{anyhow, bail, Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use data_loader::MovieCatalog;
use pipeline::{
    DurationBucket, Feedback, QuickMatchQuery, QuickMatchScorer, RankedPage, SimilarityScorer,
    UserPreferences,
};
use server::RecommendationService;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::debug;

/// CineCase - Movie Recommendation Engine
#[derive(Parser)]
#[command(name = "cinecase")]
#[command(about = "Movie recommendations by genre, rating, duration and release year", long_about = None)]
struct Cli {
    /// Path to the cleaned movie dataset (CSV)
    #[arg(short, long, global = true, default_value = "data/processed_movies.csv")]
    data_path: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Get movie recommendations for a set of preferences
    Recommend {
        /// Exact main genre (e.g. "Drama")
        #[arg(long)]
        genre: Option<String>,

        /// Single rating ("7") or inclusive range ("6-8")
        #[arg(long)]
        rating: Option<String>,

        /// Duration bucket: 60, 90, 120, 150 or 180
        #[arg(long)]
        duration: Option<String>,

        /// ">=YEAR" or "START-END"
        #[arg(long)]
        year_range: Option<String>,

        /// 1-based page number
        #[arg(long, default_value = "1")]
        page: usize,

        /// Show the per-term similarity breakdown for each recommendation
        #[arg(long)]
        explain: bool,
    },

    /// Apply feedback to a movie and show the revised recommendation
    Revise {
        /// Exact movie title
        #[arg(long)]
        title: String,

        /// Feedback rating (below 4 triggers a revision)
        #[arg(long)]
        rating: i32,
    },

    /// Rank the whole catalog by distance to a runtime, rating and genre
    Quick {
        #[arg(long)]
        genre: String,

        /// Desired runtime in minutes
        #[arg(long)]
        duration: f64,

        #[arg(long)]
        rating: f64,

        /// Number of matches to show
        #[arg(long, default_value = "5")]
        limit: usize,
    },

    /// List genres and the year span of the catalog
    Genres,

    /// Clean the raw metadata dump into the dataset format
    Preprocess {
        /// Raw movies_metadata.csv
        #[arg(long)]
        input: PathBuf,

        /// Where to write the cleaned CSV
        #[arg(long, default_value = "data/processed_movies.csv")]
        output: PathBuf,
    },

    /// Run benchmark to test performance
    Benchmark {
        /// Number of requests to make
        #[arg(long, default_value = "100")]
        requests: usize,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Recommend {
            genre,
            rating,
            duration,
            year_range,
            page,
            explain,
        } => {
            let preferences = UserPreferences {
                genre,
                rating,
                duration,
                year_range,
            };
            let catalog = load_catalog(&cli.data_path)?;
            handle_recommend(catalog, preferences, page, explain).await?
        }
        Commands::Revise { title, rating } => {
            handle_revise(load_catalog(&cli.data_path)?, title, rating)?
        }
        Commands::Quick {
            genre,
            duration,
            rating,
            limit,
        } => {
            let query = QuickMatchQuery {
                genre,
                duration,
                rating,
            };
            handle_quick(load_catalog(&cli.data_path)?, query, limit)?
        }
        Commands::Genres => handle_genres(load_catalog(&cli.data_path)?)?,
        Commands::Preprocess { input, output } => handle_preprocess(&input, &output)?,
        Commands::Benchmark { requests } => {
            handle_benchmark(load_catalog(&cli.data_path)?, requests).await?
        }
    }

    Ok(())
}

/// Load the dataset, reporting how long it took
fn load_catalog(path: &Path) -> Result<Arc<MovieCatalog>> {
    println!("Loading movie dataset from {}...", path.display());
    let start = Instant::now();
    let catalog = MovieCatalog::load_from_csv(path).context("Failed to load movie dataset")?;
    println!(
        "{} Loaded {} movies in {:?}",
        "✓".green(),
        catalog.len(),
        start.elapsed()
    );
    Ok(Arc::new(catalog))
}

/// Handle the 'recommend' command
async fn handle_recommend(
    catalog: Arc<MovieCatalog>,
    preferences: UserPreferences,
    page: usize,
    explain: bool,
) -> Result<()> {
    if catalog.is_empty() {
        bail!("No movie data available");
    }

    let service = RecommendationService::new(catalog);
    let ranked = service.recommend(preferences.clone(), page).await?;

    if ranked.is_empty() {
        println!("{}", "No movies match your preferences.".yellow());
        return Ok(());
    }

    print_recommendations(&ranked, &preferences, explain);
    Ok(())
}

/// Handle the 'revise' command
fn handle_revise(catalog: Arc<MovieCatalog>, title: String, rating: i32) -> Result<()> {
    let service = RecommendationService::new(catalog);
    let feedback = Feedback::new(title.clone(), rating);
    let revised = service
        .revise(&feedback)
        .ok_or_else(|| anyhow!("Movie \"{}\" not found", title))?;

    if revised.revised {
        println!(
            "{} Replaced {} with {} ({}, {:.1})",
            "↺".yellow(),
            title,
            revised.movie.title.bold(),
            revised.movie.year,
            revised.movie.vote_average
        );
    } else {
        println!(
            "{} Keeping {} ({}, {:.1})",
            "✓".green(),
            revised.movie.title.bold(),
            revised.movie.year,
            revised.movie.vote_average
        );
    }
    Ok(())
}

/// Handle the 'quick' command
fn handle_quick(catalog: Arc<MovieCatalog>, query: QuickMatchQuery, limit: usize) -> Result<()> {
    let matches = QuickMatchScorer::new()
        .with_limit(limit)
        .top_matches(catalog.movies(), &query);

    println!("{}", "Closest matches:".bold().blue());
    for (rank, (movie, distance)) in matches.iter().enumerate() {
        println!(
            "{}. {} [{}] {} min, rated {:.1} - distance {:.2}",
            (rank + 1).to_string().green(),
            movie.title,
            movie.main_genre,
            movie.runtime,
            movie.vote_average,
            distance
        );
    }
    Ok(())
}

/// Handle the 'genres' command
fn handle_genres(catalog: Arc<MovieCatalog>) -> Result<()> {
    let (min_year, max_year) = catalog.year_bounds();
    println!(
        "{}",
        format!("{} movies released {}-{}", catalog.len(), min_year, max_year)
            .bold()
            .blue()
    );
    for genre in catalog.genres() {
        println!(
            "{}{} ({} movies)",
            "• ".green(),
            genre,
            catalog.movies_by_genre(genre).len()
        );
    }
    Ok(())
}

/// Handle the 'preprocess' command
fn handle_preprocess(input: &Path, output: &Path) -> Result<()> {
    let start = Instant::now();
    let summary = data_loader::preprocess(input, output)
        .with_context(|| format!("Failed to preprocess {}", input.display()))?;

    println!(
        "{} Wrote {} of {} rows to {} ({} dropped) in {:?}",
        "✓".green(),
        summary.rows_written,
        summary.rows_read,
        output.display(),
        summary.rows_dropped(),
        start.elapsed()
    );
    Ok(())
}

/// Handle the 'benchmark' command
async fn handle_benchmark(catalog: Arc<MovieCatalog>, requests: usize) -> Result<()> {
    if requests == 0 {
        bail!("Benchmark needs at least one request");
    }

    let genres: Vec<String> = catalog.genres().into_iter().map(str::to_string).collect();
    let service = RecommendationService::new(catalog);

    // Random preferences: one genre and one duration bucket per request
    let preferences: Vec<UserPreferences> = (0..requests)
        .map(|_| {
            let mut prefs = UserPreferences::new();
            if !genres.is_empty() {
                let genre = &genres[rand::random::<u32>() as usize % genres.len()];
                prefs = prefs.with_genre(genre.clone());
            }
            let bucket = DurationBucket::ALL[rand::random::<u32>() as usize % DurationBucket::ALL.len()];
            prefs.with_duration(bucket.code())
        })
        .collect();

    let wall_clock = Instant::now();
    let mut handles = vec![];
    for prefs in preferences {
        let service = service.clone();
        let handle = tokio::spawn(async move {
            let start = Instant::now();
            service.recommend(prefs, 1).await?;
            Ok::<_, anyhow::Error>(start.elapsed())
        });
        handles.push(handle);
    }

    let mut timings = vec![];
    for handle in handles {
        let elapsed = handle.await??;
        timings.push(elapsed);
    }
    let total_time = wall_clock.elapsed();
    debug!("Collected {} timings", timings.len());

    let latency_sum: Duration = timings.iter().sum();
    let avg_latency = latency_sum / (timings.len() as u32);
    timings.sort();
    let percentile = |p: f64| timings[((timings.len() as f64 * p) as usize).min(timings.len() - 1)];
    let throughput = requests as f64 / total_time.as_secs_f64();

    println!("Benchmark results:");
    println!("Total time: {:?}", total_time);
    println!("Average latency: {:?}", avg_latency);
    println!("P50 latency: {:?}", percentile(0.50));
    println!("P95 latency: {:?}", percentile(0.95));
    println!("P99 latency: {:?}", percentile(0.99));
    println!("Throughput: {:.2} requests/second", throughput);

    Ok(())
}

/// Helper function to format and print recommendations
fn print_recommendations(ranked: &RankedPage, preferences: &UserPreferences, explain: bool) {
    println!(
        "{}",
        format!(
            "Movie Recommendations (page {}, {} matches):",
            ranked.page, ranked.total_matches
        )
        .bold()
        .blue()
    );

    let scorer = SimilarityScorer::new();
    let offset = (ranked.page.saturating_sub(1)) * pipeline::PAGE_SIZE;
    for (i, rec) in ranked.recommendations.iter().enumerate() {
        let movie = &rec.movie;
        println!(
            "{}. {} ({}) [{}] {} min, rated {:.1} - Score: {:.3}",
            (offset + i + 1).to_string().green(),
            movie.title,
            movie.year,
            movie.main_genre,
            movie.runtime,
            movie.vote_average,
            rec.similarity_score
        );
        if explain {
            let terms = scorer.breakdown(movie, preferences);
            println!(
                "   genre {:.3} + rating {:.3} + duration {:.3} + year {:.3}",
                terms.genre, terms.rating, terms.duration, terms.year
            );
        }
    }
}
