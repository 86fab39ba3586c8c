use data_loader::MovieCatalog;
use std::path::Path;
use std::time::Instant;

fn main() {
    let path = Path::new("data/processed_movies.csv");

    println!("Loading movie catalog...\n");

    let start = Instant::now();
    let catalog = MovieCatalog::load_from_csv(path)
        .expect("Failed to load dataset");
    let elapsed = start.elapsed();

    let (min_year, max_year) = catalog.year_bounds();

    println!("\n=== Load Complete ===");
    println!("Time taken: {:?}", elapsed);
    println!("Movies: {}", catalog.len());
    println!("Genres: {}", catalog.genres().len());
    println!("Years: {} to {}", min_year, max_year);
    println!("\nPerformance: {:.0} movies/second",
             catalog.len() as f64 / elapsed.as_secs_f64());
}
