/// assetdex API demo
///
/// Builds a small listing on disk and walks through the query surface:
/// - Catalog loading and product resolution
/// - Pagination, categories, directory views, search
/// - Reloading after the listing changes

use std::fs;
use std::sync::Arc;
use assetdex::api::service::FileListService;
use assetdex::catalog::Catalog;
use assetdex::core::config::Config;
use tracing_subscriber::EnvFilter;

const LISTING: &str = "\
images/demo-faces/face-1.webp?v=20240301_101500
images/home/City/city-1.webp?v=20240301_101500
images/home/City/city-2.webp?v=20240301_101500
images/home/cover.webp
images/options/backdrops/blur/studio-blur.webp
images/options/backdrops/studio.webp?v=20240302_090000
images/options/poses/standing.png
";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let root = tempfile::TempDir::new()?;
    fs::create_dir_all(root.path().join("headshot-ai"))?;
    fs::write(root.path().join("headshot-ai/files.txt"), LISTING)?;

    let config = Config {
        listing_root: root.path().to_path_buf(),
        ..Config::default()
    };
    let catalog = Arc::new(Catalog::open(&config));
    let service = FileListService::new(catalog.clone(), config.api.clone());

    let resolved = catalog
        .resolver()
        .resolve(Some("headshot.localhost:8080"), "/images/home/");
    println!("Resolved request: {:?}", resolved);
    let product = resolved.product.as_deref().unwrap_or("headshot-ai");

    println!("\nHealth:\n{}", serde_json::to_string_pretty(&service.health(product)?)?);
    println!("\nPage 1:\n{}", serde_json::to_string_pretty(&service.files(product, Some(1), Some(3))?)?);
    println!("\nCategories:\n{}", serde_json::to_string_pretty(&service.categories(product)?)?);
    println!("\nBackdrops:\n{}", serde_json::to_string_pretty(&service.category_files(product, "backdrops", None, None)?)?);
    println!("\nDirectory images/home:\n{}", serde_json::to_string_pretty(&service.directory(product, "images/home")?)?);
    println!("\nSearch 'blur':\n{}", serde_json::to_string_pretty(&service.search(product, "blur", false)?)?);

    // Simulate the generator rewriting the listing
    let updated = format!("{}images/options/poses/walking.png\n", LISTING);
    fs::write(root.path().join("headshot-ai/files.txt"), updated)?;
    for (slug, outcome) in catalog.reload_all() {
        println!("\nReload {}: {:?}", slug, outcome.map_err(|e| e.to_string()));
    }

    println!("\nStats:\n{}", serde_json::to_string_pretty(&service.stats(product)?)?);
    Ok(())
}
