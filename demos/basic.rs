//! Basic example demonstrating the libraries.io API client.
//!
//! Run with:
//! ```
//! LIBRARIES_API_KEY=your-key cargo run --example basic
//! ```

use librariesio::{
    PageOutcome, Project, ProjectDependencies, RequestOptions, Search, SearchFilter, SearchQuery,
    SearchSort, Subscribe,
};

#[tokio::main]
async fn main() -> librariesio::Result<()> {
    // Initialize tracing for debugging (optional)
    tracing_subscriber::fmt::init();

    println!("Creating libraries.io facades...");
    let search = Search::from_env()?;
    let subscribe = Subscribe::from_env()?;
    println!("Connected to: {}", search.session().base_url());

    // Single project lookup
    println!("\n--- Project ---");
    let outcome = search.project("pypi", "requests", RequestOptions::default()).await?;
    match outcome.into_result() {
        Ok(response) => {
            let project: Project = response.decode()?;
            println!(
                "{}/{} latest {} ({})",
                project.platform,
                project.name,
                project.latest_version().unwrap_or("?"),
                project.license_summary()
            );
        }
        Err(e) => println!("Lookup failed: {}", e),
    }

    // Dependencies of the latest version
    println!("\n--- Dependencies ---");
    let outcome = search
        .project_dependencies("pypi", "requests", None, RequestOptions::default())
        .await?;
    if let Ok(response) = outcome.into_result() {
        let deps: ProjectDependencies = response.decode()?;
        for dep in &deps.dependencies {
            let flag = if dep.needs_attention() { " (!)" } else { "" };
            println!(
                "  - {} {}{}",
                dep.project_name,
                dep.requirements.as_deref().unwrap_or("*"),
                flag
            );
        }
    }

    // Walk the first few pages of a search
    println!("\n--- Search: http clients on PyPI ---");
    let query = SearchQuery::text("http client")
        .sort(SearchSort::Stars)
        .filter(SearchFilter::Platforms, "Pypi");
    let mut pages = search.project_search_pages(query, RequestOptions::default().per_page(10))?;
    for _ in 0..3 {
        match pages.next_page().await? {
            PageOutcome::Page(page) => {
                let projects: Vec<Project> = page.decode()?;
                for project in projects {
                    println!("  - {} ({} stars)", project.name, project.stars);
                }
            }
            PageOutcome::End(reason) => {
                println!("Stopped: {:?}", reason);
                break;
            }
        }
    }

    // Subscriptions of the key's owner
    println!("\n--- Subscriptions ---");
    let subscribed = subscribe.check_if_subscribed("pypi", "requests").await?;
    println!("Subscribed to pypi/requests: {}", subscribed);

    println!("\nDone!");
    Ok(())
}
