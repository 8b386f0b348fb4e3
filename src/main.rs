use forkify::{is_sample_id, AppConfig, RecipeDetail, RecipeModel, SearchState};
use log::error;
use std::env;
use std::process::ExitCode;

const USAGE: &str = "Usage:
  forkify [all]                 list a sample of recipes
  forkify search <query> [page] search recipes
  forkify recipe <id>           show one recipe";

const LOCAL_DATA_BANNER: &str = "Showing local recipes - the recipe API is not available right now";

enum Command {
    All,
    Search { query: String, page: usize },
    Recipe { id: String },
}

fn parse_args(args: &[String]) -> Result<Command, String> {
    match args.first().map(String::as_str) {
        None | Some("all") => Ok(Command::All),
        Some("search") => {
            let query = args.get(1).ok_or("Please provide a search query")?.clone();
            let page = match args.get(2) {
                Some(page) => page
                    .parse()
                    .map_err(|_| format!("Invalid page number: {page}"))?,
                None => 1,
            };
            Ok(Command::Search { query, page })
        }
        Some("recipe") => {
            let id = args.get(1).ok_or("Please provide a recipe id")?.clone();
            Ok(Command::Recipe { id })
        }
        Some(other) => Err(format!("Unknown command: {other}")),
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::init();

    let args: Vec<String> = env::args().skip(1).collect();
    let command = match parse_args(&args) {
        Ok(command) => command,
        Err(message) => {
            eprintln!("{message}\n\n{USAGE}");
            return ExitCode::from(2);
        }
    };

    match run(command).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(command: Command) -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    let mut model = RecipeModel::from_config(config)?;

    match command {
        Command::All => {
            model.load_all_recipes().await?;
            print_banner(&model);
            print_page(&mut model, 1);
        }
        Command::Search { query, page } => {
            model.load_search_results(&query).await?;
            print_banner(&model);
            print_page(&mut model, page);
        }
        Command::Recipe { id } => {
            model.load_recipe(&id).await?;
            print_banner(&model);
            if let Some(recipe) = model.state().recipe() {
                if is_sample_id(&recipe.id, &model.config().fallback.sample_ids) {
                    println!("(sample recipe)");
                }
                print_recipe(recipe);
            }
        }
    }

    Ok(())
}

fn print_banner(model: &RecipeModel) {
    if model.state().is_using_local_data() {
        println!("{LOCAL_DATA_BANNER}\n");
    }
}

fn print_page(model: &mut RecipeModel, page: usize) {
    for result in model.get_search_results_page(Some(page)) {
        println!("{:<28} {} ({})", result.id, result.title, result.publisher);
    }
    print_pagination(model.state().search());
}

fn print_pagination(search: &SearchState) {
    if search.results().is_empty() {
        println!("No recipes found for '{}'", search.query());
        return;
    }
    println!("\nPage {} of {}", search.page(), search.page_count());
    if search.has_previous_page() {
        println!("  previous: page {}", search.page() - 1);
    }
    if search.has_next_page() {
        println!("  next: page {}", search.page() + 1);
    }
}

fn print_recipe(recipe: &RecipeDetail) {
    println!("{}", recipe.title);
    println!("by {}", recipe.publisher);
    println!(
        "{} minutes, {} servings",
        recipe.cooking_time, recipe.servings
    );
    println!("\nIngredients:");
    for ingredient in &recipe.ingredients {
        let quantity = ingredient
            .quantity
            .map(|q| format!("{q} "))
            .unwrap_or_default();
        let unit = if ingredient.unit.is_empty() {
            String::new()
        } else {
            format!("{} ", ingredient.unit)
        };
        println!("  - {quantity}{unit}{}", ingredient.description);
    }
    if !recipe.source_url.is_empty() {
        println!("\nDirections: {}", recipe.source_url);
    }
}
