//! Coursebook CLI
//!
//! Terminal front end for the course catalog: command-line flags stand in for
//! the course form, a text table for the course list, and an SQLite file for
//! local storage.

mod table;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use coursebook_core::config::CatalogConfig;
use coursebook_core::loader::{load_from_store, LoadOrigin};
use coursebook_core::store::{KeyValueStore, SqliteStore, COURSES_KEY, REJECTED_COURSES_KEY};
use coursebook_core::{Action, CourseFilter, CourseRepository, Outcome, RawCourseInput};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use table::TableRenderer;

#[derive(Parser)]
#[command(author, version, about = "Coursebook - course catalog editor")]
struct Args {
    /// Catalog store file (default: .coursebook/coursebook.db)
    #[arg(long, global = true)]
    store: Option<PathBuf>,
    /// Seed catalog used on first run: a JSON file path or an http(s) URL
    #[arg(long, global = true)]
    seed: Option<String>,
    #[command(subcommand)]
    command: Option<CliCommand>,
}

#[derive(Subcommand)]
enum CliCommand {
    /// List every course with its index (default)
    List,
    /// Show one course in full
    Show { index: usize },
    /// Add a new course
    Add(AddArgs),
    /// Edit the course at INDEX; omitted fields keep their current value
    Edit {
        index: usize,
        #[command(flatten)]
        fields: FieldArgs,
    },
    /// Delete the course at INDEX
    Delete {
        index: usize,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Show only core courses, or electives of one category
    Filter {
        /// all, core or elective
        kind: String,
        #[arg(short, long)]
        category: Option<String>,
    },
    /// List elective categories
    Categories,
    /// Show where the catalog lives and when it was last saved
    Status,
}

/// The four fields shared by the add and edit forms
#[derive(clap::Args, Default)]
struct FieldArgs {
    #[arg(long)]
    code: Option<String>,
    #[arg(long)]
    name: Option<String>,
    #[arg(long)]
    credits: Option<String>,
    #[arg(long)]
    description: Option<String>,
}

#[derive(clap::Args)]
struct AddArgs {
    #[command(flatten)]
    fields: FieldArgs,
    /// core or elective
    #[arg(long = "type")]
    course_type: Option<String>,
    /// Elective category, or "other" together with --new-category
    #[arg(long)]
    category: Option<String>,
    #[arg(long)]
    new_category: Option<String>,
}

impl FieldArgs {
    fn apply(self, input: &mut RawCourseInput) {
        if let Some(code) = self.code {
            input.course_code = code;
        }
        if let Some(name) = self.name {
            input.course_name = name;
        }
        if let Some(credits) = self.credits {
            input.credits = credits;
        }
        if let Some(description) = self.description {
            input.description = description;
        }
    }
}

impl AddArgs {
    fn into_input(self) -> RawCourseInput {
        let mut input = RawCourseInput {
            course_type: self.course_type.unwrap_or_default(),
            category: self.category.unwrap_or_default(),
            new_category: self.new_category.unwrap_or_default(),
            ..Default::default()
        };
        self.fields.apply(&mut input);
        input
    }
}

fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn confirm(prompt: &str) -> Result<bool> {
    print!("{} [y/N] ", prompt);
    io::stdout().flush()?;
    let mut answer = String::new();
    io::stdin()
        .lock()
        .read_line(&mut answer)
        .context("Failed to read confirmation")?;
    Ok(matches!(answer.trim(), "y" | "Y" | "yes"))
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let args = Args::parse();
    let config = CatalogConfig::resolve(args.store, args.seed);
    let store = SqliteStore::open_at(&config.store_path)
        .with_context(|| format!("Failed to open store {}", config.store_path.display()))?;
    let seed = config.seed.clone().into_source();

    let loaded = load_from_store(&store, seed.as_ref()).await;
    if loaded.origin == LoadOrigin::Empty {
        eprintln!(
            "No courses loaded (seed {} unavailable); starting with an empty catalog.",
            seed.describe()
        );
    }
    let mut repo = CourseRepository::new(loaded.catalog, store, TableRenderer::stdout());

    let action = match args.command.unwrap_or(CliCommand::List) {
        CliCommand::List => Action::List,
        CliCommand::Show { index } => Action::Get(index),
        CliCommand::Add(add) => Action::Add(add.into_input()),
        CliCommand::Edit { index, fields } => {
            let mut input = RawCourseInput::from_course(repo.get(index)?);
            fields.apply(&mut input);
            Action::Edit { index, input }
        }
        CliCommand::Delete { index, yes } => {
            let course = repo.get(index)?;
            let prompt = format!(
                "Are you sure you want to delete {} ({})?",
                course.course_code, course.course_name
            );
            if !yes && !confirm(&prompt)? {
                println!("Delete cancelled.");
                return Ok(());
            }
            Action::Delete(index)
        }
        CliCommand::Filter { kind, category } => {
            Action::Filter(CourseFilter::from_selection(&kind, category.as_deref())?)
        }
        CliCommand::Categories => {
            for (category, courses) in repo.catalog().electives() {
                println!("{} ({} courses)", category, courses.len());
            }
            return Ok(());
        }
        CliCommand::Status => {
            let saved = repo.store().updated_at(COURSES_KEY)?;
            println!("store:      {}", config.store_path.display());
            println!("seed:       {}", seed.describe());
            println!("courses:    {}", repo.catalog().courses().len());
            println!(
                "electives:  {} in {} categories",
                repo.catalog().len() - repo.catalog().courses().len(),
                repo.catalog().electives().len()
            );
            match saved {
                Some(at) => println!("last saved: {}", at.to_rfc3339()),
                None => println!("last saved: never"),
            }
            if repo.store().get(REJECTED_COURSES_KEY)?.is_some() {
                println!("set aside:  unreadable catalog kept under {}", REJECTED_COURSES_KEY);
            }
            return Ok(());
        }
    };

    match repo.dispatch(action)? {
        Outcome::Found { index, course } => {
            println!("#{}", index);
            println!("{}", serde_json::to_string_pretty(&course)?);
        }
        outcome => {
            if let Some(message) = outcome.message() {
                println!("{}", message);
            }
        }
    }

    Ok(())
}
