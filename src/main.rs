// contrib-finder: recommend GitHub repositories to contribute to.
//
// Thin driver over the library: parses filters, runs one search and prints
// a table or JSON.

use anyhow::{Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand};
use chrono::Utc;
use contrib_finder::github::RateLimitResource;
use contrib_finder::recommend::{CONTRIBUTION_TYPES, ProjectMaturity, readme, resolve_token};
use contrib_finder::{
    GitHubClient, RecommendConfig, Repository, RepositorySearchService, SearchFilters, SearchMode,
    SearchOptions, SearchOrder, SearchQueryBuilder, SearchSort, UserLanguageSettings,
    license_info,
};

#[derive(Debug, Parser)]
#[command(
    name = "contrib-finder",
    version,
    about = "Find open-source repositories that welcome your contributions"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Rank repositories by language and contribution type.
    Recommend(RecommendArgs),
    /// Run a plain GitHub repository search.
    Search(SearchArgs),
    /// Inspect one repository the way the recommender sees it.
    Show(ShowArgs),
    /// List the known contribution types.
    Types,
}

#[derive(Debug, Args)]
struct RecommendArgs {
    /// Preferred language; the first one drives the upstream search.
    #[arg(long = "language", short = 'l', value_name = "LANG", required = true)]
    languages: Vec<String>,

    /// Contribution type id (see `contrib-finder types`).
    #[arg(long = "type", short = 't', value_name = "TYPE", required = true)]
    types: Vec<String>,

    #[arg(long, default_value_t = 1)]
    page: u32,

    #[arg(long, default_value_t = 30)]
    limit: u32,

    /// Keep only repositories using one of these languages.
    #[arg(long = "include-language", value_name = "LANG", conflicts_with = "exclude_languages")]
    include_languages: Vec<String>,

    /// Drop repositories using any of these languages.
    #[arg(long = "exclude-language", value_name = "LANG")]
    exclude_languages: Vec<String>,

    #[command(flatten)]
    output: OutputArgs,
}

#[derive(Debug, Args)]
struct SearchArgs {
    #[arg(long = "language", short = 'l', value_name = "LANG")]
    languages: Vec<String>,

    #[arg(long = "topic", value_name = "TOPIC")]
    topics: Vec<String>,

    #[arg(long = "license", value_name = "KEY")]
    licenses: Vec<String>,

    #[arg(long = "min-stars")]
    min_stars: Option<u32>,

    #[arg(long = "max-stars")]
    max_stars: Option<u32>,

    /// Only repositories with open good-first-issues.
    #[arg(long = "good-first-issues", action = ArgAction::SetTrue)]
    good_first_issues: bool,

    #[arg(long, default_value_t = 1)]
    page: u32,

    #[arg(long = "per-page", default_value_t = 30)]
    per_page: u8,

    #[command(flatten)]
    output: OutputArgs,
}

#[derive(Debug, Args)]
struct ShowArgs {
    /// Repository as `owner/name`.
    #[arg(value_name = "OWNER/NAME")]
    repository: String,

    #[command(flatten)]
    output: OutputArgs,
}

#[derive(Debug, Args)]
struct OutputArgs {
    /// GitHub personal access token (overrides GITHUB_TOKEN).
    #[arg(long, value_name = "TOKEN")]
    token: Option<String>,

    /// Print JSON instead of a table.
    #[arg(long, action = ArgAction::SetTrue)]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    match cli.command {
        Command::Recommend(args) => recommend(args).await,
        Command::Search(args) => search(args).await,
        Command::Show(args) => show(args).await,
        Command::Types => {
            for ct in &CONTRIBUTION_TYPES {
                println!("{:<18} {:<18} {}", ct.id, ct.label, ct.description);
            }
            Ok(())
        }
    }
}

async fn recommend(args: RecommendArgs) -> Result<()> {
    let filters = SearchFilters::new(args.languages, args.types)
        .with_page(args.page)
        .with_limit(args.limit);
    filters.validate()?;

    let settings = if !args.include_languages.is_empty() {
        Some(UserLanguageSettings {
            search_mode: SearchMode::Include,
            included_languages: args.include_languages,
            excluded_languages: Vec::new(),
        })
    } else if !args.exclude_languages.is_empty() {
        Some(UserLanguageSettings {
            search_mode: SearchMode::Exclude,
            included_languages: Vec::new(),
            excluded_languages: args.exclude_languages,
        })
    } else {
        None
    };

    let service =
        RepositorySearchService::from_token(args.output.token.as_deref(), RecommendConfig::from_env())?;
    let response = service
        .search_repositories(&filters, settings.as_ref())
        .await?;

    if args.output.json {
        println!("{}", serde_json::to_string_pretty(&response)?);
    } else {
        println!(
            "{} shown, {} upstream matches (page {})",
            response.repositories.len(),
            response.total_count,
            response.page
        );
        print_table(&response.repositories);
    }
    Ok(())
}

async fn search(args: SearchArgs) -> Result<()> {
    let mut builder = SearchQueryBuilder::new()
        .languages(args.languages)
        .topics(args.topics)
        .licenses(args.licenses)
        .good_first_issues(args.good_first_issues);
    if let Some(min) = args.min_stars {
        builder = builder.min_stars(min);
    }
    if let Some(max) = args.max_stars {
        builder = builder.max_stars(max);
    }
    let query = builder.build();

    let client = client_for(&args.output)?;

    let options = SearchOptions {
        sort: SearchSort::Stars,
        order: SearchOrder::Desc,
        per_page: args.per_page,
        page: args.page,
    };
    let page = client
        .search_repositories(&query, options)
        .await
        .with_context(|| format!("searching for `{query}`"))?;

    if args.output.json {
        println!("{}", serde_json::to_string_pretty(&page)?);
    } else {
        println!("{} matches for `{query}`", page.total_count);
        print_table(&page.items);
    }
    Ok(())
}

async fn show(args: ShowArgs) -> Result<()> {
    let (owner, name) = args
        .repository
        .split_once('/')
        .filter(|(o, n)| !o.is_empty() && !n.is_empty())
        .with_context(|| format!("expected OWNER/NAME, got `{}`", args.repository))?;
    let client = client_for(&args.output)?;

    let details = client
        .get_repository_details(owner, name)
        .await
        .with_context(|| format!("fetching {owner}/{name}"))?;
    let (languages, has_contributing_guide, good_first_issues, readme_text) = futures::try_join!(
        client.get_repository_languages(owner, name),
        client.check_contributing_guide(owner, name),
        client.get_good_first_issues(owner, name),
        client.get_readme_content(owner, name),
    )?;

    let repo = Repository {
        languages,
        has_contributing_guide,
        good_first_issues_count: u32::try_from(good_first_issues.len()).unwrap_or(u32::MAX),
        readme_analysis: readme_text
            .as_deref()
            .filter(|text| !text.is_empty())
            .map(|text| readme::analyze(Some(text))),
        ..details
    };

    if args.output.json {
        println!("{}", serde_json::to_string_pretty(&repo)?);
        return Ok(());
    }

    print_table(std::slice::from_ref(&repo));
    println!("maturity:             {}", ProjectMaturity::classify(&repo, Utc::now()).as_str());
    println!("contributing guide:   {}", repo.has_contributing_guide);
    println!("good first issues:    {}", repo.good_first_issues_count);
    if let Some(analysis) = &repo.readme_analysis {
        println!(
            "README score:         {:.2} (friendly: {})",
            analysis.contribution_score, analysis.is_contribution_friendly
        );
        for reason in &analysis.reasons {
            println!("  - {reason}");
        }
    }
    let core = client.rate_limit_status(RateLimitResource::Core).await;
    println!("core requests left:   {} (resets {})", core.remaining, core.reset);
    Ok(())
}

fn client_for(output: &OutputArgs) -> Result<GitHubClient> {
    let mut client = GitHubClient::builder();
    if let Some(token) = resolve_token(output.token.as_deref()) {
        client = client.personal_token(token);
    }
    client.build().context("building GitHub client")
}

fn print_table(repos: &[Repository]) {
    println!(
        "{:<6} {:<45} {:>7} {:<12} {}",
        "SCORE", "REPOSITORY", "STARS", "LANGUAGE", "LICENSE"
    );
    for repo in repos {
        let score = repo
            .score
            .map_or_else(|| "-".to_string(), |s| format!("{s:.2}"));
        let license = license_info(repo.license.as_ref().map(|l| l.key.as_str()))
            .map_or_else(|| "-".to_string(), |info| info.name);
        println!(
            "{:<6} {:<45} {:>7} {:<12} {}",
            score,
            repo.full_name,
            repo.stargazers_count,
            repo.language.as_deref().unwrap_or("-"),
            license
        );
    }
}
