use crate::infra::{load_catalog, parse_option};
use clap::Args;
use std::collections::BTreeMap;
use std::path::PathBuf;
use toolstack::catalog::{CatalogCsvImporter, CatalogRepository, InMemoryCatalog};
use toolstack::config::AppConfig;
use toolstack::error::AppError;
use toolstack::quiz::{
    quiz_steps, BudgetBracket, CatalogSnapshot, Goal, QuizAnswers, QuizResult, QuizSetupError,
    Recommendation, RecommendationEngine, Role, ScoringConfig, SelectionMode, TechnicalLevel,
    WorkflowPreference,
};
use toolstack::telemetry;

#[derive(Args, Debug, Default)]
pub(crate) struct RecommendArgs {
    /// Role answer (e.g. developer, solo-creator)
    #[arg(long, value_parser = parse_option::<Role>)]
    pub(crate) role: Option<Role>,
    /// Goal answer; repeat for several goals
    #[arg(long = "goal", value_parser = parse_option::<Goal>)]
    pub(crate) goals: Vec<Goal>,
    /// Technical level answer (beginner, somewhat, very)
    #[arg(long, value_parser = parse_option::<TechnicalLevel>)]
    pub(crate) technical: Option<TechnicalLevel>,
    /// Budget answer (free, under-20, 20-100, no-limit)
    #[arg(long, value_parser = parse_option::<BudgetBracket>)]
    pub(crate) budget: Option<BudgetBracket>,
    /// Workflow answer (simple, feature-rich, ai-first, visual)
    #[arg(long, value_parser = parse_option::<WorkflowPreference>)]
    pub(crate) workflow: Option<WorkflowPreference>,
    /// Print the result as JSON
    #[arg(long)]
    pub(crate) json: bool,
    /// Print the per-signal score of every ranked tool
    #[arg(long)]
    pub(crate) explain: bool,
}

#[derive(Args, Debug)]
pub(crate) struct CatalogImportArgs {
    /// Tools CSV export (slug,name,category,traits,monthly_cost,...)
    #[arg(long)]
    pub(crate) csv: PathBuf,
}

pub(crate) fn run_quiz_steps() -> Result<(), AppError> {
    for (index, step) in quiz_steps().iter().enumerate() {
        let mode = match step.selection {
            SelectionMode::Single => "pick one",
            SelectionMode::Multi => "pick any",
        };
        println!("{}. {} ({mode})", index + 1, step.question);
        for option in &step.options {
            println!("   - {:<16} {}", option.value, option.label);
        }
    }
    Ok(())
}

pub(crate) fn run_quiz_recommend(args: RecommendArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    telemetry::init_for_cli(&config.telemetry)?;

    let catalog = load_catalog(&config.catalog)?;
    let engine = build_engine(&catalog)?;

    let answers = QuizAnswers::new(
        args.role,
        args.goals,
        args.technical,
        args.budget,
        args.workflow,
    );
    let result = engine.recommend(&answers);

    if args.json {
        let rendered = serde_json::to_string_pretty(&result)
            .map_err(|err| AppError::Io(err.into()))?;
        println!("{rendered}");
    } else {
        render_result(&catalog, &result);
    }

    if args.explain {
        println!("\nScore breakdown (role + goals + technical + workflow + budget):");
        for item in engine.rank(&answers) {
            let signals = item.breakdown;
            println!(
                "  {:<12} {:>5.1} = {:.1} + {:.1} + {:.1} + {:.1} + {:.1}",
                item.slug.as_str(),
                item.score,
                signals.role,
                signals.goals,
                signals.technical,
                signals.workflow,
                signals.budget
            );
        }
    }

    Ok(())
}

pub(crate) fn run_catalog_import(args: CatalogImportArgs) -> Result<(), AppError> {
    let tools = CatalogCsvImporter::from_path(&args.csv)?;
    let snapshot = CatalogSnapshot::from_tools(&tools).map_err(QuizSetupError::from)?;

    let mut per_category: BTreeMap<&str, usize> = BTreeMap::new();
    for item in snapshot.items() {
        *per_category.entry(item.category.as_str()).or_default() += 1;
    }
    let paid = snapshot.items().iter().filter(|item| !item.is_free()).count();

    println!("Catalog export {}", args.csv.display());
    println!(
        "- {} tools parsed | {} published into the scoring snapshot | {} without a free tier",
        tools.len(),
        snapshot.len(),
        paid
    );
    println!("Tools per category:");
    for (category, count) in per_category {
        println!("  - {category}: {count}");
    }
    Ok(())
}

fn build_engine(catalog: &InMemoryCatalog) -> Result<RecommendationEngine, AppError> {
    let tools = catalog.tools()?;
    let snapshot = CatalogSnapshot::from_tools(&tools).map_err(QuizSetupError::from)?;
    Ok(RecommendationEngine::new(ScoringConfig::standard(), snapshot))
}

fn render_result(catalog: &InMemoryCatalog, result: &QuizResult) {
    println!("Top pick");
    render_recommendation(catalog, &result.top_pick);

    if result.alternatives.is_empty() {
        println!("\nNo alternatives available");
    } else {
        println!("\nAlternatives");
        for alternative in &result.alternatives {
            render_recommendation(catalog, alternative);
        }
    }

    if !result.related_article_slugs.is_empty() {
        println!("\nRelated reading");
        match catalog.posts_by_slugs(&result.related_article_slugs) {
            Ok(posts) => {
                for post in posts {
                    println!("  - {} ({})", post.title, post.post_type.label());
                }
            }
            Err(err) => println!("  Related posts unavailable: {err}"),
        }
    }
}

fn render_recommendation(catalog: &InMemoryCatalog, recommendation: &Recommendation) {
    let name = match catalog.tool_by_slug(&recommendation.slug) {
        Ok(Some(tool)) => format!("{} [{}]", tool.name, tool.pricing_summary),
        Ok(None) | Err(_) => recommendation.slug.to_string(),
    };
    println!("  - {name} (score {:.1})", recommendation.score);
    println!("    {}", recommendation.reason);
}
