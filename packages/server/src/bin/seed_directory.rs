// Seed the directory with curated categories, proprietary targets, and
// alternatives. Category assignment for each alternative is inferred from
// its descriptive text via the keyword rule table.

use altdir_core::common::utils::slugify;
use altdir_core::config::Config;
use altdir_core::domains::catalog::{
    Alternative, AlternativeStatus, CreateAlternative, ProprietaryTool, SubmissionPlan, TechStack,
};
use altdir_core::domains::taxonomy::{
    match_categories, matcher::candidate_text, Category, CATEGORY_RULES, DEFAULT_CATEGORIES,
};
use anyhow::{Context, Result};
use clap::Parser;
use serde::Deserialize;
use sqlx::PgPool;

#[derive(Parser, Debug)]
#[command(about = "Seed the directory database with curated records")]
struct Args {
    /// Path to the curated seed data file
    #[arg(long, default_value = "data/directory_seed.json")]
    data: String,
}

#[derive(Debug, Deserialize)]
struct SeedData {
    categories: Vec<CategoryInput>,
    tech_stacks: Vec<TechStackInput>,
    proprietary_tools: Vec<ProprietaryInput>,
    alternatives: Vec<AlternativeInput>,
}

#[derive(Debug, Deserialize)]
struct CategoryInput {
    slug: String,
    name: String,
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TechStackInput {
    slug: String,
    name: String,
}

#[derive(Debug, Deserialize)]
struct ProprietaryInput {
    slug: String,
    name: String,
    website: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AlternativeInput {
    name: String,
    tagline: String,
    description: String,
    repository_url: String,
    website: Option<String>,
    license: String,
    alternative_to: Vec<String>,
    #[serde(default)]
    tech_stacks: Vec<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config = Config::from_env()?;

    let pool = PgPool::connect(&config.database_url)
        .await
        .context("Failed to connect to database")?;

    println!("✓ Connected to database");

    let json_data =
        std::fs::read_to_string(&args.data).context("Failed to read seed data file")?;
    let seed_data: SeedData =
        serde_json::from_str(&json_data).context("Failed to parse seed data")?;

    println!(
        "✓ Loaded {} categories, {} proprietary tools, {} alternatives from JSON",
        seed_data.categories.len(),
        seed_data.proprietary_tools.len(),
        seed_data.alternatives.len()
    );

    println!("\n🚀 Starting seed process...\n");

    // Phase 1: categories. These must exist before matching: the matcher
    // resolves rule labels against the stored slug set.
    for category in &seed_data.categories {
        Category::find_or_create(
            &category.slug,
            &category.name,
            category.description.as_deref(),
            &pool,
        )
        .await
        .with_context(|| format!("Failed to upsert category {}", category.slug))?;
    }
    println!("✓ Upserted {} categories", seed_data.categories.len());

    for stack in &seed_data.tech_stacks {
        TechStack::find_or_create(&stack.slug, &stack.name, &pool)
            .await
            .with_context(|| format!("Failed to upsert tech stack {}", stack.slug))?;
    }
    println!("✓ Upserted {} tech stacks", seed_data.tech_stacks.len());

    // Phase 2: proprietary targets.
    for tool in &seed_data.proprietary_tools {
        ProprietaryTool::find_or_create(&tool.slug, &tool.name, tool.website.as_deref(), &pool)
            .await
            .with_context(|| format!("Failed to upsert proprietary tool {}", tool.slug))?;
    }
    println!(
        "✓ Upserted {} proprietary tools",
        seed_data.proprietary_tools.len()
    );

    // Phase 3: alternatives with inferred categories.
    let available = Category::existing_slugs(&pool).await?;

    let mut created_count = 0;
    let mut skipped_count = 0;

    for (idx, input) in seed_data.alternatives.iter().enumerate() {
        println!(
            "[{}/{}] Processing: {}",
            idx + 1,
            seed_data.alternatives.len(),
            input.name
        );

        if let Some(_existing) =
            Alternative::find_duplicate(&input.name, &input.repository_url, &pool).await?
        {
            println!("  ⊘ Skipping (already exists)");
            skipped_count += 1;
            continue;
        }

        let category_slugs = infer_categories(input, &available);
        println!("  → Categories: {:?}", category_slugs);

        let record = Alternative::create(
            CreateAlternative {
                slug: slugify(&input.name),
                name: input.name.clone(),
                tagline: input.tagline.clone(),
                description: input.description.clone(),
                repository_url: input.repository_url.clone(),
                website: input.website.clone(),
                license: input.license.clone(),
                status: AlternativeStatus::Approved,
                plan: SubmissionPlan::Free,
                owner_id: None,
                backlink_verified: false,
                payment_ref: None,
            },
            &pool,
        )
        .await
        .context("Failed to insert alternative")?;

        link_labels(&record, input, &category_slugs, &pool).await?;

        println!("  ✓ Created with {} categories", category_slugs.len());
        created_count += 1;
    }

    println!("\n✨ Seed complete!");
    println!("   Created: {}", created_count);
    println!("   Skipped: {}", skipped_count);
    println!("   Total: {}", seed_data.alternatives.len());

    Ok(())
}

/// Run the keyword matcher over the candidate's descriptive text.
fn infer_categories(
    input: &AlternativeInput,
    available: &std::collections::HashSet<String>,
) -> Vec<String> {
    let alternative_to = input.alternative_to.join(" ");
    let text = candidate_text(&[&alternative_to, &input.tagline, &input.description]);
    match_categories(&text, CATEGORY_RULES, available, DEFAULT_CATEGORIES)
}

async fn link_labels(
    record: &Alternative,
    input: &AlternativeInput,
    category_slugs: &[String],
    pool: &PgPool,
) -> Result<()> {
    let mut category_ids = Vec::with_capacity(category_slugs.len());
    for slug in category_slugs {
        if let Some(category) = Category::find_by_slug(slug, pool).await? {
            category_ids.push(category.id);
        }
    }
    Alternative::set_categories(record.id, &category_ids, pool).await?;

    for tool in ProprietaryTool::find_by_slugs(&input.alternative_to, pool).await? {
        Alternative::link_proprietary(record.id, tool.id, pool).await?;
    }

    for stack in TechStack::find_by_slugs(&input.tech_stacks, pool).await? {
        Alternative::link_tech_stack(record.id, stack.id, pool).await?;
    }

    Ok(())
}
