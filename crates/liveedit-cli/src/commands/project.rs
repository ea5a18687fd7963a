use anyhow::{Context, Result};
use liveedit_core::{BundleDraft, RenderEngine};
use liveedit_storage::ProjectStore;
use std::path::{Path, PathBuf};

use crate::cli::ProjectCommands;

pub async fn handle(cmd: ProjectCommands, store: &ProjectStore) -> Result<()> {
    match cmd {
        ProjectCommands::List => list(store).await,
        ProjectCommands::Show { id } => show(store, id).await,
        ProjectCommands::Save {
            name,
            description,
            markup,
            style,
            script,
        } => {
            let mut draft = BundleDraft::new(
                name,
                read_blob(markup.as_deref())?,
                read_blob(style.as_deref())?,
                read_blob(script.as_deref())?,
            );
            if let Some(description) = description {
                draft = draft.with_description(description);
            }
            save(store, draft).await
        }
        ProjectCommands::Delete { id } => delete(store, id).await,
        ProjectCommands::Render { id, output } => render(store, id, output).await,
    }
}

async fn list(store: &ProjectStore) -> Result<()> {
    let projects = store.list_all().await?;

    if projects.is_empty() {
        println!("No projects found.");
        return Ok(());
    }

    println!("Projects:");
    for project in projects {
        println!("  {} ({})", project.name, project.id);
        println!("    Saved: {}  Size: {}", project.created_at, project.size_estimate);
    }

    Ok(())
}

async fn show(store: &ProjectStore, id: String) -> Result<()> {
    let project = store.get_by_id(&id).await?;

    println!("Project: {}", project.name);
    println!("  ID: {}", project.id);
    if !project.description.is_empty() {
        println!("  Description: {}", project.description);
    }
    println!("  Saved: {}", project.created_at);
    println!("  Size: {}", project.size_estimate);
    println!("\nMarkup:\n{}", project.markup);
    println!("\nStyle:\n{}", project.style);
    println!("\nScript:\n{}", project.script);

    Ok(())
}

async fn save(store: &ProjectStore, draft: BundleDraft) -> Result<()> {
    let project = draft.into_bundle()?;
    let id = project.id.clone();
    let name = project.name.clone();
    let size = project.size_estimate.clone();

    store.save(project).await?;

    println!("✓ Saved project: {}", name);
    println!("  ID: {}", id);
    println!("  Size: {}", size);

    Ok(())
}

async fn delete(store: &ProjectStore, id: String) -> Result<()> {
    let removed = store.delete_by_id(&id).await?;
    println!("✓ Deleted project: {} ({})", removed.name, removed.id);
    Ok(())
}

async fn render(store: &ProjectStore, id: String, output: Option<PathBuf>) -> Result<()> {
    let project = store.get_by_id(&id).await?;
    let document = RenderEngine::new().compose(&project);

    match output {
        Some(path) => {
            std::fs::write(&path, document.as_html())
                .with_context(|| format!("failed to write {}", path.display()))?;
            println!("✓ Rendered {} to {}", project.name, path.display());
        }
        None => print!("{}", document.as_html()),
    }

    Ok(())
}

/// Read a blob from `path`, or an empty blob when no file is given
fn read_blob(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display())),
        None => Ok(String::new()),
    }
}
